//! The asset manifest: which files to copy, from where, for which configurations.
//!
//! A manifest is a TOML document:
//!
//! ```toml
//! library-home = "C:/lib/"
//! project-root = "../"
//! output-root = "build"
//!
//! [[assets]]
//! root = "glew/"
//! sub-path = "bin/"
//! file-name = "glew32.dll"
//!
//! [[configurations]]
//! name = "Debug"
//!
//! [[configurations]]
//! name = "Release"
//! assets = [{ root = "glew/", sub-path = "bin/", file-name = "glew32-extra.dll" }]
//! ```
//!
//! Keys missing from the document take their value from [`AssetManifest::default`].

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use crate::copy::{assemble_build, AssetEntry, BuildReport, CopyError, Layout};

/// A named build configuration and the files only it needs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub struct BuildConfiguration {
    /// Name of the configuration, also the name of its output directory.
    pub name: String,
    /// Entries copied in addition to the manifest's base list.
    #[serde(default)]
    pub assets: Vec<AssetEntry>,
}

impl BuildConfiguration {
    /// A configuration with no extra entries.
    #[inline]
    #[expect(clippy::impl_trait_in_params, reason = "just a struct new")]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assets: Vec::new(),
        }
    }
}

/// Everything needed to assemble the build output directories.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case", default)]
#[non_exhaustive]
#[expect(clippy::module_name_repetitions, reason = "this is intended")]
pub struct AssetManifest {
    /// Directory where the libraries are checked out.
    pub library_home: PathBuf,
    /// Root of the project checkout.
    pub project_root: PathBuf,
    /// Directory below the project root holding one directory per configuration.
    pub output_root: PathBuf,
    /// Entries every configuration needs.
    pub assets: Vec<AssetEntry>,
    /// Configurations to assemble, in order.
    pub configurations: Vec<BuildConfiguration>,
}

impl Default for AssetManifest {
    #[inline]
    fn default() -> Self {
        Self {
            library_home: PathBuf::from("C:/lib/"),
            project_root: PathBuf::from("../"),
            output_root: PathBuf::from("build"),
            assets: vec![
                AssetEntry::new("AntTweakBar_116/", "AntTweakBar/lib/", "AntTweakBar.dll"),
                AssetEntry::new("glew/", "bin/", "glew32.dll"),
            ],
            configurations: vec![
                BuildConfiguration::new("Debug"),
                BuildConfiguration::new("Release"),
            ],
        }
    }
}

/// An error indicating a manifest which could not be loaded or used.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
#[expect(clippy::module_name_repetitions, reason = "this is intended")]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("could not read asset manifest '{}': {source}", .path.display())]
    Read {
        /// Path of the manifest.
        path: PathBuf,
        /// Source of the error.
        source: io::Error,
    },
    /// The manifest is not valid TOML or does not match the expected layout.
    #[error("could not parse asset manifest: {0}")]
    Parse(#[from] toml::de::Error),
    /// An entry's file name contains directory components.
    #[error("asset file name `{0}` must be a plain file name")]
    InvalidFileName(String),
    /// Two configurations have the same name.
    #[error("configuration `{0}` is declared more than once")]
    DuplicateConfiguration(String),
    /// A configuration was requested which the manifest does not declare.
    #[error("unknown configuration `{0}`")]
    UnknownConfiguration(String),
}

impl AssetManifest {
    /// Parses and validates a manifest.
    ///
    /// # Errors
    ///
    /// Fails if the document is not a valid manifest, see [`ManifestError`].
    #[inline]
    pub fn from_toml_str(text: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reads, parses and validates the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid manifest.
    #[inline]
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        log::debug!("loading asset manifest from '{}'", path.display());
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks that file names are plain and configuration names unique.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    #[inline]
    pub fn validate(&self) -> Result<(), ManifestError> {
        let all_entries = self
            .assets
            .iter()
            .chain(self.configurations.iter().flat_map(|config| &config.assets));
        for entry in all_entries {
            let is_plain = Path::new(&entry.file_name)
                .file_name()
                .is_some_and(|name| name == entry.file_name.as_str());
            if !is_plain {
                return Err(ManifestError::InvalidFileName(entry.file_name.clone()));
            }
        }

        let mut seen = HashSet::new();
        for config in &self.configurations {
            if !seen.insert(config.name.as_str()) {
                return Err(ManifestError::DuplicateConfiguration(config.name.clone()));
            }
        }
        Ok(())
    }

    /// Where sources are read from and outputs written to.
    #[inline]
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(
            self.library_home.clone(),
            self.project_root.clone(),
            self.output_root.clone(),
        )
    }

    /// Looks up a configuration by name.
    ///
    /// # Errors
    ///
    /// Fails if the manifest does not declare the configuration.
    #[inline]
    pub fn configuration(&self, name: &str) -> Result<&BuildConfiguration, ManifestError> {
        self.configurations
            .iter()
            .find(|config| config.name == name)
            .ok_or_else(|| ManifestError::UnknownConfiguration(name.to_owned()))
    }

    /// The base entries followed by the configuration's own entries.
    #[inline]
    #[must_use]
    pub fn entries_for(&self, configuration: &BuildConfiguration) -> Vec<AssetEntry> {
        self.assets
            .iter()
            .chain(&configuration.assets)
            .cloned()
            .collect()
    }

    /// Resolves configuration names, or every configuration when `names` is empty.
    ///
    /// # Errors
    ///
    /// Fails on the first name the manifest does not declare.
    #[inline]
    pub fn select<S>(&self, names: &[S]) -> Result<Vec<&BuildConfiguration>, ManifestError>
    where
        S: AsRef<str>,
    {
        if names.is_empty() {
            return Ok(self.configurations.iter().collect());
        }
        names
            .iter()
            .map(|name| self.configuration(name.as_ref()))
            .collect()
    }

    /// Assembles the given configurations one after the other.
    ///
    /// Each configuration is an independent pass; a failure stops the run, leaving
    /// everything copied so far in place.
    ///
    /// # Errors
    ///
    /// Fails on the first [`CopyError`].
    #[inline]
    pub fn assemble<W>(
        &self,
        configurations: &[&BuildConfiguration],
        writer: &mut W,
    ) -> Result<Vec<BuildReport>, CopyError>
    where
        W: io::Write,
    {
        let layout = self.layout();
        configurations
            .iter()
            .map(|config| {
                let entries = self.entries_for(config);
                assemble_build(&config.name, &entries, &layout, writer)
            })
            .collect()
    }
}
