//! Copying of asset files into the output directory of a build configuration.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// One file to copy into the build output directories.
///
/// The source path of the file is `<library home>/<root>/<sub path>/<file name>`.
/// Only the file name is kept at the destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct AssetEntry {
    /// Directory of the library inside of the library home, e.g. `glew/`.
    pub root: PathBuf,
    /// Path from [`root`](Self::root) to the directory containing the file, e.g. `bin/`.
    #[serde(default)]
    pub sub_path: PathBuf,
    /// Name of the file to copy, e.g. `glew32.dll`.
    pub file_name: String,
}

impl AssetEntry {
    /// Creates an entry from its three path components.
    #[inline]
    #[expect(clippy::impl_trait_in_params, reason = "just a struct new")]
    pub fn new(
        root: impl Into<PathBuf>,
        sub_path: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            sub_path: sub_path.into(),
            file_name: file_name.into(),
        }
    }

    /// Resolves the path of the file to copy.
    #[inline]
    #[must_use]
    pub fn source_path(&self, library_home: &Path) -> PathBuf {
        library_home
            .join(&self.root)
            .join(&self.sub_path)
            .join(&self.file_name)
    }
}

/// Where sources are read from and where build output directories live.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Layout {
    /// Directory containing all the library roots.
    pub library_home: PathBuf,
    /// Root of the project checkout.
    pub project_root: PathBuf,
    /// Directory below [`project_root`](Self::project_root) containing one directory per configuration.
    pub output_root: PathBuf,
}

impl Layout {
    /// Creates a layout from its directories.
    #[inline]
    #[expect(clippy::impl_trait_in_params, reason = "just a struct new")]
    pub fn new(
        library_home: impl Into<PathBuf>,
        project_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            library_home: library_home.into(),
            project_root: project_root.into(),
            output_root: output_root.into(),
        }
    }

    /// Output directory of the given build configuration.
    #[inline]
    #[must_use]
    pub fn destination_dir(&self, configuration: &str) -> PathBuf {
        self.project_root
            .join(&self.output_root)
            .join(configuration)
    }
}

/// A single file which was copied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct CopiedAsset {
    /// Where the file was copied from.
    pub source: PathBuf,
    /// Where the file was copied to.
    pub destination: PathBuf,
    /// Number of bytes copied.
    pub bytes: u64,
}

/// Result of assembling one build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct BuildReport {
    /// Name of the assembled configuration.
    pub configuration: String,
    /// Files copied, in the order they were copied.
    pub copied: Vec<CopiedAsset>,
}

/// An error indicating failure while copying assets.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
#[expect(clippy::module_name_repetitions, reason = "this is intended")]
pub enum CopyError {
    /// The file to copy does not exist.
    #[error("source file '{}' does not exist", .path.display())]
    SourceNotFound {
        /// Resolved path of the missing file.
        path: PathBuf,
    },
    /// The output directory of the configuration does not exist.
    #[error("destination directory '{}' does not exist", .path.display())]
    DestinationMissing {
        /// Path of the missing directory.
        path: PathBuf,
    },
    /// IO error occurred while copying a file.
    #[error("could not copy '{}' to '{}': {source}", .source_path.display(), .destination.display())]
    Copy {
        /// File being copied.
        source_path: PathBuf,
        /// Where the file was being copied to.
        destination: PathBuf,
        /// Source of the error.
        source: io::Error,
    },
    /// IO error occurred while writing progress output.
    #[error("failed to write progress output: {0}")]
    Write(#[source] io::Error),
}

/// Copies every entry into the output directory of `configuration`.
///
/// Entries are copied in order, overwriting existing files. Before each copy, the source
/// and destination paths are written to `writer`. Copies are independent of each other:
/// when one fails, the files copied before it stay in place.
///
/// # Errors
///
/// Fails on the first entry whose source does not exist, if the destination directory
/// does not exist, or on any IO error while copying.
#[inline]
pub fn assemble_build<W>(
    configuration: &str,
    entries: &[AssetEntry],
    layout: &Layout,
    writer: &mut W,
) -> Result<BuildReport, CopyError>
where
    W: io::Write,
{
    writeln!(writer, "__Assembling: {configuration}").map_err(CopyError::Write)?;
    let destination_dir = layout.destination_dir(configuration);
    log::debug!(
        "assembling {} entries into '{}'",
        entries.len(),
        destination_dir.display()
    );

    let mut copied = Vec::with_capacity(entries.len());
    for entry in entries {
        let source = entry.source_path(&layout.library_home);
        let destination = destination_dir.join(&entry.file_name);
        writeln!(
            writer,
            "  copy\n    {}\n    {}",
            source.display(),
            destination.display()
        )
        .map_err(CopyError::Write)?;

        copied.push(copy_asset(source, destination, &destination_dir)?);
    }

    log::info!(
        "assembled {} files for configuration {configuration}",
        copied.len()
    );
    Ok(BuildReport {
        configuration: configuration.to_owned(),
        copied,
    })
}

/// Copies a single file, overwriting the destination.
fn copy_asset(
    source: PathBuf,
    destination: PathBuf,
    destination_dir: &Path,
) -> Result<CopiedAsset, CopyError> {
    if !source.is_file() {
        return Err(CopyError::SourceNotFound { path: source });
    }
    if !destination_dir.is_dir() {
        return Err(CopyError::DestinationMissing {
            path: destination_dir.to_path_buf(),
        });
    }

    log::debug!("copying {} to {}", source.display(), destination.display());
    match fs::copy(&source, &destination) {
        Ok(bytes) => Ok(CopiedAsset {
            source,
            destination,
            bytes,
        }),
        Err(err) => Err(CopyError::Copy {
            source_path: source,
            destination,
            source: err,
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Creates a library home with one file and a project with a `build/Debug` directory.
    fn setup() -> (tempfile::TempDir, Layout) {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("lib");
        let project = dir.path().join("project");
        fs::create_dir_all(home.join("glew/bin")).unwrap();
        fs::write(home.join("glew/bin/glew32.dll"), b"\x4d\x5a glew").unwrap();
        fs::create_dir_all(project.join("build/Debug")).unwrap();
        (dir, Layout::new(home, project, "build"))
    }

    #[test_log::test]
    fn source_path_joins_components() {
        let entry = AssetEntry::new("AntTweakBar_116/", "AntTweakBar/lib/", "AntTweakBar.dll");
        assert_eq!(
            entry.source_path(Path::new("C:/lib/")),
            Path::new("C:/lib/AntTweakBar_116/AntTweakBar/lib/AntTweakBar.dll")
        );
    }

    #[test_log::test]
    fn copies_with_identical_contents() {
        let (_dir, layout) = setup();
        let entries = [AssetEntry::new("glew", "bin", "glew32.dll")];
        let mut output = Vec::new();

        let report = assemble_build("Debug", &entries, &layout, &mut output).unwrap();

        let destination = layout.project_root.join("build/Debug/glew32.dll");
        assert_eq!(report.copied.len(), 1);
        assert_eq!(report.copied[0].destination, destination);
        assert_eq!(fs::read(&destination).unwrap(), b"\x4d\x5a glew");

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("__Assembling: Debug\n  copy\n    "));
        assert!(output.contains("glew32.dll"));
    }

    #[test_log::test]
    fn repeated_runs_overwrite() {
        let (_dir, layout) = setup();
        let entries = [AssetEntry::new("glew", "bin", "glew32.dll")];
        let destination = layout.project_root.join("build/Debug/glew32.dll");
        fs::write(&destination, b"stale").unwrap();

        assemble_build("Debug", &entries, &layout, &mut io::sink()).unwrap();
        let first = fs::read(&destination).unwrap();
        assemble_build("Debug", &entries, &layout, &mut io::sink()).unwrap();
        let second = fs::read(&destination).unwrap();

        assert_eq!(first, b"\x4d\x5a glew");
        assert_eq!(first, second);
    }

    #[test_log::test]
    fn missing_source_keeps_earlier_copies() {
        let (_dir, layout) = setup();
        let entries = [
            AssetEntry::new("glew", "bin", "glew32.dll"),
            AssetEntry::new("AntTweakBar_116", "AntTweakBar/lib", "AntTweakBar.dll"),
        ];

        let err = assemble_build("Debug", &entries, &layout, &mut io::sink()).unwrap_err();

        assert!(matches!(err, CopyError::SourceNotFound { ref path } if path.ends_with("AntTweakBar.dll")));
        assert!(layout.project_root.join("build/Debug/glew32.dll").exists());
    }

    #[test_log::test]
    fn missing_destination_directory() {
        let (_dir, layout) = setup();
        let entries = [AssetEntry::new("glew", "bin", "glew32.dll")];

        let err = assemble_build("Release", &entries, &layout, &mut io::sink()).unwrap_err();

        assert!(
            matches!(err, CopyError::DestinationMissing { ref path } if path.ends_with("build/Release"))
        );
    }

    #[test_log::test]
    fn empty_entries_copy_nothing() {
        let (_dir, layout) = setup();
        let report = assemble_build("Release", &[], &layout, &mut io::sink()).unwrap();
        assert!(report.copied.is_empty());
    }
}
