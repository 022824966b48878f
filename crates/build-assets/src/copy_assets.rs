//! `build-assets copy-assets`, copies shared libraries next to the built executables.

use std::{io, path::PathBuf};

use anyhow::Context as _;
use asset_copier::AssetManifest;

use crate::config::ConfigSection;

/// `copy-assets` subcommand
#[derive(clap::Parser, Debug, serde::Deserialize, serde::Serialize)]
#[non_exhaustive]
pub struct CopyAssets {
    /// Path to the asset manifest. Without it, the built-in asset table is used.
    #[clap(long)]
    pub manifest: Option<PathBuf>,

    /// Configuration to assemble, may be given several times. Defaults to all of them.
    #[clap(long = "configuration", short = 'c')]
    pub configurations: Vec<String>,

    /// Overrides the directory the libraries are checked out in.
    #[clap(long)]
    pub library_home: Option<PathBuf>,

    /// Overrides the root of the project checkout.
    #[clap(long)]
    pub project_root: Option<PathBuf>,

    /// Overrides the directory below the project root holding one directory per configuration.
    #[clap(long)]
    pub output_root: Option<PathBuf>,
}

impl Default for CopyAssets {
    #[inline]
    fn default() -> Self {
        clap::Parser::parse_from([""])
    }
}

impl ConfigSection for CopyAssets {
    const SECTION: &'static str = "copy-assets";
}

impl CopyAssets {
    /// Loads the manifest and applies the overrides to it.
    ///
    /// # Errors
    ///
    /// Fails if the manifest cannot be loaded.
    #[inline]
    pub fn manifest(&self) -> anyhow::Result<AssetManifest> {
        let mut manifest = match &self.manifest {
            Some(path) => AssetManifest::load(path)
                .with_context(|| format!("loading asset manifest '{}'", path.display()))?,
            None => {
                log::debug!("no asset manifest given, using the built-in asset table");
                AssetManifest::default()
            }
        };

        if let Some(library_home) = &self.library_home {
            manifest.library_home.clone_from(library_home);
        }
        if let Some(project_root) = &self.project_root {
            manifest.project_root.clone_from(project_root);
        }
        if let Some(output_root) = &self.output_root {
            manifest.output_root.clone_from(output_root);
        }
        Ok(manifest)
    }

    /// Entrypoint
    ///
    /// # Errors
    ///
    /// Fails if the manifest cannot be loaded, names an unknown configuration, or any copy fails.
    #[inline]
    pub fn run(&self) -> anyhow::Result<()> {
        let manifest = self.manifest()?;
        let selected = manifest.select(&self.configurations)?;
        log::debug!(
            "copying from '{}' into '{}'",
            crate::resolved(&manifest.library_home).display(),
            crate::resolved(&manifest.project_root.join(&manifest.output_root)).display()
        );

        crate::user_output!("Assembling {} configuration(s)...\n", selected.len());
        let reports = manifest
            .assemble(&selected, &mut io::stdout().lock())
            .context("copying assets failed")?;

        for report in &reports {
            log::info!(
                "{}: copied {} files",
                report.configuration,
                report.copied.len()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use clap::Parser as _;

    use crate::test::TestEnv;

    use super::*;

    #[test_log::test]
    fn overrides_apply_to_builtin_table() {
        let args = CopyAssets::parse_from([
            "copy-assets",
            "--library-home",
            "/opt/lib",
            "--output-root",
            "out",
        ]);

        let manifest = args.manifest().unwrap();
        assert_eq!(manifest.library_home, PathBuf::from("/opt/lib"));
        assert_eq!(manifest.project_root, PathBuf::from("../"));
        assert_eq!(manifest.output_root, PathBuf::from("out"));
        assert_eq!(manifest.assets.len(), 2);
    }

    #[test_log::test]
    fn copies_from_manifest_file() {
        let env = TestEnv::new();
        let home = env.path().join("lib");
        fs::create_dir_all(home.join("glew/bin")).unwrap();
        fs::write(home.join("glew/bin/glew32.dll"), b"glew").unwrap();
        fs::create_dir_all(env.path().join("build/Release")).unwrap();
        let manifest = env.write_file(
            "assets.toml",
            &[
                "[[assets]]",
                "root = \"glew\"",
                "sub-path = \"bin\"",
                "file-name = \"glew32.dll\"",
            ],
        );

        let args = CopyAssets::parse_from([
            "copy-assets".as_ref(),
            "--manifest".as_ref(),
            manifest.as_os_str(),
            "--library-home".as_ref(),
            home.as_os_str(),
            "--project-root".as_ref(),
            env.path().as_os_str(),
            "-c".as_ref(),
            "Release".as_ref(),
        ]);
        args.run().unwrap();

        assert_eq!(
            fs::read(env.path().join("build/Release/glew32.dll")).unwrap(),
            b"glew"
        );
    }

    #[test_log::test]
    fn unknown_configuration_fails() {
        let args = CopyAssets::parse_from(["copy-assets", "-c", "Profile"]);
        let err = args.run().unwrap_err();
        assert!(err.to_string().contains("Profile"));
    }
}
