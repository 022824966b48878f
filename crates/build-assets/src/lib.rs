//! Command line tool for the build chores of the app skeleton.
//!
//! ## Copying assets
//!
//! `build-assets copy-assets` copies prebuilt shared libraries (`AntTweakBar.dll`, `glew32.dll`, ...)
//! into the output directory of every build configuration, so the executables find them.
//! Which files to copy is described by an [asset manifest](asset_copier::AssetManifest),
//! the built-in one being used when none is given.
//!
//! ## Hardcoding shaders
//!
//! `build-assets embed-shaders` reads every file of `shaders/` and generates
//! `autogen/g_shaders.h`, declaring each shader's source as a string together with a
//! filename to source lookup table. See the [`shader_embedder`] crate for the exact format.
//!
//! ## Configuration
//!
//! Both subcommands work without any arguments. Their options may also be set in the
//! `[copy-assets]` and `[embed-shaders]` tables of a `build-assets.toml` in the current
//! directory; command line arguments take precedence.

use std::path::{Path, PathBuf};

use self::{copy_assets::CopyAssets, embed_shaders::EmbedShaders};

pub mod copy_assets;
pub mod embed_shaders;

mod config;
mod merge;

/// Central function to write to the user.
#[macro_export]
macro_rules! user_output {
    ($($args: tt)*) => { {
        #[allow(
            clippy::allow_attributes,
            clippy::useless_attribute,
            unused_imports,
            reason = "`std::io::Write` is only sometimes called??"
        )]
        use std::io::Write as _;

        #[expect(
            clippy::non_ascii_literal,
            reason = "CRAB GOOD. CRAB IMPORTANT."
        )]
        {
            print!("🦀 ");
        }
        print!($($args)*);
        std::io::stdout().flush().ok();
   } }
}

/// All of the available subcommands for `build-assets`
#[derive(clap::Subcommand)]
#[non_exhaustive]
pub enum Command {
    /// Copy shared libraries into the output directory of each build configuration.
    CopyAssets(Box<CopyAssets>),

    /// Generate a C++ header with the shader sources hardcoded as strings.
    EmbedShaders(Box<EmbedShaders>),
}

impl Command {
    /// Runs the command
    ///
    /// # Errors
    /// Any errors during execution, usually printed to the user
    #[inline]
    pub fn run(&self, config_file: &Path) -> anyhow::Result<()> {
        match &self {
            Self::CopyAssets(copy_assets) => {
                let command =
                    config::from_config_file_with_config(config_file, copy_assets.as_ref())?;
                log::debug!("copying assets with final merged arguments: {command:#?}");
                command.run()?;
            }
            Self::EmbedShaders(embed_shaders) => {
                let command =
                    config::from_config_file_with_config(config_file, embed_shaders.as_ref())?;
                log::debug!("embedding shaders with final merged arguments: {command:#?}");
                command.run()?;
            }
        }

        Ok(())
    }
}

/// The struct representing the main CLI.
#[derive(clap::Parser)]
#[clap(author, version, about, subcommand_required = true)]
#[non_exhaustive]
pub struct Cli {
    /// Config file providing defaults for the subcommands.
    #[clap(long, global = true, default_value = config::CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// The command to run.
    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Runs the selected command.
    ///
    /// # Errors
    /// Any errors during execution, usually printed to the user
    #[inline]
    pub fn run(&self) -> anyhow::Result<()> {
        self.command.run(&self.config)
    }
}

/// Canonical form of `path` for showing to the user, or `path` itself if it does not exist yet.
fn resolved(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod cli_test {
    use std::fs;

    use clap::Parser as _;

    use crate::test::TestEnv;

    use super::*;

    #[test_log::test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["build-assets"]).is_err());
    }

    #[test_log::test]
    fn config_file_feeds_subcommand() {
        let env = TestEnv::new();
        let shader_dir = env.path().join("glsl");
        let output = env.path().join("out/g_shaders.h");
        fs::create_dir(&shader_dir).unwrap();
        fs::write(shader_dir.join("z.frag"), "z\n").unwrap();
        fs::write(shader_dir.join("a.vert"), "a\n").unwrap();
        let toml_path = |path: &Path| path.display().to_string().replace('\\', "/");
        env.write_config(&[
            "[embed-shaders]",
            &format!("shader-dir = \"{}\"", toml_path(&shader_dir)),
            &format!("output = \"{}\"", toml_path(&output)),
            "sorted = true",
        ]);

        let cli = Cli::parse_from([
            "build-assets".as_ref(),
            "embed-shaders".as_ref(),
            "--config".as_ref(),
            env.config_file().as_os_str(),
        ]);
        cli.run().unwrap();

        let header = fs::read_to_string(output).unwrap();
        let a = header.find("const char* a_vert").unwrap();
        let z = header.find("const char* z_frag").unwrap();
        assert!(a < z);
    }
}
