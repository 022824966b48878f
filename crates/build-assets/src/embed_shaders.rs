//! `build-assets embed-shaders`, hardcodes the shader sources into a C++ header.

use std::{io, path::PathBuf};

use anyhow::Context as _;
use shader_embedder::{embed_shaders, BlankLines, EmbedOptions, EmbedOutcome, ShaderOrder};

use crate::config::ConfigSection;

/// `embed-shaders` subcommand
#[derive(clap::Parser, Debug, serde::Deserialize, serde::Serialize)]
#[non_exhaustive]
pub struct EmbedShaders {
    /// Directory containing the shader sources.
    #[clap(long, default_value = "shaders/")]
    pub shader_dir: PathBuf,

    /// Path of the generated header.
    #[clap(long, default_value = "autogen/g_shaders.h")]
    pub output: PathBuf,

    /// Directory entry to ignore, may be given several times.
    ///
    /// `.svn` is always ignored, in addition to the entries given here.
    #[clap(long)]
    pub exclude: Vec<String>,

    /// Sort shaders by file name instead of using the directory listing order.
    ///
    /// The listing order depends on the file system, so only sorted output
    /// is guaranteed to be reproducible.
    #[clap(long)]
    pub sorted: bool,

    /// Embed empty lines of the shader sources instead of dropping them.
    #[clap(long)]
    pub keep_blank_lines: bool,
}

impl Default for EmbedShaders {
    #[inline]
    fn default() -> Self {
        clap::Parser::parse_from([""])
    }
}

impl ConfigSection for EmbedShaders {
    const SECTION: &'static str = "embed-shaders";
}

impl EmbedShaders {
    /// Options for the [`shader_embedder`].
    #[inline]
    #[must_use]
    pub fn options(&self) -> EmbedOptions {
        let mut options = EmbedOptions::new(self.shader_dir.clone(), self.output.clone());
        for name in &self.exclude {
            if !options.exclude.contains(name) {
                options.exclude.push(name.clone());
            }
        }
        options.order = if self.sorted {
            ShaderOrder::Sorted
        } else {
            ShaderOrder::Listing
        };
        options.blank_lines = if self.keep_blank_lines {
            BlankLines::Keep
        } else {
            BlankLines::Skip
        };
        options
    }

    /// Entrypoint
    ///
    /// # Errors
    ///
    /// Fails if a shader cannot be read or the header cannot be written.
    #[inline]
    pub fn run(&self) -> anyhow::Result<()> {
        let options = self.options();
        log::debug!("embedding shaders with options: {options:#?}");

        crate::user_output!(
            "Hardcoding shaders from {} into {}...\n",
            self.shader_dir.display(),
            self.output.display()
        );
        let outcome = embed_shaders(&options, &mut io::stdout().lock()).with_context(|| {
            format!(
                "could not generate '{}'",
                crate::resolved(&self.output).display()
            )
        })?;

        match outcome {
            EmbedOutcome::MissingDirectory => {
                log::warn!("wrote placeholder header, there are no shaders to embed");
            }
            EmbedOutcome::Embedded { shaders } => {
                log::info!("embedded shaders: {shaders:?}");
            }
            _ => {}
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
    fn defaults_match_fixed_paths() {
        let args = EmbedShaders::default();
        let options = args.options();
        assert_eq!(options, EmbedOptions::default());
    }

    #[test_log::test]
    fn flags_map_to_options() {
        let args = EmbedShaders::parse_from([
            "embed-shaders",
            "--sorted",
            "--keep-blank-lines",
            "--exclude",
            ".git",
            "--exclude",
            ".svn",
        ]);
        let options = args.options();
        assert_eq!(options.order, ShaderOrder::Sorted);
        assert_eq!(options.blank_lines, BlankLines::Keep);
        assert_eq!(options.exclude, [".svn", ".git"]);
    }

    #[test_log::test]
    fn other_exclusions_keep_svn_excluded() {
        let env = TestEnv::new();
        let shader_dir = env.path().join("shaders");
        fs::create_dir_all(shader_dir.join(".svn")).unwrap();
        fs::create_dir(shader_dir.join(".git")).unwrap();
        fs::write(shader_dir.join("basic.frag"), "void main(){}\n").unwrap();
        let output = env.path().join("autogen/g_shaders.h");

        let args = EmbedShaders::parse_from([
            "embed-shaders".as_ref(),
            "--shader-dir".as_ref(),
            shader_dir.as_os_str(),
            "--output".as_ref(),
            output.as_os_str(),
            "--exclude".as_ref(),
            ".git".as_ref(),
        ]);
        assert_eq!(args.options().exclude, [".svn", ".git"]);
        args.run().unwrap();

        let header = fs::read_to_string(output).unwrap();
        assert!(header.contains("    g_shaderMap[\"basic.frag\"] = basic_frag;\n"));
        assert!(!header.contains("svn"));
        assert!(!header.contains("git"));
    }

    #[test_log::test]
    fn generates_header() {
        let env = TestEnv::new();
        let shader_dir = env.path().join("shaders");
        fs::create_dir(&shader_dir).unwrap();
        fs::write(shader_dir.join("basic.vert"), "void main(){}\n").unwrap();
        let output = env.path().join("autogen/g_shaders.h");

        let args = EmbedShaders::parse_from([
            "embed-shaders".as_ref(),
            "--shader-dir".as_ref(),
            shader_dir.as_os_str(),
            "--output".as_ref(),
            output.as_os_str(),
        ]);
        args.run().unwrap();

        let header = fs::read_to_string(output).unwrap();
        assert!(header.contains("    g_shaderMap[\"basic.vert\"] = basic_vert;\n"));
    }
}
