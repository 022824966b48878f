//! Generator of a C++ header with shader sources hardcoded as strings.
//!
//! Programs which load their shaders from disk at runtime need the shader directory
//! to be shipped next to them. This crate instead reads every file of a shader
//! directory and writes a header which declares one string constant per shader
//! and a `g_shaderMap` lookup table from the shader's file name to its source,
//! filled in by `initShaderList()`.
//!
//! # Generated header
//!
//! For a directory with `basic.vert` containing `void main(){}`, the output is:
//!
//! ```text
//! /* GENERATED FILE - DO NOT EDIT!
//!  * Created by build-assets embed-shaders.
//!  *
//!  */
//!
//! #include <map>
//! #include <string>
//!
//! const char* basic_vert = 
//!     "void main(){}\n"
//! ;
//!
//!
//! std::map<std::string, std::string> g_shaderMap;
//!
//!
//! void initShaderList() {
//!     g_shaderMap["basic.vert"] = basic_vert;
//! }
//! ```
//!
//! Blank lines of the shader sources are dropped unless [`BlankLines::Keep`] is asked for.
//! When the shader directory does not exist, the header only contains a comment saying so.

#![expect(clippy::pub_use, reason = "part of public API")]

pub mod discover;
pub mod identifier;
pub mod output;
pub mod render;

use core::fmt;
use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

pub use self::{
    discover::{discover_shaders, ShaderOrder, ShaderSource},
    identifier::{escape_line, identifier_for},
    output::write_atomically,
    render::{render, render_missing, BlankLines},
};

/// Where to find the shaders, where to put the header and how to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct EmbedOptions {
    /// Directory containing the shader sources.
    pub shader_dir: PathBuf,
    /// Path of the generated header.
    pub output: PathBuf,
    /// Directory entry names which are never treated as shaders.
    pub exclude: Vec<String>,
    /// Order in which shaders appear in the header.
    pub order: ShaderOrder,
    /// What to do with empty source lines.
    pub blank_lines: BlankLines,
}

impl Default for EmbedOptions {
    #[inline]
    fn default() -> Self {
        Self {
            shader_dir: PathBuf::from("shaders/"),
            output: PathBuf::from("autogen/g_shaders.h"),
            exclude: vec![".svn".to_owned()],
            order: ShaderOrder::Listing,
            blank_lines: BlankLines::Skip,
        }
    }
}

impl EmbedOptions {
    /// Options reading from `shader_dir` and writing to `output`, everything else default.
    #[inline]
    #[expect(clippy::impl_trait_in_params, reason = "just a struct new")]
    pub fn new(shader_dir: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            shader_dir: shader_dir.into(),
            output: output.into(),
            ..Self::default()
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EmbedOutcome {
    /// The shader directory does not exist, a placeholder header was written.
    MissingDirectory,
    /// The header was generated.
    Embedded {
        /// File names of the embedded shaders, in header order.
        shaders: Vec<String>,
    },
}

/// An error indicating failure while generating the shader header.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EmbedError {
    /// The shader directory could not be listed.
    #[error("could not list shader directory '{}': {source}", .path.display())]
    ListDirectory {
        /// The shader directory.
        path: PathBuf,
        /// Source of the error.
        source: io::Error,
    },
    /// A shader could not be read, or is not valid UTF-8.
    #[error("could not read shader '{}': {source}", .path.display())]
    ReadShader {
        /// Path of the shader.
        path: PathBuf,
        /// Source of the error.
        source: io::Error,
    },
    /// A file name cannot be turned into a shader name or identifier.
    #[error("invalid shader file name {0:?}")]
    InvalidName(String),
    /// Two shaders map to the same identifier.
    #[error("shaders `{first}` and `{second}` would both be declared as `{identifier}`")]
    DuplicateIdentifier {
        /// The clashing identifier.
        identifier: String,
        /// File name of the shader which claimed the identifier first.
        first: String,
        /// File name of the other shader.
        second: String,
    },
    /// The header could not be rendered.
    #[error("could not render shader header: {0}")]
    Render(#[source] fmt::Error),
    /// The directory of the header could not be created.
    #[error("could not create output directory '{}': {source}", .path.display())]
    CreateOutputDir {
        /// The output directory.
        path: PathBuf,
        /// Source of the error.
        source: io::Error,
    },
    /// The header could not be written.
    #[error("could not write shader header '{}': {source}", .path.display())]
    WriteOutput {
        /// Path of the header.
        path: PathBuf,
        /// Source of the error.
        source: io::Error,
    },
    /// IO error occurred while writing progress output.
    #[error("failed to write progress output: {0}")]
    Diagnostic(#[source] io::Error),
}

/// Generates the shader header.
///
/// Discovered shader names are written to `writer` as they are found.
/// The header is replaced atomically, so a failed run leaves any previous header intact.
///
/// # Errors
///
/// Fails if the shader directory cannot be listed, a shader cannot be read,
/// two shaders would share an identifier, or the header cannot be written.
/// A missing shader directory is not an error.
#[inline]
pub fn embed_shaders<W>(options: &EmbedOptions, writer: &mut W) -> Result<EmbedOutcome, EmbedError>
where
    W: io::Write,
{
    if !options.shader_dir.is_dir() {
        log::warn!(
            "shader directory '{}' does not exist",
            options.shader_dir.display()
        );
        writeln!(
            writer,
            "Directory {} does not exist.",
            options.shader_dir.display()
        )
        .map_err(EmbedError::Diagnostic)?;
        write_atomically(&options.output, &render_missing(&options.shader_dir))?;
        return Ok(EmbedOutcome::MissingDirectory);
    }

    let names = discover_shaders(&options.shader_dir, &options.exclude, options.order, writer)?;
    let shaders = read_shaders(&options.shader_dir, &names)?;
    let mut header = String::new();
    render(&mut header, &shaders, options.blank_lines).map_err(EmbedError::Render)?;
    write_atomically(&options.output, &header)?;

    log::info!(
        "embedded {} shaders into '{}'",
        shaders.len(),
        options.output.display()
    );
    Ok(EmbedOutcome::Embedded { shaders: names })
}

/// Reads every shader, making sure no two of them share an identifier.
fn read_shaders(shader_dir: &Path, names: &[String]) -> Result<Vec<ShaderSource>, EmbedError> {
    let mut claimed: HashMap<String, &str> = HashMap::with_capacity(names.len());
    let mut shaders = Vec::with_capacity(names.len());
    for name in names {
        let shader = ShaderSource::read(shader_dir, name)?;
        if let Some(first) = claimed.insert(shader.identifier.clone(), name.as_str()) {
            return Err(EmbedError::DuplicateIdentifier {
                identifier: shader.identifier,
                first: first.to_owned(),
                second: name.clone(),
            });
        }
        shaders.push(shader);
    }
    Ok(shaders)
}
