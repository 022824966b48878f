//! Finding and reading the shader sources.

use std::{fs, io, path::Path};

use crate::{identifier::identifier_for, EmbedError};

/// Order of the shaders in the generated header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ShaderOrder {
    /// Whatever order the file system lists the directory in.
    ///
    /// This is not guaranteed to be stable between machines, or even between runs,
    /// so the header may change although the shaders did not.
    #[default]
    Listing,
    /// Sorted by file name.
    Sorted,
}

/// A shader file, split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ShaderSource {
    /// File name, including the extension. Used as the key of the lookup table.
    pub file_name: String,
    /// Name of the variable holding the source.
    pub identifier: String,
    /// Lines of the source, without line endings.
    pub lines: Vec<String>,
}

impl ShaderSource {
    /// Creates a shader from its file name and text.
    ///
    /// # Errors
    ///
    /// Fails if no identifier can be derived from the file name.
    #[inline]
    pub fn new(file_name: &str, text: &str) -> Result<Self, EmbedError> {
        Ok(Self {
            file_name: file_name.to_owned(),
            identifier: identifier_for(file_name)?,
            lines: split_lines(text),
        })
    }

    /// Reads the shader `file_name` from `shader_dir`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid UTF-8.
    #[inline]
    pub fn read(shader_dir: &Path, file_name: &str) -> Result<Self, EmbedError> {
        let path = shader_dir.join(file_name);
        log::debug!("reading shader '{}'", path.display());
        let text =
            fs::read_to_string(&path).map_err(|source| EmbedError::ReadShader { path, source })?;
        Self::new(file_name, &text)
    }
}

/// Splits `text` at `\n`, `\r\n` and lone `\r` line endings, which are dropped.
///
/// A line ending at the very end does not start another, empty line.
fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split_terminator(['\n', '\r'])
        .map(ToOwned::to_owned)
        .collect()
}

/// Lists the shader file names in `shader_dir`, skipping `exclude`d entries.
///
/// Every name is written to `writer` on its own line.
///
/// # Errors
///
/// Fails if the directory cannot be listed or contains a name which is not valid UTF-8.
#[inline]
pub fn discover_shaders<W>(
    shader_dir: &Path,
    exclude: &[String],
    order: ShaderOrder,
    writer: &mut W,
) -> Result<Vec<String>, EmbedError>
where
    W: io::Write,
{
    let list_error = |source| EmbedError::ListDirectory {
        path: shader_dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for maybe_entry in fs::read_dir(shader_dir).map_err(list_error)? {
        let entry = maybe_entry.map_err(list_error)?;
        let name = entry
            .file_name()
            .into_string()
            .map_err(|name| EmbedError::InvalidName(name.to_string_lossy().into_owned()))?;
        if exclude.contains(&name) {
            log::debug!("skipping excluded entry `{name}`");
            continue;
        }
        names.push(name);
    }

    if order == ShaderOrder::Sorted {
        names.sort();
    }
    for name in &names {
        writeln!(writer, "{name}").map_err(EmbedError::Diagnostic)?;
    }
    log::debug!("found {} shaders", names.len());
    Ok(names)
}
