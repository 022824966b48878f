//! Replacing the generated header without ever leaving a partial one behind.

use std::{
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use crate::EmbedError;

/// Writes `contents` to a temporary file next to `path`, then renames it over `path`.
///
/// The parent directory of `path` is created if missing. Permissions of an existing
/// file at `path` are kept.
///
/// # Errors
///
/// Fails if the directory cannot be created or the file cannot be written or renamed.
#[inline]
pub fn write_atomically(path: &Path, contents: &str) -> Result<(), EmbedError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|source| EmbedError::CreateOutputDir {
        path: dir.clone(),
        source,
    })?;

    let write_error = |source| EmbedError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };
    let mut file = tempfile::NamedTempFile::new_in(&dir).map_err(write_error)?;
    log::debug!(
        "writing '{}' through '{}'",
        path.display(),
        file.path().display()
    );
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;

    let permissions = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => default_permissions(),
    };
    if let Some(permissions) = permissions {
        fs::set_permissions(file.path(), permissions).map_err(write_error)?;
    }

    file.persist(path).map_err(|err| write_error(err.error))?;
    Ok(())
}

/// Temporary files are private to the user; generated headers should not be.
#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt as _;
    Some(fs::Permissions::from_mode(0o644))
}

/// Temporary files are private to the user; generated headers should not be.
#[cfg(not(unix))]
const fn default_permissions() -> Option<fs::Permissions> {
    None
}
