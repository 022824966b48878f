//! Manage and merge the various sources of config:
//! the project's `build-assets.toml` and provided args.
//!
//! Every subcommand reads its own table of the file, e.g.
//!
//! ```toml
//! [embed-shaders]
//! shader-dir = "shaders/"
//! exclude = [".git"]
//! sorted = true
//! ```
//!
//! Values given on the command line win over the file, unless they are the defaults.

use core::fmt::Debug;
use std::{fs, path::Path};

use anyhow::Context as _;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{from_value, json, to_value, Value};

use crate::merge::{merge, overlay};

/// Name of the config file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "build-assets.toml";

/// Options of a subcommand which can also be set in a table of the config file.
pub trait ConfigSection: Debug + Default + Serialize + DeserializeOwned {
    /// Name of the table in the config file.
    const SECTION: &'static str;
}

/// Overrides the config options from the config file at `config_file`
/// with options from the provided config.
///
/// A missing config file is the same as an empty one.
///
/// # Errors
///
/// Fails if the config file exists but cannot be read or parsed.
#[inline]
pub fn from_config_file_with_config<M>(config_file: &Path, config: &M) -> anyhow::Result<M>
where
    M: ConfigSection,
{
    let from_file = from_config_file(config_file)?;
    let merged = merge(&from_file, config)?;
    Ok(merged)
}

/// Reads the table of `M` from the config file, falling back to defaults.
fn from_config_file<M>(config_file: &Path) -> anyhow::Result<M>
where
    M: ConfigSection,
{
    if !config_file.is_file() {
        log::debug!(
            "no config file at '{}', using defaults",
            config_file.display()
        );
        return Ok(M::default());
    }

    log::debug!("reading config file '{}'...", config_file.display());
    let text = fs::read_to_string(config_file)
        .with_context(|| format!("could not read config file '{}'", config_file.display()))?;
    let document: Value = toml::from_str(&text)
        .with_context(|| format!("could not parse config file '{}'", config_file.display()))?;
    let section = section_value::<M>(&document).with_context(|| {
        format!(
            "invalid `[{}]` table in config file '{}'",
            M::SECTION,
            config_file.display()
        )
    })?;

    log::debug!("found `[{}]` config: {section:#?}", M::SECTION);
    Ok(section)
}

/// Retrieves the value of the `M` table from the config document in JSON format.
fn section_value<M>(document: &Value) -> anyhow::Result<M>
where
    M: ConfigSection,
{
    let json_patch_from_file = document
        .get(M::SECTION)
        .cloned()
        .unwrap_or_else(|| json!({}))
        .keys_to_snake_case();

    let json_default = to_value(M::default())?;
    let mut json_value = json_default.clone();
    overlay(&mut json_value, json_patch_from_file, &json_default);

    let value = from_value(json_value)?;
    Ok(value)
}

/// Extension trait for [JSON value](Value).
trait JsonKeysToSnakeCase {
    /// Converts JSON keys from kebab case to snake case, e.g. from `a-b` to `a_b`.
    ///
    /// Detection of keys for [`serde`] deserialization must match the case in the Rust structs.
    /// However, [`clap`] and the config file use kebab case. So here we do the conversion.
    fn keys_to_snake_case(self) -> Value;
}

impl JsonKeysToSnakeCase for Value {
    #[inline]
    #[expect(clippy::wildcard_enum_match_arm, reason = "we only want objects")]
    fn keys_to_snake_case(self) -> Value {
        match self {
            Self::Object(object) => Self::Object(
                object
                    .into_iter()
                    .map(|(key, value)| (key.replace('-', "_"), value.keys_to_snake_case()))
                    .collect(),
            ),
            other => other,
        }
    }
}
