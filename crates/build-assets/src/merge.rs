//! Layering of option structs: command line values over config file values.
//!
//! A value given on the command line only counts as given when it differs from its
//! default, since `clap` cannot tell an explicit default apart from an omitted argument.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{from_value, to_value, Result, Value};

/// Returns `base` with every field of `patch` that isn't at its default value applied on top.
#[inline]
pub fn merge<T>(base: &T, patch: &T) -> Result<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    let mut merged = to_value(base)?;
    overlay(&mut merged, to_value(patch)?, &to_value(T::default())?);
    from_value(merged)
}

/// Walks `patch` and `defaults` side by side, copying into `base` every leaf of `patch`
/// which differs from the corresponding leaf of `defaults`.
///
/// Keys of `patch` unknown to `defaults` are ignored. Objects are merged key by key,
/// anything else (including arrays) is replaced as a whole.
#[inline]
pub fn overlay(base: &mut Value, patch: Value, defaults: &Value) {
    match (patch, defaults) {
        (Value::Object(fields), Value::Object(default_fields)) => {
            if !base.is_object() {
                *base = Value::Object(serde_json::Map::new());
            }
            let Value::Object(base_fields) = base else {
                return;
            };
            for (key, value) in fields {
                let Some(default) = default_fields.get(&key) else {
                    log::debug!("ignoring unknown option `{key}`");
                    continue;
                };
                let slot = base_fields.entry(key).or_insert(Value::Null);
                overlay(slot, value, default);
            }
        }
        (leaf, default) => {
            if leaf != *default {
                *base = leaf;
            }
        }
    }
}
