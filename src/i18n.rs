//! Locale message bundles.
//!
//! Each locale has one JSON file, `{messages_dir}/{locale}.json`, mapping
//! translation keys to strings. Keys may be grouped into nested objects;
//! the nesting flattens into dotted keys:
//!
//! ```json
//! { "Get Budgie": "Get Budgie",
//!   "Home": { "Tabs": { "MenuHeader": "A menu that gets out of your way" } } }
//! ```
//!
//! yields `Get Budgie` and `Home.Tabs.MenuHeader`.
//!
//! Bundles are read-only after loading. A missing or malformed file fails
//! the build; there is no fallback locale.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("Cannot read message bundle {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed message bundle {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Message bundle {path}: key {key} must map to a string or an object")]
    InvalidValue { path: PathBuf, key: String },
}

/// Translated strings for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct Messages {
    pub locale: String,
    entries: BTreeMap<String, String>,
}

impl Messages {
    pub fn new(locale: impl Into<String>, entries: BTreeMap<String, String>) -> Self {
        Self {
            locale: locale.into(),
            entries,
        }
    }

    /// Look up a key. A missing key renders as the key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Keys from `keys` that this bundle does not define.
    pub fn missing_keys<'k>(&self, keys: &[&'k str]) -> Vec<&'k str> {
        keys.iter()
            .copied()
            .filter(|k| !self.entries.contains_key(*k))
            .collect()
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

/// Path of a locale's bundle inside the messages directory.
pub fn bundle_path(dir: &Path, locale: &str) -> PathBuf {
    dir.join(format!("{locale}.json"))
}

/// Load `{dir}/{locale}.json`.
pub fn load_messages(dir: &Path, locale: &str) -> Result<Messages, I18nError> {
    let path = bundle_path(dir, locale);
    let content = fs::read_to_string(&path).map_err(|source| I18nError::Io {
        path: path.clone(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| I18nError::Json {
        path: path.clone(),
        source,
    })?;
    let mut entries = BTreeMap::new();
    flatten(&value, "", &mut entries).map_err(|key| I18nError::InvalidValue { path, key })?;
    Ok(Messages::new(locale, entries))
}

/// Load every locale's bundle, in the given order.
pub fn load_all(dir: &Path, locales: &[String]) -> Result<Vec<Messages>, I18nError> {
    locales.iter().map(|l| load_messages(dir, l)).collect()
}

/// Flatten nested objects into dotted keys. Returns the offending key on a
/// non-string leaf.
fn flatten(
    value: &Value,
    prefix: &str,
    out: &mut BTreeMap<String, String>,
) -> Result<(), String> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let full = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(child, &full, out)?;
            }
            Ok(())
        }
        Value::String(s) if !prefix.is_empty() => {
            out.insert(prefix.to_string(), s.clone());
            Ok(())
        }
        _ => Err(if prefix.is_empty() {
            "<root>".to_string()
        } else {
            prefix.to_string()
        }),
    }
}
