//! Build identifier resolution.
//!
//! The build id versions the generated site. A `BUILD_ID` environment
//! variable wins when set and non-empty, so CI can pin it to a commit or
//! release; otherwise the id is the current Unix time in milliseconds.

use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variable consulted by [`build_id_from_env`].
pub const BUILD_ID_ENV: &str = "BUILD_ID";

/// Resolve a build id from an optional override.
pub fn resolve_build_id(env_value: Option<&str>) -> String {
    match env_value {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => timestamp_millis().to_string(),
    }
}

/// Resolve the build id from the `BUILD_ID` environment variable.
pub fn build_id_from_env() -> String {
    let value = std::env::var(BUILD_ID_ENV).ok();
    resolve_build_id(value.as_deref())
}

fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
