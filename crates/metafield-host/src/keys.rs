//! Metadata key validation.
//!
//! Valid keys:
//! - Must be non-empty
//! - Are one or more `.`-separated segments
//! - Segments are non-empty and use only ASCII letters, digits, `_`, and `-`
//!
//! So `zoom`, `render.z_index`, and `poi.icon-set` are valid; `.zoom`,
//! `render..z`, and `has space` are not.

use crate::error::{HostError, Result};

/// Separator between key segments (and between a namespace and a key).
pub const KEY_SEPARATOR: char = '.';

fn is_segment_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// Validate a metadata key, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use metafield_host::keys::validate_key;
///
/// assert!(validate_key("zoom").is_ok());
/// assert!(validate_key("render.z_index").is_ok());
/// assert!(validate_key("").is_err());
/// assert!(validate_key("render..z").is_err());
/// ```
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(invalid(key, "key must not be empty"));
    }

    if key.starts_with(KEY_SEPARATOR) || key.ends_with(KEY_SEPARATOR) {
        return Err(invalid(key, "must not start or end with '.'"));
    }

    for segment in key.split(KEY_SEPARATOR) {
        if segment.is_empty() {
            return Err(invalid(key, "segments must not be empty"));
        }
        if let Some(ch) = segment.chars().find(|ch| !is_segment_char(*ch)) {
            return Err(invalid(key, &format!("contains forbidden character: {ch:?}")));
        }
    }

    Ok(())
}

/// Validate a namespace. Same rules as keys.
pub fn validate_namespace(namespace: &str) -> Result<()> {
    validate_key(namespace).map_err(|_| HostError::InvalidKey {
        key: namespace.to_string(),
        reason: "invalid namespace".into(),
    })
}

/// Join a namespace and a key into a stored key.
pub fn qualify(namespace: &str, key: &str) -> String {
    format!("{namespace}{KEY_SEPARATOR}{key}")
}

fn invalid(key: &str, reason: &str) -> HostError {
    HostError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
