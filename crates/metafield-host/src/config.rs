use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::keys::validate_namespace;

/// Configuration for a [`crate::MetadataMap`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Prefix applied to every key, joined with `.`. Lets several
    /// subsystems share one host map without colliding.
    pub namespace: Option<String>,
    /// Whether writes through the field interface check key syntax and log
    /// offenders. Explicit inserts always validate.
    pub validate_keys: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            validate_keys: true,
        }
    }
}

impl StoreConfig {
    /// A configuration that prefixes every key with `namespace`.
    pub fn namespaced(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Whether this is the default configuration.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Check that the namespace, if any, is a valid key.
    pub fn validate(&self) -> Result<()> {
        match &self.namespace {
            Some(namespace) => validate_namespace(namespace),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;

    #[test]
    fn default_has_no_namespace() {
        let config = StoreConfig::default();
        assert_eq!(config.namespace, None);
        assert!(config.validate_keys);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_json_fills_defaults() {
        let config = StoreConfig::from_json(r#"{"namespace":"render"}"#).unwrap();
        assert_eq!(config, StoreConfig::namespaced("render"));

        let config = StoreConfig::from_json("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn from_json_rejects_bad_namespace() {
        let err = StoreConfig::from_json(r#"{"namespace":"bad ns"}"#).unwrap_err();
        assert!(matches!(err, HostError::InvalidKey { .. }));
    }

    #[test]
    fn from_json_rejects_malformed_document() {
        let err = StoreConfig::from_json("{namespace").unwrap_err();
        assert!(matches!(err, HostError::Serialization(_)));
    }
}
