//! An ordered, string-keyed metadata map.
//!
//! [`MetadataMap`] is the raw backing store a host object owns. It implements
//! [`MetadataStore`], so any store-backed field reads and writes it directly.
//! Entries are kept in a `BTreeMap` for deterministic iteration and
//! serialization.

use std::borrow::Cow;
use std::collections::BTreeMap;

use metafield_core::MetadataStore;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::keys::{qualify, validate_key, KEY_SEPARATOR};

/// A host object's raw metadata.
///
/// Keys passed to every method are unqualified; when the configuration sets
/// a namespace, it is prefixed transparently. Serde covers the configuration
/// together with the stored (qualified) entries, so a namespaced map reads
/// back the same values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataMap {
    #[serde(default, skip_serializing_if = "StoreConfig::is_default")]
    config: StoreConfig,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl MetadataMap {
    /// Create a new empty map with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty map with `config`.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entries: BTreeMap::new(),
            config,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw string under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        let qualified = self.qualified(key);
        self.entries.get(&*qualified).map(String::as_str)
    }

    /// Insert a raw string after validating the key.
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> Result<Option<String>> {
        validate_key(key)?;
        let qualified = self.qualified(key).into_owned();
        trace!(key = %qualified, "metadata insert");
        Ok(self.entries.insert(qualified, value.into()))
    }

    /// Remove `key`, returning its value if it was set.
    pub fn take(&mut self, key: &str) -> Option<String> {
        let qualified = self.qualified(key);
        self.entries.remove(&*qualified)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Stored (qualified) keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Strip this map's namespace from a stored key.
    ///
    /// Returns `None` for a stored key outside the namespace.
    pub fn unqualify<'a>(&self, stored: &'a str) -> Option<&'a str> {
        match &self.config.namespace {
            Some(namespace) => stored
                .strip_prefix(namespace.as_str())
                .and_then(|rest| rest.strip_prefix(KEY_SEPARATOR)),
            None => Some(stored),
        }
    }

    /// Stored entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Export the stored entries as a flat JSON object. The configuration
    /// is not included; [`MetadataMap::from_json`] takes it separately.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Load stored entries from a JSON object, validating every key.
    pub fn from_json(json: &str, config: StoreConfig) -> Result<Self> {
        let mut map = Self::with_config(config)?;
        let entries: BTreeMap<String, String> = serde_json::from_str(json)?;
        for key in entries.keys() {
            validate_key(key)?;
        }
        map.entries = entries;
        Ok(map)
    }

    fn qualified<'a>(&self, key: &'a str) -> Cow<'a, str> {
        match &self.config.namespace {
            Some(namespace) => Cow::Owned(qualify(namespace, key)),
            None => Cow::Borrowed(key),
        }
    }
}

impl MetadataStore for MetadataMap {
    fn read(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    fn write(&mut self, key: &str, value: String) {
        if self.config.validate_keys {
            if let Err(e) = validate_key(key) {
                warn!(key, error = %e, "writing metadata under an invalid key");
            }
        }
        let qualified = self.qualified(key).into_owned();
        trace!(key = %qualified, "metadata write");
        self.entries.insert(qualified, value);
    }

    fn remove(&mut self, key: &str) {
        if self.take(key).is_some() {
            trace!(key, "metadata remove");
        }
    }

    fn contains(&self, key: &str) -> bool {
        let qualified = self.qualified(key);
        self.entries.contains_key(&*qualified)
    }
}
