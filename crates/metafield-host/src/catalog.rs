//! A registry of declared metadata fields for documentation and tooling.
//!
//! Keyed fields describe themselves as [`FieldDescriptor`]s; a
//! [`FieldCatalog`] collects them, rejects malformed or duplicate keys, and
//! exports the set as JSON. It can also report stored keys that no declared
//! field accounts for.

use std::any::type_name;
use std::collections::BTreeMap;
use std::fmt;

use metafield_core::{FieldDefault, Keyed, KeyedMetadataFieldWithDefault, MetadataField};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::entity::{
    heading_field, note_field, opacity_field, shape_field, title_field, visible_field,
    z_index_field, MapEntity,
};
use crate::error::{HostError, Result};
use crate::keys::validate_key;
use crate::map::MetadataMap;

/// Documentation record for one field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// The store key.
    pub key: String,
    /// Short name of the value type (module paths stripped).
    pub value_type: String,
    /// Debug rendering of the fallback, for fields that have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value_type: value_type.into(),
            default: None,
            description: None,
        }
    }

    /// Describe a keyed field without a fallback, as read from contexts of
    /// type `C`.
    pub fn of<C, F>(field: &F) -> Self
    where
        C: ?Sized,
        F: Keyed + MetadataField<C>,
    {
        let value_type = short_type_name(type_name::<<F as MetadataField<C>>::Value>());
        Self::new(field.key(), value_type)
    }

    /// Describe a keyed field with a fallback, rendering the fallback as
    /// computed for `sample`.
    pub fn with_default<C, F>(field: &F, sample: &C) -> Self
    where
        C: ?Sized,
        F: KeyedMetadataFieldWithDefault<C>,
        <F as FieldDefault<C>>::Fallback: fmt::Debug,
    {
        let value_type = short_type_name(type_name::<<F as FieldDefault<C>>::Fallback>());
        Self {
            default: Some(format!("{:?}", field.default_value(sample))),
            ..Self::new(field.key(), value_type)
        }
    }

    /// Attach a description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Strip module paths from every path in a type name:
/// `core::option::Option<alloc::string::String>` becomes `Option<String>`.
fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut path = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            path.push(ch);
        } else {
            out.push_str(last_segment(&path));
            path.clear();
            out.push(ch);
        }
    }
    out.push_str(last_segment(&path));
    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// A set of field descriptors keyed by store key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    fields: BTreeMap<String, FieldDescriptor>,
}

impl FieldCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor. Fails on an invalid or already registered key.
    pub fn register(&mut self, descriptor: FieldDescriptor) -> Result<()> {
        if let Err(e) = validate_key(&descriptor.key) {
            warn!(key = %descriptor.key, error = %e, "rejected metadata field");
            return Err(e);
        }
        if self.fields.contains_key(&descriptor.key) {
            warn!(key = %descriptor.key, "duplicate metadata field");
            return Err(HostError::DuplicateKey {
                key: descriptor.key,
            });
        }
        debug!(key = %descriptor.key, value_type = %descriptor.value_type, "registered metadata field");
        self.fields.insert(descriptor.key.clone(), descriptor);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Descriptors in key order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// Stored keys in `map` that no registered field declares.
    ///
    /// The map's namespace is stripped before lookup; stored keys outside the
    /// namespace are always reported.
    pub fn undeclared_keys<'a>(&self, map: &'a MetadataMap) -> Vec<&'a str> {
        map.keys()
            .filter(|stored| match map.unqualify(stored) {
                Some(key) => !self.fields.contains_key(key),
                None => true,
            })
            .collect()
    }

    /// Pretty-printed JSON export.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a catalog from JSON, re-validating every entry.
    pub fn from_json(json: &str) -> Result<Self> {
        let fields: BTreeMap<String, FieldDescriptor> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (key, descriptor) in fields {
            if key != descriptor.key {
                return Err(HostError::Serialization(format!(
                    "catalog entry {key} describes key {}",
                    descriptor.key
                )));
            }
            catalog.register(descriptor)?;
        }
        Ok(catalog)
    }
}

/// The catalog of every declared [`MapEntity`] field. Context-derived
/// defaults are rendered for `sample`.
pub fn entity_catalog(sample: &MapEntity) -> Result<FieldCatalog> {
    let mut catalog = FieldCatalog::new();
    catalog.register(
        FieldDescriptor::with_default(&z_index_field(), sample)
            .describe("draw order; defaults to layer * 100"),
    )?;
    catalog.register(FieldDescriptor::with_default(&opacity_field(), sample).describe("fill opacity"))?;
    catalog.register(FieldDescriptor::with_default(&visible_field(), sample))?;
    catalog.register(FieldDescriptor::with_default(&shape_field(), sample).describe("marker glyph"))?;
    catalog.register(
        FieldDescriptor::of::<MapEntity, _>(&title_field()).describe("info panel title"),
    )?;
    catalog.register(
        FieldDescriptor::of::<MapEntity, _>(&heading_field()).describe("heading in radians"),
    )?;
    catalog.register(FieldDescriptor::of::<MapEntity, _>(&note_field()))?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::fields::int_field;
    use metafield_core::MetadataStore;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    }

    // ---- Test 1: Type names lose their module paths ----
    #[test]
    fn short_type_names() {
        assert_eq!(short_type_name("i32"), "i32");
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(
            short_type_name("core::option::Option<alloc::string::String>"),
            "Option<String>"
        );
        assert_eq!(
            short_type_name("std::collections::HashMap<u8, alloc::vec::Vec<u8>>"),
            "HashMap<u8, Vec<u8>>"
        );
    }

    // ---- Test 2: Register and look up ----
    #[test]
    fn register_and_get() {
        init_tracing();
        let mut catalog = FieldCatalog::new();
        catalog
            .register(FieldDescriptor::of::<MetadataMap, _>(&int_field("count")))
            .unwrap();

        let descriptor = catalog.get("count").unwrap();
        assert_eq!(descriptor.value_type, "Option<i64>");
        assert_eq!(descriptor.default, None);
        assert_eq!(catalog.len(), 1);
    }

    // ---- Test 3: Duplicate keys are rejected ----
    #[test]
    fn reject_duplicate_key() {
        init_tracing();
        let mut catalog = FieldCatalog::new();
        catalog.register(FieldDescriptor::new("count", "i64")).unwrap();
        let err = catalog
            .register(FieldDescriptor::new("count", "u8"))
            .unwrap_err();
        assert!(
            matches!(err, HostError::DuplicateKey { ref key } if key == "count"),
            "expected DuplicateKey, got: {err}"
        );
        assert_eq!(catalog.get("count").unwrap().value_type, "i64");
    }

    // ---- Test 4: Invalid keys are rejected ----
    #[test]
    fn reject_invalid_key() {
        let mut catalog = FieldCatalog::new();
        let err = catalog
            .register(FieldDescriptor::new("bad key", "i64"))
            .unwrap_err();
        assert!(matches!(err, HostError::InvalidKey { .. }));
        assert!(catalog.is_empty());
    }

    // ---- Test 5: Defaults are rendered from the sample context ----
    #[test]
    fn entity_catalog_renders_defaults() {
        init_tracing();
        let sample = MapEntity::new(1, "sample").with_layer(2);
        let catalog = entity_catalog(&sample).unwrap();
        assert_eq!(catalog.len(), 7);

        let z = catalog.get("render.z_index").unwrap();
        assert_eq!(z.value_type, "i32");
        assert_eq!(z.default.as_deref(), Some("200"));

        let shape = catalog.get("style.shape").unwrap();
        assert_eq!(shape.value_type, "MarkerShape");
        assert_eq!(shape.default.as_deref(), Some("Pin"));

        assert_eq!(
            catalog.get("style.opacity").unwrap().default.as_deref(),
            Some("1.0")
        );
        assert_eq!(
            catalog.get("style.visible").unwrap().default.as_deref(),
            Some("true")
        );

        let title = catalog.get("title").unwrap();
        assert_eq!(title.value_type, "String");
        assert_eq!(title.default, None);

        assert_eq!(
            catalog.get("nav.heading_deg").unwrap().value_type,
            "Option<f64>"
        );
        assert_eq!(catalog.get("note").unwrap().value_type, "Option<String>");
    }

    // ---- Test 6: Undeclared keys are reported ----
    #[test]
    fn undeclared_keys_are_reported() {
        let catalog = entity_catalog(&MapEntity::new(1, "sample")).unwrap();
        let mut entity = MapEntity::new(2, "Buoy");
        entity.set_opacity(0.5);
        entity.write("legacy.color", "red".into());
        entity.write("zzz", "1".into());

        assert_eq!(
            catalog.undeclared_keys(&entity.metadata),
            vec!["legacy.color", "zzz"]
        );
    }

    // ---- Test 7: Namespaced maps are matched on unqualified keys ----
    #[test]
    fn undeclared_keys_ignore_namespace_prefix() {
        let catalog = entity_catalog(&MapEntity::new(1, "sample")).unwrap();
        let mut map = MetadataMap::with_config(StoreConfig::namespaced("app")).unwrap();
        opacity_field().set(&mut map, 0.5);
        shape_field().set(&mut map, Some(crate::entity::MarkerShape::Square));
        map.write("legacy.color", "red".into());

        assert_eq!(map.len(), 3);
        assert_eq!(catalog.undeclared_keys(&map), vec!["app.legacy.color"]);

        let mut foreign = MetadataMap::from_json(
            r#"{"app.note":"x","other.note":"y"}"#,
            StoreConfig::namespaced("app"),
        )
        .unwrap();
        assert_eq!(catalog.undeclared_keys(&foreign), vec!["other.note"]);
        foreign.clear();
        assert!(catalog.undeclared_keys(&foreign).is_empty());
    }

    // ---- Test 8: JSON export and re-import ----
    #[test]
    fn json_round_trip() {
        let catalog = entity_catalog(&MapEntity::new(1, "sample")).unwrap();
        let json = catalog.to_json().unwrap();
        assert!(json.contains(r#""description": "marker glyph""#));

        let loaded = FieldCatalog::from_json(&json).unwrap();
        assert_eq!(loaded, catalog);
        assert_eq!(
            loaded.iter().map(|d| d.key.as_str()).collect::<Vec<_>>(),
            vec![
                "nav.heading_deg",
                "note",
                "render.z_index",
                "style.opacity",
                "style.shape",
                "style.visible",
                "title",
            ]
        );
    }

    // ---- Test 9: Mismatched entry keys are rejected on import ----
    #[test]
    fn from_json_rejects_mismatched_entry() {
        let json = r#"{"a":{"key":"b","value_type":"i32"}}"#;
        let err = FieldCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, HostError::Serialization(_)));
    }
}
