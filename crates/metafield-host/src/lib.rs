//! Reference host for typed metadata fields.
//!
//! This crate supplies what the core leaves to its host: a raw metadata map
//! to act as the backing store, a map-display entity that owns one, and the
//! concrete field declarations that entity exposes.
//!
//! # Modules
//!
//! - [`error`] — Error types for host operations
//! - [`config`] — [`StoreConfig`] for namespacing and key checks
//! - [`keys`] — Metadata key validation
//! - [`map`] — The [`MetadataMap`] backing store
//! - [`fields`] — Primitive and enumeration field factories
//! - [`entity`] — [`MapEntity`], [`MarkerShape`], and the entity's fields
//! - [`catalog`] — [`FieldCatalog`] for documentation tooling

pub mod catalog;
pub mod config;
pub mod entity;
pub mod error;
pub mod fields;
pub mod keys;
pub mod map;

pub use catalog::{entity_catalog, FieldCatalog, FieldDescriptor};
pub use config::StoreConfig;
pub use entity::{MapEntity, MarkerShape};
pub use error::{HostError, Result};
pub use fields::{
    bool_field, bool_field_or, enum_field, enum_field_or, float_field, float_field_or, int_field,
    int_field_or, string_field, string_field_or,
};
pub use keys::{validate_key, validate_namespace};
pub use map::MetadataMap;
