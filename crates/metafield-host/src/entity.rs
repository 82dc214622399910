//! A map-display entity and its declared metadata fields.
//!
//! [`MapEntity`] is the host object: it owns a [`MetadataMap`] and exposes
//! typed accessors generated from the field declarations below.

use std::fmt;

use metafield_core::{
    defaulted_field, defaulted_required_field, map_value, metadata_accessors, optional_field,
    require, ConstantDefault, ContextDefault, DefaultedField, DefaultedRequiredField, Enumerated,
    FromStrCodec, MetadataStore, OptionalField, OrdinalCodec, RequiredOrError, ValueMapped,
};
use serde::{Deserialize, Serialize};

use crate::fields::{bool_field_or, float_field_or, string_field};
use crate::map::MetadataMap;

// ---------------------------------------------------------------------------
// MarkerShape
// ---------------------------------------------------------------------------

/// The glyph drawn for an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerShape {
    Pin,
    Circle,
    Square,
}

impl Enumerated for MarkerShape {
    const VARIANTS: &'static [Self] = &[MarkerShape::Pin, MarkerShape::Circle, MarkerShape::Square];

    fn ordinal(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            MarkerShape::Pin => "pin",
            MarkerShape::Circle => "circle",
            MarkerShape::Square => "square",
        }
    }
}

impl fmt::Display for MarkerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// MapEntity
// ---------------------------------------------------------------------------

/// An entity drawn on a map layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapEntity {
    /// Stable identifier.
    pub id: u64,
    /// Display label.
    pub label: String,
    /// Layer index; higher layers draw above lower ones.
    pub layer: u16,
    /// Raw metadata backing every typed field.
    pub metadata: MetadataMap,
}

impl MapEntity {
    /// Create an entity on layer 0 with empty metadata.
    pub fn new(id: u64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            layer: 0,
            metadata: MetadataMap::new(),
        }
    }

    /// Place the entity on `layer`.
    pub fn with_layer(mut self, layer: u16) -> Self {
        self.layer = layer;
        self
    }

    /// Replace the entity's metadata.
    pub fn with_metadata(mut self, metadata: MetadataMap) -> Self {
        self.metadata = metadata;
        self
    }
}

impl MetadataStore for MapEntity {
    fn read(&self, key: &str) -> Option<String> {
        self.metadata.read(key)
    }

    fn write(&mut self, key: &str, value: String) {
        self.metadata.write(key, value)
    }

    fn remove(&mut self, key: &str) {
        self.metadata.remove(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.metadata.contains(key)
    }
}

impl AsRef<MetadataMap> for MapEntity {
    fn as_ref(&self) -> &MetadataMap {
        &self.metadata
    }
}

impl AsMut<MetadataMap> for MapEntity {
    fn as_mut(&mut self) -> &mut MetadataMap {
        &mut self.metadata
    }
}

// ---------------------------------------------------------------------------
// Declared fields
// ---------------------------------------------------------------------------

pub type ZIndexField =
    DefaultedRequiredField<FromStrCodec<i32>, ContextDefault<fn(&MapEntity) -> i32>>;
pub type OpacityField = DefaultedRequiredField<FromStrCodec<f64>, ConstantDefault<f64>>;
pub type VisibleField = DefaultedRequiredField<FromStrCodec<bool>, ConstantDefault<bool>>;
pub type ShapeField = DefaultedField<OrdinalCodec<MarkerShape>, ConstantDefault<MarkerShape>>;
pub type TitleField = RequiredOrError<OptionalField<FromStrCodec<String>>>;
pub type HeadingField = ValueMapped<
    OptionalField<FromStrCodec<f64>>,
    fn(Option<f64>) -> Option<f64>,
    fn(Option<f64>) -> Option<f64>,
>;
pub type NoteField = OptionalField<FromStrCodec<String>>;

/// Z-order within the map; defaults to `layer * 100`.
pub fn z_index_field() -> ZIndexField {
    defaulted_required_field(
        "render.z_index",
        FromStrCodec::new(),
        ContextDefault(default_z_index as fn(&MapEntity) -> i32),
    )
}

fn default_z_index(entity: &MapEntity) -> i32 {
    i32::from(entity.layer) * 100
}

/// Fill opacity in `[0, 1]`; defaults to fully opaque.
pub fn opacity_field() -> OpacityField {
    float_field_or("style.opacity", 1.0)
}

pub fn visible_field() -> VisibleField {
    bool_field_or("style.visible", true)
}

/// Marker glyph. Writing `None` restores the default pin.
pub fn shape_field() -> ShapeField {
    defaulted_field("style.shape", OrdinalCodec::new(), ConstantDefault(MarkerShape::Pin))
}

/// Title shown in the info panel. Must be set before display.
pub fn title_field() -> TitleField {
    require(optional_field("title", FromStrCodec::new()))
}

/// Heading, stored in degrees and exposed in radians.
pub fn heading_field() -> HeadingField {
    map_value(
        optional_field("nav.heading_deg", FromStrCodec::new()),
        degrees_to_radians as fn(Option<f64>) -> Option<f64>,
        radians_to_degrees as fn(Option<f64>) -> Option<f64>,
    )
}

fn degrees_to_radians(degrees: Option<f64>) -> Option<f64> {
    degrees.map(f64::to_radians)
}

fn radians_to_degrees(radians: Option<f64>) -> Option<f64> {
    radians.map(f64::to_degrees)
}

pub fn note_field() -> NoteField {
    string_field("note")
}

metadata_accessors! {
    impl MapEntity {
        pub z_index, set_z_index: i32 = z_index_field();
        pub opacity, set_opacity: f64 = opacity_field();
        pub visible, set_visible: bool = visible_field();
        pub shape, set_shape: Option<MarkerShape> = shape_field();
        pub title?, set_title: String = title_field();
        pub heading, set_heading: Option<f64> = heading_field();
        pub note, set_note: Option<String> = note_field();
    }
}

impl MapEntity {
    /// The marker glyph, falling back to the default.
    pub fn shape_or_default(&self) -> MarkerShape {
        shape_field().value(self)
    }
}
