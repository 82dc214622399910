//! Typed metadata fields over untyped, string-keyed stores.
//!
//! Host objects often carry a raw `String -> String` metadata map. Reading
//! and writing it through ad-hoc `get_int("key", default)` calls scatters
//! keys, types, and defaults across every call site. A *metadata field*
//! binds a key, a value type, a codec, and optionally a default into one
//! reusable value, so every access to that field is well-typed and
//! consistent.
//!
//! # Architecture
//!
//! - **Codecs** turn a single value into a string and back. Parsing is
//!   partial; serializing is total.
//! - **Fields** implement [`MetadataField`]: `get` borrows a context, `set`
//!   mutates the store reachable from it. Fields themselves are immutable
//!   and can be shared freely.
//! - **Constructors** build the four store-backed shapes (optional,
//!   required, defaulted, defaulted-required) from a key, a codec, and a
//!   [`KeyValueAccess`] strategy.
//! - **Combinators** derive new fields from existing ones by remapping the
//!   context or the value type, or by making an optional field mandatory.
//! - **Delegation** exposes a field as a named property of its owner.
//!
//! Only required fields without a fallback can fail a read. Stored text
//! that does not parse reads as absent wherever a fallback exists and as
//! [`FieldError::MalformedValue`] wherever none does.
//!
//! # Modules
//!
//! - [`error`] — [`FieldError`] and [`FieldResult`]
//! - [`codec`] — [`Codec`] and the built-in codecs
//! - [`access`] — [`MetadataStore`] and [`KeyValueAccess`] strategies
//! - [`field`] — the field trait hierarchy and default providers
//! - [`builders`] — codec-based field constructors
//! - [`combinators`] — context/value remapping and required-field derivation
//! - [`delegate`] — [`Property`], [`Bound`], and `metadata_accessors!`

pub mod access;
pub mod builders;
pub mod codec;
pub mod combinators;
pub mod delegate;
pub mod error;
pub mod field;

pub use access::{FnAccess, KeyValueAccess, MetadataStore, StoreAccess};
pub use builders::{
    defaulted_field, defaulted_required_field, optional_field, required_field, DefaultedField,
    DefaultedRequiredField, OptionalField, RequiredField,
};
pub use codec::{Codec, Enumerated, FnCodec, FromStrCodec, JsonCodec, NameCodec, OrdinalCodec};
pub use combinators::{
    map_context, map_value, require, require_or, ContextMapped, Lens, Projection,
    RequiredOrDefault, RequiredOrError, ValueMapped,
};
pub use delegate::{Bound, Property};
pub use error::{FieldError, FieldResult};
pub use field::{
    ConstantDefault, ContextDefault, FieldDefault, Keyed, KeyedMetadataFieldWithDefault,
    MetadataField, MetadataFieldWithDefault, TotalField,
};
