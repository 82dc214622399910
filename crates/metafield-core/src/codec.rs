//! String codecs for single metadata values.
//!
//! A [`Codec`] is a parse/serialize pair. Parsing is partial (malformed text
//! yields `None`); serializing is total. Every field constructor in
//! [`crate::builders`] is parameterised by one.

use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A parse/serialize pair defining a value type's string representation.
///
/// Implementations should round-trip: `parse(&serialize(v)) == Some(v)` for
/// every well-formed `v` in the codec's domain.
pub trait Codec {
    /// The decoded value type.
    type Value;

    /// Parse a stored string. Returns `None` on malformed input.
    fn parse(&self, raw: &str) -> Option<Self::Value>;

    /// Render a value as its stored string.
    fn serialize(&self, value: &Self::Value) -> String;

    /// A short, human-readable name for the value type.
    fn value_type(&self) -> &'static str {
        std::any::type_name::<Self::Value>()
    }
}

// ---------------------------------------------------------------------------
// FromStrCodec
// ---------------------------------------------------------------------------

/// Codec for any `FromStr + Display` type.
///
/// Covers integers (decimal text), floats (shortest round-trip text),
/// booleans (`true`/`false`), and strings.
pub struct FromStrCodec<T>(PhantomData<fn() -> T>);

impl<T> FromStrCodec<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for FromStrCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FromStrCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FromStrCodec<T> {}

impl<T> fmt::Debug for FromStrCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FromStrCodec<{}>", std::any::type_name::<T>())
    }
}

impl<T: FromStr + Display> Codec for FromStrCodec<T> {
    type Value = T;

    fn parse(&self, raw: &str) -> Option<T> {
        raw.parse().ok()
    }

    fn serialize(&self, value: &T) -> String {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// A fieldless enumeration with a fixed, ordered list of variants.
///
/// ```
/// use metafield_core::Enumerated;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// enum Tier { Low, High }
///
/// impl Enumerated for Tier {
///     const VARIANTS: &'static [Self] = &[Tier::Low, Tier::High];
///     fn ordinal(self) -> usize { self as usize }
///     fn name(self) -> &'static str {
///         match self { Tier::Low => "Low", Tier::High => "High" }
///     }
/// }
///
/// assert_eq!(Tier::from_ordinal(1), Some(Tier::High));
/// assert_eq!(Tier::from_name("Low"), Some(Tier::Low));
/// assert_eq!(Tier::from_ordinal(2), None);
/// ```
pub trait Enumerated: Copy + PartialEq + 'static {
    /// All variants in ordinal order.
    const VARIANTS: &'static [Self];

    /// Position of this variant in [`Self::VARIANTS`].
    fn ordinal(self) -> usize;

    /// Stable variant name.
    fn name(self) -> &'static str;

    /// Look up a variant by ordinal. Out-of-range ordinals yield `None`.
    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::VARIANTS.get(ordinal).copied()
    }

    /// Look up a variant by exact name.
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.name() == name)
    }
}

/// Stores an enumeration as its ordinal index in decimal text.
pub struct OrdinalCodec<E>(PhantomData<fn() -> E>);

impl<E> OrdinalCodec<E> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for OrdinalCodec<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for OrdinalCodec<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for OrdinalCodec<E> {}

impl<E> fmt::Debug for OrdinalCodec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrdinalCodec<{}>", std::any::type_name::<E>())
    }
}

impl<E: Enumerated> Codec for OrdinalCodec<E> {
    type Value = E;

    fn parse(&self, raw: &str) -> Option<E> {
        let ordinal: usize = raw.parse().ok()?;
        E::from_ordinal(ordinal)
    }

    fn serialize(&self, value: &E) -> String {
        value.ordinal().to_string()
    }
}

/// Stores an enumeration as its variant name.
pub struct NameCodec<E>(PhantomData<fn() -> E>);

impl<E> NameCodec<E> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for NameCodec<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for NameCodec<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for NameCodec<E> {}

impl<E> fmt::Debug for NameCodec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameCodec<{}>", std::any::type_name::<E>())
    }
}

impl<E: Enumerated> Codec for NameCodec<E> {
    type Value = E;

    fn parse(&self, raw: &str) -> Option<E> {
        E::from_name(raw)
    }

    fn serialize(&self, value: &E) -> String {
        value.name().to_string()
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// Stores any serde value as a single JSON document.
///
/// Serialization of types whose `Serialize` impl can fail (e.g. maps with
/// non-string keys) writes `null`, which then reads back as absent.
pub struct JsonCodec<T>(PhantomData<fn() -> T>);

impl<T> JsonCodec<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for JsonCodec<T> {}

impl<T> fmt::Debug for JsonCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonCodec<{}>", std::any::type_name::<T>())
    }
}

impl<T: Serialize + DeserializeOwned> Codec for JsonCodec<T> {
    type Value = T;

    fn parse(&self, raw: &str) -> Option<T> {
        serde_json::from_str(raw).ok()
    }

    fn serialize(&self, value: &T) -> String {
        serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
    }
}

// ---------------------------------------------------------------------------
// FnCodec
// ---------------------------------------------------------------------------

/// A codec assembled from a parse closure and a serialize closure.
#[derive(Clone, Copy)]
pub struct FnCodec<P, S> {
    parse: P,
    serialize: S,
}

impl<P, S> FnCodec<P, S> {
    pub fn new<T>(parse: P, serialize: S) -> Self
    where
        P: Fn(&str) -> Option<T>,
        S: Fn(&T) -> String,
    {
        Self { parse, serialize }
    }
}

impl<P, S> fmt::Debug for FnCodec<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnCodec")
    }
}

impl<P, S, T> Codec for FnCodec<P, S>
where
    P: Fn(&str) -> Option<T>,
    S: Fn(&T) -> String,
{
    type Value = T;

    fn parse(&self, raw: &str) -> Option<T> {
        (self.parse)(raw)
    }

    fn serialize(&self, value: &T) -> String {
        (self.serialize)(value)
    }
}
