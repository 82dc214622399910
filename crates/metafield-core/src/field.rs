//! The metadata field vocabulary.
//!
//! - [`MetadataField`] — typed get/set against a context
//! - [`FieldDefault`] — a context-derived fallback value
//! - [`MetadataFieldWithDefault`] — a field that also carries a fallback
//! - [`Keyed`] — exposes the store key for tooling
//! - [`KeyedMetadataFieldWithDefault`] — both of the above
//! - [`TotalField`] — fields whose reads cannot fail

use std::convert::Infallible;

/// A typed, bidirectional binding between a logical field and a context.
///
/// Fields hold no mutable state. Reads borrow the context; writes mutate
/// only the backing store reachable from it. Given a codec that round-trips
/// `v`, `set(ctx, v)` followed by `get(ctx)` yields `v`.
///
/// The context is a type parameter rather than an associated type so a
/// single field value can serve every context that supplies the store
/// primitives it needs.
pub trait MetadataField<C: ?Sized> {
    /// The value read and written. Optional fields use `Option<T>`.
    type Value;

    /// Why a read can fail. `Infallible` for fields that always produce a
    /// value.
    type Error;

    /// Read the field's current value from `ctx`.
    fn get(&self, ctx: &C) -> Result<Self::Value, Self::Error>;

    /// Write `value` into `ctx`.
    fn set(&self, ctx: &mut C, value: Self::Value);
}

/// A fallback value derived from a context.
///
/// Consulted only when the store has no usable value for the field's key.
pub trait FieldDefault<C: ?Sized> {
    /// The fallback type.
    type Fallback;

    /// Compute the fallback for `ctx`.
    fn default_value(&self, ctx: &C) -> Self::Fallback;
}

/// A field that is also its own [`FieldDefault`].
pub trait MetadataFieldWithDefault<C: ?Sized>: MetadataField<C> + FieldDefault<C> {}

impl<C: ?Sized, F> MetadataFieldWithDefault<C> for F where F: MetadataField<C> + FieldDefault<C> {}

/// Exposes the store key a field is bound to.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// A keyed field with a fallback; the shape documentation tooling consumes.
pub trait KeyedMetadataFieldWithDefault<C: ?Sized>: MetadataFieldWithDefault<C> + Keyed {}

impl<C: ?Sized, F> KeyedMetadataFieldWithDefault<C> for F where F: MetadataFieldWithDefault<C> + Keyed {}

/// A field whose reads never fail.
pub trait TotalField<C: ?Sized>: MetadataField<C, Error = Infallible> {
    /// Read the value without a `Result` wrapper.
    fn fetch(&self, ctx: &C) -> Self::Value {
        match self.get(ctx) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}

impl<C: ?Sized, F> TotalField<C> for F where F: MetadataField<C, Error = Infallible> {}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// A fallback that ignores the context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstantDefault<T>(pub T);

impl<C: ?Sized, T: Clone> FieldDefault<C> for ConstantDefault<T> {
    type Fallback = T;

    fn default_value(&self, _ctx: &C) -> T {
        self.0.clone()
    }
}

/// A fallback computed from the context by a closure.
#[derive(Clone, Copy)]
pub struct ContextDefault<F>(pub F);

impl<F> std::fmt::Debug for ContextDefault<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ContextDefault")
    }
}

impl<C: ?Sized, F, T> FieldDefault<C> for ContextDefault<F>
where
    F: Fn(&C) -> T,
{
    type Fallback = T;

    fn default_value(&self, ctx: &C) -> T {
        (self.0)(ctx)
    }
}
