//! Field combinators.
//!
//! Each combinator owns its base field and produces a new field; the base
//! is never exposed through the derived one.
//!
//! - [`map_context`] — serve a field on `Y` from any `X` that projects to `Y`
//! - [`map_value`] — change the value type through a pair of conversions
//! - [`require`] — turn `Option<T>` into `T`, failing on absence
//! - [`require_or`] — turn `Option<T>` into `T`, substituting a constant

use std::borrow::Cow;
use std::fmt;

use crate::error::FieldError;
use crate::field::{FieldDefault, Keyed, MetadataField};

// ---------------------------------------------------------------------------
// Context projection
// ---------------------------------------------------------------------------

/// A borrowed view from one context type onto another.
pub trait Projection<X: ?Sized> {
    /// The context type the base field operates on.
    type Target: ?Sized;

    fn view<'a>(&self, ctx: &'a X) -> &'a Self::Target;

    fn view_mut<'a>(&self, ctx: &'a mut X) -> &'a mut Self::Target;
}

/// A projection made of two plain functions.
pub struct Lens<X: ?Sized, Y: ?Sized> {
    view: fn(&X) -> &Y,
    view_mut: fn(&mut X) -> &mut Y,
}

impl<X: ?Sized, Y: ?Sized> Lens<X, Y> {
    pub fn new(view: fn(&X) -> &Y, view_mut: fn(&mut X) -> &mut Y) -> Self {
        Self { view, view_mut }
    }

    /// A lens through `X`'s `AsRef<Y>` / `AsMut<Y>` impls.
    pub fn via_as_ref() -> Self
    where
        X: AsRef<Y> + AsMut<Y>,
    {
        Self {
            view: <X as AsRef<Y>>::as_ref,
            view_mut: <X as AsMut<Y>>::as_mut,
        }
    }
}

impl<X: ?Sized, Y: ?Sized> Clone for Lens<X, Y> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<X: ?Sized, Y: ?Sized> Copy for Lens<X, Y> {}

impl<X: ?Sized, Y: ?Sized> fmt::Debug for Lens<X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lens<{}, {}>",
            std::any::type_name::<X>(),
            std::any::type_name::<Y>()
        )
    }
}

impl<X: ?Sized, Y: ?Sized> Projection<X> for Lens<X, Y> {
    type Target = Y;

    fn view<'a>(&self, ctx: &'a X) -> &'a Y {
        (self.view)(ctx)
    }

    fn view_mut<'a>(&self, ctx: &'a mut X) -> &'a mut Y {
        (self.view_mut)(ctx)
    }
}

// ---------------------------------------------------------------------------
// ContextMapped
// ---------------------------------------------------------------------------

/// A field adapted to a new context type through a [`Projection`].
///
/// `get(x) == inner.get(view(x))` and `set(x, v)` writes exactly what
/// `inner.set(view_mut(x), v)` would.
#[derive(Clone, Debug)]
pub struct ContextMapped<F, P> {
    inner: F,
    projection: P,
}

impl<F, P> ContextMapped<F, P> {
    pub fn new(inner: F, projection: P) -> Self {
        Self { inner, projection }
    }
}

impl<X, F, P> MetadataField<X> for ContextMapped<F, P>
where
    X: ?Sized,
    P: Projection<X>,
    F: MetadataField<P::Target>,
{
    type Value = F::Value;
    type Error = F::Error;

    fn get(&self, ctx: &X) -> Result<F::Value, F::Error> {
        self.inner.get(self.projection.view(ctx))
    }

    fn set(&self, ctx: &mut X, value: F::Value) {
        self.inner.set(self.projection.view_mut(ctx), value)
    }
}

impl<X, F, P> FieldDefault<X> for ContextMapped<F, P>
where
    X: ?Sized,
    P: Projection<X>,
    F: FieldDefault<P::Target>,
{
    type Fallback = F::Fallback;

    fn default_value(&self, ctx: &X) -> F::Fallback {
        self.inner.default_value(self.projection.view(ctx))
    }
}

impl<F: Keyed, P> Keyed for ContextMapped<F, P> {
    fn key(&self) -> &str {
        self.inner.key()
    }
}

// ---------------------------------------------------------------------------
// ValueMapped
// ---------------------------------------------------------------------------

/// A field whose value type is converted on the way in and out.
///
/// `to` runs after every read, `from` before every write. Round-trips hold
/// only when `to` and `from` are inverse on the values involved; this is
/// not checked.
#[derive(Clone)]
pub struct ValueMapped<F, T, G> {
    inner: F,
    to: T,
    from: G,
}

impl<F, T, G> ValueMapped<F, T, G> {
    pub fn new(inner: F, to: T, from: G) -> Self {
        Self { inner, to, from }
    }
}

impl<F: fmt::Debug, T, G> fmt::Debug for ValueMapped<F, T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueMapped")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<C, F, T, G, B> MetadataField<C> for ValueMapped<F, T, G>
where
    C: ?Sized,
    F: MetadataField<C>,
    T: Fn(F::Value) -> B,
    G: Fn(B) -> F::Value,
{
    type Value = B;
    type Error = F::Error;

    fn get(&self, ctx: &C) -> Result<B, F::Error> {
        self.inner.get(ctx).map(&self.to)
    }

    fn set(&self, ctx: &mut C, value: B) {
        self.inner.set(ctx, (self.from)(value))
    }
}

impl<C, F, T, G, B> FieldDefault<C> for ValueMapped<F, T, G>
where
    C: ?Sized,
    F: MetadataField<C> + FieldDefault<C, Fallback = <F as MetadataField<C>>::Value>,
    T: Fn(<F as MetadataField<C>>::Value) -> B,
{
    type Fallback = B;

    fn default_value(&self, ctx: &C) -> B {
        (self.to)(self.inner.default_value(ctx))
    }
}

impl<F: Keyed, T, G> Keyed for ValueMapped<F, T, G> {
    fn key(&self) -> &str {
        self.inner.key()
    }
}

// ---------------------------------------------------------------------------
// RequiredOrError
// ---------------------------------------------------------------------------

/// An optional field made mandatory: absence is
/// [`FieldError::MissingRequiredField`].
#[derive(Clone, Debug)]
pub struct RequiredOrError<F> {
    inner: F,
    label: Cow<'static, str>,
}

impl<F> RequiredOrError<F> {
    /// Wrap `inner`, naming it `label` in missing-value errors.
    pub fn new(inner: F, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner,
            label: label.into(),
        }
    }
}

impl<C, F, V> MetadataField<C> for RequiredOrError<F>
where
    C: ?Sized,
    F: MetadataField<C, Value = Option<V>>,
    F::Error: Into<FieldError>,
{
    type Value = V;
    type Error = FieldError;

    fn get(&self, ctx: &C) -> Result<V, FieldError> {
        match self.inner.get(ctx).map_err(Into::<FieldError>::into)? {
            Some(value) => Ok(value),
            None => Err(FieldError::MissingRequiredField {
                key: self.label.to_string(),
            }),
        }
    }

    fn set(&self, ctx: &mut C, value: V) {
        self.inner.set(ctx, Some(value))
    }
}

impl<F: Keyed> Keyed for RequiredOrError<F> {
    fn key(&self) -> &str {
        self.inner.key()
    }
}

// ---------------------------------------------------------------------------
// RequiredOrDefault
// ---------------------------------------------------------------------------

/// An optional field made mandatory by substituting a constant on absence.
#[derive(Clone, Debug)]
pub struct RequiredOrDefault<F, V> {
    inner: F,
    default: V,
}

impl<F, V> RequiredOrDefault<F, V> {
    pub fn new(inner: F, default: V) -> Self {
        Self { inner, default }
    }
}

impl<C, F, V> MetadataField<C> for RequiredOrDefault<F, V>
where
    C: ?Sized,
    F: MetadataField<C, Value = Option<V>>,
    V: Clone,
{
    type Value = V;
    type Error = F::Error;

    fn get(&self, ctx: &C) -> Result<V, F::Error> {
        Ok(self
            .inner
            .get(ctx)?
            .unwrap_or_else(|| self.default.clone()))
    }

    fn set(&self, ctx: &mut C, value: V) {
        self.inner.set(ctx, Some(value))
    }
}

impl<C: ?Sized, F, V: Clone> FieldDefault<C> for RequiredOrDefault<F, V> {
    type Fallback = V;

    fn default_value(&self, _ctx: &C) -> V {
        self.default.clone()
    }
}

impl<F: Keyed, V> Keyed for RequiredOrDefault<F, V> {
    fn key(&self) -> &str {
        self.inner.key()
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Adapt `field` to every context `projection` can view.
pub fn map_context<F, P>(field: F, projection: P) -> ContextMapped<F, P> {
    ContextMapped::new(field, projection)
}

/// Convert `field`'s value type with `to` (after reads) and `from` (before
/// writes).
pub fn map_value<F, T, G>(field: F, to: T, from: G) -> ValueMapped<F, T, G> {
    ValueMapped::new(field, to, from)
}

/// Make a keyed optional field mandatory, failing on absence.
pub fn require<F: Keyed>(field: F) -> RequiredOrError<F> {
    let label = field.key().to_string();
    RequiredOrError::new(field, label)
}

/// Make an optional field mandatory, substituting `default` on absence.
pub fn require_or<F, V>(field: F, default: V) -> RequiredOrDefault<F, V> {
    RequiredOrDefault::new(field, default)
}
