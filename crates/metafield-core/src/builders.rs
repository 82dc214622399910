//! Codec-based field constructors.
//!
//! Each shape binds a key, a [`Codec`], and a [`KeyValueAccess`] strategy:
//!
//! | Shape                      | `Value`      | Unset / malformed on read  |
//! |----------------------------|--------------|----------------------------|
//! | [`OptionalField`]          | `Option<T>`  | `None` / `None`            |
//! | [`RequiredField`]          | `T`          | error / `MalformedValue`   |
//! | [`DefaultedField`]         | `Option<T>`  | default / default          |
//! | [`DefaultedRequiredField`] | `T`          | default / default          |
//!
//! Unparsable text is indistinguishable from absence wherever a fallback
//! exists, and is an error only where none does.

use std::borrow::Cow;
use std::convert::Infallible;

use crate::access::{KeyValueAccess, StoreAccess};
use crate::codec::Codec;
use crate::error::{FieldError, FieldResult};
use crate::field::{FieldDefault, Keyed, MetadataField};

// ---------------------------------------------------------------------------
// OptionalField
// ---------------------------------------------------------------------------

/// A field that may be absent. Malformed stored text reads as absent.
#[derive(Clone, Debug)]
pub struct OptionalField<Cd, A = StoreAccess> {
    key: Cow<'static, str>,
    codec: Cd,
    access: A,
}

impl<Cd, A> OptionalField<Cd, A> {
    pub fn new(key: impl Into<Cow<'static, str>>, codec: Cd, access: A) -> Self {
        Self {
            key: key.into(),
            codec,
            access,
        }
    }

    pub fn codec(&self) -> &Cd {
        &self.codec
    }
}

impl<Cd, A> Keyed for OptionalField<Cd, A> {
    fn key(&self) -> &str {
        &self.key
    }
}

impl<C, Cd, A> MetadataField<C> for OptionalField<Cd, A>
where
    C: ?Sized,
    Cd: Codec,
    A: KeyValueAccess<C>,
{
    type Value = Option<Cd::Value>;
    type Error = Infallible;

    fn get(&self, ctx: &C) -> Result<Self::Value, Infallible> {
        Ok(self
            .access
            .read(ctx, &self.key)
            .and_then(|raw| self.codec.parse(&raw)))
    }

    fn set(&self, ctx: &mut C, value: Self::Value) {
        let raw = value.map(|v| self.codec.serialize(&v));
        self.access.write_or_clear(ctx, &self.key, raw);
    }
}

// ---------------------------------------------------------------------------
// RequiredField
// ---------------------------------------------------------------------------

/// A field that must hold a well-formed value.
///
/// An unset key surfaces whatever [`KeyValueAccess::read_required`] reports
/// (by default [`FieldError::MissingRequiredField`]); unparsable text is
/// [`FieldError::MalformedValue`].
#[derive(Clone, Debug)]
pub struct RequiredField<Cd, A = StoreAccess> {
    key: Cow<'static, str>,
    codec: Cd,
    access: A,
}

impl<Cd, A> RequiredField<Cd, A> {
    pub fn new(key: impl Into<Cow<'static, str>>, codec: Cd, access: A) -> Self {
        Self {
            key: key.into(),
            codec,
            access,
        }
    }

    pub fn codec(&self) -> &Cd {
        &self.codec
    }
}

impl<Cd, A> Keyed for RequiredField<Cd, A> {
    fn key(&self) -> &str {
        &self.key
    }
}

impl<C, Cd, A> MetadataField<C> for RequiredField<Cd, A>
where
    C: ?Sized,
    Cd: Codec,
    A: KeyValueAccess<C>,
{
    type Value = Cd::Value;
    type Error = FieldError;

    fn get(&self, ctx: &C) -> FieldResult<Cd::Value> {
        let raw = self.access.read_required(ctx, &self.key)?;
        match self.codec.parse(&raw) {
            Some(value) => Ok(value),
            None => Err(FieldError::MalformedValue {
                key: self.key.to_string(),
                raw,
            }),
        }
    }

    fn set(&self, ctx: &mut C, value: Cd::Value) {
        self.access
            .write(ctx, &self.key, self.codec.serialize(&value));
    }
}

// ---------------------------------------------------------------------------
// DefaultedField
// ---------------------------------------------------------------------------

/// An optional field with a fallback.
///
/// Reads always produce `Some`: the parsed value, or the default when the
/// key is unset or malformed. Writing `None` clears the key, so the next
/// read yields the default again. [`DefaultedField::value`] returns the
/// unwrapped value directly.
#[derive(Clone, Debug)]
pub struct DefaultedField<Cd, D, A = StoreAccess> {
    key: Cow<'static, str>,
    codec: Cd,
    default: D,
    access: A,
}

impl<Cd, D, A> DefaultedField<Cd, D, A> {
    pub fn new(key: impl Into<Cow<'static, str>>, codec: Cd, default: D, access: A) -> Self {
        Self {
            key: key.into(),
            codec,
            default,
            access,
        }
    }

    pub fn codec(&self) -> &Cd {
        &self.codec
    }

    /// The stored value, or the default for `ctx`.
    pub fn value<C>(&self, ctx: &C) -> Cd::Value
    where
        C: ?Sized,
        Cd: Codec,
        D: FieldDefault<C, Fallback = Cd::Value>,
        A: KeyValueAccess<C>,
    {
        read_or_default(&self.access, &self.codec, &self.default, ctx, &self.key)
    }
}

impl<Cd, D, A> Keyed for DefaultedField<Cd, D, A> {
    fn key(&self) -> &str {
        &self.key
    }
}

impl<C, Cd, D, A> FieldDefault<C> for DefaultedField<Cd, D, A>
where
    C: ?Sized,
    D: FieldDefault<C>,
{
    type Fallback = D::Fallback;

    fn default_value(&self, ctx: &C) -> D::Fallback {
        self.default.default_value(ctx)
    }
}

impl<C, Cd, D, A> MetadataField<C> for DefaultedField<Cd, D, A>
where
    C: ?Sized,
    Cd: Codec,
    D: FieldDefault<C, Fallback = Cd::Value>,
    A: KeyValueAccess<C>,
{
    type Value = Option<Cd::Value>;
    type Error = Infallible;

    fn get(&self, ctx: &C) -> Result<Self::Value, Infallible> {
        Ok(Some(self.value(ctx)))
    }

    fn set(&self, ctx: &mut C, value: Self::Value) {
        match value {
            Some(value) => self
                .access
                .write(ctx, &self.key, self.codec.serialize(&value)),
            None => self.access.clear(ctx, &self.key),
        }
    }
}

// ---------------------------------------------------------------------------
// DefaultedRequiredField
// ---------------------------------------------------------------------------

/// A field that always reads a value and only accepts concrete writes.
///
/// Reads fall back to the default on absence or malformed text, exactly like
/// [`DefaultedField`]; writes take a plain `T`.
#[derive(Clone, Debug)]
pub struct DefaultedRequiredField<Cd, D, A = StoreAccess> {
    key: Cow<'static, str>,
    codec: Cd,
    default: D,
    access: A,
}

impl<Cd, D, A> DefaultedRequiredField<Cd, D, A> {
    pub fn new(key: impl Into<Cow<'static, str>>, codec: Cd, default: D, access: A) -> Self {
        Self {
            key: key.into(),
            codec,
            default,
            access,
        }
    }

    pub fn codec(&self) -> &Cd {
        &self.codec
    }
}

impl<Cd, D, A> Keyed for DefaultedRequiredField<Cd, D, A> {
    fn key(&self) -> &str {
        &self.key
    }
}

impl<C, Cd, D, A> FieldDefault<C> for DefaultedRequiredField<Cd, D, A>
where
    C: ?Sized,
    D: FieldDefault<C>,
{
    type Fallback = D::Fallback;

    fn default_value(&self, ctx: &C) -> D::Fallback {
        self.default.default_value(ctx)
    }
}

impl<C, Cd, D, A> MetadataField<C> for DefaultedRequiredField<Cd, D, A>
where
    C: ?Sized,
    Cd: Codec,
    D: FieldDefault<C, Fallback = Cd::Value>,
    A: KeyValueAccess<C>,
{
    type Value = Cd::Value;
    type Error = Infallible;

    fn get(&self, ctx: &C) -> Result<Cd::Value, Infallible> {
        Ok(read_or_default(
            &self.access,
            &self.codec,
            &self.default,
            ctx,
            &self.key,
        ))
    }

    fn set(&self, ctx: &mut C, value: Cd::Value) {
        self.access
            .write(ctx, &self.key, self.codec.serialize(&value));
    }
}

fn read_or_default<C, Cd, D, A>(access: &A, codec: &Cd, default: &D, ctx: &C, key: &str) -> Cd::Value
where
    C: ?Sized,
    Cd: Codec,
    D: FieldDefault<C, Fallback = Cd::Value>,
    A: KeyValueAccess<C>,
{
    access
        .read(ctx, key)
        .and_then(|raw| codec.parse(&raw))
        .unwrap_or_else(|| default.default_value(ctx))
}

// ---------------------------------------------------------------------------
// Store-backed factories
// ---------------------------------------------------------------------------

/// An [`OptionalField`] over any [`crate::MetadataStore`] context.
pub fn optional_field<Cd>(key: impl Into<Cow<'static, str>>, codec: Cd) -> OptionalField<Cd> {
    OptionalField::new(key, codec, StoreAccess)
}

/// A [`RequiredField`] over any [`crate::MetadataStore`] context.
pub fn required_field<Cd>(key: impl Into<Cow<'static, str>>, codec: Cd) -> RequiredField<Cd> {
    RequiredField::new(key, codec, StoreAccess)
}

/// A [`DefaultedField`] over any [`crate::MetadataStore`] context.
pub fn defaulted_field<Cd, D>(
    key: impl Into<Cow<'static, str>>,
    codec: Cd,
    default: D,
) -> DefaultedField<Cd, D> {
    DefaultedField::new(key, codec, default, StoreAccess)
}

/// A [`DefaultedRequiredField`] over any [`crate::MetadataStore`] context.
pub fn defaulted_required_field<Cd, D>(
    key: impl Into<Cow<'static, str>>,
    codec: Cd,
    default: D,
) -> DefaultedRequiredField<Cd, D> {
    DefaultedRequiredField::new(key, codec, default, StoreAccess)
}
