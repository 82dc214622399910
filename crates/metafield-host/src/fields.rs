//! Field factories for primitive and enumeration values.
//!
//! Thin instantiations of the core constructors over any
//! [`metafield_core::MetadataStore`] context. The `*_or` variants never
//! fail a read and accept only concrete writes.

use std::borrow::Cow;

use metafield_core::{
    defaulted_required_field, optional_field, ConstantDefault, DefaultedRequiredField,
    Enumerated, FromStrCodec, OptionalField, OrdinalCodec,
};

/// Optional integer stored as decimal text.
pub fn int_field(key: impl Into<Cow<'static, str>>) -> OptionalField<FromStrCodec<i64>> {
    optional_field(key, FromStrCodec::new())
}

/// Integer with a constant fallback.
pub fn int_field_or(
    key: impl Into<Cow<'static, str>>,
    default: i64,
) -> DefaultedRequiredField<FromStrCodec<i64>, ConstantDefault<i64>> {
    defaulted_required_field(key, FromStrCodec::new(), ConstantDefault(default))
}

/// Optional float stored as shortest round-trip text.
pub fn float_field(key: impl Into<Cow<'static, str>>) -> OptionalField<FromStrCodec<f64>> {
    optional_field(key, FromStrCodec::new())
}

/// Float with a constant fallback.
pub fn float_field_or(
    key: impl Into<Cow<'static, str>>,
    default: f64,
) -> DefaultedRequiredField<FromStrCodec<f64>, ConstantDefault<f64>> {
    defaulted_required_field(key, FromStrCodec::new(), ConstantDefault(default))
}

/// Optional boolean stored as `true`/`false`.
pub fn bool_field(key: impl Into<Cow<'static, str>>) -> OptionalField<FromStrCodec<bool>> {
    optional_field(key, FromStrCodec::new())
}

/// Boolean with a constant fallback.
pub fn bool_field_or(
    key: impl Into<Cow<'static, str>>,
    default: bool,
) -> DefaultedRequiredField<FromStrCodec<bool>, ConstantDefault<bool>> {
    defaulted_required_field(key, FromStrCodec::new(), ConstantDefault(default))
}

/// Optional string stored verbatim.
pub fn string_field(key: impl Into<Cow<'static, str>>) -> OptionalField<FromStrCodec<String>> {
    optional_field(key, FromStrCodec::new())
}

/// String with a constant fallback.
pub fn string_field_or(
    key: impl Into<Cow<'static, str>>,
    default: impl Into<String>,
) -> DefaultedRequiredField<FromStrCodec<String>, ConstantDefault<String>> {
    defaulted_required_field(key, FromStrCodec::new(), ConstantDefault(default.into()))
}

/// Optional enumeration stored as its ordinal index.
pub fn enum_field<E: Enumerated>(key: impl Into<Cow<'static, str>>) -> OptionalField<OrdinalCodec<E>> {
    optional_field(key, OrdinalCodec::new())
}

/// Enumeration with a constant fallback.
pub fn enum_field_or<E: Enumerated>(
    key: impl Into<Cow<'static, str>>,
    default: E,
) -> DefaultedRequiredField<OrdinalCodec<E>, ConstantDefault<E>> {
    defaulted_required_field(key, OrdinalCodec::new(), ConstantDefault(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::MarkerShape;
    use crate::map::MetadataMap;
    use metafield_core::{MetadataField, MetadataStore, TotalField};
    use proptest::prelude::*;

    #[test]
    fn count_scenario() {
        let count = int_field("count");
        let mut map = MetadataMap::new();

        assert_eq!(count.fetch(&map), None);

        count.set(&mut map, Some(5));
        assert_eq!(count.fetch(&map), Some(5));

        map.write("count", "notanumber".into());
        assert_eq!(count.fetch(&map), None);
    }

    #[test]
    fn enum_scenario() {
        let shape = enum_field::<MarkerShape>("shape");
        let mut map = MetadataMap::new();

        shape.set(&mut map, Some(MarkerShape::VARIANTS[1]));
        assert_eq!(map.get("shape"), Some("1"));
        assert_eq!(shape.fetch(&map), Some(MarkerShape::VARIANTS[1]));

        map.write("shape", "3".into());
        assert_eq!(shape.fetch(&map), None);
    }

    #[test]
    fn defaulted_factories_fall_back() {
        let mut map = MetadataMap::new();
        map.write("flag", "maybe".into());

        assert_eq!(int_field_or("n", 10).fetch(&map), 10);
        assert_eq!(float_field_or("f", 0.5).fetch(&map), 0.5);
        assert!(bool_field_or("flag", true).fetch(&map));
        assert_eq!(string_field_or("s", "none").fetch(&map), "none");
        assert_eq!(
            enum_field_or("e", MarkerShape::Square).fetch(&map),
            MarkerShape::Square
        );
    }

    #[test]
    fn string_and_bool_write_then_read() {
        let mut map = MetadataMap::new();
        let label = string_field("label");
        let flag = bool_field("flag");

        label.set(&mut map, Some("Lighthouse".into()));
        flag.set(&mut map, Some(false));

        assert_eq!(label.fetch(&map).as_deref(), Some("Lighthouse"));
        assert_eq!(flag.fetch(&map), Some(false));
    }

    proptest! {
        #[test]
        fn float_write_then_read(v in proptest::num::f64::NORMAL) {
            let field = float_field("value");
            let mut map = MetadataMap::new();
            field.set(&mut map, Some(v));
            prop_assert_eq!(field.fetch(&map), Some(v));
        }

        #[test]
        fn int_or_write_then_read(v in any::<i64>(), d in any::<i64>()) {
            let field = int_field_or("value", d);
            let mut map = MetadataMap::new();
            prop_assert_eq!(field.fetch(&map), d);
            field.set(&mut map, v);
            prop_assert_eq!(field.fetch(&map), v);
        }
    }
}
