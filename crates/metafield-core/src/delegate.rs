//! Property-style access to fields.
//!
//! [`Property`] wraps a field behind `read`/`write`, [`Bound`] pins a field
//! to one owner, and [`metadata_accessors!`](crate::metadata_accessors)
//! generates named getter/setter methods on a host type. None of these add
//! semantics: every call is the wrapped field's `get` or `set`.

use crate::field::MetadataField;

/// A field exposed as a named property of its owner.
#[derive(Clone, Copy, Debug)]
pub struct Property<F> {
    field: F,
}

impl<F> Property<F> {
    pub const fn new(field: F) -> Self {
        Self { field }
    }

    /// Read the property from `owner`.
    pub fn read<C>(&self, owner: &C) -> Result<F::Value, F::Error>
    where
        C: ?Sized,
        F: MetadataField<C>,
    {
        self.field.get(owner)
    }

    /// Write the property on `owner`.
    pub fn write<C>(&self, owner: &mut C, value: F::Value)
    where
        C: ?Sized,
        F: MetadataField<C>,
    {
        self.field.set(owner, value)
    }

    /// Pin this property to a single owner.
    pub fn bind<'a, C: ?Sized>(&'a self, owner: &'a mut C) -> Bound<'a, F, C> {
        Bound::new(&self.field, owner)
    }
}

/// A field bound to one owner for the duration of a borrow.
#[derive(Debug)]
pub struct Bound<'a, F, C: ?Sized> {
    field: &'a F,
    owner: &'a mut C,
}

impl<'a, F, C: ?Sized> Bound<'a, F, C> {
    pub fn new(field: &'a F, owner: &'a mut C) -> Self {
        Self { field, owner }
    }
}

impl<F, C> Bound<'_, F, C>
where
    C: ?Sized,
    F: MetadataField<C>,
{
    pub fn get(&self) -> Result<F::Value, F::Error> {
        self.field.get(&*self.owner)
    }

    pub fn set(&mut self, value: F::Value) {
        self.field.set(&mut *self.owner, value)
    }
}

/// Generate getter/setter methods on a host type from field expressions.
///
/// Each entry reads `vis getter, setter: Type = field_expr;`. A getter
/// followed by `?` returns [`FieldResult`](crate::FieldResult); otherwise the
/// field must be total and the getter returns the value directly.
///
/// ```
/// use std::collections::HashMap;
/// use metafield_core::{metadata_accessors, optional_field, required_field, FromStrCodec, MetadataStore};
///
/// #[derive(Default)]
/// struct Pin(HashMap<String, String>);
///
/// impl MetadataStore for Pin {
///     fn read(&self, key: &str) -> Option<String> { self.0.get(key).cloned() }
///     fn write(&mut self, key: &str, value: String) { self.0.insert(key.into(), value); }
///     fn remove(&mut self, key: &str) { self.0.remove(key); }
/// }
///
/// metadata_accessors! {
///     impl Pin {
///         pub rank, set_rank: Option<u32> = optional_field("rank", FromStrCodec::new());
///         pub label?, set_label: String = required_field("label", FromStrCodec::new());
///     }
/// }
///
/// let mut pin = Pin::default();
/// assert_eq!(pin.rank(), None);
/// pin.set_rank(Some(2));
/// assert_eq!(pin.rank(), Some(2));
/// assert!(pin.label().is_err());
/// pin.set_label("dock".into());
/// assert_eq!(pin.label().unwrap(), "dock");
/// ```
#[macro_export]
macro_rules! metadata_accessors {
    (impl $owner:ty { $($body:tt)* }) => {
        impl $owner {
            $crate::metadata_accessors!(@items $($body)*);
        }
    };

    (@items) => {};

    (@items
        $(#[$meta:meta])*
        $vis:vis $getter:ident ?, $setter:ident : $value:ty = $field:expr;
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        $vis fn $getter(&self) -> $crate::FieldResult<$value> {
            $crate::MetadataField::get(&$field, self).map_err(::core::convert::Into::into)
        }

        $vis fn $setter(&mut self, value: $value) {
            $crate::MetadataField::set(&$field, self, value)
        }

        $crate::metadata_accessors!(@items $($rest)*);
    };

    (@items
        $(#[$meta:meta])*
        $vis:vis $getter:ident, $setter:ident : $value:ty = $field:expr;
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        $vis fn $getter(&self) -> $value {
            $crate::TotalField::fetch(&$field, self)
        }

        $vis fn $setter(&mut self, value: $value) {
            $crate::MetadataField::set(&$field, self, value)
        }

        $crate::metadata_accessors!(@items $($rest)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::MetadataStore;
    use crate::builders::{defaulted_required_field, optional_field, required_field};
    use crate::codec::FromStrCodec;
    use crate::error::FieldError;
    use crate::field::ConstantDefault;
    use std::collections::BTreeMap;

    #[derive(Debug, Default)]
    struct Pin {
        meta: BTreeMap<String, String>,
    }

    impl MetadataStore for Pin {
        fn read(&self, key: &str) -> Option<String> {
            self.meta.get(key).cloned()
        }

        fn write(&mut self, key: &str, value: String) {
            self.meta.insert(key.to_string(), value);
        }

        fn remove(&mut self, key: &str) {
            self.meta.remove(key);
        }
    }

    crate::metadata_accessors! {
        impl Pin {
            /// Draw order.
            pub(crate) priority, set_priority: i32 =
                defaulted_required_field("priority", FromStrCodec::new(), ConstantDefault(0));
            note, set_note: Option<String> = optional_field("note", FromStrCodec::new());
            weight?, set_weight: f32 = required_field("weight", FromStrCodec::new());
        }
    }

    #[test]
    fn property_reads_and_writes_owner() {
        let prop = Property::new(optional_field("note", FromStrCodec::<String>::new()));
        let mut pin = Pin::default();
        assert_eq!(prop.read(&pin), Ok(None));

        prop.write(&mut pin, Some("pier".into()));
        assert_eq!(prop.read(&pin), Ok(Some("pier".to_string())));
        assert_eq!(pin.meta.get("note").map(String::as_str), Some("pier"));
    }

    #[test]
    fn bound_property_pins_owner() {
        let prop = Property::new(required_field("weight", FromStrCodec::<f32>::new()));
        let mut pin = Pin::default();
        {
            let mut bound = prop.bind(&mut pin);
            assert!(bound.get().is_err());
            bound.set(1.5);
            assert_eq!(bound.get(), Ok(1.5));
        }
        assert_eq!(pin.read("weight"), Some("1.5".to_string()));
    }

    #[test]
    fn generated_total_accessors() {
        let mut pin = Pin::default();
        assert_eq!(pin.priority(), 0);
        pin.set_priority(4);
        assert_eq!(pin.priority(), 4);

        assert_eq!(pin.note(), None);
        pin.set_note(Some("ferry".into()));
        assert_eq!(pin.note().as_deref(), Some("ferry"));
    }

    #[test]
    fn generated_fallible_accessors() {
        let mut pin = Pin::default();
        assert!(matches!(
            pin.weight(),
            Err(FieldError::MissingRequiredField { .. })
        ));

        pin.write("weight", "heavy".into());
        assert!(matches!(pin.weight(), Err(FieldError::MalformedValue { .. })));

        pin.set_weight(2.25);
        assert_eq!(pin.weight(), Ok(2.25));
    }
}
