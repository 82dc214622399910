//! Backing-store primitives consumed by field constructors.
//!
//! The core never owns a store. A host object exposes its raw string map
//! either by implementing [`MetadataStore`] (and using [`StoreAccess`]), or
//! by handing a constructor arbitrary closures through [`FnAccess`].

use std::fmt;

use crate::error::{FieldError, FieldResult};

/// A raw, string-keyed metadata store owned by a host object.
pub trait MetadataStore {
    /// The string stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: String);

    /// Remove `key`. Removing an unset key is a no-op.
    fn remove(&mut self, key: &str);

    /// Whether `key` currently holds a value.
    fn contains(&self, key: &str) -> bool {
        self.read(key).is_some()
    }
}

/// Read/write primitives a field uses to reach the store behind a context.
///
/// Implementations are stateless strategies; all mutable state lives in the
/// context passed to each call.
pub trait KeyValueAccess<C: ?Sized> {
    /// The string stored under `key`, or `None` if unset.
    fn read(&self, ctx: &C, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    fn write(&self, ctx: &mut C, key: &str, value: String);

    /// Remove `key` from the store.
    fn clear(&self, ctx: &mut C, key: &str);

    /// Read a key that must be present.
    ///
    /// The default treats an unset key as [`FieldError::MissingRequiredField`].
    fn read_required(&self, ctx: &C, key: &str) -> FieldResult<String> {
        self.read(ctx, key)
            .ok_or_else(|| FieldError::MissingRequiredField { key: key.to_string() })
    }

    /// Store `value` when present, clear the key otherwise.
    fn write_or_clear(&self, ctx: &mut C, key: &str, value: Option<String>) {
        match value {
            Some(value) => self.write(ctx, key, value),
            None => self.clear(ctx, key),
        }
    }
}

/// Access strategy for any context that is itself a [`MetadataStore`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreAccess;

impl<C: MetadataStore + ?Sized> KeyValueAccess<C> for StoreAccess {
    fn read(&self, ctx: &C, key: &str) -> Option<String> {
        ctx.read(key)
    }

    fn write(&self, ctx: &mut C, key: &str, value: String) {
        ctx.write(key, value);
    }

    fn clear(&self, ctx: &mut C, key: &str) {
        ctx.remove(key);
    }
}

/// Access strategy assembled from caller-supplied closures.
///
/// `read` fetches a key, `write` stores a string, `clear` removes a key.
#[derive(Clone, Copy)]
pub struct FnAccess<R, W, X> {
    read: R,
    write: W,
    clear: X,
}

impl<R, W, X> FnAccess<R, W, X> {
    pub fn new<C: ?Sized>(read: R, write: W, clear: X) -> Self
    where
        R: Fn(&C, &str) -> Option<String>,
        W: Fn(&mut C, &str, String),
        X: Fn(&mut C, &str),
    {
        Self { read, write, clear }
    }
}

impl<R, W, X> fmt::Debug for FnAccess<R, W, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnAccess")
    }
}

impl<C, R, W, X> KeyValueAccess<C> for FnAccess<R, W, X>
where
    C: ?Sized,
    R: Fn(&C, &str) -> Option<String>,
    W: Fn(&mut C, &str, String),
    X: Fn(&mut C, &str),
{
    fn read(&self, ctx: &C, key: &str) -> Option<String> {
        (self.read)(ctx, key)
    }

    fn write(&self, ctx: &mut C, key: &str, value: String) {
        (self.write)(ctx, key, value)
    }

    fn clear(&self, ctx: &mut C, key: &str) {
        (self.clear)(ctx, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Bag(HashMap<String, String>);

    impl MetadataStore for Bag {
        fn read(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn write(&mut self, key: &str, value: String) {
            self.0.insert(key.to_string(), value);
        }

        fn remove(&mut self, key: &str) {
            self.0.remove(key);
        }
    }

    #[test]
    fn store_access_reads_and_writes_through() {
        let mut bag = Bag::default();
        StoreAccess.write(&mut bag, "k", "v".into());
        assert_eq!(StoreAccess.read(&bag, "k"), Some("v".to_string()));
        assert!(bag.contains("k"));

        StoreAccess.clear(&mut bag, "k");
        assert_eq!(StoreAccess.read(&bag, "k"), None);
    }

    #[test]
    fn write_or_clear_removes_on_none() {
        let mut bag = Bag::default();
        StoreAccess.write_or_clear(&mut bag, "k", Some("1".into()));
        assert_eq!(bag.read("k"), Some("1".to_string()));
        StoreAccess.write_or_clear(&mut bag, "k", None);
        assert!(!bag.contains("k"));
    }

    #[test]
    fn read_required_reports_unset_key() {
        let bag = Bag::default();
        let err = StoreAccess.read_required(&bag, "missing").unwrap_err();
        assert_eq!(
            err,
            FieldError::MissingRequiredField { key: "missing".into() }
        );
    }

    #[test]
    fn fn_access_uses_closures() {
        let access = FnAccess::new(
            |ctx: &Vec<(String, String)>, key: &str| {
                ctx.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
            },
            |ctx: &mut Vec<(String, String)>, key: &str, value: String| {
                ctx.retain(|(k, _)| k != key);
                ctx.push((key.to_string(), value));
            },
            |ctx: &mut Vec<(String, String)>, key: &str| ctx.retain(|(k, _)| k != key),
        );

        let mut pairs = Vec::new();
        access.write(&mut pairs, "a", "1".into());
        access.write(&mut pairs, "a", "2".into());
        assert_eq!(pairs.len(), 1);
        assert_eq!(access.read(&pairs, "a"), Some("2".to_string()));
        access.clear(&mut pairs, "a");
        assert!(pairs.is_empty());
    }
}
