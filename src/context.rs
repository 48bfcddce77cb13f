//! Request-scoped context.
//!
//! A [`Context`] is an immutable chain of key/value bindings that travels with
//! one request. Each processing stage *extends* the chain with
//! [`Context::with_value`] and gets a new context back; the context it started
//! from is left untouched, so earlier stages and concurrently running tasks
//! never observe a binding change underneath them.
//!
//! ```text
//! Context::new()                       ← empty, shared by nobody
//!        ↓ with_value(REQUEST_ID_KEY, "abc123")     (inbound header)
//! [request-id = "abc123"]
//!        ↓ with_value(REQUEST_ID_KEY, "abc1")       (truncated by limit)
//! [request-id = "abc1"] → [request-id = "abc123"]   ← nearest binding wins
//! ```
//!
//! Cloning a context is one `Arc` clone. Lookups walk the chain from the most
//! recent binding outward, which is O(bindings); request chains hold a
//! handful of entries at most.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Names a slot in a [`Context`].
///
/// Keys compare by name. Pick names that will not clash with other
/// middleware sharing the same context.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Key(&'static str);

impl Key {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The well-known key under which the request identifier is stored.
///
/// The value bound here is always a `String`.
pub const REQUEST_ID_KEY: Key = Key::new("request-id");

struct Binding {
    key: Key,
    value: Box<dyn Any + Send + Sync>,
    parent: Option<Arc<Binding>>,
}

/// An immutable, cheaply clonable key/value chain scoped to one request.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Binding>>,
}

impl Context {
    /// An empty context: the root every request chain starts from.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new context that binds `value` under `key` on top of `self`.
    ///
    /// `self` is not modified. A binding for a key that is already present
    /// shadows the older one for lookups through the returned context only.
    pub fn with_value<T: Any + Send + Sync>(&self, key: Key, value: T) -> Self {
        Self {
            head: Some(Arc::new(Binding {
                key,
                value: Box::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Looks up the nearest binding for `key`.
    ///
    /// Returns `None` when the key is unbound, or when the nearest binding
    /// holds a value of a type other than `T`.
    pub fn value<T: Any>(&self, key: Key) -> Option<&T> {
        self.bindings()
            .find(|b| b.key == key)
            .and_then(|b| b.value.downcast_ref::<T>())
    }

    /// Whether any binding exists for `key`, regardless of its type.
    pub fn contains(&self, key: Key) -> bool {
        self.bindings().any(|b| b.key == key)
    }

    /// Walks the chain from the most recent binding to the root.
    fn bindings(&self) -> impl Iterator<Item = &Binding> {
        std::iter::successors(self.head.as_deref(), |b| b.parent.as_deref())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.bindings().map(|b| b.key.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TENANT: Key = Key::new("tenant");

    #[test]
    fn empty_context_has_no_bindings() {
        let ctx = Context::new();
        assert!(ctx.value::<String>(REQUEST_ID_KEY).is_none());
        assert!(!ctx.contains(REQUEST_ID_KEY));
    }

    #[test]
    fn with_value_leaves_parent_untouched() {
        let root = Context::new();
        let child = root.with_value(REQUEST_ID_KEY, "abc".to_owned());

        assert!(root.value::<String>(REQUEST_ID_KEY).is_none());
        assert_eq!(child.value::<String>(REQUEST_ID_KEY).map(String::as_str), Some("abc"));
    }

    #[test]
    fn nearest_binding_shadows_older_one() {
        let first = Context::new().with_value(REQUEST_ID_KEY, "outer".to_owned());
        let second = first.with_value(REQUEST_ID_KEY, "inner".to_owned());

        assert_eq!(second.value::<String>(REQUEST_ID_KEY).map(String::as_str), Some("inner"));
        assert_eq!(first.value::<String>(REQUEST_ID_KEY).map(String::as_str), Some("outer"));
    }

    #[test]
    fn unrelated_keys_are_reachable_through_the_chain() {
        let ctx = Context::new()
            .with_value(TENANT, 7_u32)
            .with_value(REQUEST_ID_KEY, "id".to_owned());

        assert_eq!(ctx.value::<u32>(TENANT), Some(&7));
        assert_eq!(format!("{ctx:?}"), r#"["request-id", "tenant"]"#);
    }

    #[test]
    fn type_mismatch_reads_as_absent() {
        let ctx = Context::new().with_value(REQUEST_ID_KEY, 42_u64);
        assert!(ctx.contains(REQUEST_ID_KEY));
        assert!(ctx.value::<String>(REQUEST_ID_KEY).is_none());
    }

    #[test]
    fn clones_are_readable_from_other_threads() {
        let ctx = Context::new().with_value(REQUEST_ID_KEY, "shared".to_owned());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ctx = ctx.clone();
                std::thread::spawn(move || ctx.value::<String>(REQUEST_ID_KEY).cloned())
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap().as_deref(), Some("shared"));
        }
    }
}
