//! String interning for identifiers.
//!
//! Interned strings are leaked to get `&'static str`, so lookups hand out
//! references without holding the lock. Interners live for the whole
//! process; scripts intern a bounded set of identifiers, so the leak is
//! the interner's backing store rather than a growth hazard.

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

#[derive(Default)]
struct Inner {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// Maps identifier text to compact [`Name`] ids and back.
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    pub fn new() -> Self {
        let interner = StringInterner {
            inner: RwLock::new(Inner::default()),
        };
        // Name::EMPTY must resolve to "".
        let empty = interner.intern("");
        debug_assert_eq!(empty, Name::EMPTY);
        interner
    }

    /// Intern `text`, returning the same [`Name`] for equal strings.
    pub fn intern(&self, text: &str) -> Name {
        {
            let inner = self.inner.read();
            if let Some(&index) = inner.map.get(text) {
                return Name::new(index);
            }
        }

        let mut inner = self.inner.write();
        // Re-check: another caller may have interned it between the locks.
        if let Some(&index) = inner.map.get(text) {
            return Name::new(index);
        }

        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        let index = u32::try_from(inner.strings.len()).unwrap_or(u32::MAX);
        inner.strings.push(leaked);
        inner.map.insert(leaked, index);
        Name::new(index)
    }

    /// Resolve a [`Name`] back to its text.
    ///
    /// Names from a different interner resolve to `""`.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.inner
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable handle to a [`StringInterner`].
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new(interner: StringInterner) -> Self {
        SharedInterner(Arc::new(interner))
    }
}

impl Clone for SharedInterner {
    fn clone(&self) -> Self {
        SharedInterner(Arc::clone(&self.0))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        SharedInterner::new(StringInterner::new())
    }
}

impl Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Debug for SharedInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedInterner")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn intern_is_idempotent() {
        let interner = StringInterner::new();
        let a = interner.intern("x");
        let b = interner.intern("x");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_strings_get_distinct_names() {
        let interner = StringInterner::new();
        assert_ne!(interner.intern("x"), interner.intern("y"));
    }

    #[test]
    fn lookup_round_trips() {
        let interner = StringInterner::new();
        let name = interner.intern("total");
        assert_eq!(interner.lookup(name), "total");
    }

    #[test]
    fn empty_string_is_the_empty_name() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }

    #[test]
    fn shared_handles_see_the_same_table() {
        let interner = SharedInterner::default();
        let other = interner.clone();
        let name = interner.intern("shared");
        assert_eq!(other.lookup(name), "shared");
        assert_eq!(other.intern("shared"), name);
    }
}
