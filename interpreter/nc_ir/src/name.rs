use std::fmt;

/// An interned identifier.
///
/// Cheap to copy, compare, and hash; resolve the text through the
/// [`StringInterner`](crate::StringInterner) that produced it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(u32);

impl Name {
    /// The empty string, pre-interned in every interner.
    pub const EMPTY: Name = Name(0);

    pub(crate) const fn new(index: u32) -> Self {
        Name(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}
