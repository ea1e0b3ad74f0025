//! Single-threaded shared-mutability wrapper.
//!
//! Lists, ranges, and environments have reference semantics: copying a
//! value copies the handle, and mutation is visible through every copy.
//! All usage goes through the newtype; `Rc<RefCell>` is the
//! implementation.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Shared(Rc::new(RefCell::new(value)))
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether two handles refer to the same allocation.
    pub fn ptr_eq(a: &Shared<T>, b: &Shared<T>) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(inner) => write!(f, "Shared({inner:?})"),
            Err(_) => f.write_str("Shared(<borrowed>)"),
        }
    }
}
