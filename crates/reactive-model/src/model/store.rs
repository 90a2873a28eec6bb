//! The opaque context handle threaded through deserialization.
//!
//! The engine clones and forwards the store to every nested deserializer
//! invocation but never reads or writes it. User code (custom deserializers,
//! model hooks, callers holding an instance) can downcast it back.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Cheap-clone opaque reference. Every instance created during one
/// `create`/`patch` call shares the same store.
#[derive(Clone, Default)]
pub struct Store {
    inner: Option<Rc<dyn Any>>,
}

impl Store {
    pub fn new<T: 'static>(value: T) -> Self {
        Self {
            inner: Some(Rc::new(value)),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.inner.is_none()
    }

    /// Borrows the stored value, if one is present and of type `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.as_deref().and_then(|any| any.downcast_ref())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(_) => write!(f, "Store(opaque)"),
            None => write!(f, "Store(none)"),
        }
    }
}
