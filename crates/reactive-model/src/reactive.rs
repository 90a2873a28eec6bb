//! The reactive-system collaborator interface.
//!
//! The engine consumes exactly one operation: wrap a name → value seed
//! mapping into change-observable slots of a target instance, invoked once
//! per instance at construction. Subscription, computation and notification
//! all belong to the backend; the engine itself performs none.

use std::cell::RefCell;
use std::rc::Rc;

use crate::model::Instance;
use crate::value::FieldMap;

/// A reactive-property backend.
pub trait Reactive {
    /// Extends `target` with one observable slot per `seed` entry. The seed
    /// holds the complete declared key set, every value null, and arrives
    /// before any payload value is applied.
    fn extend_observable(&self, target: &Instance, seed: FieldMap);
}

/// The default backend: plain slots, no change tracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inert;

impl Reactive for Inert {
    fn extend_observable(&self, target: &Instance, seed: FieldMap) {
        target.install_slots(seed);
    }
}

thread_local! {
    static BACKEND: RefCell<Rc<dyn Reactive>> = RefCell::new(Rc::new(Inert));
}

/// Installs the backend used by every construction on this thread.
pub fn install(backend: Rc<dyn Reactive>) {
    BACKEND.with(|slot| *slot.borrow_mut() = backend);
}

/// Restores the default [`Inert`] backend.
pub fn reset() {
    install(Rc::new(Inert));
}

pub(crate) fn extend_observable(target: &Instance, seed: FieldMap) {
    // Clone the handle out first so a backend may itself construct models.
    let backend = BACKEND.with(|slot| slot.borrow().clone());
    backend.extend_observable(target, seed);
}
