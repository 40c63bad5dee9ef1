//! Non-owning handles to scene objects
//!
//! The scene owns cameras, viewports and axes through `Rc<RefCell<_>>`.
//! Annotation objects keep a [`WeakHandle`] instead and upgrade it at every
//! use, so a collaborator destroyed first is observed as `None` rather than
//! kept alive.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Shared, externally owned scene object.
pub type Shared<T> = Rc<RefCell<T>>;

/// Weak back-reference to a [`Shared`] object; may be unset.
pub struct WeakHandle<T: ?Sized>(Option<Weak<RefCell<T>>>);

impl<T: ?Sized> WeakHandle<T> {
    /// Handle pointing at `target`.
    pub fn new(target: &Rc<RefCell<T>>) -> Self {
        Self(Some(Rc::downgrade(target)))
    }

    /// Handle pointing at nothing.
    pub fn unset() -> Self {
        Self(None)
    }

    /// Whether a target was ever assigned.
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Whether the target is still alive.
    pub fn is_alive(&self) -> bool {
        self.0.as_ref().is_some_and(|w| w.strong_count() > 0)
    }

    /// Get a strong reference for the duration of one use.
    pub fn upgrade(&self) -> Option<Rc<RefCell<T>>> {
        self.0.as_ref().and_then(Weak::upgrade)
    }
}

impl<T: ?Sized> Default for WeakHandle<T> {
    fn default() -> Self {
        Self::unset()
    }
}

impl<T: ?Sized> Clone for WeakHandle<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: ?Sized> fmt::Debug for WeakHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match (self.is_set(), self.is_alive()) {
            (false, _) => "unset",
            (true, true) => "alive",
            (true, false) => "dropped",
        };
        f.debug_tuple("WeakHandle").field(&state).finish()
    }
}
