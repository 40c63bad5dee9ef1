//! Typed callback registry
//!
//! Widgets and representations publish events through an [`Observers`]
//! list. Callbacks run synchronously in registration order, so the order in
//! which events are emitted is the order every observer sees them.

use std::fmt;

use uuid::Uuid;

/// Identifier returned when registering a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(Uuid);

type Callback<E> = Box<dyn FnMut(&E)>;

/// Ordered list of callbacks for events of type `E`.
pub struct Observers<E> {
    callbacks: Vec<(ObserverId, Callback<E>)>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.callbacks.len())
            .finish()
    }
}

impl<E> Observers<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback
    pub fn add(&mut self, callback: impl FnMut(&E) + 'static) -> ObserverId {
        let id = ObserverId(Uuid::new_v4());
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback, returns true if it was registered
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(cid, _)| *cid != id);
        self.callbacks.len() != before
    }

    /// Deliver `event` to every callback in registration order
    pub fn notify(&mut self, event: &E) {
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Check if no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers: Observers<u32> = Observers::new();

        let first = Rc::clone(&log);
        observers.add(move |e| first.borrow_mut().push(("first", *e)));
        let second = Rc::clone(&log);
        observers.add(move |e| second.borrow_mut().push(("second", *e)));

        observers.notify(&7);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_remove_observer() {
        let count = Rc::new(RefCell::new(0));
        let mut observers: Observers<()> = Observers::new();
        let c = Rc::clone(&count);
        let id = observers.add(move |_| *c.borrow_mut() += 1);

        observers.notify(&());
        assert!(observers.remove(id));
        assert!(!observers.remove(id));
        observers.notify(&());

        assert_eq!(*count.borrow(), 1);
        assert!(observers.is_empty());
    }
}
