//! Typed event emission
//!
//! Replaces the ad-hoc string-keyed handler lists found in widget toolkits
//! with a typed bus: handlers subscribe to one event kind (or to all of
//! them) and receive a [`HandlerId`] that doubles as the disposer token.
//!
//! The emitter is single-threaded by design; the whole interaction core runs
//! cooperatively on the host's event loop, so handlers are plain `FnMut`
//! closures without `Send` bounds.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Subscription handle returned by [`Emitter::on`] / [`Emitter::on_any`].
    ///
    /// Pass it back to [`Emitter::off`] to unsubscribe. Generational keys mean
    /// a stale handle after `off` or `clear` is simply ignored.
    pub struct HandlerId;
}

/// Handler function type
type Handler<E> = Box<dyn FnMut(&E)>;

struct Entry<K, E> {
    /// `None` subscribes to every kind.
    filter: Option<K>,
    handler: Handler<E>,
}

/// Dispatches typed events to registered handlers in registration order.
pub struct Emitter<K, E> {
    entries: SlotMap<HandlerId, Entry<K, E>>,
    /// Registration order; slotmap iteration order is not stable across
    /// removals, and handler ordering is part of the contract.
    order: Vec<HandlerId>,
}

impl<K: Copy + PartialEq, E> Emitter<K, E> {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Register a handler for a single event kind.
    pub fn on<F>(&mut self, kind: K, handler: F) -> HandlerId
    where
        F: FnMut(&E) + 'static,
    {
        self.insert(Some(kind), Box::new(handler))
    }

    /// Register a handler invoked for every event kind.
    pub fn on_any<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&E) + 'static,
    {
        self.insert(None, Box::new(handler))
    }

    fn insert(&mut self, filter: Option<K>, handler: Handler<E>) -> HandlerId {
        let id = self.entries.insert(Entry { filter, handler });
        self.order.push(id);
        id
    }

    /// Remove a handler; returns whether it was still registered.
    pub fn off(&mut self, id: HandlerId) -> bool {
        if self.entries.remove(id).is_some() {
            self.order.retain(|h| *h != id);
            true
        } else {
            false
        }
    }

    /// Deliver `event` to every handler subscribed to `kind`.
    pub fn emit(&mut self, kind: K, event: &E) {
        for id in &self.order {
            if let Some(entry) = self.entries.get_mut(*id) {
                let matches = match entry.filter {
                    Some(filter) => filter == kind,
                    None => true,
                };
                if matches {
                    (entry.handler)(event);
                }
            }
        }
    }

    /// Drop every handler.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Copy + PartialEq, E> Default for Emitter<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        A,
        B,
    }

    #[test]
    fn test_filtered_dispatch() {
        let mut emitter: Emitter<Kind, u32> = Emitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_a = seen.clone();
        emitter.on(Kind::A, move |v| seen_a.borrow_mut().push(("a", *v)));
        let seen_any = seen.clone();
        emitter.on_any(move |v| seen_any.borrow_mut().push(("any", *v)));

        emitter.emit(Kind::A, &1);
        emitter.emit(Kind::B, &2);

        assert_eq!(*seen.borrow(), vec![("a", 1), ("any", 1), ("any", 2)]);
    }

    #[test]
    fn test_registration_order() {
        let mut emitter: Emitter<Kind, ()> = Emitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = seen.clone();
            emitter.on(Kind::A, move |_| seen.borrow_mut().push(tag));
        }

        emitter.emit(Kind::A, &());
        assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_off_disposes_handler() {
        let mut emitter: Emitter<Kind, ()> = Emitter::new();
        let count = Rc::new(RefCell::new(0));

        let count_clone = count.clone();
        let id = emitter.on(Kind::A, move |_| *count_clone.borrow_mut() += 1);

        emitter.emit(Kind::A, &());
        assert!(emitter.off(id));
        emitter.emit(Kind::A, &());

        assert_eq!(*count.borrow(), 1);
        // A stale handle is ignored.
        assert!(!emitter.off(id));
    }

    #[test]
    fn test_clear() {
        let mut emitter: Emitter<Kind, ()> = Emitter::new();
        emitter.on(Kind::A, |_| {});
        emitter.on_any(|_| {});
        assert_eq!(emitter.len(), 2);

        emitter.clear();
        assert!(emitter.is_empty());
    }
}
