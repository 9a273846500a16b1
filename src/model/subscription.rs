//! Disposable subscriptions shared by every pub/sub service
//!
//! The action bus, the config option store and the history all hand out a
//! [`Subscription`] when a handler is registered. Disposing it (explicitly or
//! by dropping it) removes the handler again.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Handle returned by `subscribe`/`listen`. Removes its handler when disposed.
#[must_use = "dropping a Subscription removes the handler immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a subscription that runs `unsubscribe` once when disposed
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Remove the handler now
    pub fn dispose(mut self) {
        self.run();
    }

    /// Whether the handler is still registered through this handle
    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }

    fn run(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Ordered list of handlers keyed by a registration id
pub(crate) struct Listeners<H: ?Sized> {
    next_id: u64,
    entries: Vec<(u64, Rc<H>)>,
}

impl<H: ?Sized> Listeners<H> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, handler: Rc<H>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, handler));
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Clone the current handlers so they can be invoked without holding a borrow
    pub(crate) fn snapshot(&self) -> Vec<Rc<H>> {
        self.entries.iter().map(|(_, h)| Rc::clone(h)).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Build a subscription that calls `remove(owner, id)` when disposed.
///
/// Holds only a weak reference, so a subscription that outlives its service is inert.
pub(crate) fn detach_on_dispose<T: 'static>(
    owner: &Rc<RefCell<T>>,
    id: u64,
    remove: impl Fn(&mut T, u64) + 'static,
) -> Subscription {
    let weak: Weak<RefCell<T>> = Rc::downgrade(owner);
    Subscription::new(move || {
        if let Some(owner) = weak.upgrade() {
            remove(&mut owner.borrow_mut(), id);
        }
    })
}
