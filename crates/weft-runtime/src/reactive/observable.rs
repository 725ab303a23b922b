#![forbid(unsafe_code)]

//! The shared value cell behind every dynamic [`Binding`](super::Binding),
//! plus the [`Subscription`] guard handed out by all binding streams.
//!
//! # Invariants
//!
//! 1. `set` stores the value before any subscriber runs, so a subscriber that
//!    reads the cell observes the value it is being notified about.
//! 2. Subscribers are notified in registration order, depth-first, before
//!    `set` returns.
//! 3. A subscriber registered while a notification pass is running receives
//!    the current value on registration but is not part of the running pass.
//! 4. Dropping a [`Subscription`] in the middle of a pass stops any further
//!    invocation of its callback, including later in the same pass.
//! 5. A `set` on a cell that is currently notifying is rejected with
//!    [`BindingError::Reentrant`]; the stored value is left untouched.
//!
//! # Failure Modes
//!
//! - Subscriber panic: the pass is abandoned, the cell leaves its notifying
//!   state (via a drop guard) and the panic propagates to the caller of `set`.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::error::BindingError;

/// A boxed subscriber callback. Kept behind `Rc` by its [`Subscription`] and
/// behind `Weak` by the cell, so dropping the subscription is enough to
/// unsubscribe.
pub(crate) struct Listener<T>(Box<dyn Fn(&T)>);

impl<T> Listener<T> {
    pub(crate) fn new(f: impl Fn(&T) + 'static) -> Rc<Self> {
        Rc::new(Self(Box::new(f)))
    }

    pub(crate) fn call(&self, value: &T) {
        (self.0)(value);
    }
}

struct CellInner<T> {
    value: T,
    version: u64,
    notifying: bool,
    subscribers: Vec<Weak<Listener<T>>>,
}

/// Single-threaded value cell with hot, synchronous change notification.
pub(crate) struct ValueCell<T> {
    inner: RefCell<CellInner<T>>,
}

impl<T: Clone + 'static> ValueCell<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            inner: RefCell::new(CellInner {
                value,
                version: 0,
                notifying: false,
                subscribers: Vec::new(),
            }),
        }
    }

    pub(crate) fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    pub(crate) fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    pub(crate) fn try_set(&self, value: T) -> Result<(), BindingError> {
        let (snapshot, value) = {
            let mut inner = self.inner.borrow_mut();
            if inner.notifying {
                return Err(BindingError::Reentrant {
                    type_name: std::any::type_name::<T>(),
                });
            }
            inner.value = value;
            inner.version += 1;
            inner.notifying = true;
            (inner.subscribers.clone(), inner.value.clone())
        };

        let _pass = NotifyPass { cell: self };
        for weak in &snapshot {
            if let Some(listener) = weak.upgrade() {
                listener.call(&value);
            }
        }
        Ok(())
    }

    pub(crate) fn subscribe(&self, listener: Rc<Listener<T>>) -> Subscription {
        let current = {
            let mut inner = self.inner.borrow_mut();
            // Writes prune on their own; a cell that is only ever subscribed
            // to and dropped from must not accumulate dead entries.
            if !inner.notifying {
                inner.subscribers.retain(|w| w.strong_count() > 0);
            }
            inner.subscribers.push(Rc::downgrade(&listener));
            inner.value.clone()
        };
        listener.call(&current);
        Subscription::new(listener)
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }
}

/// Ends a notification pass even if a subscriber panics, and prunes dead
/// subscribers while the cell is quiet.
struct NotifyPass<'a, T> {
    cell: &'a ValueCell<T>,
}

impl<T> Drop for NotifyPass<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.cell.inner.try_borrow_mut() {
            inner.notifying = false;
            inner.subscribers.retain(|w| w.strong_count() > 0);
        }
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// RAII guard for a binding subscription.
///
/// The callback stays registered for as long as the guard lives. Derived
/// bindings (combinations, projections) may hold several underlying
/// registrations in one guard; all of them are released together.
#[must_use = "dropping a Subscription unsubscribes immediately"]
#[derive(Default)]
pub struct Subscription {
    guards: Vec<Rc<dyn Any>>,
}

impl Subscription {
    pub(crate) fn new(guard: Rc<dyn Any>) -> Self {
        Self {
            guards: vec![guard],
        }
    }

    /// A subscription that holds nothing (used by constant bindings, whose
    /// stream completes after the initial emission).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fold another subscription into this one.
    pub fn merge(mut self, mut other: Subscription) -> Self {
        self.guards.append(&mut other.guards);
        self
    }

    /// Unsubscribe now. Equivalent to dropping the guard.
    pub fn cancel(self) {}

    pub(crate) fn registrations(&self) -> usize {
        self.guards.len()
    }

    /// Whether this guard keeps any callback registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.guards.is_empty()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("registrations", &self.guards.len())
            .finish()
    }
}
