#![forbid(unsafe_code)]

//! [`SubscriptionGroup`]: one owner for all subscriptions of a live view.
//!
//! A view that subscribes to bindings in `configure` keeps the guards here
//! and clears the group when it is recycled, so a binding it no longer
//! represents can never reach it again.
//!
//! # Invariants
//!
//! 1. Subscriptions are released in reverse registration order, on `clear`
//!    and on drop.
//! 2. After `clear` (or drop) no callback registered through this group fires.
//! 3. The group is reusable after `clear`.

use std::fmt;

use super::binding::Binding;
use super::observable::Subscription;

/// Scoped owner of a set of [`Subscription`]s, revoked together.
#[derive(Default)]
pub struct SubscriptionGroup {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `sub` alive until the group is cleared or dropped.
    pub fn hold(&mut self, sub: Subscription) {
        self.subscriptions.push(sub);
    }

    /// Subscribe to `source` and hold the resulting subscription.
    ///
    /// The callback runs once immediately with the current value.
    pub fn subscribe<T: Clone + 'static>(
        &mut self,
        source: &Binding<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        let sub = source.subscribe(callback);
        self.subscriptions.push(sub);
        self
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Revoke every held subscription now.
    pub fn clear(&mut self) {
        while let Some(sub) = self.subscriptions.pop() {
            sub.cancel();
        }
    }
}

impl Drop for SubscriptionGroup {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for SubscriptionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionGroup")
            .field("len", &self.subscriptions.len())
            .finish()
    }
}
