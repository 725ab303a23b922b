#![forbid(unsafe_code)]

//! Reactive two-way bindings for Weft.
//!
//! - [`Binding`]: a shared, hot, synchronously-notifying value handle with
//!   derived forms (projection, combination, mapping, optional widening and
//!   narrowing).
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`SubscriptionGroup`]: owner that revokes a group of subscriptions at
//!   once; every live view keeps one.
//! - [`BindingError`]: the one write failure, a re-entrant set.
//!
//! # Architecture
//!
//! Bindings use `Rc<RefCell<..>>` for single-threaded shared ownership and are
//! `!Send`. Cells keep subscribers as `Weak` callbacks; the strong side lives
//! in the [`Subscription`], and dead entries are pruned after each
//! notification pass.
//!
//! Derived bindings hold no value of their own. They forward reads, writes
//! and subscriptions to their parents, so a write anywhere in a chain lands
//! in exactly one cell and fans out from there.

pub mod binding;
pub mod error;
pub mod observable;
pub mod scope;

pub use binding::{Binding, combine};
pub use error::BindingError;
pub use observable::Subscription;
pub use scope::SubscriptionGroup;
