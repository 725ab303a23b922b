#![forbid(unsafe_code)]

//! Runtime primitives for Weft: reactive bindings and subscription scopes.

pub mod reactive;

pub use reactive::{Binding, BindingError, Subscription, SubscriptionGroup, combine};
