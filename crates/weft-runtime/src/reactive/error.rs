#![forbid(unsafe_code)]

//! Errors surfaced by binding writes.

use thiserror::Error;

/// Failure of [`Binding::try_set`](super::Binding::try_set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BindingError {
    /// A subscriber tried to set the binding whose change it is currently
    /// being notified about. The write is dropped; the cell keeps the value
    /// that started the notification pass.
    #[error("re-entrant set on a `{type_name}` binding while it is notifying its subscribers")]
    Reentrant {
        /// Value type of the binding that rejected the write.
        type_name: &'static str,
    },
}
