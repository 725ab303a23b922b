#![forbid(unsafe_code)]

//! Tuning knobs for the virtualized containers.

use std::ops::Range;

/// Configuration shared by [`CollectionView`](crate::CollectionView) and
/// [`TableView`](crate::TableView).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WidgetsConfig {
    /// Upper bound on off-screen views kept per reuse identifier.
    /// Views enqueued past the bound are dropped.
    /// Default: 16
    pub max_pooled_per_identifier: usize,

    /// Rows materialized when a virtualized container is first configured,
    /// before any scrolling.
    /// Default: 0..20
    pub initial_visible: Range<usize>,

    /// Emit a debug summary after every reload of a virtualized list.
    /// Default: true
    pub log_reconcile: bool,
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            max_pooled_per_identifier: 16,
            initial_visible: 0..20,
            log_reconcile: true,
        }
    }
}

impl WidgetsConfig {
    #[must_use]
    pub fn max_pooled_per_identifier(mut self, max: usize) -> Self {
        self.max_pooled_per_identifier = max;
        self
    }

    #[must_use]
    pub fn initial_visible(mut self, rows: Range<usize>) -> Self {
        self.initial_visible = rows;
        self
    }

    #[must_use]
    pub fn log_reconcile(mut self, enabled: bool) -> Self {
        self.log_reconcile = enabled;
        self
    }

    /// Initial range with an inverted range collapsed to empty.
    pub(crate) fn sanitized_initial_visible(&self) -> Range<usize> {
        let Range { start, end } = self.initial_visible;
        start..end.max(start)
    }
}
