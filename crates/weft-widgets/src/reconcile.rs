#![forbid(unsafe_code)]

//! Reuse-or-rebuild reconciliation of an ordered child list.
//!
//! Given the live child views of a container and the new list of child
//! descriptors, [`reconcile`] picks one of two strategies:
//!
//! - **Reuse** when the lists have the same length and, at every index, the
//!   descriptor's view type equals the live view's type. Each view gets
//!   `prepare_for_reuse` then `configure`, in index order. Nothing is created
//!   or destroyed, so view identity and any state a view keeps outside
//!   `configure` (scroll offset, focus) survive.
//! - **Rebuild** otherwise. Every existing view is detached from the parent
//!   and dropped (its subscriptions go with it), then one fresh view per
//!   descriptor is materialized and appended in order.
//!
//! There is no partial reuse: a single mismatch anywhere rebuilds the whole
//! list, so a view is never configured with a descriptor of another type.
//!
//! The same procedure backs ordered stacks, z-stacks and single-child
//! containers ([`Slot`], the 1-vs-1 case).
//!
//! # Slot state machine
//!
//! ```text
//! Empty ──first element──▶ Configured ──same type──▶ Configured   (reuse)
//!                              │
//!                              └──other type──▶ Empty ─▶ Configured (rebuild)
//! ```

use std::fmt;

use crate::node::Node;
use crate::view::{AnyView, Element};

/// What a reconciliation pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Every view was kept and reconfigured.
    Reused { count: usize },
    /// Every view was replaced.
    Rebuilt { removed: usize, created: usize },
}

impl Reconciliation {
    #[must_use]
    pub const fn is_reuse(self) -> bool {
        matches!(self, Self::Reused { .. })
    }
}

/// Whether `views` can be reconfigured in place with `elements`.
#[must_use]
pub fn can_reuse(views: &[Box<dyn AnyView>], elements: &[Element]) -> bool {
    views.len() == elements.len()
        && views
            .iter()
            .zip(elements)
            .all(|(view, element)| view.view_type() == element.view_type())
}

/// Bring `views` (children of `parent`, in order) in line with `elements`.
pub fn reconcile(
    parent: &Node,
    views: &mut Vec<Box<dyn AnyView>>,
    elements: &[Element],
) -> Reconciliation {
    let _span = tracing::debug_span!(
        "reconcile",
        parent = parent.kind(),
        existing = views.len(),
        incoming = elements.len()
    )
    .entered();

    if can_reuse(views, elements) {
        for (view, element) in views.iter_mut().zip(elements) {
            view.prepare_for_reuse();
            let configured = element.configure(&mut **view);
            debug_assert!(configured, "view type checked before configure");
        }
        tracing::trace!(count = elements.len(), "children reused");
        return Reconciliation::Reused {
            count: elements.len(),
        };
    }

    let removed = views.len();
    for view in views.drain(..) {
        view.node().remove_from_parent();
    }
    for element in elements {
        let view = element.materialize();
        parent.add_child(view.node());
        views.push(view);
    }
    tracing::trace!(removed, created = elements.len(), "children rebuilt");
    Reconciliation::Rebuilt {
        removed,
        created: elements.len(),
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// State of a single-child [`Slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Configured,
}

/// One child position of a container, reconciled like a list of length 0/1.
#[derive(Default)]
pub struct Slot {
    views: Vec<Box<dyn AnyView>>,
}

impl Slot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SlotState {
        if self.views.is_empty() {
            SlotState::Empty
        } else {
            SlotState::Configured
        }
    }

    /// The live view, if configured.
    #[must_use]
    pub fn view(&self) -> Option<&dyn AnyView> {
        self.views.first().map(|v| &**v)
    }

    pub fn view_mut(&mut self) -> Option<&mut dyn AnyView> {
        self.views.first_mut().map(|v| &mut **v)
    }

    /// Show `element` in this slot (or nothing, for `None`).
    pub fn reconcile(&mut self, parent: &Node, element: Option<&Element>) -> Reconciliation {
        let elements: Vec<Element> = element.into_iter().cloned().collect();
        reconcile(parent, &mut self.views, &elements)
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("state", &self.state())
            .field("view", &self.view().map(|v| v.view_type_name()))
            .finish()
    }
}
