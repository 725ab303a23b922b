#![forbid(unsafe_code)]

//! Flexible empty space.

use weft_style::{LayoutIntent, Size};

use crate::node::Node;
use crate::view::{AppliedAppearance, Component, ReusableView};

/// Empty space, optionally with a minimum length along the parent's axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spacer {
    pub min_length: Option<f32>,
}

impl Spacer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn min_length(length: f32) -> Self {
        Self {
            min_length: Some(length),
        }
    }

    fn layout(&self) -> LayoutIntent {
        match self.min_length {
            Some(len) => LayoutIntent::Center {
                size: Some(Size::new(len, len)),
            },
            None => LayoutIntent::Automatic,
        }
    }
}

impl Component for Spacer {
    type View = SpacerView;
}

/// Live view for [`Spacer`]. Holds no subscriptions, so the default
/// `prepare_for_reuse` is enough.
#[derive(Debug)]
pub struct SpacerView {
    node: Node,
    applied: AppliedAppearance<Spacer>,
}

impl ReusableView for SpacerView {
    type Component = Spacer;

    fn create() -> Self {
        Self {
            node: Node::new("Spacer"),
            applied: AppliedAppearance::default(),
        }
    }

    fn configure(&mut self, spacer: &Spacer) {
        self.applied.apply(&self.node, spacer, Spacer::layout);
    }

    fn node(&self) -> &Node {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_length_becomes_fixed_size() {
        let view = Spacer::min_length(8.0).materialize();
        assert_eq!(
            view.node().layout().and_then(|l| l.fixed_size()),
            Some(Size::new(8.0, 8.0))
        );
    }

    #[test]
    fn reconfigure_with_same_spacer_writes_nothing() {
        let mut view = Spacer::new().materialize();
        view.node().clear_writes();
        view.configure(&Spacer::new());
        assert!(view.node().writes().is_empty());
    }
}
