#![forbid(unsafe_code)]

//! Static or bound text label.

use weft_runtime::{Binding, SubscriptionGroup};
use weft_style::TextAppearance;

use crate::node::Node;
use crate::view::{AppliedAppearance, Component, ReusableView};

/// A text label. `None` text shows an empty label.
#[derive(Clone, Debug)]
pub struct Text {
    pub text: Binding<Option<String>>,
    pub appearance: TextAppearance,
}

impl Text {
    /// Fixed text.
    pub fn new(text: impl Into<String>) -> Self {
        Self::bound(&Binding::constant(Some(text.into())))
    }

    /// Text that follows `text`.
    pub fn bound(text: &Binding<Option<String>>) -> Self {
        Self {
            text: text.clone(),
            appearance: TextAppearance::default(),
        }
    }

    /// Text that follows a non-optional string binding.
    pub fn bound_str(text: &Binding<String>) -> Self {
        Self::bound(&text.widen())
    }

    #[must_use]
    pub fn appearance(mut self, appearance: TextAppearance) -> Self {
        self.appearance = appearance;
        self
    }
}

impl Component for Text {
    type View = TextView;
}

/// Live view for [`Text`].
#[derive(Debug)]
pub struct TextView {
    node: Node,
    subscriptions: SubscriptionGroup,
    appearance: AppliedAppearance<TextAppearance>,
}

impl TextView {
    /// Text currently shown.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.node.text()
    }
}

impl ReusableView for TextView {
    type Component = Text;

    fn create() -> Self {
        Self {
            node: Node::new("Text"),
            subscriptions: SubscriptionGroup::new(),
            appearance: AppliedAppearance::default(),
        }
    }

    fn configure(&mut self, text: &Text) {
        self.subscriptions.clear();
        self.appearance
            .apply(&self.node, &text.appearance, TextAppearance::layout);
        let node = self.node.clone();
        self.subscriptions
            .subscribe(&text.text, move |value| node.set_text(value.clone()));
    }

    fn prepare_for_reuse(&mut self) {
        self.subscriptions.clear();
    }

    fn node(&self) -> &Node {
        &self.node
    }
}
