#![forbid(unsafe_code)]

//! Editable single-line text bound two-way to a `Binding<String>`.

use weft_runtime::{Binding, SubscriptionGroup};
use weft_style::TextFieldAppearance;

use crate::node::Node;
use crate::view::{AppliedAppearance, Component, ReusableView};

/// A text field descriptor.
#[derive(Clone, Debug)]
pub struct TextField {
    pub text: Binding<String>,
    pub placeholder: Option<String>,
    pub appearance: TextFieldAppearance,
}

impl TextField {
    pub fn new(text: &Binding<String>) -> Self {
        Self {
            text: text.clone(),
            placeholder: None,
            appearance: TextFieldAppearance::default(),
        }
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn appearance(mut self, appearance: TextFieldAppearance) -> Self {
        self.appearance = appearance;
        self
    }
}

impl Component for TextField {
    type View = TextFieldView;
}

/// Live view for [`TextField`].
#[derive(Debug)]
pub struct TextFieldView {
    node: Node,
    text: Option<Binding<String>>,
    subscriptions: SubscriptionGroup,
    appearance: AppliedAppearance<TextFieldAppearance>,
}

impl TextFieldView {
    /// Simulate the user editing the field: the new contents are written
    /// back into the bound `Binding`, which in turn updates the node.
    pub fn input(&self, contents: &str) {
        match &self.text {
            Some(text) => text.set(contents.to_owned()),
            None => tracing::debug!(node = self.node.id(), "input on unconfigured text field"),
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.node.text().unwrap_or_default()
    }
}

impl ReusableView for TextFieldView {
    type Component = TextField;

    fn create() -> Self {
        Self {
            node: Node::new("TextField"),
            text: None,
            subscriptions: SubscriptionGroup::new(),
            appearance: AppliedAppearance::default(),
        }
    }

    fn configure(&mut self, field: &TextField) {
        self.subscriptions.clear();
        self.appearance
            .apply(&self.node, &field.appearance, TextFieldAppearance::layout);
        if self.node.placeholder() != field.placeholder {
            self.node.set_placeholder(field.placeholder.clone());
        }
        self.text = Some(field.text.clone());
        let node = self.node.clone();
        self.subscriptions
            .subscribe(&field.text, move |text| node.set_text(Some(text.clone())));
    }

    fn prepare_for_reuse(&mut self) {
        self.subscriptions.clear();
        self.text = None;
    }

    fn node(&self) -> &Node {
        &self.node
    }
}
