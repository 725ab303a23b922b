#![forbid(unsafe_code)]

//! Tappable button with a bound title and enabled state.

use std::fmt;
use std::rc::Rc;

use weft_runtime::{Binding, SubscriptionGroup};
use weft_style::ButtonAppearance;

use crate::node::Node;
use crate::view::{AppliedAppearance, Component, ReusableView};

/// Callback run when an enabled button is tapped.
pub type Action = Rc<dyn Fn()>;

/// A button descriptor.
#[derive(Clone)]
pub struct Button {
    pub title: Binding<Option<String>>,
    pub enabled: Binding<bool>,
    pub action: Option<Action>,
    pub appearance: ButtonAppearance,
}

impl Button {
    /// Enabled button with a fixed title and no action.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Binding::constant(Some(title.into())),
            enabled: Binding::constant(true),
            action: None,
            appearance: ButtonAppearance::default(),
        }
    }

    #[must_use]
    pub fn title(mut self, title: &Binding<Option<String>>) -> Self {
        self.title = title.clone();
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: &Binding<bool>) -> Self {
        self.enabled = enabled.clone();
        self
    }

    #[must_use]
    pub fn on_tap(mut self, action: impl Fn() + 'static) -> Self {
        self.action = Some(Rc::new(action));
        self
    }

    #[must_use]
    pub fn appearance(mut self, appearance: ButtonAppearance) -> Self {
        self.appearance = appearance;
        self
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("title", &self.title)
            .field("enabled", &self.enabled)
            .field("action", &self.action.is_some())
            .field("appearance", &self.appearance)
            .finish()
    }
}

impl Component for Button {
    type View = ButtonView;
}

/// Live view for [`Button`].
pub struct ButtonView {
    node: Node,
    action: Option<Action>,
    subscriptions: SubscriptionGroup,
    appearance: AppliedAppearance<ButtonAppearance>,
}

impl ButtonView {
    /// Simulate a user tap. Runs the action if the button is enabled and
    /// returns whether it ran.
    pub fn tap(&self) -> bool {
        if !self.node.is_enabled() {
            tracing::trace!(node = self.node.id(), "tap on disabled button ignored");
            return false;
        }
        match &self.action {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ButtonView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonView")
            .field("node", &self.node)
            .field("subscriptions", &self.subscriptions)
            .finish_non_exhaustive()
    }
}

impl ReusableView for ButtonView {
    type Component = Button;

    fn create() -> Self {
        Self {
            node: Node::new("Button"),
            action: None,
            subscriptions: SubscriptionGroup::new(),
            appearance: AppliedAppearance::default(),
        }
    }

    fn configure(&mut self, button: &Button) {
        self.subscriptions.clear();
        self.action.clone_from(&button.action);
        self.appearance
            .apply(&self.node, &button.appearance, ButtonAppearance::layout);

        let node = self.node.clone();
        self.subscriptions
            .subscribe(&button.title, move |title| node.set_title(title.clone()));
        let node = self.node.clone();
        self.subscriptions
            .subscribe(&button.enabled, move |enabled| node.set_enabled(*enabled));
    }

    fn prepare_for_reuse(&mut self) {
        self.subscriptions.clear();
        self.action = None;
    }

    fn node(&self) -> &Node {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Property;
    use std::cell::Cell;

    #[test]
    fn tap_respects_enabled_binding() {
        let taps = Rc::new(Cell::new(0));
        let enabled = Binding::new(true);
        let t = Rc::clone(&taps);
        let view = Button::new("Go")
            .enabled(&enabled)
            .on_tap(move || t.set(t.get() + 1))
            .materialize();

        assert_eq!(view.node().title().as_deref(), Some("Go"));
        assert!(view.tap());
        enabled.set(false);
        assert!(!view.tap());
        assert_eq!(taps.get(), 1);
    }

    #[test]
    fn title_change_touches_title_only() {
        let title = Binding::new(Some("Save".to_string()));
        let view = Button::new("").title(&title).materialize();
        view.node().clear_writes();
        title.set(Some("Saved".into()));
        assert_eq!(view.node().writes(), vec![Property::Title]);
    }

    #[test]
    fn reuse_drops_previous_action() {
        let mut view = Button::new("a").on_tap(|| {}).materialize();
        view.prepare_for_reuse();
        view.configure(&Button::new("b"));
        assert!(!view.tap());
        assert_eq!(view.node().title().as_deref(), Some("b"));
    }
}
