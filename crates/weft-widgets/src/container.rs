#![forbid(unsafe_code)]

//! Single-child container.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use weft_runtime::{Binding, SubscriptionGroup};
use weft_style::ContainerAppearance;

use crate::node::Node;
use crate::reconcile::{Slot, SlotState};
use crate::view::{AnyView, AppliedAppearance, Component, Element, ReusableView};

/// Wraps zero or one child.
#[derive(Clone, Debug)]
pub struct Container {
    pub child: Binding<Option<Element>>,
    pub appearance: ContainerAppearance,
}

impl Container {
    /// Container around a fixed child.
    pub fn new(child: impl Into<Element>) -> Self {
        Self::dynamic(&Binding::constant(Some(child.into())))
    }

    /// Empty container.
    pub fn empty() -> Self {
        Self::dynamic(&Binding::constant(None))
    }

    pub fn dynamic(child: &Binding<Option<Element>>) -> Self {
        Self {
            child: child.clone(),
            appearance: ContainerAppearance::default(),
        }
    }

    #[must_use]
    pub fn appearance(mut self, appearance: ContainerAppearance) -> Self {
        self.appearance = appearance;
        self
    }
}

impl Component for Container {
    type View = ContainerView;
}

/// Live view for [`Container`].
#[derive(Debug)]
pub struct ContainerView {
    node: Node,
    slot: Rc<RefCell<Slot>>,
    subscriptions: SubscriptionGroup,
    appearance: AppliedAppearance<ContainerAppearance>,
}

impl ContainerView {
    #[must_use]
    pub fn state(&self) -> SlotState {
        self.slot.borrow().state()
    }

    /// The child's live view, if any.
    #[must_use]
    pub fn child(&self) -> Option<Ref<'_, dyn AnyView>> {
        Ref::filter_map(self.slot.borrow(), Slot::view).ok()
    }
}

impl ReusableView for ContainerView {
    type Component = Container;

    fn create() -> Self {
        Self {
            node: Node::new("Container"),
            slot: Rc::default(),
            subscriptions: SubscriptionGroup::new(),
            appearance: AppliedAppearance::default(),
        }
    }

    fn configure(&mut self, container: &Container) {
        self.subscriptions.clear();
        self.appearance
            .apply(&self.node, &container.appearance, ContainerAppearance::layout);
        let node = self.node.clone();
        let slot = Rc::clone(&self.slot);
        self.subscriptions.subscribe(&container.child, move |child| {
            slot.borrow_mut().reconcile(&node, child.as_ref());
        });
    }

    fn prepare_for_reuse(&mut self) {
        self.subscriptions.clear();
    }

    fn node(&self) -> &Node {
        &self.node
    }
}
