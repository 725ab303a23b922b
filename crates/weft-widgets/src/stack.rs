#![forbid(unsafe_code)]

//! Ordered and layered child containers.
//!
//! [`Stack`] lays its children out along an axis; [`ZStack`] layers them,
//! first child at the back. Both run the reconciler every time their
//! children binding emits, so a static child list is configured once and a
//! dynamic one is reconciled on each change.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use weft_runtime::{Binding, SubscriptionGroup};
use weft_style::{Axis, LayoutIntent, StackAppearance};

use crate::node::Node;
use crate::reconcile::{reconcile, Reconciliation};
use crate::view::{AnyView, AppliedAppearance, Component, Element, ReusableView};

/// Live children of a stack plus the outcome of the last pass.
#[derive(Debug, Default)]
struct ChildList {
    views: Vec<Box<dyn AnyView>>,
    last: Option<Reconciliation>,
}

/// Shared machinery of [`StackView`] and [`ZStackView`].
#[derive(Debug)]
struct Children {
    node: Node,
    list: Rc<RefCell<ChildList>>,
    subscriptions: SubscriptionGroup,
}

impl Children {
    fn new(kind: &'static str) -> Self {
        Self {
            node: Node::new(kind),
            list: Rc::default(),
            subscriptions: SubscriptionGroup::new(),
        }
    }

    fn bind(&mut self, children: &Binding<Vec<Element>>) {
        self.subscriptions.clear();
        let node = self.node.clone();
        let list = Rc::clone(&self.list);
        self.subscriptions.subscribe(children, move |elements| {
            let mut list = list.borrow_mut();
            let outcome = reconcile(&node, &mut list.views, elements);
            list.last = Some(outcome);
        });
    }

    fn views(&self) -> Ref<'_, [Box<dyn AnyView>]> {
        Ref::map(self.list.borrow(), |list| list.views.as_slice())
    }

    fn last(&self) -> Option<Reconciliation> {
        self.list.borrow().last
    }
}

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

/// Children laid out along `axis`.
#[derive(Clone, Debug)]
pub struct Stack {
    pub axis: Axis,
    pub children: Binding<Vec<Element>>,
    pub appearance: StackAppearance,
}

impl Stack {
    /// Vertical stack with a fixed child list.
    pub fn vertical(children: Vec<Element>) -> Self {
        Self::dynamic(Axis::Vertical, &Binding::constant(children))
    }

    /// Horizontal stack with a fixed child list.
    pub fn horizontal(children: Vec<Element>) -> Self {
        Self::dynamic(Axis::Horizontal, &Binding::constant(children))
    }

    /// Stack whose children follow `children`.
    pub fn dynamic(axis: Axis, children: &Binding<Vec<Element>>) -> Self {
        Self {
            axis,
            children: children.clone(),
            appearance: StackAppearance::default(),
        }
    }

    #[must_use]
    pub fn appearance(mut self, appearance: StackAppearance) -> Self {
        self.appearance = appearance;
        self
    }

    fn layout(applied: &(Axis, StackAppearance)) -> LayoutIntent {
        applied.1.layout()
    }
}

impl Component for Stack {
    type View = StackView;
}

/// Live view for [`Stack`].
#[derive(Debug)]
pub struct StackView {
    children: Children,
    appearance: AppliedAppearance<(Axis, StackAppearance)>,
}

impl StackView {
    /// Live child views, in order.
    #[must_use]
    pub fn children(&self) -> Ref<'_, [Box<dyn AnyView>]> {
        self.children.views()
    }

    #[must_use]
    pub fn last_reconciliation(&self) -> Option<Reconciliation> {
        self.children.last()
    }

    #[must_use]
    pub fn axis(&self) -> Option<Axis> {
        self.appearance.current().map(|(axis, _)| *axis)
    }
}

impl ReusableView for StackView {
    type Component = Stack;

    fn create() -> Self {
        Self {
            children: Children::new("Stack"),
            appearance: AppliedAppearance::default(),
        }
    }

    fn configure(&mut self, stack: &Stack) {
        self.appearance.apply(
            &self.children.node,
            &(stack.axis, stack.appearance),
            Stack::layout,
        );
        self.children.bind(&stack.children);
    }

    fn prepare_for_reuse(&mut self) {
        self.children.subscriptions.clear();
    }

    fn node(&self) -> &Node {
        &self.children.node
    }
}

// ---------------------------------------------------------------------------
// ZStack
// ---------------------------------------------------------------------------

/// Children layered back to front.
#[derive(Clone, Debug)]
pub struct ZStack {
    pub children: Binding<Vec<Element>>,
    pub appearance: StackAppearance,
}

impl ZStack {
    pub fn new(children: Vec<Element>) -> Self {
        Self::dynamic(&Binding::constant(children))
    }

    pub fn dynamic(children: &Binding<Vec<Element>>) -> Self {
        Self {
            children: children.clone(),
            appearance: StackAppearance::default(),
        }
    }

    #[must_use]
    pub fn appearance(mut self, appearance: StackAppearance) -> Self {
        self.appearance = appearance;
        self
    }
}

impl Component for ZStack {
    type View = ZStackView;
}

/// Live view for [`ZStack`]. Node child order is z-order.
#[derive(Debug)]
pub struct ZStackView {
    children: Children,
    appearance: AppliedAppearance<StackAppearance>,
}

impl ZStackView {
    #[must_use]
    pub fn children(&self) -> Ref<'_, [Box<dyn AnyView>]> {
        self.children.views()
    }

    #[must_use]
    pub fn last_reconciliation(&self) -> Option<Reconciliation> {
        self.children.last()
    }
}

impl ReusableView for ZStackView {
    type Component = ZStack;

    fn create() -> Self {
        Self {
            children: Children::new("ZStack"),
            appearance: AppliedAppearance::default(),
        }
    }

    fn configure(&mut self, stack: &ZStack) {
        self.appearance
            .apply(&self.children.node, &stack.appearance, StackAppearance::layout);
        self.children.bind(&stack.children);
    }

    fn prepare_for_reuse(&mut self) {
        self.children.subscriptions.clear();
    }

    fn node(&self) -> &Node {
        &self.children.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{elements, Button, Image, Spacer, Text, TextView};

    fn child_ids(node: &Node) -> Vec<u64> {
        node.children().iter().map(Node::id).collect()
    }

    #[test]
    fn static_children_mount_in_order() {
        let view = Stack::vertical(elements![Text::new("a"), Spacer::new(), Text::new("b")])
            .materialize();
        assert_eq!(view.children().len(), 3);
        assert_eq!(view.node().child_count(), 3);
        assert_eq!(view.axis(), Some(Axis::Vertical));
        assert_eq!(
            view.last_reconciliation(),
            Some(Reconciliation::Rebuilt { removed: 0, created: 3 })
        );
        let last = view.children()[2]
            .downcast_ref::<TextView>()
            .and_then(TextView::text);
        assert_eq!(last.as_deref(), Some("b"));
    }

    #[test]
    fn dynamic_children_reuse_on_same_shape() {
        let children = Binding::new(elements![Text::new("a"), Button::new("b")]);
        let view = Stack::dynamic(Axis::Horizontal, &children).materialize();
        let before = child_ids(view.node());

        children.set(elements![Text::new("c"), Button::new("d")]);
        assert_eq!(
            view.last_reconciliation(),
            Some(Reconciliation::Reused { count: 2 })
        );
        assert_eq!(child_ids(view.node()), before);

        children.set(elements![Image::named("x")]);
        assert_eq!(
            view.last_reconciliation(),
            Some(Reconciliation::Rebuilt { removed: 2, created: 1 })
        );
        assert_eq!(view.node().child_count(), 1);
    }

    #[test]
    fn reused_stack_reuses_its_children() {
        let mut view = Stack::vertical(elements![Text::new("a")]).materialize();
        let before = child_ids(view.node());
        view.prepare_for_reuse();
        view.configure(&Stack::vertical(elements![Text::new("b")]));
        assert_eq!(child_ids(view.node()), before);
        assert!(view.last_reconciliation().is_some_and(Reconciliation::is_reuse));
    }

    #[test]
    fn recycled_stack_ignores_old_children_binding() {
        let old = Binding::new(elements![Text::new("a")]);
        let mut view = Stack::dynamic(Axis::Vertical, &old).materialize();
        view.prepare_for_reuse();
        view.configure(&Stack::vertical(elements![Text::new("b"), Text::new("c")]));
        old.set(Vec::new());
        assert_eq!(view.node().child_count(), 2);
    }

    #[test]
    fn zstack_keeps_z_order() {
        let view = ZStack::new(elements![Image::named("bg"), Text::new("fg")]).materialize();
        let kinds: Vec<&str> = view.node().children().iter().map(Node::kind).collect();
        assert_eq!(kinds, vec!["Image", "Text"]);
        assert_eq!(view.children().len(), 2);
    }
}
