#![forbid(unsafe_code)]

//! The reusable-view contract.
//!
//! A [`Component`] is a descriptor: a cheap value describing one UI element,
//! typically holding [`Binding`](weft_runtime::Binding)s for its mutable
//! parts. Each component type names the [`ReusableView`] it materializes
//! into. A live view is created once per slot and then configured every time
//! a new descriptor targets that slot.
//!
//! Container code works with the type-erased forms: [`Element`] (any
//! component) and `Box<dyn AnyView>` (any live view). The pairing between
//! them is the live-view [`TypeId`]: a container compares
//! [`Element::view_type`] with [`AnyView::view_type`] before asking an
//! element to configure a view.
//!
//! # Lifecycle
//!
//! ```text
//! create ─▶ configure ─┬─▶ prepare_for_reuse ─▶ configure ─┬─▶ ...
//!                      │                                   │
//!                      └── will_display / did_end_display ─┘  (virtualized lists)
//! ```
//!
//! # Invariants
//!
//! 1. `configure` may be called any number of times on one instance with
//!    different descriptors of the same type.
//! 2. After `prepare_for_reuse`, no binding subscribed by an earlier
//!    `configure` can update the view.
//! 3. A descriptor never mutates; the view only reads it and subscribes to
//!    its bindings.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::rc::Rc;

use weft_style::LayoutIntent;

use crate::node::Node;

/// A descriptor that materializes into a live view.
pub trait Component: Sized + 'static {
    /// The live view this descriptor configures.
    type View: ReusableView<Component = Self>;

    /// Build a fresh live view and configure it with this descriptor.
    fn materialize(&self) -> Self::View {
        let mut view = Self::View::create();
        view.configure(self);
        view
    }
}

/// A stateful live view that can be reconfigured and recycled.
pub trait ReusableView: Sized + 'static {
    /// The descriptor type this view accepts.
    type Component: Component;

    /// Create an unconfigured instance.
    fn create() -> Self;

    /// Apply a descriptor. Must be safe to call repeatedly.
    fn configure(&mut self, component: &Self::Component);

    /// Called right before a recycled instance is configured with a new
    /// descriptor. Views that subscribe to bindings must revoke those
    /// subscriptions here.
    fn prepare_for_reuse(&mut self) {}

    /// The view is about to become visible in a virtualized list.
    fn will_display(&mut self) {}

    /// The view left the visible part of a virtualized list.
    fn did_end_display(&mut self) {}

    /// The platform view this live view drives.
    fn node(&self) -> &Node;

    /// Key for recycling pools. Derived from the type name, so it is stable
    /// for a given build.
    fn reuse_identifier() -> &'static str {
        type_name::<Self>()
    }
}

// ---------------------------------------------------------------------------
// AnyView
// ---------------------------------------------------------------------------

/// Type-erased live view.
pub trait AnyView: 'static {
    fn view_type(&self) -> TypeId;
    fn view_type_name(&self) -> &'static str;
    fn reuse_identifier(&self) -> &'static str;
    fn node(&self) -> &Node;
    fn prepare_for_reuse(&mut self);
    fn will_display(&mut self);
    fn did_end_display(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Boxes a concrete view behind [`AnyView`].
struct Erased<V>(V);

impl<V: ReusableView> AnyView for Erased<V> {
    fn view_type(&self) -> TypeId {
        TypeId::of::<V>()
    }

    fn view_type_name(&self) -> &'static str {
        type_name::<V>()
    }

    fn reuse_identifier(&self) -> &'static str {
        V::reuse_identifier()
    }

    fn node(&self) -> &Node {
        self.0.node()
    }

    fn prepare_for_reuse(&mut self) {
        self.0.prepare_for_reuse();
    }

    fn will_display(&mut self) {
        self.0.will_display();
    }

    fn did_end_display(&mut self) {
        self.0.did_end_display();
    }

    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.0
    }
}

/// Erase a concrete live view.
pub fn erase<V: ReusableView>(view: V) -> Box<dyn AnyView> {
    Box::new(Erased(view))
}

impl dyn AnyView {
    /// Whether this is a `V`.
    #[must_use]
    pub fn is<V: ReusableView>(&self) -> bool {
        self.view_type() == TypeId::of::<V>()
    }

    /// Borrow the concrete view.
    #[must_use]
    pub fn downcast_ref<V: ReusableView>(&self) -> Option<&V> {
        self.as_any().downcast_ref::<V>()
    }

    /// Mutably borrow the concrete view.
    pub fn downcast_mut<V: ReusableView>(&mut self) -> Option<&mut V> {
        self.as_any_mut().downcast_mut::<V>()
    }
}

impl fmt::Debug for dyn AnyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyView")
            .field("type", &self.view_type_name())
            .field("node", &self.node().id())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// AnyComponent / Element
// ---------------------------------------------------------------------------

/// Type-erased descriptor. Implemented for every [`Component`].
pub trait AnyComponent: 'static {
    /// `TypeId` of the live view this descriptor materializes into.
    fn view_type(&self) -> TypeId;
    fn view_type_name(&self) -> &'static str;
    fn reuse_identifier(&self) -> &'static str;
    fn materialize_any(&self) -> Box<dyn AnyView>;
    /// Configure `view` with this descriptor. Returns `false`, leaving the
    /// view untouched, when `view` is not this descriptor's view type.
    fn configure_any(&self, view: &mut dyn AnyView) -> bool;
    fn as_any(&self) -> &dyn Any;
}

impl<C: Component> AnyComponent for C {
    fn view_type(&self) -> TypeId {
        TypeId::of::<C::View>()
    }

    fn view_type_name(&self) -> &'static str {
        type_name::<C::View>()
    }

    fn reuse_identifier(&self) -> &'static str {
        <C::View as ReusableView>::reuse_identifier()
    }

    fn materialize_any(&self) -> Box<dyn AnyView> {
        erase(self.materialize())
    }

    fn configure_any(&self, view: &mut dyn AnyView) -> bool {
        match view.downcast_mut::<C::View>() {
            Some(view) => {
                view.configure(self);
                true
            }
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A heterogeneous, cheaply clonable descriptor.
#[derive(Clone)]
pub struct Element(Rc<dyn AnyComponent>);

impl Element {
    pub fn new<C: Component>(component: C) -> Self {
        Self(Rc::new(component))
    }

    #[must_use]
    pub fn view_type(&self) -> TypeId {
        self.0.view_type()
    }

    #[must_use]
    pub fn view_type_name(&self) -> &'static str {
        self.0.view_type_name()
    }

    #[must_use]
    pub fn reuse_identifier(&self) -> &'static str {
        self.0.reuse_identifier()
    }

    /// Whether this element configures views of type `V`.
    #[must_use]
    pub fn targets<V: ReusableView>(&self) -> bool {
        self.view_type() == TypeId::of::<V>()
    }

    /// Build and configure a fresh live view.
    #[must_use]
    pub fn materialize(&self) -> Box<dyn AnyView> {
        self.0.materialize_any()
    }

    /// Configure an existing view; see [`AnyComponent::configure_any`].
    pub fn configure(&self, view: &mut dyn AnyView) -> bool {
        self.0.configure_any(view)
    }

    /// Borrow the concrete descriptor.
    #[must_use]
    pub fn downcast_ref<C: Component>(&self) -> Option<&C> {
        self.0.as_any().downcast_ref::<C>()
    }

    /// Whether both elements are the same descriptor instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<C: Component> From<C> for Element {
    fn from(component: C) -> Self {
        Self::new(component)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.view_type_name()).finish()
    }
}

/// Build a `Vec<Element>` from components of any type.
///
/// ```
/// use weft_widgets::{elements, Element, Spacer, Text};
///
/// let children: Vec<Element> = elements![Text::new("a"), Spacer::new(), Text::new("b")];
/// assert_eq!(children.len(), 3);
/// ```
#[macro_export]
macro_rules! elements {
    ($($component:expr),* $(,)?) => {
        vec![$($crate::Element::from($component)),*]
    };
}

// ---------------------------------------------------------------------------
// Appearance caching
// ---------------------------------------------------------------------------

/// Last appearance a view applied to its node.
///
/// Skips the node write when the incoming appearance equals the cached one,
/// and re-applies layout only when the layout-affecting part changed.
#[derive(Debug, Clone)]
pub struct AppliedAppearance<A> {
    last: Option<A>,
}

impl<A> Default for AppliedAppearance<A> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<A: PartialEq + Clone + fmt::Debug> AppliedAppearance<A> {
    /// Apply `next` to `node` if it differs from the last applied value.
    /// Returns whether anything was written.
    pub fn apply(&mut self, node: &Node, next: &A, layout: impl Fn(&A) -> LayoutIntent) -> bool {
        if self.last.as_ref() == Some(next) {
            return false;
        }
        let relayout = self.last.as_ref().map(&layout) != Some(layout(next));
        node.set_appearance(next);
        if relayout {
            node.apply_layout(layout(next));
        }
        self.last = Some(next.clone());
        true
    }

    #[must_use]
    pub fn current(&self) -> Option<&A> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Property;
    use weft_style::{Color, TextAppearance};

    struct Probe {
        label: &'static str,
    }

    struct ProbeView {
        node: Node,
        configured: Vec<&'static str>,
    }

    impl Component for Probe {
        type View = ProbeView;
    }

    impl ReusableView for ProbeView {
        type Component = Probe;

        fn create() -> Self {
            Self {
                node: Node::new("Probe"),
                configured: Vec::new(),
            }
        }

        fn configure(&mut self, component: &Probe) {
            self.configured.push(component.label);
        }

        fn node(&self) -> &Node {
            &self.node
        }
    }

    struct Other;
    struct OtherView(Node);

    impl Component for Other {
        type View = OtherView;
    }

    impl ReusableView for OtherView {
        type Component = Other;

        fn create() -> Self {
            Self(Node::new("Other"))
        }

        fn configure(&mut self, _: &Other) {}

        fn node(&self) -> &Node {
            &self.0
        }
    }

    #[test]
    fn materialize_configures_once() {
        let view = Probe { label: "a" }.materialize();
        assert_eq!(view.configured, vec!["a"]);
    }

    #[test]
    fn element_reports_view_type() {
        let e = Element::from(Probe { label: "x" });
        assert!(e.targets::<ProbeView>());
        assert!(!e.targets::<OtherView>());
        assert_eq!(e.reuse_identifier(), ProbeView::reuse_identifier());
        assert!(e.view_type_name().ends_with("ProbeView"));
        assert_eq!(e.downcast_ref::<Probe>().map(|p| p.label), Some("x"));
    }

    #[test]
    fn configure_any_checks_type() {
        let probe = Element::from(Probe { label: "b" });
        let mut view = Element::from(Other).materialize();
        assert!(!probe.configure(&mut *view));

        let mut view = Element::from(Probe { label: "a" }).materialize();
        assert!(probe.configure(&mut *view));
        let concrete = view.downcast_ref::<ProbeView>().unwrap();
        assert_eq!(concrete.configured, vec!["a", "b"]);
        assert!(view.is::<ProbeView>());
    }

    #[test]
    fn elements_macro_mixes_types() {
        let list = elements![Probe { label: "a" }, Other];
        assert!(list[0].targets::<ProbeView>());
        assert!(list[1].targets::<OtherView>());
    }

    #[test]
    fn applied_appearance_skips_equal_and_relayouts_on_layout_change() {
        let node = Node::new("Text");
        let mut applied = AppliedAppearance::default();
        let a = TextAppearance::default();

        assert!(applied.apply(&node, &a, TextAppearance::layout));
        assert_eq!(node.writes(), vec![Property::Appearance, Property::Layout]);

        node.clear_writes();
        assert!(!applied.apply(&node, &a, TextAppearance::layout));
        assert!(node.writes().is_empty());

        let recolored = a.color(Color::RED);
        assert!(applied.apply(&node, &recolored, TextAppearance::layout));
        assert_eq!(node.writes(), vec![Property::Appearance]);

        node.clear_writes();
        let moved = recolored.with_layout(LayoutIntent::fill());
        applied.apply(&node, &moved, TextAppearance::layout);
        assert_eq!(node.writes(), vec![Property::Appearance, Property::Layout]);
        assert_eq!(applied.current(), Some(&moved));
    }
}
