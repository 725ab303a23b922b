#![forbid(unsafe_code)]

//! [`Node`]: the platform view a live view drives.
//!
//! Weft does not render. A `Node` stands where a toolkit view object would
//! be: it has identity, a parent/child tree, the handful of visible
//! properties the built-in views write, and a write log so callers can see
//! exactly which properties a change touched.
//!
//! # Invariants
//!
//! - A node has at most one parent. Adding it to another parent detaches it
//!   from the first.
//! - Every property setter appends to the write log, even when the value is
//!   unchanged; skipping redundant writes is the live view's job.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use weft_style::LayoutIntent;

/// Counter for unique node ids.
static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// A property of a [`Node`], as recorded in its write log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Text,
    Title,
    Image,
    Placeholder,
    Enabled,
    Hidden,
    Appearance,
    Layout,
    Children,
}

struct NodeState {
    id: u64,
    kind: &'static str,
    text: Option<String>,
    title: Option<String>,
    image: Option<String>,
    placeholder: Option<String>,
    enabled: bool,
    hidden: bool,
    appearance: Option<String>,
    layout: Option<LayoutIntent>,
    children: Vec<Node>,
    parent: Weak<RefCell<NodeState>>,
    writes: Vec<Property>,
}

/// Shared handle to one platform view. Clones refer to the same view.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeState>>);

impl Node {
    /// Create a detached node tagged with `kind` (e.g. `"Text"`).
    #[must_use]
    pub fn new(kind: &'static str) -> Self {
        Self(Rc::new(RefCell::new(NodeState {
            id: NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed),
            kind,
            text: None,
            title: None,
            image: None,
            placeholder: None,
            enabled: true,
            hidden: false,
            appearance: None,
            layout: None,
            children: Vec::new(),
            parent: Weak::new(),
            writes: Vec::new(),
        })))
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.0.borrow().id
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.0.borrow().kind
    }

    /// Whether both handles refer to the same view.
    #[must_use]
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn write(&self, property: Property, f: impl FnOnce(&mut NodeState)) {
        let mut state = self.0.borrow_mut();
        f(&mut state);
        state.writes.push(property);
    }

    // -- properties ---------------------------------------------------------

    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.0.borrow().text.clone()
    }

    pub fn set_text(&self, text: Option<String>) {
        self.write(Property::Text, |s| s.text = text);
    }

    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.0.borrow().title.clone()
    }

    pub fn set_title(&self, title: Option<String>) {
        self.write(Property::Title, |s| s.title = title);
    }

    #[must_use]
    pub fn image(&self) -> Option<String> {
        self.0.borrow().image.clone()
    }

    pub fn set_image(&self, image: Option<String>) {
        self.write(Property::Image, |s| s.image = image);
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<String> {
        self.0.borrow().placeholder.clone()
    }

    pub fn set_placeholder(&self, placeholder: Option<String>) {
        self.write(Property::Placeholder, |s| s.placeholder = placeholder);
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.0.borrow().enabled
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.write(Property::Enabled, |s| s.enabled = enabled);
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.0.borrow().hidden
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.write(Property::Hidden, |s| s.hidden = hidden);
    }

    /// Debug rendering of the last appearance applied.
    #[must_use]
    pub fn appearance(&self) -> Option<String> {
        self.0.borrow().appearance.clone()
    }

    pub fn set_appearance(&self, appearance: &dyn fmt::Debug) {
        let rendered = format!("{appearance:?}");
        self.write(Property::Appearance, |s| s.appearance = Some(rendered));
    }

    #[must_use]
    pub fn layout(&self) -> Option<LayoutIntent> {
        self.0.borrow().layout
    }

    /// Hand a layout intent to the layout engine.
    pub fn apply_layout(&self, layout: LayoutIntent) {
        self.write(Property::Layout, |s| s.layout = Some(layout));
    }

    // -- tree ---------------------------------------------------------------

    #[must_use]
    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    #[must_use]
    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    /// Append `child`, detaching it from any previous parent.
    pub fn add_child(&self, child: &Node) {
        let index = self.child_count();
        self.insert_child(index, child);
    }

    /// Insert `child` at `index` (clamped to the child count), detaching it
    /// from any previous parent.
    pub fn insert_child(&self, index: usize, child: &Node) {
        debug_assert!(!self.ptr_eq(child), "a node cannot be its own child");
        child.remove_from_parent();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.write(Property::Children, |s| {
            let index = index.min(s.children.len());
            s.children.insert(index, child.clone());
        });
    }

    /// Detach from the parent, if any.
    pub fn remove_from_parent(&self) {
        let parent = std::mem::take(&mut self.0.borrow_mut().parent).upgrade();
        if let Some(parent) = parent {
            let mut state = parent.borrow_mut();
            state.children.retain(|c| !Rc::ptr_eq(&c.0, &self.0));
            state.writes.push(Property::Children);
        }
    }

    // -- write log ----------------------------------------------------------

    /// Properties written since creation or the last [`Node::clear_writes`].
    #[must_use]
    pub fn writes(&self) -> Vec<Property> {
        self.0.borrow().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.0.borrow_mut().writes.clear();
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.borrow();
        f.debug_struct("Node")
            .field("id", &state.id)
            .field("kind", &state.kind)
            .field("text", &state.text)
            .field("children", &state.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(Node::new("A").id(), Node::new("A").id());
    }

    #[test]
    fn setters_are_logged() {
        let n = Node::new("Text");
        n.set_text(Some("hi".into()));
        n.set_text(Some("hi".into()));
        n.apply_layout(LayoutIntent::fill());
        assert_eq!(
            n.writes(),
            vec![Property::Text, Property::Text, Property::Layout]
        );
        n.clear_writes();
        assert!(n.writes().is_empty());
        assert_eq!(n.text().as_deref(), Some("hi"));
    }

    #[test]
    fn reparenting_detaches() {
        let a = Node::new("Stack");
        let b = Node::new("Stack");
        let c = Node::new("Text");
        a.add_child(&c);
        assert!(c.parent().unwrap().ptr_eq(&a));

        b.add_child(&c);
        assert_eq!(a.child_count(), 0);
        assert_eq!(b.child_count(), 1);
        assert!(c.parent().unwrap().ptr_eq(&b));
    }

    #[test]
    fn insert_clamps_index() {
        let p = Node::new("Stack");
        let x = Node::new("Text");
        let y = Node::new("Text");
        p.add_child(&x);
        p.insert_child(0, &y);
        let z = Node::new("Text");
        p.insert_child(99, &z);
        let kids = p.children();
        assert!(kids[0].ptr_eq(&y));
        assert!(kids[1].ptr_eq(&x));
        assert!(kids[2].ptr_eq(&z));
    }

    #[test]
    fn remove_from_parent_is_logged_on_parent() {
        let p = Node::new("Stack");
        let c = Node::new("Text");
        p.add_child(&c);
        p.clear_writes();
        c.remove_from_parent();
        assert!(c.parent().is_none());
        assert_eq!(p.writes(), vec![Property::Children]);
        // Detached twice is fine.
        c.remove_from_parent();
    }
}
