#![forbid(unsafe_code)]

//! Flat virtualized collection.

use std::cell::{Ref, RefCell};
use std::ops::Range;
use std::rc::Rc;

use weft_runtime::{Binding, SubscriptionGroup};
use weft_style::ContainerAppearance;

use super::{RowChanges, VirtualList};
use crate::config::WidgetsConfig;
use crate::node::Node;
use crate::view::{AnyView, AppliedAppearance, Component, Element, ReusableView};

/// A scrolling list of heterogeneous items.
#[derive(Clone, Debug)]
pub struct Collection {
    pub items: Binding<Vec<Element>>,
    pub config: WidgetsConfig,
    pub appearance: ContainerAppearance,
}

impl Collection {
    pub fn new(items: &Binding<Vec<Element>>) -> Self {
        Self {
            items: items.clone(),
            config: WidgetsConfig::default(),
            appearance: ContainerAppearance::default(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: WidgetsConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn appearance(mut self, appearance: ContainerAppearance) -> Self {
        self.appearance = appearance;
        self
    }
}

impl Component for Collection {
    type View = CollectionView;
}

/// Live view for [`Collection`].
#[derive(Debug)]
pub struct CollectionView {
    node: Node,
    list: Rc<RefCell<Option<VirtualList>>>,
    subscriptions: SubscriptionGroup,
    appearance: AppliedAppearance<ContainerAppearance>,
}

impl CollectionView {
    /// Scroll to `range`.
    pub fn set_visible_range(&self, range: Range<usize>) -> RowChanges {
        self.list
            .borrow_mut()
            .as_mut()
            .map(|list| list.set_visible_range(range))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn visible_rows(&self) -> Vec<usize> {
        self.list
            .borrow()
            .as_ref()
            .map(VirtualList::visible_rows)
            .unwrap_or_default()
    }

    /// Live view of row `index`, if it is visible.
    #[must_use]
    pub fn view_at(&self, index: usize) -> Option<Ref<'_, dyn AnyView>> {
        Ref::filter_map(self.list.borrow(), |list| list.as_ref()?.view_at(index)).ok()
    }

    /// The underlying list, for inspection.
    #[must_use]
    pub fn list(&self) -> Option<Ref<'_, VirtualList>> {
        Ref::filter_map(self.list.borrow(), Option::as_ref).ok()
    }
}

impl ReusableView for CollectionView {
    type Component = Collection;

    fn create() -> Self {
        Self {
            node: Node::new("Collection"),
            list: Rc::new(RefCell::new(None)),
            subscriptions: SubscriptionGroup::new(),
            appearance: AppliedAppearance::default(),
        }
    }

    fn configure(&mut self, collection: &Collection) {
        self.subscriptions.clear();
        self.appearance
            .apply(&self.node, &collection.appearance, ContainerAppearance::layout);
        {
            let mut slot = self.list.borrow_mut();
            match slot.as_mut() {
                Some(list) => list.set_config(&collection.config),
                None => *slot = Some(VirtualList::new(self.node.clone(), &collection.config)),
            }
        }
        let list = Rc::clone(&self.list);
        self.subscriptions.subscribe(&collection.items, move |items| {
            if let Some(list) = list.borrow_mut().as_mut() {
                list.reload(items.clone());
            }
        });
    }

    fn prepare_for_reuse(&mut self) {
        self.subscriptions.clear();
    }

    fn node(&self) -> &Node {
        &self.node
    }
}
