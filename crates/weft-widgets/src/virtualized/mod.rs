#![forbid(unsafe_code)]

//! Virtualized lists: only rows inside the visible range have live views.
//!
//! [`VirtualList`] owns the element list, the visible range and one live
//! view per visible row. Rows that scroll out are told `did_end_display`,
//! detached, and parked in a [`ReusePool`] under their reuse identifier.
//! Rows that scroll in take a parked view with the element's identifier
//! (`prepare_for_reuse` + `configure`) or materialize a new one, then get
//! `will_display`.
//!
//! On [`VirtualList::reload`], visible rows whose view type still matches
//! the new element are reconfigured in place; mismatching rows go through
//! the pool.
//!
//! # Invariants
//!
//! 1. Live rows are exactly the visible range clamped to the item count.
//! 2. The parent node's children are the live rows' nodes, in row order.
//! 3. A view is configured only with an element of its own view type.

mod collection;
mod pool;
mod table;

pub use collection::{Collection, CollectionView};
pub use pool::ReusePool;
pub use table::{IndexPath, Section, Table, TableView};

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use crate::config::WidgetsConfig;
use crate::node::Node;
use crate::view::{AnyView, Element};

/// What a reload or scroll did to the live rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowChanges {
    /// Rows reconfigured in place.
    pub reconfigured: usize,
    /// Rows filled from the reuse pool.
    pub dequeued: usize,
    /// Rows filled with a freshly materialized view.
    pub created: usize,
    /// Rows that left and were handed to the pool.
    pub recycled: usize,
}

/// Row virtualization over a flat element list.
pub struct VirtualList {
    parent: Node,
    items: Vec<Element>,
    visible: Range<usize>,
    rows: BTreeMap<usize, Box<dyn AnyView>>,
    pool: ReusePool,
    log_reload: bool,
}

impl VirtualList {
    /// Empty list whose row nodes are attached to `parent`.
    #[must_use]
    pub fn new(parent: Node, config: &WidgetsConfig) -> Self {
        Self {
            parent,
            items: Vec::new(),
            visible: config.sanitized_initial_visible(),
            rows: BTreeMap::new(),
            pool: ReusePool::new(config.max_pooled_per_identifier),
            log_reload: config.log_reconcile,
        }
    }

    /// Apply a changed configuration. The visible range is left alone.
    pub fn set_config(&mut self, config: &WidgetsConfig) {
        self.pool.set_max_per_identifier(config.max_pooled_per_identifier);
        self.log_reload = config.log_reconcile;
    }

    /// Replace the element list.
    pub fn reload(&mut self, items: Vec<Element>) -> RowChanges {
        let _span = tracing::debug_span!(
            "virtual_list.reload",
            parent = self.parent.id(),
            items = items.len()
        )
        .entered();
        self.items = items;
        let changes = self.sync(true);
        if self.log_reload {
            tracing::debug!(
                reconfigured = changes.reconfigured,
                dequeued = changes.dequeued,
                created = changes.created,
                recycled = changes.recycled,
                pooled = self.pool.len(),
                "virtual list reloaded"
            );
        }
        changes
    }

    /// Scroll: make `range` the visible range. Rows that stay visible are
    /// not touched.
    pub fn set_visible_range(&mut self, range: Range<usize>) -> RowChanges {
        let Range { start, end } = range;
        self.visible = start..end.max(start);
        self.sync(false)
    }

    /// Requested visible range (may extend past the item count).
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        self.visible.clone()
    }

    /// Indices of rows that currently have a live view, ascending.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<usize> {
        self.rows.keys().copied().collect()
    }

    #[must_use]
    pub fn view_at(&self, index: usize) -> Option<&dyn AnyView> {
        self.rows.get(&index).map(|v| &**v)
    }

    pub fn view_at_mut(&mut self, index: usize) -> Option<&mut dyn AnyView> {
        self.rows.get_mut(&index).map(|v| &mut **v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn pool(&self) -> &ReusePool {
        &self.pool
    }

    fn target(&self) -> Range<usize> {
        let len = self.items.len();
        self.visible.start.min(len)..self.visible.end.min(len)
    }

    fn sync(&mut self, reconfigure: bool) -> RowChanges {
        let target = self.target();
        let mut changes = RowChanges::default();

        let leaving: Vec<usize> = self
            .rows
            .keys()
            .copied()
            .filter(|index| !target.contains(index))
            .collect();
        for index in leaving {
            if let Some(view) = self.rows.remove(&index) {
                self.recycle(view);
                changes.recycled += 1;
            }
        }

        for index in target {
            let element = self.items[index].clone();
            match self.rows.remove(&index) {
                Some(mut view) if view.view_type() == element.view_type() => {
                    if reconfigure {
                        view.prepare_for_reuse();
                        element.configure(&mut *view);
                        changes.reconfigured += 1;
                    }
                    self.rows.insert(index, view);
                }
                stale => {
                    if let Some(view) = stale {
                        self.recycle(view);
                        changes.recycled += 1;
                    }
                    self.fill(index, &element, &mut changes);
                }
            }
        }
        changes
    }

    fn recycle(&mut self, mut view: Box<dyn AnyView>) {
        view.did_end_display();
        view.node().remove_from_parent();
        self.pool.enqueue(view);
    }

    fn fill(&mut self, index: usize, element: &Element, changes: &mut RowChanges) {
        let pooled = self
            .pool
            .dequeue(element.reuse_identifier())
            .and_then(|mut view| {
                view.prepare_for_reuse();
                // Identifiers can be shared across view types; only reuse a
                // view the element can actually configure.
                element.configure(&mut *view).then_some(view)
            });
        let mut view = match pooled {
            Some(view) => {
                changes.dequeued += 1;
                view
            }
            None => {
                changes.created += 1;
                element.materialize()
            }
        };
        view.will_display();
        let position = self.rows.range(..index).count();
        self.parent.insert_child(position, view.node());
        self.rows.insert(index, view);
    }
}

impl fmt::Debug for VirtualList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualList")
            .field("items", &self.items.len())
            .field("visible", &self.visible)
            .field("rows", &self.visible_rows())
            .field("pool", &self.pool)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ReusableView;
    use crate::{Image, ImageView, Text, TextView};
    use proptest::prelude::*;
    use tracing_test::traced_test;
    use weft_runtime::Binding;

    fn texts(labels: impl IntoIterator<Item = usize>) -> Vec<Element> {
        labels
            .into_iter()
            .map(|i| Text::new(format!("row {i}")).into())
            .collect()
    }

    fn mounted(visible: Range<usize>) -> (Node, VirtualList) {
        let parent = Node::new("Collection");
        let config = WidgetsConfig::default().initial_visible(visible);
        let list = VirtualList::new(parent.clone(), &config);
        (parent, list)
    }

    fn text_at(list: &VirtualList, index: usize) -> Option<String> {
        list.view_at(index)?
            .downcast_ref::<TextView>()
            .and_then(TextView::text)
    }

    #[test]
    fn only_visible_rows_materialize() {
        let (parent, mut list) = mounted(0..3);
        let changes = list.reload(texts(0..100));
        assert_eq!(changes.created, 3);
        assert_eq!(list.visible_rows(), vec![0, 1, 2]);
        assert_eq!(parent.child_count(), 3);
        assert_eq!(text_at(&list, 2).as_deref(), Some("row 2"));
    }

    #[test]
    fn scrolling_recycles_through_pool() {
        let (parent, mut list) = mounted(0..3);
        list.reload(texts(0..100));
        let first_ids: Vec<u64> = parent.children().iter().map(Node::id).collect();

        let changes = list.set_visible_range(3..6);
        assert_eq!(changes.recycled, 3);
        assert_eq!(changes.dequeued, 3);
        assert_eq!(changes.created, 0);
        assert_eq!(list.visible_rows(), vec![3, 4, 5]);
        assert_eq!(text_at(&list, 4).as_deref(), Some("row 4"));

        let mut now: Vec<u64> = parent.children().iter().map(Node::id).collect();
        let mut before = first_ids;
        now.sort_unstable();
        before.sort_unstable();
        assert_eq!(now, before, "same views, new rows");
    }

    #[test]
    fn overlapping_scroll_leaves_shared_rows_alone() {
        let (parent, mut list) = mounted(0..3);
        list.reload(texts(0..10));
        let kept = list.view_at(2).unwrap().node().clone();
        kept.clear_writes();

        let changes = list.set_visible_range(2..5);
        assert_eq!(changes.recycled, 2);
        assert!(kept.writes().is_empty());
        let order: Vec<u64> = parent.children().iter().map(Node::id).collect();
        assert_eq!(order[0], kept.id());
    }

    #[test]
    fn reload_reconfigures_matching_rows_in_place() {
        let (_, mut list) = mounted(0..2);
        list.reload(texts(0..2));
        let id = list.view_at(0).unwrap().node().id();

        let changes = list.reload(texts(10..12));
        assert_eq!(changes.reconfigured, 2);
        assert_eq!(list.view_at(0).unwrap().node().id(), id);
        assert_eq!(text_at(&list, 0).as_deref(), Some("row 10"));
    }

    #[test]
    fn reload_swaps_mismatched_rows() {
        let (parent, mut list) = mounted(0..2);
        list.reload(texts(0..2));
        let changes = list.reload(vec![Text::new("a").into(), Image::named("b").into()]);
        assert_eq!(changes.reconfigured, 1);
        assert_eq!(changes.recycled, 1);
        assert_eq!(changes.created, 1);
        assert!(list.view_at(1).unwrap().is::<ImageView>());
        assert_eq!(list.pool().len_for(TextView::reuse_identifier()), 1);
        assert_eq!(parent.child_count(), 2);
    }

    #[test]
    fn shrinking_items_drops_rows_past_end() {
        let (parent, mut list) = mounted(0..5);
        list.reload(texts(0..5));
        list.reload(texts(0..2));
        assert_eq!(list.visible_rows(), vec![0, 1]);
        assert_eq!(parent.child_count(), 2);
        assert_eq!(list.pool().len(), 3);
    }

    #[test]
    fn pooled_image_catches_up_on_display() {
        let (_, mut list) = mounted(0..1);
        let name = Binding::new(Some("first".to_string()));
        list.reload(vec![Image::bound(&name).into(), Image::named("second").into()]);
        list.set_visible_range(1..2);
        name.set(Some("changed".into()));
        list.set_visible_range(0..1);

        let view = list.view_at(0).unwrap().downcast_ref::<ImageView>().unwrap();
        assert!(view.is_displaying());
        assert_eq!(view.node().image().as_deref(), Some("changed"));
    }

    #[traced_test]
    #[test]
    fn reload_is_logged() {
        let (_, mut list) = mounted(0..2);
        list.reload(texts(0..4));
        assert!(logs_contain("virtual list reloaded"));
    }

    proptest! {
        #[test]
        fn live_rows_track_clamped_range(
            len in 0usize..30,
            start in 0usize..40,
            width in 0usize..12,
        ) {
            let (parent, mut list) = mounted(0..5);
            list.reload(texts(0..len));
            list.set_visible_range(start..start + width);

            let expected: Vec<usize> = (start.min(len)..(start + width).min(len)).collect();
            prop_assert_eq!(list.visible_rows(), expected.clone());
            let children: Vec<u64> = parent.children().iter().map(Node::id).collect();
            let rows: Vec<u64> = expected
                .iter()
                .map(|i| list.view_at(*i).unwrap().node().id())
                .collect();
            prop_assert_eq!(children, rows);
            for i in expected {
                let label = format!("row {i}");
                prop_assert_eq!(text_at(&list, i), Some(label));
            }
        }
    }
}
