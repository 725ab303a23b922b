#![forbid(unsafe_code)]

//! Sectioned virtualized table.
//!
//! Rows of all sections are flattened into one [`VirtualList`]; an
//! [`IndexPath`] addresses a row by section and position within it.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use weft_runtime::{Binding, SubscriptionGroup};
use weft_style::ContainerAppearance;

use super::{RowChanges, VirtualList};
use crate::config::WidgetsConfig;
use crate::node::Node;
use crate::view::{AnyView, AppliedAppearance, Component, Element, ReusableView};

/// Position of a row within a sectioned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexPath {
    pub section: usize,
    pub row: usize,
}

impl IndexPath {
    #[must_use]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

/// One table section: an optional header title and its rows.
#[derive(Clone, Debug, Default)]
pub struct Section {
    pub header: Option<String>,
    pub rows: Vec<Element>,
}

impl Section {
    pub fn new(rows: Vec<Element>) -> Self {
        Self { header: None, rows }
    }

    #[must_use]
    pub fn header(mut self, title: impl Into<String>) -> Self {
        self.header = Some(title.into());
        self
    }
}

/// Row counts per section, for translating between flat indices and
/// index paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SectionMap {
    headers: Vec<Option<String>>,
    counts: Vec<usize>,
}

impl SectionMap {
    fn of(sections: &[Section]) -> Self {
        Self {
            headers: sections.iter().map(|s| s.header.clone()).collect(),
            counts: sections.iter().map(|s| s.rows.len()).collect(),
        }
    }

    fn flat_index(&self, path: IndexPath) -> Option<usize> {
        let count = *self.counts.get(path.section)?;
        (path.row < count).then(|| self.counts[..path.section].iter().sum::<usize>() + path.row)
    }

    fn index_path(&self, mut flat: usize) -> Option<IndexPath> {
        for (section, count) in self.counts.iter().enumerate() {
            if flat < *count {
                return Some(IndexPath::new(section, flat));
            }
            flat -= count;
        }
        None
    }
}

/// A sectioned table descriptor.
#[derive(Clone, Debug)]
pub struct Table {
    pub sections: Binding<Vec<Section>>,
    pub config: WidgetsConfig,
    pub appearance: ContainerAppearance,
}

impl Table {
    pub fn new(sections: &Binding<Vec<Section>>) -> Self {
        Self {
            sections: sections.clone(),
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

impl Component for Table {
    type View = TableView;
}

#[derive(Debug, Default)]
struct TableState {
    list: Option<VirtualList>,
    sections: SectionMap,
}

/// Live view for [`Table`].
#[derive(Debug)]
pub struct TableView {
    node: Node,
    state: Rc<RefCell<TableState>>,
    subscriptions: SubscriptionGroup,
    appearance: AppliedAppearance<ContainerAppearance>,
}

impl TableView {
    #[must_use]
    pub fn number_of_sections(&self) -> usize {
        self.state.borrow().sections.counts.len()
    }

    #[must_use]
    pub fn number_of_rows(&self, section: usize) -> usize {
        self.state
            .borrow()
            .sections
            .counts
            .get(section)
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn header(&self, section: usize) -> Option<String> {
        self.state.borrow().sections.headers.get(section).cloned().flatten()
    }

    /// Scroll to a range of flattened row indices.
    pub fn set_visible_range(&self, range: Range<usize>) -> RowChanges {
        self.state
            .borrow_mut()
            .list
            .as_mut()
            .map(|list| list.set_visible_range(range))
            .unwrap_or_default()
    }

    /// Index paths of the rows that currently have a live view.
    #[must_use]
    pub fn visible_index_paths(&self) -> Vec<IndexPath> {
        let state = self.state.borrow();
        state
            .list
            .as_ref()
            .map(VirtualList::visible_rows)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|flat| state.sections.index_path(flat))
            .collect()
    }

    #[must_use]
    pub fn flat_index(&self, path: IndexPath) -> Option<usize> {
        self.state.borrow().sections.flat_index(path)
    }

    #[must_use]
    pub fn index_path(&self, flat: usize) -> Option<IndexPath> {
        self.state.borrow().sections.index_path(flat)
    }

    /// Live view at `path`, if the row is visible.
    #[must_use]
    pub fn view_at(&self, path: IndexPath) -> Option<Ref<'_, dyn AnyView>> {
        Ref::filter_map(self.state.borrow(), |state| {
            let flat = state.sections.flat_index(path)?;
            state.list.as_ref()?.view_at(flat)
        })
        .ok()
    }
}

impl ReusableView for TableView {
    type Component = Table;

    fn create() -> Self {
        Self {
            node: Node::new("Table"),
            state: Rc::default(),
            subscriptions: SubscriptionGroup::new(),
            appearance: AppliedAppearance::default(),
        }
    }

    fn configure(&mut self, table: &Table) {
        self.subscriptions.clear();
        self.appearance
            .apply(&self.node, &table.appearance, ContainerAppearance::layout);
        {
            let mut state = self.state.borrow_mut();
            match state.list.as_mut() {
                Some(list) => list.set_config(&table.config),
                None => state.list = Some(VirtualList::new(self.node.clone(), &table.config)),
            }
        }
        let state = Rc::clone(&self.state);
        self.subscriptions.subscribe(&table.sections, move |sections| {
            let mut state = state.borrow_mut();
            state.sections = SectionMap::of(sections);
            let flat: Vec<Element> = sections
                .iter()
                .flat_map(|s| s.rows.iter().cloned())
                .collect();
            if let Some(list) = state.list.as_mut() {
                list.reload(flat);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Button, ButtonView, Text, TextView};

    fn sample() -> Vec<Section> {
        vec![
            Section::new(vec![Text::new("a0").into(), Text::new("a1").into()]).header("A"),
            Section::new(Vec::new()),
            Section::new(vec![Button::new("c0").into()]),
        ]
    }

    #[test]
    fn index_paths_skip_empty_sections() {
        let map = SectionMap::of(&sample());
        assert_eq!(map.index_path(0), Some(IndexPath::new(0, 0)));
        assert_eq!(map.index_path(2), Some(IndexPath::new(2, 0)));
        assert_eq!(map.index_path(3), None);
        assert_eq!(map.flat_index(IndexPath::new(2, 0)), Some(2));
        assert_eq!(map.flat_index(IndexPath::new(1, 0)), None);
        assert_eq!(map.flat_index(IndexPath::new(9, 0)), None);
    }

    #[test]
    fn table_exposes_rows_by_index_path() {
        let sections = Binding::new(sample());
        let view = Table::new(&sections).materialize();

        assert_eq!(view.number_of_sections(), 3);
        assert_eq!(view.number_of_rows(0), 2);
        assert_eq!(view.header(0).as_deref(), Some("A"));
        assert_eq!(view.header(1), None);
        assert_eq!(
            view.visible_index_paths(),
            vec![IndexPath::new(0, 0), IndexPath::new(0, 1), IndexPath::new(2, 0)]
        );

        let cell = view.view_at(IndexPath::new(2, 0)).unwrap();
        assert!(cell.is::<ButtonView>());
        drop(cell);
        let cell = view.view_at(IndexPath::new(0, 1)).unwrap();
        let text = cell.downcast_ref::<TextView>().and_then(TextView::text);
        assert_eq!(text.as_deref(), Some("a1"));
    }

    #[test]
    fn section_change_reloads_rows() {
        let sections = Binding::new(sample());
        let view = Table::new(&sections).materialize();
        sections.update(|s| s[1].rows.push(Text::new("b0").into()));

        assert_eq!(view.flat_index(IndexPath::new(1, 0)), Some(2));
        assert_eq!(view.index_path(3), Some(IndexPath::new(2, 0)));
        assert!(view.view_at(IndexPath::new(1, 0)).unwrap().is::<TextView>());
        assert!(view.view_at(IndexPath::new(2, 0)).unwrap().is::<ButtonView>());
        assert_eq!(view.node().child_count(), 4);
    }

    #[test]
    fn index_path_display() {
        assert_eq!(IndexPath::new(1, 4).to_string(), "[1, 4]");
    }
}
