#![forbid(unsafe_code)]

//! Virtualized collections and tables recycling row views.

use weft::prelude::*;
use weft::widgets::RowChanges;
use weft_harness::{Lifecycle, LifecycleLog, Probe, ProbeView};

fn probes(log: &LifecycleLog, tags: std::ops::Range<usize>) -> Vec<Element> {
    tags.map(|tag| {
        if tag % 2 == 0 {
            Probe::<0>::new(tag, log).into()
        } else {
            Probe::<1>::new(tag, log).into()
        }
    })
    .collect()
}

fn visible_tags(view: &CollectionView) -> Vec<Option<usize>> {
    view.visible_rows()
        .into_iter()
        .map(|row| {
            let cell = view.view_at(row)?;
            cell.downcast_ref::<ProbeView<0>>()
                .and_then(ProbeView::tag)
                .or_else(|| cell.downcast_ref::<ProbeView<1>>().and_then(ProbeView::tag))
        })
        .collect()
}

#[test]
fn scrolled_out_rows_are_reused_by_identifier() {
    let log = LifecycleLog::new();
    let items = Binding::new(probes(&log, 0..100));
    let config = WidgetsConfig::default().initial_visible(0..4);
    let view = Collection::new(&items).config(config).materialize();
    assert_eq!(log.created(), 4);

    let changes = view.set_visible_range(4..8);
    assert_eq!(
        changes,
        RowChanges {
            reconfigured: 0,
            dequeued: 4,
            created: 0,
            recycled: 4,
        }
    );
    assert_eq!(log.created(), 4, "every row came from the pool");
    assert_eq!(
        visible_tags(&view),
        vec![Some(4), Some(5), Some(6), Some(7)]
    );
}

#[test]
fn display_callbacks_bracket_reuse() {
    let log = LifecycleLog::new();
    let items = Binding::new(probes(&log, 0..10));
    let config = WidgetsConfig::default().initial_visible(0..1);
    let view = Collection::new(&items).config(config).materialize();
    let id = view.view_at(0).unwrap().node().id();
    log.take();

    // Row 2 has the same view type as row 0.
    view.set_visible_range(2..3);

    assert_eq!(
        log.events(),
        vec![
            Lifecycle::DidEndDisplay { view: id },
            Lifecycle::PreparedForReuse { view: id },
            Lifecycle::Configured { view: id, tag: 2 },
            Lifecycle::WillDisplay { view: id },
        ]
    );
}

#[test]
fn pool_never_serves_another_identifier() {
    let log = LifecycleLog::new();
    let items = Binding::new(probes(&log, 0..10));
    let config = WidgetsConfig::default().initial_visible(0..1);
    let view = Collection::new(&items).config(config).materialize();

    // Row 1 needs a Probe<1> view; the pooled Probe<0> view must stay parked.
    let changes = view.set_visible_range(1..2);
    assert_eq!(changes.created, 1);
    assert_eq!(changes.dequeued, 0);
    assert_eq!(view.list().unwrap().pool().len(), 1);
}

#[test]
fn pool_size_is_capped() {
    let log = LifecycleLog::new();
    let items = Binding::new(probes(&log, 0..40));
    let config = WidgetsConfig::default()
        .initial_visible(0..20)
        .max_pooled_per_identifier(3);
    let view = Collection::new(&items).config(config).materialize();

    items.set(Vec::new());
    let list = view.list().unwrap();
    assert_eq!(list.pool().len_for(ProbeView::<0>::reuse_identifier()), 3);
    assert_eq!(list.pool().len_for(ProbeView::<1>::reuse_identifier()), 3);
    assert!(list.visible_rows().is_empty());
}

#[test]
fn data_change_reconfigures_visible_rows_in_place() {
    let log = LifecycleLog::new();
    let items = Binding::new(probes(&log, 0..6));
    let config = WidgetsConfig::default().initial_visible(0..3);
    let view = Collection::new(&items).config(config).materialize();
    let before: Vec<u64> = view.node().children().iter().map(Node::id).collect();

    items.set(probes(&log, 10..16));

    let after: Vec<u64> = view.node().children().iter().map(Node::id).collect();
    assert_eq!(after, before);
    assert_eq!(visible_tags(&view), vec![Some(10), Some(11), Some(12)]);
}

#[test]
fn table_rows_recycle_across_sections() {
    let log = LifecycleLog::new();
    let sections = Binding::new(vec![
        Section::new(probes(&log, 0..3)).header("first"),
        Section::new(probes(&log, 3..6)).header("second"),
    ]);
    let config = WidgetsConfig::default().initial_visible(0..2);
    let table = Table::new(&sections).config(config).materialize();
    assert_eq!(
        table.visible_index_paths(),
        vec![IndexPath::new(0, 0), IndexPath::new(0, 1)]
    );

    table.set_visible_range(4..6);
    assert_eq!(
        table.visible_index_paths(),
        vec![IndexPath::new(1, 1), IndexPath::new(1, 2)]
    );
    assert_eq!(log.created(), 2);
    let cell = table.view_at(IndexPath::new(1, 1)).unwrap();
    assert_eq!(
        cell.downcast_ref::<ProbeView<0>>().and_then(ProbeView::tag),
        Some(4)
    );
}
