#![forbid(unsafe_code)]

//! Test harness for Weft view trees.
//!
//! - [`render_tree`] / [`assert_tree!`]: a stable text outline of a node tree.
//! - [`Probe`]: a descriptor whose live views record every lifecycle call
//!   into a shared [`LifecycleLog`]. `Probe<0>` and `Probe<1>` materialize
//!   into distinct view types, which is all the reconciler looks at.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use weft::widgets::{Component, Node, ReusableView};

// ---------------------------------------------------------------------------
// Tree outline
// ---------------------------------------------------------------------------

/// Outline of `node` and its descendants, one node per line, two spaces of
/// indent per level. Each line shows the kind, then any text, title or image
/// name, then `(disabled)` / `(hidden)` flags.
#[must_use]
pub fn render_tree(node: &Node) -> String {
    let mut out = String::new();
    render_into(node, 0, &mut out);
    out
}

fn render_into(node: &Node, depth: usize, out: &mut String) {
    let _ = write!(out, "{:indent$}{}", "", node.kind(), indent = depth * 2);
    if let Some(text) = node.text() {
        let _ = write!(out, " {text:?}");
    }
    if let Some(title) = node.title() {
        let _ = write!(out, " [{title}]");
    }
    if let Some(image) = node.image() {
        let _ = write!(out, " <{image}>");
    }
    if !node.is_enabled() {
        out.push_str(" (disabled)");
    }
    if node.is_hidden() {
        out.push_str(" (hidden)");
    }
    out.push('\n');
    for child in node.children() {
        render_into(&child, depth + 1, out);
    }
}

/// Assert that a node tree renders to the expected outline.
///
/// Leading and trailing blank lines of `expected` are ignored, and the
/// common indentation of its lines is stripped, so the outline can be
/// written inline as an indented raw string.
#[macro_export]
macro_rules! assert_tree {
    ($node:expr, $expected:expr $(,)?) => {{
        let actual = $crate::render_tree(&$node);
        let expected = $crate::dedent($expected);
        assert!(
            actual == expected,
            "tree mismatch\n--- expected ---\n{}--- actual ---\n{}",
            expected,
            actual
        );
    }};
}

/// Strip blank edge lines and common leading indentation; ends with `\n`.
#[must_use]
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .skip_while(|l| l.trim().is_empty())
        .collect();
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(0, |i| i + 1);
    let lines = &lines[..end];
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    let mut out = String::new();
    for line in lines {
        out.push_str(line.get(indent..).unwrap_or("").trim_end());
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Lifecycle recording
// ---------------------------------------------------------------------------

/// One lifecycle call on a probe view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    Created { view: u64, kind: u8 },
    Configured { view: u64, tag: usize },
    PreparedForReuse { view: u64 },
    WillDisplay { view: u64 },
    DidEndDisplay { view: u64 },
}

/// Shared, append-only record of lifecycle calls.
#[derive(Debug, Clone, Default)]
pub struct LifecycleLog(Rc<RefCell<Vec<Lifecycle>>>);

impl LifecycleLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Lifecycle) {
        tracing::trace!(?event, "probe lifecycle");
        self.0.borrow_mut().push(event);
    }

    #[must_use]
    pub fn events(&self) -> Vec<Lifecycle> {
        self.0.borrow().clone()
    }

    /// Drain and return the recorded events.
    pub fn take(&self) -> Vec<Lifecycle> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    /// Tags passed to `configure`, in call order.
    #[must_use]
    pub fn configured_tags(&self) -> Vec<usize> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Lifecycle::Configured { tag, .. } => Some(*tag),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn created(&self) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|e| matches!(e, Lifecycle::Created { .. }))
            .count()
    }
}

/// Recording descriptor. `KIND` selects the live-view type.
#[derive(Debug, Clone)]
pub struct Probe<const KIND: u8> {
    pub tag: usize,
    pub log: LifecycleLog,
}

impl<const KIND: u8> Probe<KIND> {
    #[must_use]
    pub fn new(tag: usize, log: &LifecycleLog) -> Self {
        Self {
            tag,
            log: log.clone(),
        }
    }
}

impl<const KIND: u8> Component for Probe<KIND> {
    type View = ProbeView<KIND>;
}

/// Live view for [`Probe`].
#[derive(Debug)]
pub struct ProbeView<const KIND: u8> {
    node: Node,
    log: Option<LifecycleLog>,
    tag: Option<usize>,
}

impl<const KIND: u8> ProbeView<KIND> {
    /// Tag of the descriptor this view was last configured with.
    #[must_use]
    pub fn tag(&self) -> Option<usize> {
        self.tag
    }

    fn record(&self, event: Lifecycle) {
        if let Some(log) = &self.log {
            log.push(event);
        }
    }
}

impl<const KIND: u8> ReusableView for ProbeView<KIND> {
    type Component = Probe<KIND>;

    fn create() -> Self {
        Self {
            node: Node::new("Probe"),
            log: None,
            tag: None,
        }
    }

    fn configure(&mut self, probe: &Probe<KIND>) {
        let view = self.node.id();
        if self.log.is_none() {
            probe.log.push(Lifecycle::Created { view, kind: KIND });
        }
        self.log = Some(probe.log.clone());
        self.tag = Some(probe.tag);
        self.node.set_text(Some(format!("{KIND}:{}", probe.tag)));
        self.record(Lifecycle::Configured {
            view,
            tag: probe.tag,
        });
    }

    fn prepare_for_reuse(&mut self) {
        self.record(Lifecycle::PreparedForReuse {
            view: self.node.id(),
        });
    }

    fn will_display(&mut self) {
        self.record(Lifecycle::WillDisplay {
            view: self.node.id(),
        });
    }

    fn did_end_display(&mut self) {
        self.record(Lifecycle::DidEndDisplay {
            view: self.node.id(),
        });
    }

    fn node(&self) -> &Node {
        &self.node
    }
}
