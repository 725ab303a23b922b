#![forbid(unsafe_code)]

//! Off-screen views waiting to be reused, bucketed by reuse identifier.

use std::fmt;

use ahash::AHashMap;

use crate::view::AnyView;

/// Bounded per-identifier pool of detached views.
pub struct ReusePool {
    max_per_identifier: usize,
    buckets: AHashMap<&'static str, Vec<Box<dyn AnyView>>>,
}

impl ReusePool {
    #[must_use]
    pub fn new(max_per_identifier: usize) -> Self {
        Self {
            max_per_identifier,
            buckets: AHashMap::new(),
        }
    }

    /// Park `view` for later reuse. Returns `false` (and drops the view)
    /// when its bucket is full.
    pub fn enqueue(&mut self, view: Box<dyn AnyView>) -> bool {
        let identifier = view.reuse_identifier();
        let bucket = self.buckets.entry(identifier).or_default();
        if bucket.len() >= self.max_per_identifier {
            tracing::trace!(identifier, "reuse pool full, dropping view");
            return false;
        }
        bucket.push(view);
        true
    }

    /// Take a parked view registered under `identifier`, most recent first.
    pub fn dequeue(&mut self, identifier: &str) -> Option<Box<dyn AnyView>> {
        let view = self.buckets.get_mut(identifier)?.pop();
        tracing::trace!(identifier, hit = view.is_some(), "reuse pool lookup");
        view
    }

    /// Views parked under `identifier`.
    #[must_use]
    pub fn len_for(&self, identifier: &str) -> usize {
        self.buckets.get(identifier).map_or(0, Vec::len)
    }

    /// Views parked in total.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Change the per-identifier bound, dropping surplus views.
    pub fn set_max_per_identifier(&mut self, max: usize) {
        self.max_per_identifier = max;
        for bucket in self.buckets.values_mut() {
            bucket.truncate(max);
        }
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

impl fmt::Debug for ReusePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReusePool")
            .field("max_per_identifier", &self.max_per_identifier)
            .field("pooled", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{erase, Component, ReusableView};
    use crate::{Spacer, Text, TextView};

    fn text_view() -> Box<dyn AnyView> {
        erase(Text::new("row").materialize())
    }

    #[test]
    fn dequeue_matches_identifier() {
        let mut pool = ReusePool::new(4);
        pool.enqueue(text_view());
        pool.enqueue(erase(Spacer::new().materialize()));

        assert!(pool.dequeue("nope").is_none());
        let view = pool.dequeue(TextView::reuse_identifier()).unwrap();
        assert!(view.is::<TextView>());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn bucket_is_bounded() {
        let mut pool = ReusePool::new(2);
        assert!(pool.enqueue(text_view()));
        assert!(pool.enqueue(text_view()));
        assert!(!pool.enqueue(text_view()));
        assert_eq!(pool.len_for(TextView::reuse_identifier()), 2);

        pool.set_max_per_identifier(1);
        assert_eq!(pool.len(), 1);
        pool.clear();
        assert!(pool.is_empty());
    }
}
