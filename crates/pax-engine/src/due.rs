//! `DueQueue` — passengers due at a node at an exact absolute second.
//!
//! # Why this exists
//!
//! At any moment most passengers are mid-walk between nodes.  Scanning every
//! passenger every second to ask "have you arrived yet?" would cost O(N) per
//! tick regardless of how many actually arrive.  `DueQueue` inverts the
//! problem: when a walk is scheduled, the passenger registers the absolute
//! second at which they reach the next node; each tick drains only that
//! second's bucket — O(arrivals) work instead of O(N).
//!
//! `BTreeMap` keys keep buckets ordered by time (handy for inspection and
//! deterministic iteration); within a bucket, insertion order is preserved
//! and defines arrival processing order.

use std::collections::BTreeMap;

use pax_core::PassengerId;

/// A time-indexed queue mapping absolute seconds → passengers arriving then.
#[derive(Clone, Default)]
pub struct DueQueue {
    inner: BTreeMap<u32, Vec<PassengerId>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl DueQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `id` to arrive at `abs_sec`.
    pub fn push(&mut self, abs_sec: u32, id: PassengerId) {
        self.inner.entry(abs_sec).or_default().push(id);
        self.total += 1;
    }

    /// Remove and return everyone due at exactly `abs_sec`, in insertion
    /// order.  `None` if the bucket is empty (the common case — avoids an
    /// allocation).
    pub fn drain_second(&mut self, abs_sec: u32) -> Option<Vec<PassengerId>> {
        let ids = self.inner.remove(&abs_sec)?;
        self.total -= ids.len();
        Some(ids)
    }

    /// Keep only entries for which `keep` returns true, pruning emptied
    /// buckets.  `keep` may have side effects (lifecycle purges mark and
    /// unstamp as they filter).
    pub fn retain(&mut self, mut keep: impl FnMut(PassengerId) -> bool) {
        let mut removed = 0usize;
        self.inner.retain(|_, ids| {
            ids.retain(|&id| {
                let kept = keep(id);
                if !kept {
                    removed += 1;
                }
                kept
            });
            !ids.is_empty()
        });
        self.total -= removed;
    }

    /// The earliest second with at least one pending arrival.
    pub fn next_due(&self) -> Option<u32> {
        self.inner.keys().next().copied()
    }

    /// Total scheduled arrivals across all seconds.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Read-only view of the buckets, ordered by second.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[PassengerId])> {
        self.inner.iter().map(|(&sec, ids)| (sec, ids.as_slice()))
    }

    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }

    /// `true` if any bucket contains `id` (linear; inspection only).
    pub fn contains(&self, id: PassengerId) -> bool {
        self.inner.values().any(|ids| ids.contains(&id))
    }
}
