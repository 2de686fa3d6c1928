//! Immutable per-interval history.
//!
//! One [`IntervalRecord`] is appended per *first computation* of an interval:
//! deep copies of every queue/staging/hold membership at interval end plus
//! the per-flight event counters accumulated during the interval.  The log is
//! append-only — `go_to_interval` does not rewind it — and is cleared only by
//! a full `run_all`.  Records capture state *before* the end-of-interval
//! purge, so passengers marked missed during the interval are still visible
//! in the record where they were last present.

use std::collections::BTreeMap;

use pax_core::{FlightId, PassengerId};

// ── FlightCounts ──────────────────────────────────────────────────────────────

/// Per-flight integer event counters for one interval.
///
/// Backed by a `BTreeMap` so iteration order is the roster order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlightCounts(BTreeMap<FlightId, u32>);

impl FlightCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to one flight's counter.  Zero deltas are not recorded.
    pub fn inc(&mut self, flight: FlightId, delta: u32) {
        if delta != 0 {
            *self.0.entry(flight).or_insert(0) += delta;
        }
    }

    pub fn get(&self, flight: FlightId) -> u32 {
        self.0.get(&flight).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FlightId, u32)> + '_ {
        self.0.iter().map(|(&f, &n)| (f, n))
    }

    /// Sum across all flights.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

// ── IntervalRecord ────────────────────────────────────────────────────────────

/// Everything recorded for one simulated interval.
#[derive(Clone, Default)]
pub struct IntervalRecord {
    // Per-flight event counters accumulated during the interval.
    pub arrivals: FlightCounts,
    pub enqueued_ticket: FlightCounts,
    pub ticketed: FlightCounts,
    pub arrived_checkpoint: FlightCounts,
    pub passed_checkpoint: FlightCounts,

    // Deep-copied memberships at interval end (pre-purge).
    pub queued_ticket: Vec<Vec<PassengerId>>,
    pub served_ticket: Vec<Vec<PassengerId>>,
    pub queued_checkpoint: Vec<Vec<PassengerId>>,
    pub served_checkpoint: Vec<Vec<PassengerId>>,
    pub hold_rooms: Vec<Vec<PassengerId>>,

    // Checkpoint arrivals this interval, split by channel, per lane.
    pub online_arrivals: Vec<Vec<PassengerId>>,
    pub from_ticket_arrivals: Vec<Vec<PassengerId>>,

    // Waiting-line totals at interval end (pre-purge).
    pub ticket_queue_len: u32,
    pub checkpoint_queue_len: u32,
}

// ── History ───────────────────────────────────────────────────────────────────

/// The append-only interval log.
#[derive(Default)]
pub struct History {
    records: Vec<IntervalRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: IntervalRecord) {
        self.records.push(record);
    }

    /// The record for interval `k`, if it has been computed.
    pub fn get(&self, k: u32) -> Option<&IntervalRecord> {
        self.records.get(k as usize)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IntervalRecord> {
        self.records.iter()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Ticket waiting-line size series, one entry per computed interval.
    pub fn ticket_queue_series(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.ticket_queue_len).collect()
    }

    /// Checkpoint waiting-line size series.
    pub fn checkpoint_queue_series(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.checkpoint_queue_len).collect()
    }
}
