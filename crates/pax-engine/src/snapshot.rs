//! Interval-boundary snapshots and in-place restoration.
//!
//! A snapshot captures every piece of state `simulate_interval` mutates:
//! queue/staging/hold memberships (as id sequences — the arena itself is
//! shared across snapshots), pending maps, lane-target hints, serving slots
//! and service-end markers, fractional ticket debt, the stamp tables, the
//! just-closed list, and the queue-total series.  Snapshot `k` is the state
//! after `k` simulated intervals; index 0 is the empty pre-run state.
//!
//! Snapshots form an append-only log for one run.  A slot is overwritten in
//! place only when recomputation is forced by a full `run_all` reset.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use pax_core::{FlightId, PassengerId};

use crate::due::DueQueue;
use crate::engine::Engine;
use crate::lanes::{CheckpointLane, HoldRoom, TicketLane};
use crate::stamps::StampTable;

/// Deep copy of the kernel's mutable state at one interval boundary.
#[derive(Clone)]
pub(crate) struct EngineSnapshot {
    current_interval: u32,

    ticket_lanes: Vec<TicketLane>,
    checkpoint_lanes: Vec<CheckpointLane>,
    hold_rooms: Vec<HoldRoom>,

    pending_to_ticket: DueQueue,
    pending_to_checkpoint: DueQueue,
    pending_to_hold: DueQueue,

    target_ticket_lane: HashMap<PassengerId, usize>,
    target_checkpoint_lane: HashMap<PassengerId, usize>,

    stamps: StampTable,
    just_closed: Vec<FlightId>,

    held_ups_by_interval: BTreeMap<u32, u32>,
    ticket_queued_by_interval: BTreeMap<u32, u32>,
    checkpoint_queued_by_interval: BTreeMap<u32, u32>,
    hold_total_by_interval: BTreeMap<u32, u32>,
}

impl Engine {
    /// Snapshot the current state.
    pub(crate) fn make_snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            current_interval: self.current_interval,
            ticket_lanes: self.ticket_lanes.clone(),
            checkpoint_lanes: self.checkpoint_lanes.clone(),
            hold_rooms: self.hold_rooms.clone(),
            pending_to_ticket: self.pending_to_ticket.clone(),
            pending_to_checkpoint: self.pending_to_checkpoint.clone(),
            pending_to_hold: self.pending_to_hold.clone(),
            target_ticket_lane: self.target_ticket_lane.clone(),
            target_checkpoint_lane: self.target_checkpoint_lane.clone(),
            stamps: self.stamps.clone(),
            just_closed: self.just_closed.clone(),
            held_ups_by_interval: self.held_ups_by_interval.clone(),
            ticket_queued_by_interval: self.ticket_queued_by_interval.clone(),
            checkpoint_queued_by_interval: self.checkpoint_queued_by_interval.clone(),
            hold_total_by_interval: self.hold_total_by_interval.clone(),
        }
    }

    /// Reset the snapshot log to a single index-0 entry reflecting the
    /// current (empty) state.  Called once at build time and again on every
    /// `run_all` reset.
    pub(crate) fn capture_initial_snapshot(&mut self) {
        self.record_queue_totals();
        self.snapshots.clear();
        let s0 = self.make_snapshot();
        self.snapshots.push(s0);
        self.max_computed_interval = 0;
    }

    /// Append the post-interval snapshot, overwriting in place if this
    /// interval was recomputed after a `run_all` reset.
    pub(crate) fn append_snapshot(&mut self) {
        let snap = self.make_snapshot();
        let k = self.current_interval as usize;
        if k < self.snapshots.len() {
            self.snapshots[k] = snap;
        } else {
            self.snapshots.push(snap);
        }
        self.max_computed_interval = self.max_computed_interval.max(self.current_interval);
    }

    /// Restore snapshot `target` (clamped to the computed range) into the
    /// live containers, replacing contents rather than reallocating.
    pub(crate) fn restore_snapshot(&mut self, target: u32) {
        let t = target.min(self.max_computed_interval) as usize;
        let s = &self.snapshots[t];

        self.current_interval = s.current_interval;

        self.ticket_lanes.clone_from(&s.ticket_lanes);
        self.checkpoint_lanes.clone_from(&s.checkpoint_lanes);
        self.hold_rooms.clone_from(&s.hold_rooms);

        self.pending_to_ticket.clone_from(&s.pending_to_ticket);
        self.pending_to_checkpoint.clone_from(&s.pending_to_checkpoint);
        self.pending_to_hold.clone_from(&s.pending_to_hold);

        self.target_ticket_lane.clone_from(&s.target_ticket_lane);
        self.target_checkpoint_lane.clone_from(&s.target_checkpoint_lane);

        self.stamps.clone_from(&s.stamps);
        self.just_closed.clone_from(&s.just_closed);

        self.held_ups_by_interval.clone_from(&s.held_ups_by_interval);
        self.ticket_queued_by_interval.clone_from(&s.ticket_queued_by_interval);
        self.checkpoint_queued_by_interval.clone_from(&s.checkpoint_queued_by_interval);
        self.hold_total_by_interval.clone_from(&s.hold_total_by_interval);

        debug!(interval = self.current_interval, "snapshot restored");
    }
}
