//! Per-lane service state for the three station kinds.
//!
//! Every lane keeps its **waiting** FIFO and a parallel **staging** FIFO of
//! passengers who finished service here but have not yet arrived at the next
//! node (renderers draw staging as the "walking away" line).  Queues store
//! `PassengerId`s only; the arena owns the records.

use std::collections::VecDeque;

use pax_core::PassengerId;
use pax_model::PassengerArena;

// ── TicketLane ────────────────────────────────────────────────────────────────

/// One ticket counter's live state.
///
/// Ticketing is rate-accrual service: the lane banks `rate/60` of a service
/// per second while non-empty and completes one passenger per whole unit of
/// `debt`.  An idle lane banks nothing — `debt` resets to zero whenever the
/// queue empties.
#[derive(Clone, Default)]
pub struct TicketLane {
    /// Waiting passengers, arrival order.
    pub queue: VecDeque<PassengerId>,
    /// Ticketed passengers still walking to a checkpoint.
    pub staging: VecDeque<PassengerId>,
    /// Fractional service carry in `[0, 1)`, persisted across intervals.
    pub debt: f64,
    /// Most recent passenger served *this interval* (transient; cleared in
    /// the interval prelude, kept in snapshots for renderers).
    pub serving: Option<PassengerId>,
}

// ── CheckpointLane ────────────────────────────────────────────────────────────

/// One checkpoint lane's live state.
///
/// Screening is fixed-duration service: one passenger at a time, completing
/// at a precomputed absolute second.  Both fields persist across interval
/// boundaries so an in-flight service finishes exactly when scheduled.
#[derive(Clone, Default)]
pub struct CheckpointLane {
    /// Waiting passengers, arrival order.
    pub queue: VecDeque<PassengerId>,
    /// Screened passengers still walking to their hold room.
    pub staging: VecDeque<PassengerId>,
    /// Passenger currently in the scanner.
    pub serving: Option<PassengerId>,
    /// Absolute second at which the current service completes; 0 = idle.
    pub service_end_abs: u32,
}

impl CheckpointLane {
    /// Waiting passengers not marked missed (the router's queue measure).
    pub fn live_queue_len(&self, arena: &PassengerArena) -> usize {
        self.queue.iter().filter(|&&id| !arena.is_missed(id)).count()
    }
}

// ── HoldRoom ──────────────────────────────────────────────────────────────────

/// One hold room's occupants in admission order.
#[derive(Clone, Default)]
pub struct HoldRoom {
    pub occupants: VecDeque<PassengerId>,
}

// ── Queue helpers ─────────────────────────────────────────────────────────────

/// Pop the first passenger in `queue` that is not marked missed, leaving
/// missed entries in place (they are swept out at interval end).
pub fn take_first_not_missed(
    queue: &mut VecDeque<PassengerId>,
    arena: &PassengerArena,
) -> Option<PassengerId> {
    let pos = queue.iter().position(|&id| !arena.is_missed(id))?;
    queue.remove(pos)
}

/// Remove the first occurrence of `id` from `queue`, if present.
pub fn remove_identity(queue: &mut VecDeque<PassengerId>, id: PassengerId) -> bool {
    if let Some(pos) = queue.iter().position(|&q| q == id) {
        queue.remove(pos);
        true
    } else {
        false
    }
}
