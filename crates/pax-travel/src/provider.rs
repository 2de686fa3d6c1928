//! The travel-time provider seam.

use pax_core::{CounterId, LaneId, RoomId};

/// Walking times between pipeline nodes, answered by an external geometry
/// engine (e.g. a floor-plan path-finder).
///
/// Every leg returns whole seconds.  `None` (or `Some(0)`, which callers
/// treat the same way) means "unknown" — the [`TravelModel`](crate::TravelModel)
/// then falls back to the legacy configured delay.  Service time at the
/// destination station must not be included.
///
/// The spawn legs have unknown defaults so minimal providers only need the
/// two inter-station legs.
pub trait TravelTimeProvider {
    /// Terminal entrance → ticket counter (in-person first leg).
    fn spawn_to_ticket_secs(&self, _counter: CounterId) -> Option<u32> {
        None
    }

    /// Terminal entrance → checkpoint lane (online first leg).
    fn spawn_to_checkpoint_secs(&self, _lane: LaneId) -> Option<u32> {
        None
    }

    /// Ticket counter → checkpoint lane.
    fn ticket_to_checkpoint_secs(&self, counter: CounterId, lane: LaneId) -> Option<u32>;

    /// Checkpoint lane → hold room.
    fn checkpoint_to_hold_secs(&self, lane: LaneId, room: RoomId) -> Option<u32>;

    /// Called when the engine's walk speed changes.  Providers that derive
    /// times from distances should re-scale; others ignore it.
    fn set_walk_speed_mps(&mut self, _mps: f64) {}
}
