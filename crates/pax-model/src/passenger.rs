//! Passenger records and the append-only arena that owns them.
//!
//! # Why an arena?
//!
//! The rewind contract requires historical snapshots to stay readable after
//! passengers leave the live queues — including passengers purged when their
//! flight closed.  Storing passengers once, in an append-only `Vec`, and
//! passing `PassengerId` everywhere makes snapshot deep-copies cheap (they
//! copy id sequences, never passenger data) and keeps identity stable for the
//! lifetime of the run.
//!
//! Mutable per-passenger facts (the missed flag, assigned hold room, hold
//! sequence) live here and are therefore *shared* across snapshots: rewinding
//! does not un-miss a passenger.  The snapshot store's restore path never
//! re-simulates already-computed intervals, so this sharing is unobservable
//! through the control API.

use pax_core::{FlightId, PassengerId, RoomId};

// ── Passenger ─────────────────────────────────────────────────────────────────

/// One passenger, owned by the arena from creation to end of run.
///
/// Absolute-second progress stamps do **not** live here — the engine owns
/// them in stamp tables keyed by `PassengerId`, which are snapshotted and
/// cleared independently of the record.
#[derive(Clone, Debug)]
pub struct Passenger {
    /// The flight this passenger is booked on.
    pub flight: FlightId,
    /// Minute since horizon start at which the passenger spawned.
    pub spawn_minute: u32,
    /// `true` = bought in person (routes via a ticket counter);
    /// `false` = bought online (routes straight to a checkpoint).
    pub in_person: bool,
    /// Set when boarding closed before the passenger reached the hold room.
    pub missed: bool,
    /// Hold room assigned when checkpoint service completed.
    pub assigned_room: Option<RoomId>,
    /// 1-based arrival order within the assigned hold room.
    pub hold_sequence: Option<u32>,
}

// ── PassengerArena ────────────────────────────────────────────────────────────

/// Append-only storage for every passenger materialized during a run.
///
/// `PassengerId` values index directly into the arena; ids are never reused.
#[derive(Default)]
pub struct PassengerArena {
    records: Vec<Passenger>,
}

impl PassengerArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize a passenger; returns its stable id.
    pub fn alloc(&mut self, flight: FlightId, spawn_minute: u32, in_person: bool) -> PassengerId {
        let id = PassengerId(self.records.len() as u32);
        self.records.push(Passenger {
            flight,
            spawn_minute,
            in_person,
            missed: false,
            assigned_room: None,
            hold_sequence: None,
        });
        id
    }

    #[inline]
    pub fn get(&self, id: PassengerId) -> &Passenger {
        &self.records[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: PassengerId) -> &mut Passenger {
        &mut self.records[id.index()]
    }

    /// Total passengers ever materialized (purged ones included).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterator over all ids in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = PassengerId> + '_ {
        (0..self.records.len() as u32).map(PassengerId)
    }

    /// Shorthand: is this passenger marked missed?
    #[inline]
    pub fn is_missed(&self, id: PassengerId) -> bool {
        self.records[id.index()].missed
    }

    /// Shorthand: the passenger's flight.
    #[inline]
    pub fn flight_of(&self, id: PassengerId) -> FlightId {
        self.records[id.index()].flight
    }
}
