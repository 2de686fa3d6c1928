//! Per-passenger absolute-second progress stamps.
//!
//! Stamps are owned by the engine, keyed by `PassengerId`, and deep-copied
//! into every snapshot — a stamp is always either set or absent, with no
//! probing and no silent fallback.  Minute-resolution views are derived from
//! the absolute second on read.
//!
//! Whenever all stamps of a passenger are defined they satisfy
//! `ticket_queue_enter ≤ ticket_done ≤ checkpoint_queue_enter ≤
//! checkpoint_start ≤ checkpoint_done ≤ hold_enter`.

use std::collections::HashMap;

use pax_core::PassengerId;

/// The six stamp maps, one entry per passenger that reached the event.
#[derive(Clone, Default)]
pub struct StampTable {
    ticket_queue_enter: HashMap<PassengerId, u32>,
    ticket_done: HashMap<PassengerId, u32>,
    checkpoint_queue_enter: HashMap<PassengerId, u32>,
    checkpoint_start: HashMap<PassengerId, u32>,
    checkpoint_done: HashMap<PassengerId, u32>,
    hold_enter: HashMap<PassengerId, u32>,
}

macro_rules! stamp_accessors {
    ($field:ident, $set:ident) => {
        #[inline]
        pub fn $field(&self, id: PassengerId) -> Option<u32> {
            self.$field.get(&id).copied()
        }

        #[inline]
        pub fn $set(&mut self, id: PassengerId, abs_sec: u32) {
            self.$field.insert(id, abs_sec);
        }
    };
}

impl StampTable {
    pub fn new() -> Self {
        Self::default()
    }

    stamp_accessors!(ticket_queue_enter, set_ticket_queue_enter);
    stamp_accessors!(ticket_done, set_ticket_done);
    stamp_accessors!(checkpoint_queue_enter, set_checkpoint_queue_enter);
    stamp_accessors!(checkpoint_start, set_checkpoint_start);
    stamp_accessors!(checkpoint_done, set_checkpoint_done);
    stamp_accessors!(hold_enter, set_hold_enter);

    /// Minute the passenger joined a checkpoint queue, derived from the
    /// absolute-second stamp.
    pub fn checkpoint_entry_minute(&self, id: PassengerId) -> Option<u32> {
        self.checkpoint_queue_enter(id).map(|s| s / 60)
    }

    /// Minute the passenger entered the hold room.
    pub fn hold_entry_minute(&self, id: PassengerId) -> Option<u32> {
        self.hold_enter(id).map(|s| s / 60)
    }

    /// Drop every stamp of one passenger.
    pub fn remove_all(&mut self, id: PassengerId) {
        self.ticket_queue_enter.remove(&id);
        self.ticket_done.remove(&id);
        self.checkpoint_queue_enter.remove(&id);
        self.checkpoint_start.remove(&id);
        self.checkpoint_done.remove(&id);
        self.hold_enter.remove(&id);
    }

    /// Keep only stamps whose passenger satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(PassengerId) -> bool) {
        self.ticket_queue_enter.retain(|id, _| keep(*id));
        self.ticket_done.retain(|id, _| keep(*id));
        self.checkpoint_queue_enter.retain(|id, _| keep(*id));
        self.checkpoint_start.retain(|id, _| keep(*id));
        self.checkpoint_done.retain(|id, _| keep(*id));
        self.hold_enter.retain(|id, _| keep(*id));
    }

    pub fn clear(&mut self) {
        self.ticket_queue_enter.clear();
        self.ticket_done.clear();
        self.checkpoint_queue_enter.clear();
        self.checkpoint_start.clear();
        self.checkpoint_done.clear();
        self.hold_enter.clear();
    }
}
