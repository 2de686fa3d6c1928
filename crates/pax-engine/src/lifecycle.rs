//! Flight-lifecycle enforcement: boarding close, departure, and the
//! end-of-interval sweeps that follow them.

use std::collections::HashSet;

use tracing::debug;

use pax_core::{FlightId, PassengerId};

use crate::engine::Engine;

impl Engine {
    /// Boarding just closed for `f`: every passenger of the flight not
    /// already seated in its chosen hold room has missed it.
    ///
    /// Passengers waiting or staging at a station are only *marked* (the
    /// interval-end purge removes them); passengers still walking are marked
    /// and dropped from their pending bucket immediately, together with
    /// their lane hints and stamps.
    pub(crate) fn mark_boarding_closed(&mut self, f: FlightId) {
        if !self.just_closed.contains(&f) {
            self.just_closed.push(f);
        }
        debug!(flight = %self.flights[f.index()].number(), "boarding closed");

        let Engine {
            arena,
            ticket_lanes,
            checkpoint_lanes,
            hold_rooms,
            pending_to_ticket,
            pending_to_checkpoint,
            pending_to_hold,
            target_ticket_lane,
            target_checkpoint_lane,
            stamps,
            chosen_room,
            ..
        } = self;

        let room = chosen_room
            .get(f.index())
            .map(|r| r.index())
            .unwrap_or(0)
            .min(hold_rooms.len().saturating_sub(1));

        let in_chosen: HashSet<PassengerId> = hold_rooms[room]
            .occupants
            .iter()
            .copied()
            .filter(|&id| arena.flight_of(id) == f)
            .collect();

        // Waiting and staging lines: mark only.
        let station_ids = ticket_lanes
            .iter()
            .flat_map(|l| l.queue.iter().chain(l.staging.iter()))
            .chain(
                checkpoint_lanes
                    .iter()
                    .flat_map(|l| l.queue.iter().chain(l.staging.iter())),
            )
            .copied()
            .collect::<Vec<_>>();
        for id in station_ids {
            if arena.flight_of(id) == f && !in_chosen.contains(&id) {
                arena.get_mut(id).missed = true;
            }
        }

        // In-transit passengers: mark, unstamp, and drop from the bucket.
        for pending in [pending_to_ticket, pending_to_checkpoint, pending_to_hold] {
            pending.retain(|id| {
                if arena.flight_of(id) == f && !in_chosen.contains(&id) {
                    arena.get_mut(id).missed = true;
                    target_ticket_lane.remove(&id);
                    target_checkpoint_lane.remove(&id);
                    stamps.remove_all(id);
                    false
                } else {
                    true
                }
            });
        }

        // Serving slots: mark (the slot itself is cleared at interval end).
        let serving_ids = ticket_lanes
            .iter()
            .filter_map(|l| l.serving)
            .chain(checkpoint_lanes.iter().filter_map(|l| l.serving))
            .collect::<Vec<_>>();
        for id in serving_ids {
            if arena.flight_of(id) == f && !in_chosen.contains(&id) {
                arena.get_mut(id).missed = true;
            }
        }
    }

    /// The flight departed: its hold rooms empty out and the flight's stamp
    /// entries are released.
    pub(crate) fn on_departure(&mut self, f: FlightId) {
        debug!(flight = %self.flights[f.index()].number(), "departed");

        let Engine {
            arena,
            hold_rooms,
            stamps,
            ..
        } = self;

        for room in hold_rooms.iter_mut() {
            room.occupants.retain(|&id| arena.flight_of(id) != f);
        }
        stamps.retain(|id| arena.flight_of(id) != f);
    }

    /// End-of-interval cleanup for a flight that closed this interval:
    /// remove its passengers from every non-hold structure.
    ///
    /// Matching the source engine, this resets `service_end_abs` on **all**
    /// checkpoint lanes, not just lanes serving this flight — a passenger of
    /// another flight mid-service keeps its serving slot but loses its
    /// scheduled completion, and is displaced at the next service start.
    pub(crate) fn clear_flight_from_non_hold_areas(&mut self, f: FlightId) {
        let Engine {
            arena,
            ticket_lanes,
            checkpoint_lanes,
            pending_to_ticket,
            pending_to_checkpoint,
            pending_to_hold,
            target_ticket_lane,
            target_checkpoint_lane,
            stamps,
            ..
        } = self;

        for lane in ticket_lanes.iter_mut() {
            lane.queue.retain(|&id| arena.flight_of(id) != f);
            lane.staging.retain(|&id| arena.flight_of(id) != f);
            if lane.serving.is_some_and(|id| arena.flight_of(id) == f) {
                lane.serving = None;
            }
        }
        for lane in checkpoint_lanes.iter_mut() {
            lane.queue.retain(|&id| arena.flight_of(id) != f);
            lane.staging.retain(|&id| arena.flight_of(id) != f);
            if lane.serving.is_some_and(|id| arena.flight_of(id) == f) {
                lane.serving = None;
            }
            lane.service_end_abs = 0;
        }

        for pending in [pending_to_ticket, pending_to_checkpoint, pending_to_hold] {
            pending.retain(|id| arena.flight_of(id) != f);
        }

        target_ticket_lane.retain(|&id, _| arena.flight_of(id) != f);
        target_checkpoint_lane.retain(|&id, _| arena.flight_of(id) != f);
        stamps.retain(|id| arena.flight_of(id) != f);
    }

    /// Sweep missed passengers out of every live structure.  Runs at the end
    /// of each interval, after the history record is captured — so a
    /// passenger marked missed mid-interval stays visible in that interval's
    /// history but never appears in a later one.
    pub(crate) fn purge_missed_passengers(&mut self) {
        let Engine {
            arena,
            ticket_lanes,
            checkpoint_lanes,
            hold_rooms,
            target_ticket_lane,
            target_checkpoint_lane,
            stamps,
            ..
        } = self;

        for lane in ticket_lanes.iter_mut() {
            lane.queue.retain(|&id| !arena.is_missed(id));
            lane.staging.retain(|&id| !arena.is_missed(id));
        }
        for lane in checkpoint_lanes.iter_mut() {
            lane.queue.retain(|&id| !arena.is_missed(id));
            lane.staging.retain(|&id| !arena.is_missed(id));
        }
        for room in hold_rooms.iter_mut() {
            room.occupants.retain(|&id| !arena.is_missed(id));
        }

        target_ticket_lane.retain(|&id, _| !arena.is_missed(id));
        target_checkpoint_lane.retain(|&id, _| !arena.is_missed(id));
        stamps.retain(|id| !arena.is_missed(id));
    }
}
