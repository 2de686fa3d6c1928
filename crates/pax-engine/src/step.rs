//! `simulate_interval` — advance the pipeline by one engine interval.
//!
//! The interval runs in four phases:
//!
//! - **Prelude**: clear the just-closed list and the transient ticket serving
//!   slots.  Checkpoint serving slots and their completion seconds persist —
//!   a service in progress must finish at its scheduled absolute second.
//! - **Spawn**: materialize every passenger whose arrival minute falls in the
//!   window and schedule their first walk.
//! - **Tick loop**: sweep the window one second at a time.  Within each
//!   second the order is fixed: boarding-close events, departures, ticket
//!   arrivals, checkpoint arrivals, hold arrivals, ticket service, checkpoint
//!   service — lanes ascending, buckets in insertion order.
//! - **Record**: persist fractional ticket debt, append the history record,
//!   run the close-time and missed sweeps, advance the interval counter, and
//!   snapshot.

use std::collections::HashMap;

use tracing::debug;

use pax_core::{CounterId, FlightId, LaneId, RoomId};

use crate::engine::Engine;
use crate::history::{FlightCounts, IntervalRecord};
use crate::lanes::{remove_identity, take_first_not_missed};
use crate::router::pick_checkpoint_lane;

impl Engine {
    pub(crate) fn simulate_interval(&mut self) {
        // ── Phase A: prelude ──────────────────────────────────────────────
        self.just_closed.clear();
        for lane in &mut self.ticket_lanes {
            lane.serving = None;
        }

        let interval_seconds = self.horizon.interval_seconds();
        let t0 = self.current_interval * interval_seconds;
        let t1 = t0 + interval_seconds;
        debug!(interval = self.current_interval, t0, t1, "simulating interval");

        let mut arrivals = FlightCounts::new();
        let mut enqueued_ticket = FlightCounts::new();
        let mut ticketed = FlightCounts::new();
        let mut arrived_checkpoint = FlightCounts::new();
        let mut passed_checkpoint = FlightCounts::new();

        let lane_count = self.checkpoint_lanes.len();
        let mut online_arrivals: Vec<Vec<_>> = vec![Vec::new(); lane_count];
        let mut from_ticket_arrivals: Vec<Vec<_>> = vec![Vec::new(); lane_count];

        // Flight events landing inside this window, keyed by absolute second.
        let mut close_events: HashMap<u32, Vec<FlightId>> = HashMap::new();
        let mut depart_events: HashMap<u32, Vec<FlightId>> = HashMap::new();
        for i in 0..self.flights.len() as u16 {
            let f = FlightId(i);
            let close_sec = self.boarding_close_min(f) * 60;
            if close_sec >= t0 as i64 && close_sec < t1 as i64 {
                close_events.entry(close_sec as u32).or_default().push(f);
            }
            let depart_sec = self.departure_min(f) * 60;
            if depart_sec >= t0 as i64 && depart_sec < t1 as i64 {
                depart_events.entry(depart_sec as u32).or_default().push(f);
            }
        }

        // ── Phase B: spawn ────────────────────────────────────────────────
        self.spawn_window(t0 / 60, &mut arrivals);

        // ── Phase C: per-second tick loop ─────────────────────────────────
        for abs in t0..t1 {
            // C1. Boarding-close events.
            if let Some(flights) = close_events.remove(&abs) {
                for f in flights {
                    self.mark_boarding_closed(f);
                }
            }

            // C2. Departure events.
            if let Some(flights) = depart_events.remove(&abs) {
                for f in flights {
                    self.on_departure(f);
                }
            }

            // C3. Arrivals to ticket counters.
            if let Some(ids) = self.pending_to_ticket.drain_second(abs) {
                for id in ids {
                    if self.arena.is_missed(id) {
                        continue;
                    }
                    let lane = self
                        .target_ticket_lane
                        .get(&id)
                        .copied()
                        .unwrap_or(0)
                        .min(self.ticket_lanes.len().saturating_sub(1));
                    self.ticket_lanes[lane].queue.push_back(id);
                    self.stamps.set_ticket_queue_enter(id, abs);
                    enqueued_ticket.inc(self.arena.flight_of(id), 1);
                }
            }

            // C4. Arrivals to checkpoint lanes.
            if let Some(ids) = self.pending_to_checkpoint.drain_second(abs) {
                for id in ids {
                    if self.arena.is_missed(id) {
                        continue;
                    }
                    let in_person = self.arena.get(id).in_person;
                    if in_person {
                        // Leaving the ticket staging line at walk completion.
                        for lane in &mut self.ticket_lanes {
                            if remove_identity(&mut lane.staging, id) {
                                break;
                            }
                        }
                    }
                    self.stamps.set_checkpoint_queue_enter(id, abs);

                    // From-ticket passengers keep the lane chosen when their
                    // walk was scheduled; an online passenger's proto lane
                    // was only a travel-time candidate, so their lane is
                    // re-chosen against current backlogs.
                    let hint = self.target_checkpoint_lane.remove(&id);
                    let lane = match hint {
                        Some(h) if in_person && h < lane_count => h,
                        _ => pick_checkpoint_lane(
                            &self.checkpoint_lanes,
                            &self.checkpoints,
                            &self.arena,
                            abs,
                        ),
                    };
                    self.checkpoint_lanes[lane].queue.push_back(id);
                    arrived_checkpoint.inc(self.arena.flight_of(id), 1);

                    if in_person {
                        from_ticket_arrivals[lane].push(id);
                    } else {
                        online_arrivals[lane].push(id);
                    }
                }
            }

            // C5. Arrivals to hold rooms.
            if let Some(ids) = self.pending_to_hold.drain_second(abs) {
                for id in ids {
                    if self.arena.is_missed(id) {
                        continue;
                    }
                    for lane in &mut self.checkpoint_lanes {
                        if remove_identity(&mut lane.staging, id) {
                            break;
                        }
                    }

                    let f = self.arena.flight_of(id);
                    let close_sec = self.boarding_close_min(f) * 60;
                    if (abs as i64) < close_sec {
                        let room = self
                            .arena
                            .get(id)
                            .assigned_room
                            .map(|r| r.index())
                            .unwrap_or_else(|| self.chosen_room(f).index())
                            .min(self.hold_rooms.len() - 1);
                        let sequence = self.hold_rooms[room].occupants.len() as u32 + 1;

                        let rec = self.arena.get_mut(id);
                        rec.assigned_room = Some(RoomId(room as u16));
                        rec.hold_sequence = Some(sequence);

                        self.hold_rooms[room].occupants.push_back(id);
                        self.stamps.set_hold_enter(id, abs);
                    } else {
                        self.arena.get_mut(id).missed = true;
                    }
                }
            }

            // C6. Ticket service (rate accrual, possibly several per second).
            for c in 0..self.ticket_lanes.len() {
                if self.ticket_lanes[c].queue.is_empty() {
                    // Idle lanes do not bank partial work.
                    self.ticket_lanes[c].debt = 0.0;
                    continue;
                }

                self.ticket_lanes[c].debt += self.counters[c].rate_per_second();

                while self.ticket_lanes[c].debt >= 1.0 {
                    let Some(next) =
                        take_first_not_missed(&mut self.ticket_lanes[c].queue, &self.arena)
                    else {
                        self.ticket_lanes[c].debt = 0.0;
                        break;
                    };

                    self.ticket_lanes[c].serving = Some(next);
                    self.stamps.set_ticket_done(next, abs);
                    self.ticket_lanes[c].staging.push_back(next);
                    ticketed.inc(self.arena.flight_of(next), 1);

                    let target = pick_checkpoint_lane(
                        &self.checkpoint_lanes,
                        &self.checkpoints,
                        &self.arena,
                        abs,
                    );
                    self.target_checkpoint_lane.insert(next, target);
                    let walk = self
                        .travel
                        .ticket_to_checkpoint(CounterId(c as u16), LaneId(target as u16));
                    self.pending_to_checkpoint.push(abs + walk, next);

                    self.ticket_lanes[c].debt -= 1.0;
                    if self.ticket_lanes[c].queue.is_empty() {
                        self.ticket_lanes[c].debt = 0.0;
                        break;
                    }
                }
            }

            // C7. Checkpoint service (fixed duration, one at a time).
            // Completion runs before start so a lane can finish one passenger
            // and admit the next in the same second.
            for c in 0..lane_count {
                let end = self.checkpoint_lanes[c].service_end_abs;
                if end > 0 && abs >= end {
                    let done = self.checkpoint_lanes[c].serving.take();
                    self.checkpoint_lanes[c].service_end_abs = 0;

                    if let Some(p) = done {
                        if !self.arena.is_missed(p) {
                            self.checkpoint_lanes[c].staging.push_back(p);
                            let f = self.arena.flight_of(p);
                            passed_checkpoint.inc(f, 1);

                            let room = self.chosen_room(f).index().min(self.hold_rooms.len() - 1);
                            self.arena.get_mut(p).assigned_room = Some(RoomId(room as u16));

                            let walk = self.travel.checkpoint_to_hold(
                                LaneId(c as u16),
                                RoomId(room as u16),
                                self.room_configs[room].walk_seconds_from_checkpoint(),
                            );
                            self.pending_to_hold.push(abs + walk, p);
                        }
                    }
                }

                if self.checkpoint_lanes[c].service_end_abs == 0 {
                    if let Some(next) =
                        take_first_not_missed(&mut self.checkpoint_lanes[c].queue, &self.arena)
                    {
                        let service = self.checkpoints[c].service_seconds().max(1);
                        let done_at = abs.saturating_add(service);
                        self.checkpoint_lanes[c].serving = Some(next);
                        self.checkpoint_lanes[c].service_end_abs = done_at;
                        self.stamps.set_checkpoint_start(next, abs);
                        self.stamps.set_checkpoint_done(next, done_at);
                    }
                }
            }
        }

        // ── Phase D: persist & record ─────────────────────────────────────
        for lane in &mut self.ticket_lanes {
            let debt = lane.debt;
            lane.debt = if debt.is_finite() && debt > 0.0 {
                debt.fract()
            } else {
                0.0
            };
        }

        let record = IntervalRecord {
            arrivals,
            enqueued_ticket,
            ticketed,
            arrived_checkpoint,
            passed_checkpoint,
            queued_ticket: self
                .ticket_lanes
                .iter()
                .map(|l| l.queue.iter().copied().collect())
                .collect(),
            served_ticket: self
                .ticket_lanes
                .iter()
                .map(|l| l.staging.iter().copied().collect())
                .collect(),
            queued_checkpoint: self
                .checkpoint_lanes
                .iter()
                .map(|l| l.queue.iter().copied().collect())
                .collect(),
            served_checkpoint: self
                .checkpoint_lanes
                .iter()
                .map(|l| l.staging.iter().copied().collect())
                .collect(),
            hold_rooms: self
                .hold_rooms
                .iter()
                .map(|r| r.occupants.iter().copied().collect())
                .collect(),
            online_arrivals,
            from_ticket_arrivals,
            ticket_queue_len: self.ticket_waiting_total(),
            checkpoint_queue_len: self.checkpoint_waiting_total(),
        };
        self.history.push(record);

        if !self.just_closed.is_empty() {
            for f in self.just_closed.clone() {
                self.clear_flight_from_non_hold_areas(f);
            }
        }
        self.purge_missed_passengers();

        self.current_interval += 1;

        let held_up = self.ticket_waiting_total() + self.checkpoint_waiting_total();
        self.held_ups_by_interval.insert(self.current_interval, held_up);

        self.record_queue_totals();
        self.append_snapshot();
    }

    /// Phase B: spawn every passenger whose arrival minute lies in
    /// `[start_minute, start_minute + interval_minutes)` and schedule their
    /// first walk in absolute seconds.
    fn spawn_window(&mut self, start_minute: u32, arrivals: &mut FlightCounts) {
        for sub_min in 0..self.horizon.interval_minutes() {
            let minute_idx = start_minute + sub_min;
            let minute_start_abs = minute_idx * 60;

            for i in 0..self.flights.len() as u16 {
                let f = FlightId(i);
                let idx = minute_idx as i64 - self.spawn_offset_min(f);
                let count = self.arrival_table.count_at(f, idx);
                if count == 0 {
                    continue;
                }
                arrivals.inc(f, count);

                let mut in_person = (count as f64 * self.config.percent_in_person).round() as u32;
                let mut online = count - in_person;
                if self.counters.is_empty() {
                    // No ticket counters: everyone routes through the online
                    // channel.
                    online += in_person;
                    in_person = 0;
                }

                // Counters willing to take this flight; all of them if the
                // allowed sets exclude everyone.
                let number = self.flights[f.index()].number().clone();
                let mut allowed: Vec<usize> = (0..self.counters.len())
                    .filter(|&c| self.counters[c].accepts(&number))
                    .collect();
                if allowed.is_empty() && !self.counters.is_empty() {
                    allowed = (0..self.counters.len()).collect();
                }

                for _ in 0..in_person {
                    let id = self.arena.alloc(f, minute_idx, true);

                    // Shortest waiting line among the allowed counters,
                    // first index winning ties.
                    let mut lane = allowed[0];
                    for &c in &allowed {
                        if self.ticket_lanes[c].queue.len() < self.ticket_lanes[lane].queue.len() {
                            lane = c;
                        }
                    }
                    self.target_ticket_lane.insert(id, lane);

                    let jitter = self.spawn_jitter();
                    let walk = self.travel.spawn_to_ticket(CounterId(lane as u16));
                    self.pending_to_ticket.push(minute_start_abs + jitter + walk, id);
                }

                for _ in 0..online {
                    let id = self.arena.alloc(f, minute_idx, false);

                    // Travel needs a candidate lane before the walk begins;
                    // the binding lane choice happens again on arrival.
                    let proto = pick_checkpoint_lane(
                        &self.checkpoint_lanes,
                        &self.checkpoints,
                        &self.arena,
                        minute_start_abs,
                    );
                    self.target_checkpoint_lane.insert(id, proto);

                    let jitter = self.spawn_jitter();
                    let walk = self.travel.spawn_to_checkpoint(LaneId(proto as u16));
                    self.pending_to_checkpoint
                        .push(minute_start_abs + jitter + walk, id);
                }
            }
        }
    }

    /// 0–59 s offset within the spawn minute, or 0 with jitter disabled.
    fn spawn_jitter(&mut self) -> u32 {
        if self.config.jitter_enabled {
            self.rng.gen_range(0..60u32)
        } else {
            0
        }
    }
}
