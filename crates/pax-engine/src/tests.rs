//! End-to-end kernel scenarios and invariant tests.

use pax_core::{FlightId, PassengerId, TimeOfDay};
use pax_model::{CheckpointConfig, Flight, FlightNumber, ShapeTag, TicketCounterConfig};

use crate::{Engine, EngineBuilder, EngineConfig};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn flight(number: &str, dep_h: u32, dep_m: u32, seats: u32, fill: f64) -> Flight {
    Flight::new(
        FlightNumber::new(number).unwrap(),
        TimeOfDay::from_hm(dep_h, dep_m),
        seats,
        fill,
        ShapeTag::Circle,
    )
}

/// Deterministic baseline: everyone in person, zero walking delays, jitter
/// off, legacy arrivals.
fn base_config() -> EngineConfig {
    EngineConfig {
        percent_in_person: 1.0,
        arrival_span_minutes: 60,
        interval_minutes: 1,
        transit_delay_minutes: 0,
        hold_delay_minutes: 0,
        boarding_close_minutes: 20,
        seed: 42,
        jitter_enabled: false,
    }
}

/// One 10-seat flight at 10:00, one 60/min counter, one 1-second checkpoint.
fn single_lane_engine() -> Engine {
    EngineBuilder::new(base_config(), vec![flight("UA10", 10, 0, 10, 1.0)])
        .counters(vec![TicketCounterConfig::new(1, 60.0, Vec::new())])
        .checkpoints(vec![CheckpointConfig::new(1, 3600.0)])
        .build()
}

/// Everything observable that snapshots restore, for structural equality.
#[derive(Debug, PartialEq)]
struct Observed {
    interval: u32,
    ticket_queues: Vec<Vec<PassengerId>>,
    ticket_staging: Vec<Vec<PassengerId>>,
    ticket_debt_bits: Vec<u64>,
    ticket_serving: Vec<Option<PassengerId>>,
    checkpoint_queues: Vec<Vec<PassengerId>>,
    checkpoint_staging: Vec<Vec<PassengerId>>,
    checkpoint_serving: Vec<Option<PassengerId>>,
    checkpoint_end: Vec<u32>,
    holds: Vec<Vec<PassengerId>>,
    pending_ticket: Vec<(u32, Vec<PassengerId>)>,
    pending_checkpoint: Vec<(u32, Vec<PassengerId>)>,
    pending_hold: Vec<(u32, Vec<PassengerId>)>,
    ticket_done: Vec<Option<u32>>,
    hold_enter: Vec<Option<u32>>,
}

fn observe(e: &Engine) -> Observed {
    let all_ids: Vec<PassengerId> = (0..e.passenger_count() as u32).map(PassengerId).collect();
    Observed {
        interval: e.current_interval(),
        ticket_queues: e
            .ticket_lanes()
            .iter()
            .map(|l| l.queue.iter().copied().collect())
            .collect(),
        ticket_staging: e
            .ticket_lanes()
            .iter()
            .map(|l| l.staging.iter().copied().collect())
            .collect(),
        ticket_debt_bits: e.ticket_lanes().iter().map(|l| l.debt.to_bits()).collect(),
        ticket_serving: e.ticket_lanes().iter().map(|l| l.serving).collect(),
        checkpoint_queues: e
            .checkpoint_lanes()
            .iter()
            .map(|l| l.queue.iter().copied().collect())
            .collect(),
        checkpoint_staging: e
            .checkpoint_lanes()
            .iter()
            .map(|l| l.staging.iter().copied().collect())
            .collect(),
        checkpoint_serving: e.checkpoint_lanes().iter().map(|l| l.serving).collect(),
        checkpoint_end: e.checkpoint_service_end_abs(),
        holds: e
            .hold_rooms()
            .iter()
            .map(|r| r.occupants.iter().copied().collect())
            .collect(),
        pending_ticket: e
            .pending_to_ticket()
            .iter()
            .map(|(s, ids)| (s, ids.to_vec()))
            .collect(),
        pending_checkpoint: e
            .pending_to_checkpoint()
            .iter()
            .map(|(s, ids)| (s, ids.to_vec()))
            .collect(),
        pending_hold: e
            .pending_to_hold()
            .iter()
            .map(|(s, ids)| (s, ids.to_vec()))
            .collect(),
        ticket_done: all_ids.iter().map(|&id| e.stamps().ticket_done(id)).collect(),
        hold_enter: all_ids.iter().map(|&id| e.stamps().hold_enter(id)).collect(),
    }
}

// ── Single flight through a single lane ───────────────────────────────────────

#[cfg(test)]
mod single_flight_pipeline {
    use super::*;

    #[test]
    fn horizon_geometry() {
        let e = single_lane_engine();
        // Horizon starts at 09:00; last departure is minute 60; interval 1.
        assert_eq!(e.total_intervals(), 61);
        assert_eq!(e.boarding_close_abs(FlightId(0)).unwrap().0, 40 * 60);
        assert_eq!(e.departure_abs(FlightId(0)).unwrap().0, 60 * 60);
    }

    #[test]
    fn everyone_reaches_the_hold_room() {
        let mut e = single_lane_engine();
        e.run_all_intervals();

        let arrived: u32 = e.history().iter().map(|r| r.arrivals.total()).sum();
        let ticketed: u32 = e.history().iter().map(|r| r.ticketed.total()).sum();
        let passed: u32 = e.history().iter().map(|r| r.passed_checkpoint.total()).sum();
        assert_eq!(arrived, 10);
        assert_eq!(ticketed, 10);
        assert_eq!(passed, 10);

        // All seated before boarding close (interval 40), none missed.
        assert_eq!(e.hold_room_total_at(41), 10);
        for i in 0..10 {
            assert!(!e.passenger(PassengerId(i)).missed, "passenger {i} missed");
        }

        // Departure (interval 60) empties the hold room.
        assert_eq!(e.hold_room_total_at(61), 0);
    }

    #[test]
    fn stamps_are_monotonic_and_service_takes_one_second() {
        let mut e = single_lane_engine();
        e.run_all_intervals();
        e.go_to_interval(41); // after close, before departure clears stamps

        for i in 0..10 {
            let id = PassengerId(i);
            let s = e.stamps();
            let tqe = s.ticket_queue_enter(id).unwrap();
            let td = s.ticket_done(id).unwrap();
            let cqe = s.checkpoint_queue_enter(id).unwrap();
            let cs = s.checkpoint_start(id).unwrap();
            let cd = s.checkpoint_done(id).unwrap();
            let he = s.hold_enter(id).unwrap();

            assert!(tqe <= td && td <= cqe && cqe <= cs && cs <= cd && cd <= he);
            assert_eq!(cd - cs, 1, "3600/hr lane serves in exactly 1 s");
        }
    }

    #[test]
    fn hold_sequences_are_dense_from_one() {
        let mut e = single_lane_engine();
        e.run_all_intervals();
        e.go_to_interval(41);

        let mut seqs: Vec<u32> = (0..10)
            .map(|i| e.passenger(PassengerId(i)).hold_sequence.unwrap())
            .collect();
        seqs.sort_unstable();
        assert_eq!(seqs, (1..=10).collect::<Vec<_>>());
    }
}

// ── Ticket rate carry across seconds ──────────────────────────────────────────

#[cfg(test)]
mod rate_carry {
    use super::*;

    #[test]
    fn half_rate_completes_every_other_second() {
        // 21-minute span → the legacy curve degenerates to a single minute,
        // so all 20 passengers spawn at minute 0 and join the queue at
        // second 1 (minimum 1-second walk).
        let mut cfg = base_config();
        cfg.arrival_span_minutes = 21;
        let mut e = EngineBuilder::new(cfg, vec![flight("UA20", 10, 0, 20, 1.0)])
            .counters(vec![TicketCounterConfig::new(1, 30.0, Vec::new())])
            .checkpoints(vec![CheckpointConfig::new(1, 3600.0)])
            .build();

        e.compute_next_interval();

        let record = e.history().get(0).unwrap();
        assert_eq!(record.ticketed.total(), 20, "exactly 20 completions");

        // 0.5 pax/s accrual: completions at seconds 2, 4, 6, …, 40, in
        // queue (= spawn) order.
        for k in 0..20u32 {
            assert_eq!(
                e.stamps().ticket_done(PassengerId(k)),
                Some(2 * (k + 1)),
                "passenger {k}"
            );
        }
    }
}

// ── Router tie-breaks ─────────────────────────────────────────────────────────

#[cfg(test)]
mod router_choice {
    use super::*;

    #[test]
    fn idle_tie_goes_to_lane_zero_then_balances() {
        let mut cfg = base_config();
        cfg.percent_in_person = 0.0; // both passengers online
        cfg.arrival_span_minutes = 21;
        let mut e = EngineBuilder::new(cfg, vec![flight("UA2", 10, 0, 2, 1.0)])
            .counters(vec![TicketCounterConfig::new(1, 60.0, Vec::new())])
            .checkpoints(vec![
                CheckpointConfig::new(1, 120.0),
                CheckpointConfig::new(2, 120.0),
            ])
            .build();

        e.compute_next_interval();

        let record = e.history().get(0).unwrap();
        // Both lanes idle and empty: first arrival takes lane 0.  The second
        // (same second) sees lane 0's backlog and takes lane 1.
        assert_eq!(record.online_arrivals[0], vec![PassengerId(0)]);
        assert_eq!(record.online_arrivals[1], vec![PassengerId(1)]);
    }
}

// ── Boarding close marks and purges ───────────────────────────────────────────

#[cfg(test)]
mod boarding_close {
    use super::*;

    /// One passenger stuck at a closed (rate-0) counter misses the flight.
    fn stuck_engine() -> Engine {
        EngineBuilder::new(base_config(), vec![flight("UA1", 10, 0, 1, 1.0)])
            .counters(vec![TicketCounterConfig::new(1, 0.0, Vec::new())])
            .checkpoints(vec![CheckpointConfig::new(1, 3600.0)])
            .build()
    }

    #[test]
    fn queued_passenger_is_missed_and_purged() {
        let mut e = stuck_engine();
        e.run_all_intervals();

        let id = PassengerId(0);
        assert!(e.passenger(id).missed);

        // Visible in the close interval's history slice (captured pre-purge)…
        let record = e.history().get(40).unwrap();
        assert!(record.queued_ticket[0].contains(&id));

        // …but in no snapshot thereafter, and never in a hold room.
        e.go_to_interval(41);
        assert!(e.ticket_lanes()[0].queue.is_empty());
        for k in 0..=e.max_computed_interval() {
            assert_eq!(e.hold_room_total_at(k), 0, "interval {k}");
        }

        // Waiting at interval 40's boundary, gone at 41's.
        assert_eq!(e.held_ups_at(40), 1);
        assert_eq!(e.held_ups_at(41), 0);
    }

    #[test]
    fn missed_flag_is_shared_across_snapshots() {
        let mut e = stuck_engine();
        e.run_all_intervals();
        // Rewinding restores memberships, not passenger records: the missed
        // flag is part of the shared arena.
        e.go_to_interval(5);
        assert!(e.passenger(PassengerId(0)).missed);
        assert!(e.ticket_lanes()[0].queue.contains(&PassengerId(0)));
    }
}

// ── Rewind determinism ────────────────────────────────────────────────────────

#[cfg(test)]
mod rewind {
    use super::*;

    #[test]
    fn go_to_interval_is_idempotent() {
        let mut e = single_lane_engine();
        e.run_all_intervals();

        e.go_to_interval(5);
        let first = observe(&e);
        e.go_to_interval(30);
        e.go_to_interval(0);
        e.go_to_interval(5);
        assert_eq!(observe(&e), first);
    }

    #[test]
    fn stepping_after_rewind_matches_the_recorded_snapshot() {
        let mut e = single_lane_engine();
        e.run_all_intervals();

        e.go_to_interval(6);
        let recorded = observe(&e);

        e.go_to_interval(5);
        e.compute_next_interval();
        assert_eq!(observe(&e), recorded);
    }

    #[test]
    fn rewind_and_fast_forward_bounds() {
        let mut e = single_lane_engine();
        assert!(!e.can_rewind());
        assert!(!e.can_fast_forward());

        e.compute_next_interval();
        e.compute_next_interval();
        assert_eq!(e.current_interval(), 2);
        assert_eq!(e.max_computed_interval(), 2);

        e.rewind_one_interval();
        assert_eq!(e.current_interval(), 1);
        assert!(e.can_fast_forward());

        e.fast_forward_one_interval(); // restores 2
        assert_eq!(e.current_interval(), 2);
        e.fast_forward_one_interval(); // computes 3
        assert_eq!(e.current_interval(), 3);
        assert_eq!(e.max_computed_interval(), 3);

        // Out-of-range jumps clamp to the computed range.
        e.go_to_interval(9_999);
        assert_eq!(e.current_interval(), 3);
    }

    #[test]
    fn stepping_past_the_horizon_is_a_no_op() {
        let mut e = single_lane_engine();
        e.run_all_intervals();
        assert_eq!(e.current_interval(), e.total_intervals());
        e.compute_next_interval();
        assert_eq!(e.current_interval(), e.total_intervals());
    }
}

// ── Online-only routing ───────────────────────────────────────────────────────

#[cfg(test)]
mod online_channel {
    use super::*;

    #[test]
    fn online_passengers_skip_ticketing() {
        let mut cfg = base_config();
        cfg.percent_in_person = 0.0;
        cfg.arrival_span_minutes = 21;
        let mut e = EngineBuilder::new(cfg, vec![flight("UA5", 10, 0, 5, 1.0)])
            .counters(vec![TicketCounterConfig::new(1, 60.0, Vec::new())])
            .checkpoints(vec![CheckpointConfig::new(1, 3600.0)])
            .build();

        e.run_all_intervals();

        let enqueued: u32 = e.history().iter().map(|r| r.enqueued_ticket.total()).sum();
        let ticketed: u32 = e.history().iter().map(|r| r.ticketed.total()).sum();
        let arrived: u32 = e
            .history()
            .iter()
            .map(|r| r.arrived_checkpoint.total())
            .sum();
        assert_eq!(enqueued, 0);
        assert_eq!(ticketed, 0);
        assert_eq!(arrived, 5);

        // All five seated before the (early) boarding close at minute 1.
        assert_eq!(e.hold_room_total_at(1), 5);
    }

    #[test]
    fn no_counters_reroutes_everyone_online() {
        let mut cfg = base_config();
        cfg.percent_in_person = 1.0;
        cfg.arrival_span_minutes = 21;
        let mut e = EngineBuilder::new(cfg, vec![flight("UA5", 10, 0, 5, 1.0)])
            .checkpoints(vec![CheckpointConfig::new(1, 3600.0)])
            .build();

        e.run_all_intervals();

        let ticketed: u32 = e.history().iter().map(|r| r.ticketed.total()).sum();
        let arrived: u32 = e
            .history()
            .iter()
            .map(|r| r.arrived_checkpoint.total())
            .sum();
        assert_eq!(ticketed, 0);
        assert_eq!(arrived, 5);
        assert!(!e.passenger(PassengerId(0)).in_person);
    }
}

// ── Cross-cutting invariants ──────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;

    #[test]
    fn no_passenger_is_in_two_places() {
        let mut e = single_lane_engine();
        e.run_all_intervals();
        e.go_to_interval(30);

        // A passenger occupies exactly one pipeline location: a waiting
        // line, a checkpoint scanner, a pending walk, or a hold room.
        // Staging lines are excluded — they mirror the pending maps for
        // renderers (a walker sits in both until arrival).
        let mut seen: Vec<PassengerId> = Vec::new();
        for lane in e.ticket_lanes() {
            seen.extend(lane.queue.iter());
        }
        for lane in e.checkpoint_lanes() {
            seen.extend(lane.queue.iter());
            seen.extend(lane.serving);
        }
        for room in e.hold_rooms() {
            seen.extend(room.occupants.iter());
        }
        for (_, ids) in e.pending_to_ticket().iter() {
            seen.extend(ids);
        }
        for (_, ids) in e.pending_to_checkpoint().iter() {
            seen.extend(ids);
        }
        for (_, ids) in e.pending_to_hold().iter() {
            seen.extend(ids);
        }

        let mut unique = seen.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), seen.len(), "a passenger appears twice");

        // Conservation: everyone spawned by minute 30 is somewhere.
        let spawned = (0..e.passenger_count() as u32)
            .map(PassengerId)
            .filter(|&id| e.passenger(id).spawn_minute < 30)
            .count();
        assert_eq!(unique.len(), spawned);
    }

    #[test]
    fn staging_lines_mirror_pending_walks() {
        let mut e = single_lane_engine();
        e.run_all_intervals();
        e.go_to_interval(30);

        let pending_cp: Vec<PassengerId> = e
            .pending_to_checkpoint()
            .iter()
            .flat_map(|(_, ids)| ids.to_vec())
            .collect();
        for lane in e.ticket_lanes() {
            for &id in &lane.staging {
                assert!(
                    pending_cp.contains(&id),
                    "ticket staging holds {id} with no pending checkpoint walk"
                );
            }
        }

        let pending_hold: Vec<PassengerId> = e
            .pending_to_hold()
            .iter()
            .flat_map(|(_, ids)| ids.to_vec())
            .collect();
        for lane in e.checkpoint_lanes() {
            for &id in &lane.staging {
                assert!(
                    pending_hold.contains(&id),
                    "checkpoint staging holds {id} with no pending hold walk"
                );
            }
        }
    }

    #[test]
    fn zero_rate_checkpoint_never_completes_service() {
        let mut cfg = base_config();
        cfg.percent_in_person = 0.0;
        let mut e = EngineBuilder::new(cfg, vec![flight("UA3", 10, 0, 3, 1.0)])
            .checkpoints(vec![CheckpointConfig::new(1, 0.0)])
            .build();

        e.run_all_intervals();

        let passed: u32 = e.history().iter().map(|r| r.passed_checkpoint.total()).sum();
        assert_eq!(passed, 0);
        for i in 0..3 {
            assert!(e.passenger(PassengerId(i)).missed);
        }
        assert_eq!(e.hold_room_total_at(e.max_computed_interval()), 0);
    }

    #[test]
    fn seeded_jitter_is_reproducible() {
        let build = || {
            let mut cfg = base_config();
            cfg.jitter_enabled = true;
            cfg.seed = 7;
            let mut e = EngineBuilder::new(cfg, vec![flight("UA10", 10, 0, 10, 1.0)])
                .counters(vec![TicketCounterConfig::new(1, 60.0, Vec::new())])
                .checkpoints(vec![CheckpointConfig::new(1, 3600.0)])
                .build();
            e.run_all_intervals();
            e
        };

        let mut a = build();
        let mut b = build();
        a.go_to_interval(30);
        b.go_to_interval(30);
        assert_eq!(observe(&a), observe(&b));

        for k in 0..=a.max_computed_interval() {
            assert_eq!(a.ticket_queued_at(k), b.ticket_queued_at(k));
            assert_eq!(a.hold_room_total_at(k), b.hold_room_total_at(k));
        }
    }

    #[test]
    fn config_clamps_and_reports() {
        let mut cfg = base_config();
        cfg.percent_in_person = 1.5;
        cfg.interval_minutes = 0;
        let e = EngineBuilder::new(cfg, vec![flight("UA1", 10, 0, 1, 1.0)])
            .checkpoints(vec![CheckpointConfig::new(1, 3600.0)])
            .build();

        assert_eq!(e.config().percent_in_person, 1.0);
        assert_eq!(e.interval_minutes(), 1);
        assert_eq!(e.config_warnings().len(), 2);
    }

    #[test]
    fn arrival_queries_sum_to_planned() {
        let e = single_lane_engine();
        let total: u32 = (0..e.total_intervals())
            .map(|k| e.total_arrivals_at_interval(k))
            .sum();
        assert_eq!(total, 10);
    }
}
