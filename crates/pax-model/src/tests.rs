//! Unit tests for the pax-model data types.

use std::io::Cursor;

use pax_core::{FlightId, TimeOfDay};

use crate::{
    ArrivalCurveConfig, CheckpointConfig, Flight, FlightNumber, HoldRoomConfig, PassengerArena,
    ShapeTag, TicketCounterConfig, load_flights_reader,
};

// ── Flight identity ───────────────────────────────────────────────────────────

#[cfg(test)]
mod flight {
    use super::*;

    #[test]
    fn number_is_case_insensitive() {
        let a = FlightNumber::new("ua101").unwrap();
        let b = FlightNumber::new("  UA101 ").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_number_rejected() {
        assert!(FlightNumber::new("   ").is_err());
    }

    #[test]
    fn equality_by_number_only() {
        let a = Flight::new(
            FlightNumber::new("AA1").unwrap(),
            TimeOfDay::from_hm(9, 0),
            100,
            0.5,
            ShapeTag::Circle,
        );
        let b = Flight::new(
            FlightNumber::new("aa1").unwrap(),
            TimeOfDay::from_hm(18, 0),
            200,
            1.0,
            ShapeTag::Star,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn planned_passengers_rounds() {
        let f = Flight::new(
            FlightNumber::new("AA1").unwrap(),
            TimeOfDay::from_hm(9, 0),
            151,
            0.5,
            ShapeTag::Circle,
        );
        assert_eq!(f.planned_passengers(), 76); // 75.5 rounds up
    }

    #[test]
    fn fill_percent_clamped() {
        let f = Flight::new(
            FlightNumber::new("AA1").unwrap(),
            TimeOfDay::from_hm(9, 0),
            100,
            1.7,
            ShapeTag::Circle,
        );
        assert_eq!(f.fill_percent(), 1.0);
        let g = Flight::new(
            FlightNumber::new("AA2").unwrap(),
            TimeOfDay::from_hm(9, 0),
            100,
            f64::NAN,
            ShapeTag::Circle,
        );
        assert_eq!(g.planned_passengers(), 0);
    }
}

// ── Stations ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod station {
    use super::*;

    #[test]
    fn counter_accepts_all_when_unrestricted() {
        let c = TicketCounterConfig::open(1);
        assert!(c.accepts(&FlightNumber::new("anything").unwrap()));
    }

    #[test]
    fn counter_respects_allowed_set() {
        let ua = FlightNumber::new("UA1").unwrap();
        let c = TicketCounterConfig::new(1, 2.0, vec![ua.clone()]);
        assert!(c.accepts(&FlightNumber::new("ua1").unwrap()));
        assert!(!c.accepts(&FlightNumber::new("DL2").unwrap()));
    }

    #[test]
    fn negative_rate_clamped() {
        let mut c = TicketCounterConfig::new(1, -3.0, Vec::new());
        assert_eq!(c.rate_per_minute(), 0.0);
        c.set_rate_per_minute(f64::NAN);
        assert_eq!(c.rate_per_minute(), 0.0);
    }

    #[test]
    fn checkpoint_service_seconds() {
        assert_eq!(CheckpointConfig::new(1, 3600.0).service_seconds(), 1);
        assert_eq!(CheckpointConfig::new(1, 120.0).service_seconds(), 30);
        // 7000/hr → 0.514 s rounds to 1 (floor at 1 s)
        assert_eq!(CheckpointConfig::new(1, 7000.0).service_seconds(), 1);
        assert_eq!(CheckpointConfig::new(1, 0.0).service_seconds(), u32::MAX);
    }

    #[test]
    fn hold_room_accepts() {
        let ua = FlightNumber::new("UA1").unwrap();
        let r = HoldRoomConfig::new(1, 30, vec![ua]);
        assert!(r.accepts(&FlightNumber::new("UA1").unwrap()));
        assert!(!r.accepts(&FlightNumber::new("DL2").unwrap()));
        assert!(HoldRoomConfig::open(2).accepts(&FlightNumber::new("DL2").unwrap()));
    }
}

// ── Arrival-curve config ──────────────────────────────────────────────────────

#[cfg(test)]
mod curve {
    use super::*;

    #[test]
    fn default_is_valid() {
        let mut cfg = ArrivalCurveConfig::legacy_default();
        assert!(cfg.validate_and_clamp().is_empty());
    }

    #[test]
    fn inverted_window_repaired() {
        let mut cfg = ArrivalCurveConfig::legacy_default();
        cfg.window_start_min_before_dep = 10;
        cfg.boarding_close_min_before_dep = 20;
        let warnings = cfg.validate_and_clamp();
        assert!(!warnings.is_empty());
        assert!(cfg.window_start_min_before_dep > cfg.boarding_close_min_before_dep);
        // peak was 75, now outside nothing — must sit inside the new window
        assert!(cfg.peak_min_before_dep >= cfg.boarding_close_min_before_dep);
        assert!(cfg.peak_min_before_dep <= cfg.window_start_min_before_dep);
    }

    #[test]
    fn sigmas_floored_at_one() {
        let mut cfg = ArrivalCurveConfig::legacy_default();
        cfg.left_sigma_min = 0.0;
        cfg.right_sigma_min = f64::NAN;
        cfg.validate_and_clamp();
        assert_eq!(cfg.left_sigma_min, 1.0);
        assert_eq!(cfg.right_sigma_min, 1.0);
    }

    #[test]
    fn clamp_is_idempotent() {
        let mut cfg = ArrivalCurveConfig::legacy_default();
        cfg.peak_min_before_dep = 500;
        assert!(!cfg.validate_and_clamp().is_empty());
        let snapshot = cfg.clone();
        assert!(cfg.validate_and_clamp().is_empty());
        assert_eq!(cfg, snapshot);
    }
}

// ── Arena ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod arena {
    use super::*;

    #[test]
    fn ids_are_stable_and_sequential() {
        let mut arena = PassengerArena::new();
        let a = arena.alloc(FlightId(0), 5, true);
        let b = arena.alloc(FlightId(1), 6, false);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.get(a).spawn_minute, 5);
        assert!(arena.get(a).in_person);
        assert!(!arena.get(b).in_person);
    }

    #[test]
    fn missed_flag_mutates_in_place() {
        let mut arena = PassengerArena::new();
        let a = arena.alloc(FlightId(0), 0, true);
        assert!(!arena.is_missed(a));
        arena.get_mut(a).missed = true;
        assert!(arena.is_missed(a));
    }
}

// ── Roster loader ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;

    const ROSTER: &str = "\
flight_number,departure,seats,fill_percent,shape
UA101,10:00,180,0.85,circle
DL202,10:30,120,0.90,square
";

    #[test]
    fn loads_roster() {
        let flights = load_flights_reader(Cursor::new(ROSTER)).unwrap();
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].number().as_str(), "UA101");
        assert_eq!(flights[0].departure(), TimeOfDay::from_hm(10, 0));
        assert_eq!(flights[1].shape(), ShapeTag::Square);
    }

    #[test]
    fn duplicate_number_rejected() {
        let csv = "\
flight_number,departure,seats,fill_percent,shape
UA101,10:00,180,0.85,circle
ua101,11:00,100,0.50,star
";
        assert!(load_flights_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn bad_time_rejected() {
        let csv = "\
flight_number,departure,seats,fill_percent,shape
UA101,26:00,180,0.85,circle
";
        assert!(load_flights_reader(Cursor::new(csv)).is_err());
    }
}
