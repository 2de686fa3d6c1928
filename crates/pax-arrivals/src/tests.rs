//! Unit tests for the arrival-curve generators.

use pax_core::{FlightId, TimeOfDay};
use pax_model::{ArrivalCurveConfig, Flight, FlightNumber, ShapeTag};

use crate::remainder::integerize;
use crate::{ArrivalTable, LegacyGaussianCurve, split_gaussian_row};

fn flight(number: &str, seats: u32, fill: f64) -> Flight {
    Flight::new(
        FlightNumber::new(number).unwrap(),
        TimeOfDay::from_hm(10, 0),
        seats,
        fill,
        ShapeTag::Circle,
    )
}

// ── Remainder distribution ────────────────────────────────────────────────────

#[cfg(test)]
mod remainder {
    use super::*;

    #[test]
    fn sums_to_total() {
        let weights = [0.3, 0.1, 0.25, 0.35];
        for total in [0u32, 1, 7, 100, 999] {
            let counts = integerize(&weights, total);
            assert_eq!(counts.iter().sum::<u32>(), total, "total={total}");
        }
    }

    #[test]
    fn ties_break_to_lower_index() {
        // Four equal weights, 2 units: each share is 0.5, all fractions tie.
        let counts = integerize(&[1.0, 1.0, 1.0, 1.0], 2);
        assert_eq!(counts, vec![1, 1, 0, 0]);
    }

    #[test]
    fn zero_mass_yields_zeros() {
        assert_eq!(integerize(&[0.0, 0.0], 10), vec![0, 0]);
        assert_eq!(integerize(&[], 10), Vec::<u32>::new());
    }

    #[test]
    fn non_finite_weights_ignored() {
        let counts = integerize(&[f64::NAN, 1.0, f64::INFINITY], 5);
        assert_eq!(counts.iter().sum::<u32>(), 5);
        assert_eq!(counts[0], 0);
    }
}

// ── Legacy curve ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod legacy {
    use super::*;

    #[test]
    fn conserves_planned_count() {
        let curve = LegacyGaussianCurve::new(60);
        for planned in [0u32, 1, 10, 153, 400] {
            let row = curve.per_minute_counts(planned);
            assert_eq!(row.iter().sum::<u32>(), planned);
            assert_eq!(row.len(), 40); // 60 − 20
        }
    }

    #[test]
    fn short_span_degenerates_to_one_minute() {
        let curve = LegacyGaussianCurve::new(15);
        assert_eq!(curve.curve_minutes(), 1);
        assert_eq!(curve.per_minute_counts(9), vec![9]);
    }

    #[test]
    fn mass_peaks_in_the_middle() {
        let curve = LegacyGaussianCurve::new(80); // 60 curve minutes
        let row = curve.per_minute_counts(600);
        let mid = row[29].max(row[30]);
        assert!(mid > row[0], "center {mid} should exceed edge {}", row[0]);
        assert!(mid > row[59]);
    }

    #[test]
    fn deterministic_across_builds() {
        let a = LegacyGaussianCurve::new(90).per_minute_counts(217);
        let b = LegacyGaussianCurve::new(90).per_minute_counts(217);
        assert_eq!(a, b);
    }
}

// ── Edited split-Gaussian curve ───────────────────────────────────────────────

#[cfg(test)]
mod split {
    use super::*;

    fn edited_cfg() -> ArrivalCurveConfig {
        let mut cfg = ArrivalCurveConfig::legacy_default();
        cfg.legacy_mode = false;
        cfg.validate_and_clamp();
        cfg
    }

    #[test]
    fn conserves_planned_count() {
        let cfg = edited_cfg();
        for planned in [0u32, 1, 42, 180] {
            let row = split_gaussian_row(&cfg, 240, planned);
            assert_eq!(row.iter().sum::<u32>(), planned);
            assert_eq!(row.len(), 240);
        }
    }

    #[test]
    fn no_mass_inside_boarding_close() {
        let cfg = edited_cfg();
        let span = 240u32;
        let row = split_gaussian_row(&cfg, span, 500);
        // Minutes with mbd < boarding_close (the last boarding_close − 1
        // minutes of the span) must be empty.
        for m in 0..span {
            let mbd = span - m;
            if mbd < cfg.boarding_close_min_before_dep {
                assert_eq!(row[m as usize], 0, "mass at {mbd} min before departure");
            }
        }
    }

    #[test]
    fn late_clamp_cuts_tail() {
        let mut cfg = edited_cfg();
        cfg.late_clamp_enabled = true;
        cfg.late_clamp_min_before_dep = 60;
        cfg.validate_and_clamp();

        let span = 240u32;
        let row = split_gaussian_row(&cfg, span, 500);
        for m in 0..span {
            let mbd = span - m;
            if mbd < 60 {
                assert_eq!(row[m as usize], 0, "late-clamped mass at {mbd}");
            }
        }
        assert_eq!(row.iter().sum::<u32>(), 500);
    }

    #[test]
    fn peak_minute_carries_most_mass() {
        let cfg = edited_cfg();
        let span = 240u32;
        let row = split_gaussian_row(&cfg, span, 1_000);
        let peak_idx = (span - cfg.peak_min_before_dep) as usize;
        let max = row.iter().copied().max().unwrap();
        assert_eq!(row[peak_idx], max);
    }

    #[test]
    fn asymmetric_sigmas_skew_the_curve() {
        let cfg = edited_cfg(); // left σ 45 > right σ 20
        let span = 240u32;
        let row = split_gaussian_row(&cfg, span, 1_000);
        let peak_idx = (span - cfg.peak_min_before_dep) as usize;
        // 30 minutes early vs 30 minutes late of the peak: the wide left
        // sigma must hold more mass than the narrow right one.
        assert!(row[peak_idx - 30] > row[peak_idx + 30]);
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod table {
    use super::*;

    #[test]
    fn rows_conserve_per_flight() {
        let flights = vec![flight("UA1", 180, 0.85), flight("DL2", 120, 0.9)];
        let cfg = ArrivalCurveConfig::legacy_default();
        let table = ArrivalTable::build(&flights, &cfg, 120);

        for (i, f) in flights.iter().enumerate() {
            let id = FlightId(i as u16);
            assert_eq!(table.row_total(id), f.planned_passengers());
            assert_eq!(table.row(id).len(), 120);
        }
    }

    #[test]
    fn rebuild_is_idempotent() {
        let flights = vec![flight("UA1", 180, 0.85)];
        let cfg = ArrivalCurveConfig::legacy_default();
        let a = ArrivalTable::build(&flights, &cfg, 120);
        let b = ArrivalTable::build(&flights, &cfg, 120);
        assert_eq!(a.row(FlightId(0)), b.row(FlightId(0)));
    }

    #[test]
    fn out_of_range_reads_zero() {
        let flights = vec![flight("UA1", 10, 1.0)];
        let cfg = ArrivalCurveConfig::legacy_default();
        let table = ArrivalTable::build(&flights, &cfg, 60);
        assert_eq!(table.count_at(FlightId(0), -1), 0);
        assert_eq!(table.count_at(FlightId(0), 60), 0);
        assert_eq!(table.count_at(FlightId(0), 10_000), 0);
    }

    #[test]
    fn legacy_rows_padded_to_span() {
        let flights = vec![flight("UA1", 100, 1.0)];
        let cfg = ArrivalCurveConfig::legacy_default();
        let table = ArrivalTable::build(&flights, &cfg, 60);
        let row = table.row(FlightId(0));
        assert_eq!(row.len(), 60);
        // Cutoff tail (last 20 minutes) is zero in legacy mode.
        assert!(row[40..].iter().all(|&c| c == 0));
        assert_eq!(row.iter().sum::<u32>(), 100);
    }
}
