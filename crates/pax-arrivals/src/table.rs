//! The per-flight minute-arrivals table.

use pax_core::FlightId;
use pax_model::{ArrivalCurveConfig, Flight};

use crate::legacy::LegacyGaussianCurve;
use crate::split::split_gaussian_row;

/// One integer row per flight: element `i` is the number of passengers
/// spawning at absolute minute `spawn_offset(flight) + i`.
///
/// Every row has length `arrival_span_minutes` regardless of mode; the legacy
/// curve fills the first `max(1, span − 20)` entries and leaves the cutoff
/// tail at zero.
pub struct ArrivalTable {
    rows: Vec<Vec<u32>>,
    span_minutes: u32,
}

impl ArrivalTable {
    /// Build the full table for `flights` under `cfg`.
    ///
    /// Rebuilding with the same inputs yields an identical table; the curve
    /// math is pure.
    pub fn build(flights: &[Flight], cfg: &ArrivalCurveConfig, arrival_span_minutes: u32) -> Self {
        let legacy = LegacyGaussianCurve::new(arrival_span_minutes);

        let rows = flights
            .iter()
            .map(|f| {
                let planned = f.planned_passengers();
                if cfg.legacy_mode {
                    let mut row = legacy.per_minute_counts(planned);
                    row.resize(arrival_span_minutes.max(1) as usize, 0);
                    row
                } else {
                    split_gaussian_row(cfg, arrival_span_minutes, planned)
                }
            })
            .collect();

        Self {
            rows,
            span_minutes: arrival_span_minutes,
        }
    }

    /// Row length shared by every flight.
    pub fn span_minutes(&self) -> u32 {
        self.span_minutes
    }

    /// The full row for one flight.
    pub fn row(&self, flight: FlightId) -> &[u32] {
        &self.rows[flight.index()]
    }

    /// Arrivals for `flight` at window-relative minute `idx`; 0 when out of
    /// range (including negative offsets collapsed by the caller).
    pub fn count_at(&self, flight: FlightId, idx: i64) -> u32 {
        if idx < 0 {
            return 0;
        }
        self.rows[flight.index()]
            .get(idx as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Total planned arrivals for one flight (row sum).
    pub fn row_total(&self, flight: FlightId) -> u32 {
        self.rows[flight.index()].iter().sum()
    }
}
