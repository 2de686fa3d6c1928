//! Legacy centered-Gaussian arrival curve.
//!
//! Arrivals span from `(departure − arrival_span)` up to 20 minutes before
//! departure, so the curve covers `max(1, arrival_span − 20)` minutes.  The
//! per-minute probability is a discretized Gaussian centered on the span,
//! with `σ = max(1, span / 6)`.

use crate::remainder::integerize;

/// Minutes cut off the end of the span (the legacy boarding-close cutoff).
const LEGACY_CUTOFF_MIN: u32 = 20;

/// Precomputed minute-probability profile for one arrival span.
///
/// Build once per configuration; `per_minute_counts` is then a cheap pure
/// function of the planned passenger count.
pub struct LegacyGaussianCurve {
    probabilities: Vec<f64>,
}

impl LegacyGaussianCurve {
    /// `arrival_span_minutes` is the full window from earliest arrival to
    /// departure; the curve itself covers `max(1, span − 20)` minutes.
    pub fn new(arrival_span_minutes: u32) -> Self {
        let total_minutes = arrival_span_minutes.saturating_sub(LEGACY_CUTOFF_MIN).max(1);

        let mean = (total_minutes - 1) as f64 / 2.0;
        let sigma = (total_minutes as f64 / 6.0).max(1.0);

        let mut probabilities = vec![0f64; total_minutes as usize];
        let mut sum = 0.0;
        for (m, p) in probabilities.iter_mut().enumerate() {
            let x = (m as f64 - mean) / sigma;
            *p = (-0.5 * x * x).exp();
            sum += *p;
        }
        for p in &mut probabilities {
            *p /= sum;
        }

        Self { probabilities }
    }

    /// Minutes the curve actually covers (`max(1, span − 20)`).
    pub fn curve_minutes(&self) -> u32 {
        self.probabilities.len() as u32
    }

    /// Exact integer arrivals per curve minute, summing to `planned`.
    pub fn per_minute_counts(&self, planned: u32) -> Vec<u32> {
        integerize(&self.probabilities, planned)
    }
}
