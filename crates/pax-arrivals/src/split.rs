//! Edited split-Gaussian arrival curve.
//!
//! Mass is placed over the window `[window_start, boarding_close]` minutes
//! before departure, peaked at `peak`, with independent sigmas on each side
//! of the peak: `left_sigma` shapes the early tail (further from departure),
//! `right_sigma` the late tail.  An enabled late clamp zeroes everything
//! closer to departure than its threshold.

use pax_model::ArrivalCurveConfig;

use crate::remainder::integerize;

/// One flight's integer arrivals per minute over `arrival_span_minutes`
/// minutes, summing exactly to `planned`.
///
/// Minute index `m` is `span − m` minutes before departure, so index 0 is the
/// opening of the arrival window and the final index is the minute right
/// before departure.  The caller is expected to have run
/// [`ArrivalCurveConfig::validate_and_clamp`] first; this function only reads.
pub fn split_gaussian_row(
    cfg: &ArrivalCurveConfig,
    arrival_span_minutes: u32,
    planned: u32,
) -> Vec<u32> {
    let span = arrival_span_minutes as usize;
    let mut weights = vec![0f64; span];

    let peak = cfg.peak_min_before_dep as f64;

    for (m, w) in weights.iter_mut().enumerate() {
        // Minutes before departure for this minute of the window.
        let mbd = arrival_span_minutes - m as u32;

        if mbd > cfg.window_start_min_before_dep || mbd < cfg.boarding_close_min_before_dep {
            continue;
        }
        if cfg.late_clamp_enabled && mbd < cfg.late_clamp_min_before_dep {
            continue;
        }

        let sigma = if (mbd as f64) >= peak {
            cfg.left_sigma_min
        } else {
            cfg.right_sigma_min
        };
        let x = (mbd as f64 - peak) / sigma;
        *w = (-0.5 * x * x).exp();
    }

    integerize(&weights, planned)
}
