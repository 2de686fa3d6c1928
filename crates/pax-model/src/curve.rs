//! Arrival-curve configuration.
//!
//! Two modes:
//!
//! - **Legacy**: a centered Gaussian over `max(1, arrival_span − 20)` minutes.
//!   Ignores every field here except [`ArrivalCurveConfig::legacy_mode`].
//! - **Edited**: a split Gaussian over the window
//!   `[window_start, boarding_close]` minutes before departure, peaked at
//!   `peak` with independent left/right sigmas and an optional late clamp.
//!
//! All offsets are minutes *before departure*, so `window_start` is the
//! numerically largest value and `boarding_close` the smallest.
//! [`validate_and_clamp`](ArrivalCurveConfig::validate_and_clamp) repairs any
//! inconsistent combination instead of rejecting it (the kernel is total over
//! well-typed inputs) and reports what it changed.

/// Minutes before departure at which boarding closes by default.
pub const DEFAULT_BOARDING_CLOSE_MIN: u32 = 20;

/// Knobs for the per-flight minute-arrival curve.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrivalCurveConfig {
    /// `true` selects the legacy centered-Gaussian generator.
    pub legacy_mode: bool,
    /// Earliest arrival, minutes before departure (window left edge).
    pub window_start_min_before_dep: u32,
    /// Curve peak, minutes before departure.
    pub peak_min_before_dep: u32,
    /// Sigma (minutes) for the early side of the peak.
    pub left_sigma_min: f64,
    /// Sigma (minutes) for the late side of the peak.
    pub right_sigma_min: f64,
    /// When `true`, all mass closer to departure than
    /// `late_clamp_min_before_dep` is cut to zero.
    pub late_clamp_enabled: bool,
    pub late_clamp_min_before_dep: u32,
    /// Latest arrival, minutes before departure (window right edge).
    pub boarding_close_min_before_dep: u32,
}

impl ArrivalCurveConfig {
    /// Legacy mode with plausible edited-mode defaults behind it, so a UI can
    /// flip `legacy_mode` off and get a sensible asymmetric curve.
    pub fn legacy_default() -> Self {
        Self {
            legacy_mode: true,
            window_start_min_before_dep: 180,
            peak_min_before_dep: 75,
            left_sigma_min: 45.0,
            right_sigma_min: 20.0,
            late_clamp_enabled: false,
            late_clamp_min_before_dep: 30,
            boarding_close_min_before_dep: DEFAULT_BOARDING_CLOSE_MIN,
        }
    }

    /// Repair the configuration in place so every field is mutually
    /// consistent.  Returns one human-readable note per field changed; an
    /// empty vec means the configuration was already valid.
    pub fn validate_and_clamp(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.left_sigma_min.is_finite() || self.left_sigma_min < 1.0 {
            warnings.push(format!("left sigma {} clamped to 1", self.left_sigma_min));
            self.left_sigma_min = 1.0;
        }
        if !self.right_sigma_min.is_finite() || self.right_sigma_min < 1.0 {
            warnings.push(format!("right sigma {} clamped to 1", self.right_sigma_min));
            self.right_sigma_min = 1.0;
        }

        // The window must hold at least one minute of mass.
        if self.window_start_min_before_dep <= self.boarding_close_min_before_dep {
            let fixed = self.boarding_close_min_before_dep + 1;
            warnings.push(format!(
                "window start {} must precede boarding close {}; moved to {}",
                self.window_start_min_before_dep, self.boarding_close_min_before_dep, fixed
            ));
            self.window_start_min_before_dep = fixed;
        }

        let lo = self.boarding_close_min_before_dep;
        let hi = self.window_start_min_before_dep;

        if self.peak_min_before_dep < lo || self.peak_min_before_dep > hi {
            let fixed = self.peak_min_before_dep.clamp(lo, hi);
            warnings.push(format!(
                "peak {} outside window [{lo}, {hi}]; clamped to {fixed}",
                self.peak_min_before_dep
            ));
            self.peak_min_before_dep = fixed;
        }

        if self.late_clamp_enabled
            && (self.late_clamp_min_before_dep < lo || self.late_clamp_min_before_dep > hi)
        {
            let fixed = self.late_clamp_min_before_dep.clamp(lo, hi);
            warnings.push(format!(
                "late clamp {} outside window [{lo}, {hi}]; clamped to {fixed}",
                self.late_clamp_min_before_dep
            ));
            self.late_clamp_min_before_dep = fixed;
        }

        warnings
    }
}

impl Default for ArrivalCurveConfig {
    fn default() -> Self {
        Self::legacy_default()
    }
}
