//! Run-level engine configuration.

use pax_model::DEFAULT_BOARDING_CLOSE_MIN;

/// Top-level engine knobs.
///
/// Construction never fails: [`validate_and_clamp`](EngineConfig::validate_and_clamp)
/// repairs out-of-range values and reports what it changed.  The builder runs
/// it automatically and exposes the notes via
/// [`Engine::config_warnings`](crate::Engine::config_warnings).
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Fraction of each spawn batch that bought tickets in person, `[0, 1]`.
    pub percent_in_person: f64,

    /// Width of each flight's arrival window, minutes before departure.
    pub arrival_span_minutes: u32,

    /// Engine step length in minutes (≥ 1).
    pub interval_minutes: u32,

    /// Legacy walking delay for spawn→ticket, spawn→checkpoint, and
    /// ticket→checkpoint legs when no travel provider answers.
    pub transit_delay_minutes: u32,

    /// Legacy walking delay for checkpoint→hold when the destination room
    /// has no configured walk time.
    pub hold_delay_minutes: u32,

    /// Minutes before departure at which boarding closes.
    pub boarding_close_minutes: u32,

    /// Seed for hold-room tie-breaks and spawn jitter.
    pub seed: u64,

    /// Spread each spawn across its minute with a 0–59 s jitter draw.
    pub jitter_enabled: bool,
}

impl EngineConfig {
    /// Repair out-of-range fields in place; returns one note per change.
    pub fn validate_and_clamp(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.percent_in_person.is_finite() {
            warnings.push("percent_in_person not finite; reset to 0".into());
            self.percent_in_person = 0.0;
        } else if !(0.0..=1.0).contains(&self.percent_in_person) {
            let fixed = self.percent_in_person.clamp(0.0, 1.0);
            warnings.push(format!(
                "percent_in_person {} clamped to {fixed}",
                self.percent_in_person
            ));
            self.percent_in_person = fixed;
        }

        if self.interval_minutes < 1 {
            warnings.push("interval_minutes < 1; raised to 1".into());
            self.interval_minutes = 1;
        }

        warnings
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            percent_in_person: 0.5,
            arrival_span_minutes: 120,
            interval_minutes: 1,
            transit_delay_minutes: 1,
            hold_delay_minutes: 1,
            boarding_close_minutes: DEFAULT_BOARDING_CLOSE_MIN,
            seed: 0,
            jitter_enabled: true,
        }
    }
}
