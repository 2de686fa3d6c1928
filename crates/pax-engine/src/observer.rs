//! Engine observer trait for progress reporting and data collection.

use crate::history::IntervalRecord;

/// Callbacks invoked by [`Engine::run_all_with`](crate::Engine::run_all_with)
/// at interval boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl EngineObserver for ProgressPrinter {
///     fn on_interval_end(&mut self, interval: u32, record: &IntervalRecord) {
///         println!("interval {interval}: {} arrivals", record.arrivals.total());
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called before each interval is simulated.
    fn on_interval_start(&mut self, _interval: u32) {}

    /// Called after interval `interval` has been simulated, with its freshly
    /// recorded history entry.
    fn on_interval_end(&mut self, _interval: u32, _record: &IntervalRecord) {}

    /// Called once after the final interval completes.
    fn on_run_end(&mut self, _final_interval: u32) {}
}

/// An [`EngineObserver`] that does nothing.  Use when you need a full run but
/// don't want progress callbacks.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
