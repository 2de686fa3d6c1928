//! The `OutputWriter` trait implemented by all backend writers.

use crate::{FlightSummaryRow, IntervalSummaryRow, OutputResult};

/// Trait implemented by export backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`RecordingObserver::take_error`](crate::RecordingObserver::take_error).
pub trait OutputWriter {
    /// Write one interval summary row.
    fn write_interval_summary(&mut self, row: &IntervalSummaryRow) -> OutputResult<()>;

    /// Write the per-flight run totals (once, at run end).
    fn write_flight_summaries(&mut self, rows: &[FlightSummaryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
