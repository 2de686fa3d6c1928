//! `RecordingObserver<W>` — bridges `EngineObserver` to an `OutputWriter`.

use pax_engine::{EngineObserver, IntervalRecord};
use pax_model::Flight;

use crate::row::{FlightSummaryRow, IntervalSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// An [`EngineObserver`] that writes one summary row per interval and the
/// per-flight run totals at run end.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the run completes, check for errors with
/// [`take_error`][Self::take_error].
pub struct RecordingObserver<W: OutputWriter> {
    writer: W,
    /// `(number, planned)` per flight, roster order.
    flights: Vec<(String, u32)>,
    // Cumulative per-flight tallies, roster order.
    arrivals: Vec<u32>,
    ticketed: Vec<u32>,
    passed: Vec<u32>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RecordingObserver<W> {
    /// Create an observer backed by `writer` for the given roster.
    pub fn new(writer: W, flights: &[Flight]) -> Self {
        let count = flights.len();
        Self {
            writer,
            flights: flights
                .iter()
                .map(|f| (f.number().as_str().to_owned(), f.planned_passengers()))
                .collect(),
            arrivals: vec![0; count],
            ticketed: vec![0; count],
            passed: vec![0; count],
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> EngineObserver for RecordingObserver<W> {
    fn on_interval_end(&mut self, interval: u32, record: &IntervalRecord) {
        for (flight, n) in record.arrivals.iter() {
            self.arrivals[flight.index()] += n;
        }
        for (flight, n) in record.ticketed.iter() {
            self.ticketed[flight.index()] += n;
        }
        for (flight, n) in record.passed_checkpoint.iter() {
            self.passed[flight.index()] += n;
        }

        let row = IntervalSummaryRow {
            interval,
            arrivals: record.arrivals.total(),
            enqueued_ticket: record.enqueued_ticket.total(),
            ticketed: record.ticketed.total(),
            arrived_checkpoint: record.arrived_checkpoint.total(),
            passed_checkpoint: record.passed_checkpoint.total(),
            ticket_queue_len: record.ticket_queue_len,
            checkpoint_queue_len: record.checkpoint_queue_len,
            hold_total: record.hold_rooms.iter().map(|r| r.len() as u32).sum(),
        };
        let result = self.writer.write_interval_summary(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _final_interval: u32) {
        let rows: Vec<FlightSummaryRow> = self
            .flights
            .iter()
            .enumerate()
            .map(|(i, (number, planned))| FlightSummaryRow {
                flight_number: number.clone(),
                planned: *planned,
                arrivals: self.arrivals[i],
                ticketed: self.ticketed[i],
                passed_checkpoint: self.passed[i],
            })
            .collect();

        let result = self.writer.write_flight_summaries(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
