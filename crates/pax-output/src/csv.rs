//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `interval_summaries.csv`
//! - `flight_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{FlightSummaryRow, IntervalSummaryRow, OutputResult};

/// Writes run output to two CSV files.
pub struct CsvWriter {
    intervals: Writer<File>,
    flights: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut intervals = Writer::from_path(dir.join("interval_summaries.csv"))?;
        intervals.write_record([
            "interval",
            "arrivals",
            "enqueued_ticket",
            "ticketed",
            "arrived_checkpoint",
            "passed_checkpoint",
            "ticket_queue_len",
            "checkpoint_queue_len",
            "hold_total",
        ])?;

        let mut flights = Writer::from_path(dir.join("flight_summaries.csv"))?;
        flights.write_record([
            "flight_number",
            "planned",
            "arrivals",
            "ticketed",
            "passed_checkpoint",
        ])?;

        Ok(Self {
            intervals,
            flights,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_interval_summary(&mut self, row: &IntervalSummaryRow) -> OutputResult<()> {
        self.intervals.write_record(&[
            row.interval.to_string(),
            row.arrivals.to_string(),
            row.enqueued_ticket.to_string(),
            row.ticketed.to_string(),
            row.arrived_checkpoint.to_string(),
            row.passed_checkpoint.to_string(),
            row.ticket_queue_len.to_string(),
            row.checkpoint_queue_len.to_string(),
            row.hold_total.to_string(),
        ])?;
        Ok(())
    }

    fn write_flight_summaries(&mut self, rows: &[FlightSummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.flights.write_record(&[
                row.flight_number.clone(),
                row.planned.to_string(),
                row.arrivals.to_string(),
                row.ticketed.to_string(),
                row.passed_checkpoint.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.intervals.flush()?;
        self.flights.flush()?;
        Ok(())
    }
}
