//! `pax-output` — file export for simulation runs.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`row`]      | Plain data rows written by backends                     |
//! | [`writer`]   | The `OutputWriter` trait                                |
//! | [`csv`]      | CSV backend (`interval_summaries.csv`, `flight_summaries.csv`) |
//! | [`observer`] | `RecordingObserver` — bridges `EngineObserver` to a writer |
//! | [`error`]    | `OutputError`, `OutputResult`                           |
//!
//! The kernel itself persists nothing (snapshots are in-memory); this crate
//! is a read-side consumer that records interval summaries as a run executes.

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RecordingObserver;
pub use row::{FlightSummaryRow, IntervalSummaryRow};
pub use writer::OutputWriter;
