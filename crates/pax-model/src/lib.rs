//! `pax-model` — the data model of the departure pipeline.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`flight`]    | `Flight`, `FlightNumber`, `ShapeTag`                         |
//! | [`passenger`] | `Passenger` record and the append-only `PassengerArena`      |
//! | [`station`]   | `TicketCounterConfig`, `CheckpointConfig`, `HoldRoomConfig`  |
//! | [`curve`]     | `ArrivalCurveConfig` (legacy / edited split-Gaussian knobs)  |
//! | [`loader`]    | CSV flight-roster loader                                     |
//! | [`error`]     | `ModelError`, `ModelResult`                                  |
//!
//! # Design notes
//!
//! Passengers are owned by a single [`PassengerArena`] for the lifetime of a
//! run.  Queues, staging lines, pending buckets, hold rooms, and historical
//! snapshots all store [`PassengerId`](pax_core::PassengerId) values, never
//! passenger data — identity stays stable even after a passenger has been
//! purged from every live structure, so old snapshots remain readable.

pub mod curve;
pub mod error;
pub mod flight;
pub mod loader;
pub mod passenger;
pub mod station;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use curve::{ArrivalCurveConfig, DEFAULT_BOARDING_CLOSE_MIN};
pub use error::{ModelError, ModelResult};
pub use flight::{Flight, FlightNumber, ShapeTag};
pub use loader::{load_flights_csv, load_flights_reader};
pub use passenger::{Passenger, PassengerArena};
pub use station::{CheckpointConfig, HoldRoomConfig, TicketCounterConfig};
