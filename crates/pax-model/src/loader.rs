//! CSV flight-roster loader.
//!
//! # CSV format
//!
//! One row per flight:
//!
//! ```csv
//! flight_number,departure,seats,fill_percent,shape
//! UA101,10:00,180,0.85,circle
//! DL202,10:30,120,0.90,square
//! ```
//!
//! - `departure` is `HH:MM` (time of day).
//! - `fill_percent` is clamped to `[0, 1]` at construction.
//! - `shape` is one of `circle | triangle | square | diamond | star |
//!   hexagon`; empty means `circle`.
//!
//! Duplicate flight numbers (case-insensitive) are rejected — the kernel
//! keys per-flight state by normalized number.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use pax_core::TimeOfDay;

use crate::flight::{Flight, FlightNumber, ShapeTag};
use crate::{ModelError, ModelResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RosterRecord {
    flight_number: String,
    departure: String,
    seats: u32,
    fill_percent: f64,
    #[serde(default)]
    shape: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a flight roster from a CSV file.
pub fn load_flights_csv(path: &Path) -> ModelResult<Vec<Flight>> {
    let file = std::fs::File::open(path).map_err(ModelError::Io)?;
    load_flights_reader(file)
}

/// Like [`load_flights_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded rosters.
pub fn load_flights_reader<R: Read>(reader: R) -> ModelResult<Vec<Flight>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut flights: Vec<Flight> = Vec::new();

    for result in csv_reader.deserialize::<RosterRecord>() {
        let row = result.map_err(|e| ModelError::Parse(e.to_string()))?;

        let number = FlightNumber::new(&row.flight_number)?;
        if flights.iter().any(|f| *f.number() == number) {
            return Err(ModelError::DuplicateFlight(number.as_str().to_owned()));
        }

        let departure = TimeOfDay::parse(&row.departure)?;
        let shape = ShapeTag::parse(&row.shape)?;

        flights.push(Flight::new(number, departure, row.seats, row.fill_percent, shape));
    }

    Ok(flights)
}
