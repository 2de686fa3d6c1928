//! Service-station configuration: ticket counters, checkpoint lanes, and
//! hold rooms.
//!
//! All rate setters clamp to valid range (negative or non-finite rates become
//! 0) so the kernel stays total over whatever a configuration UI hands it.

use crate::FlightNumber;

/// Guard against division by a zero rate when deriving service durations.
const EPS_RATE: f64 = 1e-4;

// ── TicketCounterConfig ───────────────────────────────────────────────────────

/// Configuration for a single ticket counter.
///
/// The counter serves at `rate_per_minute` passengers per minute; the engine
/// accrues fractional service per second from this value.  An empty
/// `allowed_flights` set means the counter accepts every flight.
#[derive(Clone, Debug, PartialEq)]
pub struct TicketCounterConfig {
    id: u32,
    rate_per_minute: f64,
    allowed_flights: Vec<FlightNumber>,
}

impl TicketCounterConfig {
    pub fn new(id: u32, rate_per_minute: f64, allowed_flights: Vec<FlightNumber>) -> Self {
        Self {
            id,
            rate_per_minute: clamp_rate(rate_per_minute),
            allowed_flights,
        }
    }

    /// Default: 1 pax/min, accepts all flights.
    pub fn open(id: u32) -> Self {
        Self::new(id, 1.0, Vec::new())
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Passengers served per minute.
    pub fn rate_per_minute(&self) -> f64 {
        self.rate_per_minute
    }

    pub fn set_rate_per_minute(&mut self, rate: f64) {
        self.rate_per_minute = clamp_rate(rate);
    }

    /// Service accrued per simulated second.
    pub fn rate_per_second(&self) -> f64 {
        self.rate_per_minute / 60.0
    }

    /// `true` if no restrictions (empty = all flights).
    pub fn is_all_flights(&self) -> bool {
        self.allowed_flights.is_empty()
    }

    /// Will this counter take passengers for `flight`?
    pub fn accepts(&self, flight: &FlightNumber) -> bool {
        self.is_all_flights() || self.allowed_flights.contains(flight)
    }

    pub fn allowed_flights(&self) -> &[FlightNumber] {
        &self.allowed_flights
    }
}

// ── CheckpointConfig ──────────────────────────────────────────────────────────

/// Configuration for a single checkpoint lane.
///
/// Input is passengers/hour (industry standard).  The engine converts it to a
/// fixed per-passenger service duration; walking time is handled separately
/// by the travel model and is not part of service time.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckpointConfig {
    id: u32,
    rate_per_hour: f64,
}

impl CheckpointConfig {
    pub fn new(id: u32, rate_per_hour: f64) -> Self {
        Self {
            id,
            rate_per_hour: clamp_rate(rate_per_hour),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Passengers per hour for this lane.
    pub fn rate_per_hour(&self) -> f64 {
        self.rate_per_hour
    }

    pub fn set_rate_per_hour(&mut self, rate: f64) {
        self.rate_per_hour = clamp_rate(rate);
    }

    /// Deterministic per-passenger service duration in seconds:
    /// `max(1, round(3600 / rate_per_hour))`.
    ///
    /// A closed lane (rate 0) gets `u32::MAX` — effectively infinite, so the
    /// router never picks it while any open lane exists, and a service that
    /// does start never completes inside the horizon.
    pub fn service_seconds(&self) -> u32 {
        if self.rate_per_hour < EPS_RATE {
            return u32::MAX;
        }
        ((3600.0 / self.rate_per_hour).round() as u32).max(1)
    }
}

// ── HoldRoomConfig ────────────────────────────────────────────────────────────

/// Configuration for a physical hold room.
///
/// An empty `allowed_flights` set means the room admits any flight.  The walk
/// from a checkpoint to this room takes `walk_seconds_from_checkpoint` when
/// positive; otherwise the engine falls back to its hold-delay default.
#[derive(Clone, Debug, PartialEq)]
pub struct HoldRoomConfig {
    id: u32,
    walk_seconds_from_checkpoint: u32,
    allowed_flights: Vec<FlightNumber>,
}

impl HoldRoomConfig {
    pub fn new(id: u32, walk_seconds_from_checkpoint: u32, allowed_flights: Vec<FlightNumber>) -> Self {
        Self {
            id,
            walk_seconds_from_checkpoint,
            allowed_flights,
        }
    }

    /// Default: immediate walk, admits all flights.
    pub fn open(id: u32) -> Self {
        Self::new(id, 0, Vec::new())
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn walk_seconds_from_checkpoint(&self) -> u32 {
        self.walk_seconds_from_checkpoint
    }

    pub fn set_walk_seconds_from_checkpoint(&mut self, secs: u32) {
        self.walk_seconds_from_checkpoint = secs;
    }

    pub fn is_all_flights(&self) -> bool {
        self.allowed_flights.is_empty()
    }

    pub fn accepts(&self, flight: &FlightNumber) -> bool {
        self.is_all_flights() || self.allowed_flights.contains(flight)
    }

    pub fn allowed_flights(&self) -> &[FlightNumber] {
        &self.allowed_flights
    }
}

fn clamp_rate(rate: f64) -> f64 {
    if rate.is_finite() {
        rate.max(0.0)
    } else {
        0.0
    }
}
