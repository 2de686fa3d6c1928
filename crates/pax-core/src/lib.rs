//! `pax-core` — foundational types for the `paxflow` departure-pipeline kernel.
//!
//! This crate is a dependency of every other `pax-*` crate.  It intentionally
//! has no `pax-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`ids`]   | `PassengerId`, `FlightId`, `CounterId`, `LaneId`, `RoomId`|
//! | [`time`]  | `AbsSec`, `TimeOfDay`, `Horizon`                          |
//! | [`rng`]   | `SimRng` (seedable kernel RNG)                            |
//! | [`error`] | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{CounterId, FlightId, LaneId, PassengerId, RoomId};
pub use rng::SimRng;
pub use time::{AbsSec, Horizon, TimeOfDay};
