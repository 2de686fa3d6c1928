//! `pax-travel` — walking-time model between pipeline nodes.
//!
//! # Crate layout
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`provider`] | `TravelTimeProvider` trait (the floor-plan seam)    |
//! | [`model`]    | `TravelModel` — provider + legacy fallbacks         |
//!
//! # Design notes
//!
//! The kernel asks for four walking legs (spawn→ticket, spawn→checkpoint,
//! ticket→checkpoint, checkpoint→hold) in integer seconds.  A geometric
//! floor-plan engine can answer precisely by implementing
//! [`TravelTimeProvider`]; without one, the [`TravelModel`] substitutes the
//! configured legacy delays.  Service time at stations is *never* part of a
//! travel leg.

pub mod model;
pub mod provider;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use model::TravelModel;
pub use provider::TravelTimeProvider;
