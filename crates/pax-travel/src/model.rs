//! `TravelModel` — combines an optional provider with legacy fallbacks.

use pax_core::{CounterId, LaneId, RoomId};

use crate::TravelTimeProvider;

/// Default pedestrian walk speed, metres per second.
pub const DEFAULT_WALK_SPEED_MPS: f64 = 1.34;

/// Walk speed is clamped to this range; anything non-finite resets to the
/// default.
const WALK_SPEED_RANGE: (f64, f64) = (0.20, 3.50);

/// Answers the kernel's four travel-leg queries.
///
/// Each leg returns seconds ≥ 1.  With a provider attached its answer wins
/// whenever it is positive; otherwise the legacy delays apply:
///
/// | Leg              | Fallback                                            |
/// |------------------|-----------------------------------------------------|
/// | spawn→ticket     | `transit_delay_minutes × 60`                        |
/// | spawn→checkpoint | `transit_delay_minutes × 60`                        |
/// | ticket→checkpoint| `transit_delay_minutes × 60`                        |
/// | checkpoint→hold  | room walk seconds if positive, else `hold_delay_minutes × 60` |
pub struct TravelModel {
    provider: Option<Box<dyn TravelTimeProvider>>,
    transit_delay_secs: u32,
    hold_delay_secs: u32,
    walk_speed_mps: f64,
}

impl TravelModel {
    /// Build a provider-less model from the legacy delay configuration.
    pub fn new(transit_delay_minutes: u32, hold_delay_minutes: u32) -> Self {
        Self {
            provider: None,
            transit_delay_secs: transit_delay_minutes * 60,
            hold_delay_secs: hold_delay_minutes * 60,
            walk_speed_mps: DEFAULT_WALK_SPEED_MPS,
        }
    }

    /// Attach a provider.  The current walk speed is forwarded immediately so
    /// the provider starts consistent.
    pub fn set_provider(&mut self, mut provider: Box<dyn TravelTimeProvider>) {
        provider.set_walk_speed_mps(self.walk_speed_mps);
        self.provider = Some(provider);
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn walk_speed_mps(&self) -> f64 {
        self.walk_speed_mps
    }

    /// Clamp and store the walk speed, forwarding to the provider if present.
    pub fn set_walk_speed_mps(&mut self, mps: f64) {
        let v = if mps.is_finite() {
            mps.clamp(WALK_SPEED_RANGE.0, WALK_SPEED_RANGE.1)
        } else {
            DEFAULT_WALK_SPEED_MPS
        };
        self.walk_speed_mps = v;
        if let Some(p) = self.provider.as_mut() {
            p.set_walk_speed_mps(v);
        }
    }

    // ── Leg queries ───────────────────────────────────────────────────────

    pub fn spawn_to_ticket(&self, counter: CounterId) -> u32 {
        let provided = self
            .provider
            .as_ref()
            .and_then(|p| p.spawn_to_ticket_secs(counter));
        resolve(provided, self.transit_delay_secs)
    }

    pub fn spawn_to_checkpoint(&self, lane: LaneId) -> u32 {
        let provided = self
            .provider
            .as_ref()
            .and_then(|p| p.spawn_to_checkpoint_secs(lane));
        resolve(provided, self.transit_delay_secs)
    }

    pub fn ticket_to_checkpoint(&self, counter: CounterId, lane: LaneId) -> u32 {
        let provided = self
            .provider
            .as_ref()
            .and_then(|p| p.ticket_to_checkpoint_secs(counter, lane));
        resolve(provided, self.transit_delay_secs)
    }

    /// `room_walk_secs` is the destination room's configured walk time; it
    /// takes precedence over the hold-delay fallback when positive.
    pub fn checkpoint_to_hold(&self, lane: LaneId, room: RoomId, room_walk_secs: u32) -> u32 {
        let provided = self
            .provider
            .as_ref()
            .and_then(|p| p.checkpoint_to_hold_secs(lane, room));
        let fallback = if room_walk_secs > 0 {
            room_walk_secs
        } else {
            self.hold_delay_secs
        };
        resolve(provided, fallback)
    }
}

/// A provider answer of 0 is "unknown" by contract; every resolved leg is at
/// least one second so scheduled arrivals always land strictly after their
/// trigger.
fn resolve(provided: Option<u32>, fallback: u32) -> u32 {
    provided.filter(|&s| s > 0).unwrap_or(fallback).max(1)
}
