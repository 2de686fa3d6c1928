//! Simulation time model.
//!
//! # Design
//!
//! The canonical time unit is the **absolute second** since horizon start,
//! wrapped in [`AbsSec`].  Horizon start (absolute second 0) is the earliest
//! flight departure minus the arrival span.  Minute indices are always
//! `abs_sec / 60` — there is no separate minute clock to drift against.
//!
//! Flight schedules are expressed as time-of-day ([`TimeOfDay`], minutes
//! since midnight).  [`Horizon`] anchors time-of-day values onto the absolute
//! axis; because the anchor can sit before midnight arithmetic is done in
//! signed minutes, never wrapped.
//!
//! Using integer seconds as the canonical unit means all schedule arithmetic
//! is exact (no floating-point drift) and comparisons are O(1).

use std::fmt;

use crate::{CoreError, CoreResult};

// ── AbsSec ────────────────────────────────────────────────────────────────────

/// An absolute second since horizon start.
///
/// Stored as `u32`: at 1-second resolution a u32 spans ~136 years of horizon,
/// far beyond any roster's departure window.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbsSec(pub u32);

impl AbsSec {
    pub const ZERO: AbsSec = AbsSec(0);

    /// Minute index containing this second (`abs / 60`).
    #[inline]
    pub fn minute_idx(self) -> u32 {
        self.0 / 60
    }

    /// Second-of-minute component (`abs % 60`).
    #[inline]
    pub fn second_of_minute(self) -> u32 {
        self.0 % 60
    }

    /// The second `n` ticks after `self`, saturating at the type's maximum.
    #[inline]
    pub fn offset(self, n: u32) -> AbsSec {
        AbsSec(self.0.saturating_add(n))
    }

    /// Seconds elapsed from `earlier` to `self`, or 0 if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: AbsSec) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u32> for AbsSec {
    type Output = AbsSec;
    #[inline]
    fn add(self, rhs: u32) -> AbsSec {
        AbsSec(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for AbsSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

// ── TimeOfDay ─────────────────────────────────────────────────────────────────

/// A clock time expressed as minutes since midnight.
///
/// Parsed from `HH:MM`.  Values are clamped to `[0, 1439]` at construction so
/// roster typos cannot push a departure outside the day.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Construct from minutes since midnight, clamped to one day.
    pub fn from_minutes(minutes: u32) -> Self {
        TimeOfDay(minutes.min(24 * 60 - 1))
    }

    /// Construct from an hour/minute pair, each clamped to valid range.
    pub fn from_hm(hour: u32, minute: u32) -> Self {
        TimeOfDay::from_minutes(hour.min(23) * 60 + minute.min(59))
    }

    /// Parse `HH:MM` (leading zeros optional).
    pub fn parse(s: &str) -> CoreResult<Self> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| CoreError::Parse(format!("invalid time {s:?}: expected HH:MM")))?;
        let hour: u32 = h
            .parse()
            .map_err(|_| CoreError::Parse(format!("invalid hour in {s:?}")))?;
        let minute: u32 = m
            .parse()
            .map_err(|_| CoreError::Parse(format!("invalid minute in {s:?}")))?;
        if hour > 23 || minute > 59 {
            return Err(CoreError::Parse(format!("time {s:?} out of range")));
        }
        Ok(TimeOfDay(hour * 60 + minute))
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

// ── Horizon ───────────────────────────────────────────────────────────────────

/// Anchors time-of-day values onto the absolute simulation axis and fixes the
/// engine-step geometry for a run.
///
/// `Horizon` is cheap to copy and intentionally holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Horizon {
    /// Minutes since midnight of absolute second 0.  Signed: the earliest
    /// departure minus the arrival span may land before midnight.
    start_min: i64,
    /// Engine step length in minutes (≥ 1).
    interval_minutes: u32,
    /// Total number of engine intervals in the run.
    total_intervals: u32,
}

impl Horizon {
    /// `start_min` is the (signed) minutes-since-midnight of horizon start;
    /// `interval_minutes` is clamped to ≥ 1.
    pub fn new(start_min: i64, interval_minutes: u32, total_intervals: u32) -> Self {
        Self {
            start_min,
            interval_minutes: interval_minutes.max(1),
            total_intervals,
        }
    }

    /// Engine step length in minutes.
    #[inline]
    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    /// Engine step length in seconds.
    #[inline]
    pub fn interval_seconds(&self) -> u32 {
        self.interval_minutes * 60
    }

    /// Total engine intervals in the run.
    #[inline]
    pub fn total_intervals(&self) -> u32 {
        self.total_intervals
    }

    /// Signed minutes from horizon start to the given clock time.
    #[inline]
    pub fn minutes_from_start(&self, t: TimeOfDay) -> i64 {
        t.minutes() as i64 - self.start_min
    }

    /// Signed minutes from horizon start to `offset_min` minutes *before* the
    /// given clock time.
    #[inline]
    pub fn minutes_from_start_before(&self, t: TimeOfDay, offset_min: u32) -> i64 {
        self.minutes_from_start(t) - offset_min as i64
    }

    /// Absolute second of an event `minutes` from horizon start, or `None` if
    /// the event falls before the horizon.
    #[inline]
    pub fn abs_sec_at_minute(&self, minutes: i64) -> Option<AbsSec> {
        u32::try_from(minutes * 60).ok().map(AbsSec)
    }

    /// First absolute second of interval `k`.
    #[inline]
    pub fn interval_start(&self, k: u32) -> AbsSec {
        AbsSec(k * self.interval_seconds())
    }
}
