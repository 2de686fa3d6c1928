//! Backlog-minimizing checkpoint lane choice.

use pax_model::{CheckpointConfig, PassengerArena};

use crate::lanes::CheckpointLane;

/// Pick the checkpoint lane with the smallest **time backlog** at `abs_sec`:
///
/// ```text
/// backlog(c) = remaining_service(c) + live_queue(c) × service_seconds(c)
/// ```
///
/// where `remaining_service` is the time left on the passenger currently in
/// the scanner and `live_queue` counts waiting passengers not marked missed.
/// Ties break to the smaller live queue, then the lower lane index.  A closed
/// lane (rate 0) carries an effectively infinite per-passenger duration, so
/// it loses to any open lane.
///
/// `lanes` must be non-empty (the engine guarantees at least one checkpoint).
pub fn pick_checkpoint_lane(
    lanes: &[CheckpointLane],
    configs: &[CheckpointConfig],
    arena: &PassengerArena,
    abs_sec: u32,
) -> usize {
    let mut best = 0usize;
    let mut best_load = u64::MAX;
    let mut best_queue = usize::MAX;

    for (c, lane) in lanes.iter().enumerate() {
        let svc = configs[c].service_seconds() as u64;
        let remaining = lane.service_end_abs.saturating_sub(abs_sec) as u64;
        let queued = lane.live_queue_len(arena);
        let load = remaining.saturating_add(queued as u64 * svc);

        if load < best_load || (load == best_load && queued < best_queue) {
            best = c;
            best_load = load;
            best_queue = queued;
        }
    }

    best
}
