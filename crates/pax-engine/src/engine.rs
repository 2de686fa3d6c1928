//! The `Engine` struct, its builder, and the control + read API.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use pax_arrivals::ArrivalTable;
use pax_core::{AbsSec, FlightId, Horizon, PassengerId, RoomId, SimRng, TimeOfDay};
use pax_model::{
    ArrivalCurveConfig, CheckpointConfig, Flight, FlightNumber, HoldRoomConfig, Passenger,
    PassengerArena, TicketCounterConfig,
};
use pax_travel::{TravelModel, TravelTimeProvider};

use crate::config::EngineConfig;
use crate::due::DueQueue;
use crate::history::History;
use crate::lanes::{CheckpointLane, HoldRoom, TicketLane};
use crate::observer::{EngineObserver, NoopObserver};
use crate::snapshot::EngineSnapshot;
use crate::stamps::StampTable;

// ── Engine ────────────────────────────────────────────────────────────────────

/// The departure-pipeline kernel.
///
/// Owns every passenger, queue, stamp, and snapshot for one run.  External
/// readers observe only through the read API; all mutation happens inside
/// [`simulate_interval`](crate::step) driven by the control API below.
pub struct Engine {
    // ── Fixed setup ───────────────────────────────────────────────────────
    pub(crate) config: EngineConfig,
    pub(crate) config_warnings: Vec<String>,
    pub(crate) flights: Vec<Flight>,
    pub(crate) counters: Vec<TicketCounterConfig>,
    pub(crate) checkpoints: Vec<CheckpointConfig>,
    pub(crate) room_configs: Vec<HoldRoomConfig>,
    /// Hold room pre-assigned to each flight, roster order.
    pub(crate) chosen_room: Vec<RoomId>,
    pub(crate) horizon: Horizon,
    pub(crate) curve: ArrivalCurveConfig,
    pub(crate) arrival_table: ArrivalTable,
    pub(crate) travel: TravelModel,
    pub(crate) rng: SimRng,

    // ── Live state ────────────────────────────────────────────────────────
    pub(crate) arena: PassengerArena,
    pub(crate) ticket_lanes: Vec<TicketLane>,
    pub(crate) checkpoint_lanes: Vec<CheckpointLane>,
    pub(crate) hold_rooms: Vec<HoldRoom>,
    pub(crate) pending_to_ticket: DueQueue,
    pub(crate) pending_to_checkpoint: DueQueue,
    pub(crate) pending_to_hold: DueQueue,
    /// Ticket lane a spawned in-person passenger is walking toward.
    pub(crate) target_ticket_lane: HashMap<PassengerId, usize>,
    /// Checkpoint lane hint; re-evaluated when the passenger arrives.
    pub(crate) target_checkpoint_lane: HashMap<PassengerId, usize>,
    pub(crate) stamps: StampTable,
    pub(crate) just_closed: Vec<FlightId>,
    pub(crate) current_interval: u32,

    // ── Interval series (snapshotted) ─────────────────────────────────────
    pub(crate) held_ups_by_interval: BTreeMap<u32, u32>,
    pub(crate) ticket_queued_by_interval: BTreeMap<u32, u32>,
    pub(crate) checkpoint_queued_by_interval: BTreeMap<u32, u32>,
    pub(crate) hold_total_by_interval: BTreeMap<u32, u32>,

    // ── First-computation log (not snapshotted) ───────────────────────────
    pub(crate) history: History,

    // ── Rewind support ────────────────────────────────────────────────────
    pub(crate) snapshots: Vec<EngineSnapshot>,
    pub(crate) max_computed_interval: u32,
}

// ── EngineBuilder ─────────────────────────────────────────────────────────────

/// Fluent builder for [`Engine`].
///
/// Construction is total: missing station lists fall back to workable
/// defaults (a single closed checkpoint, one hold room per flight) and
/// out-of-range knobs are clamped, with every repair reported through
/// [`Engine::config_warnings`].
///
/// # Example
///
/// ```rust,ignore
/// let engine = EngineBuilder::new(config, flights)
///     .counters(counters)
///     .checkpoints(checkpoints)
///     .hold_rooms(rooms)
///     .build();
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    flights: Vec<Flight>,
    counters: Vec<TicketCounterConfig>,
    checkpoints: Vec<CheckpointConfig>,
    hold_rooms: Vec<HoldRoomConfig>,
    curve: Option<ArrivalCurveConfig>,
    provider: Option<Box<dyn TravelTimeProvider>>,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig, flights: Vec<Flight>) -> Self {
        Self {
            config,
            flights,
            counters: Vec::new(),
            checkpoints: Vec::new(),
            hold_rooms: Vec::new(),
            curve: None,
            provider: None,
        }
    }

    /// Ticket counters.  An empty list is allowed: every spawn then routes
    /// through the online channel.
    pub fn counters(mut self, counters: Vec<TicketCounterConfig>) -> Self {
        self.counters = counters;
        self
    }

    /// Checkpoint lanes.  An empty list is replaced by a single closed lane.
    pub fn checkpoints(mut self, checkpoints: Vec<CheckpointConfig>) -> Self {
        self.checkpoints = checkpoints;
        self
    }

    /// Hold rooms.  An empty list is replaced by one room per flight
    /// (restricted to that flight) using the hold-delay walk time.
    pub fn hold_rooms(mut self, hold_rooms: Vec<HoldRoomConfig>) -> Self {
        self.hold_rooms = hold_rooms;
        self
    }

    /// Arrival-curve configuration; defaults to the legacy curve.
    pub fn arrival_curve(mut self, curve: ArrivalCurveConfig) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Attach a floor-plan travel-time provider.
    pub fn travel_provider(mut self, provider: Box<dyn TravelTimeProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Resolve defaults, pre-assign hold rooms, build the arrival table, and
    /// capture the initial snapshot.
    pub fn build(self) -> Engine {
        let mut config = self.config;
        let mut config_warnings = config.validate_and_clamp();

        let flights = self.flights;
        let counters = self.counters;

        let checkpoints = if self.checkpoints.is_empty() {
            vec![CheckpointConfig::new(1, 0.0)]
        } else {
            self.checkpoints
        };

        let room_configs = if !self.hold_rooms.is_empty() {
            self.hold_rooms
        } else {
            default_hold_rooms(&flights, config.hold_delay_minutes)
        };

        // ── Horizon ───────────────────────────────────────────────────────
        let earliest = flights
            .iter()
            .map(|f| f.departure())
            .min()
            .unwrap_or(TimeOfDay::MIDNIGHT);
        let start_min = earliest.minutes() as i64 - config.arrival_span_minutes as i64;

        let max_departure_min = flights
            .iter()
            .map(|f| f.departure().minutes() as i64 - start_min)
            .max()
            .unwrap_or(0)
            .max(0);
        let total_intervals = (max_departure_min / config.interval_minutes as i64) as u32 + 1;

        let horizon = Horizon::new(start_min, config.interval_minutes, total_intervals);

        // ── Hold-room pre-assignment (first RNG draws of the run) ─────────
        let mut rng = SimRng::new(config.seed);
        let chosen_room = choose_hold_rooms(&flights, &room_configs, &mut rng);

        // ── Arrival table ─────────────────────────────────────────────────
        let mut curve = self.curve.unwrap_or_else(ArrivalCurveConfig::legacy_default);
        curve.boarding_close_min_before_dep = config.boarding_close_minutes;
        config_warnings.extend(curve.validate_and_clamp());
        let arrival_table = ArrivalTable::build(&flights, &curve, config.arrival_span_minutes);

        // ── Travel model ──────────────────────────────────────────────────
        let mut travel = TravelModel::new(config.transit_delay_minutes, config.hold_delay_minutes);
        if let Some(provider) = self.provider {
            travel.set_provider(provider);
        }

        let mut engine = Engine {
            ticket_lanes: vec![TicketLane::default(); counters.len()],
            checkpoint_lanes: vec![CheckpointLane::default(); checkpoints.len()],
            hold_rooms: vec![HoldRoom::default(); room_configs.len()],
            config,
            config_warnings,
            flights,
            counters,
            checkpoints,
            room_configs,
            chosen_room,
            horizon,
            curve,
            arrival_table,
            travel,
            rng,
            arena: PassengerArena::new(),
            pending_to_ticket: DueQueue::new(),
            pending_to_checkpoint: DueQueue::new(),
            pending_to_hold: DueQueue::new(),
            target_ticket_lane: HashMap::new(),
            target_checkpoint_lane: HashMap::new(),
            stamps: StampTable::new(),
            just_closed: Vec::new(),
            current_interval: 0,
            held_ups_by_interval: BTreeMap::new(),
            ticket_queued_by_interval: BTreeMap::new(),
            checkpoint_queued_by_interval: BTreeMap::new(),
            hold_total_by_interval: BTreeMap::new(),
            history: History::new(),
            snapshots: Vec::new(),
            max_computed_interval: 0,
        };

        engine.capture_initial_snapshot();
        debug!(
            flights = engine.flights.len(),
            total_intervals = engine.horizon.total_intervals(),
            "engine built"
        );
        engine
    }
}

/// One room per flight, restricted to that flight; a single open room if the
/// roster is empty.
fn default_hold_rooms(flights: &[Flight], hold_delay_minutes: u32) -> Vec<HoldRoomConfig> {
    let walk_secs = hold_delay_minutes * 60;
    if flights.is_empty() {
        return vec![HoldRoomConfig::new(1, walk_secs, Vec::new())];
    }
    flights
        .iter()
        .enumerate()
        .map(|(i, f)| HoldRoomConfig::new(i as u32 + 1, walk_secs, vec![f.number().clone()]))
        .collect()
}

/// Pre-assign each flight to one hold room: minimal walk seconds among
/// accepting rooms, ties broken by a seeded draw; else any room that accepts
/// all; else room 0.
fn choose_hold_rooms(
    flights: &[Flight],
    rooms: &[HoldRoomConfig],
    rng: &mut SimRng,
) -> Vec<RoomId> {
    let room_count = rooms.len();
    flights
        .iter()
        .map(|f| {
            let mut candidates: Vec<usize> = Vec::new();
            let mut best_seconds = u32::MAX;
            for (r, cfg) in rooms.iter().enumerate() {
                if !cfg.accepts(f.number()) {
                    continue;
                }
                let ws = cfg.walk_seconds_from_checkpoint();
                match ws.cmp(&best_seconds) {
                    std::cmp::Ordering::Less => {
                        best_seconds = ws;
                        candidates.clear();
                        candidates.push(r);
                    }
                    std::cmp::Ordering::Equal => candidates.push(r),
                    std::cmp::Ordering::Greater => {}
                }
            }

            let chosen = if let Some(&r) = rng.choose(&candidates) {
                r
            } else {
                rooms
                    .iter()
                    .position(|cfg| cfg.is_all_flights())
                    .unwrap_or(0)
            };

            RoomId(chosen.min(room_count.saturating_sub(1)) as u16)
        })
        .collect()
}

// ── Control API ───────────────────────────────────────────────────────────────

impl Engine {
    /// Advance by one interval: restore the next snapshot if it already
    /// exists, otherwise simulate it.  A no-op at the end of the horizon.
    pub fn compute_next_interval(&mut self) {
        if self.current_interval >= self.horizon.total_intervals() {
            return;
        }
        if self.current_interval + 1 <= self.max_computed_interval {
            self.restore_snapshot(self.current_interval + 1);
            return;
        }
        self.simulate_interval();
    }

    /// Reset to the initial state, drop all history, and simulate every
    /// interval to the end of the horizon.
    pub fn run_all_intervals(&mut self) {
        self.run_all_with(&mut NoopObserver);
    }

    /// [`run_all_intervals`](Self::run_all_intervals) with observer callbacks
    /// at every interval boundary.
    pub fn run_all_with<O: EngineObserver>(&mut self, observer: &mut O) {
        self.reset_live_state();
        self.capture_initial_snapshot();

        while self.current_interval < self.horizon.total_intervals() {
            let interval = self.current_interval;
            observer.on_interval_start(interval);
            self.simulate_interval();
            if let Some(record) = self.history.get(interval) {
                observer.on_interval_end(interval, record);
            }
        }
        observer.on_run_end(self.current_interval);
    }

    /// Jump to snapshot `k` (clamped to the computed range), restoring state
    /// in place.
    pub fn go_to_interval(&mut self, k: u32) {
        self.restore_snapshot(k);
    }

    pub fn rewind_one_interval(&mut self) {
        if self.can_rewind() {
            self.restore_snapshot(self.current_interval - 1);
        }
    }

    /// Step forward: restore the next snapshot if available, else compute it.
    pub fn fast_forward_one_interval(&mut self) {
        if self.can_fast_forward() {
            self.restore_snapshot(self.current_interval + 1);
        } else {
            self.compute_next_interval();
        }
    }

    pub fn can_rewind(&self) -> bool {
        self.current_interval > 0
    }

    pub fn can_fast_forward(&self) -> bool {
        self.current_interval < self.max_computed_interval
    }

    pub fn current_interval(&self) -> u32 {
        self.current_interval
    }

    pub fn max_computed_interval(&self) -> u32 {
        self.max_computed_interval
    }

    pub fn total_intervals(&self) -> u32 {
        self.horizon.total_intervals()
    }

    /// Clear every live container and series back to the pre-run state.
    /// Passenger records stay in the arena — ids are never reused, so stale
    /// snapshots from a previous run can no longer alias new passengers.
    fn reset_live_state(&mut self) {
        self.current_interval = 0;
        self.history.clear();

        self.held_ups_by_interval.clear();
        self.ticket_queued_by_interval.clear();
        self.checkpoint_queued_by_interval.clear();
        self.hold_total_by_interval.clear();

        self.just_closed.clear();
        self.target_ticket_lane.clear();
        self.target_checkpoint_lane.clear();
        self.stamps.clear();

        for lane in &mut self.ticket_lanes {
            lane.queue.clear();
            lane.staging.clear();
            lane.debt = 0.0;
            lane.serving = None;
        }
        for lane in &mut self.checkpoint_lanes {
            lane.queue.clear();
            lane.staging.clear();
            lane.serving = None;
            lane.service_end_abs = 0;
        }
        for room in &mut self.hold_rooms {
            room.occupants.clear();
        }

        self.pending_to_ticket.clear();
        self.pending_to_checkpoint.clear();
        self.pending_to_hold.clear();
    }
}

// ── Read API ──────────────────────────────────────────────────────────────────

impl Engine {
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Notes produced while clamping the configuration at build time.
    pub fn config_warnings(&self) -> &[String] {
        &self.config_warnings
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn flight(&self, id: FlightId) -> &Flight {
        &self.flights[id.index()]
    }

    /// Look a flight up by (case-insensitive) number.
    pub fn flight_id(&self, number: &FlightNumber) -> Option<FlightId> {
        self.flights
            .iter()
            .position(|f| f.number() == number)
            .map(|i| FlightId(i as u16))
    }

    pub fn horizon(&self) -> &Horizon {
        &self.horizon
    }

    pub fn interval_minutes(&self) -> u32 {
        self.horizon.interval_minutes()
    }

    pub fn interval_seconds(&self) -> u32 {
        self.horizon.interval_seconds()
    }

    pub fn num_ticket_counters(&self) -> usize {
        self.counters.len()
    }

    pub fn num_checkpoints(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn counter_configs(&self) -> &[TicketCounterConfig] {
        &self.counters
    }

    pub fn checkpoint_configs(&self) -> &[CheckpointConfig] {
        &self.checkpoints
    }

    pub fn hold_room_configs(&self) -> &[HoldRoomConfig] {
        &self.room_configs
    }

    // ── Schedule queries ──────────────────────────────────────────────────

    /// Signed minutes from horizon start to the first minute of the flight's
    /// arrival window.
    pub fn spawn_offset_min(&self, id: FlightId) -> i64 {
        self.horizon
            .minutes_from_start_before(self.flight(id).departure(), self.config.arrival_span_minutes)
    }

    pub(crate) fn boarding_close_min(&self, id: FlightId) -> i64 {
        self.horizon
            .minutes_from_start_before(self.flight(id).departure(), self.config.boarding_close_minutes)
    }

    pub(crate) fn departure_min(&self, id: FlightId) -> i64 {
        self.horizon.minutes_from_start(self.flight(id).departure())
    }

    /// Absolute second at which boarding closes, or `None` if that moment
    /// precedes the horizon (the flight then closes before the run begins).
    pub fn boarding_close_abs(&self, id: FlightId) -> Option<AbsSec> {
        self.horizon.abs_sec_at_minute(self.boarding_close_min(id))
    }

    pub fn departure_abs(&self, id: FlightId) -> Option<AbsSec> {
        self.horizon.abs_sec_at_minute(self.departure_min(id))
    }

    /// The hold room pre-assigned to this flight at construction.
    pub fn chosen_room(&self, id: FlightId) -> RoomId {
        self.chosen_room
            .get(id.index())
            .copied()
            .unwrap_or(RoomId(0))
    }

    // ── Arrival-table queries ─────────────────────────────────────────────

    pub fn arrival_table(&self) -> &ArrivalTable {
        &self.arrival_table
    }

    pub fn arrival_curve_config(&self) -> &ArrivalCurveConfig {
        &self.curve
    }

    /// Replace the arrival-curve configuration and rebuild the whole table.
    /// The curve's boarding-close is forced to the engine's constant so the
    /// two can never disagree.
    pub fn set_arrival_curve_config(&mut self, cfg: ArrivalCurveConfig) -> Vec<String> {
        let mut curve = cfg;
        curve.boarding_close_min_before_dep = self.config.boarding_close_minutes;
        let warnings = curve.validate_and_clamp();
        self.curve = curve;
        self.arrival_table =
            ArrivalTable::build(&self.flights, &self.curve, self.config.arrival_span_minutes);
        warnings
    }

    /// Total arrivals across all flights at one absolute minute.
    pub fn total_arrivals_at_minute(&self, minute_since_start: i64) -> u32 {
        (0..self.flights.len() as u16)
            .map(FlightId)
            .map(|id| {
                let idx = minute_since_start - self.spawn_offset_min(id);
                self.arrival_table.count_at(id, idx)
            })
            .sum()
    }

    /// Total arrivals across all flights in the first minute of interval `k`.
    pub fn total_arrivals_at_interval(&self, k: u32) -> u32 {
        self.total_arrivals_at_minute((k * self.horizon.interval_minutes()) as i64)
    }

    // ── Travel ────────────────────────────────────────────────────────────

    pub fn travel(&self) -> &TravelModel {
        &self.travel
    }

    pub fn set_travel_provider(&mut self, provider: Box<dyn TravelTimeProvider>) {
        self.travel.set_provider(provider);
    }

    pub fn walk_speed_mps(&self) -> f64 {
        self.travel.walk_speed_mps()
    }

    pub fn set_walk_speed_mps(&mut self, mps: f64) {
        self.travel.set_walk_speed_mps(mps);
    }

    // ── Live-state views ──────────────────────────────────────────────────

    pub fn ticket_lanes(&self) -> &[TicketLane] {
        &self.ticket_lanes
    }

    pub fn checkpoint_lanes(&self) -> &[CheckpointLane] {
        &self.checkpoint_lanes
    }

    pub fn hold_rooms(&self) -> &[HoldRoom] {
        &self.hold_rooms
    }

    /// Per-lane absolute completion seconds (0 = idle), for diagnostics.
    pub fn checkpoint_service_end_abs(&self) -> Vec<u32> {
        self.checkpoint_lanes.iter().map(|l| l.service_end_abs).collect()
    }

    pub fn pending_to_ticket(&self) -> &DueQueue {
        &self.pending_to_ticket
    }

    pub fn pending_to_checkpoint(&self) -> &DueQueue {
        &self.pending_to_checkpoint
    }

    pub fn pending_to_hold(&self) -> &DueQueue {
        &self.pending_to_hold
    }

    pub fn target_ticket_lane(&self, id: PassengerId) -> Option<usize> {
        self.target_ticket_lane.get(&id).copied()
    }

    pub fn target_checkpoint_lane(&self, id: PassengerId) -> Option<usize> {
        self.target_checkpoint_lane.get(&id).copied()
    }

    /// Flights whose boarding closed during the most recent interval.
    pub fn flights_just_closed(&self) -> &[FlightId] {
        &self.just_closed
    }

    // ── Passengers & stamps ───────────────────────────────────────────────

    pub fn passenger(&self, id: PassengerId) -> &Passenger {
        self.arena.get(id)
    }

    /// Total passengers materialized so far (purged ones included).
    pub fn passenger_count(&self) -> usize {
        self.arena.len()
    }

    pub fn stamps(&self) -> &StampTable {
        &self.stamps
    }

    // ── History & series ──────────────────────────────────────────────────

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Passengers still waiting in ticket + checkpoint lines at the end of
    /// interval `k` (recorded after the missed purge).
    pub fn held_ups_at(&self, k: u32) -> u32 {
        self.held_ups_by_interval.get(&k).copied().unwrap_or(0)
    }

    pub fn ticket_queued_at(&self, k: u32) -> u32 {
        self.ticket_queued_by_interval.get(&k).copied().unwrap_or(0)
    }

    pub fn checkpoint_queued_at(&self, k: u32) -> u32 {
        self.checkpoint_queued_by_interval.get(&k).copied().unwrap_or(0)
    }

    pub fn hold_room_total_at(&self, k: u32) -> u32 {
        self.hold_total_by_interval.get(&k).copied().unwrap_or(0)
    }

    // ── Shared tallies used by step + snapshot code ───────────────────────

    pub(crate) fn ticket_waiting_total(&self) -> u32 {
        self.ticket_lanes.iter().map(|l| l.queue.len() as u32).sum()
    }

    pub(crate) fn checkpoint_waiting_total(&self) -> u32 {
        self.checkpoint_lanes.iter().map(|l| l.queue.len() as u32).sum()
    }

    pub(crate) fn hold_occupancy_total(&self) -> u32 {
        self.hold_rooms.iter().map(|r| r.occupants.len() as u32).sum()
    }

    pub(crate) fn record_queue_totals(&mut self) {
        let k = self.current_interval;
        let ticket = self.ticket_waiting_total();
        let checkpoint = self.checkpoint_waiting_total();
        let hold = self.hold_occupancy_total();
        self.ticket_queued_by_interval.insert(k, ticket);
        self.checkpoint_queued_by_interval.insert(k, checkpoint);
        self.hold_total_by_interval.insert(k, hold);
    }
}
