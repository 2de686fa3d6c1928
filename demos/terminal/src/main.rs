//! terminal — smallest runnable scenario for the paxflow kernel.
//!
//! Four morning departures flow through three ticket counters, two
//! checkpoint lanes, and two hold rooms.  The run writes interval and flight
//! summaries to `output/terminal/`, then demonstrates the rewind API by
//! jumping back to a mid-run snapshot.

use std::io::Cursor;
use std::path::Path;

use anyhow::Result;

use pax_core::PassengerId;
use pax_engine::{EngineBuilder, EngineConfig};
use pax_model::{
    load_flights_reader, CheckpointConfig, FlightNumber, HoldRoomConfig, TicketCounterConfig,
};
use pax_output::{CsvWriter, RecordingObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;
const ARRIVAL_SPAN_MIN: u32 = 180;
const INTERVAL_MIN: u32 = 5;
const PERCENT_IN_PERSON: f64 = 0.6;

// ── Flight roster ─────────────────────────────────────────────────────────────

const ROSTER_CSV: &str = "\
flight_number,departure,seats,fill_percent,shape
UA101,10:00,180,0.85,circle
DL202,10:30,120,0.90,square
AA303,11:00,200,0.75,triangle
WN404,11:30,140,0.95,diamond
";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("=== terminal — paxflow departure pipeline ===");
    println!("Span: {ARRIVAL_SPAN_MIN} min  |  Interval: {INTERVAL_MIN} min  |  Seed: {SEED}");
    println!();

    // 1. Load the roster.
    let flights = load_flights_reader(Cursor::new(ROSTER_CSV))?;
    println!("Loaded {} flights", flights.len());

    // 2. Station layout.  Counter 3 is dedicated to the two later flights;
    //    room 1 is a close gate reserved for UA101/DL202.
    let aa = FlightNumber::new("AA303")?;
    let wn = FlightNumber::new("WN404")?;
    let ua = FlightNumber::new("UA101")?;
    let dl = FlightNumber::new("DL202")?;

    let counters = vec![
        TicketCounterConfig::new(1, 2.0, Vec::new()),
        TicketCounterConfig::new(2, 2.0, Vec::new()),
        TicketCounterConfig::new(3, 1.5, vec![aa.clone(), wn.clone()]),
    ];
    let checkpoints = vec![
        CheckpointConfig::new(1, 150.0),
        CheckpointConfig::new(2, 150.0),
    ];
    let rooms = vec![
        HoldRoomConfig::new(1, 45, vec![ua, dl]),
        HoldRoomConfig::new(2, 90, Vec::new()),
    ];

    // 3. Engine configuration.
    let config = EngineConfig {
        percent_in_person: PERCENT_IN_PERSON,
        arrival_span_minutes: ARRIVAL_SPAN_MIN,
        interval_minutes: INTERVAL_MIN,
        transit_delay_minutes: 2,
        hold_delay_minutes: 1,
        boarding_close_minutes: 20,
        seed: SEED,
        jitter_enabled: true,
    };

    let mut engine = EngineBuilder::new(config, flights.clone())
        .counters(counters)
        .checkpoints(checkpoints)
        .hold_rooms(rooms)
        .build();
    for warning in engine.config_warnings() {
        eprintln!("config: {warning}");
    }
    println!(
        "Horizon: {} intervals of {} min",
        engine.total_intervals(),
        engine.interval_minutes()
    );
    println!();

    // 4. Run everything, recording summaries to CSV.
    std::fs::create_dir_all("output/terminal")?;
    let writer = CsvWriter::new(Path::new("output/terminal"))?;
    let mut obs = RecordingObserver::new(writer, &flights);
    engine.run_all_with(&mut obs);
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Per-flight outcome table.
    let mut missed = vec![0u32; flights.len()];
    for i in 0..engine.passenger_count() as u32 {
        let p = engine.passenger(PassengerId(i));
        if p.missed {
            missed[p.flight.index()] += 1;
        }
    }

    println!(
        "{:<8} {:<7} {:>8} {:>9} {:>7}",
        "Flight", "Departs", "Planned", "Screened", "Missed"
    );
    println!("{}", "-".repeat(44));
    let mut screened = vec![0u32; flights.len()];
    for record in engine.history().iter() {
        for (f, n) in record.passed_checkpoint.iter() {
            screened[f.index()] += n;
        }
    }
    for (i, f) in flights.iter().enumerate() {
        println!(
            "{:<8} {:<7} {:>8} {:>9} {:>7}",
            f.number().to_string(),
            f.departure().to_string(),
            f.planned_passengers(),
            screened[i],
            missed[i],
        );
    }
    println!();

    // 6. Busiest interval by checkpoint backlog.
    let series = engine.history().checkpoint_queue_series();
    if let Some((peak_interval, peak)) = series
        .iter()
        .enumerate()
        .max_by_key(|(_, &len)| len)
        .map(|(k, &len)| (k as u32, len))
    {
        println!("Peak checkpoint backlog: {peak} waiting at interval {peak_interval}");

        // 7. Rewind to the peak and look around.
        engine.go_to_interval(peak_interval + 1);
        println!(
            "At interval {}: ticket queue {}, checkpoint queue {}, hold rooms {}",
            engine.current_interval(),
            engine.ticket_queued_at(engine.current_interval()),
            engine.checkpoint_queued_at(engine.current_interval()),
            engine.hold_room_total_at(engine.current_interval()),
        );
    }

    println!();
    println!("Wrote output/terminal/interval_summaries.csv and flight_summaries.csv");
    Ok(())
}
