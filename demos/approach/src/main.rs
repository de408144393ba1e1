//! approach — end-to-end demo of the geofence arrival detector.
//!
//! Walks a simulated observer towards a target near Galata Tower, then
//! switches to live mode and replays a short synthetic sensor track that
//! leaves the departure band and comes back.  Notifications and events are
//! printed by background tasks; the track is written to `output/approach`.
//!
//! Usage: `approach [config.json]`.  The config file is a `SessionConfig`
//! in JSON; missing fields take their defaults.

use std::f64::consts::FRAC_PI_2;
use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tokio::sync::{broadcast, mpsc};

use gf_arrival::ArrivalNotice;
use gf_core::{GeoPoint, ObserverPosition};
use gf_output::{CsvWriter, TrackObserver};
use gf_session::{ChannelNotifier, SessionBuilder, SessionConfig, SessionHandle, TrackingMode};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:    &str = "output/approach";
const TARGET_OFFSET: f64  = 300.0; // metres east of the start
const RADIUS_M:      f64  = 100.0;
const DEMO_SPEED:    f64  = 20.0;

fn load_config() -> Result<SessionConfig> {
    let Some(path) = std::env::args().nth(1) else {
        let mut config = SessionConfig::default();
        config.motion.speed_mps = DEMO_SPEED;
        return Ok(config);
    };
    let file = File::open(&path).with_context(|| format!("opening {path}"))?;
    serde_json::from_reader(file).with_context(|| format!("parsing {path}"))
}

// ── Background jobs ───────────────────────────────────────────────────────────

async fn print_events(mut events: broadcast::Receiver<ArrivalNotice>) {
    loop {
        match events.recv().await {
            Ok(n) => println!("  [event] {} at {:.1} m ({})", n.event, n.distance_m, n.position.point),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                log::warn!("event printer fell behind, {missed} events skipped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== approach — geofence arrival demo ===");
    let config = load_config()?;
    println!(
        "Speed: {} m/s  |  Tick: {} ms  |  Departure factor: {}",
        config.motion.speed_mps, config.schedule.tick_period_ms, config.detector.departure_factor
    );

    // 1. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let track = Arc::new(Mutex::new(TrackObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?)));

    // 2. Session with a channel notifier feeding a delivery task.
    let (notifier, mut notifications) = ChannelNotifier::channel();
    let start = GeoPoint::new(41.025_6, 28.974_1);
    let target = start.offset(FRAC_PI_2, TARGET_OFFSET);

    let session = SessionBuilder::new(config)
        .notifier(notifier)
        .observer(Arc::clone(&track))
        .simulated_start(start)
        .build()?;
    let handle = SessionHandle::new(session);

    tokio::spawn(async move {
        while let Some(n) = notifications.recv().await {
            println!("  [notify] {} {}", n.title, n.body);
        }
    });
    tokio::spawn(print_events(handle.subscribe()));

    // 3. Simulated approach.
    handle.set_target(target, RADIUS_M)?;
    println!();
    println!("Simulated: {start} → {target}, radius {RADIUS_M} m");
    handle.start(TrackingMode::Simulated)?;
    while handle.ticker_running() {
        tokio::time::sleep(Duration::from_secs(1)).await;
        if let Some(d) = handle.current_distance() {
            println!("  {d:>7.1} m to target");
        }
    }
    let path_len = handle.with_session(|s| s.simulation().map_or(0, |sim| sim.path.len()));
    println!("Simulation finished, {path_len} path points");

    // 4. Live replay: leave past 1.5 × radius and come back.
    println!();
    println!("Live replay");
    handle.set_mode(TrackingMode::Live);
    handle.start(TrackingMode::Live)?;

    let (tx, rx) = mpsc::channel(16);
    let feed = handle.attach_feed(rx);
    for (i, d) in [250.0, 120.0, 80.0, 130.0, 180.0, 90.0].into_iter().enumerate() {
        let point = target.offset(-FRAC_PI_2, d);
        tx.send(ObserverPosition::new(point, i as i64 * 1_000)).await?;
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
    drop(tx);
    feed.join().await;

    handle.stop();
    // Let the printers drain.
    tokio::time::sleep(Duration::from_millis(100)).await;

    track
        .lock()
        .map_err(|_| anyhow!("track observer poisoned"))?
        .finish()
        .context("writing track output")?;

    println!();
    println!("Track written to {OUTPUT_DIR}/track.csv and {OUTPUT_DIR}/events.csv");
    Ok(())
}
