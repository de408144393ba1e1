//! Tests for the tracking session and its async drivers.

use std::f64::consts::FRAC_PI_2;
use std::sync::{Arc, Mutex};

use gf_arrival::{ArrivalEvent, ArrivalNotice, ArrivalState, Evaluation};
use gf_core::{GeoError, GeoPoint, ObserverPosition};
use gf_motion::SimulationState;

use crate::{
    ScheduleConfig, Session, SessionBuilder, SessionConfig, SessionError, SessionObserver,
    SessionStatus, TickOutcome, TrackingMode,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config() -> SessionConfig {
    SessionConfig {
        schedule: ScheduleConfig { tick_period_ms: 1_000, start_unix_ms: Some(1_700_000_000_000) },
        ..Default::default()
    }
}

fn origin() -> GeoPoint {
    GeoPoint::new(41.0, 29.0)
}

/// A point `d` metres due east of [`origin`].
fn east(d: f64) -> GeoPoint {
    origin().offset(FRAC_PI_2, d)
}

fn fix(d: f64) -> ObserverPosition {
    ObserverPosition::new(east(d), 0)
}

type Log = Arc<Mutex<Vec<String>>>;

/// A session whose notifier appends `"title|body"` to the returned log.
fn recording_session(builder: SessionBuilder) -> (Session, Log) {
    let log: Log = Arc::default();
    let sink = Arc::clone(&log);
    let session = builder
        .notifier(move |title: &str, body: &str| sink.lock().unwrap().push(format!("{title}|{body}")))
        .build()
        .unwrap();
    (session, log)
}

/// Tick until the simulated run ends, returning how many ticks moved.
fn run_to_end(session: &mut Session) -> usize {
    let mut moved = 0;
    loop {
        match session.tick() {
            TickOutcome::Moved(_) => moved += 1,
            TickOutcome::Completed => return moved,
            TickOutcome::Inactive => panic!("session went inactive without completing"),
        }
        assert!(moved < 10_000, "simulation did not terminate");
    }
}

#[derive(Default)]
struct Recorded {
    positions:   usize,
    events:      Vec<ArrivalEvent>,
    statuses:    Vec<(SessionStatus, SessionStatus)>,
    completions: usize,
}

struct RecordingObserver(Arc<Mutex<Recorded>>);

impl SessionObserver for RecordingObserver {
    fn on_position(&mut self, _p: &ObserverPosition, _e: &Evaluation) {
        self.0.lock().unwrap().positions += 1;
    }
    fn on_arrival_event(&mut self, notice: &ArrivalNotice) {
        self.0.lock().unwrap().events.push(notice.event);
    }
    fn on_status_change(&mut self, from: SessionStatus, to: SessionStatus) {
        self.0.lock().unwrap().statuses.push((from, to));
    }
    fn on_simulation_complete(&mut self, _state: &SimulationState) {
        self.0.lock().unwrap().completions += 1;
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn start_without_target_fails_without_state_change() {
        let (mut s, _) = recording_session(SessionBuilder::new(test_config()).simulated_start(origin()));
        assert_eq!(s.start(TrackingMode::Simulated), Err(SessionError::NoTarget));
        assert_eq!(s.start(TrackingMode::Live), Err(SessionError::NoTarget));
        assert_eq!(s.status(), SessionStatus::Idle);
        assert_eq!(s.mode(), TrackingMode::Simulated);
    }

    #[test]
    fn invalid_target_rejected() {
        let (mut s, _) = recording_session(SessionBuilder::new(test_config()));
        assert_eq!(
            s.set_target(east(100.0), 0.0),
            Err(SessionError::Geo(GeoError::InvalidRadius(0.0)))
        );
        assert!(s.set_target(GeoPoint::new(f64::NAN, 0.0), 50.0).is_err());
        assert!(s.target().is_none());
    }

    #[test]
    fn simulated_start_needs_a_position() {
        let (mut s, _) = recording_session(SessionBuilder::new(test_config()));
        s.set_target(east(500.0), 100.0).unwrap();
        assert_eq!(s.start(TrackingMode::Simulated), Err(SessionError::NoStartPosition));
        assert_eq!(s.status(), SessionStatus::Idle);
    }

    #[test]
    fn simulated_start_falls_back_to_last_live_fix() {
        let (mut s, _) = recording_session(SessionBuilder::new(test_config()));
        s.set_target(east(500.0), 100.0).unwrap();
        assert_eq!(s.on_position_update(fix(0.0)), Ok(None));
        s.start(TrackingMode::Simulated).unwrap();
        assert_eq!(s.simulation().unwrap().path, vec![east(0.0)]);
    }

    #[test]
    fn stop_rearms_and_clears_path() {
        let (mut s, _) = recording_session(SessionBuilder::new(test_config()).simulated_start(origin()));
        s.set_target(east(60.0), 100.0).unwrap();
        s.start(TrackingMode::Simulated).unwrap();
        assert!(s.tick().is_moving());
        assert_eq!(s.arrival_state(), ArrivalState::Notified);

        s.stop();
        assert_eq!(s.status(), SessionStatus::Idle);
        assert_eq!(s.arrival_state(), ArrivalState::Armed);
        assert!(s.simulation().unwrap().path.is_empty());
        assert_eq!(s.tick(), TickOutcome::Inactive);
        // Idempotent.
        s.stop();
        assert_eq!(s.status(), SessionStatus::Idle);
    }

    #[test]
    fn mode_switch_while_active_stops() {
        let (mut s, _) = recording_session(SessionBuilder::new(test_config()).simulated_start(origin()));
        s.set_target(east(500.0), 100.0).unwrap();
        s.start(TrackingMode::Simulated).unwrap();
        s.tick();
        s.set_mode(TrackingMode::Live);
        assert_eq!(s.status(), SessionStatus::Idle);
        assert_eq!(s.mode(), TrackingMode::Live);
        assert!(s.simulation().unwrap().path.is_empty());
    }

    #[test]
    fn simulated_start_locked_while_active() {
        let (mut s, _) = recording_session(SessionBuilder::new(test_config()).simulated_start(origin()));
        s.set_target(east(500.0), 100.0).unwrap();
        s.start(TrackingMode::Simulated).unwrap();
        assert_eq!(s.set_simulated_start(east(10.0)), Err(SessionError::Active));
        s.stop();
        s.set_simulated_start(east(10.0)).unwrap();
        assert_eq!(s.simulation().unwrap().current_position, east(10.0));
    }

    #[test]
    fn observer_sees_status_changes() {
        let rec = Arc::new(Mutex::new(Recorded::default()));
        let (mut s, _) = recording_session(
            SessionBuilder::new(test_config())
                .simulated_start(origin())
                .observer(RecordingObserver(Arc::clone(&rec))),
        );
        s.set_target(east(32.0), 10.0).unwrap();
        s.start(TrackingMode::Simulated).unwrap();
        assert_eq!(run_to_end(&mut s), 6);

        let rec = rec.lock().unwrap();
        assert_eq!(
            rec.statuses,
            vec![
                (SessionStatus::Idle, SessionStatus::Active),
                (SessionStatus::Active, SessionStatus::Idle),
            ]
        );
        assert_eq!(rec.completions, 1);
        assert_eq!(rec.positions, 6);
        assert_eq!(rec.events, vec![ArrivalEvent::Arrived]);
    }
}

// ── Simulated runs ────────────────────────────────────────────────────────────

#[cfg(test)]
mod simulated {
    use super::*;

    #[test]
    fn five_hundred_metres_fires_once_then_halts() {
        let (mut s, log) = recording_session(SessionBuilder::new(test_config()).simulated_start(origin()));
        s.set_target(east(500.0), 100.0).unwrap();
        s.start(TrackingMode::Simulated).unwrap();
        assert_eq!(s.speed(), 5.0);

        run_to_end(&mut s);

        assert_eq!(log.lock().unwrap().len(), 1);
        assert_eq!(s.status(), SessionStatus::Idle);
        assert_eq!(s.arrival_state(), ArrivalState::Notified);
        assert!(s.current_distance().unwrap() <= 5.0);
        assert_eq!(s.tick(), TickOutcome::Inactive);
    }

    #[test]
    fn arrival_notification_text() {
        let (mut s, log) = recording_session(SessionBuilder::new(test_config()).simulated_start(origin()));
        s.set_target(east(502.0), 100.0).unwrap();
        s.start(TrackingMode::Simulated).unwrap();
        run_to_end(&mut s);
        // 502 → 102 after 80 ticks, inside at 97.
        let log = log.lock().unwrap();
        assert_eq!(log[0], "Approaching target!|You are 97 m from the target.");
    }

    #[test]
    fn equator_scenario() {
        let (mut s, log) = recording_session(
            SessionBuilder::new(test_config()).simulated_start(GeoPoint::new(0.0, 0.0)),
        );
        s.set_target(GeoPoint::new(0.0, 0.0009), 50.0).unwrap();
        let d = s.current_distance().unwrap();
        assert!((d - 100.1).abs() < 0.1, "got {d}");
        assert_eq!(s.arrival_state(), ArrivalState::Armed);

        s.start(TrackingMode::Simulated).unwrap();
        let mut arrivals = 0;
        while let TickOutcome::Moved(eval) = s.tick() {
            if eval.event == Some(ArrivalEvent::Arrived) {
                arrivals += 1;
                assert!(eval.distance_m <= 50.0);
            }
        }
        assert_eq!(arrivals, 1);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn retarget_while_active_rearms() {
        let (mut s, log) = recording_session(SessionBuilder::new(test_config()).simulated_start(origin()));
        s.set_target(east(20.0), 100.0).unwrap();
        s.start(TrackingMode::Simulated).unwrap();
        s.tick();
        assert_eq!(s.arrival_state(), ArrivalState::Notified);

        s.set_target(east(400.0), 50.0).unwrap();
        assert_eq!(s.arrival_state(), ArrivalState::Armed);
        assert_eq!(s.status(), SessionStatus::Active);
        assert_eq!(s.simulation().unwrap().path.len(), 1);

        run_to_end(&mut s);
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn timestamps_follow_sim_clock() {
        let stamps = Arc::new(Mutex::new(Vec::new()));
        struct Stamps(Arc<Mutex<Vec<i64>>>);
        impl SessionObserver for Stamps {
            fn on_position(&mut self, p: &ObserverPosition, _e: &Evaluation) {
                self.0.lock().unwrap().push(p.unix_ms);
            }
        }
        let (mut s, _) = recording_session(
            SessionBuilder::new(test_config())
                .simulated_start(origin())
                .observer(Stamps(Arc::clone(&stamps))),
        );
        s.set_target(east(500.0), 100.0).unwrap();
        s.start(TrackingMode::Simulated).unwrap();
        s.tick();
        s.tick();
        assert_eq!(*stamps.lock().unwrap(), vec![1_700_000_001_000, 1_700_000_002_000]);
    }

    #[test]
    fn speed_controls() {
        let (mut s, _) = recording_session(SessionBuilder::new(test_config()));
        assert_eq!(s.increase_speed(), 6.0);
        assert_eq!(s.decrease_speed(), 5.0);
        assert_eq!(s.set_speed(50.0), Ok(20.0));
        assert!(s.set_speed(f64::INFINITY).is_err());
    }
}

// ── Live mode ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod live {
    use super::*;

    fn live_session() -> (Session, Log) {
        let (mut s, log) = recording_session(SessionBuilder::new(test_config()).mode(TrackingMode::Live));
        s.set_target(origin(), 100.0).unwrap();
        s.start(TrackingMode::Live).unwrap();
        (s, log)
    }

    fn event(s: &mut Session, d: f64) -> Option<ArrivalEvent> {
        s.on_position_update(fix(d)).unwrap().unwrap().event
    }

    #[test]
    fn hysteresis_over_live_fixes() {
        let (mut s, log) = live_session();
        assert_eq!(event(&mut s, 300.0), None);
        assert_eq!(event(&mut s, 90.0), Some(ArrivalEvent::Arrived));
        assert_eq!(event(&mut s, 110.0), None);
        assert_eq!(event(&mut s, 95.0), None);
        assert_eq!(event(&mut s, 160.0), Some(ArrivalEvent::Departed));
        assert_eq!(event(&mut s, 80.0), Some(ArrivalEvent::Arrived));
        // Only arrivals notify.
        assert_eq!(log.lock().unwrap().len(), 2);
        assert_eq!(s.status(), SessionStatus::Active);
    }

    #[test]
    fn invalid_fix_rejected_before_state() {
        let (mut s, _) = live_session();
        s.on_position_update(fix(50.0)).unwrap();
        let bad = ObserverPosition::new(GeoPoint::new(f64::NAN, 29.0), 0);
        assert!(matches!(
            s.on_position_update(bad),
            Err(SessionError::Geo(GeoError::InvalidCoordinate { .. }))
        ));
        assert!((s.current_distance().unwrap() - 50.0).abs() < 0.01);
        assert_eq!(s.arrival_state(), ArrivalState::Notified);
    }

    #[test]
    fn fixes_ignored_while_idle() {
        let (mut s, log) = recording_session(SessionBuilder::new(test_config()).mode(TrackingMode::Live));
        s.set_target(origin(), 100.0).unwrap();
        assert_eq!(s.on_position_update(fix(10.0)), Ok(None));
        assert!(log.lock().unwrap().is_empty());
        // Remembered for distance display.
        assert!((s.current_distance().unwrap() - 10.0).abs() < 0.01);
    }

    #[test]
    fn subscribers_receive_both_edges() {
        let (mut s, _) = live_session();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        s.on_arrival_event(move |n| sink.lock().unwrap().push((n.event, n.distance_m.round())));
        event(&mut s, 40.0);
        event(&mut s, 200.0);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(ArrivalEvent::Arrived, 40.0), (ArrivalEvent::Departed, 200.0)]
        );
    }

    #[test]
    fn no_distance_without_target() {
        let (mut s, _) = recording_session(SessionBuilder::new(test_config()).mode(TrackingMode::Live));
        s.on_position_update(fix(10.0)).unwrap();
        assert_eq!(s.current_distance(), None);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn default_is_valid() {
        SessionConfig::default().validate().unwrap();
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let mut cfg = test_config();
        cfg.schedule.tick_period_ms = 0;
        assert!(SessionBuilder::new(cfg).build().is_err());

        let mut cfg = test_config();
        cfg.detector.departure_factor = 0.5;
        assert!(SessionBuilder::new(cfg).build().is_err());
    }
}

// ── Async drivers ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod runtime {
    use std::ops::ControlFlow;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tokio::sync::mpsc;
    use tokio::time::sleep;

    use super::*;
    use crate::{SessionHandle, every};

    fn handle_with_log(builder: SessionBuilder) -> (SessionHandle, Log) {
        let (session, log) = recording_session(builder);
        (SessionHandle::new(session), log)
    }

    #[tokio::test(start_paused = true)]
    async fn every_runs_until_break() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = every(Duration::from_secs(1), move || {
            if counter.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        sleep(Duration::from_secs(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn every_stops_on_cancel() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = every(Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        });
        sleep(Duration::from_millis(2_500)).await;
        handle.cancel();
        let before = calls.load(Ordering::SeqCst);
        sleep(Duration::from_secs(5)).await;
        assert_eq!(before, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_run_completes_on_its_own() {
        let (handle, log) = handle_with_log(SessionBuilder::new(test_config()).simulated_start(origin()));
        let mut events = handle.subscribe();
        handle.set_target(east(500.0), 100.0).unwrap();
        handle.start(TrackingMode::Simulated).unwrap();

        sleep(Duration::from_secs(200)).await;

        assert_eq!(handle.with_session(|s| s.status()), SessionStatus::Idle);
        assert!(!handle.ticker_running());
        assert_eq!(log.lock().unwrap().len(), 1);
        assert_eq!(events.try_recv().unwrap().event, ArrivalEvent::Arrived);
        assert!(events.try_recv().is_err());
        assert!(handle.current_distance().unwrap() <= 5.0);
    }

    #[tokio::test(start_paused = true)]
    async fn no_tick_after_stop() {
        let (handle, _) = handle_with_log(SessionBuilder::new(test_config()).simulated_start(origin()));
        handle.set_target(east(500.0), 100.0).unwrap();
        handle.start(TrackingMode::Simulated).unwrap();

        sleep(Duration::from_millis(3_500)).await;
        handle.stop();
        let stopped_at = handle.with_session(|s| s.observer_point()).unwrap();
        assert!((stopped_at.distance_m(origin()) - 15.0).abs() < 1e-3);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(handle.with_session(|s| s.observer_point()), Some(stopped_at));
        assert_eq!(handle.with_session(|s| s.status()), SessionStatus::Idle);
        assert!(!handle.ticker_running());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_ticker() {
        let (handle, _) = handle_with_log(SessionBuilder::new(test_config()).simulated_start(origin()));
        handle.set_target(east(500.0), 100.0).unwrap();
        handle.start(TrackingMode::Simulated).unwrap();
        sleep(Duration::from_millis(2_500)).await;
        handle.start(TrackingMode::Simulated).unwrap();
        sleep(Duration::from_millis(2_500)).await;
        // Two ticks per run; a leaked first ticker would add two more.
        let travelled = handle.with_session(|s| s.observer_point()).unwrap().distance_m(origin());
        assert!((travelled - 20.0).abs() < 1e-3, "travelled {travelled}");
        let path = handle.with_session(|s| s.simulation().unwrap().path.len());
        assert_eq!(path, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn live_feed_drives_detector() {
        let (handle, log) = handle_with_log(SessionBuilder::new(test_config()).mode(TrackingMode::Live));
        let mut events = handle.subscribe();
        handle.set_target(origin(), 100.0).unwrap();
        handle.start(TrackingMode::Live).unwrap();

        let (tx, rx) = mpsc::channel(16);
        let feed = handle.attach_feed(rx);
        for d in [400.0, 250.0, 90.0, 60.0, 170.0] {
            tx.send(fix(d)).await.unwrap();
        }
        tx.send(ObserverPosition::new(GeoPoint::new(95.0, 0.0), 0)).await.unwrap();
        drop(tx);
        feed.join().await;

        assert_eq!(events.try_recv().unwrap().event, ArrivalEvent::Arrived);
        assert_eq!(events.try_recv().unwrap().event, ArrivalEvent::Departed);
        assert!(events.try_recv().is_err());
        assert_eq!(log.lock().unwrap().len(), 1);
        assert_eq!(handle.with_session(|s| s.status()), SessionStatus::Active);
    }

    #[tokio::test(start_paused = true)]
    async fn mode_switch_cancels_ticker() {
        let (handle, _) = handle_with_log(SessionBuilder::new(test_config()).simulated_start(origin()));
        handle.set_target(east(500.0), 100.0).unwrap();
        handle.start(TrackingMode::Simulated).unwrap();
        sleep(Duration::from_millis(1_500)).await;
        handle.set_mode(TrackingMode::Live);
        sleep(Duration::from_secs(5)).await;
        assert!(!handle.ticker_running());
        assert_eq!(handle.with_session(|s| s.status()), SessionStatus::Idle);
    }
}
