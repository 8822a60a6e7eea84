//! Debounce scheduling tests
//!
//! The fire decision is a pure function of recorded timestamps, so burst
//! coalescing is tested without sleeping; a short-interval thread test
//! covers the spawned scheduler.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use scopelens::scheduler::{DebounceState, EvaluateRequest, Scheduler};

// ========================================================================
// Pure decision logic
// ========================================================================

#[test]
fn test_burst_of_events_schedules_exactly_one_evaluation() {
    let state = DebounceState::with_window(Duration::from_millis(120));
    // Five changes inside one debounce window
    for t in [0, 20, 50, 90, 100] {
        state.mark_modified(t);
    }
    let mut fired = 0;
    // Poll well past the window; only the first check may fire
    for t in [150, 250, 500, 1000] {
        if state.take_fire(t) {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
}

#[test]
fn test_events_spaced_beyond_window_each_fire() {
    let state = DebounceState::with_window(Duration::from_millis(120));
    let mut fired = 0;
    for t in [0u64, 500, 1000] {
        state.mark_modified(t);
        if state.take_fire(t + 121) {
            fired += 1;
        }
    }
    assert_eq!(fired, 3);
}

#[test]
fn test_change_inside_window_defers_fire() {
    let state = DebounceState::with_window(Duration::from_millis(120));
    state.mark_modified(0);
    assert!(!state.take_fire(100));
    state.mark_modified(100);
    assert!(!state.take_fire(200)); // only 100ms since the last change
    assert!(state.take_fire(221));
}

#[test]
fn test_suppression_swallows_reentrant_triggers() {
    let state = Arc::new(DebounceState::with_window(Duration::from_millis(120)));
    state.mark_modified(0);
    {
        let _guard = state.suppress();
        // Notifications caused by the evaluation itself land here
        assert!(!state.take_fire(10_000));
    }
    // The guard consumed the pending change; nothing left to fire
    assert!(!state.take_fire(20_000));

    // A genuine change after the evaluation re-arms normally
    let now = state.now_ms();
    state.mark_modified(now);
    assert!(state.take_fire(now + 121));
}

#[test]
fn test_instant_toggle() {
    let state = DebounceState::new();
    assert!(!state.instant());
    state.set_instant(true);
    assert!(state.instant());
}

// ========================================================================
// Spawned scheduler
// ========================================================================

#[test]
fn test_scheduler_delivers_evaluate_request() {
    let state = Arc::new(DebounceState::with_window(Duration::from_millis(10)));
    let (tx, rx) = mpsc::channel();
    let scheduler = Scheduler::spawn_with_period(Arc::clone(&state), tx, Duration::from_millis(5));

    state.mark_modified(state.now_ms());
    let request = rx.recv_timeout(Duration::from_secs(2));
    assert_eq!(request, Ok(EvaluateRequest));

    // No further requests while nothing changes
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

    scheduler.shutdown();
}
