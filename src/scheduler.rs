//! Debounced evaluation scheduling
//!
//! Selection-change notifications mark the shared state dirty; a background
//! poll task checks on a fixed period and fires exactly one evaluation once
//! the debounce window has elapsed with no further changes. While an
//! evaluation runs, a suppression flag swallows the notifications the
//! evaluation itself causes (programmatic selection or viewport changes),
//! so it cannot re-trigger itself.
//!
//! The state is word-sized atomics only: the notification handler is the
//! single writer, the poll task the single reader, so no lock is needed.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Quiet time required after the last selection change
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(120);
/// How often the background task checks for elapsed debounce windows
pub const POLL_PERIOD: Duration = Duration::from_millis(500);

/// Request sent to the host executor when a debounce window elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluateRequest;

/// Shared debounce state between notification handlers and the poll task
#[derive(Debug)]
pub struct DebounceState {
    epoch: Instant,
    window_ms: u64,
    modified: AtomicBool,
    ignore_all: AtomicBool,
    instant: AtomicBool,
    last_change_ms: AtomicU64,
}

impl DebounceState {
    pub fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            epoch: Instant::now(),
            window_ms: window.as_millis() as u64,
            modified: AtomicBool::new(false),
            ignore_all: AtomicBool::new(false),
            instant: AtomicBool::new(false),
            last_change_ms: AtomicU64::new(0),
        }
    }

    /// Milliseconds since this state was created
    pub fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Record a selection change at `now_ms`
    pub fn mark_modified(&self, now_ms: u64) {
        self.last_change_ms.store(now_ms, Ordering::Release);
        self.modified.store(true, Ordering::Release);
    }

    /// Whether evaluation and triggering are currently suppressed
    pub fn suppressed(&self) -> bool {
        self.ignore_all.load(Ordering::Acquire)
    }

    /// Continuous (instant) scoping toggle
    pub fn instant(&self) -> bool {
        self.instant.load(Ordering::Acquire)
    }

    pub fn set_instant(&self, on: bool) {
        self.instant.store(on, Ordering::Release);
    }

    /// Whether a pending change has sat quiet past the debounce window
    pub fn should_fire(&self, now_ms: u64) -> bool {
        if self.suppressed() || !self.modified.load(Ordering::Acquire) {
            return false;
        }
        now_ms.saturating_sub(self.last_change_ms.load(Ordering::Acquire)) > self.window_ms
    }

    /// Consume the pending change if its window elapsed.
    ///
    /// Returns true at most once per burst of changes.
    pub fn take_fire(&self, now_ms: u64) -> bool {
        if self.should_fire(now_ms) {
            self.modified.store(false, Ordering::Release);
            true
        } else {
            false
        }
    }

    /// Suppress re-entrant triggering for the duration of the returned
    /// guard; dropping it re-arms the timestamp.
    pub fn suppress(&self) -> SuppressGuard<'_> {
        self.modified.store(false, Ordering::Release);
        self.ignore_all.store(true, Ordering::Release);
        SuppressGuard { state: self }
    }
}

impl Default for DebounceState {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the suppression flag on drop and resets the change timestamp
pub struct SuppressGuard<'a> {
    state: &'a DebounceState,
}

impl Drop for SuppressGuard<'_> {
    fn drop(&mut self) {
        self.state.ignore_all.store(false, Ordering::Release);
        let now = self.state.now_ms();
        self.state.last_change_ms.store(now, Ordering::Release);
    }
}

/// Background poll task that turns elapsed debounce windows into
/// [`EvaluateRequest`]s on a channel drained by the host's executor
pub struct Scheduler {
    shutdown: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Scheduler {
    pub fn spawn(state: Arc<DebounceState>, tx: Sender<EvaluateRequest>) -> Self {
        Self::spawn_with_period(state, tx, POLL_PERIOD)
    }

    pub fn spawn_with_period(
        state: Arc<DebounceState>,
        tx: Sender<EvaluateRequest>,
        poll_period: Duration,
    ) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let thread_shutdown = Arc::clone(&shutdown);
        let handle = thread::spawn(move || {
            tracing::debug!("scope evaluation scheduler started");
            while !thread_shutdown.load(Ordering::Acquire) {
                if state.take_fire(state.now_ms()) && tx.send(EvaluateRequest).is_err() {
                    // Receiver gone, host shut down
                    break;
                }
                thread::sleep(poll_period);
            }
            tracing::debug!("scope evaluation scheduler stopped");
        });
        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    /// Stop the poll task and wait for it to exit
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_fires_once() {
        let state = DebounceState::with_window(Duration::from_millis(120));
        for t in [0, 40, 80, 110] {
            state.mark_modified(t);
        }
        assert!(!state.take_fire(200)); // only 90ms after the last change
        assert!(state.take_fire(231));
        assert!(!state.take_fire(400)); // consumed
    }

    #[test]
    fn test_spaced_events_fire_each() {
        let state = DebounceState::with_window(Duration::from_millis(120));
        state.mark_modified(0);
        assert!(state.take_fire(121));
        state.mark_modified(500);
        assert!(state.take_fire(621));
    }

    #[test]
    fn test_suppression_blocks_fire() {
        let state = DebounceState::with_window(Duration::from_millis(120));
        state.mark_modified(0);
        let guard = state.suppress();
        assert!(!state.take_fire(1_000));
        drop(guard);
        // The pending change was consumed by the suppressed evaluation
        assert!(!state.take_fire(2_000));
    }
}
