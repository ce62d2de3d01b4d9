use crate::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Requested intervals below this floor are clamped up to it.
pub const MIN_INTERVAL_MS: u64 = 300;

/// Repeating auto-tally timer. Ticks go through the same `Session::increment`
/// path as manual taps, serialized by the session mutex.
///
/// Precondition: callers must check `active()` before `start` — starting a
/// second timer while one runs is not defended against here; the HTTP layer
/// rejects it instead.
pub struct AutoTally {
    interval_ms: u64,
    handle: Option<JoinHandle<()>>,
}

impl Default for AutoTally {
    fn default() -> Self {
        Self {
            interval_ms: MIN_INTERVAL_MS,
            handle: None,
        }
    }
}

impl AutoTally {
    pub fn active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Clamps the requested interval to the floor, spawns the tick task, and
    /// returns the effective interval. The first auto count lands one full
    /// interval after start, not immediately.
    pub fn start(&mut self, requested_ms: u64, session: Arc<Mutex<Session>>) -> u64 {
        let effective = requested_ms.max(MIN_INTERVAL_MS);
        self.interval_ms = effective;

        let mut ticker = interval(Duration::from_millis(effective));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.handle = Some(tokio::spawn(async move {
            ticker.tick().await;
            loop {
                ticker.tick().await;
                session.lock().await.increment().await;
            }
        }));

        effective
    }

    /// Aborts the tick task. The task only touches the session between
    /// interval awaits, so no tick can land after this returns. Safe to call
    /// when already stopped.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for AutoTally {
    fn drop(&mut self) {
        self.stop();
    }
}
