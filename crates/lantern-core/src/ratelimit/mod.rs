//! Fixed-window request rate limiting, per client.
//!
//! One window per client id. The decision and the increment happen under a
//! single lock hold so concurrent requests cannot both observe the last
//! free slot. State is process-local and in-memory only.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

/// Time source for the limiter. Injectable so tests can drive the window
/// boundary deterministically.
pub trait Clock: Send + Sync {
    /// Monotonic elapsed time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall-process clock backed by [`std::time::Instant`].
#[derive(Debug)]
pub struct SystemClock {
    origin: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-advanced clock for tests.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
}

#[cfg(any(test, feature = "mock"))]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

#[cfg(any(test, feature = "mock"))]
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }
}

/// Outcome of a rate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Request admitted; `remaining` slots left in the current window.
    Allowed { remaining: u32 },
    /// Window exhausted; retry after this many whole seconds.
    Limited { retry_after_secs: u64 },
}

#[derive(Debug, Clone, Copy)]
struct RateWindow {
    started: Duration,
    count: u32,
}

/// Per-client fixed-window counter.
pub struct RateLimiter<C: Clock = SystemClock> {
    windows: Mutex<HashMap<u64, RateWindow>>,
    ceiling: u32,
    window: Duration,
    clock: C,
}

impl RateLimiter<SystemClock> {
    /// Limiter admitting `ceiling` requests per client per `window`.
    pub fn new(ceiling: u32, window: Duration) -> Self {
        Self::with_clock(ceiling, window, SystemClock::new())
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(ceiling: u32, window: Duration, clock: C) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            ceiling,
            window,
            clock,
        }
    }

    /// Checks and, when admitted, counts one request for `client_id`.
    ///
    /// A window older than the configured span resets before the check. A
    /// limited request is still counted so a client hammering past the
    /// ceiling keeps pushing its own reset point observationally flat; the
    /// retry hint always reflects the window that rejected it.
    pub fn check(&self, client_id: u64) -> RateDecision {
        let now = self.clock.now();
        let mut windows = self.windows.lock();
        let entry = windows.entry(client_id).or_insert(RateWindow {
            started: now,
            count: 0,
        });

        if now.saturating_sub(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= self.ceiling {
            entry.count = entry.count.saturating_add(1);
            let elapsed = now.saturating_sub(entry.started);
            let remaining_ms = self
                .window
                .as_millis()
                .saturating_sub(elapsed.as_millis());
            let retry_after_secs = (remaining_ms as u64).div_ceil(1000).max(1);
            return RateDecision::Limited { retry_after_secs };
        }

        entry.count += 1;
        RateDecision::Allowed {
            remaining: self.ceiling - entry.count,
        }
    }

    /// Number of clients with a tracked window.
    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().len()
    }
}

impl<C: Clock> std::fmt::Debug for RateLimiter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("ceiling", &self.ceiling)
            .field("window", &self.window)
            .field("tracked_clients", &self.windows.lock().len())
            .finish()
    }
}
