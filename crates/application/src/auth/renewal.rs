//! Activity-based silent session renewal.
//!
//! Federated, persistent sessions are kept alive by rewriting a durable
//! timestamp on user activity - no backend round-trip. Plain credential
//! sessions are never renewed.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

use crate::auth::SessionStore;
use crate::ports::Clock;

/// Activity signals the renewer listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivitySignal {
    /// Mouse button or pen pressed.
    PointerDown,
    /// Key pressed.
    KeyDown,
    /// Page scrolled.
    Scroll,
    /// Pointer moved.
    PointerMove,
    /// Touch started.
    TouchStart,
}

/// How often activity signals may trigger a renewal check, in seconds.
const ACTIVITY_CHECK_INTERVAL_SECS: i64 = 60;

/// Minimum spacing between marker rewrites, in seconds.
const RENEWAL_COOLDOWN_SECS: i64 = 300;

/// Background check period for long-idle-but-open tabs.
pub const BACKGROUND_TICK: std::time::Duration = std::time::Duration::from_secs(15 * 60);

/// Rewrites the renewal marker on activity, rate-limited by timestamp
/// comparison alone. Concurrent checks may both observe "due"; the worst
/// case is one redundant rewrite of the same instant, which is harmless.
pub struct SessionRenewer {
    store: Arc<SessionStore>,
    clock: Arc<dyn Clock>,
    last_check: Mutex<Option<DateTime<Utc>>>,
    auth_failures: AtomicU32,
}

impl SessionRenewer {
    /// Creates a renewer over the session store and clock.
    #[must_use]
    pub fn new(store: Arc<SessionStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            last_check: Mutex::new(None),
            auth_failures: AtomicU32::new(0),
        }
    }

    /// Feeds one activity signal; renewal checks run at most once per
    /// minute no matter how many signals fire.
    pub async fn record_activity(&self, _signal: ActivitySignal) {
        if !self.eligible() {
            return;
        }

        let now = self.clock.now();
        {
            let mut last = self
                .last_check
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if last.is_some_and(|at| now - at < Duration::seconds(ACTIVITY_CHECK_INTERVAL_SECS)) {
                return;
            }
            *last = Some(now);
        }

        self.renew_if_due().await;
    }

    /// Rewrites the marker if the cooldown window has elapsed; best-effort.
    ///
    /// Returns whether a rewrite happened. A successful rewrite also resets
    /// the consecutive-authorization-failure counter; a failed one bumps it
    /// and is otherwise swallowed.
    pub async fn renew_if_due(&self) -> bool {
        if !self.eligible() {
            return false;
        }

        let now = self.clock.now();
        let due = self
            .store
            .renewal_marker()
            .await
            .is_none_or(|marker| now - marker >= Duration::seconds(RENEWAL_COOLDOWN_SECS));
        if !due {
            return false;
        }

        match self.store.write_renewal_marker(now).await {
            Ok(()) => {
                self.auth_failures.store(0, Ordering::SeqCst);
                tracing::debug!(at = %now, "session renewal marker rewritten");
                true
            }
            Err(err) => {
                self.auth_failures.fetch_add(1, Ordering::SeqCst);
                tracing::debug!(error = %err, "session renewal skipped");
                false
            }
        }
    }

    /// Background loop that performs the renewal check every
    /// [`BACKGROUND_TICK`] regardless of activity, keeping long-idle tabs
    /// alive. Spawn it once; it never returns.
    pub async fn run(&self) {
        let mut interval = tokio::time::interval(BACKGROUND_TICK);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick fires immediately; skip it so a fresh login is not
        // double-stamped.
        interval.tick().await;
        loop {
            interval.tick().await;
            self.renew_if_due().await;
        }
    }

    /// Consecutive renewal failures since the last success. Transient,
    /// never persisted.
    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.auth_failures.load(Ordering::SeqCst)
    }

    fn eligible(&self) -> bool {
        self.store.is_authenticated() && self.store.markers().renewable()
    }
}
