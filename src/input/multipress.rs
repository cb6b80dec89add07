//! Single vs. triple press classification with deferred commit.
//!
//! A press that might become a triple must not fire its single-press
//! action immediately, so the classifier parks it as a pending single
//! and commits only once the press window closes without a third
//! press. The owning poller checks for a triple every tick, strictly
//! before the pending sweep, which makes the window-boundary case
//! deterministic instead of racy.

use crate::config::{MIN_PRESS_INTERVAL_MS, PRESS_WINDOW_MS};

/// Deferred single-press commitment state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Idle,
    /// A single press is scheduled. `since` is the time of the press
    /// that (re-)armed it; the single commits once `PRESS_WINDOW_MS`
    /// elapses from there, unless a third press upgrades the run to a
    /// triple first.
    Armed { since: u32 },
}

/// Per-channel press counter and deferred-single state.
#[derive(Clone, Copy, Debug)]
pub struct MultiPress {
    press_count: u8,
    window_start_ms: u32,
    last_press_ms: Option<u32>,
    pending: Pending,
}

impl MultiPress {
    pub const fn new() -> Self {
        Self {
            press_count: 0,
            window_start_ms: 0,
            last_press_ms: None,
            pending: Pending::Idle,
        }
    }

    /// Record a debounced press edge.
    ///
    /// Presses closer than `MIN_PRESS_INTERVAL_MS` to the previously
    /// accepted press are electrical glitches, not fingers, and are
    /// dropped without touching the window or the pending single.
    pub fn on_press_edge(&mut self, now_ms: u32) {
        if let Some(last) = self.last_press_ms {
            if now_ms.wrapping_sub(last) < MIN_PRESS_INTERVAL_MS {
                return;
            }
        }

        if self.press_count == 0 || now_ms.wrapping_sub(self.window_start_ms) > PRESS_WINDOW_MS {
            self.press_count = 1;
            self.window_start_ms = now_ms;
        } else {
            self.press_count = self.press_count.saturating_add(1);
        }
        self.last_press_ms = Some(now_ms);

        if self.press_count < 3 {
            // Re-arm rather than duplicate: a second press postpones
            // the single-press commit, it does not schedule another.
            self.pending = Pending::Armed { since: now_ms };
        }
    }

    /// Check for a completed triple, consuming it.
    ///
    /// Must run before [`MultiPress::sweep`] on every tick so a third
    /// press landing on the window boundary wins over the deferred
    /// single. Firing is terminal: the window closes immediately and
    /// any further presses start a fresh one.
    pub fn take_triple(&mut self, now_ms: u32) -> bool {
        if self.press_count < 3 {
            return false;
        }

        if now_ms.wrapping_sub(self.window_start_ms) <= PRESS_WINDOW_MS {
            self.pending = Pending::Idle;
            self.reset_window();
            true
        } else {
            // Count reached 3 but the window lapsed: stale, no gesture.
            self.reset_window();
            false
        }
    }

    /// Commit the deferred single once its window has fully elapsed.
    ///
    /// Returns `true` exactly once per armed window; the caller turns
    /// that into a single-press command.
    pub fn sweep(&mut self, now_ms: u32) -> bool {
        let Pending::Armed { since } = self.pending else {
            return false;
        };
        if now_ms.wrapping_sub(since) < PRESS_WINDOW_MS {
            return false;
        }

        self.pending = Pending::Idle;
        let commit = self.press_count < 3;
        self.reset_window();
        commit
    }

    fn reset_window(&mut self) {
        // last_press_ms survives the reset so a bounce tail right
        // after a terminal gesture cannot seed a fresh window.
        self.press_count = 0;
        self.window_start_ms = 0;
    }
}

impl Default for MultiPress {
    fn default() -> Self {
        Self::new()
    }
}
