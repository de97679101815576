//! Countdown clock.
//!
//! The clock is a plain state machine with no internal thread and no notion
//! of wall-clock time. The environment calls [`CountdownClock::tick`] once
//! per second; every tick while running subtracts exactly one second.
//!
//! ## State Transitions
//!
//! ```text
//! Paused -> Running -> (Paused | Finished) -> Paused (via reset)
//! ```
//!
//! ## Usage
//!
//! ```
//! use tiktomato_core::timer::CountdownClock;
//!
//! let mut clock = CountdownClock::new(2);
//! clock.start();
//! assert!(clock.tick().is_none());
//! assert!(clock.tick().is_some()); // finished
//! assert!(!clock.is_running());
//! ```

use chrono::Utc;

use crate::events::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownClock {
    remaining_secs: u64,
    running: bool,
    /// Set on the tick that reaches zero; cleared only by `reset`.
    finished: bool,
}

impl CountdownClock {
    /// Create a paused clock holding `secs`.
    pub fn new(secs: u64) -> Self {
        Self {
            remaining_secs: secs,
            running: false,
            finished: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down. No-op when already running or at zero.
    pub fn start(&mut self) -> Option<Event> {
        if self.running || self.remaining_secs == 0 {
            return None;
        }
        self.running = true;
        tracing::debug!(remaining_secs = self.remaining_secs, "clock started");
        Some(Event::TimerStarted {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop counting down. Idempotent; returns `None` when already paused.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        tracing::debug!(remaining_secs = self.remaining_secs, "clock paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Load `secs`, stop, and clear any finished signal.
    pub fn reset(&mut self, secs: u64) -> Event {
        self.remaining_secs = secs;
        self.running = false;
        self.finished = false;
        tracing::debug!(remaining_secs = secs, "clock reset");
        Event::TimerReset {
            remaining_secs: secs,
            at: Utc::now(),
        }
    }

    /// Advance by one second.
    ///
    /// Returns `Some(Event::TimerFinished)` on the single tick that reaches
    /// zero. Ticks while paused, or after finishing, change nothing.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        if self.remaining_secs == 0 {
            self.running = false;
            return None;
        }

        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.running = false;
            self.finished = true;
            tracing::debug!("clock finished");
            return Some(Event::TimerFinished { at: Utc::now() });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pause_start() {
        let mut clock = CountdownClock::new(10);
        assert!(!clock.is_running());

        assert!(clock.start().is_some());
        assert!(clock.is_running());
        assert!(clock.start().is_none());

        assert!(clock.pause().is_some());
        assert!(!clock.is_running());
        assert!(clock.pause().is_none());

        assert!(clock.start().is_some());
        assert!(clock.is_running());
    }

    #[test]
    fn start_at_zero_is_noop() {
        let mut clock = CountdownClock::new(0);
        assert!(clock.start().is_none());
        assert!(!clock.is_running());
    }

    #[test]
    fn finish_is_edge_triggered() {
        let mut clock = CountdownClock::new(3);
        clock.start();
        assert!(clock.tick().is_none());
        assert!(clock.tick().is_none());
        assert!(matches!(clock.tick(), Some(Event::TimerFinished { .. })));
        assert_eq!(clock.remaining_secs(), 0);
        assert!(!clock.is_running());
        assert!(clock.is_finished());

        for _ in 0..5 {
            assert!(clock.tick().is_none());
        }
        assert_eq!(clock.remaining_secs(), 0);
        assert!(clock.is_finished());

        // Restarting a finished clock is refused at zero.
        assert!(clock.start().is_none());
        assert!(clock.tick().is_none());
    }

    #[test]
    fn tick_while_paused_changes_nothing() {
        let mut clock = CountdownClock::new(42);
        for _ in 0..10 {
            assert!(clock.tick().is_none());
        }
        assert_eq!(clock.remaining_secs(), 42);
    }

    #[test]
    fn reset_clears_everything() {
        let mut clock = CountdownClock::new(1);
        clock.start();
        clock.tick();
        assert!(clock.is_finished());

        let event = clock.reset(300);
        assert!(matches!(
            event,
            Event::TimerReset {
                remaining_secs: 300,
                ..
            }
        ));
        assert_eq!(clock.remaining_secs(), 300);
        assert!(!clock.is_running());
        assert!(!clock.is_finished());
    }
}
