use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::clock::CountdownClock;
use crate::events::Event;

/// The active session kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    #[default]
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Work, Mode::ShortBreak, Mode::LongBreak];

    /// Stable key used on the command surface and in serialized events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::ShortBreak => "shortBreak",
            Mode::LongBreak => "longBreak",
        }
    }

    /// Heading shown above the countdown.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Work => "Work Session",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Conventional follow-up once this mode has finished.
    ///
    /// Purely a hint: nothing switches automatically.
    pub fn next_suggested(&self) -> Mode {
        match self {
            Mode::Work => Mode::ShortBreak,
            Mode::ShortBreak | Mode::LongBreak => Mode::Work,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "work" => Ok(Mode::Work),
            "shortbreak" | "short" | "short_break" => Ok(Mode::ShortBreak),
            "longbreak" | "long" | "long_break" => Ok(Mode::LongBreak),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Configured minutes for each mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeDurations {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
}

impl ModeDurations {
    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_minutes,
            Mode::ShortBreak => self.short_break_minutes,
            Mode::LongBreak => self.long_break_minutes,
        }
    }

    pub fn set_minutes(&mut self, mode: Mode, minutes: u32) {
        match mode {
            Mode::Work => self.work_minutes = minutes,
            Mode::ShortBreak => self.short_break_minutes = minutes,
            Mode::LongBreak => self.long_break_minutes = minutes,
        }
    }
}

impl Default for ModeDurations {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
        }
    }
}

/// Tracks the active mode and turns configured minutes into countdown seconds.
///
/// Updating durations never touches a countdown already in progress; the new
/// values are picked up by the next [`switch_to`](ModeManager::switch_to) or
/// [`restart`](ModeManager::restart).
#[derive(Debug, Clone)]
pub struct ModeManager {
    current: Mode,
    durations: ModeDurations,
}

impl ModeManager {
    pub fn new(durations: ModeDurations) -> Self {
        Self {
            current: Mode::Work,
            durations,
        }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    pub fn durations(&self) -> ModeDurations {
        self.durations
    }

    pub fn set_durations(&mut self, durations: ModeDurations) {
        self.durations = durations;
    }

    /// Countdown length for `mode` in seconds.
    ///
    /// Uses saturating arithmetic so absurd minute values cannot overflow.
    pub fn duration_for(&self, mode: Mode) -> u64 {
        u64::from(self.durations.minutes(mode)).saturating_mul(60)
    }

    /// Make `mode` active and reload the clock with its duration.
    ///
    /// Never starts the clock.
    pub fn switch_to(&mut self, mode: Mode, clock: &mut CountdownClock) -> Event {
        let from = self.current;
        self.current = mode;
        let duration_secs = self.duration_for(mode);
        clock.reset(duration_secs);
        tracing::debug!(%from, to = %mode, duration_secs, "mode switched");
        Event::ModeSwitched {
            from,
            to: mode,
            duration_secs,
            at: Utc::now(),
        }
    }

    /// Reload the clock with the current mode's duration.
    pub fn restart(&self, clock: &mut CountdownClock) -> Event {
        clock.reset(self.duration_for(self.current))
    }
}

impl Default for ModeManager {
    fn default() -> Self {
        Self::new(ModeDurations::default())
    }
}
