use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::CountdownFont;
use crate::timer::{Mode, ModeDurations};

/// Every state change in the controller produces an Event.
/// The host prints or renders them; nothing is replayed or stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. Raised once per countdown.
    TimerFinished {
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: Mode,
        to: Mode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Logical fullscreen is on. `exclusive` reports whether the
    /// environment actually granted exclusive display.
    FullscreenEntered {
        exclusive: bool,
        at: DateTime<Utc>,
    },
    FullscreenExited {
        at: DateTime<Utc>,
    },
    SettingsApplied {
        durations: ModeDurations,
        font: CountdownFont,
        at: DateTime<Utc>,
    },
    BackgroundChanged {
        /// Default image index, `None` for custom or uploaded images.
        default_index: Option<usize>,
        at: DateTime<Utc>,
    },
    FontChanged {
        font: CountdownFont,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        mode_label: String,
        remaining_secs: u64,
        display: String,
        is_running: bool,
        finished: bool,
        is_fullscreen: bool,
        exclusive_display: bool,
        settings_applied: bool,
        durations: ModeDurations,
        font: CountdownFont,
        at: DateTime<Utc>,
    },
}
