//! User session settings and their persisted form.
//!
//! Settings are read once at startup and written back only when the user
//! applies them. Reads fail soft: anything missing or unparseable falls back
//! to its default. Writes are fire-and-forget.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::background::DEFAULT_IMAGES;
use crate::error::ValidationError;
use crate::storage::SettingsStore;
use crate::timer::{Mode, ModeDurations};

pub const KEY_WORK: &str = "workTime";
pub const KEY_SHORT_BREAK: &str = "shortBreak";
pub const KEY_LONG_BREAK: &str = "longBreak";
pub const KEY_BACKGROUND: &str = "bgImage";
pub const KEY_FONT: &str = "countdownFont";

/// Every persisted key, in write order.
pub const KEYS: [&str; 5] = [KEY_WORK, KEY_SHORT_BREAK, KEY_LONG_BREAK, KEY_BACKGROUND, KEY_FONT];

/// Typeface used for the countdown digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CountdownFont {
    #[default]
    Bitter,
    Cinzel,
    BlackOps,
    EduNsw,
}

impl CountdownFont {
    pub const ALL: [CountdownFont; 4] = [
        CountdownFont::Bitter,
        CountdownFont::Cinzel,
        CountdownFont::BlackOps,
        CountdownFont::EduNsw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownFont::Bitter => "bitter",
            CountdownFont::Cinzel => "cinzel",
            CountdownFont::BlackOps => "blackops",
            CountdownFont::EduNsw => "edunsw",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CountdownFont::Bitter => "Bitter",
            CountdownFont::Cinzel => "Cinzel",
            CountdownFont::BlackOps => "Black Ops One",
            CountdownFont::EduNsw => "Edu NSW ACT Cursive",
        }
    }
}

impl fmt::Display for CountdownFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountdownFont {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CountdownFont::ALL
            .into_iter()
            .find(|font| font.as_str() == s.trim())
            .ok_or_else(|| ValidationError::invalid(KEY_FONT, format!("unknown font '{s}'")))
    }
}

/// User-tunable settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(flatten)]
    pub durations: ModeDurations,
    /// URL or `data:` URL. `None` means the first default image.
    pub background_image: Option<String>,
    #[serde(default)]
    pub font: CountdownFont,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            durations: ModeDurations::default(),
            background_image: Some(DEFAULT_IMAGES[0].to_string()),
            font: CountdownFont::default(),
        }
    }
}

impl SessionConfig {
    pub fn minutes(&self, mode: Mode) -> u32 {
        self.durations.minutes(mode)
    }

    /// Background to display, substituting the default when unset.
    pub fn background_or_default(&self) -> &str {
        self.background_image
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_IMAGES[0])
    }

    /// Reject zero-minute durations.
    ///
    /// # Errors
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for mode in Mode::ALL {
            validate_minutes(key_for(mode), self.minutes(mode))?;
        }
        Ok(())
    }

    /// Persisted string form of `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            KEY_WORK => Some(self.durations.work_minutes.to_string()),
            KEY_SHORT_BREAK => Some(self.durations.short_break_minutes.to_string()),
            KEY_LONG_BREAK => Some(self.durations.long_break_minutes.to_string()),
            KEY_BACKGROUND => Some(self.background_or_default().to_string()),
            KEY_FONT => Some(self.font.as_str().to_string()),
            _ => None,
        }
    }

    /// Update one value from its persisted string form.
    ///
    /// # Errors
    /// Returns an error for unknown keys, non-numeric or zero durations and
    /// unknown fonts.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        match key {
            KEY_WORK | KEY_SHORT_BREAK | KEY_LONG_BREAK => {
                let minutes = value.trim().parse::<u32>().map_err(|_| {
                    ValidationError::invalid(key, format!("cannot parse '{value}' as minutes"))
                })?;
                let minutes = validate_minutes(key, minutes)?;
                let mode = match key {
                    KEY_WORK => Mode::Work,
                    KEY_SHORT_BREAK => Mode::ShortBreak,
                    _ => Mode::LongBreak,
                };
                self.durations.set_minutes(mode, minutes);
            }
            KEY_BACKGROUND => {
                self.background_image = (!value.is_empty()).then(|| value.to_string());
            }
            KEY_FONT => self.font = value.parse()?,
            _ => return Err(ValidationError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

/// Persisted key holding the minutes for `mode`.
pub fn key_for(mode: Mode) -> &'static str {
    match mode {
        Mode::Work => KEY_WORK,
        Mode::ShortBreak => KEY_SHORT_BREAK,
        Mode::LongBreak => KEY_LONG_BREAK,
    }
}

pub(crate) fn validate_minutes(field: &str, minutes: u32) -> Result<u32, ValidationError> {
    if minutes == 0 {
        return Err(ValidationError::invalid(field, "must be at least 1 minute"));
    }
    Ok(minutes)
}

fn read<S: SettingsStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "settings read failed, using default");
            None
        }
    }
}

fn read_minutes<S: SettingsStore + ?Sized>(store: &S, key: &str, default: u32) -> u32 {
    read(store, key)
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|&m| m >= 1)
        .unwrap_or(default)
}

/// Read settings from `store`, substituting defaults for anything missing
/// or invalid. Never fails.
pub fn load_settings<S: SettingsStore + ?Sized>(store: &S) -> SessionConfig {
    let defaults = ModeDurations::default();
    let durations = ModeDurations {
        work_minutes: read_minutes(store, KEY_WORK, defaults.work_minutes),
        short_break_minutes: read_minutes(store, KEY_SHORT_BREAK, defaults.short_break_minutes),
        long_break_minutes: read_minutes(store, KEY_LONG_BREAK, defaults.long_break_minutes),
    };
    let background_image = read(store, KEY_BACKGROUND)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGES[0].to_string());
    let font = read(store, KEY_FONT)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();

    SessionConfig {
        durations,
        background_image: Some(background_image),
        font,
    }
}

/// Write every settings key. Failures are logged, never returned.
pub fn save_settings<S: SettingsStore + ?Sized>(store: &S, config: &SessionConfig) {
    for key in KEYS {
        if let Some(value) = config.get(key) {
            write(store, key, &value);
        }
    }
}

pub(crate) fn write<S: SettingsStore + ?Sized>(store: &S, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        tracing::warn!(key, error = %e, "settings write failed");
    }
}
