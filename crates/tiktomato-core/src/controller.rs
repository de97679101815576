//! The timer/mode controller.
//!
//! Owns the draft settings, the [`ModeManager`], the [`CountdownClock`] and
//! the [`PresentationState`], plus the two environment ports: a
//! [`SettingsStore`] and a [`DisplayPort`]. Every method is a complete
//! transition; the environment serializes ticks and user actions by holding
//! `&mut` access.
//!
//! Reaching zero never leaves fullscreen: the finished overlay offers the
//! mode choice in place, and only an explicit exit or escape leaves.

use chrono::Utc;

use crate::background::{self, DEFAULT_IMAGES};
use crate::error::{ImageError, ValidationError};
use crate::events::Event;
use crate::format::format_hms;
use crate::presentation::{DisplayPort, PresentationState};
use crate::settings::{self, CountdownFont, SessionConfig};
use crate::storage::SettingsStore;
use crate::timer::{CountdownClock, Mode, ModeManager};

pub struct PomodoroController<S, D> {
    store: S,
    display: D,
    /// Draft settings; persisted only by `apply_*` and `enter_focus_mode`.
    config: SessionConfig,
    modes: ModeManager,
    clock: CountdownClock,
    presentation: PresentationState,
    settings_applied: bool,
}

impl<S: SettingsStore, D: DisplayPort> PomodoroController<S, D> {
    /// Load settings from `store` and start in Work mode, paused, windowed.
    pub fn new(store: S, display: D) -> Self {
        let config = settings::load_settings(&store);
        Self::build(store, display, config)
    }

    /// Start from an explicit configuration instead of the stored one.
    ///
    /// # Errors
    /// Returns an error if any duration is zero.
    pub fn with_config(store: S, display: D, config: SessionConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self::build(store, display, config))
    }

    fn build(store: S, display: D, config: SessionConfig) -> Self {
        let modes = ModeManager::new(config.durations);
        let clock = CountdownClock::new(modes.duration_for(modes.current()));
        tracing::debug!(durations = ?config.durations, "controller ready");
        Self {
            store,
            display,
            config,
            modes,
            clock,
            presentation: PresentationState::new(),
            settings_applied: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.modes.current()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.clock.remaining_secs()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.presentation.is_fullscreen()
    }

    /// Whether the environment actually granted exclusive display. May
    /// disagree with [`is_fullscreen`](Self::is_fullscreen).
    pub fn exclusive_display_active(&self) -> bool {
        self.display.is_exclusive()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn settings_applied(&self) -> bool {
        self.settings_applied
    }

    /// Focus mode is offered only after settings have been applied at least
    /// once in this view.
    pub fn can_enter_focus_mode(&self) -> bool {
        self.settings_applied
    }

    /// Seconds the given mode would start from with the current settings.
    pub fn duration_for(&self, mode: Mode) -> u64 {
        self.modes.duration_for(mode)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn snapshot(&self) -> Event {
        let mode = self.mode();
        Event::StateSnapshot {
            mode,
            mode_label: mode.label().to_string(),
            remaining_secs: self.remaining_secs(),
            display: format_hms(self.remaining_secs()),
            is_running: self.is_running(),
            finished: self.is_finished(),
            is_fullscreen: self.is_fullscreen(),
            exclusive_display: self.exclusive_display_active(),
            settings_applied: self.settings_applied,
            durations: self.config.durations,
            font: self.config.font,
            at: Utc::now(),
        }
    }

    // ── Countdown ────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.clock.start()
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.clock.pause()
    }

    /// Pause when running, start otherwise.
    pub fn toggle_running(&mut self) -> Option<Event> {
        if self.clock.is_running() {
            self.clock.pause()
        } else {
            self.clock.start()
        }
    }

    /// Reload the current mode's duration from the current settings.
    pub fn reset(&mut self) -> Event {
        self.modes.restart(&mut self.clock)
    }

    pub fn switch_mode(&mut self, mode: Mode) -> Event {
        self.modes.switch_to(mode, &mut self.clock)
    }

    /// Advance the countdown by one second. Driven by the environment.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.clock.tick();
        if event.is_some() {
            tracing::info!(mode = %self.mode(), fullscreen = self.is_fullscreen(), "countdown finished");
        }
        event
    }

    // ── Presentation ─────────────────────────────────────────────────

    pub fn enter_fullscreen(&mut self) -> Event {
        self.presentation.enter(&mut self.display)
    }

    pub fn exit_fullscreen(&mut self) -> Option<Event> {
        self.presentation.exit(&mut self.display)
    }

    pub fn toggle_fullscreen(&mut self) -> Option<Event> {
        self.presentation.toggle(&mut self.display)
    }

    /// Escape/cancel input. Leaves fullscreen; nothing else reacts to it.
    pub fn handle_escape(&mut self) -> Option<Event> {
        self.exit_fullscreen()
    }

    /// Persist the draft settings, then enter fullscreen.
    pub fn enter_focus_mode(&mut self) -> Vec<Event> {
        let applied = self.apply_draft();
        let entered = self.enter_fullscreen();
        vec![applied, entered]
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Replace the settings and persist them.
    ///
    /// The running countdown is untouched; new durations apply from the next
    /// mode switch or reset.
    ///
    /// # Errors
    /// Returns an error if any duration is zero. Nothing is stored then.
    pub fn apply_settings(&mut self, config: SessionConfig) -> Result<Event, ValidationError> {
        config.validate()?;
        self.config = config;
        self.modes.set_durations(self.config.durations);
        Ok(self.apply_draft())
    }

    /// Persist the current draft settings.
    pub fn apply_draft(&mut self) -> Event {
        settings::save_settings(&self.store, &self.config);
        self.settings_applied = true;
        tracing::info!(durations = ?self.config.durations, font = %self.config.font, "settings applied");
        Event::SettingsApplied {
            durations: self.config.durations,
            font: self.config.font,
            at: Utc::now(),
        }
    }

    /// Change the draft minutes for `mode`.
    ///
    /// # Errors
    /// Returns an error for zero minutes.
    pub fn set_minutes(&mut self, mode: Mode, minutes: u32) -> Result<(), ValidationError> {
        let minutes = settings::validate_minutes(settings::key_for(mode), minutes)?;
        self.config.durations.set_minutes(mode, minutes);
        self.modes.set_durations(self.config.durations);
        Ok(())
    }

    /// # Errors
    /// Returns an error for zero minutes.
    pub fn set_work_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.set_minutes(Mode::Work, minutes)
    }

    /// # Errors
    /// Returns an error for zero minutes.
    pub fn set_short_break_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.set_minutes(Mode::ShortBreak, minutes)
    }

    /// # Errors
    /// Returns an error for zero minutes.
    pub fn set_long_break_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.set_minutes(Mode::LongBreak, minutes)
    }

    /// Change the countdown font. Persisted immediately.
    pub fn set_font(&mut self, font: CountdownFont) -> Event {
        self.config.font = font;
        settings::write(&self.store, settings::KEY_FONT, font.as_str());
        Event::FontChanged {
            font,
            at: Utc::now(),
        }
    }

    /// Use `reference` (URL or `data:` URL) as the draft background.
    pub fn select_background(&mut self, reference: impl Into<String>) -> Event {
        let reference = reference.into();
        let default_index = background::default_index(&reference);
        self.config.background_image = Some(reference);
        Event::BackgroundChanged {
            default_index,
            at: Utc::now(),
        }
    }

    /// # Errors
    /// Returns an error if `index` is not a built-in image.
    pub fn select_default_background(&mut self, index: usize) -> Result<Event, ValidationError> {
        let reference = DEFAULT_IMAGES
            .get(index)
            .ok_or_else(|| ValidationError::OutOfBounds {
                collection: "default images".into(),
                index,
                len: DEFAULT_IMAGES.len(),
            })?;
        Ok(self.select_background(*reference))
    }

    /// Turn an uploaded file into an image reference and select it.
    ///
    /// # Errors
    /// Returns an error when the bytes are not an image; the previous
    /// background stays selected.
    pub fn upload_background_image(
        &mut self,
        bytes: &[u8],
        declared_type: Option<&str>,
    ) -> Result<String, ImageError> {
        let reference = background::encode_data_url(bytes, declared_type)?;
        self.select_background(reference.clone());
        tracing::debug!(bytes = bytes.len(), "background uploaded");
        Ok(reference)
    }
}
