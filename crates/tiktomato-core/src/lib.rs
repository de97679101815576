//! # Tik Tomato Core Library
//!
//! This library provides the core logic for the Tik Tomato Pomodoro timer.
//! It is an embeddable controller: the host environment owns the real
//! key-value store, the fullscreen mechanism and the once-per-second timer,
//! and feeds ticks and user actions into the controller.
//!
//! ## Architecture
//!
//! - **Countdown Clock**: a tick-driven state machine; every tick subtracts
//!   exactly one second and reaching zero raises a one-shot finished event
//! - **Mode Manager**: Work / Short Break / Long Break and their durations
//! - **Presentation State**: logical fullscreen flag, exclusive display
//!   delegated to a [`DisplayPort`]
//! - **Settings**: fail-soft load and fire-and-forget save through a
//!   [`SettingsStore`] (in-memory or SQLite)
//!
//! ## Key Components
//!
//! - [`PomodoroController`]: wires the pieces together
//! - [`SessionConfig`]: user-tunable durations, background and font
//! - [`Config`]: host configuration (TOML)

pub mod background;
pub mod controller;
pub mod error;
pub mod events;
pub mod format;
pub mod presentation;
pub mod settings;
pub mod storage;
pub mod timer;

pub use controller::PomodoroController;
pub use error::{ConfigError, DisplayError, ImageError, StorageError, ValidationError};
pub use events::Event;
pub use presentation::{DisplayPort, HeadlessDisplay, PresentationState};
pub use settings::{load_settings, save_settings, CountdownFont, SessionConfig};
pub use storage::{Config, MemoryStore, SettingsStore, SqliteStore};
pub use timer::{CountdownClock, Mode, ModeDurations, ModeManager};
