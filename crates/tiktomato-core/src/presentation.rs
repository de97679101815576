//! Fullscreen presentation state.
//!
//! The logical `is_fullscreen` flag is owned here; the actual exclusive
//! display mode is owned by the environment behind [`DisplayPort`]. The two
//! may diverge: a denied request still turns the logical flag on, and the
//! overlay is shown inside a normal window.

use chrono::Utc;

use crate::error::DisplayError;
use crate::events::Event;

/// Environment service providing exclusive (fullscreen) display.
pub trait DisplayPort {
    /// Ask for exclusive display. May be refused.
    fn request_exclusive(&mut self) -> Result<(), DisplayError>;

    /// Leave exclusive display.
    fn release_exclusive(&mut self) -> Result<(), DisplayError>;

    /// Whether exclusive display is currently in effect.
    fn is_exclusive(&self) -> bool;
}

/// Display for environments without an exclusive mode. Every request is
/// refused, so only the logical flag changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessDisplay;

impl DisplayPort for HeadlessDisplay {
    fn request_exclusive(&mut self) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported)
    }

    fn release_exclusive(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn is_exclusive(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentationState {
    is_fullscreen: bool,
}

impl PresentationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Turn fullscreen on. The exclusive display request is best-effort.
    pub fn enter<D: DisplayPort + ?Sized>(&mut self, display: &mut D) -> Event {
        if !display.is_exclusive() {
            if let Err(e) = display.request_exclusive() {
                tracing::debug!(error = %e, "exclusive display request failed, continuing");
            }
        }
        self.is_fullscreen = true;
        Event::FullscreenEntered {
            exclusive: display.is_exclusive(),
            at: Utc::now(),
        }
    }

    /// Turn fullscreen off. Safe to call in any state.
    ///
    /// Returns `None` when fullscreen was already off.
    pub fn exit<D: DisplayPort + ?Sized>(&mut self, display: &mut D) -> Option<Event> {
        let was_fullscreen = self.is_fullscreen;
        self.is_fullscreen = false;
        if display.is_exclusive() {
            if let Err(e) = display.release_exclusive() {
                tracing::warn!(error = %e, "failed to release exclusive display");
            }
        }
        was_fullscreen.then(|| Event::FullscreenExited { at: Utc::now() })
    }

    pub fn toggle<D: DisplayPort + ?Sized>(&mut self, display: &mut D) -> Option<Event> {
        if self.is_fullscreen {
            self.exit(display)
        } else {
            Some(self.enter(display))
        }
    }
}
