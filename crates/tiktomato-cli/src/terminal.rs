//! Terminal stand-in for exclusive display: the alternate screen buffer.

use std::io::{self, IsTerminal};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tiktomato_core::{DisplayError, DisplayPort};

#[derive(Debug, Default)]
pub struct TerminalDisplay {
    active: bool,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayPort for TerminalDisplay {
    fn request_exclusive(&mut self) -> Result<(), DisplayError> {
        let mut stdout = io::stdout();
        if !stdout.is_terminal() {
            return Err(DisplayError::Denied("stdout is not a terminal".into()));
        }
        execute!(stdout, EnterAlternateScreen, Clear(ClearType::All), MoveTo(0, 0))?;
        self.active = true;
        Ok(())
    }

    fn release_exclusive(&mut self) -> Result<(), DisplayError> {
        self.active = false;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen)?;
        Ok(())
    }

    fn is_exclusive(&self) -> bool {
        self.active
    }
}
