use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, IsTerminal};

/// Switches the controlling terminal in and out of raw mode.
pub trait RawMode {
    /// Returns `false` when there is no terminal to switch.
    fn enter(&mut self) -> io::Result<bool>;

    fn leave(&mut self) -> io::Result<()>;
}

/// Raw mode through crossterm, which saves and restores the prior termios.
#[derive(Debug, Default)]
pub struct CrosstermRawMode;

impl RawMode for CrosstermRawMode {
    fn enter(&mut self) -> io::Result<bool> {
        if !io::stdin().is_terminal() {
            tracing::debug!("stdin is not a terminal, leaving line discipline alone");
            return Ok(false);
        }
        enable_raw_mode()?;
        Ok(true)
    }

    fn leave(&mut self) -> io::Result<()> {
        disable_raw_mode()
    }
}

/// For sessions that write to a buffer instead of a terminal.
#[derive(Debug, Default)]
pub struct NoRawMode;

impl RawMode for NoRawMode {
    fn enter(&mut self) -> io::Result<bool> {
        Ok(false)
    }

    fn leave(&mut self) -> io::Result<()> {
        Ok(())
    }
}
