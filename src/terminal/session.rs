use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::terminal::mode::RawMode;
use crate::terminal::sequences::{
    CARRIAGE_RETURN, DISABLE_BRACKETED_PASTE, ENABLE_BRACKETED_PASTE, LINE_END,
};

/// Terminal state shared between the session and the emergency restore path.
#[derive(Debug, Default)]
pub struct SessionState {
    raw_active: AtomicBool,
    paste_enabled: AtomicBool,
    line_open: AtomicBool,
    released: AtomicBool,
}

impl SessionState {
    pub fn is_raw_active(&self) -> bool {
        self.raw_active.load(Ordering::SeqCst)
    }

    pub fn is_paste_enabled(&self) -> bool {
        self.paste_enabled.load(Ordering::SeqCst)
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    /// True for exactly one caller; every later call gets `false`.
    pub fn claim_release(&self) -> bool {
        !self.released.swap(true, Ordering::SeqCst)
    }

    /// Bytes that put the terminal back the way the session found it.
    pub fn release_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        if self.line_open.load(Ordering::SeqCst) {
            bytes.extend_from_slice(LINE_END);
        }
        if self.is_paste_enabled() {
            bytes.extend_from_slice(DISABLE_BRACKETED_PASTE);
            bytes.extend_from_slice(CARRIAGE_RETURN);
        }
        bytes
    }
}

/// Owns raw mode and bracketed-paste mode for a whole batch run.
///
/// Paste mode is switched on right before the first prompt, so a run that
/// never prompts leaves the output stream untouched. [`close`](Self::close)
/// undoes whatever was switched on and is idempotent.
pub struct TerminalSession<W: Write, M: RawMode> {
    out: W,
    mode: M,
    state: Arc<SessionState>,
}

impl<W: Write, M: RawMode> TerminalSession<W, M> {
    pub fn open(out: W, mut mode: M) -> io::Result<Self> {
        let state = Arc::new(SessionState::default());
        let raw = mode.enter()?;
        state.raw_active.store(raw, Ordering::SeqCst);
        tracing::debug!(raw, "terminal session opened");
        Ok(Self { out, mode, state })
    }

    pub fn state(&self) -> Arc<SessionState> {
        Arc::clone(&self.state)
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.out
    }

    /// Prepare for a prompt line.
    pub fn begin_line(&mut self) -> io::Result<()> {
        if !self.state.paste_enabled.swap(true, Ordering::SeqCst) {
            self.out.write_all(ENABLE_BRACKETED_PASTE)?;
        }
        self.state.line_open.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Terminate the open prompt line, if any.
    pub fn end_line(&mut self) -> io::Result<()> {
        if self.state.line_open.swap(false, Ordering::SeqCst) {
            self.out.write_all(LINE_END)?;
        }
        self.out.flush()
    }

    /// Write one diagnostic line on its own row.
    pub fn report(&mut self, message: &str) -> io::Result<()> {
        self.end_line()?;
        self.out.write_all(message.as_bytes())?;
        self.out.write_all(LINE_END)?;
        self.out.flush()
    }

    pub fn close(&mut self) -> io::Result<()> {
        if !self.state.claim_release() {
            return Ok(());
        }
        let bytes = self.state.release_bytes();
        let written = self.out.write_all(&bytes).and_then(|()| self.out.flush());
        let restored = if self.state.is_raw_active() {
            self.mode.leave()
        } else {
            Ok(())
        };
        tracing::debug!("terminal session closed");
        written.and(restored)
    }
}
