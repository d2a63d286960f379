//! Per-target line editing: prompt, echo, and a tail-only suffix buffer.
//!
//! [`LineEditor`] is a plain state machine fed one [`Key`] at a time, so it
//! can be driven from a script just as well as from a terminal.
//!
//! ```text
//! Prompting --prompt()--> Editing --Enter--> Committed
//! ```

mod buffer;
mod input;

pub use buffer::SuffixBuffer;
pub use input::{read_byte, InputDecoder, Key};

use std::io::{self, Read, Write};

use crate::rename::AbortReason;
use crate::terminal::sequences::{ERASE_BACK, PROMPT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Prompting,
    Editing,
    Committed,
}

/// Result of handling a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Committed,
    Aborted(AbortReason),
}

/// How an editing session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Committed(Vec<u8>),
    Aborted(AbortReason),
}

#[derive(Debug)]
pub struct LineEditor<'a> {
    basename: &'a [u8],
    suffix: SuffixBuffer,
    state: EditorState,
}

impl<'a> LineEditor<'a> {
    pub fn new(basename: &'a [u8]) -> Self {
        Self {
            basename,
            suffix: SuffixBuffer::new(),
            state: EditorState::Prompting,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn suffix(&self) -> &[u8] {
        self.suffix.as_bytes()
    }

    /// Show `"> "` and the basename. No-op outside `Prompting`.
    pub fn prompt<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.state != EditorState::Prompting {
            return Ok(());
        }
        out.write_all(PROMPT)?;
        out.write_all(self.basename)?;
        out.flush()?;
        self.state = EditorState::Editing;
        Ok(())
    }

    /// Apply one key, echoing to `out`.
    ///
    /// Backspace never reaches into the basename. The line break itself is
    /// not echoed; the caller closes the line after a commit.
    pub fn handle<W: Write>(&mut self, key: Key, out: &mut W) -> io::Result<Step> {
        match self.state {
            EditorState::Prompting => self.prompt(out)?,
            EditorState::Editing => {}
            EditorState::Committed => return Ok(Step::Committed),
        }

        match key {
            Key::Insert(byte) => {
                self.suffix.push(byte);
                out.write_all(&[byte])?;
            }
            Key::Backspace => {
                // One cell per character: UTF-8 continuation bytes are dropped
                // without moving the cursor.
                if let Some(byte) = self.suffix.pop() {
                    if !is_continuation(byte) {
                        out.write_all(ERASE_BACK)?;
                    }
                }
            }
            Key::KillLine => {
                for _ in 0..self.suffix.clear() {
                    out.write_all(ERASE_BACK)?;
                }
            }
            Key::Enter => {
                self.state = EditorState::Committed;
                tracing::debug!(len = self.suffix.len(), "suffix committed");
                return Ok(Step::Committed);
            }
            Key::Interrupt => return Ok(Step::Aborted(AbortReason::Interrupted)),
            Key::EndOfInput => {
                if self.suffix.is_empty() {
                    return Ok(Step::Aborted(AbortReason::InputClosed));
                }
            }
        }
        out.flush()?;
        Ok(Step::Continue)
    }

    /// Prompt, then read and decode bytes from `input` until the line ends.
    ///
    /// End of input counts as [`AbortReason::InputClosed`].
    pub fn run<R: Read, W: Write>(
        mut self,
        input: &mut R,
        decoder: &mut InputDecoder,
        out: &mut W,
    ) -> io::Result<EditOutcome> {
        self.prompt(out)?;
        loop {
            let Some(byte) = read_byte(input)? else {
                return Ok(EditOutcome::Aborted(AbortReason::InputClosed));
            };
            let Some(key) = decoder.decode(byte) else {
                continue;
            };
            match self.handle(key, out)? {
                Step::Continue => {}
                Step::Committed => return Ok(EditOutcome::Committed(self.suffix.into_bytes())),
                Step::Aborted(reason) => return Ok(EditOutcome::Aborted(reason)),
            }
        }
    }
}

fn is_continuation(byte: u8) -> bool {
    (0x80..=0xbf).contains(&byte)
}
