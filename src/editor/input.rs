//! Decoding raw terminal bytes into editing keys.

use std::io::{self, Read};

use crate::terminal::sequences::{PASTE_END, PASTE_START};

/// Longest CSI parameter run kept before the sequence is abandoned.
const MAX_CSI_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Insert(u8),
    Backspace,
    Enter,
    /// Ctrl-U: drop the whole suffix.
    KillLine,
    /// Ctrl-C; raw mode delivers it as a byte instead of SIGINT.
    Interrupt,
    /// Ctrl-D.
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    Ground,
    Escape,
    Csi,
    Ss3,
}

/// Byte-at-a-time key decoder.
///
/// Lives for the whole batch so that a CRLF pair or an escape sequence split
/// across two prompts is still recognised. Escape sequences are swallowed;
/// the only ones that matter are the bracketed-paste markers, inside which
/// line breaks are dropped instead of committing.
#[derive(Debug)]
pub struct InputDecoder {
    state: DecodeState,
    params: Vec<u8>,
    in_paste: bool,
    after_cr: bool,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self {
            state: DecodeState::Ground,
            params: Vec::with_capacity(MAX_CSI_LEN),
            in_paste: false,
            after_cr: false,
        }
    }

    pub fn in_paste(&self) -> bool {
        self.in_paste
    }

    /// Feed one byte; `None` when it does not complete a key.
    pub fn decode(&mut self, byte: u8) -> Option<Key> {
        let after_cr = std::mem::take(&mut self.after_cr);
        match self.state {
            DecodeState::Ground => self.ground(byte, after_cr),
            DecodeState::Escape => match byte {
                b'[' => {
                    self.params.clear();
                    self.state = DecodeState::Csi;
                    None
                }
                b'O' => {
                    self.state = DecodeState::Ss3;
                    None
                }
                // A lone ESC keypress; the byte after it is a key of its own.
                _ => {
                    self.state = DecodeState::Ground;
                    self.ground(byte, after_cr)
                }
            },
            DecodeState::Ss3 => {
                self.state = DecodeState::Ground;
                None
            }
            DecodeState::Csi => {
                self.csi(byte);
                None
            }
        }
    }

    fn ground(&mut self, byte: u8, after_cr: bool) -> Option<Key> {
        match byte {
            b'\r' => {
                self.after_cr = true;
                self.line_break()
            }
            b'\n' if after_cr => None,
            b'\n' => self.line_break(),
            0x7f | 0x08 => Some(Key::Backspace),
            0x03 => Some(Key::Interrupt),
            0x04 => Some(Key::EndOfInput),
            0x15 => Some(Key::KillLine),
            0x1b => {
                self.state = DecodeState::Escape;
                None
            }
            0x00..=0x1f => None,
            _ => Some(Key::Insert(byte)),
        }
    }

    fn csi(&mut self, byte: u8) {
        self.params.push(byte);
        if (0x40..=0x7e).contains(&byte) {
            if self.params == PASTE_START {
                self.in_paste = true;
            } else if self.params == PASTE_END {
                self.in_paste = false;
            } else {
                tracing::trace!(sequence = ?self.params, "ignoring escape sequence");
            }
            self.state = DecodeState::Ground;
        } else if self.params.len() >= MAX_CSI_LEN {
            self.state = DecodeState::Ground;
        }
    }

    fn line_break(&self) -> Option<Key> {
        if self.in_paste {
            None
        } else {
            Some(Key::Enter)
        }
    }
}

impl Default for InputDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocking read of a single byte; `None` at end of input.
pub fn read_byte<R: Read>(input: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match input.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}
