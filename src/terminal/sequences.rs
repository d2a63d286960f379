//! Byte sequences exchanged with the terminal.

/// `ESC [ ? 2004 h`: enable bracketed paste.
pub const ENABLE_BRACKETED_PASTE: &[u8] = b"\x1b[?2004h";

/// `ESC [ ? 2004 l`: disable bracketed paste.
pub const DISABLE_BRACKETED_PASTE: &[u8] = b"\x1b[?2004l";

/// CSI parameter and final byte the terminal sends before pasted text.
pub const PASTE_START: &[u8] = b"200~";

/// CSI parameter and final byte the terminal sends after pasted text.
pub const PASTE_END: &[u8] = b"201~";

pub const PROMPT: &[u8] = b"> ";

pub const LINE_END: &[u8] = b"\r\n";

pub const CARRIAGE_RETURN: &[u8] = b"\r";

/// Visually erase the cell left of the cursor.
pub const ERASE_BACK: &[u8] = b"\x08 \x08";
