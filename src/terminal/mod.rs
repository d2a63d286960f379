//! Terminal modes for the duration of a batch run.

mod guard;
mod mode;
pub mod sequences;
mod session;

pub use guard::RestoreGuard;
pub use mode::{CrosstermRawMode, NoRawMode, RawMode};
pub use session::{SessionState, TerminalSession};
