use thiserror::Error;

/// Rejections decided from the input bytes alone, before any syscall.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Filename too long!")]
    TooLong { len: usize },

    #[error("New filename cannot contain a slash.")]
    ContainsSlash,
}

/// The OS refused the rename.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot rename file '{path}': {message}")]
pub struct SyscallError {
    /// Full path of the file that was being renamed.
    pub path: String,
    pub errno: Option<i32>,
    /// Platform error text, e.g. "No such file or directory".
    pub message: String,
}

/// Reasons the whole batch stops that are not tied to a single rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AbortReason {
    #[error("Interrupted.")]
    Interrupted,

    #[error("Unexpected end of input.")]
    InputClosed,
}
