//! Composing the new name and performing the rename.

mod error;
mod os_error;

pub use error::{AbortReason, SyscallError, ValidationError};
pub use os_error::describe as describe_os_error;

use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::path::{Target, SEPARATOR};

/// What happened to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameResult {
    Success,
    Skipped,
    ValidationFailed(ValidationError),
    SyscallFailed(SyscallError),
}

impl RenameResult {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RenameResult::ValidationFailed(_) | RenameResult::SyscallFailed(_)
        )
    }

    /// Diagnostic line for failures, `None` otherwise.
    pub fn message(&self) -> Option<String> {
        match self {
            RenameResult::ValidationFailed(err) => Some(err.to_string()),
            RenameResult::SyscallFailed(err) => Some(err.to_string()),
            RenameResult::Success | RenameResult::Skipped => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    pub target: Target,
    pub suffix: Vec<u8>,
    pub result: RenameResult,
}

impl RenameOutcome {
    pub fn new(target: Target, suffix: Vec<u8>, result: RenameResult) -> Self {
        Self {
            target,
            suffix,
            result,
        }
    }
}

/// `basename + suffix`, rejected if it contains a separator anywhere.
pub fn compose_name(basename: &[u8], suffix: &[u8]) -> Result<Vec<u8>, ValidationError> {
    let mut name = Vec::with_capacity(basename.len() + suffix.len());
    name.extend_from_slice(basename);
    name.extend_from_slice(suffix);
    if name.contains(&SEPARATOR) {
        return Err(ValidationError::ContainsSlash);
    }
    Ok(name)
}

/// Rename `target` to `basename + suffix` in the same directory.
///
/// An empty suffix is a no-op. The destination is not checked beforehand:
/// an existing file there is replaced, as `rename(2)` does. Nothing is retried.
pub fn apply(target: Target, suffix: Vec<u8>) -> RenameOutcome {
    if suffix.is_empty() {
        tracing::debug!(path = %target.display_path(), "empty suffix, skipping");
        return RenameOutcome::new(target, suffix, RenameResult::Skipped);
    }

    let new_name = match compose_name(target.basename(), &suffix) {
        Ok(name) => name,
        Err(err) => {
            tracing::debug!(path = %target.display_path(), "rejected new name: {err}");
            return RenameOutcome::new(target, suffix, RenameResult::ValidationFailed(err));
        }
    };

    let from = target.full_path();
    let to = target.sibling(&new_name);
    let result = match fs::rename(as_path(&from), as_path(&to)) {
        Ok(()) => {
            tracing::info!(
                from = %String::from_utf8_lossy(&from),
                to = %String::from_utf8_lossy(&to),
                "renamed"
            );
            RenameResult::Success
        }
        Err(err) => {
            tracing::warn!(path = %target.display_path(), "rename failed: {err}");
            RenameResult::SyscallFailed(SyscallError {
                path: target.display_path(),
                errno: err.raw_os_error(),
                message: describe_os_error(&err),
            })
        }
    };
    RenameOutcome::new(target, suffix, result)
}

fn as_path(bytes: &[u8]) -> &Path {
    Path::new(OsStr::from_bytes(bytes))
}
