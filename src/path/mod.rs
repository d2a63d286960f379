//! Splitting a raw argument into the directory and the name being edited.
//!
//! Works on bytes only; nothing here touches the filesystem.

use crate::rename::ValidationError;

/// Path separator byte.
pub const SEPARATOR: u8 = b'/';

/// Longest basename accepted for editing, in bytes.
pub const MAX_BASENAME_LEN: usize = 512;

/// A rename target derived from one command-line argument.
///
/// `directory` keeps its trailing separator (`"dir/"`, `"/"`) or is empty for
/// the current directory, so `directory + basename` is always the full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    directory: Vec<u8>,
    basename: Vec<u8>,
}

impl Target {
    /// Strip trailing separators, then split on the last remaining one.
    ///
    /// The basename may come out empty (`""`, `"/"`); callers skip those.
    pub fn parse(argument: &[u8]) -> Self {
        let trimmed_len = argument
            .iter()
            .rposition(|&byte| byte != SEPARATOR)
            .map_or(0, |pos| pos + 1);
        let trimmed = &argument[..trimmed_len];

        let (directory, basename) = match trimmed.iter().rposition(|&byte| byte == SEPARATOR) {
            Some(pos) => trimmed.split_at(pos + 1),
            None => (&trimmed[..0], trimmed),
        };

        Self {
            directory: directory.to_vec(),
            basename: basename.to_vec(),
        }
    }

    /// Enforce [`MAX_BASENAME_LEN`] before the basename is ever displayed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.basename.len() > MAX_BASENAME_LEN {
            return Err(ValidationError::TooLong {
                len: self.basename.len(),
            });
        }
        Ok(())
    }

    pub fn directory(&self) -> &[u8] {
        &self.directory
    }

    pub fn basename(&self) -> &[u8] {
        &self.basename
    }

    /// Nothing left to rename once separators are stripped.
    pub fn is_empty(&self) -> bool {
        self.basename.is_empty()
    }

    pub fn full_path(&self) -> Vec<u8> {
        self.sibling(&self.basename)
    }

    /// Path of `name` placed in the same directory as this target.
    pub fn sibling(&self, name: &[u8]) -> Vec<u8> {
        let mut path = Vec::with_capacity(self.directory.len() + name.len());
        path.extend_from_slice(&self.directory);
        path.extend_from_slice(name);
        path
    }

    /// Full path for messages; invalid UTF-8 is replaced.
    pub fn display_path(&self) -> String {
        String::from_utf8_lossy(&self.full_path()).into_owned()
    }
}
