//! Command-line surface.

use clap::Parser;
use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;
use std::path::PathBuf;

use crate::batch::ErrorPolicy;

#[derive(Debug, Parser)]
#[command(name = "modname")]
#[command(version)]
#[command(about = "Interactively append a suffix to file names, one file at a time")]
pub struct Cli {
    /// Files to rename, in order. Trailing slashes are ignored.
    ///
    /// Options go before the first FILE; anything after it, including names
    /// starting with '-', is taken as a file.
    #[arg(value_name = "FILE", allow_hyphen_values = true)]
    pub files: Vec<OsString>,

    /// Keep going after a failed rename instead of stopping at the first one
    #[arg(long)]
    pub keep_going: bool,

    #[command(flatten)]
    pub log: LogArgs,
}

/// Diagnostics go to a file; the terminal carries only the prompt protocol.
#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    /// Append diagnostic logs to this file
    #[arg(long, value_name = "PATH", env = "MODNAME_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" or "modname=trace"
    #[arg(long, value_name = "FILTER", env = "MODNAME_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn policy(&self) -> ErrorPolicy {
        if self.keep_going {
            ErrorPolicy::KeepGoing
        } else {
            ErrorPolicy::Abort
        }
    }

    /// Arguments as raw bytes, untouched by any UTF-8 conversion.
    pub fn arguments(&self) -> Vec<Vec<u8>> {
        self.files
            .iter()
            .cloned()
            .map(OsStringExt::into_vec)
            .collect()
    }
}
