//! Wiring the batch to the real terminal.

use std::io;

use crate::args::Cli;
use crate::batch::{BatchController, BatchStatus};
use crate::terminal::{CrosstermRawMode, RestoreGuard, TerminalSession};

/// Run the whole batch on stdin/stdout.
///
/// The terminal is restored before this returns, on success and on error.
pub fn run(cli: &Cli) -> io::Result<BatchStatus> {
    let arguments = cli.arguments();
    tracing::debug!(count = arguments.len(), "starting batch");

    let session = TerminalSession::open(io::stdout(), CrosstermRawMode)?;
    let mut session = scopeguard::guard(session, |mut session| {
        if let Err(err) = session.close() {
            tracing::warn!("failed to restore terminal: {err}");
        }
    });
    let _restore = RestoreGuard::install(session.state())?;

    let report =
        BatchController::new(&mut *session, io::stdin().lock(), cli.policy()).run(&arguments)?;
    tracing::info!(
        processed = report.outcomes.len(),
        status = ?report.status,
        "batch finished"
    );

    let mut session = scopeguard::ScopeGuard::into_inner(session);
    session.close()?;
    Ok(report.status)
}
