use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::args::LogArgs;

/// Install a file-backed subscriber when a log file is configured.
///
/// Without one, tracing events are dropped: stdout and stderr share the
/// terminal with the prompt and must carry nothing else.
pub fn init_tracing(args: &LogArgs) -> io::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let filter = EnvFilter::try_new(&args.log_level).map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid log filter '{}': {err}", args.log_level),
        )
    })?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
