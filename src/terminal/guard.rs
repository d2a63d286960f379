use crossterm::terminal::disable_raw_mode;
use parking_lot::Mutex;
use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::{Handle, Signals};
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;

use crate::terminal::session::SessionState;

type Cleanup = Box<dyn FnOnce() + Send + 'static>;

/// Restores the terminal when the run ends abnormally.
///
/// Covers panics (through the panic hook) and termination signals (through a
/// watcher thread that exits with `128 + signo` afterwards). Normal shutdown
/// goes through `TerminalSession::close`; both paths share the one-shot
/// release in [`SessionState`].
pub struct RestoreGuard {
    cleanup: Arc<Mutex<Option<Cleanup>>>,
    signals: Handle,
    watcher: Option<thread::JoinHandle<()>>,
}

impl RestoreGuard {
    pub fn install(state: Arc<SessionState>) -> io::Result<Self> {
        let cleanup: Cleanup = Box::new(move || emergency_release(&state));
        let cleanup = Arc::new(Mutex::new(Some(cleanup)));
        install_panic_hook(Arc::clone(&cleanup));

        let mut signals = Signals::new([SIGTERM, SIGINT, SIGHUP, SIGQUIT])?;
        let handle = signals.handle();
        let slot = Arc::clone(&cleanup);
        let watcher = thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                tracing::warn!(signal, "terminated by signal");
                run_cleanup(&slot);
                std::process::exit(128 + signal);
            }
        });

        Ok(Self {
            cleanup,
            signals: handle,
            watcher: Some(watcher),
        })
    }
}

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        run_cleanup(&self.cleanup);
        self.signals.close();
        if let Some(watcher) = self.watcher.take() {
            let _ = watcher.join();
        }
    }
}

fn install_panic_hook(cleanup: Arc<Mutex<Option<Cleanup>>>) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        run_cleanup(&cleanup);
        default_hook(info);
    }));
}

fn run_cleanup(slot: &Mutex<Option<Cleanup>>) {
    let cleanup = slot.lock().take();
    if let Some(cleanup) = cleanup {
        cleanup();
    }
}

fn emergency_release(state: &SessionState) {
    if !state.claim_release() {
        return;
    }
    let mut stdout = io::stdout();
    let _ = stdout.write_all(&state.release_bytes());
    let _ = stdout.flush();
    if state.is_raw_active() {
        let _ = disable_raw_mode();
    }
}
