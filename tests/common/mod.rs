//! Drives the real binary inside a pseudo-terminal.

#![allow(dead_code, unused_imports)]

use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// How long the output must stay quiet before a read is considered complete.
const SETTLE: Duration = Duration::from_millis(100);

/// Upper bound on waiting for the first byte of a read.
const FIRST_BYTE_TIMEOUT: Duration = Duration::from_secs(5);

pub fn touch(path: impl AsRef<Path>) {
    fs::write(path, b"").expect("Failed to create file");
}

/// True if `needle` occurs anywhere in `haystack`.
pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len().max(1))
        .any(|window| window == needle)
}

pub struct Console {
    writer: Box<dyn Write + Send>,
    output: Arc<Mutex<Vec<u8>>>,
    consumed: usize,
    child: Box<dyn Child + Send + Sync>,
    _master: Box<dyn MasterPty + Send>,
}

impl Console {
    pub fn spawn(cwd: &Path, args: &[&str]) -> Self {
        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize {
                rows: 24,
                cols: 80,
                pixel_width: 0,
                pixel_height: 0,
            })
            .expect("Failed to open pty");

        let mut cmd = CommandBuilder::new(env!("CARGO_BIN_EXE_modname"));
        cmd.args(args);
        cmd.cwd(cwd);
        cmd.env("TERM", "xterm-256color");
        cmd.env_remove("MODNAME_LOG_FILE");

        let child = pair
            .slave
            .spawn_command(cmd)
            .expect("Failed to spawn modname");
        drop(pair.slave);

        let mut reader = pair
            .master
            .try_clone_reader()
            .expect("Failed to clone reader");
        let writer = pair.master.take_writer().expect("Failed to take writer");

        let output = Arc::new(Mutex::new(Vec::new()));
        let output_clone = Arc::clone(&output);
        thread::spawn(move || {
            let mut buffer = [0u8; 1024];
            loop {
                match reader.read(&mut buffer) {
                    Ok(0) | Err(_) => break,
                    Ok(count) => {
                        if let Ok(mut output) = output_clone.lock() {
                            output.extend_from_slice(&buffer[..count]);
                        }
                    }
                }
            }
        });

        Self {
            writer,
            output,
            consumed: 0,
            child,
            _master: pair.master,
        }
    }

    pub fn write_console(&mut self, data: &[u8]) {
        self.writer.write_all(data).expect("Failed to write to pty");
        self.writer.flush().expect("Failed to flush pty");
    }

    /// Wait for output to start, then collect until it goes quiet.
    pub fn read_console(&mut self) -> Vec<u8> {
        let deadline = Instant::now() + FIRST_BYTE_TIMEOUT;
        while self.len() == self.consumed && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        self.read_available()
    }

    /// Collect whatever arrives until output goes quiet, possibly nothing.
    pub fn read_available(&mut self) -> Vec<u8> {
        let mut seen = self.len();
        loop {
            thread::sleep(SETTLE);
            let now = self.len();
            if now == seen {
                break;
            }
            seen = now;
        }
        let output = self.output.lock().expect("output lock poisoned");
        let chunk = output[self.consumed..seen].to_vec();
        drop(output);
        self.consumed = seen;
        chunk
    }

    /// Read until `needle` shows up or the first-byte timeout passes.
    pub fn read_until(&mut self, needle: &[u8]) -> Vec<u8> {
        let deadline = Instant::now() + FIRST_BYTE_TIMEOUT;
        let mut collected = Vec::new();
        while !contains(&collected, needle) && Instant::now() < deadline {
            collected.extend(self.read_available());
        }
        collected
    }

    pub fn wait(&mut self) -> u32 {
        self.child
            .wait()
            .expect("Failed to wait for modname")
            .exit_code()
    }

    pub fn pid(&self) -> u32 {
        self.child.process_id().expect("child has no pid")
    }

    fn len(&self) -> usize {
        self.output.lock().map(|output| output.len()).unwrap_or(0)
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
