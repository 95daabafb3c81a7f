//! Streaming subprocess execution with a deadline.
//!
//! This module runs the long external steps of a sweep (test-application builds and
//! simulations). It provides:
//! 1. **Streaming:** Stdout and stderr are read on background threads and merged into
//!    one lazy sequence of lines, available while the child is still running.
//! 2. **Deadline:** The whole step, output and exit, is bounded by one timeout. On
//!    expiry the child is killed and the step reports `TimedOut`, which is distinct
//!    from a non-zero exit.
//! 3. **Tee:** `run_tee` copies every line to the console and to a log file as it arrives.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// Poll interval while waiting for the child to exit after its output closed.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How a streamed step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The child exited on its own.
    Exited(ExitStatus),
    /// The deadline passed and the child was killed.
    TimedOut,
}

impl ProcessOutcome {
    /// Returns `true` for a zero exit status.
    pub fn success(&self) -> bool {
        matches!(self, Self::Exited(status) if status.success())
    }
}

/// Output lines of a running child, in arrival order.
///
/// Iteration ends when both streams are closed or the deadline passes. Each line
/// keeps its trailing newline; invalid UTF-8 is replaced.
#[derive(Debug)]
pub struct OutputLines {
    rx: Receiver<String>,
    deadline: Instant,
    timed_out: bool,
    drained: bool,
}

impl Iterator for OutputLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.timed_out || self.drained {
            return None;
        }
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        match self.rx.recv_timeout(remaining) {
            Ok(line) => Some(line),
            Err(RecvTimeoutError::Timeout) => {
                self.timed_out = true;
                None
            }
            Err(RecvTimeoutError::Disconnected) => {
                self.drained = true;
                None
            }
        }
    }
}

/// A child process whose output is being streamed.
#[derive(Debug)]
pub struct StreamedProcess {
    child: Child,
    lines: OutputLines,
    readers: Vec<JoinHandle<()>>,
    finished: bool,
}

impl StreamedProcess {
    /// Spawns `command` with piped output and starts the reader threads.
    ///
    /// # Arguments
    ///
    /// * `command` - Fully configured command; its stdio settings are overridden.
    /// * `timeout` - Budget for the whole step, starting now.
    ///
    /// # Errors
    ///
    /// The spawn failure, if the program could not be started.
    pub fn spawn(command: &mut Command, timeout: Duration) -> io::Result<Self> {
        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        debug!(pid = child.id(), ?timeout, "spawned streamed process");

        let (tx, rx) = mpsc::channel();
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_reader(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_reader(stderr, tx));
        }

        Ok(Self {
            child,
            lines: OutputLines {
                rx,
                deadline: Instant::now() + timeout,
                timed_out: false,
                drained: false,
            },
            readers,
            finished: false,
        })
    }

    /// Lazily yields output lines until the streams close or the deadline passes.
    pub fn lines(&mut self) -> &mut OutputLines {
        &mut self.lines
    }

    /// Waits for the child within what is left of the deadline.
    ///
    /// # Errors
    ///
    /// Failures to query or kill the child.
    pub fn finish(mut self) -> io::Result<ProcessOutcome> {
        self.finished = true;
        if self.lines.timed_out {
            return self.kill();
        }
        loop {
            if let Some(status) = self.child.try_wait()? {
                if self.lines.drained {
                    for reader in self.readers.drain(..) {
                        let _ = reader.join();
                    }
                }
                return Ok(ProcessOutcome::Exited(status));
            }
            if Instant::now() >= self.lines.deadline {
                return self.kill();
            }
            thread::sleep(EXIT_POLL_INTERVAL);
        }
    }

    fn kill(&mut self) -> io::Result<ProcessOutcome> {
        warn!(pid = self.child.id(), "deadline passed, killing process");
        self.child.kill()?;
        let _ = self.child.wait()?;
        Ok(ProcessOutcome::TimedOut)
    }
}

impl Drop for StreamedProcess {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(source: R, tx: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut reader = BufReader::new(source);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if tx.send(String::from_utf8_lossy(&buf).into_owned()).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Runs `command`, copying its output to `log_path` and optionally to stdout.
///
/// The log file is truncated first and flushed after every line.
///
/// # Errors
///
/// Spawn failures and I/O errors on the log file or console.
pub fn run_tee(
    command: &mut Command,
    log_path: &Path,
    timeout: Duration,
    echo: bool,
) -> io::Result<ProcessOutcome> {
    let mut log = File::create(log_path)?;
    let mut process = StreamedProcess::spawn(command, timeout)?;
    for line in process.lines() {
        if echo {
            let mut stdout = io::stdout().lock();
            stdout.write_all(line.as_bytes())?;
            stdout.flush()?;
        }
        log.write_all(line.as_bytes())?;
        log.flush()?;
    }
    process.finish()
}
