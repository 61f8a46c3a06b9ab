//! Gateway for running tmux subcommands.
//!
//! A gateway never fails with an `Err`: a missing binary, a spawn error or a
//! timeout all come back as a non-zero [`GatewayOutput`] with an explanatory
//! message in `stderr`, so callers have a single failure channel.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::{Result, TmuxCommand, TmuxError};

/// Exit code reported when a command exceeds the gateway timeout.
pub const EXIT_TIMED_OUT: i32 = 124;

/// Exit code reported when the process could not be spawned or waited on.
pub const EXIT_SPAWN_FAILED: i32 = 126;

/// Exit code reported when the tmux binary cannot be located.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Default timeout for a single tmux invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Outcome of one tmux invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayOutput {
    /// Process exit code (or one of the `EXIT_*` codes above).
    pub code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error, or the reason the command could not run.
    pub stderr: String,
}

impl GatewayOutput {
    /// A successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed output with the given code and message.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the command exited with status 0.
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Whether the failure means tmux itself could not be found.
    pub fn is_tool_unavailable(&self) -> bool {
        self.code == EXIT_NOT_FOUND
    }

    /// Convert into a `Result`, keeping stdout on success.
    pub fn into_result(self, subcommand: &str) -> Result<String> {
        if self.success() {
            return Ok(self.stdout);
        }
        if self.is_tool_unavailable() {
            return Err(TmuxError::Unavailable(self.stderr));
        }
        Err(TmuxError::CommandFailed {
            subcommand: subcommand.to_string(),
            code: self.code,
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// Executes tmux subcommands.
///
/// Implementations spawn at most one process per call and block until it
/// finishes. There are no retries at this layer.
pub trait Gateway {
    /// Run `tmux <subcommand> <args...>`.
    fn execute(&self, subcommand: &str, args: &[&str]) -> GatewayOutput;

    /// Run a typed tmux command.
    fn run(&self, command: &TmuxCommand) -> GatewayOutput {
        self.execute(command.subcommand(), &command.args())
    }
}

impl<G: Gateway + ?Sized> Gateway for &G {
    fn execute(&self, subcommand: &str, args: &[&str]) -> GatewayOutput {
        (**self).execute(subcommand, args)
    }
}

impl<G: Gateway + ?Sized> Gateway for Box<G> {
    fn execute(&self, subcommand: &str, args: &[&str]) -> GatewayOutput {
        (**self).execute(subcommand, args)
    }
}

/// Gateway backed by the real tmux binary.
#[derive(Debug, Clone)]
pub struct TmuxGateway {
    /// Binary name or path, resolved through PATH on every call.
    binary: String,
    /// Per-invocation timeout; `None` waits forever.
    timeout: Option<Duration>,
}

impl TmuxGateway {
    /// Create a gateway for the given binary and timeout.
    pub fn new(binary: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// The configured binary name.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Check if the tmux binary can be located.
    pub fn is_available(&self) -> bool {
        self.resolve().is_some()
    }

    /// Locate the binary in PATH (or accept an explicit path).
    fn resolve(&self) -> Option<PathBuf> {
        match which::which(&self.binary) {
            Ok(path) => Some(path),
            Err(e) => {
                debug!(binary = %self.binary, error = %e, "tmux binary not found");
                None
            }
        }
    }

    /// Wait for the child, killing it if `deadline` passes.
    ///
    /// Returns `Ok(None)` on timeout. The child is killed and reaped on
    /// every error path.
    fn wait(&self, child: &mut Child, deadline: Option<Instant>) -> std::io::Result<Option<ExitStatus>> {
        let Some(deadline) = deadline else {
            return child.wait().map(Some);
        };

        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(Some(status)),
                Ok(None) => {}
                Err(e) => {
                    reap(child);
                    return Err(e);
                }
            }
            if Instant::now() >= deadline {
                reap(child);
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn timed_out(&self, subcommand: &str) -> GatewayOutput {
        warn!(subcommand = %subcommand, timeout = ?self.timeout, "tmux command timed out");
        GatewayOutput::failure(
            EXIT_TIMED_OUT,
            format!(
                "tmux {} timed out after {:?}",
                subcommand,
                self.timeout.unwrap_or_default()
            ),
        )
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

impl Default for TmuxGateway {
    fn default() -> Self {
        Self::new("tmux", Some(DEFAULT_TIMEOUT))
    }
}

impl Gateway for TmuxGateway {
    fn execute(&self, subcommand: &str, args: &[&str]) -> GatewayOutput {
        let Some(path) = self.resolve() else {
            return GatewayOutput::failure(
                EXIT_NOT_FOUND,
                format!("{} not found in PATH", self.binary),
            );
        };

        trace!(subcommand = %subcommand, args = ?args, "running tmux command");

        let spawned = Command::new(&path)
            .arg(subcommand)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return GatewayOutput::failure(
                    EXIT_NOT_FOUND,
                    format!("{}: {}", path.display(), e),
                );
            }
            Err(e) => {
                warn!(subcommand = %subcommand, error = %e, "failed to spawn tmux");
                return GatewayOutput::failure(
                    EXIT_SPAWN_FAILED,
                    format!("failed to run {}: {}", path.display(), e),
                );
            }
        };

        let deadline = self.timeout.map(|t| Instant::now() + t);
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        // Readers are left detached on timeout; a lingering grandchild may
        // still hold the pipes open.
        let status = match self.wait(&mut child, deadline) {
            Ok(Some(status)) => status,
            Ok(None) => return self.timed_out(subcommand),
            Err(e) => {
                warn!(subcommand = %subcommand, error = %e, "failed to wait for tmux");
                return GatewayOutput::failure(EXIT_SPAWN_FAILED, e.to_string());
            }
        };

        let (Some(stdout), Some(stderr)) = (collect(stdout, deadline), collect(stderr, deadline))
        else {
            return self.timed_out(subcommand);
        };

        let output = GatewayOutput {
            code: status.code().unwrap_or(EXIT_SPAWN_FAILED),
            stdout,
            stderr,
        };

        trace!(
            subcommand = %subcommand,
            code = output.code,
            stdout_len = output.stdout.len(),
            stderr_len = output.stderr.len(),
            "tmux command completed"
        );
        output
    }
}

/// Read a pipe to the end on a helper thread.
fn drain<R: Read + Send + 'static>(mut pipe: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(buf);
    });
    rx
}

/// Wait for a reader's buffer until `deadline`.
///
/// Returns `None` if the deadline passes first.
fn collect(rx: Option<Receiver<Vec<u8>>>, deadline: Option<Instant>) -> Option<String> {
    let Some(rx) = rx else {
        return Some(String::new());
    };
    let bytes = match deadline {
        Some(deadline) => match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Err(RecvTimeoutError::Timeout) => return None,
            other => other.unwrap_or_default(),
        },
        None => rx.recv().unwrap_or_default(),
    };
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
