//! Aero Shell library.
//!
//! Command-line parsing, the non-interactive commands and the TUI for the
//! tmux-backed shell.

pub mod cli;
pub mod commands;
pub mod tui;

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing.
///
/// `RUST_LOG` takes precedence over `level`. With a `log_file` (used by the
/// TUI, which owns the terminal) output is appended there without colors;
/// otherwise it goes to stderr. If the file cannot be opened logging falls
/// back to stderr.
pub fn init_tracing(level: &str, log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_file.map(open_log_file) {
        Some(Ok(file)) => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Some(Err(e)) => {
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            tracing::warn!(error = %e, "could not open log file, logging to stderr");
        }
        None => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
