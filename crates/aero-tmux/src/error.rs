//! Error types for tmux operations.

use thiserror::Error;

/// Errors that can occur during tmux operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TmuxError {
    /// tmux binary could not be located or invoked.
    #[error("tmux unavailable: {0}")]
    Unavailable(String),

    /// Session could neither be found nor created.
    #[error("session '{session}' is not ready: {reason}")]
    SessionUnready { session: String, reason: String },

    /// tmux command exited with a non-zero status.
    #[error("tmux {subcommand} failed ({code}): {stderr}")]
    CommandFailed {
        subcommand: String,
        code: i32,
        stderr: String,
    },

    /// Failed to parse tmux output.
    #[error("parse error: {0}")]
    ParseError(String),
}

/// Result type alias for tmux operations.
pub type Result<T> = std::result::Result<T, TmuxError>;
