//! Error types for tile orchestration.
//!
//! None of these are fatal: the affected tile keeps a valid state and the
//! caller surfaces the error as a transient notice.

use aero_tmux::{PaneId, TmuxError};
use thiserror::Error;

use crate::tile::TileId;

/// Errors returned by [`crate::TileOrchestrator`] transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    /// tmux could not be found or invoked.
    #[error("tmux is unavailable: {0}")]
    ToolUnavailable(String),

    /// The shared session could neither be found nor created.
    #[error("tmux session '{session}' is not ready: {reason}")]
    SessionUnready { session: String, reason: String },

    /// `split-window` failed or printed no usable pane id.
    #[error("could not create terminal pane: {0}")]
    PaneCreationFailed(String),

    /// A bound pane did not accept a command.
    #[error("pane {pane} of {tile} is not responding: {reason}")]
    StalePane {
        tile: TileId,
        pane: PaneId,
        reason: String,
    },

    /// The tile has been closed and cannot be used again.
    #[error("{0} is closed")]
    TileClosed(TileId),

    /// The tile was never announced to the orchestrator.
    #[error("unknown tile {0}")]
    UnknownTile(TileId),

    /// The detached-window fallback failed as well.
    #[error("could not launch {program}: {reason}")]
    FallbackFailed { program: String, reason: String },

    /// The program path cannot be passed to a shell (not valid UTF-8).
    #[error("cannot launch {0}: path is not valid UTF-8")]
    InvalidProgram(String),

    /// The pane listing used for a liveness refresh failed.
    #[error("could not list panes: {0}")]
    ListFailed(String),
}

impl From<TmuxError> for OrchestratorError {
    fn from(err: TmuxError) -> Self {
        match err {
            TmuxError::Unavailable(reason) => Self::ToolUnavailable(reason),
            TmuxError::SessionUnready { session, reason } => Self::SessionUnready { session, reason },
            TmuxError::CommandFailed { stderr, .. } => Self::PaneCreationFailed(stderr),
            TmuxError::ParseError(reason) => Self::PaneCreationFailed(reason),
        }
    }
}

/// Result type alias for orchestration.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
