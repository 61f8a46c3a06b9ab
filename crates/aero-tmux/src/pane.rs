//! Tmux pane identifiers and the parsing of tmux output that carries them.

use std::fmt;

use crate::{Result, TmuxError};

/// A tmux pane identifier (e.g., "%0", "%3").
///
/// Opaque: the value is whatever tmux printed for `#{pane_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(String);

impl PaneId {
    /// Wrap a raw pane identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the stdout of `split-window -P -F "#{pane_id}"`.
    ///
    /// Expected format: exactly one whitespace-free token, optionally
    /// surrounded by whitespace (tmux appends a newline).
    pub fn parse(output: &str) -> Result<Self> {
        let mut tokens = output.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(id), None) => Ok(Self(id.to_string())),
            (None, _) => Err(TmuxError::ParseError("empty pane id output".to_string())),
            (Some(_), Some(_)) => Err(TmuxError::ParseError(format!(
                "expected a single pane id, got: {}",
                output.trim()
            ))),
        }
    }

    /// Parse `list-panes -F "#{pane_id}"` output, one id per line.
    pub fn parse_list(output: &str) -> Vec<Self> {
        output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Self(line.to_string()))
            .collect()
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
