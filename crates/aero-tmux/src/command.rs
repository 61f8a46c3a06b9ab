//! Typed tmux subcommands.
//!
//! Every tmux invocation made by Aero Shell is one of these variants, so the
//! argument layout of each subcommand lives in exactly one place.

use std::fmt;

use crate::pane::PaneId;

/// Format string that makes `split-window -P` print only the new pane id.
pub const PANE_ID_FORMAT: &str = "#{pane_id}";

/// A tmux subcommand together with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TmuxCommand {
    /// `has-session -t <session>`
    HasSession { session: String },
    /// `new-session -d -s <session>`
    NewSession { session: String },
    /// `set-option -t <session> <option> <value>`
    SetOption {
        session: String,
        option: String,
        value: String,
    },
    /// `split-window -t <session> -d -P -F "#{pane_id}" <shell>`
    SplitWindow { session: String, shell: String },
    /// `send-keys -t <pane> <text> <confirm>`
    SendKeys {
        pane: PaneId,
        text: String,
        confirm: String,
    },
    /// `kill-pane -t <pane>`
    KillPane { pane: PaneId },
    /// `new-window -t <session> <program>`
    NewWindow { session: String, program: String },
    /// `list-panes -s -t <session> -F "#{pane_id}"`
    ListPanes { session: String },
}

impl TmuxCommand {
    /// The tmux subcommand name.
    pub fn subcommand(&self) -> &'static str {
        match self {
            Self::HasSession { .. } => "has-session",
            Self::NewSession { .. } => "new-session",
            Self::SetOption { .. } => "set-option",
            Self::SplitWindow { .. } => "split-window",
            Self::SendKeys { .. } => "send-keys",
            Self::KillPane { .. } => "kill-pane",
            Self::NewWindow { .. } => "new-window",
            Self::ListPanes { .. } => "list-panes",
        }
    }

    /// Arguments following the subcommand name.
    pub fn args(&self) -> Vec<&str> {
        match self {
            Self::HasSession { session } => vec!["-t", session],
            Self::NewSession { session } => vec!["-d", "-s", session],
            Self::SetOption {
                session,
                option,
                value,
            } => vec!["-t", session, option, value],
            Self::SplitWindow { session, shell } => {
                vec!["-t", session, "-d", "-P", "-F", PANE_ID_FORMAT, shell]
            }
            Self::SendKeys {
                pane,
                text,
                confirm,
            } => vec!["-t", pane.as_str(), text, confirm],
            Self::KillPane { pane } => vec!["-t", pane.as_str()],
            Self::NewWindow { session, program } => vec!["-t", session, program],
            Self::ListPanes { session } => vec!["-s", "-t", session, "-F", PANE_ID_FORMAT],
        }
    }
}

impl fmt::Display for TmuxCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subcommand())?;
        for arg in self.args() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
