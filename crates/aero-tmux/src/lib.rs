//! Tmux gateway for Aero Shell.
//!
//! This crate is the only place that talks to the tmux binary:
//! - Run tmux subcommands behind the [`Gateway`] trait
//! - Describe every subcommand Aero issues as a typed [`TmuxCommand`]
//! - Parse pane identifiers printed by `split-window`
//! - Create-or-attach the shared session
//! - Handle missing tmux gracefully (non-zero output, never a panic)
//!
//! # Example
//!
//! ```no_run
//! use aero_tmux::{ensure_session, Gateway, PaneId, TmuxCommand, TmuxGateway};
//!
//! let tmux = TmuxGateway::default();
//!
//! if ensure_session(&tmux, "aero_home") {
//!     let output = tmux.run(&TmuxCommand::SplitWindow {
//!         session: "aero_home".to_string(),
//!         shell: "bash".to_string(),
//!     });
//!     if let Ok(pane) = PaneId::parse(&output.stdout) {
//!         println!("Created pane: {}", pane);
//!     }
//! }
//! ```
//!
//! # Checking tmux Availability
//!
//! ```
//! use aero_tmux::TmuxGateway;
//!
//! if TmuxGateway::default().is_available() {
//!     println!("tmux is available");
//! } else {
//!     println!("tmux not found, using fallback");
//! }
//! ```

pub mod command;
pub mod error;
#[cfg(any(test, feature = "fake"))]
pub mod fake;
pub mod gateway;
pub mod pane;
pub mod session;

pub use command::{TmuxCommand, PANE_ID_FORMAT};
pub use error::{Result, TmuxError};
#[cfg(any(test, feature = "fake"))]
pub use fake::FakeGateway;
pub use gateway::{
    Gateway, GatewayOutput, TmuxGateway, DEFAULT_TIMEOUT, EXIT_NOT_FOUND, EXIT_SPAWN_FAILED,
    EXIT_TIMED_OUT,
};
pub use pane::PaneId;
pub use session::{ensure_session, session_exists, set_status_right, try_ensure_session};
