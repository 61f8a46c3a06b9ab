//! Aero Core - tile and pane orchestration for Aero Shell.
//!
//! - **orchestrator**: Keeps UI tiles and tmux panes in sync
//! - **registry**: One-to-one tile to pane mapping
//! - **tile**: Tile identity and lifecycle states
//! - **config**: Explicit shell configuration and path search order
//! - **navigation**: Setup vs. home screen flow
//! - **status**: tmux status bar text
//! - **apps**: Launchable application discovery
//! - **network**: Network interface detection

pub mod apps;
pub mod config;
pub mod error;
pub mod navigation;
pub mod network;
pub mod orchestrator;
pub mod registry;
pub mod status;
pub mod tile;

pub use apps::scan_apps;
pub use config::ShellConfig;
pub use error::{OrchestratorError, Result};
pub use navigation::{Navigation, Screen};
pub use network::{detect_network_interfaces, NetworkInterface};
pub use orchestrator::{DispatchOutcome, TileOrchestrator};
pub use registry::PaneRegistry;
pub use status::{apply_status, status_right};
pub use tile::{Placement, TileId, TileState};
