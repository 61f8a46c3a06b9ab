//! Tile–session orchestrator.
//!
//! Owns the tile to pane mapping and drives every tile through
//! `Unbound -> Bound -> Closed`. All tmux traffic goes through the injected
//! [`Gateway`]; the registry is only ever mutated here.
//!
//! Calls are expected from a single UI actor, one at a time. Each gateway
//! call blocks until tmux exits (or the gateway times out).

use std::collections::{HashMap, HashSet};
use std::path::Path;

use aero_tmux::{try_ensure_session, Gateway, GatewayOutput, PaneId, TmuxCommand, TmuxGateway};
use tracing::{debug, info, warn};

use crate::config::ShellConfig;
use crate::error::{OrchestratorError, Result};
use crate::registry::PaneRegistry;
use crate::tile::{Placement, TileId, TileState};

/// How a dispatch request was carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The command line was sent into the tile's pane.
    Sent {
        /// Pane that received the command.
        pane: PaneId,
        /// Whether the pane was created by this dispatch.
        created: bool,
    },
    /// No pane could be bound, so the program runs in its own tmux window,
    /// unassociated with any tile.
    DetachedWindow {
        /// Why the tile could not get a pane.
        reason: OrchestratorError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Open,
    Closed,
}

/// Keeps UI tiles and tmux panes in sync.
pub struct TileOrchestrator<G: Gateway = TmuxGateway> {
    config: ShellConfig,
    gateway: G,
    registry: PaneRegistry,
    tiles: HashMap<TileId, Lifecycle>,
}

impl TileOrchestrator<TmuxGateway> {
    /// Create an orchestrator backed by the real tmux binary.
    pub fn with_tmux(config: ShellConfig) -> Self {
        let gateway = config.gateway();
        Self::new(config, gateway)
    }
}

impl<G: Gateway> TileOrchestrator<G> {
    /// Create an orchestrator with an explicit gateway.
    pub fn new(config: ShellConfig, gateway: G) -> Self {
        Self {
            config,
            gateway,
            registry: PaneRegistry::new(),
            tiles: HashMap::new(),
        }
    }

    /// The configuration this orchestrator was built with.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// The gateway, for collaborators that issue their own tmux calls.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Read-only view of the registry.
    pub fn registry(&self) -> &PaneRegistry {
        &self.registry
    }

    /// Create-or-attach the shared session.
    ///
    /// # Errors
    /// Returns `ToolUnavailable` or `SessionUnready`.
    pub fn ensure_session(&self) -> Result<()> {
        try_ensure_session(&self.gateway, &self.config.session_name)?;
        Ok(())
    }

    // ==================== Queries ====================

    /// Current state of `tile`, or `None` if it was never announced.
    pub fn tile_state(&self, tile: TileId) -> Option<TileState> {
        match self.tiles.get(&tile)? {
            Lifecycle::Closed => Some(TileState::Closed),
            Lifecycle::Open if self.registry.lookup(tile).is_some() => Some(TileState::Bound),
            Lifecycle::Open => Some(TileState::Unbound),
        }
    }

    /// Pane bound to `tile`, if any.
    pub fn pane_for(&self, tile: TileId) -> Option<&PaneId> {
        self.registry.lookup(tile)
    }

    /// All tiles currently bound to a pane.
    pub fn bound_tiles(&self) -> Vec<TileId> {
        self.registry.iter().map(|(tile, _)| tile).collect()
    }

    // ==================== Transitions ====================

    /// Announce a tile that entered the layout and try to give it a pane.
    ///
    /// The tile is known (as `Unbound`) even when pane creation fails.
    ///
    /// # Errors
    /// Returns the pane creation failure, or `TileClosed` for a reused id.
    pub fn tile_created(&mut self, tile: TileId, placement: Placement) -> Result<PaneId> {
        if self.tiles.get(&tile) == Some(&Lifecycle::Closed) {
            return Err(OrchestratorError::TileClosed(tile));
        }
        self.tiles.insert(tile, Lifecycle::Open);
        debug!(tile = %tile, placement = ?placement, "tile created");
        self.create_pane(tile)
    }

    /// Issue a new tile id, announce it and try to give it a pane.
    pub fn open_tile(&mut self, placement: Placement) -> (TileId, Result<PaneId>) {
        let tile = TileId::new();
        let pane = self.tile_created(tile, placement);
        (tile, pane)
    }

    /// CreatePane: `Unbound -> Bound`.
    ///
    /// Ensures the session, splits a new pane and binds it. A tile that is
    /// already bound keeps its pane. On failure the tile stays `Unbound`.
    ///
    /// # Errors
    /// `ToolUnavailable`, `SessionUnready`, `PaneCreationFailed`,
    /// `TileClosed` or `UnknownTile`.
    pub fn create_pane(&mut self, tile: TileId) -> Result<PaneId> {
        self.require_open(tile)?;
        if let Some(pane) = self.registry.lookup(tile) {
            return Ok(pane.clone());
        }

        self.ensure_session()?;

        let output = self.gateway.run(&TmuxCommand::SplitWindow {
            session: self.config.session_name.clone(),
            shell: self.config.shell.clone(),
        });
        let pane = split_result(output)?;

        if let Some(owner) = self.registry.tile_for(&pane) {
            // tmux reuses ids of dead panes; the old owner loses its binding.
            warn!(pane = %pane, from = %owner, to = %tile, "pane id reused, rebinding");
        }
        self.registry.bind(tile, pane.clone());
        info!(tile = %tile, pane = %pane, "pane bound");
        Ok(pane)
    }

    /// Dispatch: run `program` in `tile`.
    ///
    /// A bound tile receives `exec <program>` followed by the confirm key,
    /// with the path shell-quoted when it needs to be.
    /// An unbound tile first gets exactly one CreatePane attempt; if that
    /// fails, the program is started in a new tmux window instead and the
    /// tile stays `Unbound`.
    ///
    /// # Errors
    /// `StalePane` when the pane rejects the command (the tile stays bound),
    /// `FallbackFailed` when the new-window fallback fails too,
    /// `InvalidProgram` for a non-UTF-8 path, `TileClosed` or `UnknownTile`.
    pub fn dispatch(&mut self, tile: TileId, program: &Path) -> Result<DispatchOutcome> {
        self.require_open(tile)?;
        let word = shell_word(program)?;

        if let Some(pane) = self.registry.lookup(tile).cloned() {
            self.send_exec(tile, &pane, &word)?;
            return Ok(DispatchOutcome::Sent {
                pane,
                created: false,
            });
        }

        match self.create_pane(tile) {
            Ok(pane) => {
                self.send_exec(tile, &pane, &word)?;
                Ok(DispatchOutcome::Sent {
                    pane,
                    created: true,
                })
            }
            Err(reason) => {
                warn!(tile = %tile, program = %word, error = %reason, "no pane for tile, launching in new window");
                self.launch_detached(&word)?;
                Ok(DispatchOutcome::DetachedWindow { reason })
            }
        }
    }

    /// ClosePane: `Unbound | Bound -> Closed`.
    ///
    /// Kills the bound pane on a best-effort basis and always unbinds it.
    /// Closing an already closed tile does nothing.
    ///
    /// Returns the pane that was bound, if any.
    pub fn close_pane(&mut self, tile: TileId) -> Option<PaneId> {
        if self.tiles.insert(tile, Lifecycle::Closed) == Some(Lifecycle::Closed) {
            return None;
        }

        let pane = self.registry.unbind(tile)?;
        let output = self.gateway.run(&TmuxCommand::KillPane { pane: pane.clone() });
        if output.success() {
            debug!(tile = %tile, pane = %pane, "pane killed");
        } else {
            // A pane that is already gone is as good as a killed one.
            warn!(tile = %tile, pane = %pane, stderr = %output.stderr.trim(), "kill-pane failed");
        }
        Some(pane)
    }

    /// Drop registry entries whose panes no longer exist in the session.
    ///
    /// Never runs on its own; callers decide when liveness is worth a tmux
    /// round trip. Affected tiles go back to `Unbound`.
    ///
    /// # Errors
    /// `ListFailed` (or `ToolUnavailable`) if panes cannot be listed; the
    /// registry is left untouched in that case.
    pub fn refresh_liveness(&mut self) -> Result<Vec<TileId>> {
        let cmd = TmuxCommand::ListPanes {
            session: self.config.session_name.clone(),
        };
        let output = self.gateway.run(&cmd);
        if output.is_tool_unavailable() {
            return Err(OrchestratorError::ToolUnavailable(output.stderr));
        }
        if !output.success() {
            return Err(OrchestratorError::ListFailed(output.stderr.trim().to_string()));
        }

        let live: HashSet<PaneId> = PaneId::parse_list(&output.stdout).into_iter().collect();
        let stale: Vec<TileId> = self
            .registry
            .iter()
            .filter(|(_, pane)| !live.contains(*pane))
            .map(|(tile, _)| tile)
            .collect();

        for tile in &stale {
            if let Some(pane) = self.registry.unbind(*tile) {
                info!(tile = %tile, pane = %pane, "dropped stale pane");
            }
        }
        Ok(stale)
    }

    // ==================== Helpers ====================

    fn require_open(&self, tile: TileId) -> Result<()> {
        match self.tiles.get(&tile) {
            Some(Lifecycle::Open) => Ok(()),
            Some(Lifecycle::Closed) => Err(OrchestratorError::TileClosed(tile)),
            None => Err(OrchestratorError::UnknownTile(tile)),
        }
    }

    fn send_exec(&self, tile: TileId, pane: &PaneId, program: &str) -> Result<()> {
        let output = self.gateway.run(&TmuxCommand::SendKeys {
            pane: pane.clone(),
            text: format!("exec {}", program),
            confirm: self.config.confirm_key.clone(),
        });
        if output.success() {
            debug!(tile = %tile, pane = %pane, program = %program, "dispatched");
            return Ok(());
        }
        warn!(tile = %tile, pane = %pane, stderr = %output.stderr.trim(), "send-keys failed");
        Err(OrchestratorError::StalePane {
            tile,
            pane: pane.clone(),
            reason: output.stderr.trim().to_string(),
        })
    }

    fn launch_detached(&self, program: &str) -> Result<()> {
        let output = self.gateway.run(&TmuxCommand::NewWindow {
            session: self.config.session_name.clone(),
            program: program.to_string(),
        });
        if output.success() {
            return Ok(());
        }
        Err(OrchestratorError::FallbackFailed {
            program: program.to_string(),
            reason: output.stderr.trim().to_string(),
        })
    }
}

/// Quote `program` for the pane's shell; plain paths are left as they are.
fn shell_word(program: &Path) -> Result<String> {
    let path = program
        .to_str()
        .ok_or_else(|| OrchestratorError::InvalidProgram(program.display().to_string()))?;
    Ok(shell_words::quote(path).into_owned())
}

/// Turn `split-window` output into a pane id.
fn split_result(output: GatewayOutput) -> Result<PaneId> {
    let stdout = output.into_result("split-window")?;
    Ok(PaneId::parse(&stdout)?)
}
