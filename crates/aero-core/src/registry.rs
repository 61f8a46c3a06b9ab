//! Pane registry: the one-to-one mapping between tiles and tmux panes.
//!
//! Both directions are indexed so that neither a tile nor a pane can appear
//! in more than one entry. The registry is in-memory only; a fresh process
//! starts empty even if the tmux session still holds panes from a previous
//! run.

use std::collections::HashMap;

use aero_tmux::PaneId;

use crate::tile::TileId;

/// Tile to pane mapping with a reverse index.
#[derive(Debug, Default)]
pub struct PaneRegistry {
    by_tile: HashMap<TileId, PaneId>,
    by_pane: HashMap<PaneId, TileId>,
}

impl PaneRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `tile` to `pane`, replacing any entry either of them was part of.
    ///
    /// Returns the pane previously bound to `tile`, if it differed.
    pub fn bind(&mut self, tile: TileId, pane: PaneId) -> Option<PaneId> {
        if let Some(other) = self.by_pane.remove(&pane) {
            self.by_tile.remove(&other);
        }
        let previous = self.by_tile.insert(tile, pane.clone());
        if let Some(old) = &previous {
            self.by_pane.remove(old);
        }
        self.by_pane.insert(pane.clone(), tile);
        previous.filter(|old| *old != pane)
    }

    /// Get the pane bound to `tile`.
    pub fn lookup(&self, tile: TileId) -> Option<&PaneId> {
        self.by_tile.get(&tile)
    }

    /// Get the tile bound to `pane`.
    pub fn tile_for(&self, pane: &PaneId) -> Option<TileId> {
        self.by_pane.get(pane).copied()
    }

    /// Remove the entry for `tile`. Idempotent.
    ///
    /// Returns the pane that was bound, if any.
    pub fn unbind(&mut self, tile: TileId) -> Option<PaneId> {
        let pane = self.by_tile.remove(&tile)?;
        self.by_pane.remove(&pane);
        Some(pane)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.by_tile.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.by_tile.is_empty()
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &PaneId)> {
        self.by_tile.iter().map(|(tile, pane)| (*tile, pane))
    }
}
