//! Tile identity and per-tile lifecycle state.

use std::fmt;

use uuid::Uuid;

/// Opaque handle identifying one tile instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(Uuid);

impl TileId {
    /// Issue a fresh, unique tile id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Short form for display (first 8 hex digits).
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for TileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile-{}", self.short())
    }
}

/// Where a new tile is placed in the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    /// Left column.
    #[default]
    Left,
    /// Right column.
    Right,
}

/// Lifecycle state of a tile as seen by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileState {
    /// Known tile with no pane.
    Unbound,
    /// Tile with a registered pane believed to be live.
    Bound,
    /// Terminal state; the tile can never be bound again.
    Closed,
}

impl TileState {
    /// Short label for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unbound => "no pane",
            Self::Bound => "live",
            Self::Closed => "closed",
        }
    }
}
