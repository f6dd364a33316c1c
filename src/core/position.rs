//! Board coordinates.
//!
//! Positions are ordered lexicographically (column, then row) so that
//! position sets iterate in a deterministic order. Candidate enumeration
//! and therefore search results depend on that order.

use serde::{Deserialize, Serialize};

/// A cell coordinate on the board.
///
/// `ix` is the column (0-based, left to right), `iy` the row (0-based,
/// top to bottom). For a tile held in a hand, `ix` is reused as the slot
/// index and `iy` is 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePos {
    /// Column index.
    pub ix: i32,
    /// Row index.
    pub iy: i32,
}

impl TilePos {
    /// Create a new position.
    #[must_use]
    pub const fn new(ix: i32, iy: i32) -> Self {
        Self { ix, iy }
    }

    /// The cell one column to the left.
    #[inline]
    #[must_use]
    pub const fn left(self) -> Self {
        Self::new(self.ix - 1, self.iy)
    }

    /// The cell one column to the right.
    #[inline]
    #[must_use]
    pub const fn right(self) -> Self {
        Self::new(self.ix + 1, self.iy)
    }

    /// The cell one row up.
    #[inline]
    #[must_use]
    pub const fn up(self) -> Self {
        Self::new(self.ix, self.iy - 1)
    }

    /// The cell one row down.
    #[inline]
    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.ix, self.iy + 1)
    }
}

impl std::fmt::Display for TilePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.ix, self.iy)
    }
}
