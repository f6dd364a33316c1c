//! Game configuration.
//!
//! The rules constants (multiple-of-five scoring, five-tile line limit)
//! are fixed; the board geometry, hand size and tile distribution are
//! configured at startup. `GameConfig::default()` gives the standard
//! game: an 18x12 board, five-tile hands and a 90-tile set.

use serde::{Deserialize, Serialize};

use super::TilePos;

/// Number of distinct tile values (0 through 9).
pub const TILE_VALUE_COUNT: usize = 10;

/// Standard tile distribution, indexed by face value.
pub const STANDARD_TILE_COUNTS: [u8; TILE_VALUE_COUNT] = [7, 6, 6, 7, 10, 6, 10, 14, 12, 12];

/// Board geometry, hand size and tile distribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board width in cells.
    pub cols: i32,

    /// Board height in cells.
    pub rows: i32,

    /// Slots per player hand.
    pub hand_size: usize,

    /// How many tiles of each face value the pile holds.
    pub tile_counts: [u8; TILE_VALUE_COUNT],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 18,
            rows: 12,
            hand_size: 5,
            tile_counts: STANDARD_TILE_COUNTS,
        }
    }
}

impl GameConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the board geometry.
    #[must_use]
    pub fn with_dims(mut self, cols: i32, rows: i32) -> Self {
        assert!(cols > 0 && rows > 0, "Board must have at least one cell");
        self.cols = cols;
        self.rows = rows;
        self
    }

    /// Override the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        assert!(hand_size > 0, "Hands must hold at least one tile");
        self.hand_size = hand_size;
        self
    }

    /// Override the tile distribution.
    #[must_use]
    pub fn with_tile_counts(mut self, tile_counts: [u8; TILE_VALUE_COUNT]) -> Self {
        assert!(
            tile_counts.iter().any(|&c| c > 0),
            "Tile distribution must be non-empty"
        );
        self.tile_counts = tile_counts;
        self
    }

    /// The opening cell: only legal position on an empty board.
    #[must_use]
    pub fn center(&self) -> TilePos {
        TilePos::new((self.cols - 1) / 2, (self.rows - 1) / 2)
    }

    /// Total number of tiles in the distribution.
    #[must_use]
    pub fn tile_total(&self) -> usize {
        self.tile_counts.iter().map(|&c| c as usize).sum()
    }
}
