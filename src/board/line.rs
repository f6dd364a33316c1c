//! Detected tile runs and per-line validation.
//!
//! A run is a maximal contiguous sequence of occupied cells along one
//! axis. Runs of length >= 2 that contain a current-turn tile are the
//! lines a turn is judged by: no line may exceed five tiles, and a
//! finished line must sum to a multiple of five.

use serde::{Deserialize, Serialize};

use crate::core::TilePos;

/// Maximum tiles in a line.
pub const MAX_LINE_LEN: i32 = 5;

/// Line sums must be divisible by this.
pub const SCORE_MULTIPLE: i32 = 5;

/// Axis of a detected run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dir {
    Horizontal,
    Vertical,
}

/// What per-line validation concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineVerdict {
    /// The line is settled: within bounds and a multiple of five.
    Valid,
    /// Not a multiple yet, but short enough to still be extended.
    Partial(&'static str),
    /// The line can never become legal; the turn is dead.
    Invalid(&'static str),
}

/// A detected run of tiles.
///
/// `start..=end` spans the run along its axis; `pos` is the cross
/// coordinate (the row of a horizontal run, the column of a vertical
/// one). `current` records whether the run contains a current-turn tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLine {
    pub dir: Dir,
    pub start: i32,
    pub end: i32,
    pub pos: i32,
    pub sum: i32,
    pub current: bool,
}

impl TileLine {
    /// Create a line spanning `start..=end`.
    #[must_use]
    pub const fn new(dir: Dir, start: i32, end: i32, pos: i32) -> Self {
        Self {
            dir,
            start,
            end,
            pos,
            sum: 0,
            current: false,
        }
    }

    /// A single-cell line.
    ///
    /// Used only for the opening placement, where one lone tile still
    /// has to score its own value.
    #[must_use]
    pub const fn unit(dir: Dir, cell: TilePos, sum: i32) -> Self {
        let (along, cross) = match dir {
            Dir::Horizontal => (cell.ix, cell.iy),
            Dir::Vertical => (cell.iy, cell.ix),
        };
        Self {
            dir,
            start: along,
            end: along,
            pos: cross,
            sum,
            current: true,
        }
    }

    /// Number of tiles in the line.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> i32 {
        self.end - self.start + 1
    }

    /// Judge this line on its own.
    #[must_use]
    pub fn verdict(&self) -> LineVerdict {
        if self.len() > MAX_LINE_LEN {
            return LineVerdict::Invalid("Line too long");
        }

        if self.sum % SCORE_MULTIPLE != 0 {
            if self.len() == MAX_LINE_LEN {
                return LineVerdict::Invalid("Not a multiple of 5");
            }
            return LineVerdict::Partial("Not a multiple of 5 (yet)");
        }

        LineVerdict::Valid
    }
}

impl std::fmt::Display for TileLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.dir {
            Dir::Horizontal => {
                write!(f, "H y{} x{}..{} sum={}", self.pos, self.start, self.end, self.sum)
            }
            Dir::Vertical => {
                write!(f, "V x{} y{}..{} sum={}", self.pos, self.start, self.end, self.sum)
            }
        }
    }
}
