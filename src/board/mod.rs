//! The playing grid.
//!
//! ## Overview
//!
//! [`Board`] owns the cells, tracks which of them were filled during the
//! current turn, and memoizes the two expensive derived values: the turn
//! analysis ([`BoardDetails`]) and the searched best continuation
//! ([`BestMove`]). Any mutation drops both memos, so readers always see
//! an analysis of the live position.
//!
//! Tiles are stored by value in a flat row-major vector. Out-of-bounds
//! lookups answer [`None`] rather than panicking, which lets the line
//! scans walk past the edges without bounds arithmetic.

mod details;
mod line;

pub use details::BoardDetails;
pub use line::{Dir, LineVerdict, TileLine, MAX_LINE_LEN, SCORE_MULTIPLE};

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, Tile, TilePos, TURN_NONE};
use crate::search::BestMove;

/// The tile grid plus per-turn bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    cols: i32,
    rows: i32,
    cells: Vec<Option<Tile>>,
    tile_count: usize,
    turn_ind: i32,
    turn_cells: FxHashSet<TilePos>,
    #[serde(skip)]
    details_memo: Option<BoardDetails>,
    #[serde(skip)]
    best_memo: Option<BestMove>,
}

impl Board {
    /// An empty board sized from `config`.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let len = (config.cols * config.rows) as usize;
        Self {
            cols: config.cols,
            rows: config.rows,
            cells: vec![None; len],
            tile_count: 0,
            turn_ind: TURN_NONE,
            turn_cells: FxHashSet::default(),
            details_memo: None,
            best_memo: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// The opening cell. The first tile of a game must land here.
    #[must_use]
    pub fn center(&self) -> TilePos {
        TilePos::new((self.cols - 1) / 2, (self.rows - 1) / 2)
    }

    #[inline]
    #[must_use]
    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.ix >= 0 && pos.ix < self.cols && pos.iy >= 0 && pos.iy < self.rows
    }

    #[inline]
    fn index(&self, pos: TilePos) -> usize {
        (pos.iy * self.cols + pos.ix) as usize
    }

    /// Tile at `pos`, or [`None`] when the cell is empty or `pos` is
    /// outside the grid.
    #[inline]
    #[must_use]
    pub fn tile(&self, pos: TilePos) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[self.index(pos)].as_ref()
    }

    /// Total tiles on the board.
    #[inline]
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tile_count == 0
    }

    /// Number of tiles placed so far this turn.
    #[inline]
    #[must_use]
    pub fn turn_tile_count(&self) -> usize {
        self.turn_cells.len()
    }

    /// Index of the turn the board is currently collecting tiles for.
    #[inline]
    #[must_use]
    pub fn turn_index(&self) -> i32 {
        self.turn_ind
    }

    pub(crate) fn turn_cells(&self) -> &FxHashSet<TilePos> {
        &self.turn_cells
    }

    /// Put `tile` on the empty cell at `pos`.
    ///
    /// The tile keeps whatever turn stamp it carries; if that stamp is
    /// the current turn the cell joins the turn set.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is out of bounds or the cell is occupied.
    pub fn set_cell(&mut self, pos: TilePos, tile: Tile) {
        assert!(self.in_bounds(pos), "cell {} out of bounds", pos);
        let index = self.index(pos);
        assert!(self.cells[index].is_none(), "cell {} is occupied", pos);

        if tile.turn == self.turn_ind {
            self.turn_cells.insert(pos);
        }
        self.cells[index] = Some(tile);
        self.tile_count += 1;
        self.invalidate();
    }

    /// Remove and return the tile at `pos`.
    ///
    /// The tile comes back with its stamps intact; a caller moving it
    /// off the board entirely is responsible for lifting it.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is out of bounds or the cell is empty.
    pub fn take_cell(&mut self, pos: TilePos) -> Tile {
        assert!(self.in_bounds(pos), "cell {} out of bounds", pos);
        let index = self.index(pos);
        let tile = match self.cells[index].take() {
            Some(tile) => tile,
            None => panic!("cell {} is empty", pos),
        };

        self.turn_cells.remove(&pos);
        self.tile_count -= 1;
        self.invalidate();
        tile
    }

    /// Start collecting tiles for turn `turn_ind`.
    ///
    /// Clears the turn set and drops the memos; tiles already on the
    /// board stay where they are.
    pub fn begin_turn(&mut self, turn_ind: i32) {
        self.turn_ind = turn_ind;
        self.turn_cells.clear();
        self.invalidate();
    }

    /// Remove every tile from the board, lifted back to a neutral state.
    pub fn drain_tiles(&mut self) -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(self.tile_count);
        for cell in &mut self.cells {
            if let Some(mut tile) = cell.take() {
                tile.lift();
                tiles.push(tile);
            }
        }
        self.tile_count = 0;
        self.turn_cells.clear();
        self.invalidate();
        tiles
    }

    /// Analysis of the current turn, computed on first call and then
    /// served from the memo until the board changes.
    pub fn details(&mut self) -> &BoardDetails {
        if self.details_memo.is_none() {
            let details = self.compute_details();
            self.details_memo = Some(details);
        }
        match self.details_memo.as_ref() {
            Some(details) => details,
            None => unreachable!(),
        }
    }

    pub(crate) fn cached_best(&self) -> Option<&BestMove> {
        self.best_memo.as_ref()
    }

    pub(crate) fn store_best(&mut self, best: BestMove) -> &BestMove {
        self.best_memo.insert(best)
    }

    fn invalidate(&mut self) {
        self.details_memo = None;
        self.best_memo = None;
    }
}

impl fmt::Display for Board {
    /// Renders the grid one row per line, `.` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for iy in 0..self.rows {
            for ix in 0..self.cols {
                match self.tile(TilePos::new(ix, iy)) {
                    Some(tile) => write!(f, "{}", tile.value)?,
                    None => f.write_str(".")?,
                }
            }
            if iy + 1 < self.rows {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

impl PartialEq for Board {
    /// Memo fields are derived state and do not participate.
    fn eq(&self, other: &Self) -> bool {
        self.cols == other.cols
            && self.rows == other.rows
            && self.turn_ind == other.turn_ind
            && self.cells == other.cells
    }
}

impl Eq for Board {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn board() -> Board {
        Board::new(&GameConfig::default())
    }

    fn placed(value: u8, turn: i32) -> Tile {
        let mut tile = Tile::new(value);
        tile.place(PlayerId::new(0), turn);
        tile
    }

    #[test]
    fn test_new_board_is_empty() {
        let b = board();
        assert_eq!(b.cols(), 18);
        assert_eq!(b.rows(), 12);
        assert_eq!(b.tile_count(), 0);
        assert!(b.is_empty());
        assert_eq!(b.center(), TilePos::new(8, 5));
    }

    #[test]
    fn test_tile_out_of_bounds_is_none() {
        let b = board();
        assert!(b.tile(TilePos::new(-1, 0)).is_none());
        assert!(b.tile(TilePos::new(0, -1)).is_none());
        assert!(b.tile(TilePos::new(18, 0)).is_none());
        assert!(b.tile(TilePos::new(0, 12)).is_none());
    }

    #[test]
    fn test_set_and_take_cell() {
        let mut b = board();
        b.begin_turn(0);
        let pos = TilePos::new(8, 5);
        b.set_cell(pos, placed(7, 0));

        assert_eq!(b.tile_count(), 1);
        assert_eq!(b.turn_tile_count(), 1);
        assert_eq!(b.tile(pos).map(|t| t.value), Some(7));

        let tile = b.take_cell(pos);
        assert_eq!(tile.value, 7);
        assert_eq!(b.tile_count(), 0);
        assert_eq!(b.turn_tile_count(), 0);
        assert!(b.tile(pos).is_none());
    }

    #[test]
    fn test_stale_turn_stamp_stays_out_of_turn_set() {
        let mut b = board();
        b.begin_turn(0);
        b.set_cell(TilePos::new(8, 5), placed(5, 0));
        b.begin_turn(1);
        assert_eq!(b.turn_tile_count(), 0);

        // Moving the old tile within the board does not adopt it.
        let tile = b.take_cell(TilePos::new(8, 5));
        b.set_cell(TilePos::new(9, 5), tile);
        assert_eq!(b.turn_tile_count(), 0);
        assert_eq!(b.tile_count(), 1);
    }

    #[test]
    #[should_panic(expected = "is occupied")]
    fn test_set_cell_occupied_panics() {
        let mut b = board();
        b.begin_turn(0);
        b.set_cell(TilePos::new(8, 5), placed(5, 0));
        b.set_cell(TilePos::new(8, 5), placed(3, 0));
    }

    #[test]
    #[should_panic(expected = "is empty")]
    fn test_take_cell_empty_panics() {
        let mut b = board();
        b.take_cell(TilePos::new(0, 0));
    }

    #[test]
    fn test_drain_tiles_lifts() {
        let mut b = board();
        b.begin_turn(0);
        b.set_cell(TilePos::new(8, 5), placed(5, 0));
        b.set_cell(TilePos::new(9, 5), placed(0, 0));

        let tiles = b.drain_tiles();
        assert_eq!(tiles.len(), 2);
        for tile in &tiles {
            assert!(tile.player.is_none());
            assert_eq!(tile.turn, TURN_NONE);
        }
        assert!(b.is_empty());
        assert_eq!(b.turn_tile_count(), 0);
    }

    #[test]
    fn test_eq_ignores_memos() {
        let mut a = board();
        let mut b = board();
        a.begin_turn(0);
        b.begin_turn(0);
        a.set_cell(TilePos::new(8, 5), placed(5, 0));
        b.set_cell(TilePos::new(8, 5), placed(5, 0));

        // Populate one side's memo only.
        let _ = a.details();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_grid() {
        let mut b = Board::new(&GameConfig::new().with_dims(3, 2));
        b.begin_turn(0);
        b.set_cell(TilePos::new(1, 0), placed(7, 0));
        assert_eq!(format!("{}", b), ".7.\n...");
    }

    #[test]
    fn test_serde_round_trip_skips_memos() {
        let mut b = board();
        b.begin_turn(0);
        b.set_cell(TilePos::new(8, 5), placed(5, 0));
        let _ = b.details();

        let json = serde_json::to_string(&b).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
        assert_eq!(back.turn_tile_count(), 1);
    }
}
