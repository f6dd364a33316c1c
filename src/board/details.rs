//! Turn analysis.
//!
//! ## Overview
//!
//! [`Board::details`] folds everything the rules say about the tiles
//! placed so far this turn into one [`BoardDetails`] value: whether the
//! turn is still legal, what it scores, which lines it formed, and which
//! empty cells the next tile of the turn may land on.
//!
//! The analysis walks a fixed ladder:
//!
//! 1. Empty board: the opening tile must go to the center cell.
//! 2. No tile placed yet this turn: any empty cell adjacent to an
//!    existing tile is playable, provided neither crossing run would
//!    overflow [`MAX_LINE_LEN`].
//! 3. Otherwise, detect the lines through the turn's tiles and judge
//!    each one. A line past five tiles, a full line off the multiple, or
//!    tiles spread over both axes end the turn as invalid.
//! 4. Surviving turns score the sum of every detected line and are
//!    partial while that score is not a multiple of five.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

use super::line::{Dir, LineVerdict, TileLine, MAX_LINE_LEN, SCORE_MULTIPLE};
use super::Board;
use crate::core::TilePos;

/// Everything the rules conclude about the current turn.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoardDetails {
    /// False once the turn can no longer become legal.
    pub valid: bool,
    /// True while the turn scores off the multiple and must continue.
    pub partial: bool,
    /// Sum of every detected line.
    pub score: i32,
    /// Tiles on the board when the analysis ran.
    pub tile_count: usize,
    /// Tiles placed during the current turn.
    pub turn_tile_count: usize,
    /// Detected lines, horizontal first, in scan order.
    pub lines: SmallVec<[TileLine; 8]>,
    /// Empty cells where the next tile of this turn may go.
    pub positions: BTreeSet<TilePos>,
    /// Last validation message, also set for recoverable states.
    pub err_msg: Option<&'static str>,
}

impl BoardDetails {
    fn new(tile_count: usize, turn_tile_count: usize) -> Self {
        Self {
            valid: true,
            partial: false,
            score: 0,
            tile_count,
            turn_tile_count,
            lines: SmallVec::new(),
            positions: BTreeSet::new(),
            err_msg: None,
        }
    }

    /// Whether the turn may be banked as it stands.
    #[inline]
    #[must_use]
    pub fn can_finish(&self) -> bool {
        self.valid && !self.partial
    }
}

impl fmt::Display for BoardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return write!(f, "invalid turn: {}", self.err_msg.unwrap_or("unknown"));
        }
        write!(
            f,
            "score={} partial={} lines={} positions={}",
            self.score,
            self.partial,
            self.lines.len(),
            self.positions.len()
        )
    }
}

/// Walk direction for run counting.
#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
    Up,
    Down,
}

impl Side {
    fn step(self, pos: TilePos) -> TilePos {
        match self {
            Side::Left => pos.left(),
            Side::Right => pos.right(),
            Side::Up => pos.up(),
            Side::Down => pos.down(),
        }
    }
}

fn cell_at(dir: Dir, along: i32, cross: i32) -> TilePos {
    match dir {
        Dir::Horizontal => TilePos::new(along, cross),
        Dir::Vertical => TilePos::new(cross, along),
    }
}

impl Board {
    pub(super) fn compute_details(&self) -> BoardDetails {
        let mut details = BoardDetails::new(self.tile_count(), self.turn_tile_count());

        // Opening placement: only the center cell is playable.
        if details.tile_count == 0 {
            details.positions.insert(self.center());
            details.partial = true;
            return details;
        }

        // Nothing placed yet this turn: offer every cell that touches an
        // existing tile without overflowing either crossing run.
        if details.turn_tile_count == 0 {
            self.open_positions(&mut details.positions);
            details.partial = true;
            return details;
        }

        let (xinds, yinds) = self.turn_axes();
        details.lines = self.detect_lines(&xinds, &yinds);

        for line in &details.lines {
            match line.verdict() {
                LineVerdict::Valid => {}
                LineVerdict::Partial(msg) => details.err_msg = Some(msg),
                LineVerdict::Invalid(msg) => {
                    details.valid = false;
                    details.err_msg = Some(msg);
                    return details;
                }
            }
        }

        if details.turn_tile_count == 1 {
            if let Some(&cell) = self.turn_cells().iter().next() {
                self.single_tile_positions(cell, &mut details.positions);
            }
        } else {
            if xinds.len() > 1 && yinds.len() > 1 {
                details.valid = false;
                details.err_msg = Some("Disjoint pieces");
                return details;
            }
            let dir = if xinds.len() > 1 {
                Dir::Horizontal
            } else {
                Dir::Vertical
            };
            self.extension_positions(&details.lines, dir, &mut details.positions);
        }

        details.score = details.lines.iter().map(|line| line.sum).sum();
        details.partial = details.score % SCORE_MULTIPLE != 0;
        details
    }

    /// Length of the contiguous run starting at `from` and walking away
    /// `side`ward. Zero when `from` is empty or off the board.
    fn run_len(&self, from: TilePos, side: Side) -> i32 {
        let mut count = 0;
        let mut pos = from;
        while self.tile(pos).is_some() {
            count += 1;
            pos = side.step(pos);
        }
        count
    }

    fn turn_axes(&self) -> (BTreeSet<i32>, BTreeSet<i32>) {
        let mut xinds = BTreeSet::new();
        let mut yinds = BTreeSet::new();
        for cell in self.turn_cells() {
            xinds.insert(cell.ix);
            yinds.insert(cell.iy);
        }
        (xinds, yinds)
    }

    /// Maximal runs of two or more tiles that pass through a turn tile,
    /// horizontal rows first.
    fn detect_lines(
        &self,
        xinds: &BTreeSet<i32>,
        yinds: &BTreeSet<i32>,
    ) -> SmallVec<[TileLine; 8]> {
        let mut lines = SmallVec::new();
        for &iy in yinds {
            self.scan_runs(Dir::Horizontal, iy, &mut lines);
        }
        for &ix in xinds {
            self.scan_runs(Dir::Vertical, ix, &mut lines);
        }

        // A lone tile touching nothing forms no run of two, yet its
        // value still counts: score it as a single-cell line.
        if lines.is_empty() && self.turn_tile_count() == 1 {
            if let Some(&cell) = self.turn_cells().iter().next() {
                if let Some(tile) = self.tile(cell) {
                    lines.push(TileLine::unit(Dir::Horizontal, cell, i32::from(tile.value)));
                }
            }
        }
        lines
    }

    fn scan_runs(&self, dir: Dir, cross: i32, lines: &mut SmallVec<[TileLine; 8]>) {
        let limit = match dir {
            Dir::Horizontal => self.cols(),
            Dir::Vertical => self.rows(),
        };
        let turn = self.turn_index();

        let mut along = 0;
        while along < limit {
            if self.tile(cell_at(dir, along, cross)).is_none() {
                along += 1;
                continue;
            }

            let start = along;
            let mut sum = 0;
            let mut current = false;
            while along < limit {
                match self.tile(cell_at(dir, along, cross)) {
                    Some(tile) => {
                        sum += i32::from(tile.value);
                        current |= tile.turn == turn;
                        along += 1;
                    }
                    None => break,
                }
            }
            let end = along - 1;

            if end > start && current {
                let mut line = TileLine::new(dir, start, end, cross);
                line.sum = sum;
                line.current = true;
                lines.push(line);
            }
            along += 1;
        }
    }

    /// Playable cells when the turn has not placed anything yet.
    fn open_positions(&self, out: &mut BTreeSet<TilePos>) {
        for iy in 0..self.rows() {
            for ix in 0..self.cols() {
                let pos = TilePos::new(ix, iy);
                if self.tile(pos).is_some() {
                    continue;
                }
                let l = self.run_len(pos.left(), Side::Left);
                let r = self.run_len(pos.right(), Side::Right);
                let t = self.run_len(pos.up(), Side::Up);
                let b = self.run_len(pos.down(), Side::Down);
                if l == 0 && r == 0 && t == 0 && b == 0 {
                    continue;
                }
                if l + r + 1 > MAX_LINE_LEN || t + b + 1 > MAX_LINE_LEN {
                    continue;
                }
                out.insert(pos);
            }
        }
    }

    /// Playable cells when exactly one tile is down: the next tile must
    /// land just past an end of one of the two runs through that tile,
    /// so at most four cells qualify. Cells in the tile's row or column
    /// that belong to some other run are not connected to it and stay
    /// out.
    fn single_tile_positions(&self, cell: TilePos, out: &mut BTreeSet<TilePos>) {
        let t = self.run_len(cell.up(), Side::Up);
        let b = self.run_len(cell.down(), Side::Down);
        let l = self.run_len(cell.left(), Side::Left);
        let r = self.run_len(cell.right(), Side::Right);

        let ends = [
            TilePos::new(cell.ix, cell.iy - t - 1),
            TilePos::new(cell.ix, cell.iy + b + 1),
            TilePos::new(cell.ix - l - 1, cell.iy),
            TilePos::new(cell.ix + r + 1, cell.iy),
        ];
        for pos in ends {
            // The cell past a maximal run is empty whenever it is on
            // the board at all.
            if !self.in_bounds(pos) {
                continue;
            }
            let l = self.run_len(pos.left(), Side::Left);
            let r = self.run_len(pos.right(), Side::Right);
            let t = self.run_len(pos.up(), Side::Up);
            let b = self.run_len(pos.down(), Side::Down);
            if l + r + 1 > MAX_LINE_LEN || t + b + 1 > MAX_LINE_LEN {
                continue;
            }
            out.insert(pos);
        }
    }

    /// Cells just beyond either end of each unfinished line along the
    /// turn's shared axis. Such a cell is empty by construction, so only
    /// the board edge needs checking.
    fn extension_positions(&self, lines: &[TileLine], dir: Dir, out: &mut BTreeSet<TilePos>) {
        for line in lines.iter().filter(|line| line.dir == dir) {
            if line.len() >= MAX_LINE_LEN {
                continue;
            }
            let before = cell_at(dir, line.start - 1, line.pos);
            let after = cell_at(dir, line.end + 1, line.pos);
            if self.in_bounds(before) {
                out.insert(before);
            }
            if self.in_bounds(after) {
                out.insert(after);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, PlayerId, Tile};

    /// Board on the standard grid with `turn` in progress and the given
    /// `(ix, iy, value, stamped_turn)` tiles placed.
    fn make_board(turn: i32, tiles: &[(i32, i32, u8, i32)]) -> Board {
        let mut board = Board::new(&GameConfig::default());
        board.begin_turn(turn);
        for &(ix, iy, value, stamp) in tiles {
            let mut tile = Tile::new(value);
            tile.place(PlayerId::new(0), stamp);
            board.set_cell(TilePos::new(ix, iy), tile);
        }
        board
    }

    #[test]
    fn test_empty_board_targets_center() {
        let mut board = make_board(0, &[]);
        let details = board.details();
        assert!(details.valid);
        assert!(details.partial);
        assert_eq!(details.score, 0);
        assert_eq!(
            details.positions.iter().copied().collect::<Vec<_>>(),
            vec![TilePos::new(8, 5)]
        );
    }

    #[test]
    fn test_no_turn_tiles_offers_neighbors() {
        let mut board = make_board(1, &[(8, 5, 5, 0)]);
        let details = board.details();
        assert!(details.valid);
        assert!(details.partial);
        let expected: BTreeSet<_> = [
            TilePos::new(7, 5),
            TilePos::new(9, 5),
            TilePos::new(8, 4),
            TilePos::new(8, 6),
        ]
        .into_iter()
        .collect();
        assert_eq!(details.positions, expected);
    }

    #[test]
    fn test_open_positions_respect_line_length() {
        // Full row of five: its end cells would make a sixth tile.
        let board = make_board(
            1,
            &[
                (4, 5, 5, 0),
                (5, 5, 5, 0),
                (6, 5, 5, 0),
                (7, 5, 5, 0),
                (8, 5, 5, 0),
            ],
        );
        let mut out = BTreeSet::new();
        board.open_positions(&mut out);
        assert!(!out.contains(&TilePos::new(3, 5)));
        assert!(!out.contains(&TilePos::new(9, 5)));
        // Cells alongside the row are still fine.
        assert!(out.contains(&TilePos::new(4, 4)));
        assert!(out.contains(&TilePos::new(8, 6)));
    }

    #[test]
    fn test_run_len() {
        let board = make_board(0, &[(8, 5, 5, 0), (9, 5, 5, 0), (10, 5, 5, 0)]);
        assert_eq!(board.run_len(TilePos::new(8, 5), Side::Right), 3);
        assert_eq!(board.run_len(TilePos::new(10, 5), Side::Left), 3);
        assert_eq!(board.run_len(TilePos::new(7, 5), Side::Left), 0);
        assert_eq!(board.run_len(TilePos::new(8, 5), Side::Up), 1);
        // Off-board start counts as empty.
        assert_eq!(board.run_len(TilePos::new(-1, 5), Side::Left), 0);
    }

    #[test]
    fn test_opening_tile_scores_its_value() {
        let mut board = make_board(0, &[(8, 5, 5, 0)]);
        let details = board.details();
        assert!(details.valid);
        assert!(!details.partial);
        assert_eq!(details.score, 5);
        assert_eq!(details.lines.len(), 1);
        assert_eq!(details.lines[0].len(), 1);

        let mut board = make_board(0, &[(8, 5, 3, 0)]);
        let details = board.details();
        assert!(details.valid);
        assert!(details.partial);
        assert_eq!(details.score, 3);
    }

    #[test]
    fn test_single_tile_scores_every_line() {
        // Column already holds 5 + 5; this turn adds another 5 below.
        let mut board = make_board(1, &[(8, 5, 5, 0), (8, 6, 5, 0), (8, 7, 5, 1)]);
        let details = board.details();
        assert!(details.valid);
        assert!(!details.partial);
        assert_eq!(details.score, 15);
        assert_eq!(details.lines.len(), 1);
        assert_eq!(details.lines[0].dir, Dir::Vertical);

        let expected: BTreeSet<_> = [
            TilePos::new(8, 4),
            TilePos::new(8, 8),
            TilePos::new(7, 7),
            TilePos::new(9, 7),
        ]
        .into_iter()
        .collect();
        assert_eq!(details.positions, expected);
    }

    #[test]
    fn test_single_tile_crossing_lines_sum_both() {
        let mut board = make_board(1, &[(7, 5, 5, 0), (8, 4, 5, 0), (8, 5, 5, 1)]);
        let details = board.details();
        assert!(details.valid);
        assert!(!details.partial);
        assert_eq!(details.lines.len(), 2);
        assert_eq!(details.score, 20);
    }

    #[test]
    fn test_single_tile_ignores_unconnected_runs() {
        // An older pair sits further down the same column; cells
        // touching it do not connect back to the turn tile.
        let mut board = make_board(1, &[(8, 5, 5, 1), (8, 8, 5, 0), (8, 9, 5, 0)]);
        let details = board.details();
        assert!(details.valid);

        let expected: BTreeSet<_> = [
            TilePos::new(8, 4),
            TilePos::new(8, 6),
            TilePos::new(7, 5),
            TilePos::new(9, 5),
        ]
        .into_iter()
        .collect();
        assert_eq!(details.positions, expected);
        assert!(!details.positions.contains(&TilePos::new(8, 7)));
    }

    #[test]
    fn test_single_tile_positions_respect_crossing_runs() {
        // A full row of fives one cell up: extending the turn tile's
        // column onto (8, 4) would make that row six long.
        let mut board = make_board(
            1,
            &[
                (3, 4, 5, 0),
                (4, 4, 5, 0),
                (5, 4, 5, 0),
                (6, 4, 5, 0),
                (7, 4, 5, 0),
                (8, 5, 5, 1),
            ],
        );
        let details = board.details();
        assert!(details.valid);

        let expected: BTreeSet<_> = [
            TilePos::new(7, 5),
            TilePos::new(9, 5),
            TilePos::new(8, 6),
        ]
        .into_iter()
        .collect();
        assert_eq!(details.positions, expected);
    }

    #[test]
    fn test_line_too_long_is_invalid() {
        let mut board = make_board(
            1,
            &[
                (3, 5, 5, 0),
                (4, 5, 5, 0),
                (5, 5, 5, 0),
                (6, 5, 5, 0),
                (7, 5, 5, 0),
                (8, 5, 5, 1),
            ],
        );
        let details = board.details();
        assert!(!details.valid);
        assert_eq!(details.err_msg, Some("Line too long"));
        assert!(details.positions.is_empty());
        assert_eq!(details.score, 0);
    }

    #[test]
    fn test_full_line_off_multiple_is_invalid() {
        let mut board = make_board(
            1,
            &[
                (4, 5, 5, 0),
                (5, 5, 5, 0),
                (6, 5, 5, 0),
                (7, 5, 5, 0),
                (8, 5, 3, 1),
            ],
        );
        let details = board.details();
        assert!(!details.valid);
        assert_eq!(details.err_msg, Some("Not a multiple of 5"));
    }

    #[test]
    fn test_short_line_off_multiple_is_partial() {
        let mut board = make_board(1, &[(8, 5, 5, 0), (9, 5, 2, 1)]);
        let details = board.details();
        assert!(details.valid);
        assert!(details.partial);
        assert!(!details.can_finish());
        assert_eq!(details.score, 7);
        assert_eq!(details.err_msg, Some("Not a multiple of 5 (yet)"));
    }

    #[test]
    fn test_disjoint_pieces_are_invalid() {
        let mut board = make_board(
            1,
            &[(2, 2, 5, 0), (2, 3, 5, 1), (5, 6, 5, 0), (5, 7, 5, 1)],
        );
        let details = board.details();
        assert!(!details.valid);
        assert_eq!(details.err_msg, Some("Disjoint pieces"));
    }

    #[test]
    fn test_multi_tile_turn_extends_own_line() {
        let mut board = make_board(1, &[(7, 5, 5, 0), (8, 5, 2, 1), (9, 5, 3, 1)]);
        let details = board.details();
        assert!(details.valid);
        assert!(!details.partial);
        assert_eq!(details.score, 10);

        let expected: BTreeSet<_> = [TilePos::new(6, 5), TilePos::new(10, 5)]
            .into_iter()
            .collect();
        assert_eq!(details.positions, expected);
    }

    #[test]
    fn test_extension_stops_at_board_edge() {
        let mut board = make_board(1, &[(0, 5, 5, 0), (1, 5, 2, 1), (2, 5, 3, 1)]);
        let details = board.details();
        assert!(details.valid);
        assert_eq!(
            details.positions.iter().copied().collect::<Vec<_>>(),
            vec![TilePos::new(3, 5)]
        );
    }

    #[test]
    fn test_full_line_offers_no_extension() {
        let mut board = make_board(
            1,
            &[
                (4, 5, 5, 0),
                (5, 5, 5, 0),
                (6, 5, 5, 0),
                (7, 5, 2, 1),
                (8, 5, 3, 1),
            ],
        );
        let details = board.details();
        assert!(details.valid);
        assert!(!details.partial);
        assert!(details.can_finish());
        assert_eq!(details.score, 20);
        assert!(details.positions.is_empty());
    }

    #[test]
    fn test_scattered_pair_scores_zero_without_panicking() {
        // Two stray tiles in one row with nothing adjacent form no lines
        // at all; the turn is a harmless zero, not an error.
        let mut board = make_board(0, &[(2, 3, 5, 0), (6, 3, 5, 0)]);
        let details = board.details();
        assert!(details.valid);
        assert!(!details.partial);
        assert_eq!(details.score, 0);
        assert!(details.lines.is_empty());
        assert!(details.positions.is_empty());
    }

    #[test]
    fn test_details_memo_invalidated_by_mutation() {
        let mut board = make_board(0, &[]);
        assert_eq!(board.details().positions.len(), 1);

        let mut tile = Tile::new(5);
        tile.place(PlayerId::new(0), 0);
        board.set_cell(TilePos::new(8, 5), tile);
        assert_eq!(board.details().score, 5);
    }

    #[test]
    fn test_display() {
        let mut board = make_board(1, &[(8, 5, 5, 0), (9, 5, 2, 1)]);
        assert_eq!(
            format!("{}", board.details()),
            "score=7 partial=true lines=1 positions=4"
        );
    }
}
