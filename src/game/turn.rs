//! Per-turn move log.

use serde::{Deserialize, Serialize};

use crate::core::Move;

/// The moves of one turn, in play order.
///
/// The log exists so a turn can be taken back move by move before it is
/// banked; once banked it goes to the game history untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Turn index, counted from 0 over the whole game.
    pub ind: i32,
    moves: Vec<Move>,
}

impl Turn {
    /// An empty log for turn `ind`.
    #[must_use]
    pub fn new(ind: i32) -> Self {
        Self {
            ind,
            moves: Vec::new(),
        }
    }

    /// Record a played move.
    pub fn add(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Remove and return the most recent move.
    pub fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    /// Moves played so far, oldest first.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerId, TileLoc, TilePos};

    #[test]
    fn test_turn_log() {
        let mut turn = Turn::new(3);
        assert_eq!(turn.ind, 3);
        assert!(turn.is_empty());

        let mv = Move::new(
            TileLoc::hand(PlayerId::new(0), 0),
            TileLoc::board(TilePos::new(8, 5)),
        );
        turn.add(mv);
        assert_eq!(turn.len(), 1);
        assert_eq!(turn.moves(), &[mv]);

        assert_eq!(turn.pop(), Some(mv));
        assert_eq!(turn.pop(), None);
    }
}
