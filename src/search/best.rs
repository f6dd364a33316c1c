//! Best-move results.

use serde::{Deserialize, Serialize};

use crate::core::Move;

/// A searched move sequence and the score it banks.
///
/// The sequence plays one turn from its start to a finishable position.
/// An empty sequence means the search found nothing playable (or that
/// standing pat already beat every continuation).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestMove {
    /// Moves to play, in order.
    pub moves: Vec<Move>,
    /// Turn score after the last move.
    pub score: i32,
}

impl BestMove {
    /// The empty result.
    #[must_use]
    pub const fn invalid() -> Self {
        Self {
            moves: Vec::new(),
            score: 0,
        }
    }

    /// Whether the result carries any moves.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.moves.is_empty()
    }
}

impl Default for BestMove {
    fn default() -> Self {
        Self::invalid()
    }
}

impl std::fmt::Display for BestMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_valid() {
            return write!(f, "no move");
        }
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", mv)?;
        }
        write!(f, " @{}", self.score)
    }
}
