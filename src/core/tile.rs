//! Tiles, tile addresses and moves.
//!
//! ## Ownership model
//!
//! A `Tile` is a plain value; at any time exactly one container (the
//! draw pile, a hand slot, or a board cell) holds it. Transfers move the
//! value out of one container and into another, stamping or clearing the
//! placement attribution (`player`, `turn`) as they go. There is no
//! shared aliasing of tiles.
//!
//! ## TileOwner
//!
//! Closed enumeration of the places a tile address can point at. Every
//! dispatch site matches exhaustively, so adding an owner kind is a
//! compile-time event.

use serde::{Deserialize, Serialize};

use super::{PlayerId, TilePos};

/// Turn stamp carried by tiles that are not on the board.
pub const TURN_NONE: i32 = -1;

/// Where a tile address points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileOwner {
    /// No owner; marks unset addresses (e.g. a tree root's move).
    None,
    /// A player's hand.
    Player(PlayerId),
    /// The shared board.
    Board,
    /// The draw pile.
    TileSet,
}

impl TileOwner {
    /// Check for the unset owner.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, TileOwner::None)
    }

    /// The player behind this owner, if it is a hand.
    #[must_use]
    pub const fn player(self) -> Option<PlayerId> {
        match self {
            TileOwner::Player(p) => Some(p),
            TileOwner::None | TileOwner::Board | TileOwner::TileSet => None,
        }
    }
}

impl std::fmt::Display for TileOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileOwner::None => write!(f, "none"),
            TileOwner::Player(p) => write!(f, "{}", p),
            TileOwner::Board => write!(f, "board"),
            TileOwner::TileSet => write!(f, "pile"),
        }
    }
}

/// A numbered tile.
///
/// `player` and `turn` record who placed the tile and in which turn,
/// for as long as it sits on the board; off the board both are cleared
/// (`player = None`, `turn = TURN_NONE`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Face value, 0-9.
    pub value: u8,
    /// Placing player while on the board.
    pub player: Option<PlayerId>,
    /// Turn index stamped at placement.
    pub turn: i32,
}

impl Tile {
    /// Create an unplaced tile.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        debug_assert!(value <= 9);
        Self {
            value,
            player: None,
            turn: TURN_NONE,
        }
    }

    /// Stamp placement attribution as the tile goes onto the board.
    pub fn place(&mut self, player: PlayerId, turn: i32) {
        self.player = Some(player);
        self.turn = turn;
    }

    /// Clear placement attribution as the tile leaves the board.
    pub fn lift(&mut self) {
        self.player = None;
        self.turn = TURN_NONE;
    }
}

/// A tile address: an owner plus a position within it.
///
/// For `Player` owners, `pos.ix` is the hand slot and `pos.iy` is 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileLoc {
    pub owner: TileOwner,
    pub pos: TilePos,
}

impl TileLoc {
    /// Create an address.
    #[must_use]
    pub const fn new(owner: TileOwner, pos: TilePos) -> Self {
        Self { owner, pos }
    }

    /// The unset address.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(TileOwner::None, TilePos::new(0, 0))
    }

    /// Address of a hand slot.
    #[must_use]
    pub const fn hand(player: PlayerId, slot: usize) -> Self {
        Self::new(TileOwner::Player(player), TilePos::new(slot as i32, 0))
    }

    /// Address of a board cell.
    #[must_use]
    pub const fn board(pos: TilePos) -> Self {
        Self::new(TileOwner::Board, pos)
    }

    /// An address is valid when its owner is set.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        !self.owner.is_none()
    }
}

impl std::fmt::Display for TileLoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.owner {
            TileOwner::None => write!(f, "-"),
            TileOwner::Player(p) => write!(f, "P{}[{}]", p.0, self.pos.ix),
            TileOwner::Board => write!(f, "{}", self.pos),
            TileOwner::TileSet => write!(f, "pile"),
        }
    }
}

/// A tile relocation between two addresses.
///
/// The default move (both endpoints unset) marks a search-tree root and
/// is never applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: TileLoc,
    pub to: TileLoc,
}

impl Move {
    /// Create a move between two addresses.
    #[must_use]
    pub const fn new(from: TileLoc, to: TileLoc) -> Self {
        Self { from, to }
    }

    /// The unset move.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(TileLoc::none(), TileLoc::none())
    }

    /// A move is valid when both endpoints are set.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.from.is_valid() && self.to.is_valid()
    }

    /// The move that undoes this one.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(self.to, self.from)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
