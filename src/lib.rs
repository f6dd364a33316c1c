//! # quinto-engine
//!
//! A rules engine and exhaustive best-move search for the Quinto tile
//! game: two players draw numbered tiles and lay them in crossword-style
//! lines whose sums must be multiples of five.
//!
//! ## Design Principles
//!
//! 1. **One Mutable State**: The game owns a single board and mutates it
//!    in place. Search applies moves on the live state and undoes them,
//!    instead of cloning positions.
//!
//! 2. **Apply/Undo Symmetry**: Every state change is a tile relocation
//!    between two addresses, and undoing is relocating back. A drop
//!    guard makes the undo unconditional inside the search.
//!
//! 3. **Analysis As Data**: Rule checking never fails with errors; it
//!    produces a `BoardDetails` value carrying validity, score, lines
//!    and playable cells. Invalid just prunes the search.
//!
//! ## Architecture
//!
//! - **Memoized analysis**: The board caches its turn analysis and its
//!   searched best move, dropping both on any mutation.
//!
//! - **Arena search tree**: Explored positions live in a flat `Vec`
//!   indexed by `NodeId`; each node carries its own score, so selection
//!   is a scan with no replay.
//!
//! - **Deterministic play**: Shuffling runs on a seeded ChaCha8 stream
//!   and candidate enumeration follows position order, so a seed fully
//!   determines a game.
//!
//! ## Modules
//!
//! - `core`: Positions, players, tiles, moves, RNG, configuration
//! - `tiles`: The draw pile and player hands
//! - `board`: The grid, line detection and turn analysis
//! - `search`: Move tree arena, leaf selection, best-move results
//! - `game`: Game state, turn cycle and the computer driver

pub mod board;
pub mod core;
pub mod game;
pub mod search;
pub mod tiles;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, GameRng, Move, PlayerId, PlayerMap, Tile, TileLoc, TileOwner, TilePos,
    PLAYER_COUNT, STANDARD_TILE_COUNTS, TILE_VALUE_COUNT, TURN_NONE,
};

pub use crate::tiles::{Hand, TileSet};

pub use crate::board::{
    Board, BoardDetails, Dir, LineVerdict, TileLine, MAX_LINE_LEN, SCORE_MULTIPLE,
};

pub use crate::search::{BestMove, MoveNode, MoveTree, NodeId, TreeStats};

pub use crate::game::{Game, GameBuilder, GameResult, PlayerState, Turn, TurnMoves};
