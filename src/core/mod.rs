//! Core engine types: positions, players, tiles, moves, RNG, configuration.
//!
//! These are the building blocks the board, search and game layers are
//! assembled from.

pub mod config;
pub mod player;
pub mod position;
pub mod rng;
pub mod tile;

pub use config::{GameConfig, STANDARD_TILE_COUNTS, TILE_VALUE_COUNT};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use position::TilePos;
pub use rng::GameRng;
pub use tile::{Move, Tile, TileLoc, TileOwner, TURN_NONE};
