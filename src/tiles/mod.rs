//! Tile containers: the draw pile and player hands.

pub mod hand;
pub mod set;

pub use hand::Hand;
pub use set::TileSet;
