//! Exhaustive single-turn search.
//!
//! The game driver builds a [`MoveTree`] by trying every hand tile on
//! every legal cell, recursively, then asks the tree for the best
//! bankable sequence. This module owns the tree structures and the
//! selection rules; the builder itself lives with the game state, which
//! it has to mutate while exploring.

pub mod best;
pub mod node;
pub mod tree;

pub use best::BestMove;
pub use node::{MoveNode, NodeId};
pub use tree::{MoveTree, TreeStats};
