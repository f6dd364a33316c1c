//! Search tree nodes.
//!
//! Nodes live in a flat arena indexed by [`NodeId`] and reference each
//! other by id, never by pointer. Each node records the move that led to
//! its position together with the turn analysis of that position, so the
//! tree can be ranked and a move sequence reconstructed without replaying
//! anything on the board.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Move;

/// Index of a node in the tree arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for "no node" (a root's parent).
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a node id from an arena index.
    #[must_use]
    pub fn new(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize);
        NodeId(index as u32)
    }

    /// Check whether this is the sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// The arena index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "node(-)")
        } else {
            write!(f, "node({})", self.0)
        }
    }
}

/// One explored position in the move tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveNode {
    /// The move that produced this position; unset on the root.
    pub mv: Move,
    /// Turn score of the position.
    pub score: i32,
    /// Whether the position's turn was still partial.
    pub partial: bool,
    /// Depth in the tree; the root sits at 1.
    pub depth: u16,
    /// Parent node, [`NodeId::NONE`] on the root.
    pub parent: NodeId,
    /// Child nodes in exploration order.
    pub children: SmallVec<[NodeId; 8]>,
}

impl MoveNode {
    /// Create a node for the position reached by `mv`.
    #[must_use]
    pub fn new(mv: Move, score: i32, partial: bool, depth: u16, parent: NodeId) -> Self {
        Self {
            mv,
            score,
            partial,
            depth,
            parent,
            children: SmallVec::new(),
        }
    }

    /// Create a root node describing the position as it stands.
    #[must_use]
    pub fn root(score: i32, partial: bool) -> Self {
        Self::new(Move::none(), score, partial, 1, NodeId::NONE)
    }

    /// Whether this node has no explored children.
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
