//! The move tree arena and leaf selection.
//!
//! ## Overview
//!
//! [`MoveTree`] stores every explored position of one turn in a flat
//! `Vec`, parents before children (the builder allocates a node before
//! descending into it). Selection never replays moves: each node carries
//! its own score and partial flag, so picking the best finishable
//! position is a scan over the arena.
//!
//! ## Selection
//!
//! [`MoveTree::max_leaf`] buckets every non-partial node by score,
//! descending, and takes the shallowest node of the top bucket. Partial
//! positions can never be banked and are skipped entirely. Ties on both
//! score and depth fall to the earliest-allocated node, which makes
//! selection deterministic for a deterministic build order.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::best::BestMove;
use super::node::{MoveNode, NodeId};

/// Aggregate counters describing a built tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total nodes, root included.
    pub node_count: usize,
    /// Deepest node depth (root is 1).
    pub max_depth: u16,
    /// Nodes whose position could be banked.
    pub complete_count: usize,
    /// Best bankable score, 0 when none.
    pub best_score: i32,
}

/// Arena of [`MoveNode`]s for one turn's search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MoveTree {
    nodes: Vec<MoveNode>,
}

impl MoveTree {
    /// An empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
        }
    }

    /// Number of nodes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root id.
    ///
    /// Meaningful only once a root has been allocated, which is always
    /// the first allocation.
    #[must_use]
    pub fn root(&self) -> NodeId {
        debug_assert!(!self.nodes.is_empty());
        NodeId::new(0)
    }

    /// Append a node and return its id.
    pub fn alloc(&mut self, node: MoveNode) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Register `child` under `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert_eq!(self.get(child).parent, parent);
        self.get_mut(parent).children.push(child);
    }

    /// Node by id.
    ///
    /// # Panics
    ///
    /// Panics when `id` is the sentinel or out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MoveNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MoveNode {
        &mut self.nodes[id.index()]
    }

    /// All nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MoveNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i), node))
    }

    /// Counters over the whole tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            node_count: self.nodes.len(),
            ..TreeStats::default()
        };
        for node in &self.nodes {
            stats.max_depth = stats.max_depth.max(node.depth);
            if !node.partial {
                stats.complete_count += 1;
                stats.best_score = stats.best_score.max(node.score);
            }
        }
        stats
    }

    /// The node to play towards: highest bankable score, shallowest on a
    /// tie. [`None`] when the tree holds no bankable position at all.
    #[must_use]
    pub fn max_leaf(&self) -> Option<NodeId> {
        let mut by_score: BTreeMap<Reverse<i32>, Vec<NodeId>> = BTreeMap::new();
        for (id, node) in self.iter() {
            if !node.partial {
                by_score.entry(Reverse(node.score)).or_default().push(id);
            }
        }

        let (_, candidates) = by_score.first_key_value()?;
        let mut best = candidates[0];
        let mut best_depth = self.get(best).depth;
        for &id in &candidates[1..] {
            let depth = self.get(id).depth;
            if depth < best_depth {
                best = id;
                best_depth = depth;
            }
        }
        Some(best)
    }

    /// Move sequence from the root to the selected leaf.
    ///
    /// Selecting the root itself (standing pat is already the best the
    /// turn can do) yields an empty, invalid sequence.
    #[must_use]
    pub fn best_move(&self) -> BestMove {
        let leaf = match self.max_leaf() {
            Some(id) => id,
            None => return BestMove::invalid(),
        };

        let mut moves = Vec::new();
        let mut id = leaf;
        loop {
            let node = self.get(id);
            if node.mv.is_valid() {
                moves.push(node.mv);
            }
            if node.parent.is_none() {
                break;
            }
            id = node.parent;
        }
        moves.reverse();

        BestMove {
            moves,
            score: self.get(leaf).score,
        }
    }
}
