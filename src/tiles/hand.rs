//! Player hands.
//!
//! A hand is a fixed row of slots. Taking a tile leaves a hole at its
//! slot (so undo can put the tile back exactly where it came from);
//! refills only fill holes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Tile;

use super::TileSet;

/// A player's rack of tile slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    slots: SmallVec<[Option<Tile>; 5]>,
}

impl Hand {
    /// Create an empty hand with the given number of slots.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            slots: smallvec::smallvec![None; size],
        }
    }

    /// Number of slots (filled or not).
    #[must_use]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Number of tiles currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Check whether the hand holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    /// The tile in a slot, if any.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Tile> {
        self.slots[slot].as_ref()
    }

    /// Take the tile out of a slot, leaving a hole.
    pub fn take(&mut self, slot: usize) -> Option<Tile> {
        self.slots[slot].take()
    }

    /// Put a tile into an empty slot.
    pub fn put(&mut self, slot: usize, tile: Tile) {
        assert!(self.slots[slot].is_none(), "hand slot occupied");
        self.slots[slot] = Some(tile);
    }

    /// Fill every hole from the pile, stopping silently if it empties.
    pub fn refill_from(&mut self, pile: &mut TileSet) {
        for slot in self.slots.iter_mut() {
            if slot.is_none() {
                match pile.deal() {
                    Some(tile) => *slot = Some(tile),
                    None => break,
                }
            }
        }
    }

    /// Move every held tile back into the pile.
    pub fn drain_into(&mut self, pile: &mut TileSet) {
        for slot in self.slots.iter_mut() {
            if let Some(tile) = slot.take() {
                pile.put_back(tile);
            }
        }
    }

    /// Iterate over occupied slots as (slot, tile) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Tile)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|t| (i, t)))
    }

    /// The first slot holding each distinct value, in slot order.
    ///
    /// Duplicate values generate identical candidate moves, so move
    /// generation only looks at one slot per value.
    #[must_use]
    pub fn distinct_values(&self) -> SmallVec<[(usize, u8); 5]> {
        let mut seen = [false; 10];
        let mut out = SmallVec::new();

        for (slot, tile) in self.iter() {
            let value = tile.value as usize;
            if !seen[value] {
                seen[value] = true;
                out.push((slot, tile.value));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn full_hand(values: &[u8]) -> Hand {
        let mut hand = Hand::new(values.len());
        for (i, &v) in values.iter().enumerate() {
            hand.put(i, Tile::new(v));
        }
        hand
    }

    #[test]
    fn test_new_hand_is_empty() {
        let hand = Hand::new(5);
        assert_eq!(hand.size(), 5);
        assert_eq!(hand.len(), 0);
        assert!(hand.is_empty());
    }

    #[test]
    fn test_take_leaves_hole() {
        let mut hand = full_hand(&[1, 2, 3]);

        let tile = hand.take(1).unwrap();
        assert_eq!(tile.value, 2);
        assert_eq!(hand.len(), 2);
        assert!(hand.get(1).is_none());
        assert_eq!(hand.get(0).unwrap().value, 1);
        assert_eq!(hand.get(2).unwrap().value, 3);

        assert!(hand.take(1).is_none());
    }

    #[test]
    fn test_put_into_hole() {
        let mut hand = full_hand(&[1, 2, 3]);
        let tile = hand.take(1).unwrap();
        hand.put(1, tile);
        assert_eq!(hand.get(1).unwrap().value, 2);
    }

    #[test]
    #[should_panic(expected = "hand slot occupied")]
    fn test_put_into_occupied_slot() {
        let mut hand = full_hand(&[1, 2, 3]);
        hand.put(0, Tile::new(9));
    }

    #[test]
    fn test_refill_fills_holes_only() {
        let config = GameConfig::default();
        let mut pile = TileSet::new(&config);
        let pile_before = pile.len();

        let mut hand = full_hand(&[1, 2, 3, 4, 5]);
        hand.take(0);
        hand.take(3);

        hand.refill_from(&mut pile);

        assert_eq!(hand.len(), 5);
        assert_eq!(pile.len(), pile_before - 2);
        // Untouched slots keep their tiles.
        assert_eq!(hand.get(1).unwrap().value, 2);
        assert_eq!(hand.get(4).unwrap().value, 5);
    }

    #[test]
    fn test_refill_stops_on_empty_pile() {
        let config = GameConfig::default().with_tile_counts({
            let mut counts = [0; 10];
            counts[7] = 1;
            counts
        });
        let mut pile = TileSet::new(&config);

        let mut hand = Hand::new(3);
        hand.refill_from(&mut pile);

        assert_eq!(hand.len(), 1);
        assert!(pile.is_empty());
    }

    #[test]
    fn test_drain_into() {
        let config = GameConfig::default();
        let mut pile = TileSet::new(&config);
        let pile_before = pile.len();

        let mut hand = full_hand(&[4, 5]);
        hand.drain_into(&mut pile);

        assert!(hand.is_empty());
        assert_eq!(pile.len(), pile_before + 2);
    }

    #[test]
    fn test_distinct_values_dedups() {
        let hand = full_hand(&[5, 3, 5, 3, 8]);
        let distinct = hand.distinct_values();

        assert_eq!(distinct.as_slice(), &[(0, 5), (1, 3), (4, 8)]);
    }

    #[test]
    fn test_distinct_values_skips_holes() {
        let mut hand = full_hand(&[5, 3, 8]);
        hand.take(0);

        let distinct = hand.distinct_values();
        assert_eq!(distinct.as_slice(), &[(1, 3), (2, 8)]);
    }
}
