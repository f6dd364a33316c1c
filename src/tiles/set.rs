//! The draw pile.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, GameRng, Tile};

/// The shared pile tiles are dealt from.
///
/// Built from the configured distribution in ascending value order;
/// callers shuffle before dealing. Deals come off the back of the pile
/// and returned tiles go onto the back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSet {
    pile: Vec<Tile>,
}

impl TileSet {
    /// Build the full distribution, unshuffled.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let mut pile = Vec::with_capacity(config.tile_total());

        for (value, &count) in config.tile_counts.iter().enumerate() {
            for _ in 0..count {
                pile.push(Tile::new(value as u8));
            }
        }

        Self { pile }
    }

    /// Shuffle the pile.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.pile);
    }

    /// Deal one tile off the back of the pile.
    pub fn deal(&mut self) -> Option<Tile> {
        self.pile.pop()
    }

    /// Return a tile to the back of the pile.
    pub fn put_back(&mut self, tile: Tile) {
        debug_assert!(tile.player.is_none() && tile.turn < 0);
        self.pile.push(tile);
    }

    /// Tiles remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pile.len()
    }

    /// Check whether the pile is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pile.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_distribution() {
        let set = TileSet::new(&GameConfig::default());
        assert_eq!(set.len(), 90);
    }

    #[test]
    fn test_value_counts_match_config() {
        let config = GameConfig::default();
        let mut set = TileSet::new(&config);

        let mut counts = [0usize; 10];
        while let Some(tile) = set.deal() {
            counts[tile.value as usize] += 1;
        }

        for (value, &count) in config.tile_counts.iter().enumerate() {
            assert_eq!(counts[value], count as usize, "value {}", value);
        }
    }

    #[test]
    fn test_deal_and_put_back() {
        let mut set = TileSet::new(&GameConfig::default());
        let before = set.len();

        let tile = set.deal().unwrap();
        assert_eq!(set.len(), before - 1);

        set.put_back(tile);
        assert_eq!(set.len(), before);

        // Back of the pile: the returned tile deals next.
        assert_eq!(set.deal().unwrap(), tile);
    }

    #[test]
    fn test_deal_exhausted() {
        let config = GameConfig::default().with_tile_counts({
            let mut counts = [0; 10];
            counts[5] = 2;
            counts
        });

        let mut set = TileSet::new(&config);
        assert_eq!(set.len(), 2);
        assert!(set.deal().is_some());
        assert!(set.deal().is_some());
        assert!(set.deal().is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let config = GameConfig::default();

        let mut set1 = TileSet::new(&config);
        let mut set2 = TileSet::new(&config);

        set1.shuffle(&mut GameRng::new(7));
        set2.shuffle(&mut GameRng::new(7));
        assert_eq!(set1, set2);

        let mut set3 = TileSet::new(&config);
        set3.shuffle(&mut GameRng::new(8));
        assert_ne!(set1, set3);
    }
}
