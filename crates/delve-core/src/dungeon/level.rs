//! Level structure: the tile grid handed to rendering and gameplay

use serde::{Deserialize, Serialize};

use super::Tile;
use crate::error::GenError;
use crate::rng::MapRng;

/// Offsets of the 8 surrounding cells, row by row
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A generated dungeon level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// How many trapdoors below the surface this level is
    pub depth: u32,

    /// Tiles indexed `[y][x]`
    tiles: Vec<Vec<Tile>>,
}

impl Level {
    /// Create a level filled with `Outside`
    pub fn new(width: usize, height: usize, depth: u32) -> Self {
        Self {
            depth,
            tiles: vec![vec![Tile::Outside; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.tiles.len()
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        y < self.height() && x < self.width()
    }

    /// Tile at (x, y), `None` outside the map
    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        self.tiles.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Replace the tile at (x, y); returns false if out of bounds
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) -> bool {
        match self.tiles.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }

    /// Rows of tiles, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.iter().map(Vec::as_slice)
    }

    /// Check if the player can stand on (x, y)
    pub fn is_passable(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(|t| t.is_passable())
    }

    /// Count in-bounds neighbours of (x, y) matching `pred`
    pub fn neighbours(&self, x: usize, y: usize, pred: impl Fn(Tile) -> bool) -> usize {
        NEIGHBOUR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                self.get(nx, ny)
            })
            .filter(|&t| pred(t))
            .count()
    }

    /// Number of cells holding exactly `tile`
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().flatten().filter(|&&t| t == tile).count()
    }

    /// Coordinates of every cell holding exactly `tile`, row-major
    pub fn positions(&self, tile: Tile) -> Vec<(usize, usize)> {
        self.tiles
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(move |&(_, &t)| t == tile)
                    .map(move |(x, _)| (x, y))
            })
            .collect()
    }

    /// Open a closed chest at (x, y)
    ///
    /// Returns true if a chest changed state.
    pub fn open_chest(&mut self, x: usize, y: usize) -> bool {
        if self.get(x, y) == Some(Tile::closed_chest()) {
            self.set(x, y, Tile::Chest { open: true })
        } else {
            false
        }
    }

    /// Pick a random floor cell, e.g. for spawning the player
    pub fn random_floor(
        &self,
        rng: &mut MapRng,
        max_attempts: u32,
    ) -> Result<(usize, usize), GenError> {
        if self.width() > 0 {
            for _ in 0..max_attempts {
                let x = rng.rn2(self.width());
                let y = rng.rn2(self.height());
                if self.get(x, y) == Some(Tile::Floor) {
                    return Ok((x, y));
                }
            }
        }
        Err(GenError::PlacementExhausted {
            tile: Tile::Floor,
            attempts: max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_level_is_outside() {
        let level = Level::new(5, 3, 2);
        assert_eq!(level.width(), 5);
        assert_eq!(level.height(), 3);
        assert_eq!(level.depth, 2);
        assert_eq!(level.count(Tile::Outside), 15);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut level = Level::new(4, 4, 0);
        assert!(level.set(3, 1, Tile::Floor));
        assert_eq!(level.get(3, 1), Some(Tile::Floor));
        assert!(!level.set(4, 1, Tile::Floor));
        assert_eq!(level.get(0, 4), None);
        assert!(!level.is_passable(10, 10));
    }

    #[test]
    fn test_neighbours_skip_out_of_bounds() {
        let mut level = Level::new(3, 3, 0);
        for y in 0..3 {
            for x in 0..3 {
                level.set(x, y, Tile::Floor);
            }
        }
        assert_eq!(level.neighbours(1, 1, |t| t == Tile::Floor), 8);
        assert_eq!(level.neighbours(0, 0, |t| t == Tile::Floor), 3);
        assert_eq!(level.neighbours(2, 1, |t| t == Tile::Floor), 5);
    }

    #[test]
    fn test_positions_are_row_major() {
        let mut level = Level::new(3, 2, 0);
        level.set(2, 0, Tile::Box);
        level.set(0, 1, Tile::Box);
        assert_eq!(level.positions(Tile::Box), vec![(2, 0), (0, 1)]);
    }

    #[test]
    fn test_open_chest_once() {
        let mut level = Level::new(2, 2, 0);
        level.set(1, 1, Tile::closed_chest());
        assert!(level.open_chest(1, 1));
        assert_eq!(level.get(1, 1), Some(Tile::Chest { open: true }));
        assert!(!level.open_chest(1, 1));
        assert!(!level.open_chest(0, 0));
    }

    #[test]
    fn test_random_floor() {
        let mut level = Level::new(6, 6, 0);
        level.set(4, 2, Tile::Floor);
        let mut rng = MapRng::new(3);
        assert_eq!(level.random_floor(&mut rng, 10_000), Ok((4, 2)));

        let empty = Level::new(6, 6, 0);
        assert!(matches!(
            empty.random_floor(&mut rng, 50),
            Err(GenError::PlacementExhausted { attempts: 50, .. })
        ));
    }
}
