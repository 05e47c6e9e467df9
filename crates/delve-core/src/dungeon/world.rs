//! The world grid: tiles plus a parallel light map.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{LightLevel, Tile};

/// Row-major tile grid with a parallel light-level grid.
///
/// Owned and mutated by the dungeon generator during a run, immutable once
/// the output record is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    width: i32,
    height: i32,
    tiles: Vec<Vec<Tile>>,
    light: Vec<Vec<LightLevel>>,
}

impl World {
    /// Create a void-filled, dark world
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0) as usize;
        let h = height.max(0) as usize;
        Self {
            width,
            height,
            tiles: vec![vec![Tile::Void; w]; h],
            light: vec![vec![LightLevel::Dark; w]; h],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Tile at (x, y). Panics out of bounds, like any grid index.
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.tiles[y as usize][x as usize]
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        self.tiles[y as usize][x as usize] = tile;
    }

    pub fn light(&self, x: i32, y: i32) -> LightLevel {
        self.light[y as usize][x as usize]
    }

    /// Tile rows, top to bottom
    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    /// Light-level rows, parallel to `rows`
    pub fn light_rows(&self) -> &[Vec<LightLevel>] {
        &self.light
    }

    /// Count tiles matching a predicate
    pub fn count_tiles(&self, f: impl Fn(Tile) -> bool) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|t| f(**t))
            .count()
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            for tile in row {
                write!(f, "{}", tile.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_is_void_and_dark() {
        let world = World::new(4, 3);
        assert_eq!(world.rows().len(), 3);
        for y in 0..3 {
            assert_eq!(world.rows()[y].len(), 4);
            for x in 0..4 {
                assert_eq!(world.tile(x as i32, y as i32), Tile::Void);
                assert_eq!(world.light(x as i32, y as i32), LightLevel::Dark);
            }
        }
    }

    #[test]
    fn test_set_tile() {
        let mut world = World::new(4, 3);
        world.set_tile(2, 1, Tile::Floor);
        assert_eq!(world.tile(2, 1), Tile::Floor);
        assert_eq!(world.count_tiles(|t| t == Tile::Floor), 1);
    }

    #[test]
    fn test_bounds() {
        let world = World::new(4, 3);
        assert!(world.in_bounds(0, 0));
        assert!(world.in_bounds(3, 2));
        assert!(!world.in_bounds(4, 2));
        assert!(!world.in_bounds(3, 3));
        assert!(!world.in_bounds(-1, 0));
    }

    #[test]
    fn test_display_shape() {
        let mut world = World::new(3, 2);
        world.set_tile(1, 0, Tile::Wall);
        let text = world.to_string();
        assert_eq!(text, " # \n   \n");
    }
}
