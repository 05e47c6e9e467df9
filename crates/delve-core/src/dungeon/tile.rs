//! World cell vocabulary.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// One value per world cell.
///
/// Cells only ever move away from `Void` during generation; they never
/// revert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Void = 0,
    Floor = 1,
    Wall = 2,
    Door = 3,
    SpecialDoor = 4,
    Enter = 5,
    Exit = 6,
}

impl Tile {
    /// Display character for ASCII rendering
    pub const fn symbol(&self) -> char {
        match self {
            Tile::Void => ' ',
            Tile::Floor => '.',
            Tile::Wall => '#',
            Tile::Door => '+',
            Tile::SpecialDoor => '*',
            Tile::Enter => '<',
            Tile::Exit => '>',
        }
    }

    /// Check if this is a door tile
    pub const fn is_door(&self) -> bool {
        matches!(self, Tile::Door | Tile::SpecialDoor)
    }

    /// Check if this cell can be walked on
    pub const fn is_passable(&self) -> bool {
        matches!(
            self,
            Tile::Floor | Tile::Door | Tile::SpecialDoor | Tile::Enter | Tile::Exit
        )
    }
}

/// Per-cell light level, kept in a grid parallel to the tiles.
///
/// The generator initializes every cell to `Dark` and never varies it;
/// the scale is reserved for future lighting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum LightLevel {
    #[default]
    Dark = 0,
    Shady = 1,
    Overcast = 2,
    Bright = 3,
}
