//! Door records.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Door orientation: horizontal doors join rooms side by side (east/west
/// slides), vertical doors join rooms stacked north/south.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DoorOrientation {
    Horizontal,
    Vertical,
}

/// A door joining exactly two rooms.
///
/// The coordinate always lies on the shared wall line between the two
/// rooms' rectangles and holds a `Door`/`SpecialDoor` tile in the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    /// Arena index, assigned sequentially from 0
    pub id: usize,
    pub x: i32,
    pub y: i32,
    pub orientation: DoorOrientation,
    /// The two connected room ids
    pub rooms: [usize; 2],
    pub enter: bool,
    pub exit: bool,
    pub special: bool,
}

impl Door {
    pub fn new(id: usize, x: i32, y: i32, orientation: DoorOrientation, rooms: [usize; 2]) -> Self {
        Self {
            id,
            x,
            y,
            orientation,
            rooms,
            enter: false,
            exit: false,
            special: false,
        }
    }

    /// Check if this door connects the given room
    pub fn connects(&self, room_id: usize) -> bool {
        self.rooms[0] == room_id || self.rooms[1] == room_id
    }
}
