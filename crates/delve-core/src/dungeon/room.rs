//! Room records.
//!
//! Rooms live in an index-stable arena on the output record; a room's id is
//! its index, and neighbor/door references are plain indices into the
//! sibling arenas.

use serde::{Deserialize, Serialize};

use crate::grid::Point;
use crate::rng::GameRng;

/// A placed room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Arena index, assigned sequentially from 0
    pub id: usize,
    /// Left column of the interior rectangle
    pub left: i32,
    /// Top row of the interior rectangle
    pub top: i32,
    pub width: i32,
    pub height: i32,
    /// Perimeter cells recorded for this room during wall tracing.
    /// A wall shared between two rooms' perimeters appears in both lists.
    pub walls: Vec<Point>,
    /// Ids of rooms connected to this one by a door
    pub neighbors: Vec<usize>,
    /// Ids of doors on this room's boundary
    pub doors: Vec<usize>,
    /// Exactly one neighbor
    pub deadend: bool,
    pub enter: bool,
    pub exit: bool,
    pub special: bool,
}

impl Room {
    pub fn new(id: usize, left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            id,
            left,
            top,
            width,
            height,
            walls: Vec::new(),
            neighbors: Vec::new(),
            doors: Vec::new(),
            deadend: false,
            enter: false,
            exit: false,
            special: false,
        }
    }

    /// Interior cell count
    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Collision test against a candidate rectangle.
    ///
    /// A candidate directly adjacent to this room (no gap) collides; one
    /// separated by at least one empty cell does not. Committed rooms are
    /// therefore always separated by the shared wall line.
    pub fn overlaps(&self, left: i32, top: i32, width: i32, height: i32) -> bool {
        !(left > self.left + self.width
            || left + width < self.left
            || top > self.top + self.height
            || top + height < self.top)
    }

    /// Check if a point lies inside the interior rectangle
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.x < self.left + self.width
            && p.y >= self.top
            && p.y < self.top + self.height
    }

    /// Check if a point lies strictly inside, off the outer ring
    pub fn strictly_contains(&self, p: Point) -> bool {
        p.x > self.left
            && p.x < self.left + self.width - 1
            && p.y > self.top
            && p.y < self.top + self.height - 1
    }

    /// Random interior cell excluding the outer ring
    pub fn random_interior_point(&self, rng: &mut GameRng) -> Point {
        Point::new(
            rng.range(self.left + 1, self.left + self.width - 2),
            rng.range(self.top + 1, self.top + self.height - 2),
        )
    }
}
