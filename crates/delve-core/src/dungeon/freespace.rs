//! Free-space bookkeeping for interior decoration.
//!
//! A coordinate-keyed registry of the cells of a room not yet claimed by
//! any feature. One map is the single source of truth for membership; an
//! order vector kept exactly in sync provides deterministic insertion-order
//! iteration.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::grid::Point;

/// A registered free cell.
///
/// `edge` and `consumed` are transient tags used by the decoration passes
/// on snapshot copies; they have no life beyond one interior run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FreeCell {
    pub x: i32,
    pub y: i32,
    /// A 4-neighbor is a chasm cell
    pub edge: bool,
    /// Claimed by a decoration pass
    pub consumed: bool,
}

impl FreeCell {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Coordinate-keyed registry of free cells. Scoped to a single interior
/// pass and never persisted.
///
/// Invariant: `order` holds exactly the key set of `cells`, in insertion
/// order. Every operation either maintains that or leaves state unchanged.
#[derive(Debug, Clone, Default)]
pub struct FreeSpaceIndex {
    cells: HashMap<Point, FreeCell>,
    order: Vec<Point>,
}

impl FreeSpaceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cell. Fails (no mutation) if the coordinate is occupied.
    /// The stored entry is stamped with the coordinate.
    pub fn add(&mut self, p: Point) -> bool {
        if self.cells.contains_key(&p) {
            return false;
        }
        self.cells.insert(
            p,
            FreeCell {
                x: p.x,
                y: p.y,
                ..FreeCell::default()
            },
        );
        self.order.push(p);
        true
    }

    pub fn get(&self, p: Point) -> Option<&FreeCell> {
        self.cells.get(&p)
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut FreeCell> {
        self.cells.get_mut(&p)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.cells.contains_key(&p)
    }

    /// Unregister the cell at a coordinate. False if absent.
    pub fn remove_at(&mut self, p: Point) -> bool {
        if self.cells.remove(&p).is_none() {
            return false;
        }
        self.order.retain(|q| *q != p);
        true
    }

    /// Atomically relocate the entry at `from` to `to`, keeping its place
    /// in the iteration order. Fails (state unchanged) if `from` is absent
    /// or `to` is occupied.
    pub fn relocate(&mut self, from: Point, to: Point) -> bool {
        if from == to || self.cells.contains_key(&to) {
            return false;
        }
        let Some(mut cell) = self.cells.remove(&from) else {
            return false;
        };
        cell.x = to.x;
        cell.y = to.y;
        self.cells.insert(to, cell);
        for slot in &mut self.order {
            if *slot == from {
                *slot = to;
                break;
            }
        }
        true
    }

    /// Registered entries in insertion order. Lazy; restart by calling again.
    pub fn iter(&self) -> impl Iterator<Item = &FreeCell> {
        self.order.iter().filter_map(|p| self.cells.get(p))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Drop every entry, returning how many were registered
    pub fn clear(&mut self) -> usize {
        let count = self.cells.len();
        self.cells.clear();
        self.order.clear();
        count
    }
}
