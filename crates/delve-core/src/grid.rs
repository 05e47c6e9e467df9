//! Grid geometry: points, compass directions, distance metrics and
//! line rasterization over integer cell coordinates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A cell coordinate on the map grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Compass direction
///
/// Parses from the lowercase name (`"north"`, `"east"`, ...); any other
/// name is a parse error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Unit step for this direction. North is -y, south is +y.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Chebyshev distance: max of the axis deltas. Cheap integer bound on
/// `distance`.
pub fn fast_distance(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// True iff `a` and `b` are 4-connected orthogonal neighbors.
/// A point is not adjacent to itself.
pub fn adjacent(a: Point, b: Point) -> bool {
    (a.x == b.x && (a.y - b.y).abs() == 1) || (a.y == b.y && (a.x - b.x).abs() == 1)
}

/// The point `distance` steps from `origin` along `direction`
pub fn ahead(origin: Point, direction: Direction, distance: i32) -> Point {
    let (dx, dy) = direction.delta();
    Point::new(origin.x + dx * distance, origin.y + dy * distance)
}

/// Ordered grid points from `start` to `end` inclusive (integer Bresenham).
///
/// With `cardinal` set, an intermediate orthogonal point is inserted
/// wherever the raw algorithm would take a diagonal step, so the returned
/// path is 4-connected.
pub fn line(start: Point, end: Point, cardinal: bool) -> Vec<Point> {
    let mut points = Vec::new();
    let mut x = start.x;
    let mut y = start.y;

    let dx = (end.x - x).abs();
    let dy = (end.y - y).abs();
    let sx = if x < end.x { 1 } else { -1 };
    let sy = if y < end.y { 1 } else { -1 };

    let mut err = dx - dy;

    loop {
        points.push(Point::new(x, y));

        if x == end.x && y == end.y {
            break;
        }

        let e2 = 2 * err;

        if cardinal && e2 > -dy && e2 < dx {
            points.push(Point::new(x + sx, y));
        }

        if e2 > -dy {
            err -= dy;
            x += sx;
        }

        if e2 < dx {
            err += dx;
            y += sy;
        }
    }

    points
}
