//! Dungeon generation driver.
//!
//! Places non-overlapping rooms across a bounded grid by sliding candidate
//! rectangles in from the map edges, connects each committed room to the
//! room it slid into with a door, traces walls around every room, and
//! designates entrance/exit/special rooms among the dead ends.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, DISTANCE_BETWEEN_ROOMS, IDEAL_ROOM_COUNT, MAX_ROOM_HEIGHT,
    MAX_ROOM_WIDTH, MIN_ROOM_HEIGHT, MIN_ROOM_WIDTH, RETRY_COUNT,
};
use crate::grid::Point;
use crate::rng::GameRng;

use super::door::{Door, DoorOrientation};
use super::interior::{
    DecorAmount, DecorLocation, DecorSpec, InteriorGenerator, InteriorOptions, RoomInterior,
    RoomKind,
};
use super::layers::{FloorKind, MidFeature};
use super::room::Room;
use super::tile::Tile;
use super::world::World;

/// Room bounds and target count for the growth loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Stop growing once this many rooms are placed
    pub ideal: u32,
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            ideal: IDEAL_ROOM_COUNT,
            min_width: MIN_ROOM_WIDTH,
            max_width: MAX_ROOM_WIDTH,
            min_height: MIN_ROOM_HEIGHT,
            max_height: MAX_ROOM_HEIGHT,
        }
    }
}

/// Full generation configuration.
///
/// The map must be large enough for the smallest configured room plus the
/// border buffer on each side; degenerate bounds are the caller's
/// responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonConfig {
    pub width: i32,
    pub height: i32,
    /// Consecutive failed placement attempts allowed before growth stops
    pub retry: u32,
    /// Reserve a bonus dead-end room behind a special door
    pub special: bool,
    /// Decorate room interiors instead of flat floor fill
    pub roomify: bool,
    pub room: RoomConfig,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            retry: RETRY_COUNT,
            special: false,
            roomify: false,
            room: RoomConfig::default(),
        }
    }
}

/// Generation failure: the finished layout cannot seat both entrance and
/// exit in distinct dead-end rooms. Retry with a new seed or a
/// configuration that yields more rooms.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no dead-end room available for the entrance")]
    NoEntranceDeadEnd,
    #[error("no dead-end room available for the exit")]
    NoExitDeadEnd,
}

/// A marked cell inside a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub x: i32,
    pub y: i32,
    pub room: usize,
}

/// The bonus room selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRoom {
    pub room: usize,
    pub door: usize,
}

/// Output record of one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub width: i32,
    pub height: i32,
    pub entrance: Marker,
    pub exit: Marker,
    /// Dead-end rooms left over after entrance/exit/special selection
    pub deadends: Vec<usize>,
    pub special: Option<SpecialRoom>,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    /// Every wall cell, in tracing order
    pub walls: Vec<Point>,
    pub world: World,
}

impl Dungeon {
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn door_count(&self) -> usize {
        self.doors.len()
    }
}

/// Run one full generation.
///
/// The only failure is the entrance/exit selection of [`GenerationError`];
/// rooms or features that fail to place within their budgets are absorbed
/// silently and simply leave a smaller dungeon.
pub fn generate(config: &DungeonConfig, rng: &mut GameRng) -> Result<Dungeon, GenerationError> {
    let mut builder = Builder {
        config,
        world: World::new(config.width, config.height),
        rooms: Vec::new(),
        doors: Vec::new(),
        walls: Vec::new(),
    };

    builder.add_starter_room(rng);
    builder.grow(rng);
    let (entrance, exit, deadends, special) = builder.assign_special_rooms(rng)?;
    builder.build_walls();

    Ok(Dungeon {
        width: config.width,
        height: config.height,
        entrance,
        exit,
        deadends,
        special,
        rooms: builder.rooms,
        doors: builder.doors,
        walls: builder.walls,
        world: builder.world,
    })
}

/// What a slide step ran into
enum SlideHit {
    /// No room touched
    None,
    /// Touched a room with a shared boundary span: connect here
    Proper(usize),
    /// Touched a room corner-to-corner or flush with no shared span;
    /// there is no wall cell to put a door through
    Graze,
}

struct Builder<'a> {
    config: &'a DungeonConfig,
    world: World,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    walls: Vec<Point>,
}

impl Builder<'_> {
    /// Random odd dimensions within the configured bounds, clamped so the
    /// room can fit the buffered placement band
    fn room_dimensions(&self, rng: &mut GameRng) -> (i32, i32) {
        let max_width = self
            .config
            .room
            .max_width
            .min(self.config.width - DISTANCE_BETWEEN_ROOMS * 2);
        let max_height = self
            .config
            .room
            .max_height
            .min(self.config.height - DISTANCE_BETWEEN_ROOMS * 2);
        (
            rng.range_odd(self.config.room.min_width, max_width),
            rng.range_odd(self.config.room.min_height, max_height),
        )
    }

    fn add_starter_room(&mut self, rng: &mut GameRng) {
        let (width, height) = self.room_dimensions(rng);
        let buffer = DISTANCE_BETWEEN_ROOMS;
        let max_left = self.config.width - (width + buffer * 2) + buffer;
        let max_top = self.config.height - (height + buffer * 2) + buffer;
        let left = rng.range_odd(buffer, max_left);
        let top = rng.range_odd(buffer, max_top);
        self.add_room(left, top, width, height, rng);
    }

    /// Attempt placements until the ideal room count is reached or the
    /// retry budget runs out
    fn grow(&mut self, rng: &mut GameRng) {
        let mut retries = self.config.retry as i64;
        while (self.rooms.len() as u32) < self.config.room.ideal {
            if !self.try_place_room(rng) {
                retries -= 1;
                if retries <= 0 {
                    break;
                }
            }
        }
    }

    /// One placement attempt: pick a slide direction, drop the candidate
    /// flush against the opposite map edge at a random lateral offset, and
    /// slide inward until it runs into a room or out of bounds.
    fn try_place_room(&mut self, rng: &mut GameRng) -> bool {
        let slide = rng.range(0, 3);
        let x_dir = match slide {
            1 => 1,
            3 => -1,
            _ => 0,
        };
        let y_dir = match slide {
            0 => 1,
            2 => -1,
            _ => 0,
        };
        let (width, height) = self.room_dimensions(rng);
        let buffer = DISTANCE_BETWEEN_ROOMS;

        let (mut left, mut top) = match slide {
            // sliding south from the top edge
            0 => (
                rng.range_odd(buffer, self.config.width - width - buffer * 2),
                buffer,
            ),
            // sliding east from the west edge
            1 => (
                buffer,
                rng.range_odd(buffer, self.config.height - height - buffer * 2),
            ),
            // sliding north from the bottom edge
            2 => (
                rng.range_odd(buffer, self.config.width - width - buffer * 2),
                self.config.height - height - buffer,
            ),
            // sliding west from the east edge
            _ => (
                self.config.width - width - buffer,
                rng.range_odd(buffer, self.config.height - height - buffer * 2),
            ),
        };

        if self.collides(left, top, width, height).is_some() {
            return false;
        }

        let horizontal = x_dir != 0;
        let target;
        loop {
            match self.slide_hit(left + x_dir, top + y_dir, width, height, horizontal) {
                SlideHit::Proper(room_id) => {
                    target = room_id;
                    break;
                }
                SlideHit::Graze => return false,
                SlideHit::None => {
                    left += x_dir;
                    top += y_dir;
                    if self.out_of_bounds(left, top, width, height) {
                        return false;
                    }
                }
            }
        }

        let new_id = self.add_room(left, top, width, height, rng);
        self.add_door_between(x_dir, y_dir, target, new_id, rng);
        true
    }

    /// First room the candidate rectangle touches, in id order
    fn collides(&self, left: i32, top: i32, width: i32, height: i32) -> Option<usize> {
        self.rooms
            .iter()
            .find(|room| room.overlaps(left, top, width, height))
            .map(|room| room.id)
    }

    /// Like `collides`, but classifies whether the touched room shares a
    /// boundary span on the lateral axis. A graze has no wall cell the two
    /// rooms could share, so no door can join them.
    fn slide_hit(
        &self,
        left: i32,
        top: i32,
        width: i32,
        height: i32,
        horizontal: bool,
    ) -> SlideHit {
        match self.collides(left, top, width, height) {
            None => SlideHit::None,
            Some(id) => {
                let room = &self.rooms[id];
                let shared = if horizontal {
                    top.max(room.top) < (top + height).min(room.top + room.height)
                } else {
                    left.max(room.left) < (left + width).min(room.left + room.width)
                };
                if shared {
                    SlideHit::Proper(id)
                } else {
                    SlideHit::Graze
                }
            }
        }
    }

    /// Bounds test applied after each slide step. The initial edge-flush
    /// position is deliberately never tested, so an immediately colliding
    /// candidate may commit at the buffer line itself.
    fn out_of_bounds(&self, left: i32, top: i32, width: i32, height: i32) -> bool {
        top <= DISTANCE_BETWEEN_ROOMS
            || left <= DISTANCE_BETWEEN_ROOMS
            || top + height >= self.config.height - DISTANCE_BETWEEN_ROOMS
            || left + width >= self.config.width - DISTANCE_BETWEEN_ROOMS
    }

    /// Commit a room and write its interior into the world
    fn add_room(&mut self, left: i32, top: i32, width: i32, height: i32, rng: &mut GameRng) -> usize {
        let id = self.rooms.len();
        self.rooms.push(Room::new(id, left, top, width, height));

        if self.config.roomify {
            let interior = self.decorate_room(width, height, rng);
            for y in 0..height {
                for x in 0..width {
                    self.world
                        .set_tile(left + x, top + y, merged_tile(&interior, x, y));
                }
            }
        } else {
            for y in top..top + height {
                for x in left..left + width {
                    self.world.set_tile(x, y, Tile::Floor);
                }
            }
        }

        id
    }

    /// Sample decoration options for one room. Interiors are decorated at
    /// placement time, before the connecting door exists, so no openings
    /// are passed.
    fn decorate_room(&self, width: i32, height: i32, rng: &mut GameRng) -> RoomInterior {
        let kind = rng.choose(&RoomKind::ALL).copied().unwrap_or(RoomKind::A1);
        let options = InteriorOptions {
            kind,
            pillars: rng.one_in(2),
            treasure: rng.one_in(2),
            litter: rng.fraction(0.25),
            chasm: false,
            holes: rng.range(0, 2) as u32,
            circle: rng.one_in(2),
            gashes: rng.range(0, 2) as u32,
            decor: vec![
                DecorSpec {
                    id: "cobweb".into(),
                    amount: DecorAmount::Rate(rng.fraction(0.25)),
                    location: DecorLocation::Any,
                },
                DecorSpec {
                    id: "desk".into(),
                    amount: DecorAmount::Count(rng.range(0, 3) as u32),
                    location: DecorLocation::Central,
                },
                DecorSpec {
                    id: "books".into(),
                    amount: DecorAmount::Rate(rng.fraction(0.15)),
                    location: DecorLocation::Edge,
                },
            ],
            focal_point: None,
        };
        InteriorGenerator::new(width, height, Vec::new()).generate(&options, rng)
    }

    /// One door between the committed room and the room it slid into, at a
    /// uniformly random cell of their shared boundary span, shrunk by one
    /// at each end to avoid corners. Degenerate one- or two-cell spans
    /// collapse into the span instead of past it.
    fn add_door_between(
        &mut self,
        x_dir: i32,
        y_dir: i32,
        existing: usize,
        new_id: usize,
        rng: &mut GameRng,
    ) {
        let e = &self.rooms[existing];
        let n = &self.rooms[new_id];

        let (x, y, orientation) = if x_dir == 1 {
            let span = (e.top.max(n.top), (e.top + e.height).min(n.top + n.height));
            (
                e.left - 1,
                door_cell(span, rng),
                DoorOrientation::Horizontal,
            )
        } else if x_dir == -1 {
            let span = (n.top.max(e.top), (n.top + n.height).min(e.top + e.height));
            (
                n.left - 1,
                door_cell(span, rng),
                DoorOrientation::Horizontal,
            )
        } else if y_dir == -1 {
            let span = (e.left.max(n.left), (e.left + e.width).min(n.left + n.width));
            (door_cell(span, rng), n.top - 1, DoorOrientation::Vertical)
        } else {
            let span = (n.left.max(e.left), (n.left + n.width).min(e.left + e.width));
            (door_cell(span, rng), e.top - 1, DoorOrientation::Vertical)
        };

        self.add_door(x, y, [existing, new_id], orientation);
        self.rooms[existing].neighbors.push(new_id);
        self.rooms[new_id].neighbors.push(existing);
    }

    fn add_door(&mut self, x: i32, y: i32, rooms: [usize; 2], orientation: DoorOrientation) -> usize {
        self.world.set_tile(x, y, Tile::Door);
        let id = self.doors.len();
        self.doors.push(Door::new(id, x, y, orientation, rooms));
        self.rooms[rooms[0]].doors.push(id);
        self.rooms[rooms[1]].doors.push(id);
        id
    }

    /// Visit every room's full perimeter ring; still-void cells become
    /// walls, and every wall cell on the ring is recorded against the room
    fn build_walls(&mut self) {
        for id in 0..self.rooms.len() {
            let (left, top, width, height) = {
                let room = &self.rooms[id];
                (room.left, room.top, room.width, room.height)
            };

            for x in (left - 1)..(left + width + 1) {
                self.add_wall(x, top - 1, id);
            }
            for y in top..(top + height) {
                self.add_wall(left + width, y, id);
            }
            for x in (left - 1)..(left + width + 1) {
                self.add_wall(x, top + height, id);
            }
            for y in top..(top + height) {
                self.add_wall(left - 1, y, id);
            }
        }
    }

    fn add_wall(&mut self, x: i32, y: i32, room_id: usize) {
        if self.world.tile(x, y) == Tile::Void {
            self.world.set_tile(x, y, Tile::Wall);
            self.walls.push(Point::new(x, y));
        }
        // a wall shared by two rooms' perimeters is recorded against both
        if self.world.tile(x, y) == Tile::Wall {
            self.rooms[room_id].walls.push(Point::new(x, y));
        }
    }

    /// Classify dead ends, reserve the special room, then pop entrance and
    /// exit from the shuffled dead-end pool
    fn assign_special_rooms(
        &mut self,
        rng: &mut GameRng,
    ) -> Result<(Marker, Marker, Vec<usize>, Option<SpecialRoom>), GenerationError> {
        let mut deadends: Vec<usize> = Vec::new();
        let mut smallest: Option<(usize, i32)> = None;

        for room in &mut self.rooms {
            if room.neighbors.len() == 1 {
                room.deadend = true;
                deadends.push(room.id);
                let area = room.area();
                // strict comparison: the first-seen room wins area ties
                if smallest.is_none_or(|(_, best)| area < best) {
                    smallest = Some((room.id, area));
                }
            }
        }

        let mut special = None;
        if self.config.special
            && deadends.len() >= 2
            && let Some((room_id, _)) = smallest
        {
            deadends.retain(|&id| id != room_id);
            let door_id = self.rooms[room_id].doors[0];
            self.doors[door_id].special = true;
            self.rooms[room_id].special = true;
            let (door_x, door_y) = (self.doors[door_id].x, self.doors[door_id].y);
            self.world.set_tile(door_x, door_y, Tile::SpecialDoor);
            special = Some(SpecialRoom {
                room: room_id,
                door: door_id,
            });
        }

        rng.shuffle(&mut deadends);

        let enter_room = deadends
            .pop()
            .ok_or(GenerationError::NoEntranceDeadEnd)?;
        let enter = self.rooms[enter_room].random_interior_point(rng);
        self.world.set_tile(enter.x, enter.y, Tile::Enter);
        self.rooms[enter_room].enter = true;
        let enter_door = self.rooms[enter_room].doors[0];
        self.doors[enter_door].enter = true;

        let exit_room = deadends.pop().ok_or(GenerationError::NoExitDeadEnd)?;
        let exit = self.rooms[exit_room].random_interior_point(rng);
        self.world.set_tile(exit.x, exit.y, Tile::Exit);
        self.rooms[exit_room].exit = true;
        let exit_door = self.rooms[exit_room].doors[0];
        self.doors[exit_door].exit = true;

        Ok((
            Marker {
                x: enter.x,
                y: enter.y,
                room: enter_room,
            },
            Marker {
                x: exit.x,
                y: exit.y,
                room: exit_room,
            },
            deadends,
            special,
        ))
    }
}

/// Pick a door cell inside the shared boundary span `[lo, hi)`, preferring
/// the span shrunk by one at each end
fn door_cell((lo, hi): (i32, i32), rng: &mut GameRng) -> i32 {
    rng.range(lo + 1, hi - 2).clamp(lo, hi - 1)
}

/// Mid layer over floor layer, mapped into the world tile vocabulary
fn merged_tile(interior: &RoomInterior, x: i32, y: i32) -> Tile {
    match &interior.layers.mid[y as usize][x as usize] {
        Some(MidFeature::Door) => Tile::Door,
        Some(MidFeature::Wall) | Some(MidFeature::Pillar) => Tile::Wall,
        Some(MidFeature::Treasure) | Some(MidFeature::Decor(_)) => Tile::Floor,
        None => match interior.layers.floor[y as usize][x as usize] {
            FloorKind::Chasm => Tile::Void,
            FloorKind::Solid | FloorKind::Bridge | FloorKind::Litter => Tile::Floor,
        },
    }
}
