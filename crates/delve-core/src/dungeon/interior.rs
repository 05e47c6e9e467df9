//! Per-room interior decoration.
//!
//! Given a room footprint and its door openings, produces layered interior
//! content: floor classification, placed features, and the remaining
//! free-space map. Every feature pass is best-effort under its own retry
//! budget; generation always succeeds.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::consts::{MAX_INTERIOR_SIZE, MIN_INTERIOR_SIZE};
use crate::grid::{self, Direction, Point};
use crate::rng::GameRng;

use super::freespace::{FreeCell, FreeSpaceIndex};
use super::layers::{BlockKind, CellFlags, CellMeta, FloorKind, MidFeature, RoomLayers};

/// Room type code, naming which sides carry door openings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum RoomKind {
    A1,
    B1,
    B2,
    B3,
    B4,
    C1,
    C2,
    D1,
    D2,
    D3,
    D4,
    E1,
    E2,
    E3,
    E4,
}

impl RoomKind {
    /// All room kinds for random selection
    pub const ALL: [RoomKind; 15] = [
        RoomKind::A1,
        RoomKind::B1,
        RoomKind::B2,
        RoomKind::B3,
        RoomKind::B4,
        RoomKind::C1,
        RoomKind::C2,
        RoomKind::D1,
        RoomKind::D2,
        RoomKind::D3,
        RoomKind::D4,
        RoomKind::E1,
        RoomKind::E2,
        RoomKind::E3,
        RoomKind::E4,
    ];

    /// The compass sides this kind opens doors on
    pub const fn door_sides(self) -> &'static [Direction] {
        use Direction::{East, North, South, West};
        match self {
            RoomKind::A1 => &[North, East, South, West],
            RoomKind::B1 => &[North, East],
            RoomKind::B2 => &[East, South],
            RoomKind::B3 => &[South, West],
            RoomKind::B4 => &[West, North],
            RoomKind::C1 => &[North, South],
            RoomKind::C2 => &[East, West],
            RoomKind::D1 => &[North],
            RoomKind::D2 => &[East],
            RoomKind::D3 => &[South],
            RoomKind::D4 => &[West],
            RoomKind::E1 => &[North, East, West],
            RoomKind::E2 => &[North, East, South],
            RoomKind::E3 => &[East, South, West],
            RoomKind::E4 => &[North, South, West],
        }
    }
}

/// Where a decor descriptor may claim cells
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DecorLocation {
    #[default]
    Any,
    /// Only cells with no chasm neighbor
    Central,
    /// Only cells bordering a chasm
    Edge,
}

/// How many cells a decor descriptor targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorAmount {
    /// `ceil(rate * free cells)` at snapshot time
    Rate(f64),
    Count(u32),
}

/// One decor request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorSpec {
    pub id: String,
    pub amount: DecorAmount,
    pub location: DecorLocation,
}

/// A door opening on the room perimeter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorOpening {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

/// Feature configuration for one interior run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteriorOptions {
    pub kind: RoomKind,
    /// Place a pillar marker
    pub pillars: bool,
    /// Reserve a treasure spot around the focal point
    pub treasure: bool,
    /// Fraction of free cells to cover in litter, in `[0, 1]`
    pub litter: f64,
    /// Carve the room as a chasm shell
    pub chasm: bool,
    /// Number of chasm point cells to punch
    pub holes: u32,
    /// With `chasm`: keep a solid disc around the center instead of a shell
    pub circle: bool,
    /// Number of chasm lines to cut
    pub gashes: u32,
    pub decor: Vec<DecorSpec>,
    /// Fixed focal point; random interior cell when absent
    pub focal_point: Option<Point>,
}

impl Default for InteriorOptions {
    fn default() -> Self {
        Self {
            kind: RoomKind::A1,
            pillars: false,
            treasure: false,
            litter: 0.0,
            chasm: false,
            holes: 0,
            circle: false,
            gashes: 0,
            decor: Vec::new(),
            focal_point: None,
        }
    }
}

/// Output of one interior run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomInterior {
    pub width: i32,
    pub height: i32,
    pub center: Point,
    pub focal_point: Point,
    /// Cells still unclaimed after all passes, in registration order
    pub free_space: Vec<Point>,
    pub kind: RoomKind,
    pub chasm: bool,
    pub doors: Vec<DoorOpening>,
    pub layers: RoomLayers,
}

/// Interior generator for one room footprint.
///
/// The footprint is normalized to odd dimensions and clamped to
/// `[MIN_INTERIOR_SIZE, MAX_INTERIOR_SIZE]` at construction.
#[derive(Debug, Clone)]
pub struct InteriorGenerator {
    width: i32,
    height: i32,
    doors: Vec<DoorOpening>,
}

impl InteriorGenerator {
    pub fn new(width: i32, height: i32, doors: Vec<DoorOpening>) -> Self {
        let mut width = width;
        let mut height = height;
        if width % 2 == 0 {
            width -= 1;
        }
        if height % 2 == 0 {
            height -= 1;
        }
        Self {
            width: width.clamp(MIN_INTERIOR_SIZE, MAX_INTERIOR_SIZE),
            height: height.clamp(MIN_INTERIOR_SIZE, MAX_INTERIOR_SIZE),
            doors,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Run all decoration passes. Never fails; passes that run out of
    /// budget or space simply place less.
    pub fn generate(&self, options: &InteriorOptions, rng: &mut GameRng) -> RoomInterior {
        let center = Point::new(self.width / 2, self.height / 2);
        let focal_point = options.focal_point.unwrap_or_else(|| {
            Point::new(
                rng.range(2, self.width - 3),
                rng.range(2, self.height - 3),
            )
        });

        let mut build = Build {
            width: self.width,
            height: self.height,
            center,
            focal_point,
            chasm: options.chasm,
            circle: options.circle,
            layers: RoomLayers::new(self.width, self.height),
            free: FreeSpaceIndex::new(),
        };

        build.basic_layout(&self.doors);

        if options.treasure {
            build.add_treasure();
        }
        if options.gashes > 0 {
            build.add_gashes(options.gashes, rng);
        }
        if options.pillars {
            build.add_pillars(rng);
        }
        if options.holes > 0 {
            build.add_holes(options.holes, rng);
        }

        let mut snapshot = build.prepare_free_space(rng);
        if !options.decor.is_empty() {
            build.add_decor(&options.decor, &mut snapshot);
        }
        if options.litter > 0.0 {
            build.add_litter(options.litter, &mut snapshot);
        }

        RoomInterior {
            width: self.width,
            height: self.height,
            center,
            focal_point,
            free_space: build.free.iter().map(|c| c.point()).collect(),
            kind: options.kind,
            chasm: options.chasm,
            doors: self.doors.clone(),
            layers: build.layers,
        }
    }
}

/// Working state for one run
struct Build {
    width: i32,
    height: i32,
    center: Point,
    focal_point: Point,
    chasm: bool,
    circle: bool,
    layers: RoomLayers,
    free: FreeSpaceIndex,
}

impl Build {
    fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    fn on_border(&self, x: i32, y: i32) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    fn door_at(doors: &[DoorOpening], x: i32, y: i32) -> Option<Direction> {
        doors
            .iter()
            .find(|d| d.x == x && d.y == y)
            .map(|d| d.direction)
    }

    /// Floor classification, door openings, perimeter walls and the
    /// initial free-space registration.
    fn basic_layout(&mut self, doors: &[DoorOpening]) {
        let radius = (self.width.max(self.height) as f64 / 2.0).ceil() - 1.5;
        for y in 0..self.height {
            for x in 0..self.width {
                let door = Self::door_at(doors, x, y);
                let (xu, yu) = (x as usize, y as usize);
                self.layers.composite[yu][xu] = CellMeta::for_door(door);

                if self.chasm && self.circle {
                    if grid::distance(Point::new(x, y), self.center) <= radius {
                        self.layers.floor[yu][xu] = FloorKind::Solid;
                    } else {
                        self.layers.floor[yu][xu] = FloorKind::Chasm;
                        self.layers.composite[yu][xu].block = BlockKind::Fall;
                    }
                } else if self.chasm && self.on_border(x, y) {
                    self.layers.floor[yu][xu] = FloorKind::Chasm;
                    self.layers.composite[yu][xu].block = BlockKind::Fall;
                    self.layers.composite[yu][xu].flags |= CellFlags::BRIDGE;
                } else {
                    self.layers.floor[yu][xu] = FloorKind::Solid;
                }

                if door.is_some() {
                    self.layers.mid[yu][xu] = Some(MidFeature::Door);
                    self.layers.composite[yu][xu].block = BlockKind::Special;
                    if self.chasm {
                        self.layers.floor[yu][xu] = FloorKind::Bridge;
                    }
                }

                if self.layers.floor[yu][xu] == FloorKind::Solid {
                    self.free.add(Point::new(x, y));
                }

                if !self.chasm && door.is_none() && self.on_border(x, y) {
                    self.layers.composite[yu][xu].flags |= CellFlags::WALL;
                    self.layers.composite[yu][xu].block = BlockKind::Blocked;
                    self.layers.mid[yu][xu] = Some(MidFeature::Wall);
                    self.free.remove_at(Point::new(x, y));
                }
            }
        }
    }

    fn set_protect(&mut self, x: i32, y: i32) {
        self.free.remove_at(Point::new(x, y));
        self.layers.composite[y as usize][x as usize].flags |= CellFlags::PROTECTED;
    }

    fn is_protected(&self, x: i32, y: i32) -> bool {
        self.layers.composite[y as usize][x as usize].is_protected()
    }

    fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.layers.composite[y as usize][x as usize].is_blocked()
    }

    fn is_wall(&self, x: i32, y: i32) -> bool {
        self.layers.composite[y as usize][x as usize].is_wall()
    }

    fn cut_chasm(&mut self, x: i32, y: i32) {
        let (xu, yu) = (x as usize, y as usize);
        self.layers.floor[yu][xu] = FloorKind::Chasm;
        self.layers.composite[yu][xu].flags |= CellFlags::CHASM;
        self.layers.composite[yu][xu].block = BlockKind::Fall;
        self.free.remove_at(Point::new(x, y));
    }

    /// Reserve the 3x3 neighborhood around the focal point and mark its
    /// center as the treasure spot. The focal point is at least two cells
    /// from every edge, so the neighborhood is always in bounds.
    fn add_treasure(&mut self) {
        let c = self.focal_point;
        for y in (c.y - 1)..=(c.y + 1) {
            for x in (c.x - 1)..=(c.x + 1) {
                self.set_protect(x, y);
            }
        }
        let (xu, yu) = (c.x as usize, c.y as usize);
        self.layers.composite[yu][xu].flags |= CellFlags::TREASURE;
        self.layers.composite[yu][xu].block = BlockKind::Special;
        self.layers.mid[yu][xu] = Some(MidFeature::Treasure);
    }

    /// Cut up to `gashes` chasm lines out of the candidate rows/columns.
    /// The cell where a line would bisect through the room center is
    /// protected instead, keeping the room connected.
    fn add_gashes(&mut self, gashes: u32, rng: &mut GameRng) {
        let m = self.width.min(self.height);
        let mut potentials: Vec<i32> = (0..m * 2).collect();
        rng.shuffle(&mut potentials);
        for &anchor in potentials.iter().take(gashes as usize) {
            let column = anchor <= m - 1;
            let value = if column { anchor } else { anchor - m };
            for i in 0..m {
                let (x, y) = if column { (value, i) } else { (i, value) };
                if (column && y == self.center.y) || (!column && x == self.center.x) {
                    self.set_protect(x, y);
                    continue;
                }
                if !self.is_protected(x, y) && !self.is_wall(x, y) {
                    self.cut_chasm(x, y);
                }
            }
        }
    }

    /// Punch up to `holes` single chasm cells, best-effort
    fn add_holes(&mut self, holes: u32, rng: &mut GameRng) {
        let mut holes = holes;
        let mut budget = self.width.min(self.height) * 3;
        while holes > 0 && budget > 0 {
            let x = rng.range(0, self.width - 1);
            let y = rng.range(0, self.height - 1);
            if !self.is_protected(x, y) && !self.is_blocked(x, y) {
                holes -= 1;
                self.cut_chasm(x, y);
            }
            budget -= 1;
        }
    }

    /// Place one pillar marker, best-effort
    fn add_pillars(&mut self, rng: &mut GameRng) {
        let mut pillars = 1u32;
        let mut budget = self.width.min(self.height) * 3;
        while pillars > 0 && budget > 0 {
            let x = rng.range(0, self.width - 2);
            let y = rng.range(0, self.height - 2);
            if !self.is_protected(x, y) && !self.is_blocked(x, y) {
                pillars -= 1;
                let (xu, yu) = (x as usize, y as usize);
                self.layers.floor[yu][xu] = FloorKind::Solid;
                self.layers.composite[yu][xu].flags |= CellFlags::PILLAR;
                self.layers.mid[yu][xu] = Some(MidFeature::Pillar);
                self.free.remove_at(Point::new(x, y));
            }
            budget -= 1;
        }
    }

    /// Shuffle the remaining free cells and tag the ones bordering a chasm
    fn prepare_free_space(&mut self, rng: &mut GameRng) -> Vec<FreeCell> {
        let mut snapshot: Vec<FreeCell> = self.free.iter().copied().collect();
        rng.shuffle(&mut snapshot);
        for cell in &mut snapshot {
            cell.edge = Direction::iter().any(|dir| {
                let n = grid::ahead(cell.point(), dir, 1);
                self.in_bounds(n)
                    && self.layers.floor[n.y as usize][n.x as usize] == FloorKind::Chasm
            });
        }
        snapshot
    }

    /// Claim snapshot cells for each decor descriptor until its target
    /// count is met or the snapshot is exhausted
    fn add_decor(&mut self, decor: &[DecorSpec], snapshot: &mut [FreeCell]) {
        let total = snapshot.len();
        for descriptor in decor {
            let mut remaining = match descriptor.amount {
                DecorAmount::Count(count) => i64::from(count),
                DecorAmount::Rate(rate) => (rate * total as f64).ceil() as i64,
            };
            if remaining <= 0 {
                continue;
            }
            for cell in snapshot.iter_mut() {
                if cell.consumed {
                    continue;
                }
                let fits = match descriptor.location {
                    DecorLocation::Any => true,
                    DecorLocation::Central => !cell.edge,
                    DecorLocation::Edge => cell.edge,
                };
                if fits {
                    let (xu, yu) = (cell.x as usize, cell.y as usize);
                    self.layers.composite[yu][xu].decor = Some(descriptor.id.clone());
                    self.layers.composite[yu][xu].block = BlockKind::Decor;
                    self.layers.mid[yu][xu] = Some(MidFeature::Decor(descriptor.id.clone()));
                    self.free.remove_at(cell.point());
                    cell.consumed = true;
                    remaining -= 1;
                    if remaining <= 0 {
                        break;
                    }
                }
            }
        }
    }

    /// Cosmetic only: litter does not leave the live free-space index
    fn add_litter(&mut self, litter: f64, snapshot: &mut [FreeCell]) {
        let mut remaining = (litter * snapshot.len() as f64).ceil() as i64;
        if remaining <= 0 {
            return;
        }
        for cell in snapshot.iter_mut() {
            if cell.consumed {
                continue;
            }
            let (xu, yu) = (cell.x as usize, cell.y as usize);
            self.layers.floor[yu][xu] = FloorKind::Litter;
            self.layers.composite[yu][xu].flags |= CellFlags::LITTER;
            remaining -= 1;
            if remaining <= 0 {
                break;
            }
        }
    }
}
