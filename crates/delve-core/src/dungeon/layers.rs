//! Layered grids produced by interior decoration.
//!
//! All grids are sized to a room's footprint and are discarded after the
//! merge into the world grid.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::grid::Direction;

/// Floor classification for one interior cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FloorKind {
    #[default]
    Solid,
    Chasm,
    /// Crossing over a chasm, kept under door openings
    Bridge,
    /// Cosmetic debris on otherwise solid floor
    Litter,
}

/// Placed feature overlaid on the floor layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MidFeature {
    Wall,
    Door,
    Pillar,
    Treasure,
    /// Decor identifier from the requesting descriptor
    Decor(String),
}

/// Why a cell refuses feature placement
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Free,
    Blocked,
    Decor,
    Special,
    /// Walking in drops into a chasm
    Fall,
}

impl BlockKind {
    /// Anything but `Free` blocks placement
    pub const fn blocks(self) -> bool {
        !matches!(self, BlockKind::Free)
    }
}

bitflags! {
    /// Per-cell metadata flags of the composite layer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellFlags: u8 {
        const WALL = 0x01;
        const PROTECTED = 0x02;
        const BRIDGE = 0x04;
        const CHASM = 0x08;
        const TREASURE = 0x10;
        const PILLAR = 0x20;
        const LITTER = 0x40;
    }
}

// Manual serde impl for CellFlags
impl Serialize for CellFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CellFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(CellFlags::from_bits_truncate(bits))
    }
}

/// Composite metadata for one interior cell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellMeta {
    /// Door opening through this cell, if any
    pub door: Option<Direction>,
    pub block: BlockKind,
    pub flags: CellFlags,
    /// Decor id claimed for this cell
    pub decor: Option<String>,
}

impl CellMeta {
    /// Template for a fresh cell: doors start out protected
    pub fn for_door(door: Option<Direction>) -> Self {
        let mut flags = CellFlags::empty();
        if door.is_some() {
            flags |= CellFlags::PROTECTED;
        }
        Self {
            door,
            block: BlockKind::Free,
            flags,
            decor: None,
        }
    }

    pub fn is_protected(&self) -> bool {
        self.flags.contains(CellFlags::PROTECTED)
    }

    pub fn is_wall(&self) -> bool {
        self.flags.contains(CellFlags::WALL)
    }

    pub fn is_blocked(&self) -> bool {
        self.block.blocks()
    }
}

/// The grids produced for one room's footprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomLayers {
    pub composite: Vec<Vec<CellMeta>>,
    pub floor: Vec<Vec<FloorKind>>,
    pub mid: Vec<Vec<Option<MidFeature>>>,
    /// Reserved; nothing writes here yet
    pub ceiling: Vec<Vec<Option<MidFeature>>>,
}

impl RoomLayers {
    /// Empty layers sized to a footprint
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0) as usize;
        let h = height.max(0) as usize;
        Self {
            composite: vec![vec![CellMeta::default(); w]; h],
            floor: vec![vec![FloorKind::Solid; w]; h],
            mid: vec![vec![None; w]; h],
            ceiling: vec![vec![None; w]; h],
        }
    }
}
