//! Dungeon generation
//!
//! Contains the world grid, room/door records, the dungeon growth driver,
//! and per-room interior decoration.

mod door;
mod freespace;
mod generator;
mod interior;
mod layers;
mod room;
mod tile;
mod world;

pub use door::{Door, DoorOrientation};
pub use freespace::{FreeCell, FreeSpaceIndex};
pub use generator::{
    generate, Dungeon, DungeonConfig, GenerationError, Marker, RoomConfig, SpecialRoom,
};
pub use interior::{
    DecorAmount, DecorLocation, DecorSpec, DoorOpening, InteriorGenerator, InteriorOptions,
    RoomInterior, RoomKind,
};
pub use layers::{BlockKind, CellFlags, CellMeta, FloorKind, MidFeature, RoomLayers};
pub use room::Room;
pub use tile::{LightLevel, Tile};
pub use world::World;
