//! Generation constants and default values.

/// Empty cells kept between any room and the map border, and between a
/// committed room and the room it slid into (the shared wall line).
pub const DISTANCE_BETWEEN_ROOMS: i32 = 2;

/// Default map dimensions
pub const DEFAULT_WIDTH: i32 = 10;
pub const DEFAULT_HEIGHT: i32 = 15;

/// Default room dimension bounds (sampled as odd values)
pub const MIN_ROOM_WIDTH: i32 = 3;
pub const MAX_ROOM_WIDTH: i32 = 11;
pub const MIN_ROOM_HEIGHT: i32 = 3;
pub const MAX_ROOM_HEIGHT: i32 = 9;

/// Default target room count for the growth loop
pub const IDEAL_ROOM_COUNT: u32 = 25;

/// Default budget of consecutive failed placement attempts
pub const RETRY_COUNT: u32 = 100;

/// Interior footprints are clamped to this range (odd values)
pub const MIN_INTERIOR_SIZE: i32 = 5;
pub const MAX_INTERIOR_SIZE: i32 = 17;
