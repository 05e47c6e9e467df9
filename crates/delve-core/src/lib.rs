//! delve-core: procedural dungeon map generation
//!
//! This crate contains the full generation pipeline with no I/O dependencies.
//! It is designed to be pure and testable: a [`GameRng`] seed deterministically
//! reproduces an identical dungeon.
//!
//! The entry point is [`dungeon::generate`], which places non-overlapping
//! rooms across a bounded grid, connects them with doors, traces walls, and
//! designates entrance/exit/special rooms. Per-room interior decoration is
//! handled by [`dungeon::InteriorGenerator`].

pub mod dungeon;
pub mod grid;

mod consts;
mod rng;

pub use consts::*;
pub use rng::GameRng;
