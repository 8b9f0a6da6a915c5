//! Simulation engine for the IRONCLASH arena.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces FrameSnapshots for the renderer.

pub mod engine;
pub mod stats;
pub mod systems;
pub mod world_setup;

pub use engine::{ArenaEngine, SimConfig};
pub use ironclash_core as core;

#[cfg(test)]
mod tests;
