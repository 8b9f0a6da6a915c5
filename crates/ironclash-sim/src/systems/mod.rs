//! ECS systems that operate on the arena world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only work). They do not own state; all state lives in components.

pub mod cleanup;
pub mod combat;
pub mod movement;
pub mod regen;
pub mod snapshot;
pub mod status;
pub mod targeting;
pub mod visuals;
pub mod weapons;
