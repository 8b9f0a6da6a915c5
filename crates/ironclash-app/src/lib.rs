//! IRONCLASH application shell.
//!
//! Wires the simulation and the renderer together: a frame loop thread fed
//! through a command channel, and a preview studio for the design tool.

pub mod frame_loop;
pub mod preview;
pub mod state;

pub use ironclash_core as core;
