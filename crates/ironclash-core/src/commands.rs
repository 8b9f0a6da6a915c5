//! Player commands sent from the frame loop to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. They all
//! act on the player entity.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::components::ControlIntent;
use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Weapons ---
    /// Hold or release the trigger for every barrel.
    SetFiring { held: bool },
    /// Face the given rotation (radians).
    Aim { rotation: f64 },
    /// Steer owned drones.
    SetDroneIntent { intent: ControlIntent },

    // --- Movement ---
    /// Thrust direction; zero stops thrusting.
    Move { direction: DVec2 },

    // --- Class ---
    /// Evolve into another class from the registry.
    ChangeClass { class_id: String },
    /// Trigger the class's active skill if it is off cooldown.
    ActivateSkill,

    // --- Debug ---
    /// Apply a status effect directly. `extend` re-applies instead of replacing.
    ApplyStatus {
        kind: StatusKind,
        magnitude: f64,
        duration_secs: f64,
        #[serde(default)]
        extend: bool,
    },
}
