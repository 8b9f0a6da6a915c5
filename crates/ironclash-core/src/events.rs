//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::EntityId;

/// One thing that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A barrel released a shot (or a drone).
    ShotFired {
        shooter: EntityId,
        barrel: usize,
        hitscan: bool,
    },
    /// Damage landed.
    Hit {
        target: EntityId,
        source: Option<EntityId>,
        damage: f64,
        crit: bool,
    },
    StatusApplied {
        target: EntityId,
        kind: StatusKind,
    },
    StatusExpired {
        target: EntityId,
        kind: StatusKind,
    },
    ClassChanged {
        entity: EntityId,
        class_id: String,
    },
    Destroyed {
        entity: EntityId,
        killer: Option<EntityId>,
    },
}
