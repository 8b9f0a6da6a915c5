//! Frame snapshot: the visible arena state handed to the renderer each frame.
//!
//! Views are owned copies. The renderer reads them for one frame and never
//! keeps them, so it cannot hold on to arena-owned entities.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::events::SimEvent;
use crate::types::{EntityId, SimTime, Transform};

/// Everything the renderers need to draw one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityView {
    pub id: EntityId,
    pub role: EntityRole,
    pub transform: Transform,
    pub health: f64,
    pub max_health: f64,
    /// Registry key of the configuration; `None` for non-tank roles.
    pub class_id: Option<String>,
    pub barrels: BarrelState,
    pub status: StatusEffects,
    pub visual: VisualFlags,
    pub team: u32,
    pub name: Option<String>,
    pub is_player: bool,
    pub tread_distance: f64,
    pub lifespan: Option<Lifespan>,
    pub score: f64,
    /// Color override as a hex string; unparseable values fall back to the team color.
    pub color: Option<String>,
}

impl Default for EntityView {
    fn default() -> Self {
        Self {
            id: EntityId(0),
            role: EntityRole::default(),
            transform: Transform::default(),
            health: 1.0,
            max_health: 1.0,
            class_id: None,
            barrels: BarrelState::default(),
            status: StatusEffects::default(),
            visual: VisualFlags::default(),
            team: 0,
            name: None,
            is_player: false,
            tread_distance: 0.0,
            lifespan: None,
            score: 0.0,
            color: None,
        }
    }
}

impl EntityView {
    pub fn health_fraction(&self) -> f64 {
        Health {
            current: self.health,
            max: self.max_health,
        }
        .fraction()
    }

    pub fn is_damaged(&self) -> bool {
        self.health < self.max_health
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.role, EntityRole::Boss { .. })
    }

    /// Build a view for an entity first seen through a patch. Absent fields
    /// take the [`EntityView::default`] values.
    pub fn from_patch(id: EntityId, patch: &EntityPatch) -> Self {
        let mut view = EntityView {
            id,
            ..Default::default()
        };
        view.apply_patch(patch);
        view
    }

    /// Merge a partial update. Absent fields keep their last known value.
    pub fn apply_patch(&mut self, patch: &EntityPatch) {
        if let Some(role) = &patch.role {
            self.role = role.clone();
        }
        if let Some(position) = patch.position {
            self.transform.position = position;
        }
        if let Some(velocity) = patch.velocity {
            self.transform.velocity = velocity;
        }
        if let Some(rotation) = patch.rotation {
            self.transform.rotation = rotation;
        }
        if let Some(radius) = patch.radius {
            self.transform.radius = radius;
        }
        if let Some(health) = patch.health {
            self.health = health;
        }
        if let Some(max_health) = patch.max_health {
            self.max_health = max_health;
        }
        if let Some(class_id) = &patch.class_id {
            self.class_id = Some(class_id.clone());
        }
        if let Some(barrels) = &patch.barrels {
            self.barrels = barrels.clone();
        }
        if let Some(status) = &patch.status {
            self.status = status.clone();
        }
        if let Some(visual) = patch.visual {
            self.visual = visual;
        }
        if let Some(team) = patch.team {
            self.team = team;
        }
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }
        if let Some(tread_distance) = patch.tread_distance {
            self.tread_distance = tread_distance;
        }
        if let Some(lifespan) = patch.lifespan {
            self.lifespan = Some(lifespan);
        }
        if let Some(score) = patch.score {
            self.score = score;
        }
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
        }
    }
}

/// Partial entity update from a network snapshot translator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityPatch {
    pub role: Option<EntityRole>,
    pub position: Option<DVec2>,
    pub velocity: Option<DVec2>,
    pub rotation: Option<f64>,
    pub radius: Option<f64>,
    pub health: Option<f64>,
    pub max_health: Option<f64>,
    pub class_id: Option<String>,
    pub barrels: Option<BarrelState>,
    pub status: Option<StatusEffects>,
    pub visual: Option<VisualFlags>,
    pub team: Option<u32>,
    pub name: Option<String>,
    pub tread_distance: Option<f64>,
    pub lifespan: Option<Lifespan>,
    pub score: Option<f64>,
    pub color: Option<String>,
}

/// HUD-facing state of the local player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    pub score: f64,
    pub alive: bool,
    pub health_fraction: f64,
    /// Field-of-view multiplier from stats, skills and effects.
    pub fov: f64,
    /// Position of the top scorer other than the player, if any.
    pub leader_position: Option<DVec2>,
    /// Active-skill cooldown progress in [0, 1]; 1 = ready.
    pub skill_ready: f64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            score: 0.0,
            alive: false,
            health_fraction: 1.0,
            fov: 1.0,
            leader_position: None,
            skill_ready: 1.0,
        }
    }
}

/// Complete visible state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub entities: Vec<EntityView>,
    pub player: Option<EntityId>,
    pub player_state: PlayerState,
    pub events: Vec<SimEvent>,
}

impl FrameSnapshot {
    pub fn player(&self) -> Option<&EntityView> {
        let id = self.player?;
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityView> {
        self.entities.iter().find(|e| e.id == id)
    }
}
