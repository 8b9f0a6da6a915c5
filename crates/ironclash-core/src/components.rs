//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in the simulation systems;
//! the few methods here only keep per-barrel arrays and status lists
//! internally consistent.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::{Barrel, TankConfiguration};
use crate::enums::*;
use crate::types::EntityId;

/// Hit points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

impl Health {
    pub fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    /// Current / max in [0, 1]. A zero max reads as full.
    pub fn fraction(&self) -> f64 {
        if self.max <= 0.0 {
            1.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    pub fn is_damaged(&self) -> bool {
        self.current < self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Registry key of the entity's tank configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassId(pub String);

/// Per-barrel timing state.
///
/// All three arrays always have the barrel count of the owning entity's
/// current configuration. Use [`BarrelState::reconfigure`] on class change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarrelState {
    /// Seconds until the barrel may fire again.
    pub cooldown: Vec<f64>,
    /// Accumulated charge in seconds, within [0, charge_time].
    pub charge: Vec<f64>,
    /// Visual pull-back, decays toward 0 after each shot.
    pub recoil: Vec<f64>,
}

impl BarrelState {
    /// Fresh state: every barrel waits out its phase delay before the first shot.
    pub fn for_configuration(config: &TankConfiguration) -> Self {
        Self {
            cooldown: config.barrels.iter().map(|b| b.delay.max(0.0)).collect(),
            charge: vec![0.0; config.barrels.len()],
            recoil: vec![0.0; config.barrels.len()],
        }
    }

    /// Resize to a new configuration. Surviving barrels keep their timers,
    /// new ones start at their phase delay.
    pub fn reconfigure(&mut self, config: &TankConfiguration) {
        let count = config.barrels.len();
        let kept = self.cooldown.len();
        self.cooldown.truncate(count);
        self.cooldown
            .extend(config.barrels.iter().skip(kept).map(|b| b.delay.max(0.0)));
        self.charge.resize(count, 0.0);
        self.recoil.resize(count, 0.0);
        for (charge, barrel) in self.charge.iter_mut().zip(&config.barrels) {
            *charge = charge.clamp(0.0, barrel.charge_time.max(0.0));
        }
    }

    pub fn len(&self) -> usize {
        self.cooldown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cooldown.is_empty()
    }

    /// Whether every array matches `barrel_count`.
    pub fn is_consistent(&self, barrel_count: usize) -> bool {
        self.cooldown.len() == barrel_count
            && self.charge.len() == barrel_count
            && self.recoil.len() == barrel_count
    }

    /// Charge glow intensity in [0, 1]; 0 for barrels without charge.
    pub fn glow(&self, index: usize, barrel: &Barrel) -> f64 {
        if barrel.charge_time <= 0.0 {
            return 0.0;
        }
        let charge = self.charge.get(index).copied().unwrap_or(0.0);
        (charge / barrel.charge_time).clamp(0.0, 1.0)
    }

    /// Visual recoil of a barrel; out-of-range reads as 0.
    pub fn recoil_at(&self, index: usize) -> f64 {
        self.recoil.get(index).copied().unwrap_or(0.0)
    }
}

/// A timed modifier on an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub remaining_secs: f64,
    pub source: Option<EntityId>,
    /// Meaning depends on `kind`; see [`StatusKind`].
    pub magnitude: f64,
}

/// Ordered list of active effects, at most one per kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusEffects {
    pub active: Vec<StatusEffect>,
}

impl StatusEffects {
    /// A new application replaces any active effect of the same kind.
    pub fn apply(&mut self, effect: StatusEffect) {
        match self.active.iter_mut().find(|e| e.kind == effect.kind) {
            Some(existing) => *existing = effect,
            None => self.active.push(effect),
        }
    }

    /// Explicit re-application: extends the remaining duration and keeps
    /// the stronger magnitude.
    pub fn reapply(&mut self, effect: StatusEffect) {
        match self.active.iter_mut().find(|e| e.kind == effect.kind) {
            Some(existing) => {
                existing.remaining_secs += effect.remaining_secs.max(0.0);
                if effect.kind.is_stronger(effect.magnitude, existing.magnitude) {
                    existing.magnitude = effect.magnitude;
                    existing.source = effect.source;
                }
            }
            None => self.active.push(effect),
        }
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.active.iter().find(|e| e.kind == kind)
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn magnitude(&self, kind: StatusKind) -> Option<f64> {
        self.get(kind).map(|e| e.magnitude)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Transient visual timers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualFlags {
    /// Remaining damage-flash time.
    pub flash_secs: f64,
    /// Seconds spent idle, drives the stealth fade.
    pub invisibility_secs: f64,
    /// Overall draw opacity in [0, 1].
    pub opacity: f64,
}

impl Default for VisualFlags {
    fn default() -> Self {
        Self {
            flash_secs: 0.0,
            invisibility_secs: 0.0,
            opacity: 1.0,
        }
    }
}

/// What an entity is, with the role data its renderer needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum EntityRole {
    #[default]
    Tank,
    Boss {
        archetype: BossArchetype,
    },
    Bullet {
        ammo: AmmoVisual,
        crit: bool,
    },
    Trap,
    Drone {
        ammo: AmmoVisual,
    },
    /// Beams carry a target endpoint distinct from their position.
    Particle {
        kind: ParticleKind,
        target: Option<DVec2>,
    },
    FloatingText {
        text: String,
        crit: bool,
    },
    Zone {
        size: DVec2,
        color: String,
    },
    Resource {
        shape: ResourceShape,
        color: String,
    },
}

impl EntityRole {
    /// Tanks and bosses.
    pub fn is_combatant(&self) -> bool {
        matches!(self, EntityRole::Tank | EntityRole::Boss { .. })
    }

    /// Bullets, traps, drones, particles and floating text.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EntityRole::Bullet { .. }
                | EntityRole::Trap
                | EntityRole::Drone { .. }
                | EntityRole::Particle { .. }
                | EntityRole::FloatingText { .. }
        )
    }
}

/// Allegiance. Entities on the same team never damage each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team(pub u32);

/// Display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

/// Marks the locally controlled tank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Score(pub f64);

/// Distance traveled, scrolls the tread marks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tread {
    pub distance: f64,
}

/// Countdown to removal for short-lived entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifespan {
    pub remaining_secs: f64,
    pub total_secs: f64,
}

impl Lifespan {
    pub fn new(total_secs: f64) -> Self {
        Self {
            remaining_secs: total_secs,
            total_secs,
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        (self.total_secs - self.remaining_secs).max(0.0)
    }

    /// Elapsed / total in [0, 1].
    pub fn progress(&self) -> f64 {
        if self.total_secs <= 0.0 {
            1.0
        } else {
            (self.elapsed_secs() / self.total_secs).clamp(0.0, 1.0)
        }
    }
}

/// Damage payload of bullets, traps and drones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: EntityId,
    pub damage: f64,
    /// Remaining hits before the projectile is spent.
    pub penetration: f64,
    pub ammo_type: AmmoType,
    pub crit: bool,
    /// Exponential velocity drag (per second); 0 for plain bullets.
    pub drag: f64,
}

/// Links a drone to its spawner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroneLink {
    pub owner: EntityId,
    /// Spawning barrel.
    pub barrel: usize,
    /// Position in the owner's swarm, phase-shifts the idle orbit.
    pub index: u32,
    pub aggression_radius: f64,
}

/// Drone controller intent set by the owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlIntent {
    #[default]
    Idle,
    Attract {
        point: DVec2,
    },
    Repel {
        point: DVec2,
    },
}

/// Trigger and drone-control input of a combatant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FireControl {
    pub held: bool,
    pub intent: ControlIntent,
}

/// Desired movement direction; normalized by the movement system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveInput {
    pub direction: DVec2,
}

/// Seconds since the entity last took damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegenTimer {
    pub since_damage_secs: f64,
}

/// Body-contact damage not yet shown as floating text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactTally {
    pub pending: f64,
    pub since_text_secs: f64,
}

/// Active-skill cooldown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillState {
    pub cooldown_secs: f64,
}
