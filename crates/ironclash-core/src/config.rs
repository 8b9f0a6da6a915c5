//! Declarative tank configurations.
//!
//! Configurations are pure data with no behavior so the external design tool
//! can author, export and import them as text. Every field has a default, so
//! partially-written documents still load; `sanitized` turns anything a
//! player could type into geometry the renderer and simulator can use.

use std::collections::BTreeMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::*;
use crate::types::Color;

/// Errors from configuration import.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration text: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown class `{0}`")]
    UnknownClass(String),
}

/// Barrel role beyond a plain gun. At most one per barrel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Specialization {
    /// Launches autonomous drones instead of bullets.
    DroneSpawner { max_drones: u32 },
    /// Lays slow, long-lived traps.
    TrapLayer,
    /// Aims itself at the nearest hostile.
    AutoTurret,
}

/// One weapon mount.
///
/// Geometry is expressed in multiples of the owner's body radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Barrel {
    /// Mount point relative to the body center (x forward, y right).
    pub offset: DVec2,
    /// Mount angle relative to the owner's rotation (radians).
    pub angle: f64,
    pub length: f64,
    pub width: f64,
    pub material: BarrelMaterial,
    pub shape: BarrelShape,
    pub behavior: BarrelBehavior,
    pub ammo_visual: AmmoVisual,
    pub ammo_type: AmmoType,
    /// Phase delay in seconds; staggers multi-barrel weapons.
    pub delay: f64,
    /// Seconds of held fire before a shot releases. 0 = no charge.
    pub charge_time: f64,
    pub recoil: f64,
    /// Jitter scale in [0, 1].
    pub spread: f64,
    /// Per-barrel damage multiplier.
    pub damage: f64,
    pub specialization: Option<Specialization>,
}

impl Default for Barrel {
    fn default() -> Self {
        Self {
            offset: DVec2::ZERO,
            angle: 0.0,
            length: 1.9,
            width: 0.84,
            material: BarrelMaterial::default(),
            shape: BarrelShape::default(),
            behavior: BarrelBehavior::default(),
            ammo_visual: AmmoVisual::default(),
            ammo_type: AmmoType::default(),
            delay: 0.0,
            charge_time: 0.0,
            recoil: 1.0,
            spread: 0.1,
            damage: 1.0,
            specialization: None,
        }
    }
}

impl Barrel {
    pub fn is_charged(&self) -> bool {
        self.charge_time > 0.0
    }

    /// Clamp every field into its valid range; non-finite values take defaults.
    pub fn sanitized(&self) -> Barrel {
        let fallback = Barrel::default();
        let offset = if self.offset.is_finite() {
            self.offset
        } else {
            DVec2::ZERO
        };
        let specialization = match self.specialization {
            Some(Specialization::DroneSpawner { max_drones }) => Some(Specialization::DroneSpawner {
                max_drones: max_drones.max(1),
            }),
            other => other,
        };
        Barrel {
            offset,
            angle: finite_or(self.angle, 0.0),
            length: finite_or(self.length, fallback.length).max(0.0),
            width: finite_or(self.width, fallback.width).max(0.0),
            delay: finite_or(self.delay, 0.0).max(0.0),
            charge_time: finite_or(self.charge_time, 0.0).max(0.0),
            recoil: finite_or(self.recoil, 0.0).max(0.0),
            spread: finite_or(self.spread, 0.0).clamp(0.0, 1.0),
            damage: finite_or(self.damage, 1.0).max(0.0),
            specialization,
            ..self.clone()
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Multipliers on the base stats of a class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatMultipliers {
    pub max_health: f64,
    pub regen: f64,
    pub body_damage: f64,
    pub bullet_speed: f64,
    pub penetration: f64,
    pub damage: f64,
    /// Rate of fire.
    pub reload: f64,
    pub move_speed: f64,
    pub fov: f64,
}

impl Default for StatMultipliers {
    fn default() -> Self {
        Self {
            max_health: 1.0,
            regen: 1.0,
            body_damage: 1.0,
            bullet_speed: 1.0,
            penetration: 1.0,
            damage: 1.0,
            reload: 1.0,
            move_speed: 1.0,
            fov: 1.0,
        }
    }
}

/// Always-on class perks consulted by stat queries and combat hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PassiveSkill {
    /// Heals the attacker by a fraction of damage dealt.
    Lifesteal { fraction: f64 },
    /// Reflects a fraction of damage taken to the attacker.
    Thorns { fraction: f64 },
    Regenerator { multiplier: f64 },
    Swift { multiplier: f64 },
    EagleEye { multiplier: f64 },
}

/// Triggered ability: applies a status effect to its user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveSkill {
    pub effect: StatusKind,
    pub magnitude: f64,
    pub duration_secs: f64,
    pub cooldown_secs: f64,
}

/// Optional look overrides. Colors are CSS-style hex strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualOverrides {
    pub body_color: Option<String>,
    pub barrel_color: Option<String>,
    pub treads: bool,
    /// Fades out while idle.
    pub stealth: bool,
}

impl VisualOverrides {
    /// Parsed body color; malformed strings are treated as absent.
    pub fn body_color(&self) -> Option<Color> {
        self.body_color.as_deref().and_then(Color::parse)
    }

    pub fn barrel_color(&self) -> Option<Color> {
        self.barrel_color.as_deref().and_then(Color::parse)
    }
}

/// Immutable description of a tank class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankConfiguration {
    pub name: String,
    pub barrels: Vec<Barrel>,
    pub outline: OutlineKind,
    pub stats: StatMultipliers,
    pub active_skill: Option<ActiveSkill>,
    pub passive_skill: Option<PassiveSkill>,
    pub visual: VisualOverrides,
    pub stat_cap: Option<u32>,
    pub hidden_stats: Vec<StatKind>,
}

impl TankConfiguration {
    pub fn barrel_count(&self) -> usize {
        self.barrels.len()
    }

    pub fn is_stat_hidden(&self, stat: StatKind) -> bool {
        self.hidden_stats.contains(&stat)
    }

    /// Export for the design tool.
    pub fn to_text(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Import from the design tool. Missing fields take defaults.
    pub fn from_text(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Copy with every numeric field forced into its valid range.
    pub fn sanitized(&self) -> TankConfiguration {
        let stat = |v: f64| finite_or(v, 1.0).max(0.0);
        TankConfiguration {
            barrels: self.barrels.iter().map(Barrel::sanitized).collect(),
            stats: StatMultipliers {
                max_health: stat(self.stats.max_health),
                regen: stat(self.stats.regen),
                body_damage: stat(self.stats.body_damage),
                bullet_speed: stat(self.stats.bullet_speed),
                penetration: stat(self.stats.penetration),
                damage: stat(self.stats.damage),
                reload: stat(self.stats.reload),
                move_speed: stat(self.stats.move_speed),
                fov: finite_or(self.stats.fov, 1.0).max(0.1),
            },
            ..self.clone()
        }
    }
}

/// Class identifier → configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigRegistry {
    classes: BTreeMap<String, TankConfiguration>,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class_id: impl Into<String>, config: TankConfiguration) {
        self.classes.insert(class_id.into(), config);
    }

    pub fn get(&self, class_id: &str) -> Option<&TankConfiguration> {
        self.classes.get(class_id)
    }

    /// Like `get`, but reports the missing class as an error.
    pub fn require(&self, class_id: &str) -> Result<&TankConfiguration, ConfigError> {
        self.get(class_id)
            .ok_or_else(|| ConfigError::UnknownClass(class_id.to_string()))
    }

    pub fn contains(&self, class_id: &str) -> bool {
        self.classes.contains_key(class_id)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TankConfiguration)> {
        self.classes.iter().map(|(id, config)| (id.as_str(), config))
    }

    /// Merge another registry in; classes in `other` win.
    pub fn extend(&mut self, other: ConfigRegistry) {
        self.classes.extend(other.classes);
    }

    /// Copy with every configuration passed through [`TankConfiguration::sanitized`].
    pub fn sanitized(&self) -> ConfigRegistry {
        ConfigRegistry {
            classes: self
                .classes
                .iter()
                .map(|(id, config)| (id.clone(), config.sanitized()))
                .collect(),
        }
    }

    pub fn to_text(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_text(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
