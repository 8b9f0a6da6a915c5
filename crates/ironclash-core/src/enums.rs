//! Enumeration types used throughout the arena.

use serde::{Deserialize, Serialize};

/// Polygon/curve family used to trace a body silhouette.
///
/// Serialized by name; names the tracer does not know fall back to
/// [`OutlineKind::Circle`] so a half-edited design still draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutlineKind {
    #[default]
    Circle,
    Triangle,
    Square,
    Pentagon,
    Hexagon,
    Octagon,
    Diamond,
    /// Sawtooth outline (alternating inner/outer teeth).
    Spiked,
    Star,
    Cross,
    Heart,
}

impl OutlineKind {
    pub const ALL: [OutlineKind; 11] = [
        OutlineKind::Circle,
        OutlineKind::Triangle,
        OutlineKind::Square,
        OutlineKind::Pentagon,
        OutlineKind::Hexagon,
        OutlineKind::Octagon,
        OutlineKind::Diamond,
        OutlineKind::Spiked,
        OutlineKind::Star,
        OutlineKind::Cross,
        OutlineKind::Heart,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutlineKind::Circle => "circle",
            OutlineKind::Triangle => "triangle",
            OutlineKind::Square => "square",
            OutlineKind::Pentagon => "pentagon",
            OutlineKind::Hexagon => "hexagon",
            OutlineKind::Octagon => "octagon",
            OutlineKind::Diamond => "diamond",
            OutlineKind::Spiked => "spiked",
            OutlineKind::Star => "star",
            OutlineKind::Cross => "cross",
            OutlineKind::Heart => "heart",
        }
    }

    /// Unknown names resolve to `Circle`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        OutlineKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }

    /// Side count for regular polygons, `None` for other families.
    pub fn polygon_sides(self) -> Option<usize> {
        match self {
            OutlineKind::Triangle => Some(3),
            OutlineKind::Square => Some(4),
            OutlineKind::Pentagon => Some(5),
            OutlineKind::Hexagon => Some(6),
            OutlineKind::Octagon => Some(8),
            _ => None,
        }
    }

    /// Number of path vertices (move/line/curve endpoints) the traced path has.
    pub fn vertex_count(self) -> usize {
        match self {
            OutlineKind::Circle => 1,
            OutlineKind::Diamond => 4,
            OutlineKind::Spiked => 16,
            OutlineKind::Star => 10,
            OutlineKind::Cross => 12,
            OutlineKind::Heart => 3,
            polygon => polygon.polygon_sides().unwrap_or(1),
        }
    }
}

impl From<String> for OutlineKind {
    fn from(name: String) -> Self {
        OutlineKind::from_name(&name)
    }
}

impl From<OutlineKind> for String {
    fn from(kind: OutlineKind) -> Self {
        kind.name().to_string()
    }
}

/// How a barrel resolves a shot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BarrelBehavior {
    /// Spawns a traveling projectile.
    #[default]
    Projectile,
    /// Resolves instantly along a ray and leaves a beam.
    Hitscan,
}

/// Barrel silhouette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarrelShape {
    #[default]
    Straight,
    /// Wider at the muzzle (machine guns, spawners).
    Flared,
    /// Narrower at the muzzle (snipers, rails).
    Tapered,
}

/// Barrel surface finish, mapped to a shading palette by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarrelMaterial {
    #[default]
    Steel,
    Carbon,
    Gold,
    Crystal,
    Plasma,
}

/// Ammunition look. Unknown names fall back to the clean default disc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AmmoVisual {
    #[default]
    Standard,
    Missile,
    Plasma,
    ArmorPiercing,
    HighExplosive,
    Cryo,
    Incendiary,
    NanoSplitter,
}

impl AmmoVisual {
    pub const ALL: [AmmoVisual; 8] = [
        AmmoVisual::Standard,
        AmmoVisual::Missile,
        AmmoVisual::Plasma,
        AmmoVisual::ArmorPiercing,
        AmmoVisual::HighExplosive,
        AmmoVisual::Cryo,
        AmmoVisual::Incendiary,
        AmmoVisual::NanoSplitter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AmmoVisual::Standard => "standard",
            AmmoVisual::Missile => "missile",
            AmmoVisual::Plasma => "plasma",
            AmmoVisual::ArmorPiercing => "armor_piercing",
            AmmoVisual::HighExplosive => "high_explosive",
            AmmoVisual::Cryo => "cryo",
            AmmoVisual::Incendiary => "incendiary",
            AmmoVisual::NanoSplitter => "nano_splitter",
        }
    }
}

impl From<String> for AmmoVisual {
    fn from(name: String) -> Self {
        AmmoVisual::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }
}

impl From<AmmoVisual> for String {
    fn from(kind: AmmoVisual) -> Self {
        kind.name().to_string()
    }
}

/// Damage family of the ammunition; decides which status a hit applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmmoType {
    #[default]
    Kinetic,
    Explosive,
    /// Applies burn on hit.
    Thermal,
    /// Applies slow on hit.
    Cryogenic,
    Energy,
}

/// Timed modifier kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Magnitude: damage per second.
    Burn,
    /// Magnitude: speed multiplier (< 1).
    Slow,
    /// Magnitude: damage-reduction fraction.
    Fortify,
    /// Magnitude: rate-of-fire multiplier (> 1).
    Overclock,
    /// Magnitude: speed multiplier (> 1).
    Haste,
}

impl StatusKind {
    /// Whether magnitude `a` is a stronger effect than `b` for this kind.
    pub fn is_stronger(self, a: f64, b: f64) -> bool {
        match self {
            StatusKind::Slow => a < b,
            _ => a > b,
        }
    }
}

/// Particle families. All are point sprites except `Beam`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    Smoke,
    Spark,
    Debris,
    SnowHex,
    GhostTrail,
    Shockwave,
    TeleportFlash,
    /// Two-endpoint primitive from the particle position to its target.
    Beam,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 8] = [
        ParticleKind::Smoke,
        ParticleKind::Spark,
        ParticleKind::Debris,
        ParticleKind::SnowHex,
        ParticleKind::GhostTrail,
        ParticleKind::Shockwave,
        ParticleKind::TeleportFlash,
        ParticleKind::Beam,
    ];
}

/// Hand-designed boss silhouettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossArchetype {
    /// Square drone factory.
    Summoner,
    /// Triangle with a single eye.
    Guardian,
    /// Circle with five asymmetric thrusters.
    FallenBooster,
    /// Pentagon with five asymmetric weapon mounts.
    Sentinel,
}

impl BossArchetype {
    pub const ALL: [BossArchetype; 4] = [
        BossArchetype::Summoner,
        BossArchetype::Guardian,
        BossArchetype::FallenBooster,
        BossArchetype::Sentinel,
    ];

    pub fn class_id(self) -> &'static str {
        match self {
            BossArchetype::Summoner => "boss_summoner",
            BossArchetype::Guardian => "boss_guardian",
            BossArchetype::FallenBooster => "boss_fallen_booster",
            BossArchetype::Sentinel => "boss_sentinel",
        }
    }
}

/// Collectible resource shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceShape {
    #[default]
    Square,
    Triangle,
    Pentagon,
    Hexagon,
}

impl ResourceShape {
    pub fn outline(self) -> OutlineKind {
        match self {
            ResourceShape::Square => OutlineKind::Square,
            ResourceShape::Triangle => OutlineKind::Triangle,
            ResourceShape::Pentagon => OutlineKind::Pentagon,
            ResourceShape::Hexagon => OutlineKind::Hexagon,
        }
    }
}

/// Upgradable stats, used for stat caps and hidden-stat lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    HealthRegen,
    MaxHealth,
    BodyDamage,
    BulletSpeed,
    BulletPenetration,
    BulletDamage,
    Reload,
    MovementSpeed,
    FieldOfView,
}

/// Render quality tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    #[default]
    High,
}
