//! Entity spawn factories for setting up the arena world.
//!
//! Creates tanks, bosses, projectiles, particles and scenery with the
//! component bundles the systems expect.

use glam::DVec2;
use hecs::{Entity, EntityBuilder, World};
use log::{debug, warn};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ironclash_core::components::*;
use ironclash_core::config::{ConfigError, ConfigRegistry, TankConfiguration};
use ironclash_core::constants::*;
use ironclash_core::enums::*;
use ironclash_core::types::{EntityId, Transform};

use crate::stats;

/// Snapshot id of a world entity.
pub fn id_of(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// World entity behind a snapshot id. `None` for ids that never were entities.
pub fn entity_of(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}

/// Spawn a tank of the given class. Unknown classes are rejected.
pub fn spawn_tank(
    world: &mut World,
    registry: &ConfigRegistry,
    class_id: &str,
    position: DVec2,
    team: u32,
    name: &str,
) -> Result<Entity, ConfigError> {
    let config = registry.require(class_id).inspect_err(|_| {
        warn!("cannot spawn tank `{name}`: unknown class `{class_id}`");
    })?;
    let mut builder = combatant(config, class_id, position, DEFAULT_TANK_RADIUS, team);
    builder.add(EntityRole::Tank).add(Name(name.to_string()));
    let entity = world.spawn(builder.build());
    debug!("spawned tank `{name}` as {class_id} at ({:.0}, {:.0})", position.x, position.y);
    Ok(entity)
}

/// Spawn a boss. Boss classes are always present in the built-in registry;
/// a registry without them falls back to the archetype's preset layout.
pub fn spawn_boss(
    world: &mut World,
    registry: &ConfigRegistry,
    archetype: BossArchetype,
    position: DVec2,
    team: u32,
) -> Entity {
    let class_id = archetype.class_id();
    let fallback;
    let config = match registry.get(class_id) {
        Some(config) => config,
        None => {
            fallback = ironclash_core::presets::boss_configuration(archetype);
            &fallback
        }
    };
    let mut builder = combatant(config, class_id, position, DEFAULT_BOSS_RADIUS, team);
    builder
        .add(EntityRole::Boss { archetype })
        .add(Name(config.name.clone()));
    world.spawn(builder.build())
}

fn combatant(
    config: &TankConfiguration,
    class_id: &str,
    position: DVec2,
    radius: f64,
    team: u32,
) -> EntityBuilder {
    let mut builder = EntityBuilder::new();
    builder
        .add(Transform::at(position, radius))
        .add(Health::full(stats::max_health(config)))
        .add(ClassId(class_id.to_string()))
        .add(BarrelState::for_configuration(config))
        .add(StatusEffects::default())
        .add(VisualFlags::default())
        .add(Team(team))
        .add(Score::default())
        .add(Tread::default())
        .add(FireControl::default())
        .add(MoveInput::default())
        .add(RegenTimer::default())
        .add(SkillState::default());
    builder
}

/// Switch an existing combatant to another class. Barrel arrays are resized,
/// the health fraction is kept.
pub fn apply_configuration(
    world: &mut World,
    registry: &ConfigRegistry,
    entity: Entity,
    class_id: &str,
) -> Result<(), ConfigError> {
    let config = registry.require(class_id)?;
    if let Ok((class, barrels, health, skill)) = world
        .query_one_mut::<(&mut ClassId, &mut BarrelState, &mut Health, &mut SkillState)>(entity)
    {
        let fraction = health.fraction();
        class.0 = class_id.to_string();
        barrels.reconfigure(config);
        health.max = stats::max_health(config);
        health.current = health.max * fraction;
        skill.cooldown_secs = 0.0;
        debug!("entity {:?} reconfigured as {class_id} ({} barrels)", id_of(entity), config.barrel_count());
    }
    Ok(())
}

/// Parameters of one released shot, resolved by the combat system.
#[derive(Debug, Clone)]
pub struct Shot {
    pub owner: Entity,
    pub team: u32,
    pub barrel: usize,
    pub origin: DVec2,
    pub direction: DVec2,
    pub radius: f64,
    pub owner_radius: f64,
    pub speed: f64,
    pub damage: f64,
    pub penetration: f64,
    pub crit: bool,
    pub ammo_visual: AmmoVisual,
    pub ammo_type: AmmoType,
}

pub fn spawn_bullet(world: &mut World, shot: &Shot) -> Entity {
    let transform = Transform {
        position: shot.origin,
        velocity: shot.direction * shot.speed,
        rotation: shot.direction.to_angle(),
        radius: shot.radius,
    };
    world.spawn((
        transform,
        EntityRole::Bullet {
            ammo: shot.ammo_visual,
            crit: shot.crit,
        },
        projectile(shot, 0.0),
        Lifespan::new(BULLET_LIFESPAN_SECS),
        Team(shot.team),
    ))
}

pub fn spawn_trap(world: &mut World, shot: &Shot) -> Entity {
    let transform = Transform {
        position: shot.origin,
        velocity: shot.direction * shot.speed,
        rotation: shot.direction.to_angle(),
        radius: shot.radius,
    };
    world.spawn((
        transform,
        EntityRole::Trap,
        projectile(shot, TRAP_DRAG),
        Lifespan::new(TRAP_LIFESPAN_SECS),
        Team(shot.team),
    ))
}

pub fn spawn_drone(world: &mut World, shot: &Shot, index: u32) -> Entity {
    let transform = Transform {
        position: shot.origin,
        velocity: shot.direction * shot.speed * 0.5,
        rotation: shot.direction.to_angle(),
        radius: shot.owner_radius * DRONE_RADIUS_FRACTION,
    };
    let mut payload = projectile(shot, 0.0);
    payload.penetration = DRONE_PENETRATION;
    world.spawn((
        transform,
        EntityRole::Drone {
            ammo: shot.ammo_visual,
        },
        payload,
        DroneLink {
            owner: id_of(shot.owner),
            barrel: shot.barrel,
            index,
            aggression_radius: DRONE_AGGRESSION_RADIUS,
        },
        Team(shot.team),
    ))
}

fn projectile(shot: &Shot, drag: f64) -> Projectile {
    Projectile {
        owner: id_of(shot.owner),
        damage: shot.damage,
        penetration: shot.penetration,
        ammo_type: shot.ammo_type,
        crit: shot.crit,
        drag,
    }
}

pub fn spawn_particle(
    world: &mut World,
    kind: ParticleKind,
    position: DVec2,
    velocity: DVec2,
    radius: f64,
    lifespan_secs: f64,
) -> Entity {
    world.spawn((
        Transform {
            position,
            velocity,
            rotation: velocity.to_angle(),
            radius,
        },
        EntityRole::Particle { kind, target: None },
        Lifespan::new(lifespan_secs),
    ))
}

/// Two-endpoint beam from `from` to `to`.
pub fn spawn_beam(world: &mut World, from: DVec2, to: DVec2, width: f64) -> Entity {
    world.spawn((
        Transform::at(from, width),
        EntityRole::Particle {
            kind: ParticleKind::Beam,
            target: Some(to),
        },
        Lifespan::new(BEAM_LIFESPAN_SECS),
    ))
}

/// A handful of particles flung outward from `position`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_burst(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: ParticleKind,
    position: DVec2,
    count: usize,
    speed: f64,
    radius: f64,
    lifespan_secs: f64,
) {
    for _ in 0..count {
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let velocity = DVec2::from_angle(angle) * speed * rng.gen_range(0.5..1.0);
        spawn_particle(world, kind, position, velocity, radius, lifespan_secs);
    }
}

pub fn spawn_floating_text(world: &mut World, position: DVec2, text: String, crit: bool) -> Entity {
    world.spawn((
        Transform {
            position,
            velocity: DVec2::new(0.0, -FLOATING_TEXT_RISE_SPEED),
            rotation: 0.0,
            radius: if crit { 18.0 } else { 12.0 },
        },
        EntityRole::FloatingText { text, crit },
        Lifespan::new(FLOATING_TEXT_LIFETIME_SECS),
    ))
}

/// Rectangular ground zone with a stripe fill.
pub fn spawn_zone(world: &mut World, center: DVec2, size: DVec2, color: &str) -> Entity {
    world.spawn((
        Transform::at(center, size.max_element() * 0.5),
        EntityRole::Zone {
            size,
            color: color.to_string(),
        },
    ))
}

pub fn spawn_resource(
    world: &mut World,
    position: DVec2,
    shape: ResourceShape,
    color: &str,
    radius: f64,
) -> Entity {
    world.spawn((
        Transform::at(position, radius),
        EntityRole::Resource {
            shape,
            color: color.to_string(),
        },
        Health::full(radius * 2.0),
        Team(u32::MAX),
    ))
}

/// Demo arena: the player, a ring of bots of every built-in class, one of
/// each boss, two zones and scattered resources.
pub fn populate_arena(
    world: &mut World,
    registry: &ConfigRegistry,
    rng: &mut ChaCha8Rng,
    world_size: f64,
    player_class: &str,
) -> Result<Entity, ConfigError> {
    let center = DVec2::splat(world_size * 0.5);
    let player = spawn_tank(world, registry, player_class, center, 0, "You")?;
    let _ = world.insert_one(player, Player);

    let classes: Vec<String> = registry
        .iter()
        .filter(|(id, _)| !id.starts_with("boss_"))
        .map(|(id, _)| id.to_string())
        .collect();
    for (i, class_id) in classes.iter().enumerate() {
        let angle = i as f64 / classes.len().max(1) as f64 * std::f64::consts::TAU;
        let position = center + DVec2::from_angle(angle) * 500.0;
        let bot = spawn_tank(world, registry, class_id, position, i as u32 + 1, class_id)?;
        if let Ok(mut transform) = world.get::<&mut Transform>(bot) {
            transform.rotation = angle + std::f64::consts::PI;
        }
    }
    for (i, archetype) in BossArchetype::ALL.into_iter().enumerate() {
        let corner = DVec2::new(
            if i % 2 == 0 { 0.25 } else { 0.75 },
            if i < 2 { 0.25 } else { 0.75 },
        ) * world_size;
        spawn_boss(world, registry, archetype, corner, 100);
    }

    spawn_zone(world, center - DVec2::new(900.0, 0.0), DVec2::new(300.0, 600.0), "#00b2e1");
    spawn_zone(world, center + DVec2::new(900.0, 0.0), DVec2::new(300.0, 600.0), "#f14e54");

    let palette = [
        (ResourceShape::Square, "#ffe869", 14.0),
        (ResourceShape::Triangle, "#fc7677", 16.0),
        (ResourceShape::Pentagon, "#768dfc", 24.0),
        (ResourceShape::Hexagon, "#5ef08c", 32.0),
    ];
    for _ in 0..40 {
        let (shape, color, radius) = palette[rng.gen_range(0..palette.len())];
        let position = DVec2::new(
            rng.gen_range(0.0..world_size),
            rng.gen_range(0.0..world_size),
        );
        spawn_resource(world, position, shape, color, radius);
    }
    Ok(player)
}
