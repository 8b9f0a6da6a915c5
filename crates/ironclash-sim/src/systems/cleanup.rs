//! Cleanup system: expires short-lived entities and removes the dead.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use ironclash_core::components::*;
use ironclash_core::constants::*;
use ironclash_core::enums::ParticleKind;
use ironclash_core::types::Transform;

use crate::world_setup::{self, entity_of};

/// Count down lifespans, then despawn everything that is finished.
/// `despawn_buffer` may already hold entities queued by earlier systems.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    despawn_buffer: &mut Vec<Entity>,
    world_size: f64,
    dt: f64,
) {
    for (entity, life) in world.query_mut::<&mut Lifespan>() {
        life.remaining_secs -= dt;
        if life.remaining_secs <= TIMER_EPSILON {
            despawn_buffer.push(entity);
        }
    }

    // Projectiles that left the arena.
    let margin = world_size * 0.1;
    for (entity, (transform, _projectile)) in world.query_mut::<(&Transform, &Projectile)>() {
        let p = transform.position;
        if p.x < -margin || p.y < -margin || p.x > world_size + margin || p.y > world_size + margin {
            despawn_buffer.push(entity);
        }
    }

    // Drones whose spawner is gone.
    let orphans: Vec<Entity> = world
        .query::<&DroneLink>()
        .iter()
        .filter(|(_, link)| !entity_of(link.owner).is_some_and(|owner| world.contains(owner)))
        .map(|(entity, _)| entity)
        .collect();
    despawn_buffer.extend(orphans);

    // Destroyed combatants and resources leave debris behind.
    let dead: Vec<(Entity, Transform)> = world
        .query::<(&Health, &Transform)>()
        .iter()
        .filter(|(_, (health, _))| health.is_dead())
        .map(|(entity, (_, transform))| (entity, *transform))
        .collect();
    for (entity, transform) in dead {
        world_setup::spawn_particle(
            world,
            ParticleKind::Shockwave,
            transform.position,
            glam::DVec2::ZERO,
            transform.radius,
            DEBRIS_LIFESPAN_SECS,
        );
        world_setup::spawn_burst(
            world,
            rng,
            ParticleKind::Debris,
            transform.position,
            5,
            160.0,
            transform.radius * 0.2,
            DEBRIS_LIFESPAN_SECS,
        );
        despawn_buffer.push(entity);
    }

    despawn_buffer.sort_unstable_by_key(|e| e.to_bits());
    despawn_buffer.dedup();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
