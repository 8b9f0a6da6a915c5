//! Kinematic integration.
//!
//! Combatants accelerate along their move input and coast under friction,
//! bounded to the arena. Projectiles and particles drift under their own
//! drag. Drones get their velocity from targeting and are only integrated
//! here.

use hecs::World;

use ironclash_core::components::*;
use ironclash_core::config::ConfigRegistry;
use ironclash_core::constants::*;
use ironclash_core::types::Transform;

use crate::stats;

pub fn run(world: &mut World, registry: &ConfigRegistry, world_size: f64, dt: f64) {
    let friction = (-TANK_FRICTION * dt).exp();
    for (_entity, (transform, input, class, status, tread)) in world.query_mut::<(
        &mut Transform,
        &MoveInput,
        &ClassId,
        &StatusEffects,
        &mut Tread,
    )>() {
        let speed = registry
            .get(&class.0)
            .map(|config| stats::move_speed(config, status))
            .unwrap_or(1.0);
        let thrust = input.direction.normalize_or_zero() * TANK_ACCELERATION * speed;
        transform.velocity = (transform.velocity + thrust * dt) * friction;

        let before = transform.position;
        transform.position += transform.velocity * dt;
        transform.position = transform.position.clamp(
            glam::DVec2::ZERO,
            glam::DVec2::splat(world_size.max(0.0)),
        );
        tread.distance += before.distance(transform.position);
    }

    for (_entity, (transform, projectile)) in world.query_mut::<(&mut Transform, &Projectile)>() {
        if projectile.drag > 0.0 {
            transform.velocity *= (-projectile.drag * dt).exp();
        }
        transform.position += transform.velocity * dt;
    }

    let particle_drag = (-PARTICLE_DRAG * dt).exp();
    for (_entity, (transform, role)) in world.query_mut::<(&mut Transform, &EntityRole)>() {
        match role {
            EntityRole::Particle { .. } => {
                transform.velocity *= particle_drag;
                transform.position += transform.velocity * dt;
            }
            EntityRole::FloatingText { .. } => {
                transform.position += transform.velocity * dt;
            }
            _ => {}
        }
    }
}
