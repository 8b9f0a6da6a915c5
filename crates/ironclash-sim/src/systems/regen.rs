//! Health regeneration after a quiet period without damage.

use hecs::World;

use ironclash_core::components::{ClassId, Health, RegenTimer};
use ironclash_core::config::ConfigRegistry;
use ironclash_core::constants::REGEN_DELAY_SECS;

use crate::stats;

pub fn run(world: &mut World, registry: &ConfigRegistry, dt: f64) {
    for (_entity, (health, timer, class)) in
        world.query_mut::<(&mut Health, &mut RegenTimer, &ClassId)>()
    {
        timer.since_damage_secs += dt;
        if health.is_dead() || !health.is_damaged() || timer.since_damage_secs < REGEN_DELAY_SECS {
            continue;
        }
        let Some(config) = registry.get(&class.0) else {
            continue;
        };
        let rate = stats::regen_rate(config, health.max);
        health.current = (health.current + rate * dt).min(health.max);
    }
}
