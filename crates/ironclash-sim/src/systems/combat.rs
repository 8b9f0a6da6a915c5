//! Combat: resolving released shots, projectile and body hits, and the
//! damage hooks (fortify, thorns, lifesteal, ammo statuses, flash, score).

use std::collections::HashMap;

use glam::DVec2;
use hecs::{Entity, World};
use log::debug;
use rand_chacha::ChaCha8Rng;

use ironclash_core::components::*;
use ironclash_core::config::{ConfigRegistry, Specialization};
use ironclash_core::constants::*;
use ironclash_core::enums::*;
use ironclash_core::events::SimEvent;
use ironclash_core::types::{EntityId, Transform};

use crate::stats;
use crate::systems::targeting::Contact;
use crate::systems::weapons::Release;
use crate::world_setup::{self, entity_of, id_of};

/// One instance of incoming damage.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub target: Entity,
    pub source: Option<Entity>,
    pub amount: f64,
    pub crit: bool,
    pub ammo_type: AmmoType,
}

/// Spawn projectiles, drones and traps, and resolve hitscan rays.
pub fn resolve_releases(
    world: &mut World,
    registry: &ConfigRegistry,
    releases: Vec<Release>,
    contacts: &[Contact],
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
) {
    let mut drone_counts: HashMap<(EntityId, usize), u32> = HashMap::new();
    for (_entity, link) in world.query::<&DroneLink>().iter() {
        *drone_counts.entry((link.owner, link.barrel)).or_default() += 1;
    }

    for release in releases {
        let shot = &release.shot;
        match (release.specialization, release.behavior) {
            (Some(Specialization::DroneSpawner { max_drones }), _) => {
                let count = drone_counts.entry((id_of(shot.owner), shot.barrel)).or_default();
                if *count < max_drones {
                    world_setup::spawn_drone(world, shot, *count);
                    *count += 1;
                    debug!("drone {} of {max_drones} spawned for {:?}", *count, id_of(shot.owner));
                }
            }
            (Some(Specialization::TrapLayer), _) => {
                world_setup::spawn_trap(world, shot);
            }
            (_, BarrelBehavior::Hitscan) => {
                let end = shot.origin + shot.direction * HITSCAN_RANGE;
                let struck = raycast(shot.origin, shot.direction, HITSCAN_RANGE, shot.team, contacts);
                let beam_end = match struck {
                    Some((contact, distance)) => {
                        apply_damage(
                            world,
                            registry,
                            rng,
                            events,
                            Hit {
                                target: contact.entity,
                                source: Some(shot.owner),
                                amount: shot.damage,
                                crit: shot.crit,
                                ammo_type: shot.ammo_type,
                            },
                        );
                        shot.origin + shot.direction * distance
                    }
                    None => end,
                };
                world_setup::spawn_beam(world, shot.origin, beam_end, shot.radius);
            }
            (_, BarrelBehavior::Projectile) => {
                world_setup::spawn_bullet(world, shot);
            }
        }
    }
}

/// First hostile contact hit by a ray, with the distance along the ray.
pub fn raycast(
    origin: DVec2,
    direction: DVec2,
    range: f64,
    team: u32,
    contacts: &[Contact],
) -> Option<(Contact, f64)> {
    let direction = direction.normalize_or_zero();
    if direction == DVec2::ZERO {
        return None;
    }
    contacts
        .iter()
        .filter(|c| c.team != team)
        .filter_map(|c| {
            let to_center = c.position - origin;
            let along = to_center.dot(direction);
            let closest_sq = to_center.length_squared() - along * along;
            let radius_sq = c.radius * c.radius;
            if closest_sq > radius_sq {
                return None;
            }
            let entry = along - (radius_sq - closest_sq).sqrt();
            let distance = entry.max(0.0);
            (along >= -c.radius && distance <= range).then_some((*c, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Projectile, trap and drone hits against overlapping hostiles.
pub fn run(
    world: &mut World,
    registry: &ConfigRegistry,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let targets: Vec<(Entity, Transform, u32)> = world
        .query::<(&Transform, &Team, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| !health.is_dead())
        .map(|(entity, (transform, team, _))| (entity, *transform, team.0))
        .collect();

    let mut hits = Vec::new();
    for (entity, (transform, projectile, team)) in
        world.query::<(&Transform, &Projectile, &Team)>().iter()
    {
        let struck = targets
            .iter()
            .filter(|(_, _, target_team)| *target_team != team.0)
            .find(|(_, target, _)| target.overlaps(transform));
        if let Some((target, _, _)) = struck {
            hits.push((entity, *target, *projectile));
        }
    }

    for (projectile_entity, target, projectile) in hits {
        let source = entity_of(projectile.owner).filter(|e| world.contains(*e));
        apply_damage(
            world,
            registry,
            rng,
            events,
            Hit {
                target,
                source,
                amount: projectile.damage,
                crit: projectile.crit,
                ammo_type: projectile.ammo_type,
            },
        );
        if let Ok(mut payload) = world.get::<&mut Projectile>(projectile_entity) {
            payload.penetration -= 1.0;
            if payload.penetration <= 0.0 {
                despawn_buffer.push(projectile_entity);
            }
        }
    }
}

/// Contact damage between overlapping hostile bodies.
pub fn contact_damage(
    world: &mut World,
    registry: &ConfigRegistry,
    contacts: &[Contact],
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
    dt: f64,
) {
    let mut pairs = Vec::new();
    for (i, a) in contacts.iter().enumerate() {
        for b in &contacts[i + 1..] {
            let reach = a.radius + b.radius;
            if a.team != b.team && a.position.distance_squared(b.position) <= reach * reach {
                pairs.push((a.entity, b.entity));
                pairs.push((b.entity, a.entity));
            }
        }
    }
    for (attacker, target) in pairs {
        let body_damage = world
            .get::<&ClassId>(attacker)
            .ok()
            .and_then(|class| registry.get(&class.0).map(|c| c.stats.body_damage))
            .unwrap_or(1.0);
        let dealt = apply_hooks(
            world,
            registry,
            events,
            Hit {
                target,
                source: Some(attacker),
                amount: CONTACT_DAMAGE_PER_SEC * body_damage * dt,
                crit: false,
                ammo_type: AmmoType::Kinetic,
            },
        );
        if dealt > 0.0 {
            let tallied = world
                .get::<&mut ContactTally>(target)
                .map(|mut tally| tally.pending += dealt)
                .is_ok();
            if !tallied {
                let _ = world.insert_one(
                    target,
                    ContactTally {
                        pending: dealt,
                        since_text_secs: 0.0,
                    },
                );
            }
        }
    }

    let mut shown = Vec::new();
    for (_entity, (tally, transform)) in world.query_mut::<(&mut ContactTally, &Transform)>() {
        tally.since_text_secs += dt;
        if tally.pending > 0.0 && tally.since_text_secs >= CONTACT_TEXT_INTERVAL_SECS {
            shown.push((transform.position, tally.pending));
            tally.pending = 0.0;
            tally.since_text_secs = 0.0;
        }
    }
    for (position, amount) in shown {
        show_damage(world, rng, position, amount, false, AmmoType::Kinetic);
    }
}

/// Apply one hit through every damage hook and show it. Returns the damage
/// dealt.
pub fn apply_damage(
    world: &mut World,
    registry: &ConfigRegistry,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
    hit: Hit,
) -> f64 {
    let dealt = apply_hooks(world, registry, events, hit);
    if dealt > 0.0 {
        let position = world
            .get::<&Transform>(hit.target)
            .map(|t| t.position)
            .unwrap_or_default();
        show_damage(world, rng, position, dealt, hit.crit, hit.ammo_type);
    }
    dealt
}

/// Sparks plus a floating damage number.
fn show_damage(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: DVec2,
    amount: f64,
    crit: bool,
    ammo_type: AmmoType,
) {
    let spark = match ammo_type {
        AmmoType::Cryogenic => ParticleKind::SnowHex,
        AmmoType::Thermal => ParticleKind::Smoke,
        _ => ParticleKind::Spark,
    };
    world_setup::spawn_burst(world, rng, spark, position, 3, 120.0, 3.0, SPARK_LIFESPAN_SECS);
    world_setup::spawn_floating_text(
        world,
        position + DVec2::new(0.0, -20.0),
        format!("{:.0}", amount.max(1.0)),
        crit,
    );
}

/// Damage, flash, ammo statuses, lifesteal and thorns, without any visual
/// feedback.
fn apply_hooks(
    world: &mut World,
    registry: &ConfigRegistry,
    events: &mut Vec<SimEvent>,
    hit: Hit,
) -> f64 {
    let dealt = deal(world, hit.target, hit.source, hit.amount, events);
    if dealt <= 0.0 {
        return 0.0;
    }

    let target_id = id_of(hit.target);
    events.push(SimEvent::Hit {
        target: target_id,
        source: hit.source.map(id_of),
        damage: dealt,
        crit: hit.crit,
    });

    if let Ok(mut visual) = world.get::<&mut VisualFlags>(hit.target) {
        visual.flash_secs = FLASH_DURATION_SECS;
    }

    let status = match hit.ammo_type {
        AmmoType::Thermal => Some(StatusEffect {
            kind: StatusKind::Burn,
            remaining_secs: BURN_DURATION_SECS,
            source: hit.source.map(id_of),
            magnitude: dealt * BURN_DPS_FRACTION,
        }),
        AmmoType::Cryogenic => Some(StatusEffect {
            kind: StatusKind::Slow,
            remaining_secs: SLOW_DURATION_SECS,
            source: hit.source.map(id_of),
            magnitude: SLOW_MULTIPLIER,
        }),
        _ => None,
    };
    if let Some(effect) = status {
        if let Ok(mut effects) = world.get::<&mut StatusEffects>(hit.target) {
            effects.apply(effect);
            events.push(SimEvent::StatusApplied {
                target: target_id,
                kind: effect.kind,
            });
        }
    }

    if let Some(source) = hit.source {
        let attacker_class = class_of(world, source);
        let defender_class = class_of(world, hit.target);

        let lifesteal = attacker_class
            .and_then(|id| registry.get(&id))
            .map(stats::lifesteal_fraction)
            .unwrap_or(0.0);
        if lifesteal > 0.0 {
            if let Ok(mut health) = world.get::<&mut Health>(source) {
                health.current = (health.current + dealt * lifesteal).min(health.max);
            }
        }

        let thorns = defender_class
            .and_then(|id| registry.get(&id))
            .map(stats::thorns_fraction)
            .unwrap_or(0.0);
        if thorns > 0.0 {
            // Reflected damage does not trigger further hooks.
            deal(world, source, Some(hit.target), dealt * thorns, events);
        }
    }
    dealt
}

fn class_of(world: &World, entity: Entity) -> Option<String> {
    world.get::<&ClassId>(entity).ok().map(|c| c.0.clone())
}

/// Subtract health after fortify. Records the kill when health crosses zero.
fn deal(
    world: &mut World,
    target: Entity,
    source: Option<Entity>,
    amount: f64,
    events: &mut Vec<SimEvent>,
) -> f64 {
    let reduction = world
        .get::<&StatusEffects>(target)
        .map(|s| stats::damage_taken_multiplier(&s))
        .unwrap_or(1.0);
    let dealt = amount.max(0.0) * reduction;
    let (killed, victim_max) = match world.query_one_mut::<(&mut Health, Option<&mut RegenTimer>)>(target) {
        Ok((health, regen)) => {
            if health.is_dead() {
                return 0.0;
            }
            health.current = (health.current - dealt).max(0.0);
            if let Some(regen) = regen {
                regen.since_damage_secs = 0.0;
            }
            (health.is_dead(), health.max)
        }
        Err(_) => return 0.0,
    };
    if killed {
        record_kill(world, target, source, victim_max, events);
    }
    dealt
}

/// Award the killer and emit the destruction event. Cleanup despawns the victim.
pub fn record_kill(
    world: &mut World,
    victim: Entity,
    killer: Option<Entity>,
    victim_max_health: f64,
    events: &mut Vec<SimEvent>,
) {
    if let Some(killer) = killer {
        if let Ok(mut score) = world.get::<&mut Score>(killer) {
            score.0 += KILL_SCORE_BASE * victim_max_health / 100.0;
        }
    }
    events.push(SimEvent::Destroyed {
        entity: id_of(victim),
        killer: killer.map(id_of),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raycast_hits_nearest_hostile() {
        let mut world = World::new();
        let near = Contact {
            entity: world.spawn((1u32,)),
            team: 2,
            position: DVec2::new(100.0, 0.0),
            radius: 10.0,
        };
        let far = Contact {
            entity: world.spawn((2u32,)),
            team: 2,
            position: DVec2::new(300.0, 0.0),
            radius: 10.0,
        };
        let friend = Contact {
            entity: world.spawn((3u32,)),
            team: 1,
            position: DVec2::new(50.0, 0.0),
            radius: 10.0,
        };
        let (hit, distance) =
            raycast(DVec2::ZERO, DVec2::X, HITSCAN_RANGE, 1, &[far, friend, near]).unwrap();
        assert_eq!(hit.entity, near.entity);
        assert!((distance - 90.0).abs() < 1e-9);

        assert!(raycast(DVec2::ZERO, DVec2::Y, HITSCAN_RANGE, 1, &[near, far]).is_none());
        assert!(raycast(DVec2::ZERO, -DVec2::X, HITSCAN_RANGE, 1, &[near, far]).is_none());
        assert!(raycast(DVec2::ZERO, DVec2::ZERO, HITSCAN_RANGE, 1, &[near]).is_none());
    }
}
