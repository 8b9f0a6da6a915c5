//! Drone steering and hostile target selection.
//!
//! Priority per drone: the owner's explicit intent, then the nearest hostile
//! inside the aggression radius (re-evaluated every tick), then an idle orbit
//! around the owner.

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::DVec2;
use hecs::{Entity, World};

use ironclash_core::components::*;
use ironclash_core::constants::*;
use ironclash_core::types::{EntityId, Transform};

use crate::world_setup::id_of;

/// A combatant visible to targeting.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub entity: Entity,
    pub team: u32,
    pub position: DVec2,
    pub radius: f64,
}

/// Where a drone is headed this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetChoice {
    Attract(DVec2),
    Repel(DVec2),
    Hostile { entity: Entity, position: DVec2 },
    Orbit(DVec2),
}

impl TargetChoice {
    /// Unit steering direction from `position`; zero when already on target.
    pub fn direction_from(&self, position: DVec2) -> DVec2 {
        match *self {
            TargetChoice::Repel(point) => (position - point).normalize_or_zero(),
            TargetChoice::Attract(point)
            | TargetChoice::Orbit(point)
            | TargetChoice::Hostile {
                position: point, ..
            } => (point - position).normalize_or_zero(),
        }
    }
}

/// All living tanks and bosses.
pub fn contacts(world: &World) -> Vec<Contact> {
    world
        .query::<(&Transform, &Team, &EntityRole, &Health)>()
        .iter()
        .filter(|(_, (_, _, role, health))| role.is_combatant() && !health.is_dead())
        .map(|(entity, (transform, team, _, _))| Contact {
            entity,
            team: team.0,
            position: transform.position,
            radius: transform.radius,
        })
        .collect()
}

/// Nearest contact not on `team` within `radius` of `position`.
pub fn nearest_hostile(
    position: DVec2,
    team: u32,
    contacts: &[Contact],
    radius: f64,
) -> Option<&Contact> {
    let radius_sq = radius * radius;
    contacts
        .iter()
        .filter(|c| c.team != team)
        .map(|c| (c, c.position.distance_squared(position)))
        .filter(|(_, d)| *d <= radius_sq)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}

/// Idle orbit slot of drone `index` in a swarm of `swarm_size`.
pub fn orbit_point(
    owner_position: DVec2,
    owner_radius: f64,
    index: u32,
    swarm_size: u32,
    elapsed_secs: f64,
) -> DVec2 {
    let phase = TAU * index as f64 / swarm_size.max(1) as f64;
    let angle = elapsed_secs * DRONE_ORBIT_RATE + phase;
    let wobble = 1.0 + 0.15 * (elapsed_secs * 2.0 + phase).sin();
    owner_position + DVec2::from_angle(angle) * owner_radius * DRONE_ORBIT_RADIUS_FACTOR * wobble
}

pub fn choose_target(
    intent: ControlIntent,
    drone_position: DVec2,
    team: u32,
    aggression_radius: f64,
    contacts: &[Contact],
    orbit: DVec2,
) -> TargetChoice {
    match intent {
        ControlIntent::Attract { point } => TargetChoice::Attract(point),
        ControlIntent::Repel { point } => TargetChoice::Repel(point),
        ControlIntent::Idle => match nearest_hostile(drone_position, team, contacts, aggression_radius) {
            Some(contact) => TargetChoice::Hostile {
                entity: contact.entity,
                position: contact.position,
            },
            None => TargetChoice::Orbit(orbit),
        },
    }
}

/// Accelerate toward `direction`, then apply the fixed per-tick damping.
pub fn steer(velocity: DVec2, direction: DVec2, dt: f64) -> DVec2 {
    (velocity + direction * DRONE_ACCELERATION * dt) * DRONE_DAMPING
}

struct OwnerInfo {
    position: DVec2,
    radius: f64,
    intent: ControlIntent,
}

/// Steer every drone.
pub fn run(world: &mut World, contacts: &[Contact], elapsed_secs: f64, dt: f64) {
    let owners: HashMap<EntityId, OwnerInfo> = world
        .query::<(&Transform, &FireControl)>()
        .iter()
        .map(|(entity, (transform, fire))| {
            (
                id_of(entity),
                OwnerInfo {
                    position: transform.position,
                    radius: transform.radius,
                    intent: fire.intent,
                },
            )
        })
        .collect();

    let mut swarm_sizes: HashMap<EntityId, u32> = HashMap::new();
    for (_entity, link) in world.query::<&DroneLink>().iter() {
        *swarm_sizes.entry(link.owner).or_default() += 1;
    }

    for (_entity, (transform, link, team)) in
        world.query_mut::<(&mut Transform, &DroneLink, &Team)>()
    {
        let Some(owner) = owners.get(&link.owner) else {
            continue;
        };
        let swarm = swarm_sizes.get(&link.owner).copied().unwrap_or(1);
        let orbit = orbit_point(owner.position, owner.radius, link.index, swarm, elapsed_secs);
        let choice = choose_target(
            owner.intent,
            transform.position,
            team.0,
            link.aggression_radius,
            contacts,
            orbit,
        );
        let direction = choice.direction_from(transform.position);
        transform.velocity = steer(transform.velocity, direction, dt);
        if transform.velocity.length_squared() > 1e-12 {
            transform.rotation = transform.velocity.to_angle();
        }
    }
}
