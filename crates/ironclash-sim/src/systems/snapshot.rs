//! Snapshot system: queries the ECS world and builds a complete FrameSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use ironclash_core::components::*;
use ironclash_core::config::ConfigRegistry;
use ironclash_core::events::SimEvent;
use ironclash_core::state::*;
use ironclash_core::types::{SimTime, Transform};

use crate::stats;
use crate::world_setup::id_of;

/// Build a complete FrameSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    registry: &ConfigRegistry,
    time: &SimTime,
    events: Vec<SimEvent>,
) -> FrameSnapshot {
    let entities = build_entities(world);
    let player = find_player(world);
    FrameSnapshot {
        time: *time,
        player: player.map(id_of),
        player_state: build_player_state(world, registry, player, &entities),
        entities,
        events,
    }
}

fn find_player(world: &World) -> Option<Entity> {
    world
        .query::<&Player>()
        .iter()
        .next()
        .map(|(entity, _)| entity)
}

/// One view per drawable entity.
fn build_entities(world: &World) -> Vec<EntityView> {
    world
        .query::<(
            (&Transform, &EntityRole),
            (Option<&Health>, Option<&ClassId>, Option<&BarrelState>),
            (Option<&StatusEffects>, Option<&VisualFlags>, Option<&Team>),
            (Option<&Name>, Option<&Player>, Option<&Tread>),
            (Option<&Lifespan>, Option<&Score>),
        )>()
        .iter()
        .map(
            |(
                entity,
                (
                    (transform, role),
                    (health, class, barrels),
                    (status, visual, team),
                    (name, player, tread),
                    (lifespan, score),
                ),
            )| {
                let health = health.copied().unwrap_or(Health::full(1.0));
                EntityView {
                    id: id_of(entity),
                    role: role.clone(),
                    transform: *transform,
                    health: health.current,
                    max_health: health.max,
                    class_id: class.map(|c| c.0.clone()),
                    barrels: barrels.cloned().unwrap_or_default(),
                    status: status.cloned().unwrap_or_default(),
                    visual: visual.copied().unwrap_or_default(),
                    team: team.map(|t| t.0).unwrap_or(0),
                    name: name.map(|n| n.0.clone()),
                    is_player: player.is_some(),
                    tread_distance: tread.map(|t| t.distance).unwrap_or(0.0),
                    lifespan: lifespan.copied(),
                    score: score.map(|s| s.0).unwrap_or(0.0),
                    color: None,
                }
            },
        )
        .collect()
}

fn build_player_state(
    world: &World,
    registry: &ConfigRegistry,
    player: Option<Entity>,
    entities: &[EntityView],
) -> PlayerState {
    let player_id = player.map(id_of);
    let leader_position = entities
        .iter()
        .filter(|e| e.role.is_combatant() && Some(e.id) != player_id)
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|e| e.transform.position);

    let Some(view) = player_id.and_then(|id| entities.iter().find(|e| e.id == id)) else {
        return PlayerState {
            leader_position,
            ..Default::default()
        };
    };
    let config = view.class_id.as_deref().and_then(|id| registry.get(id));
    let skill_ready = match (config.and_then(|c| c.active_skill), player) {
        (Some(skill), Some(entity)) if skill.cooldown_secs > 0.0 => {
            let remaining = world
                .get::<&SkillState>(entity)
                .map(|s| s.cooldown_secs)
                .unwrap_or(0.0);
            (1.0 - remaining / skill.cooldown_secs).clamp(0.0, 1.0)
        }
        _ => 1.0,
    };
    PlayerState {
        score: view.score,
        alive: view.health > 0.0,
        health_fraction: view.health_fraction(),
        fov: config.map(stats::field_of_view).unwrap_or(1.0),
        leader_position,
        skill_ready,
    }
}
