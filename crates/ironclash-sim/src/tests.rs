//! Tests for the arena engine: weapon timing, status effects, drones,
//! combat hooks and snapshots.

use glam::DVec2;

use ironclash_core::commands::PlayerCommand;
use ironclash_core::components::*;
use ironclash_core::config::*;
use ironclash_core::constants::*;
use ironclash_core::enums::*;
use ironclash_core::events::SimEvent;
use ironclash_core::presets::builtin_registry;
use ironclash_core::state::FrameSnapshot;
use ironclash_core::types::EntityId;

use crate::engine::{ArenaEngine, SimConfig};
use crate::world_setup::entity_of;

const HOME: DVec2 = DVec2::new(1000.0, 1000.0);

fn engine_with(extra: Vec<(&str, TankConfiguration)>) -> ArenaEngine {
    let mut registry = builtin_registry();
    for (id, config) in extra {
        registry.insert(id, config);
    }
    ArenaEngine::with_registry(SimConfig::default(), registry)
}

fn shots_of(snapshot: &FrameSnapshot, shooter: EntityId) -> Vec<usize> {
    snapshot
        .events
        .iter()
        .filter_map(|e| match e {
            SimEvent::ShotFired {
                shooter: s, barrel, ..
            } if *s == shooter => Some(*barrel),
            _ => None,
        })
        .collect()
}

fn player_view(snapshot: &FrameSnapshot) -> &ironclash_core::state::EntityView {
    snapshot.player().expect("player present")
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = ArenaEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = ArenaEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    engine_a.populate_arena("machine_gun").unwrap();
    engine_b.populate_arena("machine_gun").unwrap();
    engine_a.queue_command(PlayerCommand::SetFiring { held: true });
    engine_b.queue_command(PlayerCommand::SetFiring { held: true });

    for _ in 0..120 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = ArenaEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = ArenaEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    engine_a.populate_arena("basic").unwrap();
    engine_b.populate_arena("basic").unwrap();
    let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
    assert_ne!(json_a, json_b, "Resource scatter should depend on the seed");
}

// ---- Timing ----

#[test]
fn test_tick_timing_30_ticks_one_second() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    for _ in 0..30 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 30);
    assert!((engine.time().elapsed_secs - 1.0).abs() < 1e-9);
}

#[test]
fn test_zero_time_scale_freezes() {
    let mut engine = ArenaEngine::new(SimConfig {
        time_scale: 0.0,
        ..Default::default()
    });
    engine.spawn_player("basic", HOME).unwrap();
    engine.queue_command(PlayerCommand::SetFiring { held: true });
    let snapshot = engine.tick();
    assert_eq!(engine.time().tick, 0);
    assert!(snapshot.events.is_empty());
}

// ---- Weapon firing ----

#[test]
fn test_three_barrel_stagger_through_engine() {
    // reload stat 0.6 makes the reload exactly 1.0 s.
    let triple = TankConfiguration {
        barrels: [0.0, 0.2, 0.4]
            .into_iter()
            .map(|delay| Barrel {
                delay,
                ..Barrel::default()
            })
            .collect(),
        stats: StatMultipliers {
            reload: 0.6,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut engine = engine_with(vec![("stagger", triple)]);
    let player = engine.spawn_player("stagger", HOME).unwrap();
    engine.queue_command(PlayerCommand::SetFiring { held: true });

    let mut fired = Vec::new();
    for tick in 0..=30 {
        let snapshot = engine.tick();
        for barrel in shots_of(&snapshot, player) {
            fired.push((tick, barrel));
        }
    }
    assert_eq!(fired, vec![(0, 0), (6, 1), (12, 2), (30, 0)]);
}

#[test]
fn test_charge_barrel_through_engine() {
    let rail = TankConfiguration {
        barrels: vec![Barrel {
            charge_time: 1.0,
            behavior: BarrelBehavior::Hitscan,
            ..Barrel::default()
        }],
        ..Default::default()
    };
    let mut engine = engine_with(vec![("rail", rail.clone())]);
    let player = engine.spawn_player("rail", HOME).unwrap();
    engine.queue_command(PlayerCommand::SetFiring { held: true });

    let mut shots = 0;
    let mut snapshot = FrameSnapshot::default();
    for _ in 0..15 {
        snapshot = engine.tick();
        shots += shots_of(&snapshot, player).len();
    }
    assert_eq!(shots, 0);
    let view = player_view(&snapshot);
    assert!((view.barrels.glow(0, &rail.barrels[0]) - 0.5).abs() < 1e-9);

    for _ in 15..30 {
        snapshot = engine.tick();
        shots += shots_of(&snapshot, player).len();
    }
    assert_eq!(shots, 1);
    assert_eq!(player_view(&snapshot).barrels.charge[0], 0.0);
    assert!(snapshot.entities.iter().any(|e| matches!(
        e.role,
        EntityRole::Particle {
            kind: ParticleKind::Beam,
            target: Some(_)
        }
    )));
}

#[test]
fn test_recoil_pushes_owner_backward() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.spawn_player("sniper", HOME).unwrap();
    engine.queue_command(PlayerCommand::SetFiring { held: true });
    let snapshot = engine.tick();
    let view = player_view(&snapshot);
    assert!(view.transform.position.x < HOME.x);
    assert!(view.barrels.recoil[0] > 0.0);
}

#[test]
fn test_barrel_arrays_follow_class_changes() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.spawn_player("basic", HOME).unwrap();
    engine.queue_command(PlayerCommand::SetFiring { held: true });
    let registry = engine.registry().clone();

    for class_id in ["triple_shot", "smasher", "auto_gunner", "basic", "boss_sentinel"] {
        engine.queue_command(PlayerCommand::ChangeClass {
            class_id: class_id.to_string(),
        });
        let snapshot = engine.tick();
        let view = player_view(&snapshot);
        let count = registry.get(class_id).unwrap().barrel_count();
        assert_eq!(view.class_id.as_deref(), Some(class_id));
        assert!(view.barrels.is_consistent(count), "{class_id}");
        assert!(snapshot.events.iter().any(|e| matches!(
            e,
            SimEvent::ClassChanged { class_id: id, .. } if id == class_id
        )));
        for _ in 0..10 {
            let snapshot = engine.tick();
            assert!(player_view(&snapshot).barrels.is_consistent(count));
        }
    }
}

#[test]
fn test_unknown_class_change_is_rejected() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.spawn_player("twin", HOME).unwrap();
    engine.queue_command(PlayerCommand::ChangeClass {
        class_id: "not_a_class".to_string(),
    });
    let snapshot = engine.tick();
    let view = player_view(&snapshot);
    assert_eq!(view.class_id.as_deref(), Some("twin"));
    assert!(view.barrels.is_consistent(2));
}

#[test]
fn test_spawn_unknown_class_is_error() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    assert!(matches!(
        engine.spawn_tank("ghost", HOME, 1, "x"),
        Err(ConfigError::UnknownClass(_))
    ));
}

#[test]
fn test_imported_classes_are_clamped() {
    let text = r#"{"wild": {"barrels": [{"spread": 50.0, "length": -3.0, "width": -1.0}]}}"#;
    let imported = ConfigRegistry::from_text(text).unwrap();
    assert!((imported.get("wild").unwrap().barrels[0].spread - 50.0).abs() < 1e-10);

    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.register_classes(imported.clone());
    let barrel = &engine.registry().get("wild").unwrap().barrels[0];
    assert!(barrel.spread <= 1.0);
    assert!(barrel.length >= 0.0);
    assert!(barrel.width >= 0.0);

    let engine = ArenaEngine::with_registry(SimConfig::default(), imported);
    assert!(engine.registry().get("wild").unwrap().barrels[0].spread <= 1.0);
}

// ---- Drones ----

#[test]
fn test_drone_spawner_respects_max() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.spawn_player("overseer", HOME).unwrap();
    engine.queue_command(PlayerCommand::SetFiring { held: true });
    let mut snapshot = FrameSnapshot::default();
    for _ in 0..600 {
        snapshot = engine.tick();
    }
    let drones = snapshot
        .entities
        .iter()
        .filter(|e| matches!(e.role, EntityRole::Drone { .. }))
        .count();
    assert_eq!(drones, 8);
}

#[test]
fn test_drones_follow_attract_intent() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.spawn_player("overseer", HOME).unwrap();
    engine.queue_command(PlayerCommand::SetFiring { held: true });
    for _ in 0..60 {
        engine.tick();
    }
    let point = HOME + DVec2::new(0.0, 400.0);
    engine.queue_command(PlayerCommand::SetDroneIntent {
        intent: ControlIntent::Attract { point },
    });
    let mut snapshot = FrameSnapshot::default();
    for _ in 0..150 {
        snapshot = engine.tick();
    }
    let drones: Vec<_> = snapshot
        .entities
        .iter()
        .filter(|e| matches!(e.role, EntityRole::Drone { .. }))
        .collect();
    assert!(!drones.is_empty());
    for drone in drones {
        assert!(drone.transform.position.distance(point) < 150.0);
    }
}

#[test]
fn test_drones_removed_with_owner() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    let player = engine.spawn_player("overseer", HOME).unwrap();
    engine.queue_command(PlayerCommand::SetFiring { held: true });
    for _ in 0..60 {
        engine.tick();
    }
    let entity = entity_of(player).unwrap();
    engine.world_mut().get::<&mut Health>(entity).unwrap().current = 0.0;
    engine.tick();
    let snapshot = engine.tick();
    assert!(snapshot.player.is_none());
    assert!(!snapshot
        .entities
        .iter()
        .any(|e| matches!(e.role, EntityRole::Drone { .. })));
    assert!(!snapshot.player_state.alive);
}

// ---- Status effects ----

#[test]
fn test_burn_scenario_loses_exactly_dps_times_duration() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.spawn_player("basic", HOME).unwrap();
    engine.queue_command(PlayerCommand::ApplyStatus {
        kind: StatusKind::Burn,
        magnitude: 5.0,
        duration_secs: 2.0,
        extend: false,
    });
    let mut snapshot = FrameSnapshot::default();
    let mut last_remaining = f64::INFINITY;
    for _ in 0..60 {
        snapshot = engine.tick();
        if let Some(burn) = player_view(&snapshot).status.get(StatusKind::Burn) {
            assert!(burn.remaining_secs < last_remaining);
            last_remaining = burn.remaining_secs;
        }
    }
    let view = player_view(&snapshot);
    assert!((view.max_health - view.health - 10.0).abs() < 1e-9);
    assert!(view.status.is_empty());
    assert!(snapshot.events.iter().any(|e| matches!(
        e,
        SimEvent::StatusExpired {
            kind: StatusKind::Burn,
            ..
        }
    )));

    for _ in 0..10 {
        snapshot = engine.tick();
        assert!(player_view(&snapshot).status.is_empty());
    }
}

#[test]
fn test_burn_after_idle_period_is_not_offset_by_regen() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.spawn_player("basic", HOME).unwrap();
    for _ in 0..200 {
        engine.tick();
    }
    engine.queue_command(PlayerCommand::ApplyStatus {
        kind: StatusKind::Burn,
        magnitude: 5.0,
        duration_secs: 2.0,
        extend: false,
    });
    let mut snapshot = FrameSnapshot::default();
    for _ in 0..60 {
        snapshot = engine.tick();
    }
    let view = player_view(&snapshot);
    assert!(view.status.is_empty());
    assert!((view.max_health - view.health - 10.0).abs() < 1e-9);

    // Burn restarts the regen delay.
    for _ in 0..30 {
        snapshot = engine.tick();
    }
    let view = player_view(&snapshot);
    assert!((view.max_health - view.health - 10.0).abs() < 1e-9);
}

#[test]
fn test_active_skill_applies_and_cools_down() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.spawn_player("juggernaut", HOME).unwrap();
    engine.queue_command(PlayerCommand::ActivateSkill);
    let snapshot = engine.tick();
    let fortify = player_view(&snapshot).status.get(StatusKind::Fortify).copied();
    assert!(fortify.is_some());
    assert!(snapshot.player_state.skill_ready < 1.0);

    engine.queue_command(PlayerCommand::ActivateSkill);
    let snapshot = engine.tick();
    let again = player_view(&snapshot).status.get(StatusKind::Fortify).unwrap();
    assert!(again.remaining_secs < fortify.unwrap().remaining_secs);
}

#[test]
fn test_regen_waits_for_delay() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    let player = engine.spawn_player("basic", HOME).unwrap();
    let entity = entity_of(player).unwrap();
    engine.world_mut().get::<&mut Health>(entity).unwrap().current = 50.0;

    let mut snapshot = FrameSnapshot::default();
    for _ in 0..140 {
        snapshot = engine.tick();
    }
    assert!((player_view(&snapshot).health - 50.0).abs() < 1e-9);
    for _ in 0..60 {
        snapshot = engine.tick();
    }
    assert!(player_view(&snapshot).health > 50.0);
}

#[test]
fn test_stealth_fades_while_idle() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.spawn_player("phantom", HOME).unwrap();
    let mut snapshot = FrameSnapshot::default();
    for _ in 0..90 {
        snapshot = engine.tick();
    }
    assert!((player_view(&snapshot).visual.opacity - STEALTH_MIN_OPACITY).abs() < 1e-9);

    engine.queue_command(PlayerCommand::Move {
        direction: DVec2::X,
    });
    let snapshot = engine.tick();
    assert!((player_view(&snapshot).visual.opacity - 1.0).abs() < 1e-9);
}

// ---- Combat ----

fn duel(player_class: &str, enemy_class: &str) -> (ArenaEngine, EntityId, EntityId) {
    let mut engine = ArenaEngine::new(SimConfig::default());
    let player = engine.spawn_player(player_class, HOME).unwrap();
    let enemy = engine
        .spawn_tank(enemy_class, HOME + DVec2::new(150.0, 0.0), 1, "target")
        .unwrap();
    engine.queue_command(PlayerCommand::Aim { rotation: 0.0 });
    engine.queue_command(PlayerCommand::SetFiring { held: true });
    (engine, player, enemy)
}

#[test]
fn test_bullets_damage_and_flash_hostiles() {
    let (mut engine, player, enemy) = duel("basic", "basic");
    let mut flashed = false;
    let mut hit = false;
    let mut snapshot = FrameSnapshot::default();
    for _ in 0..60 {
        snapshot = engine.tick();
        hit |= snapshot.events.iter().any(|e| matches!(
            e,
            SimEvent::Hit { target, source, .. } if *target == enemy && *source == Some(player)
        ));
        if let Some(view) = snapshot.entity(enemy) {
            flashed |= view.visual.flash_secs > 0.0;
        }
    }
    assert!(hit);
    assert!(flashed);
    let view = snapshot.entity(enemy).unwrap();
    assert!(view.health < view.max_health);
    assert!(snapshot
        .entities
        .iter()
        .any(|e| matches!(e.role, EntityRole::FloatingText { .. })));
}

#[test]
fn test_contact_damage_text_is_batched() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.spawn_player("basic", HOME).unwrap();
    engine
        .spawn_tank("basic", HOME + DVec2::new(10.0, 0.0), 1, "rammer")
        .unwrap();
    let texts = |engine: &ArenaEngine| {
        engine
            .world()
            .query::<&EntityRole>()
            .iter()
            .filter(|(_, role)| matches!(role, EntityRole::FloatingText { .. }))
            .count()
    };

    let snapshot = engine.tick();
    let hits = snapshot
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::Hit { .. }))
        .count();
    assert!(hits >= 2);
    assert_eq!(texts(&engine), 0);

    for _ in 0..29 {
        engine.tick();
    }
    let shown = texts(&engine);
    assert!(shown >= 2);
    assert!(shown <= 8);
}

#[test]
fn test_same_team_is_never_damaged() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.spawn_player("basic", HOME).unwrap();
    let ally = engine
        .spawn_tank("basic", HOME + DVec2::new(150.0, 0.0), 0, "ally")
        .unwrap();
    engine.queue_command(PlayerCommand::SetFiring { held: true });
    let mut snapshot = FrameSnapshot::default();
    for _ in 0..60 {
        snapshot = engine.tick();
    }
    let view = snapshot.entity(ally).unwrap();
    assert!((view.health - view.max_health).abs() < 1e-9);
}

#[test]
fn test_thermal_hits_apply_burn() {
    let (mut engine, _player, enemy) = duel("pyro", "basic");
    let mut burned = false;
    for _ in 0..60 {
        let snapshot = engine.tick();
        burned |= snapshot
            .entity(enemy)
            .is_some_and(|e| e.status.has(StatusKind::Burn));
    }
    assert!(burned);
}

#[test]
fn test_cryo_hits_apply_slow() {
    let (mut engine, _player, enemy) = duel("cryo_lancer", "basic");
    let mut slowed = false;
    for _ in 0..60 {
        let snapshot = engine.tick();
        slowed |= snapshot
            .entity(enemy)
            .and_then(|e| e.status.magnitude(StatusKind::Slow))
            .is_some_and(|m| (m - SLOW_MULTIPLIER).abs() < 1e-10);
    }
    assert!(slowed);
}

#[test]
fn test_thorns_reflect_damage() {
    let (mut engine, player, _enemy) = duel("basic", "smasher");
    let mut snapshot = FrameSnapshot::default();
    for _ in 0..60 {
        snapshot = engine.tick();
    }
    let view = snapshot.entity(player).unwrap();
    assert!(view.health < view.max_health);
}

#[test]
fn test_kill_awards_score_and_leader() {
    let (mut engine, player, enemy) = duel("basic", "basic");
    let entity = entity_of(enemy).unwrap();
    engine.world_mut().get::<&mut Health>(entity).unwrap().current = 1.0;

    let mut destroyed = false;
    let mut shockwave = false;
    let mut snapshot = FrameSnapshot::default();
    for _ in 0..60 {
        snapshot = engine.tick();
        destroyed |= snapshot.events.iter().any(|e| matches!(
            e,
            SimEvent::Destroyed { entity, killer } if *entity == enemy && *killer == Some(player)
        ));
        shockwave |= snapshot.entities.iter().any(|e| {
            matches!(
                e.role,
                EntityRole::Particle {
                    kind: ParticleKind::Shockwave,
                    ..
                }
            )
        });
    }
    assert!(destroyed);
    assert!(shockwave);
    assert!(snapshot.entity(enemy).is_none());
    assert!((snapshot.player_state.score - KILL_SCORE_BASE).abs() < 1e-9);
}

#[test]
fn test_leader_is_top_scorer() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.spawn_player("basic", HOME).unwrap();
    let low = engine.spawn_tank("basic", DVec2::new(200.0, 200.0), 1, "low").unwrap();
    let high = engine.spawn_tank("basic", DVec2::new(3000.0, 200.0), 2, "high").unwrap();
    for (id, score) in [(low, 10.0), (high, 500.0)] {
        let entity = entity_of(id).unwrap();
        engine.world_mut().get::<&mut Score>(entity).unwrap().0 = score;
    }
    let snapshot = engine.tick();
    assert_eq!(
        snapshot.player_state.leader_position,
        Some(DVec2::new(3000.0, 200.0))
    );
}

// ---- Lifecycle / snapshot ----

#[test]
fn test_bullets_expire() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.spawn_player("basic", HOME).unwrap();
    engine.queue_command(PlayerCommand::SetFiring { held: true });
    engine.tick();
    engine.queue_command(PlayerCommand::SetFiring { held: false });
    let mut snapshot = engine.tick();
    assert!(snapshot
        .entities
        .iter()
        .any(|e| matches!(e.role, EntityRole::Bullet { .. })));
    for _ in 0..(BULLET_LIFESPAN_SECS * TICK_RATE as f64) as usize + 2 {
        snapshot = engine.tick();
    }
    assert!(!snapshot
        .entities
        .iter()
        .any(|e| matches!(e.role, EntityRole::Bullet { .. })));
}

#[test]
fn test_arena_snapshot_round_trip() {
    let mut engine = ArenaEngine::new(SimConfig::default());
    engine.populate_arena("overseer").unwrap();
    engine.queue_command(PlayerCommand::SetFiring { held: true });
    let mut snapshot = FrameSnapshot::default();
    for _ in 0..30 {
        snapshot = engine.tick();
    }
    let registry = engine.registry();
    for view in &snapshot.entities {
        if let Some(config) = view.class_id.as_deref().and_then(|id| registry.get(id)) {
            assert!(view.barrels.is_consistent(config.barrel_count()));
        }
    }
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.entities.len(), snapshot.entities.len());
    assert!(back.player().is_some());
}
