//! Status effect engine and active skills.
//!
//! Each tick a burn deals `dps * min(dt, remaining)`, then every effect's
//! remaining time drops by `dt`. Effects at or below zero are removed the
//! same tick and only come back through a new application.

use hecs::{Entity, World};

use ironclash_core::components::*;
use ironclash_core::config::ConfigRegistry;
use ironclash_core::constants::TIMER_EPSILON;
use ironclash_core::enums::StatusKind;
use ironclash_core::events::SimEvent;

use crate::systems::combat::record_kill;
use crate::world_setup::{entity_of, id_of};

/// Advance a single effect list. Returns burn damage for this tick and the
/// kinds that expired.
pub fn advance(effects: &mut StatusEffects, dt: f64) -> (f64, Vec<StatusKind>) {
    let mut burn = 0.0;
    for effect in &mut effects.active {
        if effect.kind == StatusKind::Burn {
            burn += effect.magnitude.max(0.0) * dt.min(effect.remaining_secs.max(0.0));
        }
        effect.remaining_secs -= dt;
    }
    let mut expired = Vec::new();
    effects.active.retain(|effect| {
        let alive = effect.remaining_secs > TIMER_EPSILON;
        if !alive {
            expired.push(effect.kind);
        }
        alive
    });
    (burn, expired)
}

pub fn run(world: &mut World, events: &mut Vec<SimEvent>, dt: f64) {
    let mut kills: Vec<(Entity, Option<Entity>, f64)> = Vec::new();

    for (entity, (effects, health, regen)) in
        world.query_mut::<(&mut StatusEffects, &mut Health, Option<&mut RegenTimer>)>()
    {
        let burner = effects
            .get(StatusKind::Burn)
            .and_then(|e| e.source)
            .and_then(entity_of);
        let (burn, expired) = advance(effects, dt);

        if burn > 0.0 && !health.is_dead() {
            health.current = (health.current - burn).max(0.0);
            if let Some(regen) = regen {
                regen.since_damage_secs = 0.0;
            }
            if health.is_dead() {
                kills.push((entity, burner, health.max));
            }
        }
        for kind in expired {
            events.push(SimEvent::StatusExpired {
                target: id_of(entity),
                kind,
            });
        }
    }

    for (victim, killer, max) in kills {
        let killer = killer.filter(|k| world.contains(*k));
        record_kill(world, victim, killer, max, events);
    }
}

/// Count down active-skill cooldowns.
pub fn tick_skills(world: &mut World, dt: f64) {
    for (_entity, skill) in world.query_mut::<&mut SkillState>() {
        skill.cooldown_secs = (skill.cooldown_secs - dt).max(0.0);
    }
}

/// Trigger the active skill of `entity`. Returns `false` when the class has
/// none or it is still cooling down.
pub fn activate_skill(
    world: &mut World,
    registry: &ConfigRegistry,
    entity: Entity,
    events: &mut Vec<SimEvent>,
) -> bool {
    let Ok((class, skill, effects)) =
        world.query_one_mut::<(&ClassId, &mut SkillState, &mut StatusEffects)>(entity)
    else {
        return false;
    };
    let Some(active) = registry.get(&class.0).and_then(|c| c.active_skill) else {
        return false;
    };
    if skill.cooldown_secs > TIMER_EPSILON {
        return false;
    }
    skill.cooldown_secs = active.cooldown_secs.max(0.0);
    effects.apply(StatusEffect {
        kind: active.effect,
        remaining_secs: active.duration_secs,
        source: Some(id_of(entity)),
        magnitude: active.magnitude,
    });
    events.push(SimEvent::StatusApplied {
        target: id_of(entity),
        kind: active.effect,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_strictly_decreases_then_removed() {
        let mut effects = StatusEffects::default();
        effects.apply(StatusEffect {
            kind: StatusKind::Haste,
            remaining_secs: 0.1,
            source: None,
            magnitude: 1.5,
        });
        let dt = 1.0 / 30.0;
        let mut last = 0.1;
        let mut ticks = 0;
        while effects.has(StatusKind::Haste) {
            let (_, expired) = advance(&mut effects, dt);
            ticks += 1;
            if let Some(effect) = effects.get(StatusKind::Haste) {
                assert!(effect.remaining_secs < last);
                last = effect.remaining_secs;
                assert!(expired.is_empty());
            } else {
                assert_eq!(expired, vec![StatusKind::Haste]);
            }
            assert!(ticks < 100);
        }
        assert_eq!(ticks, 3);
    }

    #[test]
    fn test_burn_totals_dps_times_duration() {
        let mut effects = StatusEffects::default();
        effects.apply(StatusEffect {
            kind: StatusKind::Burn,
            remaining_secs: 2.0,
            source: None,
            magnitude: 5.0,
        });
        let mut total = 0.0;
        for _ in 0..90 {
            total += advance(&mut effects, 1.0 / 30.0).0;
        }
        assert!((total - 10.0).abs() < 1e-9);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_partial_last_tick_burn() {
        let mut effects = StatusEffects::default();
        effects.apply(StatusEffect {
            kind: StatusKind::Burn,
            remaining_secs: 0.05,
            source: None,
            magnitude: 10.0,
        });
        let (first, _) = advance(&mut effects, 0.04);
        let (second, expired) = advance(&mut effects, 0.04);
        assert!((first - 0.4).abs() < 1e-10);
        assert!((second - 0.1).abs() < 1e-10);
        assert_eq!(expired, vec![StatusKind::Burn]);
    }
}
