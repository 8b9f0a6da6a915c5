//! Weapon firing: per-barrel cooldown, charge-up and recoil.
//!
//! Each barrel keeps an independent cooldown. A held trigger fires a barrel
//! once its cooldown reaches zero; the cooldown then resets to the reload
//! interval plus the barrel's phase delay. Released barrels relax toward
//! their delay and never below it, so multi-barrel weapons keep firing
//! round-robin. Charged barrels hold the shot until the trigger has been
//! held for `charge_time` seconds.

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ironclash_core::components::*;
use ironclash_core::config::{Barrel, ConfigRegistry, Specialization};
use ironclash_core::constants::*;
use ironclash_core::enums::BarrelBehavior;
use ironclash_core::events::SimEvent;
use ironclash_core::types::Transform;

use crate::stats;
use crate::systems::targeting::{nearest_hostile, Contact};
use crate::world_setup::{id_of, Shot};

/// Timers of one barrel, borrowed out of a [`BarrelState`].
pub struct BarrelTimers<'a> {
    pub cooldown: &'a mut f64,
    pub charge: &'a mut f64,
    pub recoil: &'a mut f64,
}

/// Advance one barrel by `dt`. Returns `true` when a shot is released.
pub fn step_barrel(
    barrel: &Barrel,
    timers: BarrelTimers<'_>,
    held: bool,
    reload_secs: f64,
    dt: f64,
) -> bool {
    let delay = barrel.delay.max(0.0);
    *timers.recoil *= (-RECOIL_VISUAL_DECAY_RATE * dt).exp();

    if !held {
        *timers.charge = 0.0;
        *timers.cooldown = (*timers.cooldown - dt).max(delay.min(*timers.cooldown));
        return false;
    }

    let mut fired = false;
    if *timers.cooldown <= TIMER_EPSILON {
        if barrel.charge_time > 0.0 {
            *timers.charge = (*timers.charge + dt).clamp(0.0, barrel.charge_time);
            if *timers.charge >= barrel.charge_time - TIMER_EPSILON {
                *timers.charge = 0.0;
                fired = true;
            }
        } else {
            fired = true;
        }
    }

    if fired {
        *timers.cooldown = reload_secs + delay;
        *timers.recoil = barrel.recoil;
    }
    // The firing tick counts toward the next reload.
    *timers.cooldown = (*timers.cooldown - dt).max(0.0);
    fired
}

/// A released shot plus the barrel that produced it.
pub struct Release {
    pub shot: Shot,
    pub behavior: BarrelBehavior,
    pub specialization: Option<Specialization>,
}

/// Advance every combatant's barrels and collect the shots they release.
pub fn run(
    world: &mut World,
    registry: &ConfigRegistry,
    contacts: &[Contact],
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
    dt: f64,
) -> Vec<Release> {
    let mut releases = Vec::new();

    for (entity, (transform, class, state, fire, status, team)) in world.query_mut::<(
        &mut Transform,
        &ClassId,
        &mut BarrelState,
        &FireControl,
        &StatusEffects,
        &Team,
    )>() {
        let Some(config) = registry.get(&class.0) else {
            continue;
        };
        if !state.is_consistent(config.barrel_count()) {
            state.reconfigure(config);
        }
        let reload = stats::reload_secs(config, status);
        let turret_target = nearest_hostile(
            transform.position,
            team.0,
            contacts,
            AUTO_TURRET_RANGE,
        )
        .map(|c| c.position);

        for (index, barrel) in config.barrels.iter().enumerate() {
            let is_turret = barrel.specialization == Some(Specialization::AutoTurret);
            let held = if is_turret {
                turret_target.is_some()
            } else {
                fire.held
            };
            let timers = BarrelTimers {
                cooldown: &mut state.cooldown[index],
                charge: &mut state.charge[index],
                recoil: &mut state.recoil[index],
            };
            if !step_barrel(barrel, timers, held, reload, dt) {
                continue;
            }

            let base_angle = match (is_turret, turret_target) {
                (true, Some(target)) => (target - transform.position).to_angle(),
                _ => transform.rotation + barrel.angle,
            };
            let jitter = (rng.gen::<f64>() - 0.5) * barrel.spread * MAX_SPREAD_ANGLE;
            let direction = DVec2::from_angle(base_angle + jitter);

            let radius = transform.radius;
            let mount = transform.position + DVec2::from_angle(transform.rotation).rotate(barrel.offset * radius);
            let origin = mount + direction * barrel.length * radius;
            let crit = rng.gen_bool(CRIT_CHANCE);
            let damage = stats::bullet_damage(config)
                * barrel.damage
                * if crit { CRIT_MULTIPLIER } else { 1.0 };

            transform.velocity -= direction * barrel.recoil * RECOIL_IMPULSE_SCALE;

            events.push(SimEvent::ShotFired {
                shooter: id_of(entity),
                barrel: index,
                hitscan: barrel.behavior == BarrelBehavior::Hitscan,
            });
            releases.push(Release {
                shot: Shot {
                    owner: entity,
                    team: team.0,
                    barrel: index,
                    origin,
                    direction,
                    radius: barrel.width * radius * BULLET_RADIUS_FRACTION,
                    owner_radius: radius,
                    speed: stats::bullet_speed(config),
                    damage,
                    penetration: stats::bullet_penetration(config),
                    crit,
                    ammo_visual: barrel.ammo_visual,
                    ammo_type: barrel.ammo_type,
                },
                behavior: barrel.behavior,
                specialization: barrel.specialization,
            });
        }
    }
    releases
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(barrel: &Barrel, state: &mut BarrelState, index: usize, held: bool, reload: f64) -> bool {
        step_barrel(
            barrel,
            BarrelTimers {
                cooldown: &mut state.cooldown[index],
                charge: &mut state.charge[index],
                recoil: &mut state.recoil[index],
            },
            held,
            reload,
            DT,
        )
    }

    fn single(barrel: Barrel) -> (Barrel, BarrelState) {
        let state = BarrelState {
            cooldown: vec![barrel.delay],
            charge: vec![0.0],
            recoil: vec![0.0],
        };
        (barrel, state)
    }

    #[test]
    fn test_three_barrel_round_robin() {
        let barrels: Vec<Barrel> = [0.0, 0.2, 0.4]
            .into_iter()
            .map(|delay| Barrel {
                delay,
                ..Barrel::default()
            })
            .collect();
        let mut state = BarrelState {
            cooldown: vec![0.0, 0.2, 0.4],
            charge: vec![0.0; 3],
            recoil: vec![0.0; 3],
        };

        let mut shots: Vec<(u64, usize)> = Vec::new();
        for tick in 0..=30u64 {
            for (i, barrel) in barrels.iter().enumerate() {
                if step(barrel, &mut state, i, true, 1.0) {
                    shots.push((tick, i));
                }
            }
        }
        // Ticks are 1/30 s: 0.2 s = tick 6, 0.4 s = tick 12, reload 1.0 s = tick 30.
        assert_eq!(shots, vec![(0, 0), (6, 1), (12, 2), (30, 0)]);
    }

    #[test]
    fn test_idle_cooldown_relaxes_to_delay() {
        let (barrel, mut state) = single(Barrel {
            delay: 0.3,
            ..Barrel::default()
        });
        state.cooldown[0] = 2.0;
        for _ in 0..300 {
            assert!(!step(&barrel, &mut state, 0, false, 0.6));
        }
        assert!((state.cooldown[0] - 0.3).abs() < 1e-10);

        state.cooldown[0] = 0.1;
        step(&barrel, &mut state, 0, false, 0.6);
        assert!((state.cooldown[0] - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_charge_half_time_reports_half_glow() {
        let (barrel, mut state) = single(Barrel {
            charge_time: 1.0,
            ..Barrel::default()
        });
        for _ in 0..15 {
            assert!(!step(&barrel, &mut state, 0, true, 0.6));
        }
        assert!((state.charge[0] - 0.5).abs() < 1e-9);
        assert!((state.glow(0, &barrel) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_charge_full_time_fires_once() {
        let (barrel, mut state) = single(Barrel {
            charge_time: 1.0,
            ..Barrel::default()
        });
        let mut fired = Vec::new();
        for tick in 0..30 {
            if step(&barrel, &mut state, 0, true, 0.6) {
                fired.push(tick);
            }
            assert!(state.charge[0] >= 0.0 && state.charge[0] <= barrel.charge_time);
        }
        assert_eq!(fired, vec![29]);
        assert_eq!(state.charge[0], 0.0);
    }

    #[test]
    fn test_release_discards_charge() {
        let (barrel, mut state) = single(Barrel {
            charge_time: 1.0,
            ..Barrel::default()
        });
        for _ in 0..20 {
            step(&barrel, &mut state, 0, true, 0.6);
        }
        assert!(state.charge[0] > 0.5);
        step(&barrel, &mut state, 0, false, 0.6);
        assert_eq!(state.charge[0], 0.0);
    }

    #[test]
    fn test_visual_recoil_set_then_decays() {
        let (barrel, mut state) = single(Barrel {
            recoil: 2.0,
            ..Barrel::default()
        });
        assert!(step(&barrel, &mut state, 0, true, 0.6));
        assert!((state.recoil[0] - 2.0).abs() < 1e-10);
        let mut last = state.recoil[0];
        for _ in 0..10 {
            step(&barrel, &mut state, 0, true, 0.6);
            assert!(state.recoil[0] < last);
            last = state.recoil[0];
        }
    }
}
