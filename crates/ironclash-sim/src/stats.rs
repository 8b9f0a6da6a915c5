//! Stat queries: class multipliers combined with passive skills and
//! active status effects.
//!
//! Every query is a pure function of the configuration and the effect list,
//! so systems and the snapshot builder read the same numbers.

use ironclash_core::components::StatusEffects;
use ironclash_core::config::{PassiveSkill, TankConfiguration};
use ironclash_core::constants::*;
use ironclash_core::enums::StatusKind;

/// Shots per base reload interval.
pub fn rate_of_fire(config: &TankConfiguration, status: &StatusEffects) -> f64 {
    let overclock = status.magnitude(StatusKind::Overclock).unwrap_or(1.0);
    config.stats.reload * overclock
}

/// Seconds between shots of one barrel, excluding its phase delay.
pub fn reload_secs(config: &TankConfiguration, status: &StatusEffects) -> f64 {
    BASE_RELOAD_SECS / rate_of_fire(config, status).max(MIN_RATE_OF_FIRE)
}

pub fn move_speed(config: &TankConfiguration, status: &StatusEffects) -> f64 {
    let swift = match config.passive_skill {
        Some(PassiveSkill::Swift { multiplier }) => multiplier,
        _ => 1.0,
    };
    let slow = status.magnitude(StatusKind::Slow).unwrap_or(1.0);
    let haste = status.magnitude(StatusKind::Haste).unwrap_or(1.0);
    (config.stats.move_speed * swift * slow * haste).max(0.0)
}

/// Health regenerated per second once the regen delay has passed.
pub fn regen_rate(config: &TankConfiguration, max_health: f64) -> f64 {
    let regenerator = match config.passive_skill {
        Some(PassiveSkill::Regenerator { multiplier }) => multiplier,
        _ => 1.0,
    };
    (max_health * BASE_REGEN_FRACTION * config.stats.regen * regenerator).max(0.0)
}

pub fn field_of_view(config: &TankConfiguration) -> f64 {
    let eagle_eye = match config.passive_skill {
        Some(PassiveSkill::EagleEye { multiplier }) => multiplier,
        _ => 1.0,
    };
    (config.stats.fov * eagle_eye).max(0.1)
}

/// Multiplier on incoming damage; fortify reduces it.
pub fn damage_taken_multiplier(status: &StatusEffects) -> f64 {
    let fortify = status.magnitude(StatusKind::Fortify).unwrap_or(0.0);
    1.0 - fortify.clamp(0.0, FORTIFY_MAX_REDUCTION)
}

pub fn max_health(config: &TankConfiguration) -> f64 {
    BASE_TANK_HEALTH * config.stats.max_health.max(0.01)
}

pub fn bullet_speed(config: &TankConfiguration) -> f64 {
    BULLET_BASE_SPEED * config.stats.bullet_speed
}

pub fn bullet_damage(config: &TankConfiguration) -> f64 {
    BULLET_BASE_DAMAGE * config.stats.damage
}

pub fn bullet_penetration(config: &TankConfiguration) -> f64 {
    BULLET_BASE_PENETRATION * config.stats.penetration.max(1.0)
}

/// Fraction of dealt damage returned to the attacker as health.
pub fn lifesteal_fraction(config: &TankConfiguration) -> f64 {
    match config.passive_skill {
        Some(PassiveSkill::Lifesteal { fraction }) => fraction.clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// Fraction of taken damage reflected to the attacker.
pub fn thorns_fraction(config: &TankConfiguration) -> f64 {
    match config.passive_skill {
        Some(PassiveSkill::Thorns { fraction }) => fraction.clamp(0.0, 1.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironclash_core::components::StatusEffect;
    use ironclash_core::config::StatMultipliers;

    fn effect(kind: StatusKind, magnitude: f64) -> StatusEffect {
        StatusEffect {
            kind,
            remaining_secs: 1.0,
            source: None,
            magnitude,
        }
    }

    #[test]
    fn test_status_and_passive_compose() {
        let config = TankConfiguration {
            passive_skill: Some(PassiveSkill::Swift { multiplier: 1.5 }),
            stats: StatMultipliers {
                move_speed: 2.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut status = StatusEffects::default();
        assert!((move_speed(&config, &status) - 3.0).abs() < 1e-10);

        status.apply(effect(StatusKind::Slow, 0.5));
        assert!((move_speed(&config, &status) - 1.5).abs() < 1e-10);

        status.apply(effect(StatusKind::Haste, 2.0));
        assert!((move_speed(&config, &status) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_overclock_shortens_reload() {
        let config = TankConfiguration::default();
        let mut status = StatusEffects::default();
        assert!((reload_secs(&config, &status) - BASE_RELOAD_SECS).abs() < 1e-10);
        status.apply(effect(StatusKind::Overclock, 2.0));
        assert!((reload_secs(&config, &status) - BASE_RELOAD_SECS / 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_reload_stat_is_bounded() {
        let config = TankConfiguration {
            stats: StatMultipliers {
                reload: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let reload = reload_secs(&config, &StatusEffects::default());
        assert!(reload.is_finite());
        assert!((reload - BASE_RELOAD_SECS / MIN_RATE_OF_FIRE).abs() < 1e-10);
    }

    #[test]
    fn test_fortify_is_capped() {
        let mut status = StatusEffects::default();
        assert!((damage_taken_multiplier(&status) - 1.0).abs() < 1e-10);
        status.apply(effect(StatusKind::Fortify, 0.25));
        assert!((damage_taken_multiplier(&status) - 0.75).abs() < 1e-10);
        status.apply(effect(StatusKind::Fortify, 5.0));
        assert!((damage_taken_multiplier(&status) - (1.0 - FORTIFY_MAX_REDUCTION)).abs() < 1e-10);
    }

    #[test]
    fn test_regen_and_fov_passives() {
        let config = TankConfiguration {
            passive_skill: Some(PassiveSkill::Regenerator { multiplier: 2.0 }),
            ..Default::default()
        };
        assert!((regen_rate(&config, 100.0) - 100.0 * BASE_REGEN_FRACTION * 2.0).abs() < 1e-10);
        assert!((field_of_view(&config) - 1.0).abs() < 1e-10);

        let scout = TankConfiguration {
            passive_skill: Some(PassiveSkill::EagleEye { multiplier: 1.25 }),
            ..Default::default()
        };
        assert!((field_of_view(&scout) - 1.25).abs() < 1e-10);
        assert_eq!(lifesteal_fraction(&scout), 0.0);
    }
}
