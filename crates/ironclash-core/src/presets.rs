//! Built-in tank classes and boss weapon layouts.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::DVec2;

use crate::config::*;
use crate::enums::*;

/// Class every new tank starts as.
pub const DEFAULT_CLASS: &str = "basic";

/// Registry with every built-in class and the four boss classes.
pub fn builtin_registry() -> ConfigRegistry {
    let mut registry = ConfigRegistry::new();
    registry.insert("basic", basic());
    registry.insert("twin", twin());
    registry.insert("triple_shot", triple_shot());
    registry.insert("sniper", sniper());
    registry.insert("railgun", railgun());
    registry.insert("machine_gun", machine_gun());
    registry.insert("overseer", overseer());
    registry.insert("trapper", trapper());
    registry.insert("auto_gunner", auto_gunner());
    registry.insert("rocketeer", rocketeer());
    registry.insert("plasma_caster", plasma_caster());
    registry.insert("cryo_lancer", cryo_lancer());
    registry.insert("pyro", pyro());
    registry.insert("splitter", splitter());
    registry.insert("smasher", smasher());
    registry.insert("sawblade", sawblade());
    registry.insert("juggernaut", juggernaut());
    registry.insert("phantom", phantom());
    for archetype in BossArchetype::ALL {
        registry.insert(archetype.class_id(), boss_configuration(archetype));
    }
    registry
}

fn named(name: &str) -> TankConfiguration {
    TankConfiguration {
        name: name.to_string(),
        ..Default::default()
    }
}

fn basic() -> TankConfiguration {
    TankConfiguration {
        barrels: vec![Barrel::default()],
        ..named("Basic")
    }
}

fn twin() -> TankConfiguration {
    let side = |y: f64, delay: f64| Barrel {
        offset: DVec2::new(0.0, y),
        width: 0.7,
        delay,
        ..Barrel::default()
    };
    TankConfiguration {
        barrels: vec![side(-0.45, 0.0), side(0.45, 0.3)],
        ..named("Twin")
    }
}

fn triple_shot() -> TankConfiguration {
    let spoke = |angle: f64, delay: f64| Barrel {
        angle,
        width: 0.7,
        delay,
        ..Barrel::default()
    };
    TankConfiguration {
        barrels: vec![spoke(0.0, 0.0), spoke(0.35, 0.2), spoke(-0.35, 0.4)],
        ..named("Triple Shot")
    }
}

fn sniper() -> TankConfiguration {
    TankConfiguration {
        barrels: vec![Barrel {
            length: 2.5,
            width: 0.7,
            shape: BarrelShape::Tapered,
            material: BarrelMaterial::Carbon,
            ammo_visual: AmmoVisual::ArmorPiercing,
            recoil: 3.0,
            spread: 0.0,
            damage: 1.6,
            ..Barrel::default()
        }],
        stats: StatMultipliers {
            bullet_speed: 1.6,
            reload: 0.6,
            fov: 1.3,
            ..Default::default()
        },
        ..named("Sniper")
    }
}

fn railgun() -> TankConfiguration {
    TankConfiguration {
        barrels: vec![Barrel {
            length: 2.6,
            width: 0.6,
            shape: BarrelShape::Tapered,
            material: BarrelMaterial::Crystal,
            behavior: BarrelBehavior::Hitscan,
            ammo_type: AmmoType::Energy,
            charge_time: 1.0,
            recoil: 4.0,
            spread: 0.0,
            damage: 3.0,
            ..Barrel::default()
        }],
        stats: StatMultipliers {
            reload: 0.5,
            fov: 1.2,
            ..Default::default()
        },
        ..named("Railgun")
    }
}

fn machine_gun() -> TankConfiguration {
    TankConfiguration {
        barrels: vec![Barrel {
            shape: BarrelShape::Flared,
            width: 1.0,
            spread: 0.7,
            recoil: 0.6,
            damage: 0.7,
            ..Barrel::default()
        }],
        stats: StatMultipliers {
            reload: 2.0,
            ..Default::default()
        },
        ..named("Machine Gun")
    }
}

fn overseer() -> TankConfiguration {
    let spawner = |angle: f64| Barrel {
        angle,
        length: 1.4,
        width: 0.9,
        shape: BarrelShape::Flared,
        recoil: 0.0,
        spread: 0.0,
        specialization: Some(Specialization::DroneSpawner { max_drones: 4 }),
        ..Barrel::default()
    };
    TankConfiguration {
        barrels: vec![spawner(FRAC_PI_2), spawner(-FRAC_PI_2)],
        outline: OutlineKind::Circle,
        ..named("Overseer")
    }
}

fn trapper() -> TankConfiguration {
    TankConfiguration {
        barrels: vec![Barrel {
            length: 1.5,
            width: 0.8,
            ammo_visual: AmmoVisual::Standard,
            spread: 0.0,
            specialization: Some(Specialization::TrapLayer),
            ..Barrel::default()
        }],
        ..named("Trapper")
    }
}

fn auto_gunner() -> TankConfiguration {
    let turret = |angle: f64, delay: f64| Barrel {
        angle,
        length: 1.2,
        width: 0.5,
        material: BarrelMaterial::Carbon,
        delay,
        recoil: 0.2,
        specialization: Some(Specialization::AutoTurret),
        ..Barrel::default()
    };
    TankConfiguration {
        barrels: vec![
            turret(FRAC_PI_4, 0.0),
            turret(3.0 * FRAC_PI_4, 0.15),
            turret(-3.0 * FRAC_PI_4, 0.3),
            turret(-FRAC_PI_4, 0.45),
        ],
        ..named("Auto Gunner")
    }
}

fn rocketeer() -> TankConfiguration {
    TankConfiguration {
        barrels: vec![Barrel {
            width: 1.0,
            ammo_visual: AmmoVisual::Missile,
            ammo_type: AmmoType::Explosive,
            recoil: 2.0,
            damage: 1.5,
            ..Barrel::default()
        }],
        stats: StatMultipliers {
            reload: 0.7,
            bullet_speed: 0.8,
            ..Default::default()
        },
        ..named("Rocketeer")
    }
}

fn plasma_caster() -> TankConfiguration {
    TankConfiguration {
        barrels: vec![Barrel {
            material: BarrelMaterial::Plasma,
            ammo_visual: AmmoVisual::Plasma,
            ammo_type: AmmoType::Energy,
            charge_time: 0.5,
            damage: 1.4,
            ..Barrel::default()
        }],
        passive_skill: Some(PassiveSkill::Lifesteal { fraction: 0.15 }),
        ..named("Plasma Caster")
    }
}

fn cryo_lancer() -> TankConfiguration {
    TankConfiguration {
        barrels: vec![Barrel {
            length: 2.1,
            material: BarrelMaterial::Crystal,
            shape: BarrelShape::Tapered,
            ammo_visual: AmmoVisual::Cryo,
            ammo_type: AmmoType::Cryogenic,
            ..Barrel::default()
        }],
        outline: OutlineKind::Star,
        visual: VisualOverrides {
            body_color: Some("#7fd8f0".to_string()),
            ..Default::default()
        },
        ..named("Cryo Lancer")
    }
}

fn pyro() -> TankConfiguration {
    TankConfiguration {
        barrels: vec![Barrel {
            shape: BarrelShape::Flared,
            ammo_visual: AmmoVisual::Incendiary,
            ammo_type: AmmoType::Thermal,
            spread: 0.5,
            ..Barrel::default()
        }],
        outline: OutlineKind::Heart,
        active_skill: Some(ActiveSkill {
            effect: StatusKind::Overclock,
            magnitude: 1.5,
            duration_secs: 3.0,
            cooldown_secs: 12.0,
        }),
        ..named("Pyro")
    }
}

fn splitter() -> TankConfiguration {
    TankConfiguration {
        barrels: vec![Barrel {
            ammo_visual: AmmoVisual::NanoSplitter,
            ..Barrel::default()
        }],
        outline: OutlineKind::Pentagon,
        ..named("Splitter")
    }
}

fn smasher() -> TankConfiguration {
    TankConfiguration {
        barrels: Vec::new(),
        outline: OutlineKind::Hexagon,
        stats: StatMultipliers {
            body_damage: 2.0,
            move_speed: 1.2,
            ..Default::default()
        },
        passive_skill: Some(PassiveSkill::Thorns { fraction: 0.3 }),
        visual: VisualOverrides {
            treads: true,
            ..Default::default()
        },
        hidden_stats: vec![
            StatKind::BulletSpeed,
            StatKind::BulletPenetration,
            StatKind::BulletDamage,
            StatKind::Reload,
        ],
        stat_cap: Some(10),
        ..named("Smasher")
    }
}

fn sawblade() -> TankConfiguration {
    TankConfiguration {
        outline: OutlineKind::Spiked,
        stats: StatMultipliers {
            body_damage: 2.5,
            ..Default::default()
        },
        active_skill: Some(ActiveSkill {
            effect: StatusKind::Haste,
            magnitude: 1.6,
            duration_secs: 2.0,
            cooldown_secs: 8.0,
        }),
        ..named("Sawblade")
    }
}

fn juggernaut() -> TankConfiguration {
    TankConfiguration {
        barrels: vec![Barrel {
            width: 1.1,
            ammo_visual: AmmoVisual::HighExplosive,
            ammo_type: AmmoType::Explosive,
            recoil: 2.5,
            damage: 2.0,
            ..Barrel::default()
        }],
        outline: OutlineKind::Octagon,
        stats: StatMultipliers {
            max_health: 1.8,
            move_speed: 0.8,
            reload: 0.6,
            ..Default::default()
        },
        active_skill: Some(ActiveSkill {
            effect: StatusKind::Fortify,
            magnitude: 0.5,
            duration_secs: 4.0,
            cooldown_secs: 15.0,
        }),
        visual: VisualOverrides {
            treads: true,
            ..Default::default()
        },
        ..named("Juggernaut")
    }
}

fn phantom() -> TankConfiguration {
    TankConfiguration {
        barrels: vec![Barrel {
            material: BarrelMaterial::Gold,
            ..Barrel::default()
        }],
        outline: OutlineKind::Diamond,
        passive_skill: Some(PassiveSkill::EagleEye { multiplier: 1.25 }),
        visual: VisualOverrides {
            stealth: true,
            ..Default::default()
        },
        ..named("Phantom")
    }
}

/// Configuration used by the simulation for a boss archetype.
pub fn boss_configuration(archetype: BossArchetype) -> TankConfiguration {
    let (name, outline) = match archetype {
        BossArchetype::Summoner => ("Summoner", OutlineKind::Square),
        BossArchetype::Guardian => ("Guardian", OutlineKind::Triangle),
        BossArchetype::FallenBooster => ("Fallen Booster", OutlineKind::Circle),
        BossArchetype::Sentinel => ("Sentinel", OutlineKind::Pentagon),
    };
    TankConfiguration {
        barrels: boss_barrels(archetype),
        outline,
        stats: StatMultipliers {
            max_health: 30.0,
            move_speed: 0.4,
            ..Default::default()
        },
        ..named(name)
    }
}

/// Hand-specified weapon layout for each boss.
pub fn boss_barrels(archetype: BossArchetype) -> Vec<Barrel> {
    match archetype {
        BossArchetype::Summoner => (0..4)
            .map(|i| Barrel {
                angle: i as f64 * FRAC_PI_2,
                length: 1.2,
                width: 0.7,
                shape: BarrelShape::Flared,
                recoil: 0.0,
                spread: 0.0,
                delay: i as f64 * 0.25,
                specialization: Some(Specialization::DroneSpawner { max_drones: 3 }),
                ..Barrel::default()
            })
            .collect(),
        BossArchetype::Guardian => vec![Barrel {
            length: 1.3,
            width: 0.45,
            material: BarrelMaterial::Plasma,
            behavior: BarrelBehavior::Hitscan,
            ammo_type: AmmoType::Energy,
            charge_time: 1.5,
            recoil: 0.0,
            spread: 0.0,
            damage: 2.0,
            ..Barrel::default()
        }],
        // One heavy nose gun and four uneven rear thrusters.
        BossArchetype::FallenBooster => {
            let thruster = |angle: f64, length: f64, delay: f64| Barrel {
                angle,
                length,
                width: 0.5,
                shape: BarrelShape::Flared,
                material: BarrelMaterial::Carbon,
                delay,
                recoil: 0.4,
                ..Barrel::default()
            };
            vec![
                Barrel {
                    length: 1.6,
                    width: 0.6,
                    recoil: 1.5,
                    ..Barrel::default()
                },
                thruster(PI - 0.35, 1.35, 0.1),
                thruster(PI + 0.35, 1.35, 0.2),
                thruster(PI - 0.8, 1.15, 0.3),
                thruster(PI + 0.95, 1.1, 0.4),
            ]
        }
        BossArchetype::Sentinel => [
            (0.0, 1.7, 0.55, AmmoVisual::Standard, BarrelMaterial::Steel),
            (1.1, 1.3, 0.45, AmmoVisual::Missile, BarrelMaterial::Carbon),
            (2.6, 1.2, 0.5, AmmoVisual::Cryo, BarrelMaterial::Crystal),
            (3.7, 1.25, 0.5, AmmoVisual::Incendiary, BarrelMaterial::Gold),
            (5.0, 1.4, 0.4, AmmoVisual::Plasma, BarrelMaterial::Plasma),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (angle, length, width, ammo_visual, material))| Barrel {
            angle,
            length,
            width,
            ammo_visual,
            material,
            delay: i as f64 * 0.12,
            recoil: 0.3,
            ..Barrel::default()
        })
        .collect(),
    }
}
