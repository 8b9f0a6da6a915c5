//! Arena engine: owns the hecs world, processes player commands, runs all
//! systems and produces `FrameSnapshot`s. Completely headless, so the same
//! seed always replays the same arena.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, World};
use log::{debug, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ironclash_core::commands::PlayerCommand;
use ironclash_core::components::*;
use ironclash_core::config::{ConfigError, ConfigRegistry};
use ironclash_core::constants::*;
use ironclash_core::enums::{BossArchetype, ParticleKind};
use ironclash_core::events::SimEvent;
use ironclash_core::presets;
use ironclash_core::state::FrameSnapshot;
use ironclash_core::types::{EntityId, SimTime, Transform};

use crate::systems;
use crate::world_setup::{self, entity_of, id_of};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Simulated seconds per real second (1.0 = normal, 0.0 = frozen).
    pub time_scale: f64,
    /// Side length of the square arena.
    pub world_size: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            world_size: WORLD_SIZE,
        }
    }
}

/// The arena engine. Owns the ECS world and all sim state.
pub struct ArenaEngine {
    world: World,
    time: SimTime,
    time_scale: f64,
    world_size: f64,
    rng: ChaCha8Rng,
    registry: ConfigRegistry,
    player: Option<Entity>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl ArenaEngine {
    /// Engine with the built-in class registry and an empty world.
    pub fn new(config: SimConfig) -> Self {
        Self::with_registry(config, presets::builtin_registry())
    }

    pub fn with_registry(config: SimConfig, registry: ConfigRegistry) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            time_scale: config.time_scale.max(0.0),
            world_size: config.world_size.max(1.0),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            registry: registry.sanitized(),
            player: None,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Fill the world with the demo arena and make the player a `player_class`.
    pub fn populate_arena(&mut self, player_class: &str) -> Result<EntityId, ConfigError> {
        let player = world_setup::populate_arena(
            &mut self.world,
            &self.registry,
            &mut self.rng,
            self.world_size,
            player_class,
        )?;
        self.player = Some(player);
        Ok(id_of(player))
    }

    /// Spawn the locally controlled tank. Replaces the previous player marker.
    pub fn spawn_player(&mut self, class_id: &str, position: DVec2) -> Result<EntityId, ConfigError> {
        let entity =
            world_setup::spawn_tank(&mut self.world, &self.registry, class_id, position, 0, "You")?;
        if let Some(previous) = self.player.take() {
            let _ = self.world.remove_one::<Player>(previous);
        }
        let _ = self.world.insert_one(entity, Player);
        self.player = Some(entity);
        Ok(id_of(entity))
    }

    pub fn spawn_tank(
        &mut self,
        class_id: &str,
        position: DVec2,
        team: u32,
        name: &str,
    ) -> Result<EntityId, ConfigError> {
        world_setup::spawn_tank(&mut self.world, &self.registry, class_id, position, team, name)
            .map(id_of)
    }

    pub fn spawn_boss(&mut self, archetype: BossArchetype, position: DVec2, team: u32) -> EntityId {
        id_of(world_setup::spawn_boss(
            &mut self.world,
            &self.registry,
            archetype,
            position,
            team,
        ))
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance one fixed tick (scaled by the time scale) and snapshot.
    pub fn tick(&mut self) -> FrameSnapshot {
        self.advance(DT * self.time_scale)
    }

    /// Advance by `dt` seconds and snapshot.
    pub fn advance(&mut self, dt: f64) -> FrameSnapshot {
        self.process_commands();
        if dt > 0.0 {
            self.run_systems(dt);
            self.time.advance(dt);
        }
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.registry, &self.time, events)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn world_size(&self) -> f64 {
        self.world_size
    }

    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }

    /// Add or replace classes, clamped into range. Entities of a replaced
    /// class are resized.
    pub fn register_classes(&mut self, classes: ConfigRegistry) {
        self.registry.extend(classes.sanitized());
        for (_entity, (class, barrels)) in self.world.query_mut::<(&ClassId, &mut BarrelState)>() {
            if let Some(config) = self.registry.get(&class.0) {
                barrels.reconfigure(config);
            }
        }
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for embedding tools (previews, tests).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
            .filter(|e| self.world.contains(*e))
            .map(id_of)
    }

    /// Apply a status effect to any entity. `extend` re-applies instead of replacing.
    pub fn apply_status(&mut self, target: EntityId, effect: StatusEffect, extend: bool) -> bool {
        let Some(entity) = entity_of(target) else {
            return false;
        };
        let Ok(mut effects) = self.world.get::<&mut StatusEffects>(entity) else {
            return false;
        };
        if extend {
            effects.reapply(effect);
        } else {
            effects.apply(effect);
        }
        self.events.push(SimEvent::StatusApplied {
            target,
            kind: effect.kind,
        });
        true
    }

    /// Switch any combatant to another class.
    pub fn change_class(&mut self, target: EntityId, class_id: &str) -> Result<(), ConfigError> {
        let Some(entity) = entity_of(target).filter(|e| self.world.contains(*e)) else {
            return Ok(());
        };
        world_setup::apply_configuration(&mut self.world, &self.registry, entity, class_id)?;
        let (position, radius) = self
            .world
            .get::<&Transform>(entity)
            .map(|t| (t.position, t.radius))
            .unwrap_or_default();
        world_setup::spawn_particle(
            &mut self.world,
            ParticleKind::TeleportFlash,
            position,
            DVec2::ZERO,
            radius * 1.5,
            DEBRIS_LIFESPAN_SECS,
        );
        self.events.push(SimEvent::ClassChanged {
            entity: target,
            class_id: class_id.to_string(),
        });
        Ok(())
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        let Some(player) = self.player.filter(|e| self.world.contains(*e)) else {
            debug!("dropping {command:?}: no player");
            return;
        };
        match command {
            PlayerCommand::SetFiring { held } => {
                if let Ok(mut fire) = self.world.get::<&mut FireControl>(player) {
                    fire.held = held;
                }
            }
            PlayerCommand::Aim { rotation } => {
                if let Ok(mut transform) = self.world.get::<&mut Transform>(player) {
                    if rotation.is_finite() {
                        transform.rotation = rotation;
                    }
                }
            }
            PlayerCommand::SetDroneIntent { intent } => {
                if let Ok(mut fire) = self.world.get::<&mut FireControl>(player) {
                    fire.intent = intent;
                }
            }
            PlayerCommand::Move { direction } => {
                if let Ok(mut input) = self.world.get::<&mut MoveInput>(player) {
                    input.direction = if direction.is_finite() {
                        direction
                    } else {
                        DVec2::ZERO
                    };
                }
            }
            PlayerCommand::ChangeClass { class_id } => {
                if let Err(err) = self.change_class(id_of(player), &class_id) {
                    warn!("class change rejected: {err}");
                }
            }
            PlayerCommand::ActivateSkill => {
                if !systems::status::activate_skill(
                    &mut self.world,
                    &self.registry,
                    player,
                    &mut self.events,
                ) {
                    debug!("active skill unavailable");
                }
            }
            PlayerCommand::ApplyStatus {
                kind,
                magnitude,
                duration_secs,
                extend,
            } => {
                let effect = StatusEffect {
                    kind,
                    remaining_secs: duration_secs,
                    source: None,
                    magnitude,
                };
                self.apply_status(id_of(player), effect, extend);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let contacts = systems::targeting::contacts(&self.world);
        // 1. Weapons (cooldown, charge, recoil; collect releases)
        let releases = systems::weapons::run(
            &mut self.world,
            &self.registry,
            &contacts,
            &mut self.rng,
            &mut self.events,
            dt,
        );
        // 2. Resolve releases (bullets, drones, traps, hitscan)
        systems::combat::resolve_releases(
            &mut self.world,
            &self.registry,
            releases,
            &contacts,
            &mut self.rng,
            &mut self.events,
        );
        // 3. Drone steering
        systems::targeting::run(&mut self.world, &contacts, self.time.elapsed_secs, dt);
        // 4. Movement integration
        systems::movement::run(&mut self.world, &self.registry, self.world_size, dt);
        // 5. Projectile and body hits
        systems::combat::run(
            &mut self.world,
            &self.registry,
            &mut self.rng,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        let contacts = systems::targeting::contacts(&self.world);
        systems::combat::contact_damage(
            &mut self.world,
            &self.registry,
            &contacts,
            &mut self.rng,
            &mut self.events,
            dt,
        );
        // 6. Status effects and skills
        systems::status::run(&mut self.world, &mut self.events, dt);
        systems::status::tick_skills(&mut self.world, dt);
        // 7. Regeneration
        systems::regen::run(&mut self.world, &self.registry, dt);
        // 8. Visual timers
        systems::visuals::run(&mut self.world, &self.registry, dt);
        // 9. Cleanup (lifespans, dead, orphans)
        systems::cleanup::run(
            &mut self.world,
            &mut self.rng,
            &mut self.despawn_buffer,
            self.world_size,
            dt,
        );
    }
}
