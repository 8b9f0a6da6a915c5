//! Preview studio: an isolated frame loop around one mock tank.
//!
//! The design tool edits a configuration while it fires in an empty arena.
//! The studio owns its own engine and renderer so nothing leaks into a
//! running match.

use glam::DVec2;
use log::debug;

use ironclash_core::commands::PlayerCommand;
use ironclash_core::config::{ConfigError, ConfigRegistry, TankConfiguration};
use ironclash_core::state::FrameSnapshot;
use ironclash_core::types::{Camera, EntityId};
use ironclash_render::{DrawContext, RenderSettings, Renderer};
use ironclash_sim::{ArenaEngine, SimConfig};

/// Class id the edited configuration is registered under.
pub const PREVIEW_CLASS: &str = "preview";

pub struct PreviewStudio<C: DrawContext> {
    engine: ArenaEngine,
    renderer: Renderer<C>,
    settings: RenderSettings,
    configuration: TankConfiguration,
    mock: EntityId,
    /// Draw mount markers and barrel indices over the tank.
    pub debug_mode: bool,
}

impl<C: DrawContext> PreviewStudio<C> {
    pub fn new(ctx: C, configuration: &TankConfiguration) -> Result<Self, ConfigError> {
        let configuration = configuration.sanitized();
        let mut registry = ConfigRegistry::new();
        registry.insert(PREVIEW_CLASS, configuration.clone());
        let mut engine = ArenaEngine::with_registry(SimConfig::default(), registry);
        let center = DVec2::splat(engine.world_size() * 0.5);
        let mock = engine.spawn_player(PREVIEW_CLASS, center)?;
        let mut renderer = Renderer::new(ctx);
        renderer.set_world_size(engine.world_size());
        Ok(Self {
            engine,
            renderer,
            settings: RenderSettings::default(),
            configuration,
            mock,
            debug_mode: false,
        })
    }

    /// Replace the previewed configuration. Barrel state is resized in place.
    pub fn set_configuration(&mut self, configuration: &TankConfiguration) {
        self.configuration = configuration.sanitized();
        let mut registry = ConfigRegistry::new();
        registry.insert(PREVIEW_CLASS, self.configuration.clone());
        self.engine.register_classes(registry);
        debug!(
            "preview reconfigured with {} barrels",
            self.configuration.barrel_count()
        );
    }

    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings.sanitized();
    }

    pub fn command(&mut self, command: PlayerCommand) {
        self.engine.queue_command(command);
    }

    /// Advance one tick and draw the studio centered on the mock tank.
    pub fn frame(&mut self) -> FrameSnapshot {
        let snapshot = self.engine.tick();
        let Some(view) = snapshot.entity(self.mock) else {
            return snapshot;
        };
        // Zoom 1 at scale 1 keeps the mock at the viewport center.
        let settings = RenderSettings {
            resolution_scale: 1.0,
            ..self.settings
        };
        let camera = Camera::looking_at(view.transform.position, 1.0);
        self.renderer.draw(
            &snapshot.entities,
            snapshot.player,
            &snapshot.player_state,
            &camera,
            &settings,
            self.engine.registry(),
        );
        if self.debug_mode {
            let mut centered = view.clone();
            centered.transform.position = self.renderer.context().size() * 0.5;
            self.renderer
                .draw_tank_dynamic(&centered, &self.configuration, true);
        }
        snapshot
    }

    pub fn configuration(&self) -> &TankConfiguration {
        &self.configuration
    }

    pub fn renderer(&self) -> &Renderer<C> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer<C> {
        &mut self.renderer
    }
}
