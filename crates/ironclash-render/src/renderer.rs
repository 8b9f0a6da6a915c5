//! Draw orchestrator.
//!
//! A frame is an explicit layered plan: background, ground, combatants,
//! effects, overlay, each a pass over a filtered, culled view of the
//! entities. Post-processing and the performance readout follow in screen
//! space.

use std::collections::HashSet;

use glam::{DAffine2, DVec2};
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ironclash_core::components::EntityRole;
use ironclash_core::config::{ConfigRegistry, TankConfiguration};
use ironclash_core::constants::{GRID_SPACING, WORLD_SIZE};
use ironclash_core::state::{EntityView, PlayerState};
use ironclash_core::types::{Camera, EntityId, Rect};

use crate::boss;
use crate::context::DrawContext;
use crate::effects;
use crate::overlay;
use crate::pattern::PatternCache;
use crate::post::{self, FrameStats};
use crate::settings::RenderSettings;
use crate::tank::{self, BodyLook};
use crate::world;

/// Draw passes in back-to-front order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Background,
    Ground,
    Combatants,
    Effects,
    Overlay,
}

impl Layer {
    pub const ALL: [Layer; 5] = [
        Layer::Background,
        Layer::Ground,
        Layer::Combatants,
        Layer::Effects,
        Layer::Overlay,
    ];

    /// Group label used when drawing the pass.
    pub fn label(self) -> &'static str {
        match self {
            Layer::Background => "background",
            Layer::Ground => "ground",
            Layer::Combatants => "combatants",
            Layer::Effects => "effects",
            Layer::Overlay => "overlay",
        }
    }

    /// Pass an entity belongs to. Nothing lands in `Background`.
    pub fn of(role: &EntityRole) -> Layer {
        match role {
            EntityRole::Zone { .. } | EntityRole::Resource { .. } => Layer::Ground,
            EntityRole::Tank | EntityRole::Boss { .. } => Layer::Combatants,
            EntityRole::Bullet { .. }
            | EntityRole::Trap
            | EntityRole::Drone { .. }
            | EntityRole::Particle { .. } => Layer::Effects,
            EntityRole::FloatingText { .. } => Layer::Overlay,
        }
    }
}

/// World → device transform: viewport center, zoom × resolution scale,
/// then the camera position offset by shake.
pub fn camera_transform(camera: &Camera, viewport: DVec2, resolution_scale: f64) -> DAffine2 {
    let scale = camera.zoom * resolution_scale;
    let scale = if scale.is_finite() && scale > 1e-6 { scale } else { 1.0 };
    let offset = -camera.position + camera.shake;
    let offset = if offset.is_finite() { offset } else { DVec2::ZERO };
    DAffine2::from_translation(viewport * 0.5)
        * DAffine2::from_scale(DVec2::splat(scale))
        * DAffine2::from_translation(offset)
}

/// Whether any part of the entity can land inside `visible`.
pub fn is_visible(entity: &EntityView, visible: &Rect) -> bool {
    let position = entity.transform.position;
    let reach = match &entity.role {
        EntityRole::Zone { size, .. } => size.max_element() * 0.5,
        // Generous margin for name tags, bars and barrels.
        _ => entity.transform.radius.max(0.0) * 3.0 + 24.0,
    };
    let mut bounds = Rect::from_center(position, DVec2::splat(reach));
    if let EntityRole::Particle {
        target: Some(target),
        ..
    } = entity.role
    {
        bounds = Rect::new(bounds.min.min(target), bounds.max.max(target));
    }
    !bounds.clamp_to(visible).is_empty()
}

struct DrawPlan<'a> {
    passes: [Vec<&'a EntityView>; 5],
    stats: FrameStats,
}

impl<'a> DrawPlan<'a> {
    fn build(entities: &'a [EntityView], visible: &Rect, settings: &RenderSettings) -> Self {
        let mut passes: [Vec<&'a EntityView>; 5] = Default::default();
        let mut stats = FrameStats {
            total: entities.len(),
            ..Default::default()
        };
        for entity in entities {
            if !settings.particles && matches!(entity.role, EntityRole::Particle { .. }) {
                continue;
            }
            if !is_visible(entity, visible) {
                stats.culled += 1;
                continue;
            }
            let layer = Layer::of(&entity.role);
            passes[layer as usize].push(entity);
            stats.drawn += 1;
        }
        Self { passes, stats }
    }

    fn pass(&self, layer: Layer) -> &[&'a EntityView] {
        &self.passes[layer as usize]
    }
}

/// Owns a drawing context and the per-renderer caches.
pub struct Renderer<C: DrawContext> {
    ctx: C,
    patterns: PatternCache,
    rng: ChaCha8Rng,
    world_size: f64,
    frame: u64,
    stats: FrameStats,
    missing_classes: HashSet<String>,
    empty: TankConfiguration,
}

impl<C: DrawContext> Renderer<C> {
    pub fn new(ctx: C) -> Self {
        Self::with_patterns(ctx, PatternCache::new())
    }

    /// Renderer using an injected pattern cache.
    pub fn with_patterns(ctx: C, patterns: PatternCache) -> Self {
        Self {
            ctx,
            patterns,
            rng: ChaCha8Rng::seed_from_u64(0x1c0_c1a5),
            world_size: WORLD_SIZE,
            frame: 0,
            stats: FrameStats::default(),
            missing_classes: HashSet::new(),
            empty: TankConfiguration::default(),
        }
    }

    pub fn set_world_size(&mut self, world_size: f64) {
        self.world_size = world_size.max(0.0);
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    pub fn into_context(self) -> C {
        self.ctx
    }

    pub fn patterns(&self) -> &PatternCache {
        &self.patterns
    }

    /// Counters of the last full frame.
    pub fn frame_stats(&self) -> FrameStats {
        self.stats
    }

    /// Draw a full frame.
    pub fn draw(
        &mut self,
        entities: &[EntityView],
        player: Option<EntityId>,
        player_state: &PlayerState,
        camera: &Camera,
        settings: &RenderSettings,
        registry: &ConfigRegistry,
    ) {
        let settings = settings.sanitized();
        self.frame += 1;
        let viewport = self.ctx.size();
        let visible = world::visible_rect(camera, viewport, settings.resolution_scale);
        let plan = DrawPlan::build(entities, &visible, &settings);

        self.ctx.save();
        self.ctx
            .transform(camera_transform(camera, viewport, settings.resolution_scale));

        self.ctx.begin_group(Layer::Background.label());
        world::draw_background(&mut self.ctx, &visible, self.world_size, GRID_SPACING);
        self.ctx.end_group();

        for layer in [Layer::Ground, Layer::Combatants, Layer::Effects] {
            self.ctx.begin_group(layer.label());
            for entity in plan.pass(layer) {
                self.draw_one(entity, registry, &settings);
            }
            self.ctx.end_group();
        }

        self.ctx.begin_group(Layer::Overlay.label());
        for entity in plan.pass(Layer::Combatants) {
            overlay::draw_name(&mut self.ctx, entity);
            overlay::draw_health_bar(&mut self.ctx, entity);
        }
        for entity in plan.pass(Layer::Overlay) {
            self.draw_one(entity, registry, &settings);
        }
        if let Some(leader) = player_state.leader_position.filter(|_| player_state.alive) {
            let origin = player
                .and_then(|id| entities.iter().find(|e| e.id == id))
                .map(|e| e.transform.position)
                .unwrap_or(camera.position);
            overlay::draw_leader_arrow(&mut self.ctx, origin, leader);
        }
        self.ctx.end_group();
        self.ctx.restore();

        if settings.post_processing_enabled() {
            self.ctx.begin_group("post");
            post::draw_vignette(&mut self.ctx);
            post::draw_low_health_tint(&mut self.ctx, player_state);
            self.ctx.end_group();
        }

        self.stats = FrameStats {
            frame: self.frame,
            ..plan.stats
        };
        if settings.show_performance {
            self.ctx.begin_group("performance");
            post::draw_performance(&mut self.ctx, &self.stats);
            self.ctx.end_group();
        }
    }

    /// Draw one entity with the current transform, for isolated previews.
    pub fn draw_entity(&mut self, entity: &EntityView, registry: &ConfigRegistry) {
        self.draw_one(entity, registry, &RenderSettings::default());
    }

    /// Live preview of a configuration that may be half edited. The
    /// configuration is sanitized first; `debug_mode` adds mount markers.
    pub fn draw_tank_dynamic(
        &mut self,
        entity: &EntityView,
        configuration: &TankConfiguration,
        debug_mode: bool,
    ) {
        let config = configuration.sanitized();
        let look = BodyLook::for_tank(entity, &config);
        tank::draw_combatant(&mut self.ctx, entity, &config, &look, &RenderSettings::default());
        if debug_mode {
            self.ctx.save();
            self.ctx.translate(entity.transform.position);
            self.ctx.rotate(entity.transform.rotation);
            tank::draw_debug(&mut self.ctx, &config, entity.transform.radius);
            self.ctx.restore();
        }
    }

    fn draw_one(&mut self, entity: &EntityView, registry: &ConfigRegistry, settings: &RenderSettings) {
        let ctx: &mut dyn DrawContext = &mut self.ctx;
        match &entity.role {
            EntityRole::Tank => {
                let config = resolve_config(
                    registry,
                    entity.class_id.as_deref(),
                    &self.empty,
                    &mut self.missing_classes,
                );
                let look = BodyLook::for_tank(entity, config);
                tank::draw_combatant(ctx, entity, config, &look, settings);
            }
            EntityRole::Boss { archetype } => {
                let config = entity.class_id.as_deref().and_then(|id| registry.get(id));
                boss::draw_boss(ctx, entity, *archetype, config, settings);
            }
            EntityRole::Bullet { ammo, crit } => {
                effects::draw_bullet(ctx, entity, *ammo, *crit, settings, &mut self.rng);
            }
            EntityRole::Trap => effects::draw_trap(ctx, entity),
            EntityRole::Drone { .. } => effects::draw_drone(ctx, entity),
            EntityRole::Particle { kind, target } => {
                effects::draw_particle(ctx, entity, *kind, *target);
            }
            EntityRole::FloatingText { text, crit } => {
                overlay::draw_floating_text(ctx, entity, text, *crit);
            }
            EntityRole::Zone { size, color } => {
                world::draw_zone(ctx, entity, *size, color, &mut self.patterns);
            }
            EntityRole::Resource { shape, color } => {
                world::draw_resource(ctx, entity, *shape, color, settings);
            }
        }
    }
}

/// Configuration of a class, or the empty one when the class is unknown.
/// Each unknown class is logged once.
fn resolve_config<'a>(
    registry: &'a ConfigRegistry,
    class_id: Option<&str>,
    empty: &'a TankConfiguration,
    missing: &mut HashSet<String>,
) -> &'a TankConfiguration {
    let Some(class_id) = class_id else {
        return empty;
    };
    match registry.get(class_id) {
        Some(config) => config,
        None => {
            if missing.insert(class_id.to_string()) {
                debug!("no configuration for class `{class_id}`, drawing it bare");
            }
            empty
        }
    }
}
