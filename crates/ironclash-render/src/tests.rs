//! Renderer tests: shape tracing, draw order, dispatch tables, caches and
//! the silhouette-confined damage flash.

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use glam::DVec2;

    use ironclash_core::components::*;
    use ironclash_core::config::*;
    use ironclash_core::constants::*;
    use ironclash_core::enums::*;
    use ironclash_core::presets::{self, builtin_registry};
    use ironclash_core::state::{EntityView, PlayerState};
    use ironclash_core::types::{Camera, Color, EntityId, Rect, Transform};

    use crate::boss;
    use crate::context::{CompositeMode, DrawContext, Paint};
    use crate::effects::{self, ShotLook};
    use crate::overlay;
    use crate::pattern::PatternCache;
    use crate::raster::RasterSurface;
    use crate::recording::{DrawCommand, RecordingContext};
    use crate::renderer::{camera_transform, Layer, Renderer};
    use crate::settings::RenderSettings;
    use crate::shape::trace;
    use crate::world;

    fn view(id: u64, role: EntityRole, position: DVec2, radius: f64) -> EntityView {
        EntityView {
            id: EntityId(id),
            role,
            transform: Transform::at(position, radius),
            ..Default::default()
        }
    }

    fn tank(id: u64, class_id: &str, position: DVec2) -> EntityView {
        EntityView {
            class_id: Some(class_id.to_string()),
            ..view(id, EntityRole::Tank, position, DEFAULT_TANK_RADIUS)
        }
    }

    fn recorder() -> Renderer<RecordingContext> {
        Renderer::new(RecordingContext::new(800.0, 600.0))
    }

    fn fills(commands: &[DrawCommand]) -> impl Iterator<Item = &Paint> {
        commands.iter().filter_map(|c| match c {
            DrawCommand::Fill { paint, .. } | DrawCommand::Stroke { paint, .. } => Some(paint),
            _ => None,
        })
    }

    // ---- Shape tracer ----

    #[test]
    fn test_trace_vertex_counts_and_closure() {
        for kind in OutlineKind::ALL {
            for radius in [0.5, 1.0, 24.0, 300.0] {
                let path = trace(kind, radius);
                assert_eq!(path.vertex_count(), kind.vertex_count(), "{kind:?}");
                assert!(path.is_closed(), "{kind:?} r={radius}");
            }
        }
    }

    #[test]
    fn test_unknown_outline_traces_circle() {
        let kind: OutlineKind = serde_json::from_str("\"dodecahedron\"").unwrap();
        assert_eq!(trace(kind, 10.0), trace(OutlineKind::Circle, 10.0));
    }

    // ---- World ----

    #[test]
    fn test_grid_lines_stay_inside_world() {
        let viewport = DVec2::new(1280.0, 720.0);
        let cameras = [
            Camera::looking_at(DVec2::ZERO, 1.0),
            Camera::looking_at(DVec2::splat(WORLD_SIZE), 0.5),
            Camera::looking_at(DVec2::new(-900.0, 2000.0), 2.0),
            Camera::looking_at(DVec2::splat(2000.0), 0.05),
            Camera::looking_at(DVec2::new(3999.0, 1.0), 3.0),
        ];
        for camera in cameras {
            let visible = world::visible_rect(&camera, viewport, 1.0);
            let lines = world::grid_lines(&visible, WORLD_SIZE, GRID_SPACING);
            for (from, to) in &lines {
                for p in [from, to] {
                    assert!((0.0..=WORLD_SIZE).contains(&p.x), "{p:?}");
                    assert!((0.0..=WORLD_SIZE).contains(&p.y), "{p:?}");
                }
            }
        }
    }

    #[test]
    fn test_grid_only_covers_visible_rect() {
        let visible = Rect::new(DVec2::new(100.0, 100.0), DVec2::new(300.0, 200.0));
        let lines = world::grid_lines(&visible, WORLD_SIZE, 40.0);
        // x: 120..=280 (5 lines), y: 120..=200 (3 lines)
        assert_eq!(lines.len(), 8);
    }

    // ---- Pattern cache ----

    #[test]
    fn test_pattern_cache_identity() {
        let mut cache = PatternCache::new();
        let a = cache.get("#ff0000");
        let b = cache.get("#ff0000");
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
        let c = cache.get("#00ff00");
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);
        let _ = cache.get("not a color");
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_zones_share_renderer_cache() {
        let mut renderer = recorder();
        let registry = builtin_registry();
        let zone = |id: u64, x: f64| {
            view(
                id,
                EntityRole::Zone {
                    size: DVec2::splat(200.0),
                    color: "#3a7bd5".to_string(),
                },
                DVec2::new(x, 100.0),
                1.0,
            )
        };
        renderer.draw_entity(&zone(1, 100.0), &registry);
        renderer.draw_entity(&zone(2, 400.0), &registry);
        assert_eq!(renderer.patterns().len(), 1);
        let patterns: Vec<_> = fills(renderer.context().commands())
            .filter_map(|p| match p {
                Paint::Pattern(pattern) => Some(Rc::clone(pattern)),
                _ => None,
            })
            .collect();
        assert_eq!(patterns.len(), 2);
        assert!(Rc::ptr_eq(&patterns[0], &patterns[1]));
    }

    // ---- Overlay ----

    #[test]
    fn test_floating_text_opacity_reaches_zero() {
        let mut life = Lifespan::new(FLOATING_TEXT_LIFETIME_SECS);
        let mut previous = overlay::text_opacity(&life);
        assert!((previous - 1.0).abs() < 1e-10);
        while life.remaining_secs > 0.0 {
            life.remaining_secs -= DT;
            let opacity = overlay::text_opacity(&life);
            assert!(opacity <= previous);
            assert!(opacity >= 0.0);
            previous = opacity;
        }
        assert_eq!(previous, 0.0);
        let expired = Lifespan {
            remaining_secs: 0.0,
            total_secs: 0.8,
        };
        assert_eq!(overlay::text_opacity(&expired), 0.0);
    }

    #[test]
    fn test_health_bar_visibility() {
        let mut full = tank(1, "basic", DVec2::ZERO);
        assert!(!overlay::shows_health_bar(&full));
        full.is_player = true;
        assert!(overlay::shows_health_bar(&full));
        let damaged = EntityView {
            health: 0.5,
            ..tank(2, "basic", DVec2::ZERO)
        };
        assert!(overlay::shows_health_bar(&damaged));
        let boss = view(
            3,
            EntityRole::Boss {
                archetype: BossArchetype::Guardian,
            },
            DVec2::ZERO,
            DEFAULT_BOSS_RADIUS,
        );
        assert!(overlay::shows_health_bar(&boss));
    }

    // ---- Dispatch tables ----

    #[test]
    fn test_every_ammo_visual_has_a_style() {
        for kind in AmmoVisual::ALL {
            let style = effects::ammo_style(kind);
            assert_eq!(style.kind, kind);
            let mut ctx = RecordingContext::new(64.0, 64.0);
            let mut rng = <rand_chacha::ChaCha8Rng as rand::SeedableRng>::seed_from_u64(1);
            let look = ShotLook {
                radius: 8.0,
                color: Color::rgb(0, 178, 225),
                phase: 0.3,
                arcs: true,
            };
            (style.draw)(&mut ctx, &look, &mut rng);
            assert!(ctx.commands().iter().any(|c| c.is_paint()), "{kind:?}");
        }
    }

    #[test]
    fn test_every_particle_kind_has_a_style() {
        for kind in ParticleKind::ALL {
            assert_eq!(effects::particle_style(kind).kind, kind);
            let mut ctx = RecordingContext::new(64.0, 64.0);
            let particle = view(
                1,
                EntityRole::Particle {
                    kind,
                    target: Some(DVec2::new(40.0, 0.0)),
                },
                DVec2::ZERO,
                4.0,
            );
            effects::draw_particle(&mut ctx, &particle, kind, Some(DVec2::new(40.0, 0.0)));
            assert!(ctx.commands().iter().any(|c| c.is_paint()), "{kind:?}");
        }
    }

    #[test]
    fn test_every_boss_has_a_style_matching_its_preset() {
        for archetype in BossArchetype::ALL {
            let style = boss::style(archetype);
            assert_eq!(style.archetype, archetype);
            assert_eq!(style.outline, presets::boss_configuration(archetype).outline);
        }
    }

    #[test]
    fn test_crit_adds_gold_for_every_kind() {
        let registry = builtin_registry();
        for ammo in AmmoVisual::ALL {
            let mut renderer = recorder();
            let bullet = view(1, EntityRole::Bullet { ammo, crit: true }, DVec2::ZERO, 8.0);
            renderer.draw_entity(&bullet, &registry);
            assert!(
                fills(renderer.context().commands()).any(|p| p.base_color() == crate::style::CRIT_GOLD),
                "{ammo:?}"
            );
        }
    }

    #[test]
    fn test_beam_is_additive_and_needs_a_target() {
        let registry = builtin_registry();
        let mut renderer = recorder();
        let beam = view(
            1,
            EntityRole::Particle {
                kind: ParticleKind::Beam,
                target: Some(DVec2::new(300.0, 0.0)),
            },
            DVec2::ZERO,
            3.0,
        );
        renderer.draw_entity(&beam, &registry);
        let commands = renderer.context().commands();
        assert_eq!(commands.iter().filter(|c| c.is_paint()).count(), 3);
        assert!(commands
            .iter()
            .filter(|c| c.is_paint())
            .all(|c| c.composite() == Some(CompositeMode::Lighter)));

        let mut renderer = recorder();
        let dangling = view(
            2,
            EntityRole::Particle {
                kind: ParticleKind::Beam,
                target: None,
            },
            DVec2::ZERO,
            3.0,
        );
        renderer.draw_entity(&dangling, &registry);
        assert!(renderer.context().commands().is_empty());
    }

    #[test]
    fn test_plasma_arcs_skipped_at_medium() {
        let registry = builtin_registry();
        let plasma = view(
            1,
            EntityRole::Bullet {
                ammo: AmmoVisual::Plasma,
                crit: false,
            },
            DVec2::new(100.0, 100.0),
            8.0,
        );
        let count_strokes = |quality: Quality| {
            let mut renderer = recorder();
            let settings = RenderSettings {
                quality,
                post_processing: false,
                ..Default::default()
            };
            renderer.draw(
                std::slice::from_ref(&plasma),
                None,
                &PlayerState::default(),
                &Camera::looking_at(DVec2::new(100.0, 100.0), 1.0),
                &settings,
                &registry,
            );
            renderer
                .context()
                .group(Layer::Effects.label())
                .iter()
                .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
                .count()
        };
        assert_eq!(count_strokes(Quality::High), 3);
        assert_eq!(count_strokes(Quality::Medium), 0);
    }

    // ---- Orchestrator ----

    fn arena_scene() -> Vec<EntityView> {
        let center = DVec2::splat(500.0);
        vec![
            view(
                1,
                EntityRole::FloatingText {
                    text: "12".to_string(),
                    crit: false,
                },
                center,
                1.0,
            ),
            view(
                2,
                EntityRole::Particle {
                    kind: ParticleKind::Spark,
                    target: None,
                },
                center,
                2.0,
            ),
            view(
                3,
                EntityRole::Bullet {
                    ammo: AmmoVisual::Standard,
                    crit: false,
                },
                center + DVec2::X * 60.0,
                8.0,
            ),
            EntityView {
                is_player: true,
                name: Some("You".to_string()),
                ..tank(4, "basic", center)
            },
            view(
                5,
                EntityRole::Resource {
                    shape: ResourceShape::Pentagon,
                    color: "#768dfc".to_string(),
                },
                center - DVec2::X * 80.0,
                18.0,
            ),
            view(
                6,
                EntityRole::Zone {
                    size: DVec2::splat(300.0),
                    color: "#ff0000".to_string(),
                },
                center,
                1.0,
            ),
        ]
    }

    fn draw_scene(renderer: &mut Renderer<RecordingContext>, settings: &RenderSettings) {
        let scene = arena_scene();
        let player_state = PlayerState {
            alive: true,
            leader_position: Some(DVec2::new(900.0, 500.0)),
            health_fraction: 0.1,
            ..Default::default()
        };
        renderer.draw(
            &scene,
            Some(EntityId(4)),
            &player_state,
            &Camera::looking_at(DVec2::splat(500.0), 1.0),
            settings,
            &builtin_registry(),
        );
    }

    #[test]
    fn test_layers_draw_back_to_front() {
        let mut renderer = recorder();
        draw_scene(&mut renderer, &RenderSettings::default());
        let ctx = renderer.context();
        assert_eq!(
            ctx.groups(),
            vec!["background", "ground", "combatants", "effects", "overlay", "post"]
        );
        assert_eq!(ctx.save_depth(), 0);
        assert!(matches!(ctx.commands()[1], DrawCommand::Clear(_)));
        assert!(fills(ctx.group("ground")).any(|p| matches!(p, Paint::Pattern(_))));
        assert!(!ctx.group("combatants").is_empty());
        assert!(!ctx.group("effects").is_empty());
        assert!(ctx
            .group("overlay")
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "12")));
        assert!(ctx
            .group("overlay")
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "You")));
        let stats = renderer.frame_stats();
        assert_eq!(stats.total, 6);
        assert_eq!(stats.drawn, 6);
        assert_eq!(stats.frame, 1);
    }

    #[test]
    fn test_particles_setting_skips_particles() {
        let mut renderer = recorder();
        let settings = RenderSettings {
            particles: false,
            ..Default::default()
        };
        draw_scene(&mut renderer, &settings);
        assert_eq!(renderer.frame_stats().drawn, 5);
    }

    #[test]
    fn test_low_quality_uses_solid_fills_and_skips_post() {
        let mut renderer = recorder();
        let settings = RenderSettings {
            quality: Quality::Low,
            ..Default::default()
        };
        draw_scene(&mut renderer, &settings);
        let ctx = renderer.context();
        assert!(!ctx.groups().contains(&"post"));
        assert!(fills(ctx.group("combatants")).all(|p| matches!(p, Paint::Solid(_))));
    }

    #[test]
    fn test_performance_text_when_enabled() {
        let mut renderer = recorder();
        let settings = RenderSettings {
            show_performance: true,
            ..Default::default()
        };
        draw_scene(&mut renderer, &settings);
        let ctx = renderer.context();
        assert_eq!(ctx.groups().last(), Some(&"performance"));
        assert!(ctx
            .group("performance")
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { text, .. } if text.contains("drawn 6/6"))));
    }

    #[test]
    fn test_offscreen_entities_are_culled() {
        let mut renderer = recorder();
        let far = tank(1, "basic", DVec2::splat(3500.0));
        let near = tank(2, "basic", DVec2::splat(500.0));
        renderer.draw(
            &[far, near],
            None,
            &PlayerState::default(),
            &Camera::looking_at(DVec2::splat(500.0), 1.0),
            &RenderSettings::default(),
            &builtin_registry(),
        );
        assert_eq!(renderer.frame_stats().culled, 1);
        assert_eq!(renderer.frame_stats().drawn, 1);
    }

    #[test]
    fn test_camera_transform_centers_camera() {
        let camera = Camera::looking_at(DVec2::new(1200.0, 800.0), 1.5);
        let transform = camera_transform(&camera, DVec2::new(800.0, 600.0), 2.0);
        let center = transform.transform_point2(camera.position);
        assert!((center - DVec2::new(400.0, 300.0)).length() < 1e-9);
        let shaken = Camera {
            shake: DVec2::new(4.0, 0.0),
            ..camera
        };
        let moved = camera_transform(&shaken, DVec2::new(800.0, 600.0), 2.0).transform_point2(camera.position);
        assert!((moved.x - center.x - 12.0).abs() < 1e-9);
    }

    // ---- Tanks ----

    #[test]
    fn test_missing_class_draws_bare_body() {
        let mut renderer = recorder();
        let ghost = tank(1, "no_such_class", DVec2::ZERO);
        renderer.draw_entity(&ghost, &builtin_registry());
        renderer.draw_entity(&ghost, &builtin_registry());
        assert!(renderer.context().commands().iter().any(|c| c.is_paint()));
    }

    #[test]
    fn test_barrel_count_drives_barrel_fills() {
        let registry = builtin_registry();
        let count_fills = |class_id: &str| {
            let mut renderer = recorder();
            let settings = RenderSettings {
                quality: Quality::Low,
                ..Default::default()
            };
            let entity = tank(1, class_id, DVec2::ZERO);
            let config = registry.get(class_id).unwrap();
            let look = crate::tank::BodyLook::for_tank(&entity, config);
            crate::tank::draw_combatant(renderer.context_mut(), &entity, config, &look, &settings);
            renderer
                .context()
                .commands()
                .iter()
                .filter(|c| matches!(c, DrawCommand::Fill { .. }))
                .count()
        };
        assert_eq!(count_fills("sniper"), 2);
        assert_eq!(count_fills("twin"), 3);
        assert_eq!(count_fills("triple_shot"), 4);
    }

    #[test]
    fn test_dynamic_preview_survives_broken_configuration() {
        let broken = TankConfiguration {
            outline: OutlineKind::from_name("blob"),
            barrels: vec![
                Barrel {
                    length: f64::NAN,
                    width: -3.0,
                    spread: 7.0,
                    charge_time: f64::INFINITY,
                    ..Barrel::default()
                },
                Barrel::default(),
            ],
            ..Default::default()
        };
        // State sized for a different barrel count.
        let entity = EntityView {
            barrels: BarrelState {
                cooldown: vec![0.0; 5],
                charge: vec![0.4; 5],
                recoil: vec![f64::NAN; 5],
            },
            ..tank(1, "editor", DVec2::new(200.0, 200.0))
        };
        let mut renderer = recorder();
        renderer.draw_tank_dynamic(&entity, &broken, true);
        let commands = renderer.context().commands();
        assert!(commands.iter().any(|c| c.is_paint()));
        assert_eq!(
            commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::Text { .. }))
                .count(),
            2
        );
        assert_eq!(renderer.context().save_depth(), 0);
    }

    #[test]
    fn test_flash_uses_source_atop() {
        let registry = builtin_registry();
        let mut calm = recorder();
        calm.draw_entity(&tank(1, "twin", DVec2::ZERO), &registry);
        assert!(calm
            .context()
            .commands()
            .iter()
            .all(|c| c.composite() != Some(CompositeMode::SourceAtop)));

        let mut flashed = recorder();
        let mut entity = tank(1, "twin", DVec2::ZERO);
        entity.visual.flash_secs = FLASH_DURATION_SECS;
        flashed.draw_entity(&entity, &registry);
        let atop = flashed
            .context()
            .commands()
            .iter()
            .filter(|c| c.composite() == Some(CompositeMode::SourceAtop))
            .count();
        // two barrels + body
        assert_eq!(atop, 3);
    }

    #[test]
    fn test_flash_confined_to_silhouette() {
        let registry = builtin_registry();
        let center = DVec2::splat(50.0);
        let radius = 20.0;
        let render = |flash_secs: f64| {
            let mut renderer = Renderer::new(RasterSurface::new(100, 100));
            renderer.context_mut().clear(Color::rgb(0x30, 0x30, 0x30));
            let mut entity = tank(1, "basic", center);
            entity.transform.radius = radius;
            entity.visual.flash_secs = flash_secs;
            renderer.draw_entity(&entity, &registry);
            renderer.into_context()
        };
        let calm = render(0.0);
        let flashed = render(FLASH_DURATION_SECS);

        let barrel = Barrel::default();
        let barrel_end = center.x + barrel.length * radius;
        let barrel_half = barrel.width * radius * 0.5;
        let mut changed = 0;
        for y in 0..100 {
            for x in 0..100 {
                if calm.pixel(x, y) == flashed.pixel(x, y) {
                    continue;
                }
                changed += 1;
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let in_body = p.distance(center) <= radius + 1.0;
                let in_barrel = p.x >= center.x - 1.0
                    && p.x <= barrel_end + 1.0
                    && (p.y - center.y).abs() <= barrel_half + 1.0;
                assert!(in_body || in_barrel, "flash leaked to ({x}, {y})");
            }
        }
        assert!(changed > 0);
        let before = calm.pixel(45, 55);
        let after = flashed.pixel(45, 55);
        let brightness = |c: Color| c.r as u32 + c.g as u32 + c.b as u32;
        assert!(brightness(after) > brightness(before));
        assert_eq!(calm.pixel(50, 85), flashed.pixel(50, 85));
        assert_eq!(flashed.pixel(2, 2), Color::rgb(0x30, 0x30, 0x30));
    }

    #[test]
    fn test_flash_covers_treads() {
        let mut registry = builtin_registry();
        registry.insert(
            "roller",
            TankConfiguration {
                outline: OutlineKind::Circle,
                barrels: Vec::new(),
                visual: VisualOverrides {
                    treads: true,
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        let center = DVec2::splat(50.0);
        let radius = 20.0;
        let render = |flash_secs: f64| {
            let mut renderer = Renderer::new(RasterSurface::new(100, 100));
            renderer.context_mut().clear(Color::rgb(0x30, 0x30, 0x30));
            let mut entity = tank(1, "roller", center);
            entity.transform.radius = radius;
            entity.visual.flash_secs = flash_secs;
            renderer.draw_entity(&entity, &registry);
            renderer.into_context()
        };
        let calm = render(0.0);
        let flashed = render(FLASH_DURATION_SECS);

        // Tread bands span 0.95r along x and 0.85r +- 0.175r across.
        let half_length = radius * 0.95;
        let (inner, outer) = (radius * 0.675, radius * 1.025);
        let mut tread_only = 0;
        for y in 0..100 {
            for x in 0..100 {
                if calm.pixel(x, y) == flashed.pixel(x, y) {
                    continue;
                }
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let local = p - center;
                let in_body = local.length() <= radius + 1.0;
                let in_tread = local.x.abs() <= half_length + 1.0
                    && local.y.abs() >= inner - 1.0
                    && local.y.abs() <= outer + 1.0;
                assert!(in_body || in_tread, "flash leaked to ({x}, {y})");
                if !in_body {
                    tread_only += 1;
                }
            }
        }
        assert!(tread_only > 0);

        let mut recorded = recorder();
        let mut entity = tank(1, "roller", DVec2::ZERO);
        entity.visual.flash_secs = FLASH_DURATION_SECS;
        recorded.draw_entity(&entity, &registry);
        let atop = recorded
            .context()
            .commands()
            .iter()
            .filter(|c| c.composite() == Some(CompositeMode::SourceAtop))
            .count();
        // body + two tread bands
        assert_eq!(atop, 3);
    }

    #[test]
    fn test_status_tints_follow_body_outline() {
        let registry = builtin_registry();
        let mut entity = tank(1, "smasher", DVec2::ZERO);
        entity.status.apply(StatusEffect {
            kind: StatusKind::Burn,
            remaining_secs: 1.0,
            source: None,
            magnitude: 5.0,
        });
        let mut renderer = recorder();
        renderer.draw_entity(&entity, &registry);
        let body = trace(OutlineKind::Hexagon, DEFAULT_TANK_RADIUS);
        assert!(renderer.context().commands().iter().any(|c| matches!(
            c,
            DrawCommand::Fill { path, paint: Paint::Solid(color), .. }
                if *path == body && *color == crate::style::BURN_TINT
        )));
    }

    #[test]
    fn test_charge_glow_drawn_at_muzzle() {
        let registry = builtin_registry();
        let config = registry.get("railgun").unwrap();
        let mut entity = tank(1, "railgun", DVec2::ZERO);
        entity.barrels = BarrelState::for_configuration(config);
        let glowless = {
            let mut renderer = recorder();
            renderer.draw_entity(&entity, &registry);
            renderer.context().commands().len()
        };
        entity.barrels.charge[0] = config.barrels[0].charge_time * 0.5;
        let mut renderer = recorder();
        renderer.draw_entity(&entity, &registry);
        assert_eq!(renderer.context().commands().len(), glowless + 1);
    }

    #[test]
    fn test_draw_context_is_object_safe() {
        let mut ctx = RecordingContext::new(10.0, 10.0);
        let dynamic: &mut dyn DrawContext = &mut ctx;
        dynamic.translate(DVec2::ONE);
        dynamic.fill_path(&trace(OutlineKind::Square, 2.0), &Paint::Solid(Color::BLACK));
        assert_eq!(ctx.commands().len(), 1);
    }
}
