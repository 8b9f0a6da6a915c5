//! Effect renderer: projectiles, traps, drones and particles.
//!
//! Ammunition and particle looks are dispatch tables, one record per kind.
//! Adding a kind means adding a record and a draw function.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ironclash_core::enums::{AmmoVisual, OutlineKind, ParticleKind};
use ironclash_core::state::EntityView;
use ironclash_core::types::Color;

use crate::context::{CompositeMode, DrawContext, Paint};
use crate::path::Path;
use crate::settings::RenderSettings;
use crate::shape::trace;
use crate::style::{self, CRIT_GOLD};

/// What an ammo draw function needs, in the shot's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotLook {
    pub radius: f64,
    pub color: Color,
    /// Seconds since the shot spawned, drives flicker and pulse.
    pub phase: f64,
    /// Draw the randomized plasma arcs.
    pub arcs: bool,
}

pub type AmmoDraw = fn(&mut dyn DrawContext, &ShotLook, &mut ChaCha8Rng);

pub struct AmmoStyle {
    pub kind: AmmoVisual,
    pub draw: AmmoDraw,
}

pub static AMMO_STYLES: [AmmoStyle; 8] = [
    AmmoStyle {
        kind: AmmoVisual::Standard,
        draw: draw_standard,
    },
    AmmoStyle {
        kind: AmmoVisual::Missile,
        draw: draw_missile,
    },
    AmmoStyle {
        kind: AmmoVisual::Plasma,
        draw: draw_plasma,
    },
    AmmoStyle {
        kind: AmmoVisual::ArmorPiercing,
        draw: draw_armor_piercing,
    },
    AmmoStyle {
        kind: AmmoVisual::HighExplosive,
        draw: draw_high_explosive,
    },
    AmmoStyle {
        kind: AmmoVisual::Cryo,
        draw: draw_cryo,
    },
    AmmoStyle {
        kind: AmmoVisual::Incendiary,
        draw: draw_incendiary,
    },
    AmmoStyle {
        kind: AmmoVisual::NanoSplitter,
        draw: draw_nano_splitter,
    },
];

/// Record for `kind`; the default disc when the table lacks one.
pub fn ammo_style(kind: AmmoVisual) -> &'static AmmoStyle {
    AMMO_STYLES
        .iter()
        .find(|s| s.kind == kind)
        .unwrap_or(&AMMO_STYLES[0])
}

fn heading(entity: &EntityView) -> f64 {
    let velocity = entity.transform.velocity;
    if velocity.length_squared() > 0.0 && velocity.is_finite() {
        velocity.to_angle()
    } else {
        entity.transform.rotation
    }
}

fn entity_color(entity: &EntityView, fallback: Color) -> Color {
    entity
        .color
        .as_deref()
        .and_then(Color::parse)
        .unwrap_or(fallback)
}

/// Bullet at its world position, plus the crit glow when flagged.
pub fn draw_bullet(
    ctx: &mut dyn DrawContext,
    entity: &EntityView,
    ammo: AmmoVisual,
    crit: bool,
    settings: &RenderSettings,
    rng: &mut ChaCha8Rng,
) {
    let look = ShotLook {
        radius: entity.transform.radius.max(0.0),
        color: entity_color(entity, style::team_color(entity.team)),
        phase: entity.lifespan.map(|l| l.elapsed_secs()).unwrap_or(0.0),
        arcs: settings.plasma_arcs(),
    };
    ctx.save();
    ctx.translate(entity.transform.position);
    ctx.rotate(heading(entity));
    (ammo_style(ammo).draw)(ctx, &look, rng);
    if crit {
        draw_crit_glow(ctx, look.radius);
    }
    ctx.restore();
}

/// Gold glow and outline on critical shots of any kind.
pub fn draw_crit_glow(ctx: &mut dyn DrawContext, radius: f64) {
    let ring = Path::circle(DVec2::ZERO, radius * 1.3);
    ctx.stroke_path(&ring, &Paint::Solid(CRIT_GOLD.with_alpha(0.35)), radius * 0.6);
    ctx.stroke_path(&Path::circle(DVec2::ZERO, radius * 1.15), &Paint::Solid(CRIT_GOLD), 2.0);
}

pub fn draw_trap(ctx: &mut dyn DrawContext, entity: &EntityView) {
    let color = entity_color(entity, style::team_color(entity.team));
    let path = trace(OutlineKind::Star, entity.transform.radius);
    ctx.save();
    ctx.translate(entity.transform.position);
    ctx.rotate(entity.transform.rotation);
    ctx.fill_path(&path, &Paint::Solid(color));
    ctx.stroke_path(&path, &Paint::Solid(color.darken(0.4)), 2.0);
    ctx.restore();
}

pub fn draw_drone(ctx: &mut dyn DrawContext, entity: &EntityView) {
    let color = entity_color(entity, style::team_color(entity.team));
    let r = entity.transform.radius;
    let path = Path::polygon([
        DVec2::new(r, 0.0),
        DVec2::from_angle(TAU / 3.0) * r,
        DVec2::from_angle(-TAU / 3.0) * r,
    ]);
    ctx.save();
    ctx.translate(entity.transform.position);
    ctx.rotate(heading(entity));
    ctx.fill_path(&path, &Paint::Solid(color));
    ctx.stroke_path(&path, &Paint::Solid(color.darken(0.4)), 2.0);
    ctx.restore();
}

// ---- Ammunition ----

fn draw_standard(ctx: &mut dyn DrawContext, look: &ShotLook, _rng: &mut ChaCha8Rng) {
    let r = look.radius;
    let disc = Path::circle(DVec2::ZERO, r);
    ctx.fill_path(&disc, &Paint::Solid(look.color));
    ctx.stroke_path(&disc, &Paint::Solid(look.color.darken(0.4)), 2.0);
    ctx.fill_path(
        &Path::circle(DVec2::splat(-r * 0.3), r * 0.3),
        &Paint::Solid(Color::WHITE.with_alpha(0.5)),
    );
}

fn draw_missile(ctx: &mut dyn DrawContext, look: &ShotLook, _rng: &mut ChaCha8Rng) {
    let r = look.radius;
    let flicker = 0.5 + 0.5 * (look.phase * 40.0).sin();
    let flame = Path::polygon([
        DVec2::new(-r * 0.9, -r * 0.3),
        DVec2::new(-r * (1.5 + 0.5 * flicker), 0.0),
        DVec2::new(-r * 0.9, r * 0.3),
    ]);
    ctx.fill_path(&flame, &Paint::Solid(Color::rgb(0xff, 0xa0, 0x20).with_alpha(0.6 + 0.4 * flicker)));
    for side in [-1.0, 1.0] {
        let fin = Path::polygon([
            DVec2::new(-r * 0.4, side * r * 0.4),
            DVec2::new(-r * 0.95, side * r * 0.8),
            DVec2::new(-r * 0.95, side * r * 0.4),
        ]);
        ctx.fill_path(&fin, &Paint::Solid(look.color.darken(0.3)));
    }
    let body = Path::rect(DVec2::new(-r * 0.95, -r * 0.4), DVec2::new(r * 1.55, r * 0.8));
    ctx.fill_path(&body, &Paint::Solid(Color::rgb(0xd8, 0xd8, 0xd8)));
    ctx.stroke_path(&body, &Paint::Solid(style::OUTLINE), 1.5);
    let cone = Path::polygon([
        DVec2::new(r * 0.6, -r * 0.4),
        DVec2::new(r * 1.3, 0.0),
        DVec2::new(r * 0.6, r * 0.4),
    ]);
    ctx.fill_path(&cone, &Paint::Solid(look.color));
    ctx.stroke_path(&cone, &Paint::Solid(style::OUTLINE), 1.5);
}

fn draw_plasma(ctx: &mut dyn DrawContext, look: &ShotLook, rng: &mut ChaCha8Rng) {
    let r = look.radius;
    let pulse = r * (1.0 + 0.12 * (look.phase * 20.0).sin());
    ctx.fill_path(
        &Path::circle(DVec2::ZERO, pulse),
        &Paint::Radial {
            center: DVec2::ZERO,
            radius: pulse,
            stops: vec![
                (0.0, look.color.with_alpha(0.8)),
                (1.0, look.color.with_alpha(0.15)),
            ],
        },
    );
    ctx.fill_path(&Path::circle(DVec2::ZERO, r * 0.5), &Paint::Solid(Color::WHITE));
    if look.arcs {
        for _ in 0..3 {
            let angle = rng.gen_range(0.0..TAU);
            let mid = DVec2::from_angle(angle + rng.gen_range(-0.6..0.6)) * r * rng.gen_range(0.6..1.0);
            let mut arc = Path::new();
            arc.move_to(DVec2::from_angle(angle) * r * 0.4)
                .line_to(mid)
                .line_to(DVec2::from_angle(angle + rng.gen_range(-0.4..0.4)) * r * 1.4);
            ctx.stroke_path(&arc, &Paint::Solid(look.color.lighten(0.5)), 1.2);
        }
    }
}

fn draw_armor_piercing(ctx: &mut dyn DrawContext, look: &ShotLook, _rng: &mut ChaCha8Rng) {
    let r = look.radius;
    let dart = Path::polygon([
        DVec2::new(r * 1.6, 0.0),
        DVec2::new(-r * 1.4, -r * 0.25),
        DVec2::new(-r * 1.4, r * 0.25),
    ]);
    let metal = Paint::Linear {
        from: DVec2::new(0.0, -r * 0.25),
        to: DVec2::new(0.0, r * 0.25),
        stops: vec![
            (0.0, Color::rgb(0x70, 0x70, 0x78)),
            (0.5, Color::rgb(0xe0, 0xe0, 0xe8)),
            (1.0, Color::rgb(0x70, 0x70, 0x78)),
        ],
    };
    ctx.fill_path(&dart, &metal);
    ctx.stroke_path(
        &Path::line(DVec2::new(-r * 1.2, 0.0), DVec2::new(r * 1.2, 0.0)),
        &Paint::Solid(look.color),
        1.0,
    );
}

fn draw_high_explosive(ctx: &mut dyn DrawContext, look: &ShotLook, _rng: &mut ChaCha8Rng) {
    let r = look.radius;
    let casing = Path::circle(DVec2::ZERO, r);
    ctx.fill_path(&casing, &Paint::Solid(Color::rgb(0x33, 0x33, 0x33)));
    ctx.stroke_path(&casing, &Paint::Solid(Color::BLACK), 2.0);
    let core = if (look.phase * 8.0).floor() as i64 % 2 == 0 {
        look.color
    } else {
        Color::rgb(0xff, 0x8c, 0x00)
    };
    ctx.fill_path(
        &Path::circle(DVec2::ZERO, r * 0.5),
        &Paint::Radial {
            center: DVec2::ZERO,
            radius: r * 0.5,
            stops: vec![(0.0, Color::WHITE), (1.0, core)],
        },
    );
}

fn draw_cryo(ctx: &mut dyn DrawContext, look: &ShotLook, _rng: &mut ChaCha8Rng) {
    let r = look.radius;
    let crystal = Path::polygon((0..12).map(|i| {
        let radius = if i % 2 == 0 { r * 1.2 } else { r * 0.45 };
        DVec2::from_angle(-FRAC_PI_2 + TAU * i as f64 / 12.0) * radius
    }));
    ctx.fill_path(&crystal, &Paint::Solid(Color::rgb(0xbf, 0xee, 0xff)));
    ctx.stroke_path(&crystal, &Paint::Solid(Color::WHITE), 1.2);
}

fn draw_incendiary(ctx: &mut dyn DrawContext, look: &ShotLook, _rng: &mut ChaCha8Rng) {
    let r = look.radius;
    let mut drop = Path::new();
    drop.move_to(DVec2::new(r, 0.0))
        .cubic_to(DVec2::new(r, -r * 1.1), DVec2::new(-r * 0.8, -r * 0.6), DVec2::new(-r * 2.2, 0.0))
        .cubic_to(DVec2::new(-r * 0.8, r * 0.6), DVec2::new(r, r * 1.1), DVec2::new(r, 0.0))
        .close();
    let heat = Paint::Radial {
        center: DVec2::new(r * 0.2, 0.0),
        radius: r * 2.0,
        stops: vec![
            (0.0, Color::rgb(0xff, 0xf4, 0x9c)),
            (0.4, Color::rgb(0xff, 0x8c, 0x00)),
            (1.0, Color::rgb(0xb0, 0x20, 0x10)),
        ],
    };
    ctx.fill_path(&drop, &heat);
}

fn draw_nano_splitter(ctx: &mut dyn DrawContext, look: &ShotLook, _rng: &mut ChaCha8Rng) {
    let r = look.radius;
    let disc = Path::circle(DVec2::ZERO, r);
    ctx.fill_path(&disc, &Paint::Solid(look.color));
    let hatch = Paint::Solid(look.color.darken(0.45));
    for i in -1..=1 {
        let offset = i as f64 * r * 0.45;
        let half_chord = (r * r - offset * offset).max(0.0).sqrt();
        ctx.stroke_path(
            &Path::line(DVec2::new(offset, -half_chord), DVec2::new(offset, half_chord)),
            &hatch,
            1.0,
        );
        ctx.stroke_path(
            &Path::line(DVec2::new(-half_chord, offset), DVec2::new(half_chord, offset)),
            &hatch,
            1.0,
        );
    }
    ctx.stroke_path(&disc, &Paint::Solid(look.color.darken(0.4)), 2.0);
}

// ---- Particles ----

/// Point sprite input, in the particle's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleLook {
    pub radius: f64,
    /// Lifetime progress in [0, 1].
    pub progress: f64,
    pub color: Color,
}

#[derive(Clone, Copy)]
pub enum ParticleDraw {
    Sprite(fn(&mut dyn DrawContext, &ParticleLook)),
    /// Two-endpoint primitive from the position to the target.
    Beam,
}

pub struct ParticleStyle {
    pub kind: ParticleKind,
    pub color: Color,
    pub draw: ParticleDraw,
}

pub static PARTICLE_STYLES: [ParticleStyle; 8] = [
    ParticleStyle {
        kind: ParticleKind::Smoke,
        color: Color::rgb(0x90, 0x90, 0x90),
        draw: ParticleDraw::Sprite(draw_smoke),
    },
    ParticleStyle {
        kind: ParticleKind::Spark,
        color: Color::rgb(0xff, 0xe0, 0x70),
        draw: ParticleDraw::Sprite(draw_spark),
    },
    ParticleStyle {
        kind: ParticleKind::Debris,
        color: Color::rgb(0x60, 0x60, 0x60),
        draw: ParticleDraw::Sprite(draw_debris),
    },
    ParticleStyle {
        kind: ParticleKind::SnowHex,
        color: Color::rgb(0xcf, 0xf4, 0xff),
        draw: ParticleDraw::Sprite(draw_snow_hex),
    },
    ParticleStyle {
        kind: ParticleKind::GhostTrail,
        color: Color::rgb(0xb0, 0xb0, 0xff),
        draw: ParticleDraw::Sprite(draw_ghost_trail),
    },
    ParticleStyle {
        kind: ParticleKind::Shockwave,
        color: Color::WHITE,
        draw: ParticleDraw::Sprite(draw_shockwave),
    },
    ParticleStyle {
        kind: ParticleKind::TeleportFlash,
        color: Color::rgb(0xe0, 0xf8, 0xff),
        draw: ParticleDraw::Sprite(draw_teleport_flash),
    },
    ParticleStyle {
        kind: ParticleKind::Beam,
        color: Color::rgb(0x5c, 0xe1, 0xff),
        draw: ParticleDraw::Beam,
    },
];

pub fn particle_style(kind: ParticleKind) -> &'static ParticleStyle {
    PARTICLE_STYLES
        .iter()
        .find(|s| s.kind == kind)
        .unwrap_or(&PARTICLE_STYLES[0])
}

pub fn draw_particle(
    ctx: &mut dyn DrawContext,
    entity: &EntityView,
    kind: ParticleKind,
    target: Option<DVec2>,
) {
    let style = particle_style(kind);
    let look = ParticleLook {
        radius: entity.transform.radius.max(0.0),
        progress: entity.lifespan.map(|l| l.progress()).unwrap_or(0.0),
        color: entity_color(entity, style.color),
    };
    match style.draw {
        ParticleDraw::Sprite(draw) => {
            ctx.save();
            ctx.translate(entity.transform.position);
            ctx.rotate(heading(entity));
            draw(ctx, &look);
            ctx.restore();
        }
        ParticleDraw::Beam => {
            // A beam without an endpoint has nothing to draw.
            if let Some(target) = target {
                draw_beam(ctx, entity.transform.position, target, look.radius, look.color, look.progress);
            }
        }
    }
}

/// Outer glow, white-hot core and a flare at the target, all additive so
/// overlapping beams intensify.
pub fn draw_beam(
    ctx: &mut dyn DrawContext,
    from: DVec2,
    to: DVec2,
    width: f64,
    color: Color,
    progress: f64,
) {
    let fade = (1.0 - progress).clamp(0.0, 1.0);
    let line = Path::line(from, to);
    ctx.save();
    ctx.set_composite(CompositeMode::Lighter);
    ctx.stroke_path(&line, &Paint::Solid(color.with_alpha(0.35 * fade)), width * 3.0);
    ctx.stroke_path(&line, &Paint::Solid(Color::WHITE.with_alpha(fade)), width);
    let flare = width * 2.0;
    ctx.fill_path(
        &Path::circle(to, flare),
        &Paint::Radial {
            center: to,
            radius: flare,
            stops: vec![
                (0.0, Color::WHITE.with_alpha(fade)),
                (1.0, color.with_alpha(0.0)),
            ],
        },
    );
    ctx.restore();
}

fn draw_smoke(ctx: &mut dyn DrawContext, look: &ParticleLook) {
    let fade = 1.0 - look.progress;
    ctx.fill_path(
        &Path::circle(DVec2::ZERO, look.radius * (1.0 + look.progress)),
        &Paint::Solid(look.color.with_alpha(0.5 * fade)),
    );
}

fn draw_spark(ctx: &mut dyn DrawContext, look: &ParticleLook) {
    let fade = 1.0 - look.progress;
    ctx.stroke_path(
        &Path::line(DVec2::new(-look.radius * 3.0, 0.0), DVec2::ZERO),
        &Paint::Solid(look.color.with_alpha(fade)),
        look.radius,
    );
}

fn draw_debris(ctx: &mut dyn DrawContext, look: &ParticleLook) {
    let r = look.radius;
    ctx.rotate(look.progress * TAU);
    ctx.fill_path(
        &Path::rect(DVec2::splat(-r), DVec2::splat(r * 2.0)),
        &Paint::Solid(look.color.with_alpha(1.0 - look.progress)),
    );
}

fn draw_snow_hex(ctx: &mut dyn DrawContext, look: &ParticleLook) {
    ctx.stroke_path(
        &trace(OutlineKind::Hexagon, look.radius),
        &Paint::Solid(look.color.with_alpha(1.0 - look.progress)),
        1.5,
    );
}

fn draw_ghost_trail(ctx: &mut dyn DrawContext, look: &ParticleLook) {
    ctx.fill_path(
        &Path::circle(DVec2::ZERO, look.radius),
        &Paint::Solid(look.color.with_alpha(0.3 * (1.0 - look.progress))),
    );
}

fn draw_shockwave(ctx: &mut dyn DrawContext, look: &ParticleLook) {
    let fade = 1.0 - look.progress;
    ctx.stroke_path(
        &Path::circle(DVec2::ZERO, look.radius * (1.0 + 2.0 * look.progress)),
        &Paint::Solid(look.color.with_alpha(fade)),
        3.0 * fade,
    );
}

fn draw_teleport_flash(ctx: &mut dyn DrawContext, look: &ParticleLook) {
    let radius = look.radius * (1.0 + look.progress);
    ctx.fill_path(
        &Path::circle(DVec2::ZERO, radius),
        &Paint::Radial {
            center: DVec2::ZERO,
            radius,
            stops: vec![
                (0.0, Color::WHITE.with_alpha(1.0 - look.progress)),
                (1.0, look.color.with_alpha(0.0)),
            ],
        },
    );
}
