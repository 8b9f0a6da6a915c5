//! Tank renderer.
//!
//! Per entity, back to front: barrels, treads, body, decoration, status
//! tints, damage flash. Everything is drawn in the entity's local frame
//! (origin at the body center, +x along the facing).

use glam::{DAffine2, DVec2};

use ironclash_core::components::{BarrelState, StatusEffects};
use ironclash_core::config::{Barrel, Specialization, TankConfiguration};
use ironclash_core::constants::FLASH_DURATION_SECS;
use ironclash_core::enums::{BarrelShape, OutlineKind, StatusKind};
use ironclash_core::state::EntityView;
use ironclash_core::types::Color;

use crate::context::{CompositeMode, DrawContext, Paint, TextStyle};
use crate::path::Path;
use crate::settings::RenderSettings;
use crate::shape::trace;
use crate::style::{self, *};

/// How the body of a combatant looks. Bosses supply their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyLook {
    pub outline: OutlineKind,
    pub body: Color,
    pub decoration: Decoration,
}

impl BodyLook {
    /// Look of a regular tank: configured outline and colors, team color
    /// fallback.
    pub fn for_tank(entity: &EntityView, config: &TankConfiguration) -> Self {
        let body = config
            .visual
            .body_color()
            .or_else(|| entity.color.as_deref().and_then(Color::parse))
            .unwrap_or_else(|| style::team_color(entity.team));
        Self {
            outline: config.outline,
            body,
            decoration: Decoration::for_outline(config.outline),
        }
    }
}

/// Body ornament drawn over the fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    /// Saw-blade hub for spiked bodies.
    SawHub,
    /// Rivets and seams for rammer plating.
    RivetPlating,
    InnerShine,
    /// Single eye, used by the guardian boss.
    Eye,
}

impl Decoration {
    pub fn for_outline(outline: OutlineKind) -> Self {
        match outline {
            OutlineKind::Spiked => Decoration::SawHub,
            OutlineKind::Hexagon | OutlineKind::Octagon => Decoration::RivetPlating,
            _ => Decoration::InnerShine,
        }
    }

    pub fn draw(self, ctx: &mut dyn DrawContext, outline: OutlineKind, radius: f64, body: Color) {
        match self {
            Decoration::SawHub => draw_saw_hub(ctx, radius, body),
            Decoration::RivetPlating => draw_rivets(ctx, outline, radius, body),
            Decoration::InnerShine => draw_shine(ctx, radius),
            Decoration::Eye => draw_eye(ctx, radius),
        }
    }
}

/// A barrel's silhouette and where it sits in the entity frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BarrelPose {
    pub index: usize,
    pub transform: DAffine2,
    pub path: Path,
}

/// Backward kick of a barrel, capped at a fraction of its length.
pub fn barrel_pull(barrel: &Barrel, radius: f64, recoil: f64) -> f64 {
    let pull = (recoil * RECOIL_VISUAL_SCALE).min(barrel.length * radius * MAX_RECOIL_PULL_FRACTION);
    if pull.is_finite() {
        pull.max(0.0)
    } else {
        0.0
    }
}

/// Barrel outline with the mount at the origin, muzzle along +x.
pub fn barrel_path(barrel: &Barrel, radius: f64) -> Path {
    let length = barrel.length * radius;
    let half = barrel.width * radius * 0.5;
    let muzzle = match barrel.shape {
        BarrelShape::Straight => half,
        BarrelShape::Flared => half * 1.6,
        BarrelShape::Tapered => half * 0.7,
    };
    Path::polygon([
        DVec2::new(0.0, -half),
        DVec2::new(length, -muzzle),
        DVec2::new(length, muzzle),
        DVec2::new(0.0, half),
    ])
}

pub fn barrel_poses(config: &TankConfiguration, radius: f64, state: &BarrelState) -> Vec<BarrelPose> {
    config
        .barrels
        .iter()
        .enumerate()
        .map(|(index, barrel)| {
            let pull = barrel_pull(barrel, radius, state.recoil_at(index));
            let transform = DAffine2::from_translation(barrel.offset * radius)
                * DAffine2::from_angle(barrel.angle)
                * DAffine2::from_translation(DVec2::new(-pull, 0.0));
            BarrelPose {
                index,
                transform,
                path: barrel_path(barrel, radius),
            }
        })
        .collect()
}

/// Tick mark positions along a tread of `half_length`, scrolled by the
/// distance traveled.
pub fn tread_marks(half_length: f64, distance: f64) -> Vec<f64> {
    let phase = if distance.is_finite() {
        distance.rem_euclid(TREAD_SPACING)
    } else {
        0.0
    };
    let mut marks = Vec::new();
    let mut x = -half_length + (TREAD_SPACING - phase).rem_euclid(TREAD_SPACING);
    while x <= half_length {
        marks.push(x);
        x += TREAD_SPACING;
    }
    marks
}

/// Draw a combatant at its world position.
pub fn draw_combatant(
    ctx: &mut dyn DrawContext,
    entity: &EntityView,
    config: &TankConfiguration,
    look: &BodyLook,
    settings: &RenderSettings,
) {
    let radius = entity.transform.radius.max(0.0);
    ctx.save();
    ctx.translate(entity.transform.position);
    ctx.rotate(entity.transform.rotation);
    ctx.set_alpha(entity.visual.opacity.clamp(0.0, 1.0));
    draw_local(ctx, entity, config, look, radius, settings);
    ctx.restore();
}

/// Draw a combatant in the current frame, ignoring its position.
pub fn draw_local(
    ctx: &mut dyn DrawContext,
    entity: &EntityView,
    config: &TankConfiguration,
    look: &BodyLook,
    radius: f64,
    settings: &RenderSettings,
) {
    let poses = barrel_poses(config, radius, &entity.barrels);
    for pose in &poses {
        draw_barrel(ctx, config, &config.barrels[pose.index], pose, radius, &entity.barrels, settings);
    }
    let treads = if config.visual.treads {
        tread_bands(radius).to_vec()
    } else {
        Vec::new()
    };
    for (band, center_y) in &treads {
        draw_tread(ctx, band, *center_y, radius, entity.tread_distance);
    }
    let body = trace(look.outline, radius);
    draw_body(ctx, &body, radius, look.body, settings);
    if settings.decorations() {
        look.decoration.draw(ctx, look.outline, radius, look.body);
    }
    draw_status_tints(ctx, &body, &entity.status);
    if entity.visual.flash_secs > 0.0 {
        let intensity = (entity.visual.flash_secs / FLASH_DURATION_SECS).clamp(0.0, 1.0);
        let mut silhouette = vec![body.clone()];
        silhouette.extend(treads.into_iter().map(|(band, _)| band));
        draw_flash(ctx, &silhouette, &poses, intensity);
    }
}

fn draw_barrel(
    ctx: &mut dyn DrawContext,
    config: &TankConfiguration,
    barrel: &Barrel,
    pose: &BarrelPose,
    radius: f64,
    state: &BarrelState,
    settings: &RenderSettings,
) {
    let (base, highlight) = material_colors(barrel.material);
    let base = config.visual.barrel_color().unwrap_or(base);
    let length = barrel.length * radius;
    let half = barrel.width * radius * 0.5;

    ctx.save();
    ctx.transform(pose.transform);
    if let Some(Specialization::AutoTurret) = barrel.specialization {
        ctx.fill_path(&Path::circle(DVec2::ZERO, half * 1.6), &Paint::Solid(base));
        ctx.stroke_path(&Path::circle(DVec2::ZERO, half * 1.6), &Paint::Solid(OUTLINE), 2.0);
    }
    let paint = if settings.gradients() {
        Paint::Linear {
            from: DVec2::new(0.0, -half),
            to: DVec2::new(0.0, half),
            stops: vec![(0.0, base), (0.5, highlight), (1.0, base)],
        }
    } else {
        Paint::Solid(base)
    };
    ctx.fill_path(&pose.path, &paint);
    ctx.stroke_path(&pose.path, &Paint::Solid(OUTLINE), 2.5);
    if let Some(Specialization::TrapLayer) = barrel.specialization {
        let cap = Path::polygon([
            DVec2::new(length, -half),
            DVec2::new(length + half, -half * 1.8),
            DVec2::new(length + half, half * 1.8),
            DVec2::new(length, half),
        ]);
        ctx.fill_path(&cap, &Paint::Solid(base));
        ctx.stroke_path(&cap, &Paint::Solid(OUTLINE), 2.5);
    }

    let glow = state.glow(pose.index, barrel);
    if glow > 0.0 {
        let color = charge_glow(barrel.material);
        let muzzle = DVec2::new(length, 0.0);
        let glow_radius = half * (0.6 + 0.8 * glow);
        let paint = if settings.gradients() {
            Paint::Radial {
                center: muzzle,
                radius: glow_radius,
                stops: vec![
                    (0.0, Color::WHITE.with_alpha(glow)),
                    (0.5, color.with_alpha(glow)),
                    (1.0, color.with_alpha(0.0)),
                ],
            }
        } else {
            Paint::Solid(color.with_alpha(glow))
        };
        ctx.fill_path(&Path::circle(muzzle, glow_radius), &paint);
    }
    ctx.restore();
}

/// Both tread bands with the y of their center line.
fn tread_bands(radius: f64) -> [(Path, f64); 2] {
    let half_length = radius * 0.95;
    let band = radius * 0.35;
    [-1.0, 1.0].map(|side| {
        let center_y = side * (radius * 0.85);
        let rect = Path::rect(
            DVec2::new(-half_length, center_y - band * 0.5),
            DVec2::new(half_length * 2.0, band),
        );
        (rect, center_y)
    })
}

fn draw_tread(ctx: &mut dyn DrawContext, rect: &Path, center_y: f64, radius: f64, distance: f64) {
    let half_band = radius * 0.35 * 0.5;
    let dark = Color::rgb(0x44, 0x44, 0x44);
    ctx.fill_path(rect, &Paint::Solid(Color::rgb(0x6b, 0x6b, 0x6b)));
    for x in tread_marks(radius * 0.95, distance) {
        let mark = Path::line(
            DVec2::new(x, center_y - half_band),
            DVec2::new(x, center_y + half_band),
        );
        ctx.stroke_path(&mark, &Paint::Solid(dark), 1.5);
    }
    ctx.stroke_path(rect, &Paint::Solid(dark), 2.0);
}

fn draw_body(ctx: &mut dyn DrawContext, body: &Path, radius: f64, color: Color, settings: &RenderSettings) {
    let paint = if settings.gradients() {
        Paint::Linear {
            from: DVec2::splat(-radius),
            to: DVec2::splat(radius),
            stops: vec![(0.0, color.lighten(0.25)), (1.0, color.darken(0.25))],
        }
    } else {
        Paint::Solid(color)
    };
    ctx.fill_path(body, &paint);
    ctx.stroke_path(body, &Paint::Solid(color.darken(0.4)), BODY_STROKE_WIDTH);
}

fn draw_saw_hub(ctx: &mut dyn DrawContext, radius: f64, body: Color) {
    let hub = Path::circle(DVec2::ZERO, radius * 0.35);
    ctx.fill_path(&hub, &Paint::Solid(body.darken(0.3)));
    ctx.stroke_path(&hub, &Paint::Solid(OUTLINE), 2.0);
    for i in 0..6 {
        let dir = DVec2::from_angle(i as f64 * std::f64::consts::TAU / 6.0);
        ctx.stroke_path(
            &Path::line(dir * radius * 0.12, dir * radius * 0.33),
            &Paint::Solid(OUTLINE),
            1.5,
        );
    }
}

fn draw_rivets(ctx: &mut dyn DrawContext, outline: OutlineKind, radius: f64, body: Color) {
    let seam = body.darken(0.45);
    ctx.stroke_path(&trace(outline, radius * 0.7), &Paint::Solid(seam), 1.5);
    let sides = outline.polygon_sides().unwrap_or(6);
    let start = crate::shape::polygon_start_angle(sides);
    for i in 0..sides {
        let at = DVec2::from_angle(start + std::f64::consts::TAU * i as f64 / sides as f64)
            * radius
            * 0.82;
        let rivet = Path::circle(at, radius * 0.06);
        ctx.fill_path(&rivet, &Paint::Solid(body.lighten(0.35)));
        ctx.stroke_path(&rivet, &Paint::Solid(seam), 1.0);
    }
}

fn draw_shine(ctx: &mut dyn DrawContext, radius: f64) {
    let center = DVec2::splat(-radius * 0.3);
    let paint = Paint::Radial {
        center,
        radius: radius * 0.4,
        stops: vec![
            (0.0, Color::WHITE.with_alpha(0.35)),
            (1.0, Color::WHITE.with_alpha(0.0)),
        ],
    };
    ctx.fill_path(&Path::circle(center, radius * 0.4), &paint);
}

fn draw_eye(ctx: &mut dyn DrawContext, radius: f64) {
    let center = DVec2::new(radius * 0.1, 0.0);
    ctx.fill_path(&Path::circle(center, radius * 0.3), &Paint::Solid(Color::WHITE));
    ctx.fill_path(
        &Path::circle(center + DVec2::X * radius * 0.08, radius * 0.16),
        &Paint::Solid(Color::rgb(0xd0, 0x20, 0x20)),
    );
    ctx.fill_path(
        &Path::circle(center + DVec2::X * radius * 0.1, radius * 0.07),
        &Paint::Solid(Color::BLACK),
    );
    ctx.stroke_path(&Path::circle(center, radius * 0.3), &Paint::Solid(OUTLINE), 2.0);
}

/// Burn and freeze tints, traced with the body outline.
fn draw_status_tints(ctx: &mut dyn DrawContext, body: &Path, status: &StatusEffects) {
    if status.has(StatusKind::Burn) {
        ctx.fill_path(body, &Paint::Solid(BURN_TINT));
    }
    if status.has(StatusKind::Slow) {
        ctx.fill_path(body, &Paint::Solid(FREEZE_TINT));
    }
}

/// White flash over the pixels this entity already painted: filled through
/// its own body, tread and barrel silhouettes with `SourceAtop`.
fn draw_flash(ctx: &mut dyn DrawContext, silhouette: &[Path], poses: &[BarrelPose], intensity: f64) {
    let paint = Paint::Solid(FLASH.with_alpha(FLASH.to_f64()[3] * intensity));
    ctx.save();
    ctx.set_composite(CompositeMode::SourceAtop);
    for pose in poses {
        ctx.save();
        ctx.transform(pose.transform);
        ctx.fill_path(&pose.path, &paint);
        ctx.restore();
    }
    for path in silhouette {
        ctx.fill_path(path, &paint);
    }
    ctx.restore();
}

/// Mount markers and barrel indices for the design tool.
pub fn draw_debug(ctx: &mut dyn DrawContext, config: &TankConfiguration, radius: f64) {
    let marker = Paint::Solid(Color::rgb(0xff, 0x30, 0x30));
    ctx.stroke_path(&Path::circle(DVec2::ZERO, radius), &Paint::Solid(Color::rgba(255, 48, 48, 140)), 1.0);
    for (i, barrel) in config.barrels.iter().enumerate() {
        let mount = barrel.offset * radius;
        ctx.fill_path(&Path::circle(mount, 3.0), &marker);
        let tip = mount + DVec2::from_angle(barrel.angle) * barrel.length * radius;
        ctx.stroke_path(&Path::line(mount, tip), &marker, 1.0);
        ctx.fill_text(
            &i.to_string(),
            tip,
            &TextStyle {
                size: 10.0,
                fill: Color::rgb(0xff, 0x30, 0x30),
                ..Default::default()
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoil_pull_is_capped() {
        let barrel = Barrel::default();
        assert!((barrel_pull(&barrel, 24.0, 1.0) - RECOIL_VISUAL_SCALE).abs() < 1e-10);
        let cap = barrel.length * 24.0 * MAX_RECOIL_PULL_FRACTION;
        assert!((barrel_pull(&barrel, 24.0, 1000.0) - cap).abs() < 1e-10);
        assert_eq!(barrel_pull(&barrel, 24.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_tread_marks_scroll_within_band() {
        let still = tread_marks(20.0, 0.0);
        let moved = tread_marks(20.0, 3.0);
        assert!(still.iter().chain(&moved).all(|x| (-20.0..=20.0).contains(x)));
        assert!((still[0] - moved[0]).abs() > 1e-6);
        assert_eq!(tread_marks(20.0, 0.0), tread_marks(20.0, TREAD_SPACING * 7.0));
    }

    #[test]
    fn test_decoration_table() {
        assert_eq!(Decoration::for_outline(OutlineKind::Spiked), Decoration::SawHub);
        assert_eq!(Decoration::for_outline(OutlineKind::Hexagon), Decoration::RivetPlating);
        assert_eq!(Decoration::for_outline(OutlineKind::Octagon), Decoration::RivetPlating);
        assert_eq!(Decoration::for_outline(OutlineKind::Circle), Decoration::InnerShine);
    }
}
