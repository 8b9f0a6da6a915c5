//! UI overlay: name tags, health bars, floating combat text, leader arrow.

use glam::DVec2;

use ironclash_core::components::Lifespan;
use ironclash_core::state::EntityView;
use ironclash_core::types::Color;

use crate::context::{DrawContext, Paint, TextStyle};
use crate::path::Path;
use crate::style::*;

/// Thin-bar color by health fraction.
pub fn health_bar_color(fraction: f64) -> Color {
    if fraction > 0.6 {
        HEALTH_GOOD
    } else if fraction > 0.3 {
        HEALTH_WARN
    } else {
        HEALTH_LOW
    }
}

pub fn shows_health_bar(entity: &EntityView) -> bool {
    entity.is_damaged() || entity.is_player || entity.is_boss()
}

/// Floating-text scale: ease-out pop over the first part of the lifetime,
/// then a slow shrink.
pub fn text_scale(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    if p < TEXT_POP_FRACTION {
        let t = p / TEXT_POP_FRACTION;
        0.5 + 0.7 * (1.0 - (1.0 - t).powi(3))
    } else {
        1.2 - 0.4 * (p - TEXT_POP_FRACTION) / (1.0 - TEXT_POP_FRACTION)
    }
}

/// Linear fade; exactly 0 once the lifespan is used up.
pub fn text_opacity(lifespan: &Lifespan) -> f64 {
    1.0 - lifespan.progress()
}

pub fn draw_name(ctx: &mut dyn DrawContext, entity: &EntityView) {
    let Some(name) = entity.name.as_deref().filter(|n| !n.is_empty()) else {
        return;
    };
    let anchor = entity.transform.position - DVec2::new(0.0, entity.transform.radius + 14.0);
    ctx.fill_text(
        name,
        anchor,
        &TextStyle {
            size: 14.0,
            bold: true,
            fill: Color::WHITE,
            outline: Some(Color::rgb(0x33, 0x33, 0x33)),
        },
    );
}

pub fn draw_health_bar(ctx: &mut dyn DrawContext, entity: &EntityView) {
    if !shows_health_bar(entity) {
        return;
    }
    let fraction = entity.health_fraction();
    let r = entity.transform.radius;
    let (width, height, gap) = if entity.is_boss() {
        (r * 2.4, 10.0, 18.0)
    } else {
        (r * 2.0, 5.0, 10.0)
    };
    let origin = entity.transform.position + DVec2::new(-width * 0.5, r + gap);
    let back = Path::rect(origin - DVec2::splat(1.5), DVec2::new(width + 3.0, height + 3.0));
    ctx.fill_path(&back, &Paint::Solid(BAR_BACK));
    if fraction <= 0.0 {
        return;
    }
    let fill = Path::rect(origin, DVec2::new(width * fraction, height));
    let paint = if entity.is_boss() {
        Paint::Linear {
            from: origin,
            to: origin + DVec2::new(width, 0.0),
            stops: vec![(0.0, HEALTH_LOW), (1.0, HEALTH_WARN)],
        }
    } else {
        Paint::Solid(health_bar_color(fraction))
    };
    ctx.fill_path(&fill, &paint);
}

pub fn draw_floating_text(ctx: &mut dyn DrawContext, entity: &EntityView, text: &str, crit: bool) {
    let lifespan = entity.lifespan.unwrap_or(Lifespan::new(1.0));
    let opacity = text_opacity(&lifespan);
    if opacity <= 0.0 {
        return;
    }
    let base = if crit { 26.0 } else { 18.0 };
    let color = entity.color.as_deref().and_then(Color::parse).unwrap_or(if crit {
        CRIT_GOLD
    } else {
        Color::WHITE
    });
    ctx.save();
    ctx.set_alpha(opacity);
    ctx.fill_text(
        text,
        entity.transform.position,
        &TextStyle {
            size: base * text_scale(lifespan.progress()),
            bold: crit,
            fill: color,
            outline: Some(Color::rgb(0x22, 0x22, 0x22)),
        },
    );
    ctx.restore();
}

/// Anchor point and heading of the leader arrow, `None` when the leader
/// sits on the player.
pub fn leader_arrow(player: DVec2, leader: DVec2) -> Option<(DVec2, f64)> {
    let direction = (leader - player).normalize_or_zero();
    if direction == DVec2::ZERO {
        return None;
    }
    Some((player + direction * LEADER_ARROW_RADIUS, direction.to_angle()))
}

pub fn draw_leader_arrow(ctx: &mut dyn DrawContext, player: DVec2, leader: DVec2) {
    let Some((anchor, angle)) = leader_arrow(player, leader) else {
        return;
    };
    let arrow = Path::polygon([
        DVec2::new(12.0, 0.0),
        DVec2::new(-8.0, -9.0),
        DVec2::new(-3.0, 0.0),
        DVec2::new(-8.0, 9.0),
    ]);
    ctx.save();
    ctx.translate(anchor);
    ctx.rotate(angle);
    ctx.fill_path(&arrow, &Paint::Solid(Color::rgba(0, 0, 0, 140)));
    ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_bar_thresholds() {
        assert_eq!(health_bar_color(1.0), HEALTH_GOOD);
        assert_eq!(health_bar_color(0.5), HEALTH_WARN);
        assert_eq!(health_bar_color(0.1), HEALTH_LOW);
    }

    #[test]
    fn test_text_scale_pops_then_shrinks() {
        assert!((text_scale(0.0) - 0.5).abs() < 1e-10);
        assert!((text_scale(TEXT_POP_FRACTION) - 1.2).abs() < 1e-10);
        assert!(text_scale(0.1) > text_scale(0.0));
        assert!(text_scale(1.0) < text_scale(0.5));
        assert!((text_scale(1.0) - 0.8).abs() < 1e-10);
    }

    #[test]
    fn test_leader_arrow_radius_and_heading() {
        let (anchor, angle) = leader_arrow(DVec2::ZERO, DVec2::new(0.0, 500.0)).unwrap();
        assert!((anchor.length() - LEADER_ARROW_RADIUS).abs() < 1e-10);
        assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
        assert!(leader_arrow(DVec2::ONE, DVec2::ONE).is_none());
    }
}
