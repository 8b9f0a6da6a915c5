//! World renderer: background grid, arena border, zones and resources.

use glam::DVec2;

use ironclash_core::enums::ResourceShape;
use ironclash_core::state::EntityView;
use ironclash_core::types::{Camera, Color, Rect};

use crate::context::{DrawContext, Paint};
use crate::path::Path;
use crate::pattern::PatternCache;
use crate::settings::RenderSettings;
use crate::shape::trace;
use crate::style::*;

/// World rectangle covered by the viewport.
pub fn visible_rect(camera: &Camera, viewport: DVec2, resolution_scale: f64) -> Rect {
    let scale = camera.zoom * resolution_scale;
    let scale = if scale.is_finite() && scale > 1e-6 { scale } else { 1.0 };
    let center = if camera.position.is_finite() {
        camera.position
    } else {
        DVec2::ZERO
    };
    Rect::from_center(center, viewport / (2.0 * scale))
}

/// Grid segments inside `visible`, clamped to `[0, world_size]` on both
/// axes. Only lines crossing the visible rectangle are produced.
pub fn grid_lines(visible: &Rect, world_size: f64, spacing: f64) -> Vec<(DVec2, DVec2)> {
    let arena = Rect::new(DVec2::ZERO, DVec2::splat(world_size.max(0.0)));
    let view = visible.clamp_to(&arena);
    let degenerate = spacing.is_nan() || spacing <= 0.0;
    if view.is_empty() || degenerate || !view.min.is_finite() || !view.max.is_finite() {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut x = (view.min.x / spacing).ceil() * spacing;
    while x <= view.max.x {
        lines.push((DVec2::new(x, view.min.y), DVec2::new(x, view.max.y)));
        x += spacing;
    }
    let mut y = (view.min.y / spacing).ceil() * spacing;
    while y <= view.max.y {
        lines.push((DVec2::new(view.min.x, y), DVec2::new(view.max.x, y)));
        y += spacing;
    }
    lines
}

/// Clear, arena floor, grid and border. Expects the camera transform.
pub fn draw_background(ctx: &mut dyn DrawContext, visible: &Rect, world_size: f64, spacing: f64) {
    ctx.clear(BACKGROUND);
    let arena = Rect::new(DVec2::ZERO, DVec2::splat(world_size.max(0.0)));
    let floor = visible.clamp_to(&arena);
    if !floor.is_empty() {
        ctx.fill_path(&Path::rect(floor.min, floor.size()), &Paint::Solid(ARENA_FLOOR));
    }
    let paint = Paint::Solid(GRID_LINE);
    for (from, to) in grid_lines(visible, world_size, spacing) {
        ctx.stroke_path(&Path::line(from, to), &paint, GRID_LINE_WIDTH);
    }
    ctx.stroke_path(
        &Path::rect(arena.min, arena.size()),
        &Paint::Solid(ARENA_BORDER),
        4.0,
    );
}

/// Striped zone rectangle centered on the entity.
pub fn draw_zone(
    ctx: &mut dyn DrawContext,
    entity: &EntityView,
    size: DVec2,
    color: &str,
    patterns: &mut PatternCache,
) {
    let size = size.max(DVec2::ZERO);
    let rect = Path::rect(entity.transform.position - size * 0.5, size);
    let pattern = patterns.get(color);
    let edge = pattern.color;
    ctx.fill_path(&rect, &Paint::Pattern(pattern));
    ctx.stroke_path(&rect, &Paint::Solid(edge.with_alpha(0.6)), 2.0);
}

/// Glassy resource polygon.
pub fn draw_resource(
    ctx: &mut dyn DrawContext,
    entity: &EntityView,
    shape: ResourceShape,
    color: &str,
    settings: &RenderSettings,
) {
    let base = Color::parse(color).unwrap_or(RESOURCE_DEFAULT);
    let r = entity.transform.radius.max(0.0);
    let outline = trace(shape.outline(), r);
    let fill = if settings.gradients() {
        Paint::Radial {
            center: DVec2::ZERO,
            radius: r,
            stops: vec![
                (0.0, base.lighten(0.5)),
                (0.5, base),
                (1.0, base.darken(0.35)),
            ],
        }
    } else {
        Paint::Solid(base)
    };
    ctx.save();
    ctx.translate(entity.transform.position);
    ctx.rotate(entity.transform.rotation);
    ctx.fill_path(&outline, &fill);
    ctx.stroke_path(&outline, &Paint::Solid(base.darken(0.4)), 2.5);
    ctx.stroke_path(
        &trace(shape.outline(), r * 0.65),
        &Paint::Solid(base.lighten(0.6).with_alpha(0.5)),
        1.5,
    );
    ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_rect_scales_with_zoom() {
        let camera = Camera::looking_at(DVec2::new(500.0, 500.0), 2.0);
        let rect = visible_rect(&camera, DVec2::new(800.0, 600.0), 1.0);
        assert!((rect.size().x - 400.0).abs() < 1e-10);
        assert!((rect.size().y - 300.0).abs() < 1e-10);
        assert_eq!(rect.center(), DVec2::new(500.0, 500.0));
    }

    #[test]
    fn test_grid_skipped_outside_world() {
        let rect = Rect::from_center(DVec2::splat(-1000.0), DVec2::splat(100.0));
        assert!(grid_lines(&rect, 4000.0, 40.0).is_empty());
        let rect = Rect::from_center(DVec2::splat(100.0), DVec2::splat(50.0));
        assert!(grid_lines(&rect, 4000.0, 0.0).is_empty());
    }
}
