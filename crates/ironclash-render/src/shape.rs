//! Shape tracer: outline kind + radius → closed path centered on the origin.
//!
//! Pure and allocation-light, so it runs for every entity every frame
//! without caching.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec2;

use ironclash_core::enums::OutlineKind;

use crate::path::Path;

pub fn trace(kind: OutlineKind, radius: f64) -> Path {
    let radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
    match kind {
        OutlineKind::Circle => Path::circle(DVec2::ZERO, radius),
        OutlineKind::Triangle
        | OutlineKind::Square
        | OutlineKind::Pentagon
        | OutlineKind::Hexagon
        | OutlineKind::Octagon => regular_polygon(kind.polygon_sides().unwrap_or(3), radius),
        OutlineKind::Diamond => Path::polygon([
            DVec2::new(0.0, -radius),
            DVec2::new(radius * 0.75, 0.0),
            DVec2::new(0.0, radius),
            DVec2::new(-radius * 0.75, 0.0),
        ]),
        OutlineKind::Spiked => alternating(16, radius, radius * 0.8),
        OutlineKind::Star => alternating(10, radius, radius * 0.45),
        OutlineKind::Cross => cross(radius),
        OutlineKind::Heart => heart(radius),
    }
}

/// Angle of the first vertex: odd side counts point a vertex up, even side
/// counts rotate half a step to present a flat top.
pub fn polygon_start_angle(sides: usize) -> f64 {
    if sides % 2 == 1 {
        -FRAC_PI_2
    } else {
        -FRAC_PI_2 + PI / sides as f64
    }
}

pub fn regular_polygon(sides: usize, radius: f64) -> Path {
    let sides = sides.max(3);
    let start = polygon_start_angle(sides);
    Path::polygon(
        (0..sides).map(|i| DVec2::from_angle(start + TAU * i as f64 / sides as f64) * radius),
    )
}

/// `points` vertices alternating between `outer` and `inner`, first one up.
fn alternating(points: usize, outer: f64, inner: f64) -> Path {
    Path::polygon((0..points).map(|i| {
        let r = if i % 2 == 0 { outer } else { inner };
        DVec2::from_angle(-FRAC_PI_2 + TAU * i as f64 / points as f64) * r
    }))
}

fn cross(radius: f64) -> Path {
    let r = radius;
    let w = radius * 0.35;
    Path::polygon(
        [
            (w, -r),
            (w, -w),
            (r, -w),
            (r, w),
            (w, w),
            (w, r),
            (-w, r),
            (-w, w),
            (-r, w),
            (-r, -w),
            (-w, -w),
            (-w, -r),
        ]
        .map(|(x, y)| DVec2::new(x, y)),
    )
}

fn heart(radius: f64) -> Path {
    let r = radius;
    let mut path = Path::new();
    path.move_to(DVec2::new(0.0, 0.95 * r))
        .cubic_to(
            DVec2::new(-1.25 * r, 0.05 * r),
            DVec2::new(-0.6 * r, -1.1 * r),
            DVec2::new(0.0, -0.45 * r),
        )
        .cubic_to(
            DVec2::new(0.6 * r, -1.1 * r),
            DVec2::new(1.25 * r, 0.05 * r),
            DVec2::new(0.0, 0.95 * r),
        )
        .close();
    path
}
