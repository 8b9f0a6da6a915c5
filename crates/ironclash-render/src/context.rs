//! The drawing capability every backend provides.

use std::rc::Rc;

use glam::{DAffine2, DVec2};

use ironclash_core::types::Color;

use crate::path::Path;
use crate::pattern::Pattern;

/// How new pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompositeMode {
    #[default]
    SourceOver,
    /// Paint only where the destination is already opaque.
    SourceAtop,
    /// Additive.
    Lighter,
}

/// Fill or stroke source. Gradient and pattern coordinates are in the
/// local space active when the path is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear {
        from: DVec2,
        to: DVec2,
        stops: Vec<(f64, Color)>,
    },
    Radial {
        center: DVec2,
        radius: f64,
        stops: Vec<(f64, Color)>,
    },
    Pattern(Rc<Pattern>),
}

impl Paint {
    /// Color of the paint at a local-space point.
    pub fn sample(&self, point: DVec2) -> Color {
        match self {
            Paint::Solid(color) => *color,
            Paint::Linear { from, to, stops } => {
                let axis = *to - *from;
                let length_sq = axis.length_squared();
                let t = if length_sq > 0.0 {
                    (point - *from).dot(axis) / length_sq
                } else {
                    0.0
                };
                sample_stops(stops, t)
            }
            Paint::Radial {
                center,
                radius,
                stops,
            } => {
                let t = if *radius > 0.0 {
                    point.distance(*center) / radius
                } else {
                    1.0
                };
                sample_stops(stops, t)
            }
            Paint::Pattern(pattern) => pattern.sample(point),
        }
    }

    /// A representative flat color (the first stop for gradients).
    pub fn base_color(&self) -> Color {
        match self {
            Paint::Solid(color) => *color,
            Paint::Linear { stops, .. } | Paint::Radial { stops, .. } => {
                stops.first().map(|(_, c)| *c).unwrap_or(Color::TRANSPARENT)
            }
            Paint::Pattern(pattern) => pattern.color,
        }
    }
}

fn sample_stops(stops: &[(f64, Color)], t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if t <= first.0 {
        return first.1;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.0 {
            let span = b.0 - a.0;
            let local = if span > 0.0 { (t - a.0) / span } else { 1.0 };
            return a.1.mix(b.1, local);
        }
    }
    stops.last().map(|(_, c)| *c).unwrap_or(first.1)
}

/// Font request. Text is centered on its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub fill: Color,
    pub outline: Option<Color>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 14.0,
            bold: false,
            fill: Color::WHITE,
            outline: None,
        }
    }
}

/// Minimal 2D drawing capability set.
///
/// State (transform, alpha, composite mode) is saved and restored as a
/// stack, canvas style. The trait is object safe so dispatch tables can hold
/// plain `fn(&mut dyn DrawContext, ..)` pointers.
pub trait DrawContext {
    /// Surface size in device pixels.
    fn size(&self) -> DVec2;

    fn save(&mut self);
    fn restore(&mut self);

    /// Concatenate `transform` onto the current transform.
    fn transform(&mut self, transform: DAffine2);

    /// Replace the global alpha in [0, 1].
    fn set_alpha(&mut self, alpha: f64);
    fn set_composite(&mut self, mode: CompositeMode);

    /// Fill the whole surface, ignoring transform and composite mode.
    fn clear(&mut self, color: Color);

    /// Even-odd fill.
    fn fill_path(&mut self, path: &Path, paint: &Paint);
    fn stroke_path(&mut self, path: &Path, paint: &Paint, width: f64);
    fn fill_text(&mut self, text: &str, anchor: DVec2, style: &TextStyle);

    /// Debug grouping (no effect on pixels).
    fn begin_group(&mut self, _label: &str) {}
    fn end_group(&mut self) {}

    fn translate(&mut self, offset: DVec2) {
        self.transform(DAffine2::from_translation(offset));
    }

    fn rotate(&mut self, angle: f64) {
        self.transform(DAffine2::from_angle(angle));
    }

    fn scale(&mut self, factor: f64) {
        self.transform(DAffine2::from_scale(DVec2::splat(factor)));
    }
}
