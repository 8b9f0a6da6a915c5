//! Software raster backend.
//!
//! A premultiplied RGBA surface with even-odd fills, distance-field strokes
//! and the three composite modes. No anti-aliasing: a pixel is covered when
//! its center is inside. Text renders as one box per glyph.

use glam::{DAffine2, DVec2};

use ironclash_core::types::Color;

use crate::context::{CompositeMode, DrawContext, Paint, TextStyle};
use crate::path::{Path, Polyline};

#[derive(Debug, Clone, Copy)]
struct State {
    transform: DAffine2,
    alpha: f64,
    composite: CompositeMode,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transform: DAffine2::IDENTITY,
            alpha: 1.0,
            composite: CompositeMode::SourceOver,
        }
    }
}

/// Pixel buffer that implements [`DrawContext`].
pub struct RasterSurface {
    width: usize,
    height: usize,
    /// Premultiplied RGBA in [0, 1].
    pixels: Vec<[f32; 4]>,
    state: State,
    stack: Vec<State>,
}

impl RasterSurface {
    /// Transparent surface.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width * height],
            state: State::default(),
            stack: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Straight-alpha color of a pixel; out-of-bounds reads are transparent.
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        if x >= self.width || y >= self.height {
            return Color::TRANSPARENT;
        }
        let [r, g, b, a] = self.pixels[y * self.width + x];
        if a <= 0.0 {
            return Color::TRANSPARENT;
        }
        let channel = |v: f32| ((v / a).clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::rgba(channel(r), channel(g), channel(b), (a.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Row-major straight RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.width * self.height * 4);
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.pixel(x, y);
                bytes.extend_from_slice(&[c.r, c.g, c.b, c.a]);
            }
        }
        bytes
    }

    fn blend(&mut self, index: usize, color: Color) {
        let [r, g, b, a] = color.to_f64().map(|v| v as f32);
        let sa = a * self.state.alpha as f32;
        let src = [r * sa, g * sa, b * sa, sa];
        let dst = &mut self.pixels[index];
        match self.state.composite {
            CompositeMode::SourceOver => {
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = s + *d * (1.0 - sa);
                }
            }
            CompositeMode::SourceAtop => {
                let da = dst[3];
                for (d, s) in dst.iter_mut().zip(src).take(3) {
                    *d = s * da + *d * (1.0 - sa);
                }
            }
            CompositeMode::Lighter => {
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = (s + *d).min(1.0);
                }
            }
        }
    }

    /// Device-space bounding box clipped to the surface, as pixel ranges.
    fn clip_bounds(&self, min: DVec2, max: DVec2) -> Option<(usize, usize, usize, usize)> {
        if !(min.is_finite() && max.is_finite()) {
            return None;
        }
        let x0 = min.x.floor().max(0.0) as usize;
        let y0 = min.y.floor().max(0.0) as usize;
        let x1 = (max.x.ceil().max(0.0) as usize).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as usize).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    fn fill_polylines(&mut self, polylines: &[Polyline], paint: &Paint, inverse: DAffine2) {
        let points = polylines.iter().flat_map(|p| p.points.iter().copied());
        let (min, max) = bounds(points);
        let Some((x0, y0, x1, y1)) = self.clip_bounds(min, max) else {
            return;
        };
        let mut crossings: Vec<f64> = Vec::new();
        for y in y0..y1 {
            let cy = y as f64 + 0.5;
            crossings.clear();
            // Fills treat every subpath as closed.
            for polyline in polylines {
                let n = polyline.points.len();
                for i in 0..n {
                    let a = polyline.points[i];
                    let b = polyline.points[(i + 1) % n];
                    if (a.y <= cy && b.y > cy) || (b.y <= cy && a.y > cy) {
                        crossings.push(a.x + (cy - a.y) / (b.y - a.y) * (b.x - a.x));
                    }
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for span in crossings.chunks_exact(2) {
                let start = ((span[0] - 0.5).ceil().max(x0 as f64)) as usize;
                let end = ((span[1] - 0.5).ceil().max(0.0) as usize).min(x1);
                for x in start..end {
                    let local = inverse.transform_point2(DVec2::new(x as f64 + 0.5, cy));
                    let color = paint.sample(local);
                    self.blend(y * self.width + x, color);
                }
            }
        }
    }

    fn stroke_polylines(
        &mut self,
        polylines: &[Polyline],
        paint: &Paint,
        half_width: f64,
        inverse: DAffine2,
    ) {
        let points = polylines.iter().flat_map(|p| p.points.iter().copied());
        let (min, max) = bounds(points);
        let pad = DVec2::splat(half_width + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip_bounds(min - pad, max + pad) else {
            return;
        };
        let span = x1 - x0;
        let mut mask = vec![false; span * (y1 - y0)];
        for polyline in polylines {
            for (a, b) in polyline.segments() {
                let (smin, smax) = bounds([a, b]);
                let Some((sx0, sy0, sx1, sy1)) = self.clip_bounds(smin - pad, smax + pad) else {
                    continue;
                };
                for y in sy0..sy1 {
                    for x in sx0..sx1 {
                        let center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                        if distance_to_segment(center, a, b) <= half_width {
                            mask[(y - y0) * span + (x - x0)] = true;
                        }
                    }
                }
            }
        }
        for y in y0..y1 {
            for x in x0..x1 {
                if mask[(y - y0) * span + (x - x0)] {
                    let local = inverse.transform_point2(DVec2::new(x as f64 + 0.5, y as f64 + 0.5));
                    let color = paint.sample(local);
                    self.blend(y * self.width + x, color);
                }
            }
        }
    }
}

impl DrawContext for RasterSurface {
    fn size(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.height as f64)
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn transform(&mut self, transform: DAffine2) {
        self.state.transform = self.state.transform * transform;
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.state.composite = mode;
    }

    fn clear(&mut self, color: Color) {
        let [r, g, b, a] = color.to_f64().map(|v| v as f32);
        self.pixels.fill([r * a, g * a, b * a, a]);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        let transform = self.state.transform;
        let polylines = path.flatten(&transform);
        self.fill_polylines(&polylines, paint, transform.inverse());
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, width: f64) {
        let transform = self.state.transform;
        let scale = transform.matrix2.determinant().abs().sqrt();
        let half_width = (width * scale * 0.5).max(0.5);
        let polylines = path.flatten(&transform);
        self.stroke_polylines(&polylines, paint, half_width, transform.inverse());
    }

    fn fill_text(&mut self, text: &str, anchor: DVec2, style: &TextStyle) {
        let advance = style.size * 0.6;
        let glyph = DVec2::new(
            style.size * if style.bold { 0.52 } else { 0.45 },
            style.size * 0.7,
        );
        let count = text.chars().count() as f64;
        let left = anchor.x - advance * count * 0.5;
        let paint = Paint::Solid(style.fill);
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let center = DVec2::new(left + advance * (i as f64 + 0.5), anchor.y);
            self.fill_path(&Path::rect(center - glyph * 0.5, glyph), &paint);
        }
    }
}

fn bounds(points: impl IntoIterator<Item = DVec2>) -> (DVec2, DVec2) {
    points.into_iter().fold(
        (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
        |(min, max), p| (min.min(p), max.max(p)),
    )
}

fn distance_to_segment(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq <= 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_covers_inside_only() {
        let mut surface = RasterSurface::new(20, 20);
        surface.fill_path(
            &Path::rect(DVec2::new(5.0, 5.0), DVec2::new(10.0, 10.0)),
            &Paint::Solid(Color::rgb(255, 0, 0)),
        );
        assert_eq!(surface.pixel(10, 10), Color::rgb(255, 0, 0));
        assert_eq!(surface.pixel(2, 2), Color::TRANSPARENT);
        assert_eq!(surface.pixel(15, 10), Color::TRANSPARENT);
    }

    #[test]
    fn test_source_atop_keeps_transparent_pixels() {
        let mut surface = RasterSurface::new(20, 20);
        surface.fill_path(&Path::circle(DVec2::new(10.0, 10.0), 4.0), &Paint::Solid(Color::BLACK));
        surface.set_composite(CompositeMode::SourceAtop);
        surface.fill_path(&Path::rect(DVec2::ZERO, DVec2::splat(20.0)), &Paint::Solid(Color::WHITE));
        assert_eq!(surface.pixel(10, 10), Color::WHITE);
        assert_eq!(surface.pixel(1, 1), Color::TRANSPARENT);
    }

    #[test]
    fn test_lighter_adds() {
        let mut surface = RasterSurface::new(4, 4);
        surface.clear(Color::rgb(100, 0, 0));
        surface.set_composite(CompositeMode::Lighter);
        surface.fill_path(
            &Path::rect(DVec2::ZERO, DVec2::splat(4.0)),
            &Paint::Solid(Color::rgb(100, 50, 0)),
        );
        assert_eq!(surface.pixel(1, 1), Color::rgb(200, 50, 0));
    }

    #[test]
    fn test_transformed_gradient_sampled_in_local_space() {
        let mut surface = RasterSurface::new(20, 20);
        surface.translate(DVec2::new(10.0, 10.0));
        let paint = Paint::Linear {
            from: DVec2::new(-5.0, 0.0),
            to: DVec2::new(5.0, 0.0),
            stops: vec![(0.0, Color::BLACK), (1.0, Color::WHITE)],
        };
        surface.fill_path(&Path::rect(DVec2::splat(-5.0), DVec2::splat(10.0)), &paint);
        assert!(surface.pixel(6, 10).r < surface.pixel(13, 10).r);
    }
}
