//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Stable identifier of an arena entity, valid for one frame snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Spatial state of an entity in world units (y grows downward, screen style).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Facing in radians, 0 = +x, clockwise on screen.
    pub rotation: f64,
    pub radius: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            rotation: 0.0,
            radius: crate::constants::DEFAULT_TANK_RADIUS,
        }
    }
}

impl Transform {
    pub fn at(position: DVec2, radius: f64) -> Self {
        Self {
            position,
            radius,
            ..Default::default()
        }
    }

    /// Unit vector of the current facing.
    pub fn facing(&self) -> DVec2 {
        DVec2::from_angle(self.rotation)
    }

    /// Whether two bodies overlap (circle test).
    pub fn overlaps(&self, other: &Transform) -> bool {
        let reach = self.radius + other.radius;
        self.position.distance_squared(other.position) <= reach * reach
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. Returns `None` for anything else.
    pub fn parse(text: &str) -> Option<Self> {
        let hex = text.trim().strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// `#rrggbb` (or `#rrggbbaa` when not opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Linear blend toward `other` by `t` in [0, 1].
    pub fn mix(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::rgba(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
            lerp(self.a, other.a),
        )
    }

    pub fn lighten(self, amount: f64) -> Color {
        self.mix(Color::WHITE.with_alpha_u8(self.a), amount)
    }

    pub fn darken(self, amount: f64) -> Color {
        self.mix(Color::BLACK.with_alpha_u8(self.a), amount)
    }

    /// Replace alpha with a [0, 1] value.
    pub fn with_alpha(self, alpha: f64) -> Color {
        self.with_alpha_u8((alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    pub const fn with_alpha_u8(self, a: u8) -> Color {
        Color::rgba(self.r, self.g, self.b, a)
    }

    /// Channels as floats in [0, 1].
    pub fn to_f64(self) -> [f64; 4] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
            self.a as f64 / 255.0,
        ]
    }
}

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: DVec2, half_extent: DVec2) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// True when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        !(self.max.x > self.min.x && self.max.y > self.min.y)
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Intersection with `bounds`. May be empty.
    pub fn clamp_to(&self, bounds: &Rect) -> Rect {
        Rect {
            min: self.min.max(bounds.min),
            max: self.max.min(bounds.max),
        }
    }
}

/// Camera transform consumed by the draw orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World point at the viewport center.
    pub position: DVec2,
    pub zoom: f64,
    /// Screen-shake offset in world units.
    pub shake: DVec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            zoom: 1.0,
            shake: DVec2::ZERO,
        }
    }
}

impl Camera {
    pub fn looking_at(position: DVec2, zoom: f64) -> Self {
        Self {
            position,
            zoom,
            shake: DVec2::ZERO,
        }
    }
}
