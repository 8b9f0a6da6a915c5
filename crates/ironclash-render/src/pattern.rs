//! Zone fill patterns, memoized per color string.

use std::collections::HashMap;
use std::rc::Rc;

use glam::DVec2;
use log::debug;

use ironclash_core::types::Color;

use crate::style;

/// Diagonal-stripe tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub color: Color,
    /// Tile edge length in local units.
    pub tile: f64,
    pub stripe_width: f64,
}

impl Pattern {
    pub fn stripes(color: Color) -> Self {
        Self {
            color,
            tile: style::ZONE_PATTERN_TILE,
            stripe_width: style::ZONE_PATTERN_TILE * 0.35,
        }
    }

    pub fn sample(&self, point: DVec2) -> Color {
        let along = (point.x + point.y).rem_euclid(self.tile);
        if along < self.stripe_width {
            self.color.with_alpha(0.35)
        } else {
            self.color.with_alpha(0.12)
        }
    }
}

/// Renderer-owned cache. Grows by one entry per distinct color string and is
/// never invalidated.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: HashMap<String, Rc<Pattern>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared pattern for `color`. Unparseable strings get the default zone
    /// color but are still cached under their own key.
    pub fn get(&mut self, color: &str) -> Rc<Pattern> {
        if let Some(pattern) = self.patterns.get(color) {
            return Rc::clone(pattern);
        }
        let parsed = Color::parse(color).unwrap_or(style::ZONE_DEFAULT);
        debug!("generating zone pattern for {color:?}");
        let pattern = Rc::new(Pattern::stripes(parsed));
        self.patterns.insert(color.to_string(), Rc::clone(&pattern));
        pattern
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
