//! Screen-space post-processing and the performance readout.
//!
//! Draw with an identity transform; coordinates are device pixels.

use glam::DVec2;

use ironclash_core::state::PlayerState;
use ironclash_core::types::Color;

use crate::context::{DrawContext, Paint, TextStyle};
use crate::path::Path;
use crate::style::LOW_HEALTH_THRESHOLD;

/// Edge darkening.
pub fn draw_vignette(ctx: &mut dyn DrawContext) {
    let size = ctx.size();
    let center = size * 0.5;
    let paint = Paint::Radial {
        center,
        radius: center.length(),
        stops: vec![
            (0.0, Color::TRANSPARENT),
            (0.6, Color::TRANSPARENT),
            (1.0, Color::BLACK.with_alpha(0.45)),
        ],
    };
    ctx.fill_path(&Path::rect(DVec2::ZERO, size), &paint);
}

/// Strength of the red edge tint in [0, 1]; 0 above the threshold or when
/// the player is dead.
pub fn low_health_intensity(player: &PlayerState) -> f64 {
    if !player.alive || player.health_fraction >= LOW_HEALTH_THRESHOLD {
        return 0.0;
    }
    ((LOW_HEALTH_THRESHOLD - player.health_fraction.max(0.0)) / LOW_HEALTH_THRESHOLD).clamp(0.0, 1.0)
}

pub fn draw_low_health_tint(ctx: &mut dyn DrawContext, player: &PlayerState) {
    let intensity = low_health_intensity(player);
    if intensity <= 0.0 {
        return;
    }
    let size = ctx.size();
    let center = size * 0.5;
    let red = Color::rgb(0xc0, 0x10, 0x10);
    let paint = Paint::Radial {
        center,
        radius: center.length(),
        stops: vec![
            (0.0, red.with_alpha(0.0)),
            (0.5, red.with_alpha(0.0)),
            (1.0, red.with_alpha(0.5 * intensity)),
        ],
    };
    ctx.fill_path(&Path::rect(DVec2::ZERO, size), &paint);
}

/// Counters shown when `show_performance` is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub total: usize,
    pub drawn: usize,
    pub culled: usize,
}

impl FrameStats {
    pub fn summary(&self) -> String {
        format!(
            "frame {}  drawn {}/{}  culled {}",
            self.frame, self.drawn, self.total, self.culled
        )
    }
}

pub fn draw_performance(ctx: &mut dyn DrawContext, stats: &FrameStats) {
    ctx.fill_text(
        &stats.summary(),
        DVec2::new(110.0, 16.0),
        &TextStyle {
            size: 12.0,
            fill: Color::WHITE,
            outline: Some(Color::BLACK),
            ..Default::default()
        },
    );
}
