//! Visual tuning: colors and drawing constants.

use ironclash_core::enums::BarrelMaterial;
use ironclash_core::types::Color;

// --- Geometry ---

/// World units of barrel pull-back per unit of recoil.
pub const RECOIL_VISUAL_SCALE: f64 = 2.0;

/// Largest pull-back as a fraction of the barrel's own length.
pub const MAX_RECOIL_PULL_FRACTION: f64 = 0.25;

/// Distance between tread tick marks.
pub const TREAD_SPACING: f64 = 8.0;

pub const BODY_STROKE_WIDTH: f64 = 3.0;

pub const GRID_LINE_WIDTH: f64 = 1.0;

pub const ZONE_PATTERN_TILE: f64 = 24.0;

/// Distance from the player to the leader arrow.
pub const LEADER_ARROW_RADIUS: f64 = 90.0;

/// Share of a floating text's lifetime spent on the pop-in.
pub const TEXT_POP_FRACTION: f64 = 0.2;

/// Below this health fraction the screen edges tint red.
pub const LOW_HEALTH_THRESHOLD: f64 = 0.3;

// --- Colors ---

pub const BACKGROUND: Color = Color::rgb(0xb8, 0xb8, 0xb8);
pub const ARENA_FLOOR: Color = Color::rgb(0xcd, 0xcd, 0xcd);
pub const GRID_LINE: Color = Color::rgba(0, 0, 0, 24);
pub const ARENA_BORDER: Color = Color::rgba(0, 0, 0, 80);
pub const OUTLINE: Color = Color::rgb(0x55, 0x55, 0x55);
pub const BARREL_BASE: Color = Color::rgb(0x99, 0x99, 0x99);
pub const ZONE_DEFAULT: Color = Color::rgb(0x8e, 0x8e, 0x8e);
pub const RESOURCE_DEFAULT: Color = Color::rgb(0xff, 0xe8, 0x69);
pub const CRIT_GOLD: Color = Color::rgb(0xff, 0xd7, 0x00);
pub const BURN_TINT: Color = Color::rgba(0xff, 0x6a, 0x00, 110);
pub const FREEZE_TINT: Color = Color::rgba(0x7f, 0xd8, 0xff, 120);
pub const FLASH: Color = Color::rgba(0xff, 0xff, 0xff, 200);
pub const HEALTH_GOOD: Color = Color::rgb(0x85, 0xe3, 0x7d);
pub const HEALTH_WARN: Color = Color::rgb(0xf2, 0xd3, 0x4c);
pub const HEALTH_LOW: Color = Color::rgb(0xe8, 0x4a, 0x4a);
pub const BAR_BACK: Color = Color::rgba(0x22, 0x22, 0x22, 200);

/// Body color of a team; team 0 is the local player's side.
pub fn team_color(team: u32) -> Color {
    const TEAMS: [Color; 6] = [
        Color::rgb(0x00, 0xb2, 0xe1),
        Color::rgb(0xf1, 0x4e, 0x54),
        Color::rgb(0x00, 0xe1, 0x6e),
        Color::rgb(0xbf, 0x7f, 0xf5),
        Color::rgb(0xfc, 0xa8, 0x3d),
        Color::rgb(0x8a, 0xd0, 0xc8),
    ];
    if team == u32::MAX {
        return RESOURCE_DEFAULT;
    }
    TEAMS[team as usize % TEAMS.len()]
}

/// (base, highlight) of a barrel finish.
pub fn material_colors(material: BarrelMaterial) -> (Color, Color) {
    match material {
        BarrelMaterial::Steel => (BARREL_BASE, Color::rgb(0xc4, 0xc4, 0xc4)),
        BarrelMaterial::Carbon => (Color::rgb(0x3a, 0x3a, 0x40), Color::rgb(0x66, 0x66, 0x70)),
        BarrelMaterial::Gold => (Color::rgb(0xd4, 0xa0, 0x17), Color::rgb(0xff, 0xe0, 0x80)),
        BarrelMaterial::Crystal => (Color::rgba(0x9a, 0xe6, 0xff, 200), Color::rgb(0xe8, 0xfb, 0xff)),
        BarrelMaterial::Plasma => (Color::rgb(0x6a, 0x3d, 0xd8), Color::rgb(0xe4, 0xc4, 0xff)),
    }
}

/// Muzzle glow of a charging barrel.
pub fn charge_glow(material: BarrelMaterial) -> Color {
    match material {
        BarrelMaterial::Plasma => Color::rgb(0xd0, 0x7a, 0xff),
        BarrelMaterial::Crystal => Color::rgb(0x9a, 0xf0, 0xff),
        _ => Color::rgb(0x7a, 0xe8, 0xff),
    }
}
