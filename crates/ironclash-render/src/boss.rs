//! Boss archetype styles.
//!
//! Bosses reuse the tank pipeline but take outline, colors and decoration
//! from a per-archetype record instead of their class.

use ironclash_core::config::TankConfiguration;
use ironclash_core::enums::{BossArchetype, OutlineKind};
use ironclash_core::presets;
use ironclash_core::state::EntityView;
use ironclash_core::types::Color;

use crate::context::DrawContext;
use crate::settings::RenderSettings;
use crate::tank::{self, BodyLook, Decoration};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossStyle {
    pub archetype: BossArchetype,
    pub outline: OutlineKind,
    pub body: Color,
    pub decoration: Decoration,
}

pub static BOSS_STYLES: [BossStyle; 4] = [
    BossStyle {
        archetype: BossArchetype::Summoner,
        outline: OutlineKind::Square,
        body: Color::rgb(0xff, 0xe8, 0x69),
        decoration: Decoration::InnerShine,
    },
    BossStyle {
        archetype: BossArchetype::Guardian,
        outline: OutlineKind::Triangle,
        body: Color::rgb(0xf1, 0x77, 0xdd),
        decoration: Decoration::Eye,
    },
    BossStyle {
        archetype: BossArchetype::FallenBooster,
        outline: OutlineKind::Circle,
        body: Color::rgb(0xc0, 0xc0, 0xc0),
        decoration: Decoration::InnerShine,
    },
    BossStyle {
        archetype: BossArchetype::Sentinel,
        outline: OutlineKind::Pentagon,
        body: Color::rgb(0x8a, 0xd0, 0x6a),
        decoration: Decoration::RivetPlating,
    },
];

pub fn style(archetype: BossArchetype) -> &'static BossStyle {
    BOSS_STYLES
        .iter()
        .find(|s| s.archetype == archetype)
        .unwrap_or(&BOSS_STYLES[0])
}

impl From<&BossStyle> for BodyLook {
    fn from(style: &BossStyle) -> Self {
        BodyLook {
            outline: style.outline,
            body: style.body,
            decoration: style.decoration,
        }
    }
}

/// Draw a boss. The weapon layout comes from `config` when its class is
/// registered, otherwise from the archetype preset.
pub fn draw_boss(
    ctx: &mut dyn DrawContext,
    entity: &EntityView,
    archetype: BossArchetype,
    config: Option<&TankConfiguration>,
    settings: &RenderSettings,
) {
    let look = BodyLook::from(style(archetype));
    match config {
        Some(config) => tank::draw_combatant(ctx, entity, config, &look, settings),
        None => {
            let preset = presets::boss_configuration(archetype);
            tank::draw_combatant(ctx, entity, &preset, &look, settings);
        }
    }
}
