//! Visual timers: damage flash countdown and the stealth fade.

use hecs::World;

use ironclash_core::components::*;
use ironclash_core::config::ConfigRegistry;
use ironclash_core::constants::*;

/// Opacity of a stealth class after `idle_secs` without moving or firing.
pub fn stealth_opacity(idle_secs: f64) -> f64 {
    let t = (idle_secs / STEALTH_FADE_SECS).clamp(0.0, 1.0);
    1.0 + (STEALTH_MIN_OPACITY - 1.0) * t
}

pub fn run(world: &mut World, registry: &ConfigRegistry, dt: f64) {
    for (_entity, (visual, class, input, fire)) in world.query_mut::<(
        &mut VisualFlags,
        Option<&ClassId>,
        Option<&MoveInput>,
        Option<&FireControl>,
    )>() {
        visual.flash_secs = (visual.flash_secs - dt).max(0.0);

        let stealth = class
            .and_then(|c| registry.get(&c.0))
            .is_some_and(|config| config.visual.stealth);
        if !stealth {
            visual.invisibility_secs = 0.0;
            visual.opacity = 1.0;
            continue;
        }
        let active = input.is_some_and(|i| i.direction.length_squared() > 0.0)
            || fire.is_some_and(|f| f.held);
        visual.invisibility_secs = if active {
            0.0
        } else {
            visual.invisibility_secs + dt
        };
        visual.opacity = stealth_opacity(visual.invisibility_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stealth_fade_curve() {
        assert!((stealth_opacity(0.0) - 1.0).abs() < 1e-10);
        assert!((stealth_opacity(STEALTH_FADE_SECS) - STEALTH_MIN_OPACITY).abs() < 1e-10);
        assert!((stealth_opacity(100.0) - STEALTH_MIN_OPACITY).abs() < 1e-10);
        assert!(stealth_opacity(0.5) > stealth_opacity(1.0));
    }
}
