//! User-facing render options.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ironclash_core::enums::Quality;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("malformed render settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read render settings: {0}")]
    Io(#[from] std::io::Error),
}

/// Recognized options. Missing keys take their defaults; the camelCase names
/// used by the settings screen are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub quality: Quality,
    pub particles: bool,
    #[serde(alias = "postProcessing")]
    pub post_processing: bool,
    #[serde(alias = "resolutionScale")]
    pub resolution_scale: f64,
    #[serde(alias = "showPerformance")]
    pub show_performance: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            quality: Quality::High,
            particles: true,
            post_processing: true,
            resolution_scale: 1.0,
            show_performance: false,
        }
    }
}

impl RenderSettings {
    pub fn from_text(text: &str) -> Result<Self, SettingsError> {
        let settings: RenderSettings = serde_json::from_str(text)?;
        Ok(settings.sanitized())
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        Self::from_text(&std::fs::read_to_string(path)?)
    }

    pub fn to_text(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolution scale forced into [0.25, 4].
    pub fn sanitized(self) -> Self {
        let resolution_scale = if self.resolution_scale.is_finite() {
            self.resolution_scale.clamp(0.25, 4.0)
        } else {
            1.0
        };
        Self {
            resolution_scale,
            ..self
        }
    }

    /// Gradients instead of solid fills.
    pub fn gradients(&self) -> bool {
        self.quality != Quality::Low
    }

    /// Body decorations and status tints.
    pub fn decorations(&self) -> bool {
        self.quality != Quality::Low
    }

    /// Per-frame randomized plasma arcs.
    pub fn plasma_arcs(&self) -> bool {
        self.quality == Quality::High
    }

    pub fn post_processing_enabled(&self) -> bool {
        self.post_processing && self.quality != Quality::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_text_accepts_camel_case() {
        let text = r#"{"quality":"medium","postProcessing":false,"resolutionScale":2.0,"showPerformance":true}"#;
        let settings = RenderSettings::from_text(text).unwrap();
        assert_eq!(settings.quality, Quality::Medium);
        assert!(settings.particles);
        assert!(!settings.post_processing);
        assert!((settings.resolution_scale - 2.0).abs() < 1e-10);
        assert!(settings.show_performance);
        assert!(!settings.plasma_arcs());
    }

    #[test]
    fn test_settings_round_trip_and_clamp() {
        let settings = RenderSettings {
            resolution_scale: 100.0,
            ..Default::default()
        }
        .sanitized();
        assert!((settings.resolution_scale - 4.0).abs() < 1e-10);
        let back = RenderSettings::from_text(&settings.to_text().unwrap()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_low_quality_disables_extras() {
        let settings = RenderSettings {
            quality: Quality::Low,
            ..Default::default()
        };
        assert!(!settings.gradients());
        assert!(!settings.decorations());
        assert!(!settings.post_processing_enabled());
        assert!(RenderSettings::from_text("not json").is_err());
    }
}
