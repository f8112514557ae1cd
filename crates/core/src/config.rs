//! Validation and JSON import/export of template configurations.
//!
//! A configuration document is a flat JSON object: theme keys at the top
//! level and a `layouts` map. Every key is optional on import; missing keys
//! keep their default values.

use crate::color::is_hex_color;
use crate::error::{Error, Result};
use crate::geometry::CanvasRatio;
use crate::presets::{self, MAX_PAGES_PER_LAYOUT};
use crate::types::{LayoutPlan, TemplateConfig, ThemeConfig};
use serde::{Deserialize, Deserializer};

impl ThemeConfig {
    /// Check colors, opacity and sizes.
    ///
    /// This is the check the engine runs before drawing; it does not require
    /// the theme name to be a known preset.
    pub fn validate(&self) -> Result<()> {
        for color in [&self.primary, &self.secondary, &self.accent, &self.background] {
            if !is_hex_color(color) {
                return Err(Error::InvalidColorFormat(color.clone()));
            }
        }
        if self.watermark.opacity > 100 {
            return Err(Error::InvalidConfig(format!(
                "watermark opacity must be 0-100, got {}",
                self.watermark.opacity
            )));
        }
        if self.title_size == 0 || self.body_size == 0 {
            return Err(Error::InvalidConfig("font sizes must be positive".to_string()));
        }
        if self.title_font.trim().is_empty() || self.body_font.trim().is_empty() {
            return Err(Error::InvalidConfig("font names must not be empty".to_string()));
        }
        Ok(())
    }
}

impl LayoutPlan {
    /// Reject counts above the per-layout maximum.
    pub fn validate(&self) -> Result<()> {
        for (kind, count) in self.active() {
            if count > MAX_PAGES_PER_LAYOUT {
                return Err(Error::InvalidConfig(format!(
                    "layout '{}' asks for {} pages (max {})",
                    kind, count, MAX_PAGES_PER_LAYOUT
                )));
            }
        }
        Ok(())
    }
}

impl TemplateConfig {
    /// Parse a configuration document, filling gaps with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON, keeping non-ASCII text readable.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Full validation as performed on import: theme values, preset name
    /// and layout counts.
    pub fn validate(&self) -> Result<()> {
        self.theme.validate()?;
        if presets::find_preset(&self.theme.theme).is_none() {
            return Err(Error::InvalidConfig(format!(
                "unknown theme preset '{}'",
                self.theme.theme
            )));
        }
        self.layouts.validate()
    }
}

/// Accept any ratio label, falling back to 16:9 for unknown values.
pub(crate) fn lenient_ratio<'de, D>(deserializer: D) -> std::result::Result<CanvasRatio, D::Error>
where
    D: Deserializer<'de>,
{
    let label = String::deserialize(deserializer)?;
    Ok(CanvasRatio::from_label(&label).unwrap_or_else(|| {
        log::warn!("Unknown canvas ratio '{}', using {}", label, CanvasRatio::default());
        CanvasRatio::default()
    }))
}
