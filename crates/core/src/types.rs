//! Domain types for describing a slide template.

use crate::geometry::{Canvas, CanvasRatio};
use crate::presets::{self, ThemePreset};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Colors, fonts, canvas and overlay settings shared by every page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Name of the template, also used to derive the output file name.
    pub template_name: String,

    /// Canvas aspect ratio. Unknown labels fall back to 16:9 on import.
    #[serde(deserialize_with = "crate::config::lenient_ratio")]
    pub ratio: CanvasRatio,

    /// Name of the preset the colors were last taken from.
    pub theme: String,

    /// Main color: title bars, headings, KPI numbers.
    pub primary: String,

    /// Body text and borders.
    pub secondary: String,

    /// Underlines, dividers, timeline nodes.
    pub accent: String,

    /// Page background.
    pub background: String,

    pub title_font: String,
    pub body_font: String,

    /// Base heading size in points.
    pub title_size: u32,

    /// Base body text size in points.
    pub body_size: u32,

    /// Text shown bottom-left on every page but the first.
    pub footer_text: String,

    /// Whether to show the page number bottom-right on every page but the first.
    pub show_page_number: bool,

    #[serde(flatten)]
    pub watermark: Watermark,

    /// Corner where the logo is anchored.
    pub logo_position: LogoPosition,
}

impl ThemeConfig {
    /// Copy a preset's colors and fonts into this configuration.
    pub fn apply_preset(&mut self, preset: &ThemePreset) {
        self.theme = preset.name.to_string();
        self.primary = preset.primary.to_string();
        self.secondary = preset.secondary.to_string();
        self.accent = preset.accent.to_string();
        self.background = preset.background.to_string();
        self.title_font = preset.title_font.to_string();
        self.body_font = preset.body_font.to_string();
    }

    /// Canvas dimensions for the configured ratio.
    pub fn canvas(&self) -> Canvas {
        self.ratio.canvas()
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let mut config = Self {
            template_name: presets::DEFAULT_TEMPLATE_NAME.to_string(),
            ratio: CanvasRatio::default(),
            theme: String::new(),
            primary: String::new(),
            secondary: String::new(),
            accent: String::new(),
            background: String::new(),
            title_font: String::new(),
            body_font: String::new(),
            title_size: 32,
            body_size: 18,
            footer_text: presets::DEFAULT_FOOTER_TEXT.to_string(),
            show_page_number: true,
            watermark: Watermark::default(),
            logo_position: LogoPosition::default(),
        };
        config.apply_preset(presets::default_preset());
        config
    }
}

/// Text watermark drawn across the middle of every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Watermark {
    #[serde(rename = "watermark_enabled")]
    pub enabled: bool,

    #[serde(rename = "watermark_text")]
    pub text: String,

    /// 0 is invisible on white, 100 is black.
    #[serde(rename = "watermark_opacity")]
    pub opacity: u8,
}

impl Default for Watermark {
    fn default() -> Self {
        Self {
            enabled: false,
            text: presets::DEFAULT_WATERMARK_TEXT.to_string(),
            opacity: 15,
        }
    }
}

/// Corner of the page the logo is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl LogoPosition {
    /// Top-left anchor of the logo on `canvas`.
    pub fn anchor(self, canvas: &Canvas) -> (f64, f64) {
        match self {
            Self::BottomRight => (canvas.width - 1.5, canvas.height - 0.7),
            Self::BottomLeft => (0.3, canvas.height - 0.7),
            Self::TopRight => (canvas.width - 1.5, 0.2),
            Self::TopLeft => (0.3, 0.2),
        }
    }
}

/// The nine page archetypes, in deck order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Title,
    Agenda,
    Content,
    ImageText,
    Comparison,
    Timeline,
    Kpi,
    Quote,
    #[serde(rename = "thankyou")]
    ThankYou,
}

impl LayoutKind {
    /// Every kind, in the order pages are emitted.
    pub const ALL: [LayoutKind; 9] = [
        LayoutKind::Title,
        LayoutKind::Agenda,
        LayoutKind::Content,
        LayoutKind::ImageText,
        LayoutKind::Comparison,
        LayoutKind::Timeline,
        LayoutKind::Kpi,
        LayoutKind::Quote,
        LayoutKind::ThankYou,
    ];

    /// The configuration key, e.g. `"image_text"`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Agenda => "agenda",
            Self::Content => "content",
            Self::ImageText => "image_text",
            Self::Comparison => "comparison",
            Self::Timeline => "timeline",
            Self::Kpi => "kpi",
            Self::Quote => "quote",
            Self::ThankYou => "thankyou",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Whether a layout kind is used, and how many pages of it to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSlot {
    pub enabled: bool,
    pub count: u32,
}

impl LayoutSlot {
    pub const fn new(enabled: bool, count: u32) -> Self {
        Self { enabled, count }
    }

    /// Pages this slot contributes to the deck.
    pub fn pages(&self) -> u32 {
        if self.enabled {
            self.count
        } else {
            0
        }
    }
}

/// Per-kind enable flag and page count.
///
/// Kinds missing from the map are treated as disabled. Unknown keys are
/// skipped on import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LayoutPlan {
    slots: BTreeMap<LayoutKind, LayoutSlot>,
}

impl<'de> Deserialize<'de> for LayoutPlan {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, LayoutSlot>::deserialize(deserializer)?;
        let mut plan = Self::empty();
        for (key, slot) in raw {
            match LayoutKind::from_key(&key) {
                Some(kind) => plan.set(kind, slot),
                None => log::warn!("Unknown layout '{}', ignoring it", key),
            }
        }
        Ok(plan)
    }
}

impl LayoutPlan {
    /// A plan with every kind disabled.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A plan with every kind enabled at its default count.
    pub fn with_defaults() -> Self {
        let mut plan = Self::empty();
        for kind in LayoutKind::ALL {
            plan.set(kind, LayoutSlot::new(true, kind.info().default_count));
        }
        plan
    }

    /// Builder method: enable `kind` with `count` pages.
    pub fn with(mut self, kind: LayoutKind, count: u32) -> Self {
        self.set(kind, LayoutSlot::new(true, count));
        self
    }

    pub fn set(&mut self, kind: LayoutKind, slot: LayoutSlot) {
        self.slots.insert(kind, slot);
    }

    pub fn slot(&self, kind: LayoutKind) -> LayoutSlot {
        self.slots.get(&kind).copied().unwrap_or_default()
    }

    /// Pages planned for `kind`, zero when disabled.
    pub fn pages_for(&self, kind: LayoutKind) -> u32 {
        self.slot(kind).pages()
    }

    /// Total pages over all enabled kinds.
    pub fn total_pages(&self) -> usize {
        LayoutKind::ALL
            .iter()
            .map(|&kind| self.pages_for(kind) as usize)
            .sum()
    }

    /// Kinds that will emit pages, with their counts, in deck order.
    pub fn active(&self) -> impl Iterator<Item = (LayoutKind, u32)> + '_ {
        LayoutKind::ALL
            .into_iter()
            .map(|kind| (kind, self.pages_for(kind)))
            .filter(|&(_, count)| count > 0)
    }
}

/// An uploaded image: opaque bytes plus a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ImageAsset {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// The complete persisted configuration: theme settings plus layout plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(flatten)]
    pub theme: ThemeConfig,

    /// Missing on import means every layout at its default count.
    #[serde(default = "LayoutPlan::with_defaults")]
    pub layouts: LayoutPlan,
}

impl Default for TemplateConfig {
    /// The default theme with every layout enabled at its default count.
    fn default() -> Self {
        Self {
            theme: ThemeConfig::default(),
            layouts: LayoutPlan::with_defaults(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_matches_business_preset() {
        let theme = ThemeConfig::default();
        assert_eq!(theme.theme, "商务简约");
        assert_eq!(theme.primary, "#1a365d");
        assert_eq!(theme.secondary, "#4a5568");
        assert_eq!(theme.accent, "#3182ce");
        assert_eq!(theme.background, "#ffffff");
        assert_eq!(theme.ratio, CanvasRatio::Wide);
        assert!(theme.show_page_number);
        assert!(!theme.watermark.enabled);
        assert_eq!(theme.watermark.opacity, 15);
    }

    #[test]
    fn test_disabled_slot_contributes_nothing() {
        let mut plan = LayoutPlan::empty();
        plan.set(LayoutKind::Content, LayoutSlot::new(false, 5));
        plan.set(LayoutKind::Kpi, LayoutSlot::new(true, 2));
        assert_eq!(plan.pages_for(LayoutKind::Content), 0);
        assert_eq!(plan.total_pages(), 2);
        assert_eq!(plan.active().collect::<Vec<_>>(), vec![(LayoutKind::Kpi, 2)]);
    }

    #[test]
    fn test_default_plan_total() {
        // 1 + 1 + 2 + 2 + 1 + 1 + 1 + 1 + 1
        assert_eq!(LayoutPlan::with_defaults().total_pages(), 11);
    }

    #[test]
    fn test_active_follows_kind_order() {
        let plan = LayoutPlan::empty()
            .with(LayoutKind::ThankYou, 1)
            .with(LayoutKind::Title, 1)
            .with(LayoutKind::ImageText, 3);
        let kinds: Vec<_> = plan.active().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            vec![LayoutKind::Title, LayoutKind::ImageText, LayoutKind::ThankYou]
        );
    }

    #[test]
    fn test_layout_kind_keys() {
        for kind in LayoutKind::ALL {
            assert_eq!(LayoutKind::from_key(kind.key()), Some(kind));
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.key()));
        }
    }

    #[test]
    fn test_logo_anchor() {
        let canvas = CanvasRatio::Standard.canvas();
        let (x, y) = LogoPosition::BottomRight.anchor(&canvas);
        assert!((x - 8.5).abs() < 1e-9);
        assert!((y - 6.8).abs() < 1e-9);
        assert_eq!(LogoPosition::TopLeft.anchor(&canvas), (0.3, 0.2));
    }
}
