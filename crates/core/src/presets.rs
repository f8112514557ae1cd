//! Built-in theme presets, font choices and the layout catalogue.

use crate::types::LayoutKind;
use serde::Serialize;

pub const DEFAULT_TEMPLATE_NAME: &str = "我的PPT模板";
pub const DEFAULT_FOOTER_TEXT: &str = "公司名称 | 保密";
pub const DEFAULT_WATERMARK_TEXT: &str = "内部资料";

/// Upper bound on pages per layout kind accepted from a configuration.
pub const MAX_PAGES_PER_LAYOUT: u32 = 20;

/// A named bundle of colors and fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePreset {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub title_font: &'static str,
    pub body_font: &'static str,
    pub description: &'static str,
}

pub const THEME_PRESETS: &[ThemePreset] = &[
    ThemePreset {
        name: "商务简约",
        primary: "#1a365d",
        secondary: "#4a5568",
        accent: "#3182ce",
        background: "#ffffff",
        title_font: "Microsoft YaHei",
        body_font: "Microsoft YaHei",
        description: "深蓝配灰，专业稳重，适合商务汇报",
    },
    ThemePreset {
        name: "科技风格",
        primary: "#0d1117",
        secondary: "#21262d",
        accent: "#58a6ff",
        background: "#0d1117",
        title_font: "Microsoft YaHei",
        body_font: "Microsoft YaHei",
        description: "深色背景配亮色高亮，科技感十足",
    },
    ThemePreset {
        name: "教育培训",
        primary: "#065f46",
        secondary: "#0891b2",
        accent: "#10b981",
        background: "#f0fdfa",
        title_font: "Microsoft YaHei",
        body_font: "SimSun",
        description: "蓝绿清爽，适合教育培训场景",
    },
    ThemePreset {
        name: "极简白色",
        primary: "#1f2937",
        secondary: "#6b7280",
        accent: "#111827",
        background: "#ffffff",
        title_font: "Microsoft YaHei",
        body_font: "Microsoft YaHei",
        description: "黑白灰极简风格，干净大方",
    },
    ThemePreset {
        name: "活力橙色",
        primary: "#ea580c",
        secondary: "#f97316",
        accent: "#fed7aa",
        background: "#fffbeb",
        title_font: "Microsoft YaHei",
        body_font: "Microsoft YaHei",
        description: "充满活力的橙色系，适合创意展示",
    },
    ThemePreset {
        name: "优雅紫色",
        primary: "#6b21a8",
        secondary: "#a855f7",
        accent: "#e9d5ff",
        background: "#faf5ff",
        title_font: "Microsoft YaHei",
        body_font: "Microsoft YaHei",
        description: "优雅大气的紫色系，适合高端展示",
    },
];

pub const TITLE_FONTS: &[&str] = &[
    "Microsoft YaHei",
    "SimHei",
    "Arial",
    "Calibri",
    "Times New Roman",
];

pub const BODY_FONTS: &[&str] = &["Microsoft YaHei", "SimSun", "SimHei", "Calibri", "Arial"];

/// Look up a preset by name.
pub fn find_preset(name: &str) -> Option<&'static ThemePreset> {
    THEME_PRESETS.iter().find(|preset| preset.name == name)
}

/// The preset new configurations start from.
pub fn default_preset() -> &'static ThemePreset {
    &THEME_PRESETS[0]
}

/// Display metadata for a layout kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub default_count: u32,
}

impl LayoutKind {
    /// Display name, description and default page count.
    pub fn info(self) -> &'static LayoutInfo {
        match self {
            Self::Title => &LayoutInfo {
                name: "标题页",
                description: "大标题 + 副标题 + 底部信息",
                default_count: 1,
            },
            Self::Agenda => &LayoutInfo {
                name: "目录页",
                description: "标题 + 多条目录条目",
                default_count: 1,
            },
            Self::Content => &LayoutInfo {
                name: "内容页",
                description: "标题 + 正文（多级项目符号）",
                default_count: 2,
            },
            Self::ImageText => &LayoutInfo {
                name: "图文页",
                description: "图片 + 文字混合布局",
                default_count: 2,
            },
            Self::Comparison => &LayoutInfo {
                name: "对比页",
                description: "左右两列对比展示",
                default_count: 1,
            },
            Self::Timeline => &LayoutInfo {
                name: "时间轴页",
                description: "水平时间线 + 节点里程碑",
                default_count: 1,
            },
            Self::Kpi => &LayoutInfo {
                name: "数据概览页",
                description: "多个KPI数字 + 描述说明",
                default_count: 1,
            },
            Self::Quote => &LayoutInfo {
                name: "引用页",
                description: "大号引言文字 + 作者",
                default_count: 1,
            },
            Self::ThankYou => &LayoutInfo {
                name: "致谢页",
                description: "中央大标题 + 简短文字",
                default_count: 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::is_hex_color;

    #[test]
    fn test_preset_colors_are_valid() {
        for preset in THEME_PRESETS {
            for color in [preset.primary, preset.secondary, preset.accent, preset.background] {
                assert!(is_hex_color(color), "{}: {}", preset.name, color);
            }
        }
    }

    #[test]
    fn test_find_preset() {
        assert_eq!(find_preset("科技风格").map(|p| p.accent), Some("#58a6ff"));
        assert!(find_preset("不存在").is_none());
        assert_eq!(default_preset().name, "商务简约");
    }

    #[test]
    fn test_preset_fonts_are_offered() {
        for preset in THEME_PRESETS {
            assert!(TITLE_FONTS.contains(&preset.title_font));
            assert!(BODY_FONTS.contains(&preset.body_font));
        }
    }
}
