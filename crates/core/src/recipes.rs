//! Drawing recipes, one per layout kind.
//!
//! Every recipe appends exactly one page, paints the theme background first
//! and then draws its shapes through the [`PageBuilder`]. Recipes only see
//! the theme and their [`PageParams`]; they never learn their final page
//! number except through the builder's running page count.

use crate::builder::{HAlign, PageBuilder, PageId, TextStyle, VAnchor};
use crate::color::{DELTA_DOWN, DELTA_UP, LIGHT_GRAY, PLACEHOLDER_FILL, WHITE};
use crate::error::Result;
use crate::geometry::{ImageSize, Rect};
use crate::types::{LayoutKind, ThemeConfig};

/// Which side of an image-text page holds the picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSide {
    Left,
    Right,
}

impl ImageSide {
    /// Alternate by zero-based position within the image-text batch.
    pub fn for_batch_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Page-scoped inputs. Only content and image-text pages read them.
#[derive(Debug, Clone, Copy)]
pub struct PageParams<'a> {
    /// 1-based position within this kind's batch.
    pub index: u32,
    pub side: ImageSide,
    pub image: Option<&'a [u8]>,
}

impl Default for PageParams<'_> {
    fn default() -> Self {
        Self {
            index: 1,
            side: ImageSide::Left,
            image: None,
        }
    }
}

/// A recipe: draws one page and returns its handle.
pub type Recipe<B> = fn(&mut B, &ThemeConfig, &PageParams<'_>) -> Result<PageId>;

/// The recipe for `kind`.
pub fn recipe_for<B: PageBuilder>(kind: LayoutKind) -> Recipe<B> {
    match kind {
        LayoutKind::Title => title::<B>,
        LayoutKind::Agenda => agenda::<B>,
        LayoutKind::Content => content::<B>,
        LayoutKind::ImageText => image_text::<B>,
        LayoutKind::Comparison => comparison::<B>,
        LayoutKind::Timeline => timeline::<B>,
        LayoutKind::Kpi => kpi::<B>,
        LayoutKind::Quote => quote::<B>,
        LayoutKind::ThankYou => thank_you::<B>,
    }
}

const AGENDA_ITEMS: [&str; 5] = [
    "01  第一部分标题",
    "02  第二部分标题",
    "03  第三部分标题",
    "04  第四部分标题",
    "05  第五部分标题",
];

const CONTENT_BODY: &str = "• 在此输入第一个要点内容\n\n\
• 在此输入第二个要点内容\n    - 子要点说明文字\n    - 更多细节描述\n\n\
• 在此输入第三个要点内容\n\n\
• 在此输入第四个要点内容";

const IMAGE_TEXT_BODY_LEFT_IMAGE: &str = "在此输入说明文字\n\n\
• 要点一：详细描述内容\n\n\
• 要点二：详细描述内容\n\n\
• 要点三：详细描述内容\n\n\
可以在这里添加更多的解释性文字来配合左侧的图片内容。";

const IMAGE_TEXT_BODY_RIGHT_IMAGE: &str = "在此输入说明文字\n\n\
• 要点一：详细描述内容\n\n\
• 要点二：详细描述内容\n\n\
• 要点三：详细描述内容\n\n\
可以在这里添加更多的解释性文字来配合右侧的图片内容。";

pub const PLACEHOLDER_CAPTION: &str = "📷 图片占位区域";
pub const PLACEHOLDER_CAPTION_EMPTY: &str = "📷 图片占位区域\n点击添加图片";

const COMPARISON_POINTS: &str = "✓ 优势点一\n\n✓ 优势点二\n\n✓ 优势点三\n\n✗ 不足之处";

const MILESTONES: [(&str, &str); 4] = [
    ("2024 Q1", "第一阶段\n项目启动"),
    ("2024 Q2", "第二阶段\n设计开发"),
    ("2024 Q3", "第三阶段\n测试优化"),
    ("2024 Q4", "第四阶段\n正式上线"),
];

const KPIS: [(&str, &str, &str); 4] = [
    ("1,234", "总用户数", "+12.5%"),
    ("98.6%", "系统可用率", "+2.1%"),
    ("56.7万", "月访问量", "+25.3%"),
    ("4.8/5", "用户满意度", "+0.3"),
];

fn blank_page<B: PageBuilder>(b: &mut B, theme: &ThemeConfig) -> Result<PageId> {
    let page = b.new_page();
    b.set_background(page, &theme.background)?;
    Ok(page)
}

/// Heading at the top of the page, optionally with a short accent underline.
fn heading<B: PageBuilder>(
    b: &mut B,
    page: PageId,
    theme: &ThemeConfig,
    text: &str,
    centered: bool,
    underline: bool,
) -> Result<()> {
    let canvas = b.canvas();
    let mut style = TextStyle::new(&theme.title_font, 28.0, &theme.primary).bold();
    if centered {
        style = style.centered();
    }
    b.draw_text(page, canvas.inset_band(0.5, 0.3, 0.7), text, &style)?;
    if underline {
        b.draw_rect(page, Rect::new(0.5, 1.0, 3.0, 0.05), &theme.accent, None)?;
    }
    Ok(())
}

pub fn title<B: PageBuilder>(
    b: &mut B,
    theme: &ThemeConfig,
    _params: &PageParams<'_>,
) -> Result<PageId> {
    let page = blank_page(b, theme)?;
    let canvas = b.canvas();

    b.draw_rect(page, canvas.band(0.0, 0.15), &theme.primary, None)?;
    b.draw_text(
        page,
        canvas.inset_band(0.5, canvas.y_frac(0.35), 1.2),
        "在此输入演示文稿标题",
        &TextStyle::new(&theme.title_font, 44.0, &theme.primary)
            .bold()
            .centered(),
    )?;
    b.draw_text(
        page,
        canvas.inset_band(0.5, canvas.y_frac(0.55), 0.8),
        "在此输入副标题或简短描述",
        &TextStyle::new(&theme.body_font, 24.0, &theme.secondary).centered(),
    )?;

    b.draw_rect(page, canvas.band(canvas.height - 0.8, 0.8), &theme.primary, None)?;
    b.draw_text(
        page,
        canvas.inset_band(0.5, canvas.height - 0.6, 0.4),
        "演讲者姓名  |  公司名称  |  日期",
        &TextStyle::new(&theme.body_font, 14.0, WHITE).centered(),
    )?;
    Ok(page)
}

pub fn agenda<B: PageBuilder>(
    b: &mut B,
    theme: &ThemeConfig,
    _params: &PageParams<'_>,
) -> Result<PageId> {
    let page = blank_page(b, theme)?;
    let canvas = b.canvas();

    b.draw_rect(page, Rect::new(0.0, 0.0, 0.15, canvas.height), &theme.primary, None)?;
    b.draw_text(
        page,
        Rect::new(0.8, 0.5, canvas.width - 1.5, 0.8),
        "目 录",
        &TextStyle::new(&theme.title_font, 36.0, &theme.primary).bold(),
    )?;
    b.draw_rect(page, Rect::new(0.8, 1.3, 2.0, 0.05), &theme.accent, None)?;

    let item_style = TextStyle::new(&theme.body_font, 20.0, &theme.secondary);
    for (i, item) in AGENDA_ITEMS.iter().enumerate() {
        let row_y = 1.8 + i as f64 * 0.9;
        if i % 2 == 0 {
            b.draw_rect(
                page,
                Rect::new(0.8, row_y, canvas.width - 1.6, 0.8),
                LIGHT_GRAY,
                None,
            )?;
        }
        b.draw_text(
            page,
            Rect::new(1.0, row_y + 0.2, canvas.width - 2.0, 0.5),
            item,
            &item_style,
        )?;
    }
    Ok(page)
}

pub fn content<B: PageBuilder>(
    b: &mut B,
    theme: &ThemeConfig,
    params: &PageParams<'_>,
) -> Result<PageId> {
    let page = blank_page(b, theme)?;
    let canvas = b.canvas();

    b.draw_rect(page, canvas.band(0.0, 1.2), &theme.primary, None)?;
    b.draw_text(
        page,
        canvas.inset_band(0.5, 0.35, 0.6),
        &format!("内容页标题 - 第{}页", params.index),
        &TextStyle::new(&theme.title_font, f64::from(theme.title_size), WHITE).bold(),
    )?;

    b.draw_text(
        page,
        Rect::new(0.8, 1.6, canvas.width - 1.6, canvas.height - 2.5),
        CONTENT_BODY,
        &TextStyle::new(&theme.body_font, f64::from(theme.body_size), &theme.secondary),
    )?;

    // Running count of pages created so far, including this one.
    b.draw_text(
        page,
        Rect::new(canvas.width - 1.5, canvas.height - 0.5, 1.0, 0.3),
        &format!("第 {} 页", b.page_count()),
        &TextStyle::new(&theme.body_font, 10.0, &theme.secondary).align(HAlign::Right),
    )?;
    Ok(page)
}

pub fn image_text<B: PageBuilder>(
    b: &mut B,
    theme: &ThemeConfig,
    params: &PageParams<'_>,
) -> Result<PageId> {
    let page = blank_page(b, theme)?;
    let canvas = b.canvas();

    heading(b, page, theme, "图文混排页标题", false, true)?;

    let content_y = 1.3;
    let content_height = canvas.height - 1.8;
    let body_style = TextStyle::new(&theme.body_font, 16.0, &theme.secondary);

    match params.side {
        ImageSide::Left => {
            let region = Rect::new(0.5, content_y, 5.5, content_height);
            image_region(b, page, theme, region, params.image)?;
            b.draw_text(
                page,
                Rect::new(6.3, content_y + 0.2, canvas.width - 7.0, content_height - 0.4),
                IMAGE_TEXT_BODY_LEFT_IMAGE,
                &body_style,
            )?;
        }
        ImageSide::Right => {
            b.draw_text(
                page,
                Rect::new(0.5, content_y + 0.2, 5.5, content_height - 0.4),
                IMAGE_TEXT_BODY_RIGHT_IMAGE,
                &body_style,
            )?;
            let region = Rect::new(6.3, content_y, canvas.width - 6.8, content_height);
            image_region(b, page, theme, region, params.image)?;
        }
    }
    Ok(page)
}

/// Place the image at the top-left of `region`, scaled to its width, or a
/// bordered placeholder when there is no usable image.
fn image_region<B: PageBuilder>(
    b: &mut B,
    page: PageId,
    theme: &ThemeConfig,
    region: Rect,
    image: Option<&[u8]>,
) -> Result<()> {
    let caption = match image {
        Some(bytes) => {
            match b.draw_image(page, region.x, region.y, ImageSize::Width(region.width), bytes) {
                Ok(_) => return Ok(()),
                Err(e) => {
                    log::warn!("Page {}: using image placeholder: {}", page.0 + 1, e);
                    PLACEHOLDER_CAPTION
                }
            }
        }
        None => PLACEHOLDER_CAPTION_EMPTY,
    };

    b.draw_rect(page, region, PLACEHOLDER_FILL, Some(&theme.secondary))?;
    b.draw_text(
        page,
        region.centered_band(0.6),
        caption,
        &TextStyle::new(&theme.body_font, 16.0, &theme.secondary).centered(),
    )?;
    Ok(())
}

pub fn comparison<B: PageBuilder>(
    b: &mut B,
    theme: &ThemeConfig,
    _params: &PageParams<'_>,
) -> Result<PageId> {
    let page = blank_page(b, theme)?;
    let canvas = b.canvas();

    heading(b, page, theme, "对比分析页", true, false)?;
    b.draw_rect(
        page,
        Rect::new(canvas.center_x() - 0.02, 1.2, 0.04, canvas.height - 1.7),
        &theme.accent,
        None,
    )?;

    let panel_width = canvas.center_x() - 0.8;
    let panels = [
        ("方案 A", 0.4, theme.primary.as_str()),
        ("方案 B", canvas.center_x() + 0.3, theme.accent.as_str()),
    ];
    let header_style = TextStyle::new(&theme.title_font, 20.0, WHITE).bold().centered();
    let body_style = TextStyle::new(&theme.body_font, 16.0, &theme.secondary);

    for (label, x, header_fill) in panels {
        b.draw_rect(page, Rect::new(x, 1.3, panel_width, 0.6), header_fill, None)?;
        b.draw_text(page, Rect::new(x, 1.4, panel_width, 0.4), label, &header_style)?;
        b.draw_text(
            page,
            Rect::new(x + 0.1, 2.1, panel_width - 0.2, canvas.height - 2.8),
            COMPARISON_POINTS,
            &body_style,
        )?;
    }
    Ok(page)
}

pub fn timeline<B: PageBuilder>(
    b: &mut B,
    theme: &ThemeConfig,
    _params: &PageParams<'_>,
) -> Result<PageId> {
    let page = blank_page(b, theme)?;
    let canvas = b.canvas();

    heading(b, page, theme, "项目时间轴 / 里程碑", false, true)?;

    let axis_y = canvas.center_y();
    b.draw_rect(
        page,
        Rect::new(0.8, axis_y - 0.03, canvas.width - 1.6, 0.06),
        &theme.primary,
        None,
    )?;

    let spacing = (canvas.width - 2.0) / (MILESTONES.len() + 1) as f64;
    let date_style = TextStyle::new(&theme.body_font, 14.0, &theme.primary)
        .bold()
        .centered();
    let desc_style = TextStyle::new(&theme.body_font, 12.0, &theme.secondary).centered();

    for (i, (date, desc)) in MILESTONES.iter().enumerate() {
        let x = 1.0 + spacing * (i + 1) as f64 - 0.4;
        b.draw_oval(page, Rect::new(x, axis_y - 0.2, 0.4, 0.4), &theme.accent)?;
        b.draw_text(page, Rect::new(x - 0.3, axis_y - 0.9, 1.0, 0.5), date, &date_style)?;
        b.draw_text(page, Rect::new(x - 0.5, axis_y + 0.4, 1.4, 0.8), desc, &desc_style)?;
    }
    Ok(page)
}

/// Delta tag color: green for a leading `+`, red otherwise.
pub fn delta_color(delta: &str) -> &'static str {
    if delta.starts_with('+') {
        DELTA_UP
    } else {
        DELTA_DOWN
    }
}

pub fn kpi<B: PageBuilder>(
    b: &mut B,
    theme: &ThemeConfig,
    _params: &PageParams<'_>,
) -> Result<PageId> {
    let page = blank_page(b, theme)?;
    let canvas = b.canvas();

    heading(b, page, theme, "核心数据概览", true, false)?;

    let card_width = (canvas.width - 1.5) / KPIS.len() as f64;
    let card_height = 2.5;
    let top = (canvas.height - card_height) / 2.0;

    for (i, (number, label, delta)) in KPIS.iter().enumerate() {
        let x = 0.5 + i as f64 * (card_width + 0.15);
        let inner = card_width - 0.1;

        b.draw_rect(
            page,
            Rect::new(x, top, inner, card_height),
            LIGHT_GRAY,
            Some(&theme.secondary),
        )?;
        b.draw_text(
            page,
            Rect::new(x, top + 0.4, inner, 0.8),
            number,
            &TextStyle::new(&theme.title_font, 36.0, &theme.primary)
                .bold()
                .centered(),
        )?;
        b.draw_text(
            page,
            Rect::new(x, top + 1.2, inner, 0.5),
            label,
            &TextStyle::new(&theme.body_font, 14.0, &theme.secondary).centered(),
        )?;
        b.draw_text(
            page,
            Rect::new(x, top + 1.7, inner, 0.4),
            delta,
            &TextStyle::new(&theme.body_font, 14.0, delta_color(delta))
                .bold()
                .centered(),
        )?;
    }
    Ok(page)
}

pub fn quote<B: PageBuilder>(
    b: &mut B,
    theme: &ThemeConfig,
    _params: &PageParams<'_>,
) -> Result<PageId> {
    let page = blank_page(b, theme)?;
    let canvas = b.canvas();
    let center_y = canvas.center_y();

    b.draw_rect(page, Rect::new(1.0, center_y - 1.5, 0.1, 3.0), &theme.accent, None)?;
    b.draw_text(
        page,
        Rect::new(1.3, center_y - 1.8, 1.0, 1.0),
        "\u{201c}",
        &TextStyle::new(&theme.title_font, 72.0, &theme.accent).bold(),
    )?;
    b.draw_text(
        page,
        Rect::new(1.5, center_y - 0.8, canvas.width - 3.0, 1.6),
        "在此输入引言或重要语句，\n用于强调核心观点或名人名言。",
        &TextStyle::new(&theme.body_font, 28.0, &theme.primary),
    )?;
    b.draw_text(
        page,
        Rect::new(1.5, center_y + 1.2, canvas.width - 3.0, 0.5),
        "—— 作者姓名，《来源出处》",
        &TextStyle::new(&theme.body_font, 16.0, &theme.secondary),
    )?;
    Ok(page)
}

pub fn thank_you<B: PageBuilder>(
    b: &mut B,
    theme: &ThemeConfig,
    _params: &PageParams<'_>,
) -> Result<PageId> {
    let page = blank_page(b, theme)?;
    let canvas = b.canvas();
    let (center_x, center_y) = (canvas.center_x(), canvas.center_y());

    b.draw_rect(
        page,
        Rect::new(center_x - 4.0, center_y - 1.5, 8.0, 3.0),
        &theme.primary,
        None,
    )?;
    b.draw_text(
        page,
        canvas.inset_band(0.5, center_y - 0.8, 1.0),
        "感谢观看",
        &TextStyle::new(&theme.title_font, 48.0, WHITE)
            .bold()
            .centered()
            .anchor(VAnchor::Middle),
    )?;
    b.draw_text(
        page,
        canvas.inset_band(0.5, center_y + 0.3, 0.6),
        "THANK YOU FOR WATCHING",
        &TextStyle::new(&theme.body_font, 18.0, WHITE).centered(),
    )?;
    b.draw_text(
        page,
        canvas.inset_band(0.5, canvas.height - 1.0, 0.5),
        "联系方式：email@example.com  |  电话：123-4567-8900",
        &TextStyle::new(&theme.body_font, 12.0, &theme.secondary).centered(),
    )?;
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::deck::{Deck, DrawOp};
    use crate::geometry::CanvasRatio;
    use crate::media::sample_png;

    fn deck_for(ratio: CanvasRatio) -> Deck {
        let mut deck = Deck::new();
        deck.set_canvas(ratio.canvas());
        deck
    }

    fn render(kind: LayoutKind, params: &PageParams<'_>) -> Deck {
        let mut deck = deck_for(CanvasRatio::Wide);
        recipe_for::<Deck>(kind)(&mut deck, &ThemeConfig::default(), params).unwrap();
        deck
    }

    #[test]
    fn test_every_recipe_adds_one_page_with_background() {
        let theme = ThemeConfig {
            background: "#f0fdfa".to_string(),
            ..ThemeConfig::default()
        };
        for ratio in CanvasRatio::ALL {
            let mut deck = deck_for(ratio);
            for (i, kind) in LayoutKind::ALL.into_iter().enumerate() {
                let page = recipe_for::<Deck>(kind)(&mut deck, &theme, &PageParams::default())
                    .unwrap();
                assert_eq!(page, PageId(i));
                assert_eq!(deck.pages[i].background, Some(Rgb::new(0xf0, 0xfd, 0xfa)));
                assert!(!deck.pages[i].ops.is_empty(), "{kind} drew nothing");
            }
            assert_eq!(deck.pages.len(), LayoutKind::ALL.len());
        }
    }

    #[test]
    fn test_title_structure() {
        let deck = render(LayoutKind::Title, &PageParams::default());
        let page = &deck.pages[0];
        let title = page.find_text("在此输入演示文稿标题").unwrap();
        assert_eq!(title.align, HAlign::Center);
        assert!((title.rect.y - 7.5 * 0.35).abs() < 1e-9);
        let caption = page.find_text("演讲者姓名  |  公司名称  |  日期").unwrap();
        assert_eq!(caption.color, Rgb::new(255, 255, 255));
        // Top and bottom bars span the full width.
        let full_bars = page
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { rect, .. } if rect.width == 13.333))
            .count();
        assert_eq!(full_bars, 2);
    }

    #[test]
    fn test_agenda_rows_alternate_shading() {
        let deck = render(LayoutKind::Agenda, &PageParams::default());
        let page = &deck.pages[0];
        for item in AGENDA_ITEMS {
            assert!(page.has_text(item));
        }
        let shaded = page
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { fill, .. } if *fill == Rgb::new(0xf8, 0xf9, 0xfa)))
            .count();
        assert_eq!(shaded, 3);
    }

    #[test]
    fn test_content_shows_index_and_running_count() {
        let mut deck = deck_for(CanvasRatio::Wide);
        let theme = ThemeConfig::default();
        title(&mut deck, &theme, &PageParams::default()).unwrap();
        content(&mut deck, &theme, &PageParams { index: 1, ..PageParams::default() }).unwrap();
        content(&mut deck, &theme, &PageParams { index: 2, ..PageParams::default() }).unwrap();

        assert!(deck.pages[1].has_text("内容页标题 - 第1页"));
        assert!(deck.pages[1].has_text("第 2 页"));
        assert!(deck.pages[2].has_text("内容页标题 - 第2页"));
        assert!(deck.pages[2].has_text("第 3 页"));

        let heading = deck.pages[1].find_text("内容页标题 - 第1页").unwrap();
        assert_eq!(heading.size, f64::from(theme.title_size));
    }

    #[test]
    fn test_image_text_places_picture_on_requested_side() {
        let png = sample_png(110, 55);
        let left = render(
            LayoutKind::ImageText,
            &PageParams {
                side: ImageSide::Left,
                image: Some(&png),
                ..PageParams::default()
            },
        );
        let right = render(
            LayoutKind::ImageText,
            &PageParams {
                side: ImageSide::Right,
                image: Some(&png),
                ..PageParams::default()
            },
        );

        let picture_x = |deck: &Deck| {
            deck.pages[0].ops.iter().find_map(|op| match op {
                DrawOp::Picture { rect, .. } => Some(rect.x),
                _ => None,
            })
        };
        assert_eq!(picture_x(&left), Some(0.5));
        assert_eq!(picture_x(&right), Some(6.3));
        assert!(!left.pages[0].has_text(PLACEHOLDER_CAPTION_EMPTY));
    }

    #[test]
    fn test_image_text_placeholder_without_image() {
        let deck = render(LayoutKind::ImageText, &PageParams::default());
        let page = &deck.pages[0];
        assert_eq!(page.picture_count(), 0);
        assert!(page.has_text(PLACEHOLDER_CAPTION_EMPTY));
        assert!(page.ops.iter().any(|op| matches!(
            op,
            DrawOp::Rect { fill, border: Some(_), .. } if *fill == Rgb::new(0xe2, 0xe8, 0xf0)
        )));
    }

    #[test]
    fn test_image_text_placeholder_for_corrupt_image() {
        let deck = render(
            LayoutKind::ImageText,
            &PageParams {
                side: ImageSide::Right,
                image: Some(b"not an image"),
                ..PageParams::default()
            },
        );
        let page = &deck.pages[0];
        assert_eq!(page.picture_count(), 0);
        let caption = page.find_text(PLACEHOLDER_CAPTION).unwrap();
        assert!((caption.rect.x - 6.3).abs() < 1e-9);
    }

    #[test]
    fn test_comparison_panels() {
        let deck = render(LayoutKind::Comparison, &PageParams::default());
        let page = &deck.pages[0];
        let theme = ThemeConfig::default();
        assert!(page.has_text("方案 A"));
        assert!(page.has_text("方案 B"));
        let header_fills: Vec<Rgb> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { rect, fill, .. } if rect.height == 0.6 => Some(*fill),
                _ => None,
            })
            .collect();
        assert_eq!(
            header_fills,
            vec![
                crate::hex_to_rgb(&theme.primary).unwrap(),
                crate::hex_to_rgb(&theme.accent).unwrap()
            ]
        );
    }

    #[test]
    fn test_timeline_nodes_evenly_spaced() {
        let deck = render(LayoutKind::Timeline, &PageParams::default());
        let xs: Vec<f64> = deck.pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Oval { rect, .. } => Some(rect.x),
                _ => None,
            })
            .collect();
        assert_eq!(xs.len(), 4);
        let gaps: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        assert!(gaps.iter().all(|g| (g - gaps[0]).abs() < 1e-9));
        for (date, _) in MILESTONES {
            assert!(deck.pages[0].has_text(date));
        }
    }

    #[test]
    fn test_kpi_cards_and_delta_colors() {
        let deck = render(LayoutKind::Kpi, &PageParams::default());
        let page = &deck.pages[0];
        for (number, label, delta) in KPIS {
            assert!(page.has_text(number));
            assert!(page.has_text(label));
            assert_eq!(page.find_text(delta).unwrap().color, Rgb::new(0x10, 0xb9, 0x81));
        }
        assert_eq!(delta_color("-3.0%"), DELTA_DOWN);
        assert_eq!(delta_color("+1"), DELTA_UP);
    }

    #[test]
    fn test_quote_and_thank_you_text() {
        let quote_deck = render(LayoutKind::Quote, &PageParams::default());
        assert!(quote_deck.pages[0].has_text("\u{201c}"));
        assert!(quote_deck.pages[0].has_text("—— 作者姓名，《来源出处》"));

        let thanks = render(LayoutKind::ThankYou, &PageParams::default());
        assert!(thanks.pages[0].find_text("感谢观看").unwrap().bold);
    }

    #[test]
    fn test_image_side_alternates() {
        assert_eq!(ImageSide::for_batch_index(0), ImageSide::Left);
        assert_eq!(ImageSide::for_batch_index(1), ImageSide::Right);
        assert_eq!(ImageSide::for_batch_index(2), ImageSide::Left);
    }
}
