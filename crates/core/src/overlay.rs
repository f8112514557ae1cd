//! Watermark, logo and footer overlays applied after every page exists.

use crate::builder::{HAlign, PageBuilder, PageId, TextStyle, VAnchor};
use crate::color::{watermark_gray, Rgb};
use crate::error::{Error, Result};
use crate::geometry::{ImageSize, Rect};
use crate::types::ThemeConfig;

/// Font used for watermark text regardless of theme fonts.
pub const WATERMARK_FONT: &str = "Microsoft YaHei";
pub const WATERMARK_SIZE: f64 = 48.0;

/// Height of the logo; its width follows the image.
pub const LOGO_HEIGHT: f64 = 0.5;

/// Distance of the footer line from the bottom edge.
pub const FOOTER_OFFSET: f64 = 0.4;

/// Overlay every page in deck order. Overlays are appended, so they paint
/// on top of recipe content.
pub fn apply<B: PageBuilder>(b: &mut B, theme: &ThemeConfig, logo: Option<&[u8]>) -> Result<()> {
    for index in 0..b.page_count() {
        let page = PageId(index);

        if theme.watermark.enabled {
            watermark(b, page, &theme.watermark.text, theme.watermark.opacity)?;
        }

        if let Some(bytes) = logo {
            if let Err(e) = place_logo(b, page, theme, bytes) {
                log::warn!("Page {}: skipping logo: {}", index + 1, e);
            }
        }

        // The opening page never carries a footer.
        if index > 0 {
            footer(b, page, theme, index + 1)?;
        }
    }
    Ok(())
}

/// Centered gray watermark text across the full canvas width.
pub fn watermark<B: PageBuilder>(b: &mut B, page: PageId, text: &str, opacity: u8) -> Result<()> {
    let canvas = b.canvas();
    let color = Rgb::gray(watermark_gray(opacity)).to_hex();
    b.draw_text(
        page,
        canvas.band(canvas.center_y() - 0.5, 1.0),
        text,
        &TextStyle::new(WATERMARK_FONT, WATERMARK_SIZE, &color)
            .centered()
            .anchor(VAnchor::Middle),
    )?;
    Ok(())
}

/// Logo at the configured corner. Any failure is reported as
/// [`Error::LogoPlacement`]; the caller decides whether to skip it.
pub fn place_logo<B: PageBuilder>(
    b: &mut B,
    page: PageId,
    theme: &ThemeConfig,
    bytes: &[u8],
) -> Result<()> {
    let (x, y) = theme.logo_position.anchor(&b.canvas());
    b.draw_image(page, x, y, ImageSize::Height(LOGO_HEIGHT), bytes)
        .map(|_| ())
        .map_err(|e| match e {
            Error::ImagePlacement(msg) => Error::LogoPlacement(msg),
            other => Error::LogoPlacement(other.to_string()),
        })
}

/// Footer text bottom-left and the 1-based page number bottom-right.
pub fn footer<B: PageBuilder>(
    b: &mut B,
    page: PageId,
    theme: &ThemeConfig,
    number: usize,
) -> Result<()> {
    let canvas = b.canvas();
    let y = canvas.height - FOOTER_OFFSET;

    if !theme.footer_text.is_empty() {
        b.draw_text(
            page,
            Rect::new(0.3, y, 4.0, 0.3),
            &theme.footer_text,
            &TextStyle::new(&theme.body_font, 9.0, &theme.secondary),
        )?;
    }

    if theme.show_page_number {
        b.draw_text(
            page,
            Rect::new(canvas.width - 1.0, y, 0.7, 0.3),
            &number.to_string(),
            &TextStyle::new(&theme.body_font, 10.0, &theme.secondary).align(HAlign::Right),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Deck, DrawOp};
    use crate::geometry::CanvasRatio;
    use crate::media::sample_png;
    use crate::types::Watermark;

    fn deck_with_pages(n: usize) -> Deck {
        let mut deck = Deck::new();
        deck.set_canvas(CanvasRatio::Wide.canvas());
        for _ in 0..n {
            let page = deck.new_page();
            deck.set_background(page, "#ffffff").unwrap();
            deck.draw_rect(page, Rect::new(0.0, 0.0, 1.0, 1.0), "#1a365d", None)
                .unwrap();
        }
        deck
    }

    fn theme_with_watermark(opacity: u8) -> ThemeConfig {
        ThemeConfig {
            watermark: Watermark {
                enabled: true,
                text: "内部资料".to_string(),
                opacity,
            },
            ..ThemeConfig::default()
        }
    }

    #[test]
    fn test_footer_skips_first_page() {
        let mut deck = deck_with_pages(3);
        let theme = ThemeConfig::default();
        apply(&mut deck, &theme, None).unwrap();

        assert!(!deck.pages[0].has_text(&theme.footer_text));
        assert!(!deck.pages[0].has_text("1"));
        assert!(deck.pages[1].has_text(&theme.footer_text));
        assert!(deck.pages[1].has_text("2"));
        assert!(deck.pages[2].has_text("3"));
    }

    #[test]
    fn test_footer_respects_settings() {
        let mut deck = deck_with_pages(2);
        let theme = ThemeConfig {
            footer_text: String::new(),
            show_page_number: false,
            ..ThemeConfig::default()
        };
        apply(&mut deck, &theme, None).unwrap();
        assert_eq!(deck.pages[1].texts().count(), 0);

        let mut deck = deck_with_pages(2);
        let theme = ThemeConfig {
            show_page_number: false,
            ..ThemeConfig::default()
        };
        apply(&mut deck, &theme, None).unwrap();
        assert_eq!(deck.pages[1].texts().count(), 1);
    }

    #[test]
    fn test_watermark_on_every_page_on_top() {
        let mut deck = deck_with_pages(2);
        apply(&mut deck, &theme_with_watermark(15), None).unwrap();

        for page in &deck.pages {
            let mark = page.find_text("内部资料").unwrap();
            assert_eq!(mark.color.to_hex(), "#d9d9d9");
            assert_eq!(mark.rect.width, deck.canvas.width);
            // Drawn after the recipe's rectangle.
            assert!(page.position_of_text("内部资料").unwrap() > 0);
        }
    }

    #[test]
    fn test_watermark_extremes() {
        let mut deck = deck_with_pages(1);
        apply(&mut deck, &theme_with_watermark(0), None).unwrap();
        assert_eq!(deck.pages[0].find_text("内部资料").unwrap().color, Rgb::gray(255));

        let mut deck = deck_with_pages(1);
        apply(&mut deck, &theme_with_watermark(100), None).unwrap();
        assert_eq!(deck.pages[0].find_text("内部资料").unwrap().color, Rgb::gray(0));
    }

    #[test]
    fn test_logo_placed_bottom_right() {
        let mut deck = deck_with_pages(2);
        let logo = sample_png(200, 100);
        apply(&mut deck, &ThemeConfig::default(), Some(&logo)).unwrap();

        for page in &deck.pages {
            let rect = page
                .ops
                .iter()
                .find_map(|op| match op {
                    DrawOp::Picture { rect, .. } => Some(*rect),
                    _ => None,
                })
                .unwrap();
            assert!((rect.x - (deck.canvas.width - 1.5)).abs() < 1e-9);
            assert_eq!((rect.width, rect.height), (1.0, 0.5));
        }
    }

    #[test]
    fn test_corrupt_logo_is_skipped() {
        let mut deck = deck_with_pages(3);
        apply(&mut deck, &ThemeConfig::default(), Some(b"\x89PNG broken")).unwrap();
        assert!(deck.pages.iter().all(|p| p.picture_count() == 0));
        // Footers are still drawn.
        assert!(deck.pages[2].has_text("3"));
    }

    #[test]
    fn test_place_logo_error_kind() {
        let mut deck = deck_with_pages(1);
        let err = place_logo(&mut deck, PageId(0), &ThemeConfig::default(), b"nope").unwrap_err();
        assert!(matches!(err, Error::LogoPlacement(_)));
    }
}
