//! Deck assembly: recipes in kind order, then overlays, then serialization.

use crate::builder::PageBuilder;
use crate::error::{Error, Result};
use crate::geometry::Canvas;
use crate::overlay;
use crate::recipes::{recipe_for, ImageSide, PageParams};
use crate::types::{ImageAsset, LayoutKind, LayoutPlan, ThemeConfig};

/// What a build hands back besides the serialized output.
#[derive(Debug, Clone)]
pub struct BuildOutput<T> {
    /// Whatever the builder produced (bytes for PPTX, a `Deck` in memory).
    pub output: T,
    pub canvas: Canvas,
    pub page_count: usize,
    /// Layout kind of each page, in deck order.
    pub kinds: Vec<LayoutKind>,
}

/// Assembles one deck from a theme and a layout plan.
///
/// Holds only borrowed, read-only inputs; each [`build`](Self::build) call
/// works on its own builder, so independent builds can run concurrently.
#[derive(Debug, Clone, Copy)]
pub struct DeckAssembler<'a> {
    theme: &'a ThemeConfig,
    plan: &'a LayoutPlan,
    logo: Option<&'a [u8]>,
    images: &'a [ImageAsset],
}

impl<'a> DeckAssembler<'a> {
    pub fn new(theme: &'a ThemeConfig, plan: &'a LayoutPlan) -> Self {
        Self {
            theme,
            plan,
            logo: None,
            images: &[],
        }
    }

    /// Overlay `logo` on every page. Unreadable logos are skipped.
    pub fn with_logo(mut self, logo: Option<&'a [u8]>) -> Self {
        self.logo = logo.filter(|bytes| !bytes.is_empty());
        self
    }

    /// Images for image-text pages, consumed in order.
    pub fn with_images(mut self, images: &'a [ImageAsset]) -> Self {
        self.images = images;
        self
    }

    /// Draw every planned page onto `builder`, overlay it, and finish it.
    ///
    /// Fails before any page is drawn if the plan is empty or the theme is
    /// malformed. Bad images and logos never fail the build.
    pub fn build<B: PageBuilder>(&self, mut builder: B) -> Result<BuildOutput<B::Output>> {
        let planned = self.plan.total_pages();
        if planned == 0 {
            return Err(Error::EmptyPlan);
        }
        self.theme.validate()?;

        let canvas = self.theme.canvas();
        builder.set_canvas(canvas);
        log::debug!(
            "Building {} pages on a {} canvas ({} x {} in)",
            planned,
            self.theme.ratio,
            canvas.width,
            canvas.height
        );

        let mut kinds = Vec::with_capacity(planned);
        for (kind, count) in self.plan.active() {
            let recipe = recipe_for::<B>(kind);
            for i in 0..count as usize {
                let params = self.params_for(kind, i);
                let page = recipe(&mut builder, self.theme, &params)?;
                log::debug!("Page {}: {}", page.0 + 1, kind);
                kinds.push(kind);
            }
        }

        overlay::apply(&mut builder, self.theme, self.logo)?;

        let page_count = builder.page_count();
        let output = builder.finish()?;
        log::info!("Built deck with {} pages", page_count);

        Ok(BuildOutput {
            output,
            canvas,
            page_count,
            kinds,
        })
    }

    /// Parameters for the `i`-th (0-based) page of `kind`.
    fn params_for(&self, kind: LayoutKind, i: usize) -> PageParams<'a> {
        let mut params = PageParams {
            index: i as u32 + 1,
            ..PageParams::default()
        };
        if kind == LayoutKind::ImageText {
            params.side = ImageSide::for_batch_index(i);
            params.image = self.images.get(i).map(|asset| asset.bytes.as_slice());
        }
        params
    }
}

/// Build a deck in one call. See [`DeckAssembler::build`].
pub fn build<B: PageBuilder>(
    builder: B,
    theme: &ThemeConfig,
    plan: &LayoutPlan,
    logo: Option<&[u8]>,
    images: &[ImageAsset],
) -> Result<BuildOutput<B::Output>> {
    DeckAssembler::new(theme, plan)
        .with_logo(logo)
        .with_images(images)
        .build(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Deck, DrawOp};
    use crate::geometry::CanvasRatio;
    use crate::media::sample_png;
    use crate::recipes::{PLACEHOLDER_CAPTION, PLACEHOLDER_CAPTION_EMPTY};
    use crate::types::{LayoutSlot, Watermark};

    fn picture_xs(deck: &Deck, page: usize) -> Vec<f64> {
        deck.pages[page]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Picture { rect, .. } => Some(rect.x),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_plan_is_rejected() {
        let theme = ThemeConfig::default();
        let mut plan = LayoutPlan::empty();
        plan.set(LayoutKind::Content, LayoutSlot::new(false, 4));
        plan.set(LayoutKind::Kpi, LayoutSlot::new(true, 0));

        let result = build(Deck::new(), &theme, &plan, None, &[]);
        assert!(matches!(result, Err(Error::EmptyPlan)));
    }

    #[test]
    fn test_page_count_and_kind_order() {
        let theme = ThemeConfig::default();
        let plan = LayoutPlan::empty()
            .with(LayoutKind::ThankYou, 1)
            .with(LayoutKind::Content, 2)
            .with(LayoutKind::Title, 1);

        let built = build(Deck::new(), &theme, &plan, None, &[]).unwrap();
        assert_eq!(built.page_count, 4);
        assert_eq!(built.output.pages.len(), 4);
        assert_eq!(
            built.kinds,
            vec![
                LayoutKind::Title,
                LayoutKind::Content,
                LayoutKind::Content,
                LayoutKind::ThankYou
            ]
        );
        let deck = &built.output;
        assert!(deck.pages[1].has_text("内容页标题 - 第1页"));
        assert!(deck.pages[2].has_text("内容页标题 - 第2页"));
        assert!(deck.pages[2].has_text("第 3 页"));
    }

    #[test]
    fn test_default_plan_builds_every_kind() {
        let config = crate::TemplateConfig::default();
        let built = build(Deck::new(), &config.theme, &config.layouts, None, &[]).unwrap();
        assert_eq!(built.page_count, 11);
        let mut expected = Vec::new();
        for kind in LayoutKind::ALL {
            for _ in 0..kind.info().default_count {
                expected.push(kind);
            }
        }
        assert_eq!(built.kinds, expected);
    }

    #[test]
    fn test_canvas_follows_ratio() {
        let theme = ThemeConfig {
            ratio: CanvasRatio::Standard,
            ..ThemeConfig::default()
        };
        let plan = LayoutPlan::empty().with(LayoutKind::Agenda, 1);
        let built = build(Deck::new(), &theme, &plan, None, &[]).unwrap();
        assert_eq!(built.canvas, Canvas::new(10.0, 7.5));
        assert_eq!(built.output.canvas, built.canvas);
    }

    #[test]
    fn test_images_consumed_in_order_with_placeholder_fallback() {
        let theme = ThemeConfig::default();
        let plan = LayoutPlan::empty().with(LayoutKind::ImageText, 4);
        let images = vec![
            ImageAsset::new("a.png", sample_png(40, 30)),
            ImageAsset::new("b.png", sample_png(30, 40)),
            ImageAsset::new("broken.png", b"not really a png".to_vec()),
        ];

        let built = build(Deck::new(), &theme, &plan, None, &images).unwrap();
        let deck = &built.output;
        assert_eq!(built.page_count, 4);

        // Even pages put the image on the left, odd ones on the right.
        assert_eq!(picture_xs(deck, 0), vec![0.5]);
        assert_eq!(picture_xs(deck, 1), vec![6.3]);
        // Unreadable image and missing image both fall back to a placeholder.
        assert!(picture_xs(deck, 2).is_empty());
        assert!(deck.pages[2].has_text(PLACEHOLDER_CAPTION));
        assert!(picture_xs(deck, 3).is_empty());
        assert!(deck.pages[3].has_text(PLACEHOLDER_CAPTION_EMPTY));
    }

    #[test]
    fn test_invalid_color_fails_before_any_page() {
        let theme = ThemeConfig {
            accent: "#12345".to_string(),
            ..ThemeConfig::default()
        };
        let plan = LayoutPlan::empty().with(LayoutKind::Title, 1);
        let result = build(Deck::new(), &theme, &plan, None, &[]);
        assert!(matches!(result, Err(Error::InvalidColorFormat(_))));
    }

    #[test]
    fn test_watermark_and_footer_scenario() {
        let theme = ThemeConfig {
            ratio: CanvasRatio::Wide,
            primary: "#1a365d".to_string(),
            background: "#ffffff".to_string(),
            watermark: Watermark {
                enabled: true,
                text: "内部资料".to_string(),
                opacity: 15,
            },
            ..ThemeConfig::default()
        };
        let plan = LayoutPlan::empty()
            .with(LayoutKind::Title, 1)
            .with(LayoutKind::Kpi, 1);

        let built = build(Deck::new(), &theme, &plan, None, &[]).unwrap();
        let deck = &built.output;
        assert_eq!(built.kinds, vec![LayoutKind::Title, LayoutKind::Kpi]);

        for page in &deck.pages {
            assert_eq!(page.find_text("内部资料").unwrap().color.to_hex(), "#d9d9d9");
        }
        assert!(!deck.pages[0].has_text(&theme.footer_text));
        assert!(deck.pages[1].has_text(&theme.footer_text));
        assert!(deck.pages[1].has_text("2"));
    }

    #[test]
    fn test_corrupt_logo_does_not_fail_build() {
        let theme = ThemeConfig::default();
        let plan = LayoutPlan::empty()
            .with(LayoutKind::Title, 1)
            .with(LayoutKind::Quote, 2);
        let built = build(Deck::new(), &theme, &plan, Some(b"GIF89a?garbage"), &[]).unwrap();
        assert!(built.output.pages.iter().all(|p| p.picture_count() == 0));
    }

    #[test]
    fn test_build_is_deterministic() {
        let config = crate::TemplateConfig::default();
        let images = vec![ImageAsset::new("a.png", sample_png(16, 9))];
        let logo = sample_png(10, 10);
        let first = build(Deck::new(), &config.theme, &config.layouts, Some(&logo), &images)
            .unwrap();
        let second = build(Deck::new(), &config.theme, &config.layouts, Some(&logo), &images)
            .unwrap();
        assert_eq!(first.output, second.output);
    }
}
