//! PPTX output backend.

use crate::package::{write_package, PackageInfo};
use deck_core::{
    Canvas, Deck, ImageSize, PageBuilder, PageId, Rect, Result, ShapeId, TextStyle, ThemeConfig,
};

/// Page builder that serializes to a `.pptx` package on [`finish`](PageBuilder::finish).
///
/// Draw calls are recorded in a [`Deck`] first; the package is written in
/// one pass at the end, once every picture is known.
#[derive(Debug, Clone)]
pub struct PptxBuilder {
    deck: Deck,
    info: PackageInfo,
}

impl PptxBuilder {
    /// Create a builder whose document title, color scheme and fonts follow
    /// `theme`.
    pub fn new(theme: &ThemeConfig) -> Result<Self> {
        Ok(Self::with_info(PackageInfo::from_theme(theme)?))
    }

    pub fn with_info(info: PackageInfo) -> Self {
        Self {
            deck: Deck::new(),
            info,
        }
    }
}

impl PageBuilder for PptxBuilder {
    type Output = Vec<u8>;

    fn set_canvas(&mut self, canvas: Canvas) {
        self.deck.set_canvas(canvas);
    }

    fn canvas(&self) -> Canvas {
        self.deck.canvas()
    }

    fn new_page(&mut self) -> PageId {
        self.deck.new_page()
    }

    fn page_count(&self) -> usize {
        self.deck.page_count()
    }

    fn set_background(&mut self, page: PageId, color: &str) -> Result<()> {
        self.deck.set_background(page, color)
    }

    fn draw_rect(
        &mut self,
        page: PageId,
        rect: Rect,
        fill: &str,
        border: Option<&str>,
    ) -> Result<ShapeId> {
        self.deck.draw_rect(page, rect, fill, border)
    }

    fn draw_oval(&mut self, page: PageId, rect: Rect, fill: &str) -> Result<ShapeId> {
        self.deck.draw_oval(page, rect, fill)
    }

    fn draw_text(
        &mut self,
        page: PageId,
        rect: Rect,
        text: &str,
        style: &TextStyle<'_>,
    ) -> Result<ShapeId> {
        self.deck.draw_text(page, rect, text, style)
    }

    fn draw_image(
        &mut self,
        page: PageId,
        x: f64,
        y: f64,
        size: ImageSize,
        bytes: &[u8],
    ) -> Result<ShapeId> {
        self.deck.draw_image(page, x, y, size, bytes)
    }

    fn finish(self) -> Result<Vec<u8>> {
        write_package(&self.deck, &self.info)
    }
}

/// Build a complete deck for `theme` and `plan` as PPTX bytes.
pub fn generate(
    theme: &ThemeConfig,
    plan: &deck_core::LayoutPlan,
    logo: Option<&[u8]>,
    images: &[deck_core::ImageAsset],
) -> Result<deck_core::BuildOutput<Vec<u8>>> {
    deck_core::build(PptxBuilder::new(theme)?, theme, plan, logo, images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::inspect;
    use deck_core::media::sample_png;
    use deck_core::{
        CanvasRatio, Error, ImageAsset, LayoutKind, LayoutPlan, TemplateConfig, Watermark,
    };
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], path: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(path).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn part_names(bytes: &[u8]) -> Vec<String> {
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        archive.file_names().map(str::to_string).collect()
    }

    #[test]
    fn test_default_config_produces_eleven_slides() {
        let config = TemplateConfig::default();
        let built = generate(&config.theme, &config.layouts, None, &[]).unwrap();
        assert_eq!(built.page_count, 11);

        let slides = inspect(&built.output).unwrap();
        assert_eq!(slides.len(), 11);
        assert!(slides[0].has_text("在此输入演示文稿标题"));
        assert!(slides[10].has_text("感谢观看"));

        let names = part_names(&built.output);
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "ppt/presentation.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide11.xml",
        ] {
            assert!(names.iter().any(|n| n == part), "missing {}", part);
        }
    }

    #[test]
    fn test_slide_size_follows_ratio() {
        let theme = ThemeConfig {
            ratio: CanvasRatio::Standard,
            ..ThemeConfig::default()
        };
        let plan = LayoutPlan::empty().with(LayoutKind::Title, 1);
        let built = generate(&theme, &plan, None, &[]).unwrap();
        let presentation = read_part(&built.output, "ppt/presentation.xml");
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));
    }

    #[test]
    fn test_watermark_scenario_in_package() {
        let theme = ThemeConfig {
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
        let built = generate(&theme, &plan, None, &[]).unwrap();

        for n in 1..=2 {
            let slide = read_part(&built.output, &format!("ppt/slides/slide{}.xml", n));
            assert!(slide.contains("<a:t>内部资料</a:t>"));
            assert!(slide.contains(r#"<a:srgbClr val="D9D9D9"/>"#));
        }
        let slides = inspect(&built.output).unwrap();
        assert!(!slides[0].has_text(&theme.footer_text));
        assert!(slides[1].has_text(&theme.footer_text));
        assert!(slides[1].has_text("2"));
    }

    #[test]
    fn test_logo_and_images_become_media_parts() {
        let theme = ThemeConfig::default();
        let plan = LayoutPlan::empty()
            .with(LayoutKind::Title, 1)
            .with(LayoutKind::ImageText, 2);
        let logo = sample_png(64, 32);
        let images = vec![ImageAsset::new("photo.png", sample_png(80, 60))];
        let built = generate(&theme, &plan, Some(&logo), &images).unwrap();

        let names = part_names(&built.output);
        let media: Vec<_> = names.iter().filter(|n| n.starts_with("ppt/media/")).collect();
        // One logo part shared by three slides, one photo.
        assert_eq!(media.len(), 2);

        let slides = inspect(&built.output).unwrap();
        assert_eq!(slides[0].picture_count, 1);
        assert_eq!(slides[1].picture_count, 2);
        assert_eq!(slides[2].picture_count, 1);

        let types = read_part(&built.output, "[Content_Types].xml");
        assert!(types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
    }

    #[test]
    fn test_output_is_deterministic() {
        let config = TemplateConfig::default();
        let logo = sample_png(10, 10);
        let first = generate(&config.theme, &config.layouts, Some(&logo), &[]).unwrap();
        let second = generate(&config.theme, &config.layouts, Some(&logo), &[]).unwrap();
        assert_eq!(first.output, second.output);
    }

    #[test]
    fn test_document_title_and_theme() {
        let mut theme = ThemeConfig::default();
        theme.template_name = "季度汇报".to_string();
        theme.apply_preset(deck_core::find_preset("活力橙色").unwrap());
        let plan = LayoutPlan::empty().with(LayoutKind::Quote, 1);
        let built = generate(&theme, &plan, None, &[]).unwrap();

        let core = read_part(&built.output, "docProps/core.xml");
        assert!(core.contains("<dc:title>季度汇报</dc:title>"));
        let theme_xml = read_part(&built.output, "ppt/theme/theme1.xml");
        let primary = deck_core::hex_to_rgb(&theme.primary).unwrap().to_srgb();
        assert!(theme_xml.contains(&format!(r#"<a:accent1><a:srgbClr val="{}"/>"#, primary)));
    }

    #[test]
    fn test_bad_theme_color_is_rejected() {
        let theme = ThemeConfig {
            primary: "#12345g".to_string(),
            ..ThemeConfig::default()
        };
        let plan = LayoutPlan::empty().with(LayoutKind::Title, 1);
        assert!(matches!(
            generate(&theme, &plan, None, &[]),
            Err(Error::InvalidColorFormat(_))
        ));
    }
}
