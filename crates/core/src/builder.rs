//! The drawing surface that layout recipes and overlays render onto.
//!
//! [`PageBuilder`] is the only seam between deck assembly and a concrete
//! output format. The in-memory [`Deck`](crate::deck::Deck) records draw
//! calls; `deck-pptx` writes them into a presentation package.

use crate::error::Result;
use crate::geometry::{Canvas, ImageSize, Rect};
use serde::{Deserialize, Serialize};

/// Index of a page in creation order (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub usize);

/// Index of a shape within its page, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(pub usize);

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical anchoring of text inside its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAnchor {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Font and paragraph attributes of a text box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    pub font: &'a str,
    /// Size in points.
    pub size: f64,
    /// Hex color, e.g. `"#1a365d"`.
    pub color: &'a str,
    pub bold: bool,
    pub align: HAlign,
    pub anchor: VAnchor,
}

impl<'a> TextStyle<'a> {
    /// Regular, left-aligned, top-anchored text.
    pub fn new(font: &'a str, size: f64, color: &'a str) -> Self {
        Self {
            font,
            size,
            color,
            bold: false,
            align: HAlign::Left,
            anchor: VAnchor::Top,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn centered(self) -> Self {
        self.align(HAlign::Center)
    }

    pub fn align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    pub fn anchor(mut self, anchor: VAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Capability surface used by recipes and the overlay pass.
///
/// Pages are append-only: shapes are painted in the order they are drawn,
/// so later calls end up on top. All colors are 6-hex-digit strings and all
/// lengths are inches.
pub trait PageBuilder {
    /// What [`finish`](PageBuilder::finish) hands back.
    type Output;

    /// Set the page size. Called once, before the first page.
    fn set_canvas(&mut self, canvas: Canvas);

    fn canvas(&self) -> Canvas;

    /// Append a blank page and return its handle.
    fn new_page(&mut self) -> PageId;

    /// Number of pages created so far.
    fn page_count(&self) -> usize;

    fn set_background(&mut self, page: PageId, color: &str) -> Result<()>;

    /// Filled rectangle; `border` of `None` draws no outline.
    fn draw_rect(
        &mut self,
        page: PageId,
        rect: Rect,
        fill: &str,
        border: Option<&str>,
    ) -> Result<ShapeId>;

    /// Filled ellipse inscribed in `rect`, no outline.
    fn draw_oval(&mut self, page: PageId, rect: Rect, fill: &str) -> Result<ShapeId>;

    /// Single-paragraph, word-wrapped text box. `\n` in `text` breaks lines.
    fn draw_text(
        &mut self,
        page: PageId,
        rect: Rect,
        text: &str,
        style: &TextStyle<'_>,
    ) -> Result<ShapeId>;

    /// Picture with its top-left corner at `(x, y)`.
    ///
    /// Fails with [`Error::ImagePlacement`](crate::Error::ImagePlacement) on
    /// bytes that are not a readable image; callers decide how to recover.
    fn draw_image(
        &mut self,
        page: PageId,
        x: f64,
        y: f64,
        size: ImageSize,
        bytes: &[u8],
    ) -> Result<ShapeId>;

    /// Consume the builder and produce the finished output.
    fn finish(self) -> Result<Self::Output>
    where
        Self: Sized;
}
