//! In-memory deck that records draw calls.
//!
//! Used as the reference [`PageBuilder`] in tests and by callers that want
//! to inspect a layout without serializing it.

use crate::builder::{HAlign, PageBuilder, PageId, ShapeId, TextStyle, VAnchor};
use crate::color::{hex_to_rgb, Rgb};
use crate::error::{Error, Result};
use crate::geometry::{Canvas, ImageSize, Rect};
use crate::media::{self, MediaFormat};

/// A recorded text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub rect: Rect,
    pub text: String,
    pub font: String,
    pub size: f64,
    pub color: Rgb,
    pub bold: bool,
    pub align: HAlign,
    pub anchor: VAnchor,
}

/// One draw call, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        rect: Rect,
        fill: Rgb,
        border: Option<Rgb>,
    },
    Oval {
        rect: Rect,
        fill: Rgb,
    },
    Text(TextBox),
    Picture {
        rect: Rect,
        format: MediaFormat,
        data: Vec<u8>,
    },
}

/// A page: background plus draw operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub background: Option<Rgb>,
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text boxes in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &TextBox> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(text) => Some(text),
            _ => None,
        })
    }

    /// First text box whose content equals `text`.
    pub fn find_text(&self, text: &str) -> Option<&TextBox> {
        self.texts().find(|t| t.text == text)
    }

    pub fn has_text(&self, text: &str) -> bool {
        self.find_text(text).is_some()
    }

    pub fn picture_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Picture { .. }))
            .count()
    }

    /// Draw-order position of the first text box equal to `text`.
    pub fn position_of_text(&self, text: &str) -> Option<usize> {
        self.ops
            .iter()
            .position(|op| matches!(op, DrawOp::Text(t) if t.text == text))
    }
}

/// Pages plus canvas size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    pub canvas: Canvas,
    pub pages: Vec<Page>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    fn page_mut(&mut self, page: PageId) -> Result<&mut Page> {
        self.pages.get_mut(page.0).ok_or(Error::UnknownPage(page.0))
    }

    fn push(&mut self, page: PageId, op: DrawOp) -> Result<ShapeId> {
        let page = self.page_mut(page)?;
        page.ops.push(op);
        Ok(ShapeId(page.ops.len() - 1))
    }
}

impl PageBuilder for Deck {
    type Output = Deck;

    fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn new_page(&mut self) -> PageId {
        self.pages.push(Page::default());
        PageId(self.pages.len() - 1)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn set_background(&mut self, page: PageId, color: &str) -> Result<()> {
        let color = hex_to_rgb(color)?;
        self.page_mut(page)?.background = Some(color);
        Ok(())
    }

    fn draw_rect(
        &mut self,
        page: PageId,
        rect: Rect,
        fill: &str,
        border: Option<&str>,
    ) -> Result<ShapeId> {
        let fill = hex_to_rgb(fill)?;
        let border = border.map(hex_to_rgb).transpose()?;
        self.push(page, DrawOp::Rect { rect, fill, border })
    }

    fn draw_oval(&mut self, page: PageId, rect: Rect, fill: &str) -> Result<ShapeId> {
        let fill = hex_to_rgb(fill)?;
        self.push(page, DrawOp::Oval { rect, fill })
    }

    fn draw_text(
        &mut self,
        page: PageId,
        rect: Rect,
        text: &str,
        style: &TextStyle<'_>,
    ) -> Result<ShapeId> {
        let color = hex_to_rgb(style.color)?;
        self.push(
            page,
            DrawOp::Text(TextBox {
                rect,
                text: text.to_string(),
                font: style.font.to_string(),
                size: style.size,
                color,
                bold: style.bold,
                align: style.align,
                anchor: style.anchor,
            }),
        )
    }

    fn draw_image(
        &mut self,
        page: PageId,
        x: f64,
        y: f64,
        size: ImageSize,
        bytes: &[u8],
    ) -> Result<ShapeId> {
        // Check the page before probing so a bad handle is reported as such.
        self.page_mut(page)?;
        let info = media::probe(bytes)?;
        let (width, height) = size.resolve(info.width, info.height);
        self.push(
            page,
            DrawOp::Picture {
                rect: Rect::new(x, y, width, height),
                format: info.format,
                data: bytes.to_vec(),
            },
        )
    }

    fn finish(self) -> Result<Deck> {
        Ok(self)
    }
}
