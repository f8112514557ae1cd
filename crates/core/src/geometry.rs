//! Canvas dimensions and coordinate helpers.
//!
//! All lengths are in inches. Recipes express positions either as a fixed
//! offset or as a fraction of the canvas width/height, which is what lets the
//! same recipe serve both supported aspect ratios.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported canvas aspect ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasRatio {
    /// Widescreen, 13.333 × 7.5 in.
    #[default]
    #[serde(rename = "16:9")]
    Wide,
    /// Standard, 10 × 7.5 in.
    #[serde(rename = "4:3")]
    Standard,
}

impl CanvasRatio {
    /// All supported ratios.
    pub const ALL: [CanvasRatio; 2] = [CanvasRatio::Wide, CanvasRatio::Standard];

    /// Parse a ratio label such as `"16:9"`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "16:9" => Some(Self::Wide),
            "4:3" => Some(Self::Standard),
            _ => None,
        }
    }

    /// The ratio label, e.g. `"16:9"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Wide => "16:9",
            Self::Standard => "4:3",
        }
    }

    /// Resolve to explicit canvas dimensions.
    pub fn canvas(self) -> Canvas {
        match self {
            Self::Wide => Canvas::new(13.333, 7.5),
            Self::Standard => Canvas::new(10.0, 7.5),
        }
    }
}

impl fmt::Display for CanvasRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The drawing surface of one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A fraction of the canvas width.
    pub fn x_frac(&self, fraction: f64) -> f64 {
        self.width * fraction
    }

    /// A fraction of the canvas height.
    pub fn y_frac(&self, fraction: f64) -> f64 {
        self.height * fraction
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }

    /// A full-width band starting at `y`.
    pub fn band(&self, y: f64, height: f64) -> Rect {
        Rect::new(0.0, y, self.width, height)
    }

    /// A band inset by `margin` on the left and right.
    pub fn inset_band(&self, margin: f64, y: f64, height: f64) -> Rect {
        Rect::new(margin, y, self.width - 2.0 * margin, height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        CanvasRatio::default().canvas()
    }
}

/// An axis-aligned box on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A band of `height` vertically centered in this box, same horizontal extent.
    pub fn centered_band(&self, height: f64) -> Rect {
        Rect::new(self.x, self.y + self.height / 2.0 - height / 2.0, self.width, height)
    }
}

/// Requested size of a placed image. The missing dimension follows the
/// image's own aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageSize {
    Width(f64),
    Height(f64),
}

impl ImageSize {
    /// Resolve to `(width, height)` for an image of `px_width × px_height` pixels.
    pub fn resolve(self, px_width: u32, px_height: u32) -> (f64, f64) {
        let aspect = f64::from(px_width) / f64::from(px_height.max(1));
        match self {
            Self::Width(w) => (w, w / aspect),
            Self::Height(h) => (h * aspect, h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_canvas() {
        assert_eq!(CanvasRatio::Wide.canvas(), Canvas::new(13.333, 7.5));
        assert_eq!(CanvasRatio::Standard.canvas(), Canvas::new(10.0, 7.5));
        assert_eq!(Canvas::default(), CanvasRatio::Wide.canvas());
    }

    #[test]
    fn test_ratio_labels() {
        for ratio in CanvasRatio::ALL {
            assert_eq!(CanvasRatio::from_label(ratio.label()), Some(ratio));
        }
        assert_eq!(CanvasRatio::from_label("21:9"), None);
    }

    #[test]
    fn test_ratio_serde() {
        let json = serde_json::to_string(&CanvasRatio::Standard).unwrap();
        assert_eq!(json, "\"4:3\"");
        let parsed: CanvasRatio = serde_json::from_str("\"16:9\"").unwrap();
        assert_eq!(parsed, CanvasRatio::Wide);
        assert!(serde_json::from_str::<CanvasRatio>("\"1:1\"").is_err());
    }

    #[test]
    fn test_canvas_helpers() {
        let canvas = Canvas::new(10.0, 7.5);
        assert_eq!(canvas.x_frac(0.5), 5.0);
        assert_eq!(canvas.y_frac(0.2), 1.5);
        assert_eq!(canvas.inset_band(0.5, 1.0, 2.0), Rect::new(0.5, 1.0, 9.0, 2.0));
        assert_eq!(Rect::new(1.0, 1.0, 4.0, 2.0).centered_band(1.0).y, 1.5);
    }

    #[test]
    fn test_image_size_resolve() {
        assert_eq!(ImageSize::Width(4.0).resolve(400, 200), (4.0, 2.0));
        assert_eq!(ImageSize::Height(0.5).resolve(300, 100), (1.5, 0.5));
    }
}
