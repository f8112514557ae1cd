//! Theme model, layout recipes, overlays and deck assembly for slide
//! template generation.
//!
//! Recipes draw through the [`PageBuilder`] trait, so the same deck can be
//! recorded in memory ([`Deck`]) or serialized by an output backend.

pub mod builder;
pub mod color;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod media;
pub mod naming;
pub mod overlay;
pub mod presets;
pub mod recipes;
pub mod types;

pub use builder::{HAlign, PageBuilder, PageId, ShapeId, TextStyle, VAnchor};
pub use color::{hex_to_rgb, is_hex_color, Rgb};
pub use deck::{Deck, DrawOp, Page, TextBox};
pub use engine::{build, BuildOutput, DeckAssembler};
pub use error::{Error, Result};
pub use geometry::{Canvas, CanvasRatio, ImageSize, Rect};
pub use media::{ImageInfo, MediaFormat};
pub use naming::output_file_name;
pub use presets::{find_preset, LayoutInfo, ThemePreset, THEME_PRESETS};
pub use types::{
    ImageAsset, LayoutKind, LayoutPlan, LayoutSlot, LogoPosition, TemplateConfig, ThemeConfig,
    Watermark,
};
