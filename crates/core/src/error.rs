//! Error types for slide template generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating a configuration or building a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A color string is not six hex digits (optionally prefixed with `#`).
    #[error("Invalid color format: {0:?} (expected 6 hex digits, e.g. \"#1a365d\")")]
    InvalidColorFormat(String),

    /// A configuration value is outside its allowed range or set.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Image bytes could not be decoded or placed on a page.
    #[error("Image placement failed: {0}")]
    ImagePlacement(String),

    /// The logo could not be placed on a page.
    #[error("Logo placement failed: {0}")]
    LogoPlacement(String),

    /// The layout plan resolves to zero pages.
    #[error("Empty layout plan: select at least one layout with count > 0")]
    EmptyPlan,

    /// A draw call referenced a page that does not exist.
    #[error("Unknown page index: {0}")]
    UnknownPage(usize),

    /// The finished deck could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML writing or reading error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// Configuration document could not be parsed or written.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
