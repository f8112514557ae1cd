//! PPTX (Office Open XML) backend for slide template generation.
//!
//! Writes decks as .pptx packages (ZIP archives of XML parts) and reads
//! them back for verification.

pub mod inspect;
mod media;
pub mod package;
mod slide;
pub mod units;
pub mod writer;
mod xml;

pub use inspect::{inspect, SlideSummary};
pub use package::{write_package, PackageInfo};
pub use units::EMU_PER_INCH;
pub use writer::{generate, PptxBuilder};
