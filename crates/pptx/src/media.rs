//! Picture parts shared across slides.

use deck_core::MediaFormat;
use std::collections::BTreeSet;

struct MediaPart {
    format: MediaFormat,
    data: Vec<u8>,
}

/// Pictures in first-use order. Identical bytes are stored once, so a logo
/// repeated on every slide yields a single part.
#[derive(Default)]
pub(crate) struct MediaStore {
    parts: Vec<MediaPart>,
}

impl MediaStore {
    /// Index of the part holding `data`, adding it if new.
    pub fn intern(&mut self, format: MediaFormat, data: &[u8]) -> usize {
        if let Some(index) = self.parts.iter().position(|p| p.data == data) {
            return index;
        }
        self.parts.push(MediaPart {
            format,
            data: data.to_vec(),
        });
        self.parts.len() - 1
    }

    /// `imageN.ext`, 1-based.
    pub fn file_name(&self, index: usize) -> String {
        let ext = self
            .parts
            .get(index)
            .map(|p| p.format.extension())
            .unwrap_or("bin");
        format!("image{}.{}", index + 1, ext)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Distinct formats in use, for `[Content_Types].xml` defaults.
    pub fn formats(&self) -> BTreeSet<(&'static str, &'static str)> {
        self.parts
            .iter()
            .map(|p| (p.format.extension(), p.format.mime_type()))
            .collect()
    }

    /// `(part path, bytes)` for every stored picture.
    pub fn entries(&self) -> impl Iterator<Item = (String, &[u8])> + '_ {
        (0..self.parts.len()).map(move |i| {
            (
                format!("ppt/media/{}", self.file_name(i)),
                self.parts[i].data.as_slice(),
            )
        })
    }
}
