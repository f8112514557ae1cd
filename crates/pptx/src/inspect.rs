//! Read a generated deck back: slide order, text boxes and pictures.

use deck_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

/// What one slide of a package contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideSummary {
    /// 1-based position in the deck.
    pub number: usize,
    /// Text of each shape in document order; line breaks become `\n`.
    pub texts: Vec<String>,
    pub picture_count: usize,
}

impl SlideSummary {
    /// Whether any shape's text equals `text`.
    pub fn has_text(&self, text: &str) -> bool {
        self.texts.iter().any(|t| t == text)
    }
}

/// Summarize every slide of the PPTX in `bytes`, in presentation order.
pub fn inspect(bytes: &[u8]) -> Result<Vec<SlideSummary>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

    let slide_order = slide_order(&mut archive)?;
    let mut slides = Vec::with_capacity(slide_order.len());
    for (index, path) in slide_order.iter().enumerate() {
        let content = read_part(&mut archive, path)?;
        let mut summary = summarize_slide(&content)?;
        summary.number = index + 1;
        slides.push(summary);
    }
    Ok(slides)
}

/// Slide part paths from the presentation relationships, sorted by slide
/// number.
fn slide_order<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
    let content = read_part(archive, "ppt/_rels/presentation.xml.rels")?;
    let mut slides: Vec<(String, Option<usize>)> = Vec::new();

    let mut reader = Reader::from_str(&content);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut rel_type = String::new();
                let mut target = String::new();
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Type" => rel_type = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }

                if rel_type.ends_with("/slide") {
                    let number = slide_number(&target);
                    let path = match target.strip_prefix('/') {
                        Some(absolute) => absolute.to_string(),
                        None => format!("ppt/{}", target),
                    };
                    slides.push((path, number));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )))
            }
            _ => {}
        }
    }

    slides.sort_by(|a, b| match (a.1, b.1) {
        (Some(na), Some(nb)) => na.cmp(&nb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });
    Ok(slides.into_iter().map(|(path, _)| path).collect())
}

fn summarize_slide(xml: &str) -> Result<SlideSummary> {
    let mut summary = SlideSummary::default();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut in_shape = false;
    let mut in_text = false;
    let mut current = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    in_shape = true;
                    current.clear();
                }
                b"pic" => summary.picture_count += 1,
                b"t" if in_shape => in_text = true,
                b"br" if in_shape => current.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if in_shape && local_name(e.name().as_ref()) == b"br" {
                    current.push('\n');
                }
            }
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| Error::XmlError(format!("Bad text in slide: {}", e)))?;
                current.push_str(&text);
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"t" => in_text = false,
                b"sp" => {
                    in_shape = false;
                    if !current.is_empty() {
                        summary.texts.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing slide: {}", e)));
            }
            _ => {}
        }
    }
    Ok(summary)
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;
    Ok(content)
}

/// Local part of a possibly prefixed element name.
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Number in a target like `"slides/slide3.xml"`.
fn slide_number(target: &str) -> Option<usize> {
    let stem = target.trim_end_matches(".xml");
    let digits: String = stem
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}
