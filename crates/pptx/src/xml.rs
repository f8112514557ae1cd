//! Thin event-writer wrapper over `quick_xml::Writer`.

use deck_core::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

pub(crate) const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub(crate) const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Namespace declarations shared by every PresentationML part.
pub(crate) const PML_NAMESPACES: [(&str, &str); 3] =
    [("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)];

fn xml_err(e: quick_xml::Error) -> Error {
    Error::XmlError(format!("Failed to write XML: {}", e))
}

/// Streams one XML part into memory.
pub(crate) struct XmlOut {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlOut {
    /// Start a standalone UTF-8 document.
    pub fn new() -> Result<Self> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(xml_err)?;
        Ok(Self { writer })
    }

    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(elem)).map_err(xml_err)
    }

    pub fn end(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_err)
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(elem)).map_err(xml_err)
    }

    /// Escaped character data.
    pub fn text(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_err)
    }

    /// `<name>text</name>`
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name, &[])?;
        self.text(text)?;
        self.end(name)
    }

    /// `<a:solidFill><a:srgbClr val="RRGGBB"/></a:solidFill>`
    pub fn solid_fill(&mut self, srgb: &str) -> Result<()> {
        self.start("a:solidFill", &[])?;
        self.empty("a:srgbClr", &[("val", srgb)])?;
        self.end("a:solidFill")
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }
}
