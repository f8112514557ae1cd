//! Package assembly: every OPC part of a presentation, zipped.
//!
//! Output is byte-for-byte deterministic for the same input: parts are
//! written in a fixed order, timestamps are pinned and no creation date is
//! recorded in the document properties.

use crate::media::MediaStore;
use crate::slide::{self, write_group_header, REL_SLIDE_LAYOUT};
use crate::units::emu;
use crate::xml::{XmlOut, NS_A, NS_PKG_RELS, PML_NAMESPACES};
use deck_core::{hex_to_rgb, Deck, Error, Result, ThemeConfig};
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_PRES_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
const REL_TABLE_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_PRES_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
const CT_TABLE_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
const CT_CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXTENDED_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";
const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";

/// Application name recorded in the document properties.
pub const APPLICATION: &str = "deck-gen";

const SLIDE_MASTER_ID: &str = "2147483648";
const SLIDE_LAYOUT_ID: &str = "2147483649";
const FIRST_SLIDE_ID: usize = 256;

/// Portrait letter-size notes page.
const NOTES_WIDTH_EMU: &str = "6858000";
const NOTES_HEIGHT_EMU: &str = "9144000";

const TABLE_STYLES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" def="{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}"/>"#
);

/// Fill, line, effect and background style lists required by every theme.
const FORMAT_SCHEME_XML: &str = concat!(
    r#"<a:fmtScheme name="Office">"#,
    r#"<a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst>"#,
    r#"<a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst>"#,
    r#"<a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle>"#,
    r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
    r#"<a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>"#,
    r#"<a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst>"#,
    r#"</a:fmtScheme>"#
);

/// Accent slots 3-6 of the theme color scheme, which the themes never set.
const SPARE_ACCENTS: [(&str, &str); 4] = [
    ("a:accent3", "A5A5A5"),
    ("a:accent4", "FFC000"),
    ("a:accent5", "5B9BD5"),
    ("a:accent6", "70AD47"),
];

/// Theme-level settings carried into the package: title, color scheme and
/// font scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageInfo {
    /// Document title.
    pub title: String,
    /// `RRGGBB` of the primary, secondary, accent and background colors.
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    /// Major (heading) font.
    pub title_font: String,
    /// Minor (body) font.
    pub body_font: String,
}

impl PackageInfo {
    /// Derive package settings from a theme. Fails on malformed colors.
    pub fn from_theme(theme: &ThemeConfig) -> Result<Self> {
        Ok(Self {
            title: theme.template_name.clone(),
            primary: hex_to_rgb(&theme.primary)?.to_srgb(),
            secondary: hex_to_rgb(&theme.secondary)?.to_srgb(),
            accent: hex_to_rgb(&theme.accent)?.to_srgb(),
            background: hex_to_rgb(&theme.background)?.to_srgb(),
            title_font: theme.title_font.clone(),
            body_font: theme.body_font.clone(),
        })
    }
}

fn zip_err(e: zip::result::ZipError) -> Error {
    Error::ZipError(format!("Failed to write archive: {}", e))
}

/// Serialize `deck` into PPTX bytes.
pub fn write_package(deck: &Deck, info: &PackageInfo) -> Result<Vec<u8>> {
    let mut media = MediaStore::default();
    let mut slides = Vec::with_capacity(deck.pages.len());
    for page in &deck.pages {
        slides.push(slide::render(page, &mut media)?);
    }
    let slide_count = slides.len();

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    // Pinned timestamp keeps repeated builds identical.
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut add = |path: &str, bytes: &[u8]| -> Result<()> {
        zip.start_file(path, options).map_err(zip_err)?;
        zip.write_all(bytes)
            .map_err(|e| Error::Serialization(format!("Failed to write '{}': {}", path, e)))
    };

    add("[Content_Types].xml", &content_types(slide_count, &media)?)?;
    add("_rels/.rels", &root_rels()?)?;
    add("docProps/core.xml", &core_props(&info.title)?)?;
    add("docProps/app.xml", &app_props(slide_count)?)?;
    add("ppt/presentation.xml", &presentation(deck, slide_count)?)?;
    add("ppt/_rels/presentation.xml.rels", &presentation_rels(slide_count)?)?;
    add("ppt/presProps.xml", &pres_props()?)?;
    add("ppt/tableStyles.xml", TABLE_STYLES_XML.as_bytes())?;
    add("ppt/slideMasters/slideMaster1.xml", &slide_master()?)?;
    add(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        &rels(&[
            ("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
            ("rId2", REL_THEME, "../theme/theme1.xml"),
        ])?,
    )?;
    add("ppt/slideLayouts/slideLayout1.xml", &slide_layout()?)?;
    add(
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        &rels(&[("rId1", REL_SLIDE_MASTER, "../slideMasters/slideMaster1.xml")])?,
    )?;
    add("ppt/theme/theme1.xml", &theme(info)?)?;

    for (index, part) in slides.iter().enumerate() {
        let number = index + 1;
        add(&format!("ppt/slides/slide{}.xml", number), &part.xml)?;
        add(
            &format!("ppt/slides/_rels/slide{}.xml.rels", number),
            &part.rels,
        )?;
    }
    for (path, bytes) in media.entries() {
        add(&path, bytes)?;
    }

    let cursor = zip.finish().map_err(zip_err)?;
    log::debug!(
        "Wrote package with {} slides and {} media parts",
        slide_count,
        media.len()
    );
    Ok(cursor.into_inner())
}

fn rels(entries: &[(&str, &str, &str)]) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start("Relationships", &[("xmlns", NS_PKG_RELS)])?;
    for &(id, kind, target) in entries {
        out.empty(
            "Relationship",
            &[("Id", id), ("Type", kind), ("Target", target)],
        )?;
    }
    out.end("Relationships")?;
    Ok(out.into_bytes())
}

fn content_types(slide_count: usize, media: &MediaStore) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start(
        "Types",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/package/2006/content-types",
        )],
    )?;
    out.empty("Default", &[("Extension", "rels"), ("ContentType", CT_RELS)])?;
    out.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    for (extension, mime) in media.formats() {
        out.empty("Default", &[("Extension", extension), ("ContentType", mime)])?;
    }

    let fixed = [
        ("/ppt/presentation.xml", CT_PRESENTATION),
        ("/ppt/presProps.xml", CT_PRES_PROPS),
        ("/ppt/tableStyles.xml", CT_TABLE_STYLES),
        ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT),
        ("/ppt/theme/theme1.xml", CT_THEME),
        ("/docProps/core.xml", CT_CORE_PROPS),
        ("/docProps/app.xml", CT_EXTENDED_PROPS),
    ];
    for (part, content_type) in fixed {
        out.empty(
            "Override",
            &[("PartName", part), ("ContentType", content_type)],
        )?;
    }
    for number in 1..=slide_count {
        let part = format!("/ppt/slides/slide{}.xml", number);
        out.empty(
            "Override",
            &[("PartName", part.as_str()), ("ContentType", CT_SLIDE)],
        )?;
    }
    out.end("Types")?;
    Ok(out.into_bytes())
}

fn root_rels() -> Result<Vec<u8>> {
    rels(&[
        ("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
        ("rId2", REL_CORE_PROPS, "docProps/core.xml"),
        ("rId3", REL_EXTENDED_PROPS, "docProps/app.xml"),
    ])
}

fn core_props(title: &str) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    out.text_element("dc:title", title)?;
    out.text_element("dc:creator", APPLICATION)?;
    out.end("cp:coreProperties")?;
    Ok(out.into_bytes())
}

fn app_props(slide_count: usize) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start(
        "Properties",
        &[
            (
                "xmlns",
                "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
            ),
            (
                "xmlns:vt",
                "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
            ),
        ],
    )?;
    out.text_element("Application", APPLICATION)?;
    out.text_element("Slides", &slide_count.to_string())?;
    out.end("Properties")?;
    Ok(out.into_bytes())
}

/// Relationship ids of the presentation part: master, slides, then the
/// auxiliary parts.
fn presentation_rels(slide_count: usize) -> Result<Vec<u8>> {
    let slide_targets: Vec<(String, String)> = (1..=slide_count)
        .map(|n| (format!("rId{}", n + 1), format!("slides/slide{}.xml", n)))
        .collect();
    let theme_id = format!("rId{}", slide_count + 2);
    let props_id = format!("rId{}", slide_count + 3);
    let styles_id = format!("rId{}", slide_count + 4);

    let mut entries = vec![("rId1", REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml")];
    for (id, target) in &slide_targets {
        entries.push((id.as_str(), REL_SLIDE, target.as_str()));
    }
    entries.push((theme_id.as_str(), REL_THEME, "theme/theme1.xml"));
    entries.push((props_id.as_str(), REL_PRES_PROPS, "presProps.xml"));
    entries.push((styles_id.as_str(), REL_TABLE_STYLES, "tableStyles.xml"));
    rels(&entries)
}

fn presentation(deck: &Deck, slide_count: usize) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start("p:presentation", &PML_NAMESPACES)?;

    out.start("p:sldMasterIdLst", &[])?;
    out.empty("p:sldMasterId", &[("id", SLIDE_MASTER_ID), ("r:id", "rId1")])?;
    out.end("p:sldMasterIdLst")?;

    out.start("p:sldIdLst", &[])?;
    for index in 0..slide_count {
        let id = (FIRST_SLIDE_ID + index).to_string();
        let rel_id = format!("rId{}", index + 2);
        out.empty(
            "p:sldId",
            &[("id", id.as_str()), ("r:id", rel_id.as_str())],
        )?;
    }
    out.end("p:sldIdLst")?;

    let cx = emu(deck.canvas.width).to_string();
    let cy = emu(deck.canvas.height).to_string();
    out.empty("p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    out.empty(
        "p:notesSz",
        &[("cx", NOTES_WIDTH_EMU), ("cy", NOTES_HEIGHT_EMU)],
    )?;
    out.end("p:presentation")?;
    Ok(out.into_bytes())
}

fn pres_props() -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.empty("p:presentationPr", &PML_NAMESPACES)?;
    Ok(out.into_bytes())
}

fn slide_master() -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start("p:sldMaster", &PML_NAMESPACES)?;
    out.start("p:cSld", &[])?;
    out.start("p:bg", &[])?;
    out.start("p:bgRef", &[("idx", "1001")])?;
    out.empty("a:schemeClr", &[("val", "bg1")])?;
    out.end("p:bgRef")?;
    out.end("p:bg")?;
    out.start("p:spTree", &[])?;
    write_group_header(&mut out)?;
    out.end("p:spTree")?;
    out.end("p:cSld")?;

    out.empty(
        "p:clrMap",
        &[
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ],
    )?;

    out.start("p:sldLayoutIdLst", &[])?;
    out.empty(
        "p:sldLayoutId",
        &[("id", SLIDE_LAYOUT_ID), ("r:id", "rId1")],
    )?;
    out.end("p:sldLayoutIdLst")?;

    out.start("p:txStyles", &[])?;
    for (style, font) in [
        ("p:titleStyle", "+mj-lt"),
        ("p:bodyStyle", "+mn-lt"),
        ("p:otherStyle", "+mn-lt"),
    ] {
        out.start(style, &[])?;
        out.start("a:lvl1pPr", &[])?;
        out.start("a:defRPr", &[])?;
        out.empty("a:latin", &[("typeface", font)])?;
        out.end("a:defRPr")?;
        out.end("a:lvl1pPr")?;
        out.end(style)?;
    }
    out.end("p:txStyles")?;

    out.end("p:sldMaster")?;
    Ok(out.into_bytes())
}

fn slide_layout() -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    let mut attrs = PML_NAMESPACES.to_vec();
    attrs.push(("type", "blank"));
    attrs.push(("preserve", "1"));
    out.start("p:sldLayout", &attrs)?;
    out.start("p:cSld", &[("name", "Blank")])?;
    out.start("p:spTree", &[])?;
    write_group_header(&mut out)?;
    out.end("p:spTree")?;
    out.end("p:cSld")?;
    out.start("p:clrMapOvr", &[])?;
    out.empty("a:masterClrMapping", &[])?;
    out.end("p:clrMapOvr")?;
    out.end("p:sldLayout")?;
    Ok(out.into_bytes())
}

fn theme(info: &PackageInfo) -> Result<Vec<u8>> {
    let mut out = XmlOut::new()?;
    out.start("a:theme", &[("xmlns:a", NS_A), ("name", info.title.as_str())])?;
    out.start("a:themeElements", &[])?;

    out.start("a:clrScheme", &[("name", info.title.as_str())])?;
    out.start("a:dk1", &[])?;
    out.empty("a:sysClr", &[("val", "windowText"), ("lastClr", "000000")])?;
    out.end("a:dk1")?;
    out.start("a:lt1", &[])?;
    out.empty("a:sysClr", &[("val", "window"), ("lastClr", "FFFFFF")])?;
    out.end("a:lt1")?;
    let slots = [
        ("a:dk2", info.secondary.as_str()),
        ("a:lt2", info.background.as_str()),
        ("a:accent1", info.primary.as_str()),
        ("a:accent2", info.accent.as_str()),
    ];
    for (slot, color) in slots.into_iter().chain(SPARE_ACCENTS) {
        out.start(slot, &[])?;
        out.empty("a:srgbClr", &[("val", color)])?;
        out.end(slot)?;
    }
    for (slot, color) in [("a:hlink", "0563C1"), ("a:folHlink", "954F72")] {
        out.start(slot, &[])?;
        out.empty("a:srgbClr", &[("val", color)])?;
        out.end(slot)?;
    }
    out.end("a:clrScheme")?;

    out.start("a:fontScheme", &[("name", info.title.as_str())])?;
    for (slot, font) in [
        ("a:majorFont", info.title_font.as_str()),
        ("a:minorFont", info.body_font.as_str()),
    ] {
        out.start(slot, &[])?;
        out.empty("a:latin", &[("typeface", font)])?;
        out.empty("a:ea", &[("typeface", font)])?;
        out.empty("a:cs", &[("typeface", "")])?;
        out.end(slot)?;
    }
    out.end("a:fontScheme")?;

    let mut bytes = out.into_bytes();
    bytes.extend_from_slice(FORMAT_SCHEME_XML.as_bytes());
    bytes.extend_from_slice(b"</a:themeElements></a:theme>");
    Ok(bytes)
}
