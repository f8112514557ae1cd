//! Slide part rendering: one recorded page to `slideN.xml` plus its rels.

use crate::media::MediaStore;
use crate::units::{emu, font_size};
use crate::xml::{XmlOut, NS_PKG_RELS, PML_NAMESPACES};
use deck_core::{DrawOp, HAlign, Page, Rect, Result, Rgb, TextBox, VAnchor};

pub(crate) const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub(crate) const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Outline width for bordered rectangles: 1pt.
const BORDER_WIDTH_EMU: &str = "12700";

/// Serialized slide and its relationships part.
pub(crate) struct SlidePart {
    pub xml: Vec<u8>,
    pub rels: Vec<u8>,
}

/// Render `page`, registering its pictures in `media`.
pub(crate) fn render(page: &Page, media: &mut MediaStore) -> Result<SlidePart> {
    // rId1 is the layout; pictures follow in first-use order.
    let mut image_rels: Vec<usize> = Vec::new();

    let mut out = XmlOut::new()?;
    out.start("p:sld", &PML_NAMESPACES)?;
    out.start("p:cSld", &[])?;

    if let Some(background) = page.background {
        out.start("p:bg", &[])?;
        out.start("p:bgPr", &[])?;
        out.solid_fill(&background.to_srgb())?;
        out.empty("a:effectLst", &[])?;
        out.end("p:bgPr")?;
        out.end("p:bg")?;
    }

    out.start("p:spTree", &[])?;
    write_group_header(&mut out)?;

    for (index, op) in page.ops.iter().enumerate() {
        // Id 1 belongs to the group shape.
        let id = (index + 2).to_string();
        match op {
            DrawOp::Rect { rect, fill, border } => {
                write_shape(&mut out, &id, "Rectangle", "rect", rect, *fill, *border)?
            }
            DrawOp::Oval { rect, fill } => {
                write_shape(&mut out, &id, "Oval", "ellipse", rect, *fill, None)?
            }
            DrawOp::Text(text) => write_text(&mut out, &id, text)?,
            DrawOp::Picture { rect, format, data } => {
                let part = media.intern(*format, data);
                let position = match image_rels.iter().position(|&p| p == part) {
                    Some(position) => position,
                    None => {
                        image_rels.push(part);
                        image_rels.len() - 1
                    }
                };
                let rel_id = format!("rId{}", position + 2);
                write_picture(&mut out, &id, rect, &rel_id)?;
            }
        }
    }

    out.end("p:spTree")?;
    out.end("p:cSld")?;
    out.start("p:clrMapOvr", &[])?;
    out.empty("a:masterClrMapping", &[])?;
    out.end("p:clrMapOvr")?;
    out.end("p:sld")?;

    let mut rels = XmlOut::new()?;
    rels.start("Relationships", &[("xmlns", NS_PKG_RELS)])?;
    rels.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", REL_SLIDE_LAYOUT),
            ("Target", "../slideLayouts/slideLayout1.xml"),
        ],
    )?;
    for (position, &part) in image_rels.iter().enumerate() {
        let id = format!("rId{}", position + 2);
        let target = format!("../media/{}", media.file_name(part));
        rels.empty(
            "Relationship",
            &[("Id", id.as_str()), ("Type", REL_IMAGE), ("Target", target.as_str())],
        )?;
    }
    rels.end("Relationships")?;

    Ok(SlidePart {
        xml: out.into_bytes(),
        rels: rels.into_bytes(),
    })
}

/// The mandatory non-visual and transform header of `p:spTree`.
pub(crate) fn write_group_header(out: &mut XmlOut) -> Result<()> {
    out.start("p:nvGrpSpPr", &[])?;
    out.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    out.empty("p:cNvGrpSpPr", &[])?;
    out.empty("p:nvPr", &[])?;
    out.end("p:nvGrpSpPr")?;
    out.start("p:grpSpPr", &[])?;
    out.start("a:xfrm", &[])?;
    out.empty("a:off", &[("x", "0"), ("y", "0")])?;
    out.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    out.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    out.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    out.end("a:xfrm")?;
    out.end("p:grpSpPr")
}

fn write_xfrm(out: &mut XmlOut, rect: &Rect) -> Result<()> {
    out.start("a:xfrm", &[])?;
    out.empty(
        "a:off",
        &[
            ("x", emu(rect.x).to_string().as_str()),
            ("y", emu(rect.y).to_string().as_str()),
        ],
    )?;
    out.empty(
        "a:ext",
        &[
            ("cx", emu(rect.width).to_string().as_str()),
            ("cy", emu(rect.height).to_string().as_str()),
        ],
    )?;
    out.end("a:xfrm")
}

fn write_geometry(out: &mut XmlOut, preset: &str) -> Result<()> {
    out.start("a:prstGeom", &[("prst", preset)])?;
    out.empty("a:avLst", &[])?;
    out.end("a:prstGeom")
}

fn write_no_line(out: &mut XmlOut) -> Result<()> {
    out.start("a:ln", &[])?;
    out.empty("a:noFill", &[])?;
    out.end("a:ln")
}

fn write_shape(
    out: &mut XmlOut,
    id: &str,
    kind: &str,
    preset: &str,
    rect: &Rect,
    fill: Rgb,
    border: Option<Rgb>,
) -> Result<()> {
    let name = format!("{} {}", kind, id);
    out.start("p:sp", &[])?;
    out.start("p:nvSpPr", &[])?;
    out.empty("p:cNvPr", &[("id", id), ("name", name.as_str())])?;
    out.empty("p:cNvSpPr", &[])?;
    out.empty("p:nvPr", &[])?;
    out.end("p:nvSpPr")?;

    out.start("p:spPr", &[])?;
    write_xfrm(out, rect)?;
    write_geometry(out, preset)?;
    out.solid_fill(&fill.to_srgb())?;
    match border {
        Some(color) => {
            out.start("a:ln", &[("w", BORDER_WIDTH_EMU)])?;
            out.solid_fill(&color.to_srgb())?;
            out.end("a:ln")?;
        }
        None => write_no_line(out)?,
    }
    out.end("p:spPr")?;
    out.end("p:sp")
}

fn align_attr(align: HAlign) -> &'static str {
    match align {
        HAlign::Left => "l",
        HAlign::Center => "ctr",
        HAlign::Right => "r",
    }
}

fn anchor_attr(anchor: VAnchor) -> &'static str {
    match anchor {
        VAnchor::Top => "t",
        VAnchor::Middle => "ctr",
        VAnchor::Bottom => "b",
    }
}

/// Run properties shared by every run and line break of a text box.
fn write_run_props(out: &mut XmlOut, text: &TextBox, size: &str) -> Result<()> {
    let mut attrs = vec![("lang", "zh-CN"), ("altLang", "en-US"), ("sz", size)];
    if text.bold {
        attrs.push(("b", "1"));
    }
    attrs.push(("dirty", "0"));

    out.start("a:rPr", &attrs)?;
    out.solid_fill(&text.color.to_srgb())?;
    out.empty("a:latin", &[("typeface", text.font.as_str())])?;
    out.empty("a:ea", &[("typeface", text.font.as_str())])?;
    out.end("a:rPr")
}

fn write_text(out: &mut XmlOut, id: &str, text: &TextBox) -> Result<()> {
    let name = format!("TextBox {}", id);
    out.start("p:sp", &[])?;
    out.start("p:nvSpPr", &[])?;
    out.empty("p:cNvPr", &[("id", id), ("name", name.as_str())])?;
    out.empty("p:cNvSpPr", &[("txBox", "1")])?;
    out.empty("p:nvPr", &[])?;
    out.end("p:nvSpPr")?;

    out.start("p:spPr", &[])?;
    write_xfrm(out, &text.rect)?;
    write_geometry(out, "rect")?;
    out.empty("a:noFill", &[])?;
    out.end("p:spPr")?;

    out.start("p:txBody", &[])?;
    out.empty(
        "a:bodyPr",
        &[
            ("wrap", "square"),
            ("rtlCol", "0"),
            ("anchor", anchor_attr(text.anchor)),
        ],
    )?;
    out.empty("a:lstStyle", &[])?;
    out.start("a:p", &[])?;
    out.empty("a:pPr", &[("algn", align_attr(text.align))])?;

    let size = font_size(text.size).to_string();
    for (line_index, line) in text.text.split('\n').enumerate() {
        if line_index > 0 {
            out.start("a:br", &[])?;
            write_run_props(out, text, &size)?;
            out.end("a:br")?;
        }
        if line.is_empty() {
            continue;
        }
        out.start("a:r", &[])?;
        write_run_props(out, text, &size)?;
        out.text_element("a:t", line)?;
        out.end("a:r")?;
    }

    out.empty(
        "a:endParaRPr",
        &[("lang", "zh-CN"), ("altLang", "en-US"), ("sz", size.as_str()), ("dirty", "0")],
    )?;
    out.end("a:p")?;
    out.end("p:txBody")?;
    out.end("p:sp")
}

fn write_picture(out: &mut XmlOut, id: &str, rect: &Rect, rel_id: &str) -> Result<()> {
    let name = format!("Picture {}", id);
    out.start("p:pic", &[])?;
    out.start("p:nvPicPr", &[])?;
    out.empty("p:cNvPr", &[("id", id), ("name", name.as_str())])?;
    out.start("p:cNvPicPr", &[])?;
    out.empty("a:picLocks", &[("noChangeAspect", "1")])?;
    out.end("p:cNvPicPr")?;
    out.empty("p:nvPr", &[])?;
    out.end("p:nvPicPr")?;

    out.start("p:blipFill", &[])?;
    out.empty("a:blip", &[("r:embed", rel_id)])?;
    out.start("a:stretch", &[])?;
    out.empty("a:fillRect", &[])?;
    out.end("a:stretch")?;
    out.end("p:blipFill")?;

    out.start("p:spPr", &[])?;
    write_xfrm(out, rect)?;
    write_geometry(out, "rect")?;
    out.end("p:spPr")?;
    out.end("p:pic")
}
