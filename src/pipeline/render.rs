//! PDF rendering: serialise laid-out pages with lopdf.
//!
//! Every page shares one resource dictionary holding the standard
//! Times-Roman Type1 font with WinAnsi encoding, so no font program is
//! embedded and the output stays small. Each line is positioned absolutely
//! with a text matrix taken straight from the layout.

use crate::error::TranscriptError;
use crate::pipeline::layout::{Page, PageGeometry, FONT_NAME};
use crate::pipeline::winansi;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

/// Resource name the content streams use for the font.
const FONT_RESOURCE: &str = "F1";

/// Spaces a tab expands to. Standard fonts have no tab glyph.
const TAB_WIDTH: usize = 4;

/// Render `pages` as a complete PDF document.
pub fn render_pdf(pages: &[Page], geometry: &PageGeometry) -> Result<Vec<u8>, TranscriptError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => FONT_NAME,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { FONT_RESOURCE => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, geometry);
        let encoded = content
            .encode()
            .map_err(|e| TranscriptError::PdfRender(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), geometry.width.into(), geometry.height.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Processed Transcript"),
        "Producer" => Object::string_literal(concat!("transcript-renamer ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| TranscriptError::PdfRender(e.to_string()))?;

    debug!("Rendered {} page(s) → {} PDF bytes", page_count, bytes.len());
    Ok(bytes)
}

/// Build the content stream for one page. A page without lines gets an
/// empty stream.
fn page_content(page: &Page, geometry: &PageGeometry) -> Content {
    if page.lines.is_empty() {
        return Content { operations: vec![] };
    }

    let mut operations = Vec::with_capacity(page.lines.len() * 2 + 3);
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![FONT_RESOURCE.into(), geometry.font_size.into()],
    ));
    for line in &page.lines {
        operations.push(Operation::new(
            "Tm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                line.x.into(),
                line.y.into(),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_line(&line.text))],
        ));
    }
    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

/// Encode a line for a WinAnsi standard font.
///
/// Tabs become spaces, other control characters are dropped, and anything
/// WinAnsi cannot represent becomes `?`.
fn encode_line(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => out.extend(std::iter::repeat(b' ').take(TAB_WIDTH)),
            c if c.is_control() => {}
            c => out.push(winansi::encode_char(c).unwrap_or(b'?')),
        }
    }
    out
}
