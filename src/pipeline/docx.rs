//! `.docx` decoding: ZIP container → `word/document.xml` → body paragraphs.
//!
//! Only paragraphs that are direct children of `<w:body>` are collected, in
//! document order. Paragraphs inside tables, text boxes, and content controls
//! are skipped, as are images and deleted-revision text (`<w:delText>`).
//! Element matching uses local names so documents written with a
//! non-standard namespace prefix still decode.

use crate::config::SourceFormat;
use crate::error::TranscriptError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use tracing::debug;

/// Path of the main document part inside the container.
const DOCUMENT_PART: &str = "word/document.xml";

/// Extract the text of every body-level paragraph.
pub fn extract_paragraphs(bytes: &[u8]) -> Result<Vec<String>, TranscriptError> {
    let xml = read_document_part(bytes)?;
    let paragraphs = parse_body_paragraphs(&xml)?;
    debug!("docx: {} body paragraphs", paragraphs.len());
    Ok(paragraphs)
}

fn read_document_part(bytes: &[u8]) -> Result<String, TranscriptError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| decode_err(format!("not a .docx container: {e}")))?;

    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| decode_err(format!("missing {DOCUMENT_PART}: {e}")))?;

    let mut xml = String::with_capacity(part.size() as usize);
    part.read_to_string(&mut xml)
        .map_err(|e| decode_err(format!("unreadable {DOCUMENT_PART}: {e}")))?;
    Ok(xml)
}

/// Walk WordprocessingML and collect body-level paragraph text.
///
/// `stack` holds the local names of the open elements. A paragraph is
/// collected when its parent is `body`; any `p` opened while one is being
/// collected (text boxes inside a run) suspends collection until it closes.
fn parse_body_paragraphs(xml: &str) -> Result<Vec<String>, TranscriptError> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut nested_paragraphs = 0usize;
    let mut in_text = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            decode_err(format!(
                "malformed XML at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                match name.as_slice() {
                    b"p" if current.is_none() && is_top(&stack, b"body") => {
                        current = Some(String::new());
                    }
                    b"p" if current.is_some() => nested_paragraphs += 1,
                    b"t" if collecting(&current, nested_paragraphs) => in_text = true,
                    _ => {}
                }
                stack.push(name);
            }
            Event::End(e) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"t" => in_text = false,
                    b"p" if nested_paragraphs > 0 => nested_paragraphs -= 1,
                    b"p" => {
                        if let Some(text) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                    _ => {}
                }
                stack.pop();
            }
            Event::Empty(e) => {
                let name = e.local_name();
                match name.as_ref() {
                    // An empty body paragraph is still a (blank) line.
                    b"p" if current.is_none() && is_top(&stack, b"body") => {
                        paragraphs.push(String::new());
                    }
                    other if collecting(&current, nested_paragraphs) && is_top(&stack, b"r") => {
                        if let (Some(text), Some(c)) = (current.as_mut(), run_break(other)) {
                            text.push(c);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(t) if in_text && collecting(&current, nested_paragraphs) => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| decode_err(format!("bad XML escape: {e}")))?;
                if let Some(text) = current.as_mut() {
                    text.push_str(&unescaped);
                }
            }
            Event::CData(t) if in_text && collecting(&current, nested_paragraphs) => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Characters produced by empty run-level elements.
fn run_break(local_name: &[u8]) -> Option<char> {
    match local_name {
        b"tab" => Some('\t'),
        b"br" | b"cr" => Some('\n'),
        b"noBreakHyphen" => Some('-'),
        _ => None,
    }
}

fn is_top(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().is_some_and(|top| top.as_slice() == name)
}

fn collecting(current: &Option<String>, nested: usize) -> bool {
    current.is_some() && nested == 0
}

fn decode_err(detail: String) -> TranscriptError {
    TranscriptError::decode(SourceFormat::WordProcessor, detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn wrap_body(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        )
    }

    fn docx_with(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::FileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn joins_runs_within_paragraph() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:t>Speaker 0:</w:t></w:r><w:r><w:t xml:space="preserve"> hello</w:t></w:r></w:p>
<w:p><w:r><w:t>Speaker 1: hi</w:t></w:r></w:p>"#,
        );
        let paras = parse_body_paragraphs(&xml).unwrap();
        assert_eq!(paras, vec!["Speaker 0: hello", "Speaker 1: hi"]);
    }

    #[test]
    fn skips_tables_and_keeps_order() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:t>before</w:t></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
<w:p><w:r><w:t>after</w:t></w:r></w:p>"#,
        );
        let paras = parse_body_paragraphs(&xml).unwrap();
        assert_eq!(paras, vec!["before", "after"]);
    }

    #[test]
    fn empty_paragraphs_are_blank_lines() {
        let xml = wrap_body(r#"<w:p><w:r><w:t>a</w:t></w:r></w:p><w:p/><w:p><w:pPr/></w:p>"#);
        let paras = parse_body_paragraphs(&xml).unwrap();
        assert_eq!(paras, vec!["a", "", ""]);
    }

    #[test]
    fn tabs_and_breaks_inside_runs() {
        let xml = wrap_body(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>00:01</w:t><w:tab/><w:t>hi</w:t><w:br/><w:t>there</w:t></w:r></w:p>"#,
        );
        let paras = parse_body_paragraphs(&xml).unwrap();
        assert_eq!(paras, vec!["00:01\thi\nthere"]);
    }

    #[test]
    fn unescapes_entities_and_drops_deleted_text() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:t>Q&amp;A &lt;live&gt;</w:t></w:r><w:del><w:r><w:delText>gone</w:delText></w:r></w:del></w:p>"#,
        );
        let paras = parse_body_paragraphs(&xml).unwrap();
        assert_eq!(paras, vec!["Q&A <live>"]);
    }

    #[test]
    fn hyperlink_text_is_kept() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:t xml:space="preserve">See </w:t></w:r><w:hyperlink><w:r><w:t>notes</w:t></w:r></w:hyperlink></w:p>"#,
        );
        assert_eq!(parse_body_paragraphs(&xml).unwrap(), vec!["See notes"]);
    }

    #[test]
    fn text_box_paragraphs_are_skipped() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:t>main</w:t></w:r><w:r><w:pict><v:shape xmlns:v="urn:v"><v:textbox><w:txbxContent><w:p><w:r><w:t>boxed</w:t></w:r></w:p></w:txbxContent></v:textbox></v:shape></w:pict></w:r><w:r><w:t> text</w:t></w:r></w:p>"#,
        );
        assert_eq!(parse_body_paragraphs(&xml).unwrap(), vec!["main text"]);
    }

    #[test]
    fn full_container_roundtrip() {
        let bytes = docx_with(&wrap_body(
            r#"<w:p><w:r><w:t>Speaker 0: one</w:t></w:r></w:p><w:p><w:r><w:t>Speaker 1: two</w:t></w:r></w:p>"#,
        ));
        let paras = extract_paragraphs(&bytes).unwrap();
        assert_eq!(paras.join("\n"), "Speaker 0: one\nSpeaker 1: two");
    }

    #[test]
    fn missing_document_part_is_decode_error() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"<styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_paragraphs(&bytes).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"), "got: {err}");
    }

    #[test]
    fn malformed_xml_is_decode_error() {
        let bytes = docx_with("<w:document><w:body><w:p></w:body>");
        assert!(matches!(
            extract_paragraphs(&bytes),
            Err(TranscriptError::Decode { .. })
        ));
    }
}
