//! Text extraction: decode transcript bytes into plain text.
//!
//! Each [`SourceFormat`] variant maps to one [`TextExtractor`]. Adding a
//! format means adding a variant and an extractor; nothing else branches on
//! the format.

use crate::config::SourceFormat;
use crate::error::TranscriptError;
use crate::pipeline::{docx, rtf};
use tracing::debug;

/// Turns the raw bytes of one format into newline-separated text.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, TranscriptError>;
}

/// UTF-8 text, returned verbatim.
pub struct PlainExtractor;

/// `.docx`: body paragraphs joined with `\n`.
pub struct DocxExtractor;

/// `.rtf`: control words and destinations stripped.
pub struct RtfExtractor;

impl TextExtractor for PlainExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, TranscriptError> {
        decode_utf8(bytes, SourceFormat::Plain)
    }
}

impl TextExtractor for DocxExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, TranscriptError> {
        docx::extract_paragraphs(bytes).map(|paragraphs| paragraphs.join("\n"))
    }
}

impl TextExtractor for RtfExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, TranscriptError> {
        let source = decode_utf8(bytes, SourceFormat::RichText)?;
        rtf::strip_rtf(&source)
    }
}

impl SourceFormat {
    /// The extractor responsible for this format.
    pub fn extractor(self) -> &'static dyn TextExtractor {
        match self {
            SourceFormat::Plain => &PlainExtractor,
            SourceFormat::WordProcessor => &DocxExtractor,
            SourceFormat::RichText => &RtfExtractor,
        }
    }
}

/// Extract plain text from `bytes` declared as `format`.
pub fn extract(bytes: &[u8], format: SourceFormat) -> Result<String, TranscriptError> {
    let text = format.extractor().extract_text(bytes)?;
    debug!(
        "Extracted {} chars ({} lines) from {} bytes of {}",
        text.chars().count(),
        text.lines().count(),
        bytes.len(),
        format
    );
    Ok(text)
}

pub(crate) fn decode_utf8(bytes: &[u8], format: SourceFormat) -> Result<String, TranscriptError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| {
        TranscriptError::decode(
            format,
            format!(
                "invalid UTF-8 at byte {}",
                e.utf8_error().valid_up_to()
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_is_verbatim() {
        let raw = "\u{FEFF}Speaker 0: hi\r\n\r\nSpeaker 1: bye\n";
        assert_eq!(extract(raw.as_bytes(), SourceFormat::Plain).unwrap(), raw);
    }

    #[test]
    fn plain_rejects_invalid_utf8() {
        let err = extract(b"ok \xff\xfe", SourceFormat::Plain).unwrap_err();
        match err {
            TranscriptError::Decode { format, detail } => {
                assert_eq!(format, SourceFormat::Plain);
                assert!(detail.contains("byte 3"), "got: {detail}");
            }
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn rtf_requires_utf8() {
        let err = extract(b"{\\rtf1 \xe9}", SourceFormat::RichText).unwrap_err();
        assert!(matches!(
            err,
            TranscriptError::Decode {
                format: SourceFormat::RichText,
                ..
            }
        ));
    }

    #[test]
    fn docx_rejects_non_zip() {
        let err = extract(b"plain text, not a zip", SourceFormat::WordProcessor).unwrap_err();
        assert!(matches!(
            err,
            TranscriptError::Decode {
                format: SourceFormat::WordProcessor,
                ..
            }
        ));
    }

    #[test]
    fn empty_plain_input() {
        assert_eq!(extract(b"", SourceFormat::Plain).unwrap(), "");
    }
}
