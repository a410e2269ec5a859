//! Processing and export entry points.
//!
//! The two core transforms are synchronous and pure:
//!
//! * [`load`]: bytes of a declared format → substituted transcript text
//! * [`paginate`]: transcript text → multi-page PDF
//!
//! The `*_file` functions wrap them with file I/O for callers that work with
//! paths, and the `*_sync` variants run those on a private tokio runtime.

use crate::config::{ProcessConfig, SourceFormat};
use crate::error::TranscriptError;
use crate::output::{ExportStats, ProcessedTranscript, RenderedPdf};
use crate::pipeline::{extract, input, layout, render, substitute};
use crate::speakers::SpeakerMap;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Decode `bytes` as `format` and replace every named speaker label.
///
/// # Errors
/// [`TranscriptError::Decode`] if the bytes are not valid for the format.
pub fn load(
    bytes: &[u8],
    format: SourceFormat,
    speakers: &SpeakerMap,
) -> Result<String, TranscriptError> {
    let text = extract::extract(bytes, format)?;
    let (text, stats) = substitute::substitute_speakers(&text, speakers);
    debug!("Replaced {} speaker label(s)", stats.total());
    Ok(text)
}

/// [`load`] with the format given as a tag (`plain`, `word-processor`,
/// `rich-text`).
///
/// # Errors
/// [`TranscriptError::UnsupportedFormat`] for any other tag.
pub fn load_tagged(
    bytes: &[u8],
    tag: &str,
    speakers: &SpeakerMap,
) -> Result<String, TranscriptError> {
    load(bytes, SourceFormat::from_tag(tag)?, speakers)
}

/// Decode, substitute, and report what was replaced and what was left.
pub fn process_bytes(
    bytes: &[u8],
    format: SourceFormat,
    config: &ProcessConfig,
) -> Result<ProcessedTranscript, TranscriptError> {
    let text = extract::extract(bytes, format)?;
    let (text, substitutions) = substitute::substitute_speakers(&text, &config.speakers);

    let unmapped_labels: Vec<u32> = substitute::detect_labels(&text)
        .into_iter()
        .filter(|i| config.speakers.get(*i).is_none())
        .collect();
    for index in &unmapped_labels {
        warn!("Speaker {} appears in the transcript but has no name", index);
    }

    info!(
        "Processed {} transcript: {} label(s) replaced across {} speaker(s)",
        format,
        substitutions.total(),
        substitutions.replaced.len()
    );

    Ok(ProcessedTranscript {
        text,
        format,
        substitutions,
        unmapped_labels,
    })
}

/// Read a transcript file and process it.
///
/// The format comes from the file extension unless `config.format` is set.
pub async fn process_file(
    path: impl AsRef<Path>,
    config: &ProcessConfig,
) -> Result<ProcessedTranscript, TranscriptError> {
    let path = path.as_ref();
    info!("Processing transcript: {}", path.display());
    let source = input::read_source(path, config.format).await?;
    process_bytes(&source.bytes, source.format, config)
}

/// Synchronous wrapper around [`process_file`].
///
/// Creates a temporary tokio runtime internally.
pub fn process_file_sync(
    path: impl AsRef<Path>,
    config: &ProcessConfig,
) -> Result<ProcessedTranscript, TranscriptError> {
    runtime()?.block_on(process_file(path, config))
}

/// Lay `text` out on letter-size pages and render the PDF.
///
/// Always produces at least one page.
pub fn paginate(text: &str) -> Result<RenderedPdf, TranscriptError> {
    let start = Instant::now();
    let pages = layout::layout_pages(text, &layout::LETTER);
    let line_count = pages.iter().map(|p| p.lines.len()).sum();
    let bytes = render::render_pdf(&pages, &layout::LETTER)?;

    info!(
        "Paginated {} lines onto {} page(s) in {}ms",
        line_count,
        pages.len(),
        start.elapsed().as_millis()
    );

    Ok(RenderedPdf {
        bytes,
        page_count: pages.len(),
        line_count,
    })
}

/// Paginate `text` and write the PDF to `output_path`.
///
/// Pagination runs on the blocking pool. Uses atomic write (temp file +
/// rename) to prevent partial files.
pub async fn export_to_file(
    text: impl Into<String>,
    output_path: impl AsRef<Path>,
) -> Result<ExportStats, TranscriptError> {
    let text = text.into();
    let path = output_path.as_ref();

    let pdf = tokio::task::spawn_blocking(move || paginate(&text))
        .await
        .map_err(|e| TranscriptError::Internal(format!("Pagination task panicked: {}", e)))??;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| TranscriptError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
    }

    let tmp_path = path.with_extension("pdf.tmp");
    tokio::fs::write(&tmp_path, &pdf.bytes)
        .await
        .map_err(|e| TranscriptError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
            warn!("Could not remove {}: {}", tmp_path.display(), cleanup);
        }
        return Err(TranscriptError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        });
    }

    info!("Wrote {} ({} bytes)", path.display(), pdf.bytes.len());

    Ok(ExportStats {
        path: path.to_path_buf(),
        page_count: pdf.page_count,
        line_count: pdf.line_count,
        bytes: pdf.bytes.len(),
    })
}

/// Synchronous wrapper around [`export_to_file`].
pub fn export_to_file_sync(
    text: impl Into<String>,
    output_path: impl AsRef<Path>,
) -> Result<ExportStats, TranscriptError> {
    runtime()?.block_on(export_to_file(text, output_path))
}

fn runtime() -> Result<tokio::runtime::Runtime, TranscriptError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| TranscriptError::Internal(format!("Failed to create tokio runtime: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice_bob() -> SpeakerMap {
        [(0, "Alice"), (1, "Bob")].into_iter().collect()
    }

    #[test]
    fn load_plain_scenario() {
        let out = load(
            b"Hello Speaker 0, meet Speaker 1.",
            SourceFormat::Plain,
            &alice_bob(),
        )
        .unwrap();
        assert_eq!(out, "Hello Alice, meet Bob.");
    }

    #[test]
    fn load_tagged_rejects_unknown_tag() {
        let err = load_tagged(b"x", "markdown", &SpeakerMap::new()).unwrap_err();
        assert!(matches!(err, TranscriptError::UnsupportedFormat { .. }));
    }

    #[test]
    fn load_plain_with_empty_map_is_verbatim() {
        let raw = "Speaker 0: hi\r\nSpeaker 5: yo";
        let out = load_tagged(raw.as_bytes(), "plain", &SpeakerMap::new()).unwrap();
        assert_eq!(out, raw);
    }

    #[test]
    fn load_rich_text_substitutes_after_stripping() {
        let rtf = r"{\rtf1\ansi{\fonttbl{\f0 Times;}}\f0 Speaker 0: hi\par Speaker 1: hey\par}";
        let out = load(rtf.as_bytes(), SourceFormat::RichText, &alice_bob()).unwrap();
        assert_eq!(out, "Alice: hi\nBob: hey\n");
    }

    #[test]
    fn process_bytes_reports_unmapped_labels() {
        let config = ProcessConfig::builder().speaker(0, "Alice").build().unwrap();
        let out = process_bytes(
            b"Speaker 0: a\nSpeaker 2: b\nSpeaker 0: c\nSpeaker 7: d",
            SourceFormat::Plain,
            &config,
        )
        .unwrap();
        assert_eq!(out.text, "Alice: a\nSpeaker 2: b\nAlice: c\nSpeaker 7: d");
        assert_eq!(out.substitutions.total(), 2);
        assert_eq!(out.unmapped_labels, vec![2, 7]);
    }

    #[test]
    fn paginate_empty_text() {
        let pdf = paginate("").unwrap();
        assert_eq!(pdf.page_count, 1);
        assert_eq!(pdf.line_count, 0);
        assert!(pdf.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn paginate_two_hundred_lines() {
        let text = (0..200)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let pdf = paginate(&text).unwrap();
        assert!(pdf.page_count > 1);
        assert_eq!(pdf.page_count, 4);
        assert_eq!(pdf.line_count, 200);
    }
}
