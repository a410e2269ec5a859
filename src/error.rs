//! Error types for the transcript-renamer library.
//!
//! Every operation is a one-shot transform, so a single fatal error type is
//! enough: [`TranscriptError`] is returned from both the loading side
//! (unsupported format, undecodable bytes, unreadable file) and the export
//! side (PDF serialisation, output write). Nothing is retried and no partial
//! output is produced on failure.

use crate::config::SourceFormat;
use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the transcript-renamer library.
#[derive(Debug, Error)]
pub enum TranscriptError {
    // ── Format errors ─────────────────────────────────────────────────────
    /// The format tag or file extension is not one of the recognised ones.
    #[error(
        "Unsupported transcript format '{format}'\nSupported: plain (.txt), word-processor (.docx), rich-text (.rtf)."
    )]
    UnsupportedFormat { format: String },

    /// The bytes could not be decoded under the declared format.
    #[error("Failed to decode {format} transcript: {detail}")]
    Decode { format: SourceFormat, detail: String },

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Transcript file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Any other I/O failure while reading the input.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// lopdf refused to serialise the laid-out document.
    #[error("PDF rendering failed: {0}")]
    PdfRender(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder or argument validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TranscriptError {
    pub(crate) fn decode(format: SourceFormat, detail: impl std::fmt::Display) -> Self {
        TranscriptError::Decode {
            format,
            detail: detail.to_string(),
        }
    }
}
