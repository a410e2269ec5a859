//! Input resolution: read a transcript file and decide how to decode it.
//!
//! The format comes from the file extension (`txt`, `docx`, `rtf`) unless the
//! caller forces one. The extension is checked before the file is read so an
//! unsupported upload fails fast without touching its bytes.

use crate::config::SourceFormat;
use crate::error::TranscriptError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Raw bytes of an uploaded transcript plus its declared format.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub format: SourceFormat,
    pub bytes: Vec<u8>,
}

/// Read `path` into a [`SourceDocument`].
///
/// `format_override` wins over the extension when set.
pub async fn read_source(
    path: &Path,
    format_override: Option<SourceFormat>,
) -> Result<SourceDocument, TranscriptError> {
    let format = match format_override {
        Some(f) => f,
        None => SourceFormat::from_path(path)?,
    };

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| classify_read_error(path, e))?;

    debug!(
        "Read {} bytes from {} as {}",
        bytes.len(),
        path.display(),
        format
    );

    Ok(SourceDocument {
        path: path.to_path_buf(),
        format,
        bytes,
    })
}

fn classify_read_error(path: &Path, e: std::io::Error) -> TranscriptError {
    let path = path.to_path_buf();
    match e.kind() {
        std::io::ErrorKind::NotFound => TranscriptError::FileNotFound { path },
        std::io::ErrorKind::PermissionDenied => TranscriptError::PermissionDenied { path },
        _ => TranscriptError::ReadFailed { path, source: e },
    }
}
