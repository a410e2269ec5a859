//! Output types returned by the processing and export entry points.

use crate::config::SourceFormat;
use crate::pipeline::encode;
use crate::pipeline::substitute::SubstitutionStats;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A transcript after extraction and speaker substitution.
///
/// This is the value a front end keeps between "process" and "export": pass
/// `text` to [`crate::paginate`] or [`crate::export_to_file`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedTranscript {
    /// Decoded and substituted transcript, `\n`-separated.
    pub text: String,
    /// Format the bytes were decoded as.
    pub format: SourceFormat,
    /// Labels replaced, per speaker index.
    pub substitutions: SubstitutionStats,
    /// Speaker indices still present as labels because nobody named them.
    pub unmapped_labels: Vec<u32>,
}

/// A complete PDF produced by [`crate::paginate`].
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub line_count: usize,
}

impl RenderedPdf {
    /// `data:application/pdf;base64,…`
    pub fn to_data_uri(&self) -> String {
        encode::data_uri(&self.bytes)
    }

    /// An HTML anchor that downloads the PDF as `filename`.
    pub fn download_link(&self, filename: &str) -> String {
        encode::download_link(&self.bytes, filename)
    }
}

/// Summary of a PDF written by [`crate::export_to_file`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportStats {
    pub path: PathBuf,
    pub page_count: usize,
    pub line_count: usize,
    pub bytes: usize,
}
