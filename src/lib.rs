//! # transcript-renamer
//!
//! Replace placeholder speaker labels (`Speaker 0`, `Speaker 1`, …) in
//! meeting transcripts with real names, and export the result as a
//! paginated PDF.
//!
//! Speech-to-text services label voices by number. This crate takes their
//! output as plain text, a `.docx` document, or an `.rtf` file, swaps the
//! labels for the names you supply, and lays the text out on letter-size
//! pages.
//!
//! ## Pipeline Overview
//!
//! ```text
//! transcript (.txt / .docx / .rtf)
//!  │
//!  ├─ 1. Input       read bytes, pick format from extension
//!  ├─ 2. Extract     UTF-8 / body paragraphs / RTF text stream
//!  ├─ 3. Substitute  "Speaker N" → name, one scan
//!  │
//!  ├─ 4. Layout      50 lines per letter page, no wrapping
//!  ├─ 5. Render      lopdf, Times-Roman 12 pt
//!  └─ 6. Encode      file on disk, data: URI, or HTML download link
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use transcript_renamer::{load, paginate, SourceFormat, SpeakerMap};
//!
//! let speakers: SpeakerMap = [(0, "Alice"), (1, "Bob")].into_iter().collect();
//! let text = load(b"Speaker 0: hi\nSpeaker 1: hello", SourceFormat::Plain, &speakers)?;
//! assert_eq!(text, "Alice: hi\nBob: hello");
//!
//! let pdf = paginate(&text)?;
//! assert_eq!(pdf.page_count, 1);
//! # Ok::<(), transcript_renamer::TranscriptError>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `transcript-renamer` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod speakers;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ProcessConfig, ProcessConfigBuilder, SourceFormat, DEFAULT_PDF_NAME};
pub use convert::{
    export_to_file, export_to_file_sync, load, load_tagged, paginate, process_bytes,
    process_file, process_file_sync,
};
pub use error::TranscriptError;
pub use output::{ExportStats, ProcessedTranscript, RenderedPdf};
pub use pipeline::substitute::{detect_labels, SubstitutionStats};
pub use speakers::SpeakerMap;
