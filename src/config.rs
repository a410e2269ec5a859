//! Configuration types for transcript processing.
//!
//! All processing behaviour is controlled through [`ProcessConfig`], built via
//! its [`ProcessConfigBuilder`]. The config carries the speaker names, the
//! number of speaker slots the user is naming, and an optional format
//! override for inputs whose extension is missing or misleading.
//!
//! Page geometry is not configurable: every export uses the same fixed
//! letter-size layout (see [`crate::pipeline::layout`]).

use crate::error::TranscriptError;
use crate::speakers::SpeakerMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Smallest number of speaker slots a user may name.
pub const MIN_SPEAKERS: usize = 1;

/// Largest number of speaker slots a user may name.
pub const MAX_SPEAKERS: usize = 10;

/// Speaker slots offered when the caller does not choose.
pub const DEFAULT_SPEAKER_COUNT: usize = 4;

/// File name offered for the exported PDF.
pub const DEFAULT_PDF_NAME: &str = "processed_transcript.pdf";

/// Configuration for loading and renaming a transcript.
///
/// # Example
/// ```rust
/// use transcript_renamer::ProcessConfig;
///
/// let config = ProcessConfig::builder()
///     .speaker_count(2)
///     .speaker(0, "Alice")
///     .speaker(1, "Bob")
///     .build()
///     .unwrap();
/// assert_eq!(config.speakers.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// Number of speaker slots (`Speaker 0` .. `Speaker N-1`). Range: 1–10. Default: 4.
    ///
    /// Only bounds which indices may be named; labels beyond the count are
    /// left in the text and reported as unmapped.
    pub speaker_count: usize,

    /// Display names keyed by speaker index.
    pub speakers: SpeakerMap,

    /// Force a format instead of deriving it from the file extension.
    pub format: Option<SourceFormat>,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            speaker_count: DEFAULT_SPEAKER_COUNT,
            speakers: SpeakerMap::new(),
            format: None,
        }
    }
}

impl ProcessConfig {
    /// Create a new builder for `ProcessConfig`.
    pub fn builder() -> ProcessConfigBuilder {
        ProcessConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ProcessConfig`].
#[derive(Debug)]
pub struct ProcessConfigBuilder {
    config: ProcessConfig,
}

impl ProcessConfigBuilder {
    pub fn speaker_count(mut self, n: usize) -> Self {
        self.config.speaker_count = n;
        self
    }

    /// Name one speaker. Empty names are ignored, like an empty form field.
    pub fn speaker(mut self, index: u32, name: impl Into<String>) -> Self {
        self.config.speakers.insert(index, name);
        self
    }

    pub fn speakers(mut self, speakers: SpeakerMap) -> Self {
        self.config.speakers = speakers;
        self
    }

    pub fn format(mut self, format: SourceFormat) -> Self {
        self.config.format = Some(format);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ProcessConfig, TranscriptError> {
        let c = &self.config;
        if !(MIN_SPEAKERS..=MAX_SPEAKERS).contains(&c.speaker_count) {
            return Err(TranscriptError::InvalidConfig(format!(
                "Speaker count must be {MIN_SPEAKERS}–{MAX_SPEAKERS}, got {}",
                c.speaker_count
            )));
        }
        if let Some(index) = c
            .speakers
            .indices()
            .find(|&i| i as usize >= c.speaker_count)
        {
            return Err(TranscriptError::InvalidConfig(format!(
                "Speaker {index} is named but only {} speaker(s) are configured (0–{})",
                c.speaker_count,
                c.speaker_count - 1
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Declared format of an uploaded transcript.
///
/// The tag strings (`plain`, `word-processor`, `rich-text`) are the stable
/// external names; file extensions map onto them via
/// [`SourceFormat::from_extension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// UTF-8 text, taken verbatim.
    Plain,
    /// Office Open XML word-processing document (`.docx`).
    WordProcessor,
    /// Rich Text Format (`.rtf`).
    RichText,
}

impl SourceFormat {
    /// All recognised formats, in display order.
    pub const ALL: [SourceFormat; 3] = [
        SourceFormat::Plain,
        SourceFormat::WordProcessor,
        SourceFormat::RichText,
    ];

    /// The stable tag for this format.
    pub fn tag(self) -> &'static str {
        match self {
            SourceFormat::Plain => "plain",
            SourceFormat::WordProcessor => "word-processor",
            SourceFormat::RichText => "rich-text",
        }
    }

    /// The canonical file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::Plain => "txt",
            SourceFormat::WordProcessor => "docx",
            SourceFormat::RichText => "rtf",
        }
    }

    /// Parse a format tag (`plain`, `word-processor`, `rich-text`).
    pub fn from_tag(tag: &str) -> Result<Self, TranscriptError> {
        Self::ALL
            .into_iter()
            .find(|f| f.tag() == tag.trim())
            .ok_or_else(|| TranscriptError::UnsupportedFormat {
                format: tag.to_string(),
            })
    }

    /// Map a file extension (`txt`, `docx`, `rtf`) to its format.
    ///
    /// Case-insensitive; a leading dot is tolerated.
    pub fn from_extension(ext: &str) -> Result<Self, TranscriptError> {
        let normalised = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.extension() == normalised)
            .ok_or_else(|| TranscriptError::UnsupportedFormat {
                format: ext.to_string(),
            })
    }

    /// Derive the format from the final extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self, TranscriptError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| TranscriptError::UnsupportedFormat {
                format: path.display().to_string(),
            })?;
        Self::from_extension(ext)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SourceFormat {
    type Err = TranscriptError;

    /// Accepts either a tag or an extension.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).or_else(|_| Self::from_extension(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_offers_four_speakers() {
        let config = ProcessConfig::default();
        assert_eq!(config.speaker_count, 4);
        assert!(config.speakers.is_empty());
        assert!(config.format.is_none());
    }

    #[test]
    fn builder_rejects_out_of_range_count() {
        assert!(ProcessConfig::builder().speaker_count(0).build().is_err());
        assert!(ProcessConfig::builder().speaker_count(11).build().is_err());
        assert!(ProcessConfig::builder().speaker_count(10).build().is_ok());
    }

    #[test]
    fn builder_rejects_index_beyond_count() {
        let err = ProcessConfig::builder()
            .speaker_count(2)
            .speaker(2, "Carol")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Speaker 2"), "got: {err}");
    }

    #[test]
    fn builder_ignores_empty_names() {
        let config = ProcessConfig::builder()
            .speaker(0, "Alice")
            .speaker(1, "")
            .speaker(2, " Dr. Doe")
            .build()
            .unwrap();
        assert_eq!(config.speakers.len(), 2);
        assert_eq!(config.speakers.get(0), Some("Alice"));
        assert_eq!(config.speakers.get(1), None);
        assert_eq!(config.speakers.get(2), Some(" Dr. Doe"));
    }

    #[test]
    fn format_from_tag() {
        assert_eq!(SourceFormat::from_tag("plain").unwrap(), SourceFormat::Plain);
        assert_eq!(
            SourceFormat::from_tag("word-processor").unwrap(),
            SourceFormat::WordProcessor
        );
        assert_eq!(
            SourceFormat::from_tag("rich-text").unwrap(),
            SourceFormat::RichText
        );
        assert!(matches!(
            SourceFormat::from_tag("markdown"),
            Err(TranscriptError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SourceFormat::from_extension("txt").unwrap(), SourceFormat::Plain);
        assert_eq!(
            SourceFormat::from_extension(".DOCX").unwrap(),
            SourceFormat::WordProcessor
        );
        assert_eq!(SourceFormat::from_extension("Rtf").unwrap(), SourceFormat::RichText);
        assert!(SourceFormat::from_extension("doc").is_err());
    }

    #[test]
    fn format_from_path_uses_last_extension() {
        let p = Path::new("/tmp/meeting.backup.rtf");
        assert_eq!(SourceFormat::from_path(p).unwrap(), SourceFormat::RichText);
        assert!(SourceFormat::from_path(Path::new("/tmp/README")).is_err());
    }

    #[test]
    fn format_from_str_accepts_tag_or_extension() {
        assert_eq!("docx".parse::<SourceFormat>().unwrap(), SourceFormat::WordProcessor);
        assert_eq!("rich-text".parse::<SourceFormat>().unwrap(), SourceFormat::RichText);
        assert!("pdf".parse::<SourceFormat>().is_err());
    }

    #[test]
    fn format_serialises_as_tag() {
        let json = serde_json::to_string(&SourceFormat::WordProcessor).unwrap();
        assert_eq!(json, "\"word-processor\"");
    }
}
