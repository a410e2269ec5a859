//! Pipeline stages for transcript renaming and PDF export.
//!
//! Each submodule implements exactly one transformation step so that every
//! stage can be tested on its own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ substitute            (process)
//! (file)    (txt/docx/rtf)  (Speaker N → name)
//!
//! layout ──▶ render ──▶ encode                (export)
//! (pages)    (lopdf)    (data URI / link)
//! ```
//!
//! 1. [`input`]: read the file and decide its [`crate::SourceFormat`]
//! 2. [`extract`]: decode bytes into plain text, one extractor per format
//!    ([`docx`] and [`rtf`] hold the structured decoders)
//! 3. [`substitute`]: replace speaker labels in a single scan
//! 4. [`layout`]: place lines on fixed letter-size pages
//! 5. [`render`]: serialise the laid-out pages as PDF bytes
//! 6. [`encode`]: base64 `data:` URI and HTML download link

pub mod docx;
pub mod encode;
pub mod extract;
pub mod input;
pub mod layout;
pub mod render;
pub mod rtf;
pub mod substitute;
pub mod winansi;
