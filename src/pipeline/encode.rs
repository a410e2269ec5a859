//! Delivery encoding: PDF bytes → base64 `data:` URI / HTML download link.
//!
//! Lets a web front end offer the export without storing it server-side:
//! the whole document travels inside the link.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

pub const PDF_MIME: &str = "application/pdf";

/// Wrap `pdf` in a `data:application/pdf;base64,…` URI.
pub fn data_uri(pdf: &[u8]) -> String {
    let b64 = STANDARD.encode(pdf);
    debug!("Encoded PDF → {} bytes base64", b64.len());
    format!("data:{PDF_MIME};base64,{b64}")
}

/// An `<a>` element that downloads `pdf` as `filename` when clicked.
pub fn download_link(pdf: &[u8], filename: &str) -> String {
    format!(
        r#"<a href="{}" download="{}">Download PDF</a>"#,
        data_uri(pdf),
        escape_attr(filename)
    )
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
