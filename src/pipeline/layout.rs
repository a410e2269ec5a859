//! Page layout: place transcript lines on fixed letter-size pages.
//!
//! Geometry is constant for every export: a US-Letter page, Times-Roman at
//! 12 pt with a 14.4 pt line height, text starting at (40, 750) and flowing
//! down until the baseline would fall under 40 pt. Lines are never wrapped;
//! anything wider than the page is clipped by the viewer.
//!
//! ```text
//!  (0,792) ┌──────────────────────────┐
//!          │                          │
//!  y = 750 │  line 1                  │
//!          │  line 2   ↓ 14.4 pt      │
//!          │  …                       │
//!  y ≥ 40  │  line 50                 │
//!          └──────────────────────────┘ (612,0)
//! ```

use serde::Serialize;
use tracing::debug;

/// Fixed page geometry, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// x of every line.
    pub left: f32,
    /// Baseline of the first line on a page.
    pub top: f32,
    /// A page is flushed once the cursor drops below this baseline.
    pub bottom: f32,
    pub font_size: f32,
    pub line_height: f32,
}

/// The one layout every export uses.
pub const LETTER: PageGeometry = PageGeometry {
    width: 612.0,
    height: 792.0,
    left: 40.0,
    top: 750.0,
    bottom: 40.0,
    font_size: 12.0,
    line_height: 14.4,
};

/// PostScript name of the standard font the text is set in.
pub const FONT_NAME: &str = "Times-Roman";

impl PageGeometry {
    /// Baseline of the `row`-th line on a page (0-based).
    pub fn baseline(&self, row: usize) -> f32 {
        self.top - row as f32 * self.line_height
    }

    /// How many lines fit on one page.
    pub fn lines_per_page(&self) -> usize {
        let mut rows = 0;
        while self.baseline(rows) >= self.bottom {
            rows += 1;
        }
        rows
    }
}

/// One line placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// The lines of one page, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Split `text` into output lines.
///
/// Empty text has no lines at all; otherwise every `\n` starts a new line and
/// blank lines are kept. A trailing `\r` is dropped so CRLF transcripts do
/// not carry a stray control character into the PDF.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Lay `text` out on pages. Always returns at least one page.
pub fn layout_pages(text: &str, geometry: &PageGeometry) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut page = Page::default();
    let mut row = 0usize;

    for line in split_lines(text) {
        if geometry.baseline(row) < geometry.bottom {
            pages.push(std::mem::take(&mut page));
            row = 0;
        }
        page.lines.push(PlacedLine {
            text: line.to_string(),
            x: geometry.left,
            y: geometry.baseline(row),
        });
        row += 1;
    }
    pages.push(page);

    debug!(
        "Laid out {} lines on {} page(s)",
        pages.iter().map(|p| p.lines.len()).sum::<usize>(),
        pages.len()
    );
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> String {
        (1..=n)
            .map(|i| format!("Speaker {}: line {i}", i % 3))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn letter_holds_fifty_lines() {
        assert_eq!(LETTER.lines_per_page(), 50);
    }

    #[test]
    fn fresh_page_always_fits_a_line() {
        // Otherwise a flush would never make room and layout would not advance.
        assert!(LETTER.baseline(0) >= LETTER.bottom);
    }

    #[test]
    fn empty_text_is_one_blank_page() {
        let pages = layout_pages("", &LETTER);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn short_text_fits_one_page() {
        let pages = layout_pages(&numbered(10), &LETTER);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines.len(), 10);
        assert_eq!(pages[0].lines[0].y, 750.0);
        assert_eq!(pages[0].lines[0].x, 40.0);
    }

    #[test]
    fn exactly_one_page_of_lines_does_not_spill() {
        let pages = layout_pages(&numbered(50), &LETTER);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn one_extra_line_starts_a_new_page_at_the_top() {
        let pages = layout_pages(&numbered(51), &LETTER);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].lines.len(), 1);
        assert_eq!(pages[1].lines[0].y, LETTER.top);
        assert_eq!(pages[1].lines[0].text, "Speaker 0: line 51");
    }

    #[test]
    fn two_hundred_lines_make_four_pages() {
        let pages = layout_pages(&numbered(200), &LETTER);
        assert_eq!(pages.len(), 4);
        assert!(pages.iter().all(|p| p.lines.len() == 50));
    }

    #[test]
    fn every_line_stays_above_bottom() {
        for page in layout_pages(&numbered(137), &LETTER) {
            for line in page.lines {
                assert!(line.y >= LETTER.bottom, "line at {} below margin", line.y);
            }
        }
    }

    #[test]
    fn blank_lines_are_preserved() {
        let pages = layout_pages("a\n\n\nb\n", &LETTER);
        let texts: Vec<_> = pages[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "", "", "b", ""]);
    }

    #[test]
    fn crlf_is_trimmed() {
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a", "b", ""]);
    }
}
