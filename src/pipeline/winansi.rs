//! Windows-1252 ("WinAnsi") single-byte mapping.
//!
//! Used in both directions: RTF `\'hh` escapes decode through it, and the
//! standard Type1 fonts in the exported PDF are addressed through it.

/// Code points for bytes 0x80–0x9F. `None` marks the five undefined slots.
const HIGH_CONTROL: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// Decode one byte. Undefined slots fall back to the Latin-1 code point.
pub fn decode_byte(b: u8) -> char {
    match b {
        0x80..=0x9F => HIGH_CONTROL[(b - 0x80) as usize].unwrap_or(b as char),
        _ => b as char,
    }
}

/// Encode one character, or `None` if WinAnsi has no slot for it.
pub fn encode_char(c: char) -> Option<u8> {
    let cp = c as u32;
    match cp {
        0x00..=0x7F | 0xA0..=0xFF => Some(cp as u8),
        _ => HIGH_CONTROL
            .iter()
            .position(|slot| *slot == Some(c))
            .map(|i| 0x80 + i as u8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_range_is_identity() {
        assert_eq!(decode_byte(b'A'), 'A');
        assert_eq!(decode_byte(0xE9), 'é');
        assert_eq!(encode_char('é'), Some(0xE9));
    }

    #[test]
    fn typographic_quotes_live_in_high_control_block() {
        assert_eq!(decode_byte(0x92), '\u{2019}');
        assert_eq!(encode_char('\u{2019}'), Some(0x92));
        assert_eq!(encode_char('\u{20AC}'), Some(0x80));
    }

    #[test]
    fn unmapped_characters() {
        assert_eq!(encode_char('\u{4E2D}'), None);
        assert_eq!(encode_char('\u{0081}'), None);
        assert_eq!(decode_byte(0x81), '\u{0081}');
    }
}
