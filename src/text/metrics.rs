//! Advance widths of the HUD bitmap font.
//!
//! The font is a fixed 7-bit atlas, so the metrics are a plain table: one
//! advance width in font pixels per ASCII code point.

/// Advance width in pixels per ASCII code point 0-127.
#[rustfmt::skip]
const GLYPH_WIDTHS: [u32; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    4, 2, 4, 7, 6, 9, 7, 2, 3, 3, 4, 6, 3, 5, 2, 7,
    6, 3, 6, 6, 6, 6, 6, 6, 6, 6, 2, 3, 5, 6, 5, 7,
    8, 6, 6, 6, 6, 6, 6, 6, 6, 4, 6, 6, 5, 8, 8, 6,
    6, 7, 6, 6, 6, 6, 8,10, 8, 6, 6, 3, 6, 3, 6, 6,
    4, 7, 6, 6, 6, 6, 5, 6, 6, 2, 5, 5, 2, 9, 6, 6,
    6, 6, 6, 6, 5, 6, 6, 6, 6, 6, 6, 4, 2, 5, 7, 0,
];

/// Returns the advance width of a single character.
///
/// Code points outside the table (anything past ASCII 127) have no glyph
/// and advance by zero.
pub fn char_width(c: char) -> u32 {
    GLYPH_WIDTHS.get(c as usize).copied().unwrap_or(0)
}

/// Returns the advance width of a whole string, in font pixels.
pub fn string_width(s: &str) -> u32 {
    s.chars().map(char_width).sum()
}
