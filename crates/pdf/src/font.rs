//! Helvetica-Bold metrics and WinAnsi text encoding.
//!
//! Labels use the standard-14 Helvetica-Bold font so nothing has to be
//! embedded; centring text still needs its advance widths.

/// PostScript name of the label font.
pub const FONT_NAME: &str = "Helvetica-Bold";

/// Advance widths (1/1000 em) for WinAnsi codes 0x20..=0x7E.
const ASCII_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

const FALLBACK_WIDTH: u16 = 556;

/// Encode `text` for a `/WinAnsiEncoding` font.
///
/// WinAnsi agrees with Latin-1 from 0xA0 up, which covers Portuguese
/// accents. Anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => b'?',
        })
        .collect()
}

/// Advance width of one WinAnsi byte in 1/1000 em.
fn glyph_width(byte: u8) -> u16 {
    match byte {
        0x20..=0x7E => ASCII_WIDTHS[usize::from(byte - 0x20)],
        0xC6 => 1000,
        0xE6 => 889,
        0xD7 | 0xF7 => 584,
        0xDF => 611,
        0xC0..=0xC7 | 0xD0..=0xD1 | 0xD9..=0xDC => 722,
        0xC8..=0xCB | 0xDD..=0xDE => 667,
        0xCC..=0xCF | 0xEC..=0xEF => 278,
        0xD2..=0xD6 | 0xD8 => 778,
        0xE0..=0xE5 | 0xE7..=0xEB | 0xFD | 0xFF => 556,
        0xF0..=0xF6 | 0xF8..=0xFC | 0xFE => 611,
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points when set at `size_pt`.
pub fn text_width(text: &str, size_pt: f32) -> f32 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|b| u32::from(glyph_width(b)))
        .sum();
    units as f32 * size_pt / 1000.0
}
