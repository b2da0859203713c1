//! Text measurement for the built-in PDF fonts.
//!
//! The report only uses the standard Type1 fonts Helvetica and
//! Helvetica-Bold, so glyph advances come from their AFM width tables
//! (units of 1/1000 em) rather than from font files. Text is limited to the
//! WinAnsi character set; anything else is measured and printed as `?`.

/// Millimetres per PostScript point
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Font face used for a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
}

impl FontStyle {
    /// PostScript name of the standard font
    pub fn base_font(&self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
        }
    }
}

/// Helvetica advances for bytes 0x20..=0x7E
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advances for bytes 0x20..=0x7E
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Map a character to its WinAnsiEncoding byte, if it has one.
pub fn to_winansi(c: char) -> Option<u8> {
    match c {
        ' '..='~' => Some(c as u8),
        '\u{a0}'..='\u{ff}' => Some(c as u32 as u8),
        '€' => Some(0x80),
        '…' => Some(0x85),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        _ => None,
    }
}

/// Encode text as WinAnsi bytes, replacing unsupported characters with `?`.
///
/// Tabs and other control characters become spaces.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_control() { b' ' } else { to_winansi(c).unwrap_or(b'?') })
        .collect()
}

/// Unaccented ASCII letter for an accented Latin-1 letter
fn base_letter(byte: u8) -> Option<u8> {
    let base = match byte as char {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base as u8)
}

/// Advance of a single WinAnsi byte in 1/1000 em
fn byte_advance(byte: u8, font: FontStyle) -> u16 {
    let table = match font {
        FontStyle::Regular => &HELVETICA,
        FontStyle::Bold => &HELVETICA_BOLD,
    };

    match byte {
        0x20..=0x7E => table[(byte - 0x20) as usize],
        0xA0 => table[0],
        0x85 | 0x97 => 1000,
        0x91 | 0x92 => 278,
        0x93 | 0x94 => 500,
        0x95 => 350,
        _ => match base_letter(byte) {
            // Accents don't change the advance of the base glyph in Helvetica
            Some(base) => table[(base - 0x20) as usize],
            None => 556,
        },
    }
}

/// Width of `text` in millimetres when set in `font` at `size` points.
pub fn text_width(text: &str, font: FontStyle, size: f32) -> f32 {
    let units: u32 = encode_winansi(text).into_iter().map(|b| byte_advance(b, font) as u32).sum();
    units as f32 / 1000.0 * size * MM_PER_PT
}

/// Split `text` into lines no wider than `max_width`.
///
/// Explicit newlines start a new line (blank lines are kept); within a line,
/// whitespace-separated words are packed greedily. A word wider than
/// `max_width` is placed on its own line and never split. Trailing blank
/// lines are dropped, so blank text yields no lines.
pub fn wrap_text<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();

    for paragraph in text.trim_end().lines() {
        let mut line = String::new();

        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }

            let candidate = format!("{} {}", line, word);
            if measure(&candidate) <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
            }
        }

        lines.push(line);
    }

    lines
}
