//! Border color values: hex digits or a basic CSS color keyword.

use alloc::string::String;

use crate::plan::Color;

/// Parse `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (the `#` is optional) or
/// one of the sixteen basic CSS keywords plus `transparent`.
pub(crate) fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let digits = s.strip_prefix('#').unwrap_or(s);
    parse_hex(digits).or_else(|| keyword(s))
}

/// Canonical `rrggbbaa` form, lowercase, no `#`.
pub(crate) fn format_color(c: Color) -> String {
    let mut out = String::with_capacity(8);
    for byte in [c.r, c.g, c.b, c.a] {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0xf) as usize] as char);
    }
    out
}

const HEX: &[u8; 16] = b"0123456789abcdef";

fn parse_hex(digits: &str) -> Option<Color> {
    let b = digits.as_bytes();
    let nibble = |i: usize| -> Option<u8> { (b[i] as char).to_digit(16).map(|d| d as u8) };
    let short = |i: usize| nibble(i).map(|n| n << 4 | n);
    let long = |i: usize| Some(nibble(i)? << 4 | nibble(i + 1)?);
    match b.len() {
        3 => Some(Color::rgb(short(0)?, short(1)?, short(2)?)),
        4 => Some(Color::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
        6 => Some(Color::rgb(long(0)?, long(2)?, long(4)?)),
        8 => Some(Color::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
        _ => None,
    }
}

fn keyword(name: &str) -> Option<Color> {
    KEYWORDS
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|&(_, c)| c)
}

const KEYWORDS: &[(&str, Color)] = &[
    ("aqua", Color::rgb(0, 255, 255)),
    ("black", Color::BLACK),
    ("blue", Color::rgb(0, 0, 255)),
    ("fuchsia", Color::rgb(255, 0, 255)),
    ("gray", Color::rgb(128, 128, 128)),
    ("green", Color::rgb(0, 128, 0)),
    ("lime", Color::rgb(0, 255, 0)),
    ("maroon", Color::rgb(128, 0, 0)),
    ("navy", Color::rgb(0, 0, 128)),
    ("olive", Color::rgb(128, 128, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("red", Color::rgb(255, 0, 0)),
    ("silver", Color::rgb(192, 192, 192)),
    ("teal", Color::rgb(0, 128, 128)),
    ("transparent", Color::TRANSPARENT),
    ("white", Color::WHITE),
    ("yellow", Color::rgb(255, 255, 0)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!(parse_color("f00"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_color("#0af"), Some(Color::rgb(0, 170, 255)));
        assert_eq!(parse_color("f008"), Some(Color::rgba(255, 0, 0, 136)));
        assert_eq!(parse_color("#FF8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(parse_color("ff000080"), Some(Color::rgba(255, 0, 0, 128)));
    }

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(parse_color("Red"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_color("TRANSPARENT"), Some(Color::TRANSPARENT));
    }

    #[test]
    fn hex_wins_over_keyword_lookup() {
        // "add" is valid hex, not a keyword.
        assert_eq!(parse_color("add"), Some(Color::rgb(170, 221, 221)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("notacolor"), None);
        assert_eq!(parse_color("zzz"), None);
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("é12"), None);
    }

    #[test]
    fn format_is_parseable() {
        let c = Color::rgba(1, 171, 205, 239);
        assert_eq!(format_color(c), "01abcdef");
        assert_eq!(parse_color(&format_color(c)), Some(c));
    }
}
