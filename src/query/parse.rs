//! Query string tokenizer and value parsers.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use num_traits::Float;

use super::color::parse_color;
use super::{ParseResult, ParseWarning};
use crate::corners::Corners;
use crate::geometry::Corner;
use crate::plan::{Color, CornerStyle};

/// Image keys that belong to other stages of the pipeline. Kept in
/// `extras` without a warning. Sorted for binary search.
const KNOWN_EXTRAS: &[&str] = &[
    "anchor",
    "bgcolor",
    "cache",
    "crop",
    "f.sharpen",
    "format",
    "h",
    "height",
    "maxheight",
    "maxwidth",
    "mode",
    "quality",
    "rotate",
    "w",
    "width",
];

/// Settings as read, before defaults are applied.
#[derive(Default)]
struct Raw {
    radius: Option<f64>,
    corners: Option<Corners>,
    border_width: Option<f64>,
    border_color: Option<Color>,
    scale: Option<f64>,
}

pub(crate) fn parse_query(query: &str) -> ParseResult {
    let mut raw = Raw::default();
    let mut extras = BTreeMap::new();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);
        dispatch_key(&key, &value, &mut raw, &mut extras, &mut warnings);
    }

    let defaults = CornerStyle::default();
    ParseResult {
        style: CornerStyle {
            radius: raw.radius.unwrap_or(defaults.radius),
            corners: raw.corners.unwrap_or(defaults.corners),
            border_width: raw.border_width.unwrap_or(defaults.border_width),
            border_color: raw.border_color.or(defaults.border_color),
        },
        scale: raw.scale.unwrap_or(1.0),
        extras,
        warnings,
    }
}

fn dispatch_key(
    key: &str,
    value: &str,
    raw: &mut Raw,
    extras: &mut BTreeMap<String, String>,
    warnings: &mut Vec<ParseWarning>,
) {
    match key {
        "radius" | "r" | "cornerradius" => match parse_length(value) {
            Some(r) => set_or_warn(&mut raw.radius, r, key, value, warnings),
            None => invalid("radius", value, "expected a non-negative number", warnings),
        },
        "roundcorners" | "s.roundcorners" => match parse_round_corners(value) {
            Some(rc) => {
                if rc.differ {
                    warnings.push(ParseWarning::RadiiDiffer {
                        value: String::from(value),
                    });
                }
                // Sets both radius and corners; one warning if either was set.
                if raw.radius.is_some() || raw.corners.is_some() {
                    warnings.push(ParseWarning::DuplicateKey {
                        key: String::from(key),
                        value: String::from(value),
                    });
                }
                raw.radius = Some(rc.radius);
                raw.corners = Some(rc.corners);
            }
            None => invalid(
                "roundcorners",
                value,
                "expected 1 or 4 comma-separated non-negative numbers",
                warnings,
            ),
        },
        "corners" => match parse_corners(value) {
            Some(c) => set_or_warn(&mut raw.corners, c, key, value, warnings),
            None => invalid(
                "corners",
                value,
                "expected all|none|top|bottom|left|right|tl|tr|bl|br or a bit mask",
                warnings,
            ),
        },
        "border" | "borderwidth" => match parse_length(value) {
            Some(w) => set_or_warn(&mut raw.border_width, w, key, value, warnings),
            None => invalid("border", value, "expected a non-negative number", warnings),
        },
        "bordercolor" | "border.color" => match parse_color(value) {
            Some(c) => set_or_warn(&mut raw.border_color, c, key, value, warnings),
            None => invalid(
                "bordercolor",
                value,
                "expected hex color or basic CSS color name",
                warnings,
            ),
        },
        "dpr" | "zoom" | "scale" => match parse_dpr(value) {
            Some(s) => set_or_warn(&mut raw.scale, s, key, value, warnings),
            None => invalid("dpr", value, "expected a positive number", warnings),
        },
        _ => {
            if KNOWN_EXTRAS.binary_search(&key).is_ok() {
                extras.insert(String::from(key), String::from(value));
            } else {
                warnings.push(ParseWarning::KeyNotRecognized {
                    key: String::from(key),
                    value: String::from(value),
                });
            }
        }
    }
}

/// Set a field, warning when it was already set.
fn set_or_warn<T>(
    field: &mut Option<T>,
    parsed: T,
    key: &str,
    value: &str,
    warnings: &mut Vec<ParseWarning>,
) {
    if field.is_some() {
        warnings.push(ParseWarning::DuplicateKey {
            key: String::from(key),
            value: String::from(value),
        });
    }
    *field = Some(parsed);
}

fn invalid(key: &'static str, value: &str, reason: &'static str, warnings: &mut Vec<ParseWarning>) {
    warnings.push(ParseWarning::ValueInvalid {
        key,
        value: String::from(value),
        reason,
    });
}

// ---- Value parsers ----

/// Non-negative number. `inf` is accepted; it clamps like any oversize value.
fn parse_length(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan() && *v >= 0.0)
}

/// Parse DPR/zoom value, stripping a trailing "x".
fn parse_dpr(s: &str) -> Option<f64> {
    let s = s.trim().trim_end_matches(['x', 'X']);
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

struct RoundCorners {
    radius: f64,
    corners: Corners,
    differ: bool,
}

/// `r` for every corner, or `tl,tr,br,bl`.
fn parse_round_corners(s: &str) -> Option<RoundCorners> {
    let values: Vec<f64> = s
        .split(',')
        .map(parse_length)
        .collect::<Option<Vec<f64>>>()?;
    match values.as_slice() {
        [r] => Some(RoundCorners {
            radius: *r,
            corners: Corners::ALL,
            differ: false,
        }),
        [tl, tr, br, bl] => {
            let per_corner = [
                (Corner::TopLeft, *tl),
                (Corner::TopRight, *tr),
                (Corner::BottomRight, *br),
                (Corner::BottomLeft, *bl),
            ];
            let mut corners = Corners::NONE;
            let mut radius: f64 = 0.0;
            let mut first_nonzero = None;
            let mut differ = false;
            for (corner, r) in per_corner {
                if r > 0.0 {
                    corners.insert(corner);
                    radius = Float::max(radius, r);
                    match first_nonzero {
                        None => first_nonzero = Some(r),
                        Some(f) => differ |= f != r,
                    }
                }
            }
            Some(RoundCorners {
                radius,
                corners,
                differ,
            })
        }
        _ => None,
    }
}

fn parse_corners(s: &str) -> Option<Corners> {
    let s = s.trim();
    if let Ok(mask) = s.parse::<u64>() {
        return (mask <= 0b1111).then(|| Corners::from_bits_truncate(mask));
    }
    let mut set = Corners::NONE;
    let mut any = false;
    for token in s.split([',', '+', ' ', '|']).filter(|t| !t.is_empty()) {
        set |= corner_token(token)?;
        any = true;
    }
    any.then_some(set)
}

fn corner_token(token: &str) -> Option<Corners> {
    let t = token.to_ascii_lowercase();
    let c = match t.as_str() {
        "all" => Corners::ALL,
        "none" => Corners::NONE,
        "top" => Corners::TOP,
        "bottom" => Corners::BOTTOM,
        "left" => Corners::LEFT,
        "right" => Corners::RIGHT,
        "tl" | "topleft" | "top-left" => Corners::TOP_LEFT,
        "tr" | "topright" | "top-right" => Corners::TOP_RIGHT,
        "bl" | "bottomleft" | "bottom-left" => Corners::BOTTOM_LEFT,
        "br" | "bottomright" | "bottom-right" => Corners::BOTTOM_RIGHT,
        _ => return None,
    };
    Some(c)
}

// ---- Query string tokenizer ----

/// Split on '&', dropping a leading '?' and empty pairs.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. '+' decodes to a space; malformed
/// escapes pass through literally; invalid UTF-8 is replaced.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}
