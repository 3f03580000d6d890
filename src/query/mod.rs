//! Query-string configuration for rounded-corner transforms.
//!
//! Parses strings like `?radius=12&corners=tl,br&border=2&bordercolor=red`
//! into a [`CornerStyle`], and writes a style back out in canonical form.
//! The canonical form is stable, so it doubles as a cache key for the
//! transformed image.
//!
//! # Example
//!
//! ```
//! use zencorners::query;
//! use zencorners::{Color, Corners};
//!
//! let result = query::parse("radius=12&corners=top&border=2&bordercolor=red&dpr=2x");
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.style.radius, 12.0);
//! assert_eq!(result.style.corners, Corners::TOP);
//! assert_eq!(result.style.border_color, Some(Color::rgb(255, 0, 0)));
//! assert_eq!(result.scale, 2.0);
//!
//! let key = result.style.to_query();
//! assert_eq!(key, "radius=12&corners=topleft,topright&border=2&bordercolor=ff0000ff");
//! assert_eq!(query::parse(&key).style, result.style);
//! ```
//!
//! # Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `radius`, `r`, `cornerradius` | non-negative number |
//! | `roundcorners`, `s.roundcorners` | one radius, or four (`tl,tr,br,bl`); zero leaves a corner square |
//! | `corners` | `all`, `none`, `top`, `bottom`, `left`, `right`, `tl`/`topleft`/`top-left`, … (comma, `+` or space separated), or a bit mask |
//! | `border`, `borderwidth` | non-negative number |
//! | `bordercolor`, `border.color` | hex (`#RGB`…`#RRGGBBAA`) or basic CSS keyword |
//! | `dpr`, `zoom`, `scale` | positive number, optional `x` suffix |
//!
//! Common image keys (`w`, `h`, `format`, …) are kept in
//! [`ParseResult::extras`] without warnings.

mod color;
mod parse;

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::corners::Corners;
use crate::geometry::Corner;
use crate::plan::CornerStyle;

/// Result of parsing a query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Parsed style; fields default as in [`CornerStyle::default`].
    pub style: CornerStyle,
    /// Pixels per point (`dpr`). Defaults to 1.
    pub scale: f64,
    /// Recognized non-corner keys, preserved for downstream consumers.
    pub extras: BTreeMap<String, String>,
    /// Non-fatal problems, in the order encountered.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A setting was given more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// The key means nothing here.
    KeyNotRecognized { key: String, value: String },
    /// The key was recognized but its value could not be parsed; the value
    /// is ignored.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
    /// `roundcorners` gave different non-zero radii; the largest is used for
    /// every rounded corner.
    RadiiDiffer { value: String },
}

/// Parse a query string (with or without leading `?`).
///
/// Never fails: problems are reported in [`ParseResult::warnings`].
pub fn parse(query: &str) -> ParseResult {
    parse::parse_query(query)
}

impl CornerStyle {
    /// Canonical query form of this style.
    ///
    /// Styles that draw the same get the same string: a style that rounds
    /// nothing (no corners, or a radius that is not positive) is written
    /// as `radius=0&corners=all`, and border keys appear only for a positive
    /// border width. [`parse`] reads the string back to a style that draws
    /// the same and has the same canonical form.
    pub fn to_query(&self) -> String {
        let rounds = self.radius > 0.0 && !self.corners.is_empty();
        let (radius, corners) = if rounds {
            (self.radius, self.corners)
        } else {
            (0.0, Corners::ALL)
        };
        let mut out = format!("radius={}&corners={}", radius, corners_name(corners));
        if self.border_width > 0.0 {
            out.push_str(&format!("&border={}", self.border_width));
            if let Some(c) = self.border_color {
                out.push_str("&bordercolor=");
                out.push_str(&color::format_color(c));
            }
        }
        out
    }
}

fn corners_name(corners: Corners) -> String {
    if corners.is_all() {
        return String::from("all");
    }
    if corners.is_empty() {
        return String::from("none");
    }
    let names: Vec<&str> = corners
        .iter()
        .map(|c| match c {
            Corner::TopLeft => "topleft",
            Corner::TopRight => "topright",
            Corner::BottomRight => "bottomright",
            Corner::BottomLeft => "bottomleft",
        })
        .collect();
    names.join(",")
}
