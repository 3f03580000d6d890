//! SVG output: path data for any [`Path`], and annotated documents for
//! rounded-corner plans.
//!
//! [`SvgPathWriter`] is a complete [`PathSink`] backend. SVG has native
//! elliptical arcs, so arcs are written as `A` commands rather than lowered
//! to cubics.
//!
//! # Example
//!
//! ```
//! use zencorners::{Corners, Rect, rounded_rect_path, svg::path_data};
//!
//! let path = rounded_rect_path(Rect::new(0.0, 0.0, 100.0, 50.0), Corners::TOP_LEFT, 10.0);
//! assert_eq!(
//!     path_data(&path),
//!     "M10 0 L100 0 L100 50 L0 50 L0 10 A10 10 0 0 1 10 0 Z"
//! );
//! ```

use core::f64::consts::PI;

use num_traits::Float;

use crate::geometry::{Point, Rect};
use crate::path::{Arc, Path, PathSink};
use crate::plan::{Color, LineJoin, RoundedCornerPlan};

/// Margin around the drawing in rendered documents.
const MARGIN: f64 = 20.0;
/// Height of the caption line above the drawing.
const CAPTION_H: f64 = 22.0;

/// Accumulates SVG path data (`d` attribute contents).
#[derive(Clone, Debug, Default)]
pub struct SvgPathWriter {
    d: String,
}

impl SvgPathWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The path data written so far.
    pub fn as_str(&self) -> &str {
        &self.d
    }

    pub fn into_string(self) -> String {
        self.d
    }

    fn command(&mut self, cmd: char, points: &[Point]) {
        if !self.d.is_empty() {
            self.d.push(' ');
        }
        self.d.push(cmd);
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                self.d.push(' ');
            }
            self.d.push_str(&format!("{} {}", num(p.x), num(p.y)));
        }
    }
}

impl PathSink for SvgPathWriter {
    fn move_to(&mut self, p: Point) {
        self.command('M', &[p]);
    }

    fn line_to(&mut self, p: Point) {
        self.command('L', &[p]);
    }

    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, p: Point) {
        self.command('C', &[ctrl1, ctrl2, p]);
    }

    fn close(&mut self) {
        self.command('Z', &[]);
    }

    fn arc(&mut self, arc: &Arc) {
        let end = arc.end_point();
        let r = num(arc.radius);
        let large = u8::from(Float::abs(arc.sweep_angle) > PI);
        // SVG's positive-angle direction is ours: +x toward +y.
        let sweep = u8::from(arc.sweep_angle > 0.0);
        self.command('A', &[]);
        self.d.push_str(&format!(
            "{r} {r} 0 {large} {sweep} {} {}",
            num(end.x),
            num(end.y)
        ));
    }
}

/// SVG path data for `path`.
pub fn path_data(path: &Path) -> String {
    let mut w = SvgPathWriter::new();
    path.emit(&mut w);
    w.into_string()
}

/// Standalone SVG document drawing `path` filled, with `view` as the
/// visible area.
pub fn render_path_svg(path: &Path, view: Rect) -> String {
    let mut svg = document_start(view, None);
    svg.push_str(&format!(
        r#"<path d="{}" class="clip" transform="translate({} {})"/>"#,
        path_data(path),
        num(MARGIN - view.x),
        num(MARGIN + CAPTION_H - view.y)
    ));
    svg.push('\n');
    svg.push_str("</svg>\n");
    svg
}

/// Standalone SVG document showing a [`RoundedCornerPlan`]: the canvas, the
/// content clip, and the border centerline.
pub fn render_plan_svg(plan: &RoundedCornerPlan) -> String {
    let canvas = plan.canvas;
    let caption = match (&plan.content_clip, &plan.border) {
        (None, _) => format!("Canvas {}×{}, no content", num(canvas.width), num(canvas.height)),
        (Some(_), None) => format!("Canvas {}×{}", num(canvas.width), num(canvas.height)),
        (Some(_), Some(b)) => format!(
            "Canvas {}×{}, border {}",
            num(canvas.width),
            num(canvas.height),
            num(b.width)
        ),
    };
    let mut svg = document_start(canvas, Some(&caption));
    svg.push_str(&format!(
        r#"<g transform="translate({} {})">"#,
        num(MARGIN - canvas.x),
        num(MARGIN + CAPTION_H - canvas.y)
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <rect x="{}" y="{}" width="{}" height="{}" class="canvas"/>"#,
        num(canvas.x),
        num(canvas.y),
        num(canvas.width),
        num(canvas.height)
    ));
    svg.push('\n');
    if let Some(clip) = &plan.content_clip {
        svg.push_str(&format!(r#"  <path d="{}" class="clip"/>"#, path_data(clip)));
        svg.push('\n');
    }
    if let Some(border) = &plan.border {
        svg.push_str(&format!(
            r#"  <path d="{}" class="border" stroke="{}" stroke-width="{}" stroke-linejoin="{}"/>"#,
            path_data(&border.path),
            css_color(border.color),
            num(border.width),
            match border.join {
                LineJoin::Miter => "miter",
                LineJoin::Round => "round",
                LineJoin::Bevel => "bevel",
            }
        ));
        svg.push('\n');
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

fn document_start(view: Rect, caption: Option<&str>) -> String {
    let w = view.width + 2.0 * MARGIN;
    let h = view.height + 2.0 * MARGIN + CAPTION_H;
    let mut svg = String::with_capacity(1024);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        Float::ceil(w) as u32,
        Float::ceil(h) as u32,
        num(w),
        num(h)
    ));
    svg.push('\n');
    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; font-size: 13px; fill: #333; }
  .canvas { fill: #e8e8e8; stroke: #999; stroke-width: 1; stroke-dasharray: 4,2; }
  .clip { fill: #6ba3d6; }
  .border { fill: none; }
  @media (prefers-color-scheme: dark) {
    text { fill: #e0e0e0; }
    .canvas { fill: #2d2d2d; stroke: #555; }
    .clip { fill: #3a72a4; }
  }
</style>
"##,
    );
    if let Some(caption) = caption {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}">{}</text>"#,
            num(MARGIN),
            num(MARGIN + 14.0),
            escape_xml(caption)
        ));
        svg.push('\n');
    }
    svg
}

/// Format a coordinate: at most three decimals, no trailing zeros, no `-0`.
fn num(v: f64) -> String {
    let rounded = Float::round(v * 1000.0) / 1000.0;
    let mut s = format!("{rounded:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = String::from("0");
    }
    s
}

fn css_color(c: Color) -> String {
    format!("rgba({},{},{},{})", c.r, c.g, c.b, num(c.a as f64 / 255.0))
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
