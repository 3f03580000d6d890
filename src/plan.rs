//! Rounded-corner transform planning.
//!
//! Turns a [`CornerStyle`] and an image size into the geometry a renderer
//! needs: the clip outline for the image content and, optionally, a border
//! stroke. No pixels are touched here; the caller clips, draws, and strokes
//! with whatever backend it has.
//!
//! # Example
//!
//! ```
//! use zencorners::{Color, CornerStyle, Corners, Size, plan_rounded_corners};
//!
//! let style = CornerStyle::new(12.0)
//!     .corners(Corners::TOP)
//!     .border(2.0, Color::BLACK);
//!
//! let plan = plan_rounded_corners(Size::new(400.0, 300.0), 2.0, &style);
//! let clip = plan.content_clip.expect("border is narrow enough to leave content");
//! assert_eq!(clip.arc_count(), 2);
//! assert!(plan.border.is_some());
//! ```

use num_traits::Float;

use crate::builder::{effective_radius, rounded_rect_path};
use crate::corners::Corners;
use crate::geometry::{Rect, Size};
use crate::path::Path;

/// An 8-bit sRGB color with alpha.
///
/// Carried through to the renderer unchanged; no color management happens
/// here.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

/// How the border stroke joins at corners.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

/// Requested rounded-corner treatment for an image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CornerStyle {
    /// Corner radius in image units (points).
    pub radius: f64,
    /// Which corners to round.
    pub corners: Corners,
    /// Border width in image units. Zero means no border.
    pub border_width: f64,
    /// Border color. `None` means no border is stroked, though
    /// `border_width` still insets the content.
    pub border_color: Option<Color>,
}

impl Default for CornerStyle {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl CornerStyle {
    /// All corners rounded by `radius`, no border.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            corners: Corners::ALL,
            border_width: 0.0,
            border_color: None,
        }
    }

    pub fn corners(mut self, corners: Corners) -> Self {
        self.corners = corners;
        self
    }

    /// Add a border of `width` in `color`.
    pub fn border(mut self, width: f64, color: Color) -> Self {
        self.border_width = width;
        self.border_color = Some(color);
        self
    }

    /// Inset the content by `width` without stroking anything.
    pub fn border_width(mut self, width: f64) -> Self {
        self.border_width = width;
        self
    }

    /// Whether this style changes the image at all.
    pub fn is_identity(&self) -> bool {
        let rounds = self.radius > 0.0 && !self.corners.is_empty();
        let borders = self.border_width > 0.0;
        !rounds && !borders
    }
}

/// A stroked outline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BorderStroke {
    /// Centerline of the stroke.
    pub path: Path,
    /// Line width in image units.
    pub width: f64,
    pub join: LineJoin,
    pub color: Color,
}

/// Geometry for drawing an image with rounded corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoundedCornerPlan {
    /// Full image bounds; the output canvas.
    pub canvas: Rect,
    /// Clip to apply before drawing the image. `None` when the border is
    /// at least half the shorter side, which leaves no room for content;
    /// the image is not drawn at all.
    pub content_clip: Option<Path>,
    /// Border to stroke after drawing the content.
    pub border: Option<BorderStroke>,
}

/// Plan a rounded-corner transform for an image of `size` points at
/// `scale` pixels per point.
///
/// - The border width is rounded to whole device pixels, at least one.
/// - Content is clipped to the canvas inset by that width, using the style's
///   corners and radius.
/// - The border stroke covers the band between the canvas edge and the
///   clip: its centerline sits half the width in from the edge, and its
///   corner arcs share their centers with the clip's arcs. Square corners
///   are mitered so the stroke fills them.
/// - A non-positive or non-finite `scale` counts as 1.
pub fn plan_rounded_corners(size: Size, scale: f64, style: &CornerStyle) -> RoundedCornerPlan {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    };
    let canvas = Rect::from_size(size);
    let half_min = canvas.min_side() / 2.0;
    let border_width = snap_to_pixels(style.border_width, scale);
    let fits = border_width < half_min;

    if !fits {
        log::debug!(
            "border width {} leaves no content in {}x{} image",
            border_width,
            size.width,
            size.height
        );
        return RoundedCornerPlan {
            canvas,
            content_clip: None,
            border: None,
        };
    }

    let clip_rect = canvas.inset(border_width);
    let clip_radius = effective_radius(&clip_rect, style.radius);
    let content_clip = rounded_rect_path(clip_rect, style.corners, clip_radius);

    let border = match style.border_color {
        Some(color) if border_width > 0.0 => {
            let half = border_width / 2.0;
            let radius = if clip_radius > 0.0 {
                clip_radius + half
            } else {
                0.0
            };
            Some(BorderStroke {
                path: rounded_rect_path(canvas.inset(half), style.corners, radius),
                width: border_width,
                join: LineJoin::Miter,
                color,
            })
        }
        _ => None,
    };

    RoundedCornerPlan {
        canvas,
        content_clip: Some(content_clip),
        border,
    }
}

/// Round a non-negative width to whole pixels at `scale`, keeping any
/// positive width at least one pixel wide.
fn snap_to_pixels(width: f64, scale: f64) -> f64 {
    if width.is_nan() || width <= 0.0 {
        return 0.0;
    }
    Float::max(Float::round(width * scale), 1.0) / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Corner, Point};
    use crate::path::PathEl;

    #[test]
    fn radius_only_clips_full_canvas() {
        let plan = plan_rounded_corners(Size::new(200.0, 100.0), 1.0, &CornerStyle::new(10.0));
        assert_eq!(plan.canvas, Rect::new(0.0, 0.0, 200.0, 100.0));
        let clip = plan.content_clip.unwrap();
        assert_eq!(clip.arc_count(), 4);
        assert_eq!(clip.start_point(), Some(Point::new(10.0, 0.0)));
        assert!(plan.border.is_none());
    }

    #[test]
    fn border_insets_content() {
        let style = CornerStyle::new(10.0).border(4.0, Color::WHITE);
        let plan = plan_rounded_corners(Size::new(200.0, 100.0), 1.0, &style);
        let clip = plan.content_clip.unwrap();
        let bb = clip.bounding_box().unwrap();
        assert!(bb.approx_eq(&Rect::new(4.0, 4.0, 192.0, 92.0), 1e-9));
    }

    #[test]
    fn border_stroke_meets_the_clip() {
        let style = CornerStyle::new(10.0).border(3.0, Color::BLACK);
        let plan = plan_rounded_corners(Size::new(100.0, 100.0), 2.0, &style);
        let border = plan.border.unwrap();
        assert_eq!(border.width, 3.0);
        assert_eq!(border.join, LineJoin::Miter);
        assert_eq!(border.color, Color::BLACK);
        // Centerline 1.5 in from the edge, arcs concentric with the clip's.
        assert_eq!(border.path.start_point(), Some(Point::new(1.5 + 11.5, 1.5)));
        let clip = plan.content_clip.unwrap();
        let centers = |path: &Path| {
            let mut out = [Point::ZERO; 4];
            let mut n = 0;
            for el in path.iter() {
                if let PathEl::Arc(a) = el {
                    out[n] = a.center;
                    n += 1;
                }
            }
            out
        };
        assert_eq!(centers(&border.path), centers(&clip));
        for el in border.path.iter() {
            if let PathEl::Arc(a) = el {
                assert_eq!(a.radius, 11.5);
            }
        }
    }

    #[test]
    fn border_width_snaps_to_device_pixels() {
        let size = Size::new(100.0, 100.0);
        let width = |bw: f64, scale: f64| {
            let style = CornerStyle::new(8.0).border(bw, Color::BLACK);
            plan_rounded_corners(size, scale, &style).border.unwrap().width
        };
        assert_eq!(width(2.4, 1.0), 2.0);
        assert_eq!(width(2.6, 1.0), 3.0);
        assert_eq!(width(1.2, 2.0), 1.0);
        assert_eq!(width(0.1, 2.0), 0.5);
        assert_eq!(width(0.1, 1.0), 1.0);
    }

    #[test]
    fn small_radius_border_is_square() {
        let style = CornerStyle::new(0.4).border(1.0, Color::BLACK);
        let plan = plan_rounded_corners(Size::new(50.0, 50.0), 1.0, &style);
        assert_eq!(plan.content_clip.unwrap().arc_count(), 4);
        let border = plan.border.unwrap();
        assert_eq!(border.path.arc_count(), 4);
        for el in border.path.iter() {
            if let PathEl::Arc(a) = el {
                assert!((a.radius - 0.9).abs() < 1e-12, "{}", a.radius);
            }
        }
        let square = CornerStyle::new(0.0).border(1.0, Color::BLACK);
        let plan = plan_rounded_corners(Size::new(50.0, 50.0), 1.0, &square);
        assert_eq!(plan.border.unwrap().path.arc_count(), 0);
    }

    /// Distance from `p` to the nearest point of the outline.
    fn distance_to_outline(path: &Path, p: Point) -> f64 {
        let mut best = f64::INFINITY;
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;
        let mut edge = |a: Point, b: Point| {
            let (dx, dy) = (b.x - a.x, b.y - a.y);
            let len2 = dx * dx + dy * dy;
            let t = if len2 > 0.0 {
                (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let q = Point::new(a.x + t * dx, a.y + t * dy);
            best = best.min(q.distance(p));
        };
        path.flatten(1e-4, |el| match el {
            PathEl::MoveTo(q) => {
                current = q;
                start = q;
            }
            PathEl::LineTo(q) => {
                edge(current, q);
                current = q;
            }
            PathEl::Close => edge(current, start),
            PathEl::Arc(_) => {}
        });
        best
    }

    #[test]
    fn clip_and_border_cover_the_rounded_canvas() {
        let cases = [
            (Size::new(100.0, 100.0), 1.0, CornerStyle::new(10.0).border(4.0, Color::BLACK)),
            (Size::new(120.0, 80.0), 2.0, CornerStyle::new(6.0).border(2.5, Color::BLACK)),
            (
                Size::new(60.0, 90.0),
                3.0,
                CornerStyle::new(50.0)
                    .corners(Corners::TOP_LEFT | Corners::BOTTOM_RIGHT)
                    .border(5.0, Color::WHITE),
            ),
            (Size::new(40.0, 40.0), 1.0, CornerStyle::new(0.0).border(3.0, Color::BLACK)),
        ];
        let mut failures = Vec::new();
        for (size, scale, style) in cases {
            let plan = plan_rounded_corners(size, scale, &style);
            let clip = plan.content_clip.unwrap();
            let border = plan.border.unwrap();
            let half = border.width / 2.0;
            let outer_radius = match clip.iter().find_map(|el| match el {
                PathEl::Arc(a) => Some(a.radius),
                _ => None,
            }) {
                Some(r) => r + border.width,
                None => 0.0,
            };
            let outer = rounded_rect_path(plan.canvas, style.corners, outer_radius);
            // A mitered square corner fills the whole corner box.
            let in_miter = |p: Point| {
                Corner::CLOCKWISE.into_iter().any(|c| {
                    let q = plan.canvas.corner(c);
                    let square = outer_radius == 0.0 || !style.corners.contains(c);
                    square
                        && (p.x - q.x).abs() <= border.width
                        && (p.y - q.y).abs() <= border.width
                })
            };

            let mut y = 0.25;
            while y < size.height {
                let mut x = 0.25;
                while x < size.width {
                    let p = Point::new(x, y);
                    let d = distance_to_outline(&border.path, p);
                    let in_band = d <= half + 1e-3 || in_miter(p);
                    if outer.contains(p) && !clip.contains(p) && !in_band {
                        failures.push(format!("{size:?} {style:?}: ({x}, {y}) unpainted"));
                    }
                    if d < half - 1e-3 && !outer.contains(p) {
                        failures.push(format!("{size:?} {style:?}: ({x}, {y}) stroked outside"));
                    }
                    x += 0.5;
                }
                y += 0.5;
            }
        }
        assert!(failures.is_empty(), "{} failures:\n{}", failures.len(), failures.join("\n"));
    }

    #[test]
    fn too_wide_border_suppresses_everything() {
        let style = CornerStyle::new(10.0).border(30.0, Color::BLACK);
        let plan = plan_rounded_corners(Size::new(60.0, 80.0), 1.0, &style);
        assert!(plan.content_clip.is_none());
        assert!(plan.border.is_none());
    }

    #[test]
    fn border_without_color_only_insets() {
        let style = CornerStyle::new(5.0).border_width(2.0);
        let plan = plan_rounded_corners(Size::new(40.0, 40.0), 1.0, &style);
        assert!(plan.border.is_none());
        let bb = plan.content_clip.unwrap().bounding_box().unwrap();
        assert!(bb.approx_eq(&Rect::new(2.0, 2.0, 36.0, 36.0), 1e-9));
    }

    #[test]
    fn invalid_scale_counts_as_one() {
        let style = CornerStyle::new(4.0).border(1.0, Color::BLACK);
        let a = plan_rounded_corners(Size::new(30.0, 30.0), 0.0, &style);
        let b = plan_rounded_corners(Size::new(30.0, 30.0), f64::NAN, &style);
        let c = plan_rounded_corners(Size::new(30.0, 30.0), 1.0, &style);
        assert_eq!(a, c);
        assert_eq!(b, c);
    }

    #[test]
    fn empty_image_has_no_clip() {
        let plan = plan_rounded_corners(Size::new(0.0, 10.0), 1.0, &CornerStyle::new(3.0));
        // 0 < 0 is false: no room for content.
        assert!(plan.content_clip.is_none());
        assert!(plan.border.is_none());
    }

    #[test]
    fn identity_style() {
        assert!(CornerStyle::default().is_identity());
        assert!(CornerStyle::new(5.0).corners(Corners::NONE).is_identity());
        assert!(!CornerStyle::new(5.0).is_identity());
        assert!(!CornerStyle::new(0.0).border_width(1.0).is_identity());
    }
}
