//! Rounded-rectangle outline construction.
//!
//! # Example
//!
//! ```
//! use zencorners::{Corners, PathEl, Rect, RoundedRectPathBuilder};
//!
//! let path = RoundedRectPathBuilder::new(Rect::new(0.0, 0.0, 100.0, 50.0))
//!     .corners(Corners::TOP_LEFT | Corners::BOTTOM_RIGHT)
//!     .radius(10.0)
//!     .build();
//!
//! assert!(path.is_closed());
//! assert_eq!(path.arc_count(), 2);
//! assert!(matches!(path.elements()[0], PathEl::MoveTo(_)));
//! ```
//!
//! # Outline order
//!
//! ```text
//!     start ─► ──────────────┐ top-right
//!     ╭                      │
//!     │ top-left             │
//!     │                      │
//!     └─ bottom-left ◄────── ╯ bottom-right
//! ```
//!
//! The outline runs clockwise on screen (y-down), starting on the top edge
//! where the top-left corner treatment ends. Corners are visited top-right,
//! bottom-right, bottom-left, and finally top-left, whose arc lands back on
//! the start point before the close.

use core::f64::consts::{FRAC_PI_2, PI};

use num_traits::Float;

use crate::corners::Corners;
use crate::geometry::{Corner, Point, Rect};
use crate::path::{Arc, Path, PathEl};

/// Builds the outline of a rectangle with selectively rounded corners.
///
/// A plain value: configure it, call [`build`](Self::build) as often as
/// needed. Every call returns a fresh, independently owned [`Path`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoundedRectPathBuilder {
    pub rect: Rect,
    pub corners: Corners,
    pub radius: f64,
}

impl RoundedRectPathBuilder {
    /// All corners selected, radius zero (a plain rectangle until a radius
    /// is set).
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            corners: Corners::ALL,
            radius: 0.0,
        }
    }

    /// Select which corners are rounded.
    pub fn corners(mut self, corners: Corners) -> Self {
        self.corners = corners;
        self
    }

    /// Set the requested corner radius.
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// The radius the outline actually uses.
    ///
    /// Negative and NaN requests become zero; anything over half the
    /// shorter side is clamped to half the shorter side.
    pub fn effective_radius(&self) -> f64 {
        effective_radius(&self.rect, self.radius)
    }

    /// Build the outline.
    pub fn build(&self) -> Path {
        let rect = self.rect;
        let r = self.effective_radius();
        if r < self.radius {
            log::trace!(
                "corner radius {} clamped to {} for {}x{} rect",
                self.radius,
                r,
                rect.width,
                rect.height
            );
        }

        let radius_at = |corner: Corner| {
            if r > 0.0 && self.corners.contains(corner) {
                r
            } else {
                0.0
            }
        };
        let tl = radius_at(Corner::TopLeft);
        let tr = radius_at(Corner::TopRight);
        let br = radius_at(Corner::BottomRight);
        let bl = radius_at(Corner::BottomLeft);

        let (x0, y0, x1, y1) = (rect.min_x(), rect.min_y(), rect.max_x(), rect.max_y());

        let mut out = Outline::start(Point::new(x0 + tl, y0));

        out.line_to(Point::new(x1 - tr, y0));
        out.corner(Point::new(x1 - tr, y0 + tr), tr, -FRAC_PI_2, Point::new(x1, y0 + tr));

        out.line_to(Point::new(x1, y1 - br));
        out.corner(Point::new(x1 - br, y1 - br), br, 0.0, Point::new(x1 - br, y1));

        out.line_to(Point::new(x0 + bl, y1));
        out.corner(Point::new(x0 + bl, y1 - bl), bl, FRAC_PI_2, Point::new(x0, y1 - bl));

        // A square top-left corner is the start point itself; the close
        // draws the left edge.
        if tl > 0.0 {
            out.line_to(Point::new(x0, y0 + tl));
            out.corner(Point::new(x0 + tl, y0 + tl), tl, PI, Point::new(x0 + tl, y0));
        }

        out.finish()
    }
}

/// Build a rounded-rectangle outline in one call.
///
/// `corners` selects which corners are rounded; `radius` is clamped to half
/// the shorter side. See [`RoundedRectPathBuilder`].
///
/// ```
/// use zencorners::{rounded_rect_path, Corners, Rect};
///
/// let pill = rounded_rect_path(Rect::new(0.0, 0.0, 50.0, 50.0), Corners::ALL, 1000.0);
/// assert_eq!(pill.line_count(), 0);
/// assert!((pill.area() - core::f64::consts::PI * 625.0).abs() < 1e-9);
/// ```
pub fn rounded_rect_path(rect: Rect, corners: Corners, radius: f64) -> Path {
    RoundedRectPathBuilder {
        rect,
        corners,
        radius,
    }
    .build()
}

/// The radius actually used for `rect`: `radius` limited to
/// `[0, min(width, height) / 2]`.
pub fn effective_radius(rect: &Rect, radius: f64) -> f64 {
    let limit = Float::max(rect.min_side() / 2.0, 0.0);
    Float::min(Float::max(radius, 0.0), limit)
}

/// Emits elements while tracking the nominal current point, so exact
/// coordinates (not trig results) decide which edges are zero-length.
struct Outline {
    path: Path,
    current: Point,
}

impl Outline {
    fn start(p: Point) -> Self {
        let mut path = Path::empty();
        path.push(PathEl::MoveTo(p));
        Self { path, current: p }
    }

    /// Straight edge to `p`, skipped when already there.
    fn line_to(&mut self, p: Point) {
        if p != self.current {
            self.path.push(PathEl::LineTo(p));
            self.current = p;
        }
    }

    /// Quarter arc around `center` ending at `end`. A zero radius means a
    /// square corner, which the adjacent edges already reach.
    fn corner(&mut self, center: Point, radius: f64, start_angle: f64, end: Point) {
        if radius > 0.0 {
            self.path.push(PathEl::Arc(Arc {
                center,
                radius,
                start_angle,
                sweep_angle: FRAC_PI_2,
            }));
            self.current = end;
        }
    }

    fn finish(mut self) -> Path {
        self.path.push(PathEl::Close);
        self.path
    }
}
