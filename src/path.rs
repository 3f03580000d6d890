//! Backend-neutral closed outlines made of lines and circular arcs.
//!
//! A [`Path`] is what the builder hands to rendering code. It carries no
//! platform types: a backend walks it through a [`PathSink`] and issues its
//! own drawing calls. Backends without native arcs get cubic Béziers from the
//! default [`PathSink::arc`].
//!
//! Paths are stored inline (at most [`MAX_ELEMENTS`] elements), so building
//! and copying one never allocates.

use core::f64::consts::{FRAC_PI_2, PI};
use core::fmt;

use num_traits::Float;

use crate::geometry::{Point, Rect};

/// Upper bound on elements in a [`Path`]: one move, four edges, four
/// corner arcs, and the close.
pub const MAX_ELEMENTS: usize = 10;

/// Flattening tolerance used by [`Path::contains`].
const CONTAINS_TOLERANCE: f64 = 1e-3;

/// Cap on segments emitted when flattening a single arc.
const MAX_FLATTEN_SEGMENTS: usize = 1024;

/// Points closer than this are treated as coincident when deciding whether
/// an arc needs a connecting line.
const JOIN_EPSILON: f64 = 1e-9;

/// A circular arc.
///
/// Angles are in radians, measured from +x toward +y. In y-down space a
/// positive `sweep_angle` turns clockwise on screen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl Arc {
    /// Point on the circle at `angle`.
    pub fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * Float::cos(angle),
            self.center.y + self.radius * Float::sin(angle),
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.start_angle + self.sweep_angle)
    }

    /// Arc length.
    pub fn length(&self) -> f64 {
        Float::abs(self.sweep_angle) * self.radius
    }

    /// Approximate the arc with cubic Béziers, one per quarter turn or less.
    ///
    /// Calls `f(ctrl1, ctrl2, end)` per segment. A non-finite sweep emits
    /// nothing; segment count is capped at 1024. Control points sit at
    /// `4/3 · tan(θ/4) · r` along the tangents, which puts each segment's
    /// midpoint exactly on the circle.
    pub fn to_cubics(&self, mut f: impl FnMut(Point, Point, Point)) {
        if self.sweep_angle == 0.0 || !self.sweep_angle.is_finite() {
            return;
        }
        let n = (Float::max(
            Float::ceil(Float::abs(self.sweep_angle) / FRAC_PI_2 - 1e-9),
            1.0,
        ) as usize)
            .min(MAX_FLATTEN_SEGMENTS);
        let step = self.sweep_angle / n as f64;
        let k = 4.0 / 3.0 * Float::tan(step / 4.0) * self.radius;

        for i in 0..n {
            let a0 = self.start_angle + step * i as f64;
            let a1 = a0 + step;
            let p0 = self.point_at(a0);
            let p3 = self.point_at(a1);
            let c1 = Point::new(p0.x - k * Float::sin(a0), p0.y + k * Float::cos(a0));
            let c2 = Point::new(p3.x + k * Float::sin(a1), p3.y - k * Float::cos(a1));
            f(c1, c2, p3);
        }
    }

    /// Subdivide into chords that stay within `tolerance` of the circle.
    ///
    /// Calls `f` for every chord end, excluding the start point and
    /// including the end point.
    pub fn flatten(&self, tolerance: f64, mut f: impl FnMut(Point)) {
        let n = self.flatten_segments(tolerance);
        for i in 1..=n {
            f(self.point_at(self.start_angle + self.sweep_angle * i as f64 / n as f64));
        }
    }

    fn flatten_segments(&self, tolerance: f64) -> usize {
        if self.radius <= 0.0 || self.sweep_angle == 0.0 || tolerance >= self.radius {
            return 1;
        }
        // Chord sagitta r·(1 − cos(θ/2)) ≤ tolerance.
        let max_step = 2.0 * Float::acos(1.0 - Float::max(tolerance, 1e-12) / self.radius);
        let n = Float::ceil(Float::abs(self.sweep_angle) / max_step);
        if n.is_finite() {
            (n as usize).clamp(1, MAX_FLATTEN_SEGMENTS)
        } else {
            MAX_FLATTEN_SEGMENTS
        }
    }

    /// Contribution to the shoelace sum, ½∮(x dy − y dx), integrated exactly.
    fn area_term(&self) -> f64 {
        let (r, c) = (self.radius, self.center);
        let t0 = self.start_angle;
        let t1 = t0 + self.sweep_angle;
        0.5 * (r * r * self.sweep_angle + r * c.x * (Float::sin(t1) - Float::sin(t0))
            - r * c.y * (Float::cos(t1) - Float::cos(t0)))
    }

    /// Grow `bounds` to include the arc, using exact axis extremes.
    fn extend_bounds(&self, bounds: Rect) -> Rect {
        let mut b = bounds
            .union_point(self.start_point())
            .union_point(self.end_point());
        let a = self.start_angle;
        let z = a + self.sweep_angle;
        let (lo, hi) = (Float::min(a, z), Float::max(a, z));
        let (mut first, mut last) = (0, 3);
        // Angles too large to resolve a quarter turn get full-circle bounds.
        if Float::abs(lo) < 1e15 && Float::abs(hi) < 1e15 && hi - lo < 2.0 * PI {
            first = Float::ceil(lo / FRAC_PI_2) as i64;
            last = Float::floor(hi / FRAC_PI_2) as i64;
        }
        let (c, r) = (self.center, self.radius);
        for k in first..=last {
            let extreme = match k.rem_euclid(4) {
                0 => Point::new(c.x + r, c.y),
                1 => Point::new(c.x, c.y + r),
                2 => Point::new(c.x - r, c.y),
                _ => Point::new(c.x, c.y - r),
            };
            b = b.union_point(extreme);
        }
        b
    }

    /// Mirror about the horizontal line `y = axis_y`.
    fn flip_y(&self, axis_y: f64) -> Self {
        Self {
            center: Point::new(self.center.x, 2.0 * axis_y - self.center.y),
            radius: self.radius,
            start_angle: -self.start_angle,
            sweep_angle: -self.sweep_angle,
        }
    }
}

/// One element of a [`Path`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathEl {
    /// Begin the outline at a point.
    MoveTo(Point),
    /// Straight line from the current point.
    LineTo(Point),
    /// Circular arc. If it does not begin at the current point, a straight
    /// line joins them first.
    Arc(Arc),
    /// Straight line back to the start of the outline, ending it.
    Close,
}

/// Receiver for path commands. Implement this to draw a [`Path`] with a
/// particular backend.
///
/// Backends with native arc support override [`arc`](Self::arc); the
/// default lowers arcs to cubic Béziers.
pub trait PathSink {
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, p: Point);
    fn close(&mut self);

    /// Draw an arc that begins at the current point.
    fn arc(&mut self, arc: &Arc) {
        arc.to_cubics(|c1, c2, p| self.cubic_to(c1, c2, p));
    }
}

/// A closed outline of lines and arcs.
///
/// Produced by [`RoundedRectPathBuilder`](crate::RoundedRectPathBuilder).
/// Each path is an independent value; nothing is shared between paths.
#[derive(Copy, Clone)]
pub struct Path {
    els: [PathEl; MAX_ELEMENTS],
    len: usize,
}

impl Path {
    pub(crate) const fn empty() -> Self {
        Self {
            els: [PathEl::Close; MAX_ELEMENTS],
            len: 0,
        }
    }

    /// Append an element. The builder never emits more than
    /// [`MAX_ELEMENTS`], so overflow is a bug.
    pub(crate) fn push(&mut self, el: PathEl) {
        debug_assert!(self.len < MAX_ELEMENTS, "path element overflow");
        self.els[self.len] = el;
        self.len += 1;
    }

    /// Elements in drawing order.
    pub fn elements(&self) -> &[PathEl] {
        &self.els[..self.len]
    }

    pub fn iter(&self) -> core::slice::Iter<'_, PathEl> {
        self.elements().iter()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the outline ends with [`PathEl::Close`].
    pub fn is_closed(&self) -> bool {
        matches!(self.elements().last(), Some(PathEl::Close))
    }

    /// The point the outline starts (and, when closed, ends) at.
    pub fn start_point(&self) -> Option<Point> {
        match self.elements().first() {
            Some(PathEl::MoveTo(p)) => Some(*p),
            _ => None,
        }
    }

    /// Number of arc elements.
    pub fn arc_count(&self) -> usize {
        self.iter().filter(|el| matches!(el, PathEl::Arc(_))).count()
    }

    /// Number of explicit line elements (the closing segment is not counted).
    pub fn line_count(&self) -> usize {
        self.iter().filter(|el| matches!(el, PathEl::LineTo(_))).count()
    }

    /// Total outline length, including the closing segment.
    pub fn perimeter(&self) -> f64 {
        let mut total = 0.0;
        self.for_each_segment(|seg| {
            total += match seg {
                Segment::Line(a, b) => a.distance(b),
                Segment::Arc(arc) => arc.length(),
            };
        });
        total
    }

    /// Signed enclosed area. Positive when the outline runs clockwise on
    /// screen in y-down space, which is how the builder emits it.
    pub fn signed_area(&self) -> f64 {
        let mut sum = 0.0;
        self.for_each_segment(|seg| {
            sum += match seg {
                Segment::Line(a, b) => 0.5 * (a.x * b.y - b.x * a.y),
                Segment::Arc(arc) => arc.area_term(),
            };
        });
        sum
    }

    /// Enclosed area.
    pub fn area(&self) -> f64 {
        Float::abs(self.signed_area())
    }

    /// Tight axis-aligned bounds. `None` for an empty path.
    pub fn bounding_box(&self) -> Option<Rect> {
        let start = self.start_point()?;
        let mut bounds = Rect::new(start.x, start.y, 0.0, 0.0);
        for el in self.iter() {
            bounds = match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => bounds.union_point(*p),
                PathEl::Arc(arc) => arc.extend_bounds(bounds),
                PathEl::Close => bounds,
            };
        }
        Some(bounds)
    }

    /// Whether `p` lies inside the outline (nonzero winding).
    ///
    /// Arcs are flattened first, so points within about 0.001 units of a
    /// rounded edge may be classified either way.
    pub fn contains(&self, p: Point) -> bool {
        let mut winding = 0i32;
        self.for_each_flat_edge(CONTAINS_TOLERANCE, |a, b| {
            if a.y <= p.y {
                if b.y > p.y && cross(a, b, p) > 0.0 {
                    winding += 1;
                }
            } else if b.y <= p.y && cross(a, b, p) < 0.0 {
                winding -= 1;
            }
        });
        winding != 0
    }

    /// Replace arcs with chords within `tolerance` of the true curve.
    ///
    /// Calls `f` with [`PathEl::MoveTo`], [`PathEl::LineTo`] and
    /// [`PathEl::Close`] only.
    pub fn flatten(&self, tolerance: f64, mut f: impl FnMut(PathEl)) {
        for el in self.iter() {
            match el {
                PathEl::Arc(arc) => {
                    f(PathEl::LineTo(arc.start_point()));
                    arc.flatten(tolerance, |p| f(PathEl::LineTo(p)));
                }
                other => f(*other),
            }
        }
    }

    /// Flattened outline as a point list. The closing point is not repeated.
    #[cfg(feature = "alloc")]
    pub fn to_polyline(&self, tolerance: f64) -> alloc::vec::Vec<Point> {
        let mut points = alloc::vec::Vec::new();
        self.flatten(tolerance, |el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => {
                if points.last().is_none_or(|&last: &Point| !last.approx_eq(p, JOIN_EPSILON)) {
                    points.push(p);
                }
            }
            _ => {}
        });
        if points.len() > 1 && points[0].approx_eq(points[points.len() - 1], JOIN_EPSILON) {
            points.pop();
        }
        points
    }

    /// Mirror about the horizontal line `y = axis_y`.
    ///
    /// Backends whose y axis points up (Core Graphics, AppKit, PDF) pass the
    /// vertical center of their drawing area to get the same picture.
    /// Arc sweeps change sign, so the outline runs the other way.
    pub fn flip_y(&self, axis_y: f64) -> Self {
        let mirror = |p: Point| Point::new(p.x, 2.0 * axis_y - p.y);
        let mut out = Self::empty();
        for el in self.iter() {
            out.push(match el {
                PathEl::MoveTo(p) => PathEl::MoveTo(mirror(*p)),
                PathEl::LineTo(p) => PathEl::LineTo(mirror(*p)),
                PathEl::Arc(arc) => PathEl::Arc(arc.flip_y(axis_y)),
                PathEl::Close => PathEl::Close,
            });
        }
        out
    }

    /// Drive a backend adapter with this path's commands.
    pub fn emit<S: PathSink + ?Sized>(&self, sink: &mut S) {
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;
        for el in self.iter() {
            match el {
                PathEl::MoveTo(p) => {
                    sink.move_to(*p);
                    current = *p;
                    start = *p;
                }
                PathEl::LineTo(p) => {
                    sink.line_to(*p);
                    current = *p;
                }
                PathEl::Arc(arc) => {
                    let from = arc.start_point();
                    if !current.approx_eq(from, JOIN_EPSILON) {
                        sink.line_to(from);
                    }
                    sink.arc(arc);
                    current = arc.end_point();
                }
                PathEl::Close => {
                    sink.close();
                    current = start;
                }
            }
        }
    }

    /// Walk the outline as explicit segments, including implicit joins and
    /// the closing line.
    fn for_each_segment(&self, mut f: impl FnMut(Segment)) {
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;
        for el in self.iter() {
            match el {
                PathEl::MoveTo(p) => {
                    current = *p;
                    start = *p;
                }
                PathEl::LineTo(p) => {
                    f(Segment::Line(current, *p));
                    current = *p;
                }
                PathEl::Arc(arc) => {
                    let from = arc.start_point();
                    if !current.approx_eq(from, JOIN_EPSILON) {
                        f(Segment::Line(current, from));
                    }
                    f(Segment::Arc(*arc));
                    current = arc.end_point();
                }
                PathEl::Close => {
                    f(Segment::Line(current, start));
                    current = start;
                }
            }
        }
    }

    fn for_each_flat_edge(&self, tolerance: f64, mut f: impl FnMut(Point, Point)) {
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;
        let mut open = false;
        self.flatten(tolerance, |el| match el {
            PathEl::MoveTo(p) => {
                current = p;
                start = p;
                open = true;
            }
            PathEl::LineTo(p) => {
                f(current, p);
                current = p;
            }
            PathEl::Close => {
                f(current, start);
                current = start;
                open = false;
            }
            PathEl::Arc(_) => {}
        });
        // Containment treats an unclosed outline as implicitly closed.
        if open {
            f(current, start);
        }
    }
}

enum Segment {
    Line(Point, Point),
    Arc(Arc),
}

/// Z component of (b − a) × (p − a): positive when `p` is left of a→b.
fn cross(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.elements() == other.elements()
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements()).finish()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathEl;
    type IntoIter = core::slice::Iter<'a, PathEl>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
