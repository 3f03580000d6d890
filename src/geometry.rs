//! Points, sizes, and rectangles in floating-point coordinates.
//!
//! All geometry is y-down: `min_y` is the top edge. Backends with a y-up
//! convention flip the finished path with [`Path::flip_y`](crate::Path::flip_y).

use core::fmt;

use num_traits::Float;

/// A point in 2D space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        Float::hypot(other.x - self.x, other.y - self.y)
    }

    /// Whether both coordinates are within `eps` of `other`.
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        Float::abs(self.x - other.x) <= eps && Float::abs(self.y - other.y) <= eps
    }
}

/// Width × height in the same units as [`Rect`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size without validation.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Create a size, rejecting negative or non-finite dimensions.
    pub fn try_new(width: f64, height: f64) -> Result<Self, GeometryError> {
        check_dimension(width)?;
        check_dimension(height)?;
        Ok(Self { width, height })
    }

    /// The shorter of the two sides.
    pub fn min_side(&self) -> f64 {
        Float::min(self.width, self.height)
    }

    /// Whether either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// One of the four corners of a rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All corners in outline traversal order: clockwise from top-left.
    pub const CLOCKWISE: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];
}

/// Axis-aligned rectangle: origin plus size.
///
/// Width and height are expected to be non-negative. [`Rect::new`] trusts
/// the caller; [`Rect::try_new`] checks.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect without validation.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rect, rejecting negative or non-finite values.
    ///
    /// ```
    /// use zencorners::{GeometryError, Rect};
    ///
    /// assert!(Rect::try_new(0.0, 0.0, 100.0, 50.0).is_ok());
    /// assert_eq!(
    ///     Rect::try_new(0.0, 0.0, -1.0, 50.0),
    ///     Err(GeometryError::NegativeDimension)
    /// );
    /// ```
    pub fn try_new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, GeometryError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        check_dimension(width)?;
        check_dimension(height)?;
        Ok(Self::new(x, y, width, height))
    }

    /// A rect at the origin with the given size.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The shorter of the two sides.
    pub fn min_side(&self) -> f64 {
        Float::min(self.width, self.height)
    }

    /// Whether the rect encloses no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Position of a corner.
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => Point::new(self.min_x(), self.min_y()),
            Corner::TopRight => Point::new(self.max_x(), self.min_y()),
            Corner::BottomLeft => Point::new(self.min_x(), self.max_y()),
            Corner::BottomRight => Point::new(self.max_x(), self.max_y()),
        }
    }

    /// Shrink by `d` on every side.
    ///
    /// Never produces negative dimensions: an inset larger than half a side
    /// collapses that axis onto the center line. Negative `d` grows the rect.
    pub fn inset(&self, d: f64) -> Self {
        let dx = Float::min(d, self.width / 2.0);
        let dy = Float::min(d, self.height / 2.0);
        Self::new(
            self.x + dx,
            self.y + dy,
            self.width - 2.0 * dx,
            self.height - 2.0 * dy,
        )
    }

    /// Smallest rect containing both `self` and `p`.
    pub fn union_point(&self, p: Point) -> Self {
        let x0 = Float::min(self.min_x(), p.x);
        let y0 = Float::min(self.min_y(), p.y);
        let x1 = Float::max(self.max_x(), p.x);
        let y1 = Float::max(self.max_y(), p.y);
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Whether every edge is within `eps` of `other`'s.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        Float::abs(self.min_x() - other.min_x()) <= eps
            && Float::abs(self.min_y() - other.min_y()) <= eps
            && Float::abs(self.max_x() - other.max_x()) <= eps
            && Float::abs(self.max_y() - other.max_y()) <= eps
    }
}

/// Rejected geometry input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// Width or height is below zero.
    NegativeDimension,
    /// A coordinate or dimension is NaN or infinite.
    NonFinite,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeDimension => f.write_str("rectangle has a negative width or height"),
            Self::NonFinite => f.write_str("rectangle has a NaN or infinite value"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GeometryError {}

fn check_dimension(v: f64) -> Result<(), GeometryError> {
    if !v.is_finite() {
        Err(GeometryError::NonFinite)
    } else if v < 0.0 {
        Err(GeometryError::NegativeDimension)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_bad_dimensions() {
        assert_eq!(
            Rect::try_new(0.0, 0.0, 10.0, -0.5),
            Err(GeometryError::NegativeDimension)
        );
        assert_eq!(
            Rect::try_new(f64::NAN, 0.0, 10.0, 10.0),
            Err(GeometryError::NonFinite)
        );
        assert_eq!(
            Rect::try_new(0.0, 0.0, f64::INFINITY, 10.0),
            Err(GeometryError::NonFinite)
        );
        assert_eq!(Size::try_new(-3.0, 1.0), Err(GeometryError::NegativeDimension));
    }

    #[test]
    fn try_new_accepts_zero_size() {
        let r = Rect::try_new(5.0, 5.0, 0.0, 0.0).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn edges_and_corners() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.max_x(), 110.0);
        assert_eq!(r.max_y(), 70.0);
        assert_eq!(r.min_side(), 50.0);
        assert_eq!(r.corner(Corner::TopLeft), Point::new(10.0, 20.0));
        assert_eq!(r.corner(Corner::TopRight), Point::new(110.0, 20.0));
        assert_eq!(r.corner(Corner::BottomLeft), Point::new(10.0, 70.0));
        assert_eq!(r.corner(Corner::BottomRight), Point::new(110.0, 70.0));
        assert_eq!(r.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn inset_shrinks_each_side() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0).inset(5.0);
        assert_eq!(r, Rect::new(5.0, 5.0, 90.0, 40.0));
    }

    #[test]
    fn inset_collapses_instead_of_inverting() {
        let r = Rect::new(0.0, 0.0, 100.0, 10.0).inset(8.0);
        assert_eq!(r, Rect::new(8.0, 5.0, 84.0, 0.0));
        assert!(r.is_empty());
    }

    #[test]
    fn union_point_grows() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).union_point(Point::new(-5.0, 20.0));
        assert_eq!(r, Rect::new(-5.0, 0.0, 15.0, 20.0));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            format!("{}", GeometryError::NegativeDimension),
            "rectangle has a negative width or height"
        );
    }
}
