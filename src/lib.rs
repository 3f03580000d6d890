//! Rounded-rectangle path construction with per-corner selection.
//!
//! Pure geometry: no pixel operations, no allocations on the core path,
//! `no_std` compatible. One builder produces a backend-neutral outline;
//! each drawing backend adapts it through [`PathSink`].
//!
//! # Modules
//!
//! - [`builder`]: rounded-rectangle outline construction and radius clamping
//! - [`corners`]: corner selection set
//! - [`geometry`]: points, sizes, rectangles
//! - [`path`]: closed line/arc outlines, geometric queries, backend adapter trait
//! - [`plan`]: clip and border geometry for rounded-corner image transforms
//! - `query` (feature `query`): query-string configuration and cache keys
//! - `svg` (feature `svg`): SVG path data and documents
//!
//! # Example
//!
//! ```
//! use zencorners::{Corners, Rect, rounded_rect_path};
//!
//! let path = rounded_rect_path(
//!     Rect::new(0.0, 0.0, 100.0, 50.0),
//!     Corners::TOP_LEFT | Corners::BOTTOM_RIGHT,
//!     10.0,
//! );
//! assert!(path.is_closed());
//! assert_eq!(path.arc_count(), 2);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod builder;
pub mod corners;
pub mod geometry;
pub mod path;
pub mod plan;

#[cfg(feature = "query")]
pub mod query;
#[cfg(feature = "svg")]
pub mod svg;

pub use builder::{RoundedRectPathBuilder, effective_radius, rounded_rect_path};
pub use corners::Corners;
pub use geometry::{Corner, GeometryError, Point, Rect, Size};
pub use path::{Arc, MAX_ELEMENTS, Path, PathEl, PathSink};
pub use plan::{
    BorderStroke, Color, CornerStyle, LineJoin, RoundedCornerPlan, plan_rounded_corners,
};
