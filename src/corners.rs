//! Corner selection: which corners of a rectangle receive rounding.

use core::ops::{BitAnd, BitOr, BitOrAssign, Not};

use crate::geometry::Corner;

/// A set of rectangle corners.
///
/// Bit layout is stable and matches the common image-transform convention:
///
/// ```text
///     TOP_LEFT = 1 ┌──────┐ TOP_RIGHT = 2
///                  │      │
///  BOTTOM_LEFT = 4 └──────┘ BOTTOM_RIGHT = 8
/// ```
///
/// ```
/// use zencorners::{Corner, Corners};
///
/// let diagonal = Corners::TOP_LEFT | Corners::BOTTOM_RIGHT;
/// assert!(diagonal.contains(Corner::TopLeft));
/// assert!(!diagonal.contains(Corner::TopRight));
/// assert_eq!(!diagonal, Corners::TOP_RIGHT | Corners::BOTTOM_LEFT);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Corners {
    bits: u8,
}

impl Corners {
    /// No corners: a plain rectangle.
    pub const NONE: Self = Self { bits: 0 };
    pub const TOP_LEFT: Self = Self { bits: 1 };
    pub const TOP_RIGHT: Self = Self { bits: 1 << 1 };
    pub const BOTTOM_LEFT: Self = Self { bits: 1 << 2 };
    pub const BOTTOM_RIGHT: Self = Self { bits: 1 << 3 };
    /// Both top corners.
    pub const TOP: Self = Self { bits: 1 | 1 << 1 };
    /// Both bottom corners.
    pub const BOTTOM: Self = Self {
        bits: 1 << 2 | 1 << 3,
    };
    /// Both left corners.
    pub const LEFT: Self = Self { bits: 1 | 1 << 2 };
    /// Both right corners.
    pub const RIGHT: Self = Self {
        bits: 1 << 1 | 1 << 3,
    };
    /// Every corner.
    pub const ALL: Self = Self { bits: 0b1111 };

    /// Build from raw bits. Bits above the low four are ignored, so an
    /// all-ones mask (as some platforms use for "all corners") maps to [`ALL`](Self::ALL).
    pub const fn from_bits_truncate(bits: u64) -> Self {
        Self {
            bits: (bits & 0b1111) as u8,
        }
    }

    /// Raw bit representation.
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// The single-corner set for `corner`.
    pub const fn of(corner: Corner) -> Self {
        match corner {
            Corner::TopLeft => Self::TOP_LEFT,
            Corner::TopRight => Self::TOP_RIGHT,
            Corner::BottomLeft => Self::BOTTOM_LEFT,
            Corner::BottomRight => Self::BOTTOM_RIGHT,
        }
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub const fn is_all(self) -> bool {
        self.bits == Self::ALL.bits
    }

    pub const fn contains(self, corner: Corner) -> bool {
        self.bits & Self::of(corner).bits != 0
    }

    /// Whether every corner in `other` is also in `self`.
    pub const fn contains_all(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }

    pub fn insert(&mut self, corner: Corner) {
        self.bits |= Self::of(corner).bits;
    }

    pub fn remove(&mut self, corner: Corner) {
        self.bits &= !Self::of(corner).bits;
    }

    /// Number of selected corners.
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Selected corners in outline traversal order (clockwise from top-left).
    pub fn iter(self) -> impl Iterator<Item = Corner> {
        Corner::CLOCKWISE
            .into_iter()
            .filter(move |&c| self.contains(c))
    }
}

impl BitOr for Corners {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitOrAssign for Corners {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl BitAnd for Corners {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & rhs.bits,
        }
    }
}

impl Not for Corners {
    type Output = Self;
    fn not(self) -> Self {
        Self {
            bits: !self.bits & Self::ALL.bits,
        }
    }
}

impl From<Corner> for Corners {
    fn from(corner: Corner) -> Self {
        Self::of(corner)
    }
}

impl FromIterator<Corner> for Corners {
    fn from_iter<I: IntoIterator<Item = Corner>>(iter: I) -> Self {
        let mut set = Self::NONE;
        for c in iter {
            set.insert(c);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_values_are_stable() {
        assert_eq!(Corners::TOP_LEFT.bits(), 1);
        assert_eq!(Corners::TOP_RIGHT.bits(), 2);
        assert_eq!(Corners::BOTTOM_LEFT.bits(), 4);
        assert_eq!(Corners::BOTTOM_RIGHT.bits(), 8);
        assert_eq!(Corners::ALL.bits(), 15);
    }

    #[test]
    fn all_ones_mask_is_all_corners() {
        assert_eq!(Corners::from_bits_truncate(u64::MAX), Corners::ALL);
        assert_eq!(Corners::from_bits_truncate(0x10), Corners::NONE);
    }

    #[test]
    fn edge_groups() {
        assert_eq!(Corners::TOP, Corners::TOP_LEFT | Corners::TOP_RIGHT);
        assert_eq!(Corners::BOTTOM, Corners::BOTTOM_LEFT | Corners::BOTTOM_RIGHT);
        assert_eq!(Corners::LEFT | Corners::RIGHT, Corners::ALL);
        assert_eq!(Corners::TOP & Corners::LEFT, Corners::TOP_LEFT);
    }

    #[test]
    fn complement_stays_in_range() {
        assert_eq!(!Corners::NONE, Corners::ALL);
        assert_eq!(!Corners::ALL, Corners::NONE);
        assert_eq!(!Corners::TOP, Corners::BOTTOM);
    }

    #[test]
    fn insert_remove() {
        let mut c = Corners::NONE;
        c.insert(Corner::BottomRight);
        c.insert(Corner::TopLeft);
        assert_eq!(c.len(), 2);
        c.remove(Corner::TopLeft);
        assert_eq!(c, Corners::BOTTOM_RIGHT);
        c.remove(Corner::TopLeft);
        assert_eq!(c, Corners::BOTTOM_RIGHT);
    }

    #[test]
    fn iter_is_clockwise() {
        let got: [Option<Corner>; 4] = {
            let mut it = Corners::ALL.iter();
            [it.next(), it.next(), it.next(), it.next()]
        };
        assert_eq!(
            got,
            [
                Some(Corner::TopLeft),
                Some(Corner::TopRight),
                Some(Corner::BottomRight),
                Some(Corner::BottomLeft),
            ]
        );
    }

    #[test]
    fn collect_from_corners() {
        let c: Corners = [Corner::TopRight, Corner::BottomLeft].into_iter().collect();
        assert_eq!(c, Corners::TOP_RIGHT | Corners::BOTTOM_LEFT);
        assert!(c.contains_all(Corners::TOP_RIGHT));
        assert!(!c.contains_all(Corners::TOP));
    }
}
