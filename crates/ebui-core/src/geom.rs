// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Geometry data types
//!
//! [`Coord`], [`Size`] and [`Offset`] are all 2D integer (`i32`) types,
//! representing positions, sizes and relative positions respectively.
//! [`Rect`] combines a position with a size and [`Insets`] describes padding
//! around a rect.

use crate::dir::Direction;
use std::ops::{Add, Sub};

macro_rules! pair_type {
    ($T:ident) => {
        impl $T {
            /// Both components zero
            pub const ZERO: $T = $T(0, 0);

            /// Componentwise maximum
            #[inline]
            #[must_use]
            pub fn max(self, other: $T) -> $T {
                $T(self.0.max(other.0), self.1.max(other.1))
            }

            /// The component along `dir`
            #[inline]
            pub fn extract(self, dir: Direction) -> i32 {
                if dir.is_vertical() { self.1 } else { self.0 }
            }

            /// Replace the component along `dir`
            #[inline]
            pub fn set_component(&mut self, dir: Direction, value: i32) {
                if dir.is_vertical() {
                    self.1 = value;
                } else {
                    self.0 = value;
                }
            }
        }
    };
}

/// An absolute position in screen space
///
/// Subtracting two positions yields an [`Offset`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord(pub i32, pub i32);

/// A width and height
///
/// Expected to be non-negative. Subtraction saturates at zero.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size(pub i32, pub i32);

/// A relative position; may be negative
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset(pub i32, pub i32);

pair_type!(Coord);
pair_type!(Size);
pair_type!(Offset);

impl Size {
    /// True unless both components are positive
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 <= 0 || self.1 <= 0
    }
}

impl Sub for Coord {
    type Output = Offset;

    #[inline]
    fn sub(self, rhs: Coord) -> Offset {
        Offset(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Add<Offset> for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Offset) -> Coord {
        Coord(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Add<Size> for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Size) -> Coord {
        Coord(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Add for Size {
    type Output = Size;

    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for Size {
    type Output = Size;

    /// Saturating: `Size(3, 8) - Size(5, 5) == Size(0, 3)`
    #[inline]
    fn sub(self, rhs: Size) -> Size {
        Size(self.0 - rhs.0, self.1 - rhs.1).max(Size::ZERO)
    }
}

/// An axis-aligned rectangle: a position plus a size
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub pos: Coord,
    pub size: Size,
}

impl Rect {
    /// Zero position and size
    pub const ZERO: Rect = Rect::new(Coord::ZERO, Size::ZERO);

    #[inline]
    pub const fn new(pos: Coord, size: Size) -> Self {
        Rect { pos, size }
    }

    /// Construct from the top-left and bottom-right (exclusive) corners
    #[inline]
    pub fn from_coords(pos: Coord, pos2: Coord) -> Self {
        debug_assert!(pos2.0 >= pos.0 && pos2.1 >= pos.1);
        let Offset(w, h) = pos2 - pos;
        Rect::new(pos, Size(w, h))
    }

    /// The bottom-right corner (exclusive)
    #[inline]
    pub fn pos2(&self) -> Coord {
        self.pos + self.size
    }

    /// Whether `c` lies inside; the far edges are exclusive
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        let end = self.pos2();
        (self.pos.0..end.0).contains(&c.0) && (self.pos.1..end.1).contains(&c.1)
    }
}

/// Padding around the content of a rect
///
/// Used by layouts for the space between a container's edge and its
/// children.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    /// Zero-sized insets
    pub const ZERO: Insets = Insets::splat(0);

    /// Insets with equal size on each edge
    #[inline]
    pub const fn splat(n: i32) -> Self {
        Insets::hv(n, n)
    }

    /// Insets via horizontal and vertical sizes
    #[inline]
    pub const fn hv(h: i32, v: i32) -> Self {
        Insets {
            top: v,
            left: h,
            right: h,
            bottom: v,
        }
    }

    /// Sum of horizontal insets
    #[inline]
    pub fn dx(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of vertical insets
    #[inline]
    pub fn dy(&self) -> i32 {
        self.top + self.bottom
    }

    /// Shrink `rect` by these insets
    ///
    /// The result never has negative size.
    pub fn apply(&self, rect: Rect) -> Rect {
        let pos = rect.pos + Offset(self.left, self.top);
        let size = rect.size - Size(self.dx(), self.dy());
        Rect { pos, size }
    }

    /// Pad a size with these insets
    pub fn pad(&self, size: Size) -> Size {
        Size(size.0 + self.dx(), size.1 + self.dy())
    }
}
