// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Direction types

/// Main axis of a row layout
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Left to right
    #[default]
    Horizontal = 0,
    /// Top to bottom
    Vertical = 1,
}

impl Direction {
    /// The other axis
    #[inline]
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    /// True for [`Direction::Vertical`]
    #[inline]
    pub fn is_vertical(self) -> bool {
        self == Direction::Vertical
    }

    /// True for [`Direction::Horizontal`]
    #[inline]
    pub fn is_horizontal(self) -> bool {
        self == Direction::Horizontal
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flipped() {
        assert_eq!(Direction::Horizontal.flipped(), Direction::Vertical);
        assert_eq!(Direction::Vertical.flipped(), Direction::Horizontal);
        assert!(Direction::default().is_horizontal());
        assert_eq!(std::mem::size_of::<Direction>(), 1);
    }
}
