// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Alignment types

/// Alignment along one axis
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// Align to top or left
    #[default]
    Start,
    /// Align to center
    Center,
    /// Align to bottom or right
    End,
}

impl Align {
    /// Offset of an item of length `len` within `space`
    ///
    /// May be negative where `len > space`.
    #[inline]
    pub fn offset(self, space: i32, len: i32) -> i32 {
        match self {
            Align::Start => 0,
            Align::Center => (space - len) / 2,
            Align::End => space - len,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn offsets() {
        assert_eq!(Align::Start.offset(10, 4), 0);
        assert_eq!(Align::Center.offset(10, 4), 3);
        assert_eq!(Align::End.offset(10, 4), 6);
        assert_eq!(Align::End.offset(4, 10), -6);
    }
}
