// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Stacked layout

use super::{Layouter, child_preferred_size, child_takes_space};
use crate::core::NodeRef;
use crate::geom::{Insets, Rect, Size};

/// Every child placed over the same padded rect
///
/// For overlapping widgets, e.g. a label drawn over a progress bar. Later
/// children draw on top.
#[derive(Clone, Debug, Default)]
pub struct StackedLayout {
    padding: Insets,
}

impl StackedLayout {
    /// Construct
    pub fn new() -> Self {
        StackedLayout::default()
    }

    /// Set outer padding
    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }
}

impl Layouter for StackedLayout {
    fn preferred_size(&mut self, children: &[NodeRef]) -> Size {
        let size = children
            .iter()
            .filter(|c| child_takes_space(c))
            .map(child_preferred_size)
            .fold(Size::ZERO, Size::max);
        self.padding.pad(size)
    }

    fn layout(&mut self, children: &[NodeRef], rect: Rect) {
        let inner = self.padding.apply(rect);
        for child in children {
            super::set_child_location(child, inner);
        }
    }
}
