// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Anchor layout

use super::{Align, Layouter, child_layout_data, child_preferred_size, child_takes_space};
use crate::core::NodeRef;
use crate::geom::{Insets, Offset, Rect, Size};

/// Configuration of the child of an [`AnchorLayout`]
///
/// Defaults to top-left without stretch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorLayoutData {
    pub horizontal: Align,
    pub vertical: Align,
    pub stretch_horizontal: bool,
    pub stretch_vertical: bool,
}

/// A single child anchored within the padded rect
///
/// Only the first child is positioned; further children are ignored. This
/// is intended for single-child overlay containers.
#[derive(Clone, Debug, Default)]
pub struct AnchorLayout {
    padding: Insets,
}

impl AnchorLayout {
    /// Construct
    pub fn new() -> Self {
        AnchorLayout::default()
    }

    /// Set outer padding
    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }
}

impl Layouter for AnchorLayout {
    fn preferred_size(&mut self, children: &[NodeRef]) -> Size {
        let size = match children.first() {
            Some(child) if child_takes_space(child) => child_preferred_size(child),
            _ => Size::ZERO,
        };
        self.padding.pad(size)
    }

    fn layout(&mut self, children: &[NodeRef], rect: Rect) {
        let Some(child) = children.first().filter(|c| child_takes_space(c)) else {
            return;
        };

        let inner = self.padding.apply(rect);
        let data = child_layout_data(child).anchor();
        let mut size = child_preferred_size(child);
        if data.stretch_horizontal {
            size.0 = inner.size.0;
        }
        if data.stretch_vertical {
            size.1 = inner.size.1;
        }
        let offset = Offset(
            data.horizontal.offset(inner.size.0, size.0),
            data.vertical.offset(inner.size.1, size.1),
        );
        super::set_child_location(child, Rect::new(inner.pos + offset, size));
    }
}
