// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Fill layout

use super::{Layouter, child_preferred_size, child_takes_space};
use crate::core::NodeRef;
use crate::geom::{Insets, Rect, Size};

/// A single child filling the padded rect
///
/// Recomputes only when marked dirty or given a new rect.
#[derive(Clone, Debug)]
pub struct FillLayout {
    padding: Insets,
    dirty: bool,
    last_rect: Option<Rect>,
}

impl Default for FillLayout {
    fn default() -> Self {
        FillLayout::new()
    }
}

impl FillLayout {
    /// Construct
    pub fn new() -> Self {
        FillLayout {
            padding: Insets::ZERO,
            dirty: true,
            last_rect: None,
        }
    }

    /// Set outer padding
    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// True until the next [`Layouter::layout`]
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Layouter for FillLayout {
    fn preferred_size(&mut self, children: &[NodeRef]) -> Size {
        let size = match children.first() {
            Some(child) if child_takes_space(child) => child_preferred_size(child),
            _ => Size::ZERO,
        };
        self.padding.pad(size)
    }

    fn layout(&mut self, children: &[NodeRef], rect: Rect) {
        if !self.dirty && self.last_rect == Some(rect) {
            return;
        }
        if let Some(child) = children.first() {
            super::set_child_location(child, self.padding.apply(rect));
        }
        self.dirty = false;
        self.last_rect = Some(rect);
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
