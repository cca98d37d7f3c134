// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Layout algorithms
//!
//! A [`Layouter`] computes geometry for the children of one
//! [`crate::Container`]:
//!
//! -   [`Layouter::preferred_size`] computes the container's natural size
//!     from its children's preferred sizes
//! -   [`Layouter::layout`] assigns each child a rect within a target rect
//!
//! Both must be idempotent given the same children (order, layout data and
//! preferred sizes) and the same target rect. `layout` modifies nothing
//! but each child's rect (and the layouter's own dirty flag, where it keeps
//! one).
//!
//! Each child's configuration is read from [`crate::Widget::layout_data`].
//! A layout reads only its own variant of [`LayoutData`]; any other variant
//! means "no layout data" and yields that layout's defaults.
//!
//! All layouts handle zero children: the preferred size is the padding and
//! `layout` does nothing.

mod align;
mod anchor;
mod fill;
mod grid;
mod row;
mod stacked;

pub use align::Align;
pub use anchor::{AnchorLayout, AnchorLayoutData};
pub use fill::FillLayout;
pub use grid::{GridLayout, GridLayoutData};
pub use row::{RowLayout, RowLayoutData};
pub use stacked::StackedLayout;

use crate::core::{NodeRef, Visibility};
use crate::geom::{Rect, Size};
use std::fmt;

/// Per-child layout configuration
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutData {
    /// No configuration: every layout uses its defaults
    #[default]
    None,
    Row(RowLayoutData),
    Grid(GridLayoutData),
    Anchor(AnchorLayoutData),
}

impl From<RowLayoutData> for LayoutData {
    fn from(data: RowLayoutData) -> Self {
        LayoutData::Row(data)
    }
}

impl From<GridLayoutData> for LayoutData {
    fn from(data: GridLayoutData) -> Self {
        LayoutData::Grid(data)
    }
}

impl From<AnchorLayoutData> for LayoutData {
    fn from(data: AnchorLayoutData) -> Self {
        LayoutData::Anchor(data)
    }
}

impl LayoutData {
    /// Row data, or defaults
    pub fn row(&self) -> RowLayoutData {
        match self {
            LayoutData::Row(data) => *data,
            _ => RowLayoutData::default(),
        }
    }

    /// Grid data, or defaults
    pub fn grid(&self) -> GridLayoutData {
        match self {
            LayoutData::Grid(data) => *data,
            _ => GridLayoutData::default(),
        }
    }

    /// Anchor data, or defaults
    pub fn anchor(&self) -> AnchorLayoutData {
        match self {
            LayoutData::Anchor(data) => *data,
            _ => AnchorLayoutData::default(),
        }
    }
}

/// A layout algorithm
pub trait Layouter: fmt::Debug {
    /// Natural size of the container, including padding
    fn preferred_size(&mut self, children: &[NodeRef]) -> Size;

    /// Assign each child a rect within `rect`
    fn layout(&mut self, children: &[NodeRef], rect: Rect);

    /// Forget cached results
    ///
    /// Called whenever the owning container becomes dirty. Layouts without
    /// a cache need not implement this.
    fn mark_dirty(&mut self) {}
}

/// Preferred size of `child` with its minimum size applied
pub fn child_preferred_size(child: &NodeRef) -> Size {
    let mut node = child.borrow_mut();
    let min_size = node.widget().min_size;
    node.preferred_size().max(min_size)
}

/// Layout data of `child`
pub fn child_layout_data(child: &NodeRef) -> LayoutData {
    child.borrow().widget().layout_data
}

/// Whether `child` takes up layout space
pub fn child_takes_space(child: &NodeRef) -> bool {
    child.borrow().widget().visibility.takes_space()
}

/// Visibility of `child`
pub fn child_visibility(child: &NodeRef) -> Visibility {
    child.borrow().widget().visibility
}

/// Assign `rect` to `child`
pub fn set_child_location(child: &NodeRef, rect: Rect) {
    child.borrow_mut().set_location(rect);
}
