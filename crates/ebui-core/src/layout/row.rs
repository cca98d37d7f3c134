// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Row layout

use super::{Align, Layouter, child_layout_data, child_preferred_size, child_takes_space};
use crate::core::NodeRef;
use crate::dir::Direction;
use crate::geom::{Insets, Offset, Rect, Size};

/// Per-child configuration of a [`RowLayout`]
///
/// Max sizes of zero mean "unlimited".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowLayoutData {
    /// Alignment on the cross axis
    pub position: Align,
    /// Fill the cross axis
    pub stretch: bool,
    pub max_width: i32,
    pub max_height: i32,
}

impl RowLayoutData {
    fn clamp(&self, mut size: Size) -> Size {
        if self.max_width > 0 {
            size.0 = size.0.min(self.max_width);
        }
        if self.max_height > 0 {
            size.1 = size.1.min(self.max_height);
        }
        size
    }
}

/// Children set out back to back along one axis
///
/// Children use their preferred size on the main axis. On the cross axis a
/// child uses its preferred size, or with [`RowLayoutData::stretch`] the
/// available space; max sizes are applied next, then the child is aligned
/// by [`RowLayoutData::position`] within the available space.
///
/// Children with [`crate::Visibility::Hide`] are skipped.
#[derive(Clone, Debug)]
pub struct RowLayout {
    direction: Direction,
    padding: Insets,
    spacing: i32,
    dirty: bool,
    last_rect: Option<Rect>,
}

impl Default for RowLayout {
    fn default() -> Self {
        RowLayout::new(Direction::Horizontal)
    }
}

impl RowLayout {
    /// Construct
    pub fn new(direction: Direction) -> Self {
        RowLayout {
            direction,
            padding: Insets::ZERO,
            spacing: 0,
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

    /// Set space between children
    #[must_use]
    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Main axis
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// True until the next [`Layouter::layout`]
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Layouter for RowLayout {
    fn preferred_size(&mut self, children: &[NodeRef]) -> Size {
        let (main, cross) = (self.direction, self.direction.flipped());
        let mut size = Size::ZERO;
        let mut n = 0;
        for child in children.iter().filter(|c| child_takes_space(c)) {
            let child_size = child_layout_data(child)
                .row()
                .clamp(child_preferred_size(child));
            size.set_component(main, size.extract(main) + child_size.extract(main));
            size.set_component(cross, size.extract(cross).max(child_size.extract(cross)));
            n += 1;
        }
        if n > 1 {
            size.set_component(main, size.extract(main) + self.spacing * (n - 1));
        }
        self.padding.pad(size)
    }

    fn layout(&mut self, children: &[NodeRef], rect: Rect) {
        if !self.dirty && self.last_rect == Some(rect) {
            return;
        }
        log::trace!("RowLayout::layout: {} children in {rect:?}", children.len());

        let (main, cross) = (self.direction, self.direction.flipped());
        let inner = self.padding.apply(rect);
        let cross_space = inner.size.extract(cross);
        let mut pos = 0;
        for child in children.iter().filter(|c| child_takes_space(c)) {
            let data = child_layout_data(child).row();
            let mut size = child_preferred_size(child);
            if data.stretch {
                size.set_component(cross, cross_space);
            }
            let size = data.clamp(size);

            let mut offset = Offset::ZERO;
            offset.set_component(main, pos);
            offset.set_component(cross, data.position.offset(cross_space, size.extract(cross)));
            super::set_child_location(child, Rect::new(inner.pos + offset, size));

            pos += size.extract(main) + self.spacing;
        }

        self.dirty = false;
        self.last_rect = Some(rect);
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::Scheduler;
    use crate::geom::Coord;
    use crate::layout::GridLayoutData;
    use crate::layout::test_util::*;

    #[test]
    fn horizontal_with_spacing_and_padding() {
        let sched = Scheduler::new();
        let children = vec![leaf(&sched, 10, 20), leaf(&sched, 30, 5)];
        let mut row = RowLayout::new(Direction::Horizontal)
            .with_padding(Insets::splat(2))
            .with_spacing(4);

        assert_eq!(row.preferred_size(&children), Size(10 + 4 + 30 + 4, 20 + 4));

        row.layout(&children, Rect::new(Coord(100, 100), Size(200, 50)));
        assert_eq!(rect_of(&children[0]), Rect::new(Coord(102, 102), Size(10, 20)));
        assert_eq!(rect_of(&children[1]), Rect::new(Coord(116, 102), Size(30, 5)));
    }

    #[test]
    fn vertical() {
        let sched = Scheduler::new();
        let children = vec![leaf(&sched, 10, 20), leaf(&sched, 30, 5)];
        let mut row = RowLayout::new(Direction::Vertical).with_spacing(1);
        assert_eq!(row.preferred_size(&children), Size(30, 26));
        row.layout(&children, Rect::new(Coord::ZERO, Size(30, 26)));
        assert_eq!(rect_of(&children[1]).pos, Coord(0, 21));
    }

    #[test]
    fn single_child_padding() {
        let sched = Scheduler::new();
        let children = vec![leaf(&sched, 17, 9)];
        let padding = Insets {
            top: 1,
            left: 2,
            right: 3,
            bottom: 4,
        };
        let mut row = RowLayout::new(Direction::Horizontal).with_padding(padding);
        assert_eq!(row.preferred_size(&children), Size(17 + padding.dx(), 9 + padding.dy()));
    }

    #[test]
    fn empty() {
        let mut row = RowLayout::default().with_padding(Insets::splat(3));
        assert_eq!(row.preferred_size(&[]), Size(6, 6));
        row.layout(&[], Rect::new(Coord::ZERO, Size(10, 10)));
    }

    #[test]
    fn stretch_clamped_then_centered() {
        let sched = Scheduler::new();
        let data = RowLayoutData {
            position: Align::Center,
            stretch: true,
            max_width: 50,
            max_height: 30,
        };
        let children = vec![leaf_with(&sched, 80, 20, data)];
        let mut row = RowLayout::new(Direction::Horizontal);
        row.layout(&children, Rect::new(Coord::ZERO, Size(200, 100)));

        let r = rect_of(&children[0]);
        assert_eq!(r.size, Size(50, 30));
        assert_eq!(r.pos, Coord(0, 35));
    }

    #[test]
    fn stretch_fills_cross_axis() {
        let sched = Scheduler::new();
        let data = RowLayoutData {
            stretch: true,
            ..Default::default()
        };
        let children = vec![leaf_with(&sched, 10, 10, data)];
        let mut row = RowLayout::new(Direction::Vertical);
        row.layout(&children, Rect::new(Coord::ZERO, Size(40, 100)));
        assert_eq!(rect_of(&children[0]).size, Size(40, 10));
    }

    #[test]
    fn foreign_layout_data_uses_defaults() {
        let sched = Scheduler::new();
        let data = GridLayoutData {
            max_width: 1,
            ..Default::default()
        };
        let children = vec![leaf_with(&sched, 10, 10, data)];
        let mut row = RowLayout::default();
        row.layout(&children, Rect::new(Coord::ZERO, Size(40, 40)));
        assert_eq!(rect_of(&children[0]), Rect::new(Coord::ZERO, Size(10, 10)));
    }

    #[test]
    fn hidden_children_are_skipped() {
        let sched = Scheduler::new();
        let children = vec![leaf(&sched, 10, 10), leaf(&sched, 10, 10), leaf(&sched, 10, 10)];
        children[1].borrow_mut().widget_mut().visibility = crate::Visibility::Hide;
        let mut row = RowLayout::default();
        assert_eq!(row.preferred_size(&children), Size(20, 10));
        row.layout(&children, Rect::new(Coord::ZERO, Size(20, 10)));
        assert_eq!(rect_of(&children[2]).pos, Coord(10, 0));
    }

    #[test]
    fn clean_layout_is_skipped() {
        let sched = Scheduler::new();
        let children = vec![leaf(&sched, 10, 10)];
        let mut row = RowLayout::default();
        let rect = Rect::new(Coord::ZERO, Size(40, 40));

        row.layout(&children, rect);
        let first = rect_of(&children[0]);
        row.layout(&children, rect);
        assert_eq!(located_count(&children[0]), 1);
        assert_eq!(rect_of(&children[0]), first);

        row.mark_dirty();
        row.layout(&children, rect);
        assert_eq!(located_count(&children[0]), 2);
        assert_eq!(rect_of(&children[0]), first);
    }
}
