// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Grid layout

use super::{Align, Layouter, child_layout_data, child_preferred_size, child_takes_space};
use crate::cast::Conv;
use crate::core::NodeRef;
use crate::geom::{Insets, Offset, Rect, Size};

/// Per-child configuration of a [`GridLayout`]
///
/// A child fills its cell unless clamped by a max size (zero means
/// "unlimited"), in which case it is aligned within the cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayoutData {
    pub max_width: i32,
    pub max_height: i32,
    pub horizontal: Align,
    pub vertical: Align,
}

/// Children set out in a grid with a fixed number of columns
///
/// Cells are filled row by row in child order; there are
/// `ceil(children / columns)` rows. Each column is as wide as its widest
/// child and each row as tall as its tallest child, except stretched columns
/// (rows), which share the space left over by the others evenly. The first
/// stretched column (row) absorbs any remainder of the division, so the
/// columns always exactly fill the target width.
///
/// Children with [`crate::Visibility::Hide`] occupy no cell.
#[derive(Clone, Debug)]
pub struct GridLayout {
    columns: usize,
    column_spacing: i32,
    row_spacing: i32,
    padding: Insets,
    column_stretch: Vec<bool>,
    row_stretch: Vec<bool>,
}

impl GridLayout {
    /// Construct with `columns` columns
    ///
    /// Panics if `columns` is zero.
    pub fn new(columns: usize) -> Self {
        assert!(columns > 0, "GridLayout: columns must be positive");
        GridLayout {
            columns,
            column_spacing: 0,
            row_spacing: 0,
            padding: Insets::ZERO,
            column_stretch: vec![],
            row_stretch: vec![],
        }
    }

    /// Set space between columns and between rows
    #[must_use]
    pub fn with_spacing(mut self, column_spacing: i32, row_spacing: i32) -> Self {
        self.column_spacing = column_spacing;
        self.row_spacing = row_spacing;
        self
    }

    /// Set outer padding
    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Set which columns stretch; missing entries do not
    #[must_use]
    pub fn with_column_stretch(mut self, stretch: impl Into<Vec<bool>>) -> Self {
        self.column_stretch = stretch.into();
        self
    }

    /// Set which rows stretch; missing entries do not
    #[must_use]
    pub fn with_row_stretch(mut self, stretch: impl Into<Vec<bool>>) -> Self {
        self.row_stretch = stretch.into();
        self
    }

    /// Number of columns
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Children in cells, with natural column widths and row heights
    fn solve(&self, children: &[NodeRef]) -> Cells {
        let cells: Vec<(NodeRef, Size)> = children
            .iter()
            .filter(|c| child_takes_space(c))
            .map(|c| (c.clone(), child_preferred_size(c)))
            .collect();

        let columns = self.columns.min(cells.len());
        let rows = cells.len().div_ceil(self.columns);
        let mut widths = vec![0; columns];
        let mut heights = vec![0; rows];
        for (i, (_, size)) in cells.iter().enumerate() {
            let (c, r) = (i % self.columns, i / self.columns);
            widths[c] = widths[c].max(size.0);
            heights[r] = heights[r].max(size.1);
        }

        Cells {
            cells,
            widths,
            heights,
        }
    }
}

struct Cells {
    cells: Vec<(NodeRef, Size)>,
    widths: Vec<i32>,
    heights: Vec<i32>,
}

fn total(lens: &[i32], spacing: i32) -> i32 {
    let gaps = i32::conv(lens.len().saturating_sub(1));
    lens.iter().sum::<i32>() + spacing * gaps
}

/// Share the space left within `target` by non-stretched entries among
/// stretched entries
fn distribute(lens: &mut [i32], stretch: &[bool], target: i32, spacing: i32) {
    let is_stretched = |i: usize| stretch.get(i).copied().unwrap_or(false);
    let n = (0..lens.len()).filter(|i| is_stretched(*i)).count();
    if n == 0 {
        return;
    }

    let fixed: i32 = (0..lens.len())
        .filter(|i| !is_stretched(*i))
        .map(|i| lens[i])
        .sum();
    let gaps = i32::conv(lens.len() - 1);
    let remaining = (target - fixed - spacing * gaps).max(0);

    let n = i32::conv(n);
    let mut extra = remaining % n;
    for i in 0..lens.len() {
        if is_stretched(i) {
            lens[i] = remaining / n + extra;
            extra = 0;
        }
    }
}

fn starts(lens: &[i32], spacing: i32) -> Vec<i32> {
    let mut pos = 0;
    lens.iter()
        .map(|len| {
            let start = pos;
            pos += len + spacing;
            start
        })
        .collect()
}

impl Layouter for GridLayout {
    fn preferred_size(&mut self, children: &[NodeRef]) -> Size {
        let cells = self.solve(children);
        let size = Size(
            total(&cells.widths, self.column_spacing),
            total(&cells.heights, self.row_spacing),
        );
        self.padding.pad(size)
    }

    fn layout(&mut self, children: &[NodeRef], rect: Rect) {
        let Cells {
            cells,
            mut widths,
            mut heights,
        } = self.solve(children);
        if cells.is_empty() {
            return;
        }
        log::trace!("GridLayout::layout: {} cells in {rect:?}", cells.len());

        let inner = self.padding.apply(rect);
        distribute(&mut widths, &self.column_stretch, inner.size.0, self.column_spacing);
        distribute(&mut heights, &self.row_stretch, inner.size.1, self.row_spacing);
        let xs = starts(&widths, self.column_spacing);
        let ys = starts(&heights, self.row_spacing);

        for (i, (child, _)) in cells.iter().enumerate() {
            let (c, r) = (i % self.columns, i / self.columns);
            let cell = Size(widths[c], heights[r]);
            let data = child_layout_data(child).grid();

            let mut size = cell;
            if data.max_width > 0 {
                size.0 = size.0.min(data.max_width);
            }
            if data.max_height > 0 {
                size.1 = size.1.min(data.max_height);
            }
            let pos = inner.pos
                + Offset(
                    xs[c] + data.horizontal.offset(cell.0, size.0),
                    ys[r] + data.vertical.offset(cell.1, size.1),
                );
            super::set_child_location(child, Rect::new(pos, size));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::Scheduler;
    use crate::geom::Coord;
    use crate::layout::test_util::*;

    fn column_widths(children: &[NodeRef], columns: usize) -> Vec<i32> {
        children[..columns].iter().map(|c| rect_of(c).size.0).collect()
    }

    #[test]
    #[should_panic]
    fn zero_columns() {
        let _ = GridLayout::new(0);
    }

    #[test]
    fn natural_sizes() {
        let sched = Scheduler::new();
        let children = vec![
            leaf(&sched, 10, 5),
            leaf(&sched, 20, 8),
            leaf(&sched, 15, 12),
        ];
        let mut grid = GridLayout::new(2)
            .with_spacing(3, 4)
            .with_padding(Insets::splat(1));
        // columns: 15, 20; rows: 8, 12
        assert_eq!(grid.preferred_size(&children), Size(15 + 3 + 20 + 2, 8 + 4 + 12 + 2));

        grid.layout(&children, Rect::new(Coord(10, 10), Size(100, 100)));
        assert_eq!(rect_of(&children[0]), Rect::new(Coord(11, 11), Size(15, 8)));
        assert_eq!(rect_of(&children[1]), Rect::new(Coord(29, 11), Size(20, 8)));
        assert_eq!(rect_of(&children[2]), Rect::new(Coord(11, 23), Size(15, 12)));
    }

    #[test]
    fn stretched_columns_split_evenly() {
        let sched = Scheduler::new();
        let children: Vec<_> = (0..3).map(|_| leaf(&sched, 20, 10)).collect();
        let mut grid = GridLayout::new(3).with_column_stretch([true, false, true]);
        grid.layout(&children, Rect::new(Coord::ZERO, Size(100, 10)));
        assert_eq!(column_widths(&children, 3), vec![40, 20, 40]);
    }

    #[test]
    fn first_stretched_column_takes_remainder() {
        let sched = Scheduler::new();
        let children: Vec<_> = (0..3).map(|_| leaf(&sched, 20, 10)).collect();
        let mut grid = GridLayout::new(3).with_column_stretch([true, false, true]);
        grid.layout(&children, Rect::new(Coord::ZERO, Size(101, 10)));
        assert_eq!(column_widths(&children, 3), vec![41, 20, 40]);
    }

    #[test]
    fn stretch_conserves_width() {
        let sched = Scheduler::new();
        let spacing = 3;
        for width in [90, 97, 100, 131] {
            let children: Vec<_> = (0..8).map(|i| leaf(&sched, 5 + i, 10)).collect();
            let mut grid = GridLayout::new(4)
                .with_spacing(spacing, 0)
                .with_column_stretch([true, true, false, true]);
            grid.layout(&children, Rect::new(Coord::ZERO, Size(width, 20)));
            let sum: i32 = column_widths(&children, 4).iter().sum();
            assert_eq!(sum + spacing * 3, width);
            let last = rect_of(&children[3]);
            assert_eq!(last.pos2().0, width);
        }
    }

    #[test]
    fn stretched_rows() {
        let sched = Scheduler::new();
        let children: Vec<_> = (0..4).map(|_| leaf(&sched, 10, 10)).collect();
        let mut grid = GridLayout::new(2).with_row_stretch([false, true]);
        grid.layout(&children, Rect::new(Coord::ZERO, Size(20, 50)));
        assert_eq!(rect_of(&children[3]), Rect::new(Coord(10, 10), Size(10, 40)));
    }

    #[test]
    fn clamped_child_aligned_in_cell() {
        let sched = Scheduler::new();
        let data = GridLayoutData {
            max_width: 10,
            max_height: 4,
            horizontal: Align::End,
            vertical: Align::Center,
        };
        let children = vec![leaf_with(&sched, 30, 20, data), leaf(&sched, 5, 5)];
        let mut grid = GridLayout::new(1);
        grid.layout(&children, Rect::new(Coord::ZERO, Size(100, 100)));
        assert_eq!(rect_of(&children[0]), Rect::new(Coord(20, 8), Size(10, 4)));
        // unclamped children fill the cell
        assert_eq!(rect_of(&children[1]), Rect::new(Coord(0, 20), Size(30, 5)));
    }

    #[test]
    fn empty() {
        let mut grid = GridLayout::new(3).with_padding(Insets::hv(2, 5));
        assert_eq!(grid.preferred_size(&[]), Size(4, 10));
        grid.layout(&[], Rect::new(Coord::ZERO, Size(10, 10)));
    }
}
