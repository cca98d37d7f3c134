// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Utilities

use crate::core::Node;
use crate::geom::Coord;
use std::fmt;

/// Display adapter printing a node and its descendants, one per line
///
/// Each line shows the node's name and rect, indented by depth. The output
/// starts with a line break, for use after a log prefix.
pub struct WidgetHierarchy<'a> {
    node: &'a dyn Node,
    depth: usize,
}

impl<'a> WidgetHierarchy<'a> {
    pub fn new(node: &'a dyn Node) -> Self {
        WidgetHierarchy { node, depth: 0 }
    }
}

impl fmt::Display for WidgetHierarchy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rect = self.node.widget().rect();
        let (Coord(x0, y0), Coord(x1, y1)) = (rect.pos, rect.pos2());
        let name = format!("{}{}", "| ".repeat(self.depth), self.node.identify());
        let xs = format!("x={x0}..{x1}");
        write!(f, "\n{name:<40} {xs:<14} y={y0}..{y1}")?;

        let Some(container) = self.node.as_container() else {
            return Ok(());
        };
        for child in container.children() {
            let child = child.borrow();
            let nested = WidgetHierarchy {
                node: &*child,
                depth: self.depth + 1,
            };
            write!(f, "{nested}")?;
        }
        Ok(())
    }
}

/// Step through `len` items, returning the next index
///
/// From `None`, starts at the first item (the last if `reverse`). Returns
/// `None` when stepping off either end, or if there are no items.
pub fn nav_next(reverse: bool, from: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match (from, reverse) {
        (None, false) => Some(0),
        (None, true) => Some(len - 1),
        (Some(i), false) => Some(i + 1).filter(|&next| next < len),
        (Some(i), true) => i.checked_sub(1),
    }
}

/// Log `error` and its chain of sources as warnings
pub fn warn_about_error(context: &str, error: &dyn std::error::Error) {
    log::warn!("{context}: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        log::warn!("  caused by: {cause}");
        source = cause.source();
    }
}
