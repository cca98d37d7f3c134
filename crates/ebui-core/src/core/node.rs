// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The `Node` trait and tree handles

use super::Widget;
use crate::Container;
use crate::geom::{Rect, Size};
use crate::input::LayerCx;
use crate::render::RenderCx;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Preferred size of a node which does not compute one
pub const DEFAULT_PREFERRED_SIZE: Size = Size(50, 50);

/// Shared handle to a node in the tree
pub type NodeRef = Rc<RefCell<dyn Node>>;

/// Compare two node handles by address
#[inline]
pub fn node_eq(a: &NodeRef, b: &NodeRef) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// A widget participating in a [`Container`]
///
/// Every concrete widget embeds a [`Widget`] (base state) and implements this
/// trait. Only [`Node::widget`] and [`Node::widget_mut`] are required; every
/// other method has a default suited to a simple leaf.
///
/// Optional capabilities (focus, drop target, nested container) are exposed
/// through the `as_*` methods rather than by matching on concrete types.
pub trait Node: Any {
    /// Base state
    fn widget(&self) -> &Widget;

    /// Base state, mutable
    fn widget_mut(&mut self) -> &mut Widget;

    /// Natural size, before the [`Widget::min_size`] floor
    ///
    /// Defaults to [`DEFAULT_PREFERRED_SIZE`].
    fn preferred_size(&mut self) -> Size {
        DEFAULT_PREFERRED_SIZE
    }

    /// Assign geometry
    ///
    /// Called by layouts. The default stores `rect` in the base state.
    fn set_location(&mut self, rect: Rect) {
        self.widget_mut().set_rect(rect);
    }

    /// Render for this frame
    ///
    /// Must be called once per frame while the widget is shown: this is
    /// where the base state derives hover, press, scroll and focus events.
    /// The default does only that.
    fn render(&mut self, cx: &mut RenderCx) {
        self.widget_mut().render(cx);
    }

    /// Input-layer setup pass
    ///
    /// Widgets needing their own [`crate::input::InputLayer`] call
    /// [`Widget::elevate_to_new_input_layer`] here. Default: nothing.
    fn setup_input_layer(&mut self, cx: &mut LayerCx) {
        let _ = cx;
    }

    /// Invalidate cached layout
    ///
    /// Containers mark themselves and their descendants dirty. Default: nothing.
    fn request_relayout(&mut self) {}

    /// Name used in debug output
    fn identify(&self) -> &'static str {
        let name = std::any::type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }

    /// Access as a container, if this node has children
    fn as_container(&self) -> Option<&Container> {
        None
    }

    /// Access as a container, if this node has children
    fn as_container_mut(&mut self) -> Option<&mut Container> {
        None
    }

    /// Access focus capability
    fn as_focuser(&self) -> Option<&dyn Focuser> {
        None
    }

    /// Access focus capability
    fn as_focuser_mut(&mut self) -> Option<&mut dyn Focuser> {
        None
    }

    /// Access drop-target capability
    fn as_drop_target(&self) -> Option<&dyn DropTarget> {
        None
    }
}

/// Capability: the widget can take keyboard focus
pub trait Focuser {
    /// Gain or lose focus
    fn focus(&mut self, focused: bool);

    /// Whether the widget currently has focus
    fn is_focused(&self) -> bool;

    /// Position in tab order; negative values are skipped
    fn tab_order(&self) -> i32 {
        0
    }
}

/// Capability: the widget accepts drag-and-drop payloads
pub trait DropTarget {
    /// Whether a drop of `data` would be accepted
    fn accepts_drop(&self, data: &dyn Any) -> bool;
}

/// Weak reference to a node
///
/// Event payloads carry this rather than the base [`Widget`], so handlers
/// reach the concrete widget type. A detached reference (e.g. for a node
/// never added to a container) never upgrades.
#[derive(Clone, Default)]
pub struct WidgetRef(Option<Weak<RefCell<dyn Node>>>);

impl WidgetRef {
    /// Reference `node`
    pub fn new(node: &NodeRef) -> Self {
        WidgetRef(Some(Rc::downgrade(node)))
    }

    /// A reference to nothing
    pub const fn detached() -> Self {
        WidgetRef(None)
    }

    /// True if this never referenced a node
    pub fn is_detached(&self) -> bool {
        self.0.is_none()
    }

    /// Get the node, if still alive
    pub fn upgrade(&self) -> Option<NodeRef> {
        self.0.as_ref().and_then(Weak::upgrade)
    }

    /// True if `self` references `node`
    pub fn refers_to(&self, node: &NodeRef) -> bool {
        match &self.0 {
            Some(weak) => std::ptr::addr_eq(weak.as_ptr(), Rc::as_ptr(node)),
            None => false,
        }
    }

    /// True if both reference the same node
    pub fn ptr_eq(&self, other: &WidgetRef) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => std::ptr::addr_eq(a.as_ptr(), b.as_ptr()),
            _ => false,
        }
    }
}

impl fmt::Debug for WidgetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => f.write_str("WidgetRef(detached)"),
            Some(weak) => write!(f, "WidgetRef({:p})", weak.as_ptr()),
        }
    }
}
