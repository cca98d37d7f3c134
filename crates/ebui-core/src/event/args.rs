// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Payloads of widget events

use crate::WidgetRef;
use crate::geom::{Coord, Offset};
use crate::input::MouseButton;
use crate::window::Window;

/// Payload: cursor entered or exited a widget
#[derive(Clone, Debug)]
pub struct WidgetCursorArgs {
    pub widget: WidgetRef,
}

/// Payload: mouse button pressed, released or clicked on a widget
#[derive(Clone, Debug)]
pub struct WidgetMouseButtonArgs {
    pub widget: WidgetRef,
    pub button: MouseButton,
    /// Cursor position relative to the widget's rect
    pub offset: Offset,
    /// Whether the cursor is inside the widget
    ///
    /// Always true for presses and clicks. A release may happen outside.
    pub inside: bool,
}

/// Payload: mouse wheel scrolled over a widget
#[derive(Clone, Debug)]
pub struct WidgetScrolledArgs {
    pub widget: WidgetRef,
    pub x: f64,
    pub y: f64,
}

/// Payload: focus request
///
/// `widget: None` with `focused: false` means focus moved to "nothing"
/// (a click landed on a widget which cannot take focus).
#[derive(Clone, Debug)]
pub struct WidgetFocusArgs {
    pub widget: Option<WidgetRef>,
    pub focused: bool,
    pub location: Coord,
}

/// Payload: request to open a widget's context menu
#[derive(Clone, Debug)]
pub struct WidgetContextMenuArgs {
    pub widget: WidgetRef,
    pub location: Coord,
}

/// Kinds of popup window anchored to a widget
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PopupKind {
    ToolTip,
    DragAndDrop,
    ContextMenu,
}

impl PopupKind {
    pub(crate) const ALL: [PopupKind; 3] =
        [PopupKind::ToolTip, PopupKind::DragAndDrop, PopupKind::ContextMenu];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Payload: a popup window anchored to a widget was shown or hidden
#[derive(Clone, Debug)]
pub struct WidgetPopupArgs {
    pub widget: WidgetRef,
    pub kind: PopupKind,
    pub window: Window,
    pub show: bool,
}
