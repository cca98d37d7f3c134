// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Widget base state

use super::{NodeRef, WidgetRef};
use crate::event::*;
use crate::geom::{Coord, Rect, Size};
use crate::input::{InputLayer, LayerCx, LayerEventTypes, LayerStack, MouseButton};
use crate::layout::LayoutData;
use crate::render::RenderCx;
use crate::window::Window;
use smallvec::SmallVec;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Visibility of a widget
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    /// Drawn and interactive
    #[default]
    Show,
    /// Not drawn, not interactive, but still takes up layout space
    HideBlocking,
    /// Not drawn, not interactive and takes no layout space
    Hide,
}

impl Visibility {
    /// True unless [`Visibility::Show`]
    #[inline]
    pub fn is_hidden(self) -> bool {
        self != Visibility::Show
    }

    /// True unless [`Visibility::Hide`]
    #[inline]
    pub fn takes_space(self) -> bool {
        self != Visibility::Hide
    }
}

/// Links to the parent and own input layer
///
/// Kept outside the node's `RefCell` so that a widget can resolve its
/// effective layer while its ancestors are mutably borrowed (during render).
#[derive(Default)]
struct Link {
    parent: RefCell<Weak<Link>>,
    layer: RefCell<Option<InputLayer>>,
}

impl Link {
    fn effective_layer(&self) -> Option<InputLayer> {
        if let Some(layer) = self.layer.borrow().as_ref() {
            if layer.is_valid() {
                return Some(layer.clone());
            }
        }
        self.parent.borrow().upgrade().and_then(|p| p.effective_layer())
    }
}

/// Events of a [`Widget`]
///
/// Context-menu, focus, tool-tip and drag-and-drop events of a child are
/// re-fired on its container's events, so a handler on the root sees those of
/// every descendant.
#[derive(Debug)]
pub struct WidgetEvents {
    pub cursor_enter: Event<WidgetCursorArgs>,
    pub cursor_exit: Event<WidgetCursorArgs>,
    pub mouse_button_pressed: Event<WidgetMouseButtonArgs>,
    pub mouse_button_released: Event<WidgetMouseButtonArgs>,
    pub mouse_button_clicked: Event<WidgetMouseButtonArgs>,
    pub scrolled: Event<WidgetScrolledArgs>,
    pub focus: Event<WidgetFocusArgs>,
    pub context_menu: Event<WidgetContextMenuArgs>,
    pub tool_tip: Event<WidgetPopupArgs>,
    pub drag_and_drop: Event<WidgetPopupArgs>,
}

impl WidgetEvents {
    fn new(sched: &Scheduler) -> Self {
        WidgetEvents {
            cursor_enter: Event::new(sched),
            cursor_exit: Event::new(sched),
            mouse_button_pressed: Event::new(sched),
            mouse_button_released: Event::new(sched),
            mouse_button_clicked: Event::new(sched),
            scrolled: Event::new(sched),
            focus: Event::new(sched),
            context_menu: Event::new(sched),
            tool_tip: Event::new(sched),
            drag_and_drop: Event::new(sched),
        }
    }
}

fn bubble<A: Clone + 'static>(from: &Event<A>, to: &Event<A>) -> RemoveHandler {
    let to = to.clone();
    from.add_handler(move |args: &A| to.fire(args.clone()))
}

/// Base state of every widget
///
/// Concrete widgets embed a `Widget` and expose it through
/// [`super::Node::widget`].
///
/// The rect is authoritative for position and size. It is only meaningful
/// after the widget has been laid out at least once.
pub struct Widget {
    rect: Rect,
    /// Configuration read by the parent container's layout
    pub layout_data: LayoutData,
    /// Floor applied over the preferred size
    pub min_size: Size,
    /// Disabled widgets fire no press, click, scroll or focus events
    pub disabled: bool,
    pub visibility: Visibility,
    /// Arbitrary user data
    pub custom_data: Option<Rc<dyn Any>>,
    /// Contents of the context menu opened by a right click
    pub context_menu: Option<NodeRef>,
    link: Rc<Link>,
    self_ref: WidgetRef,
    focusable: bool,
    parent_handlers: SmallVec<[RemoveHandler; 4]>,
    popups: [Option<Window>; 3],
    events: WidgetEvents,
    last_cursor_entered: bool,
    pressed_inside: [bool; 3],
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("rect", &self.rect)
            .field("layout_data", &self.layout_data)
            .field("min_size", &self.min_size)
            .field("disabled", &self.disabled)
            .field("visibility", &self.visibility)
            .field("self_ref", &self.self_ref)
            .finish_non_exhaustive()
    }
}

impl Widget {
    /// Construct
    pub fn new(sched: &Scheduler) -> Self {
        Widget {
            rect: Rect::ZERO,
            layout_data: LayoutData::None,
            min_size: Size::ZERO,
            disabled: false,
            visibility: Visibility::Show,
            custom_data: None,
            context_menu: None,
            link: Rc::new(Link::default()),
            self_ref: WidgetRef::detached(),
            focusable: false,
            parent_handlers: SmallVec::new(),
            popups: Default::default(),
            events: WidgetEvents::new(sched),
            last_cursor_entered: false,
            pressed_inside: [false; 3],
        }
    }

    /// Set layout data
    #[must_use]
    pub fn with_layout_data(mut self, data: impl Into<LayoutData>) -> Self {
        self.layout_data = data.into();
        self
    }

    /// Set minimum size
    #[must_use]
    pub fn with_min_size(mut self, size: Size) -> Self {
        self.min_size = size;
        self
    }

    /// Set context-menu contents
    #[must_use]
    pub fn with_context_menu(mut self, menu: NodeRef) -> Self {
        self.context_menu = Some(menu);
        self
    }

    /// Set custom data
    #[must_use]
    pub fn with_custom_data(mut self, data: Rc<dyn Any>) -> Self {
        self.custom_data = Some(data);
        self
    }

    /// Current rect
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Set rect
    #[inline]
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Access events
    #[inline]
    pub fn events(&self) -> &WidgetEvents {
        &self.events
    }

    /// Reference to the node embedding this widget
    ///
    /// Set when the node is added to a container; detached before that.
    #[inline]
    pub fn self_ref(&self) -> &WidgetRef {
        &self.self_ref
    }

    pub(crate) fn set_self_ref(&mut self, self_ref: WidgetRef) {
        self.self_ref = self_ref;
    }

    /// True while the widget belongs to a container
    pub fn has_parent(&self) -> bool {
        self.link.parent.borrow().upgrade().is_some()
    }

    /// Whether the embedding node declared focus capability when added
    #[inline]
    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    /// Whether the cursor was over the widget on its last render
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.last_cursor_entered
    }

    /// Link to `parent`, wiring event bubbling
    ///
    /// Panics if already attached: a node belongs to at most one container.
    pub(crate) fn attach(&mut self, parent: &Widget, self_ref: WidgetRef, focusable: bool) {
        assert!(
            !self.has_parent(),
            "Widget::attach: node is already a child of another container"
        );
        *self.link.parent.borrow_mut() = Rc::downgrade(&parent.link);
        self.self_ref = self_ref;
        self.focusable = focusable;

        let (from, to) = (&self.events, &parent.events);
        self.parent_handlers.push(bubble(&from.context_menu, &to.context_menu));
        self.parent_handlers.push(bubble(&from.focus, &to.focus));
        self.parent_handlers.push(bubble(&from.tool_tip, &to.tool_tip));
        self.parent_handlers.push(bubble(&from.drag_and_drop, &to.drag_and_drop));
    }

    /// Undo [`Widget::attach`] and close anchored popups
    pub(crate) fn detach(&mut self) {
        *self.link.parent.borrow_mut() = Weak::new();
        self.self_ref = WidgetRef::detached();
        for remove in self.parent_handlers.drain(..) {
            remove.remove();
        }
        self.close_popups();
    }

    /// Own input layer, if any
    pub fn input_layer(&self) -> Option<InputLayer> {
        self.link.layer.borrow().clone()
    }

    /// Resolve the layer this widget receives input through
    ///
    /// The widget's own layer if present and valid, else its parent's
    /// effective layer, else the default layer.
    pub fn effective_input_layer(&self, layers: &LayerStack) -> InputLayer {
        self.link
            .effective_layer()
            .unwrap_or_else(|| layers.default_layer().clone())
    }

    /// Attach `layer` to this widget and push it on the layer stack
    ///
    /// Call from [`super::Node::setup_input_layer`]. Descendants without a
    /// layer of their own resolve to this one.
    pub fn elevate_to_new_input_layer(&self, cx: &mut LayerCx, layer: InputLayer) {
        *self.link.layer.borrow_mut() = Some(layer.clone());
        cx.add_layer(layer);
    }

    /// Derive input events for this frame
    ///
    /// Events are edge-triggered: cursor enter/exit and button
    /// press/release fire on transitions only.
    pub fn render(&mut self, cx: &mut RenderCx) {
        let pos = cx.cursor();
        let layer = self.effective_input_layer(cx.layers());
        let inside = self.rect.contains(pos);

        let entered = inside && cx.cursor_active(&layer, LayerEventTypes::ANY);
        if entered != self.last_cursor_entered {
            self.last_cursor_entered = entered;
            let args = WidgetCursorArgs {
                widget: self.self_ref.clone(),
            };
            if entered {
                self.events.cursor_enter.fire(args);
            } else {
                self.events.cursor_exit.fire(args);
            }
        }

        let offset = pos - self.rect.pos;
        for button in MouseButton::ALL {
            let i = button as usize;
            if inside && cx.mouse_button_just_pressed(button, &layer) {
                // a disabled widget records no press to release later
                if !self.disabled {
                    self.pressed_inside[i] = true;
                    self.events.mouse_button_pressed.fire(WidgetMouseButtonArgs {
                        widget: self.self_ref.clone(),
                        button,
                        offset,
                        inside: true,
                    });
                    match button {
                        MouseButton::Left => self.fire_focus_request(pos),
                        MouseButton::Right if self.context_menu.is_some() => {
                            self.events.context_menu.fire(WidgetContextMenuArgs {
                                widget: self.self_ref.clone(),
                                location: pos,
                            });
                        }
                        _ => (),
                    }
                }
            }

            if self.pressed_inside[i] && !cx.input().is_pressed(button) {
                self.pressed_inside[i] = false;
                if !self.disabled {
                    let args = WidgetMouseButtonArgs {
                        widget: self.self_ref.clone(),
                        button,
                        offset,
                        inside,
                    };
                    if inside {
                        self.events.mouse_button_clicked.fire(args.clone());
                    }
                    self.events.mouse_button_released.fire(args);
                }
            }
        }

        if entered && !self.disabled {
            let (x, y) = cx.wheel(&layer);
            if x != 0.0 || y != 0.0 {
                self.events.scrolled.fire(WidgetScrolledArgs {
                    widget: self.self_ref.clone(),
                    x,
                    y,
                });
            }
        }
    }

    fn fire_focus_request(&self, location: Coord) {
        let args = if self.focusable {
            WidgetFocusArgs {
                widget: Some(self.self_ref.clone()),
                focused: true,
                location,
            }
        } else {
            WidgetFocusArgs {
                widget: None,
                focused: false,
                location,
            }
        };
        self.events.focus.fire(args);
    }

    fn popup_event(&self, kind: PopupKind) -> Option<&Event<WidgetPopupArgs>> {
        match kind {
            PopupKind::ToolTip => Some(&self.events.tool_tip),
            PopupKind::DragAndDrop => Some(&self.events.drag_and_drop),
            PopupKind::ContextMenu => None,
        }
    }

    /// The open popup window of `kind`, if any
    pub fn popup(&self, kind: PopupKind) -> Option<&Window> {
        self.popups[kind.index()]
            .as_ref()
            .filter(|window| !window.is_closed())
    }

    /// Anchor `window` to this widget without firing an event
    ///
    /// A previous window of the same kind is closed.
    pub fn attach_popup(&mut self, kind: PopupKind, window: Window) {
        if let Some(old) = self.popups[kind.index()].replace(window.clone()) {
            if !old.ptr_eq(&window) {
                old.close();
            }
        }
    }

    /// Anchor `window` to this widget and announce it
    ///
    /// Fires the tool-tip or drag-and-drop event with `show: true`; the
    /// [`crate::Ui`] receiving it adds the window. Context-menu windows are
    /// opened by the UI itself and fire nothing here.
    pub fn show_popup(&mut self, kind: PopupKind, window: Window) {
        self.attach_popup(kind, window.clone());
        if let Some(event) = self.popup_event(kind) {
            event.fire(WidgetPopupArgs {
                widget: self.self_ref.clone(),
                kind,
                window,
                show: true,
            });
        }
    }

    /// Close the popup window of `kind`, if any
    pub fn hide_popup(&mut self, kind: PopupKind) {
        if let Some(window) = self.popups[kind.index()].take() {
            window.close();
            if let Some(event) = self.popup_event(kind) {
                event.fire(WidgetPopupArgs {
                    widget: self.self_ref.clone(),
                    kind,
                    window,
                    show: false,
                });
            }
        }
    }

    /// Close every popup window anchored to this widget
    pub fn close_popups(&mut self) {
        for kind in PopupKind::ALL {
            if let Some(window) = self.popups[kind.index()].take() {
                window.close();
            }
        }
    }
}
