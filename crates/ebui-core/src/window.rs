// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Windows: top-level overlays

use crate::core::{NodeRef, WidgetRef};
use crate::geom::{Coord, Rect};
use crate::input::{InputLayer, LayerCx};
use crate::layout::child_preferred_size;
use crate::render::RenderCx;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

struct WindowState {
    contents: NodeRef,
    rect: Cell<Rect>,
    modal: Cell<bool>,
    close_on_outside_click: Cell<bool>,
    closed: Cell<bool>,
    layer: RefCell<Option<InputLayer>>,
    on_close: RefCell<Vec<Box<dyn FnOnce()>>>,
}

/// A window: contents drawn above the main widget tree
///
/// Windows are owned by the [`crate::Ui`] they are added to, and are
/// rendered after the main tree in the order added. Tool tips, context menus
/// and drag-and-drop ghosts are windows anchored to a widget (see
/// [`crate::Widget::show_popup`]).
///
/// Each window elevates its contents to its own input layer. A modal
/// window's layer blocks all lower layers, wherever the cursor is.
///
/// Cloning yields another handle to the same window.
#[derive(Clone)]
pub struct Window(Rc<WindowState>);

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("rect", &self.0.rect.get())
            .field("modal", &self.0.modal.get())
            .field("close_on_outside_click", &self.0.close_on_outside_click.get())
            .field("closed", &self.0.closed.get())
            .finish_non_exhaustive()
    }
}

impl Window {
    /// Construct with `contents`
    ///
    /// The default rect is empty: the window is placed at the origin and
    /// sized to the contents' preferred size.
    pub fn new(contents: NodeRef) -> Self {
        {
            let mut node = contents.borrow_mut();
            if node.widget().self_ref().is_detached() {
                node.widget_mut().set_self_ref(WidgetRef::new(&contents));
            }
        }
        Window(Rc::new(WindowState {
            contents,
            rect: Cell::new(Rect::ZERO),
            modal: Cell::new(false),
            close_on_outside_click: Cell::new(false),
            closed: Cell::new(false),
            layer: RefCell::new(None),
            on_close: RefCell::new(vec![]),
        }))
    }

    /// Set the rect
    ///
    /// An empty size means "the contents' preferred size".
    #[must_use]
    pub fn with_rect(self, rect: Rect) -> Self {
        self.0.rect.set(rect);
        self
    }

    /// Set position, keeping the size
    #[must_use]
    pub fn with_position(self, pos: Coord) -> Self {
        let mut rect = self.0.rect.get();
        rect.pos = pos;
        self.0.rect.set(rect);
        self
    }

    /// Block input to everything below this window
    #[must_use]
    pub fn with_modal(self, modal: bool) -> Self {
        self.0.modal.set(modal);
        self
    }

    /// Close when a mouse button is pressed outside the window
    #[must_use]
    pub fn with_close_on_outside_click(self, close: bool) -> Self {
        self.0.close_on_outside_click.set(close);
        self
    }

    /// The contents
    #[inline]
    pub fn contents(&self) -> &NodeRef {
        &self.0.contents
    }

    /// The configured rect
    pub fn rect(&self) -> Rect {
        self.0.rect.get()
    }

    /// Move or resize
    pub fn set_rect(&self, rect: Rect) {
        self.0.rect.set(rect);
    }

    /// The rect the contents are given this frame
    pub fn effective_rect(&self) -> Rect {
        let mut rect = self.0.rect.get();
        if rect.size.is_empty() {
            rect.size = child_preferred_size(&self.0.contents);
        }
        rect
    }

    #[inline]
    pub fn is_modal(&self) -> bool {
        self.0.modal.get()
    }

    #[inline]
    pub fn closes_on_outside_click(&self) -> bool {
        self.0.close_on_outside_click.get()
    }

    /// True after [`Window::close`]
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.0.closed.get()
    }

    /// True if both are handles to the same window
    #[inline]
    pub fn ptr_eq(&self, other: &Window) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Call `f` when the window closes
    ///
    /// If already closed, `f` is called immediately.
    pub fn on_close(&self, f: impl FnOnce() + 'static) {
        if self.is_closed() {
            f();
        } else {
            self.0.on_close.borrow_mut().push(Box::new(f));
        }
    }

    /// Close the window
    ///
    /// Invalidates the window's input layer and calls close callbacks
    /// immediately. Closing a closed window does nothing.
    pub fn close(&self) {
        if self.0.closed.replace(true) {
            return;
        }
        log::debug!("Window::close: {:?}", self.0.rect.get());
        if let Some(layer) = self.0.layer.borrow().as_ref() {
            layer.invalidate();
        }
        let callbacks = std::mem::take(&mut *self.0.on_close.borrow_mut());
        for f in callbacks {
            f();
        }
    }

    /// Whether a press at `pos` closes this window
    pub(crate) fn closes_on_click_at(&self, pos: Coord) -> bool {
        !self.is_closed()
            && self.closes_on_outside_click()
            && !self.effective_rect().contains(pos)
    }

    /// Give the contents the window's rect
    pub(crate) fn layout(&self) {
        if self.is_closed() {
            return;
        }
        let rect = self.effective_rect();
        self.0.contents.borrow_mut().set_location(rect);
    }

    pub(crate) fn setup_input_layer(&self, cx: &mut LayerCx) {
        if self.is_closed() {
            return;
        }
        let rect = self.effective_rect();
        let layer = self
            .0
            .layer
            .borrow_mut()
            .get_or_insert_with(|| InputLayer::new("window", rect))
            .clone();
        layer.set_rect(rect);
        let layer = layer.with_block_lower(self.is_modal());

        let mut contents = self.0.contents.borrow_mut();
        contents.widget().elevate_to_new_input_layer(cx, layer);
        contents.setup_input_layer(cx);
    }

    pub(crate) fn render(&self, cx: &mut RenderCx) {
        if self.is_closed() {
            return;
        }
        let mut contents = self.0.contents.borrow_mut();
        if !contents.widget().visibility.is_hidden() {
            contents.render(cx);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::Scheduler;
    use crate::geom::Size;
    use crate::input::{LayerEventTypes, LayerStack};
    use crate::layout::test_util::*;

    #[test]
    fn close_is_idempotent() {
        let sched = Scheduler::new();
        let window = Window::new(leaf(&sched, 10, 10));
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        window.on_close(move || c.set(c.get() + 1));
        window.close();
        window.close();
        assert_eq!(count.get(), 1);

        let c = count.clone();
        window.on_close(move || c.set(c.get() + 10));
        assert_eq!(count.get(), 11);
    }

    #[test]
    fn sized_to_contents_by_default() {
        let sched = Scheduler::new();
        let window = Window::new(leaf(&sched, 30, 20)).with_position(Coord(5, 6));
        assert_eq!(window.effective_rect(), Rect::new(Coord(5, 6), Size(30, 20)));
        window.layout();
        assert_eq!(rect_of(window.contents()), Rect::new(Coord(5, 6), Size(30, 20)));

        assert!(!window.closes_on_click_at(Coord(0, 0)));
        let window = window.with_close_on_outside_click(true);
        assert!(window.closes_on_click_at(Coord(0, 0)));
        assert!(!window.closes_on_click_at(Coord(10, 10)));
    }

    #[test]
    fn modal_layer_blocks_lower() {
        let sched = Scheduler::new();
        let contents = leaf(&sched, 10, 10);
        let window = Window::new(contents.clone())
            .with_rect(Rect::new(Coord(10, 10), Size(10, 10)))
            .with_modal(true);

        let mut stack = LayerStack::default();
        {
            let mut cx = LayerCx::new(&mut stack);
            window.setup_input_layer(&mut cx);
            cx.finish();
        }
        let layer = contents.borrow().widget().effective_input_layer(&stack);
        let default = stack.default_layer().clone();
        assert!(stack.active_for(&layer, Coord(15, 15), LayerEventTypes::ANY));
        assert!(!stack.active_for(&default, Coord(0, 0), LayerEventTypes::ANY));

        window.close();
        assert!(!layer.is_valid());
        let fallback = contents.borrow().widget().effective_input_layer(&stack);
        assert!(fallback.ptr_eq(&default));
        assert!(stack.active_for(&default, Coord(0, 0), LayerEventTypes::ANY));
    }
}
