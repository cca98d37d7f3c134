// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The UI root

use crate::config::Config;
use crate::core::{Node, NodeRef, WidgetEvents, WidgetRef};
use crate::event::{PopupKind, RemoveHandler, Scheduler, WidgetContextMenuArgs, WidgetPopupArgs};
use crate::geom::Rect;
use crate::input::{InputSource, InputState, LayerCx, LayerStack, MouseButton};
use crate::render::{DeferredRender, RenderCx, Surface};
use crate::util::nav_next;
use crate::util::WidgetHierarchy;
use crate::window::Window;
use crate::Container;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

#[derive(Default)]
struct Shared {
    focused: Option<WidgetRef>,
    new_windows: Vec<Window>,
}

fn set_focus(shared: &RefCell<Shared>, target: Option<&WidgetRef>) {
    let previous = {
        let mut shared = shared.borrow_mut();
        match (&shared.focused, target) {
            (None, None) => return,
            (Some(a), Some(b)) if a.ptr_eq(b) => return,
            _ => (),
        }
        std::mem::replace(&mut shared.focused, target.cloned())
    };
    log::debug!("set_focus: {previous:?} -> {target:?}");

    if let Some(node) = previous.and_then(|w| w.upgrade()) {
        if let Some(focuser) = node.borrow_mut().as_focuser_mut() {
            focuser.focus(false);
        }
    }
    if let Some(node) = target.and_then(WidgetRef::upgrade) {
        if let Some(focuser) = node.borrow_mut().as_focuser_mut() {
            focuser.focus(true);
        }
    }
}

fn open_context_menu(shared: &RefCell<Shared>, args: &WidgetContextMenuArgs) {
    let Some(node) = args.widget.upgrade() else {
        return;
    };
    let mut node = node.borrow_mut();
    let Some(menu) = node.widget().context_menu.clone() else {
        return;
    };
    let window = Window::new(menu)
        .with_position(args.location)
        .with_close_on_outside_click(true);
    node.widget_mut()
        .attach_popup(PopupKind::ContextMenu, window.clone());
    shared.borrow_mut().new_windows.push(window);
}

fn open_popup(shared: &RefCell<Shared>, args: &WidgetPopupArgs) {
    if args.show && !args.window.is_closed() {
        shared.borrow_mut().new_windows.push(args.window.clone());
    }
}

fn subscribe(shared: &Rc<RefCell<Shared>>, events: &WidgetEvents) -> Vec<RemoveHandler> {
    let s = shared.clone();
    let focus = events.focus.add_handler(move |args| {
        let target = args.widget.as_ref().filter(|_| args.focused);
        set_focus(&s, target);
    });
    let s = shared.clone();
    let context_menu = events
        .context_menu
        .add_handler(move |args| open_context_menu(&s, args));
    let s = shared.clone();
    let tool_tip = events.tool_tip.add_handler(move |args| open_popup(&s, args));
    let s = shared.clone();
    let drag_and_drop = events
        .drag_and_drop
        .add_handler(move |args| open_popup(&s, args));
    vec![focus, context_menu, tool_tip, drag_and_drop]
}

struct OpenWindow {
    window: Window,
    handlers: Vec<RemoveHandler>,
}

/// The UI root
///
/// Owns the root [`Container`], open [`Window`]s and per-frame state. The
/// host calls [`Ui::update`] then [`Ui::draw`] once per frame.
///
/// Focus, context-menu, tool-tip and drag-and-drop events bubbling up to the
/// root (or to a window's contents) are handled here: focus moves between
/// [`crate::Focuser`]s, and popup windows are opened.
pub struct Ui {
    sched: Scheduler,
    config: Config,
    root: Rc<RefCell<Container>>,
    windows: Vec<OpenWindow>,
    input: InputState,
    layers: LayerStack,
    deferred: DeferredRender,
    last_viewport: Option<Rect>,
    shared: Rc<RefCell<Shared>>,
    root_handlers: Vec<RemoveHandler>,
}

impl Ui {
    /// Construct with default configuration
    pub fn new(sched: &Scheduler, root: Container) -> Self {
        Ui::with_config(sched, root, Config::default())
    }

    /// Construct
    ///
    /// Applies [`Config::flush_limit`] to `sched`.
    pub fn with_config(sched: &Scheduler, root: Container, config: Config) -> Self {
        sched.set_flush_limit(config.flush_limit);
        let root = root.into_node();
        let shared = Rc::new(RefCell::new(Shared::default()));
        let root_handlers = subscribe(&shared, root.borrow().widget().events());
        Ui {
            sched: sched.clone(),
            config,
            root,
            windows: vec![],
            input: InputState::default(),
            layers: LayerStack::default(),
            deferred: DeferredRender::default(),
            last_viewport: None,
            shared,
            root_handlers,
        }
    }

    /// The scheduler
    #[inline]
    pub fn scheduler(&self) -> &Scheduler {
        &self.sched
    }

    /// The configuration
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The root container
    #[inline]
    pub fn root(&self) -> &Rc<RefCell<Container>> {
        &self.root
    }

    /// Input snapshot of the current frame
    #[inline]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Input layers of the last draw
    #[inline]
    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// Open windows, bottom-most first
    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.windows
            .iter()
            .map(|w| &w.window)
            .filter(|w| !w.is_closed())
    }

    /// Open `window` on top of others
    ///
    /// Does nothing if the window is closed or already open.
    pub fn add_window(&mut self, window: Window) {
        if window.is_closed() || self.windows.iter().any(|w| w.window.ptr_eq(&window)) {
            return;
        }
        log::debug!("Ui::add_window: {window:?}");
        let handlers = subscribe(&self.shared, window.contents().borrow().widget().events());
        self.windows.push(OpenWindow { window, handlers });
    }

    fn prune_windows(&mut self) {
        self.windows.retain_mut(|w| {
            if w.window.is_closed() {
                for remove in w.handlers.drain(..) {
                    remove.remove();
                }
                false
            } else {
                true
            }
        });
    }

    /// The focused widget, if any
    pub fn focused(&self) -> Option<WidgetRef> {
        self.shared.borrow().focused.clone()
    }

    /// Focus `target`, or clear focus
    pub fn set_focus(&mut self, target: Option<&WidgetRef>) {
        set_focus(&self.shared, target);
    }

    /// Move focus to the next (or previous) focusable widget
    ///
    /// Candidates are ordered by tab order, then tree order, and cycle
    /// around. While a modal window is open only its contents are
    /// candidates.
    pub fn change_focus(&mut self, reverse: bool) {
        let focusers = self.focus_candidates();
        let index = self
            .focused()
            .and_then(|f| focusers.iter().position(|node| f.refers_to(node)));
        let next = nav_next(reverse, index, focusers.len())
            .or_else(|| nav_next(reverse, None, focusers.len()));
        let target = next.map(|i| WidgetRef::new(&focusers[i]));
        set_focus(&self.shared, target.as_ref());
    }

    fn focus_candidates(&self) -> Vec<NodeRef> {
        let root: NodeRef = self.root.clone();
        let scopes: Vec<NodeRef> = match self
            .windows()
            .filter(|w| w.is_modal())
            .last()
        {
            Some(modal) => vec![modal.contents().clone()],
            None => std::iter::once(root)
                .chain(self.windows().map(|w| w.contents().clone()))
                .collect(),
        };

        let mut focusers = vec![];
        for scope in &scopes {
            let node = scope.borrow();
            if let Some(container) = node.as_container() {
                focusers.extend(container.get_focusers());
            } else if node
                .as_focuser()
                .is_some_and(|f| !node.widget().disabled && f.tab_order() >= 0)
            {
                focusers.push(scope.clone());
            }
        }
        focusers.sort_by_key(|node| node.borrow().as_focuser().map(|f| f.tab_order()));
        focusers
    }

    /// Per-frame update
    ///
    /// Flushes deferred events (opening windows requested by them), then
    /// refreshes input from `source`. A mouse press closes windows
    /// configured to close on an outside click.
    pub fn update(&mut self, source: &dyn InputSource) {
        self.sched.flush_deferred();

        let new_windows = std::mem::take(&mut self.shared.borrow_mut().new_windows);
        for window in new_windows {
            self.add_window(window);
        }

        self.input.update(source);

        if MouseButton::ALL
            .iter()
            .any(|b| self.input.is_just_pressed(*b))
        {
            let pos = self.input.cursor();
            for w in &self.windows {
                if w.window.closes_on_click_at(pos) {
                    w.window.close();
                }
            }
        }
    }

    /// Per-frame draw
    ///
    /// If `viewport` differs from the last call, the whole tree is marked
    /// for relayout and the root is given the new rect. Then input layers are
    /// set up, and the root and each window are rendered (laying out dirty
    /// containers), each followed by a drain of the deferred render queue.
    pub fn draw(&mut self, surface: &mut dyn Surface, viewport: Rect) {
        let start = Instant::now();

        if self.last_viewport != Some(viewport) {
            log::debug!("Ui::draw: viewport {viewport:?}");
            let mut root = self.root.borrow_mut();
            root.request_relayout();
            root.set_location(viewport);
            self.last_viewport = Some(viewport);
        }

        self.prune_windows();
        for w in &self.windows {
            w.window.layout();
        }

        self.layers.clear();
        let mut cx = LayerCx::new(&mut self.layers);
        self.root.borrow_mut().setup_input_layer(&mut cx);
        for w in &self.windows {
            w.window.setup_input_layer(&mut cx);
        }
        cx.finish();

        let mut cx = RenderCx::new(surface, &self.input, &self.layers, &mut self.deferred)
            .with_deferred_limit(self.config.deferred_render_limit);
        let relayout = self.root.borrow().is_dirty();
        self.root.borrow_mut().render(&mut cx);
        cx.drain_deferred();
        for w in &self.windows {
            w.window.render(&mut cx);
            cx.drain_deferred();
        }

        if relayout && log::log_enabled!(log::Level::Trace) {
            let root = self.root.borrow();
            log::trace!("Ui::draw: layout{}", WidgetHierarchy::new(&*root));
        }
        log::trace!(target: "ebui_perf::draw", "Ui::draw: {}μs", start.elapsed().as_micros());
    }
}

impl Drop for Ui {
    fn drop(&mut self) {
        for remove in self.root_handlers.drain(..) {
            remove.remove();
        }
        for w in self.windows.iter_mut() {
            for remove in w.handlers.drain(..) {
                remove.remove();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geom::{Coord, Size};
    use crate::layout::FillLayout;
    use crate::layout::test_util::*;
    use crate::render::test_util::NullSurface;

    struct Idle;
    impl InputSource for Idle {
        fn cursor_position(&self) -> Coord {
            Coord(-1, -1)
        }
        fn is_mouse_button_pressed(&self, _: MouseButton) -> bool {
            false
        }
    }

    fn frame(ui: &mut Ui, viewport: Rect) {
        let _ = env_logger::builder().is_test(true).try_init();
        ui.update(&Idle);
        ui.draw(&mut NullSurface, viewport);
    }

    #[test]
    fn viewport_change_relayouts() {
        let sched = Scheduler::new();
        let root = Container::builder().with_layout(FillLayout::new()).build(&sched);
        let mut ui = Ui::new(&sched, root);
        let child = leaf(&sched, 1, 1);
        ui.root().borrow_mut().add_child(child.clone());

        let viewport = Rect::new(Coord::ZERO, Size(640, 480));
        frame(&mut ui, viewport);
        assert_eq!(rect_of(&child), viewport);
        frame(&mut ui, viewport);
        assert_eq!(located_count(&child), 1);

        let viewport = Rect::new(Coord::ZERO, Size(800, 600));
        frame(&mut ui, viewport);
        assert_eq!(rect_of(&child), viewport);
        assert_eq!(located_count(&child), 2);
    }

    #[test]
    fn closed_windows_are_pruned() {
        let sched = Scheduler::new();
        let mut ui = Ui::new(&sched, Container::builder().build(&sched));
        let window = Window::new(leaf(&sched, 10, 10));
        ui.add_window(window.clone());
        ui.add_window(window.clone());
        assert_eq!(ui.windows().count(), 1);

        let viewport = Rect::new(Coord::ZERO, Size(100, 100));
        frame(&mut ui, viewport);
        assert_eq!(ui.layers().len(), 1);

        window.close();
        assert_eq!(ui.windows().count(), 0);
        frame(&mut ui, viewport);
        assert!(ui.layers().is_empty());
    }

    #[test]
    fn flush_limit_from_config() {
        let sched = Scheduler::new();
        let config = Config {
            flush_limit: 2,
            ..Config::default()
        };
        let ui = Ui::with_config(&sched, Container::builder().build(&sched), config);
        for _ in 0..3 {
            ui.scheduler().defer(|| ());
        }
        assert_eq!(ui.scheduler().flush_deferred(), 2);
        assert_eq!(ui.scheduler().flush_deferred(), 1);
    }
}
