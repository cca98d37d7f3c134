// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The container widget

use crate::core::{DEFAULT_PREFERRED_SIZE, Node, NodeRef, Visibility, Widget, WidgetRef, node_eq};
use crate::event::Scheduler;
use crate::geom::{Coord, Rect, Size};
use crate::input::LayerCx;
use crate::layout::{LayoutData, Layouter};
use crate::render::{Background, RenderCx};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A widget owning an ordered list of children and a [`Layouter`]
///
/// Child order is significant: it is layout order, z-order (later children
/// draw on top) and tab order.
///
/// Layout is cached: the container only re-runs its layouter while dirty.
/// It becomes dirty when children are added or removed, when its rect
/// changes and on [`Container::request_relayout`].
///
/// Specialized containers (panels, tab pages, windows' contents) hold a
/// `Container` and forward [`Node`] methods to it.
pub struct Container {
    widget: Widget,
    children: Vec<NodeRef>,
    layout: Option<Box<dyn Layouter>>,
    background: Option<Rc<dyn Background>>,
    auto_disable_children: bool,
    dirty: bool,
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("widget", &self.widget)
            .field("children", &self.children.len())
            .field("layout", &self.layout)
            .field("background", &self.background)
            .field("auto_disable_children", &self.auto_disable_children)
            .field("dirty", &self.dirty)
            .finish()
    }
}

/// Builder for a [`Container`]
#[derive(Default)]
pub struct ContainerBuilder {
    layout: Option<Box<dyn Layouter>>,
    background: Option<Rc<dyn Background>>,
    auto_disable_children: bool,
    layout_data: LayoutData,
    min_size: Size,
}

impl ContainerBuilder {
    /// Set the layout algorithm
    ///
    /// Without one, children are never positioned.
    #[must_use]
    pub fn with_layout(mut self, layout: impl Layouter + 'static) -> Self {
        self.layout = Some(Box::new(layout));
        self
    }

    /// Set the background drawn behind children
    #[must_use]
    pub fn with_background(mut self, background: Rc<dyn Background>) -> Self {
        self.background = Some(background);
        self
    }

    /// Force the container's disabled state onto direct children each frame
    #[must_use]
    pub fn with_auto_disable_children(mut self, auto_disable: bool) -> Self {
        self.auto_disable_children = auto_disable;
        self
    }

    /// Set the container's own layout data (read by its parent's layout)
    #[must_use]
    pub fn with_layout_data(mut self, data: impl Into<LayoutData>) -> Self {
        self.layout_data = data.into();
        self
    }

    /// Set the container's minimum size
    #[must_use]
    pub fn with_min_size(mut self, size: Size) -> Self {
        self.min_size = size;
        self
    }

    /// Build
    pub fn build(self, sched: &Scheduler) -> Container {
        Container {
            widget: Widget::new(sched)
                .with_layout_data(self.layout_data)
                .with_min_size(self.min_size),
            children: vec![],
            layout: self.layout,
            background: self.background,
            auto_disable_children: self.auto_disable_children,
            dirty: true,
        }
    }
}

/// Token returned by [`Container::add_child`]
///
/// Removes exactly the child it was returned for.
#[derive(Clone)]
pub struct RemoveChild(Weak<RefCell<dyn Node>>);

impl fmt::Debug for RemoveChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RemoveChild({:p})", self.0.as_ptr())
    }
}

impl RemoveChild {
    /// Remove the child from `container`
    ///
    /// Returns false if the child is gone or not a child of `container`.
    pub fn remove(self, container: &mut Container) -> bool {
        match self.0.upgrade() {
            Some(child) => container.remove_child(&child),
            None => false,
        }
    }
}

fn close_subtree_popups(node: &mut dyn Node) {
    node.widget_mut().close_popups();
    if let Some(container) = node.as_container_mut() {
        for child in &container.children {
            close_subtree_popups(&mut *child.borrow_mut());
        }
    }
}

impl Container {
    /// Start building
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::default()
    }

    /// Wrap in a shared node, referencing itself in event payloads
    pub fn into_node(self) -> Rc<RefCell<Container>> {
        let rc = Rc::new(RefCell::new(self));
        let node: NodeRef = rc.clone();
        rc.borrow_mut().widget.set_self_ref(WidgetRef::new(&node));
        rc
    }

    /// Children, in order
    #[inline]
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// True while layout must be recomputed
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the disabled state is forced onto direct children
    #[inline]
    pub fn auto_disable_children(&self) -> bool {
        self.auto_disable_children
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        if let Some(layout) = self.layout.as_mut() {
            layout.mark_dirty();
        }
    }

    /// Append `child`
    ///
    /// The child's context-menu, focus, tool-tip and drag-and-drop events
    /// are re-fired on this container's events.
    ///
    /// Panics if `child` already belongs to a container.
    pub fn add_child(&mut self, child: NodeRef) -> RemoveChild {
        {
            let mut node = child.borrow_mut();
            let focusable = node.as_focuser().is_some();
            node.widget_mut()
                .attach(&self.widget, WidgetRef::new(&child), focusable);
        }
        let remove = RemoveChild(Rc::downgrade(&child));
        self.children.push(child);
        self.mark_dirty();
        remove
    }

    /// Remove `child`
    ///
    /// Popup windows anchored to the child or any of its descendants are
    /// closed. Returns false if `child` is not a child of this container.
    pub fn remove_child(&mut self, child: &NodeRef) -> bool {
        let Some(index) = self.children.iter().position(|c| node_eq(c, child)) else {
            return false;
        };
        let child = self.children.remove(index);
        Self::detach(&child);
        self.mark_dirty();
        true
    }

    /// Remove all children
    pub fn remove_children(&mut self) {
        for child in self.children.drain(..) {
            Self::detach(&child);
        }
        self.mark_dirty();
    }

    fn detach(child: &NodeRef) {
        let mut node = child.borrow_mut();
        node.widget_mut().detach();
        close_subtree_popups(&mut *node);
    }

    /// Mark this container and all descendants dirty
    pub fn request_relayout(&mut self) {
        log::trace!("Container::request_relayout: {:?}", self.widget.self_ref());
        self.mark_dirty();
        for child in &self.children {
            child.borrow_mut().request_relayout();
        }
    }

    /// Natural size from the layouter
    ///
    /// Without a layouter this is [`DEFAULT_PREFERRED_SIZE`].
    pub fn preferred_size(&mut self) -> Size {
        match self.layout.as_mut() {
            Some(layout) => layout.preferred_size(&self.children),
            None => DEFAULT_PREFERRED_SIZE,
        }
    }

    /// Set rect, marking dirty if it changed
    pub fn set_location(&mut self, rect: Rect) {
        if self.widget.rect() != rect {
            self.widget.set_rect(rect);
            self.mark_dirty();
        }
    }

    /// Lay out children if dirty
    pub fn layout(&mut self) {
        if !self.dirty {
            return;
        }
        if let Some(layout) = self.layout.as_mut() {
            log::trace!(
                "Container::layout: {} children in {:?}",
                self.children.len(),
                self.widget.rect()
            );
            layout.layout(&self.children, self.widget.rect());
        }
        self.dirty = false;
    }

    /// Render self and children
    ///
    /// A hidden container (either hidden variant) renders nothing and
    /// touches no children.
    pub fn render(&mut self, cx: &mut RenderCx) {
        if self.widget.visibility.is_hidden() {
            return;
        }

        if self.auto_disable_children {
            let disabled = self.widget.disabled;
            for child in &self.children {
                child.borrow_mut().widget_mut().disabled = disabled;
            }
        }

        self.widget.render(cx);
        self.layout();

        if let Some(background) = self.background.as_ref() {
            background.draw(cx.surface(), self.widget.rect());
        }

        for child in &self.children {
            let mut node = child.borrow_mut();
            if !node.widget().visibility.is_hidden() {
                node.render(cx);
            }
        }
    }

    /// Input-layer setup for visible children
    pub fn setup_input_layer(&mut self, cx: &mut LayerCx) {
        if self.widget.visibility.is_hidden() {
            return;
        }
        for child in &self.children {
            let mut node = child.borrow_mut();
            if !node.widget().visibility.is_hidden() {
                node.setup_input_layer(cx);
            }
        }
    }

    /// The deepest widget at `pos`
    ///
    /// Children are tested topmost (last) first; nested containers are
    /// searched recursively. A [`Visibility::HideBlocking`] child is
    /// returned itself, never one of its descendants. Returns this container if no child contains
    /// `pos`, or `None` if `pos` is outside this container.
    pub fn widget_at(&self, pos: Coord) -> Option<WidgetRef> {
        if self.widget.visibility == Visibility::Hide || !self.widget.rect().contains(pos) {
            return None;
        }
        for child in self.children.iter().rev() {
            let node = child.borrow();
            match node.widget().visibility {
                Visibility::Hide => continue,
                // claims its rect without exposing its descendants
                Visibility::HideBlocking => {
                    if node.widget().rect().contains(pos) {
                        return Some(WidgetRef::new(child));
                    }
                    continue;
                }
                Visibility::Show => (),
            }
            if let Some(container) = node.as_container() {
                if let Some(found) = container.widget_at(pos) {
                    return Some(found);
                }
            } else if node.widget().rect().contains(pos) {
                return Some(WidgetRef::new(child));
            }
        }
        Some(self.widget.self_ref().clone())
    }

    /// Focusable descendants in tree order
    ///
    /// Skips hidden subtrees, disabled focusers and focusers with negative
    /// tab order.
    pub fn get_focusers(&self) -> Vec<NodeRef> {
        let mut out = vec![];
        self.collect(&mut out, &|node: &dyn Node| {
            let widget = node.widget();
            node.as_focuser()
                .is_some_and(|f| !widget.disabled && f.tab_order() >= 0)
        });
        out
    }

    /// Drop-target descendants in tree order, skipping hidden subtrees
    pub fn get_drop_targets(&self) -> Vec<NodeRef> {
        let mut out = vec![];
        self.collect(&mut out, &|node: &dyn Node| node.as_drop_target().is_some());
        out
    }

    fn collect(&self, out: &mut Vec<NodeRef>, pred: &dyn Fn(&dyn Node) -> bool) {
        for child in &self.children {
            let node = child.borrow();
            if node.widget().visibility.is_hidden() {
                continue;
            }
            if pred(&*node) {
                out.push(child.clone());
            }
            if let Some(container) = node.as_container() {
                container.collect(out, pred);
            }
        }
    }
}

impl Node for Container {
    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    fn preferred_size(&mut self) -> Size {
        Container::preferred_size(self)
    }

    fn set_location(&mut self, rect: Rect) {
        Container::set_location(self, rect);
    }

    fn render(&mut self, cx: &mut RenderCx) {
        Container::render(self, cx);
    }

    fn setup_input_layer(&mut self, cx: &mut LayerCx) {
        Container::setup_input_layer(self, cx);
    }

    fn request_relayout(&mut self) {
        Container::request_relayout(self);
    }

    fn as_container(&self) -> Option<&Container> {
        Some(self)
    }

    fn as_container_mut(&mut self) -> Option<&mut Container> {
        Some(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::Focuser;
    use crate::event::PopupKind;
    use crate::geom::Insets;
    use crate::layout::test_util::*;
    use crate::input::{InputState, LayerStack};
    use crate::layout::{FillLayout, RowLayout};
    use crate::render::DeferredRender;
    use crate::render::test_util::NullSurface;
    use crate::window::Window;
    use std::cell::Cell;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new(Coord(x, y), Size(w, h))
    }

    struct Field {
        widget: Widget,
        focused: bool,
        tab_order: i32,
    }

    impl Node for Field {
        fn widget(&self) -> &Widget {
            &self.widget
        }
        fn widget_mut(&mut self) -> &mut Widget {
            &mut self.widget
        }
        fn as_focuser(&self) -> Option<&dyn Focuser> {
            Some(self)
        }
        fn as_focuser_mut(&mut self) -> Option<&mut dyn Focuser> {
            Some(self)
        }
    }

    impl Focuser for Field {
        fn focus(&mut self, focused: bool) {
            self.focused = focused;
        }
        fn is_focused(&self) -> bool {
            self.focused
        }
        fn tab_order(&self) -> i32 {
            self.tab_order
        }
    }

    /// Counts render and input-layer setup passes
    struct Counted {
        widget: Widget,
        renders: Rc<Cell<usize>>,
        setups: Rc<Cell<usize>>,
    }

    impl Node for Counted {
        fn widget(&self) -> &Widget {
            &self.widget
        }
        fn widget_mut(&mut self) -> &mut Widget {
            &mut self.widget
        }
        fn preferred_size(&mut self) -> Size {
            Size(10, 10)
        }
        fn render(&mut self, cx: &mut RenderCx) {
            self.renders.set(self.renders.get() + 1);
            self.widget.render(cx);
        }
        fn setup_input_layer(&mut self, _: &mut LayerCx) {
            self.setups.set(self.setups.get() + 1);
        }
    }

    fn counted(sched: &Scheduler) -> (NodeRef, Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let renders = Rc::new(Cell::new(0));
        let setups = Rc::new(Cell::new(0));
        let node = Rc::new(RefCell::new(Counted {
            widget: Widget::new(sched),
            renders: renders.clone(),
            setups: setups.clone(),
        }));
        (node, renders, setups)
    }

    fn render(c: &mut Container) {
        let mut surface = NullSurface;
        let input = InputState::default();
        let layers = LayerStack::default();
        let mut deferred = DeferredRender::default();
        let mut cx = RenderCx::new(&mut surface, &input, &layers, &mut deferred);
        c.render(&mut cx);
    }

    fn setup_layers(c: &mut Container) {
        let mut layers = LayerStack::default();
        let mut cx = LayerCx::new(&mut layers);
        c.setup_input_layer(&mut cx);
        cx.finish();
    }

    fn field(sched: &Scheduler, tab_order: i32) -> NodeRef {
        Rc::new(RefCell::new(Field {
            widget: Widget::new(sched),
            focused: false,
            tab_order,
        }))
    }

    #[test]
    fn add_marks_dirty_and_layout_cleans() {
        let sched = Scheduler::new();
        let mut c = Container::builder().with_layout(RowLayout::default()).build(&sched);
        c.layout();
        assert!(!c.is_dirty());

        let child = leaf(&sched, 10, 10);
        c.add_child(child.clone());
        assert!(c.is_dirty());
        assert!(child.borrow().widget().has_parent());
        c.layout();
        assert!(!c.is_dirty());
    }

    #[test]
    fn set_location_dirty_only_on_change() {
        let sched = Scheduler::new();
        let mut c = Container::builder().with_layout(RowLayout::default()).build(&sched);
        c.set_location(rect(0, 0, 10, 10));
        c.layout();
        c.set_location(rect(0, 0, 10, 10));
        assert!(!c.is_dirty());
        c.set_location(rect(0, 0, 20, 10));
        assert!(c.is_dirty());
    }

    #[test]
    fn layout_twice_is_idempotent() {
        let sched = Scheduler::new();
        let mut c = Container::builder().with_layout(RowLayout::default()).build(&sched);
        let a = leaf(&sched, 10, 10);
        let b = leaf(&sched, 20, 10);
        c.add_child(a.clone());
        c.add_child(b.clone());
        c.set_location(rect(0, 0, 100, 10));
        c.layout();
        let before = (rect_of(&a), rect_of(&b));
        c.layout();
        assert_eq!((rect_of(&a), rect_of(&b)), before);
        assert_eq!(located_count(&a), 1);
    }

    #[test]
    #[should_panic]
    fn child_has_one_parent() {
        let sched = Scheduler::new();
        let mut c1 = Container::builder().build(&sched);
        let mut c2 = Container::builder().build(&sched);
        let child = leaf(&sched, 10, 10);
        c1.add_child(child.clone());
        c2.add_child(child);
    }

    #[test]
    fn remove_via_token() {
        let sched = Scheduler::new();
        let mut c = Container::builder().build(&sched);
        let a = leaf(&sched, 10, 10);
        let b = leaf(&sched, 10, 10);
        let remove_a = c.add_child(a.clone());
        c.add_child(b.clone());
        c.layout();

        assert!(remove_a.clone().remove(&mut c));
        assert_eq!(c.children().len(), 1);
        assert!(node_eq(&c.children()[0], &b));
        assert!(!a.borrow().widget().has_parent());
        assert!(a.borrow().widget().self_ref().is_detached());
        assert!(c.is_dirty());
        assert!(!remove_a.remove(&mut c));

        // may be added elsewhere once removed
        let mut other = Container::builder().build(&sched);
        other.add_child(a);
    }

    #[test]
    fn removing_child_closes_its_tool_tip() {
        let sched = Scheduler::new();
        let mut c = Container::builder().build(&sched);
        let child = leaf(&sched, 10, 10);
        c.add_child(child.clone());

        let window = Window::new(leaf(&sched, 5, 5));
        let closed = Rc::new(Cell::new(false));
        let flag = closed.clone();
        window.on_close(move || flag.set(true));
        child
            .borrow_mut()
            .widget_mut()
            .show_popup(PopupKind::ToolTip, window.clone());

        c.remove_child(&child);
        assert!(closed.get());
        assert!(window.is_closed());
    }

    #[test]
    fn remove_children_closes_nested_popups() {
        let sched = Scheduler::new();
        let mut outer = Container::builder().build(&sched);
        let inner: NodeRef = Rc::new(RefCell::new(Container::builder().build(&sched)));
        let deep = leaf(&sched, 1, 1);
        inner
            .borrow_mut()
            .as_container_mut()
            .unwrap()
            .add_child(deep.clone());
        outer.add_child(inner.clone());

        let window = Window::new(leaf(&sched, 5, 5));
        deep.borrow_mut()
            .widget_mut()
            .attach_popup(PopupKind::DragAndDrop, window.clone());
        outer.remove_children();
        assert!(window.is_closed());
        assert!(outer.children().is_empty());
        // the nested child still belongs to the removed container
        assert!(deep.borrow().widget().has_parent());
    }

    #[test]
    fn relayout_is_recursive() {
        let sched = Scheduler::new();
        let mut outer = Container::builder().with_layout(FillLayout::new()).build(&sched);
        let inner = Container::builder()
            .with_layout(FillLayout::new())
            .build(&sched)
            .into_node();
        outer.add_child(inner.clone());
        outer.set_location(rect(0, 0, 10, 10));
        outer.layout();
        inner.borrow_mut().layout();
        assert!(!inner.borrow().is_dirty());

        outer.request_relayout();
        assert!(outer.is_dirty());
        assert!(inner.borrow().is_dirty());
    }

    #[test]
    fn preferred_size_from_layout() {
        let sched = Scheduler::new();
        let mut c = Container::builder()
            .with_layout(RowLayout::default().with_padding(Insets::splat(5)))
            .build(&sched);
        c.add_child(leaf(&sched, 10, 20));
        assert_eq!(c.preferred_size(), Size(20, 30));

        let mut bare = Container::builder().build(&sched);
        assert_eq!(bare.preferred_size(), DEFAULT_PREFERRED_SIZE);
    }

    #[test]
    fn widget_at_prefers_deepest_topmost() {
        let sched = Scheduler::new();
        let root = Container::builder().build(&sched).into_node();
        let inner = Container::builder().build(&sched).into_node();
        let a = leaf(&sched, 0, 0);
        let b = leaf(&sched, 0, 0);
        let hidden = leaf(&sched, 0, 0);

        {
            let mut r = root.borrow_mut();
            r.set_location(rect(0, 0, 100, 100));
            r.add_child(a.clone());
            r.add_child(inner.clone());
            r.add_child(hidden.clone());
        }
        inner.borrow_mut().set_location(rect(50, 50, 50, 50));
        inner.borrow_mut().add_child(b.clone());

        a.borrow_mut().set_location(rect(0, 0, 60, 60));
        b.borrow_mut().set_location(rect(55, 55, 10, 10));
        hidden.borrow_mut().set_location(rect(0, 0, 100, 100));
        hidden.borrow_mut().widget_mut().visibility = Visibility::Hide;

        let r = root.borrow();
        let root_node: NodeRef = root.clone();
        let inner_node: NodeRef = inner.clone();
        assert!(r.widget_at(Coord(57, 57)).unwrap().refers_to(&b));
        assert!(r.widget_at(Coord(70, 70)).unwrap().refers_to(&inner_node));
        assert!(r.widget_at(Coord(10, 10)).unwrap().refers_to(&a));
        assert!(r.widget_at(Coord(10, 90)).unwrap().refers_to(&root_node));
        assert!(r.widget_at(Coord(150, 10)).is_none());
    }

    #[test]
    fn widget_at_stops_at_hide_blocking_container() {
        let sched = Scheduler::new();
        let root = Container::builder().build(&sched).into_node();
        let hidden = Container::builder().build(&sched).into_node();
        let inner = leaf(&sched, 0, 0);
        root.borrow_mut().set_location(rect(0, 0, 200, 200));
        root.borrow_mut().add_child(hidden.clone());
        hidden.borrow_mut().set_location(rect(0, 0, 100, 100));
        hidden.borrow_mut().add_child(inner.clone());
        inner.borrow_mut().set_location(rect(0, 0, 10, 10));
        hidden.borrow_mut().widget_mut().visibility = Visibility::HideBlocking;

        let r = root.borrow();
        let hidden_node: NodeRef = hidden.clone();
        let root_node: NodeRef = root.clone();
        let found = r.widget_at(Coord(5, 5)).unwrap();
        assert!(found.refers_to(&hidden_node));
        assert!(!found.refers_to(&inner));
        assert!(r.widget_at(Coord(150, 150)).unwrap().refers_to(&root_node));
    }

    #[test]
    fn auto_disable_children_follows_container() {
        let sched = Scheduler::new();
        let mut c = Container::builder()
            .with_layout(RowLayout::default())
            .with_auto_disable_children(true)
            .build(&sched);
        let a = leaf(&sched, 10, 10);
        let b = leaf(&sched, 10, 10);
        c.add_child(a.clone());
        c.add_child(b.clone());
        c.set_location(rect(0, 0, 100, 10));

        c.widget_mut().disabled = true;
        render(&mut c);
        assert!(a.borrow().widget().disabled);
        assert!(b.borrow().widget().disabled);

        c.widget_mut().disabled = false;
        render(&mut c);
        assert!(!a.borrow().widget().disabled);
        assert!(!b.borrow().widget().disabled);

        // without the flag, children keep their own state
        let mut plain = Container::builder().build(&sched);
        let d = leaf(&sched, 10, 10);
        plain.add_child(d.clone());
        plain.widget_mut().disabled = true;
        render(&mut plain);
        assert!(!d.borrow().widget().disabled);
    }

    #[test]
    fn hidden_container_is_inert() {
        for visibility in [Visibility::Hide, Visibility::HideBlocking] {
            let sched = Scheduler::new();
            let mut c = Container::builder().with_layout(RowLayout::default()).build(&sched);
            let (child, renders, setups) = counted(&sched);
            c.add_child(child.clone());
            c.set_location(rect(0, 0, 100, 100));
            c.widget_mut().visibility = visibility;

            render(&mut c);
            setup_layers(&mut c);
            assert_eq!(renders.get(), 0);
            assert_eq!(setups.get(), 0);
            assert!(c.is_dirty());
            assert_eq!(rect_of(&child), Rect::ZERO);

            c.widget_mut().visibility = Visibility::Show;
            render(&mut c);
            setup_layers(&mut c);
            assert_eq!(renders.get(), 1);
            assert_eq!(setups.get(), 1);
            assert!(!c.is_dirty());
        }
    }

    #[test]
    fn hide_blocking_child_keeps_its_space() {
        let sched = Scheduler::new();
        let mut c = Container::builder().with_layout(RowLayout::default()).build(&sched);
        let (a, _, _) = counted(&sched);
        let (b, b_renders, b_setups) = counted(&sched);
        let (d, d_renders, _) = counted(&sched);
        c.add_child(a);
        c.add_child(b.clone());
        c.add_child(d.clone());
        c.set_location(rect(0, 0, 100, 10));
        b.borrow_mut().widget_mut().visibility = Visibility::HideBlocking;

        render(&mut c);
        setup_layers(&mut c);
        assert_eq!(rect_of(&b), rect(10, 0, 10, 10));
        assert_eq!(rect_of(&d), rect(20, 0, 10, 10));
        assert_eq!(b_renders.get(), 0);
        assert_eq!(b_setups.get(), 0);
        assert_eq!(d_renders.get(), 1);

        // Hide gives the space up
        b.borrow_mut().widget_mut().visibility = Visibility::Hide;
        c.request_relayout();
        render(&mut c);
        assert_eq!(rect_of(&d), rect(10, 0, 10, 10));
        assert_eq!(b_renders.get(), 0);
    }

    #[test]
    fn focusers_and_drop_targets() {
        let sched = Scheduler::new();
        let mut root = Container::builder().build(&sched);
        let inner = Container::builder().build(&sched).into_node();
        let f1 = field(&sched, 0);
        let f2 = field(&sched, 1);
        let negative = field(&sched, -1);
        let disabled = field(&sched, 0);
        disabled.borrow_mut().widget_mut().disabled = true;
        let in_hidden = field(&sched, 0);
        let hidden = Container::builder().build(&sched).into_node();
        hidden.borrow_mut().add_child(in_hidden);
        hidden.borrow_mut().widget_mut().visibility = Visibility::HideBlocking;

        root.add_child(f1.clone());
        root.add_child(inner.clone());
        inner.borrow_mut().add_child(f2.clone());
        inner.borrow_mut().add_child(negative);
        root.add_child(disabled);
        root.add_child(hidden);

        let focusers = root.get_focusers();
        assert_eq!(focusers.len(), 2);
        assert!(node_eq(&focusers[0], &f1));
        assert!(node_eq(&focusers[1], &f2));
        assert!(f1.borrow().widget().is_focusable());

        assert!(root.get_drop_targets().is_empty());
    }

    #[test]
    fn child_events_bubble() {
        use crate::event::WidgetFocusArgs;

        let sched = Scheduler::new();
        let root = Container::builder().build(&sched).into_node();
        let inner = Container::builder().build(&sched).into_node();
        let child = leaf(&sched, 1, 1);
        root.borrow_mut().add_child(inner.clone());
        inner.borrow_mut().add_child(child.clone());

        let seen = Rc::new(Cell::new(0));
        let s = seen.clone();
        let _h = root
            .borrow()
            .widget()
            .events()
            .focus
            .add_handler(move |_| s.set(s.get() + 1));
        sched.flush_deferred();

        child.borrow().widget().events().focus.fire(WidgetFocusArgs {
            widget: None,
            focused: false,
            location: Coord::ZERO,
        });
        sched.flush_deferred();
        assert_eq!(seen.get(), 1);

        inner.borrow_mut().remove_child(&child);
        child.borrow().widget().events().focus.fire(WidgetFocusArgs {
            widget: None,
            focused: false,
            location: Coord::ZERO,
        });
        sched.flush_deferred();
        assert_eq!(seen.get(), 1);
    }
}
