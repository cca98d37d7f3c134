// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Input layers

use crate::geom::{Coord, Rect};
use bitflags::bitflags;
use smallvec::SmallVec;
use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

bitflags! {
    /// Kinds of input claimed by an [`InputLayer`]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LayerEventTypes: u8 {
        /// Mouse button presses and releases
        const MOUSE_BUTTON = 1 << 0;
        /// Mouse wheel
        const WHEEL = 1 << 1;
        /// Everything
        const ANY = Self::MOUSE_BUTTON.bits() | Self::WHEEL.bits();
    }
}

struct LayerState {
    label: String,
    event_types: Cell<LayerEventTypes>,
    block_lower: Cell<bool>,
    full_screen: Cell<bool>,
    rect: Cell<Rect>,
    valid: Cell<bool>,
}

/// A screen region claiming input
///
/// Widgets which must receive input ahead of normal content (a modal window,
/// an open drop-down, a scroll clip region) elevate themselves to a new
/// layer during the input-layer setup pass. Layers added later take priority.
///
/// A layer stays valid until [`InputLayer::invalidate`] is called; an invalid
/// layer receives no input and widgets referencing it fall back to their
/// parent's layer.
///
/// Cloning yields another handle to the same layer.
#[derive(Clone)]
pub struct InputLayer(Rc<LayerState>);

impl fmt::Debug for InputLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputLayer")
            .field("label", &self.0.label)
            .field("event_types", &self.0.event_types.get())
            .field("block_lower", &self.0.block_lower.get())
            .field("full_screen", &self.0.full_screen.get())
            .field("rect", &self.0.rect.get())
            .field("valid", &self.0.valid.get())
            .finish()
    }
}

impl InputLayer {
    /// Construct a valid layer covering `rect`, claiming all input types
    pub fn new(label: impl Into<String>, rect: Rect) -> Self {
        InputLayer(Rc::new(LayerState {
            label: label.into(),
            event_types: Cell::new(LayerEventTypes::ANY),
            block_lower: Cell::new(false),
            full_screen: Cell::new(false),
            rect: Cell::new(rect),
            valid: Cell::new(true),
        }))
    }

    /// Construct a valid full-screen layer
    pub fn full_screen(label: impl Into<String>) -> Self {
        InputLayer::new(label, Rect::ZERO).with_full_screen(true)
    }

    /// Set claimed input types
    #[must_use]
    pub fn with_event_types(self, types: LayerEventTypes) -> Self {
        self.0.event_types.set(types);
        self
    }

    /// Block lower layers everywhere, not only within this layer's rect
    #[must_use]
    pub fn with_block_lower(self, block: bool) -> Self {
        self.0.block_lower.set(block);
        self
    }

    /// Cover the whole screen regardless of rect
    #[must_use]
    pub fn with_full_screen(self, full_screen: bool) -> Self {
        self.0.full_screen.set(full_screen);
        self
    }

    /// Debug label
    pub fn label(&self) -> &str {
        &self.0.label
    }

    /// Region covered
    pub fn rect(&self) -> Rect {
        self.0.rect.get()
    }

    /// Move or resize the layer
    pub fn set_rect(&self, rect: Rect) {
        self.0.rect.set(rect);
    }

    /// Claimed input types
    pub fn event_types(&self) -> LayerEventTypes {
        self.0.event_types.get()
    }

    /// Whether the layer blocks lower layers everywhere
    pub fn blocks_lower(&self) -> bool {
        self.0.block_lower.get()
    }

    /// Invalidate the layer permanently
    pub fn invalidate(&self) {
        self.0.valid.set(false);
    }

    /// True until [`InputLayer::invalidate`] is called
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0.valid.get()
    }

    /// True if `self` and `other` are handles to the same layer
    #[inline]
    pub fn ptr_eq(&self, other: &InputLayer) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn covers(&self, pos: Coord) -> bool {
        self.0.full_screen.get() || self.0.rect.get().contains(pos)
    }
}

/// The layers in effect for one frame
///
/// Rebuilt by every input-layer setup pass. The default layer is full
/// screen, always valid and below every other layer.
#[derive(Debug)]
pub struct LayerStack {
    layers: SmallVec<[InputLayer; 8]>,
    default: InputLayer,
}

impl Default for LayerStack {
    fn default() -> Self {
        LayerStack {
            layers: SmallVec::new(),
            default: InputLayer::full_screen("default"),
        }
    }
}

impl LayerStack {
    /// The bottom-most layer
    #[inline]
    pub fn default_layer(&self) -> &InputLayer {
        &self.default
    }

    /// Remove all layers except the default
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    /// Number of layers above the default
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True if only the default layer is present
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Push `layer` on top
    ///
    /// Invalid layers are ignored. A layer already present is moved to the top.
    pub fn push(&mut self, layer: InputLayer) {
        if !layer.is_valid() {
            log::trace!("LayerStack::push: ignoring invalid layer {:?}", layer.label());
            return;
        }
        self.layers.retain(|l| !l.ptr_eq(&layer));
        self.layers.push(layer);
    }

    /// The layer receiving input of `types` at `pos`
    ///
    /// Walks from the top: invalid layers and layers not claiming `types`
    /// are skipped; the first layer covering `pos` wins; a layer not covering
    /// `pos` but blocking lower layers ends the search.
    pub fn layer_at(&self, pos: Coord, types: LayerEventTypes) -> Option<&InputLayer> {
        for layer in self.layers.iter().rev().chain(std::iter::once(&self.default)) {
            if !layer.is_valid() || !layer.event_types().intersects(types) {
                continue;
            }
            if layer.covers(pos) {
                return Some(layer);
            }
            if layer.blocks_lower() {
                return None;
            }
        }
        None
    }

    /// Whether `layer` receives input of `types` at `pos`
    pub fn active_for(&self, layer: &InputLayer, pos: Coord, types: LayerEventTypes) -> bool {
        layer.is_valid()
            && self
                .layer_at(pos, types)
                .map(|top| top.ptr_eq(layer))
                .unwrap_or(false)
    }
}

type DeferredSetup = Box<dyn for<'b> FnOnce(&mut LayerCx<'b>)>;

/// Context of the input-layer setup pass
///
/// Widgets add layers via [`LayerCx::add_layer`] (usually through
/// [`crate::Widget::elevate_to_new_input_layer`]). Setup deferred with
/// [`LayerCx::defer`] runs after the whole tree, so the layers it adds sit
/// above all layers added by the tree walk.
pub struct LayerCx<'a> {
    layers: &'a mut LayerStack,
    deferred: VecDeque<DeferredSetup>,
}

impl<'a> LayerCx<'a> {
    pub(crate) fn new(layers: &'a mut LayerStack) -> Self {
        LayerCx {
            layers,
            deferred: VecDeque::new(),
        }
    }

    /// Push a layer on top of the stack
    pub fn add_layer(&mut self, layer: InputLayer) {
        self.layers.push(layer);
    }

    /// The bottom-most layer
    pub fn default_layer(&self) -> &InputLayer {
        self.layers.default_layer()
    }

    /// Run `f` after the tree walk completes
    pub fn defer(&mut self, f: impl for<'b> FnOnce(&mut LayerCx<'b>) + 'static) {
        self.deferred.push_back(Box::new(f));
    }

    /// Drain deferred setup, including setup deferred while draining
    pub(crate) fn finish(mut self) {
        while let Some(f) = self.deferred.pop_front() {
            f(&mut self);
        }
    }
}
