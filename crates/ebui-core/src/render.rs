// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Render pass context and the deferred render queue
//!
//! Pixels are the host's business: the core only passes an opaque
//! [`Surface`] through the tree and asks [`Background`]s to draw themselves.
//!
//! During its own render, any widget may push extra work with
//! [`RenderCx::defer_render`]. The queue is drained after the initiating pass
//! completes, so an open drop-down, tool tip or drag ghost paints above all
//! normal content regardless of its owner's position in the tree. This is the
//! only z-order override; otherwise z-order is tree insertion order.

use crate::geom::{Coord, Rect};
use crate::input::{InputLayer, InputState, LayerEventTypes, LayerStack, MouseButton};
use std::any::Any;
use std::collections::VecDeque;
use std::fmt;

/// The host's render target
pub trait Surface {
    /// Access the host's concrete type
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Something drawn behind a widget (e.g. a nine-slice image)
pub trait Background: fmt::Debug {
    /// Draw over `rect`
    fn draw(&self, surface: &mut dyn Surface, rect: Rect);
}

type DeferredRenderFn = Box<dyn for<'b> FnOnce(&mut RenderCx<'b>)>;

/// FIFO of render callbacks deferred during a pass
#[derive(Default)]
pub struct DeferredRender(VecDeque<DeferredRenderFn>);

impl fmt::Debug for DeferredRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeferredRender({})", self.0.len())
    }
}

impl DeferredRender {
    /// Number of queued callbacks
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no callbacks are queued
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Context of a render pass
pub struct RenderCx<'a> {
    surface: &'a mut dyn Surface,
    input: &'a InputState,
    layers: &'a LayerStack,
    deferred: &'a mut DeferredRender,
    deferred_limit: usize,
}

impl<'a> RenderCx<'a> {
    /// Construct
    ///
    /// Normally [`crate::Ui::draw`] does this; direct use is for hosts and
    /// tests driving a tree without a [`crate::Ui`].
    pub fn new(
        surface: &'a mut dyn Surface,
        input: &'a InputState,
        layers: &'a LayerStack,
        deferred: &'a mut DeferredRender,
    ) -> Self {
        RenderCx {
            surface,
            input,
            layers,
            deferred,
            deferred_limit: crate::config::Config::default().deferred_render_limit,
        }
    }

    pub(crate) fn with_deferred_limit(mut self, limit: usize) -> Self {
        self.deferred_limit = limit.max(1);
        self
    }

    /// The render target
    #[inline]
    pub fn surface(&mut self) -> &mut dyn Surface {
        &mut *self.surface
    }

    /// Input snapshot for this frame
    #[inline]
    pub fn input(&self) -> &InputState {
        self.input
    }

    /// Input layers for this frame
    #[inline]
    pub fn layers(&self) -> &LayerStack {
        self.layers
    }

    /// Cursor position
    #[inline]
    pub fn cursor(&self) -> Coord {
        self.input.cursor()
    }

    /// Whether `layer` receives `types` input at the cursor
    pub fn cursor_active(&self, layer: &InputLayer, types: LayerEventTypes) -> bool {
        self.layers.active_for(layer, self.input.cursor(), types)
    }

    /// `button` went down this frame and `layer` owns mouse buttons at the cursor
    pub fn mouse_button_just_pressed(&self, button: MouseButton, layer: &InputLayer) -> bool {
        self.input.is_just_pressed(button)
            && self.cursor_active(layer, LayerEventTypes::MOUSE_BUTTON)
    }

    /// Wheel movement, if `layer` owns the wheel at the cursor
    pub fn wheel(&self, layer: &InputLayer) -> (f64, f64) {
        if self.cursor_active(layer, LayerEventTypes::WHEEL) {
            self.input.wheel()
        } else {
            (0.0, 0.0)
        }
    }

    /// Draw `f` after the current pass completes
    pub fn defer_render(&mut self, f: impl for<'b> FnOnce(&mut RenderCx<'b>) + 'static) {
        self.deferred.0.push_back(Box::new(f));
    }

    /// Run deferred callbacks in FIFO order
    ///
    /// Callbacks deferred while draining run in the same drain.
    pub fn drain_deferred(&mut self) {
        let mut count = 0;
        while let Some(f) = self.deferred.0.pop_front() {
            f(self);
            count += 1;
            if count >= self.deferred_limit {
                if !self.deferred.is_empty() {
                    log::warn!(
                        "drain_deferred: limit of {} reached; dropping {} callbacks",
                        self.deferred_limit,
                        self.deferred.len()
                    );
                    self.deferred.0.clear();
                }
                break;
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;

    /// A surface recording nothing
    #[derive(Debug, Default)]
    pub struct NullSurface;

    impl Surface for NullSurface {
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }
}
