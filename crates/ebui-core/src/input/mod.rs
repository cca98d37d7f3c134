// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Input state and input layers
//!
//! The host engine polls devices; this module keeps a per-frame snapshot
//! ([`InputState`]) with press/release edges, and the per-frame
//! [`LayerStack`] deciding which [`InputLayer`] receives input at a point.

mod layer;

pub use layer::{InputLayer, LayerCx, LayerEventTypes, LayerStack};

use crate::geom::Coord;

/// Mouse buttons tracked by widgets
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    Left = 0,
    Middle = 1,
    Right = 2,
}

impl MouseButton {
    /// All tracked buttons
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Middle, MouseButton::Right];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Device polling, implemented by the host engine
pub trait InputSource {
    /// Cursor position in screen coordinates
    fn cursor_position(&self) -> Coord;

    /// Whether a mouse button is currently held
    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool;

    /// Wheel movement since the last frame
    fn wheel(&self) -> (f64, f64) {
        (0.0, 0.0)
    }
}

/// Input snapshot for one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    cursor: Coord,
    pressed: [bool; 3],
    just_pressed: [bool; 3],
    just_released: [bool; 3],
    wheel: (f64, f64),
}

impl InputState {
    /// Refresh from the host's devices
    ///
    /// Call once per frame; edges are relative to the previous call.
    pub fn update(&mut self, source: &dyn InputSource) {
        self.cursor = source.cursor_position();
        for button in MouseButton::ALL {
            let i = button.index();
            let pressed = source.is_mouse_button_pressed(button);
            self.just_pressed[i] = pressed && !self.pressed[i];
            self.just_released[i] = !pressed && self.pressed[i];
            self.pressed[i] = pressed;
        }
        self.wheel = source.wheel();
    }

    /// Cursor position
    #[inline]
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Whether `button` is held
    #[inline]
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.pressed[button.index()]
    }

    /// Whether `button` went down this frame
    #[inline]
    pub fn is_just_pressed(&self, button: MouseButton) -> bool {
        self.just_pressed[button.index()]
    }

    /// Whether `button` went up this frame
    #[inline]
    pub fn is_just_released(&self, button: MouseButton) -> bool {
        self.just_released[button.index()]
    }

    /// Wheel movement this frame
    #[inline]
    pub fn wheel(&self) -> (f64, f64) {
        self.wheel
    }
}
