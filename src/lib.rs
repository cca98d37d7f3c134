// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! ebui: a retained-mode widget toolkit for 2D game engines
//!
//! This crate is merely a wrapper over [`ebui_core`]. All of its items are
//! re-exported here (e.g. [`ebui::geom::Size`](crate::geom::Size)).
//!
//! The host engine implements [`input::InputSource`] and
//! [`render::Surface`], builds a tree of [`Container`]s holding its own
//! [`Node`] types, and drives a [`Ui`] once per frame:
//!
//! ```
//! use ebui::event::Scheduler;
//! use ebui::geom::{Coord, Rect, Size};
//! use ebui::input::{InputSource, MouseButton};
//! use ebui::layout::RowLayout;
//! use ebui::render::Surface;
//! use ebui::{Container, Ui};
//! use std::any::Any;
//!
//! struct Mouse;
//! impl InputSource for Mouse {
//!     fn cursor_position(&self) -> Coord {
//!         Coord(10, 10)
//!     }
//!     fn is_mouse_button_pressed(&self, _: MouseButton) -> bool {
//!         false
//!     }
//! }
//!
//! struct Screen;
//! impl Surface for Screen {
//!     fn as_any_mut(&mut self) -> &mut dyn Any {
//!         self
//!     }
//! }
//!
//! let sched = Scheduler::new();
//! let root = Container::builder()
//!     .with_layout(RowLayout::default())
//!     .build(&sched);
//! let mut ui = Ui::new(&sched, root);
//! ui.update(&Mouse);
//! ui.draw(&mut Screen, Rect::new(Coord::ZERO, Size(640, 480)));
//! ```
//!
//! The [easy-cast](https://docs.rs/easy-cast/0.5/easy_cast) library is re-exported as `ebui::cast`.

pub use ebui_core::*;
