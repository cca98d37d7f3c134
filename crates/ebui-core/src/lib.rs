// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! ebui core: widget tree, layout and deferred scheduling
//!
//! A retained-mode widget toolkit core for 2D game engines. The host engine
//! supplies input ([`input::InputSource`]) and a render target
//! ([`render::Surface`]); this crate keeps the widget tree, computes layout
//! and derives widget events.
//!
//! Per frame the host calls [`Ui::update`] (flush deferred events, refresh
//! input) then [`Ui::draw`] (input-layer setup, layout of dirty containers,
//! render, then deferred rendering of overlays).

pub extern crate easy_cast as cast;

// internal modules:
mod container;
mod core;
mod root;
mod window;

// public implementations:
pub mod config;
pub mod dir;
pub mod event;
pub mod geom;
pub mod input;
pub mod layout;
pub mod render;
pub mod util;

pub use crate::core::*;
pub use container::{Container, ContainerBuilder, RemoveChild};
pub use root::Ui;
pub use window::Window;
