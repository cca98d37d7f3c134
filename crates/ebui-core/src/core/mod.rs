// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Core widget types
//!
//! [`Widget`] is the base state embedded by every concrete widget, and
//! [`Node`] the trait through which containers and layouts reach it.

mod node;
mod widget;

pub use node::{DEFAULT_PREFERRED_SIZE, DropTarget, Focuser, Node, NodeRef, WidgetRef, node_eq};
pub use widget::{Visibility, Widget, WidgetEvents};
