// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Deferred events
//!
//! Firing an [`Event`] never calls handlers directly. Instead a notification
//! is queued on the [`Scheduler`] which the host drains once per frame via
//! [`Scheduler::flush_deferred`] (usually through [`crate::Ui::update`]).
//! Handler registration is deferred the same way, and is applied only after
//! all queued notifications have run. A handler registered as a side effect
//! of some notification is therefore never called for that notification.
//!
//! Deferral decouples "fire" from "notify": widgets may fire events from
//! within layout or rendering without handlers mutating the widget tree
//! while it is being walked.

mod args;
mod handler;
mod scheduler;

pub use args::{
    PopupKind, WidgetContextMenuArgs, WidgetCursorArgs, WidgetFocusArgs, WidgetMouseButtonArgs,
    WidgetPopupArgs, WidgetScrolledArgs,
};
pub use handler::{Event, RemoveHandler};
pub use scheduler::Scheduler;
