// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Typed deferred events

use super::Scheduler;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Handler<A> = Rc<dyn Fn(&A)>;

struct Handlers<A> {
    list: RefCell<Vec<(u64, Handler<A>)>>,
    next_id: Cell<u64>,
}

impl<A> Handlers<A> {
    fn contains(&self, id: u64) -> bool {
        self.list.borrow().iter().any(|(i, _)| *i == id)
    }

    fn notify(&self, args: &A) {
        // Snapshot: handlers may add or remove handlers of this event
        let snapshot: Vec<(u64, Handler<A>)> = self.list.borrow().clone();
        for (id, handler) in snapshot {
            if self.contains(id) {
                handler(args);
            }
        }
    }
}

/// An event with payload type `A`
///
/// Handlers are called in registration order. Both [`Event::fire`] and
/// [`Event::add_handler`] are deferred via the [`Scheduler`] passed on
/// construction; see the [module documentation](super).
///
/// Cloning yields another handle to the same event.
pub struct Event<A: 'static> {
    handlers: Rc<Handlers<A>>,
    sched: Scheduler,
}

impl<A: 'static> Clone for Event<A> {
    fn clone(&self) -> Self {
        Event {
            handlers: self.handlers.clone(),
            sched: self.sched.clone(),
        }
    }
}

impl<A: 'static> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("handlers", &self.handlers.list.borrow().len())
            .finish_non_exhaustive()
    }
}

impl<A: 'static> Event<A> {
    /// Construct with no handlers
    pub fn new(sched: &Scheduler) -> Self {
        Event {
            handlers: Rc::new(Handlers {
                list: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
            sched: sched.clone(),
        }
    }

    /// The scheduler this event queues on
    #[inline]
    pub fn scheduler(&self) -> &Scheduler {
        &self.sched
    }

    /// Number of live handlers
    ///
    /// Registrations still pending a flush are not counted.
    pub fn handler_count(&self) -> usize {
        self.handlers.list.borrow().len()
    }

    /// Register a handler
    ///
    /// The handler becomes live on the next [`Scheduler::flush_deferred`],
    /// after that flush has delivered all queued notifications.
    pub fn add_handler(&self, f: impl Fn(&A) + 'static) -> RemoveHandler {
        let id = self.handlers.next_id.get();
        self.handlers.next_id.set(id + 1);

        let cancelled = Rc::new(Cell::new(false));
        let handler: Handler<A> = Rc::new(f);
        let weak = Rc::downgrade(&self.handlers);
        let flag = cancelled.clone();
        self.sched.defer_registration(move || {
            if flag.get() {
                return;
            }
            if let Some(handlers) = weak.upgrade() {
                handlers.list.borrow_mut().push((id, handler));
            }
        });

        let weak: Weak<Handlers<A>> = Rc::downgrade(&self.handlers);
        RemoveHandler(Some(Box::new(move || {
            cancelled.set(true);
            if let Some(handlers) = weak.upgrade() {
                handlers.list.borrow_mut().retain(|(i, _)| *i != id);
            }
        })))
    }

    /// Queue a notification of all handlers with `args`
    ///
    /// Handlers live at the time the notification is delivered are called.
    /// Firing an event without handlers is a no-op.
    pub fn fire(&self, args: A) {
        let handlers = self.handlers.clone();
        self.sched.defer(move || handlers.notify(&args));
    }
}

/// Token returned by [`Event::add_handler`]
///
/// Call [`RemoveHandler::remove`] to unregister the handler. Removal is
/// immediate and also cancels a registration still waiting for a flush.
/// Dropping the token does *not* remove the handler.
#[must_use = "dropping the token leaves the handler registered"]
pub struct RemoveHandler(Option<Box<dyn FnOnce()>>);

impl fmt::Debug for RemoveHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RemoveHandler")
    }
}

impl RemoveHandler {
    /// Unregister the handler
    pub fn remove(mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }
}
