// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Deferred action queue

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

type Action = Box<dyn FnOnce()>;

struct State {
    actions: RefCell<VecDeque<Action>>,
    registrations: RefCell<Vec<Action>>,
    flush_limit: Cell<usize>,
}

/// Queue of deferred actions, shared by all events of one UI
///
/// A `Scheduler` is created once per UI instance and handed to every
/// [`super::Event`] on construction. Cloning yields another handle to the
/// same queues.
///
/// Two queues are kept: *actions* (event notifications and anything passed
/// to [`Scheduler::defer`]) and *registrations* (handlers added via
/// [`super::Event::add_handler`]). [`Scheduler::flush_deferred`] drains the
/// first, then applies the second.
#[derive(Clone)]
pub struct Scheduler(Rc<State>);

impl Default for Scheduler {
    fn default() -> Self {
        Scheduler::new()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("actions", &self.0.actions.borrow().len())
            .field("registrations", &self.0.registrations.borrow().len())
            .field("flush_limit", &self.0.flush_limit.get())
            .finish()
    }
}

impl Scheduler {
    /// Construct with the default flush limit
    pub fn new() -> Self {
        Scheduler::with_flush_limit(crate::config::Config::default().flush_limit)
    }

    /// Construct with the given flush limit
    ///
    /// See [`Scheduler::set_flush_limit`].
    pub fn with_flush_limit(limit: usize) -> Self {
        Scheduler(Rc::new(State {
            actions: Default::default(),
            registrations: Default::default(),
            flush_limit: Cell::new(limit),
        }))
    }

    /// Set the maximum number of actions run by one flush
    ///
    /// Actions beyond this limit stay queued for the next flush. This bounds
    /// the work done by a cascade of handlers which keep firing events.
    pub fn set_flush_limit(&self, limit: usize) {
        self.0.flush_limit.set(limit.max(1));
    }

    /// Queue an action to run on the next flush
    pub fn defer(&self, f: impl FnOnce() + 'static) {
        self.0.actions.borrow_mut().push_back(Box::new(f));
    }

    pub(crate) fn defer_registration(&self, f: impl FnOnce() + 'static) {
        self.0.registrations.borrow_mut().push(Box::new(f));
    }

    /// Number of queued actions
    pub fn pending(&self) -> usize {
        self.0.actions.borrow().len()
    }

    /// True if both queues are empty
    pub fn is_idle(&self) -> bool {
        self.0.actions.borrow().is_empty() && self.0.registrations.borrow().is_empty()
    }

    /// Run all queued actions, then apply queued handler registrations
    ///
    /// Actions run in FIFO order. Actions queued while flushing (e.g. events
    /// fired by a handler) run in the same flush, after those queued before.
    ///
    /// If the flush limit postpones actions, registrations stay queued until
    /// a flush empties the action queue: a handler never sees a notification
    /// queued before it was registered.
    ///
    /// Returns the number of actions run.
    pub fn flush_deferred(&self) -> usize {
        let limit = self.0.flush_limit.get();
        let mut count = 0;
        loop {
            // The borrow must end before the action runs: actions may queue more.
            let next = self.0.actions.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };
            action();
            count += 1;
            if count >= limit {
                let left = self.pending();
                if left > 0 {
                    log::warn!("flush_deferred: limit of {limit} reached; {left} actions postponed");
                    return count;
                }
                break;
            }
        }

        let registrations = std::mem::take(&mut *self.0.registrations.borrow_mut());
        for register in registrations {
            register();
        }

        count
    }
}
