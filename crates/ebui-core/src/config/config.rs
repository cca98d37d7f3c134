// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Top-level configuration struct

/// Engine configuration
///
/// Both limits guard a frame against unbounded work: a handler re-firing its
/// own event forever, or a render callback deferring itself forever.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Max deferred actions run by one [`crate::event::Scheduler::flush_deferred`]
    ///
    /// Further actions are postponed to the next flush.
    #[cfg_attr(feature = "serde", serde(default = "defaults::flush_limit"))]
    pub flush_limit: usize,

    /// Max deferred render callbacks run by one drain
    ///
    /// Further callbacks are dropped.
    #[cfg_attr(feature = "serde", serde(default = "defaults::deferred_render_limit"))]
    pub deferred_render_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            flush_limit: defaults::flush_limit(),
            deferred_render_limit: defaults::deferred_render_limit(),
        }
    }
}

mod defaults {
    pub fn flush_limit() -> usize {
        100_000
    }

    pub fn deferred_render_limit() -> usize {
        10_000
    }
}
