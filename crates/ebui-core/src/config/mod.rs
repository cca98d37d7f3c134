// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Configuration
//!
//! [`Config`] holds the engine's tunables. [`Options::from_env`] locates an
//! optional config file, read and written in one of the [`Format`]s enabled
//! by crate features.

mod config;
mod format;
mod options;

pub use config::Config;
pub use format::{Error, Format};
pub use options::{ConfigMode, Options};
