// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Locating and loading the config file

#[cfg(feature = "serde")]
use super::Format;
use super::{Config, Error};
use std::path::PathBuf;

/// What to do with the config file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConfigMode {
    /// Read on start-up only
    #[default]
    Read,
    /// Read on start-up; [`Options::write_config`] saves changes
    ReadWrite,
    /// Ignore the file's contents and overwrite it with the defaults
    WriteDefault,
}

impl ConfigMode {
    /// Parse a mode name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        [
            ("read", ConfigMode::Read),
            ("readwrite", ConfigMode::ReadWrite),
            ("writedefault", ConfigMode::WriteDefault),
        ]
        .into_iter()
        .find(|(key, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, mode)| mode)
    }
}

/// Where config comes from
///
/// With an empty `config_path` no file is used: [`Options::read_config`]
/// yields the defaults and [`Options::write_config`] does nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Options {
    pub config_path: PathBuf,
    pub config_mode: ConfigMode,
}

impl Options {
    /// Construct from environment variables
    ///
    /// -   `EBUI_CONFIG`: path of the config file; its format is guessed from
    ///     the extension (see [`crate::config::Format::guess_from_path`])
    /// -   `EBUI_CONFIG_MODE`: one of `Read` (default), `ReadWrite` or
    ///     `WriteDefault` (see [`ConfigMode`]), case-insensitive
    ///
    /// An unrecognised mode is logged and ignored.
    pub fn from_env() -> Self {
        let config_path = std::env::var_os("EBUI_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_default();

        let config_mode = match std::env::var("EBUI_CONFIG_MODE") {
            Ok(name) => ConfigMode::parse(&name).unwrap_or_else(|| {
                log::error!("Options::from_env: unknown EBUI_CONFIG_MODE={name:?}; using Read");
                ConfigMode::Read
            }),
            Err(_) => ConfigMode::Read,
        };

        Options {
            config_path,
            config_mode,
        }
    }

    fn has_file(&self) -> bool {
        !self.config_path.as_os_str().is_empty()
    }

    /// Load config according to the mode
    ///
    /// Without feature `serde` this always yields the defaults. In
    /// [`ConfigMode::WriteDefault`], a failure to write is logged and the
    /// defaults are still returned.
    pub fn read_config(&self) -> Result<Config, Error> {
        #[cfg(feature = "serde")]
        if self.has_file() {
            let path = &self.config_path;
            if self.config_mode == ConfigMode::WriteDefault {
                let config = Config::default();
                if let Err(error) = Format::guess_and_write_path(path, &config) {
                    crate::util::warn_about_error("Options::read_config: writing defaults", &error);
                }
                return Ok(config);
            }
            return Format::guess_and_read_path(path);
        }

        Ok(Config::default())
    }

    /// Save `config`, in [`ConfigMode::ReadWrite`] only
    pub fn write_config(&self, config: &Config) -> Result<(), Error> {
        if !self.has_file() || self.config_mode != ConfigMode::ReadWrite {
            return Ok(());
        }
        #[cfg(feature = "serde")]
        return Format::guess_and_write_path(&self.config_path, config);

        #[cfg(not(feature = "serde"))]
        {
            let _ = config;
            Ok(())
        }
    }
}
