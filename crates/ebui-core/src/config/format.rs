// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Config file formats

#[cfg(feature = "serde")]
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use thiserror::Error;

type BoxedError = Box<dyn std::error::Error>;

/// Config read/write errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to parse {format} config")]
    Parse {
        format: Format,
        #[source]
        source: BoxedError,
    },

    #[error("failed to serialise config as {format}")]
    Serialise {
        format: Format,
        #[source]
        source: BoxedError,
    },

    #[error("error reading / writing config file")]
    Io(#[from] std::io::Error),

    #[error("format not supported: {0}")]
    UnsupportedFormat(Format),
}

#[cfg(feature = "serde")]
fn parse_err<E: std::error::Error + 'static>(format: Format) -> impl FnOnce(E) -> Error {
    move |e| Error::Parse {
        format,
        source: Box::new(e),
    }
}

#[cfg(feature = "serde")]
fn ser_err<E: std::error::Error + 'static>(format: Format) -> impl FnOnce(E) -> Error {
    move |e| Error::Serialise {
        format,
        source: Box::new(e),
    }
}

/// Config file formats
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Error)]
pub enum Format {
    /// Unspecified
    #[default]
    #[error("no format")]
    None,

    #[error("JSON")]
    Json,

    #[error("TOML")]
    Toml,

    #[error("YAML")]
    Yaml,

    #[error("RON")]
    Ron,

    /// The extension was missing or not recognised
    #[error("(unknown format)")]
    Unknown,
}

impl Format {
    /// Guess from the file extension (case-insensitive)
    ///
    /// The file is not opened. Whether the format can actually be used
    /// depends on enabled crate features.
    pub fn guess_from_path(path: &Path) -> Format {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Format::Json,
            Some("toml") => Format::Toml,
            Some("yaml" | "yml") => Format::Yaml,
            Some("ron") => Format::Ron,
            _ => Format::Unknown,
        }
    }

    /// Parse `text` in this format
    #[cfg(feature = "serde")]
    pub fn parse_str<T: DeserializeOwned>(self, text: &str) -> Result<T, Error> {
        let _ = text;
        match self {
            #[cfg(feature = "json")]
            Format::Json => serde_json::from_str(text).map_err(parse_err(self)),
            #[cfg(feature = "yaml")]
            Format::Yaml => serde_yaml2::from_str(text).map_err(parse_err(self)),
            #[cfg(feature = "ron")]
            Format::Ron => ron::from_str(text).map_err(parse_err(self)),
            #[cfg(feature = "toml")]
            Format::Toml => toml::from_str(text).map_err(parse_err(self)),
            _ => Err(Error::UnsupportedFormat(self)),
        }
    }

    /// Serialise `value` in this format
    #[cfg(feature = "serde")]
    pub fn serialise<T: Serialize>(self, value: &T) -> Result<String, Error> {
        let _ = value;
        match self {
            #[cfg(feature = "json")]
            Format::Json => serde_json::to_string_pretty(value).map_err(ser_err(self)),
            #[cfg(feature = "yaml")]
            Format::Yaml => serde_yaml2::to_string(value).map_err(ser_err(self)),
            #[cfg(feature = "ron")]
            Format::Ron => ron::ser::to_string_pretty(value, Default::default())
                .map_err(ser_err(self)),
            #[cfg(feature = "toml")]
            Format::Toml => toml::to_string(value).map_err(ser_err(self)),
            _ => Err(Error::UnsupportedFormat(self)),
        }
    }

    /// Read from a path
    #[cfg(feature = "serde")]
    pub fn read_path<T: DeserializeOwned>(self, path: &Path) -> Result<T, Error> {
        log::info!("read_path: path={}, format={self:?}", path.display());
        if matches!(self, Format::None | Format::Unknown) {
            return Err(Error::UnsupportedFormat(self));
        }
        let text = std::fs::read_to_string(path)?;
        self.parse_str(&text)
    }

    /// Write to a path
    ///
    /// The document is serialised in full before the file is touched.
    #[cfg(feature = "serde")]
    pub fn write_path<T: Serialize>(self, path: &Path, value: &T) -> Result<(), Error> {
        log::info!("write_path: path={}, format={self:?}", path.display());
        let text = self.serialise(value)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Guess format and read from a path
    #[cfg(feature = "serde")]
    #[inline]
    pub fn guess_and_read_path<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
        Self::guess_from_path(path).read_path(path)
    }

    /// Guess format and write to a path
    #[cfg(feature = "serde")]
    #[inline]
    pub fn guess_and_write_path<T: Serialize>(path: &Path, value: &T) -> Result<(), Error> {
        Self::guess_from_path(path).write_path(path, value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn guess() {
        assert_eq!(Format::guess_from_path(Path::new("a/b.json")), Format::Json);
        assert_eq!(Format::guess_from_path(Path::new("ui.TOML")), Format::Toml);
        assert_eq!(Format::guess_from_path(Path::new("ui.yml")), Format::Yaml);
        assert_eq!(Format::guess_from_path(Path::new("ui.ron")), Format::Ron);
        assert_eq!(Format::guess_from_path(Path::new("ui.txt")), Format::Unknown);
        assert_eq!(Format::guess_from_path(Path::new("ui")), Format::Unknown);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unknown_format_is_an_error() {
        let r: Result<crate::config::Config, _> = Format::Unknown.read_path(Path::new("x"));
        assert!(matches!(r, Err(Error::UnsupportedFormat(Format::Unknown))));
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_parse_error_names_format() {
        let r: Result<crate::config::Config, _> = Format::Json.parse_str("{ not json");
        let err = r.unwrap_err();
        assert_eq!(err.to_string(), "failed to parse JSON config");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[cfg(feature = "json")]
    #[test]
    fn missing_fields_use_defaults() {
        let config: crate::config::Config = Format::Json.parse_str("{}").unwrap();
        assert_eq!(config, crate::config::Config::default());
    }
}
