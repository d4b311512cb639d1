// SPDX-License-Identifier: MPL-2.0
//! Error type shared across page loading, media decoding and configuration.
//!
//! Errors carry owned strings rather than source errors so they stay `Clone`
//! and can travel inside Iced messages.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("image decoding error: {0}")]
    Image(String),

    #[error("SVG error: {0}")]
    Svg(String),

    #[error("page parse error: {0}")]
    Parse(String),

    #[error("config error: {0}")]
    Config(String),

    /// Source that is never fetched (remote URL, data URL).
    #[error("unsupported image source: {0}")]
    UnsupportedSource(String),
}

impl Error {
    /// Returns the i18n message key describing this error category.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Image(_) | Error::Svg(_) | Error::UnsupportedSource(_) => "error-media",
            Error::Parse(_) => "error-parse",
            Error::Config(_) => "error-config",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_error_converts_with_message() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, Error::Io(ref msg) if msg.contains("missing")));
        assert_eq!(err.i18n_key(), "error-io");
    }

    #[test]
    fn media_errors_share_a_key() {
        assert_eq!(Error::Image("x".into()).i18n_key(), "error-media");
        assert_eq!(Error::Svg("x".into()).i18n_key(), "error-media");
        assert_eq!(
            Error::UnsupportedSource("https://a/b.png".into()).i18n_key(),
            "error-media"
        );
    }

    #[test]
    fn display_includes_category() {
        let err = Error::Parse("unexpected eof".into());
        assert_eq!(err.to_string(), "page parse error: unexpected eof");
    }
}
