//! Error types for docs2dib operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a page or writing a notebook.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid CSS selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("No element matches the main content selector '{0}'")]
    MissingMain(String),

    #[error("Page address '{0}' leaves no topic name to export under")]
    EmptyTopic(String),

    #[error("Invalid page address: {0}")]
    Url(#[from] url::ParseError),

    #[cfg(feature = "browser")]
    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("Browser unavailable: {0}")]
    BrowserUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
