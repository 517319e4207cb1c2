//! Page error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring or setting up the scan page
#[derive(Error, Debug)]
pub enum ScanError {
    /// A section the layout depends on is absent
    #[error("required section '{0}' is missing from the page layout")]
    MissingSection(String),

    /// Layout numbers that cannot describe a page
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// An ease name that does not map to a known curve
    #[error("unknown ease '{0}'")]
    UnknownEase(String),

    /// A colour that is not `#rrggbb`
    #[error("invalid colour '{0}' (expected #rrggbb)")]
    InvalidColor(String),

    #[error(transparent)]
    Core(#[from] scanbox_core::CoreError),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for page operations
pub type Result<T> = std::result::Result<T, ScanError>;
