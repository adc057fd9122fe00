use std::io;

use thiserror::Error;

/// Failures raised by the target registry and its persistence layers.
#[derive(Error, Debug)]
pub enum TargetError {
    #[error("target label must not be empty")]
    EmptyLabel,

    #[error("target label '{0}' already exists")]
    LabelExists(String),

    #[error("target label '{0}' not found")]
    LabelNotFound(String),

    /// The targets file exists but does not decode into a registry.
    #[error("your targets file is badly formatted: {0}")]
    BadFormat(String),

    /// Fewer bytes reached the targets file than were encoded.
    #[error("failed writing the targets file: wrote {written} of {expected} bytes; the file may be incomplete")]
    IncompleteWrite { written: usize, expected: usize },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed encoding targets: {0}")]
    Encode(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, TargetError>;
