//! Configuration errors. All of them stop the filter from being built.

use std::path::PathBuf;

use flagcraft::errors::DictionaryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `dictionary` and `dictionary_path` were both given.
    #[error("`dictionary` and `dictionary_path` are mutually exclusive")]
    ConflictingDictionarySources,
    /// Neither `dictionary` nor `dictionary_path` was given.
    #[error("one of `dictionary` or `dictionary_path` is required")]
    MissingDictionary,
    /// A required field name option is empty.
    #[error("option `{0}` must not be empty")]
    EmptyOption(&'static str),
    /// The dictionary file could not be read.
    #[error("failed to read dictionary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The dictionary file is not a valid dictionary document.
    #[error("failed to parse dictionary file {path}: {source}")]
    DictionaryFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The configuration document itself is malformed.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// The dictionary failed validation.
    #[error("invalid flag dictionary: {0}")]
    InvalidDictionary(#[from] DictionaryError),
}
