//! Error types for flag dictionary definition and validation.

use thiserror::Error;

/// Reasons a flag dictionary is rejected by [crate::dictionary::DictionaryValidator].
///
/// Positions are zero-based indexes into the raw definition list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictionaryError {
    /// A key is not an exact integer (numeric strings and floats included).
    #[error("flag key at position {index} is not an integer: {found}")]
    NonIntegerKey { index: usize, found: String },
    /// A flag name is not a string.
    #[error("flag name at position {index} is not a string: {found}")]
    NonStringName { index: usize, found: String },
    /// The same key is defined more than once.
    #[error("flag key {key} is defined more than once")]
    DuplicateKey { key: i64 },
    /// Two keys map to the same name.
    #[error("flag name {name:?} is used by more than one key")]
    DuplicateName { name: String },
}

/// Errors produced when a raw dictionary definition has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// A flat `[key, name, key, name, ...]` list has a trailing key without a name.
    #[error("flat flag list has {len} elements; keys and names must come in pairs")]
    UnpairedEntry { len: usize },
}
