//! Filter configuration as read from a pipeline definition.
//!
//! ```text
//! {
//!   "field": "input",
//!   "destination": "output",
//!   "dictionary": [1, "Flag_1", 2, "Flag_2", 4, "Flag_4"],
//!   "separator": "|",
//!   "override": false,
//!   "tag_on_failure": ["_flagparsefailure"]
//! }
//! ```

use std::path::{Path, PathBuf};

use flagcraft::raw::RawDictionary;
use serde::Deserialize;

use crate::{error::ConfigError, source};

/// Tag appended to a record when its flags cannot be decoded.
pub const DEFAULT_FAILURE_TAG: &str = "_flagparsefailure";

fn default_tag_on_failure() -> Vec<String> {
    vec![DEFAULT_FAILURE_TAG.to_string()]
}

/// What to do when the dictionary fails validation at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidDictionaryPolicy {
    /// Refuse to build the filter.
    #[default]
    Reject,
    /// Build the filter anyway and tag every record it sees.
    Tag,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BitflagsConfig {
    /// Field holding the value to decode.
    pub field: String,
    /// Field receiving the decoded flag names.
    pub destination: String,
    /// Inline flag definitions.
    #[serde(default)]
    pub dictionary: Option<RawDictionary>,
    /// JSON file with flag definitions, in any shape accepted for `dictionary`.
    #[serde(default)]
    pub dictionary_path: Option<PathBuf>,
    /// Join matched names with this separator instead of producing a list.
    #[serde(default)]
    pub separator: Option<String>,
    /// Replace a destination value that is already present.
    #[serde(default, rename = "override")]
    pub overwrite: bool,
    #[serde(default = "default_tag_on_failure")]
    pub tag_on_failure: Vec<String>,
    #[serde(default)]
    pub on_invalid_dictionary: InvalidDictionaryPolicy,
}

impl BitflagsConfig {
    /// Creates a config with an inline dictionary and default options.
    pub fn new(
        field: impl Into<String>,
        destination: impl Into<String>,
        dictionary: RawDictionary,
    ) -> Self {
        Self {
            field: field.into(),
            destination: destination.into(),
            dictionary: Some(dictionary),
            dictionary_path: None,
            separator: None,
            overwrite: false,
            tag_on_failure: default_tag_on_failure(),
            on_invalid_dictionary: InvalidDictionaryPolicy::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn set_separator(&mut self, separator: impl Into<String>) -> &mut Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn set_overwrite(&mut self, overwrite: bool) -> &mut Self {
        self.overwrite = overwrite;
        self
    }

    pub fn set_tag_on_failure<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_on_failure = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_on_invalid_dictionary(&mut self, policy: InvalidDictionaryPolicy) -> &mut Self {
        self.on_invalid_dictionary = policy;
        self
    }

    fn inline_dictionary(&self) -> Option<&RawDictionary> {
        self.dictionary.as_ref().filter(|d| !d.is_empty())
    }

    fn dictionary_file(&self) -> Option<&Path> {
        self.dictionary_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Checks required options and returns the raw dictionary from whichever
    /// source is configured.
    pub fn resolve_dictionary(&self) -> Result<RawDictionary, ConfigError> {
        if self.field.is_empty() {
            return Err(ConfigError::EmptyOption("field"));
        }
        if self.destination.is_empty() {
            return Err(ConfigError::EmptyOption("destination"));
        }

        match (self.inline_dictionary(), self.dictionary_file()) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingDictionarySources),
            (Some(dictionary), None) => Ok(dictionary.clone()),
            (None, Some(path)) => source::load_dictionary(path),
            (None, None) => Err(ConfigError::MissingDictionary),
        }
    }
}

#[cfg(test)]
mod tests {
    use flagcraft::raw::RawScalar;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = BitflagsConfig::from_json_str(
            r#"{"field": "input", "destination": "output", "dictionary": [1, "Flag_1"]}"#,
        )
        .unwrap();

        assert_eq!(config.separator, None);
        assert!(!config.overwrite);
        assert_eq!(config.tag_on_failure, vec!["_flagparsefailure".to_string()]);
        assert_eq!(config.on_invalid_dictionary, InvalidDictionaryPolicy::Reject);
        assert_eq!(
            config.resolve_dictionary().unwrap(),
            RawDictionary::from_iter([(1, "Flag_1")])
        );
    }

    #[test]
    fn test_all_options() {
        let config = BitflagsConfig::from_json_str(
            r#"{
                "field": "input",
                "destination": "output",
                "dictionary": [[1, "Flag_1"]],
                "separator": ",",
                "override": true,
                "tag_on_failure": ["_a", "_b"],
                "on_invalid_dictionary": "tag"
            }"#,
        )
        .unwrap();

        assert_eq!(config.separator.as_deref(), Some(","));
        assert!(config.overwrite);
        assert_eq!(config.tag_on_failure, vec!["_a".to_string(), "_b".to_string()]);
        assert_eq!(config.on_invalid_dictionary, InvalidDictionaryPolicy::Tag);
    }

    #[test]
    fn test_unknown_option() {
        let err = BitflagsConfig::from_json_str(
            r#"{"field": "a", "destination": "b", "dictionary": [], "flags": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_conflicting_sources() {
        let mut config = BitflagsConfig::new("a", "b", RawDictionary::from_iter([(1, "x")]));
        config.dictionary_path = Some(PathBuf::from("flags.json"));

        assert!(matches!(
            config.resolve_dictionary(),
            Err(ConfigError::ConflictingDictionarySources)
        ));
    }

    #[test]
    fn test_empty_sources_count_as_missing() {
        let mut config = BitflagsConfig::new("a", "b", RawDictionary::new());
        config.dictionary_path = Some(PathBuf::new());

        assert!(matches!(
            config.resolve_dictionary(),
            Err(ConfigError::MissingDictionary)
        ));
    }

    #[test]
    fn test_empty_field_name() {
        let config = BitflagsConfig::new("", "b", RawDictionary::from_iter([(1, "x")]));
        assert!(matches!(
            config.resolve_dictionary(),
            Err(ConfigError::EmptyOption("field"))
        ));
    }

    #[test]
    fn test_inline_dictionary_keeps_loose_types() {
        let config = BitflagsConfig::from_json_str(
            r#"{"field": "a", "destination": "b", "dictionary": [1, "Flag_1", "4", "Flag_4"]}"#,
        )
        .unwrap();

        let raw = config.resolve_dictionary().unwrap();
        assert_eq!(raw.entries[1].0, RawScalar::Text("4".to_string()));
    }
}
