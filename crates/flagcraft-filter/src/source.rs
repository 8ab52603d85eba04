//! Loading flag dictionaries from files.

use std::path::Path;

use flagcraft::raw::RawDictionary;

use crate::error::ConfigError;

/// Reads a JSON dictionary file.
///
/// The file holds one dictionary in any shape accepted inline: a flat
/// `[key, name, ...]` list, a list of pairs, or an object keyed by integer text.
pub fn load_dictionary(path: &Path) -> Result<RawDictionary, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dictionary =
        serde_json::from_str(&text).map_err(|source| ConfigError::DictionaryFile {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), "Loaded flag dictionary file");
    Ok(dictionary)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"1": "Flag_1", "2": "Flag_2"}}"#).unwrap();

        let raw = load_dictionary(file.path()).unwrap();
        assert_eq!(raw, RawDictionary::from_iter([(1, "Flag_1"), (2, "Flag_2")]));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        match load_dictionary(&path) {
            Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            load_dictionary(file.path()),
            Err(ConfigError::DictionaryFile { .. })
        ));
    }
}
