//! Unvalidated flag definitions as they arrive from configuration.

use std::fmt;

use crate::errors::DefinitionError;

/// A loosely-typed scalar taken from a configuration source.
///
/// Both keys and names of a [RawDictionary] are kept in this form until
/// [crate::dictionary::DictionaryValidator] checks them.
#[derive(Debug, Clone, PartialEq)]
pub enum RawScalar {
    Int(i64),
    /// Unsigned integer that does not fit in `i64`.
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
    /// An array or object.
    Composite,
}

impl RawScalar {
    /// Returns the value as a 64-bit flag mask if it is an exact integer.
    ///
    /// Unsigned values above `i64::MAX` keep their bit pattern.
    pub fn as_mask(&self) -> Option<i64> {
        match self {
            RawScalar::Int(v) => Some(*v),
            RawScalar::UInt(v) => Some(*v as i64),
            _ => None,
        }
    }
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawScalar::Int(v) => write!(f, "integer {v}"),
            RawScalar::UInt(v) => write!(f, "integer {v}"),
            RawScalar::Float(v) => write!(f, "float {v}"),
            RawScalar::Bool(v) => write!(f, "boolean {v}"),
            RawScalar::Text(s) => write!(f, "string {s:?}"),
            RawScalar::Null => write!(f, "null"),
            RawScalar::Composite => write!(f, "array or object"),
        }
    }
}

impl From<i64> for RawScalar {
    fn from(value: i64) -> Self {
        RawScalar::Int(value)
    }
}

impl From<i32> for RawScalar {
    fn from(value: i32) -> Self {
        RawScalar::Int(value.into())
    }
}

impl From<u64> for RawScalar {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => RawScalar::Int(v),
            Err(_) => RawScalar::UInt(value),
        }
    }
}

impl From<&str> for RawScalar {
    fn from(value: &str) -> Self {
        RawScalar::Text(value.to_string())
    }
}

impl From<String> for RawScalar {
    fn from(value: String) -> Self {
        RawScalar::Text(value)
    }
}

impl From<f64> for RawScalar {
    fn from(value: f64) -> Self {
        RawScalar::Float(value)
    }
}

/// Ordered `(key, name)` definitions, repeated keys included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDictionary {
    pub entries: Vec<(RawScalar, RawScalar)>,
}

impl RawDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from a flat `[key, name, key, name, ...]` list.
    pub fn from_flat(items: Vec<RawScalar>) -> Result<Self, DefinitionError> {
        if items.len() % 2 != 0 {
            return Err(DefinitionError::UnpairedEntry { len: items.len() });
        }

        let mut entries = Vec::with_capacity(items.len() / 2);
        let mut iter = items.into_iter();
        while let (Some(key), Some(name)) = (iter.next(), iter.next()) {
            entries.push((key, name));
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, N> FromIterator<(K, N)> for RawDictionary
where
    K: Into<RawScalar>,
    N: Into<RawScalar>,
{
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, n)| (k.into(), n.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_pairs_in_order() {
        let raw = RawDictionary::from_flat(vec![
            RawScalar::Int(1),
            "Flag_1".into(),
            RawScalar::Int(2),
            "Flag_2".into(),
        ])
        .unwrap();

        assert_eq!(
            raw.entries,
            vec![
                (RawScalar::Int(1), RawScalar::Text("Flag_1".to_string())),
                (RawScalar::Int(2), RawScalar::Text("Flag_2".to_string())),
            ]
        );
    }

    #[test]
    fn test_from_flat_odd_length() {
        let err = RawDictionary::from_flat(vec![RawScalar::Int(1), "a".into(), RawScalar::Int(2)])
            .unwrap_err();
        assert_eq!(err, DefinitionError::UnpairedEntry { len: 3 });
    }

    #[test]
    fn test_as_mask() {
        assert_eq!(RawScalar::Int(-1).as_mask(), Some(-1));
        assert_eq!(RawScalar::UInt(u64::MAX).as_mask(), Some(-1));
        assert_eq!(RawScalar::Float(1.0).as_mask(), None);
        assert_eq!(RawScalar::Text("4".to_string()).as_mask(), None);
    }
}
