//! Flag dictionaries and their validation.

use std::collections::HashSet;

use crate::{
    errors::DictionaryError,
    raw::{RawDictionary, RawScalar},
};

/// A single named flag: a bitmask key and its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub mask: i64,
    pub name: String,
}

impl Flag {
    /// True when every bit of this flag's mask is also set in `value`.
    #[inline]
    pub fn is_set_in(&self, value: i64) -> bool {
        self.mask & value == self.mask
    }
}

/// A validated, immutable mapping from bitmask keys to flag names.
///
/// Flags keep their definition order, which is also the order of decoded
/// names. Keys and names are unique. Build one with
/// [FlagDictionary::from_flags] or by validating a [RawDictionary].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDictionary {
    flags: Vec<Flag>,
}

impl FlagDictionary {
    /// Builds a dictionary from typed `(mask, name)` pairs.
    ///
    /// Fails on a repeated mask or a repeated name.
    pub fn from_flags<I, S>(flags: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        let flags = flags
            .into_iter()
            .map(|(mask, name)| Flag {
                mask,
                name: name.into(),
            })
            .collect();

        check_unique(flags)
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Names of the flags whose mask is a submask of `value`, in definition order.
    pub fn matching(&self, value: i64) -> impl Iterator<Item = &str> + '_ {
        self.flags
            .iter()
            .filter(move |flag| flag.is_set_in(value))
            .map(|flag| flag.name.as_str())
    }
}

impl TryFrom<&RawDictionary> for FlagDictionary {
    type Error = DictionaryError;

    fn try_from(raw: &RawDictionary) -> Result<Self, Self::Error> {
        DictionaryValidator::validate(raw).into_result()
    }
}

impl TryFrom<RawDictionary> for FlagDictionary {
    type Error = DictionaryError;

    fn try_from(raw: RawDictionary) -> Result<Self, Self::Error> {
        FlagDictionary::try_from(&raw)
    }
}

/// Result of validating a [RawDictionary].
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid(FlagDictionary),
    Invalid(DictionaryError),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }

    pub fn into_result(self) -> Result<FlagDictionary, DictionaryError> {
        match self {
            ValidationOutcome::Valid(dictionary) => Ok(dictionary),
            ValidationOutcome::Invalid(err) => Err(err),
        }
    }
}

/// Checks raw flag definitions and turns them into a [FlagDictionary].
///
/// Rules are applied in order and the first failure wins:
/// 1. every key is an exact integer,
/// 2. every name is a string,
/// 3. no key is repeated,
/// 4. no name is repeated.
pub struct DictionaryValidator;

impl DictionaryValidator {
    pub fn validate(raw: &RawDictionary) -> ValidationOutcome {
        match Self::check(raw) {
            Ok(dictionary) => ValidationOutcome::Valid(dictionary),
            Err(err) => ValidationOutcome::Invalid(err),
        }
    }

    fn check(raw: &RawDictionary) -> Result<FlagDictionary, DictionaryError> {
        let mut masks = Vec::with_capacity(raw.len());
        for (index, (key, _)) in raw.entries.iter().enumerate() {
            let mask = key.as_mask().ok_or_else(|| DictionaryError::NonIntegerKey {
                index,
                found: key.to_string(),
            })?;
            masks.push(mask);
        }

        let mut flags = Vec::with_capacity(raw.len());
        for (index, ((_, name), mask)) in raw.entries.iter().zip(masks).enumerate() {
            let name = match name {
                RawScalar::Text(name) => name.clone(),
                other => {
                    return Err(DictionaryError::NonStringName {
                        index,
                        found: other.to_string(),
                    });
                }
            };
            flags.push(Flag { mask, name });
        }

        check_unique(flags)
    }
}

fn check_unique(flags: Vec<Flag>) -> Result<FlagDictionary, DictionaryError> {
    let mut masks = HashSet::with_capacity(flags.len());
    for flag in &flags {
        if !masks.insert(flag.mask) {
            return Err(DictionaryError::DuplicateKey { key: flag.mask });
        }
    }

    let mut names = HashSet::with_capacity(flags.len());
    for flag in &flags {
        if !names.insert(flag.name.as_str()) {
            return Err(DictionaryError::DuplicateName {
                name: flag.name.clone(),
            });
        }
    }

    Ok(FlagDictionary { flags })
}
