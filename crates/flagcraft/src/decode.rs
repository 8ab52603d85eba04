//! A [`FlagDecoder`] turns an integer value into the names of its flags:
//! - **Matching**: a flag matches when its mask is a submask of the value
//!   (`mask & value == mask`). Names keep dictionary definition order.
//! - **Formatting**: names are returned as a list, or joined into one string
//!   when a separator is set.
//!
//! A decoder holds no state besides its dictionary, so one instance can be
//! shared between threads.

use crate::dictionary::FlagDictionary;

/// How matched names are presented.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One element per matched flag.
    #[default]
    List,
    /// All matched names joined with the given separator.
    Joined(String),
}

impl OutputFormat {
    /// `Joined` when a separator is given, `List` otherwise.
    pub fn from_separator(separator: Option<String>) -> Self {
        match separator {
            Some(separator) => OutputFormat::Joined(separator),
            None => OutputFormat::List,
        }
    }
}

/// Decoded flag names produced by [`FlagDecoder::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    List(Vec<String>),
    /// Joined names; empty when nothing matched.
    Joined(String),
}

impl Decoded {
    /// True when no flag matched.
    pub fn is_empty(&self) -> bool {
        match self {
            Decoded::List(names) => names.is_empty(),
            Decoded::Joined(joined) => joined.is_empty(),
        }
    }
}

/// Decodes values against a validated [`FlagDictionary`].
///
/// # Example
///
/// ```
/// use flagcraft::decode::{Decoded, FlagDecoder};
/// use flagcraft::dictionary::FlagDictionary;
///
/// let dictionary = FlagDictionary::from_flags([(1, "read"), (2, "write")]).unwrap();
/// let mut decoder = FlagDecoder::new(dictionary);
/// decoder.set_separator("|");
/// assert_eq!(decoder.decode(3), Decoded::Joined("read|write".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct FlagDecoder {
    dictionary: FlagDictionary,
    pub format: OutputFormat,
}

impl FlagDecoder {
    /// Creates a decoder producing lists.
    pub fn new(dictionary: FlagDictionary) -> Self {
        Self {
            dictionary,
            format: OutputFormat::List,
        }
    }

    /// Joins decoded names with `separator`.
    pub fn set_separator(&mut self, separator: impl Into<String>) -> &mut Self {
        self.format = OutputFormat::Joined(separator.into());
        self
    }

    pub fn set_format(&mut self, format: OutputFormat) -> &mut Self {
        self.format = format;
        self
    }

    /// Names of all flags set in `value`, in dictionary order.
    pub fn names(&self, value: i64) -> Vec<String> {
        self.dictionary
            .matching(value)
            .map(str::to_string)
            .collect()
    }

    /// Decodes `value` and applies the output format.
    pub fn decode(&self, value: i64) -> Decoded {
        let names = self.names(value);

        match &self.format {
            OutputFormat::List => Decoded::List(names),
            OutputFormat::Joined(separator) => Decoded::Joined(names.join(separator)),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn decoder() -> FlagDecoder {
        FlagDecoder::new(
            FlagDictionary::from_flags([
                (1, "Flag_1"),
                (2, "Flag_2"),
                (4, "Flag_4"),
                (8, "Flag_8"),
                (64, "Flag_64"),
            ])
            .unwrap(),
        )
    }

    fn list(names: &[&str]) -> Decoded {
        Decoded::List(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_single_match() {
        assert_eq!(decoder().decode(1), list(&["Flag_1"]));
    }

    #[test]
    fn test_multiple_match() {
        assert_eq!(
            decoder().decode(71),
            list(&["Flag_1", "Flag_2", "Flag_4", "Flag_64"])
        );
    }

    #[test]
    fn test_no_match() {
        let decoded = decoder().decode(32);
        assert_eq!(decoded, list(&[]));
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_joined() {
        let mut decoder = decoder();
        decoder.set_separator("|");

        assert_eq!(
            decoder.decode(71),
            Decoded::Joined("Flag_1|Flag_2|Flag_4|Flag_64".to_string())
        );
        assert_eq!(decoder.decode(32), Decoded::Joined(String::new()));
    }

    #[test]
    fn test_definition_order_not_numeric() {
        let decoder =
            FlagDecoder::new(FlagDictionary::from_flags([(8, "eight"), (1, "one")]).unwrap());
        assert_eq!(decoder.decode(9), list(&["eight", "one"]));
    }

    #[test]
    fn test_zero_key_is_submask_of_everything() {
        let decoder =
            FlagDecoder::new(FlagDictionary::from_flags([(0, "none"), (1, "one")]).unwrap());
        assert_eq!(decoder.decode(0), list(&["none"]));
        assert_eq!(decoder.decode(1), list(&["none", "one"]));
    }

    #[test]
    fn test_negative_value_sets_all_bits() {
        assert_eq!(
            decoder().decode(-1),
            list(&["Flag_1", "Flag_2", "Flag_4", "Flag_8", "Flag_64"])
        );
    }

    #[test]
    fn test_format_from_separator() {
        assert_eq!(OutputFormat::from_separator(None), OutputFormat::List);
        assert_eq!(
            OutputFormat::from_separator(Some(",".to_string())),
            OutputFormat::Joined(",".to_string())
        );
    }

    proptest! {
        #[test]
        fn prop_decode_selects_submasks(
            masks in proptest::collection::hash_set(any::<i64>(), 0..16),
            value in any::<i64>(),
        ) {
            let masks: Vec<i64> = masks.into_iter().collect();
            let dictionary = FlagDictionary::from_flags(
                masks.iter().map(|m| (*m, format!("flag_{m}"))),
            )
            .unwrap();
            let decoder = FlagDecoder::new(dictionary);

            let expected: Vec<String> = masks
                .iter()
                .filter(|m| *m & value == **m)
                .map(|m| format!("flag_{m}"))
                .collect();

            prop_assert_eq!(decoder.decode(value), Decoded::List(expected));
            prop_assert_eq!(decoder.decode(value), decoder.decode(value));
        }
    }
}
