//! Deserialization of raw flag dictionaries.
//!
//! A dictionary may be written in three shapes:
//!
//! - a flat list alternating keys and names: `[1, "Flag_1", 2, "Flag_2"]`,
//! - a list of pairs: `[[1, "Flag_1"], [2, "Flag_2"]]`,
//! - an object keyed by decimal integer text: `{"1": "Flag_1", "2": "Flag_2"}`.
//!
//! Keys and names are kept as [`RawScalar`]s; type checks happen later in
//! [`crate::dictionary::DictionaryValidator`]. Repeated keys survive
//! deserialization in every shape so that they can be reported.

use std::fmt;

use serde::{
    Deserialize, Deserializer,
    de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor},
};

use crate::{
    errors::DefinitionError,
    raw::{RawDictionary, RawScalar},
};

struct RawScalarVisitor;

impl<'de> Visitor<'de> for RawScalarVisitor {
    type Value = RawScalar;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a flag key or name")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<RawScalar, E> {
        Ok(RawScalar::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawScalar, E> {
        Ok(RawScalar::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawScalar, E> {
        Ok(RawScalar::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawScalar, E> {
        Ok(RawScalar::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawScalar, E> {
        Ok(RawScalar::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawScalar, E> {
        Ok(RawScalar::Text(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawScalar, E> {
        Ok(RawScalar::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<RawScalar, E> {
        Ok(RawScalar::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<RawScalar, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawScalar, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RawScalar::Composite)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawScalar, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(RawScalar::Composite)
    }
}

impl<'de> Deserialize<'de> for RawScalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawScalarVisitor)
    }
}

/// Object form of a dictionary, with entry order and repeated keys preserved.
#[derive(Debug)]
pub struct TableDef(pub Vec<(String, RawScalar)>);

impl<'de> Deserialize<'de> for TableDef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = TableDef;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of flag names keyed by integer")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TableDef, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, name)) = map.next_entry::<String, RawScalar>()? {
                    entries.push((key, name));
                }
                Ok(TableDef(entries))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Any of the accepted dictionary shapes, before conversion to [`RawDictionary`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DictionaryDef {
    Pairs(Vec<(RawScalar, RawScalar)>),
    Flat(Vec<RawScalar>),
    Table(TableDef),
}

/// True for canonical decimal integer text: an optional `-`, then digits
/// without a leading zero.
fn is_canonical_integer(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    match digits.as_bytes() {
        [] => false,
        [b'0'] => text == "0",
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    }
}

/// Object keys are text; canonical decimal integer text becomes an integer key.
///
/// Keys in the upper half of the `u64` range keep their 64-bit pattern, as in
/// the list forms.
fn table_key(key: String) -> RawScalar {
    if !is_canonical_integer(&key) {
        return RawScalar::Text(key);
    }

    if let Ok(mask) = key.parse::<i64>() {
        return RawScalar::Int(mask);
    }
    match key.parse::<u64>() {
        Ok(mask) => RawScalar::from(mask),
        Err(_) => RawScalar::Text(key),
    }
}

impl TryFrom<DictionaryDef> for RawDictionary {
    type Error = DefinitionError;

    fn try_from(value: DictionaryDef) -> Result<Self, Self::Error> {
        match value {
            DictionaryDef::Pairs(entries) => Ok(RawDictionary { entries }),
            DictionaryDef::Flat(items) => RawDictionary::from_flat(items),
            DictionaryDef::Table(TableDef(entries)) => Ok(RawDictionary {
                entries: entries
                    .into_iter()
                    .map(|(key, name)| (table_key(key), name))
                    .collect(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for RawDictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let def = DictionaryDef::deserialize(deserializer)?;
        RawDictionary::try_from(def).map_err(de::Error::custom)
    }
}
