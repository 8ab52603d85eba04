//! The record abstraction the filter works on, and an in-memory [`Event`].

use serde_json::{Map, Value};

/// Field holding an event's tags.
pub const TAGS_FIELD: &str = "tags";

/// Field access needed by the filter.
pub trait Record {
    fn get(&self, field: &str) -> Option<&Value>;

    /// Writes `value` to `field`.
    ///
    /// Returns `false` and leaves the record untouched when `field` cannot be
    /// written, e.g. when a parent of a nested reference is not an object.
    fn set(&mut self, field: &str, value: Value) -> bool;

    /// True when `field` holds a non-null value.
    fn has(&self, field: &str) -> bool {
        matches!(self.get(field), Some(value) if !value.is_null())
    }

    /// Adds `tags` to the record's tag set, in order.
    fn append_tags(&mut self, tags: &[String]);
}

/// Splits a field reference into path segments.
///
/// `[outer][inner]` addresses a nested field; anything else is a top-level name.
fn field_path(field: &str) -> Vec<&str> {
    let Some(inner) = field
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return vec![field];
    };

    let segments: Vec<&str> = inner.split("][").collect();
    if segments
        .iter()
        .any(|s| s.is_empty() || s.contains('[') || s.contains(']'))
    {
        return vec![field];
    }

    segments
}

/// A JSON object event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    fields: Map<String, Value>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON object. Returns `None` for any other JSON value.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Tags currently on the event.
    pub fn tags(&self) -> Vec<&str> {
        match self.fields.get(TAGS_FIELD) {
            Some(Value::Array(tags)) => tags.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(tag)) => vec![tag.as_str()],
            _ => Vec::new(),
        }
    }
}

impl Record for Event {
    fn get(&self, field: &str) -> Option<&Value> {
        let mut path = field_path(field).into_iter();
        let mut current = self.fields.get(path.next()?)?;

        for segment in path {
            current = current.as_object()?.get(segment)?;
        }

        Some(current)
    }

    fn set(&mut self, field: &str, value: Value) -> bool {
        let path = field_path(field);
        let Some((last, parents)) = path.split_last() else {
            return false;
        };

        // Existing parents must all be objects before anything is created.
        let mut existing = Some(&self.fields);
        for segment in parents {
            existing = match existing.and_then(|map| map.get(*segment)) {
                None => None,
                Some(Value::Object(map)) => Some(map),
                Some(_) => return false,
            };
        }

        let mut current = &mut self.fields;
        for segment in parents {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            let Some(map) = entry.as_object_mut() else {
                return false;
            };
            current = map;
        }

        current.insert(last.to_string(), value);
        true
    }

    fn append_tags(&mut self, tags: &[String]) {
        let entry = self
            .fields
            .entry(TAGS_FIELD.to_string())
            .or_insert(Value::Null);

        if !entry.is_array() {
            *entry = match entry.take() {
                Value::Null => Value::Array(Vec::new()),
                previous => Value::Array(vec![previous]),
            };
        }
        let Value::Array(existing) = entry else {
            return;
        };

        for tag in tags {
            if !existing.iter().any(|t| t.as_str() == Some(tag.as_str())) {
                existing.push(Value::String(tag.clone()));
            }
        }
    }
}
