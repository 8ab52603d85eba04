use std::borrow::Cow;

use flagcraft::{decode::Decoded, number::parse_flag_value};
use serde_json::Value;

/// Renders a field value as the text that is parsed for flags.
///
/// Strings are used as-is and numbers in their usual notation. A missing or
/// null field renders as the empty string.
pub fn render_field_value(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Number(n)) => Cow::Owned(n.to_string()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// Reads a field value as a flag value. Anything unparsable reads as `0`.
pub fn field_flag_value(value: Option<&Value>) -> i64 {
    parse_flag_value(&render_field_value(value))
}

pub fn decoded_to_json(decoded: Decoded) -> Value {
    match decoded {
        Decoded::List(names) => Value::Array(names.into_iter().map(Value::String).collect()),
        Decoded::Joined(joined) => Value::String(joined),
    }
}
