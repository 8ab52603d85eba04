//! Parsing of flag values from text with base detection.
//!
//! Text starting with `0x` is read as hexadecimal, anything else as decimal.
//! Text that does not parse decodes as `0`.

/// Numeric base detected from the text of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Hex,
}

impl Radix {
    pub fn value(self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Hex => 16,
        }
    }
}

const HEX_PREFIX: &str = "0x";

/// Splits `text` into its detected base and the digits to parse.
pub fn detect_radix(text: &str) -> (Radix, &str) {
    match text.strip_prefix(HEX_PREFIX) {
        Some(digits) => (Radix::Hex, digits),
        None => (Radix::Decimal, text),
    }
}

/// Parses `text` as a flag value, or returns `None` if it is not a number.
///
/// Hex digits follow the `0x` prefix directly, without a sign. Decimal text
/// may carry a leading `+` or `-`. Values in the upper half of the `u64`
/// range keep their 64-bit pattern.
pub fn try_parse_flag_value(text: &str) -> Option<i64> {
    let (radix, digits) = detect_radix(text);

    match radix {
        Radix::Hex => {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            u64::from_str_radix(digits, radix.value())
                .ok()
                .map(|v| v as i64)
        }
        Radix::Decimal => digits
            .parse::<i64>()
            .ok()
            .or_else(|| digits.parse::<u64>().ok().map(|v| v as i64)),
    }
}

/// Parses `text` as a flag value, falling back to `0` when it is not a number.
pub fn parse_flag_value(text: &str) -> i64 {
    match try_parse_flag_value(text) {
        Some(value) => value,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal() {
        assert_eq!(parse_flag_value("71"), 71);
        assert_eq!(parse_flag_value("+8"), 8);
        assert_eq!(parse_flag_value("-1"), -1);
    }

    #[test]
    fn test_hex() {
        assert_eq!(parse_flag_value("0x47"), 71);
        assert_eq!(parse_flag_value("0x1"), 1);
        assert_eq!(parse_flag_value("0xff"), 255);
        assert_eq!(parse_flag_value("0xFF"), 255);
    }

    #[test]
    fn test_full_width_values() {
        assert_eq!(parse_flag_value("0xffffffffffffffff"), -1);
        assert_eq!(parse_flag_value("18446744073709551615"), -1);
        assert_eq!(parse_flag_value("0x8000000000000000"), i64::MIN);
    }

    #[test]
    fn test_detect_radix() {
        assert_eq!(detect_radix("0x10"), (Radix::Hex, "10"));
        assert_eq!(detect_radix("10"), (Radix::Decimal, "10"));
        assert_eq!(detect_radix("0X10"), (Radix::Decimal, "0X10"));
    }

    #[test]
    fn test_unparsable_is_zero() {
        assert_eq!(try_parse_flag_value("garbage"), None);
        assert_eq!(parse_flag_value("garbage"), 0);
        assert_eq!(parse_flag_value(""), 0);
        assert_eq!(parse_flag_value("0x"), 0);
        assert_eq!(parse_flag_value("0x-1"), 0);
        assert_eq!(parse_flag_value("0xzz"), 0);
        assert_eq!(parse_flag_value("1.5"), 0);
        assert_eq!(parse_flag_value(" 7"), 0);
        assert_eq!(parse_flag_value("0x10000000000000000"), 0);
    }
}
