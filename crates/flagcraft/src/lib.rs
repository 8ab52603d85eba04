//! # flagcraft
//!
//! Decodes an integer value into the names of the bit flags it contains.
//!
//! A flag dictionary maps integer bitmask keys to names. It is validated once
//! into a [`FlagDictionary`](dictionary::FlagDictionary) and then used to
//! decode any number of values: a key matches a value when every bit set in
//! the key is also set in the value (`key & value == key`). Keys may be
//! composite masks and are matched independently of each other.
//!
//! ## Example
//!
//! ```
//! use flagcraft::decode::{Decoded, FlagDecoder};
//! use flagcraft::dictionary::FlagDictionary;
//!
//! let dictionary = FlagDictionary::from_flags([
//!     (1, "Flag_1"),
//!     (2, "Flag_2"),
//!     (4, "Flag_4"),
//!     (8, "Flag_8"),
//!     (64, "Flag_64"),
//! ])
//! .unwrap();
//!
//! let decoder = FlagDecoder::new(dictionary);
//! let value = flagcraft::number::parse_flag_value("0x47");
//! assert_eq!(
//!     decoder.decode(value),
//!     Decoded::List(vec![
//!         "Flag_1".to_string(),
//!         "Flag_2".to_string(),
//!         "Flag_4".to_string(),
//!         "Flag_64".to_string(),
//!     ])
//! );
//! ```

pub mod decode;
pub mod dictionary;
pub mod errors;
pub mod number;
pub mod raw;
#[cfg(feature = "serde")]
pub mod serde;
