//! Event pipeline stage that decodes an integer field into named bit flags.
//!
//! The filter reads one field of a record, parses it as a number (`0x`
//! prefixed text as hexadecimal, anything else as decimal, unparsable text as
//! `0`) and writes the names of all matching flags to a destination field.
//! The flag dictionary is validated once, when the filter is built.
//!
//! ```
//! use flagcraft_filter::{BitflagsConfig, BitflagsFilter, Event, Record};
//! use serde_json::json;
//!
//! let config = BitflagsConfig::from_json_str(r#"{
//!     "field": "input",
//!     "destination": "output",
//!     "dictionary": [1, "Flag_1", 2, "Flag_2", 4, "Flag_4", 8, "Flag_8", 64, "Flag_64"],
//!     "separator": "|"
//! }"#).unwrap();
//! let filter = BitflagsFilter::new(config).unwrap();
//!
//! let mut event = Event::from_value(json!({"input": "0x47"})).unwrap();
//! filter.filter(&mut event);
//! assert_eq!(event.get("output"), Some(&json!("Flag_1|Flag_2|Flag_4|Flag_64")));
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod filter;
pub mod record;
pub mod source;

pub use config::{BitflagsConfig, DEFAULT_FAILURE_TAG, InvalidDictionaryPolicy};
pub use error::ConfigError;
pub use filter::{BitflagsFilter, FilterOutcome};
pub use record::{Event, Record};
