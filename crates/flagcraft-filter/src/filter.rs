//! The `bitflags` pipeline stage.

use flagcraft::{
    decode::{FlagDecoder, OutputFormat},
    dictionary::{DictionaryValidator, ValidationOutcome},
    errors::DictionaryError,
};
use serde_json::Value;

use crate::{
    config::{BitflagsConfig, InvalidDictionaryPolicy},
    convert::{decoded_to_json, field_flag_value},
    error::ConfigError,
    record::Record,
};

/// What [`BitflagsFilter::filter`] did with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The destination was already set and overriding is off.
    Skipped,
    /// The destination could not be written; the record is unchanged.
    Unwritable,
    /// Decoded flags were written to the destination.
    Decoded,
    /// The dictionary is invalid; an empty list was written and failure tags added.
    Tagged,
}

/// Decodes an integer field into named flags.
///
/// Built once from a [`BitflagsConfig`]; the dictionary is validated at that
/// point and never changes afterwards. The filter holds no per-record state and
/// may be shared between threads.
#[derive(Debug, Clone)]
pub struct BitflagsFilter {
    field: String,
    destination: String,
    overwrite: bool,
    tag_on_failure: Vec<String>,
    decoder: Result<FlagDecoder, DictionaryError>,
}

impl BitflagsFilter {
    /// Resolves and validates the dictionary and builds the filter.
    ///
    /// Fails on conflicting or missing dictionary sources, unreadable
    /// dictionary files, and, unless the policy is
    /// [`InvalidDictionaryPolicy::Tag`], on an invalid dictionary.
    pub fn new(config: BitflagsConfig) -> Result<Self, ConfigError> {
        let raw = config.resolve_dictionary()?;

        let decoder = match DictionaryValidator::validate(&raw) {
            ValidationOutcome::Valid(dictionary) => {
                tracing::info!(
                    field = %config.field,
                    destination = %config.destination,
                    flags = dictionary.len(),
                    "Registered bitflags filter"
                );
                let mut decoder = FlagDecoder::new(dictionary);
                decoder.set_format(OutputFormat::from_separator(config.separator));
                Ok(decoder)
            }
            ValidationOutcome::Invalid(err) => match config.on_invalid_dictionary {
                InvalidDictionaryPolicy::Reject => return Err(err.into()),
                InvalidDictionaryPolicy::Tag => {
                    tracing::warn!(
                        field = %config.field,
                        error = %err,
                        tags = ?config.tag_on_failure,
                        "Invalid flag dictionary; every record will be tagged"
                    );
                    Err(err)
                }
            },
        };

        Ok(Self {
            field: config.field,
            destination: config.destination,
            overwrite: config.overwrite,
            tag_on_failure: config.tag_on_failure,
            decoder,
        })
    }

    /// The validation error, if the filter was built with an invalid dictionary.
    pub fn dictionary_error(&self) -> Option<&DictionaryError> {
        self.decoder.as_ref().err()
    }

    /// Decodes the configured field of `record` into its destination.
    pub fn filter<R: Record + ?Sized>(&self, record: &mut R) -> FilterOutcome {
        if !self.overwrite && record.has(&self.destination) {
            tracing::debug!(
                destination = %self.destination,
                "Destination already set; skipping"
            );
            return FilterOutcome::Skipped;
        }

        match &self.decoder {
            Ok(decoder) => {
                let value = field_flag_value(record.get(&self.field));
                let output = decoded_to_json(decoder.decode(value));
                tracing::debug!(
                    destination = %self.destination,
                    value,
                    output = %output,
                    "Output flags"
                );
                if !record.set(&self.destination, output) {
                    tracing::warn!(
                        destination = %self.destination,
                        "Destination cannot be written; record left unchanged"
                    );
                    return FilterOutcome::Unwritable;
                }
                FilterOutcome::Decoded
            }
            Err(err) => {
                if !record.set(&self.destination, Value::Array(Vec::new())) {
                    tracing::warn!(
                        destination = %self.destination,
                        "Destination cannot be written"
                    );
                }
                record.append_tags(&self.tag_on_failure);
                tracing::warn!(
                    field = %self.field,
                    error = %err,
                    "Flag decoding failed; record tagged"
                );
                FilterOutcome::Tagged
            }
        }
    }

    /// Runs [`filter`](Self::filter) over every record in `records`.
    pub fn filter_all<'a, R, I>(&self, records: I) -> Vec<FilterOutcome>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a mut R>,
    {
        records
            .into_iter()
            .map(|record| self.filter(record))
            .collect()
    }
}
