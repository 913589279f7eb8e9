//! Error types for work order validation and translation.

use thiserror::Error;

/// A client record that cannot enter the pipeline.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The JSON document is not an object.
    #[error("work order must be a JSON object")]
    NotAnObject,

    /// A required field is absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A required field is `null` or an empty string.
    #[error("required field is empty: {0}")]
    EmptyField(&'static str),

    /// Required fields are present but the record does not fit the schema.
    #[error("work order does not match the client schema: {0}")]
    InvalidShape(#[from] serde_json::Error),
}

/// A record that passed validation but could not be mapped.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// A date string is neither RFC 3339 nor a naive ISO-8601 date/time.
    #[error("invalid date in field '{field}': {value:?}")]
    InvalidDate { field: &'static str, value: String },

    /// A stored document cannot be decoded as a TracOS work order.
    #[error("stored work order cannot be decoded: {0}")]
    Decode(#[from] bson::de::Error),
}
