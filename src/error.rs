//! Error types for the Stratus SDK
//!
//! Errors are pass-through: transport failures, unexpected HTTP statuses,
//! and decode failures surface directly to the caller. There is no retry or
//! recovery layer in the client itself.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        status: u16,
        /// Sanitized, length-capped excerpt of the response body.
        body: String,
    },

    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response has no \"{key}\" key")]
    MissingKey { key: String },

    #[error("expected {expected} under \"{key}\", got {found}")]
    KindMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("\"{key}\" is empty in response")]
    EmptyEnvelope { key: String },

    #[error("failed to decode element {index} of \"{key}\": {source}")]
    Element {
        key: String,
        index: usize,
        source: serde_json::Error,
    },

    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, SdkError>;

/// Name the JSON kind of a value the way the error messages use it.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
