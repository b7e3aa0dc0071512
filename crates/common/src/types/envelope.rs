//! The discriminated response shape returned by every backend call.
//!
//! Every response is one of three things: a logical error, a snapshot to
//! render, or a completion notice. [`Envelope::from_value`] decides which,
//! in a fixed order:
//!
//! 1. a non-empty `error` field wins over everything else;
//! 2. `done: true`, `status: "Done."`, or the absence of every snapshot field
//!    means the program (or the session) is finished;
//! 3. anything else is decoded as the payload type.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::SNAPSHOT_FIELDS;

/// Status text the backend reports once the program exits normally
pub const DONE_STATUS: &str = "Done.";

const ERROR_FIELD: &str = "error";
const MESSAGE_FIELD: &str = "message";
const STATUS_FIELDS: &[&str] = &["status", "statusMessage"];
const DONE_FIELDS: &[&str] = &["done", "doneFlag"];

/// A backend response, discriminated once at the transport boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<T> {
    /// The backend reported a logical error
    Error(String),
    /// The debugger paused and reported its state
    Snapshot(T),
    /// Execution (or the session) is over
    Completed {
        /// Human-readable completion message, if the backend sent one
        message: Option<String>,
    },
}

/// Reasons a response body cannot be turned into an [`Envelope`]
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The body was valid JSON but not an object
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
    /// The body looked like a snapshot but its fields did not decode
    #[error("malformed snapshot payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Discriminate a parsed response body
    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => return Err(EnvelopeError::NotAnObject(json_kind(&other))),
        };

        if let Some(message) = error_message(&fields) {
            return Ok(Self::Error(message));
        }

        if is_completion(&fields) {
            return Ok(Self::Completed { message: completion_message(&fields) });
        }

        Ok(Self::Snapshot(serde_json::from_value(Value::Object(fields))?))
    }
}

impl<T> Envelope<T> {
    /// Short variant name, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Error(_) => "error",
            Self::Snapshot(_) => "snapshot",
            Self::Completed { .. } => "completed",
        }
    }
}

fn error_message(fields: &Map<String, Value>) -> Option<String> {
    match fields.get(ERROR_FIELD)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn first_str<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| fields.get(*name)).and_then(Value::as_str)
}

fn is_completion(fields: &Map<String, Value>) -> bool {
    let done_flag = DONE_FIELDS.iter().any(|name| fields.get(*name) == Some(&Value::Bool(true)));
    let done_status = first_str(fields, STATUS_FIELDS) == Some(DONE_STATUS);
    let no_snapshot = !SNAPSHOT_FIELDS.iter().any(|name| fields.contains_key(*name));

    done_flag || done_status || no_snapshot
}

fn completion_message(fields: &Map<String, Value>) -> Option<String> {
    fields
        .get(MESSAGE_FIELD)
        .and_then(Value::as_str)
        .or_else(|| first_str(fields, STATUS_FIELDS))
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
