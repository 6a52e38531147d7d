use thiserror::Error;

/// A failure talking to DynamoDB or the IoT data plane.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),
    #[error("publish to {topic} failed: {reason}")]
    Publish { topic: String, reason: String },
    #[error("could not encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A malformed incoming event.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("field '{field}' is not a number: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("field '{field}' has an unsupported type")]
    UnsupportedType { field: &'static str },
    #[error("malformed event: {0}")]
    Malformed(String),
}
