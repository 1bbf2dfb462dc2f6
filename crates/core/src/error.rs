//! Errors raised by the text projection of attribute values

use thiserror::Error;

/// Text projection errors
#[derive(Debug, Error)]
pub enum TextError {
    /// A wire object with no type slot populated was serialized
    #[error("cannot serialize an attribute value with no values set")]
    NoValueSet,

    /// A parsed wire object carried none of the known type keys
    #[error("attribute value has no type set")]
    MissingType,

    /// Unknown type tag
    #[error("unknown attribute type {0:?}")]
    UnknownType(String),

    /// The structured-text codec rejected the input or output
    #[error("invalid attribute text: {0}")]
    Json(#[from] serde_json::Error),
}
