//! Encode and decode errors
//!
//! Both directions return their own error enum. Decode errors carry an
//! overflow flag (see [`DecodeError::is_numeric_overflow`]) so callers can
//! retry with a wider numeric destination.

use attrcodec_core::TextError;
use std::fmt;
use thiserror::Error;

/// Error returned by a capability hook
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Which capability hook a type converts through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Byte payload, carried as `B`
    Binary,
    /// String payload, carried as `S`
    Text,
}

impl HookKind {
    /// Pick the hook a type with the given capabilities converts through
    ///
    /// Binary takes precedence over text.
    pub const fn resolve(binary: bool, text: bool) -> Option<HookKind> {
        if binary {
            Some(HookKind::Binary)
        } else if text {
            Some(HookKind::Text)
        } else {
            None
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookKind::Binary => f.write_str("binary"),
            HookKind::Text => f.write_str("text"),
        }
    }
}

/// Encoding errors
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Map keys must be strings
    #[error("only maps with string keys are supported, found key type {key_type}")]
    NonStringKey {
        /// Native key type
        key_type: &'static str,
    },

    /// A capability hook failed
    #[error("error encoding {kind} hook value: {source}")]
    Hook {
        /// Hook that failed
        kind: HookKind,
        /// Error reported by the hook
        #[source]
        source: HookError,
    },

    /// The attribute value could not be rendered to text
    #[error("cannot render attribute value: {0}")]
    Render(#[from] TextError),
}

/// Decoding errors
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input text is not a valid attribute value
    #[error("malformed attribute value: {0}")]
    Malformed(#[from] TextError),

    /// A number did not parse or does not fit the destination type
    #[error("overflow number {number} for type {target}")]
    NumericOverflow {
        /// Decimal text from the wire
        number: String,
        /// Destination type name
        target: &'static str,
    },

    /// A number did not parse into a generic destination
    #[error("error parsing number {number} into type f64")]
    InvalidNumber {
        /// Decimal text from the wire
        number: String,
    },

    /// Map destinations must be string keyed
    #[error("cannot decode a map with a non-string key: {key_type}")]
    NonStringKey {
        /// Native key type
        key_type: &'static str,
    },

    /// Polymorphic destinations that require capabilities cannot be built
    #[error("cannot decode into non-empty interface type: {type_name}")]
    NonEmptyInterface {
        /// Destination type name
        type_name: &'static str,
    },

    /// A string bound for a byte destination was not valid base64
    #[error("cannot base64 decode string: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A capability hook failed
    #[error("error decoding {kind} hook value: {source}")]
    Hook {
        /// Hook that failed
        kind: HookKind,
        /// Error reported by the hook
        #[source]
        source: HookError,
    },
}

impl DecodeError {
    /// Check if this error is a numeric overflow or parse failure
    ///
    /// Callers may retry with a wider numeric destination.
    pub fn is_numeric_overflow(&self) -> bool {
        matches!(self, DecodeError::NumericOverflow { .. })
    }

    pub(crate) fn overflow(number: &str, target: &'static str) -> Self {
        DecodeError::NumericOverflow {
            number: number.to_string(),
            target,
        }
    }
}
