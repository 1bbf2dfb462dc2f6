//! Text projection
//!
//! The two narrow interfaces between the value model and the structured-text
//! codec: render a value to bytes, parse bytes into a value. JSON is the
//! text form; map keys come out sorted.

use crate::error::TextError;
use crate::value::AttributeValue;

/// Render an attribute value to its JSON text
pub fn render(value: &AttributeValue) -> Result<Vec<u8>, TextError> {
    Ok(serde_json::to_vec(value)?)
}

/// Parse JSON text into an attribute value
pub fn parse(data: &[u8]) -> Result<AttributeValue, TextError> {
    Ok(serde_json::from_slice(data)?)
}
