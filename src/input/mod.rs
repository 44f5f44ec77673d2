pub mod payload;
pub mod reader;

pub use payload::{CptResult, EvaluationPayload, SstResult, StroopResult, SubtestRecord};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("request body is not valid JSON")]
    NotJson(#[source] serde_json::Error),
    #[error("request body must be a JSON object")]
    NotObject,
    #[error("invalid evaluation payload: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Parses a request body into a typed payload. Content type is not checked.
pub fn parse_payload(body: &[u8]) -> Result<EvaluationPayload, InputError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(InputError::NotJson)?;
    if !value.is_object() {
        return Err(InputError::NotObject);
    }
    serde_json::from_value(value).map_err(InputError::Schema)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
