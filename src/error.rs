use axum::http::StatusCode;

use crate::input::InputError;
use crate::model::ModelError;
use crate::pipeline::stage1_extract::ExtractError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ExtractError),
    #[error(transparent)]
    MalformedPayload(InputError),
    #[error(transparent)]
    InferenceFailure(ModelError),
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(ExtractError::MissingSubtestResults { .. }) => {
                "missing_subtest_results"
            }
            ServiceError::Validation(ExtractError::MissingFieldValues { .. }) => {
                "missing_field_values"
            }
            ServiceError::MalformedPayload(_) => "malformed_payload",
            ServiceError::InferenceFailure(_) => "inference_failure",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::InferenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Text safe to return to the client. Internal failures stay generic.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::InferenceFailure(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl From<InputError> for ServiceError {
    fn from(value: InputError) -> Self {
        ServiceError::MalformedPayload(value)
    }
}

impl From<ModelError> for ServiceError {
    fn from(value: ModelError) -> Self {
        ServiceError::InferenceFailure(value)
    }
}
