use serde::Serialize;

use crate::error::ServiceError;
use crate::pipeline::stage2_diagnose::DiagnosisResult;

/// Shape of response bodies. `Enveloped` adds `status` and, on failure, a
/// null `hasTdah`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ResponseStyle {
    #[default]
    Enveloped,
    Plain,
}

#[derive(Debug, Serialize)]
pub struct SuccessBody {
    #[serde(rename = "hasTdah")]
    pub has_tdah: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct FailureBody {
    #[serde(rename = "hasTdah", skip_serializing_if = "Option::is_none")]
    pub has_tdah: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    pub error: &'static str,
    pub message: String,
}

pub fn success_body(result: &DiagnosisResult, style: ResponseStyle) -> SuccessBody {
    SuccessBody {
        has_tdah: result.has_tdah,
        status: match style {
            ResponseStyle::Enveloped => Some("success"),
            ResponseStyle::Plain => None,
        },
    }
}

pub fn failure_body(err: &ServiceError, style: ResponseStyle) -> FailureBody {
    let (has_tdah, status) = match style {
        ResponseStyle::Enveloped => (Some(serde_json::Value::Null), Some("failed")),
        ResponseStyle::Plain => (None, None),
    };
    FailureBody {
        has_tdah,
        status,
        error: err.code(),
        message: err.public_message(),
    }
}

/// Renders either outcome as the JSON text the server would send.
pub fn render_outcome(
    outcome: &Result<DiagnosisResult, ServiceError>,
    style: ResponseStyle,
) -> Result<String, serde_json::Error> {
    match outcome {
        Ok(result) => serde_json::to_string(&success_body(result, style)),
        Err(err) => serde_json::to_string(&failure_body(err, style)),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
