pub mod stage1_extract;
pub mod stage2_diagnose;

use crate::error::ServiceError;
use crate::input::parse_payload;
use crate::model::Classifier;

use stage1_extract::extract_features;
use stage2_diagnose::{DiagnosisResult, diagnose};

/// Raw request body to diagnosis. Validation always completes before inference.
pub fn run_pipeline(
    classifier: &dyn Classifier,
    body: &[u8],
) -> Result<DiagnosisResult, ServiceError> {
    let payload = parse_payload(body)?;
    let features = extract_features(&payload)?;
    let result = diagnose(classifier, &features)?;
    Ok(result)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/run.rs"]
mod tests;
