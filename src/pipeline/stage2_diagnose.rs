use crate::model::{Classifier, FeatureVector, ModelError, POSITIVE_LABEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosisResult {
    pub has_tdah: bool,
}

/// One inference call; the raw label is positive only when it equals 1.
pub fn diagnose(
    classifier: &dyn Classifier,
    features: &FeatureVector,
) -> Result<DiagnosisResult, ModelError> {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let named = features.named().collect::<Vec<_>>();
        tracing::debug!(features = ?named, "running inference");
    }
    let label = classifier.predict(features)?;
    tracing::debug!(label, "classifier returned raw label");
    Ok(DiagnosisResult {
        has_tdah: label == POSITIVE_LABEL,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_diagnose.rs"]
mod tests;
