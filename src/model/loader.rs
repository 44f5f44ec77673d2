use std::path::Path;

use crate::input::reader::read_to_bytes;
use crate::model::ModelError;
use crate::model::ensemble::VotingClassifier;

pub const DEFAULT_MODEL_PATH: &str = "voting_classifier.json";

/// Reads and validates the artifact; `.gz` files are decompressed on the fly.
pub fn load_classifier(path: &Path) -> Result<VotingClassifier, ModelError> {
    let bytes = read_to_bytes(path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let model = parse_classifier(&bytes)?;
    tracing::info!(
        path = %path.display(),
        estimators = model.estimators.len(),
        voting = model.voting.as_str(),
        "loaded model artifact"
    );
    Ok(model)
}

pub fn parse_classifier(bytes: &[u8]) -> Result<VotingClassifier, ModelError> {
    let model: VotingClassifier = serde_json::from_slice(bytes)?;
    model.validate().map_err(ModelError::Invalid)?;
    Ok(model)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/loader.rs"]
mod tests;
