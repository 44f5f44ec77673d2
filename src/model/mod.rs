pub mod ensemble;
pub mod features;
pub mod loader;
pub mod tree;

pub use features::{FeatureVector, N_FEATURES};

/// Raw class label the classifier emits for a positive screening.
pub const POSITIVE_LABEL: i64 = 1;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("IO error reading model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model artifact: {0}")]
    Invalid(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Single-sample scoring function backed by an immutable fitted model.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ModelError>;

    /// One-line description for startup and health output.
    fn describe(&self) -> ModelSummary;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSummary {
    pub estimators: usize,
    pub voting: &'static str,
}
