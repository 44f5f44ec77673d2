pub const N_FEATURES: usize = 10;

/// Feature names in the order the classifier was fitted on.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "stroop.averageResponseTime",
    "stroop.correctAnswers",
    "stroop.incorrectAnswers",
    "cpt.averageResponseTime",
    "cpt.omissionErrors",
    "cpt.commissionErrors",
    "sst.averageResponseTime",
    "sst.correctStops",
    "sst.incorrectStops",
    "sst.ignoredArrows",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; N_FEATURES]);

impl FeatureVector {
    pub fn new(values: [f64; N_FEATURES]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Pairs each value with its feature name, for logging.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}
