use serde::Deserialize;

use crate::model::features::{FeatureVector, N_FEATURES};
use crate::model::tree::DecisionTree;
use crate::model::{Classifier, ModelError, ModelSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingMode {
    Hard,
    Soft,
}

impl VotingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VotingMode::Hard => "hard",
            VotingMode::Soft => "soft",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression {
        coef: Vec<f64>,
        intercept: f64,
        #[serde(default)]
        scaler: Option<Scaler>,
    },
    DecisionTree(DecisionTree),
    RandomForest {
        trees: Vec<DecisionTree>,
    },
}

impl Estimator {
    pub fn name(&self) -> &'static str {
        match self {
            Estimator::LogisticRegression { .. } => "logistic_regression",
            Estimator::DecisionTree(_) => "decision_tree",
            Estimator::RandomForest { .. } => "random_forest",
        }
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        match self {
            Estimator::LogisticRegression {
                coef,
                intercept,
                scaler,
            } => {
                if n_classes != 2 {
                    return Err(format!(
                        "logistic regression is binary, model has {n_classes} classes"
                    ));
                }
                if coef.len() != n_features {
                    return Err(format!(
                        "logistic regression has {} coefficients, expected {n_features}",
                        coef.len()
                    ));
                }
                if !intercept.is_finite() || coef.iter().any(|c| !c.is_finite()) {
                    return Err("logistic regression has non-finite parameters".to_string());
                }
                if let Some(scaler) = scaler {
                    if scaler.mean.len() != n_features || scaler.scale.len() != n_features {
                        return Err(format!("scaler must have {n_features} means and scales"));
                    }
                    if scaler.mean.iter().any(|m| !m.is_finite())
                        || scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0)
                    {
                        return Err("scaler has non-finite or zero entries".to_string());
                    }
                }
                Ok(())
            }
            Estimator::DecisionTree(tree) => tree.validate(n_features, n_classes),
            Estimator::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err("random forest has no trees".to_string());
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(n_features, n_classes)
                        .map_err(|e| format!("tree {i}: {e}"))?;
                }
                Ok(())
            }
        }
    }

    pub fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>, String> {
        match self {
            Estimator::LogisticRegression {
                coef,
                intercept,
                scaler,
            } => {
                if x.len() != coef.len() {
                    return Err(format!(
                        "expected {} features, got {}",
                        coef.len(),
                        x.len()
                    ));
                }
                let mut t = *intercept;
                for (j, (&v, &w)) in x.iter().zip(coef.iter()).enumerate() {
                    let z = match scaler {
                        Some(s) => (v - s.mean[j]) / s.scale[j],
                        None => v,
                    };
                    t += w * z;
                }
                let p1 = sigmoid(t);
                Ok(vec![1.0 - p1, p1])
            }
            Estimator::DecisionTree(tree) => tree.predict_proba(x),
            Estimator::RandomForest { trees } => {
                let mut acc: Vec<f64> = Vec::new();
                for tree in trees {
                    let p = tree.predict_proba(x)?;
                    if acc.is_empty() {
                        acc = vec![0.0; p.len()];
                    }
                    for (a, v) in acc.iter_mut().zip(p.iter()) {
                        *a += v;
                    }
                }
                let n = trees.len() as f64;
                Ok(acc.into_iter().map(|v| v / n).collect())
            }
        }
    }
}

/// Fitted voting ensemble exported from the training pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct VotingClassifier {
    pub(crate) n_features: usize,
    pub(crate) classes: Vec<i64>,
    pub(crate) voting: VotingMode,
    #[serde(default)]
    pub(crate) weights: Option<Vec<f64>>,
    pub(crate) estimators: Vec<Estimator>,
}

impl VotingClassifier {
    pub fn validate(&self) -> Result<(), String> {
        if self.n_features != N_FEATURES {
            return Err(format!(
                "model expects {} features, service provides {N_FEATURES}",
                self.n_features
            ));
        }
        if self.classes.len() < 2 {
            return Err("model must have at least two classes".to_string());
        }
        for (i, c) in self.classes.iter().enumerate() {
            if self.classes[..i].contains(c) {
                return Err(format!("duplicate class label {c}"));
            }
        }
        if self.estimators.is_empty() {
            return Err("model has no estimators".to_string());
        }
        if let Some(weights) = &self.weights {
            if weights.len() != self.estimators.len() {
                return Err(format!(
                    "{} weights for {} estimators",
                    weights.len(),
                    self.estimators.len()
                ));
            }
            if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                return Err("weights must be finite and non-negative".to_string());
            }
            if weights.iter().sum::<f64>() <= 0.0 {
                return Err("weights sum to zero".to_string());
            }
        }
        for (i, est) in self.estimators.iter().enumerate() {
            est.validate(self.n_features, self.classes.len())
                .map_err(|e| format!("estimator {i} ({}): {e}", est.name()))?;
        }
        Ok(())
    }

    fn weight(&self, idx: usize) -> f64 {
        self.weights
            .as_ref()
            .and_then(|w| w.get(idx).copied())
            .unwrap_or(1.0)
    }

    /// Index into `classes` of the winning class for one sample.
    pub fn predict_index(&self, x: &[f64]) -> Result<usize, String> {
        if x.len() != self.n_features {
            return Err(format!(
                "expected {} features, got {}",
                self.n_features,
                x.len()
            ));
        }
        if let Some(j) = x.iter().position(|v| !v.is_finite()) {
            return Err(format!("feature {j} is not finite"));
        }

        let n_classes = self.classes.len();
        let mut scores = vec![0.0f64; n_classes];
        for (i, est) in self.estimators.iter().enumerate() {
            let proba = est
                .predict_proba(x)
                .map_err(|e| format!("estimator {i} ({}): {e}", est.name()))?;
            if proba.len() != n_classes {
                return Err(format!(
                    "estimator {i} returned {} probabilities for {n_classes} classes",
                    proba.len()
                ));
            }
            let w = self.weight(i);
            match self.voting {
                VotingMode::Hard => scores[argmax(&proba)] += w,
                VotingMode::Soft => {
                    for (s, p) in scores.iter_mut().zip(proba.iter()) {
                        *s += w * p;
                    }
                }
            }
        }
        Ok(argmax(&scores))
    }
}

impl Classifier for VotingClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ModelError> {
        let idx = self
            .predict_index(features.as_slice())
            .map_err(ModelError::Inference)?;
        Ok(self.classes[idx])
    }

    fn describe(&self) -> ModelSummary {
        ModelSummary {
            estimators: self.estimators.len(),
            voting: self.voting.as_str(),
        }
    }
}

fn sigmoid(t: f64) -> f64 {
    if t >= 0.0 {
        1.0 / (1.0 + (-t).exp())
    } else {
        let e = t.exp();
        e / (1.0 + e)
    }
}

/// First index of the maximum; ties resolve toward earlier classes.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0usize;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/ensemble.rs"]
mod tests;
