use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

use crate::model::{Classifier, FeatureVector, ModelError, ModelSummary};

/// Classifier double that returns a canned label and records its inputs.
pub struct FixedClassifier {
    outcome: Result<i64, String>,
    calls: AtomicUsize,
    last: Mutex<Option<FeatureVector>>,
}

impl FixedClassifier {
    pub fn returning(label: i64) -> Self {
        Self {
            outcome: Ok(label),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            outcome: Err(msg.to_string()),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_features(&self) -> Option<FeatureVector> {
        *self.last.lock().unwrap()
    }
}

impl Classifier for FixedClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(*features);
        self.outcome.clone().map_err(ModelError::Inference)
    }

    fn describe(&self) -> ModelSummary {
        ModelSummary {
            estimators: 1,
            voting: "hard",
        }
    }
}

pub fn scenario_payload() -> Value {
    json!({
        "stroopResults": [
            {"averageResponseTime": 500, "correctAnswers": 18, "incorrectAnswers": 2}
        ],
        "cptResults": [
            {"averageResponseTime": 450, "omissionErrors": 1, "commissionErrors": 0}
        ],
        "sstResults": [
            {"averageResponseTime": 600, "correctStops": 15, "incorrectStops": 1, "ignoredArrows": 0}
        ]
    })
}

pub fn scenario_features() -> FeatureVector {
    FeatureVector::new([
        500.0, 18.0, 2.0, 450.0, 1.0, 0.0, 600.0, 15.0, 1.0, 0.0,
    ])
}

/// Small soft-voting ensemble: negative for the scenario payload, positive
/// once omission errors, commission errors and incorrect stops climb.
pub fn sample_model_json() -> Value {
    json!({
        "n_features": 10,
        "classes": [0, 1],
        "voting": "soft",
        "estimators": [
            {
                "kind": "logistic_regression",
                "coef": [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                "intercept": -3.0
            },
            {
                "kind": "decision_tree",
                "nodes": [
                    {"split": {"feature": 5, "threshold": 2.5, "left": 1, "right": 2}},
                    {"leaf": {"value": [9.0, 1.0]}},
                    {"leaf": {"value": [1.0, 9.0]}}
                ]
            },
            {
                "kind": "random_forest",
                "trees": [
                    {"nodes": [
                        {"split": {"feature": 8, "threshold": 3.5, "left": 1, "right": 2}},
                        {"leaf": {"value": [0.9, 0.1]}},
                        {"leaf": {"value": [0.1, 0.9]}}
                    ]}
                ]
            }
        ]
    })
}

pub fn positive_payload() -> Value {
    json!({
        "stroopResults": [
            {"averageResponseTime": 820, "correctAnswers": 9, "incorrectAnswers": 11}
        ],
        "cptResults": [
            {"averageResponseTime": 700, "omissionErrors": 6, "commissionErrors": 5}
        ],
        "sstResults": [
            {"averageResponseTime": 910, "correctStops": 4, "incorrectStops": 6, "ignoredArrows": 3}
        ]
    })
}
