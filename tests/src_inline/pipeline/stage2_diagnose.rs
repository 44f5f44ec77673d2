use super::*;
use crate::test_support::{FixedClassifier, scenario_features};

#[test]
fn test_positive_label_maps_to_true() {
    let classifier = FixedClassifier::returning(1);
    let result = diagnose(&classifier, &scenario_features()).unwrap();
    assert!(result.has_tdah);
    assert_eq!(classifier.last_features(), Some(scenario_features()));
}

#[test]
fn test_other_labels_map_to_false() {
    for label in [0, 2, -1] {
        let classifier = FixedClassifier::returning(label);
        let result = diagnose(&classifier, &scenario_features()).unwrap();
        assert!(!result.has_tdah, "label {label}");
    }
}

#[test]
fn test_classifier_failure_propagates() {
    let classifier = FixedClassifier::failing("shape mismatch");
    let err = diagnose(&classifier, &scenario_features()).unwrap_err();
    assert!(matches!(err, ModelError::Inference(msg) if msg == "shape mismatch"));
    assert_eq!(classifier.calls(), 1);
}
