use serde_json::{Value, json};

use super::*;
use crate::input::parse_payload;
use crate::test_support::{scenario_features, scenario_payload};

fn extract(value: &Value) -> Result<FeatureVector, ExtractError> {
    let payload = parse_payload(value.to_string().as_bytes()).unwrap();
    extract_features(&payload)
}

#[test]
fn test_scenario_vector_order() {
    let features = extract(&scenario_payload()).unwrap();
    assert_eq!(features, scenario_features());
    assert_eq!(
        features.as_slice(),
        &[500.0, 18.0, 2.0, 450.0, 1.0, 0.0, 600.0, 15.0, 1.0, 0.0]
    );
}

#[test]
fn test_only_first_record_is_used() {
    let mut payload = scenario_payload();
    payload["stroopResults"]
        .as_array_mut()
        .unwrap()
        .push(json!({"averageResponseTime": 1, "correctAnswers": 1, "incorrectAnswers": 1}));
    let features = extract(&payload).unwrap();
    assert_eq!(features, scenario_features());
}

#[test]
fn test_fractional_values_are_kept() {
    let mut payload = scenario_payload();
    payload["sstResults"][0]["averageResponseTime"] = json!(612.75);
    let features = extract(&payload).unwrap();
    assert_eq!(features.as_slice()[6], 612.75);
}

#[test]
fn test_empty_list_is_missing_subtest() {
    let mut payload = scenario_payload();
    payload["stroopResults"] = json!([]);
    let err = extract(&payload).unwrap_err();
    assert_eq!(
        err,
        ExtractError::MissingSubtestResults {
            missing: vec!["stroopResults"]
        }
    );
    assert!(err.to_string().contains("stroopResults, cptResults or sstResults"));
}

#[test]
fn test_absent_and_null_lists_are_missing_subtests() {
    let mut payload = scenario_payload();
    payload.as_object_mut().unwrap().remove("cptResults");
    payload["sstResults"] = Value::Null;
    let err = extract(&payload).unwrap_err();
    assert_eq!(
        err,
        ExtractError::MissingSubtestResults {
            missing: vec!["cptResults", "sstResults"]
        }
    );
}

#[test]
fn test_empty_object_payload_lists_all_subtests() {
    let err = extract(&json!({})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing required data in stroopResults, cptResults or sstResults (missing: stroopResults, cptResults, sstResults)"
    );
}

#[test]
fn test_blank_record_is_missing_subtest() {
    let mut payload = scenario_payload();
    payload["cptResults"] = json!([{}]);
    assert!(matches!(
        extract(&payload).unwrap_err(),
        ExtractError::MissingSubtestResults { .. }
    ));
}

#[test]
fn test_all_null_record_is_missing_values() {
    let mut payload = scenario_payload();
    payload["stroopResults"] = json!([
        {"averageResponseTime": null, "correctAnswers": null, "incorrectAnswers": null}
    ]);
    let err = extract(&payload).unwrap_err();
    assert_eq!(
        err,
        ExtractError::MissingFieldValues {
            fields: vec![
                "stroopResults[0].averageResponseTime".to_string(),
                "stroopResults[0].correctAnswers".to_string(),
                "stroopResults[0].incorrectAnswers".to_string(),
            ]
        }
    );
}

#[test]
fn test_record_with_unrelated_keys_is_missing_values() {
    let mut payload = scenario_payload();
    payload["cptResults"] = json!([{"score": 3}]);
    assert!(matches!(
        extract(&payload).unwrap_err(),
        ExtractError::MissingFieldValues { fields } if fields.len() == 3
    ));
}

#[test]
fn test_malformed_trailing_element_is_ignored() {
    let mut payload = scenario_payload();
    payload["sstResults"]
        .as_array_mut()
        .unwrap()
        .push(json!({"averageResponseTime": "n/a"}));
    assert_eq!(extract(&payload).unwrap(), scenario_features());
}

#[test]
fn test_null_field_is_missing_value() {
    let mut payload = scenario_payload();
    payload["stroopResults"][0]["correctAnswers"] = Value::Null;
    let err = extract(&payload).unwrap_err();
    assert_eq!(
        err,
        ExtractError::MissingFieldValues {
            fields: vec!["stroopResults[0].correctAnswers".to_string()]
        }
    );
    assert!(err.to_string().starts_with("missing values in evaluation results"));
}

#[test]
fn test_all_missing_fields_are_reported_in_order() {
    let mut payload = scenario_payload();
    payload["sstResults"][0]
        .as_object_mut()
        .unwrap()
        .remove("ignoredArrows");
    payload["cptResults"][0]["omissionErrors"] = Value::Null;
    let err = extract(&payload).unwrap_err();
    assert_eq!(
        err,
        ExtractError::MissingFieldValues {
            fields: vec![
                "cptResults[0].omissionErrors".to_string(),
                "sstResults[0].ignoredArrows".to_string(),
            ]
        }
    );
}

#[test]
fn test_missing_subtest_wins_over_missing_field() {
    let mut payload = scenario_payload();
    payload["stroopResults"][0]["correctAnswers"] = Value::Null;
    payload["sstResults"] = json!([]);
    assert!(matches!(
        extract(&payload).unwrap_err(),
        ExtractError::MissingSubtestResults { .. }
    ));
}
