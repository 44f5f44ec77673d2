use crate::input::{CptResult, EvaluationPayload, SstResult, StroopResult, SubtestRecord};
use crate::model::{FeatureVector, N_FEATURES};

const EXPECTED_LISTS: [&str; 3] = [
    StroopResult::LIST_KEY,
    CptResult::LIST_KEY,
    SstResult::LIST_KEY,
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error(
        "missing required data in stroopResults, cptResults or sstResults (missing: {})",
        .missing.join(", ")
    )]
    MissingSubtestResults { missing: Vec<&'static str> },
    #[error("missing values in evaluation results: {}", .fields.join(", "))]
    MissingFieldValues { fields: Vec<String> },
}

/// Builds the fixed-order model input from the first record of each sub-test.
pub fn extract_features(payload: &EvaluationPayload) -> Result<FeatureVector, ExtractError> {
    let stroop = payload.stroop_results.as_ref();
    let cpt = payload.cpt_results.as_ref();
    let sst = payload.sst_results.as_ref();

    let present = [stroop.is_some(), cpt.is_some(), sst.is_some()];
    let missing = EXPECTED_LISTS
        .iter()
        .zip(present)
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>();
    let (Some(stroop), Some(cpt), Some(sst)) = (stroop, cpt, sst) else {
        return Err(ExtractError::MissingSubtestResults { missing });
    };

    let mut values = [0.0f64; N_FEATURES];
    let mut missing_fields = Vec::new();
    let mut slot = 0usize;
    collect(stroop, &mut values, &mut slot, &mut missing_fields);
    collect(cpt, &mut values, &mut slot, &mut missing_fields);
    collect(sst, &mut values, &mut slot, &mut missing_fields);
    debug_assert_eq!(slot, N_FEATURES);

    if !missing_fields.is_empty() {
        return Err(ExtractError::MissingFieldValues {
            fields: missing_fields,
        });
    }

    Ok(FeatureVector::new(values))
}

fn collect<T: SubtestRecord>(
    record: &T,
    values: &mut [f64; N_FEATURES],
    slot: &mut usize,
    missing: &mut Vec<String>,
) {
    for (field, value) in T::FIELDS.iter().zip(record.values()) {
        match value {
            Some(v) => values[*slot] = v,
            None => missing.push(format!("{}[0].{}", T::LIST_KEY, field)),
        }
        *slot += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_extract.rs"]
mod tests;
