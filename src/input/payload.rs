use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One evaluation as posted by the assessment client. Only the first element
/// of each list is decoded; later elements are never inspected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationPayload {
    #[serde(default, deserialize_with = "first_element")]
    pub stroop_results: Option<StroopResult>,
    #[serde(default, deserialize_with = "first_element")]
    pub cpt_results: Option<CptResult>,
    #[serde(default, deserialize_with = "first_element")]
    pub sst_results: Option<SstResult>,
}

/// Types element 0 of a result list. Absent or `null` lists, an empty list,
/// a `null` head and an empty-object head all count as no result.
fn first_element<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + SubtestRecord,
{
    let list = Option::<Vec<Value>>::deserialize(deserializer)?;
    let Some(head) = list.and_then(|items| items.into_iter().next()) else {
        return Ok(None);
    };
    match &head {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        _ => T::deserialize(head)
            .map(Some)
            .map_err(|e| D::Error::custom(format!("{}[0]: {e}", T::LIST_KEY))),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StroopResult {
    pub average_response_time: Option<f64>,
    pub correct_answers: Option<f64>,
    pub incorrect_answers: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CptResult {
    pub average_response_time: Option<f64>,
    pub omission_errors: Option<f64>,
    pub commission_errors: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SstResult {
    pub average_response_time: Option<f64>,
    pub correct_stops: Option<f64>,
    pub incorrect_stops: Option<f64>,
    pub ignored_arrows: Option<f64>,
}

/// Field access shared by the three sub-test records, in model order.
pub trait SubtestRecord {
    /// Key of the list holding this record in the payload.
    const LIST_KEY: &'static str;
    /// Wire names of the record's fields, in feature order.
    const FIELDS: &'static [&'static str];

    fn values(&self) -> Vec<Option<f64>>;
}

impl SubtestRecord for StroopResult {
    const LIST_KEY: &'static str = "stroopResults";
    const FIELDS: &'static [&'static str] =
        &["averageResponseTime", "correctAnswers", "incorrectAnswers"];

    fn values(&self) -> Vec<Option<f64>> {
        vec![
            self.average_response_time,
            self.correct_answers,
            self.incorrect_answers,
        ]
    }
}

impl SubtestRecord for CptResult {
    const LIST_KEY: &'static str = "cptResults";
    const FIELDS: &'static [&'static str] =
        &["averageResponseTime", "omissionErrors", "commissionErrors"];

    fn values(&self) -> Vec<Option<f64>> {
        vec![
            self.average_response_time,
            self.omission_errors,
            self.commission_errors,
        ]
    }
}

impl SubtestRecord for SstResult {
    const LIST_KEY: &'static str = "sstResults";
    const FIELDS: &'static [&'static str] = &[
        "averageResponseTime",
        "correctStops",
        "incorrectStops",
        "ignoredArrows",
    ];

    fn values(&self) -> Vec<Option<f64>> {
        vec![
            self.average_response_time,
            self.correct_stops,
            self.incorrect_stops,
            self.ignored_arrows,
        ]
    }
}
