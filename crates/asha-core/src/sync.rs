//! Offline sync batch model.
//!
//! Clients queue forms locally while offline and replay them in one batch:
//! a JSON object mapping a form-type tag to an array of raw records. Each
//! recognized tag becomes a typed bucket; anything else lands in
//! [`SyncBucket::Unrecognized`] so callers can observe (and tests can assert
//! on) skipped data instead of it vanishing.

use crate::forms::{
    ChildVaccinationForm, FamilySurveyForm, LeprosyReportForm, PostnatalCareForm,
    PregnancyReportForm,
};
use crate::ValidationError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One queued offline record: the id a previous server round-trip assigned
/// (if any), plus the form payload itself. Extra bookkeeping keys from the
/// client's local store are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct QueuedRecord<T> {
    #[serde(default, deserialize_with = "client_uuid")]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub form: T,
}

/// Client-side ids are only usable for replay deduplication when they are
/// the server's own UUIDs; anything else is treated as absent.
fn client_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok()))
}

/// One form-type bucket out of a sync payload.
#[derive(Debug, Clone)]
pub enum SyncBucket {
    FamilySurveys(Vec<QueuedRecord<FamilySurveyForm>>),
    PregnancyReports(Vec<QueuedRecord<PregnancyReportForm>>),
    ChildVaccinations(Vec<QueuedRecord<ChildVaccinationForm>>),
    PostnatalCare(Vec<QueuedRecord<PostnatalCareForm>>),
    LeprosyReports(Vec<QueuedRecord<LeprosyReportForm>>),
    Unrecognized { tag: String, count: usize },
}

impl SyncBucket {
    pub fn parse(tag: &str, records: Vec<Value>) -> Result<SyncBucket, ValidationError> {
        match tag {
            "family_surveys" => Ok(SyncBucket::FamilySurveys(decode(tag, records)?)),
            "pregnancy_reports" => Ok(SyncBucket::PregnancyReports(decode(tag, records)?)),
            "child_vaccinations" => Ok(SyncBucket::ChildVaccinations(decode(tag, records)?)),
            "postnatal_care" => Ok(SyncBucket::PostnatalCare(decode(tag, records)?)),
            "leprosy_reports" => Ok(SyncBucket::LeprosyReports(decode(tag, records)?)),
            _ => Ok(SyncBucket::Unrecognized {
                tag: tag.to_string(),
                count: records.len(),
            }),
        }
    }
}

fn decode<T: DeserializeOwned>(
    tag: &str,
    records: Vec<Value>,
) -> Result<Vec<QueuedRecord<T>>, ValidationError> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            serde_json::from_value(value)
                .map_err(|err| ValidationError::new(vec![format!("{tag}[{i}]: {err}")]))
        })
        .collect()
}

/// A parsed sync payload, one bucket per form-type tag.
#[derive(Debug, Clone)]
pub struct SyncBatch(pub Vec<SyncBucket>);

impl SyncBatch {
    pub fn parse(payload: Map<String, Value>) -> Result<SyncBatch, ValidationError> {
        let mut buckets = Vec::with_capacity(payload.len());
        for (tag, value) in payload {
            let Value::Array(records) = value else {
                return Err(ValidationError::new(vec![tag]));
            };
            buckets.push(SyncBucket::parse(&tag, records)?);
        }
        Ok(SyncBatch(buckets))
    }
}
