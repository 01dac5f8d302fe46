//! Offline sync route
//!
//! Replays a batch of client-queued records as store writes. Each insert
//! commits independently; there is no batch-wide rollback. A validation
//! failure stops the replay, leaving earlier inserts in place.

use crate::auth::AuthWorker;
use crate::error::ApiError;
use crate::AppState;
use asha_core::sync::{SyncBatch, SyncBucket};
use asha_core::ValidationError;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub message: String,
    pub inserted_count: u64,
}

pub async fn sync_offline_data(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
    Json(payload): Json<Value>,
) -> Result<Json<SyncResponse>, ApiError> {
    let Value::Object(map) = payload else {
        return Err(ValidationError::new(vec!["payload".to_string()]).into());
    };
    let batch = SyncBatch::parse(map)?;

    let mut inserted = 0u64;
    for bucket in batch.0 {
        match bucket {
            SyncBucket::FamilySurveys(records) => {
                for record in records {
                    let survey = record.form.validate()?;
                    if state
                        .store
                        .sync_family_survey(record.id, worker.id, survey)
                        .await?
                    {
                        inserted += 1;
                    }
                }
            }
            SyncBucket::PregnancyReports(records) => {
                for record in records {
                    let report = record.form.validate()?;
                    if state
                        .store
                        .sync_pregnancy_report(record.id, worker.id, report)
                        .await?
                    {
                        inserted += 1;
                    }
                }
            }
            SyncBucket::ChildVaccinations(records) => {
                for record in records {
                    let vaccination = record.form.validate()?;
                    if state
                        .store
                        .sync_child_vaccination(record.id, worker.id, vaccination)
                        .await?
                    {
                        inserted += 1;
                    }
                }
            }
            SyncBucket::PostnatalCare(records) => {
                for record in records {
                    let pnc = record.form.validate()?;
                    if state
                        .store
                        .sync_postnatal_care(record.id, worker.id, pnc)
                        .await?
                    {
                        inserted += 1;
                    }
                }
            }
            SyncBucket::LeprosyReports(records) => {
                for record in records {
                    let report = record.form.validate()?;
                    if state
                        .store
                        .sync_leprosy_report(record.id, worker.id, report)
                        .await?
                    {
                        inserted += 1;
                    }
                }
            }
            SyncBucket::Unrecognized { tag, count } => {
                warn!("skipping {count} sync records with unrecognized form type {tag}");
            }
        }
    }

    Ok(Json(SyncResponse {
        message: format!("Synced {inserted} records successfully"),
        inserted_count: inserted,
    }))
}
