//! Alert routes

use crate::auth::AuthWorker;
use crate::error::ApiError;
use crate::models::{AlertResponse, MessageResponse};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use uuid::Uuid;

pub async fn list_alerts(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
) -> Result<Json<Vec<AlertResponse>>, ApiError> {
    let rows = state.store.list_alerts(worker.id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn mark_alert_read(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
    Path(alert_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .store
        .mark_alert_read(alert_id, worker.id)
        .await?
        .ok_or(ApiError::NotFound("Alert not found"))?;
    Ok(Json(MessageResponse::new("Alert marked as read")))
}
