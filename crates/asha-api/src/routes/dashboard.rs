//! Dashboard route

use crate::auth::AuthWorker;
use crate::error::ApiError;
use crate::models::DashboardResponse;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

pub async fn get_dashboard_stats(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
) -> Result<Json<DashboardResponse>, ApiError> {
    let total_surveys = state.store.count_family_surveys(worker.id).await?;
    let total_pregnancies = state.store.count_pregnancy_reports(worker.id).await?;
    let total_vaccinations = state.store.count_child_vaccinations(worker.id).await?;
    let total_pnc = state.store.count_postnatal_care(worker.id).await?;
    let unread_alerts = state.store.count_unread_alerts(worker.id).await?;

    Ok(Json(DashboardResponse {
        total_surveys,
        total_pregnancies,
        total_vaccinations,
        total_pnc,
        unread_alerts,
        incentives_earned: asha_core::incentive_total(total_surveys, total_pregnancies),
    }))
}
