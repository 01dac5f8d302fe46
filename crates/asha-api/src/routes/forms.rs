//! Clinical form routes
//!
//! Submission handlers validate the payload, persist it for the
//! authenticated worker, and for pregnancy and vaccination forms seed the
//! matching reminder alert.

use crate::auth::AuthWorker;
use crate::db::alerts::NewAlert;
use crate::error::{parse_payload, ApiError};
use crate::models::{
    ChildVaccinationResponse, FamilySurveyResponse, LeprosyReportResponse, MessageResponse,
    PostnatalCareResponse, PregnancyReportResponse,
};
use crate::AppState;
use asha_core::forms::{
    ChildVaccinationForm, FamilySurveyForm, LeprosyReportForm, PostnatalCareForm,
    PregnancyReportForm,
};
use asha_core::AlertCategory;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

pub async fn create_family_survey(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
    Json(payload): Json<Value>,
) -> Result<Json<FamilySurveyResponse>, ApiError> {
    let form: FamilySurveyForm = parse_payload(payload)?;
    let survey = form.validate()?;
    let row = state.store.insert_family_survey(worker.id, survey).await?;
    Ok(Json(row.into()))
}

pub async fn list_family_surveys(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
) -> Result<Json<Vec<FamilySurveyResponse>>, ApiError> {
    let rows = state.store.list_family_surveys(worker.id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create_pregnancy_report(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
    Json(payload): Json<Value>,
) -> Result<Json<PregnancyReportResponse>, ApiError> {
    let form: PregnancyReportForm = parse_payload(payload)?;
    let report = form.validate()?;
    let row = state.store.insert_pregnancy_report(worker.id, report).await?;

    // Each registered pregnancy carries a checkup reminder due at the EDD.
    state
        .store
        .insert_alert(
            worker.id,
            NewAlert {
                title: "ANC checkup due".to_string(),
                message: format!("Schedule the next ANC checkup for {}", row.patient_name),
                category: AlertCategory::Anc,
                patient_id: Some(row.id.to_string()),
                patient_name: row.patient_name.clone(),
                due_date: row.edd,
            },
        )
        .await?;

    Ok(Json(row.into()))
}

pub async fn list_pregnancy_reports(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
) -> Result<Json<Vec<PregnancyReportResponse>>, ApiError> {
    let rows = state.store.list_pregnancy_reports(worker.id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create_child_vaccination(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
    Json(payload): Json<Value>,
) -> Result<Json<MessageResponse>, ApiError> {
    let form: ChildVaccinationForm = parse_payload(payload)?;
    let vaccination = form.validate()?;
    let row = state
        .store
        .insert_child_vaccination(worker.id, vaccination)
        .await?;

    state
        .store
        .insert_alert(
            worker.id,
            NewAlert {
                title: "Vaccination due".to_string(),
                message: format!("Next vaccination dose due for {}", row.child_name),
                category: AlertCategory::Vaccination,
                patient_id: Some(row.id.to_string()),
                patient_name: row.child_name.clone(),
                due_date: row.next_due,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new(
        "Child vaccination record created successfully",
    )))
}

pub async fn list_child_vaccinations(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
) -> Result<Json<Vec<ChildVaccinationResponse>>, ApiError> {
    let rows = state.store.list_child_vaccinations(worker.id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create_postnatal_care(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
    Json(payload): Json<Value>,
) -> Result<Json<MessageResponse>, ApiError> {
    let form: PostnatalCareForm = parse_payload(payload)?;
    let record = form.validate()?;
    state.store.insert_postnatal_care(worker.id, record).await?;
    Ok(Json(MessageResponse::new(
        "Postnatal care record created successfully",
    )))
}

pub async fn list_postnatal_care(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
) -> Result<Json<Vec<PostnatalCareResponse>>, ApiError> {
    let rows = state.store.list_postnatal_care(worker.id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create_leprosy_report(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
    Json(payload): Json<Value>,
) -> Result<Json<MessageResponse>, ApiError> {
    let form: LeprosyReportForm = parse_payload(payload)?;
    let report = form.validate()?;
    state.store.insert_leprosy_report(worker.id, report).await?;
    Ok(Json(MessageResponse::new(
        "Leprosy report created successfully",
    )))
}

pub async fn list_leprosy_reports(
    State(state): State<Arc<AppState>>,
    AuthWorker(worker): AuthWorker,
) -> Result<Json<Vec<LeprosyReportResponse>>, ApiError> {
    let rows = state.store.list_leprosy_reports(worker.id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
