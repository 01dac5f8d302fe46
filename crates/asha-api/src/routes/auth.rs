//! Registration and login routes

use crate::auth::{create_token, hash_password, verify_password};
use crate::db::workers::NewWorker;
use crate::error::{parse_payload, ApiError};
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, WorkerResponse};
use crate::AppState;
use asha_core::ValidationError;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<WorkerResponse>, ApiError> {
    let data: RegisterRequest = parse_payload(payload)?;

    let mut missing = Vec::new();
    for (field, value) in [
        ("name", &data.name),
        ("phone_number", &data.phone_number),
        ("place", &data.place),
        ("aadhaar_number", &data.aadhaar_number),
        ("password", &data.password),
    ] {
        if value.trim().is_empty() {
            missing.push(field.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(ValidationError::new(missing).into());
    }

    if state.store.worker_phone_exists(&data.phone_number).await? {
        return Err(ApiError::Conflict("Phone number already registered"));
    }
    if state.store.worker_aadhaar_exists(&data.aadhaar_number).await? {
        return Err(ApiError::Conflict("Aadhaar number already registered"));
    }

    let username = state.store.next_username(&data.name).await?;
    let hashed_password = hash_password(&data.password)?;

    let worker = state
        .store
        .insert_worker(
            &username,
            NewWorker {
                name: data.name,
                phone_number: data.phone_number,
                place: data.place,
                aadhaar_number: data.aadhaar_number,
                hashed_password,
            },
        )
        .await?;

    info!("registered worker {}", worker.username);
    Ok(Json(WorkerResponse::from(&worker)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<LoginResponse>, ApiError> {
    let data: LoginRequest = parse_payload(payload)?;

    let worker = state
        .store
        .find_worker_by_username(&data.username)
        .await?
        .ok_or(ApiError::Unauthorized("Incorrect username or password"))?;

    if !verify_password(&data.password, &worker.hashed_password) {
        return Err(ApiError::Unauthorized("Incorrect username or password"));
    }

    let access_token = create_token(&worker.username, &state.config.jwt_secret)?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: WorkerResponse::from(&worker),
    }))
}
