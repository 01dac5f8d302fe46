//! Registration and login models

use crate::db::schema::Worker;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone_number: String,
    pub place: String,
    pub aadhaar_number: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Worker profile as exposed to clients. The password hash and aadhaar
/// number never appear here.
#[derive(Debug, Serialize)]
pub struct WorkerResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub phone_number: String,
    pub place: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Worker> for WorkerResponse {
    fn from(worker: &Worker) -> Self {
        Self {
            id: worker.id,
            username: worker.username.clone(),
            name: worker.name.clone(),
            phone_number: worker.phone_number.clone(),
            place: worker.place.clone(),
            created_at: worker.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: WorkerResponse,
}
