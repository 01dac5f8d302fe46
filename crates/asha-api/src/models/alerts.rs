//! Alert response models

use crate::db::schema::Alert;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub alert_type: String,
    pub patient_name: String,
    pub due_date: DateTime<Utc>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Alert> for AlertResponse {
    fn from(row: Alert) -> Self {
        Self {
            id: row.id,
            title: row.title,
            message: row.message,
            alert_type: row.alert_type,
            patient_name: row.patient_name,
            due_date: row.due_date,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}
