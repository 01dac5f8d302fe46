//! Database row types

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Worker {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub phone_number: String,
    pub place: String,
    pub aadhaar_number: String,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct FamilySurvey {
    pub id: Uuid,
    pub household_id: String,
    pub members_list: String,
    pub sanitation: String,
    pub chronic_illnesses: String,
    pub asha_worker_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub synced: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct PregnancyReport {
    pub id: Uuid,
    pub lmp: DateTime<Utc>,
    pub edd: DateTime<Utc>,
    pub gravida: i64,
    pub para: i64,
    pub anc_checkups: String,
    pub risk_factors: String,
    pub patient_name: String,
    pub patient_phone: String,
    pub asha_worker_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub synced: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct ChildVaccination {
    pub id: Uuid,
    pub child_name: String,
    pub child_dob: DateTime<Utc>,
    pub vaccine_schedule: String,
    pub missed_doses: String,
    pub next_due: DateTime<Utc>,
    pub parent_name: String,
    pub parent_phone: String,
    pub asha_worker_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub synced: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct PostnatalCare {
    pub id: Uuid,
    pub pnc_visits: String,
    pub mother_health: String,
    pub baby_health: String,
    pub counselling: String,
    pub mother_name: String,
    pub delivery_date: DateTime<Utc>,
    pub asha_worker_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub synced: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct LeprosyReport {
    pub id: Uuid,
    pub patient_name: String,
    pub leprosy_type: String,
    pub treatment: String,
    pub follow_ups: String,
    pub household_contacts: String,
    pub asha_worker_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub synced: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct Alert {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub alert_type: String,
    pub patient_id: Option<String>,
    pub patient_name: String,
    pub due_date: DateTime<Utc>,
    pub asha_worker_id: Uuid,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
