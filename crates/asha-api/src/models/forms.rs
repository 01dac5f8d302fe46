//! Form record response models

use crate::db::schema::{
    ChildVaccination, FamilySurvey, LeprosyReport, PostnatalCare, PregnancyReport,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct FamilySurveyResponse {
    pub id: Uuid,
    pub household_id: String,
    pub members_list: String,
    pub sanitation: String,
    pub chronic_illnesses: String,
    pub created_at: DateTime<Utc>,
    pub synced: bool,
}

impl From<FamilySurvey> for FamilySurveyResponse {
    fn from(row: FamilySurvey) -> Self {
        Self {
            id: row.id,
            household_id: row.household_id,
            members_list: row.members_list,
            sanitation: row.sanitation,
            chronic_illnesses: row.chronic_illnesses,
            created_at: row.created_at,
            synced: row.synced,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PregnancyReportResponse {
    pub id: Uuid,
    pub lmp: DateTime<Utc>,
    pub edd: DateTime<Utc>,
    pub gravida: i64,
    pub para: i64,
    pub anc_checkups: String,
    pub risk_factors: String,
    pub patient_name: String,
    pub patient_phone: String,
    pub created_at: DateTime<Utc>,
    pub synced: bool,
}

impl From<PregnancyReport> for PregnancyReportResponse {
    fn from(row: PregnancyReport) -> Self {
        Self {
            id: row.id,
            lmp: row.lmp,
            edd: row.edd,
            gravida: row.gravida,
            para: row.para,
            anc_checkups: row.anc_checkups,
            risk_factors: row.risk_factors,
            patient_name: row.patient_name,
            patient_phone: row.patient_phone,
            created_at: row.created_at,
            synced: row.synced,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChildVaccinationResponse {
    pub id: Uuid,
    pub child_name: String,
    pub child_dob: DateTime<Utc>,
    pub vaccine_schedule: String,
    pub missed_doses: String,
    pub next_due: DateTime<Utc>,
    pub parent_name: String,
    pub parent_phone: String,
    pub created_at: DateTime<Utc>,
    pub synced: bool,
}

impl From<ChildVaccination> for ChildVaccinationResponse {
    fn from(row: ChildVaccination) -> Self {
        Self {
            id: row.id,
            child_name: row.child_name,
            child_dob: row.child_dob,
            vaccine_schedule: row.vaccine_schedule,
            missed_doses: row.missed_doses,
            next_due: row.next_due,
            parent_name: row.parent_name,
            parent_phone: row.parent_phone,
            created_at: row.created_at,
            synced: row.synced,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostnatalCareResponse {
    pub id: Uuid,
    pub pnc_visits: String,
    pub mother_health: String,
    pub baby_health: String,
    pub counselling: String,
    pub mother_name: String,
    pub delivery_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub synced: bool,
}

impl From<PostnatalCare> for PostnatalCareResponse {
    fn from(row: PostnatalCare) -> Self {
        Self {
            id: row.id,
            pnc_visits: row.pnc_visits,
            mother_health: row.mother_health,
            baby_health: row.baby_health,
            counselling: row.counselling,
            mother_name: row.mother_name,
            delivery_date: row.delivery_date,
            created_at: row.created_at,
            synced: row.synced,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeprosyReportResponse {
    pub id: Uuid,
    pub patient_name: String,
    pub leprosy_type: String,
    pub treatment: String,
    pub follow_ups: String,
    pub household_contacts: String,
    pub created_at: DateTime<Utc>,
    pub synced: bool,
}

impl From<LeprosyReport> for LeprosyReportResponse {
    fn from(row: LeprosyReport) -> Self {
        Self {
            id: row.id,
            patient_name: row.patient_name,
            leprosy_type: row.leprosy_type,
            treatment: row.treatment,
            follow_ups: row.follow_ups,
            household_contacts: row.household_contacts,
            created_at: row.created_at,
            synced: row.synced,
        }
    }
}
