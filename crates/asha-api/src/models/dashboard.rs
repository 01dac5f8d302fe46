//! Dashboard models

use serde::Serialize;

/// Per-worker submission counts plus the derived incentive figure.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_surveys: i64,
    pub total_pregnancies: i64,
    pub total_vaccinations: i64,
    pub total_pnc: i64,
    pub unread_alerts: i64,
    pub incentives_earned: i64,
}
