//! ASHA Data-Collection Domain Core
//!
//! This crate provides the domain layer for the field-worker data-collection
//! backend: form payload types and validation for the five clinical form
//! types, the offline-sync batch model, reminder alert categories, and
//! login-handle derivation.

pub mod alerts;
pub mod forms;
pub mod sync;
pub mod username;

use thiserror::Error;

pub use alerts::AlertCategory;
pub use forms::{
    ChildVaccinationForm, FamilySurveyForm, LeprosyReportForm, NewChildVaccination,
    NewFamilySurvey, NewLeprosyReport, NewPostnatalCare, NewPregnancyReport, PostnatalCareForm,
    PregnancyReportForm,
};
pub use sync::{QueuedRecord, SyncBatch, SyncBucket};

/// Rejected form input, carrying the offending field names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid fields: {}", .fields.join(", "))]
pub struct ValidationError {
    pub fields: Vec<String>,
}

impl ValidationError {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }
}

/// Incentive amount for a worker's submission counts.
///
/// Mock calculation carried over from the pilot: 50 per household survey,
/// 100 per pregnancy registration. Not a payroll figure.
pub fn incentive_total(surveys: i64, pregnancies: i64) -> i64 {
    surveys * 50 + pregnancies * 100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incentive_total() {
        assert_eq!(incentive_total(0, 0), 0);
        assert_eq!(incentive_total(2, 1), 200);
        assert_eq!(incentive_total(3, 4), 550);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(vec!["lmp".to_string(), "gravida".to_string()]);
        assert_eq!(err.to_string(), "invalid fields: lmp, gravida");
    }
}
