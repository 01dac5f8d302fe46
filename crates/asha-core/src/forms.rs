//! Form payloads and validation for the five clinical form types.
//!
//! Each form type comes as a wire payload (`*Form`) that `validate()`s into
//! the record the store persists (`New*`). Validation checks required-field
//! presence, date parsing, and that obstetric counts are non-negative, and
//! reports every offending field at once.

use crate::ValidationError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Parses the timestamp formats the mobile clients send: RFC 3339, a bare
/// datetime, or a bare date (taken as midnight UTC).
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)));
    }
    None
}

/// Collects offending field names across a whole payload before failing.
struct FieldCheck {
    bad: Vec<String>,
}

impl FieldCheck {
    fn new() -> Self {
        Self { bad: Vec::new() }
    }

    fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.bad.push(field.to_string());
        }
    }

    fn date(&mut self, field: &str, value: &str) -> Option<DateTime<Utc>> {
        match parse_datetime(value) {
            Some(dt) => Some(dt),
            None => {
                self.bad.push(field.to_string());
                None
            }
        }
    }

    fn count(&mut self, field: &str, value: i64) {
        if value < 0 {
            self.bad.push(field.to_string());
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.bad.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.bad))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilySurveyForm {
    pub household_id: String,
    pub members_list: String,
    pub sanitation: String,
    pub chronic_illnesses: String,
}

/// Validated household survey, ready to persist.
#[derive(Debug, Clone)]
pub struct NewFamilySurvey {
    pub household_id: String,
    pub members_list: String,
    pub sanitation: String,
    pub chronic_illnesses: String,
}

impl FamilySurveyForm {
    pub fn validate(self) -> Result<NewFamilySurvey, ValidationError> {
        let mut check = FieldCheck::new();
        check.require("household_id", &self.household_id);
        check.require("sanitation", &self.sanitation);
        check.finish()?;
        Ok(NewFamilySurvey {
            household_id: self.household_id,
            members_list: self.members_list,
            sanitation: self.sanitation,
            chronic_illnesses: self.chronic_illnesses,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PregnancyReportForm {
    pub lmp: String,
    pub edd: String,
    pub gravida: i64,
    pub para: i64,
    pub anc_checkups: String,
    pub risk_factors: String,
    pub patient_name: String,
    pub patient_phone: String,
}

#[derive(Debug, Clone)]
pub struct NewPregnancyReport {
    pub lmp: DateTime<Utc>,
    pub edd: DateTime<Utc>,
    pub gravida: i64,
    pub para: i64,
    pub anc_checkups: String,
    pub risk_factors: String,
    pub patient_name: String,
    pub patient_phone: String,
}

impl PregnancyReportForm {
    pub fn validate(self) -> Result<NewPregnancyReport, ValidationError> {
        let mut check = FieldCheck::new();
        let lmp = check.date("lmp", &self.lmp);
        let edd = check.date("edd", &self.edd);
        check.count("gravida", self.gravida);
        check.count("para", self.para);
        check.require("patient_name", &self.patient_name);
        check.require("patient_phone", &self.patient_phone);
        check.finish()?;
        let (Some(lmp), Some(edd)) = (lmp, edd) else {
            return Err(ValidationError::new(vec!["lmp".to_string(), "edd".to_string()]));
        };
        Ok(NewPregnancyReport {
            lmp,
            edd,
            gravida: self.gravida,
            para: self.para,
            anc_checkups: self.anc_checkups,
            risk_factors: self.risk_factors,
            patient_name: self.patient_name,
            patient_phone: self.patient_phone,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildVaccinationForm {
    pub child_name: String,
    pub child_dob: String,
    pub vaccine_schedule: String,
    pub missed_doses: String,
    pub next_due: String,
    pub parent_name: String,
    pub parent_phone: String,
}

#[derive(Debug, Clone)]
pub struct NewChildVaccination {
    pub child_name: String,
    pub child_dob: DateTime<Utc>,
    pub vaccine_schedule: String,
    pub missed_doses: String,
    pub next_due: DateTime<Utc>,
    pub parent_name: String,
    pub parent_phone: String,
}

impl ChildVaccinationForm {
    pub fn validate(self) -> Result<NewChildVaccination, ValidationError> {
        let mut check = FieldCheck::new();
        check.require("child_name", &self.child_name);
        let child_dob = check.date("child_dob", &self.child_dob);
        let next_due = check.date("next_due", &self.next_due);
        check.require("parent_name", &self.parent_name);
        check.finish()?;
        let (Some(child_dob), Some(next_due)) = (child_dob, next_due) else {
            return Err(ValidationError::new(vec![
                "child_dob".to_string(),
                "next_due".to_string(),
            ]));
        };
        Ok(NewChildVaccination {
            child_name: self.child_name,
            child_dob,
            vaccine_schedule: self.vaccine_schedule,
            missed_doses: self.missed_doses,
            next_due,
            parent_name: self.parent_name,
            parent_phone: self.parent_phone,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostnatalCareForm {
    pub pnc_visits: String,
    pub mother_health: String,
    pub baby_health: String,
    pub counselling: String,
    pub mother_name: String,
    pub delivery_date: String,
}

#[derive(Debug, Clone)]
pub struct NewPostnatalCare {
    pub pnc_visits: String,
    pub mother_health: String,
    pub baby_health: String,
    pub counselling: String,
    pub mother_name: String,
    pub delivery_date: DateTime<Utc>,
}

impl PostnatalCareForm {
    pub fn validate(self) -> Result<NewPostnatalCare, ValidationError> {
        let mut check = FieldCheck::new();
        check.require("mother_name", &self.mother_name);
        let delivery_date = check.date("delivery_date", &self.delivery_date);
        check.finish()?;
        let Some(delivery_date) = delivery_date else {
            return Err(ValidationError::new(vec!["delivery_date".to_string()]));
        };
        Ok(NewPostnatalCare {
            pnc_visits: self.pnc_visits,
            mother_health: self.mother_health,
            baby_health: self.baby_health,
            counselling: self.counselling,
            mother_name: self.mother_name,
            delivery_date,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeprosyReportForm {
    pub patient_name: String,
    pub leprosy_type: String,
    pub treatment: String,
    pub follow_ups: String,
    pub household_contacts: String,
}

#[derive(Debug, Clone)]
pub struct NewLeprosyReport {
    pub patient_name: String,
    pub leprosy_type: String,
    pub treatment: String,
    pub follow_ups: String,
    pub household_contacts: String,
}

impl LeprosyReportForm {
    pub fn validate(self) -> Result<NewLeprosyReport, ValidationError> {
        let mut check = FieldCheck::new();
        check.require("patient_name", &self.patient_name);
        check.require("leprosy_type", &self.leprosy_type);
        check.finish()?;
        Ok(NewLeprosyReport {
            patient_name: self.patient_name,
            leprosy_type: self.leprosy_type,
            treatment: self.treatment,
            follow_ups: self.follow_ups,
            household_contacts: self.household_contacts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pregnancy_form() -> PregnancyReportForm {
        PregnancyReportForm {
            lmp: "2026-01-10".to_string(),
            edd: "2026-10-17T00:00:00Z".to_string(),
            gravida: 2,
            para: 1,
            anc_checkups: "[]".to_string(),
            risk_factors: "".to_string(),
            patient_name: "Sunita Devi".to_string(),
            patient_phone: "9876500001".to_string(),
        }
    }

    #[test]
    fn test_parse_datetime_formats() {
        assert!(parse_datetime("2026-03-01").is_some());
        assert!(parse_datetime("2026-03-01T10:30:00").is_some());
        assert!(parse_datetime("2026-03-01T10:30:00+05:30").is_some());
        assert!(parse_datetime("not-a-date").is_none());
        assert!(parse_datetime("").is_none());
    }

    #[test]
    fn test_pregnancy_form_validates() {
        let report = pregnancy_form().validate().expect("valid form");
        assert_eq!(report.gravida, 2);
        assert_eq!(report.lmp, parse_datetime("2026-01-10").unwrap());
    }

    #[test]
    fn test_pregnancy_form_collects_all_bad_fields() {
        let mut form = pregnancy_form();
        form.lmp = "never".to_string();
        form.gravida = -1;
        form.patient_name = "  ".to_string();
        let err = form.validate().expect_err("invalid form");
        assert_eq!(err.fields, vec!["lmp", "gravida", "patient_name"]);
    }

    #[test]
    fn test_family_survey_requires_household_id() {
        let form = FamilySurveyForm {
            household_id: "".to_string(),
            members_list: "[]".to_string(),
            sanitation: "improved".to_string(),
            chronic_illnesses: "".to_string(),
        };
        let err = form.validate().expect_err("invalid form");
        assert_eq!(err.fields, vec!["household_id"]);
    }

    #[test]
    fn test_vaccination_form_bad_dates() {
        let form = ChildVaccinationForm {
            child_name: "Ravi".to_string(),
            child_dob: "2025-13-40".to_string(),
            vaccine_schedule: "[]".to_string(),
            missed_doses: "".to_string(),
            next_due: "soon".to_string(),
            parent_name: "Lakshmi".to_string(),
            parent_phone: "9876500002".to_string(),
        };
        let err = form.validate().expect_err("invalid form");
        assert_eq!(err.fields, vec!["child_dob", "next_due"]);
    }
}
