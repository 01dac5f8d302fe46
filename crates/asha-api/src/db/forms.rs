//! Per-form record persistence.
//!
//! Serialized sub-record fields (member lists, checkup logs, vaccine
//! schedules, visit logs, follow-up logs) are stored as opaque text; the
//! store never parses them. The `sync_*` variants honor a client-supplied id
//! with `INSERT OR IGNORE`, so replaying a previously synced batch is a
//! no-op instead of a duplicate row.

use super::schema::{ChildVaccination, FamilySurvey, LeprosyReport, PostnatalCare, PregnancyReport};
use super::Store;
use asha_core::forms::{
    NewChildVaccination, NewFamilySurvey, NewLeprosyReport, NewPostnatalCare, NewPregnancyReport,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

const INSERT_FAMILY_SURVEY: &str = "INSERT INTO family_surveys \
    (id, household_id, members_list, sanitation, chronic_illnesses, asha_worker_id, created_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?)";
const INSERT_FAMILY_SURVEY_IF_ABSENT: &str = "INSERT OR IGNORE INTO family_surveys \
    (id, household_id, members_list, sanitation, chronic_illnesses, asha_worker_id, created_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?)";

const INSERT_PREGNANCY_REPORT: &str = "INSERT INTO pregnancy_reports \
    (id, lmp, edd, gravida, para, anc_checkups, risk_factors, patient_name, patient_phone, \
     asha_worker_id, created_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const INSERT_PREGNANCY_REPORT_IF_ABSENT: &str = "INSERT OR IGNORE INTO pregnancy_reports \
    (id, lmp, edd, gravida, para, anc_checkups, risk_factors, patient_name, patient_phone, \
     asha_worker_id, created_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

const INSERT_CHILD_VACCINATION: &str = "INSERT INTO child_vaccinations \
    (id, child_name, child_dob, vaccine_schedule, missed_doses, next_due, parent_name, \
     parent_phone, asha_worker_id, created_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const INSERT_CHILD_VACCINATION_IF_ABSENT: &str = "INSERT OR IGNORE INTO child_vaccinations \
    (id, child_name, child_dob, vaccine_schedule, missed_doses, next_due, parent_name, \
     parent_phone, asha_worker_id, created_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

const INSERT_POSTNATAL_CARE: &str = "INSERT INTO postnatal_care \
    (id, pnc_visits, mother_health, baby_health, counselling, mother_name, delivery_date, \
     asha_worker_id, created_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)";
const INSERT_POSTNATAL_CARE_IF_ABSENT: &str = "INSERT OR IGNORE INTO postnatal_care \
    (id, pnc_visits, mother_health, baby_health, counselling, mother_name, delivery_date, \
     asha_worker_id, created_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)";

const INSERT_LEPROSY_REPORT: &str = "INSERT INTO leprosy_reports \
    (id, patient_name, leprosy_type, treatment, follow_ups, household_contacts, asha_worker_id, \
     created_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)";
const INSERT_LEPROSY_REPORT_IF_ABSENT: &str = "INSERT OR IGNORE INTO leprosy_reports \
    (id, patient_name, leprosy_type, treatment, follow_ups, household_contacts, asha_worker_id, \
     created_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)";

impl Store {
    // Family surveys

    pub async fn insert_family_survey(
        &self,
        owner: Uuid,
        survey: NewFamilySurvey,
    ) -> sqlx::Result<FamilySurvey> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        self.family_survey_insert(INSERT_FAMILY_SURVEY, id, owner, &survey, created_at)
            .await?;
        Ok(FamilySurvey {
            id,
            household_id: survey.household_id,
            members_list: survey.members_list,
            sanitation: survey.sanitation,
            chronic_illnesses: survey.chronic_illnesses,
            asha_worker_id: owner,
            created_at,
            synced: false,
        })
    }

    pub async fn sync_family_survey(
        &self,
        client_id: Option<Uuid>,
        owner: Uuid,
        survey: NewFamilySurvey,
    ) -> sqlx::Result<bool> {
        let created_at = Utc::now();
        match client_id {
            Some(id) => {
                let affected = self
                    .family_survey_insert(INSERT_FAMILY_SURVEY_IF_ABSENT, id, owner, &survey, created_at)
                    .await?;
                Ok(affected > 0)
            }
            None => {
                self.family_survey_insert(
                    INSERT_FAMILY_SURVEY,
                    Uuid::new_v4(),
                    owner,
                    &survey,
                    created_at,
                )
                .await?;
                Ok(true)
            }
        }
    }

    async fn family_survey_insert(
        &self,
        sql: &str,
        id: Uuid,
        owner: Uuid,
        survey: &NewFamilySurvey,
        created_at: DateTime<Utc>,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(sql)
            .bind(id)
            .bind(&survey.household_id)
            .bind(&survey.members_list)
            .bind(&survey.sanitation)
            .bind(&survey.chronic_illnesses)
            .bind(owner)
            .bind(created_at)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_family_surveys(&self, owner: Uuid) -> sqlx::Result<Vec<FamilySurvey>> {
        sqlx::query_as::<_, FamilySurvey>("SELECT * FROM family_surveys WHERE asha_worker_id = ?")
            .bind(owner)
            .fetch_all(self.pool())
            .await
    }

    pub async fn count_family_surveys(&self, owner: Uuid) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM family_surveys WHERE asha_worker_id = ?")
            .bind(owner)
            .fetch_one(self.pool())
            .await
    }

    // Pregnancy reports

    pub async fn insert_pregnancy_report(
        &self,
        owner: Uuid,
        report: NewPregnancyReport,
    ) -> sqlx::Result<PregnancyReport> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        self.pregnancy_report_insert(INSERT_PREGNANCY_REPORT, id, owner, &report, created_at)
            .await?;
        Ok(PregnancyReport {
            id,
            lmp: report.lmp,
            edd: report.edd,
            gravida: report.gravida,
            para: report.para,
            anc_checkups: report.anc_checkups,
            risk_factors: report.risk_factors,
            patient_name: report.patient_name,
            patient_phone: report.patient_phone,
            asha_worker_id: owner,
            created_at,
            synced: false,
        })
    }

    pub async fn sync_pregnancy_report(
        &self,
        client_id: Option<Uuid>,
        owner: Uuid,
        report: NewPregnancyReport,
    ) -> sqlx::Result<bool> {
        let created_at = Utc::now();
        match client_id {
            Some(id) => {
                let affected = self
                    .pregnancy_report_insert(
                        INSERT_PREGNANCY_REPORT_IF_ABSENT,
                        id,
                        owner,
                        &report,
                        created_at,
                    )
                    .await?;
                Ok(affected > 0)
            }
            None => {
                self.pregnancy_report_insert(
                    INSERT_PREGNANCY_REPORT,
                    Uuid::new_v4(),
                    owner,
                    &report,
                    created_at,
                )
                .await?;
                Ok(true)
            }
        }
    }

    async fn pregnancy_report_insert(
        &self,
        sql: &str,
        id: Uuid,
        owner: Uuid,
        report: &NewPregnancyReport,
        created_at: DateTime<Utc>,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(sql)
            .bind(id)
            .bind(report.lmp)
            .bind(report.edd)
            .bind(report.gravida)
            .bind(report.para)
            .bind(&report.anc_checkups)
            .bind(&report.risk_factors)
            .bind(&report.patient_name)
            .bind(&report.patient_phone)
            .bind(owner)
            .bind(created_at)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_pregnancy_reports(&self, owner: Uuid) -> sqlx::Result<Vec<PregnancyReport>> {
        sqlx::query_as::<_, PregnancyReport>(
            "SELECT * FROM pregnancy_reports WHERE asha_worker_id = ?",
        )
        .bind(owner)
        .fetch_all(self.pool())
        .await
    }

    pub async fn count_pregnancy_reports(&self, owner: Uuid) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM pregnancy_reports WHERE asha_worker_id = ?")
            .bind(owner)
            .fetch_one(self.pool())
            .await
    }

    // Child vaccinations

    pub async fn insert_child_vaccination(
        &self,
        owner: Uuid,
        vaccination: NewChildVaccination,
    ) -> sqlx::Result<ChildVaccination> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        self.child_vaccination_insert(INSERT_CHILD_VACCINATION, id, owner, &vaccination, created_at)
            .await?;
        Ok(ChildVaccination {
            id,
            child_name: vaccination.child_name,
            child_dob: vaccination.child_dob,
            vaccine_schedule: vaccination.vaccine_schedule,
            missed_doses: vaccination.missed_doses,
            next_due: vaccination.next_due,
            parent_name: vaccination.parent_name,
            parent_phone: vaccination.parent_phone,
            asha_worker_id: owner,
            created_at,
            synced: false,
        })
    }

    pub async fn sync_child_vaccination(
        &self,
        client_id: Option<Uuid>,
        owner: Uuid,
        vaccination: NewChildVaccination,
    ) -> sqlx::Result<bool> {
        let created_at = Utc::now();
        match client_id {
            Some(id) => {
                let affected = self
                    .child_vaccination_insert(
                        INSERT_CHILD_VACCINATION_IF_ABSENT,
                        id,
                        owner,
                        &vaccination,
                        created_at,
                    )
                    .await?;
                Ok(affected > 0)
            }
            None => {
                self.child_vaccination_insert(
                    INSERT_CHILD_VACCINATION,
                    Uuid::new_v4(),
                    owner,
                    &vaccination,
                    created_at,
                )
                .await?;
                Ok(true)
            }
        }
    }

    async fn child_vaccination_insert(
        &self,
        sql: &str,
        id: Uuid,
        owner: Uuid,
        vaccination: &NewChildVaccination,
        created_at: DateTime<Utc>,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(sql)
            .bind(id)
            .bind(&vaccination.child_name)
            .bind(vaccination.child_dob)
            .bind(&vaccination.vaccine_schedule)
            .bind(&vaccination.missed_doses)
            .bind(vaccination.next_due)
            .bind(&vaccination.parent_name)
            .bind(&vaccination.parent_phone)
            .bind(owner)
            .bind(created_at)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_child_vaccinations(&self, owner: Uuid) -> sqlx::Result<Vec<ChildVaccination>> {
        sqlx::query_as::<_, ChildVaccination>(
            "SELECT * FROM child_vaccinations WHERE asha_worker_id = ?",
        )
        .bind(owner)
        .fetch_all(self.pool())
        .await
    }

    pub async fn count_child_vaccinations(&self, owner: Uuid) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM child_vaccinations WHERE asha_worker_id = ?")
            .bind(owner)
            .fetch_one(self.pool())
            .await
    }

    // Postnatal care

    pub async fn insert_postnatal_care(
        &self,
        owner: Uuid,
        record: NewPostnatalCare,
    ) -> sqlx::Result<PostnatalCare> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        self.postnatal_care_insert(INSERT_POSTNATAL_CARE, id, owner, &record, created_at)
            .await?;
        Ok(PostnatalCare {
            id,
            pnc_visits: record.pnc_visits,
            mother_health: record.mother_health,
            baby_health: record.baby_health,
            counselling: record.counselling,
            mother_name: record.mother_name,
            delivery_date: record.delivery_date,
            asha_worker_id: owner,
            created_at,
            synced: false,
        })
    }

    pub async fn sync_postnatal_care(
        &self,
        client_id: Option<Uuid>,
        owner: Uuid,
        record: NewPostnatalCare,
    ) -> sqlx::Result<bool> {
        let created_at = Utc::now();
        match client_id {
            Some(id) => {
                let affected = self
                    .postnatal_care_insert(
                        INSERT_POSTNATAL_CARE_IF_ABSENT,
                        id,
                        owner,
                        &record,
                        created_at,
                    )
                    .await?;
                Ok(affected > 0)
            }
            None => {
                self.postnatal_care_insert(
                    INSERT_POSTNATAL_CARE,
                    Uuid::new_v4(),
                    owner,
                    &record,
                    created_at,
                )
                .await?;
                Ok(true)
            }
        }
    }

    async fn postnatal_care_insert(
        &self,
        sql: &str,
        id: Uuid,
        owner: Uuid,
        record: &NewPostnatalCare,
        created_at: DateTime<Utc>,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(sql)
            .bind(id)
            .bind(&record.pnc_visits)
            .bind(&record.mother_health)
            .bind(&record.baby_health)
            .bind(&record.counselling)
            .bind(&record.mother_name)
            .bind(record.delivery_date)
            .bind(owner)
            .bind(created_at)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_postnatal_care(&self, owner: Uuid) -> sqlx::Result<Vec<PostnatalCare>> {
        sqlx::query_as::<_, PostnatalCare>("SELECT * FROM postnatal_care WHERE asha_worker_id = ?")
            .bind(owner)
            .fetch_all(self.pool())
            .await
    }

    pub async fn count_postnatal_care(&self, owner: Uuid) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM postnatal_care WHERE asha_worker_id = ?")
            .bind(owner)
            .fetch_one(self.pool())
            .await
    }

    // Leprosy reports

    pub async fn insert_leprosy_report(
        &self,
        owner: Uuid,
        report: NewLeprosyReport,
    ) -> sqlx::Result<LeprosyReport> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        self.leprosy_report_insert(INSERT_LEPROSY_REPORT, id, owner, &report, created_at)
            .await?;
        Ok(LeprosyReport {
            id,
            patient_name: report.patient_name,
            leprosy_type: report.leprosy_type,
            treatment: report.treatment,
            follow_ups: report.follow_ups,
            household_contacts: report.household_contacts,
            asha_worker_id: owner,
            created_at,
            synced: false,
        })
    }

    pub async fn sync_leprosy_report(
        &self,
        client_id: Option<Uuid>,
        owner: Uuid,
        report: NewLeprosyReport,
    ) -> sqlx::Result<bool> {
        let created_at = Utc::now();
        match client_id {
            Some(id) => {
                let affected = self
                    .leprosy_report_insert(
                        INSERT_LEPROSY_REPORT_IF_ABSENT,
                        id,
                        owner,
                        &report,
                        created_at,
                    )
                    .await?;
                Ok(affected > 0)
            }
            None => {
                self.leprosy_report_insert(
                    INSERT_LEPROSY_REPORT,
                    Uuid::new_v4(),
                    owner,
                    &report,
                    created_at,
                )
                .await?;
                Ok(true)
            }
        }
    }

    async fn leprosy_report_insert(
        &self,
        sql: &str,
        id: Uuid,
        owner: Uuid,
        report: &NewLeprosyReport,
        created_at: DateTime<Utc>,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(sql)
            .bind(id)
            .bind(&report.patient_name)
            .bind(&report.leprosy_type)
            .bind(&report.treatment)
            .bind(&report.follow_ups)
            .bind(&report.household_contacts)
            .bind(owner)
            .bind(created_at)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_leprosy_reports(&self, owner: Uuid) -> sqlx::Result<Vec<LeprosyReport>> {
        sqlx::query_as::<_, LeprosyReport>("SELECT * FROM leprosy_reports WHERE asha_worker_id = ?")
            .bind(owner)
            .fetch_all(self.pool())
            .await
    }
}
