//! SQLite-backed record store.
//!
//! One [`Store`] wraps one connection pool; every entity repository hangs off
//! it. The handle is constructed in `main` and passed down through the
//! application state, and the schema is created on connect so a fresh
//! database file is usable immediately.

pub mod alerts;
pub mod forms;
pub mod schema;
pub mod workers;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS workers (
    id BLOB PRIMARY KEY NOT NULL,
    username TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    phone_number TEXT NOT NULL UNIQUE,
    place TEXT NOT NULL,
    aadhaar_number TEXT NOT NULL UNIQUE,
    hashed_password TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS family_surveys (
    id BLOB PRIMARY KEY NOT NULL,
    household_id TEXT NOT NULL,
    members_list TEXT NOT NULL,
    sanitation TEXT NOT NULL,
    chronic_illnesses TEXT NOT NULL,
    asha_worker_id BLOB NOT NULL REFERENCES workers(id),
    created_at TEXT NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_family_surveys_worker ON family_surveys(asha_worker_id);

CREATE TABLE IF NOT EXISTS pregnancy_reports (
    id BLOB PRIMARY KEY NOT NULL,
    lmp TEXT NOT NULL,
    edd TEXT NOT NULL,
    gravida INTEGER NOT NULL,
    para INTEGER NOT NULL,
    anc_checkups TEXT NOT NULL,
    risk_factors TEXT NOT NULL,
    patient_name TEXT NOT NULL,
    patient_phone TEXT NOT NULL,
    asha_worker_id BLOB NOT NULL REFERENCES workers(id),
    created_at TEXT NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_pregnancy_reports_worker ON pregnancy_reports(asha_worker_id);

CREATE TABLE IF NOT EXISTS child_vaccinations (
    id BLOB PRIMARY KEY NOT NULL,
    child_name TEXT NOT NULL,
    child_dob TEXT NOT NULL,
    vaccine_schedule TEXT NOT NULL,
    missed_doses TEXT NOT NULL,
    next_due TEXT NOT NULL,
    parent_name TEXT NOT NULL,
    parent_phone TEXT NOT NULL,
    asha_worker_id BLOB NOT NULL REFERENCES workers(id),
    created_at TEXT NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_child_vaccinations_worker ON child_vaccinations(asha_worker_id);

CREATE TABLE IF NOT EXISTS postnatal_care (
    id BLOB PRIMARY KEY NOT NULL,
    pnc_visits TEXT NOT NULL,
    mother_health TEXT NOT NULL,
    baby_health TEXT NOT NULL,
    counselling TEXT NOT NULL,
    mother_name TEXT NOT NULL,
    delivery_date TEXT NOT NULL,
    asha_worker_id BLOB NOT NULL REFERENCES workers(id),
    created_at TEXT NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_postnatal_care_worker ON postnatal_care(asha_worker_id);

CREATE TABLE IF NOT EXISTS leprosy_reports (
    id BLOB PRIMARY KEY NOT NULL,
    patient_name TEXT NOT NULL,
    leprosy_type TEXT NOT NULL,
    treatment TEXT NOT NULL,
    follow_ups TEXT NOT NULL,
    household_contacts TEXT NOT NULL,
    asha_worker_id BLOB NOT NULL REFERENCES workers(id),
    created_at TEXT NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_leprosy_reports_worker ON leprosy_reports(asha_worker_id);

CREATE TABLE IF NOT EXISTS alerts (
    id BLOB PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    message TEXT NOT NULL,
    alert_type TEXT NOT NULL,
    patient_id TEXT,
    patient_name TEXT NOT NULL,
    due_date TEXT NOT NULL,
    asha_worker_id BLOB NOT NULL REFERENCES workers(id),
    is_read INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_alerts_worker ON alerts(asha_worker_id);
";

/// Handle to the shared connection pool. Cloning is cheap.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if missing) the database at `database_url` and ensure
    /// the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Ephemeral store for tests and local experiments. A single connection
    /// keeps the in-memory database alive and shared.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
