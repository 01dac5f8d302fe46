//! Worker account persistence.

use super::schema::Worker;
use super::Store;
use asha_core::username::base_handle;
use chrono::Utc;
use uuid::Uuid;

/// Registration data with the password already hashed.
#[derive(Debug)]
pub struct NewWorker {
    pub name: String,
    pub phone_number: String,
    pub place: String,
    pub aadhaar_number: String,
    pub hashed_password: String,
}

impl Store {
    pub async fn find_worker_by_username(&self, username: &str) -> sqlx::Result<Option<Worker>> {
        sqlx::query_as::<_, Worker>("SELECT * FROM workers WHERE username = ?")
            .bind(username)
            .fetch_optional(self.pool())
            .await
    }

    pub async fn worker_phone_exists(&self, phone_number: &str) -> sqlx::Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM workers WHERE phone_number = ?")
                .bind(phone_number)
                .fetch_one(self.pool())
                .await?;
        Ok(count > 0)
    }

    pub async fn worker_aadhaar_exists(&self, aadhaar_number: &str) -> sqlx::Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM workers WHERE aadhaar_number = ?")
                .bind(aadhaar_number)
                .fetch_one(self.pool())
                .await?;
        Ok(count > 0)
    }

    /// First free login handle derived from the display name: the base
    /// handle, then base1, base2, ...
    pub async fn next_username(&self, name: &str) -> sqlx::Result<String> {
        let base = base_handle(name);
        let mut candidate = base.clone();
        let mut counter = 1u32;
        loop {
            if self.find_worker_by_username(&candidate).await?.is_none() {
                return Ok(candidate);
            }
            candidate = format!("{base}{counter}");
            counter += 1;
        }
    }

    pub async fn insert_worker(&self, username: &str, worker: NewWorker) -> sqlx::Result<Worker> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        sqlx::query(
            "INSERT INTO workers \
             (id, username, name, phone_number, place, aadhaar_number, hashed_password, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(username)
        .bind(&worker.name)
        .bind(&worker.phone_number)
        .bind(&worker.place)
        .bind(&worker.aadhaar_number)
        .bind(&worker.hashed_password)
        .bind(created_at)
        .execute(self.pool())
        .await?;

        Ok(Worker {
            id,
            username: username.to_string(),
            name: worker.name,
            phone_number: worker.phone_number,
            place: worker.place,
            aadhaar_number: worker.aadhaar_number,
            hashed_password: worker.hashed_password,
            created_at,
        })
    }
}
