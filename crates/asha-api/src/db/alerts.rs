//! Reminder alert persistence.

use super::schema::Alert;
use super::Store;
use asha_core::AlertCategory;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Reminder to insert for a worker.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub title: String,
    pub message: String,
    pub category: AlertCategory,
    pub patient_id: Option<String>,
    pub patient_name: String,
    pub due_date: DateTime<Utc>,
}

impl Store {
    pub async fn insert_alert(&self, owner: Uuid, alert: NewAlert) -> sqlx::Result<Alert> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        sqlx::query(
            "INSERT INTO alerts \
             (id, title, message, alert_type, patient_id, patient_name, due_date, asha_worker_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&alert.title)
        .bind(&alert.message)
        .bind(alert.category.as_str())
        .bind(&alert.patient_id)
        .bind(&alert.patient_name)
        .bind(alert.due_date)
        .bind(owner)
        .bind(created_at)
        .execute(self.pool())
        .await?;

        Ok(Alert {
            id,
            title: alert.title,
            message: alert.message,
            alert_type: alert.category.as_str().to_string(),
            patient_id: alert.patient_id,
            patient_name: alert.patient_name,
            due_date: alert.due_date,
            asha_worker_id: owner,
            is_read: false,
            created_at,
        })
    }

    /// All of a worker's alerts, newest first.
    pub async fn list_alerts(&self, owner: Uuid) -> sqlx::Result<Vec<Alert>> {
        sqlx::query_as::<_, Alert>(
            "SELECT * FROM alerts WHERE asha_worker_id = ? ORDER BY created_at DESC",
        )
        .bind(owner)
        .fetch_all(self.pool())
        .await
    }

    pub async fn get_alert(&self, id: Uuid, owner: Uuid) -> sqlx::Result<Option<Alert>> {
        sqlx::query_as::<_, Alert>("SELECT * FROM alerts WHERE id = ? AND asha_worker_id = ?")
            .bind(id)
            .bind(owner)
            .fetch_optional(self.pool())
            .await
    }

    /// Set the read flag on an owned alert. The ownership check happens
    /// before the mutation; `None` covers both a missing alert and one that
    /// belongs to a different worker. Repeat calls succeed unchanged.
    pub async fn mark_alert_read(&self, id: Uuid, owner: Uuid) -> sqlx::Result<Option<Alert>> {
        let Some(mut alert) = self.get_alert(id, owner).await? else {
            return Ok(None);
        };
        sqlx::query("UPDATE alerts SET is_read = 1 WHERE id = ? AND asha_worker_id = ?")
            .bind(id)
            .bind(owner)
            .execute(self.pool())
            .await?;
        alert.is_read = true;
        Ok(Some(alert))
    }

    pub async fn count_unread_alerts(&self, owner: Uuid) -> sqlx::Result<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts WHERE asha_worker_id = ? AND is_read = 0",
        )
        .bind(owner)
        .fetch_one(self.pool())
        .await
    }
}
