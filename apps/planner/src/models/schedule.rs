use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One stored version of a named schedule. `offerings` is a JSON array of
/// `CourseOffering` records in schedule order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScheduleSnapshotRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub label: String,
    pub version: i32,
    pub offerings: Value,
    pub total_credits: i32,
    pub html_key: Option<String>,
    pub created_at: DateTime<Utc>,
}
