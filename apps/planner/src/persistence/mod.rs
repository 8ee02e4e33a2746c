//! Persistence Gateway — named schedule snapshots per user.
//!
//! Saving hands over the confirmed schedule; loading returns the same shape and
//! the session replaces its schedule wholesale.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::timetable::CourseOffering;

pub use postgres::PgScheduleStore;

const MAX_LABEL_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotMeta {
    pub user_id: Uuid,
    pub label: String,
    pub version: i32,
    pub offering_count: usize,
    pub total_credits: u32,
    /// Object key of the rendered HTML timetable, if one was stored.
    pub html_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Stores `offerings` as the newest version of `label`.
    async fn save(
        &self,
        user_id: Uuid,
        label: &str,
        offerings: &[CourseOffering],
    ) -> Result<SnapshotMeta, AppError>;

    /// Latest version of `label`. `NotFound` if the user never saved it.
    async fn load(&self, user_id: Uuid, label: &str) -> Result<Vec<CourseOffering>, AppError>;

    /// Latest version of each label, ordered by label.
    async fn list(&self, user_id: Uuid) -> Result<Vec<SnapshotMeta>, AppError>;
}

/// Labels are caller-supplied; keep them short and printable.
pub fn validate_label(label: &str) -> Result<&str, AppError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(AppError::Validation("label cannot be empty".to_string()));
    }
    if label.chars().count() > MAX_LABEL_LEN {
        return Err(AppError::Validation(format!(
            "label must be at most {MAX_LABEL_LEN} characters"
        )));
    }
    if label.chars().any(|c| c.is_control() || c == '/') {
        return Err(AppError::Validation(
            "label cannot contain '/' or control characters".to_string(),
        ));
    }
    Ok(label)
}
