use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::schedule::ScheduleSnapshotRow;
use crate::persistence::{validate_label, ScheduleStore, SnapshotMeta};
use crate::render::render_html;
use crate::timetable::grid::render;
use crate::timetable::CourseOffering;

/// PostgreSQL-backed snapshot store. Append-only: every save is a new version
/// row, never an UPDATE. The rendered HTML timetable of each version is
/// uploaded to S3 next to it.
pub struct PgScheduleStore {
    pool: PgPool,
    s3: aws_sdk_s3::Client,
    bucket: String,
}

impl PgScheduleStore {
    pub fn new(pool: PgPool, s3: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { pool, s3, bucket }
    }

    async fn upload_html(&self, key: &str, offerings: &[CourseOffering]) -> Result<(), AppError> {
        let html = render_html(&render(offerings));
        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(html.into_bytes()))
            .content_type("text/html; charset=utf-8")
            .send()
            .await
            .map_err(|e| AppError::S3(format!("upload of {key} failed: {e}")))?;
        info!("Uploaded timetable to s3://{}/{}", self.bucket, key);
        Ok(())
    }
}

fn meta_from_row(row: &ScheduleSnapshotRow) -> SnapshotMeta {
    SnapshotMeta {
        user_id: row.user_id,
        label: row.label.clone(),
        version: row.version,
        offering_count: row.offerings.as_array().map(Vec::len).unwrap_or(0),
        total_credits: u32::try_from(row.total_credits).unwrap_or(0),
        html_key: row.html_key.clone(),
        created_at: row.created_at,
    }
}

#[async_trait]
impl ScheduleStore for PgScheduleStore {
    async fn save(
        &self,
        user_id: Uuid,
        label: &str,
        offerings: &[CourseOffering],
    ) -> Result<SnapshotMeta, AppError> {
        let label = validate_label(label)?;

        // 1. Determine next version
        let current_max: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(version) FROM schedule_snapshots WHERE user_id = $1 AND label = $2",
        )
        .bind(user_id)
        .bind(label)
        .fetch_one(&self.pool)
        .await?;
        let version = current_max.unwrap_or(0) + 1;

        // 2. Upload the rendered timetable
        let html_key = format!("schedules/{user_id}/{label}/v{version}.html");
        self.upload_html(&html_key, offerings).await?;

        // 3. Append-only INSERT
        let total_credits: u32 = offerings.iter().map(|o| o.credits).sum();
        let payload = serde_json::to_value(offerings)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize schedule: {e}")))?;

        let row = sqlx::query_as::<_, ScheduleSnapshotRow>(
            r#"
            INSERT INTO schedule_snapshots
                (id, user_id, label, version, offerings, total_credits, html_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(label)
        .bind(version)
        .bind(&payload)
        .bind(total_credits as i32)
        .bind(&html_key)
        .fetch_one(&self.pool)
        .await?;

        info!("Saved schedule '{label}' version {version} for user {user_id}");
        Ok(meta_from_row(&row))
    }

    async fn load(&self, user_id: Uuid, label: &str) -> Result<Vec<CourseOffering>, AppError> {
        let label = validate_label(label)?;
        let row = sqlx::query_as::<_, ScheduleSnapshotRow>(
            r#"
            SELECT * FROM schedule_snapshots
            WHERE user_id = $1 AND label = $2
            ORDER BY version DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(label)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Schedule '{label}' not found")))?;

        serde_json::from_value(row.offerings).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "stored schedule '{label}' v{} is unreadable: {e}",
                row.version
            ))
        })
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<SnapshotMeta>, AppError> {
        let rows = sqlx::query_as::<_, ScheduleSnapshotRow>(
            r#"
            SELECT DISTINCT ON (label) *
            FROM schedule_snapshots
            WHERE user_id = $1
            ORDER BY label, version DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(meta_from_row).collect())
    }
}
