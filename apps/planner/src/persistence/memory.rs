use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::persistence::{validate_label, ScheduleStore, SnapshotMeta};
use crate::timetable::CourseOffering;

/// In-process store with the same versioning rules as `PgScheduleStore`.
#[derive(Default)]
pub struct MemoryScheduleStore {
    versions: Mutex<BTreeMap<(Uuid, String), Vec<(SnapshotMeta, Vec<CourseOffering>)>>>,
}

#[async_trait]
impl ScheduleStore for MemoryScheduleStore {
    async fn save(
        &self,
        user_id: Uuid,
        label: &str,
        offerings: &[CourseOffering],
    ) -> Result<SnapshotMeta, AppError> {
        let label = validate_label(label)?;
        let mut versions = self.versions.lock().unwrap();
        let entry = versions.entry((user_id, label.to_string())).or_default();
        let meta = SnapshotMeta {
            user_id,
            label: label.to_string(),
            version: entry.len() as i32 + 1,
            offering_count: offerings.len(),
            total_credits: offerings.iter().map(|o| o.credits).sum(),
            html_key: None,
            created_at: Utc::now(),
        };
        entry.push((meta.clone(), offerings.to_vec()));
        Ok(meta)
    }

    async fn load(&self, user_id: Uuid, label: &str) -> Result<Vec<CourseOffering>, AppError> {
        let label = validate_label(label)?;
        let versions = self.versions.lock().unwrap();
        versions
            .get(&(user_id, label.to_string()))
            .and_then(|v| v.last())
            .map(|(_, offerings)| offerings.clone())
            .ok_or_else(|| AppError::NotFound(format!("Schedule '{label}' not found")))
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<SnapshotMeta>, AppError> {
        let versions = self.versions.lock().unwrap();
        Ok(versions
            .iter()
            .filter(|((uid, _), _)| *uid == user_id)
            .filter_map(|(_, v)| v.last().map(|(meta, _)| meta.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_versions_increase_and_load_returns_latest() {
        let store = MemoryScheduleStore::default();
        let user = Uuid::new_v4();
        let a = CourseOffering::new("A", "A", 3).with_slots(["Mon1"]);
        let b = CourseOffering::new("B", "B", 2).with_slots(["Tue1"]);

        let v1 = store.save(user, "plan", &[a.clone()]).await.unwrap();
        let v2 = store
            .save(user, "plan", &[a.clone(), b.clone()])
            .await
            .unwrap();
        assert_eq!((v1.version, v2.version), (1, 2));
        assert_eq!(v2.total_credits, 5);

        assert_eq!(store.load(user, "plan").await.unwrap(), vec![a, b]);
        assert!(matches!(
            store.load(user, "other").await,
            Err(AppError::NotFound(_))
        ));
        assert!(store.load(Uuid::new_v4(), "plan").await.is_err());
        assert_eq!(store.list(user).await.unwrap().len(), 1);
    }
}
