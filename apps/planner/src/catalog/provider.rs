//! Pluggable catalog backends.
//!
//! `AppState` holds an `Arc<dyn CatalogProvider>`, chosen at startup via
//! `CATALOG_BACKEND`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::catalog::prompts::CATALOG_SYSTEM;
use crate::catalog::{normalize_catalog, CatalogEnvelope, CatalogQuery};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::reviews::{reviews_for_prompt, ReviewStore};
use crate::timetable::{CourseOffering, Priority};

/// Source of candidate course offerings. Implement this to swap backends
/// without touching sessions or handlers.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<CourseOffering>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmCatalogProvider — production backend
// ────────────────────────────────────────────────────────────────────────────

/// Asks the model for the catalog, with stored reviews as background.
pub struct LlmCatalogProvider {
    llm: LlmClient,
    reviews: Arc<dyn ReviewStore>,
}

impl LlmCatalogProvider {
    pub fn new(llm: LlmClient, reviews: Arc<dyn ReviewStore>) -> Self {
        Self { llm, reviews }
    }
}

#[async_trait]
impl CatalogProvider for LlmCatalogProvider {
    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<CourseOffering>, AppError> {
        let review_data = reviews_for_prompt(&self.reviews.all().await?);
        let envelope: CatalogEnvelope = self
            .llm
            .call_json(&query.to_prompt(&review_data), CATALOG_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Catalog generation failed: {e}")))?;

        let received = envelope.courses.len();
        let offerings = normalize_catalog(envelope.courses);
        info!(
            major = %query.major,
            year_level = query.year_level,
            term = query.term,
            received,
            kept = offerings.len(),
            "Catalog generated"
        );
        Ok(offerings)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// StaticCatalogProvider — fixed list for local runs and tests
// ────────────────────────────────────────────────────────────────────────────

/// Serves the same offerings for every query.
pub struct StaticCatalogProvider {
    offerings: Vec<CourseOffering>,
}

impl StaticCatalogProvider {
    pub fn new(offerings: Vec<CourseOffering>) -> Self {
        Self { offerings }
    }

    /// First-year electronics convergence engineering, first term.
    pub fn sample() -> Self {
        let course = |id: &str, name: &str, prof: &str, credits: u32, slots: &[&str]| {
            CourseOffering::new(id, name, credits)
                .with_instructor(prof)
                .with_slots(slots.iter().copied())
        };
        Self::new(vec![
            course("0000-1-3090-01", "C프로그래밍", "김코딩", 3, &["Mon3", "Wed4"])
                .with_classification("major-required")
                .with_priority(Priority::High),
            course("0000-1-3090-02", "C프로그래밍", "최포인터", 3, &["Tue1", "Thu2"])
                .with_classification("major-required")
                .with_priority(Priority::High),
            course("0000-1-1147-01", "대학수학1", "이수학", 3, &["Mon3", "Wed3"])
                .with_classification("major-required")
                .with_priority(Priority::High),
            course("0000-1-5412-01", "공학설계입문", "박설계", 3, &["Tue5", "Tue6"])
                .with_classification("major-elective")
                .with_priority(Priority::Medium),
            course("0000-1-0712-01", "대학영어", "Brown", 2, &["Fri1", "Fri2"])
                .with_classification("general-education")
                .with_priority(Priority::Medium),
            course("0000-1-0420-01", "미래사회와AI", "정온라인", 2, &[])
                .with_classification("general-education"),
            course("0000-1-8800-01", "대학물리및실험1", "한물리", 4, &["Thu5", "Thu6", "Fri3"])
                .with_classification("major-required")
                .with_priority(Priority::High),
        ])
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalogProvider {
    async fn fetch(&self, _query: &CatalogQuery) -> Result<Vec<CourseOffering>, AppError> {
        Ok(self.offerings.clone())
    }
}
