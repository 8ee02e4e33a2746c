use std::sync::Arc;

use crate::catalog::CatalogProvider;
use crate::persistence::ScheduleStore;
use crate::reviews::{ReviewAnalyzer, ReviewStore};
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Open planning sessions. Each one owns its own cart and schedule.
    pub sessions: SessionStore,
    /// Pluggable catalog backend. Default: LLM. Swap via CATALOG_BACKEND.
    pub catalog: Arc<dyn CatalogProvider>,
    /// Named schedule snapshots.
    pub store: Arc<dyn ScheduleStore>,
    /// Course reviews keyed by (course name, instructor).
    pub reviews: Arc<dyn ReviewStore>,
    /// Follows the catalog backend: LLM or keyword summaries.
    pub review_analyzer: Arc<dyn ReviewAnalyzer>,
}
