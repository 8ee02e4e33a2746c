//! Axum route handlers for planning sessions.
//!
//! Every handler resolves the session, takes its lock for the synchronous
//! timetable operation and releases it before any `.await` on a collaborator.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::CatalogQuery;
use crate::errors::AppError;
use crate::persistence::{validate_label, SnapshotMeta};
use crate::render::{render_html, render_text};
use crate::reviews::{detect_warnings, warnings_for, ReviewDigest, ReviewNote};
use crate::sessions::{lock, PlannerSession, SessionSnapshot};
use crate::state::AppState;
use crate::timetable::grid::render;
use crate::timetable::groups::{filter_by_classification, group_by_priority, PriorityGroups};
use crate::timetable::summary::{summarize, ScheduleSummary};
use crate::timetable::{CourseOffering, GridView};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub offering_id: String,
}

#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    /// `false` when the offering was already in the cart or schedule.
    pub added: bool,
    pub session: SessionSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct CatalogFilter {
    pub classification: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub query: Option<CatalogQuery>,
    pub count: usize,
    pub groups: PriorityGroups,
    /// Review warnings by offering id; offerings without any are absent.
    pub review_warnings: BTreeMap<String, Vec<ReviewNote>>,
}

#[derive(Debug, Deserialize)]
pub struct SaveSnapshotRequest {
    pub label: String,
}

/// Runs `f` against the locked session `id`.
fn with_session<T>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut PlannerSession) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let shared = state.sessions.get(id)?;
    let mut session = lock(&shared)?;
    f(&mut session)
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let shared = state.sessions.create(req.user_id)?;
    let snapshot = lock(&shared)?.snapshot();
    info!(open_sessions = state.sessions.len(), "Session opened");
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    with_session(&state, id, |s| Ok(Json(s.snapshot())))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/catalog
///
/// Queries the catalog provider and caches the result in the session.
pub async fn handle_fetch_catalog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(query): Json<CatalogQuery>,
) -> Result<Json<CatalogResponse>, AppError> {
    query.validate()?;
    // Fail fast on an unknown session before paying for the provider call.
    state.sessions.get(id)?;

    let offerings = state.catalog.fetch(&query).await?;
    let review_warnings = warnings_for(state.reviews.as_ref(), &offerings).await?;

    with_session(&state, id, |s| {
        let groups = group_by_priority(&offerings);
        let count = offerings.len();
        s.set_catalog(query.clone(), offerings);
        Ok(Json(CatalogResponse {
            query: Some(query),
            count,
            groups,
            review_warnings,
        }))
    })
}

/// GET /api/v1/sessions/:id/catalog
pub async fn handle_get_catalog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(filter): Query<CatalogFilter>,
) -> Result<Json<CatalogResponse>, AppError> {
    let (query, offerings) = with_session(&state, id, |s| {
        let offerings: Vec<CourseOffering> = match filter.classification.as_deref() {
            Some(tag) => filter_by_classification(&s.catalog, tag)
                .into_iter()
                .cloned()
                .collect(),
            None => s.catalog.clone(),
        };
        Ok((s.query.clone(), offerings))
    })?;
    let review_warnings = warnings_for(state.reviews.as_ref(), &offerings).await?;

    Ok(Json(CatalogResponse {
        query,
        count: offerings.len(),
        groups: group_by_priority(&offerings),
        review_warnings,
    }))
}

/// GET /api/v1/sessions/:id/catalog/:offering_id/reviews
///
/// Reviews for the offering's course and instructor, with warnings and a
/// summary. `summary` is null when nobody has reviewed the pair.
pub async fn handle_offering_reviews(
    State(state): State<AppState>,
    Path((id, offering_id)): Path<(Uuid, String)>,
) -> Result<Json<ReviewDigest>, AppError> {
    let offering = with_session(&state, id, |s| {
        s.catalog
            .iter()
            .find(|o| o.id == offering_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("Offering '{offering_id}' is not in the catalog"))
            })
    })?;

    let reviews = state
        .reviews
        .find(&offering.name, &offering.instructor)
        .await?;
    let summary = if reviews.is_empty() {
        None
    } else {
        Some(
            state
                .review_analyzer
                .summarize(&offering.name, &offering.instructor, &reviews)
                .await?,
        )
    };

    Ok(Json(ReviewDigest {
        offering_id: offering.id,
        course_name: offering.name,
        instructor: offering.instructor,
        warnings: detect_warnings(&reviews)
            .into_iter()
            .map(ReviewNote::from)
            .collect(),
        reviews,
        summary,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Cart and schedule
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/cart
pub async fn handle_add_to_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<AddToCartResponse>, AppError> {
    with_session(&state, id, |s| {
        let added = s.add_from_catalog(&req.offering_id)?;
        Ok(Json(AddToCartResponse {
            added,
            session: s.snapshot(),
        }))
    })
}

/// DELETE /api/v1/sessions/:id/cart/:index
pub async fn handle_remove_from_cart(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<SessionSnapshot>, AppError> {
    with_session(&state, id, |s| {
        s.selection.remove_from_cart(index)?;
        Ok(Json(s.snapshot()))
    })
}

/// POST /api/v1/sessions/:id/cart/:index/confirm
///
/// 409 with the conflicting course name if the move would overlap the schedule.
pub async fn handle_confirm(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<SessionSnapshot>, AppError> {
    with_session(&state, id, |s| {
        let confirmed = s.selection.confirm(index)?;
        info!(session_id = %id, offering = %confirmed.id, "Offering confirmed");
        Ok(Json(s.snapshot()))
    })
}

/// DELETE /api/v1/sessions/:id/schedule/:index
pub async fn handle_remove_from_schedule(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<SessionSnapshot>, AppError> {
    with_session(&state, id, |s| {
        s.selection.remove_from_schedule(index)?;
        Ok(Json(s.snapshot()))
    })
}

/// DELETE /api/v1/sessions/:id/schedule
pub async fn handle_reset_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    with_session(&state, id, |s| {
        s.selection.reset_schedule();
        Ok(Json(s.snapshot()))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Views
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/grid
pub async fn handle_grid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GridView>, AppError> {
    with_session(&state, id, |s| {
        let view = render(s.selection.schedule());
        debug!(
            session_id = %id,
            occupied = view.occupied_cells().len(),
            overflow = view.overflow.len(),
            "Grid rendered"
        );
        Ok(Json(view))
    })
}

/// GET /api/v1/sessions/:id/grid/html
pub async fn handle_grid_html(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    with_session(&state, id, |s| {
        Ok(Html(render_html(&render(s.selection.schedule()))))
    })
}

/// GET /api/v1/sessions/:id/grid/text
pub async fn handle_grid_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<String, AppError> {
    with_session(&state, id, |s| Ok(render_text(&render(s.selection.schedule()))))
}

/// GET /api/v1/sessions/:id/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScheduleSummary>, AppError> {
    with_session(&state, id, |s| {
        Ok(Json(summarize(s.selection.schedule(), &s.preferences())))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Snapshots
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/snapshots
pub async fn handle_save_snapshot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SaveSnapshotRequest>,
) -> Result<(StatusCode, Json<SnapshotMeta>), AppError> {
    let label = validate_label(&req.label)?;
    let (user_id, schedule) =
        with_session(&state, id, |s| Ok((s.user_id, s.selection.schedule().to_vec())))?;

    let meta = state.store.save(user_id, label, &schedule).await?;
    Ok((StatusCode::CREATED, Json(meta)))
}

/// GET /api/v1/sessions/:id/snapshots
pub async fn handle_list_snapshots(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SnapshotMeta>>, AppError> {
    let user_id = with_session(&state, id, |s| Ok(s.user_id))?;
    Ok(Json(state.store.list(user_id).await?))
}

/// POST /api/v1/sessions/:id/snapshots/:label/load
///
/// Replaces the confirmed schedule wholesale with the stored one.
pub async fn handle_load_snapshot(
    State(state): State<AppState>,
    Path((id, label)): Path<(Uuid, String)>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let user_id = with_session(&state, id, |s| Ok(s.user_id))?;
    let offerings = state.store.load(user_id, &label).await?;

    with_session(&state, id, |s| {
        s.selection.replace_schedule(offerings)?;
        info!(session_id = %id, label = %label, "Schedule loaded from snapshot");
        Ok(Json(s.snapshot()))
    })
}
