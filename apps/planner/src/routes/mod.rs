pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::sessions::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session lifecycle
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        // Catalog
        .route(
            "/api/v1/sessions/:id/catalog",
            get(handlers::handle_get_catalog).post(handlers::handle_fetch_catalog),
        )
        .route(
            "/api/v1/sessions/:id/catalog/:offering_id/reviews",
            get(handlers::handle_offering_reviews),
        )
        // Cart → schedule
        .route("/api/v1/sessions/:id/cart", post(handlers::handle_add_to_cart))
        .route(
            "/api/v1/sessions/:id/cart/:index",
            delete(handlers::handle_remove_from_cart),
        )
        .route(
            "/api/v1/sessions/:id/cart/:index/confirm",
            post(handlers::handle_confirm),
        )
        .route(
            "/api/v1/sessions/:id/schedule",
            delete(handlers::handle_reset_schedule),
        )
        .route(
            "/api/v1/sessions/:id/schedule/:index",
            delete(handlers::handle_remove_from_schedule),
        )
        // Views
        .route("/api/v1/sessions/:id/grid", get(handlers::handle_grid))
        .route(
            "/api/v1/sessions/:id/grid/html",
            get(handlers::handle_grid_html),
        )
        .route(
            "/api/v1/sessions/:id/grid/text",
            get(handlers::handle_grid_text),
        )
        .route("/api/v1/sessions/:id/summary", get(handlers::handle_summary))
        // Snapshots
        .route(
            "/api/v1/sessions/:id/snapshots",
            get(handlers::handle_list_snapshots).post(handlers::handle_save_snapshot),
        )
        .route(
            "/api/v1/sessions/:id/snapshots/:label/load",
            post(handlers::handle_load_snapshot),
        )
        .with_state(state)
}
