pub mod admin;
pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Single-candidate checks
        .route(
            "/api/v1/candidates/:id/eligibility",
            get(admin::handle_candidate_eligibility),
        )
        // Batch runs (administrative triggers)
        .route(
            "/api/v1/batch/documents",
            post(admin::handle_run_document_validation),
        )
        .route(
            "/api/v1/batch/quality",
            post(admin::handle_run_posting_quality),
        )
        .route(
            "/api/v1/batch/matches",
            post(admin::handle_run_match_generation),
        )
        // Operator lifecycle transitions on existing matches
        .route(
            "/api/v1/matches/:id/status",
            patch(admin::handle_advance_match_status),
        )
        .with_state(state)
}
