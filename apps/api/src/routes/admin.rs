use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::batch::{BatchReport, GeneratorProfile};
use crate::eligibility::EligibilityResult;
use crate::errors::AppError;
use crate::models::matching::{MatchRow, MatchStatus};
use crate::state::AppState;

/// GET /api/v1/candidates/:id/eligibility
/// Recomputes eligibility from the stored profile; never served from cache.
pub async fn handle_candidate_eligibility(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EligibilityResult>, AppError> {
    let candidate = state.store.candidate(id).await?;
    let result = state.eligibility.check(
        candidate.graduation_year,
        &candidate.institution,
        Utc::now().date_naive(),
    );
    Ok(Json(result))
}

/// POST /api/v1/batch/documents
pub async fn handle_run_document_validation(
    State(state): State<AppState>,
) -> Result<Json<BatchReport>, AppError> {
    let report = state.orchestrator.run_document_validation().await?;
    Ok(Json(report))
}

/// POST /api/v1/batch/quality
pub async fn handle_run_posting_quality(
    State(state): State<AppState>,
) -> Result<Json<BatchReport>, AppError> {
    let report = state.orchestrator.run_posting_quality().await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct MatchGenerationRequest {
    pub generator: GeneratorProfile,
}

#[derive(Debug, Deserialize)]
pub struct MatchStatusRequest {
    pub status: MatchStatus,
}

/// PATCH /api/v1/matches/:id/status
/// Operator-driven lifecycle transition. Rejects anything that is not a
/// legal forward step.
pub async fn handle_advance_match_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MatchStatusRequest>,
) -> Result<Json<MatchRow>, AppError> {
    let record = state.store.match_record(id).await?;

    if !record.status.can_advance_to(req.status) {
        return Err(AppError::Validation(format!(
            "illegal match status transition {:?} -> {:?}",
            record.status, req.status
        )));
    }

    state.store.update_match_status(id, req.status).await?;
    let updated = state.store.match_record(id).await?;
    Ok(Json(updated))
}

/// POST /api/v1/batch/matches
pub async fn handle_run_match_generation(
    State(state): State<AppState>,
    Json(req): Json<MatchGenerationRequest>,
) -> Result<Json<BatchReport>, AppError> {
    let report = state
        .orchestrator
        .run_match_generation(req.generator, Utc::now().date_naive())
        .await?;
    Ok(Json(report))
}
