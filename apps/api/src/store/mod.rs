//! Store seam — the engines' only view of the record store.
//!
//! The platform's persistence lives outside the scoring engine; everything
//! here is the simple fetch-by-status / fetch-by-id / partial-update contract
//! the engines consume. `PgStore` is the production adapter, `InMemoryStore`
//! backs tests and local runs. Engines and runners depend on `dyn Store`,
//! never on a concrete backend.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::candidate::{CandidateRow, CandidateStatus};
use crate::models::matching::{MatchRow, MatchStatus};
use crate::models::organization::OrganizationRow;
use crate::models::posting::PostingRow;

pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a match insert. A unique violation on the
/// (candidate, organization, posting) triple is benign, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn candidate(&self, id: Uuid) -> Result<CandidateRow, StoreError>;

    async fn candidates_by_status(
        &self,
        status: CandidateStatus,
    ) -> Result<Vec<CandidateRow>, StoreError>;

    async fn approved_organizations(&self) -> Result<Vec<OrganizationRow>, StoreError>;

    /// Published postings across all organizations.
    async fn published_postings(&self) -> Result<Vec<PostingRow>, StoreError>;

    /// Published postings belonging to one organization.
    async fn organization_postings(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<PostingRow>, StoreError>;

    /// Writes the document cross-validation outcome back to a candidate.
    async fn update_candidate_analysis(
        &self,
        id: Uuid,
        score: i16,
        notes: &[String],
    ) -> Result<(), StoreError>;

    /// Writes the quality score and (optionally) an enhanced description
    /// back to a posting.
    async fn update_posting_quality(
        &self,
        id: Uuid,
        score: i16,
        enhanced_description: Option<&str>,
    ) -> Result<(), StoreError>;

    async fn match_exists(
        &self,
        candidate_id: Uuid,
        organization_id: Uuid,
        posting_id: Uuid,
    ) -> Result<bool, StoreError>;

    async fn insert_match(&self, record: &MatchRow) -> Result<InsertOutcome, StoreError>;

    async fn match_record(&self, id: Uuid) -> Result<MatchRow, StoreError>;

    /// Status-only update, used by operator-driven lifecycle transitions.
    async fn update_match_status(&self, id: Uuid, status: MatchStatus) -> Result<(), StoreError>;
}
