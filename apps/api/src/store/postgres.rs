use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::candidate::{CandidateRow, CandidateStatus};
use crate::models::matching::{MatchRow, MatchStatus};
use crate::models::organization::{OrganizationRow, OrganizationStatus};
use crate::models::posting::{PostingRow, PostingStatus};
use crate::store::{InsertOutcome, Store, StoreError};

/// PostgreSQL adapter for the store contract.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn candidate(&self, id: Uuid) -> Result<CandidateRow, StoreError> {
        sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn candidates_by_status(
        &self,
        status: CandidateStatus,
    ) -> Result<Vec<CandidateRow>, StoreError> {
        Ok(sqlx::query_as::<_, CandidateRow>(
            "SELECT * FROM candidates WHERE status = $1 ORDER BY created_at",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn approved_organizations(&self) -> Result<Vec<OrganizationRow>, StoreError> {
        Ok(sqlx::query_as::<_, OrganizationRow>(
            "SELECT * FROM organizations WHERE status = $1 ORDER BY created_at",
        )
        .bind(OrganizationStatus::Approved)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn published_postings(&self) -> Result<Vec<PostingRow>, StoreError> {
        Ok(sqlx::query_as::<_, PostingRow>(
            "SELECT * FROM postings WHERE status = $1 ORDER BY created_at",
        )
        .bind(PostingStatus::Published)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn organization_postings(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<PostingRow>, StoreError> {
        Ok(sqlx::query_as::<_, PostingRow>(
            "SELECT * FROM postings WHERE organization_id = $1 AND status = $2 ORDER BY created_at",
        )
        .bind(organization_id)
        .bind(PostingStatus::Published)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn update_candidate_analysis(
        &self,
        id: Uuid,
        score: i16,
        notes: &[String],
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE candidates SET analysis_score = $1, analysis_notes = $2 WHERE id = $3",
        )
        .bind(score)
        .bind(notes)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn update_posting_quality(
        &self,
        id: Uuid,
        score: i16,
        enhanced_description: Option<&str>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE postings SET quality_score = $1, \
             enhanced_description = COALESCE($2, enhanced_description) WHERE id = $3",
        )
        .bind(score)
        .bind(enhanced_description)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn match_exists(
        &self,
        candidate_id: Uuid,
        organization_id: Uuid,
        posting_id: Uuid,
    ) -> Result<bool, StoreError> {
        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM matches \
             WHERE candidate_id = $1 AND organization_id = $2 AND posting_id = $3",
        )
        .bind(candidate_id)
        .bind(organization_id)
        .bind(posting_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(existing.is_some())
    }

    async fn insert_match(&self, record: &MatchRow) -> Result<InsertOutcome, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO matches
                (id, candidate_id, organization_id, posting_id, score, status, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id)
        .bind(record.candidate_id)
        .bind(record.organization_id)
        .bind(record.posting_id)
        .bind(record.score)
        .bind(record.status)
        .bind(&record.notes)
        .bind(record.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            // The triple has a unique constraint; losing a check-then-insert
            // race to another run is "already present", not a failure.
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Ok(InsertOutcome::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn match_record(&self, id: Uuid) -> Result<MatchRow, StoreError> {
        sqlx::query_as::<_, MatchRow>("SELECT * FROM matches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn update_match_status(&self, id: Uuid, status: MatchStatus) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE matches SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
