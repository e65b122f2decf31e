#![allow(dead_code)]

//! In-memory store — backs unit tests and credential-free local runs.
//! Implements the same contract as `PgStore`, including the benign
//! already-exists outcome on duplicate match triples.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::candidate::{CandidateRow, CandidateStatus};
use crate::models::matching::{MatchRow, MatchStatus};
use crate::models::organization::{OrganizationRow, OrganizationStatus};
use crate::models::posting::{PostingRow, PostingStatus};
use crate::store::{InsertOutcome, Store, StoreError};

#[derive(Default)]
struct Inner {
    candidates: Vec<CandidateRow>,
    organizations: Vec<OrganizationRow>,
    postings: Vec<PostingRow>,
    matches: Vec<MatchRow>,
    /// Ids whose write-backs fail with a simulated outage. Test hook for
    /// exercising per-unit failure isolation in the batch runners.
    failing_updates: HashSet<Uuid>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_candidate(&self, candidate: CandidateRow) {
        self.inner.lock().await.candidates.push(candidate);
    }

    pub async fn seed_organization(&self, organization: OrganizationRow) {
        self.inner.lock().await.organizations.push(organization);
    }

    pub async fn seed_posting(&self, posting: PostingRow) {
        self.inner.lock().await.postings.push(posting);
    }

    /// Makes every subsequent update for `id` fail.
    pub async fn fail_updates_for(&self, id: Uuid) {
        self.inner.lock().await.failing_updates.insert(id);
    }

    pub async fn match_count(&self) -> usize {
        self.inner.lock().await.matches.len()
    }

    pub async fn all_matches(&self) -> Vec<MatchRow> {
        self.inner.lock().await.matches.clone()
    }

    pub async fn candidate_by_id(&self, id: Uuid) -> Option<CandidateRow> {
        self.inner
            .lock()
            .await
            .candidates
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub async fn posting_by_id(&self, id: Uuid) -> Option<PostingRow> {
        self.inner
            .lock()
            .await
            .postings
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn candidate(&self, id: Uuid) -> Result<CandidateRow, StoreError> {
        self.candidate_by_id(id).await.ok_or(StoreError::NotFound(id))
    }

    async fn candidates_by_status(
        &self,
        status: CandidateStatus,
    ) -> Result<Vec<CandidateRow>, StoreError> {
        Ok(self
            .inner
            .lock()
            .await
            .candidates
            .iter()
            .filter(|c| c.status == status)
            .cloned()
            .collect())
    }

    async fn approved_organizations(&self) -> Result<Vec<OrganizationRow>, StoreError> {
        Ok(self
            .inner
            .lock()
            .await
            .organizations
            .iter()
            .filter(|o| o.status == OrganizationStatus::Approved)
            .cloned()
            .collect())
    }

    async fn published_postings(&self) -> Result<Vec<PostingRow>, StoreError> {
        Ok(self
            .inner
            .lock()
            .await
            .postings
            .iter()
            .filter(|p| p.status == PostingStatus::Published)
            .cloned()
            .collect())
    }

    async fn organization_postings(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<PostingRow>, StoreError> {
        Ok(self
            .inner
            .lock()
            .await
            .postings
            .iter()
            .filter(|p| p.organization_id == organization_id && p.status == PostingStatus::Published)
            .cloned()
            .collect())
    }

    async fn update_candidate_analysis(
        &self,
        id: Uuid,
        score: i16,
        notes: &[String],
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.failing_updates.contains(&id) {
            return Err(StoreError::Unavailable(format!(
                "simulated outage updating candidate {id}"
            )));
        }
        let candidate = inner
            .candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound(id))?;
        candidate.analysis_score = Some(score);
        candidate.analysis_notes = notes.to_vec();
        Ok(())
    }

    async fn update_posting_quality(
        &self,
        id: Uuid,
        score: i16,
        enhanced_description: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.failing_updates.contains(&id) {
            return Err(StoreError::Unavailable(format!(
                "simulated outage updating posting {id}"
            )));
        }
        let posting = inner
            .postings
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        posting.quality_score = Some(score);
        if let Some(enhanced) = enhanced_description {
            posting.enhanced_description = Some(enhanced.to_string());
        }
        Ok(())
    }

    async fn match_exists(
        &self,
        candidate_id: Uuid,
        organization_id: Uuid,
        posting_id: Uuid,
    ) -> Result<bool, StoreError> {
        Ok(self.inner.lock().await.matches.iter().any(|m| {
            m.candidate_id == candidate_id
                && m.organization_id == organization_id
                && m.posting_id == posting_id
        }))
    }

    async fn insert_match(&self, record: &MatchRow) -> Result<InsertOutcome, StoreError> {
        let mut inner = self.inner.lock().await;
        let duplicate = inner.matches.iter().any(|m| {
            m.candidate_id == record.candidate_id
                && m.organization_id == record.organization_id
                && m.posting_id == record.posting_id
        });
        if duplicate {
            return Ok(InsertOutcome::AlreadyExists);
        }
        inner.matches.push(record.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn match_record(&self, id: Uuid) -> Result<MatchRow, StoreError> {
        self.inner
            .lock()
            .await
            .matches
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update_match_status(&self, id: Uuid, status: MatchStatus) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let record = inner
            .matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound(id))?;
        record.status = status;
        Ok(())
    }
}
