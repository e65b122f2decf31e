//! Match scoring — pluggable, trait-based scorer measuring candidate ↔
//! posting compatibility on a 0–100 scale.
//!
//! Two tiers: `LlmMatchScorer` (model-assisted, best effort) and
//! `RuleBasedMatchScorer` (deterministic weighted sum). `TieredMatchScorer`
//! selects between them at call time — remote first, rule-based on any
//! remote failure or when no remote tier is configured — so the fallback
//! stays independently testable without mocking the remote service.

pub mod llm;
pub mod prompts;
pub mod rules;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::warn;

use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::models::organization::OrganizationRow;
use crate::models::posting::PostingRow;
use crate::scoring::rules::RuleBasedMatchScorer;

/// One candidate × posting evaluation, with the organization that owns the
/// posting and the date the timeline component is anchored to.
#[derive(Debug, Clone, Copy)]
pub struct MatchInputs<'a> {
    pub candidate: &'a CandidateRow,
    pub organization: &'a OrganizationRow,
    pub posting: &'a PostingRow,
    pub as_of: NaiveDate,
}

/// The match scorer seam. Implement this to swap backends without touching
/// the orchestrator or handlers.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    /// Compatibility score in [0, 100].
    async fn score(&self, inputs: &MatchInputs<'_>) -> Result<u8, AppError>;

    /// Human-readable rationale for a previously computed score.
    async fn rationale(&self, inputs: &MatchInputs<'_>, score: u8) -> Result<String, AppError>;
}

/// Remote-first scorer with a deterministic fallback. The remote tier is a
/// best-effort enhancement; every remote error is demoted, never surfaced.
pub struct TieredMatchScorer {
    remote: Option<Arc<dyn MatchScorer>>,
    fallback: RuleBasedMatchScorer,
}

impl TieredMatchScorer {
    pub fn new(remote: Option<Arc<dyn MatchScorer>>, fallback: RuleBasedMatchScorer) -> Self {
        Self { remote, fallback }
    }
}

#[async_trait]
impl MatchScorer for TieredMatchScorer {
    async fn score(&self, inputs: &MatchInputs<'_>) -> Result<u8, AppError> {
        if let Some(remote) = &self.remote {
            match remote.score(inputs).await {
                Ok(score) => return Ok(score),
                Err(e) => warn!(
                    "model-assisted match scoring failed, using rule-based fallback: {e}"
                ),
            }
        }
        self.fallback.score(inputs).await
    }

    async fn rationale(&self, inputs: &MatchInputs<'_>, score: u8) -> Result<String, AppError> {
        if let Some(remote) = &self.remote {
            match remote.rationale(inputs, score).await {
                Ok(text) => return Ok(text),
                Err(e) => warn!(
                    "model-assisted rationale failed, using rule-based fallback: {e}"
                ),
            }
        }
        self.fallback.rationale(inputs, score).await
    }
}
