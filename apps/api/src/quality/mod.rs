//! Posting quality — completeness/quality scoring (0–10) and description
//! enhancement, mirroring the two-tier pattern of the match scorer: a
//! model-assisted tier demoted to a deterministic checklist on any failure.

pub mod llm;
pub mod prompts;
pub mod rules;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::models::posting::PostingRow;
use crate::quality::rules::RuleBasedQualityScorer;

/// Quality assessment for one posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// 0–10.
    pub score: i16,
    pub notes: Vec<String>,
    pub suggestions: Vec<String>,
}

/// The posting quality seam. Implementations must be safe to call for every
/// published posting in a batch.
#[async_trait]
pub trait QualityScorer: Send + Sync {
    async fn assess(&self, posting: &PostingRow) -> Result<QualityReport, AppError>;

    /// Produces an improved description addressing the report's findings.
    async fn enhance_description(
        &self,
        posting: &PostingRow,
        report: &QualityReport,
    ) -> Result<String, AppError>;
}

/// Remote-first quality scorer with the rule-based checklist as fallback.
pub struct TieredQualityScorer {
    remote: Option<Arc<dyn QualityScorer>>,
    fallback: RuleBasedQualityScorer,
}

impl TieredQualityScorer {
    pub fn new(remote: Option<Arc<dyn QualityScorer>>, fallback: RuleBasedQualityScorer) -> Self {
        Self { remote, fallback }
    }
}

#[async_trait]
impl QualityScorer for TieredQualityScorer {
    async fn assess(&self, posting: &PostingRow) -> Result<QualityReport, AppError> {
        if let Some(remote) = &self.remote {
            match remote.assess(posting).await {
                Ok(report) => return Ok(report),
                Err(e) => warn!(
                    "model-assisted quality scoring failed, using rule-based fallback: {e}"
                ),
            }
        }
        self.fallback.assess(posting).await
    }

    async fn enhance_description(
        &self,
        posting: &PostingRow,
        report: &QualityReport,
    ) -> Result<String, AppError> {
        if let Some(remote) = &self.remote {
            match remote.enhance_description(posting, report).await {
                Ok(text) => return Ok(text),
                Err(e) => warn!(
                    "model-assisted enhancement failed, using templated fallback: {e}"
                ),
            }
        }
        self.fallback.enhance_description(posting, report).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::rules::tests::bare_posting;

    struct BrokenRemote;

    #[async_trait]
    impl QualityScorer for BrokenRemote {
        async fn assess(&self, _posting: &PostingRow) -> Result<QualityReport, AppError> {
            Err(AppError::Llm("remote tier unavailable".to_string()))
        }

        async fn enhance_description(
            &self,
            _posting: &PostingRow,
            _report: &QualityReport,
        ) -> Result<String, AppError> {
            Err(AppError::Llm("remote tier unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_remote_failure_demotes_to_checklist() {
        let posting = bare_posting();
        let fallback = RuleBasedQualityScorer::new();
        let expected = fallback.assess(&posting).await.unwrap();

        let tiered =
            TieredQualityScorer::new(Some(Arc::new(BrokenRemote)), RuleBasedQualityScorer::new());
        let report = tiered.assess(&posting).await.unwrap();
        assert_eq!(report.score, expected.score);
    }

    #[tokio::test]
    async fn test_missing_remote_tier_uses_checklist() {
        let tiered = TieredQualityScorer::new(None, RuleBasedQualityScorer::new());
        let report = tiered.assess(&bare_posting()).await.unwrap();
        assert!((0..=10).contains(&report.score));
    }
}
