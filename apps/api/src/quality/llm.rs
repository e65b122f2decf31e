//! Model-assisted quality scorer — the remote tier for postings.
//!
//! Expects a small JSON object `{score, notes, suggestions}`; the score is
//! range-checked here so an out-of-range reply falls back to the checklist
//! exactly like a transport failure.

use async_trait::async_trait;
use serde_json::json;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::posting::PostingRow;
use crate::quality::prompts::{
    ENHANCEMENT_PROMPT_TEMPLATE, ENHANCEMENT_SYSTEM, QUALITY_PROMPT_TEMPLATE, QUALITY_SYSTEM,
};
use crate::quality::{QualityReport, QualityScorer};

pub struct LlmQualityScorer {
    llm: LlmClient,
}

impl LlmQualityScorer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl QualityScorer for LlmQualityScorer {
    async fn assess(&self, posting: &PostingRow) -> Result<QualityReport, AppError> {
        let prompt = build_quality_prompt(posting)
            .map_err(|e| AppError::Llm(format!("failed to serialize quality prompt: {e}")))?;
        let report: QualityReport = self
            .llm
            .call_json(&prompt, QUALITY_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("quality scoring call failed: {e}")))?;

        if !(0..=10).contains(&report.score) {
            return Err(AppError::Llm(format!(
                "quality score {} outside [0, 10]",
                report.score
            )));
        }
        Ok(report)
    }

    async fn enhance_description(
        &self,
        posting: &PostingRow,
        report: &QualityReport,
    ) -> Result<String, AppError> {
        let prompt = build_enhancement_prompt(posting, report)
            .map_err(|e| AppError::Llm(format!("failed to serialize enhancement prompt: {e}")))?;
        self.llm
            .call_text(&prompt, ENHANCEMENT_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("enhancement call failed: {e}")))
    }
}

fn serialize_posting(posting: &PostingRow) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "title": posting.title,
        "required_skills": posting.required_skills,
        "location": posting.location,
        "employment_mode": posting.employment_mode,
        "salary_min": posting.salary_min,
        "salary_max": posting.salary_max,
        "deadline": posting.deadline,
        "description": posting.description,
    }))
}

fn build_quality_prompt(posting: &PostingRow) -> Result<String, serde_json::Error> {
    Ok(QUALITY_PROMPT_TEMPLATE.replace("{posting_json}", &serialize_posting(posting)?))
}

fn build_enhancement_prompt(
    posting: &PostingRow,
    report: &QualityReport,
) -> Result<String, serde_json::Error> {
    Ok(ENHANCEMENT_PROMPT_TEMPLATE
        .replace("{posting_json}", &serialize_posting(posting)?)
        .replace("{notes_json}", &serde_json::to_string(&report.notes)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::rules::tests::bare_posting;

    #[test]
    fn test_quality_report_deserializes_from_expected_shape() {
        let json = r#"{"score": 7, "notes": ["no deadline"], "suggestions": ["add one"]}"#;
        let report: QualityReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.score, 7);
        assert_eq!(report.notes.len(), 1);
    }

    #[test]
    fn test_quality_report_missing_keys_fails_deserialization() {
        let json = r#"{"score": 7}"#;
        assert!(serde_json::from_str::<QualityReport>(json).is_err());
    }

    #[test]
    fn test_quality_prompt_embeds_posting() {
        let prompt = build_quality_prompt(&bare_posting()).unwrap();
        assert!(prompt.contains("Graduate Developer"));
        assert!(!prompt.contains("{posting_json}"));
    }

    #[test]
    fn test_enhancement_prompt_embeds_notes() {
        let report = QualityReport {
            score: 3,
            notes: vec!["no application deadline is set".to_string()],
            suggestions: vec![],
        };
        let prompt = build_enhancement_prompt(&bare_posting(), &report).unwrap();
        assert!(prompt.contains("no application deadline is set"));
    }
}
