//! Model-assisted match scorer — the remote tier.
//!
//! Builds a structured prompt from both parties' attributes plus the
//! weighting guidance and expects a single bounded integer back. Any
//! deviation (prose, out-of-range, transport error) surfaces as an error,
//! which `TieredMatchScorer` demotes to the rule-based tier.

use async_trait::async_trait;
use serde_json::json;

use crate::errors::AppError;
use crate::llm_client::prompts::FACTUAL_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::scoring::prompts::{
    MATCH_RATIONALE_PROMPT_TEMPLATE, MATCH_RATIONALE_SYSTEM, MATCH_SCORE_PROMPT_TEMPLATE,
    MATCH_SCORE_SYSTEM,
};
use crate::scoring::{MatchInputs, MatchScorer};

pub struct LlmMatchScorer {
    llm: LlmClient,
}

impl LlmMatchScorer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn score(&self, inputs: &MatchInputs<'_>) -> Result<u8, AppError> {
        let prompt = build_score_prompt(inputs)
            .map_err(|e| AppError::Llm(format!("failed to serialize match prompt: {e}")))?;
        let value = self
            .llm
            .call_score(&prompt, MATCH_SCORE_SYSTEM, 0, 100)
            .await
            .map_err(|e| AppError::Llm(format!("match scoring call failed: {e}")))?;
        Ok(value as u8)
    }

    async fn rationale(&self, inputs: &MatchInputs<'_>, score: u8) -> Result<String, AppError> {
        let prompt = build_rationale_prompt(inputs, score)
            .map_err(|e| AppError::Llm(format!("failed to serialize rationale prompt: {e}")))?;
        self.llm
            .call_text(&prompt, MATCH_RATIONALE_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("rationale call failed: {e}")))
    }
}

/// Serializes the attributes both tiers score on. Kept to the fields the
/// weighting guidance references so the model cannot anchor on anything the
/// rule-based tier would not see.
fn serialize_inputs(inputs: &MatchInputs<'_>) -> Result<String, serde_json::Error> {
    let candidate = inputs.candidate;
    let posting = inputs.posting;
    serde_json::to_string_pretty(&json!({
        "candidate": {
            "skills": candidate.skills,
            "interests": candidate.interests,
            "location": candidate.location,
            "availability": candidate.availability,
            "graduation_year": candidate.graduation_year,
            "has_bio": candidate.bio.is_some(),
            "has_documents": !candidate.document_keys.is_empty(),
        },
        "organization": {
            "name": inputs.organization.name,
            "industry": inputs.organization.industry,
        },
        "posting": {
            "title": posting.title,
            "required_skills": posting.required_skills,
            "location": posting.location,
            "employment_mode": posting.employment_mode,
            "salary_min": posting.salary_min,
            "salary_max": posting.salary_max,
            "deadline": posting.deadline,
        },
        "as_of": inputs.as_of,
    }))
}

fn build_score_prompt(inputs: &MatchInputs<'_>) -> Result<String, serde_json::Error> {
    Ok(MATCH_SCORE_PROMPT_TEMPLATE
        .replace("{factual_instruction}", FACTUAL_INSTRUCTION)
        .replace("{inputs_json}", &serialize_inputs(inputs)?))
}

fn build_rationale_prompt(
    inputs: &MatchInputs<'_>,
    score: u8,
) -> Result<String, serde_json::Error> {
    Ok(MATCH_RATIONALE_PROMPT_TEMPLATE
        .replace("{inputs_json}", &serialize_inputs(inputs)?)
        .replace("{score}", &score.to_string()))
}
