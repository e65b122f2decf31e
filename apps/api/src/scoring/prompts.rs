// LLM prompt constants for match scoring and rationale generation.

/// System prompt for match scoring — the reply must be one bare integer.
pub const MATCH_SCORE_SYSTEM: &str =
    "You are an expert graduate-recruitment analyst scoring candidate-to-posting fit. \
    You MUST respond with a single integer between 0 and 100 and nothing else. \
    No prose, no punctuation, no markdown.";

/// Match scoring prompt template. Replace `{inputs_json}` before sending.
/// The weighting guidance mirrors the rule-based tier so both tiers measure
/// the same notion of fit.
pub const MATCH_SCORE_PROMPT_TEMPLATE: &str = r#"Score the compatibility between the candidate and the posting below on a 0-100 scale.

Weight the dimensions as follows:
- skill overlap with the required skills: 40%
- location compatibility (remote/hybrid postings suit anyone): 20%
- availability vs the posting's employment mode: 15%
- candidate interests vs the organization's industry: 10%
- graduation timeline (sooner available scores higher): 10%
- profile completeness: 5%

{factual_instruction}

INPUTS:
{inputs_json}

Respond with the integer score only."#;

/// System prompt for rationale generation — short factual prose.
pub const MATCH_RATIONALE_SYSTEM: &str =
    "You are an expert graduate-recruitment analyst writing a short match rationale \
    for an administrator. Two to three sentences of plain prose. \
    Base every statement ONLY on the structured attributes provided; \
    do NOT invent details.";

/// Rationale prompt template. Replace `{inputs_json}` and `{score}`.
pub const MATCH_RATIONALE_PROMPT_TEMPLATE: &str = r#"The match below was scored {score}/100.

Explain in two to three sentences why, naming the strongest overlapping skills
and any notable gaps (location, availability, or missing skills).

INPUTS:
{inputs_json}"#;
