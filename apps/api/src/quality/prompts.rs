// LLM prompt constants for posting quality scoring and enhancement.

/// System prompt for quality scoring — enforces JSON-only output.
pub const QUALITY_SYSTEM: &str =
    "You are an expert job-advertisement reviewer for a graduate hiring platform. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Quality scoring prompt template. Replace `{posting_json}` before sending.
pub const QUALITY_PROMPT_TEMPLATE: &str = r#"Assess the quality of the job posting below for a graduate audience.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 7,
  "notes": ["what is missing or weak"],
  "suggestions": ["concrete improvements"]
}

Scoring guidance (0-10):
- A thorough description (200+ characters) of the role and team
- At least three concrete required skills
- A salary range with both bounds
- An application deadline
- Inclusive, welcoming language
- No biased buzzwords ("rockstar", "ninja", "guru", ...)

POSTING:
{posting_json}"#;

/// System prompt for description enhancement — plain text out.
pub const ENHANCEMENT_SYSTEM: &str =
    "You are an expert recruitment copywriter. Rewrite job descriptions to be \
    complete, specific, and inclusive, for a graduate audience. \
    Respond with the improved description text only — no preamble, no markdown. \
    Never invent salary figures, deadlines, or requirements that were not provided.";

/// Enhancement prompt template. Replace `{posting_json}` and `{notes_json}`.
pub const ENHANCEMENT_PROMPT_TEMPLATE: &str = r#"Improve the description of the posting below.

Address these reviewer notes:
{notes_json}

Keep every factual claim from the original. Add an inclusivity statement if
none exists. Do not fabricate salary, deadline, or skill requirements.

POSTING:
{posting_json}"#;
