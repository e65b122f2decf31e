// LLM prompt constants for document field extraction.

/// System prompt for field extraction — enforces JSON-only output.
pub const EXTRACTION_SYSTEM: &str =
    "You are an expert document analyst extracting identity and education \
    fields from CV and transcript text. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT guess — use null for any field the document does not clearly state.";

/// Extraction prompt template. Replace `{document_text}` before sending.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract the following fields from the document text below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "Full name as written, or null",
  "institution": "Tertiary institution name as written, or null",
  "degree": "Degree or qualification title as written, or null",
  "graduation_year": 2025
}

Rules:
- Copy values as they appear in the document; do not normalize or expand abbreviations.
- "graduation_year" is the four-digit year of (expected) graduation, or null.
- A field that is ambiguous or missing MUST be null. Never invent a value.

DOCUMENT TEXT:
{document_text}"#;
