#![allow(dead_code)]

// Shared prompt constants.
// Each engine that needs LLM calls defines its own prompts.rs alongside it;
// this file holds the cross-cutting fragments they compose with.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt fragment that enforces a bare-integer reply.
pub const INTEGER_ONLY_SYSTEM: &str = "You are a precise scoring assistant. \
    You MUST respond with a single integer and nothing else. \
    No prose, no punctuation, no units, no markdown.";

/// Instruction appended to prompts that embed candidate or organization data.
pub const FACTUAL_INSTRUCTION: &str = "\
    Base your answer ONLY on the structured attributes provided. \
    Do NOT infer facts that are not present. \
    If an attribute is missing, treat it as unknown rather than unfavorable.";
