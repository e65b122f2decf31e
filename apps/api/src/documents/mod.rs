//! Document cross-validation — reconciles AI-extracted document fields
//! against a candidate's self-declared profile to surface inconsistencies.
//!
//! Scoring is a fixed discrete table over strict per-field matches, not an
//! average: one confirmed mismatch must depress confidence sharply.

pub mod extraction;
pub mod prompts;

use serde::{Deserialize, Serialize};

/// Fields the extraction step recovers from a document. Every field is
/// optional — extraction frequently cannot find them all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub name: Option<String>,
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub graduation_year: Option<i32>,
}

/// The profile fields the document is checked against.
#[derive(Debug, Clone)]
pub struct DeclaredProfile {
    pub name: String,
    pub institution: String,
    pub degree: String,
    pub graduation_year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOutcome {
    /// Strict match — the only outcome that counts toward the score.
    Match,
    /// Minor formatting variance. Soft match: logged as a warning, scored
    /// as a non-match.
    Partial,
    /// Contradiction, or the field was absent from the document.
    Mismatch,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldCheck {
    pub field: &'static str,
    pub outcome: FieldOutcome,
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentValidationResult {
    /// Alignment score 0–10 from the fixed tier table.
    pub score: i16,
    pub fields: Vec<FieldCheck>,
    pub mismatches: Vec<String>,
    pub warnings: Vec<String>,
    /// Set when extraction produced nothing usable and no field comparison
    /// was possible.
    pub manual_review: bool,
}

impl DocumentValidationResult {
    pub fn notes(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.note.clone()).collect()
    }
}

/// Score assigned when the document yielded no usable text at all.
const UNREADABLE_SCORE: i16 = 3;

/// Tokens that mark two institution names as referring to the same kind of
/// body even when neither contains the other.
const INSTITUTION_KEYWORDS: &[&str] = &[
    "university",
    "institute",
    "polytechnic",
    "college",
    "academy",
    "wananga",
];

/// Fixed, non-linear tier table over the strict match count.
fn alignment_score(match_count: usize) -> i16 {
    match match_count {
        4 => 10,
        3 => 7,
        2 => 4,
        1 => 2,
        _ => 0,
    }
}

/// Result used when extraction failed outright: constant low confidence and
/// an explicit manual-review flag, never a field-by-field comparison.
pub fn unreadable_document_result() -> DocumentValidationResult {
    DocumentValidationResult {
        score: UNREADABLE_SCORE,
        fields: Vec::new(),
        mismatches: Vec::new(),
        warnings: vec![
            "document text could not be extracted — manual review required".to_string(),
            "profile claims could not be verified against the document".to_string(),
        ],
        manual_review: true,
    }
}

/// Cross-validates extracted document fields against the declared profile.
pub fn validate_document(
    extracted: &ExtractedDocument,
    declared: &DeclaredProfile,
) -> DocumentValidationResult {
    let mut fields = Vec::with_capacity(4);

    fields.push(check_text_field(
        "name",
        extracted.name.as_deref(),
        &declared.name,
        false,
    ));
    fields.push(check_text_field(
        "institution",
        extracted.institution.as_deref(),
        &declared.institution,
        true,
    ));
    fields.push(check_text_field(
        "degree",
        extracted.degree.as_deref(),
        &declared.degree,
        false,
    ));
    fields.push(check_year_field(
        extracted.graduation_year,
        declared.graduation_year,
    ));

    let match_count = fields
        .iter()
        .filter(|f| f.outcome == FieldOutcome::Match)
        .count();

    let mismatches = fields
        .iter()
        .filter(|f| f.outcome == FieldOutcome::Mismatch)
        .map(|f| f.note.clone())
        .collect();

    let warnings = fields
        .iter()
        .filter(|f| f.outcome == FieldOutcome::Partial)
        .map(|f| format!("{}: {}", f.field, f.note))
        .collect();

    DocumentValidationResult {
        score: alignment_score(match_count),
        fields,
        mismatches,
        warnings,
        manual_review: false,
    }
}

fn check_text_field(
    field: &'static str,
    extracted: Option<&str>,
    declared: &str,
    institutional: bool,
) -> FieldCheck {
    let Some(extracted) = extracted.filter(|s| !s.trim().is_empty()) else {
        return FieldCheck {
            field,
            outcome: FieldOutcome::Mismatch,
            note: format!("{field} could not be read from the document; profile declares \"{declared}\""),
        };
    };

    let doc = normalize(extracted);
    let profile = normalize(declared);

    let strict = doc == profile
        || doc.contains(&profile)
        || profile.contains(&doc)
        || (institutional && shares_institution_keyword(&doc, &profile));

    if strict {
        return FieldCheck {
            field,
            outcome: FieldOutcome::Match,
            note: format!("document correctly shows {field} \"{extracted}\""),
        };
    }

    if strip_punctuation(&doc) == strip_punctuation(&profile) {
        return FieldCheck {
            field,
            outcome: FieldOutcome::Partial,
            note: format!(
                "document shows \"{extracted}\" which differs only in formatting from \"{declared}\""
            ),
        };
    }

    FieldCheck {
        field,
        outcome: FieldOutcome::Mismatch,
        note: format!(
            "mismatch: document shows {field} \"{extracted}\" but profile expects \"{declared}\""
        ),
    }
}

fn check_year_field(extracted: Option<i32>, declared: i32) -> FieldCheck {
    let field = "graduation_year";
    let Some(extracted) = extracted else {
        return FieldCheck {
            field,
            outcome: FieldOutcome::Mismatch,
            note: format!(
                "graduation year could not be read from the document; profile declares {declared}"
            ),
        };
    };

    match (extracted - declared).abs() {
        0 => FieldCheck {
            field,
            outcome: FieldOutcome::Match,
            note: format!("document correctly shows graduation year {extracted}"),
        },
        1 => FieldCheck {
            field,
            outcome: FieldOutcome::Partial,
            note: format!(
                "document shows graduation year {extracted}, one year off from declared {declared}"
            ),
        },
        _ => FieldCheck {
            field,
            outcome: FieldOutcome::Mismatch,
            note: format!(
                "mismatch: document shows graduation year {extracted} but profile expects {declared}"
            ),
        },
    }
}

/// Lowercases and collapses internal whitespace.
fn normalize(text: &str) -> String {
    text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// True when both names carry the same institutional keyword token.
fn shares_institution_keyword(a: &str, b: &str) -> bool {
    INSTITUTION_KEYWORDS
        .iter()
        .any(|kw| a.split_whitespace().any(|t| t == *kw) && b.split_whitespace().any(|t| t == *kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared() -> DeclaredProfile {
        DeclaredProfile {
            name: "Aroha Ngata".to_string(),
            institution: "Auckland University of Technology".to_string(),
            degree: "Bachelor of Computer Science".to_string(),
            graduation_year: 2025,
        }
    }

    fn extracted_all_matching() -> ExtractedDocument {
        ExtractedDocument {
            name: Some("Aroha Ngata".to_string()),
            institution: Some("Auckland University of Technology".to_string()),
            degree: Some("Bachelor of Computer Science".to_string()),
            graduation_year: Some(2025),
        }
    }

    #[test]
    fn test_tier_table_is_exactly_fixed() {
        assert_eq!(alignment_score(4), 10);
        assert_eq!(alignment_score(3), 7);
        assert_eq!(alignment_score(2), 4);
        assert_eq!(alignment_score(1), 2);
        assert_eq!(alignment_score(0), 0);
    }

    #[test]
    fn test_all_four_matches_scores_ten() {
        let result = validate_document(&extracted_all_matching(), &declared());
        assert_eq!(result.score, 10);
        assert!(result.mismatches.is_empty());
        assert!(!result.manual_review);
    }

    #[test]
    fn test_single_mismatch_drops_to_seven() {
        let mut extracted = extracted_all_matching();
        extracted.graduation_year = Some(2021);
        let result = validate_document(&extracted, &declared());
        assert_eq!(result.score, 7);
        assert_eq!(result.mismatches.len(), 1);
        assert!(result.mismatches[0].contains("2021"));
    }

    #[test]
    fn test_score_follows_match_count_for_every_combination() {
        // Flip each subset of the four fields to a hard mismatch and check
        // the score tracks the tier table with no interpolation.
        for bits in 0u8..16 {
            let mut extracted = extracted_all_matching();
            if bits & 1 != 0 {
                extracted.name = Some("Completely Different Person".to_string());
            }
            if bits & 2 != 0 {
                extracted.institution = Some("Unrelated Trade School".to_string());
            }
            if bits & 4 != 0 {
                extracted.degree = Some("Diploma of Catering".to_string());
            }
            if bits & 8 != 0 {
                extracted.graduation_year = Some(2015);
            }
            let expected_matches = 4 - bits.count_ones() as usize;
            let result = validate_document(&extracted, &declared());
            assert_eq!(
                result.score,
                alignment_score(expected_matches),
                "combination {bits:#06b} should score as {expected_matches} matches"
            );
        }
    }

    #[test]
    fn test_case_and_whitespace_insensitive_match() {
        let mut extracted = extracted_all_matching();
        extracted.name = Some("  aroha   NGATA ".to_string());
        let result = validate_document(&extracted, &declared());
        assert_eq!(result.score, 10);
    }

    #[test]
    fn test_containment_counts_as_match() {
        let mut extracted = extracted_all_matching();
        extracted.degree = Some("Computer Science".to_string());
        let result = validate_document(&extracted, &declared());
        assert_eq!(result.score, 10);
    }

    #[test]
    fn test_shared_institution_keyword_counts_as_match() {
        let mut extracted = extracted_all_matching();
        extracted.institution = Some("AUT University".to_string());
        let result = validate_document(&extracted, &declared());
        assert_eq!(result.score, 10);
    }

    #[test]
    fn test_absent_field_counts_as_mismatch() {
        let mut extracted = extracted_all_matching();
        extracted.degree = None;
        let result = validate_document(&extracted, &declared());
        assert_eq!(result.score, 7);
        assert!(result.mismatches[0].contains("could not be read"));
    }

    #[test]
    fn test_year_off_by_one_is_soft_match() {
        let mut extracted = extracted_all_matching();
        extracted.graduation_year = Some(2024);
        let result = validate_document(&extracted, &declared());
        // Soft match: warned about, but not counted toward the score.
        assert_eq!(result.score, 7);
        assert!(result.mismatches.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("one year off"));
    }

    #[test]
    fn test_punctuation_variance_is_soft_match() {
        let mut extracted = extracted_all_matching();
        extracted.name = Some("Aroha-Ngata".to_string());
        let result = validate_document(&extracted, &declared());
        assert_eq!(result.score, 7);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_match_notes_say_correctly_shows() {
        let result = validate_document(&extracted_all_matching(), &declared());
        assert!(result.fields.iter().all(|f| f.note.contains("correctly shows")));
    }

    #[test]
    fn test_unreadable_document_is_constant_low_confidence() {
        let result = unreadable_document_result();
        assert_eq!(result.score, 3);
        assert!(result.manual_review);
        assert!(result.warnings.iter().any(|w| w.contains("manual review required")));
        assert!(result.fields.is_empty());
    }
}
