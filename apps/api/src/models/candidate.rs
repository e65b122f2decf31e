use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Working arrangement a candidate is seeking, and the arrangement a posting
/// offers. Shared by both sides so availability comparison is type-safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "employment_mode", rename_all = "snake_case")]
pub enum EmploymentMode {
    FullTime,
    PartTime,
    Internship,
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "candidate_status", rename_all = "snake_case")]
pub enum CandidateStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    /// Institution as declared on the profile form — checked against the
    /// allow-list by the eligibility engine, and against the uploaded
    /// document by the cross-validator.
    pub institution: String,
    pub degree: String,
    pub graduation_year: i32,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub location: String,
    pub availability: EmploymentMode,
    pub bio: Option<String>,
    /// Keys of uploaded documents. Binary storage and text extraction live
    /// outside this service; the first key is treated as the primary CV.
    pub document_keys: Vec<String>,
    /// Cross-validation score 0–10, written by the document batch run.
    /// `None` means the document has not been processed yet — a zero score
    /// is a processed document that matched nothing.
    pub analysis_score: Option<i16>,
    pub analysis_notes: Vec<String>,
    pub status: CandidateStatus,
    pub created_at: DateTime<Utc>,
}

impl CandidateRow {
    /// Primary uploaded document, if any.
    pub fn primary_document(&self) -> Option<&str> {
        self.document_keys.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employment_mode_serde_snake_case() {
        let mode: EmploymentMode = serde_json::from_str(r#""part_time""#).unwrap();
        assert_eq!(mode, EmploymentMode::PartTime);
        assert_eq!(
            serde_json::to_string(&EmploymentMode::FullTime).unwrap(),
            r#""full_time""#
        );
    }

    #[test]
    fn test_unprocessed_document_is_distinct_from_zero_score() {
        // Option<i16> keeps "never processed" apart from "processed, scored 0".
        let unprocessed: Option<i16> = None;
        let scored_zero: Option<i16> = Some(0);
        assert_ne!(unprocessed, scored_zero);
    }
}
