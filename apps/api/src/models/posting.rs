use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::candidate::EmploymentMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "posting_status", rename_all = "snake_case")]
pub enum PostingStatus {
    Draft,
    Published,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostingRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub title: String,
    pub required_skills: Vec<String>,
    pub location: String,
    pub employment_mode: EmploymentMode,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub deadline: Option<NaiveDate>,
    pub description: String,
    /// AI-enhanced description, written by the quality batch run.
    pub enhanced_description: Option<String>,
    /// Quality score 0–10; `None` until the posting has been assessed.
    pub quality_score: Option<i16>,
    pub status: PostingStatus,
    pub created_at: DateTime<Utc>,
}

impl PostingRow {
    /// True when both salary bounds are present and min ≤ max.
    pub fn has_valid_salary_band(&self) -> bool {
        matches!((self.salary_min, self.salary_max), (Some(min), Some(max)) if min <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(min: Option<i64>, max: Option<i64>) -> PostingRow {
        PostingRow {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            title: "Graduate Software Engineer".to_string(),
            required_skills: vec![],
            location: "Auckland".to_string(),
            employment_mode: EmploymentMode::FullTime,
            salary_min: min,
            salary_max: max,
            deadline: None,
            description: String::new(),
            enhanced_description: None,
            quality_score: None,
            status: PostingStatus::Published,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_salary_band_valid_when_ordered() {
        assert!(posting(Some(55_000), Some(70_000)).has_valid_salary_band());
    }

    #[test]
    fn test_salary_band_invalid_when_inverted() {
        assert!(!posting(Some(70_000), Some(55_000)).has_valid_salary_band());
    }

    #[test]
    fn test_salary_band_invalid_when_partial() {
        assert!(!posting(Some(55_000), None).has_valid_salary_band());
        assert!(!posting(None, None).has_valid_salary_band());
    }
}
