use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle of a match record. Progression is forward-only:
/// suggested → viewed → {interested | not_interested} → matched.
/// A record never returns to `suggested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "match_status", rename_all = "snake_case")]
pub enum MatchStatus {
    Suggested,
    Viewed,
    Interested,
    NotInterested,
    Matched,
}

impl MatchStatus {
    /// Whether `next` is a legal forward step from this status.
    /// `Matched` is only reachable through `Interested`.
    pub fn can_advance_to(self, next: MatchStatus) -> bool {
        use MatchStatus::*;
        matches!(
            (self, next),
            (Suggested, Viewed)
                | (Viewed, Interested)
                | (Viewed, NotInterested)
                | (Interested, Matched)
        )
    }
}

/// One (candidate, organization, posting) triple with its compatibility
/// score. The store enforces uniqueness on the triple; the engine creates
/// these only through the bulk matching run.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub organization_id: Uuid,
    pub posting_id: Uuid,
    /// Compatibility score 0–100.
    pub score: i32,
    pub status: MatchStatus,
    /// Human-readable rationale for the suggested match.
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_happy_path() {
        assert!(MatchStatus::Suggested.can_advance_to(MatchStatus::Viewed));
        assert!(MatchStatus::Viewed.can_advance_to(MatchStatus::Interested));
        assert!(MatchStatus::Interested.can_advance_to(MatchStatus::Matched));
    }

    #[test]
    fn test_viewed_can_decline() {
        assert!(MatchStatus::Viewed.can_advance_to(MatchStatus::NotInterested));
    }

    #[test]
    fn test_no_transition_back_to_suggested() {
        for status in [
            MatchStatus::Viewed,
            MatchStatus::Interested,
            MatchStatus::NotInterested,
            MatchStatus::Matched,
        ] {
            assert!(!status.can_advance_to(MatchStatus::Suggested));
        }
    }

    #[test]
    fn test_matched_only_from_interested() {
        assert!(!MatchStatus::Suggested.can_advance_to(MatchStatus::Matched));
        assert!(!MatchStatus::Viewed.can_advance_to(MatchStatus::Matched));
        assert!(!MatchStatus::NotInterested.can_advance_to(MatchStatus::Matched));
    }

    #[test]
    fn test_no_skipping_viewed() {
        assert!(!MatchStatus::Suggested.can_advance_to(MatchStatus::Interested));
        assert!(!MatchStatus::Suggested.can_advance_to(MatchStatus::NotInterested));
    }
}
