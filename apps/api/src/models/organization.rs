use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "organization_status", rename_all = "snake_case")]
pub enum OrganizationStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrganizationRow {
    pub id: Uuid,
    pub name: String,
    /// Industry tag used for interest alignment, e.g. "fintech", "healthcare".
    pub industry: String,
    pub size_bracket: String,
    pub description: String,
    pub status: OrganizationStatus,
    pub created_at: DateTime<Utc>,
}
