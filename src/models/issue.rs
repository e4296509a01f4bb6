//! Maintenance issue model for storage and API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status assigned to every newly reported issue.
pub const INITIAL_STATUS: &str = "In review";

/// A maintenance issue reported by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub priority: String,
    #[serde(default)]
    pub notes: String,
    pub status: String,
    pub created_at: String,
}
