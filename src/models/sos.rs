//! SOS event model. Append-only: events are never updated or deleted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SosEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub location: String,
    pub created_at: String,
}
