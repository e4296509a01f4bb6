//! Ride model for storage and API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed ride, referencing its owner by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Duration in minutes
    pub duration_min: f64,
    pub distance_km: f64,
    /// Free-form, canonically "Day" or "Night"
    #[serde(rename = "type")]
    pub ride_type: String,
    pub safety_score: f64,
    /// When the ride was recorded (RFC3339)
    pub created_at: String,
}
