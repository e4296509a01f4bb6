//! Dashboard statistics computed over a user's records.
//!
//! Kept as a pure function over in-memory slices so the aggregate logic
//! is testable without a store.

use serde::Serialize;

use crate::models::Ride;

/// Per-user dashboard aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_rides: usize,
    /// Rides whose type is exactly "Night"
    pub night_rides: usize,
    pub emergency_count: usize,
    /// Average safety score rounded to the nearest integer, 0 with no rides
    pub safety_score: i64,
    /// Total distance rounded to 1 decimal
    pub total_distance_km: f64,
}

impl DashboardStats {
    /// Compute the aggregate for one user's rides and SOS count.
    pub fn compute(rides: &[Ride], sos_count: usize) -> Self {
        let total_distance: f64 = rides.iter().map(|r| r.distance_km).sum();
        let night_rides = rides.iter().filter(|r| r.ride_type == "Night").count();
        let safety_score = if rides.is_empty() {
            0
        } else {
            let sum: f64 = rides.iter().map(|r| r.safety_score).sum();
            (sum / rides.len() as f64).round() as i64
        };

        Self {
            total_rides: rides.len(),
            night_rides,
            emergency_count: sos_count,
            safety_score,
            total_distance_km: (total_distance * 10.0).round() / 10.0,
        }
    }
}
