// SPDX-License-Identifier: MIT

//! Ride-tracking routes.
//!
//! Each user is either Idle (no active ride) or Active (one embedded
//! active ride). Stopping is the only transition that crosses entity
//! boundaries: the active ride materializes as a persisted ride in the
//! same write. There is no timeout; an active ride survives restarts.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::user::ActiveRide;
use crate::models::Ride;
use crate::time_utils::{format_utc_rfc3339, now_rfc3339};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tracking/status", get(status))
        .route("/api/tracking/start", post(start))
        .route("/api/tracking/stop", post(stop))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStatusResponse {
    /// `null` while idle
    pub active_ride: Option<ActiveRide>,
}

#[derive(Deserialize)]
pub struct StartRequest {
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRequest {
    pub distance_km: Option<f64>,
    #[serde(rename = "type")]
    pub ride_type: Option<String>,
    pub safety_score: Option<f64>,
}

#[derive(Serialize)]
pub struct RideResponse {
    pub ride: Ride,
}

async fn status(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<TrackingStatusResponse>> {
    let active_ride = state
        .store
        .read(|doc| {
            doc.users
                .iter()
                .find(|u| u.id == auth.user_id)
                .map(|u| u.active_ride.clone())
        })
        .await
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(TrackingStatusResponse { active_ride }))
}

async fn start(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<StartRequest>,
) -> Result<Json<TrackingStatusResponse>> {
    let active_ride = state
        .store
        .write(|doc| {
            let user = doc
                .users
                .iter_mut()
                .find(|u| u.id == auth.user_id)
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

            if user.active_ride.is_some() {
                return Err(AppError::Conflict("Ride already active".to_string()));
            }

            let active = ActiveRide {
                id: Uuid::new_v4(),
                name: payload
                    .name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| "Active Ride".to_string()),
                started_at: now_rfc3339(),
            };
            user.active_ride = Some(active.clone());
            Ok(active)
        })
        .await?;

    tracing::info!(user_id = %auth.user_id, ride = %active_ride.name, "Tracking started");

    Ok(Json(TrackingStatusResponse {
        active_ride: Some(active_ride),
    }))
}

async fn stop(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<StopRequest>,
) -> Result<Json<RideResponse>> {
    let now = Utc::now();

    let ride = state
        .store
        .write(|doc| {
            let active = doc
                .users
                .iter_mut()
                .find(|u| u.id == auth.user_id)
                .and_then(|u| u.active_ride.take())
                .ok_or_else(|| AppError::NotFound("No active ride".to_string()))?;

            let ride = Ride {
                id: Uuid::new_v4(),
                user_id: auth.user_id,
                name: active.name,
                duration_min: duration_minutes(&active.started_at, now),
                distance_km: payload.distance_km.unwrap_or(0.0),
                ride_type: payload
                    .ride_type
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "Day".to_string()),
                safety_score: payload.safety_score.unwrap_or(0.0),
                created_at: format_utc_rfc3339(now),
            };
            doc.rides.push(ride.clone());
            Ok(ride)
        })
        .await?;

    tracing::info!(
        user_id = %auth.user_id,
        duration_min = ride.duration_min,
        "Tracking stopped"
    );

    Ok(Json(RideResponse { ride }))
}

/// Whole minutes between start and now, never less than 1.
fn duration_minutes(started_at: &str, now: DateTime<Utc>) -> f64 {
    let started = DateTime::parse_from_rfc3339(started_at)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now);

    let elapsed_ms = (now - started).num_milliseconds();
    (elapsed_ms as f64 / 60_000.0).round().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_duration_never_below_one_minute() {
        let now = Utc::now();
        let started = format_utc_rfc3339(now);
        assert_eq!(duration_minutes(&started, now), 1.0);
    }

    #[test]
    fn test_duration_rounds_to_whole_minutes() {
        let now = Utc::now();

        let started = format_utc_rfc3339(now - Duration::seconds(90));
        assert_eq!(duration_minutes(&started, now), 2.0);

        let started = format_utc_rfc3339(now - Duration::minutes(10));
        assert_eq!(duration_minutes(&started, now), 10.0);

        let started = format_utc_rfc3339(now - Duration::seconds(80));
        assert_eq!(duration_minutes(&started, now), 1.0);
    }

    #[test]
    fn test_unparseable_start_clamps_to_one() {
        let now = Utc::now();
        assert_eq!(duration_minutes("garbage", now), 1.0);
    }
}
