// SPDX-License-Identifier: MIT

//! Ride CRUD routes, scoped to the authenticated owner.
//!
//! Updates and deletes match on id AND owner, so a record belonging to
//! someone else answers 404 rather than leaking its existence.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::Ride;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/rides", get(list_rides).post(create_ride))
        .route("/api/rides/{id}", put(update_ride).delete(delete_ride))
}

#[derive(Serialize)]
pub struct RidesResponse {
    pub rides: Vec<Ride>,
}

#[derive(Serialize)]
pub struct RideResponse {
    pub ride: Ride,
}

/// Ride fields as submitted by clients; everything optional so the same
/// payload shape serves create and partial update.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideInput {
    pub name: Option<String>,
    pub duration_min: Option<f64>,
    pub distance_km: Option<f64>,
    #[serde(rename = "type")]
    pub ride_type: Option<String>,
    pub safety_score: Option<f64>,
}

async fn list_rides(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<RidesResponse>> {
    let rides = state
        .store
        .read(|doc| {
            doc.rides
                .iter()
                .filter(|r| r.user_id == auth.user_id)
                .cloned()
                .collect()
        })
        .await;

    Ok(Json(RidesResponse { rides }))
}

async fn create_ride(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<RideInput>,
) -> Result<(StatusCode, Json<RideResponse>)> {
    let name = payload
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("Ride name required".to_string()))?;

    let ride = Ride {
        id: Uuid::new_v4(),
        user_id: auth.user_id,
        name,
        duration_min: payload.duration_min.unwrap_or(0.0),
        distance_km: payload.distance_km.unwrap_or(0.0),
        ride_type: payload
            .ride_type
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Day".to_string()),
        safety_score: payload.safety_score.unwrap_or(0.0),
        created_at: now_rfc3339(),
    };

    let ride = state
        .store
        .write(|doc| {
            doc.rides.push(ride.clone());
            Ok(ride)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RideResponse { ride })))
}

async fn update_ride(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RideInput>,
) -> Result<Json<RideResponse>> {
    let ride = state
        .store
        .write(|doc| {
            let ride = doc
                .rides
                .iter_mut()
                .find(|r| r.id == id && r.user_id == auth.user_id)
                .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))?;

            if let Some(name) = payload.name.filter(|n| !n.is_empty()) {
                ride.name = name;
            }
            if let Some(duration) = payload.duration_min {
                ride.duration_min = duration;
            }
            if let Some(distance) = payload.distance_km {
                ride.distance_km = distance;
            }
            if let Some(ride_type) = payload.ride_type.filter(|t| !t.is_empty()) {
                ride.ride_type = ride_type;
            }
            if let Some(score) = payload.safety_score {
                ride.safety_score = score;
            }

            Ok(ride.clone())
        })
        .await?;

    Ok(Json(RideResponse { ride }))
}

async fn delete_ride(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<RideResponse>> {
    let ride = state
        .store
        .write(|doc| {
            let index = doc
                .rides
                .iter()
                .position(|r| r.id == id && r.user_id == auth.user_id)
                .ok_or_else(|| AppError::NotFound("Ride not found".to_string()))?;

            Ok(doc.rides.remove(index))
        })
        .await?;

    Ok(Json(RideResponse { ride }))
}
