// SPDX-License-Identifier: MIT

//! Admin overview route.

use crate::error::Result;
use crate::middleware::policy::require_admin;
use crate::models::{Issue, PublicUser, Ride, SosEvent};
use crate::AppState;
use axum::{extract::State, middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/overview", get(overview))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

/// Whole-system snapshot with password hashes stripped.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub users: Vec<PublicUser>,
    pub rides: Vec<Ride>,
    pub issues: Vec<Issue>,
    pub sos_events: Vec<SosEvent>,
}

async fn overview(State(state): State<Arc<AppState>>) -> Result<Json<OverviewResponse>> {
    let response = state
        .store
        .read(|doc| OverviewResponse {
            users: doc.users.iter().cloned().map(PublicUser::from).collect(),
            rides: doc.rides.clone(),
            issues: doc.issues.clone(),
            sos_events: doc.sos_events.clone(),
        })
        .await;

    Ok(Json(response))
}
