// SPDX-License-Identifier: MIT

//! Dashboard aggregate route.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{DashboardStats, Issue, Ride};
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// Recent-item limit for the dashboard lists.
const RECENT_LIMIT: usize = 5;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/dashboard", get(dashboard))
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    /// The 5 most recent rides
    pub rides: Vec<Ride>,
    /// The 5 most recent issues
    pub issues: Vec<Issue>,
}

/// Stats plus the most recent rides and issues for the caller.
async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<DashboardResponse>> {
    let response = state
        .store
        .read(|doc| {
            let mut rides: Vec<Ride> = doc
                .rides
                .iter()
                .filter(|r| r.user_id == auth.user_id)
                .cloned()
                .collect();
            let mut issues: Vec<Issue> = doc
                .issues
                .iter()
                .filter(|i| i.user_id == auth.user_id)
                .cloned()
                .collect();
            let sos_count = doc
                .sos_events
                .iter()
                .filter(|s| s.user_id == auth.user_id)
                .count();

            let stats = DashboardStats::compute(&rides, sos_count);

            rides.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            rides.truncate(RECENT_LIMIT);
            issues.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            issues.truncate(RECENT_LIMIT);

            DashboardResponse {
                stats,
                rides,
                issues,
            }
        })
        .await;

    Ok(Json(response))
}
