// SPDX-License-Identifier: MIT

//! SOS alert route. Events are append-only.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::SosEvent;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/sos", post(create_sos))
}

#[derive(Deserialize)]
pub struct SosRequest {
    pub message: Option<String>,
    pub location: Option<String>,
}

#[derive(Serialize)]
pub struct SosResponse {
    pub sos: SosEvent,
}

async fn create_sos(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<SosRequest>,
) -> Result<(StatusCode, Json<SosResponse>)> {
    let event = SosEvent {
        id: Uuid::new_v4(),
        user_id: auth.user_id,
        message: payload
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Emergency alert triggered".to_string()),
        location: payload
            .location
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "Unknown location".to_string()),
        created_at: now_rfc3339(),
    };

    let (event, email) = state
        .store
        .write(|doc| {
            doc.sos_events.push(event.clone());
            let email = doc
                .users
                .iter()
                .find(|u| u.id == auth.user_id)
                .map(|u| u.email.clone());
            Ok((event, email))
        })
        .await?;

    tracing::warn!(user_id = %auth.user_id, location = %event.location, "SOS triggered");

    state
        .notifier
        .sos_alert(email.as_deref().unwrap_or("unknown"), &event.location);

    Ok((StatusCode::CREATED, Json(SosResponse { sos: event })))
}
