// SPDX-License-Identifier: MIT

//! Maintenance issue CRUD routes, scoped to the authenticated owner.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::issue::{Issue, INITIAL_STATUS};
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
        .route("/api/issues", get(list_issues).post(create_issue))
        .route("/api/issues/{id}", put(update_issue).delete(delete_issue))
}

#[derive(Serialize)]
pub struct IssuesResponse {
    pub issues: Vec<Issue>,
}

#[derive(Serialize)]
pub struct IssueResponse {
    pub issue: Issue,
}

#[derive(Deserialize)]
pub struct IssueInput {
    pub title: Option<String>,
    pub priority: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

async fn list_issues(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<IssuesResponse>> {
    let issues = state
        .store
        .read(|doc| {
            doc.issues
                .iter()
                .filter(|i| i.user_id == auth.user_id)
                .cloned()
                .collect()
        })
        .await;

    Ok(Json(IssuesResponse { issues }))
}

async fn create_issue(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<IssueInput>,
) -> Result<(StatusCode, Json<IssueResponse>)> {
    let title = payload.title.filter(|t| !t.is_empty());
    let priority = payload.priority.filter(|p| !p.is_empty());
    let (Some(title), Some(priority)) = (title, priority) else {
        return Err(AppError::Validation(
            "Title and priority required".to_string(),
        ));
    };

    let issue = Issue {
        id: Uuid::new_v4(),
        user_id: auth.user_id,
        title,
        priority,
        notes: payload.notes.unwrap_or_default(),
        // New issues always enter review, whatever the client sent
        status: INITIAL_STATUS.to_string(),
        created_at: now_rfc3339(),
    };

    let (issue, email) = state
        .store
        .write(|doc| {
            doc.issues.push(issue.clone());
            let email = doc
                .users
                .iter()
                .find(|u| u.id == auth.user_id)
                .map(|u| u.email.clone());
            Ok((issue, email))
        })
        .await?;

    state.notifier.issue_alert(
        email.as_deref().unwrap_or("unknown"),
        &issue.title,
        &issue.status,
    );

    Ok((StatusCode::CREATED, Json(IssueResponse { issue })))
}

async fn update_issue(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<IssueInput>,
) -> Result<Json<IssueResponse>> {
    let (issue, email) = state
        .store
        .write(|doc| {
            let issue = doc
                .issues
                .iter_mut()
                .find(|i| i.id == id && i.user_id == auth.user_id)
                .ok_or_else(|| AppError::NotFound("Issue not found".to_string()))?;

            if let Some(title) = payload.title.filter(|t| !t.is_empty()) {
                issue.title = title;
            }
            if let Some(priority) = payload.priority.filter(|p| !p.is_empty()) {
                issue.priority = priority;
            }
            if let Some(notes) = payload.notes {
                issue.notes = notes;
            }
            if let Some(status) = payload.status.filter(|s| !s.is_empty()) {
                issue.status = status;
            }

            let issue = issue.clone();
            let email = doc
                .users
                .iter()
                .find(|u| u.id == auth.user_id)
                .map(|u| u.email.clone());
            Ok((issue, email))
        })
        .await?;

    state.notifier.issue_alert(
        email.as_deref().unwrap_or("unknown"),
        &issue.title,
        &issue.status,
    );

    Ok(Json(IssueResponse { issue }))
}

async fn delete_issue(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<IssueResponse>> {
    let issue = state
        .store
        .write(|doc| {
            let index = doc
                .issues
                .iter()
                .position(|i| i.id == id && i.user_id == auth.user_id)
                .ok_or_else(|| AppError::NotFound("Issue not found".to_string()))?;

            Ok(doc.issues.remove(index))
        })
        .await?;

    Ok(Json(IssueResponse { issue }))
}
