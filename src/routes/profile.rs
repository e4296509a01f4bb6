// SPDX-License-Identifier: MIT

//! Profile and emergency-contact routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::user::{Contact, ContactInput, PublicUser};
use crate::AppState;
use axum::{
    extract::State,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/profile", get(get_profile).put(update_profile))
        .route("/api/contacts", get(get_contacts).post(replace_contacts))
}

#[derive(Serialize)]
pub struct UserResponse {
    pub user: PublicUser,
}

#[derive(Serialize)]
pub struct ContactsResponse {
    pub contacts: Vec<Contact>,
}

async fn find_caller(state: &AppState, auth: &AuthUser) -> Result<crate::models::User> {
    state
        .store
        .read(|doc| doc.users.iter().find(|u| u.id == auth.user_id).cloned())
        .await
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Get the authenticated user.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let user = find_caller(&state, &auth).await?;
    Ok(Json(UserResponse { user: user.into() }))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let user = find_caller(&state, &auth).await?;
    Ok(Json(UserResponse { user: user.into() }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub medical_info: Option<String>,
    pub contacts: Option<Vec<ContactInput>>,
}

/// Partial profile update; contacts replace the whole list.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>> {
    let user = state
        .store
        .write(|doc| {
            let user = doc
                .users
                .iter_mut()
                .find(|u| u.id == auth.user_id)
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

            if let Some(name) = payload.name.filter(|n| !n.is_empty()) {
                user.name = name;
            }
            if let Some(phone) = payload.phone {
                user.phone = phone;
            }
            if let Some(info) = payload.medical_info {
                user.medical_info = info;
            }
            if let Some(contacts) = payload.contacts {
                user.contacts = contacts.into_iter().map(ContactInput::materialize).collect();
            }

            Ok(user.clone())
        })
        .await?;

    Ok(Json(UserResponse { user: user.into() }))
}

async fn get_contacts(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ContactsResponse>> {
    let user = find_caller(&state, &auth).await?;
    Ok(Json(ContactsResponse {
        contacts: user.contacts,
    }))
}

#[derive(Deserialize)]
pub struct ReplaceContactsRequest {
    pub contacts: Option<Vec<ContactInput>>,
}

/// Replace the caller's emergency contacts wholesale.
async fn replace_contacts(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<ReplaceContactsRequest>,
) -> Result<Json<ContactsResponse>> {
    let contacts = payload
        .contacts
        .ok_or_else(|| AppError::Validation("Contacts must be an array".to_string()))?;

    let contacts = state
        .store
        .write(|doc| {
            let user = doc
                .users
                .iter_mut()
                .find(|u| u.id == auth.user_id)
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

            user.contacts = contacts.into_iter().map(ContactInput::materialize).collect();
            Ok(user.contacts.clone())
        })
        .await?;

    Ok(Json(ContactsResponse { contacts }))
}
