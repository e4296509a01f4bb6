// SPDX-License-Identifier: MIT

//! Signup and login routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::create_jwt;
use crate::models::user::{ContactInput, PublicUser, Role, User};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[derive(Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub contacts: Vec<ContactInput>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Session response shared by signup and login.
#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: PublicUser,
}

async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<SessionResponse>> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(AppError::Validation(
            "Name, email, password required".to_string(),
        ));
    }
    payload
        .validate()
        .map_err(|_| AppError::Validation("Invalid email address".to_string()))?;

    let user = User {
        id: Uuid::new_v4(),
        name: payload.name,
        email: payload.email.clone(),
        password_hash: hash_password(&payload.password)?,
        phone: String::new(),
        medical_info: String::new(),
        contacts: payload
            .contacts
            .into_iter()
            .map(ContactInput::materialize)
            .collect(),
        role: if state
            .config
            .admin_emails
            .contains(&payload.email.to_lowercase())
        {
            Role::Admin
        } else {
            Role::User
        },
        active_ride: None,
        created_at: now_rfc3339(),
    };

    let user = state
        .store
        .write(|doc| {
            let exists = doc
                .users
                .iter()
                .any(|u| u.email.to_lowercase() == user.email.to_lowercase());
            if exists {
                return Err(AppError::Conflict("Email already exists".to_string()));
            }
            doc.users.push(user.clone());
            Ok(user)
        })
        .await?;

    tracing::info!(user_id = %user.id, "User signed up");

    let token = create_jwt(user.id, &state.config.jwt_secret)?;
    Ok(Json(SessionResponse {
        token,
        user: user.into(),
    }))
}

async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password required".to_string(),
        ));
    }

    let user = state
        .store
        .read(|doc| {
            doc.users
                .iter()
                .find(|u| u.email.to_lowercase() == payload.email.to_lowercase())
                .cloned()
        })
        .await
        .ok_or_else(|| AppError::Auth("Invalid credentials".to_string()))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::Auth("Invalid credentials".to_string()));
    }

    let token = create_jwt(user.id, &state.config.jwt_secret)?;

    state
        .notifier
        .login_alert(&user.email, client_ip(&headers).as_deref());

    Ok(Json(SessionResponse {
        token,
        user: user.into(),
    }))
}

/// Best-effort client address for the login alert.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
