// SPDX-License-Identifier: MIT

//! Admin access policy.
//!
//! Handlers never inspect the allow-list directly; adding a new role type
//! touches this module only.

use crate::config::Config;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::{Role, User};
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Extension,
};
use std::sync::Arc;

/// Whether a user may access admin routes.
///
/// Grants on the stored role, or on the configured allow-list so an
/// operator keeps access when their record predates the list.
pub fn is_admin(user: &User, config: &Config) -> bool {
    user.role == Role::Admin || config.admin_emails.contains(&user.email.to_lowercase())
}

/// Middleware that restricts a route to admin users.
///
/// Must run after `require_auth`, which resolves the caller.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let allowed = state
        .store
        .read(|doc| {
            doc.users
                .iter()
                .find(|u| u.id == auth.user_id)
                .map(|u| is_admin(u, &state.config))
                .unwrap_or(false)
        })
        .await;

    if !allowed {
        return Err(AppError::Forbidden("Admin only".to_string()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn make_user(email: &str, role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Rider".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            phone: String::new(),
            medical_info: String::new(),
            contacts: vec![],
            role,
            active_ride: None,
            created_at: "2026-01-15T10:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_admin_role_grants() {
        let config = Config::test_default();
        let user = make_user("anyone@example.com", Role::Admin);
        assert!(is_admin(&user, &config));
    }

    #[test]
    fn test_allow_list_grants_case_insensitively() {
        let config = Config::test_default();
        let user = make_user("Admin@BikeGuard.test", Role::User);
        assert!(is_admin(&user, &config));
    }

    #[test]
    fn test_plain_user_denied() {
        let config = Config::test_default();
        let user = make_user("rider@example.com", Role::User);
        assert!(!is_admin(&user, &config));
    }
}
