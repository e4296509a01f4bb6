//! User model for storage and API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account as stored in the JSON document.
///
/// `password_hash` never leaves the server; API responses use [`PublicUser`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Email address (unique, compared case-insensitively at signup)
    pub email: String,
    /// Argon2 password hash
    pub password_hash: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub medical_info: String,
    /// Emergency contacts, owned by the user
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub role: Role,
    /// In-progress ride session, at most one
    #[serde(default)]
    pub active_ride: Option<ActiveRide>,
    /// When the account was created (RFC3339)
    pub created_at: String,
}

/// User role for admin routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Emergency contact, always embedded in a [`User`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

/// Contact as submitted by clients; the id is optional and assigned on save.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

impl ContactInput {
    /// Convert to a stored contact, assigning a fresh id when absent.
    pub fn materialize(self) -> Contact {
        Contact {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: self.name,
            phone: self.phone,
        }
    }
}

/// In-progress ride session embedded in a user between start and stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveRide {
    pub id: Uuid,
    pub name: String,
    /// When tracking started (RFC3339)
    pub started_at: String,
}

/// User view returned by the API: everything except the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub medical_info: String,
    pub contacts: Vec<Contact>,
    pub role: Role,
    pub active_ride: Option<ActiveRide>,
    pub created_at: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            medical_info: user.medical_info,
            contacts: user.contacts,
            role: user.role,
            active_ride: user.active_ride,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Rider Nova".to_string(),
            email: "nova@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            phone: String::new(),
            medical_info: String::new(),
            contacts: vec![],
            role: Role::User,
            active_ride: None,
            created_at: "2026-01-15T10:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_public_user_has_no_password_hash() {
        let public: PublicUser = make_user().into();
        let json = serde_json::to_value(&public).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "nova@example.com");
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let mut user = make_user();
        user.active_ride = Some(ActiveRide {
            id: Uuid::new_v4(),
            name: "Evening Loop".to_string(),
            started_at: "2026-01-15T18:00:00.000Z".to_string(),
        });

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_some());
        assert!(json.get("medicalInfo").is_some());
        assert_eq!(json["activeRide"]["name"], "Evening Loop");
        assert!(json["activeRide"].get("startedAt").is_some());
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_contact_input_assigns_fresh_id() {
        let input: ContactInput =
            serde_json::from_str(r#"{"name": "Sam Rodriguez", "phone": "+1-555-222-9901"}"#)
                .unwrap();
        let contact = input.materialize();
        assert_eq!(contact.name, "Sam Rodriguez");

        let fixed = Uuid::new_v4();
        let input = ContactInput {
            id: Some(fixed),
            name: "Care Team".to_string(),
            phone: String::new(),
        };
        assert_eq!(input.materialize().id, fixed);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        // Records written by earlier versions may lack optional keys entirely.
        let user: User = serde_json::from_str(
            r#"{
                "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "name": "Old Record",
                "email": "old@example.com",
                "passwordHash": "x",
                "createdAt": "2026-01-01T00:00:00.000Z"
            }"#,
        )
        .unwrap();

        assert_eq!(user.role, Role::User);
        assert!(user.contacts.is_empty());
        assert!(user.active_ride.is_none());
        assert!(user.phone.is_empty());
    }
}
