//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; SMTP settings are optional and
//! notifications stay disabled when they are absent.

use std::env;
use std::path::PathBuf;

const DEFAULT_JWT_SECRET: &str = "dev_secret_change_me";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_secret: Vec<u8>,
    /// Directory holding the JSON document store
    pub data_dir: PathBuf,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Emails granted the admin role at signup (lowercased)
    pub admin_emails: Vec<String>,
    /// Recipient of owner notifications (login/SOS/issue alerts)
    pub owner_email: Option<String>,
    /// SMTP relay host
    pub smtp_host: Option<String>,
    /// SMTP username (also used as the From address)
    pub smtp_user: Option<String>,
    /// SMTP password
    pub smtp_pass: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret.into_bytes(),
            _ => {
                tracing::warn!("JWT_SECRET not set, using development default");
                DEFAULT_JWT_SECRET.as_bytes().to_vec()
            }
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            jwt_secret,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            admin_emails: parse_admin_emails(env::var("ADMIN_EMAILS").ok().as_deref()),
            owner_email: non_empty(env::var("OWNER_EMAIL").ok()),
            smtp_host: non_empty(env::var("SMTP_HOST").ok()),
            smtp_user: non_empty(env::var("SMTP_USER").ok()),
            smtp_pass: non_empty(env::var("SMTP_PASS").ok()),
        })
    }

    /// Path of the JSON document inside the data directory.
    pub fn db_file(&self) -> PathBuf {
        self.data_dir.join("db.json")
    }

    /// Default config for tests: fixed signing key, no SMTP.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            jwt_secret: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            data_dir: PathBuf::from("data"),
            frontend_url: "http://localhost:5173".to_string(),
            admin_emails: vec!["admin@bikeguard.test".to_string()],
            owner_email: None,
            smtp_host: None,
            smtp_user: None,
            smtp_pass: None,
        }
    }
}

fn parse_admin_emails(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_admin_emails() {
        let emails = parse_admin_emails(Some("Owner@Example.com, second@example.com ,,"));
        assert_eq!(emails, vec!["owner@example.com", "second@example.com"]);

        assert!(parse_admin_emails(None).is_empty());
        assert!(parse_admin_emails(Some("")).is_empty());
    }

    #[test]
    fn test_db_file_under_data_dir() {
        let config = Config::test_default();
        assert_eq!(config.db_file(), PathBuf::from("data").join("db.json"));
    }
}
