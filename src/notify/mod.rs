//! Best-effort owner notifications over SMTP.
//!
//! Every send is spawned off the request path: failures are logged and
//! dropped, never retried, and never affect the HTTP response. When SMTP
//! or the owner address is unconfigured the notifier is a no-op.

use crate::config::Config;
use crate::time_utils::now_rfc3339;
use lettre::{
    message::{header::ContentType, Mailbox, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

/// Handle for sending owner notifications.
#[derive(Clone)]
pub struct Notifier {
    smtp: Option<Arc<SmtpSettings>>,
}

struct SmtpSettings {
    host: String,
    user: String,
    pass: String,
    owner: String,
}

impl Notifier {
    /// Build from config; disabled unless host, credentials and the owner
    /// address are all present.
    pub fn from_config(config: &Config) -> Self {
        let smtp = match (
            &config.smtp_host,
            &config.smtp_user,
            &config.smtp_pass,
            &config.owner_email,
        ) {
            (Some(host), Some(user), Some(pass), Some(owner)) => Some(Arc::new(SmtpSettings {
                host: host.clone(),
                user: user.clone(),
                pass: pass.clone(),
                owner: owner.clone(),
            })),
            _ => None,
        };

        if smtp.is_none() {
            tracing::info!("SMTP not configured, owner notifications disabled");
        }

        Self { smtp }
    }

    /// A notifier that never sends anything.
    pub fn disabled() -> Self {
        Self { smtp: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.smtp.is_some()
    }

    /// Notify the owner of a successful login.
    pub fn login_alert(&self, email: &str, ip: Option<&str>) {
        self.dispatch(
            "BikeGuard login alert",
            format!(
                "User {} logged in at {} from IP {}.",
                email,
                now_rfc3339(),
                ip.unwrap_or("unknown")
            ),
        );
    }

    /// Notify the owner of an SOS event.
    pub fn sos_alert(&self, email: &str, location: &str) {
        self.dispatch(
            "BikeGuard SOS alert",
            format!(
                "User {} triggered SOS at {} with location: {}.",
                email,
                now_rfc3339(),
                location
            ),
        );
    }

    /// Notify the owner of an issue being reported or updated.
    pub fn issue_alert(&self, email: &str, title: &str, status: &str) {
        self.dispatch(
            "BikeGuard issue update",
            format!(
                "User {} reported issue \"{}\" at {} (status: {}).",
                email,
                title,
                now_rfc3339(),
                status
            ),
        );
    }

    /// Spawn the send so the request path never waits on the mail relay.
    fn dispatch(&self, subject: &'static str, text: String) {
        let Some(smtp) = self.smtp.clone() else {
            tracing::debug!(subject, "Notifications disabled, skipping");
            return;
        };

        tokio::spawn(async move {
            if let Err(err) = send(&smtp, subject, &text).await {
                tracing::warn!(error = %err, subject, "Failed to send owner notification");
            }
        });
    }
}

async fn send(smtp: &SmtpSettings, subject: &str, text: &str) -> anyhow::Result<()> {
    let from: Mailbox = smtp.user.parse()?;
    let to: Mailbox = smtp.owner.parse()?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_PLAIN)
                .body(text.to_string()),
        )?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)?
        .credentials(Credentials::new(smtp.user.clone(), smtp.pass.clone()))
        .build();

    mailer.send(message).await?;
    Ok(())
}
