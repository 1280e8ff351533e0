pub mod dispatch;
pub mod http;
pub mod smtp;
pub mod templates;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::message::Mailbox;

use crate::config::{MailConfig, MailTransport, TlsMode};
use crate::models::NewContact;

pub use dispatch::Dispatcher;
pub use http::HttpRelayNotifier;
pub use smtp::SmtpNotifier;

/// Upper bound on a single delivery attempt, connect included.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub reply_to: Option<String>,
}

impl OutboundEmail {
    /// The sales notification for one submission.
    pub fn for_submission(to: &str, contact: &NewContact, submitted_at: DateTime<Utc>) -> Self {
        let reply_to = contact
            .email
            .parse::<Mailbox>()
            .is_ok()
            .then(|| contact.email.clone());

        Self {
            to: to.to_string(),
            subject: templates::render_subject(contact),
            body: templates::render_body(contact, submitted_at),
            reply_to,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid address {address:?}: {reason}")]
    Address { address: String, reason: String },
    #[error("failed to build email: {0}")]
    Build(String),
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("HTTP relay request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP relay rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),
}

pub(crate) fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address.parse().map_err(|e: lettre::address::AddressError| NotifyError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// An outbound email transport.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short transport label for logs.
    fn transport(&self) -> &'static str;

    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError>;
}

/// Build the configured transport. Missing credentials or a broken transport
/// setup disable notifications with a warning rather than failing startup.
pub fn build_notifier(config: &MailConfig) -> Option<Arc<dyn Notifier>> {
    let Some(from) = config.from.as_deref() else {
        tracing::warn!("No sender address (CONTACT_MAIL_FROM or CONTACT_SMTP_USER); notifications disabled");
        return None;
    };

    let built: Result<Arc<dyn Notifier>, NotifyError> = match &config.transport {
        MailTransport::Smtp(smtp) => {
            let has_credentials = smtp.user.is_some() && smtp.pass.is_some();
            if smtp.tls != TlsMode::None && !has_credentials {
                tracing::warn!("SMTP credentials not configured; notifications disabled");
                return None;
            }
            SmtpNotifier::new(smtp, from).map(|n| Arc::new(n) as Arc<dyn Notifier>)
        }
        MailTransport::Http(http) => {
            let Some(api_key) = http.api_key.as_deref() else {
                tracing::warn!("CONTACT_MAIL_API_KEY not configured; notifications disabled");
                return None;
            };
            HttpRelayNotifier::new(&http.api_url, api_key, from)
                .map(|n| Arc::new(n) as Arc<dyn Notifier>)
        }
    };

    match built {
        Ok(notifier) => {
            tracing::info!("Mail transport configured ({})", notifier.transport());
            Some(notifier)
        }
        Err(e) => {
            tracing::warn!("Mail transport not available: {e}");
            None
        }
    }
}
