use async_trait::async_trait;
use serde_json::json;

use super::{Notifier, NotifyError, OutboundEmail, SEND_TIMEOUT};

/// Delivers through a JSON email API (Resend-compatible request shape).
pub struct HttpRelayNotifier {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpRelayNotifier {
    pub fn new(api_url: &str, api_key: &str, from: &str) -> Result<Self, NotifyError> {
        super::parse_mailbox(from)?;

        let client = reqwest::Client::builder()
            .connect_timeout(SEND_TIMEOUT)
            .timeout(SEND_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            from: from.to_string(),
        })
    }
}

#[async_trait]
impl Notifier for HttpRelayNotifier {
    fn transport(&self) -> &'static str {
        "http"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        let mut payload = json!({
            "from": &self.from,
            "to": [&email.to],
            "subject": &email.subject,
            "text": &email.body,
        });
        if let Some(reply_to) = &email.reply_to {
            payload["reply_to"] = json!(reply_to);
        }

        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(1024)
            .collect::<String>();

        Err(NotifyError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
