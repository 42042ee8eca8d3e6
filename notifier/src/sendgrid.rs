//! SendGrid email adapter.
//!
//! Posts to the v3 mail-send endpoint with a plain-text body. Delivery is
//! best-effort from the engine's perspective: the caller logs failures and
//! moves on.

use std::time::Duration;

use async_trait::async_trait;

use crate::types::Notifier;

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Sender display name on outgoing alerts.
const FROM_NAME: &str = "PricePulse";

const TIMEOUT_SECS: u64 = 10;

pub struct SendGridNotifier {
    client: reqwest::Client,
    api_key: String,
    from_email: String,
}

impl SendGridNotifier {
    pub fn new(api_key: impl Into<String>, from_email: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            from_email: from_email.into(),
        })
    }

    /// Build from `SENDGRID_API_KEY` / `SENDGRID_FROM_EMAIL`.
    ///
    /// Returns `None` when the key is unset or empty so callers can fall back
    /// to the no-op notifier instead of failing startup.
    pub fn from_env() -> anyhow::Result<Option<Self>> {
        let api_key = match std::env::var("SENDGRID_API_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => return Ok(None),
        };

        let from_email = std::env::var("SENDGRID_FROM_EMAIL")
            .unwrap_or_else(|_| "alerts@pricepulse.local".to_string());

        Ok(Some(Self::new(api_key, from_email)?))
    }
}

#[async_trait]
impl Notifier for SendGridNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let payload = serde_json::json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.from_email.as_str(), "name": FROM_NAME },
            "subject": subject,
            "content": [{ "type": "text/plain", "value": body }],
        });

        let response = self
            .client
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() >= 400 {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("SendGrid returned an error: {} - {}", status, detail);
        }

        Ok(())
    }
}
