use async_trait::async_trait;

use crate::types::Notifier;

/// Fallback used when no delivery provider is configured: logs the alert and
/// drops it.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> anyhow::Result<()> {
        tracing::info!(to = %to, subject = %subject, "notifier not configured, dropping alert");

        Ok(())
    }
}
