/// Best-effort delivery of a human-readable alert.
///
/// Failures are the caller's to log; they must never become fatal to signal
/// evaluation.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}
