use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use market::history::PriceHistoryStore;
use market::source::PriceSource;
use market::types::{AssetId, PriceQuote, PriceSample};
use notifier::Notifier;
use signal::model::{Signal, SignalId, SignalStatus};
use signal::store::SignalStore;

/// Price source returning a fixed price, or failing when none is set.
pub struct MockPriceSource {
    pub price: Mutex<Option<f64>>,
}

impl MockPriceSource {
    pub fn with_price(price: f64) -> Self {
        Self {
            price: Mutex::new(Some(price)),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            price: Mutex::new(None),
        }
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn fetch(&self, asset_id: &AssetId) -> anyhow::Result<PriceQuote> {
        match *self.price.lock().await {
            Some(price) => Ok(PriceQuote {
                asset_id: asset_id.clone(),
                currency: "usd".into(),
                price,
            }),
            None => anyhow::bail!("quote provider unreachable"),
        }
    }
}

#[derive(Default)]
pub struct MockPriceHistory {
    pub samples: Arc<Mutex<Vec<PriceSample>>>,
    pub fail_append: AtomicBool,
}

#[async_trait]
impl PriceHistoryStore for MockPriceHistory {
    async fn append(&self, sample: &PriceSample) -> anyhow::Result<()> {
        if self.fail_append.load(Ordering::SeqCst) {
            anyhow::bail!("history store down");
        }

        self.samples.lock().await.push(sample.clone());
        Ok(())
    }

    async fn query_since(
        &self,
        asset_id: &AssetId,
        since_ms: u64,
    ) -> anyhow::Result<Vec<PriceSample>> {
        Ok(self
            .samples
            .lock()
            .await
            .iter()
            .filter(|s| &s.asset_id == asset_id && s.observed_at_ms >= since_ms)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MockSignalStore {
    pub map: Arc<Mutex<HashMap<SignalId, Signal>>>,
    /// Simulate a concurrent cycle winning every CAS between load and write.
    pub lose_every_cas: AtomicBool,
    pub fail_cas: AtomicBool,
}

#[async_trait]
impl SignalStore for MockSignalStore {
    async fn save(&self, signal: &Signal) -> anyhow::Result<()> {
        self.map.lock().await.insert(signal.id, signal.clone());
        Ok(())
    }

    async fn query_active(&self, asset_id: &AssetId) -> anyhow::Result<Vec<Signal>> {
        Ok(self
            .map
            .lock()
            .await
            .values()
            .filter(|s| &s.asset_id == asset_id && s.status == SignalStatus::Active)
            .cloned()
            .collect())
    }

    async fn list_for_owner(&self, owner_id: &str) -> anyhow::Result<Vec<Signal>> {
        Ok(self
            .map
            .lock()
            .await
            .values()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn compare_and_set_status(
        &self,
        signal_id: SignalId,
        expected: SignalStatus,
        new: SignalStatus,
    ) -> anyhow::Result<bool> {
        if self.fail_cas.load(Ordering::SeqCst) {
            anyhow::bail!("signal store down");
        }

        if self.lose_every_cas.load(Ordering::SeqCst) {
            return Ok(false);
        }

        let mut map = self.map.lock().await;

        match map.get_mut(&signal_id) {
            Some(sig) if sig.status == expected => {
                sig.status = new;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentAlert {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Records outgoing alerts; can be told to fail every send.
#[derive(Default)]
pub struct MockNotifier {
    pub sent: std::sync::Mutex<Vec<SentAlert>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("mail provider rejected the message");
        }

        self.sent.lock().unwrap().push(SentAlert {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        });

        Ok(())
    }
}
