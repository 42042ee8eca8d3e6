use std::fmt;
use std::str::FromStr;

use market::types::AssetId;
use serde::{Deserialize, Serialize};

pub type SignalId = uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStatus {
    Active,
    Triggered,
}

impl fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalStatus::Active => "Active",
            SignalStatus::Triggered => "Triggered",
        };
        f.write_str(s)
    }
}

impl FromStr for SignalStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(SignalStatus::Active),
            "Triggered" => Ok(SignalStatus::Triggered),
            other => Err(anyhow::anyhow!("Invalid SignalStatus value: {}", other)),
        }
    }
}

/// A persisted watch pairing an owner, an asset, a baseline price, and a
/// percentage threshold.
#[derive(Debug, Clone, Serialize)]
pub struct Signal {
    pub id: SignalId,

    // Identity
    pub owner_id: String,
    pub contact_address: String,
    pub asset_id: AssetId,

    // Config, immutable after creation
    pub threshold_percent: f64,
    pub baseline_price: f64,
    pub created_at_ms: u64,

    // Lifecycle: Active -> Triggered, exactly once, never back
    pub status: SignalStatus,
}

impl Signal {
    /// Build a new Active signal. `baseline_price` is the price observed at
    /// creation time and stays the fixed reference point for the signal's
    /// whole life.
    pub fn new(
        owner_id: impl Into<String>,
        contact_address: impl Into<String>,
        asset_id: AssetId,
        threshold_percent: f64,
        baseline_price: f64,
        now_ms: u64,
    ) -> anyhow::Result<Self> {
        if !threshold_percent.is_finite() || threshold_percent <= 0.0 {
            anyhow::bail!("threshold_percent must be positive, got {}", threshold_percent);
        }

        if !baseline_price.is_finite() || baseline_price <= 0.0 {
            anyhow::bail!("baseline_price must be positive, got {}", baseline_price);
        }

        Ok(Self {
            id: uuid::Uuid::new_v4(),
            owner_id: owner_id.into(),
            contact_address: contact_address.into(),
            asset_id,
            threshold_percent,
            baseline_price,
            created_at_ms: now_ms,
            status: SignalStatus::Active,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == SignalStatus::Active
    }
}
