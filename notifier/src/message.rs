use market::types::AssetId;

/// Subject line for a fired signal.
pub fn alert_subject(asset_id: &AssetId) -> String {
    format!("Price Alert for {}", asset_id)
}

/// Plain-text body for a fired signal. `percent_change` keeps its sign so the
/// reader can tell a rise from a drop.
pub fn alert_body(asset_id: &AssetId, percent_change: f64, observed_price: f64) -> String {
    format!(
        "Alert for {}! It moved by {:.2}%. The new price is ${:.2}.",
        asset_id, percent_change, observed_price
    )
}
