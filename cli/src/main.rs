mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use sqlx::SqlitePool;
use tracing::Instrument;

use cli::{Cli, Command};
use common::logger::{TraceId, cycle_span, init_logger};
use common::time::now_ms;
use engine::{EngineConfig, EvaluationEngine};
use market::analysis::moving_average;
use market::history::PriceHistoryStore;
use market::history::sqlite_store::SqlitePriceHistory;
use market::source::PriceSource;
use market::source::coingecko::CoinGeckoSource;
use market::types::AssetId;
use notifier::{NoopNotifier, Notifier, SendGridNotifier};
use signal::model::Signal;
use signal::store::SignalStore;
use signal::store::sqlite_store::SqliteSignalStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger("pricepulse");

    let cli = Cli::parse();

    let pool = SqlitePool::connect(&cli.database_url)
        .await
        .with_context(|| format!("connecting to {}", cli.database_url))?;

    let history = Arc::new(SqlitePriceHistory::from_pool(pool.clone()));
    history.ensure_schema().await?;

    let signals = Arc::new(SqliteSignalStore::from_pool(pool));
    signals.ensure_schema().await?;

    let source = Arc::new(CoinGeckoSource::new(&cli.price_api_url, &cli.currency)?);

    match cli.command {
        Command::Run {
            assets,
            interval_secs,
        } => {
            let notifier: Arc<dyn Notifier> = match SendGridNotifier::from_env()? {
                Some(n) => Arc::new(n),
                None => {
                    tracing::warn!("SENDGRID_API_KEY not set, alerts will be logged and dropped");
                    Arc::new(NoopNotifier)
                }
            };

            let engine =
                EvaluationEngine::new(source, history, signals, notifier, EngineConfig::default());

            run_polling_loop(&engine, assets, interval_secs).await
        }

        Command::CreateSignal {
            owner,
            email,
            asset,
            threshold_percent,
        } => {
            let asset_id = AssetId::new(asset);

            // The price observed now becomes the signal's fixed baseline.
            let quote = source
                .fetch(&asset_id)
                .await
                .context("fetching baseline price")?;

            let signal = Signal::new(
                owner,
                email,
                asset_id,
                threshold_percent,
                quote.price,
                now_ms(),
            )?;
            signals.save(&signal).await?;

            tracing::info!(signal_id = %signal.id, baseline = quote.price, "signal created");
            println!("{}", serde_json::to_string_pretty(&signal)?);

            Ok(())
        }

        Command::Signals { owner } => {
            let list = signals.list_for_owner(&owner).await?;

            println!("{}", serde_json::to_string_pretty(&list)?);

            Ok(())
        }

        Command::Analyze { asset, window_hours } => {
            let asset_id = AssetId::new(asset);

            let report =
                moving_average(history.as_ref(), &asset_id, window_hours, now_ms()).await?;

            if report.sample_count == 0 {
                anyhow::bail!(
                    "not enough data for analysis: no samples for {} in the last {}h",
                    asset_id,
                    window_hours
                );
            }

            println!("{}", serde_json::to_string_pretty(&report)?);

            Ok(())
        }
    }
}

/// Drive polling cycles forever, one per asset per tick.
///
/// A failed cycle is logged and retried on the next tick; the loop itself
/// never gives up.
async fn run_polling_loop<P, H, S, N>(
    engine: &EvaluationEngine<P, H, S, N>,
    assets: Vec<String>,
    interval_secs: u64,
) -> anyhow::Result<()>
where
    P: PriceSource,
    H: PriceHistoryStore,
    S: SignalStore,
    N: Notifier + ?Sized + 'static,
{
    let assets: Vec<AssetId> = assets.into_iter().map(AssetId::new).collect();

    tracing::info!(?assets, interval_secs, "starting polling loop");

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        ticker.tick().await;

        for asset_id in &assets {
            let trace_id = TraceId::default();
            let span = cycle_span(asset_id.as_str(), &trace_id);

            async {
                match engine.run_cycle(asset_id, now_ms()).await {
                    Ok(report) => {
                        tracing::info!(
                            observed_price = report.observed_price,
                            evaluated = report.signals_evaluated,
                            triggered = report.signals_triggered,
                            skipped = report.signals_skipped,
                            update_failures = report.update_failures,
                            "cycle complete"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "cycle failed, retrying on next tick");
                    }
                }
            }
            .instrument(span)
            .await;
        }
    }
}
