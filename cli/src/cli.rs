use clap::{Parser, Subcommand};

use market::source::coingecko::DEFAULT_BASE_URL;

/// Price monitoring and threshold alerts.
#[derive(Parser)]
#[command(name = "pricepulse", version, about = "Price monitoring and threshold alerts")]
pub struct Cli {
    /// SQLite database holding signals and price history.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://pricepulse.db?mode=rwc"
    )]
    pub database_url: String,

    /// Quote provider base URL.
    #[arg(long, env = "COINGECKO_API_URL", default_value = DEFAULT_BASE_URL)]
    pub price_api_url: String,

    /// Reporting currency for quotes.
    #[arg(long, default_value = "usd")]
    pub currency: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Poll prices on an interval and evaluate signals each tick.
    Run {
        /// Asset to poll; repeat the flag to poll several.
        #[arg(long = "asset", required = true)]
        assets: Vec<String>,

        /// Seconds between polling cycles.
        #[arg(long, default_value_t = 60)]
        interval_secs: u64,
    },

    /// Create a signal, capturing the current price as its baseline.
    CreateSignal {
        /// Owner the signal belongs to.
        #[arg(long)]
        owner: String,

        /// Email address alerts are delivered to.
        #[arg(long)]
        email: String,

        #[arg(long)]
        asset: String,

        /// Absolute percentage move that fires the signal.
        #[arg(long)]
        threshold_percent: f64,
    },

    /// List every signal belonging to an owner.
    Signals {
        #[arg(long)]
        owner: String,
    },

    /// Simple moving average of recorded prices over a trailing window.
    Analyze {
        #[arg(long)]
        asset: String,

        /// Trailing window, in hours.
        #[arg(long, default_value_t = 24)]
        window_hours: u32,
    },
}
