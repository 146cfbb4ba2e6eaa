mod cli;
mod config;
mod notify;
mod report;
mod run;

use clap::Parser;
use quotewatch_market_data::{ProviderRegistry, RegistryConfig};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use cli::Cli;
use config::Config;
use notify::BarkNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.tickers)?;
    init_tracing();

    tracing::info!("Monitoring {} ticker(s)", config.tickers.len());

    let registry = ProviderRegistry::with_default_providers(RegistryConfig {
        attempt_delay: config.attempt_delay,
    });
    let notifier = BarkNotifier::new(config.bark_url.clone());

    run::run(&registry, &notifier, &config).await;
    Ok(())
}

fn init_tracing() {
    // Diagnostics go to stderr; stdout is reserved for the quote reports.
    let fmt_layer = fmt::layer().with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
