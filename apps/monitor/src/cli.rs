use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Multi-source A-share quote monitor with push notification"
)]
pub struct Cli {
    /// Comma-separated ticker list (falls back to QW_TICKERS, then 600036)
    #[arg(short, long)]
    pub tickers: Option<String>,
}
