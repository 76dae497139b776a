use anyhow::{Context, Result};
use awardscraper::{
    config::{self, Config},
    export,
    normalize::TextNormalizer,
};
use chrono::{Datelike, Local};
use clap::Parser;
use reqwest::Client;
use std::{path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

/// Fetch NASA contract awards for the given fiscal years and export them,
/// for every state, to one CSV.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more 4-digit fiscal years (e.g. 2025)
    #[arg(short = 'y', long = "fiscal-year", num_args = 1.., required = true)]
    fiscal_years: Vec<i32>,

    /// Output directory for the CSV file
    #[arg(short = 'd', long, default_value = config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Acronym reference CSV with "Acronym" and "Definition" columns
    #[arg(long, default_value = config::DEFAULT_REFERENCE)]
    reference: PathBuf,

    /// Skip acronym normalization entirely
    #[arg(long)]
    no_reference: bool,

    /// Comma-separated postal codes to fetch instead of every state
    #[arg(long, value_delimiter = ',')]
    states: Vec<String>,

    /// Export endpoint
    #[arg(long, default_value = config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Requests in flight at once
    #[arg(long, default_value_t = config::DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut cfg = Config::new(self.fiscal_years)?;
        cfg.output_dir = self.output_dir;
        cfg.reference_path = (!self.no_reference).then_some(self.reference);
        if !self.states.is_empty() {
            cfg.states = config::select_states(&self.states)?;
        }
        cfg.endpoint = Url::parse(&self.endpoint)
            .with_context(|| format!("parsing endpoint {}", self.endpoint))?;
        cfg.concurrency = self.concurrency;
        cfg.timeout = Duration::from_secs(self.timeout_secs);
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    // ─── 2) configure ────────────────────────────────────────────────
    let config = Args::parse().into_config()?;
    info!(years = ?config.fiscal_years, states = config.states.len(), "fetching NASA contracts");

    // ─── 3) build the description normalizer once ───────────────────
    let normalizer = TextNormalizer::from_reference(config.reference_path(), Local::now().year())?;

    // ─── 4) fetch, transform, write ─────────────────────────────────
    let client = Client::new();
    let (path, summary) = export::run(&client, &config, &normalizer).await?;
    info!(
        path = %path.display(),
        written = summary.batches_written,
        skipped = summary.batches_skipped,
        rows = summary.rows,
        "all done"
    );
    Ok(())
}
