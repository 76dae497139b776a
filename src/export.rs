// src/export.rs
use anyhow::Result;
use futures::StreamExt;
use reqwest::Client;
use std::{io::Write, path::PathBuf, time::Instant};
use tracing::{error, info, instrument, warn};

use crate::{
    config::Config,
    fetch::{fetch_exports, plan_requests, ExportBody},
    normalize::TextNormalizer,
    output::CsvSink,
    process::Pipeline,
};

/// Counts for one completed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub batches_written: usize,
    pub batches_skipped: usize,
    pub rows: u64,
}

/// Fetch every (year, state) export named by `config` and write one CSV at
/// `config.output_path()`.
#[instrument(level = "info", skip_all, fields(years = ?config.fiscal_years))]
pub async fn run(
    client: &Client,
    config: &Config,
    normalizer: &TextNormalizer,
) -> Result<(PathBuf, RunSummary)> {
    config.prepare()?;
    let path = config.output_path();
    let sink = CsvSink::create(&path)?;
    let (sink, summary) = export_into(client, config, normalizer, sink).await?;
    sink.finish()?;
    info!(path = %path.display(), rows = summary.rows, "file written");
    Ok((path, summary))
}

/// Same as [`run`] but writes into an existing sink and returns it unflushed.
pub async fn export_into<W: Write>(
    client: &Client,
    config: &Config,
    normalizer: &TextNormalizer,
    mut sink: CsvSink<W>,
) -> Result<(CsvSink<W>, RunSummary)> {
    let pipeline = Pipeline::new(normalizer);
    let mut summary = RunSummary::default();

    let requests = plan_requests(config);
    info!(batches = requests.len(), "starting export");

    let mut results = Box::pin(fetch_exports(
        client.clone(),
        config.endpoint.clone(),
        requests,
        config.concurrency,
        config.timeout,
    ));

    while let Some((req, body)) = results.next().await {
        let state = &req.state;
        let start = Instant::now();
        let text = match body {
            Ok(t) => t,
            Err(e) => {
                error!(state = %state.name, year = req.year, "request failed: {:#}", e);
                summary.batches_skipped += 1;
                continue;
            }
        };

        match ExportBody::parse(&text) {
            ExportBody::Invalid => {
                warn!(state = %state.name, year = req.year, "invalid entry; skipping");
                summary.batches_skipped += 1;
            }
            ExportBody::Malformed { lines } => {
                warn!(state = %state.name, year = req.year, lines, "unexpected response format; skipping");
                summary.batches_skipped += 1;
            }
            ExportBody::Table { header, lines } => {
                sink.write_header(&header)?;
                let rows = pipeline.process_batch(&state.code, lines);
                sink.write_rows(&rows)?;
                summary.batches_written += 1;
                summary.rows += rows.len() as u64;
                info!(
                    state = %state.name,
                    year = req.year,
                    contracts = rows.len(),
                    elapsed = ?start.elapsed(),
                    "finished batch"
                );
            }
        }
    }

    Ok((sink, summary))
}
