// src/fetch/mod.rs
pub mod request;
pub mod response;

use anyhow::Result;
use futures::{stream, Stream, StreamExt};
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::config::Config;

pub use request::{fetch_export, ExportRequest};
pub use response::ExportBody;

/// Every (fiscal year, state) request in output order: year-major,
/// state-minor.
pub fn plan_requests(config: &Config) -> Vec<ExportRequest> {
    config
        .fiscal_years
        .iter()
        .flat_map(|&year| {
            config
                .states
                .iter()
                .map(move |state| ExportRequest::new(year, state.clone()))
        })
        .collect()
}

/// Fetch all `requests` with at most `concurrency` in flight. Results come
/// back in request order regardless of completion order.
pub fn fetch_exports(
    client: Client,
    endpoint: Url,
    requests: Vec<ExportRequest>,
    concurrency: usize,
    timeout: Duration,
) -> impl Stream<Item = (ExportRequest, Result<String>)> {
    stream::iter(requests)
        .map(move |req| {
            let client = client.clone();
            let endpoint = endpoint.clone();
            async move {
                let body = fetch_export(&client, &endpoint, &req, timeout).await;
                (req, body)
            }
        })
        .buffered(concurrency.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::select_states;

    #[test]
    fn plans_year_major() {
        let mut cfg = Config::new(vec![2024, 2025]).unwrap();
        cfg.states = select_states(&["WA".into(), "AK".into()]).unwrap();
        let plan: Vec<(i32, String)> = plan_requests(&cfg)
            .into_iter()
            .map(|r| (r.year, r.state.code))
            .collect();
        assert_eq!(
            plan,
            vec![
                (2024, "AK".to_string()),
                (2024, "WA".to_string()),
                (2025, "AK".to_string()),
                (2025, "WA".to_string()),
            ]
        );
    }
}
