// src/fetch/request.rs
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::config::State;

/// Form payload for one (fiscal year, state) export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub year: i32,
    pub state: State,
}

impl ExportRequest {
    pub fn new(year: i32, state: State) -> Self {
        Self { year, state }
    }

    /// Key/value pairs posted to the export endpoint. The fiscal year runs
    /// from October 1 of the prior year through September 30.
    pub fn form(&self) -> Vec<(&'static str, String)> {
        let yy = format!("{:02}", self.year.rem_euclid(100));
        let fy = format!("FY {}", yy);
        vec![
            ("bus_cat", "ALL".into()),
            ("fy", fy.clone()),
            ("recovery", "0".into()),
            ("v_center", "ALL".into()),
            ("v_database", fy.replace(' ', "")),
            ("v_code", "53".into()),
            ("v_district", "ALL".into()),
            ("v_end_date", format!("{}-09-30", self.year)),
            ("v_start_date", format!("{}-10-01", self.year - 1)),
            ("v_state", self.state.name.to_uppercase()),
            ("v_state2", self.state.code.clone()),
            ("action", "Export to Excel".into()),
        ]
    }
}

/// POST one export request and return the response body.
#[instrument(level = "debug", skip(client, endpoint, timeout), fields(state = %request.state.code, year = request.year))]
pub async fn fetch_export(
    client: &Client,
    endpoint: &Url,
    request: &ExportRequest,
    timeout: Duration,
) -> Result<String> {
    debug!("posting export form to {}", endpoint);
    client
        .post(endpoint.clone())
        .form(&request.form())
        .timeout(timeout)
        .send()
        .await
        .with_context(|| format!("POST {} failed", endpoint))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", endpoint))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_fiscal_year_form() {
        let req = ExportRequest::new(
            2025,
            State {
                code: "WA".into(),
                name: "Washington".into(),
            },
        );
        let form = req.form();
        let get = |k: &str| {
            form.iter()
                .find(|(key, _)| *key == k)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };
        assert_eq!(get("fy"), "FY 25");
        assert_eq!(get("v_database"), "FY25");
        assert_eq!(get("v_start_date"), "2024-10-01");
        assert_eq!(get("v_end_date"), "2025-09-30");
        assert_eq!(get("v_state"), "WASHINGTON");
        assert_eq!(get("v_state2"), "WA");
        assert_eq!(get("action"), "Export to Excel");
        assert_eq!(form.len(), 12);
    }

    #[test]
    fn pads_early_fiscal_years() {
        let req = ExportRequest::new(
            2007,
            State {
                code: "DC".into(),
                name: "District of Columbia".into(),
            },
        );
        let form = req.form();
        assert!(form.contains(&("fy", "FY 07".to_string())));
        assert!(form.contains(&("v_state", "DISTRICT OF COLUMBIA".to_string())));
    }
}
