// src/process/mod.rs
pub mod district;
pub mod sanitize;

use crate::normalize::TextNormalizer;

pub use district::resolve_district;
pub use sanitize::{title_case, RowSanitizer};

/// One finished output row: `[state, district, ...sanitized fields]`.
pub type OutputRow = Vec<String>;

/// Leading columns injected in front of the export header.
pub const PREPENDED_HEADERS: [&str; 2] = ["State", "District"];

/// Output header for an export whose own header line split into `original`.
pub fn output_header(original: &[String]) -> Vec<String> {
    PREPENDED_HEADERS
        .iter()
        .map(|h| h.to_string())
        .chain(original.iter().cloned())
        .collect()
}

/// Turns raw tab-delimited export lines into output rows for one state.
#[derive(Debug, Clone)]
pub struct Pipeline<'a> {
    sanitizer: RowSanitizer<'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(normalizer: &'a TextNormalizer) -> Self {
        Self {
            sanitizer: RowSanitizer::new(normalizer),
        }
    }

    pub fn process_line(&self, state: &str, line: &str) -> OutputRow {
        let mut raw: Vec<String> = line.split('\t').map(str::to_string).collect();

        // district comes from the field as exported, before quote stripping
        let district = raw
            .get(sanitize::PLACE_OF_PERFORMANCE)
            .map(|pop| resolve_district(state, pop))
            .unwrap_or_default();

        self.sanitizer.sanitize(&mut raw);

        let mut row = Vec::with_capacity(raw.len() + PREPENDED_HEADERS.len());
        row.push(state.to_string());
        row.push(district);
        row.extend(raw);
        row
    }

    /// Process a batch in input order.
    pub fn process_batch<'l, I>(&self, state: &str, lines: I) -> Vec<OutputRow>
    where
        I: IntoIterator<Item = &'l str>,
    {
        lines
            .into_iter()
            .map(|line| self.process_line(state, line))
            .collect()
    }
}
