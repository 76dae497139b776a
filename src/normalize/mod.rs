// src/normalize/mod.rs
pub mod acronyms;
pub mod phrases;
pub mod sentence;

use anyhow::Result;
use std::path::Path;
use tracing::warn;

pub use acronyms::{AcronymEntry, AcronymNormalizer};
pub use sentence::SentenceCaser;

/// Description-field normalizer: sentence case first, then acronym casing.
/// Immutable once built, so one instance can be shared across workers.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    sentence: SentenceCaser,
    acronyms: AcronymNormalizer,
}

impl TextNormalizer {
    pub fn new(sentence: SentenceCaser, acronyms: AcronymNormalizer) -> Self {
        Self { sentence, acronyms }
    }

    /// Sentence casing only.
    pub fn without_reference(current_year: i32) -> Result<Self> {
        Ok(Self::new(
            SentenceCaser::new(current_year)?,
            AcronymNormalizer::default(),
        ))
    }

    /// Load the acronym reference at `reference`, if given. A configured file
    /// that does not exist is skipped with a warning.
    pub fn from_reference(reference: Option<&Path>, current_year: i32) -> Result<Self> {
        let acronyms = match reference {
            Some(path) if path.exists() => {
                let acronyms = AcronymNormalizer::from_csv_path(path)?;
                if acronyms.is_empty() {
                    warn!(path = %path.display(), "acronym reference has no usable entries");
                }
                acronyms
            }
            Some(path) => {
                warn!(path = %path.display(), "acronym reference not found; sentence casing only");
                AcronymNormalizer::default()
            }
            None => AcronymNormalizer::default(),
        };
        Ok(Self::new(SentenceCaser::new(current_year)?, acronyms))
    }

    pub fn normalize(&self, text: &str) -> String {
        self.acronyms.normalize(&self.sentence.sentence_case(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    fn normalizer() -> TextNormalizer {
        let entries = vec![
            AcronymEntry::new("NASA", "National Aeronautics and Space Administration"),
            AcronymEntry::new("ISS", "International Space Station"),
            AcronymEntry {
                acronym: Some("STA".into()),
                definition: Some("Station".into()),
            },
            AcronymEntry::new("SS", "Space Station"),
        ];
        TextNormalizer::new(
            SentenceCaser::new(2025).unwrap(),
            AcronymNormalizer::load(&entries).unwrap(),
        )
    }

    #[test]
    fn sentence_cases_then_restores_acronyms() {
        assert_eq!(
            normalizer().normalize("  nasa SUPPORT FOR THE iss IN fy24 "),
            "NASA support for the ISS in FY24"
        );
    }

    #[test]
    fn longest_phrase_takes_precedence() {
        assert_eq!(
            normalizer().normalize("repair of the SPACE STATION"),
            "Repair of the Space Station"
        );
        assert_eq!(normalizer().normalize("a station"), "A Station");
    }

    #[test]
    fn without_reference_only_sentence_cases() {
        let n = TextNormalizer::without_reference(2025).unwrap();
        assert_eq!(n.normalize("THE mission WAS A success."), "The mission was a success.");
        assert_eq!(n.normalize("nasa"), "Nasa");
    }

    #[test]
    fn missing_reference_file_degrades_to_sentence_case() {
        let n = TextNormalizer::from_reference(Some(Path::new("no/such/file.csv")), 2025).unwrap();
        assert_eq!(n.normalize("NASA ISS"), "Nasa iss");
    }

    #[test]
    fn empty_reference_file_degrades_to_sentence_case() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Acronym,Definition").unwrap();
        file.flush().unwrap();
        let n = TextNormalizer::from_reference(Some(file.path()), 2025).unwrap();
        assert_eq!(n.normalize("NASA ISS"), "Nasa iss");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(text in "[A-Za-z0-9 .,;()'-]{0,80}") {
            let n = normalizer();
            let once = n.normalize(&text);
            prop_assert_eq!(n.normalize(&once), once);
        }
    }
}
