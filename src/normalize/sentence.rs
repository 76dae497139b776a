use anyhow::Result;

use super::phrases::PhraseTable;

/// First fiscal year that gets an `FYxx` token.
pub const FIRST_FISCAL_YEAR: i32 = 2005;

const FIXED_ABBREVIATIONS: &[(&str, &str)] = &[("u.s.", "U.S."), ("ii", "II"), ("iii", "III")];

/// Lowercases text, capitalizes its first character and restores a small
/// set of abbreviations (`U.S.`, roman numerals, fiscal-year codes).
#[derive(Debug, Clone)]
pub struct SentenceCaser {
    abbreviations: PhraseTable,
}

impl SentenceCaser {
    /// `current_year` bounds the `FY05..=FYyy` tokens.
    pub fn new(current_year: i32) -> Result<Self> {
        let fixed = FIXED_ABBREVIATIONS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()));
        let fiscal = (FIRST_FISCAL_YEAR..=current_year).map(|year| {
            let yy = format!("{:02}", year.rem_euclid(100));
            (format!("fy{}", yy), format!("FY{}", yy))
        });
        let abbreviations = PhraseTable::build(fixed.chain(fiscal))?;
        Ok(Self { abbreviations })
    }

    pub fn sentence_case(&self, text: &str) -> String {
        // lowercase as a whole so context-sensitive mappings (final sigma) apply
        let lower = text.trim().to_lowercase();
        let mut chars = lower.chars();
        let Some(first) = chars.next() else {
            return String::new();
        };
        let mut cased: String = first.to_uppercase().collect();
        cased.push_str(chars.as_str());
        self.abbreviations.replace_all(&cased)
    }
}
