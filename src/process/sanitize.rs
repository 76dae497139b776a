use crate::normalize::TextNormalizer;

// Column positions in the raw export row, fixed by the upstream format.
pub const CONTRACTOR: usize = 0;
pub const PLACE_OF_PERFORMANCE: usize = 3;
pub const AWARD_TYPE: usize = 6;
pub const CONTRACTOR_TYPE: usize = 7;
pub const OBLIGATIONS: usize = 8;
pub const CHANGE_IN_AWARD_VALUE: usize = 9;
pub const SOLICITATION_POC: usize = 13;
pub const DESCRIPTION: usize = 14;

/// Columns the export wraps in stray double quotes.
pub const QUOTED_COLUMNS: &[usize] = &[
    CONTRACTOR,
    PLACE_OF_PERFORMANCE,
    AWARD_TYPE,
    CONTRACTOR_TYPE,
    OBLIGATIONS,
    CHANGE_IN_AWARD_VALUE,
    SOLICITATION_POC,
    DESCRIPTION,
];

/// Applies the per-row cleanups. Every step is skipped when the row is too
/// short for the column it touches.
#[derive(Debug, Clone)]
pub struct RowSanitizer<'a> {
    normalizer: &'a TextNormalizer,
}

impl<'a> RowSanitizer<'a> {
    pub fn new(normalizer: &'a TextNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn sanitize(&self, row: &mut [String]) {
        if row.len() > CONTRACTOR_TYPE {
            row.swap(AWARD_TYPE, CONTRACTOR_TYPE);
        }

        for &i in QUOTED_COLUMNS {
            if let Some(field) = row.get_mut(i) {
                strip_quotes(field);
            }
        }

        if let Some(name) = row.get_mut(CONTRACTOR) {
            *name = title_case(name);
        }

        if let Some(desc) = row.get_mut(DESCRIPTION) {
            *desc = self.normalizer.normalize(desc);
        }
    }
}

/// Remove every leading and trailing `"` in place.
pub fn strip_quotes(field: &mut String) {
    let stripped = field.trim_matches('"');
    if stripped.len() != field.len() {
        *field = stripped.to_string();
    }
}

/// Title-case a name: a letter starts a word when it opens the string or
/// follows a non-letter (so hyphens and digits separate words). An apostrophe
/// separates when it opens a word (`'Star'`) or follows a one-letter prefix,
/// as in `O'Brien`, so possessives and contractions stay lowercase. All
/// other letters are lowercased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // letters seen since the last word start
    let mut run = 0usize;
    let mut prev: Option<char> = None;

    for c in s.chars() {
        let starts_word = match prev {
            None => true,
            Some('\'') | Some('\u{2019}') => run <= 1,
            Some(p) => !p.is_alphabetic(),
        };

        if c.is_alphabetic() {
            if starts_word {
                out.extend(c.to_uppercase());
                run = 1;
            } else {
                out.extend(c.to_lowercase());
                run += 1;
            }
        } else {
            out.push(c);
            if c != '\'' && c != '\u{2019}' {
                run = 0;
            }
        }
        prev = Some(c);
    }
    out
}
