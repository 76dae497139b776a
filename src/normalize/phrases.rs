use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

/// Reference tables can hold thousands of phrases; the default regex size
/// limit is too small for a single alternation over all of them.
const PATTERN_SIZE_LIMIT: usize = 256 * (1 << 20);

/// A case-insensitive phrase → canonical-form table, matched as whole
/// phrases (never adjacent to an ASCII letter or digit) with the longest
/// phrase winning at any position.
#[derive(Debug, Clone, Default)]
pub struct PhraseTable {
    mapping: HashMap<String, String>,
    pattern: Option<Regex>,
}

impl PhraseTable {
    /// Build from `(phrase, canonical)` pairs. Later pairs win when two
    /// phrases collide after lowercasing.
    pub fn build<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut mapping = HashMap::new();
        for (phrase, canonical) in pairs {
            let key = phrase.as_ref().to_lowercase();
            if key.is_empty() {
                continue;
            }
            mapping.insert(key, canonical.into());
        }

        if mapping.is_empty() {
            return Ok(Self::default());
        }

        // longest first so the alternation prefers multi-word phrases
        let mut keys: Vec<&String> = mapping.keys().collect();
        keys.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        let alternation = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");

        // The regex crate has no lookaround: the trailing boundary char is
        // consumed and the leading one is checked in `replace_all`.
        let source = format!(r"((?i:{}))(?:$|[^A-Za-z0-9])", alternation);
        let pattern = RegexBuilder::new(&source)
            .size_limit(PATTERN_SIZE_LIMIT)
            .dfa_size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .with_context(|| format!("compiling phrase pattern over {} keys", mapping.len()))?;

        Ok(Self {
            mapping,
            pattern: Some(pattern),
        })
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Canonical form for `phrase`, looked up case-insensitively.
    pub fn canonical(&self, phrase: &str) -> Option<&str> {
        self.mapping.get(&phrase.to_lowercase()).map(String::as_str)
    }

    /// Rewrite every recognized phrase in `text` to its canonical form.
    pub fn replace_all(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };

        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut pos = 0;
        while pos <= text.len() {
            let Some(caps) = pattern.captures_at(text, pos) else {
                break;
            };
            let Some(phrase) = caps.get(1) else {
                break;
            };
            if follows_alphanumeric(text, phrase.start()) {
                // no phrase may start here; retry from the next char
                let step = text[phrase.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                pos = phrase.start() + step;
                continue;
            }
            out.push_str(&text[copied..phrase.start()]);
            let matched = phrase.as_str();
            out.push_str(self.canonical(matched).unwrap_or(matched));
            copied = phrase.end();
            pos = phrase.end();
        }
        out.push_str(&text[copied..]);
        out
    }
}

fn follows_alphanumeric(text: &str, at: usize) -> bool {
    text[..at]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric())
}
