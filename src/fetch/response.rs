// src/fetch/response.rs

/// 1-based line number of the column header in an export body.
pub const HEADER_LINE: usize = 7;

/// Text the endpoint returns instead of a table for a bad query.
pub const INVALID_ENTRY: &str = "Invalid Entry";

/// A classified export response.
#[derive(Debug, PartialEq, Eq)]
pub enum ExportBody<'a> {
    Invalid,
    Malformed { lines: usize },
    Table {
        header: Vec<String>,
        lines: Vec<&'a str>,
    },
}

impl<'a> ExportBody<'a> {
    pub fn parse(text: &'a str) -> Self {
        if text.contains(INVALID_ENTRY) {
            return ExportBody::Invalid;
        }

        let mut all = text.lines();
        let preamble: Vec<&str> = all.by_ref().take(HEADER_LINE).collect();
        let Some(header) = preamble.get(HEADER_LINE - 1) else {
            return ExportBody::Malformed {
                lines: preamble.len(),
            };
        };
        let header = header.split('\t').map(str::to_string).collect();
        ExportBody::Table {
            header,
            lines: all.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(preamble: usize, header: &str, rows: &[&str]) -> String {
        let mut lines: Vec<String> = (0..preamble).map(|i| format!("preamble {}", i)).collect();
        lines.push(header.to_string());
        lines.extend(rows.iter().map(|r| r.to_string()));
        lines.join("\r\n")
    }

    #[test]
    fn splits_header_and_rows() {
        let text = body(6, "Contractor\tCity", &["a\tb", "c\td"]);
        match ExportBody::parse(&text) {
            ExportBody::Table { header, lines } => {
                assert_eq!(header, vec!["Contractor", "City"]);
                assert_eq!(lines, vec!["a\tb", "c\td"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn header_only_has_no_rows() {
        let text = body(6, "Contractor", &[]);
        assert_eq!(
            ExportBody::parse(&text),
            ExportBody::Table {
                header: vec!["Contractor".to_string()],
                lines: vec![],
            }
        );
    }

    #[test]
    fn short_body_is_malformed() {
        assert_eq!(
            ExportBody::parse("one\ntwo\nthree"),
            ExportBody::Malformed { lines: 3 }
        );
        assert_eq!(ExportBody::parse(""), ExportBody::Malformed { lines: 0 });
    }

    #[test]
    fn invalid_entry_wins() {
        let text = body(6, "Invalid Entry", &["a"]);
        assert_eq!(ExportBody::parse(&text), ExportBody::Invalid);
    }
}
