use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs::File, path::Path};
use tracing::{debug, info, instrument};

use super::phrases::PhraseTable;

/// One row of the acronym reference table. Either column may be missing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AcronymEntry {
    #[serde(rename = "Acronym", default)]
    pub acronym: Option<String>,
    #[serde(rename = "Definition", default)]
    pub definition: Option<String>,
}

impl AcronymEntry {
    pub fn new(acronym: &str, definition: &str) -> Self {
        Self {
            acronym: Some(acronym.to_string()),
            definition: Some(definition.to_string()),
        }
    }

    /// The lookup pairs this entry contributes: the acronym maps to its
    /// uppercase form, the definition to itself as written.
    fn pairs(&self) -> impl Iterator<Item = (String, String)> + '_ {
        let acronym = self
            .acronym
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(|a| (a.to_string(), a.to_uppercase()));
        let definition = self
            .definition
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| (d.to_string(), d.to_string()));
        acronym.into_iter().chain(definition)
    }
}

/// Rewrites known acronyms and their expansions to canonical capitalization.
#[derive(Debug, Clone, Default)]
pub struct AcronymNormalizer {
    table: PhraseTable,
}

impl AcronymNormalizer {
    /// Build from reference entries; later entries win on key collisions.
    pub fn load<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a AcronymEntry>,
    {
        let table = PhraseTable::build(entries.into_iter().flat_map(AcronymEntry::pairs))?;
        debug!(keys = table.len(), "built acronym table");
        Ok(Self { table })
    }

    /// Read a reference CSV with `Acronym` and `Definition` header columns.
    #[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("opening acronym reference {}", path.display()))?;
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let mut entries = Vec::new();
        for (idx, record) in rdr.deserialize::<AcronymEntry>().enumerate() {
            let entry = record
                .with_context(|| format!("parsing {} at record {}", path.display(), idx))?;
            entries.push(entry);
        }

        let normalizer = Self::load(&entries)?;
        info!(
            entries = entries.len(),
            keys = normalizer.len(),
            "loaded acronym reference"
        );
        Ok(normalizer)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn normalize(&self, text: &str) -> String {
        self.table.replace_all(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn acronyms_uppercase_and_definitions_keep_their_form() {
        let entries = vec![
            AcronymEntry::new("jsc", "Johnson Space Center"),
            AcronymEntry::new("ISS", "International Space Station"),
        ];
        let n = AcronymNormalizer::load(&entries).unwrap();
        assert_eq!(n.len(), 4);
        assert_eq!(
            n.normalize("Support for jsc and the international space station"),
            "Support for JSC and the International Space Station"
        );
    }

    #[test]
    fn missing_fields_contribute_nothing() {
        let entries = vec![
            AcronymEntry {
                acronym: Some("KSC".into()),
                definition: None,
            },
            AcronymEntry {
                acronym: Some("  ".into()),
                definition: Some("Marshall Space Flight Center".into()),
            },
        ];
        let n = AcronymNormalizer::load(&entries).unwrap();
        assert_eq!(n.len(), 2);
        assert_eq!(
            n.normalize("ksc and marshall space flight center"),
            "KSC and Marshall Space Flight Center"
        );
    }

    #[test]
    fn no_entries_is_identity() {
        let n = AcronymNormalizer::load(&Vec::<AcronymEntry>::new()).unwrap();
        assert!(n.is_empty());
        assert_eq!(n.normalize("Mixed CASE text"), "Mixed CASE text");
    }

    #[test]
    fn loads_reference_csv() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "Acronym,Definition,Notes")?;
        writeln!(file, "SLS,Space Launch System,rocket")?;
        writeln!(file, "\" gsfc \",Goddard Space Flight Center,")?;
        writeln!(file, ",Deep Space Network,")?;
        file.flush()?;

        let n = AcronymNormalizer::from_csv_path(file.path())?;
        assert_eq!(n.len(), 5);
        assert_eq!(
            n.normalize("Sls work at gsfc for the deep space network"),
            "SLS work at GSFC for the Deep Space Network"
        );
        Ok(())
    }

    #[test]
    fn reference_without_definition_column() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "Acronym")?;
        writeln!(file, "jpl")?;
        file.flush()?;

        let n = AcronymNormalizer::from_csv_path(file.path())?;
        assert_eq!(n.normalize("jpl"), "JPL");
        Ok(())
    }

    #[test]
    fn missing_reference_file_is_an_error() {
        let err = AcronymNormalizer::from_csv_path("does/not/exist.csv").unwrap_err();
        assert!(err.to_string().contains("opening acronym reference"));
    }
}
