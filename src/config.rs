use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

/// All 50 states plus DC, PR and VI.
pub static DEFAULT_STATES: &[(&str, &str)] = &[
    ("AK", "Alaska"),
    ("AL", "Alabama"),
    ("AR", "Arkansas"),
    ("AZ", "Arizona"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DC", "District of Columbia"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("IA", "Iowa"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("MA", "Massachusetts"),
    ("MD", "Maryland"),
    ("ME", "Maine"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MO", "Missouri"),
    ("MS", "Mississippi"),
    ("MT", "Montana"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("NE", "Nebraska"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NV", "Nevada"),
    ("NY", "New York"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("PR", "Puerto Rico"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VA", "Virginia"),
    ("VI", "Virgin Islands"),
    ("VT", "Vermont"),
    ("WA", "Washington"),
    ("WI", "Wisconsin"),
    ("WV", "West Virginia"),
    ("WY", "Wyoming"),
];

pub const DEFAULT_ENDPOINT: &str = "https://prod.nais.nasa.gov/cgibin/npdv/usmap05.cgi";
pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const DEFAULT_BASE_FILENAME: &str = "nasa_contracts";
pub const DEFAULT_REFERENCE: &str = "reference/nasa_acronyms.csv";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub output_base_filename: String,
    pub output_dir: PathBuf,
    pub fiscal_years: Vec<i32>,
    pub states: Vec<State>,
    pub endpoint: Url,
    pub reference_path: Option<PathBuf>,
    pub concurrency: usize,
    pub timeout: Duration,
}

impl Config {
    pub fn new(fiscal_years: Vec<i32>) -> Result<Self> {
        Ok(Self {
            output_base_filename: DEFAULT_BASE_FILENAME.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            fiscal_years,
            states: default_states(),
            endpoint: Url::parse(DEFAULT_ENDPOINT).context("parsing default endpoint")?,
            reference_path: Some(PathBuf::from(DEFAULT_REFERENCE)),
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// `<output_dir>/<base>_<fy1>_<fy2>....csv`
    pub fn output_path(&self) -> PathBuf {
        let years = self
            .fiscal_years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join("_");
        self.output_dir
            .join(format!("{}_{}.csv", self.output_base_filename, years))
    }

    /// Create the output directory.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("creating output directory {:?}", &self.output_dir))
    }

    pub fn reference_path(&self) -> Option<&Path> {
        self.reference_path.as_deref()
    }
}

pub fn default_states() -> Vec<State> {
    DEFAULT_STATES
        .iter()
        .map(|(code, name)| State {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect()
}

/// Restrict the default state list to `codes` (case-insensitive), keeping
/// the default order.
pub fn select_states(codes: &[String]) -> Result<Vec<State>> {
    let wanted: Vec<String> = codes.iter().map(|c| c.trim().to_uppercase()).collect();
    for code in &wanted {
        if !DEFAULT_STATES.iter().any(|(c, _)| c == code) {
            bail!("unknown state code {:?}", code);
        }
    }
    Ok(default_states()
        .into_iter()
        .filter(|s| wanted.contains(&s.code))
        .collect())
}
