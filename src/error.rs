use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Ambiguous section: more than one heading reads '{0}'")]
    AmbiguousSection(String),
    #[error("Section '{0}' has a heading but no table")]
    MissingTable(String),
    #[error("Malformed statistics in '{section}': {detail}")]
    MalformedStatistics { section: String, detail: String },
    #[error("Malformed roster row: {0}")]
    MalformedRosterRow(String),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
