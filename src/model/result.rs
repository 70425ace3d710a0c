use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date `{value}` for {name} (expected format `{format}`)")]
    InvalidDate {
        name: String,
        value: String,
        format: String,
    },

    #[error("Column(s) not found in CSV header: {}", .0.join(", "))]
    MissingColumn(Vec<String>),

    #[error("Failed to read CSV `{path}`: {source}")]
    Csv {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Progress style error: {0}")]
    ProgressStyle(#[from] indicatif::style::TemplateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
