use thiserror::Error;

pub type RfmResult<T> = Result<T, RfmError>;

/// Error taxonomy for the segmentation pipeline. Every variant is fatal to
/// the run: quartile scores are population-relative, so a partially scored
/// population is meaningless.
#[derive(Error, Debug)]
pub enum RfmError {
    #[error("Empty population: no customers after aggregation")]
    EmptyPopulation,

    #[error("Quartile binning failed for {metric}: {detail}")]
    Binning { metric: &'static str, detail: String },

    #[error("Malformed transaction record: {0}")]
    MalformedRecord(String),

    #[error("Ingestion error: {0}")]
    Ingestion(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
