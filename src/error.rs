//! Error taxonomy for the ranking pipeline.

use thiserror::Error;

/// Failures that abort a ranking run.
///
/// Every pipeline stage is a deterministic transform over data that is
/// already on disk, so none of these are retried.
#[derive(Debug, Error)]
pub enum RankError {
    /// A required column is missing or a cell could not be parsed as a
    /// non-negative number.
    #[error("malformed source {source_name}: {detail}")]
    MalformedSource { source_name: String, detail: String },

    /// Not enough rows to survive warm-up removal.
    #[error("variant '{variant}' has {rows} row(s); at least 2 are required")]
    EmptyDataset { variant: String, rows: usize },

    /// A source was supplied for a variant the configuration does not define.
    #[error("unknown variant '{0}'")]
    UnknownVariant(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("variant task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl RankError {
    pub(crate) fn malformed(source_name: &str, detail: impl Into<String>) -> Self {
        RankError::MalformedSource {
            source_name: source_name.to_string(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RankError>;
