use thiserror::Error;

/// Errors that abort a command. LLM request failures never get here: they
/// are absorbed per record as `Restoration::FellBack`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("dataset error: {0}")]
    Dataset(#[from] crate::dataset::DatasetError),
    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
    #[error("other error: {0}")]
    Other(String),
}
