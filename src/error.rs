use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Snapshot error: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing to classify: the snapshot (or the section selection) is empty.
    #[error("no sections available to classify")]
    NoSections,
}
