#[derive(Debug, thiserror::Error)]
pub enum ChorepackError {
    #[error("Storage error: {0}")]
    Storage(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No cards in the collection; add some cards before generating packs")]
    EmptyPool,

    #[error("Not configured: {0}")]
    NotConfigured(String),
}

pub type Result<T> = std::result::Result<T, ChorepackError>;
