use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Unsupported database connection scheme [{0}]")]
    UnsupportedBackend(String),
    #[error("Invalid table name [{0}]")]
    InvalidTableName(String)
}
