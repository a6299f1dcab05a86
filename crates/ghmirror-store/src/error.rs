//! Error type for the local mirror store.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database: {0}")]
    Open(String),

    #[error("database connection error: {0}")]
    Connection(String),

    #[error("transaction failed: {0}")]
    Transaction(String),

    #[error("schema migration {name} failed: {reason}")]
    Migration { name: String, reason: String },

    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("internal error: {0}")]
    Internal(String),
}
