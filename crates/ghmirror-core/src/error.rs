//! Error type for core-level parsing failures (currently just `RepoRef`).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid repository reference {input:?}: expected \"owner/repo\"")]
    InvalidRepoRef { input: String },
}
