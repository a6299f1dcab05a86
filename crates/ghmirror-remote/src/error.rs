//! Failure classification for the remote fetcher.

use chrono::{DateTime, Utc};
use ghmirror_core::Issue;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Error, Clone)]
pub enum FetchError {
    #[error("credentials were rejected")]
    AuthInvalid,

    #[error("rate limited until {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    #[error("access denied")]
    AccessDenied,

    #[error("network error: {0}")]
    Network(String),

    #[error("remote returned {status}: {body_excerpt}")]
    RemoteError { status: u16, body_excerpt: String },

    /// The cancel signal fired between pages. `partial` carries whatever
    /// issues were already fetched, since abandoning them would contradict
    /// the fetcher's "return the partial list" contract.
    #[error("operation canceled")]
    Canceled { partial: Vec<Issue> },
}

impl FetchError {
    /// Whether the engine should offer an automatic retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Network(_) | Self::RemoteError { .. }
        )
    }

    /// Whether this failure is fatal: the store must not be touched and
    /// the user sees a blocking error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::AuthInvalid | Self::AccessDenied)
    }
}
