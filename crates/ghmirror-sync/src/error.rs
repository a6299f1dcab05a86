//! [`ReconcileError`] and its severity classification.

use ghmirror_remote::FetchError;
use ghmirror_store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReconcileError>;

#[derive(Debug, Error, Clone)]
pub enum ReconcileError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("store error: {0}")]
    Store(String),

    #[error("operation canceled")]
    Canceled,
}

impl From<StoreError> for ReconcileError {
    fn from(e: StoreError) -> Self {
        Self::Store(e.to_string())
    }
}

/// The four-level error taxonomy, in descending severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Store unopenable, config invalid, auth proven invalid. Blocking modal.
    Fatal,
    /// Network/timeout/rate-limit/5xx. Status bar, retry offered, `last_sync` untouched.
    Operational,
    /// A single comment page or label parse failure. Collected, logged as a count.
    Soft,
    /// User-initiated cancellation. Silent unless invoked manually.
    Canceled,
}

impl ReconcileError {
    /// Classifies this error per the failure-classification table, deferring
    /// to [`FetchError::is_fatal`]/[`FetchError::is_retryable`] for the
    /// fetch-originated cases.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Fetch(FetchError::Canceled { .. }) => Severity::Canceled,
            Self::Fetch(e) if e.is_fatal() => Severity::Fatal,
            Self::Fetch(e) if e.is_retryable() => Severity::Operational,
            Self::Fetch(_) => Severity::Operational,
            Self::Store(_) => Severity::Fatal,
            Self::Canceled => Severity::Canceled,
        }
    }

    /// Whether the local store remains valid and usable despite this error.
    /// Always true except when the store itself is what failed.
    pub fn store_still_valid(&self) -> bool {
        !matches!(self, Self::Store(_))
    }

    /// A user-facing "what to do next" hint, the third part of the
    /// failure/validity/hint error message shown to the user.
    pub fn next_action_hint(&self) -> &'static str {
        match self {
            Self::Fetch(FetchError::AuthInvalid) => "update your token",
            Self::Fetch(FetchError::AccessDenied) => "update your token",
            Self::Fetch(FetchError::RateLimited { .. }) => "press r to retry once the limit resets",
            Self::Fetch(FetchError::Network(_)) | Self::Fetch(FetchError::RemoteError { .. }) => {
                "press r to retry"
            }
            Self::Fetch(FetchError::Canceled { .. }) | Self::Canceled => "",
            Self::Store(_) => "run ghmirror config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn auth_invalid_is_fatal() {
        assert_eq!(ReconcileError::from(FetchError::AuthInvalid).severity(), Severity::Fatal);
    }

    #[test]
    fn rate_limited_is_operational_and_store_stays_valid() {
        let err = ReconcileError::from(FetchError::RateLimited { reset_at: Utc::now() });
        assert_eq!(err.severity(), Severity::Operational);
        assert!(err.store_still_valid());
    }

    #[test]
    fn store_error_is_fatal_and_invalidates_store() {
        let err: ReconcileError = StoreError::Internal("disk full".into()).into();
        assert_eq!(err.severity(), Severity::Fatal);
        assert!(!err.store_still_valid());
    }
}
