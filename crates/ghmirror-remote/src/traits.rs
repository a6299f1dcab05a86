//! The [`Fetcher`] trait: the Remote Fetcher's public contract, decoupled
//! from `ureq` so the reconciliation engine can be driven by a mock in
//! tests.

use ghmirror_core::{Comment, Issue, RepoRef};

use crate::cancel::CancelToken;
use crate::error::Result;

/// Progress reported during a paginated fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchProgress {
    pub pages_fetched: usize,
    pub items_fetched: usize,
}

pub trait Fetcher: Send + Sync {
    /// A cheap authenticated probe. `Ok(())` means the credential is good.
    fn validate_credentials(&self, repo: &RepoRef) -> Result<()>;

    /// Full paginated enumeration of open issues, 100 per page, in the
    /// remote's default order.
    fn fetch_open_issues(
        &self,
        repo: &RepoRef,
        progress: &dyn Fn(FetchProgress),
        cancel: &CancelToken,
    ) -> Result<Vec<Issue>>;

    /// Same as [`Fetcher::fetch_open_issues`] with a `since` filter; may
    /// include issues whose state is now closed.
    fn fetch_open_issues_since(
        &self,
        repo: &RepoRef,
        since: chrono::DateTime<chrono::Utc>,
        progress: &dyn Fn(FetchProgress),
        cancel: &CancelToken,
    ) -> Result<Vec<Issue>>;

    /// Paginated comments for one issue.
    fn fetch_comments(
        &self,
        repo: &RepoRef,
        number: u64,
        cancel: &CancelToken,
    ) -> Result<Vec<Comment>>;
}
