//! [`Engine`] -- the Reconciliation Engine: converts a user or auto-refresh
//! command into a store state transition consistent with the domain
//! model's invariants, with bounded-parallel comment prefetch and
//! cancellation.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ghmirror_core::{Comment, RepoRef};
use ghmirror_remote::{CancelToken, Fetcher};
use ghmirror_store::Store;
use tracing::info;

use crate::error::{ReconcileError, Result};
use crate::progress::SyncProgress;
use crate::workers::{self, WorkerError, DEFAULT_COMMENT_WORKERS};

/// Orchestrates reconciliation between one repository's remote issue set
/// and its local mirror.
pub struct Engine {
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn Store>,
    repo: RepoRef,
    comment_workers: usize,
}

impl Engine {
    pub fn new(fetcher: Arc<dyn Fetcher>, store: Arc<dyn Store>, repo: RepoRef) -> Self {
        Self {
            fetcher,
            store,
            repo,
            comment_workers: DEFAULT_COMMENT_WORKERS,
        }
    }

    pub fn with_comment_workers(mut self, workers: usize) -> Self {
        self.comment_workers = workers;
        self
    }

    /// Enumerates every open issue, upserts each, and set-difference-deletes
    /// any local issue absent from the fetched set.
    pub fn full_sync(
        &self,
        progress: &dyn Fn(SyncProgress),
        cancel: &CancelToken,
    ) -> Result<()> {
        self.fetcher.validate_credentials(&self.repo)?;
        if cancel.is_canceled() {
            return Err(ReconcileError::Canceled);
        }

        let start = Utc::now();
        let fetched = self.fetcher.fetch_open_issues(
            &self.repo,
            &|p| progress(SyncProgress::issues(p.items_fetched, None)),
            cancel,
        )?;

        if cancel.is_canceled() {
            return Err(ReconcileError::Canceled);
        }

        let mut fetched_numbers = HashSet::with_capacity(fetched.len());
        for (i, issue) in fetched.iter().enumerate() {
            if cancel.is_canceled() {
                return Err(ReconcileError::Canceled);
            }
            self.store.upsert_issue(issue)?;
            fetched_numbers.insert(issue.number);
            progress(SyncProgress::issues(i + 1, Some(fetched.len())));
        }

        if cancel.is_canceled() {
            return Err(ReconcileError::Canceled);
        }

        let current = self.store.current_issue_numbers()?;
        let stale: Vec<u64> = current
            .into_iter()
            .filter(|n| !fetched_numbers.contains(n))
            .collect();
        if !stale.is_empty() {
            self.store.delete_issues(&stale)?;
        }

        if cancel.is_canceled() {
            return Err(ReconcileError::Canceled);
        }

        self.store.set_last_sync(start)?;
        info!(fetched = fetched_numbers.len(), deleted = stale.len(), "full sync complete");
        Ok(())
    }

    /// Fetches issues updated since `last_sync`; upserts open ones, deletes
    /// non-open ones. Never performs set-difference deletion. Falls back to
    /// [`Engine::full_sync`] when `last_sync` is the zero instant, since
    /// there is nothing to diff against yet.
    pub fn incremental_refresh(
        &self,
        progress: &dyn Fn(SyncProgress),
        cancel: &CancelToken,
    ) -> Result<()> {
        let last_sync = self.store.get_last_sync()?;
        if last_sync == DateTime::<Utc>::UNIX_EPOCH {
            return self.full_sync(progress, cancel);
        }

        self.fetcher.validate_credentials(&self.repo)?;
        if cancel.is_canceled() {
            return Err(ReconcileError::Canceled);
        }

        let start = Utc::now();
        let fetched = self.fetcher.fetch_open_issues_since(
            &self.repo,
            last_sync,
            &|p| progress(SyncProgress::issues(p.items_fetched, None)),
            cancel,
        )?;

        if cancel.is_canceled() {
            return Err(ReconcileError::Canceled);
        }

        let mut upserted = 0usize;
        let mut deleted = Vec::new();
        for (i, issue) in fetched.iter().enumerate() {
            if cancel.is_canceled() {
                return Err(ReconcileError::Canceled);
            }
            if issue.is_open() {
                self.store.upsert_issue(issue)?;
                upserted += 1;
            } else {
                deleted.push(issue.number);
            }
            progress(SyncProgress::issues(i + 1, Some(fetched.len())));
        }
        if !deleted.is_empty() {
            self.store.delete_issues(&deleted)?;
        }

        if cancel.is_canceled() {
            return Err(ReconcileError::Canceled);
        }

        self.store.set_last_sync(start)?;
        info!(upserted, deleted = deleted.len(), "incremental refresh complete");
        Ok(())
    }

    /// The current issue snapshot, engine-default sorted. Used to refresh
    /// the view model after a sync.
    pub fn current_issues(&self) -> Result<Vec<ghmirror_core::Issue>> {
        Ok(self.store.load_issue_list()?)
    }

    /// Fetches and persists every comment for one issue (drill-down
    /// refresh), returning the fresh list.
    pub fn load_comments_for(&self, number: u64, cancel: &CancelToken) -> Result<Vec<Comment>> {
        let comments = self.fetcher.fetch_comments(&self.repo, number, cancel)?;
        self.store.replace_comments_for_issue(number, &comments)?;
        Ok(comments)
    }

    /// Bulk comment prefetch: a bounded worker pool of N workers consumes
    /// issue numbers from a buffered channel. Non-fatal per-issue failures
    /// are returned rather than aborting the whole prefetch.
    pub fn prefetch_all_comments(
        &self,
        progress: &dyn Fn(SyncProgress),
        cancel: &CancelToken,
    ) -> Result<Vec<WorkerError>> {
        let numbers = self.store.current_issue_numbers()?;
        let total = numbers.len();
        let errors = workers::prefetch_comments(
            Arc::clone(&self.fetcher),
            Arc::clone(&self.store),
            self.repo.clone(),
            numbers,
            self.comment_workers,
            cancel,
            |done| progress(SyncProgress::comments(done, Some(total))),
        );
        Ok(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghmirror_core::{Issue, IssueState};
    use ghmirror_remote::FetchError;
    use ghmirror_store::SqliteStore;
    use std::sync::Mutex;

    struct MockFetcher {
        issues: Vec<Issue>,
        since_issues: Vec<Issue>,
        fail: Option<FetchError>,
        fail_validate: Option<FetchError>,
    }

    impl Fetcher for MockFetcher {
        fn validate_credentials(&self, _repo: &RepoRef) -> ghmirror_remote::Result<()> {
            match &self.fail_validate {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }

        fn fetch_open_issues(
            &self,
            _repo: &RepoRef,
            _progress: &dyn Fn(ghmirror_remote::FetchProgress),
            _cancel: &CancelToken,
        ) -> ghmirror_remote::Result<Vec<Issue>> {
            if let Some(e) = &self.fail {
                return Err(e.clone());
            }
            Ok(self.issues.clone())
        }

        fn fetch_open_issues_since(
            &self,
            _repo: &RepoRef,
            _since: DateTime<Utc>,
            _progress: &dyn Fn(ghmirror_remote::FetchProgress),
            _cancel: &CancelToken,
        ) -> ghmirror_remote::Result<Vec<Issue>> {
            if let Some(e) = &self.fail {
                return Err(e.clone());
            }
            Ok(self.since_issues.clone())
        }

        fn fetch_comments(
            &self,
            _repo: &RepoRef,
            _number: u64,
            _cancel: &CancelToken,
        ) -> ghmirror_remote::Result<Vec<Comment>> {
            Ok(Vec::new())
        }
    }

    fn issue(number: u64, state: IssueState) -> Issue {
        Issue {
            number,
            title: format!("issue {number}"),
            body: String::new(),
            author_login: "octocat".into(),
            state,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            comment_count: 0,
            labels: vec![],
            assignees: vec![],
            html_url: String::new(),
        }
    }

    fn engine(mock: MockFetcher) -> (Engine, Arc<dyn Store>) {
        let store: Arc<dyn Store> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let engine = Engine::new(Arc::new(mock), Arc::clone(&store), RepoRef::new("o", "r"));
        (engine, store)
    }

    #[test]
    fn full_sync_matches_remote_set_exactly() {
        let mock = MockFetcher {
            issues: vec![issue(1, IssueState::Open), issue(2, IssueState::Open), issue(7, IssueState::Open)],
            since_issues: vec![],
            fail: None,
            fail_validate: None,
        };
        let (engine, store) = engine(mock);
        engine.full_sync(&|_| {}, &CancelToken::new()).unwrap();

        let mut numbers = store.current_issue_numbers().unwrap();
        numbers.sort();
        assert_eq!(numbers, vec![1, 2, 7]);
        assert_ne!(store.get_last_sync().unwrap(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn full_sync_deletes_issues_absent_from_remote() {
        let store: Arc<dyn Store> = Arc::new(SqliteStore::open_in_memory().unwrap());
        store.upsert_issue(&issue(99, IssueState::Open)).unwrap();
        let mock = MockFetcher {
            issues: vec![issue(1, IssueState::Open)],
            since_issues: vec![],
            fail: None,
            fail_validate: None,
        };
        let engine = Engine::new(Arc::new(mock), Arc::clone(&store), RepoRef::new("o", "r"));
        engine.full_sync(&|_| {}, &CancelToken::new()).unwrap();
        assert_eq!(store.current_issue_numbers().unwrap(), vec![1]);
    }

    #[test]
    fn incremental_refresh_deletes_closed_issues() {
        let store: Arc<dyn Store> = Arc::new(SqliteStore::open_in_memory().unwrap());
        for n in [1, 2, 7] {
            store.upsert_issue(&issue(n, IssueState::Open)).unwrap();
        }
        let t0 = Utc::now() - chrono::Duration::hours(1);
        store.set_last_sync(t0).unwrap();

        let mock = MockFetcher {
            issues: vec![],
            since_issues: vec![issue(2, IssueState::Open), issue(7, IssueState::Closed)],
            fail: None,
            fail_validate: None,
        };
        let engine = Engine::new(Arc::new(mock), Arc::clone(&store), RepoRef::new("o", "r"));
        engine.incremental_refresh(&|_| {}, &CancelToken::new()).unwrap();

        let mut numbers = store.current_issue_numbers().unwrap();
        numbers.sort();
        assert_eq!(numbers, vec![1, 2]);
        assert!(store.get_last_sync().unwrap() > t0);
    }

    #[test]
    fn incremental_refresh_falls_back_to_full_sync_on_zero_last_sync() {
        let mock = MockFetcher {
            issues: vec![issue(5, IssueState::Open)],
            since_issues: vec![],
            fail: None,
            fail_validate: None,
        };
        let (engine, store) = engine(mock);
        assert_eq!(store.get_last_sync().unwrap(), DateTime::<Utc>::UNIX_EPOCH);
        engine.incremental_refresh(&|_| {}, &CancelToken::new()).unwrap();
        assert_eq!(store.current_issue_numbers().unwrap(), vec![5]);
    }

    #[test]
    fn failed_sync_does_not_advance_last_sync() {
        let mock = MockFetcher {
            issues: vec![],
            since_issues: vec![],
            fail: Some(FetchError::RateLimited { reset_at: Utc::now() }),
            fail_validate: None,
        };
        let (engine, store) = engine(mock);
        let before = store.get_last_sync().unwrap();
        let result = engine.full_sync(&|_| {}, &CancelToken::new());
        assert!(result.is_err());
        assert_eq!(store.get_last_sync().unwrap(), before);
    }

    #[test]
    fn cancel_before_apply_leaves_last_sync_untouched() {
        let mock = MockFetcher {
            issues: vec![issue(1, IssueState::Open)],
            since_issues: vec![],
            fail: None,
            fail_validate: None,
        };
        let (engine, store) = engine(mock);
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = engine.full_sync(&|_| {}, &cancel);
        assert!(matches!(result, Err(ReconcileError::Canceled)));
        assert_eq!(store.get_last_sync().unwrap(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn auth_failure_on_validate_leaves_store_untouched() {
        let mock = MockFetcher {
            issues: vec![issue(1, IssueState::Open)],
            since_issues: vec![],
            fail: None,
            fail_validate: Some(FetchError::AuthInvalid),
        };
        let (engine, store) = engine(mock);
        let result = engine.full_sync(&|_| {}, &CancelToken::new());
        assert!(matches!(result, Err(ReconcileError::Fetch(FetchError::AuthInvalid))));
        assert!(store.current_issue_numbers().unwrap().is_empty());
        assert_eq!(store.get_last_sync().unwrap(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn load_comments_for_replaces_wholesale() {
        let mock = MockFetcher {
            issues: vec![],
            since_issues: vec![],
            fail: None,
            fail_validate: None,
        };
        let (engine, store) = engine(mock);
        store.upsert_issue(&issue(1, IssueState::Open)).unwrap();
        let comments = engine.load_comments_for(1, &CancelToken::new()).unwrap();
        assert!(comments.is_empty());
        assert!(store.load_comments(1).unwrap().is_empty());
    }

    #[test]
    fn prefetch_all_comments_covers_every_current_issue() {
        let mock = MockFetcher {
            issues: vec![],
            since_issues: vec![],
            fail: None,
            fail_validate: None,
        };
        let (engine, store) = engine(mock);
        for n in [1, 2, 3] {
            store.upsert_issue(&issue(n, IssueState::Open)).unwrap();
        }
        let seen = Mutex::new(Vec::new());
        let errors = engine
            .prefetch_all_comments(&|p| seen.lock().unwrap().push(p.current), &CancelToken::new())
            .unwrap();
        assert!(errors.is_empty());
        assert_eq!(*seen.lock().unwrap().last().unwrap(), 3);
    }
}
