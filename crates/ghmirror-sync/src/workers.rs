//! Bounded worker pool for comment prefetch: workers consuming from one
//! channel and reporting to another, shut down by closing the work channel.

use std::sync::Arc;

use crossbeam_channel::{bounded, Sender};
use ghmirror_core::RepoRef;
use ghmirror_remote::{CancelToken, Fetcher};
use ghmirror_store::Store;
use tracing::{debug, warn};

/// Default worker count for the bulk comment-prefetch pool.
pub const DEFAULT_COMMENT_WORKERS: usize = 5;

/// A non-fatal failure to prefetch comments for one issue, collected on the
/// pool's error side-channel and reported as a soft-error count.
#[derive(Debug, Clone)]
pub struct WorkerError {
    pub issue_number: u64,
    pub message: String,
}

/// Runs the bounded comment-prefetch pool over `issue_numbers`, replacing
/// each issue's comments wholesale via [`Store::replace_comments_for_issue`].
///
/// Shuts down deterministically: the work channel is populated then
/// dropped/closed, every worker drains it and exits, and this function
/// waits for all of them before returning: the pool shuts down
/// deterministically by closing the work channel, and the engine waits
/// for workers before reporting completion.
pub fn prefetch_comments(
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn Store>,
    repo: RepoRef,
    issue_numbers: Vec<u64>,
    worker_count: usize,
    cancel: &CancelToken,
    mut on_progress: impl FnMut(usize),
) -> Vec<WorkerError> {
    let total = issue_numbers.len();
    let (work_tx, work_rx) = bounded::<u64>(total.max(1));
    // One message per completed item, success or failure, so the receive
    // loop below can drive incremental progress on the common all-Ok path
    // instead of only hearing from workers that hit an error.
    let (done_tx, done_rx) = bounded::<Option<WorkerError>>(total.max(1));

    for number in issue_numbers {
        // Channel is sized to hold every item, so this never blocks.
        let _ = work_tx.send(number);
    }
    drop(work_tx);

    std::thread::scope(|scope| {
        for worker_id in 0..worker_count.max(1) {
            let work_rx = work_rx.clone();
            let done_tx: Sender<Option<WorkerError>> = done_tx.clone();
            let fetcher = Arc::clone(&fetcher);
            let store = Arc::clone(&store);
            let repo = repo.clone();
            let cancel = cancel.clone();
            scope.spawn(move || {
                for number in work_rx.iter() {
                    if cancel.is_canceled() {
                        debug!(worker_id, "comment worker exiting on cancel");
                        break;
                    }
                    let outcome = match fetcher.fetch_comments(&repo, number, &cancel) {
                        Ok(comments) => match store.replace_comments_for_issue(number, &comments) {
                            Ok(()) => None,
                            Err(e) => {
                                warn!(number, error = %e, "failed to persist prefetched comments");
                                Some(WorkerError { issue_number: number, message: e.to_string() })
                            }
                        },
                        Err(e) => {
                            warn!(number, error = %e, "failed to prefetch comments");
                            Some(WorkerError { issue_number: number, message: e.to_string() })
                        }
                    };
                    let _ = done_tx.send(outcome);
                }
            });
        }
        drop(done_tx);

        let mut errors = Vec::new();
        let mut completed = 0usize;
        // The channel closes only once every worker (each holding a clone of
        // done_tx) has exited, which happens only after work_rx is drained --
        // so iterating it to exhaustion doubles as the join.
        for outcome in done_rx.iter() {
            completed += 1;
            on_progress(completed);
            if let Some(err) = outcome {
                errors.push(err);
            }
        }
        errors
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghmirror_core::{Comment, Issue};
    use ghmirror_remote::FetchError;
    use ghmirror_store::SqliteStore;
    use std::sync::Mutex;

    struct StubFetcher {
        fail_for: Vec<u64>,
    }

    impl Fetcher for StubFetcher {
        fn validate_credentials(&self, _repo: &RepoRef) -> ghmirror_remote::Result<()> {
            Ok(())
        }
        fn fetch_open_issues(
            &self,
            _repo: &RepoRef,
            _progress: &dyn Fn(ghmirror_remote::FetchProgress),
            _cancel: &CancelToken,
        ) -> ghmirror_remote::Result<Vec<Issue>> {
            Ok(Vec::new())
        }
        fn fetch_open_issues_since(
            &self,
            _repo: &RepoRef,
            _since: chrono::DateTime<chrono::Utc>,
            _progress: &dyn Fn(ghmirror_remote::FetchProgress),
            _cancel: &CancelToken,
        ) -> ghmirror_remote::Result<Vec<Issue>> {
            Ok(Vec::new())
        }
        fn fetch_comments(
            &self,
            _repo: &RepoRef,
            number: u64,
            _cancel: &CancelToken,
        ) -> ghmirror_remote::Result<Vec<Comment>> {
            if self.fail_for.contains(&number) {
                return Err(FetchError::Network("boom".into()));
            }
            Ok(vec![Comment {
                id: number * 10,
                issue_number: number,
                body: "hi".into(),
                author_login: "octocat".into(),
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            }])
        }
    }

    fn sample_issue(number: u64) -> Issue {
        Issue {
            number,
            title: "t".into(),
            body: "b".into(),
            author_login: "o".into(),
            state: ghmirror_core::IssueState::Open,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            comment_count: 1,
            labels: vec![],
            assignees: vec![],
            html_url: String::new(),
        }
    }

    #[test]
    fn prefetches_comments_for_every_issue() {
        let store: Arc<dyn Store> = Arc::new(SqliteStore::open_in_memory().unwrap());
        for n in 1..=5 {
            store.upsert_issue(&sample_issue(n)).unwrap();
        }
        let fetcher: Arc<dyn Fetcher> = Arc::new(StubFetcher { fail_for: vec![] });
        let cancel = CancelToken::new();
        let progressed = Mutex::new(0usize);

        let errors = prefetch_comments(
            fetcher,
            Arc::clone(&store),
            RepoRef::new("o", "r"),
            vec![1, 2, 3, 4, 5],
            DEFAULT_COMMENT_WORKERS,
            &cancel,
            |n| *progressed.lock().unwrap() = n,
        );

        assert!(errors.is_empty());
        for n in 1..=5 {
            assert_eq!(store.load_comments(n).unwrap().len(), 1);
        }
        assert_eq!(*progressed.lock().unwrap(), 5);
    }

    #[test]
    fn collects_per_issue_failures_as_soft_errors() {
        let store: Arc<dyn Store> = Arc::new(SqliteStore::open_in_memory().unwrap());
        for n in 1..=3 {
            store.upsert_issue(&sample_issue(n)).unwrap();
        }
        let fetcher: Arc<dyn Fetcher> = Arc::new(StubFetcher { fail_for: vec![2] });
        let cancel = CancelToken::new();

        let errors = prefetch_comments(
            fetcher,
            Arc::clone(&store),
            RepoRef::new("o", "r"),
            vec![1, 2, 3],
            2,
            &cancel,
            |_| {},
        );

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].issue_number, 2);
        assert_eq!(store.load_comments(1).unwrap().len(), 1);
        assert!(store.load_comments(2).unwrap().is_empty());
    }
}
