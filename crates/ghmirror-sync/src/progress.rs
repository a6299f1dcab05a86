//! Progress reporting for one reconciliation run, driving the refresh
//! overlay: `current` is monotonic within a run.

/// Which half of a reconciliation is currently executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Issues,
    Comments,
}

/// One progress update, passed to the engine's `progress` callback.
///
/// `total` is `None` until it can be determined -- GitHub's issues endpoint
/// doesn't report a total count up front, so the fetcher only learns it
/// once the `rel="last"` link reveals the page count on the first page.
#[derive(Debug, Clone, Copy)]
pub struct SyncProgress {
    pub phase: Phase,
    pub current: usize,
    pub total: Option<usize>,
}

impl SyncProgress {
    pub fn issues(current: usize, total: Option<usize>) -> Self {
        Self { phase: Phase::Issues, current, total }
    }

    pub fn comments(current: usize, total: Option<usize>) -> Self {
        Self { phase: Phase::Comments, current, total }
    }
}
