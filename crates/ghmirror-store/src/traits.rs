//! The [`Store`] trait: the Local Mirror Store's public contract,
//! decoupled from the SQLite implementation so the reconciliation engine
//! and view model depend on an interface, not a concrete backend.

use chrono::{DateTime, Utc};
use ghmirror_core::{Comment, Issue};

use crate::error::Result;

/// Durable, ACID-like persistence for a single repository's open issues.
pub trait Store: Send + Sync {
    /// Atomically inserts-or-replaces the issue row, then replaces its
    /// labels and assignees wholesale. Runs in one transaction.
    fn upsert_issue(&self, issue: &Issue) -> Result<()>;

    /// Inserts-or-replaces a comment by id.
    fn upsert_comment(&self, comment: &Comment) -> Result<()>;

    /// Deletes all comments for `issue_number`, then inserts `comments`, in
    /// one transaction. The canonical drill-down refresh operation.
    fn replace_comments_for_issue(&self, issue_number: u64, comments: &[Comment]) -> Result<()>;

    /// Ordered issue snapshots; engine-default sort is `updated_at` descending.
    fn load_issue_list(&self) -> Result<Vec<Issue>>;

    /// Chronological (`created_at` ascending) comments for one issue.
    fn load_comments(&self, issue_number: u64) -> Result<Vec<Comment>>;

    /// The set of issue numbers presently in the store.
    fn current_issue_numbers(&self) -> Result<Vec<u64>>;

    /// Transactional batch delete; cascades to labels/assignees/comments.
    fn delete_issues(&self, numbers: &[u64]) -> Result<()>;

    /// Reads `last_sync`. A missing record returns the zero instant.
    fn get_last_sync(&self) -> Result<DateTime<Utc>>;

    /// Writes `last_sync`.
    fn set_last_sync(&self, t: DateTime<Utc>) -> Result<()>;
}
