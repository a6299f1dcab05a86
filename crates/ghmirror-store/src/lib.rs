//! The Local Mirror Store: durable persistence for one repository's open
//! issues, with a schema encoding the domain model's invariants.

pub mod error;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use sqlite::SqliteStore;
pub use traits::Store;

use chrono::{DateTime, Utc};
use ghmirror_core::{Comment, Issue};

impl Store for SqliteStore {
    fn upsert_issue(&self, issue: &Issue) -> Result<()> {
        self.upsert_issue_impl(issue)
    }

    fn upsert_comment(&self, comment: &Comment) -> Result<()> {
        self.upsert_comment_impl(comment)
    }

    fn replace_comments_for_issue(&self, issue_number: u64, comments: &[Comment]) -> Result<()> {
        self.replace_comments_for_issue_impl(issue_number, comments)
    }

    fn load_issue_list(&self) -> Result<Vec<Issue>> {
        self.load_issue_list_impl()
    }

    fn load_comments(&self, issue_number: u64) -> Result<Vec<Comment>> {
        self.load_comments_impl(issue_number)
    }

    fn current_issue_numbers(&self) -> Result<Vec<u64>> {
        self.current_issue_numbers_impl()
    }

    fn delete_issues(&self, numbers: &[u64]) -> Result<()> {
        self.delete_issues_impl(numbers)
    }

    fn get_last_sync(&self) -> Result<DateTime<Utc>> {
        self.get_last_sync_impl()
    }

    fn set_last_sync(&self, t: DateTime<Utc>) -> Result<()> {
        self.set_last_sync_impl(t)
    }
}
