//! The mirrored issue/comment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::IssueState;

/// A label name attached to an issue. Labels are replaced wholesale on
/// every issue upsert -- there is no independent label identity.
pub type Label = String;

/// An assignee login attached to an issue. Same replace-wholesale shape as
/// [`Label`].
pub type Assignee = String;

/// An issue mirrored from a single GitHub repository.
///
/// Identified by `(repository, number)`; the store scopes every query to one
/// repository, so `number` alone is the store-local primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub author_login: String,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub comment_count: u64,
    pub labels: Vec<Label>,
    pub assignees: Vec<Assignee>,
    pub html_url: String,
}

impl Issue {
    /// Whether the remote currently reports this issue as open. Only open
    /// issues are retained by the store; closed issues are removed on
    /// discovery.
    pub fn is_open(&self) -> bool {
        self.state == IssueState::Open
    }
}

/// A comment on an issue, identified by a stable id assigned by the remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub issue_number: u64,
    pub body: String,
    pub author_login: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_issue(state: IssueState) -> Issue {
        Issue {
            number: 42,
            title: "Widget explodes under load".into(),
            body: "Steps to reproduce...".into(),
            author_login: "octocat".into(),
            state,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap(),
            comment_count: 3,
            labels: vec!["bug".into()],
            assignees: vec!["alice".into()],
            html_url: "https://github.com/o/r/issues/42".into(),
        }
    }

    #[test]
    fn is_open_reflects_state() {
        assert!(sample_issue(IssueState::Open).is_open());
        assert!(!sample_issue(IssueState::Closed).is_open());
    }
}
