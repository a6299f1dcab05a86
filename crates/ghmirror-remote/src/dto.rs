//! Wire-format DTOs for the GitHub REST issues/comments endpoints.
//!
//! Kept separate from [`ghmirror_core::Issue`]/[`ghmirror_core::Comment`] so
//! the store's domain shapes never depend on the remote's serde
//! representation.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteIssueState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteLabel {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUser {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteIssue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub user: RemoteUser,
    pub state: RemoteIssueState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: u64,
    pub html_url: String,
    #[serde(default)]
    pub labels: Vec<RemoteLabel>,
    #[serde(default)]
    pub assignees: Vec<RemoteUser>,
    /// Present only on pull requests; used to filter them out of the issues
    /// endpoint's results (GitHub's `/issues` returns PRs too).
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl RemoteIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    pub user: RemoteUser,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RemoteIssue> for ghmirror_core::Issue {
    fn from(r: RemoteIssue) -> Self {
        ghmirror_core::Issue {
            number: r.number,
            title: r.title,
            body: r.body.unwrap_or_default(),
            author_login: r.user.login,
            state: match r.state {
                RemoteIssueState::Open => ghmirror_core::IssueState::Open,
                RemoteIssueState::Closed => ghmirror_core::IssueState::Closed,
            },
            created_at: r.created_at,
            updated_at: r.updated_at,
            comment_count: r.comments,
            labels: r.labels.into_iter().map(|l| l.name).collect(),
            assignees: r.assignees.into_iter().map(|u| u.login).collect(),
            html_url: r.html_url,
        }
    }
}

impl RemoteComment {
    pub fn into_core(self, issue_number: u64) -> ghmirror_core::Comment {
        ghmirror_core::Comment {
            id: self.id,
            issue_number,
            body: self.body.unwrap_or_default(),
            author_login: self.user.login,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
