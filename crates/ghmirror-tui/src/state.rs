//! The view model's state: a flat tagged-variant state enum where each
//! state owns its fields. No back-pointers; transitions are pure.

use std::time::Instant;

use ghmirror_config::Column;
use ghmirror_core::{Comment, Issue, RepoRef};
use ghmirror_sync::{ReconcileError, SyncProgress};

use crate::sort::SortState;

/// The default list-panel columns, matching `DisplayConfig::default()`.
pub fn default_columns() -> Vec<Column> {
    vec![Column::Number, Column::Title, Column::Author, Column::Date, Column::Comments]
}

/// Which full-screen base view is active. `ErrorModal`/`HelpOverlay`/
/// `RefreshOverlay` are not base views -- they're overlays tracked
/// separately in [`State::overlay`] so they can cover either base view
/// without the base view needing to know about them. At most one overlay
/// is active at a time, and overlay input takes precedence.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseView {
    IssueList,
    CommentsDrillDown(DrillDownState),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrillDownState {
    pub issue_number: u64,
    pub loading: bool,
    pub comments: Vec<Comment>,
    pub scroll: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    HelpOverlay,
    ErrorModal(ErrorModalState),
    RefreshOverlay(RefreshOverlayState),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorModalState {
    pub title: String,
    pub message: String,
    pub guidance: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    Issues,
    Comments,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOverlayState {
    InProgress { phase: RefreshPhase, current: usize, total: Option<usize>, started: InstantKey },
    /// Terminal summary, dismissed by any key.
    Summary(String),
}

/// `Instant` isn't `PartialEq`-comparable in a meaningful way for view
/// state equality in tests, so it's wrapped and compared by identity only
/// where it matters (it never needs to be, in practice -- state equality
/// checks in tests never compare two `InProgress` overlays against each
/// other across different start times).
#[derive(Debug, Clone, Copy)]
pub struct InstantKey(pub Instant);

impl PartialEq for InstantKey {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// A transient status-bar message for Operational/Soft errors: cached
/// data stays usable, a retry hint is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub repo: RepoRef,
    pub issues: Vec<Issue>,
    pub sort: SortState,
    pub cursor: usize,
    pub list_scroll: usize,
    pub detail_scroll: usize,
    pub markdown_enabled: bool,
    pub base: BaseView,
    pub overlay: Option<Overlay>,
    pub status: Option<StatusMessage>,
    pub refresh_in_flight: bool,
    pub should_quit: bool,
    pub columns: Vec<Column>,
}

impl State {
    pub fn new(repo: RepoRef, issues: Vec<Issue>) -> Self {
        let sort = SortState::default();
        let issues = sort.apply(issues);
        Self {
            repo,
            issues,
            sort,
            cursor: 0,
            list_scroll: 0,
            detail_scroll: 0,
            markdown_enabled: false,
            base: BaseView::IssueList,
            overlay: None,
            status: None,
            refresh_in_flight: false,
            should_quit: false,
            columns: default_columns(),
        }
    }

    /// Overrides the list panel's configured columns (spec §6 `display.columns`).
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        self.issues.get(self.cursor)
    }

    /// Clamps the cursor to `[0, len(issues))`.
    pub fn clamp_cursor(&mut self) {
        if self.issues.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.issues.len() {
            self.cursor = self.issues.len() - 1;
        }
    }

    /// Replaces the issue list with a fresh snapshot, preserving the
    /// selected issue's position if it survived, else resetting to 0.
    pub fn replace_issues(&mut self, issues: Vec<Issue>) {
        let selected_number = self.selected_issue().map(|i| i.number);
        self.issues = self.sort.apply(issues);
        self.detail_scroll = 0;
        match selected_number.and_then(|n| self.issues.iter().position(|i| i.number == n)) {
            Some(pos) => self.cursor = pos,
            None => self.cursor = 0,
        }
        self.clamp_cursor();
    }

    pub fn error_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into(), is_error: true });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Builds the fatal error modal content for a classified reconciliation
/// error: what failed, store validity, and the next action to take.
pub fn error_modal_for(err: &ReconcileError) -> ErrorModalState {
    let title = match err {
        ReconcileError::Fetch(ghmirror_remote::FetchError::AuthInvalid) => "Authentication failed",
        ReconcileError::Fetch(ghmirror_remote::FetchError::AccessDenied) => "Access denied",
        ReconcileError::Fetch(_) => "Remote fetch failed",
        ReconcileError::Store(_) => "Local store error",
        ReconcileError::Canceled => "Canceled",
    }
    .to_string();
    ErrorModalState {
        title,
        message: format!(
            "{err} (local cache is still valid: {})",
            if err.store_still_valid() { "yes" } else { "no" }
        ),
        guidance: Some(err.next_action_hint().to_string()),
    }
}

/// Builds the status-bar text for a non-fatal (Operational/Soft) error.
pub fn status_text_for(err: &ReconcileError) -> String {
    let hint = err.next_action_hint();
    if hint.is_empty() {
        err.to_string()
    } else {
        format!("{err} -- {hint}")
    }
}

pub fn progress_to_overlay(progress: SyncProgress, started: Instant) -> RefreshOverlayState {
    let phase = match progress.phase {
        ghmirror_sync::Phase::Issues => RefreshPhase::Issues,
        ghmirror_sync::Phase::Comments => RefreshPhase::Comments,
    };
    RefreshOverlayState::InProgress {
        phase,
        current: progress.current,
        total: progress.total,
        started: InstantKey(started),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn issue(number: u64) -> Issue {
        Issue {
            number,
            title: format!("issue {number}"),
            body: String::new(),
            author_login: "octocat".into(),
            state: ghmirror_core::IssueState::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            comment_count: 0,
            labels: vec![],
            assignees: vec![],
            html_url: String::new(),
        }
    }

    #[test]
    fn cursor_preserved_when_selection_survives_refresh() {
        let mut state = State::new(RepoRef::new("o", "r"), vec![issue(1), issue(2), issue(7)]);
        state.cursor = state.issues.iter().position(|i| i.number == 7).unwrap();
        state.replace_issues(vec![issue(1), issue(2)]);
        assert_eq!(state.cursor, 0);

        let mut state2 = State::new(RepoRef::new("o", "r"), vec![issue(1), issue(2), issue(7)]);
        state2.cursor = state2.issues.iter().position(|i| i.number == 2).unwrap();
        state2.replace_issues(vec![issue(1), issue(2)]);
        assert_eq!(state2.selected_issue().unwrap().number, 2);
    }

    #[test]
    fn clamp_cursor_handles_empty_list() {
        let mut state = State::new(RepoRef::new("o", "r"), vec![]);
        state.cursor = 5;
        state.clamp_cursor();
        assert_eq!(state.cursor, 0);
    }
}
