//! Messages flowing into the reducer and commands flowing out of it,
//! Elm-style: `(State, Message) -> (State, Command)`.

use crossterm::event::KeyEvent;
use ghmirror_core::{Comment, Issue};
use ghmirror_sync::{ReconcileError, SyncProgress, WorkerError};

/// Everything the reducer can react to.
#[derive(Debug, Clone)]
pub enum Message {
    Key(KeyEvent),
    /// A background reconciliation has started (issued right after the
    /// command was dispatched, before the first progress update).
    RefreshStarted,
    /// Monotonic-in-`current` progress update for the in-flight run.
    RefreshProgress(SyncProgress),
    /// Terminal event for one reconciliation run. Always preceded by every
    /// `RefreshProgress` of the same run.
    RefreshDone(RefreshOutcome),
    /// Reply to `Command::LoadComments`.
    CommentsLoaded { issue_number: u64, result: Result<Vec<Comment>, ReconcileError> },
}

#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    Success { issues: Vec<Issue>, soft_errors: Vec<WorkerError> },
    Failed(ReconcileError),
}

/// Side effects the reducer requests; executed by the dispatcher off the
/// event-loop thread.
#[derive(Debug, Clone)]
pub enum Command {
    StartFullSync,
    StartIncrementalRefresh,
    LoadComments(u64),
    /// Signals the dispatcher to flip the in-flight run's cancel token.
    CancelRefresh,
    Quit,
}
