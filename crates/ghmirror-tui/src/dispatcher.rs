//! Executes [`Command`]s on background threads and posts their replies back
//! as [`Message`]s. The reducer never blocks: every command that touches
//! the network or disk runs on a worker thread and replies over a channel.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::Sender;
use ghmirror_remote::CancelToken;
use ghmirror_sync::Engine;
use tracing::warn;

use crate::message::{Command, Message, RefreshOutcome};

/// Owns the engine and the one cancel token shared by whichever
/// reconciliation run is currently in flight (there is at most one: a
/// second refresh command arriving while one is in flight is ignored by
/// the reducer).
pub struct Dispatcher {
    engine: Arc<Engine>,
    tx: Sender<Message>,
    active_cancel: Option<CancelToken>,
}

impl Dispatcher {
    pub fn new(engine: Arc<Engine>, tx: Sender<Message>) -> Self {
        Self { engine, tx, active_cancel: None }
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::StartFullSync => self.spawn_refresh(true),
            Command::StartIncrementalRefresh => self.spawn_refresh(false),
            Command::LoadComments(number) => self.spawn_load_comments(number),
            Command::CancelRefresh => {
                if let Some(token) = &self.active_cancel {
                    token.cancel();
                }
            }
            Command::Quit => {}
        }
    }

    fn spawn_refresh(&mut self, full: bool) {
        let cancel = CancelToken::new();
        self.active_cancel = Some(cancel.clone());
        let engine = Arc::clone(&self.engine);
        let tx = self.tx.clone();

        let _ = tx.send(Message::RefreshStarted);
        thread::spawn(move || {
            let progress_tx = tx.clone();
            let progress = move |p: ghmirror_sync::SyncProgress| {
                let _ = progress_tx.send(Message::RefreshProgress(p));
            };

            let issues_result = if full {
                engine.full_sync(&progress, &cancel)
            } else {
                engine.incremental_refresh(&progress, &cancel)
            };

            // Reconciliation itself only fetches comments on drill-down; the
            // bulk prefetch runs after a full sync only, not every refresh.
            let outcome = match issues_result {
                Ok(()) => {
                    let soft_errors = if full {
                        match engine.prefetch_all_comments(&progress, &cancel) {
                            Ok(errors) => errors,
                            Err(err) => {
                                let _ = tx.send(Message::RefreshDone(RefreshOutcome::Failed(err)));
                                return;
                            }
                        }
                    } else {
                        Vec::new()
                    };
                    match reload_issues(&engine) {
                        Ok(issues) => RefreshOutcome::Success { issues, soft_errors },
                        Err(err) => RefreshOutcome::Failed(err),
                    }
                }
                Err(err) => RefreshOutcome::Failed(err),
            };
            let _ = tx.send(Message::RefreshDone(outcome));
        });
    }

    fn spawn_load_comments(&self, issue_number: u64) {
        let engine = Arc::clone(&self.engine);
        let tx = self.tx.clone();
        let cancel = CancelToken::new();
        thread::spawn(move || {
            let result = engine.load_comments_for(issue_number, &cancel);
            if let Err(e) = &result {
                warn!(issue_number, error = %e, "failed to load comments");
            }
            let _ = tx.send(Message::CommentsLoaded { issue_number, result });
        });
    }
}

fn reload_issues(engine: &Engine) -> ghmirror_sync::Result<Vec<ghmirror_core::Issue>> {
    engine.current_issues()
}
