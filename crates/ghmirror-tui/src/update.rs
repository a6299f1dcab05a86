//! The pure reducer: `(State, Message) -> (State, Option<Command>)`.
//! No I/O here -- every side effect is requested as a [`Command`] for the
//! dispatcher to execute off this thread.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::message::{Command, Message, RefreshOutcome};
use crate::state::{
    error_modal_for, progress_to_overlay, BaseView, DrillDownState, Overlay, RefreshOverlayState,
    State,
};

/// Applies one message to `state`, returning the command the dispatcher
/// should run next, if any.
pub fn update(state: &mut State, message: Message, now: std::time::Instant) -> Option<Command> {
    match message {
        Message::Key(key) => handle_key(state, key, now),
        Message::RefreshStarted => {
            state.refresh_in_flight = true;
            state.overlay = Some(Overlay::RefreshOverlay(progress_to_overlay(
                ghmirror_sync::SyncProgress::issues(0, None),
                now,
            )));
            None
        }
        Message::RefreshProgress(progress) => {
            if matches!(state.overlay, Some(Overlay::RefreshOverlay(_))) {
                state.overlay = Some(Overlay::RefreshOverlay(progress_to_overlay(progress, now)));
            }
            None
        }
        Message::RefreshDone(outcome) => {
            state.refresh_in_flight = false;
            match outcome {
                RefreshOutcome::Success { issues, soft_errors } => {
                    state.replace_issues(issues);
                    if soft_errors.is_empty() {
                        state.overlay = None;
                        state.clear_status();
                    } else {
                        let summary = format!("{} comment fetch(es) failed", soft_errors.len());
                        state.overlay = Some(Overlay::RefreshOverlay(RefreshOverlayState::Summary(
                            summary.clone(),
                        )));
                        state.error_status(summary);
                    }
                }
                RefreshOutcome::Failed(err) => match err.severity() {
                    ghmirror_sync::Severity::Fatal => {
                        state.overlay = Some(Overlay::ErrorModal(error_modal_for(&err)));
                    }
                    ghmirror_sync::Severity::Operational | ghmirror_sync::Severity::Soft => {
                        state.overlay = None;
                        state.error_status(crate::state::status_text_for(&err));
                    }
                    ghmirror_sync::Severity::Canceled => {
                        state.overlay = None;
                    }
                },
            }
            None
        }
        Message::CommentsLoaded { issue_number, result } => {
            if let BaseView::CommentsDrillDown(drill) = &mut state.base {
                if drill.issue_number == issue_number {
                    drill.loading = false;
                    match result {
                        Ok(comments) => drill.comments = comments,
                        Err(err) => state.error_status(crate::state::status_text_for(&err)),
                    }
                }
            }
            None
        }
    }
}

fn handle_key(
    state: &mut State,
    key: crossterm::event::KeyEvent,
    _now: std::time::Instant,
) -> Option<Command> {
    // Overlay input takes precedence over the base view.
    if state.overlay.is_some() {
        return handle_overlay_key(state, key);
    }

    match &state.base {
        BaseView::IssueList => handle_list_key(state, key),
        BaseView::CommentsDrillDown(_) => handle_drilldown_key(state, key),
    }
}

fn handle_overlay_key(state: &mut State, key: crossterm::event::KeyEvent) -> Option<Command> {
    match state.overlay.take() {
        overlay @ Some(Overlay::HelpOverlay) => {
            // dismissed by `?` or `Esc` only; every other key is swallowed.
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc => None,
                _ => {
                    state.overlay = overlay;
                    None
                }
            }
        }
        overlay @ Some(Overlay::ErrorModal(_)) => {
            // blocks all keys except Enter/Esc/q (dismiss) and Ctrl-C (quit).
            match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => None,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    state.should_quit = true;
                    Some(Command::Quit)
                }
                _ => {
                    state.overlay = overlay;
                    None
                }
            }
        }
        Some(Overlay::RefreshOverlay(RefreshOverlayState::Summary(_))) => None,
        overlay @ Some(Overlay::RefreshOverlay(RefreshOverlayState::InProgress { .. })) => {
            // Only cancel dismisses an in-flight refresh overlay; other keys
            // are swallowed.
            if key.code == KeyCode::Char('c') || key.code == KeyCode::Esc {
                return Some(Command::CancelRefresh);
            }
            state.overlay = overlay;
            None
        }
        None => None,
    }
}

fn handle_list_key(state: &mut State, key: crossterm::event::KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
            Some(Command::Quit)
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
            Some(Command::Quit)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.cursor + 1 < state.issues.len() {
                state.cursor += 1;
            }
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.cursor = state.cursor.saturating_sub(1);
            None
        }
        KeyCode::Enter => {
            if let Some(issue) = state.selected_issue() {
                let number = issue.number;
                state.base = BaseView::CommentsDrillDown(DrillDownState {
                    issue_number: number,
                    loading: true,
                    comments: Vec::new(),
                    scroll: 0,
                });
                state.detail_scroll = 0;
                return Some(Command::LoadComments(number));
            }
            None
        }
        KeyCode::Char('s') => {
            state.sort.cycle_field();
            state.issues = state.sort.apply(std::mem::take(&mut state.issues));
            state.clamp_cursor();
            None
        }
        KeyCode::Char('S') => {
            state.sort.toggle_direction();
            state.issues = state.sort.apply(std::mem::take(&mut state.issues));
            state.clamp_cursor();
            None
        }
        KeyCode::Char('m') => {
            state.markdown_enabled = !state.markdown_enabled;
            None
        }
        KeyCode::Char('r') => {
            if state.refresh_in_flight {
                None
            } else {
                Some(Command::StartIncrementalRefresh)
            }
        }
        KeyCode::Char('R') => {
            if state.refresh_in_flight {
                None
            } else {
                Some(Command::StartFullSync)
            }
        }
        KeyCode::Char('?') => {
            state.overlay = Some(Overlay::HelpOverlay);
            None
        }
        KeyCode::Char('h') => {
            state.detail_scroll = state.detail_scroll.saturating_sub(1);
            None
        }
        KeyCode::Char('l') => {
            state.detail_scroll += 1;
            None
        }
        KeyCode::PageUp => {
            state.detail_scroll = state.detail_scroll.saturating_sub(10);
            None
        }
        KeyCode::PageDown => {
            state.detail_scroll += 10;
            None
        }
        _ => None,
    }
}

fn handle_drilldown_key(state: &mut State, key: crossterm::event::KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.base = BaseView::IssueList;
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let BaseView::CommentsDrillDown(drill) = &mut state.base {
                drill.scroll += 1;
            }
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if let BaseView::CommentsDrillDown(drill) = &mut state.base {
                drill.scroll = drill.scroll.saturating_sub(1);
            }
            None
        }
        KeyCode::Char('h') => {
            if let BaseView::CommentsDrillDown(drill) = &mut state.base {
                drill.scroll = drill.scroll.saturating_sub(1);
            }
            None
        }
        KeyCode::Char('l') => {
            if let BaseView::CommentsDrillDown(drill) = &mut state.base {
                drill.scroll += 1;
            }
            None
        }
        KeyCode::Char('m') => {
            state.markdown_enabled = !state.markdown_enabled;
            None
        }
        KeyCode::Char('?') => {
            state.overlay = Some(Overlay::HelpOverlay);
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};
    use ghmirror_core::{Issue, IssueState, RepoRef};
    use std::time::Instant;

    fn key(code: KeyCode) -> crossterm::event::KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn issue(number: u64) -> Issue {
        Issue {
            number,
            title: format!("issue {number}"),
            body: "hello".into(),
            author_login: "octocat".into(),
            state: IssueState::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            comment_count: 0,
            labels: vec![],
            assignees: vec![],
            html_url: String::new(),
        }
    }

    fn state() -> State {
        State::new(RepoRef::new("o", "r"), vec![issue(1), issue(2), issue(3)])
    }

    #[test]
    fn down_moves_cursor_and_clamps_at_end() {
        let mut s = state();
        let now = Instant::now();
        update(&mut s, Message::Key(key(KeyCode::Down)), now);
        update(&mut s, Message::Key(key(KeyCode::Down)), now);
        update(&mut s, Message::Key(key(KeyCode::Down)), now);
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn up_at_top_stays_at_zero() {
        let mut s = state();
        let now = Instant::now();
        update(&mut s, Message::Key(key(KeyCode::Up)), now);
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn enter_opens_drilldown_and_requests_comment_load() {
        let mut s = state();
        let cmd = update(&mut s, Message::Key(key(KeyCode::Enter)), Instant::now());
        assert!(matches!(cmd, Some(Command::LoadComments(1))));
        assert!(matches!(s.base, BaseView::CommentsDrillDown(_)));
    }

    #[test]
    fn escape_returns_from_drilldown_to_list() {
        let mut s = state();
        update(&mut s, Message::Key(key(KeyCode::Enter)), Instant::now());
        update(&mut s, Message::Key(key(KeyCode::Esc)), Instant::now());
        assert_eq!(s.base, BaseView::IssueList);
    }

    #[test]
    fn refresh_while_in_flight_is_ignored() {
        let mut s = state();
        s.refresh_in_flight = true;
        let cmd = update(&mut s, Message::Key(key(KeyCode::Char('r'))), Instant::now());
        assert!(cmd.is_none());
    }

    #[test]
    fn help_overlay_swallows_navigation_and_only_dismisses_on_help_or_esc() {
        let mut s = state();
        update(&mut s, Message::Key(key(KeyCode::Char('?'))), Instant::now());
        assert!(matches!(s.overlay, Some(Overlay::HelpOverlay)));

        update(&mut s, Message::Key(key(KeyCode::Char('j'))), Instant::now());
        assert!(matches!(s.overlay, Some(Overlay::HelpOverlay)), "non-dismiss key left the overlay up");
        assert_eq!(s.cursor, 0, "overlay swallowed the navigation key");

        update(&mut s, Message::Key(key(KeyCode::Esc)), Instant::now());
        assert!(s.overlay.is_none());
    }

    #[test]
    fn error_modal_only_dismisses_on_enter_esc_or_q() {
        let mut s = state();
        let err: ghmirror_sync::ReconcileError =
            ghmirror_store::StoreError::Internal("disk full".into()).into();
        update(&mut s, Message::RefreshDone(RefreshOutcome::Failed(err)), Instant::now());
        assert!(matches!(s.overlay, Some(Overlay::ErrorModal(_))));

        update(&mut s, Message::Key(key(KeyCode::Char('j'))), Instant::now());
        assert!(matches!(s.overlay, Some(Overlay::ErrorModal(_))), "non-dismiss key closed the modal");

        update(&mut s, Message::Key(key(KeyCode::Enter)), Instant::now());
        assert!(s.overlay.is_none());
    }

    #[test]
    fn error_modal_ctrl_c_quits() {
        let mut s = state();
        let err: ghmirror_sync::ReconcileError =
            ghmirror_store::StoreError::Internal("disk full".into()).into();
        update(&mut s, Message::RefreshDone(RefreshOutcome::Failed(err)), Instant::now());

        let mut ctrl_c = key(KeyCode::Char('c'));
        ctrl_c.modifiers = KeyModifiers::CONTROL;
        let cmd = update(&mut s, Message::Key(ctrl_c), Instant::now());
        assert!(matches!(cmd, Some(Command::Quit)));
        assert!(s.should_quit);
    }

    #[test]
    fn refresh_success_preserves_selection_by_number() {
        let mut s = state();
        s.cursor = 2;
        let outcome = RefreshOutcome::Success { issues: vec![issue(3), issue(4)], soft_errors: vec![] };
        update(&mut s, Message::RefreshDone(outcome), Instant::now());
        assert_eq!(s.selected_issue().unwrap().number, 3);
    }

    #[test]
    fn fatal_store_error_opens_error_modal() {
        let mut s = state();
        let err: ghmirror_sync::ReconcileError =
            ghmirror_store::StoreError::Internal("disk full".into()).into();
        update(&mut s, Message::RefreshDone(RefreshOutcome::Failed(err)), Instant::now());
        assert!(matches!(s.overlay, Some(Overlay::ErrorModal(_))));
    }

    #[test]
    fn operational_error_keeps_issues_and_sets_status() {
        let mut s = state();
        let err: ghmirror_sync::ReconcileError =
            ghmirror_remote::FetchError::RateLimited { reset_at: Utc::now() }.into();
        update(&mut s, Message::RefreshDone(RefreshOutcome::Failed(err)), Instant::now());
        assert!(s.overlay.is_none());
        assert!(s.status.is_some());
        assert_eq!(s.issues.len(), 3);
    }
}
