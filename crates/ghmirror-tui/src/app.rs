//! The terminal event loop: renders `State`, turns `crossterm` key events
//! into `Message::Key`, and drains background-thread replies from the
//! dispatcher's channel every frame.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::unbounded;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ghmirror_config::{Column, TuiOptions};
use ghmirror_core::RepoRef;
use ghmirror_sync::Engine;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::dispatcher::Dispatcher;
use crate::message::Message;
use crate::state::State;
use crate::theme::ThemeColors;
use crate::update::update;

const POLL_INTERVAL: Duration = Duration::from_millis(80);

/// Runs the view model until the user quits or a fatal error is shown and
/// dismissed. `initial_issues` is the store's current snapshot, used to
/// paint the first frame before any refresh completes. `columns` is the
/// configured `display.columns` subset the list panel renders. Terminal
/// setup (alternate screen, mouse capture) is governed by
/// `GHMIRROR_TUI_OPTIONS` (see [`TuiOptions`]).
pub fn run(
    engine: Arc<Engine>,
    repo: RepoRef,
    theme: ThemeColors,
    initial_issues: Vec<ghmirror_core::Issue>,
    columns: Vec<Column>,
    auto_refresh: bool,
) -> io::Result<()> {
    let options = TuiOptions::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if !options.no_alt_screen {
        execute!(stdout, EnterAlternateScreen)?;
    }
    if options.mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, engine, repo, theme, initial_issues, columns, auto_refresh);

    if options.mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    disable_raw_mode()?;
    if !options.no_alt_screen {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: Arc<Engine>,
    repo: RepoRef,
    theme: ThemeColors,
    initial_issues: Vec<ghmirror_core::Issue>,
    columns: Vec<Column>,
    auto_refresh: bool,
) -> io::Result<()> {
    let (tx, rx) = unbounded::<Message>();
    let mut dispatcher = Dispatcher::new(Arc::clone(&engine), tx.clone());
    let mut state = State::new(repo, initial_issues).with_columns(columns);

    if auto_refresh {
        dispatcher.dispatch(crate::message::Command::StartIncrementalRefresh);
    }

    loop {
        terminal.draw(|frame| crate::render::draw(frame, &state, &theme))?;

        while let Ok(message) = rx.try_recv() {
            if let Some(command) = update(&mut state, message, Instant::now()) {
                dispatcher.dispatch(command);
            }
        }

        if state.should_quit {
            return Ok(());
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = update(&mut state, Message::Key(key), Instant::now()) {
                        dispatcher.dispatch(command);
                    }
                }
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}
