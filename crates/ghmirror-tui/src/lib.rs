//! The Reactive View Model: a pure Elm-style reducer plus a `ratatui`
//! renderer and a background-thread dispatcher for side effects.

pub mod app;
pub mod dispatcher;
pub mod markdown;
pub mod message;
pub mod render;
pub mod sort;
pub mod state;
pub mod theme;
pub mod update;

pub use app::run;
pub use dispatcher::Dispatcher;
pub use message::{Command, Message, RefreshOutcome};
pub use sort::SortState;
pub use state::State;
pub use theme::ThemeColors;
pub use update::update;
