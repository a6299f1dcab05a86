//! Configuration, path discovery, and credential resolution: the adapters
//! the core subsystem depends on but that sit outside the offline cache
//! coherency design itself.

pub mod config;
pub mod credentials;
pub mod error;
pub mod paths;
pub mod tui_options;

pub use config::{
    AuthConfig, AuthMethod, Column, DisplayConfig, GhMirrorConfig, GithubConfig, RepositoryConfig,
    SortConfig, SortField, Theme,
};
pub use credentials::{resolve_token, ResolvedToken, TokenSource};
pub use error::{ConfigError, Result};
pub use tui_options::TuiOptions;
