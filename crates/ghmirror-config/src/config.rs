//! The TOML configuration schema and its load/save operations, layered
//! with `figment` (`Toml` provider + `Env` overrides) rather than a direct
//! `serde_yaml::from_str`/`to_string` call, since the on-disk format here
//! is TOML rather than YAML (see `DESIGN.md`).

use std::path::Path;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// How the bearer token used to authenticate against the remote is sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// `GITHUB_TOKEN` environment variable.
    #[default]
    Env,
    /// The configured `auth.token` value.
    Token,
    /// `gh auth token` subprocess.
    Gh,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub method: AuthMethod,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GithubConfig {
    #[serde(default)]
    pub default_repository: Option<String>,
}

/// Which field the issue list is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Updated,
    Created,
    Number,
    Comments,
}

impl SortField {
    /// The fixed four-field rotation `s` cycles through.
    pub fn next(self) -> Self {
        match self {
            Self::Updated => Self::Created,
            Self::Created => Self::Number,
            Self::Number => Self::Comments,
            Self::Comments => Self::Updated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortConfig {
    #[serde(default)]
    pub field: SortField,
    #[serde(default = "default_sort_descending")]
    pub descending: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self { field: SortField::default(), descending: default_sort_descending() }
    }
}

fn default_sort_descending() -> bool {
    true
}

/// A list column (`display.columns`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Number,
    Title,
    Author,
    Date,
    Comments,
}

fn default_columns() -> Vec<Column> {
    vec![Column::Number, Column::Title, Column::Author, Column::Date, Column::Comments]
}

/// Named themes. Color application itself is out of scope; this enum only
/// records the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Default,
    Dracula,
    Gruvbox,
    Nord,
    SolarizedDark,
    SolarizedLight,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Default,
        Theme::Dracula,
        Theme::Gruvbox,
        Theme::Nord,
        Theme::SolarizedDark,
        Theme::SolarizedLight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dracula => "dracula",
            Self::Gruvbox => "gruvbox",
            Self::Nord => "nord",
            Self::SolarizedDark => "solarized-dark",
            Self::SolarizedLight => "solarized-light",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_columns")]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub sort: SortConfig,
    #[serde(default)]
    pub theme: Theme,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { columns: default_columns(), sort: SortConfig::default(), theme: Theme::default() }
    }
}

/// The full `~/.config/ghmirror/config.toml` contents.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GhMirrorConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl GhMirrorConfig {
    /// Loads configuration from `path`, layering `GHMIRROR_`-prefixed
    /// environment variables over the file (figment's standard
    /// file-then-env precedence). A missing file yields the default
    /// configuration.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("GHMIRROR_").split("_"))
            .extract()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serializes and writes `self` to `path`, creating the parent
    /// directory and setting file mode `0600`.
    pub fn save(&self, path: &Path) -> Result<()> {
        crate::paths::ensure_parent_dir(path)?;
        let toml_str = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, toml_str).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })?;
        set_owner_only_mode(path)?;
        Ok(())
    }
}

#[cfg(unix)]
fn set_owner_only_mode(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).map_err(|e| {
        ConfigError::Write { path: path.display().to_string(), source: e }
    })
}

#[cfg(not(unix))]
fn set_owner_only_mode(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_default() {
        let cfg = GhMirrorConfig::load(Path::new("/nonexistent/ghmirror/config.toml")).unwrap();
        assert_eq!(cfg.auth.method, AuthMethod::Env);
        assert_eq!(cfg.display.sort.field, SortField::Updated);
        assert!(cfg.display.sort.descending);
    }

    #[test]
    fn sort_field_rotation_is_fixed_and_cyclic() {
        let f = SortField::Updated;
        let f = f.next();
        assert_eq!(f, SortField::Created);
        let f = f.next();
        assert_eq!(f, SortField::Number);
        let f = f.next();
        assert_eq!(f, SortField::Comments);
        let f = f.next();
        assert_eq!(f, SortField::Updated);
    }

    #[test]
    fn roundtrips_through_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = GhMirrorConfig::default();
        cfg.auth.method = AuthMethod::Token;
        cfg.auth.token = Some("secret".into());
        cfg.repositories.push(RepositoryConfig { name: "rust-lang/rust".into() });

        cfg.save(&path).unwrap();
        let loaded = GhMirrorConfig::load(&path).unwrap();

        assert_eq!(loaded.auth.method, AuthMethod::Token);
        assert_eq!(loaded.auth.token.as_deref(), Some("secret"));
        assert_eq!(loaded.repositories.len(), 1);
        assert_eq!(loaded.repositories[0].name, "rust-lang/rust");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o600);
        }
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[auth]\nmethod = \"gh\"\n").unwrap();
        let cfg = GhMirrorConfig::load(&path).unwrap();
        assert_eq!(cfg.auth.method, AuthMethod::Gh);
        assert_eq!(cfg.display.theme, Theme::Default);
    }
}
