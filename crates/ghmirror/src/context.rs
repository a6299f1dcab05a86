//! Runtime context: resolves config, repository, and database path from CLI
//! flags, the config file, and the environment, before any command runs
//! (spec §6 External Interfaces).

use std::path::PathBuf;
use std::sync::Arc;

use ghmirror_config::{resolve_token, GhMirrorConfig, ResolvedToken};
use ghmirror_core::RepoRef;
use ghmirror_remote::GithubFetcher;
use ghmirror_store::SqliteStore;
use ghmirror_sync::Engine;

use crate::cli::GlobalArgs;

pub struct RuntimeContext {
    pub config: GhMirrorConfig,
    pub config_path: PathBuf,
    pub repo: RepoRef,
    pub db_path: PathBuf,
    pub verbose: bool,
}

impl RuntimeContext {
    /// Builds the context a repo-scoped command needs: loaded config, the
    /// selected repository, and the resolved database path. Fails if no
    /// repository can be determined (spec §6: `--repo` overrides the
    /// configured default).
    pub fn resolve(global: &GlobalArgs) -> anyhow::Result<Self> {
        let config_path = ghmirror_config::paths::config_path()?;
        let config = GhMirrorConfig::load(&config_path)?;

        let repo = Self::resolve_repo(global, &config)?;
        let db_path = match &global.db {
            Some(p) => PathBuf::from(p),
            None => ghmirror_config::paths::database_path(&repo)?,
        };

        Ok(Self { config, config_path, repo, db_path, verbose: global.verbose })
    }

    fn resolve_repo(global: &GlobalArgs, config: &GhMirrorConfig) -> anyhow::Result<RepoRef> {
        if let Some(r) = &global.repo {
            return Ok(r.parse()?);
        }
        if let Some(default) = &config.github.default_repository {
            return Ok(default.parse()?);
        }
        if let Some(first) = config.repositories.first() {
            return Ok(first.name.parse()?);
        }
        anyhow::bail!(
            "no repository selected -- pass --repo <owner>/<repo> or run `ghmirror config`"
        )
    }

    /// Resolves the bearer token via the fixed provider chain and builds the
    /// fetcher and store the rest of the command needs.
    pub fn open(&self) -> anyhow::Result<(Arc<SqliteStore>, Arc<GithubFetcher>, ResolvedToken)> {
        let resolved = resolve_token(&self.config.auth).ok_or_else(|| {
            anyhow::anyhow!(
                "no GitHub token available -- set GITHUB_TOKEN, configure auth.token, or run `gh auth login`"
            )
        })?;
        let store = Arc::new(SqliteStore::open(&self.db_path)?);
        let fetcher = Arc::new(GithubFetcher::new(resolved.token.clone()));
        Ok((store, fetcher, resolved))
    }

    pub fn engine(&self, store: Arc<SqliteStore>, fetcher: Arc<GithubFetcher>) -> Engine {
        Engine::new(fetcher, store, self.repo.clone())
    }
}
