//! `GithubFetcher` -- the `ureq`-backed implementation of [`Fetcher`].

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use ghmirror_core::{Comment, Issue, RepoRef};
use tracing::{debug, warn};
use ureq::Agent;

use crate::cancel::CancelToken;
use crate::dto::{RemoteComment, RemoteIssue};
use crate::error::{FetchError, Result};
use crate::pagination::next_page_url;
use crate::traits::{FetchProgress, Fetcher};

const USER_AGENT: &str = concat!("ghmirror/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";
const PAGE_SIZE: u32 = 100;

/// Speaks the GitHub REST issues/comments dialect over `ureq`.
pub struct GithubFetcher {
    agent: Agent,
    token: String,
}

impl GithubFetcher {
    pub fn new(token: impl Into<String>) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
            token: token.into(),
        }
    }

    fn request(&self, url: &str) -> std::result::Result<ureq::http::Response<ureq::Body>, ureq::Error> {
        self.agent
            .get(url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .header("X-GitHub-Api-Version", API_VERSION)
            .call()
    }

    /// Classifies a non-2xx response per the rate-limit policy.
    fn classify_error_response(resp: &mut ureq::http::Response<ureq::Body>) -> FetchError {
        let status = resp.status().as_u16();
        let header = |name: &str| -> Option<String> {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        match status {
            401 => FetchError::AuthInvalid,
            403 if header("X-RateLimit-Remaining").as_deref() == Some("0") => {
                let reset_at = header("X-RateLimit-Reset")
                    .and_then(|s| s.parse::<i64>().ok())
                    .and_then(|epoch| Utc.timestamp_opt(epoch, 0).single())
                    .unwrap_or_else(Utc::now);
                FetchError::RateLimited { reset_at }
            }
            403 => FetchError::AccessDenied,
            _ => {
                let body_excerpt = resp
                    .body_mut()
                    .read_to_string()
                    .unwrap_or_default()
                    .chars()
                    .take(200)
                    .collect();
                FetchError::RemoteError { status, body_excerpt }
            }
        }
    }

    fn fetch_issues_paginated(
        &self,
        repo: &RepoRef,
        since: Option<DateTime<Utc>>,
        progress: &dyn Fn(FetchProgress),
        cancel: &CancelToken,
    ) -> Result<Vec<Issue>> {
        let mut url = match since {
            Some(t) => format!(
                "https://api.github.com/repos/{}/{}/issues?state=open&per_page={}&since={}",
                repo.owner,
                repo.name,
                PAGE_SIZE,
                t.to_rfc3339()
            ),
            None => format!(
                "https://api.github.com/repos/{}/{}/issues?state=open&per_page={}",
                repo.owner, repo.name, PAGE_SIZE
            ),
        };

        let mut issues = Vec::new();
        let mut prog = FetchProgress::default();

        loop {
            if cancel.is_canceled() {
                return Err(FetchError::Canceled { partial: issues });
            }

            let mut resp = self.request(&url).map_err(|e| FetchError::Network(e.to_string()))?;
            if !resp.status().is_success() {
                return Err(Self::classify_error_response(&mut resp));
            }

            let link_header = resp
                .headers()
                .get("Link")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            let remote_issues: Vec<RemoteIssue> = resp
                .body_mut()
                .read_json()
                .map_err(|e| FetchError::Network(e.to_string()))?;

            let page_count = remote_issues.len();
            issues.extend(
                remote_issues
                    .into_iter()
                    .filter(|i| !i.is_pull_request())
                    .map(Issue::from),
            );

            prog.pages_fetched += 1;
            prog.items_fetched += page_count;
            progress(prog);
            debug!(page = prog.pages_fetched, fetched = prog.items_fetched, "fetched issue page");

            match link_header.as_deref().and_then(next_page_url) {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(issues)
    }
}

impl Fetcher for GithubFetcher {
    fn validate_credentials(&self, repo: &RepoRef) -> Result<()> {
        let url = format!("https://api.github.com/repos/{}/{}", repo.owner, repo.name);
        let mut resp = self.request(&url).map_err(|e| FetchError::Network(e.to_string()))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::classify_error_response(&mut resp))
        }
    }

    fn fetch_open_issues(
        &self,
        repo: &RepoRef,
        progress: &dyn Fn(FetchProgress),
        cancel: &CancelToken,
    ) -> Result<Vec<Issue>> {
        self.fetch_issues_paginated(repo, None, progress, cancel)
    }

    fn fetch_open_issues_since(
        &self,
        repo: &RepoRef,
        since: DateTime<Utc>,
        progress: &dyn Fn(FetchProgress),
        cancel: &CancelToken,
    ) -> Result<Vec<Issue>> {
        self.fetch_issues_paginated(repo, Some(since), progress, cancel)
    }

    fn fetch_comments(&self, repo: &RepoRef, number: u64, cancel: &CancelToken) -> Result<Vec<Comment>> {
        let mut url = format!(
            "https://api.github.com/repos/{}/{}/issues/{}/comments?per_page={}",
            repo.owner, repo.name, number, PAGE_SIZE
        );
        let mut comments = Vec::new();

        loop {
            if cancel.is_canceled() {
                // Comments aren't paginated across separate store writes the
                // way issues are (they're replaced wholesale per issue), so
                // there's no partial-issue list to carry here.
                return Err(FetchError::Canceled { partial: Vec::new() });
            }

            let mut resp = self.request(&url).map_err(|e| FetchError::Network(e.to_string()))?;
            if !resp.status().is_success() {
                return Err(Self::classify_error_response(&mut resp));
            }

            let link_header = resp
                .headers()
                .get("Link")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            let remote_comments: Vec<RemoteComment> = resp
                .body_mut()
                .read_json()
                .map_err(|e| FetchError::Network(e.to_string()))?;
            comments.extend(remote_comments.into_iter().map(|c| c.into_core(number)));

            match link_header.as_deref().and_then(next_page_url) {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(comments)
    }
}
