//! `ghmirror config` -- interactive setup wizard, overwrites the
//! configuration file (spec §6, scenario 1).

use std::io::{self, Write};

use ghmirror_config::{AuthConfig, AuthMethod, GhMirrorConfig, RepositoryConfig};
use ghmirror_core::RepoRef;

pub fn run() -> anyhow::Result<()> {
    let config_path = ghmirror_config::paths::config_path()?;

    println!("ghmirror setup");
    println!("Configuration will be written to {}", config_path.display());

    let repo = prompt_repo()?;
    let method = prompt_auth_method()?;
    let token = match method {
        AuthMethod::Token => Some(prompt_token()?),
        AuthMethod::Env | AuthMethod::Gh => None,
    };

    let mut config = GhMirrorConfig::default();
    config.auth = AuthConfig { method, token };
    config.github.default_repository = Some(repo.to_string());
    config.repositories = vec![RepositoryConfig { name: repo.to_string() }];

    config.save(&config_path)?;
    println!("wrote {}", config_path.display());
    Ok(())
}

fn prompt_repo() -> anyhow::Result<RepoRef> {
    loop {
        let input = prompt("Repository (owner/repo): ")?;
        match input.parse::<RepoRef>() {
            Ok(repo) => return Ok(repo),
            Err(_) => println!("invalid repository reference, expected owner/repo"),
        }
    }
}

fn prompt_auth_method() -> anyhow::Result<AuthMethod> {
    loop {
        let input = prompt("Auth method [env/token/gh] (default env): ")?;
        match input.trim() {
            "" | "env" => return Ok(AuthMethod::Env),
            "token" => return Ok(AuthMethod::Token),
            "gh" => return Ok(AuthMethod::Gh),
            _ => println!("expected one of: env, token, gh"),
        }
    }
}

fn prompt_token() -> anyhow::Result<String> {
    prompt("GitHub token: ")
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
