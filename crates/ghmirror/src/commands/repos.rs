//! `ghmirror repos` -- list configured repositories (spec §6).

use ghmirror_config::GhMirrorConfig;

pub fn run() -> anyhow::Result<()> {
    let config_path = ghmirror_config::paths::config_path()?;
    let config = GhMirrorConfig::load(&config_path)?;

    if config.repositories.is_empty() {
        println!("no repositories configured -- run `ghmirror config`");
        return Ok(());
    }

    for repo in &config.repositories {
        let marker = if config.github.default_repository.as_deref() == Some(repo.name.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{marker} {}", repo.name);
    }
    Ok(())
}
