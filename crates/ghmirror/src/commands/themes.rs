//! `ghmirror themes` -- list available themes (spec §6).

use ghmirror_config::Theme;

pub fn run() -> anyhow::Result<()> {
    for theme in Theme::ALL {
        println!("{}", theme.name());
    }
    Ok(())
}
