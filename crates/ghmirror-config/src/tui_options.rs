//! Parses `GHMIRROR_TUI_OPTIONS`, a comma list of flags for the terminal
//! program: `mouse` (enable mouse capture) and `noaltscreen` (run in the
//! current screen buffer instead of the alternate one).

const TUI_OPTIONS_ENV: &str = "GHMIRROR_TUI_OPTIONS";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TuiOptions {
    pub mouse: bool,
    pub no_alt_screen: bool,
}

impl TuiOptions {
    /// Reads and parses `GHMIRROR_TUI_OPTIONS` from the environment.
    /// Unrecognized tokens are ignored.
    pub fn from_env() -> Self {
        Self::parse(std::env::var(TUI_OPTIONS_ENV).ok().as_deref().unwrap_or(""))
    }

    fn parse(raw: &str) -> Self {
        let mut opts = Self::default();
        for token in raw.split(',') {
            match token.trim() {
                "mouse" => opts.mouse = true,
                "noaltscreen" => opts.no_alt_screen = true,
                _ => {}
            }
        }
        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_defaults() {
        assert_eq!(TuiOptions::parse(""), TuiOptions::default());
    }

    #[test]
    fn recognizes_both_flags_in_either_order() {
        assert_eq!(
            TuiOptions::parse("mouse,noaltscreen"),
            TuiOptions { mouse: true, no_alt_screen: true }
        );
        assert_eq!(
            TuiOptions::parse("noaltscreen, mouse"),
            TuiOptions { mouse: true, no_alt_screen: true }
        );
    }

    #[test]
    fn ignores_unknown_tokens() {
        assert_eq!(TuiOptions::parse("mouse,bogus"), TuiOptions { mouse: true, no_alt_screen: false });
    }
}
