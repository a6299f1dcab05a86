//! A minimal [`ThemeColors`] mapping of [`ghmirror_config::Theme`] to a
//! handful of `ratatui` colors (accent/muted/warn/fail), deliberately
//! thin since full palette theming is out of scope.

use ghmirror_config::Theme;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub accent: Color,
    pub muted: Color,
    pub warn: Color,
    pub fail: Color,
    pub pass: Color,
}

impl ThemeColors {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Default => Self {
                accent: Color::Rgb(0x59, 0xc2, 0xff),
                muted: Color::Rgb(0x6c, 0x76, 0x80),
                warn: Color::Rgb(0xff, 0xb4, 0x54),
                fail: Color::Rgb(0xf0, 0x71, 0x78),
                pass: Color::Rgb(0xc2, 0xd9, 0x4c),
            },
            Theme::Dracula => Self {
                accent: Color::Rgb(0xbd, 0x93, 0xf9),
                muted: Color::Rgb(0x62, 0x72, 0xa4),
                warn: Color::Rgb(0xf1, 0xfa, 0x8c),
                fail: Color::Rgb(0xff, 0x55, 0x55),
                pass: Color::Rgb(0x50, 0xfa, 0x7b),
            },
            Theme::Gruvbox => Self {
                accent: Color::Rgb(0x83, 0xa5, 0x98),
                muted: Color::Rgb(0x92, 0x83, 0x74),
                warn: Color::Rgb(0xd7, 0x99, 0x21),
                fail: Color::Rgb(0xfb, 0x49, 0x34),
                pass: Color::Rgb(0xb8, 0xbb, 0x26),
            },
            Theme::Nord => Self {
                accent: Color::Rgb(0x88, 0xc0, 0xd0),
                muted: Color::Rgb(0x4c, 0x56, 0x6a),
                warn: Color::Rgb(0xeb, 0xcb, 0x8b),
                fail: Color::Rgb(0xbf, 0x61, 0x6a),
                pass: Color::Rgb(0xa3, 0xbe, 0x8c),
            },
            Theme::SolarizedDark => Self {
                accent: Color::Rgb(0x26, 0x8b, 0xd2),
                muted: Color::Rgb(0x58, 0x6e, 0x75),
                warn: Color::Rgb(0xb5, 0x89, 0x00),
                fail: Color::Rgb(0xdc, 0x32, 0x2f),
                pass: Color::Rgb(0x85, 0x99, 0x00),
            },
            Theme::SolarizedLight => Self {
                accent: Color::Rgb(0x26, 0x8b, 0xd2),
                muted: Color::Rgb(0x93, 0xa1, 0xa1),
                warn: Color::Rgb(0xb5, 0x89, 0x00),
                fail: Color::Rgb(0xdc, 0x32, 0x2f),
                pass: Color::Rgb(0x85, 0x99, 0x00),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_named_theme_resolves() {
        for theme in Theme::ALL {
            let _ = ThemeColors::for_theme(theme);
        }
    }
}
