use crate::color::Color;
use crate::config::types::Theme;

/// Detected terminal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Dark,
    Light,
}

impl Background {
    /// Detect whether the terminal has a dark or light background.
    ///
    /// Heuristic: check `COLORFGBG` (format "fg;bg"), fall back to dark.
    pub fn detect() -> Self {
        if let Ok(val) = std::env::var("COLORFGBG")
            && let Some(bg) = val.rsplit(';').next()
            && let Ok(n) = bg.parse::<u8>()
            && n > 6
            && n != 8
        {
            return Background::Light;
        }
        Background::Dark
    }
}

/// Every colour slot the settings screens use, with user overrides applied.
#[derive(Debug, Clone)]
pub struct ResolvedTheme {
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_faint: Color,
    pub text_success: Color,
    pub text_warning: Color,
    pub text_error: Color,
    pub accent: Color,
    pub border: Color,
    pub bg_selected: Color,
}

impl ResolvedTheme {
    pub fn resolve(theme: &Theme, bg: Background) -> Self {
        let d = Self::defaults(bg);
        let c = &theme.colors;
        Self {
            text_primary: c.primary.unwrap_or(d.text_primary),
            text_secondary: c.secondary.unwrap_or(d.text_secondary),
            text_faint: c.faint.unwrap_or(d.text_faint),
            text_success: c.success.unwrap_or(d.text_success),
            text_warning: c.warning.unwrap_or(d.text_warning),
            text_error: c.error.unwrap_or(d.text_error),
            accent: c.accent.unwrap_or(d.accent),
            border: c.border.unwrap_or(d.border),
            bg_selected: c.selected_bg.unwrap_or(d.bg_selected),
        }
    }

    fn defaults(bg: Background) -> Self {
        match bg {
            Background::Dark => Self {
                text_primary: Color::Ansi256(7),
                text_secondary: Color::Ansi256(245),
                text_faint: Color::Ansi256(243),
                text_success: Color::Ansi256(10),
                text_warning: Color::Ansi256(11),
                text_error: Color::Ansi256(9),
                accent: Color::Ansi256(6),
                border: Color::Ansi256(241),
                bg_selected: Color::Ansi256(237),
            },
            Background::Light => Self {
                text_primary: Color::Ansi256(0),
                text_secondary: Color::Ansi256(240),
                text_faint: Color::Ansi256(248),
                text_success: Color::Ansi256(2),
                text_warning: Color::Ansi256(3),
                text_error: Color::Ansi256(1),
                accent: Color::Ansi256(4),
                border: Color::Ansi256(252),
                bg_selected: Color::Ansi256(254),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::ColorsTheme;

    #[test]
    fn overrides_win_over_defaults() {
        let theme = Theme {
            colors: ColorsTheme {
                accent: Some(Color::Hex { r: 1, g: 2, b: 3 }),
                ..ColorsTheme::default()
            },
        };
        let resolved = ResolvedTheme::resolve(&theme, Background::Dark);
        assert_eq!(resolved.accent, Color::Hex { r: 1, g: 2, b: 3 });
        assert_eq!(resolved.text_primary, Color::Ansi256(7));
    }

    #[test]
    fn light_background_defaults() {
        let resolved = ResolvedTheme::resolve(&Theme::default(), Background::Light);
        assert_eq!(resolved.text_primary, Color::Ansi256(0));
    }
}
