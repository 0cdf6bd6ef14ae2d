//! Color themes for the terminal surface.

use ratatui::style::Color;

/// A color theme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,

    /// Background color
    pub bg: Color,
    /// Foreground (text) color
    pub fg: Color,
    /// Streamed reply text
    pub rx_color: Color,
    /// Error dialog header
    pub error_color: Color,
    /// Border color
    pub border: Color,
    /// Selection/highlight color
    pub selection: Color,
    /// Hints and inactive buttons
    pub inactive: Color,
    /// Headers and the focused button
    pub accent: Color,
}

impl Theme {
    /// Dark theme (default)
    pub const fn dark() -> Self {
        Self {
            name: "dark",
            bg: Color::Rgb(30, 30, 46),
            fg: Color::Rgb(205, 214, 244),
            rx_color: Color::Rgb(166, 227, 161),
            error_color: Color::Rgb(243, 139, 168),
            border: Color::Rgb(88, 91, 112),
            selection: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(108, 112, 134),
            accent: Color::Rgb(203, 166, 247),
        }
    }

    pub const fn light() -> Self {
        Self {
            name: "light",
            bg: Color::Rgb(239, 241, 245),
            fg: Color::Rgb(76, 79, 105),
            rx_color: Color::Rgb(64, 160, 43),
            error_color: Color::Rgb(210, 15, 57),
            border: Color::Rgb(172, 176, 190),
            selection: Color::Rgb(204, 208, 218),
            inactive: Color::Rgb(140, 143, 161),
            accent: Color::Rgb(136, 57, 239),
        }
    }

    /// Monochrome, for terminals without true color.
    pub const fn mono() -> Self {
        Self {
            name: "mono",
            bg: Color::Reset,
            fg: Color::Reset,
            rx_color: Color::Reset,
            error_color: Color::Reset,
            border: Color::Reset,
            selection: Color::DarkGray,
            inactive: Color::Gray,
            accent: Color::White,
        }
    }

    pub fn by_name(name: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|t| t.name == name)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Available themes
pub static THEMES: &[Theme] = &[Theme::dark(), Theme::light(), Theme::mono()];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_by_name() {
        assert!(Theme::by_name("dark").is_some());
        assert!(Theme::by_name("light").is_some());
        assert!(Theme::by_name("mono").is_some());
        assert!(Theme::by_name("nonexistent").is_none());
    }

    #[test]
    fn test_theme_default() {
        assert_eq!(Theme::default().name, "dark");
    }
}
