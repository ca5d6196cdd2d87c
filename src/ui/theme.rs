use ratatui::style::{Color, Modifier, Style};

/// Styles for the semantic roles of the interface: the header band, the
/// three transcript categories, and the status/prompt chrome.
#[derive(Debug, Clone)]
pub struct Theme {
    pub header_style: Style,
    pub user_style: Style,
    pub assistant_style: Style,
    pub notice_style: Style,
    pub status_style: Style,
    pub prompt_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            header_style: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            assistant_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            notice_style: Style::default().fg(Color::DarkGray),
            status_style: Style::default().fg(Color::Yellow),
            prompt_style: Style::default().fg(Color::Cyan),
        }
    }

    pub fn light() -> Self {
        Theme {
            header_style: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            assistant_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            notice_style: Style::default().fg(Color::Gray),
            status_style: Style::default().fg(Color::DarkGray),
            prompt_style: Style::default().fg(Color::Black),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            // Fallback
            _ => Self::dark_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_the_dark_theme() {
        let fallback = Theme::from_name("no-such-theme");
        let dark = Theme::dark_default();
        assert_eq!(fallback.user_style, dark.user_style);
    }

    #[test]
    fn named_lookup_is_case_insensitive() {
        let light = Theme::from_name("Light");
        assert_eq!(light.user_style, Theme::light().user_style);
    }
}
