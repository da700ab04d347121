use ratatui::style::Color;

/// Fixed chrome colors. The user's accent comes from the theme store.
pub struct Theme;

impl Theme {
    /// Fallback when the accent cannot be parsed
    pub fn primary() -> Color {
        Color::Rgb(0xf4, 0x3f, 0x5e)
    }

    /// Borders
    pub fn secondary() -> Color {
        Color::DarkGray
    }

    /// Focused tile border
    pub fn focused() -> Color {
        Color::Gray
    }

    /// Active input field
    pub fn highlight() -> Color {
        Color::Cyan
    }

    /// Selection marker/arrow
    pub fn selection_marker() -> Color {
        Color::Green
    }

    pub fn dim() -> Color {
        Color::DarkGray
    }

    pub fn text() -> Color {
        Color::White
    }

    /// Numbers and titles
    pub fn accent() -> Color {
        Color::LightBlue
    }

    pub fn warn() -> Color {
        Color::Yellow
    }
}
