use ratatui::{
    style::{Color, Style},
    text::Span,
};

use super::theme::Theme;
use crate::color::Rgb;

pub fn clamp_name(value: &str, width: usize) -> String {
    let value_len = value.chars().count();
    if value_len <= width {
        return format!("{value:<width$}", width = width);
    }
    let trimmed = value
        .chars()
        .take(width.saturating_sub(2))
        .collect::<String>();
    format!("{trimmed}..")
}

pub fn hex_to_color(value: &str) -> Option<Color> {
    Rgb::parse(value.trim()).map(|rgb| Color::Rgb(rgb.r, rgb.g, rgb.b))
}

/// A horizontal bar `width` cells wide, filled to `fraction`.
pub fn bar(fraction: f64, width: usize, fill: Color) -> Vec<Span<'static>> {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    vec![
        Span::styled("█".repeat(filled), Style::default().fg(fill)),
        Span::styled("░".repeat(width - filled), Style::default().fg(Theme::dim())),
    ]
}
