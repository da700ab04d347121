use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;

pub fn build_help_text() -> Text<'static> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        "Key bindings",
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(section_title("Global"));
    lines.extend(section_lines(&[
        "q: Quit",
        "?: Toggle help",
        "Tab/Shift+Tab: Focus next/previous tile",
        "c: Open the accent color picker (or click the swatch)",
        "n: New goal",
        "esc: Clear status",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Color picker"));
    lines.extend(section_lines(&[
        "Click or drag on the wheel: Pick hue and saturation",
        "Left/Right: Rotate hue",
        "Up/Down: More/less saturation",
        "+/-: Brighter/darker (or click the light bar)",
        "1-8: Presets",
        "esc/c or click outside: Close",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Year"));
    lines.extend(section_lines(&[
        "Left/Right: Previous/next day",
        "Up/Down: Previous/next month",
        "Enter or click: Select date for new goals",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Goals"));
    lines.extend(section_lines(&[
        "Up/Down: Move selection",
        "d: Remove selected goal",
        "Form: Tab switch field, Enter add, Esc cancel",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Life"));
    lines.extend(section_lines(&[
        "b: Set birthday",
        "+/-: Change life expectancy",
    ]));

    Text::from(lines)
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(Theme::highlight())
            .add_modifier(Modifier::BOLD),
    ))
}

fn section_lines(items: &[&str]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            Line::from(Span::styled(
                format!("  - {item}"),
                Style::default().fg(Theme::text()),
            ))
        })
        .collect()
}
