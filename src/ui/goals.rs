use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::Rect,
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use super::helpers::{clamp_name, hex_to_color};
use super::theme::Theme;
use crate::app::{App, Focus, GoalField, GoalForm};

/// `in 3 days`, `today`, `2 days ago`.
pub fn relative_days(date: NaiveDate, today: NaiveDate) -> String {
    let days = (date - today).num_days();
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        d if d > 0 => format!("in {d} days"),
        d => format!("{} days ago", -d),
    }
}

/// First list row to show so the selected goal stays inside `rows` visible lines.
pub fn scroll_offset(selected: usize, rows: u16) -> u16 {
    let rows = usize::from(rows.max(1));
    u16::try_from(selected.saturating_sub(rows - 1)).unwrap_or(u16::MAX)
}

pub fn build_goals_text(app: &App, today: NaiveDate, width: u16) -> Text<'_> {
    let goals = app.goals.goals();
    if goals.is_empty() {
        return Text::from(vec![
            Line::from(Span::styled(
                "No goals yet.",
                Style::default().fg(Theme::dim()),
            )),
            Line::from(Span::styled(
                "Press n to add one.",
                Style::default().fg(Theme::dim()),
            )),
        ]);
    }

    let focused = app.focus == Focus::Goals;
    let name_width = (width as usize).saturating_sub(30).max(8);
    let mut lines = Vec::new();
    for (index, goal) in goals.iter().enumerate() {
        let selected = focused && index == app.tracker.selected_index;
        let color = hex_to_color(&goal.color).unwrap_or(Theme::text());
        let marker_style = if selected {
            Style::default()
                .fg(Theme::selection_marker())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::dim())
        };
        let text_style = if selected {
            Style::default()
                .fg(Theme::text())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::text())
        };
        let when_style = if goal.date < today {
            Style::default().fg(Theme::dim())
        } else {
            Style::default().fg(Theme::accent())
        };
        lines.push(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, marker_style),
            Span::styled("● ", Style::default().fg(color)),
            Span::styled(clamp_name(&goal.text, name_width), text_style),
            Span::raw(" "),
            Span::styled(
                goal.date.format("%b %e, %Y").to_string(),
                Style::default().fg(Theme::dim()),
            ),
            Span::raw("  "),
            Span::styled(relative_days(goal.date, today), when_style),
        ]));
    }
    Text::from(lines)
}

/// Draws the add form over the goals tile, leaving the year grid clickable.
pub fn render_goal_form(frame: &mut Frame, area: Rect, form: &GoalForm, accent: Color) {
    frame.render_widget(Clear, area);

    let field_style = |field: GoalField| {
        if form.field == field {
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::text())
        }
    };
    let date_display = if form.date.is_empty() {
        "YYYY-MM-DD"
    } else {
        form.date.as_str()
    };
    let submit_style = if form.can_submit() {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::dim())
    };

    let lines = vec![
        Line::from(Span::styled(
            "New goal",
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Goal: ", Style::default().fg(Theme::dim())),
            Span::styled(form.text.as_str(), field_style(GoalField::Text)),
        ]),
        Line::from(vec![
            Span::styled("Date: ", Style::default().fg(Theme::dim())),
            Span::styled(date_display, field_style(GoalField::Date)),
        ]),
        Line::from(""),
        Line::from(Span::styled("[ Add goal ]", submit_style)),
        Line::from(""),
        Line::from(Span::styled(
            "Type to edit. Tab: switch field. Click a day to set the date. Enter: add. Esc: cancel.",
            Style::default().fg(Theme::dim()),
        )),
    ];

    let popup = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary()))
                .title(" Add Goal "),
        );
    frame.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_relative_days() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let at = |d: u32| NaiveDate::from_ymd_opt(2025, 5, d).unwrap();
        assert_eq!(relative_days(at(10), today), "today");
        assert_eq!(relative_days(at(11), today), "tomorrow");
        assert_eq!(relative_days(at(9), today), "yesterday");
        assert_eq!(relative_days(at(20), today), "in 10 days");
        assert_eq!(relative_days(at(1), today), "9 days ago");
    }

    #[test]
    fn scrolls_just_enough_to_show_selection() {
        assert_eq!(scroll_offset(0, 10), 0);
        assert_eq!(scroll_offset(9, 10), 0);
        assert_eq!(scroll_offset(10, 10), 1);
        assert_eq!(scroll_offset(29, 13), 17);
        assert_eq!(scroll_offset(3, 0), 3);
    }
}
