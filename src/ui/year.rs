use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::hex_to_color;
use super::layout::inner;
use super::theme::Theme;
use crate::app::{App, Focus};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const LABEL_WIDTH: u16 = 4;
const DAY_WIDTH: u16 = 2;

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// The date drawn under a terminal cell of the year tile, if any.
pub fn cell_date(tile: Rect, year: i32, column: u16, row: u16) -> Option<NaiveDate> {
    let area = inner(tile);
    if row < area.y || row >= area.bottom() || column < area.x + LABEL_WIDTH {
        return None;
    }
    let month = (row - area.y) as u32 + 1;
    if month > 12 {
        return None;
    }
    let day = (column - area.x - LABEL_WIDTH) as u32 / DAY_WIDTH as u32 + 1;
    if day > days_in_month(year, month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn build_year_text(app: &App, today: NaiveDate) -> Text<'_> {
    let accent = hex_to_color(app.theme.hex()).unwrap_or(Theme::primary());
    let year = app.year_cursor.year();
    let focused = app.focus == Focus::Year;
    let selected = app.tracker.selected_date();

    let mut lines = Vec::new();
    for (index, label) in MONTH_LABELS.iter().enumerate() {
        let month = index as u32 + 1;
        let mut spans = vec![Span::styled(
            format!("{label} "),
            Style::default().fg(Theme::dim()),
        )];
        for day in 1..=days_in_month(year, month) {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };
            let goal_color = app
                .goals
                .goals_on(date)
                .next()
                .and_then(|goal| hex_to_color(&goal.color));

            let (glyph, mut style) = if let Some(color) = goal_color {
                ("◆", Style::default().fg(color).add_modifier(Modifier::BOLD))
            } else if date == today {
                ("●", Style::default().fg(accent).add_modifier(Modifier::BOLD))
            } else if date < today {
                ("·", Style::default().fg(Theme::dim()))
            } else {
                ("•", Style::default().fg(Theme::text()))
            };
            if Some(date) == selected {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if focused && date == app.year_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(glyph, style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    let total = if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    };
    let left = if today.year() == year {
        total - today.ordinal()
    } else {
        0
    };
    lines.push(Line::from(vec![
        Span::styled(format!("{left}"), Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" days left in {year}"), Style::default().fg(Theme::dim())),
    ]));

    Text::from(lines)
}
