use chrono::NaiveDateTime;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::bar;
use super::theme::Theme;
use crate::progress::{TimeSpan, day_span, format_remaining, month_span, week_span, year_span};

const LABEL_WIDTH: usize = 7;
// Label, percentage and remaining time around the bar.
const BAR_CHROME: usize = LABEL_WIDTH + 16;

fn progress_line(label: &str, span: TimeSpan, width: usize, accent: Color) -> Line<'static> {
    let fraction = span.fraction();
    let mut spans = vec![Span::styled(
        format!("{label:<pad$}", pad = LABEL_WIDTH),
        Style::default().fg(Theme::dim()),
    )];
    spans.extend(bar(fraction, width, accent));
    spans.push(Span::styled(
        format!(" {:>5.1}%", fraction * 100.0),
        Style::default()
            .fg(Theme::text())
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(
        format!(" {:>8}", format_remaining(span.remaining())),
        Style::default().fg(Theme::dim()),
    ));
    Line::from(spans)
}

/// The clock and the day/week/month/year progress bars.
pub fn build_progress_text(now: NaiveDateTime, accent: Color, width: u16) -> Text<'static> {
    let bar_width = (width as usize).saturating_sub(BAR_CHROME).max(4);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                now.format("%H:%M:%S").to_string(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                now.format("  %A, %B %e, %Y").to_string(),
                Style::default().fg(Theme::dim()),
            ),
        ]),
        Line::from(""),
    ];
    lines.push(progress_line("Day", day_span(now), bar_width, accent));
    lines.push(progress_line("Week", week_span(now), bar_width, accent));
    lines.push(progress_line("Month", month_span(now), bar_width, accent));
    lines.push(progress_line("Year", year_span(now), bar_width, accent));
    Text::from(lines)
}
