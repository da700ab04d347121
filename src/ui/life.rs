use chrono::NaiveDate;
use ratatui::{
    Frame,
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::layout::centered_rect;
use super::theme::Theme;
use crate::app::BirthdayPopup;
use crate::store::LifeSettings;

const YEARS_PER_ROW: u32 = 20;
const WEEKS_PER_YEAR: u32 = 52;

/// Weeks lived, one cell per year of the expected life.
pub fn build_life_text(life: &LifeSettings, today: NaiveDate, accent: Color) -> Text<'static> {
    let mut lines = Vec::new();
    let Some(percentage) = life.percentage_lived(today) else {
        lines.push(Line::from(Span::styled(
            "No birthday set.",
            Style::default().fg(Theme::dim()),
        )));
        lines.push(Line::from(Span::styled(
            "Press b to enter it.",
            Style::default().fg(Theme::dim()),
        )));
        lines.push(Line::from(Span::styled(
            format!("Life expectancy: {} years", life.life_expectancy()),
            Style::default().fg(Theme::text()),
        )));
        return Text::from(lines);
    };

    let lived = life.weeks_lived(today);
    let total = life.total_weeks();
    lines.push(Line::from(vec![
        Span::styled(
            format!("{lived}"),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" / {total} weeks  "),
            Style::default().fg(Theme::dim()),
        ),
        Span::styled(
            format!("{percentage:.1}%"),
            Style::default()
                .fg(Theme::text())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  of {} years", life.life_expectancy()),
            Style::default().fg(Theme::dim()),
        ),
    ]));

    let years_lived = lived / WEEKS_PER_YEAR;
    let years = life.life_expectancy();
    let mut row = Vec::new();
    for year in 0..years {
        let (glyph, style) = if year < years_lived {
            ("■", Style::default().fg(accent))
        } else if year == years_lived {
            ("▣", Style::default().fg(accent).add_modifier(Modifier::BOLD))
        } else {
            ("□", Style::default().fg(Theme::dim()))
        };
        row.push(Span::styled(glyph, style));
        row.push(Span::raw(" "));
        if (year + 1) % YEARS_PER_ROW == 0 {
            lines.push(Line::from(std::mem::take(&mut row)));
        }
    }
    if !row.is_empty() {
        lines.push(Line::from(row));
    }
    Text::from(lines)
}

pub fn render_birthday_popup(frame: &mut Frame, popup: &BirthdayPopup) {
    let area = centered_rect(50, 30, frame.area());
    frame.render_widget(Clear, area);

    let input = if popup.input.is_empty() {
        "YYYY-MM-DD"
    } else {
        popup.input.as_str()
    };
    let lines = vec![
        Line::from(Span::styled(
            "Birthday",
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Date: ", Style::default().fg(Theme::dim())),
            Span::styled(
                input,
                Style::default()
                    .fg(Theme::highlight())
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: save (empty clears). Esc: cancel.",
            Style::default().fg(Theme::dim()),
        )),
    ];

    let widget = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary()))
                .title(" Life "),
        );
    frame.render_widget(widget, area);
}
