mod dashboard;
mod goals;
mod help;
mod helpers;
pub mod layout;
mod life;
mod theme;
mod wheel;
pub mod year;

use chrono::{Datelike, Local};
use ratatui::{
    Frame,
    layout::Rect,
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, Focus};
use helpers::hex_to_color;
use theme::Theme;

fn tile(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Theme::focused()
    } else {
        Theme::secondary()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(border))
        .title(title)
}

/// Renders the entire UI for a single frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let regions = layout::dashboard_layout(area);
    let now = Local::now().naive_local();
    let today = now.date();
    let accent = hex_to_color(app.theme.hex()).unwrap_or(Theme::primary());

    let header = Paragraph::new(Text::from(vec![Line::from(vec![
        Span::styled(
            "  notime  ",
            Style::default().fg(Color::Black).bg(accent),
        ),
        Span::raw(" "),
        Span::styled(
            "the time you have left",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
    ])]))
    .alignment(Alignment::Left)
    .block(tile(String::new(), false));
    frame.render_widget(header, regions.header);
    render_swatch(frame, regions.swatch, app, accent);

    let progress = Paragraph::new(dashboard::build_progress_text(
        now,
        accent,
        layout::inner(regions.progress).width,
    ))
    .block(tile(" Progress ".to_string(), false));
    frame.render_widget(progress, regions.progress);

    let life = Paragraph::new(life::build_life_text(&app.life, today, accent))
        .block(tile(" Life ".to_string(), app.focus == Focus::Life));
    frame.render_widget(life, regions.life);

    let year = Paragraph::new(year::build_year_text(app, today)).block(tile(
        format!(" {} ", app.year_cursor.year()),
        app.focus == Focus::Year,
    ));
    frame.render_widget(year, regions.year);

    if let Some(form) = &app.tracker.form {
        goals::render_goal_form(frame, regions.goals, form, accent);
    } else {
        let inner = layout::inner(regions.goals);
        let scroll = goals::scroll_offset(app.tracker.selected_index, inner.height);
        let goals = Paragraph::new(goals::build_goals_text(app, today, inner.width))
            .scroll((scroll, 0))
            .block(tile(
                format!(" Goals ({}) ", app.goals.len()),
                app.focus == Focus::Goals,
            ));
        frame.render_widget(goals, regions.goals);
    }

    let footer = Paragraph::new(Text::from(footer_line(app)))
        .alignment(Alignment::Left)
        .block(tile(String::new(), false));
    frame.render_widget(footer, regions.footer);

    if app.show_help {
        let area = layout::centered_rect(70, 80, area);
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help::build_help_text())
            .block(tile(" Help ".to_string(), true));
        frame.render_widget(help, area);
    }
    if let Some(popup) = &app.birthday_popup {
        life::render_birthday_popup(frame, popup);
    }
    if app.picker.is_open() {
        wheel::render_picker(frame, app);
    }
}

fn render_swatch(frame: &mut Frame, area: Rect, app: &App, accent: Color) {
    let color = if app.picker.is_open() {
        hex_to_color(&app.theme.theme().hover).unwrap_or(accent)
    } else {
        accent
    };
    frame.render_widget(
        Paragraph::new(Span::styled("██████", Style::default().fg(color))),
        area,
    );
}

fn footer_line(app: &App) -> Line<'static> {
    if let Some(status) = &app.status {
        return Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Theme::warn()),
        ));
    }
    let hint = if app.picker.is_open() {
        "←/→ hue  ↑/↓ saturation  +/- light  1-8 preset  esc: close"
    } else {
        match app.focus {
            Focus::Year => "←/→ day  ↑/↓ month  enter: select  n: new goal  c: color  ?: help  q: quit",
            Focus::Goals => "↑/↓ select  d: remove  n: new goal  c: color  ?: help  q: quit",
            Focus::Life => "b: birthday  +/- expectancy  c: color  ?: help  q: quit",
        }
    };
    Line::from(Span::styled(hint, Style::default().fg(Theme::dim())))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crossterm::event::KeyCode;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::app::AppEvent;
    use crate::db;

    fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn selected_goal_stays_on_screen() {
        let mut app = App::new(db::init_in_memory().unwrap(), Rect::new(0, 0, 120, 30));
        let date = NaiveDate::from_ymd_opt(2030, 1, 1);
        for index in 0..30 {
            app.goals
                .add_goal(&format!("goal-{index}"), date, &app.db)
                .unwrap();
        }
        app.focus = Focus::Goals;
        app.update(AppEvent::KeyPress(KeyCode::Up));
        assert_eq!(app.tracker.selected_index, 29);

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
        let screen = screen_text(terminal.backend().buffer());
        assert!(screen.contains("> ● goal-29"));
        assert!(!screen.contains("goal-0 "));

        app.update(AppEvent::KeyPress(KeyCode::Down));
        terminal.draw(|frame| draw(frame, &app)).unwrap();
        let screen = screen_text(terminal.backend().buffer());
        assert!(screen.contains("> ● goal-0 "));
    }
}
