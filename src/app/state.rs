use std::time::{Duration, Instant};

use chrono::{Datelike, Local, Months, NaiveDate};
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use rusqlite::Connection;

use crate::store::{GoalStore, LifeSettings, ThemeStore, parse_goal_date};
use crate::ui::layout::{
    contains, dashboard_layout, lightness_at, picker_popup, preset_at, wheel_rect,
};
use crate::ui::year;
use crate::wheel::Point;

use super::{AppEvent, ColorPicker, Focus, GoalField, GoalTracker, cell_to_point};

const LIFE_EXPECTANCY_STEP: u32 = 1;

/// The top-level application state.
pub struct App {
    pub running: bool,
    pub db: Connection,
    pub theme: ThemeStore,
    pub goals: GoalStore,
    pub life: LifeSettings,
    pub picker: ColorPicker,
    pub tracker: GoalTracker,
    pub year_cursor: NaiveDate,
    pub focus: Focus,
    pub viewport: Rect,
    pub show_help: bool,
    pub status: Option<String>,
    pub birthday_popup: Option<BirthdayPopup>,
}

#[derive(Clone, Debug, Default)]
pub struct BirthdayPopup {
    pub input: String,
}

impl App {
    pub fn new(db: Connection, viewport: Rect) -> Self {
        let theme = match ThemeStore::load(&db) {
            Ok(theme) => theme,
            Err(err) => {
                log::warn!("failed to load accent color: {err:#}");
                ThemeStore::new(None)
            }
        };
        let goals = match GoalStore::load(&db) {
            Ok(goals) => goals,
            Err(err) => {
                log::warn!("failed to load goals: {err:#}");
                GoalStore::default()
            }
        };
        let life = match LifeSettings::load(&db) {
            Ok(life) => life,
            Err(err) => {
                log::warn!("failed to load life settings: {err:#}");
                LifeSettings::default()
            }
        };
        let picker = ColorPicker::new(theme.hex());

        Self {
            running: true,
            db,
            theme,
            goals,
            life,
            picker,
            tracker: GoalTracker::default(),
            year_cursor: Local::now().date_naive(),
            focus: Focus::Year,
            viewport,
            show_help: false,
            status: None,
            birthday_popup: None,
        }
    }

    /// Central update function - process an event and mutate state.
    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => {}
            AppEvent::Frame => {
                self.picker.on_frame(Instant::now());
            }
            AppEvent::KeyPress(key) => self.handle_key(key),
            AppEvent::Mouse(mouse) => self.handle_mouse(mouse),
            AppEvent::Resize(width, height) => self.resize(width, height),
        }
    }

    /// How long the event loop may block before the wheel needs a frame.
    pub fn time_until_frame(&self, now: Instant) -> Option<Duration> {
        self.picker.time_until_frame(now)
    }

    pub fn frame_due(&self, now: Instant) -> bool {
        self.picker.frame_due(now)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Rect::new(0, 0, width, height);
        self.picker.resize(self.wheel_surface(), Instant::now());
        if self.picker.is_open() && !self.picker.is_animating() {
            self.status = Some("Terminal too small for the color wheel.".to_string());
        }
    }

    fn wheel_surface(&self) -> Option<Rect> {
        picker_popup(self.viewport).map(wheel_rect)
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.tracker.form.is_some() {
            self.handle_goal_form_key(key);
            return;
        }
        if self.birthday_popup.is_some() {
            self.handle_birthday_key(key);
            return;
        }
        if self.picker.is_open() {
            self.handle_picker_key(key);
            return;
        }
        if self.show_help {
            match key {
                KeyCode::Char('q') => self.running = false,
                KeyCode::Char('?') | KeyCode::Esc => self.show_help = false,
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('c') => self.open_picker(),
            KeyCode::Char('n') => {
                self.focus = Focus::Goals;
                self.tracker.open_form();
                self.clear_status();
            }
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Esc => self.clear_status(),
            _ => match self.focus {
                Focus::Year => self.handle_year_key(key),
                Focus::Goals => self.handle_goals_key(key),
                Focus::Life => self.handle_life_key(key),
            },
        }
    }

    fn handle_picker_key(&mut self, key: KeyCode) {
        let published = match key {
            KeyCode::Char('q') => {
                self.running = false;
                None
            }
            KeyCode::Esc | KeyCode::Char('c') => {
                self.picker.close();
                None
            }
            KeyCode::Left => self.picker.rotate_hue(false),
            KeyCode::Right => self.picker.rotate_hue(true),
            KeyCode::Up => self.picker.adjust_saturation(true),
            KeyCode::Down => self.picker.adjust_saturation(false),
            KeyCode::Char('+') | KeyCode::Char('=') => self.picker.brighten(),
            KeyCode::Char('-') => self.picker.darken(),
            KeyCode::Char(ch @ '1'..='8') => {
                let index = ch as usize - '1' as usize;
                self.picker.apply_preset(index)
            }
            _ => None,
        };
        if let Some(hex) = published {
            self.publish_color(&hex);
        }
    }

    fn handle_year_key(&mut self, key: KeyCode) {
        let year = self.year_cursor.year();
        let moved = match key {
            KeyCode::Left => self.year_cursor.pred_opt(),
            KeyCode::Right => self.year_cursor.succ_opt(),
            KeyCode::Up => self.year_cursor.checked_sub_months(Months::new(1)),
            KeyCode::Down => self.year_cursor.checked_add_months(Months::new(1)),
            KeyCode::Enter => {
                self.select_date(self.year_cursor);
                None
            }
            _ => None,
        };
        if let Some(date) = moved.filter(|date| date.year() == year) {
            self.year_cursor = date;
        }
    }

    fn handle_goals_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.tracker.select_prev(self.goals.len()),
            KeyCode::Down => self.tracker.select_next(self.goals.len()),
            KeyCode::Char('d') | KeyCode::Delete => {
                match self.tracker.remove_selected(&mut self.goals, &self.db) {
                    Ok(true) => self.status = Some("Goal removed.".to_string()),
                    Ok(false) => {}
                    Err(err) => self.status = Some(format!("Failed to remove goal: {err}")),
                }
            }
            _ => {}
        }
    }

    fn handle_life_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('b') => {
                let input = self
                    .life
                    .birthday()
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                self.birthday_popup = Some(BirthdayPopup { input });
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let years = self.life.life_expectancy() + LIFE_EXPECTANCY_STEP;
                self.set_life_expectancy(years);
            }
            KeyCode::Char('-') => {
                let years = self
                    .life
                    .life_expectancy()
                    .saturating_sub(LIFE_EXPECTANCY_STEP);
                self.set_life_expectancy(years);
            }
            _ => {}
        }
    }

    fn handle_goal_form_key(&mut self, key: KeyCode) {
        let Some(form) = self.tracker.form.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => {
                self.tracker.cancel();
                self.clear_status();
            }
            KeyCode::Enter => self.apply_goal_form(),
            KeyCode::Tab | KeyCode::BackTab => form.next_field(),
            KeyCode::Backspace | KeyCode::Delete => form.pop(),
            KeyCode::Char(ch) => {
                if ch.is_control() {
                    return;
                }
                if form.field == GoalField::Date && !(ch.is_ascii_digit() || ch == '-') {
                    return;
                }
                form.push(ch);
            }
            _ => {}
        }
    }

    fn apply_goal_form(&mut self) {
        match self.tracker.submit(&mut self.goals, &self.db) {
            Ok(Some(_)) => self.status = Some("Goal added.".to_string()),
            Ok(None) => {
                self.status = Some("A goal needs text and a date (YYYY-MM-DD).".to_string())
            }
            Err(err) => self.status = Some(format!("Failed to save goal: {err}")),
        }
    }

    fn handle_birthday_key(&mut self, key: KeyCode) {
        let Some(popup) = self.birthday_popup.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => {
                self.birthday_popup = None;
                self.clear_status();
            }
            KeyCode::Enter => self.apply_birthday_popup(),
            KeyCode::Backspace | KeyCode::Delete => {
                popup.input.pop();
            }
            KeyCode::Char(ch) => {
                if ch.is_ascii_digit() || ch == '-' {
                    popup.input.push(ch);
                }
            }
            _ => {}
        }
    }

    fn apply_birthday_popup(&mut self) {
        let Some(popup) = self.birthday_popup.take() else {
            return;
        };
        let birthday = parse_goal_date(&popup.input);
        if birthday.is_none() && !popup.input.trim().is_empty() {
            self.status = Some("Birthday must be a date like 1990-01-31.".to_string());
            self.birthday_popup = Some(popup);
            return;
        }
        if birthday.is_some_and(|date| date > Local::now().date_naive()) {
            self.status = Some("Birthday cannot be in the future.".to_string());
            self.birthday_popup = Some(popup);
            return;
        }

        match self.life.set_birthday(birthday, &self.db) {
            Ok(()) => self.status = Some("Birthday saved.".to_string()),
            Err(err) => {
                self.status = Some(format!("Failed to save birthday: {err}"));
                self.birthday_popup = Some(popup);
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(column, row),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(point) = self.wheel_point(column, row) {
                    if let Some(hex) = self.picker.pointer_drag(point) {
                        self.publish_color(&hex);
                    }
                }
            }
            MouseEventKind::Up(_) => self.picker.pointer_up(),
            MouseEventKind::Moved => {
                if self.picker.is_dragging() && self.wheel_point(column, row).is_none() {
                    self.picker.pointer_left();
                }
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        if self.picker.is_open() {
            self.handle_picker_click(column, row);
            return;
        }
        if self.birthday_popup.is_some() || self.show_help {
            return;
        }

        let layout = dashboard_layout(self.viewport);
        // Clicks outside the goals tile and the year grid dismiss an open form.
        if self.tracker.form.is_some()
            && !contains(layout.goals, column, row)
            && !contains(layout.year, column, row)
        {
            self.tracker.cancel();
            self.clear_status();
            return;
        }

        if contains(layout.swatch, column, row) {
            self.open_picker();
        } else if contains(layout.year, column, row) {
            self.focus = Focus::Year;
            if let Some(date) = year::cell_date(layout.year, self.year_cursor.year(), column, row)
            {
                self.year_cursor = date;
                self.select_date(date);
            }
        } else if contains(layout.goals, column, row) {
            self.focus = Focus::Goals;
        } else if contains(layout.life, column, row) {
            self.focus = Focus::Life;
        }
    }

    fn handle_picker_click(&mut self, column: u16, row: u16) {
        if let Some(point) = self.wheel_point(column, row) {
            if let Some(hex) = self.picker.pointer_down(point) {
                self.publish_color(&hex);
            }
            return;
        }
        if let Some(popup) = picker_popup(self.viewport) {
            if contains(popup, column, row) {
                let published = if let Some(lightness) = lightness_at(popup, column, row) {
                    self.picker.set_lightness(lightness)
                } else if let Some(index) = preset_at(popup, column, row) {
                    self.picker.apply_preset(index)
                } else {
                    None
                };
                if let Some(hex) = published {
                    self.publish_color(&hex);
                }
                return;
            }
        }
        // Anything outside the popover, the header swatch included, closes it.
        self.picker.close();
    }

    fn wheel_point(&self, column: u16, row: u16) -> Option<Point> {
        if !self.picker.is_open() {
            return None;
        }
        self.picker
            .surface()
            .and_then(|surface| cell_to_point(surface, column, row))
    }

    fn open_picker(&mut self) {
        let surface = self.wheel_surface();
        self.picker.open(surface, Instant::now());
        if surface.is_none() {
            self.status = Some("Terminal too small for the color wheel.".to_string());
        } else {
            self.clear_status();
        }
    }

    fn select_date(&mut self, date: NaiveDate) {
        self.tracker.set_selected_date(date);
        self.status = Some(format!("Selected {}.", date.format("%b %e, %Y")));
    }

    fn set_life_expectancy(&mut self, years: u32) {
        if let Err(err) = self.life.set_life_expectancy(years, &self.db) {
            self.status = Some(format!("Failed to save life expectancy: {err}"));
        }
    }

    /// Hands a color chosen in the picker to the theme store.
    fn publish_color(&mut self, hex: &str) {
        match self.theme.set_color(hex, &self.db) {
            Ok(true) => {}
            Ok(false) => self.status = Some(format!("Ignored invalid color {hex}.")),
            Err(err) => self.status = Some(format!("Failed to save color: {err}")),
        }
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
