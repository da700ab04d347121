use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::store::{GoalStore, parse_goal_date};
use crate::types::GoalId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalField {
    Text,
    Date,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalForm {
    pub text: String,
    pub date: String,
    pub field: GoalField,
}

impl GoalForm {
    fn new(date: Option<NaiveDate>) -> Self {
        Self {
            text: String::new(),
            date: date.map(format_date).unwrap_or_default(),
            field: GoalField::Text,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty() && parse_goal_date(&self.date).is_some()
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            GoalField::Text => GoalField::Date,
            GoalField::Date => GoalField::Text,
        };
    }

    pub fn push(&mut self, ch: char) {
        match self.field {
            GoalField::Text => self.text.push(ch),
            GoalField::Date => self.date.push(ch),
        }
    }

    pub fn pop(&mut self) {
        match self.field {
            GoalField::Text => {
                self.text.pop();
            }
            GoalField::Date => {
                self.date.pop();
            }
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The goal list and its add form. The store is only touched on submit and
/// on removal.
#[derive(Clone, Debug, Default)]
pub struct GoalTracker {
    pub form: Option<GoalForm>,
    pub selected_index: usize,
    selected_date: Option<NaiveDate>,
}

impl GoalTracker {
    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Takes a date reported by the calendar. An open form follows it.
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
        if let Some(form) = self.form.as_mut() {
            form.date = format_date(date);
        }
    }

    /// Opens the form with the selected date pre-filled.
    pub fn open_form(&mut self) {
        self.form = Some(GoalForm::new(self.selected_date));
    }

    pub fn cancel(&mut self) {
        self.form = None;
    }

    /// Adds the goal described by the form. The form stays open when the
    /// store rejects the input.
    pub fn submit(&mut self, goals: &mut GoalStore, conn: &Connection) -> Result<Option<GoalId>> {
        let Some(form) = &self.form else {
            return Ok(None);
        };
        let id = goals.add_goal(&form.text, parse_goal_date(&form.date), conn)?;
        if id.is_some() {
            self.form = None;
            self.selected_index = goals.len().saturating_sub(1);
        }
        Ok(id)
    }

    /// Removes the highlighted goal.
    pub fn remove_selected(&mut self, goals: &mut GoalStore, conn: &Connection) -> Result<bool> {
        let Some(goal) = goals.goals().get(self.selected_index) else {
            return Ok(false);
        };
        let id = goal.id.clone();
        let removed = goals.remove_goal(&id, conn)?;
        if self.selected_index >= goals.len() {
            self.selected_index = goals.len().saturating_sub(1);
        }
        Ok(removed)
    }

    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }
}
