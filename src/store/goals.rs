use anyhow::Result;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;

use crate::color::random_goal_color;
use crate::db;
use crate::types::{Goal, GoalId};

pub const GOALS_KEY: &str = "timeleft-goals";

/// Parses an ISO calendar date as typed into a form. Blank input means the
/// date is unset.
pub fn parse_goal_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Goals in creation order. The whole list is rewritten on every change.
#[derive(Clone, Debug, Default)]
pub struct GoalStore {
    goals: Vec<Goal>,
}

impl GoalStore {
    pub fn new(goals: Vec<Goal>) -> Self {
        Self { goals }
    }

    pub fn load(conn: &Connection) -> Result<Self> {
        let goals = match db::read_json::<Vec<Goal>>(GOALS_KEY, conn) {
            Ok(goals) => goals.unwrap_or_default(),
            Err(err) => {
                log::warn!("{err:#}; starting with no goals");
                Vec::new()
            }
        };
        Ok(Self::new(goals))
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn goals_on(&self, date: NaiveDate) -> impl Iterator<Item = &Goal> {
        self.goals.iter().filter(move |goal| goal.date == date)
    }

    /// Appends a goal with a fresh id and a random palette color.
    /// Blank text or a missing date leaves the store untouched and yields `None`.
    pub fn add_goal(
        &mut self,
        text: &str,
        date: Option<NaiveDate>,
        conn: &Connection,
    ) -> Result<Option<GoalId>> {
        let text = text.trim();
        let Some(date) = date else {
            return Ok(None);
        };
        if text.is_empty() {
            return Ok(None);
        }

        let goal = Goal {
            id: self.next_id(),
            text: text.to_string(),
            date,
            color: random_goal_color(),
        };
        let mut goals = self.goals.clone();
        goals.push(goal.clone());
        db::write_json(GOALS_KEY, &goals, conn)?;
        self.goals = goals;

        log::info!("added goal {} for {}", goal.id, goal.date);
        Ok(Some(goal.id))
    }

    /// Removes the goal with `id`. Returns whether anything was removed.
    pub fn remove_goal(&mut self, id: &str, conn: &Connection) -> Result<bool> {
        if !self.goals.iter().any(|goal| goal.id == id) {
            return Ok(false);
        }
        let goals: Vec<Goal> = self
            .goals
            .iter()
            .filter(|goal| goal.id != id)
            .cloned()
            .collect();
        db::write_json(GOALS_KEY, &goals, conn)?;
        self.goals = goals;

        log::info!("removed goal {id}");
        Ok(true)
    }

    // Millisecond timestamp, bumped past every existing numeric id so two
    // goals created within the same millisecond still differ.
    fn next_id(&self) -> GoalId {
        let now = Local::now().timestamp_millis();
        let highest = self
            .goals
            .iter()
            .filter_map(|goal| goal.id.parse::<i64>().ok())
            .max()
            .unwrap_or(i64::MIN);
        let mut id = now.max(highest.saturating_add(1));
        while self.goals.iter().any(|goal| goal.id == id.to_string()) {
            id += 1;
        }
        id.to_string()
    }
}
