use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type GoalId = String;

/// The accent color and the shade used for hover/pressed states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub hex: String,
    pub hover: String,
}

///A goal is a labelled date the user is counting down to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub text: String,
    pub date: NaiveDate,
    pub color: String,
}
