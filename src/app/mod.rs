mod picker;
mod state;
mod tracker;

use crossterm::event::{KeyCode, MouseEvent};

pub use picker::{
    ColorPicker, MAX_LIGHTNESS, MIN_LIGHTNESS, WHEEL_COLUMNS, WHEEL_ROWS, cell_to_point,
    point_to_cell,
};
pub use state::{App, BirthdayPopup};
pub use tracker::{GoalField, GoalForm, GoalTracker};

/// Possible input events the app reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    /// The color wheel's next animation frame is due.
    Frame,
    KeyPress(KeyCode),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Which dashboard tile receives navigation keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Year,
    Goals,
    Life,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Year => Focus::Goals,
            Focus::Goals => Focus::Life,
            Focus::Life => Focus::Year,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Year => Focus::Life,
            Focus::Goals => Focus::Year,
            Focus::Life => Focus::Goals,
        }
    }
}
