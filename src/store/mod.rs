/// Persistent state shared by the widgets. Each store is built once per
/// session and lent by reference to whoever reads or mutates it.
mod goals;
mod life;
mod theme;

pub use goals::{GoalStore, parse_goal_date};
pub use life::LifeSettings;
pub use theme::ThemeStore;
#[cfg(test)]
pub use theme::{COLOR_KEY, DEFAULT_COLOR};
