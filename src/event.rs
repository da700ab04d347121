use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crate::app::{App, AppEvent};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Polls for crossterm events and maps them to `AppEvent`s.
pub fn poll(timeout: Duration) -> Result<Option<AppEvent>> {
    if !event::poll(timeout)? {
        return Ok(Some(AppEvent::Tick));
    }
    let event = match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::KeyPress(key.code),
        Event::Mouse(mouse) => AppEvent::Mouse(mouse),
        Event::Resize(width, height) => AppEvent::Resize(width, height),
        _ => return Ok(None),
    };
    Ok(Some(event))
}

/// Runs the main event loop. Blocks for at most one tick, or less while the
/// color wheel is animating.
pub fn run(app: &mut App, terminal: &mut crate::tui::Terminal) -> Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    while app.running {
        terminal.draw(|frame| crate::ui::draw(frame, app))?;

        let timeout = app
            .time_until_frame(Instant::now())
            .map_or(TICK_RATE, |frame| frame.min(TICK_RATE));
        if let Some(event) = poll(timeout)? {
            app.update(event);
        }
        if app.frame_due(Instant::now()) {
            app.update(AppEvent::Frame);
        }
    }
    Ok(())
}
