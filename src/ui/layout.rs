use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::{MAX_LIGHTNESS, MIN_LIGHTNESS, WHEEL_COLUMNS, WHEEL_ROWS};
use crate::color::PRESET_COLORS;

pub const PICKER_WIDTH: u16 = WHEEL_COLUMNS + 8;
pub const PICKER_HEIGHT: u16 = WHEEL_ROWS + 7;
const HEADER_HEIGHT: u16 = 3;
const SWATCH_WIDTH: u16 = 6;
const BRIGHTNESS_LABEL: u16 = 8;
pub const BRIGHTNESS_CELLS: u16 = 32;
pub const PRESET_STRIDE: u16 = 3;

/// Screen regions of the dashboard, shared by drawing and mouse hit-testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    pub swatch: Rect,
    pub progress: Rect,
    pub life: Rect,
    pub year: Rect,
    pub goals: Rect,
    pub footer: Rect,
}

pub fn dashboard_layout(area: Rect) -> DashboardLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(9),
            Constraint::Min(14),
            Constraint::Length(3),
        ])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(70), Constraint::Min(30)])
        .split(rows[2]);

    let header = rows[0];
    let swatch = Rect {
        x: header.right().saturating_sub(SWATCH_WIDTH + 2),
        y: header.y + 1,
        width: SWATCH_WIDTH.min(header.width),
        height: 1.min(header.height),
    };

    DashboardLayout {
        header,
        swatch,
        progress: top[0],
        life: top[1],
        year: bottom[0],
        goals: bottom[1],
        footer: rows[3],
    }
}

/// The color picker popover, hanging under the header swatch. `None` when the
/// terminal cannot fit it.
pub fn picker_popup(area: Rect) -> Option<Rect> {
    if area.width < PICKER_WIDTH + 2 || area.height < HEADER_HEIGHT + PICKER_HEIGHT {
        return None;
    }
    Some(Rect {
        x: area.right() - PICKER_WIDTH - 1,
        y: area.y + HEADER_HEIGHT,
        width: PICKER_WIDTH,
        height: PICKER_HEIGHT,
    })
}

pub fn wheel_rect(popup: Rect) -> Rect {
    Rect {
        x: popup.x + (popup.width - WHEEL_COLUMNS) / 2,
        y: popup.y + 1,
        width: WHEEL_COLUMNS,
        height: WHEEL_ROWS,
    }
}

pub fn brightness_rect(popup: Rect) -> Rect {
    Rect {
        x: popup.x + 2,
        y: popup.y + WHEEL_ROWS + 2,
        width: BRIGHTNESS_LABEL + BRIGHTNESS_CELLS,
        height: 1,
    }
}

pub fn preview_rect(popup: Rect) -> Rect {
    Rect {
        y: popup.y + WHEEL_ROWS + 3,
        ..brightness_rect(popup)
    }
}

pub fn presets_rect(popup: Rect) -> Rect {
    Rect {
        y: popup.y + WHEEL_ROWS + 4,
        width: PRESET_STRIDE * PRESET_COLORS.len() as u16,
        ..brightness_rect(popup)
    }
}

pub fn hint_rect(popup: Rect) -> Rect {
    Rect {
        y: popup.y + WHEEL_ROWS + 5,
        width: popup.width.saturating_sub(4),
        ..brightness_rect(popup)
    }
}

/// Lightness under a click on the brightness bar.
pub fn lightness_at(popup: Rect, column: u16, row: u16) -> Option<f64> {
    let bar = brightness_rect(popup);
    let start = bar.x + BRIGHTNESS_LABEL;
    if row != bar.y || column < start || column >= start + BRIGHTNESS_CELLS {
        return None;
    }
    let offset = (column - start) as f64 / (BRIGHTNESS_CELLS - 1) as f64;
    Some(MIN_LIGHTNESS + offset * (MAX_LIGHTNESS - MIN_LIGHTNESS))
}

/// Cell of the brightness bar that shows `lightness`.
pub fn lightness_cell(lightness: f64) -> u16 {
    let offset = (lightness - MIN_LIGHTNESS) / (MAX_LIGHTNESS - MIN_LIGHTNESS);
    (offset.clamp(0.0, 1.0) * (BRIGHTNESS_CELLS - 1) as f64).round() as u16
}

/// Preset swatch under a click. Swatches are two cells wide with a gap.
pub fn preset_at(popup: Rect, column: u16, row: u16) -> Option<usize> {
    let presets = presets_rect(popup);
    if row != presets.y || column < presets.x {
        return None;
    }
    let offset = column - presets.x;
    let index = (offset / PRESET_STRIDE) as usize;
    if offset % PRESET_STRIDE == PRESET_STRIDE - 1 || index >= PRESET_COLORS.len() {
        return None;
    }
    Some(index)
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

pub fn inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(width: u16, height: u16) -> Rect {
        Rect::new(0, 0, width, height)
    }

    #[test]
    fn picker_needs_room() {
        assert_eq!(picker_popup(screen(40, 40)), None);
        assert_eq!(picker_popup(screen(120, 20)), None);

        let popup = picker_popup(screen(120, 40)).unwrap();
        assert_eq!(popup.right(), 119);
        assert_eq!(popup.y, HEADER_HEIGHT);

        let wheel = wheel_rect(popup);
        assert!(contains(popup, wheel.x, wheel.y));
        assert!(contains(popup, wheel.right() - 1, wheel.bottom() - 1));
    }

    #[test]
    fn brightness_bar_spans_lightness_range() {
        let popup = picker_popup(screen(120, 40)).unwrap();
        let bar = brightness_rect(popup);
        let start = bar.x + BRIGHTNESS_LABEL;

        assert_eq!(lightness_at(popup, start, bar.y), Some(MIN_LIGHTNESS));
        assert_eq!(
            lightness_at(popup, start + BRIGHTNESS_CELLS - 1, bar.y),
            Some(MAX_LIGHTNESS)
        );
        assert_eq!(lightness_at(popup, start - 1, bar.y), None);
        assert_eq!(lightness_at(popup, start, bar.y + 1), None);
        assert_eq!(lightness_cell(MAX_LIGHTNESS), BRIGHTNESS_CELLS - 1);
        assert_eq!(lightness_cell(MIN_LIGHTNESS), 0);
    }

    #[test]
    fn preset_hit_testing_skips_gaps() {
        let popup = picker_popup(screen(120, 40)).unwrap();
        let presets = presets_rect(popup);

        assert_eq!(preset_at(popup, presets.x, presets.y), Some(0));
        assert_eq!(preset_at(popup, presets.x + 1, presets.y), Some(0));
        assert_eq!(preset_at(popup, presets.x + 2, presets.y), None);
        assert_eq!(preset_at(popup, presets.x + 3, presets.y), Some(1));
        assert_eq!(preset_at(popup, presets.x + 7 * PRESET_STRIDE, presets.y), Some(7));
        assert_eq!(preset_at(popup, presets.x + 8 * PRESET_STRIDE, presets.y), None);
    }

    #[test]
    fn swatch_sits_in_header() {
        let layout = dashboard_layout(screen(120, 40));
        assert!(contains(layout.header, layout.swatch.x, layout.swatch.y));
        assert!(contains(
            layout.header,
            layout.swatch.right() - 1,
            layout.swatch.y
        ));
    }
}
