use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::color::{Hsl, PRESET_COLORS, Rgb, hex_to_hsl, hsl_to_hex};
use crate::wheel::{
    ColorWheel, DOT_SPACING, FrameLoop, Point, WheelFrame, hue_saturation_at, selector_position,
};

/// Terminal cells covered by the wheel: one row per lattice row and two
/// columns per lattice column to keep the disc round.
pub const WHEEL_COLUMNS: u16 = 36;
pub const WHEEL_ROWS: u16 = 18;

pub const MIN_LIGHTNESS: f64 = 10.0;
pub const MAX_LIGHTNESS: f64 = 90.0;
const LIGHTNESS_STEP: f64 = 5.0;
const HUE_STEP: f64 = 5.0;
const SATURATION_STEP: f64 = 5.0;
// 15 frames at ~33 ms is the 500 ms selector pulse.
const PULSE_FRAMES: u64 = 15;

/// Maps a terminal cell inside `surface` to wheel coordinates.
pub fn cell_to_point(surface: Rect, column: u16, row: u16) -> Option<Point> {
    if column < surface.x
        || row < surface.y
        || column >= surface.x + surface.width
        || row >= surface.y + surface.height
    {
        return None;
    }
    let dx = (column - surface.x) as f64;
    let dy = (row - surface.y) as f64;
    Some(Point::new(
        DOT_SPACING * (1.0 + dx / 2.0),
        DOT_SPACING * (1.0 + dy),
    ))
}

/// Offset of the cell that shows `point`, relative to the wheel's top-left cell.
pub fn point_to_cell(point: Point) -> (i32, i32) {
    let column = ((point.x / DOT_SPACING - 1.0) * 2.0).round() as i32;
    let row = (point.y / DOT_SPACING - 1.0).round() as i32;
    (column, row)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PickerState {
    Closed,
    Open,
}

/// The accent color popover: a dot-matrix wheel, a brightness control and
/// presets. Every interaction returns the hex it wants published; the caller
/// hands it to the theme store.
#[derive(Debug)]
pub struct ColorPicker {
    state: PickerState,
    wheel: ColorWheel,
    frames: FrameLoop,
    hue: f64,
    saturation: f64,
    lightness: f64,
    dragging: bool,
    surface: Option<Rect>,
}

impl ColorPicker {
    pub fn new(accent: &str) -> Self {
        let hsl = hex_to_hsl(accent);
        Self {
            state: PickerState::Closed,
            wheel: ColorWheel::new(),
            frames: FrameLoop::default(),
            hue: hsl.h,
            saturation: hsl.s,
            lightness: hsl.l,
            dragging: false,
            surface: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == PickerState::Open
    }

    pub fn is_animating(&self) -> bool {
        self.frames.is_scheduled()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn hsl(&self) -> Hsl {
        Hsl::new(self.hue, self.saturation, self.lightness)
    }

    /// The wheel's rectangle on screen while open, `None` when there is no room.
    pub fn surface(&self) -> Option<Rect> {
        self.surface
    }

    pub fn toggle(&mut self, surface: Option<Rect>, now: Instant) {
        if self.is_open() {
            self.close();
        } else {
            self.open(surface, now);
        }
    }

    /// Opens the popover. Without a drawing surface the popover still opens
    /// but no frames are scheduled.
    pub fn open(&mut self, surface: Option<Rect>, now: Instant) {
        self.state = PickerState::Open;
        self.surface = surface;
        if surface.is_some() {
            self.frames.start(now);
        } else {
            log::debug!("no room for the color wheel, animation not started");
        }
    }

    pub fn close(&mut self) {
        self.state = PickerState::Closed;
        self.dragging = false;
        self.frames.cancel();
    }

    /// Follows a terminal resize. Losing the surface stops the animation;
    /// regaining it while open restarts it.
    pub fn resize(&mut self, surface: Option<Rect>, now: Instant) {
        if !self.is_open() {
            return;
        }
        self.surface = surface;
        match surface {
            Some(_) if !self.frames.is_scheduled() => self.frames.start(now),
            Some(_) => {}
            None => {
                self.dragging = false;
                self.frames.cancel();
            }
        }
    }

    pub fn time_until_frame(&self, now: Instant) -> Option<Duration> {
        self.frames.time_until_next(now)
    }

    pub fn frame_due(&self, now: Instant) -> bool {
        self.frames.is_due(now)
    }

    /// Advances the animation when a frame is due. Returns whether it did.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        if !self.is_open() || !self.frames.fire(now) {
            return false;
        }
        self.wheel.advance();
        true
    }

    pub fn selector(&self) -> Point {
        selector_position(self.hue, self.saturation)
    }

    /// Alternates every 500 ms of animation.
    pub fn selector_pulse(&self) -> bool {
        (self.frames.frames() / PULSE_FRAMES) % 2 == 1
    }

    pub fn frame(&self, accent: Rgb) -> WheelFrame {
        self.wheel.frame(self.selector(), self.lightness, accent)
    }

    pub fn pointer_down(&mut self, point: Point) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        self.dragging = true;
        Some(self.pick(point))
    }

    pub fn pointer_drag(&mut self, point: Point) -> Option<String> {
        if !self.is_open() || !self.dragging {
            return None;
        }
        Some(self.pick(point))
    }

    /// Ends a drag. Called for button releases anywhere on screen.
    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// A button-less move outside the wheel ends a drag as well.
    pub fn pointer_left(&mut self) {
        self.dragging = false;
    }

    pub fn brighten(&mut self) -> Option<String> {
        self.set_lightness(self.lightness + LIGHTNESS_STEP)
    }

    pub fn darken(&mut self) -> Option<String> {
        self.set_lightness(self.lightness - LIGHTNESS_STEP)
    }

    pub fn set_lightness(&mut self, lightness: f64) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        self.lightness = lightness.clamp(MIN_LIGHTNESS, MAX_LIGHTNESS);
        Some(self.hex())
    }

    pub fn rotate_hue(&mut self, clockwise: bool) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        let step = if clockwise { HUE_STEP } else { -HUE_STEP };
        self.hue = (self.hue + step).rem_euclid(360.0);
        Some(self.hex())
    }

    pub fn adjust_saturation(&mut self, more: bool) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        let step = if more { SATURATION_STEP } else { -SATURATION_STEP };
        self.saturation = (self.saturation + step).clamp(0.0, 100.0);
        Some(self.hex())
    }

    /// Adopts preset `index` (0-based). The preset hex is published verbatim.
    pub fn apply_preset(&mut self, index: usize) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        let preset = PRESET_COLORS.get(index)?;
        let hsl = hex_to_hsl(preset);
        self.hue = hsl.h;
        self.saturation = hsl.s;
        self.lightness = hsl.l;
        Some(preset.to_string())
    }

    fn pick(&mut self, point: Point) -> String {
        let (hue, saturation) = hue_saturation_at(point);
        self.hue = hue;
        self.saturation = saturation;
        self.hex()
    }

    fn hex(&self) -> String {
        hsl_to_hex(self.hue, self.saturation, self.lightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{CENTER, FRAME_INTERVAL, WHEEL_RADIUS};

    fn surface() -> Option<Rect> {
        Some(Rect::new(10, 5, WHEEL_COLUMNS, WHEEL_ROWS))
    }

    #[test]
    fn starts_closed_and_idle() {
        let picker = ColorPicker::new("#f43f5e");
        assert!(!picker.is_open());
        assert!(!picker.is_animating());
        assert_eq!(picker.hsl(), hex_to_hsl("#f43f5e"));
    }

    #[test]
    fn open_runs_frames_and_close_stops_them() {
        let now = Instant::now();
        let mut picker = ColorPicker::new("#f43f5e");

        picker.toggle(surface(), now);
        assert!(picker.is_open());
        assert!(picker.on_frame(now));
        assert!(picker.on_frame(now + FRAME_INTERVAL));
        let time = picker.wheel.time();
        assert!(time > 0.0);

        picker.toggle(surface(), now);
        assert!(!picker.is_open());
        assert!(!picker.is_animating());
        assert_eq!(picker.time_until_frame(now), None);
        for step in 2..20u32 {
            assert!(!picker.on_frame(now + FRAME_INTERVAL * step));
        }
        assert_eq!(picker.wheel.time(), time);
    }

    #[test]
    fn no_surface_means_no_animation() {
        let now = Instant::now();
        let mut picker = ColorPicker::new("#f43f5e");
        picker.open(None, now);
        assert!(picker.is_open());
        assert!(!picker.is_animating());
        assert!(!picker.on_frame(now));

        picker.resize(surface(), now);
        assert!(picker.is_animating());
        picker.resize(None, now);
        assert!(!picker.is_animating());
    }

    #[test]
    fn drag_publishes_until_released() {
        let now = Instant::now();
        let mut picker = ColorPicker::new("#f43f5e");
        assert_eq!(picker.pointer_down(CENTER), None);

        picker.open(surface(), now);
        let right_edge = Point::new(CENTER.x + WHEEL_RADIUS, CENTER.y);
        let published = picker.pointer_down(right_edge).unwrap();
        assert!(picker.is_dragging());
        let hsl = picker.hsl();
        assert!((hsl.h - 90.0).abs() < 1e-9);
        assert!((hsl.s - 100.0).abs() < 1e-9);
        assert_eq!(published, hsl.to_hex());

        let top = Point::new(CENTER.x, CENTER.y - WHEEL_RADIUS / 2.0);
        assert!(picker.pointer_drag(top).is_some());
        let hue = picker.hsl().h;
        assert!(hue.min(360.0 - hue) < 1e-9);

        picker.pointer_up();
        assert!(!picker.is_dragging());
        assert_eq!(picker.pointer_drag(right_edge), None);
    }

    #[test]
    fn leaving_the_wheel_ends_drag() {
        let mut picker = ColorPicker::new("#f43f5e");
        picker.open(surface(), Instant::now());
        picker.pointer_down(CENTER);
        picker.pointer_left();
        assert!(!picker.is_dragging());
    }

    #[test]
    fn closing_ends_drag() {
        let mut picker = ColorPicker::new("#f43f5e");
        picker.open(surface(), Instant::now());
        picker.pointer_down(CENTER);
        picker.close();
        assert!(!picker.is_dragging());
    }

    #[test]
    fn lightness_is_clamped() {
        let mut picker = ColorPicker::new("#f43f5e");
        picker.open(surface(), Instant::now());
        picker.set_lightness(95.0);
        assert_eq!(picker.hsl().l, MAX_LIGHTNESS);
        picker.set_lightness(2.0);
        assert_eq!(picker.hsl().l, MIN_LIGHTNESS);
        let hex = picker.brighten().unwrap();
        assert_eq!(picker.hsl().l, 15.0);
        assert_eq!(hex, picker.hsl().to_hex());
    }

    #[test]
    fn presets_publish_verbatim() {
        let mut picker = ColorPicker::new("#f43f5e");
        picker.open(surface(), Instant::now());
        assert_eq!(picker.apply_preset(1).as_deref(), Some("#3b82f6"));
        assert_eq!(picker.hsl(), hex_to_hsl("#3b82f6"));
        assert_eq!(picker.apply_preset(42), None);
    }

    #[test]
    fn hue_wraps_around() {
        let mut picker = ColorPicker::new("#ff0000");
        picker.open(surface(), Instant::now());
        picker.rotate_hue(false);
        assert_eq!(picker.hsl().h, 355.0);
        picker.rotate_hue(true);
        assert_eq!(picker.hsl().h, 0.0);
    }

    #[test]
    fn cells_map_onto_lattice() {
        let area = surface().unwrap();
        assert_eq!(cell_to_point(area, 9, 5), None);
        assert_eq!(cell_to_point(area, 10 + WHEEL_COLUMNS, 5), None);
        let point = cell_to_point(area, 10 + 18, 5 + 9).unwrap();
        assert_eq!(point, Point::new(100.0, 100.0));
        assert_eq!(point_to_cell(point), (18, 9));
        assert_eq!(point_to_cell(Point::new(10.0, 10.0)), (0, 0));
        assert_eq!(point_to_cell(Point::new(180.0, 180.0)), (34, 17));
    }
}
