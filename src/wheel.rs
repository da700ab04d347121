//! Dot-matrix color wheel: grid construction, polar mapping and the
//! per-frame ripple/pulse/glow effects.
//!
//! All geometry lives in a 200x200 logical surface. Hue 0 points up from the
//! center and grows clockwise; the distance from the center encodes
//! saturation linearly up to the outer radius.

use std::f64::consts::{PI, TAU};
use std::time::{Duration, Instant};

use rand::RngExt;

use crate::color::{Hsl, Rgb};

pub const WHEEL_SIZE: f64 = 200.0;
pub const WHEEL_RADIUS: f64 = WHEEL_SIZE / 2.0 - 10.0;
pub const CENTER: Point = Point {
    x: WHEEL_SIZE / 2.0,
    y: WHEEL_SIZE / 2.0,
};
pub const DOT_SIZE: f64 = 6.0;
pub const DOT_SPACING: f64 = 10.0;
/// Dots closer to the center than this are dropped to leave room for the hub.
pub const EXCLUSION_RADIUS: f64 = 15.0;
pub const HUB_RADIUS: f64 = 12.0;
pub const GLOW_DISTANCE: f64 = 50.0;
pub const TIME_STEP: f64 = 0.03;
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

const PULSE_AMPLITUDE: f64 = 0.15;
const RIPPLE_AMPLITUDE: f64 = 0.1;
const RIPPLE_WAVELENGTH: f64 = 0.1;
const RIPPLE_SPEED: f64 = 3.0;
const GLOW_GROWTH: f64 = 0.3;
const GLOW_BLUR: f64 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A grid cell of the wheel. Everything but lightness is fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub position: Point,
    pub hue: f64,
    pub saturation: f64,
    pub base_scale: f64,
    pub phase: f64,
}

/// Where the selector sits for a given hue and saturation.
pub fn selector_position(hue: f64, saturation: f64) -> Point {
    let angle = (hue - 90.0) * PI / 180.0;
    let distance = saturation / 100.0 * WHEEL_RADIUS;
    Point::new(
        CENTER.x + angle.cos() * distance,
        CENTER.y + angle.sin() * distance,
    )
}

/// Inverse of `selector_position`: the hue and saturation under `point`.
/// Points beyond the rim map onto it.
pub fn hue_saturation_at(point: Point) -> (f64, f64) {
    let dx = point.x - CENTER.x;
    let dy = point.y - CENTER.y;
    let angle = dy.atan2(dx).to_degrees() + 90.0;
    let distance = dx.hypot(dy).min(WHEEL_RADIUS);
    let mut hue = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative angles up to exactly 360
    if hue >= 360.0 {
        hue = 0.0;
    }
    let saturation = (distance / WHEEL_RADIUS * 100.0).min(100.0);
    (hue, saturation)
}

/// The immutable dot arena plus the elapsed animation time.
#[derive(Clone, Debug)]
pub struct ColorWheel {
    dots: Vec<Dot>,
    time: f64,
}

impl ColorWheel {
    pub fn new() -> Self {
        Self::with_rng(&mut rand::rng())
    }

    pub fn with_rng<R: RngExt + ?Sized>(rng: &mut R) -> Self {
        let mut dots = Vec::new();
        let mut y = DOT_SPACING;
        while y < WHEEL_SIZE - DOT_SPACING {
            let mut x = DOT_SPACING;
            while x < WHEEL_SIZE - DOT_SPACING {
                let position = Point::new(x, y);
                let distance = position.distance(CENTER);
                if distance < WHEEL_RADIUS && distance > EXCLUSION_RADIUS {
                    let (hue, saturation) = hue_saturation_at(position);
                    dots.push(Dot {
                        position,
                        hue,
                        saturation,
                        base_scale: rng.random_range(0.7..=1.0),
                        phase: rng.random_range(0.0..TAU),
                    });
                }
                x += DOT_SPACING;
            }
            y += DOT_SPACING;
        }
        Self { dots, time: 0.0 }
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn advance(&mut self) {
        self.time += TIME_STEP;
    }

    /// Computes what to draw for the current time.
    pub fn frame(&self, selector: Point, lightness: f64, accent: Rgb) -> WheelFrame {
        let time = self.time();
        let dots = self
            .dots()
            .iter()
            .map(|dot| {
                let distance = dot.position.distance(selector);
                let pulse = (time * 2.0 + dot.phase).sin() * PULSE_AMPLITUDE + 1.0;
                let ripple = (distance * RIPPLE_WAVELENGTH - time * RIPPLE_SPEED).sin()
                    * RIPPLE_AMPLITUDE
                    + 1.0;
                let glow = (1.0 - distance / GLOW_DISTANCE).max(0.0);
                let scale = dot.base_scale * pulse * ripple * (1.0 + glow * GLOW_GROWTH);
                DotSprite {
                    position: dot.position,
                    size: DOT_SIZE * scale,
                    color: Hsl::new(dot.hue, dot.saturation, lightness).to_rgb(),
                    glow,
                    blur: GLOW_BLUR * glow,
                }
            })
            .collect();
        WheelFrame {
            dots,
            hub_radius: HUB_RADIUS,
            ring_radius: (time * 3.0).sin() * 2.0 + 10.0,
            ring_color: accent,
        }
    }
}

impl Default for ColorWheel {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotSprite {
    pub position: Point,
    pub size: f64,
    pub color: Rgb,
    pub glow: f64,
    pub blur: f64,
}

/// One rendered frame: the dots followed by the empty hub and its pulsing ring.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelFrame {
    pub dots: Vec<DotSprite>,
    pub hub_radius: f64,
    pub ring_radius: f64,
    pub ring_color: Rgb,
}

/// A cancelable, self-rescheduling frame request.
///
/// `fire` consumes a due frame and books the next one; `cancel` drops the
/// pending request so nothing runs until `start` is called again.
#[derive(Clone, Debug)]
pub struct FrameLoop {
    interval: Duration,
    next_frame: Option<Instant>,
    frames: u64,
}

impl FrameLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_frame: None,
            frames: 0,
        }
    }

    /// Schedules the first frame immediately.
    pub fn start(&mut self, now: Instant) {
        self.next_frame = Some(now);
    }

    pub fn cancel(&mut self) {
        if self.next_frame.take().is_some() {
            log::debug!("frame loop cancelled after {} frames", self.frames);
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.next_frame.is_some()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_frame
            .map(|due| due.saturating_duration_since(now))
    }

    pub fn is_due(&self, now: Instant) -> bool {
        matches!(self.next_frame, Some(due) if now >= due)
    }

    /// Returns true when a frame was due; the next one is then booked one
    /// interval after `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.frames += 1;
        self.next_frame = Some(now + self.interval);
        true
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCENT: Rgb = Rgb {
        r: 0xf4,
        g: 0x3f,
        b: 0x5e,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn hue_close(a: f64, b: f64) -> bool {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d) < 1e-9
    }

    #[test]
    fn hue_zero_points_up_and_grows_clockwise() {
        let up = selector_position(0.0, 100.0);
        assert!(close(up.x, CENTER.x) && close(up.y, CENTER.y - WHEEL_RADIUS));
        let right = selector_position(90.0, 100.0);
        assert!(close(right.x, CENTER.x + WHEEL_RADIUS) && close(right.y, CENTER.y));
        let center = selector_position(200.0, 0.0);
        assert!(close(center.x, CENTER.x) && close(center.y, CENTER.y));
    }

    #[test]
    fn selector_and_pointer_mapping_are_inverse() {
        for hue in (0..360).step_by(7) {
            for saturation in [1.0, 12.5, 50.0, 73.0, 100.0] {
                let hue = hue as f64;
                let (h, s) = hue_saturation_at(selector_position(hue, saturation));
                assert!(hue_close(h, hue), "hue {hue} -> {h}");
                assert!((s - saturation).abs() < 1e-9, "sat {saturation} -> {s}");
            }
        }
    }

    #[test]
    fn pointer_beyond_rim_clamps_to_full_saturation() {
        let (hue, saturation) = hue_saturation_at(Point::new(CENTER.x, CENTER.y + 500.0));
        assert!(close(hue, 180.0));
        assert!(close(saturation, 100.0));
    }

    #[test]
    fn dots_fill_a_ring() {
        let wheel = ColorWheel::new();
        assert!(!wheel.dots().is_empty());
        for dot in wheel.dots() {
            let distance = dot.position.distance(CENTER);
            assert!(distance > EXCLUSION_RADIUS && distance < WHEEL_RADIUS);
            assert!((0.0..360.0).contains(&dot.hue));
            assert!((0.0..=100.0).contains(&dot.saturation));
            assert!((0.7..=1.0).contains(&dot.base_scale));
            assert!((0.0..TAU).contains(&dot.phase));
        }
        // the lattice point straight above the center sits on hue 0
        let above = wheel
            .dots()
            .iter()
            .find(|dot| close(dot.position.x, 100.0) && close(dot.position.y, 50.0))
            .unwrap();
        assert!(hue_close(above.hue, 0.0));
        assert!(close(above.saturation, 50.0 / WHEEL_RADIUS * 100.0));
    }

    #[test]
    fn glow_only_near_selector() {
        let wheel = ColorWheel::new();
        let selector = selector_position(90.0, 100.0);
        let frame = wheel.frame(selector, 50.0, ACCENT);
        assert_eq!(frame.dots.len(), wheel.dots().len());
        for sprite in &frame.dots {
            let distance = sprite.position.distance(selector);
            if distance >= GLOW_DISTANCE {
                assert_eq!(sprite.glow, 0.0);
                assert_eq!(sprite.blur, 0.0);
            } else {
                assert!(sprite.glow > 0.0 && sprite.glow <= 1.0);
                assert!(close(sprite.blur, 8.0 * sprite.glow));
            }
            assert!(sprite.size > 0.0 && sprite.size < DOT_SIZE * 1.7);
        }
    }

    #[test]
    fn frame_uses_widget_lightness() {
        let wheel = ColorWheel::new();
        let frame = wheel.frame(CENTER, 100.0, ACCENT);
        let white = Rgb {
            r: 255,
            g: 255,
            b: 255,
        };
        assert!(frame.dots.iter().all(|sprite| sprite.color == white));
        assert_eq!(frame.hub_radius, HUB_RADIUS);
        assert_eq!(frame.ring_color, ACCENT);
    }

    #[test]
    fn ring_oscillates_with_time() {
        let mut wheel = ColorWheel::new();
        let mut radii = Vec::new();
        for _ in 0..100 {
            wheel.advance();
            radii.push(wheel.frame(CENTER, 50.0, ACCENT).ring_radius);
        }
        assert!(radii.iter().all(|r| (8.0..=12.0).contains(r)));
        assert!(radii.iter().any(|r| *r > 11.0));
        assert!(radii.iter().any(|r| *r < 9.0));
        assert!(close(wheel.time(), 100.0 * TIME_STEP));
    }

    #[test]
    fn frame_loop_reschedules_until_cancelled() {
        let start = Instant::now();
        let mut frames = FrameLoop::default();
        assert!(!frames.fire(start));

        frames.start(start);
        assert!(frames.fire(start));
        assert!(!frames.fire(start));
        assert_eq!(frames.time_until_next(start), Some(FRAME_INTERVAL));
        assert!(frames.fire(start + FRAME_INTERVAL));

        frames.cancel();
        assert!(!frames.is_scheduled());
        assert_eq!(frames.time_until_next(start), None);
        assert!(!frames.fire(start + FRAME_INTERVAL * 10));
        assert_eq!(frames.frames(), 2);
    }
}
