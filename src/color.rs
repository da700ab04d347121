//! Color utilities: hex parsing, HSL conversion and palettes.

use rand::RngExt;

/// Accent presets offered by the color picker.
pub const PRESET_COLORS: [&str; 8] = [
    "#f43f5e", // rose
    "#3b82f6", // blue
    "#22c55e", // green
    "#a855f7", // purple
    "#f97316", // orange
    "#06b6d4", // cyan
    "#eab308", // yellow
    "#ec4899", // pink
];

/// Colors a new goal is painted with.
pub const GOAL_PALETTE: [&str; 12] = [
    "#FF1493", "#00FF7F", "#1E90FF", "#FF4500", "#32CD32", "#FF69B4", "#00CED1", "#FF6347",
    "#00FFFF", "#DA70D6", "#FFFF00", "#7FFF00",
];

/// Returned by `hex_to_hsl` for input it cannot parse.
pub const FALLBACK_HSL: Hsl = Hsl {
    h: 0.0,
    s: 100.0,
    l: 50.0,
};

/// Validate if a string is a valid hex color (e.g., #RRGGBB).
pub fn is_valid_hex(s: &str) -> bool {
    s.starts_with('#') && s.len() == 7 && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Pick a goal color uniformly at random.
pub fn random_goal_color() -> String {
    let mut rng = rand::rng();
    GOAL_PALETTE[rng.random_range(0..GOAL_PALETTE.len())].to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses `RRGGBB`, with or without a leading `#`, in either case.
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Subtracts `round(2.55 * percent)` from every channel, flooring at 0.
    ///
    /// This is a fixed per-channel delta, not a lightness change in HSL
    /// space: `#ffffff` and `#ff0000` both lose the same 38 units at 15%.
    pub fn darken(self, percent: f64) -> Self {
        let delta = (2.55 * percent).round() as i32;
        let shift = |channel: u8| (channel as i32 - delta).clamp(0, 255) as u8;
        Self {
            r: shift(self.r),
            g: shift(self.g),
            b: shift(self.b),
        }
    }
}

/// A color in HSL space: hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Unrounded conversion from RGB.
    pub fn from_rgb(rgb: Rgb) -> Self {
        let r = rgb.r as f64 / 255.0;
        let g = rgb.g as f64 / 255.0;
        let b = rgb.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let sector = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self::new(sector * 60.0, s * 100.0, l * 100.0)
    }

    /// Each component rounded to the nearest integer, hue kept in [0, 360).
    pub fn rounded(self) -> Self {
        Self::new(
            self.h.round().rem_euclid(360.0),
            self.s.round(),
            self.l.round(),
        )
    }

    pub fn to_rgb(self) -> Rgb {
        let s = self.s / 100.0;
        let l = self.l / 100.0;
        let a = s * l.min(1.0 - l);
        let channel = |n: f64| {
            let k = (n + self.h / 30.0).rem_euclid(12.0);
            let color = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
            (255.0 * color).round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: channel(0.0),
            g: channel(8.0),
            b: channel(4.0),
        }
    }

    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

/// Converts a hex triplet to rounded HSL, or `FALLBACK_HSL` when unparseable.
pub fn hex_to_hsl(hex: &str) -> Hsl {
    Rgb::parse(hex)
        .map(|rgb| Hsl::from_rgb(rgb).rounded())
        .unwrap_or(FALLBACK_HSL)
}

pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    Hsl::new(h, s, l).to_hex()
}

/// Darkens a hex color by a fixed per-channel delta; `None` if `hex` is invalid.
pub fn darken(hex: &str, percent: f64) -> Option<String> {
    Rgb::parse(hex).map(|rgb| rgb.darken(percent).to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_distance(a: Rgb, b: Rgb) -> i32 {
        let d = |x: u8, y: u8| (x as i32 - y as i32).abs();
        d(a.r, b.r).max(d(a.g, b.g)).max(d(a.b, b.b))
    }

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn validates_hex_format() {
        assert!(is_valid_hex("#ABC123"));
        assert!(is_valid_hex("#abc123"));
        assert!(!is_valid_hex("ABC123"));
        assert!(!is_valid_hex("#ABC12"));
        assert!(!is_valid_hex("#GGGGGG"));
        assert!(!is_valid_hex("not-a-color"));
    }

    #[test]
    fn parses_with_or_without_hash() {
        let expected = Rgb {
            r: 0xf4,
            g: 0x3f,
            b: 0x5e,
        };
        assert_eq!(Rgb::parse("#f43f5e"), Some(expected));
        assert_eq!(Rgb::parse("F43F5E"), Some(expected));
        assert_eq!(Rgb::parse("#f43f5"), None);
    }

    #[test]
    fn known_conversions() {
        assert_eq!(hex_to_hsl("#ff0000"), Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(hex_to_hsl("#00ff00"), Hsl::new(120.0, 100.0, 50.0));
        assert_eq!(hex_to_hsl("#0000FF"), Hsl::new(240.0, 100.0, 50.0));
        assert_eq!(hex_to_hsl("#808080"), Hsl::new(0.0, 0.0, 50.0));
        assert_eq!(hsl_to_hex(0.0, 100.0, 50.0), "#ff0000");
        assert_eq!(hsl_to_hex(120.0, 100.0, 50.0), "#00ff00");
        assert_eq!(hsl_to_hex(240.0, 100.0, 50.0), "#0000ff");
        assert_eq!(hsl_to_hex(0.0, 0.0, 100.0), "#ffffff");
    }

    #[test]
    fn unparseable_hex_falls_back() {
        assert_eq!(hex_to_hsl("not-a-color"), FALLBACK_HSL);
        assert_eq!(hex_to_hsl("#12345"), FALLBACK_HSL);
    }

    #[test]
    fn hex_round_trips_through_hsl() {
        for r in (0..=255).step_by(17) {
            for g in (0..=255).step_by(51) {
                for b in (0..=255).step_by(85) {
                    let rgb = Rgb {
                        r: r as u8,
                        g: g as u8,
                        b: b as u8,
                    };
                    let back = Hsl::from_rgb(rgb).to_rgb();
                    assert!(
                        channel_distance(rgb, back) <= 1,
                        "{} came back as {}",
                        rgb.to_hex(),
                        back.to_hex()
                    );
                }
            }
        }
        for preset in PRESET_COLORS.iter().chain(GOAL_PALETTE.iter()) {
            let rgb = Rgb::parse(preset).unwrap();
            assert!(channel_distance(rgb, Hsl::from_rgb(rgb).to_rgb()) <= 1);
        }
    }

    #[test]
    fn rounded_hsl_drifts_a_few_units() {
        // Rounding h, s and l to integers costs at most 5 units per channel.
        for r in (0..=255).step_by(5) {
            for g in (0..=255).step_by(5) {
                for b in (0..=255).step_by(5) {
                    let rgb = Rgb {
                        r: r as u8,
                        g: g as u8,
                        b: b as u8,
                    };
                    let back = Rgb::parse(&hex_to_hsl(&rgb.to_hex()).to_hex()).unwrap();
                    assert!(
                        channel_distance(rgb, back) <= 5,
                        "{} came back as {}",
                        rgb.to_hex(),
                        back.to_hex()
                    );
                }
            }
        }
        assert_eq!(hex_to_hsl("#00007d").to_hex(), "#000080");
        assert_eq!(hex_to_hsl("#02e4e6").to_hex(), "#02dfe3");
    }

    #[test]
    fn hsl_round_trips_through_hex() {
        for h in (0..360).step_by(15) {
            for s in [60.0, 80.0, 100.0] {
                for l in [40.0, 50.0, 60.0] {
                    let h = h as f64;
                    let back = hex_to_hsl(&hsl_to_hex(h, s, l));
                    assert!(hue_distance(back.h, h) <= 1.0, "hue {h} -> {}", back.h);
                    assert!((back.s - s).abs() <= 1.0, "sat {s} -> {}", back.s);
                    assert!((back.l - l).abs() <= 1.0, "light {l} -> {}", back.l);
                }
            }
        }
    }

    #[test]
    fn darken_subtracts_fixed_delta() {
        assert_eq!(darken("#FFFFFF", 15.0).as_deref(), Some("#d9d9d9"));
        assert_eq!(darken("#f43f5e", 15.0).as_deref(), Some("#ce1938"));
        assert_eq!(darken("#202020", 15.0).as_deref(), Some("#000000"));
        assert_eq!(darken("nope", 15.0), None);
    }

    #[test]
    fn darken_never_goes_negative() {
        let black = Rgb { r: 0, g: 0, b: 0 };
        for percent in [0.0, 1.0, 15.0, 50.0, 100.0, 400.0] {
            assert_eq!(black.darken(percent), black);
            let white = Rgb {
                r: 255,
                g: 255,
                b: 255,
            }
            .darken(percent);
            assert!(white.r == white.g && white.g == white.b);
        }
    }

    #[test]
    fn random_goal_color_comes_from_palette() {
        for _ in 0..50 {
            let color = random_goal_color();
            assert!(GOAL_PALETTE.contains(&color.as_str()));
        }
    }
}
