use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rrggbb` (leading `#` optional). Malformed channels read as 0.
    pub fn hex(s: &str) -> Self {
        let s = s.strip_prefix('#').unwrap_or(s);
        let channel = |i: usize| {
            s.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok()).unwrap_or(0)
        };
        Self { r: channel(0), g: channel(2), b: channel(4), a: 1.0 }
    }

    /// Color from unit-interval RGB components.
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgb(q(r), q(g), q(b))
    }

    pub const fn with_alpha(mut self, a: f64) -> Self {
        self.a = a;
        self
    }

    /// SVG paint: `#rrggbb` when opaque, `rgba(..)` otherwise.
    pub fn to_svg_fill(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { r, g, b, a } = *self;
        if (a - 1.0).abs() < 1e-6 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "rgba({r},{g},{b},{a:.3})")
        }
    }
}

/// Config files spell colors as `#rrggbb`.
impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        String::deserialize(de).map(|s| Color::hex(&s))
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(&Color { a: 1.0, ..*self })
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

/// Sequential colormaps for 2D panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colormap {
    /// Five-stop blue → cyan → yellow → red → dark red gradient.
    #[default]
    Rainbow,
    /// Black → red → yellow → white.
    DarkBody,
}

/// Gradient stops: position, red, green, blue (unit interval).
const RAINBOW_STOPS: [(f64, f64, f64, f64); 5] = [
    (0.00, 0.00, 0.00, 0.51),
    (0.34, 0.00, 0.81, 1.00),
    (0.61, 0.87, 1.00, 0.12),
    (0.84, 1.00, 0.20, 0.00),
    (1.00, 0.51, 0.00, 0.00),
];

const DARK_BODY_STOPS: [(f64, f64, f64, f64); 4] = [
    (0.00, 0.00, 0.00, 0.00),
    (0.40, 0.80, 0.05, 0.00),
    (0.75, 1.00, 0.80, 0.10),
    (1.00, 1.00, 1.00, 0.90),
];

fn gradient(stops: &[(f64, f64, f64, f64)], t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    for w in stops.windows(2) {
        let (p0, r0, g0, b0) = w[0];
        let (p1, r1, g1, b1) = w[1];
        if t <= p1 {
            let f = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };
            return Color::from_unit(r0 + f * (r1 - r0), g0 + f * (g1 - g0), b0 + f * (b1 - b0));
        }
    }
    let (_, r, g, b) = stops[stops.len() - 1];
    Color::from_unit(r, g, b)
}

impl Colormap {
    /// Color at `t` in `[0, 1]` (clamped; NaN maps to the low end).
    pub fn at(self, t: f64) -> Color {
        match self {
            Self::Rainbow => gradient(&RAINBOW_STOPS, t),
            Self::DarkBody => gradient(&DARK_BODY_STOPS, t),
        }
    }

    /// Color for `value` on the scale `[lo, hi]`.
    pub fn scaled(self, value: f64, lo: f64, hi: f64) -> Color {
        if hi > lo { self.at((value - lo) / (hi - lo)) } else { self.at(0.0) }
    }
}
