//! Color model and conversions.
//!
//! Colors travel between the picker, the host and callers either as [`Rgb`]
//! triples or as CSS-style strings (`#rrggbb`, `rgb(r,g,b)`).

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The default wheel: a 12-step spectrum starting at the top and running clockwise.
pub const DEFAULT_SECTIONS: [&str; 12] = [
    "#fd5308", "#fb9902", "#fabc02", "#fefe33", "#d0ea2b", "#66b032",
    "#0391ce", "#0247fe", "#3d01a4", "#8601af", "#a7194b", "#fe2712",
];

/// Default step used by [`color_range`].
pub const DEFAULT_RANGE_STEP: f64 = 0.1;

/// An opaque 8-bit sRGB color.
///
/// Serializes as a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from an RGBA pixel, dropping alpha.
    pub const fn from_rgba(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2])
    }

    /// Channels as an array.
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// `#rrggbb`, lower-case.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }

    /// Shades from near-black through this color to near-white.
    ///
    /// Returns an empty list when `step` is not a positive finite number.
    pub fn range(self, step: f64) -> Vec<String> {
        if !(step.is_finite() && step > 0.0) {
            return Vec::new();
        }

        let mut shades = Vec::new();
        let mut i = -0.5;
        while i < 0.5 {
            let (toward, amount) = if i < 0.0 { (0.0, -i) } else { (255.0, i) };
            let blend = |c: u8| {
                let c = f64::from(c);
                // Half-way cases round up, matching CSS engines.
                let shifted = ((toward - c) * amount + 0.5).floor() + c;
                shifted.clamp(0.0, 255.0) as u8
            };
            shades.push(Rgb::new(blend(self.r), blend(self.g), blend(self.b)).to_string());
            i += step;
        }
        shades
    }

    /// Convert to a peniko color (opaque).
    pub fn to_color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, 255)
    }

    /// Convert from a peniko color, discarding alpha.
    pub fn from_color(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        c.channels()
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        c.to_color()
    }
}

/// Format a color as `#rrggbb`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Parse `#rgb`, `#rrggbb`, `rgb` or `rrggbb` (any case).
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let s = hex.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    match s.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&s[i..=i], 16).ok().map(|d| d << 4 | d);
            Some(Rgb::new(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
            Some(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

/// Parse an RGB string such as `rgb(12, 34, 56)` or `12,34,56`.
///
/// The first three runs of decimal digits are taken as the channels.
pub fn parse_rgb(input: &str) -> Option<Rgb> {
    let mut channels = input
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse::<u8>().ok());

    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    Some(Rgb::new(r, g, b))
}

/// Parse either notation: a comma means RGB, anything else is read as HEX.
pub fn parse_color(input: &str) -> Option<Rgb> {
    if input.contains(',') {
        parse_rgb(input)
    } else {
        hex_to_rgb(input)
    }
}

/// Shades of `color` from near-black to near-white, as `rgb(r,g,b)` strings.
///
/// `None` if the color does not parse or `step` is not positive.
pub fn color_range(color: &str, step: f64) -> Option<Vec<String>> {
    if !(step.is_finite() && step > 0.0) {
        return None;
    }
    parse_color(color).map(|rgb| rgb.range(step))
}

/// The default sections as parsed colors.
pub fn default_sections() -> Vec<Rgb> {
    DEFAULT_SECTIONS.iter().filter_map(|hex| hex_to_rgb(hex)).collect()
}
