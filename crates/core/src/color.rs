//! RGB to device HSV conversion.
//!
//! Devices take hue in whole degrees and saturation/value in per-mille units
//! (`0..=1000`). All conversions use integer arithmetic and round to nearest,
//! halves rounding up, so a given color always produces the same fields.

use core::str::FromStr;

pub use rgb::RGB8;

use crate::{Error, Result};

/// Maximum saturation and value in device units.
pub const HSV_SCALE: u16 = 1000;

/// A color in the device-native hue/saturation/value representation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Hsv {
    /// Hue in degrees, `0..=359`.
    pub hue: u16,
    /// Saturation in per-mille, `0..=1000`.
    pub saturation: u16,
    /// Value in per-mille, `0..=1000`.
    pub value: u16,
}

impl Hsv {
    /// A fully switched off LED.
    pub const OFF: Self = Self {
        hue: 0,
        saturation: 0,
        value: 0,
    };

    /// Converts an RGB triple into device HSV.
    pub fn from_rgb(color: RGB8) -> Self {
        let (r, g, b) = (i32::from(color.r), i32::from(color.g), i32::from(color.b));
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let scale = i32::from(HSV_SCALE);

        let value = round_div(max * scale, 255);
        let saturation = if max == 0 {
            0
        } else {
            round_div(delta * scale, max)
        };
        let hue = if delta == 0 {
            0
        } else {
            // Sixty degrees per sector, the sector is picked by the largest channel.
            let sixtieths = if max == r {
                60 * (g - b)
            } else if max == g {
                60 * (b - r) + 120 * delta
            } else {
                60 * (r - g) + 240 * delta
            };
            (2 * sixtieths + delta).div_euclid(2 * delta).rem_euclid(360)
        };

        // All three are within `0..=1000` by construction.
        Self {
            hue: hue as u16,
            saturation: saturation as u16,
            value: value as u16,
        }
    }

    /// Converts the device color back into RGB.
    pub fn to_rgb(self) -> RGB8 {
        let scale = f64::from(HSV_SCALE);
        let v = f64::from(self.value.min(HSV_SCALE)) / scale;
        let s = f64::from(self.saturation.min(HSV_SCALE)) / scale;
        let h = f64::from(self.hue % 360) / 60.0;

        let chroma = v * s;
        let slope = (h % 2.0) - 1.0;
        let x = chroma * (1.0 - if slope < 0.0 { -slope } else { slope });
        let m = v - chroma;
        let (r, g, b) = match h as u8 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let channel = |c: f64| ((c + m) * 255.0 + 0.5).clamp(0.0, 255.0) as u8;
        RGB8::new(channel(r), channel(g), channel(b))
    }

    /// Saturation as a whole percentage, truncated.
    pub fn saturation_percent(self) -> u16 {
        self.saturation / 10
    }

    /// Value as a whole percentage, truncated.
    pub fn value_percent(self) -> u16 {
        self.value / 10
    }
}

impl From<RGB8> for Hsv {
    fn from(color: RGB8) -> Self {
        Self::from_rgb(color)
    }
}

/// A color given as six hex digits, like `"ff8000"` or `"#000000"`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HexColor(pub RGB8);

impl FromStr for HexColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidHexDigit);
        }

        let channel = |at: usize| {
            u8::from_str_radix(&digits[at..at + 2], 16).map_err(|_| Error::InvalidHexDigit)
        };
        Ok(Self(RGB8::new(channel(0)?, channel(2)?, channel(4)?)))
    }
}

impl From<HexColor> for RGB8 {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

fn round_div(numerator: i32, denominator: i32) -> i32 {
    (2 * numerator + denominator) / (2 * denominator)
}
