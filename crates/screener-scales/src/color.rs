//! Colors, three-shade bands, and the tier palette.

use crate::{Result, ScaleError, tier::Tier};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A 24-bit RGB color.
///
/// Displays and serializes as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure black, used for values that cannot be evaluated.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Format as `#RRGGBB`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Format as a CSS `rgb(r, g, b)` string.
    #[must_use]
    pub fn to_css_rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Linear blend from `self` towards `other`.
    ///
    /// `t` is clamped to `[0, 1]`; 0 yields `self`, 1 yields `other`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let channel = |a: u8, b: u8| -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Self::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.trim().strip_prefix('#').unwrap_or(s.trim());
        let invalid = || ScaleError::InvalidColor(s.to_string());

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        u32::from_str_radix(digits, 16)
            .map(Self::from_u32)
            .map_err(|_| invalid())
    }
}

impl TryFrom<String> for Rgb {
    type Error = ScaleError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// Three shades of one tier, ordered from the tier's favorable edge to
/// its unfavorable edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorBand {
    /// The shades, favorable edge first.
    pub shades: [Rgb; 3],
}

impl ColorBand {
    /// Create a band from three shades.
    #[must_use]
    pub const fn new(shades: [Rgb; 3]) -> Self {
        Self { shades }
    }

    /// The discrete color of the tier.
    #[must_use]
    pub const fn representative(&self) -> Rgb {
        self.shades[0]
    }

    /// The middle shade, used when a band has zero width.
    #[must_use]
    pub const fn middle(&self) -> Rgb {
        self.shades[1]
    }

    /// Continuous color at `ratio` through the band.
    ///
    /// Blends piecewise between the three shades: 0 is the first shade,
    /// 0.5 the middle, 1 the last.
    #[must_use]
    pub fn shade_at(&self, ratio: f64) -> Rgb {
        let t = if ratio.is_nan() { 0.5 } else { ratio.clamp(0.0, 1.0) };
        let [first, middle, last] = &self.shades;

        if t <= 0.5 {
            first.lerp(middle, t * 2.0)
        } else {
            middle.lerp(last, (t - 0.5) * 2.0)
        }
    }
}

/// Colors for the three tiers plus the sentinel for unknown values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Green family.
    pub favorable: ColorBand,
    /// Yellow family.
    pub neutral: ColorBand,
    /// Red family.
    pub unfavorable: ColorBand,
    /// Sentinel color for missing or out-of-domain values.
    pub unknown: Rgb,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            favorable: ColorBand::new([
                Rgb::from_u32(0x00FF00),
                Rgb::from_u32(0x55FF00),
                Rgb::from_u32(0xAAFF00),
            ]),
            neutral: ColorBand::new([
                Rgb::from_u32(0xFFFF00),
                Rgb::from_u32(0xFFDD00),
                Rgb::from_u32(0xFFBB00),
            ]),
            unfavorable: ColorBand::new([
                Rgb::from_u32(0xFF0000),
                Rgb::from_u32(0xFF3333),
                Rgb::from_u32(0xCC0000),
            ]),
            unknown: Rgb::BLACK,
        }
    }
}

impl ColorPalette {
    /// The band for a tier.
    #[must_use]
    pub const fn band(&self, tier: Tier) -> &ColorBand {
        match tier {
            Tier::Favorable => &self.favorable,
            Tier::Neutral => &self.neutral,
            Tier::Unfavorable => &self.unfavorable,
        }
    }

    /// All nine shades in favorability order.
    ///
    /// Indices 2, 5 and 8 sit on the excellent, good and poor boundaries
    /// when rendered as a legend.
    #[must_use]
    pub fn legend(&self) -> [Rgb; 9] {
        let mut out = [Rgb::BLACK; 9];
        for (i, tier) in Tier::ALL.iter().enumerate() {
            out[i * 3..i * 3 + 3].copy_from_slice(&self.band(*tier).shades);
        }
        out
    }
}
