//! Fixed color palettes used by the chart builders.
//!
//! - Qualitative: ColorBrewer Set2 (eight colors), one per distinct country.
//! - Diverging: ColorBrewer RdYlBu (eleven stops), red for low values and
//!   blue for high values.

use serde::{Serialize, Serializer};
use std::fmt;

/// An opaque sRGB color. Serializes as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear interpolation in RGB space, `t` clamped to 0..=1.
    pub fn lerp(self, other: Rgb8, t: f64) -> Rgb8 {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb8 {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Serialize for Rgb8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

const SET2: [Rgb8; 8] = [
    Rgb8::new(102, 194, 165), // #66C2A5
    Rgb8::new(252, 141, 98),  // #FC8D62
    Rgb8::new(141, 160, 203), // #8DA0CB
    Rgb8::new(231, 138, 195), // #E78AC3
    Rgb8::new(166, 216, 84),  // #A6D854
    Rgb8::new(255, 217, 47),  // #FFD92F
    Rgb8::new(229, 196, 148), // #E5C494
    Rgb8::new(179, 179, 179), // #B3B3B3
];

/// Set2 color for the `idx`-th distinct category, cycling.
#[inline]
pub fn set2_color(idx: usize) -> Rgb8 {
    SET2[idx % SET2.len()]
}

const RDYLBU: [Rgb8; 11] = [
    Rgb8::new(165, 0, 38),
    Rgb8::new(215, 48, 39),
    Rgb8::new(244, 109, 67),
    Rgb8::new(253, 174, 97),
    Rgb8::new(254, 224, 144),
    Rgb8::new(255, 255, 191),
    Rgb8::new(224, 243, 248),
    Rgb8::new(171, 217, 233),
    Rgb8::new(116, 173, 209),
    Rgb8::new(69, 117, 180),
    Rgb8::new(49, 54, 149),
];

/// A continuous color scale given as evenly spaced stops.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorScale {
    pub name: &'static str,
    /// `(position in 0..=1, color)` pairs, ascending.
    pub stops: Vec<(f64, Rgb8)>,
}

impl ColorScale {
    pub fn rd_yl_bu() -> Self {
        let last = (RDYLBU.len() - 1) as f64;
        Self {
            name: "RdYlBu",
            stops: RDYLBU
                .iter()
                .enumerate()
                .map(|(i, c)| (i as f64 / last, *c))
                .collect(),
        }
    }

    /// Color at normalized position `t` (clamped to 0..=1).
    pub fn sample(&self, t: f64) -> Rgb8 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        for pair in self.stops.windows(2) {
            let (p0, c0) = pair[0];
            let (p1, c1) = pair[1];
            if t <= p1 {
                let span = p1 - p0;
                let local = if span > 0.0 { (t - p0) / span } else { 0.0 };
                return c0.lerp(c1, local);
            }
        }
        self.stops.last().map(|(_, c)| *c).unwrap_or(Rgb8::new(0, 0, 0))
    }
}
