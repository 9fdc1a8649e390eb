//! Small strongly-typed values shared by the parser and the renderers.

use std::fmt;
use std::str::FromStr;

/// A value constraint that a configuration field failed to meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Value must be neither NaN nor infinite
    Finite,
    /// Value must be greater than zero
    Positive,
    /// Integer value must be at least this large
    AtLeast(i64),
    /// Integer value must be at most this large
    AtMost(i64),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Finite => write!(f, "value must be a finite number"),
            Constraint::Positive => write!(f, "value must be greater than zero"),
            Constraint::AtLeast(min) => write!(f, "value must be at least {}", min),
            Constraint::AtMost(max) => write!(f, "value must be at most {}", max),
        }
    }
}

impl Constraint {
    /// Check a floating point value, returning the violated constraint if any.
    pub fn check(self, value: f64) -> Result<(), Constraint> {
        if !value.is_finite() {
            return Err(Constraint::Finite);
        }
        match self {
            Constraint::Finite => Ok(()),
            Constraint::Positive if value > 0.0 => Ok(()),
            Constraint::AtLeast(min) if value >= min as f64 => Ok(()),
            Constraint::AtMost(max) if value <= max as f64 => Ok(()),
            other => Err(other),
        }
    }
}

/// 24-bit RGB color, packed as 0xRRGGBB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);

    /// Build a color from a packed value; bits above 24 are dropped.
    pub const fn from_packed(rgb: u32) -> Color {
        Color(rgb & 0xffffff)
    }

    pub const fn packed(self) -> u32 {
        self.0
    }

    /// Red, green and blue as fractions (channel / 256).
    pub fn fractions(self) -> [f64; 3] {
        [
            ((self.0 >> 16) & 0xff) as f64 / 256.0,
            ((self.0 >> 8) & 0xff) as f64 / 256.0,
            (self.0 & 0xff) as f64 / 256.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:06x}", self.0)
    }
}

impl FromStr for Color {
    type Err = std::num::ParseIntError;

    /// Parse hexadecimal digits with an optional `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        u32::from_str_radix(digits, 16).map(Color::from_packed)
    }
}

/// Angle in degrees
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Angle(pub f64);

impl Angle {
    /// Convert to radians the way tick angles are computed throughout the renderer.
    #[inline]
    pub fn radians(self) -> f64 {
        std::f64::consts::PI * self.0 / 180.0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_fractions_divide_by_256() {
        let c = Color::from_packed(0x8040ff);
        assert_eq!(c.fractions(), [0.5, 0.25, 255.0 / 256.0]);
    }

    #[test]
    fn color_masks_to_24_bits() {
        assert_eq!(Color::from_packed(0xff123456).packed(), 0x123456);
    }

    #[test]
    fn color_parses_with_and_without_prefix() {
        assert_eq!("0xdfefff".parse::<Color>().unwrap(), Color::from_packed(0xdfefff));
        assert_eq!("00003F".parse::<Color>().unwrap(), Color::from_packed(0x3f));
        assert!("0xzz".parse::<Color>().is_err());
    }

    #[test]
    fn color_display_is_six_hex_digits() {
        assert_eq!(Color::from_packed(0x3f).to_string(), "0x00003f");
    }

    #[test]
    fn constraint_rejects_nan_before_anything_else() {
        assert_eq!(Constraint::Positive.check(f64::NAN), Err(Constraint::Finite));
        assert_eq!(Constraint::Positive.check(0.0), Err(Constraint::Positive));
        assert_eq!(Constraint::AtLeast(2).check(1.0), Err(Constraint::AtLeast(2)));
        assert_eq!(Constraint::AtLeast(2).check(2.0), Ok(()));
        assert_eq!(Constraint::AtMost(10).check(11.0), Err(Constraint::AtMost(10)));
        assert_eq!(Constraint::AtMost(10).check(10.0), Ok(()));
    }

    #[test]
    fn angle_to_radians() {
        assert!((Angle(180.0).radians() - std::f64::consts::PI).abs() < 1e-15);
    }
}
