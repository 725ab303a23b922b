#![forbid(unsafe_code)]

//! RGBA colors.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A straight (non-premultiplied) 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const CLEAR: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(205, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 205, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 238);
    pub const GRAY: Self = Self::rgb(127, 127, 127);
    pub const LIGHT_GRAY: Self = Self::rgb(229, 229, 229);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha replaced.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha scaled by `opacity` in `[0.0, 1.0]`.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let scaled = (f32::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        self.with_alpha(scaled)
    }

    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        // `from_str_radix` tolerates a leading sign, so check every digit here.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(hex.to_string()));
        }
        let byte = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ParseColorError::InvalidDigit(hex.to_string()))
        };
        match digits.len() {
            3 => {
                let nibble = |i: usize| byte(&digits[i..=i]).map(|n| n * 17);
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
            )),
            8 => Ok(Self::rgba(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
                byte(&digits[6..8])?,
            )),
            len => Err(ParseColorError::InvalidLength(len)),
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Failure to parse a hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("hex color must have 3, 6 or 8 digits, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex digit in color {0:?}")]
    InvalidDigit(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_forms() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::from_hex("0000ee").unwrap(), Color::BLUE);
        assert_eq!(
            "#11223344".parse::<Color>().unwrap(),
            Color::rgba(0x11, 0x22, 0x33, 0x44)
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Color::from_hex("#12345"),
            Err(ParseColorError::InvalidLength(5))
        );
        assert!(matches!(
            Color::from_hex("#zzzzzz"),
            Err(ParseColorError::InvalidDigit(_))
        ));
        assert!(matches!(
            Color::from_hex("#ééé"),
            Err(ParseColorError::InvalidDigit(_))
        ));
        for signed in ["#+f+f+f", "+fffff", "#+ff", "-1ffffff"] {
            assert!(
                matches!(Color::from_hex(signed), Err(ParseColorError::InvalidDigit(_))),
                "{signed} parsed"
            );
        }
    }

    #[test]
    fn opacity_scales_alpha() {
        assert_eq!(Color::WHITE.with_opacity(0.5).a, 128);
        assert_eq!(Color::WHITE.with_opacity(2.0).a, 255);
        assert_eq!(Color::WHITE.with_opacity(-1.0), Color::WHITE.with_alpha(0));
    }

    #[test]
    fn display_omits_opaque_alpha() {
        assert_eq!(Color::RED.to_string(), "#cd0000");
        assert_eq!(Color::CLEAR.to_string(), "#00000000");
    }

    proptest! {
        #[test]
        fn opacity_never_raises_alpha(a in any::<u8>(), opacity in 0.0f32..=1.0) {
            let c = Color::BLACK.with_alpha(a).with_opacity(opacity);
            prop_assert!(c.a <= a);
            prop_assert_eq!((c.r, c.g, c.b), (0, 0, 0));
        }
    }
}
