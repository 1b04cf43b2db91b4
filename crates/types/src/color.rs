//! RGBA color type used for widget backgrounds.
//!
//! Parsing is delegated to GDK's standard color parser (behind the `gtk`
//! feature), so every syntax the toolkit accepts is accepted here:
//! `#rgb`, `#rrggbb`, `#rrggbbaa`, named colors, `rgb(...)` and `rgba(...)`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color with alpha channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }

    /// Whether the color is fully opaque
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Parse a color string with the toolkit's color parser
    #[cfg(feature = "gtk")]
    pub fn parse(spec: &str) -> Result<Self, ParseColorError> {
        gdk4::RGBA::parse(spec)
            .map(|rgba| Self::from_gdk_rgba(&rgba))
            .map_err(|_| ParseColorError(spec.to_string()))
    }

    /// Convert to GDK RGBA
    #[cfg(feature = "gtk")]
    pub fn to_gdk_rgba(&self) -> gdk4::RGBA {
        gdk4::RGBA::new(self.r as f32, self.g as f32, self.b as f32, self.a as f32)
    }

    /// Create from GDK RGBA
    #[cfg(feature = "gtk")]
    pub fn from_gdk_rgba(rgba: &gdk4::RGBA) -> Self {
        Self {
            r: rgba.red() as f64,
            g: rgba.green() as f64,
            b: rgba.blue() as f64,
            a: rgba.alpha() as f64,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

#[cfg(feature = "gtk")]
impl std::str::FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A string the color parser rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unable to parse colour: {:?}", self.0)
    }
}

impl std::error::Error for ParseColorError {}

#[cfg(all(test, feature = "gtk"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let color = Color::parse("#ff0000").unwrap();
        assert_eq!(color.to_rgba8(), (255, 0, 0, 255));
        assert!(color.is_opaque());
    }

    #[test]
    fn test_parse_named_and_functional() {
        assert_eq!(Color::parse("white").unwrap().to_rgba8(), (255, 255, 255, 255));

        let half = Color::parse("rgba(0,0,0,0.5)").unwrap();
        assert!((half.a - 0.5).abs() < 1e-6);
        assert!(!half.is_opaque());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Color::parse("banana").is_err());
        assert!(Color::parse("notacolor").is_err());
        assert!(Color::parse("").is_err());
    }

    #[test]
    fn test_rgba8_conversion() {
        let color = Color::from_rgba8(0, 128, 255, 255);
        assert_eq!(color.to_rgba8(), (0, 128, 255, 255));
    }
}
