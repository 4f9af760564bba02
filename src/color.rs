//! RGBA colors parsed from `#RRGGBB` / `#AARRGGBB` strings.
//!
//! Configuration files carry every color as a hex string; parsing happens
//! once at load time so no component ever holds an unvalidated color.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color format: {0}")]
    InvalidFormat(String),
}

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub const fn is_opaque(&self) -> bool {
        self.a == 0xFF
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Accepts `#RRGGBB` (opaque) and `#AARRGGBB` (alpha-prefixed). The
    /// leading `#` is optional; any other length is an error.
    fn from_str(s: &str) -> Result<Self, ColorError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(ColorError::InvalidFormat(s.to_string()));
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ColorError::InvalidFormat(s.to_string()))
        };
        match hex.len() {
            6 => Ok(Color::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Color::rgba(byte(2..4)?, byte(4..6)?, byte(6..8)?, byte(0..2)?)),
            _ => Err(ColorError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
