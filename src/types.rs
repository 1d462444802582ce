//! Presentation values bound by themes and widget libraries
//!
//! Every type's `Default` is the value handed out when a lookup misses.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 8-bit RGBA color, written as `#RRGGBB` or `#RRGGBBAA` in config files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub fn to_hex(&self) -> String {
        format!("#{}", hex::encode_upper([self.r, self.g, self.b, self.a]))
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.trim().trim_start_matches('#');
        let bytes = hex::decode(digits).map_err(|_| Error::InvalidColor(s.to_string()))?;

        match bytes.as_slice() {
            [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
            [r, g, b, a] => Ok(Color::rgba(*r, *g, *b, *a)),
            _ => Err(Error::InvalidColor(s.to_string())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Font descriptor. The default (empty family, size 0) means "no font"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontInfo {
    pub family: String,
    pub typeface: String,
    pub size: u32,
}

impl FontInfo {
    pub fn new(family: &str, typeface: &str, size: u32) -> Self {
        Self {
            family: family.to_string(),
            typeface: typeface.to_string(),
            size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.family.is_empty()
    }
}

/// How a brush paints its area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushDraw {
    #[default]
    None,
    Image,
    Box,
    Border,
    RoundedBox,
}

/// Brush descriptor: an optional image resource tinted by a color
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brush {
    pub draw: BrushDraw,
    /// Image resource, usually a URL loaded through the image loader
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub tint: Color,
    pub width: u32,
    pub height: u32,
    pub corner_radius: u32,
}

/// Reference to a widget class, e.g. `WBP_Button`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetClass(pub String);

impl WidgetClass {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
