//! Cell styles
//!
//! A [`Style`] is a plain value: every column and every cell owns its own
//! copy, so changing the number format of one column never leaks into
//! another. [`StylePreset`] carries the two canonical styles (header and
//! body) and can be loaded from YAML or JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB colour, serialized as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const BLACK: Color = Color(0x000000);
    pub const DARK_RED: Color = Color(0x800000);

    /// Parse `#RRGGBB` or `RRGGBB`
    pub fn from_hex(s: &str) -> Option<Color> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Color)
    }

    pub fn rgb(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid colour '{}'", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Number display format
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    #[default]
    General,
    /// Built-in Excel format by index
    BuiltIn(u8),
    Custom(String),
}

impl NumberFormat {
    /// 9 - 0%
    pub const ID_PERCENT: u8 = 9;
    /// 7 - $#,##0.00_);($#,##0.00)
    pub const ID_CURRENCY: u8 = 7;
}

/// Display format hint applied on top of a column style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    Percentage,
    Currency,
}

impl DisplayFormat {
    /// Map a numeric hint: `1` is percentage, `2` is currency, anything
    /// else means no special format.
    pub fn from_hint(code: i32) -> Option<DisplayFormat> {
        match code {
            1 => Some(DisplayFormat::Percentage),
            2 => Some(DisplayFormat::Currency),
            _ => None,
        }
    }

    pub fn number_format(self) -> NumberFormat {
        match self {
            DisplayFormat::Percentage => NumberFormat::BuiltIn(NumberFormat::ID_PERCENT),
            DisplayFormat::Currency => NumberFormat::BuiltIn(NumberFormat::ID_CURRENCY),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    pub name: Option<String>,
    pub bold: bool,
    pub color: Option<Color>,
}

/// Complete cell style
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub font: Font,
    /// Solid background fill
    pub fill: Option<Color>,
    /// Thin border on all four edges
    pub thin_border: bool,
    /// Centered horizontally and vertically
    pub centered: bool,
    pub number_format: NumberFormat,
}

impl Style {
    pub const DEFAULT_FONT: &'static str = "Calibri";

    pub fn new() -> Self {
        Self::default()
    }

    /// Thin border, centered, default font
    pub fn body() -> Self {
        Self {
            font: Font {
                name: Some(Self::DEFAULT_FONT.to_string()),
                ..Font::default()
            },
            thin_border: true,
            centered: true,
            ..Self::default()
        }
    }

    /// Body style with a bold white font on a dark red fill
    pub fn header() -> Self {
        let mut style = Self::body();
        style.font.bold = true;
        style.font.color = Some(Color::WHITE);
        style.fill = Some(Color::DARK_RED);
        style
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    /// Apply a display format to this style in place
    pub fn apply_display_format(&mut self, format: DisplayFormat) {
        self.number_format = format.number_format();
    }
}

/// The two canonical styles used by the export pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePreset {
    pub header: Style,
    pub body: Style,
}

impl Default for StylePreset {
    fn default() -> Self {
        Self {
            header: Style::header(),
            body: Style::body(),
        }
    }
}

impl StylePreset {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
