//! Span styling primitives
//!
//! A rendered document is a flat, ordered list of [`SpanStyle`]s. Hosts lay
//! them out left to right; `\n` inside content starts a new line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Typeface name used for inline code and code blocks
pub const MONOSPACE: &str = "monospace";

/// Non-premultiplied RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent; hosts treat it as "use the terminal default"
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

/// Error returned when a `#RRGGBB` / `#RRGGBBAA` string can't be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}: expected #RRGGBB or #RRGGBBAA")]
pub struct ParseColorError(pub String);

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) || !(hex.len() == 6 || hex.len() == 8) {
            return Err(err());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let alpha = if hex.len() == 8 { channel(6)? } else { 0xFF };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Italic,
}

/// Font selection for a span
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FontSpec {
    /// Empty means the host's default typeface
    pub typeface: String,
    pub weight: Weight,
    pub style: FontStyle,
}

impl FontSpec {
    pub fn monospace() -> Self {
        Self {
            typeface: MONOSPACE.to_string(),
            ..Self::default()
        }
    }
}

/// Where a span came from in the markdown source
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SpanKind {
    #[default]
    Text,
    /// Inline `code`
    InlineCode,
    /// Body of a fenced or indented code block, with its fence language
    CodeBlock { lang: Option<String> },
}

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq)]
pub struct SpanStyle {
    pub content: String,
    pub font: FontSpec,
    /// Size in scale-independent points
    pub size: f32,
    pub color: Rgba,
    pub background: Option<Rgba>,
    pub strikethrough: bool,
    /// Clickable spans carry their target in `url`
    pub interactive: bool,
    pub url: Option<String>,
    pub kind: SpanKind,
}

impl SpanStyle {
    pub fn new(content: impl Into<String>, font: FontSpec, size: f32, color: Rgba) -> Self {
        Self {
            content: content.into(),
            font,
            size,
            color,
            background: None,
            strikethrough: false,
            interactive: false,
            url: None,
            kind: SpanKind::Text,
        }
    }

    /// Copy this span's style with different content and color
    pub fn restyled(&self, content: impl Into<String>, color: Rgba) -> Self {
        Self {
            content: content.into(),
            color,
            ..self.clone()
        }
    }

    pub fn is_code_block(&self) -> bool {
        matches!(self.kind, SpanKind::CodeBlock { .. })
    }
}

/// Colors used when building spans
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub foreground: Rgba,
    /// Accent used for keywords and inline code
    pub contrast: Rgba,
    pub symbol: Rgba,
    pub string: Rgba,
    /// Color of interactive (link) spans
    pub link: Rgba,
    pub code_background: Rgba,
    pub dim: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: Rgba::rgb(0x00, 0x00, 0x00),
            contrast: Rgba::rgb(0x3F, 0x51, 0xB5),
            symbol: Rgba::rgb(0xFF, 0x00, 0x00),
            string: Rgba::rgb(0xFF, 0x69, 0xB4),
            link: Rgba::rgb(0x3F, 0x51, 0xB5),
            code_background: Rgba::TRANSPARENT,
            dim: Rgba::rgb(0x80, 0x80, 0x80),
        }
    }
}
