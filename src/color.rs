//! Color values for scheme resolution
//!
//! Parses hex and named colors into RGBA and provides the compositing
//! operations resolution needs: alpha blending and flattening a translucent
//! color against an opaque background.

use std::fmt;

use thiserror::Error;

/// A color string that could not be parsed as hex or a recognized name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid color format: {0:?}")]
pub struct InvalidColorFormat(pub String);

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Whether the alpha channel is fully opaque
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Parse from a hex string (`#RGB`, `#RRGGBB`, `#RRGGBBAA`) or a
    /// recognized color name
    pub fn parse(s: &str) -> Result<Self, InvalidColorFormat> {
        let trimmed = s.trim();
        if trimmed.starts_with('#') {
            Self::from_hex(trimmed)
        } else {
            named_color(trimmed).ok_or_else(|| InvalidColorFormat(s.to_string()))
        }
    }

    /// Parse from "#RGB", "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, InvalidColorFormat> {
        let raw = s;
        let s = s.trim_start_matches('#');
        let invalid = || InvalidColorFormat(raw.to_string());
        if !s.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: &str| u8::from_str_radix(range, 16).map_err(|_| invalid());
        match s.len() {
            3 => {
                // Shorthand: each digit doubles ("#abc" == "#aabbcc")
                let digit = |i: usize| {
                    s[i..i + 1]
                        .chars()
                        .next()
                        .and_then(|c| c.to_digit(16))
                        .map(|d| (d * 17) as u8)
                        .ok_or_else(invalid)
                };
                Ok(Color {
                    r: digit(0)?,
                    g: digit(1)?,
                    b: digit(2)?,
                    a: 255,
                })
            }
            6 => Ok(Color {
                r: channel(&s[0..2])?,
                g: channel(&s[2..4])?,
                b: channel(&s[4..6])?,
                a: 255,
            }),
            8 => Ok(Color {
                r: channel(&s[0..2])?,
                g: channel(&s[2..4])?,
                b: channel(&s[4..6])?,
                a: channel(&s[6..8])?,
            }),
            _ => Err(invalid()),
        }
    }

    /// Format as "#RRGGBB", or "#RRGGBBAA" when translucent
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Standard alpha compositing against `background`:
    /// `alpha * self + (1 - alpha) * background` per channel.
    ///
    /// The result is fully opaque.
    pub fn blend(&self, background: Color, alpha: f32) -> Color {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| {
            (alpha * fg as f32 + (1.0 - alpha) * bg as f32).round() as u8
        };
        Color {
            r: mix(self.r, background.r),
            g: mix(self.g, background.g),
            b: mix(self.b, background.b),
            a: 255,
        }
    }

    /// Flatten this color's own alpha against an opaque `background`,
    /// yielding the fully opaque color a renderer would display.
    ///
    /// Opaque colors pass through unchanged, so the operation is idempotent.
    pub fn strip_alpha(&self, background: Color) -> Color {
        if self.is_opaque() {
            return *self;
        }
        self.blend(background, self.a as f32 / 255.0)
    }

    /// Perceived luminance in 0.0..=1.0 (Rec. 601 weights)
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Look up a recognized color name (basic CSS set, case-insensitive)
fn named_color(name: &str) -> Option<Color> {
    let c = match name.to_ascii_lowercase().as_str() {
        "black" => Color::rgb(0x00, 0x00, 0x00),
        "silver" => Color::rgb(0xC0, 0xC0, 0xC0),
        "gray" | "grey" => Color::rgb(0x80, 0x80, 0x80),
        "white" => Color::rgb(0xFF, 0xFF, 0xFF),
        "maroon" => Color::rgb(0x80, 0x00, 0x00),
        "red" => Color::rgb(0xFF, 0x00, 0x00),
        "purple" => Color::rgb(0x80, 0x00, 0x80),
        "fuchsia" | "magenta" => Color::rgb(0xFF, 0x00, 0xFF),
        "green" => Color::rgb(0x00, 0x80, 0x00),
        "lime" => Color::rgb(0x00, 0xFF, 0x00),
        "olive" => Color::rgb(0x80, 0x80, 0x00),
        "yellow" => Color::rgb(0xFF, 0xFF, 0x00),
        "navy" => Color::rgb(0x00, 0x00, 0x80),
        "blue" => Color::rgb(0x00, 0x00, 0xFF),
        "teal" => Color::rgb(0x00, 0x80, 0x80),
        "aqua" | "cyan" => Color::rgb(0x00, 0xFF, 0xFF),
        "orange" => Color::rgb(0xFF, 0xA5, 0x00),
        "brown" => Color::rgb(0xA5, 0x2A, 0x2A),
        "pink" => Color::rgb(0xFF, 0xC0, 0xCB),
        "transparent" => Color::rgba(0x00, 0x00, 0x00, 0x00),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_hex() {
        let color = Color::parse("#abc").unwrap();
        assert_eq!(color, Color::rgb(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Color::parse("Red").unwrap(), Color::rgb(0xFF, 0, 0));
        assert_eq!(Color::parse("transparent").unwrap().a, 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Color::parse("#ZZZZZZ").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("not-a-color").is_err());
        assert!(Color::parse("").is_err());
        assert!(Color::parse("#€€").is_err());
    }

    #[test]
    fn test_blend_midpoint() {
        let fg = Color::rgb(0xFF, 0x00, 0x00);
        let bg = Color::rgb(0x00, 0x00, 0xFF);
        let mixed = fg.blend(bg, 0.5);
        assert_eq!(mixed, Color::rgb(0x80, 0x00, 0x80));
    }

    #[test]
    fn test_strip_alpha_flattens() {
        let translucent = Color::rgba(0xFF, 0xFF, 0xFF, 0x80);
        let flat = translucent.strip_alpha(Color::rgb(0, 0, 0));
        assert!(flat.is_opaque());
        assert_eq!(flat, Color::rgb(0x80, 0x80, 0x80));
    }

    #[test]
    fn test_to_hex_keeps_alpha_only_when_translucent() {
        assert_eq!(Color::rgb(0x1E, 0x1E, 0x1E).to_hex(), "#1E1E1E");
        assert_eq!(Color::rgba(0x1E, 0x1E, 0x1E, 0x80).to_hex(), "#1E1E1E80");
    }
}
