use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A colour as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Ansi256(u8),
    Hex { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    #[default]
    TrueColor,
    Color256,
    Color16,
}

#[derive(Debug, Error)]
#[error("invalid color value for field \"{field}\": \"{value}\"")]
pub struct ColorParseError {
    pub field: String,
    pub value: String,
}

/// Names accepted in place of the 16 base ANSI indices.
const NAMED: [(&str, u8); 16] = [
    ("black", 0),
    ("red", 1),
    ("green", 2),
    ("yellow", 3),
    ("blue", 4),
    ("magenta", 5),
    ("cyan", 6),
    ("grey", 7),
    ("darkgrey", 8),
    ("brightred", 9),
    ("brightgreen", 10),
    ("brightyellow", 11),
    ("brightblue", 12),
    ("brightmagenta", 13),
    ("brightcyan", 14),
    ("white", 15),
];

impl Color {
    /// Parse `"0"`..`"255"`, `"#RRGGBB"`, `"#RGB"` or a base colour name.
    pub fn parse(s: &str, field: &str) -> Result<Self, ColorParseError> {
        let make_err = || ColorParseError {
            field: field.to_owned(),
            value: s.to_owned(),
        };

        if let Some(hex) = s.strip_prefix('#') {
            let channel = |range: std::ops::Range<usize>, scale: u8| {
                hex.get(range)
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .map(|v| v * scale)
                    .ok_or_else(make_err)
            };
            return match hex.len() {
                6 => Ok(Color::Hex {
                    r: channel(0..2, 1)?,
                    g: channel(2..4, 1)?,
                    b: channel(4..6, 1)?,
                }),
                3 => Ok(Color::Hex {
                    r: channel(0..1, 17)?,
                    g: channel(1..2, 17)?,
                    b: channel(2..3, 17)?,
                }),
                _ => Err(make_err()),
            };
        }

        let lower = s.to_ascii_lowercase();
        if let Some((_, idx)) = NAMED.iter().find(|(name, _)| *name == lower) {
            return Ok(Color::Ansi256(*idx));
        }

        s.trim()
            .parse::<u8>()
            .map(Color::Ansi256)
            .map_err(|_| make_err())
    }

    /// Convert to a terminal colour at the given depth.
    ///
    /// ANSI 0–15 go through crossterm's named variants so the terminal's own
    /// 16-colour palette is used.
    pub fn to_crossterm_color(self, depth: ColorDepth) -> crossterm::style::Color {
        match (self, depth) {
            (Color::Ansi256(n), ColorDepth::TrueColor | ColorDepth::Color256) => {
                ansi_to_crossterm(n)
            }
            (Color::Hex { r, g, b }, ColorDepth::TrueColor) => {
                crossterm::style::Color::Rgb { r, g, b }
            }
            (Color::Hex { r, g, b }, ColorDepth::Color256) => {
                crossterm::style::Color::AnsiValue(cube_index(r, g, b))
            }
            (color, ColorDepth::Color16) => {
                let (r, g, b) = color.to_rgb();
                ansi_to_crossterm(nearest_ansi16(r, g, b))
            }
        }
    }

    fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Hex { r, g, b } => (r, g, b),
            Color::Ansi256(n) => ansi256_to_rgb(n),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Ansi256(n) => write!(f, "{n}"),
            Color::Hex { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s, "<unknown>")
    }
}

impl ColorDepth {
    /// Detect terminal colour depth from `COLORTERM` / `TERM`.
    pub fn detect() -> Self {
        if let Ok(ct) = std::env::var("COLORTERM")
            && (ct == "truecolor" || ct == "24bit")
        {
            return ColorDepth::TrueColor;
        }
        if let Ok(term) = std::env::var("TERM")
            && term.contains("256color")
        {
            return ColorDepth::Color256;
        }
        ColorDepth::Color16
    }
}

fn ansi_to_crossterm(n: u8) -> crossterm::style::Color {
    use crossterm::style::Color;
    match n {
        0 => Color::Black,
        1 => Color::DarkRed,
        2 => Color::DarkGreen,
        3 => Color::DarkYellow,
        4 => Color::DarkBlue,
        5 => Color::DarkMagenta,
        6 => Color::DarkCyan,
        7 => Color::Grey,
        8 => Color::DarkGrey,
        9 => Color::Red,
        10 => Color::Green,
        11 => Color::Yellow,
        12 => Color::Blue,
        13 => Color::Magenta,
        14 => Color::Cyan,
        15 => Color::White,
        _ => Color::AnsiValue(n),
    }
}

fn ansi256_to_rgb(n: u8) -> (u8, u8, u8) {
    const BASE: [(u8, u8, u8); 16] = [
        (0, 0, 0),
        (128, 0, 0),
        (0, 128, 0),
        (128, 128, 0),
        (0, 0, 128),
        (128, 0, 128),
        (0, 128, 128),
        (192, 192, 192),
        (128, 128, 128),
        (255, 0, 0),
        (0, 255, 0),
        (255, 255, 0),
        (0, 0, 255),
        (255, 0, 255),
        (0, 255, 255),
        (255, 255, 255),
    ];
    match n {
        0..=15 => BASE[usize::from(n)],
        16..=231 => {
            let idx = n - 16;
            let level = |i: u8| if i == 0 { 0 } else { 55 + 40 * i };
            (level(idx / 36), level((idx / 6) % 6), level(idx % 6))
        }
        232..=255 => {
            let v = 8 + 10 * (n - 232);
            (v, v, v)
        }
    }
}

/// Nearest 256-colour palette entry: the grayscale ramp for greys, the
/// 6x6x6 colour cube otherwise.
fn cube_index(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        return match r {
            0..8 => 16,
            249.. => 231,
            #[allow(clippy::cast_possible_truncation)]
            v => 232 + ((u16::from(v) - 8) / 10).min(23) as u8,
        };
    }
    let level = |v: u8| -> u8 {
        if v < 48 {
            0
        } else if v < 115 {
            1
        } else {
            #[allow(clippy::cast_possible_truncation)]
            {
                ((u16::from(v) - 35) / 40).min(5) as u8
            }
        }
    };
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

fn nearest_ansi16(r: u8, g: u8, b: u8) -> u8 {
    let bright = (u16::from(r) + u16::from(g) + u16::from(b)) / 3 > 128;
    let base = u8::from(r > 128) | (u8::from(g > 128) << 1) | (u8::from(b > 128) << 2);
    if bright { base + 8 } else { base }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ansi_index() {
        assert_eq!(Color::parse("245", "f").unwrap(), Color::Ansi256(245));
        assert!(Color::parse("256", "f").is_err());
    }

    #[test]
    fn parses_hex() {
        assert_eq!(
            Color::parse("#c0caf5", "f").unwrap(),
            Color::Hex {
                r: 0xc0,
                g: 0xca,
                b: 0xf5
            }
        );
        assert_eq!(
            Color::parse("#fff", "f").unwrap(),
            Color::Hex {
                r: 255,
                g: 255,
                b: 255
            }
        );
        assert!(Color::parse("#ff", "f").is_err());
        assert!(Color::parse("#gggggg", "f").is_err());
    }

    #[test]
    fn parses_names() {
        assert_eq!(Color::parse("Red", "f").unwrap(), Color::Ansi256(1));
        assert_eq!(Color::parse("brightgreen", "f").unwrap(), Color::Ansi256(10));
    }

    #[test]
    fn error_names_the_field() {
        let err = Color::parse("nope", "theme.colors.accent").unwrap_err();
        assert!(err.to_string().contains("theme.colors.accent"));
    }

    #[test]
    fn base_indices_use_named_terminal_colors() {
        assert_eq!(
            Color::Ansi256(1).to_crossterm_color(ColorDepth::TrueColor),
            crossterm::style::Color::DarkRed
        );
        assert_eq!(
            Color::Ansi256(200).to_crossterm_color(ColorDepth::Color256),
            crossterm::style::Color::AnsiValue(200)
        );
    }

    #[test]
    fn hex_downgrades_with_depth() {
        let red = Color::Hex { r: 255, g: 0, b: 0 };
        assert_eq!(
            red.to_crossterm_color(ColorDepth::TrueColor),
            crossterm::style::Color::Rgb { r: 255, g: 0, b: 0 }
        );
        assert_eq!(
            red.to_crossterm_color(ColorDepth::Color256),
            crossterm::style::Color::AnsiValue(196)
        );
        assert_eq!(
            red.to_crossterm_color(ColorDepth::Color16),
            crossterm::style::Color::DarkRed
        );
    }

    #[test]
    fn hex_greys_use_grayscale_ramp() {
        let grey = |v: u8| Color::Hex { r: v, g: v, b: v }.to_crossterm_color(ColorDepth::Color256);
        assert_eq!(grey(0x80), crossterm::style::Color::AnsiValue(244));
        assert_eq!(grey(0x12), crossterm::style::Color::AnsiValue(233));
        assert_eq!(grey(0x00), crossterm::style::Color::AnsiValue(16));
        assert_eq!(grey(0xff), crossterm::style::Color::AnsiValue(231));
        // Non-grey colours still map into the cube.
        assert_eq!(
            Color::Hex { r: 0xff, g: 0, b: 0 }.to_crossterm_color(ColorDepth::Color256),
            crossterm::style::Color::AnsiValue(196)
        );
    }
}
