// SPDX-License-Identifier: MIT
//
// fr-color color model — the RGBA value behind every ring decision.
//
// Single-character variable names (r, g, b, h, s, l, c, x, m) are the
// standard mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
//
// Colors arrive as computed-style strings ("rgba(12, 34, 56, 0.5)", "#abc",
// "hsl(210 40% 50%)") and leave as one of three things: a hex string, an
// HSL triple for saturation checks, or a WCAG relative luminance.
//
// Channels are stored as f64 in the 0–255 range and are NOT rounded on
// construction: compositing several translucent layers produces fractional
// channels, and rounding at each step would drift. Rounding happens once,
// at serialization.
//
// Parsing pipeline:
//
//   "#rgb" / "#rgba" / "#rrggbb" / "#rrggbbaa"  → parse_hex
//   "rgb(...)" / "rgba(...)" / "hsl(...)" / "hsla(...)" → parse_function
//                                                 └─ hsl_to_rgb for hsl[a]
//   anything else                                → None

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::css::parse_float_prefix;

static HEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#[0-9a-f]{3,8}$").expect("static hex pattern"));

static FUNCTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^((?:rgb|hsl)a?)\s*\(([^)]*)\)").expect("static color function pattern")
});

// ─── Color ───────────────────────────────────────────────────────────────────

/// An sRGB color with alpha, as read from CSS.
///
/// - `red`, `green`, `blue`: 0.0 to 255.0 (may be fractional after mixing)
/// - `alpha`: 0.0 (transparent) to 1.0 (opaque)
///
/// # Examples
///
/// ```
/// use fr_color::color::Color;
///
/// let brand = Color::parse("#5865f2").unwrap();
/// let scrim = Color::parse("rgba(0, 0, 0, 0.5)").unwrap();
///
/// // Composite the scrim over the brand color.
/// let seen = scrim.over(brand);
/// assert_eq!(seen.to_hex_string(), "#2c3379");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

/// A color in HSL form.
///
/// `hue` is in degrees `[0, 360)`; `saturation` and `lightness` are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl Color {
    /// Opaque white, the assumed backdrop behind every page.
    pub const WHITE: Self = Self::rgb(255.0, 255.0, 255.0);

    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Fully transparent black, what browsers report for "no background".
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    // ─── Constructors ────────────────────────────────────────────────────

    /// Create an opaque color from 0–255 channels.
    #[inline]
    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue, alpha: 1.0 }
    }

    /// Create a color from 0–255 channels and a 0–1 alpha.
    #[inline]
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self { red, green, blue, alpha }
    }

    // ─── Parsing ─────────────────────────────────────────────────────────

    /// Parse any supported CSS color string.
    ///
    /// Functional notation (`rgb`, `rgba`, `hsl`, `hsla`) and `#`-prefixed
    /// hex are recognized. Everything else (named colors, `transparent`,
    /// `currentcolor`, garbage) yields `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if FUNCTION_PATTERN.is_match(s) {
            return parse_function(s);
        }
        if HEX_PATTERN.is_match(s) {
            return parse_hex(s);
        }
        None
    }

    /// Parse a CSS `rgb`/`rgba` string, accepting the `transparent` keyword.
    ///
    /// Some engines report `transparent` instead of `rgba(0, 0, 0, 0)` for
    /// unset backgrounds; this entry point maps it to [`Color::TRANSPARENT`].
    /// [`Color::parse`] deliberately does not.
    #[must_use]
    pub fn parse_rgb_string(s: &str) -> Option<Self> {
        if s == "transparent" {
            return Some(Self::TRANSPARENT);
        }
        parse_function(s)
    }

    /// Parse a `#`-prefixed hex color with 3, 4, 6, or 8 digits.
    #[must_use]
    pub fn parse_hex(s: &str) -> Option<Self> {
        if !HEX_PATTERN.is_match(s) {
            return None;
        }
        parse_hex(s)
    }

    // ─── Compositing ─────────────────────────────────────────────────────

    /// Composite this color (top) over `bottom` with the "over" operator.
    ///
    /// Each channel becomes `(1 - α_top)·bottom + α_top·top` and the alpha
    /// becomes `α_top + α_bottom·(1 - α_top)`. Order matters.
    #[must_use]
    pub fn over(self, bottom: Self) -> Self {
        let a = self.alpha;
        let inv = 1.0 - a;
        Self {
            red: inv.mul_add(bottom.red, a * self.red),
            green: inv.mul_add(bottom.green, a * self.green),
            blue: inv.mul_add(bottom.blue, a * self.blue),
            alpha: bottom.alpha.mul_add(inv, a),
        }
    }

    // ─── Analysis ────────────────────────────────────────────────────────

    /// Convert to HSL.
    ///
    /// Achromatic colors (zero chroma) report hue 0 and saturation 0.
    #[must_use]
    pub fn to_hsl(self) -> Hsla {
        let r = self.red / 255.0;
        let g = self.green / 255.0;
        let b = self.blue / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let chroma = max - min;
        let lightness = (max + min) / 2.0;

        if chroma <= 0.0 {
            return Hsla { hue: 0.0, saturation: 0.0, lightness, alpha: self.alpha };
        }

        let denom = 1.0 - 2.0f64.mul_add(lightness, -1.0).abs();
        let saturation = if denom > 0.0 { chroma / denom } else { 0.0 };

        #[allow(clippy::float_cmp)]
        let segment = if max == r {
            (g - b) / chroma
        } else if max == g {
            (b - r) / chroma + 2.0
        } else {
            (r - g) / chroma + 4.0
        };

        Hsla {
            hue: normalize_hue(segment * 60.0),
            saturation,
            lightness,
            alpha: self.alpha,
        }
    }

    /// WCAG relative luminance in `[0, 1]`.
    ///
    /// See <https://www.w3.org/WAI/GL/wiki/Relative_luminance>.
    #[must_use]
    pub fn relative_luminance(self) -> f64 {
        let r = channel_to_linear(self.red / 255.0);
        let g = channel_to_linear(self.green / 255.0);
        let b = channel_to_linear(self.blue / 255.0);
        0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
    }

    // ─── Serialization ───────────────────────────────────────────────────

    /// Format as `#rrggbb`. Alpha is dropped; channels are rounded.
    #[must_use]
    pub fn to_hex_string(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            to_u8(self.red),
            to_u8(self.green),
            to_u8(self.blue)
        )
    }
}

impl fmt::Display for Color {
    /// CSS `rgba()` notation with rounded channels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            to_u8(self.red),
            to_u8(self.green),
            to_u8(self.blue),
            self.alpha
        )
    }
}

impl Default for Color {
    /// Default is fully transparent, like an unset CSS background.
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Composite `top` over `bottom`. Free-function form of [`Color::over`],
/// handy as a fold step.
#[inline]
#[must_use]
pub fn mix(top: Color, bottom: Color) -> Color {
    top.over(bottom)
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let digits = s.strip_prefix('#').unwrap_or(s).as_bytes();

    let mut expanded = [0u8; 8];
    let len = match digits.len() {
        3 | 4 => {
            for (i, &d) in digits.iter().enumerate() {
                expanded[i * 2] = d;
                expanded[i * 2 + 1] = d;
            }
            digits.len() * 2
        }
        6 | 8 => {
            expanded[..digits.len()].copy_from_slice(digits);
            digits.len()
        }
        _ => return None,
    };

    let r = parse_hex_byte(&expanded[0..2])?;
    let g = parse_hex_byte(&expanded[2..4])?;
    let b = parse_hex_byte(&expanded[4..6])?;
    let a = if len == 8 {
        f64::from(parse_hex_byte(&expanded[6..8])?) / 255.0
    } else {
        1.0
    };

    Some(Color::rgba(f64::from(r), f64::from(g), f64::from(b), a))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Functional Notation ─────────────────────────────────────────────────────

fn parse_function(s: &str) -> Option<Color> {
    let caps = FUNCTION_PATTERN.captures(s)?;
    let func = caps.get(1)?.as_str().to_ascii_lowercase();
    let args = caps.get(2)?.as_str();
    let is_hsl = func.starts_with("hsl");

    let values: Vec<f64> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(index, part)| component_value(is_hsl, part, index))
        .collect::<Option<_>>()?;

    if values.len() < 3 {
        return None;
    }
    let alpha = values.get(3).copied().unwrap_or(1.0).clamp(0.0, 1.0);

    if is_hsl {
        let (r, g, b) = hsl_to_rgb(values[0], values[1] / 255.0, values[2] / 255.0);
        return Some(Color::rgba(r, g, b, alpha));
    }

    Some(Color::rgba(values[0], values[1], values[2], alpha))
}

/// Convert one color-function argument to a number.
///
/// Percentages scale to 0–255 for channels (saturation and lightness too,
/// which [`hsl_to_rgb`] divides back out) and to 0–1 for alpha. Hue angles
/// are normalized to degrees.
fn component_value(is_hsl: bool, value: &str, index: usize) -> Option<f64> {
    let n = parse_float_prefix(value)?;

    if value.ends_with('%') {
        return Some(if index == 3 { n / 100.0 } else { n * 255.0 / 100.0 });
    }

    if is_hsl && index == 0 {
        let unit = value.trim_start_matches(|c: char| {
            c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')
        });
        return Some(match unit.to_ascii_lowercase().as_str() {
            "turn" => n * 360.0,
            "rad" => n.to_degrees(),
            "grad" => n * 0.9,
            _ => n,
        });
    }

    Some(n)
}

/// HSL → 0–255 RGB via the chroma / hue-segment formula.
///
/// `s` and `l` are fractions of 1; `h` is any angle in degrees.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = normalize_hue(h);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (
        ((r + m) * 255.0).round(),
        ((g + m) * 255.0).round(),
        ((b + m) * 255.0).round(),
    )
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Normalize a hue angle to the range [0, 360).
#[inline]
fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// sRGB component (0–1) to linear light, using the WCAG 2.0 knee.
#[inline]
fn channel_to_linear(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Round a 0–255 channel to a byte.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.round().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
