//! Ring color selection against an effective background.
//!
//! The ring has a small fixed vocabulary of colors:
//!
//! - **Primary**: the theme's focus color, used on neutral surfaces. It is
//!   assumed to contrast adequately against anything low in saturation.
//! - **Light**: translucent white, for strongly chromatic dark surfaces.
//! - **Dark**: translucent black, for strongly chromatic light surfaces.
//!
//! Selection is threshold-based rather than a contrast search: saturation
//! decides whether the primary color is safe, relative luminance decides
//! between light and dark. Both cutoffs are product-tuned and live in
//! [`ContrastConfig`] so a theme can move them.

use std::fmt;

use fr_color::Color;
use tracing::trace;

// ---------------------------------------------------------------------------
// RingColor
// ---------------------------------------------------------------------------

/// One of the allowed focus ring colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RingColor {
    /// Theme focus color (`var(--focus-primary)`).
    #[default]
    Primary,
    /// Light-on-dark ring.
    Light,
    /// Dark-on-light ring.
    Dark,
}

impl RingColor {
    /// The CSS value a renderer should paint for this token.
    #[must_use]
    pub const fn css_value(self) -> &'static str {
        match self {
            Self::Primary => "var(--focus-primary)",
            Self::Light => "rgba(255,255,255,0.7)",
            Self::Dark => "rgba(0, 0, 0, 0.85)",
        }
    }

    /// The concrete color behind this token, if it has one.
    ///
    /// [`RingColor::Primary`] resolves through a CSS custom property, so its
    /// color is unknown here.
    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Primary => None,
            Self::Light | Self::Dark => Color::parse(self.css_value()),
        }
    }
}

impl fmt::Display for RingColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_value())
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Per-scope theme overrides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThemeOptions {
    /// Replaces [`ContrastConfig::brightness_threshold`] when set.
    pub brightness_threshold: Option<f64>,
}

/// Tunable constants for ring color selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastConfig {
    /// Backgrounds with HSL saturation at or below this use the primary color.
    pub saturation_cutoff: f64,
    /// Relative luminance below this counts as "dark".
    pub brightness_threshold: f64,
    /// Token for dark chromatic backgrounds.
    pub low: RingColor,
    /// Token for light chromatic backgrounds.
    pub high: RingColor,
}

impl ContrastConfig {
    /// Saturation at or below which a background is considered neutral.
    pub const DEFAULT_SATURATION_CUTOFF: f64 = 0.4;

    /// Product-tuned default. Relative luminance never reaches it, so every
    /// strongly chromatic background gets `low` unless a theme overrides it.
    pub const DEFAULT_BRIGHTNESS_THRESHOLD: f64 = 200.0;

    /// Suggested theme threshold: the luminance at which white and black
    /// have equal WCAG contrast against a surface, `sqrt(1.05 * 0.05) - 0.05`.
    pub const WCAG_MIDPOINT_THRESHOLD: f64 = 0.179;

    /// Apply theme overrides on top of this configuration.
    #[must_use]
    pub fn with_theme(self, theme: Option<&ThemeOptions>) -> Self {
        match theme.and_then(|t| t.brightness_threshold) {
            Some(brightness_threshold) => Self { brightness_threshold, ..self },
            None => self,
        }
    }
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            saturation_cutoff: Self::DEFAULT_SATURATION_CUTOFF,
            brightness_threshold: Self::DEFAULT_BRIGHTNESS_THRESHOLD,
            low: RingColor::Light,
            high: RingColor::Dark,
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Pick the ring color for an effective background.
///
/// - No background: [`RingColor::Primary`].
/// - Saturation at or below the cutoff: [`RingColor::Primary`], whatever
///   the lightness.
/// - Otherwise: `config.low` when luminance is below the threshold,
///   `config.high` at or above it.
///
/// ```
/// use fr_color::Color;
/// use fr_contrast::{ContrastConfig, RingColor, select_ring_color};
///
/// let config = ContrastConfig::default();
/// let navy = Color::rgb(10.0, 20.0, 120.0);
/// assert_eq!(select_ring_color(Some(navy), None, &config), RingColor::Light);
/// assert_eq!(select_ring_color(None, None, &config), RingColor::Primary);
/// ```
#[must_use]
pub fn select_ring_color(
    background: Option<Color>,
    theme: Option<&ThemeOptions>,
    config: &ContrastConfig,
) -> RingColor {
    let Some(background) = background else {
        return RingColor::Primary;
    };

    let config = config.with_theme(theme);
    let saturation = background.to_hsl().saturation;
    if saturation <= config.saturation_cutoff {
        return RingColor::Primary;
    }

    let luminance = background.relative_luminance();
    let token = if luminance < config.brightness_threshold {
        config.low
    } else {
        config.high
    };
    trace!(saturation, luminance, threshold = config.brightness_threshold, ?token, "ring color selected");
    token
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0], independent of argument order. Alpha is
/// ignored; composite translucent colors first.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
