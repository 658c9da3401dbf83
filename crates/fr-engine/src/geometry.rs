//! Ring geometry — where the ring goes and how round its corners are.
//!
//! Layout reports rects relative to the viewport, but the ring is painted
//! inside a scrolling container. Converting means subtracting the
//! container's own viewport origin and adding back however far it has
//! scrolled. The caller's offset is then applied: the top and left insets
//! shift the origin, and each pair of opposing insets shrinks the size
//! (negative insets grow it).
//!
//! | Edge     | Formula                                        |
//! |----------|------------------------------------------------|
//! | `top`    | `scroll.top + rect.top - container.top - inset.top`    |
//! | `left`   | `scroll.left + rect.left - container.left - inset.left` |
//! | `width`  | `rect.width - (inset.right + inset.left)`       |
//! | `height` | `rect.height - (inset.bottom + inset.top)`      |
//!
//! Degenerate results (negative sizes) pass through; clipping is the
//! renderer's call.

use fr_color::css::int_or;

use crate::document::{ComputedStyle, Rect, ScrollOffset};

// ─── Offset ──────────────────────────────────────────────────────────────────

/// Per-side offsets; unset sides are 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SideOffsets {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

/// How far the ring is inset from the target's box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    /// The same inset on all four sides.
    Uniform(f64),
    /// Individual insets per side.
    Sides(SideOffsets),
}

impl Default for Offset {
    fn default() -> Self {
        Self::Uniform(0.0)
    }
}

impl From<f64> for Offset {
    fn from(value: f64) -> Self {
        Self::Uniform(value)
    }
}

impl From<i32> for Offset {
    fn from(value: i32) -> Self {
        Self::Uniform(f64::from(value))
    }
}

impl From<SideOffsets> for Offset {
    fn from(sides: SideOffsets) -> Self {
        Self::Sides(sides)
    }
}

/// Fully resolved insets, one per side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Offset {
    /// Broadcast a uniform offset, or default missing sides to 0.
    #[must_use]
    pub fn insets(&self) -> Insets {
        match *self {
            Self::Uniform(v) => Insets { top: v, right: v, bottom: v, left: v },
            Self::Sides(s) => Insets {
                top: s.top.unwrap_or(0.0),
                right: s.right.unwrap_or(0.0),
                bottom: s.bottom.unwrap_or(0.0),
                left: s.left.unwrap_or(0.0),
            },
        }
    }
}

// ─── RingBox ─────────────────────────────────────────────────────────────────

/// The ring's box in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RingBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Convert a viewport-relative `target` rect into container coordinates and
/// apply `offset`.
///
/// ```
/// use fr_engine::document::{Rect, ScrollOffset};
/// use fr_engine::geometry::{RingBox, compute_box};
///
/// let ring = compute_box(
///     Rect::new(50.0, 20.0, 30.0, 10.0),
///     Rect::new(10.0, 0.0, 400.0, 300.0),
///     ScrollOffset::default(),
///     &2.0.into(),
/// );
/// assert_eq!(ring, RingBox { top: 38.0, left: 18.0, width: 26.0, height: 6.0 });
/// ```
#[must_use]
pub fn compute_box(target: Rect, container: Rect, scroll: ScrollOffset, offset: &Offset) -> RingBox {
    let inset = offset.insets();
    RingBox {
        top: scroll.top + target.top - container.top - inset.top,
        left: scroll.left + target.left - container.left - inset.left,
        width: target.width - (inset.right + inset.left),
        height: target.height - (inset.bottom + inset.top),
    }
}

// ─── Border radius ───────────────────────────────────────────────────────────

/// Match the ring's corners to the target's.
///
/// Each corner keeps its declared value when that value starts with a
/// positive integer; anything else (zero, `auto`, empty, sub-pixel) becomes
/// `0`. The result is CSS shorthand order: top-left, top-right,
/// bottom-right, bottom-left.
#[must_use]
pub fn compute_border_radius(style: Option<&ComputedStyle>) -> String {
    let Some(style) = style else {
        return "0 0 0 0".to_owned();
    };

    [
        &style.border_top_left_radius,
        &style.border_top_right_radius,
        &style.border_bottom_right_radius,
        &style.border_bottom_left_radius,
    ]
    .into_iter()
    .map(|raw| corner(raw))
    .collect::<Vec<_>>()
    .join(" ")
}

fn corner(raw: &str) -> &str {
    if int_or(raw, 0) > 0 { raw.trim() } else { "0" }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
