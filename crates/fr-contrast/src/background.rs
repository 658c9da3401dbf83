//! Effective background resolution — what is actually painted behind a ring.
//!
//! A focused element rarely owns an opaque background. Usually it sits on a
//! card with a translucent tint, on a panel with its own tint, on a page.
//! The color a user sees is all of those layers composited together, and
//! that composite is what the ring has to contrast against.

use fr_color::{Color, mix};
use tracing::trace;

/// Layers with alpha above this are treated as opaque: nothing behind them
/// can meaningfully show through.
pub const OPAQUE_ALPHA_CUTOFF: f64 = 0.95;

/// Composite a stack of CSS `background-color` values into one color.
///
/// `layers` is ordered nearest-first (the element directly behind the ring
/// comes first). Unparsable values are skipped. The walk stops at the first
/// layer with alpha above [`OPAQUE_ALPHA_CUTOFF`] and returns that layer
/// as-is. If no such layer exists, an opaque white backdrop is appended and
/// the whole stack is folded nearest-first with [`mix`].
///
/// ```
/// use fr_contrast::composite_layers;
///
/// let bg = composite_layers(["rgba(0, 0, 0, 0.5)", "garbage", "rgba(0, 0, 0, 0)"]);
/// assert_eq!(bg.to_hex_string(), "#808080");
/// ```
#[must_use]
pub fn composite_layers<'a, I>(layers: I) -> Color
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stack = Vec::new();

    for (depth, raw) in layers.into_iter().enumerate() {
        let Some(layer) = Color::parse(raw) else {
            continue;
        };
        if layer.alpha > OPAQUE_ALPHA_CUTOFF {
            trace!(depth, color = %layer, "opaque background layer reached");
            return layer;
        }
        stack.push(layer);
    }

    trace!(layers = stack.len(), "compositing translucent layers over white");
    stack.push(Color::WHITE);
    stack
        .into_iter()
        .reduce(mix)
        .unwrap_or(Color::WHITE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
