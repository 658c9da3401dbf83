//! The ring's computed style — what a renderer paints.

use fr_contrast::RingColor;

use crate::geometry::RingBox;

/// Custom property carrying the ring color token.
pub const FOCUS_RING_COLOR_CSS_PROPERTY: &str = "--__adaptive-focus-ring-color";

/// Custom property carrying the ring's corner radii.
pub const FOCUS_RING_RADIUS_CSS_PROPERTY: &str = "--__adaptive-focus-ring-radius";

/// Output of a style pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RingStyle {
    /// Nothing to paint.
    #[default]
    Hidden,
    /// A ring should be painted with these properties.
    Visible(VisibleRing),
}

/// Properties of a visible ring.
///
/// Every field degrades independently: a missing container leaves `bounds`
/// empty, a box-only ring has no `color` or `radius`, and so on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisibleRing {
    pub bounds: Option<RingBox>,
    pub z_index: Option<i64>,
    pub color: Option<RingColor>,
    pub radius: Option<String>,
}

impl RingStyle {
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Visible(_))
    }

    #[must_use]
    pub const fn as_visible(&self) -> Option<&VisibleRing> {
        match self {
            Self::Visible(ring) => Some(ring),
            Self::Hidden => None,
        }
    }

    /// Flatten to `(property, value)` pairs for an inline style attribute.
    ///
    /// Only present fields are emitted; a hidden ring emits nothing.
    #[must_use]
    pub fn css_properties(&self) -> Vec<(&'static str, String)> {
        let Self::Visible(ring) = self else {
            return Vec::new();
        };

        let mut props = Vec::with_capacity(7);
        if let Some(b) = ring.bounds {
            props.push(("top", format!("{}px", b.top)));
            props.push(("left", format!("{}px", b.left)));
            props.push(("width", format!("{}px", b.width)));
            props.push(("height", format!("{}px", b.height)));
        }
        if let Some(z) = ring.z_index {
            props.push(("z-index", z.to_string()));
        }
        if let Some(color) = ring.color {
            props.push((FOCUS_RING_COLOR_CSS_PROPERTY, color.css_value().to_owned()));
        }
        if let Some(radius) = &ring.radius {
            props.push((FOCUS_RING_RADIUS_CSS_PROPERTY, radius.clone()));
        }
        props
    }
}
