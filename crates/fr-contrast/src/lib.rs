//! # fr-contrast — choosing a ring color that stays visible
//!
//! Two steps turn a stack of CSS backgrounds into a ring color token:
//!
//! ```text
//! background-color strings (nearest layer first)
//!     │
//!     ▼
//! background.rs: composite translucent layers over white, stop at the
//!                first effectively-opaque layer
//!     │
//!     ▼
//! contrast.rs:   saturation + luminance thresholds → RingColor token
//! ```
//!
//! Neither step knows about documents or elements; callers hand in the
//! style strings already collected from an ancestry walk.

pub mod background;
pub mod contrast;

pub use background::{OPAQUE_ALPHA_CUTOFF, composite_layers};
pub use contrast::{ContrastConfig, RingColor, ThemeOptions, contrast_ratio, select_ring_color};
