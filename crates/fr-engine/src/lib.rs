//! # fr-engine — focus ring resolution for focus-rings
//!
//! Given a focused element, decide where its ring goes, what it stacks
//! above, how round its corners are, and which color keeps it visible:
//!
//! - **[`document`]**: the `Document` trait the engine reads layout and
//!   computed style through, plus `DocumentTree`, an in-memory arena
//! - **[`ancestry`]**: snapshot of an element and its ancestors
//! - **[`geometry`]**: ring box in container coordinates, border radius
//! - **[`stacking`]**: the z-index that clears every enclosing stacking context
//! - **[`style`]**: `RingStyle`, the output a renderer paints
//! - **[`manager`]**: per-scope ring state, composing the above on demand
//! - **[`registry`]**: all scopes, and the rule that one ring shows at a time
//! - **[`tracker`]**: per-frame change detection for a moving target
//! - **[`binding`]**: focus/blur events of one element → registry calls
//!
//! ```text
//! focus event ──▶ FocusRing ──▶ RingRegistry::show ──▶ RingManager
//!                                                         │ style(doc)
//!                  ancestry ─┬─ geometry ─────────────────┤
//!                            ├─ stacking ─────────────────┤
//!                            └─ fr-contrast (color) ──────┘
//!                                                         ▼
//!                                                     RingStyle
//! ```

pub mod ancestry;
pub mod binding;
pub mod document;
pub mod error;
pub mod geometry;
pub mod manager;
pub mod registry;
pub mod stacking;
pub mod style;
pub mod tracker;

pub use ancestry::{AncestorEntry, Ancestry};
pub use binding::{FocusFlags, FocusRing, FocusRingProps};
pub use document::{ComputedStyle, Document, DocumentTree, NodeId, Rect, ScrollOffset};
pub use error::{Result, RingError};
pub use geometry::{Offset, RingBox, SideOffsets, compute_border_radius, compute_box};
pub use manager::{RingManager, RingShowOptions};
pub use registry::{RingRegistry, ScopeId};
pub use stacking::compute_z_index;
pub use style::{FOCUS_RING_COLOR_CSS_PROPERTY, FOCUS_RING_RADIUS_CSS_PROPERTY, RingStyle, VisibleRing};
pub use tracker::{RingTracker, TickOutcome};
