//! Ring tracker — keeps a visible ring glued to a moving target.
//!
//! Targets move without telling anyone: a container scrolls, a layout
//! shifts, an animation runs. The tracker is driven once per frame by the
//! host's scheduler, recomputes the active ring's style, and asks for a
//! repaint only when the result differs from what was last painted. In a
//! still scene every tick after the first is a single comparison.
//!
//! ```text
//! tick ──▶ tracking? ──no──▶ Idle
//!              │
//!             yes
//!              ▼
//!      style(active) == last? ──yes──▶ Unchanged
//!              │
//!              no
//!              ▼
//!      last = style; invalidate ──▶ Repainted
//! ```

use std::fmt;

use tracing::trace;

use crate::document::Document;
use crate::registry::RingRegistry;
use crate::style::RingStyle;

/// What a single [`RingTracker::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tracking is disabled.
    Idle,
    /// The style matched the last painted one; nothing was signaled.
    Unchanged,
    /// The style changed and the active manager was invalidated.
    Repainted,
}

/// Per-frame change detector for the active ring.
#[derive(Debug, Clone, Default)]
pub struct RingTracker {
    tracking: bool,
    last: RingStyle,
    repaints: u64,
}

impl RingTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking. The next tick compares against the last painted style.
    pub const fn enable(&mut self) {
        self.tracking = true;
    }

    /// Stop tracking. Ticks become no-ops until re-enabled.
    pub const fn disable(&mut self) {
        self.tracking = false;
    }

    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// The style most recently signaled for repaint.
    #[must_use]
    pub const fn last_style(&self) -> &RingStyle {
        &self.last
    }

    /// Repaints signaled since creation.
    #[must_use]
    pub const fn repaints(&self) -> u64 {
        self.repaints
    }

    /// Recompute the active ring and invalidate it if it changed.
    ///
    /// With no active scope the style is [`RingStyle::Hidden`], so a ring
    /// that was just hidden produces one final repaint.
    pub fn tick<N, D>(&mut self, registry: &mut RingRegistry<N>, doc: &D) -> TickOutcome
    where
        N: Copy + Eq + fmt::Debug,
        D: Document<Node = N>,
    {
        if !self.tracking {
            return TickOutcome::Idle;
        }

        let style = registry
            .active_manager()
            .map_or(RingStyle::Hidden, |manager| manager.style(doc));
        if style == self.last {
            return TickOutcome::Unchanged;
        }

        trace!(visible = style.is_visible(), "tracked ring changed");
        self.last = style;
        self.repaints += 1;
        if let Some(manager) = registry.active_manager_mut() {
            manager.invalidate();
        }
        TickOutcome::Repainted
    }
}
