//! Focus ring binding — wiring one focusable element to a ring scope.
//!
//! A [`FocusRing`] is the glue a UI layer attaches to a focusable element.
//! It translates focus and blur events into [`RingRegistry`] calls and keeps
//! the focus state needed to decorate the element's class list.
//!
//! Three modes:
//!
//! - **Local**: focus events on the element itself. The ring goes on the
//!   element, or on `ring_target` when one is given.
//! - **Remote**: focus events come from `focus_target`, the ring goes on
//!   `ring_target`. The host forwards the target's events here, and
//!   `enabled` does not gate them.
//! - **Controlled**: the host decides focus through
//!   [`set_focused`](FocusRing::set_focused); focus events are ignored.
//!
//! A focus event whose `event_target` is the element itself is direct
//! focus. Anything else is a descendant gaining focus ("focus within"),
//! which only shows a ring when `within` is set.

use std::fmt;

use bitflags::bitflags;
use tracing::trace;

use crate::document::Document;
use crate::error::{Result, RingError};
use crate::geometry::Offset;
use crate::manager::RingShowOptions;
use crate::registry::{RingRegistry, ScopeId};

bitflags! {
    /// Focus state of a bound element.
    ///
    /// ```
    /// use fr_engine::binding::FocusFlags;
    ///
    /// let state = FocusFlags::FOCUSED | FocusFlags::FOCUS_WITHIN;
    /// assert!(state.contains(FocusFlags::FOCUSED));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct FocusFlags: u8 {
        /// The element itself has focus.
        const FOCUSED      = 0b0000_0001;
        /// A descendant of the element has focus.
        const FOCUS_WITHIN = 0b0000_0010;
    }
}

/// Configuration for a [`FocusRing`].
#[derive(Debug, Clone, PartialEq)]
pub struct FocusRingProps<N> {
    /// Show the ring when a descendant gains focus, not just the element.
    pub within: bool,
    /// A disabled local binding never shows a ring. Remote bindings still
    /// follow their `focus_target`.
    pub enabled: bool,
    /// Controlled focus. `Some` switches the binding to controlled mode.
    pub focused: Option<bool>,
    pub offset: Offset,
    /// Element whose focus events drive the ring (remote mode).
    pub focus_target: Option<N>,
    /// Element the ring is drawn around.
    pub ring_target: Option<N>,
    pub ring_class_name: Option<String>,
    /// Added to the element's classes while it has focus.
    pub focus_class_name: Option<String>,
    /// Added to the element's classes while a descendant has focus.
    pub focus_within_class_name: Option<String>,
}

impl<N> Default for FocusRingProps<N> {
    fn default() -> Self {
        Self {
            within: false,
            enabled: true,
            focused: None,
            offset: Offset::default(),
            focus_target: None,
            ring_target: None,
            ring_class_name: None,
            focus_class_name: None,
            focus_within_class_name: None,
        }
    }
}

/// A focusable element bound to a ring scope.
#[derive(Debug, Clone)]
pub struct FocusRing<N> {
    scope: ScopeId,
    props: FocusRingProps<N>,
    state: FocusFlags,
}

impl<N: Copy + Eq + fmt::Debug> FocusRing<N> {
    /// Bind to `scope`, validating the target configuration.
    pub fn new(scope: ScopeId, props: FocusRingProps<N>) -> Result<Self> {
        validate(&props)?;
        Ok(Self { scope, props, state: FocusFlags::empty() })
    }

    #[must_use]
    pub const fn scope(&self) -> ScopeId {
        self.scope
    }

    #[must_use]
    pub const fn props(&self) -> &FocusRingProps<N> {
        &self.props
    }

    #[must_use]
    pub const fn state(&self) -> FocusFlags {
        self.state
    }

    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        self.props.focused.is_some()
    }

    /// `enabled` gates local bindings only. A remote binding keeps following
    /// its `focus_target`; disabling it just hides the ring once.
    const fn ignores_events(&self) -> bool {
        self.is_controlled() || (!self.props.enabled && self.props.focus_target.is_none())
    }

    fn show_options(&self) -> RingShowOptions {
        RingShowOptions {
            class_name: self.props.ring_class_name.clone(),
            offset: self.props.offset,
            z_index: None,
        }
    }

    // ─── Events ──────────────────────────────────────────────────────────

    /// Handle a focus event that reached `current_target` (the bound
    /// element) from `event_target`.
    pub fn on_focus<D>(
        &mut self,
        registry: &mut RingRegistry<N>,
        doc: &D,
        current_target: N,
        event_target: N,
    ) -> Result<()>
    where
        D: Document<Node = N>,
    {
        if self.ignores_events() {
            return Ok(());
        }

        let ring_target = self.props.ring_target.unwrap_or(current_target);
        if current_target == event_target {
            self.state.insert(FocusFlags::FOCUSED);
            trace!(?ring_target, "direct focus");
            return registry.show(self.scope, doc, ring_target, self.show_options());
        }

        self.state.insert(FocusFlags::FOCUS_WITHIN);
        if self.props.within {
            trace!(?ring_target, ?event_target, "focus within");
            registry.show(self.scope, doc, ring_target, self.show_options())?;
        }
        Ok(())
    }

    /// Handle a blur event: hide the scope's ring and forget focus.
    pub fn on_blur(&mut self, registry: &mut RingRegistry<N>) -> Result<()> {
        if self.ignores_events() {
            return Ok(());
        }
        self.state = FocusFlags::empty();
        registry.hide(self.scope)
    }

    // ─── Host-driven changes ─────────────────────────────────────────────

    /// Controlled mode: show or hide the ring on `ring_target`.
    pub fn set_focused<D>(&mut self, registry: &mut RingRegistry<N>, doc: &D, focused: bool) -> Result<()>
    where
        D: Document<Node = N>,
    {
        let ring_target = self.props.ring_target.ok_or(RingError::ControlledWithoutRingTarget)?;
        self.props.focused = Some(focused);
        self.state.set(FocusFlags::FOCUSED, focused);
        if focused {
            registry.show(self.scope, doc, ring_target, self.show_options())
        } else {
            registry.hide(self.scope)
        }
    }

    /// Enable or disable the binding. Disabling hides the scope's ring.
    pub fn set_enabled(&mut self, registry: &mut RingRegistry<N>, enabled: bool) -> Result<()> {
        self.props.enabled = enabled;
        if enabled {
            return Ok(());
        }
        registry.hide(self.scope)
    }

    /// Ask the scope to repaint, e.g. after the bound element re-rendered.
    pub fn refresh(&self, registry: &mut RingRegistry<N>) -> Result<()> {
        if self.props.enabled {
            registry.manager_mut(self.scope)?.invalidate();
        }
        Ok(())
    }

    /// Tear down the binding, hiding the ring if this element had focus.
    pub fn unmount(self, registry: &mut RingRegistry<N>) -> Result<()> {
        if self.state.contains(FocusFlags::FOCUSED) {
            return registry.hide(self.scope);
        }
        Ok(())
    }

    // ─── Decoration ──────────────────────────────────────────────────────

    /// The element's class list: `base` plus the focus classes for the
    /// current state. Remote, controlled, and disabled bindings leave the
    /// element's classes alone.
    #[must_use]
    pub fn class_name(&self, base: Option<&str>) -> String {
        let decorate = self.props.enabled && self.props.focus_target.is_none() && !self.is_controlled();
        let focus = self
            .state
            .contains(FocusFlags::FOCUSED)
            .then_some(self.props.focus_class_name.as_deref())
            .flatten();
        let within = self
            .state
            .contains(FocusFlags::FOCUS_WITHIN)
            .then_some(self.props.focus_within_class_name.as_deref())
            .flatten();

        let extra = if decorate { [focus, within] } else { [None, None] };
        std::iter::once(base)
            .chain(extra)
            .flatten()
            .filter(|class| !class.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn validate<N>(props: &FocusRingProps<N>) -> Result<()> {
    if props.ring_target.is_some() {
        return Ok(());
    }
    if props.focus_target.is_some() {
        return Err(RingError::MissingRingTarget);
    }
    if props.focused.is_some() {
        return Err(RingError::ControlledWithoutRingTarget);
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
