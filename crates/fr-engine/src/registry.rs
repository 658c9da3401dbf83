//! Scope registry — at most one ring on screen at a time.
//!
//! Every focus scope (the page itself, a modal, a popover) has its own
//! [`RingManager`] positioned against its own container. Only one of them
//! may show a ring: activating a scope hides whichever scope held the slot
//! before it. The registry owns all managers and the active slot, so that
//! ordering is a property of one object instead of ambient global state.
//!
//! # Scopes
//!
//! ```text
//! RingRegistry
//! ├── global     ScopeId(0), root container, never removed
//! ├── scopes[0]  ScopeId(1), modal
//! ├── scopes[1]  ScopeId(2), <removed>
//! └── active ──▶ Some(ScopeId(1))
//! ```
//!
//! Removed slots are left empty and never reused, so a stale [`ScopeId`]
//! reports [`RingError::UnknownScope`] rather than reaching a stranger's
//! manager.

use std::fmt;

use fr_contrast::ThemeOptions;
use tracing::debug;

use crate::document::{Document, Rect};
use crate::error::{Result, RingError};
use crate::manager::{RingManager, RingShowOptions};
use crate::style::RingStyle;

/// Handle to a scope in a [`RingRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The document-wide scope every registry starts with.
    pub const GLOBAL: Self = Self(0);
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::GLOBAL {
            f.write_str("scope#global")
        } else {
            write!(f, "scope#{}", self.0)
        }
    }
}

/// Owns every scope's manager and tracks which one is showing.
#[derive(Debug)]
pub struct RingRegistry<N> {
    global: RingManager<N>,
    scopes: Vec<Option<RingManager<N>>>,
    active: Option<ScopeId>,
    rings_enabled: bool,
}

impl<N: Copy + Eq + fmt::Debug> RingRegistry<N> {
    /// A registry with only the global scope, positioned against
    /// `root_container` (typically the document body).
    ///
    /// Rings start disabled; call [`set_rings_enabled`](Self::set_rings_enabled)
    /// once keyboard navigation is detected.
    #[must_use]
    pub fn new(root_container: Option<N>) -> Self {
        Self {
            global: RingManager::new(root_container),
            scopes: Vec::new(),
            active: None,
            rings_enabled: false,
        }
    }

    // ─── Scopes ──────────────────────────────────────────────────────────

    /// The global scope's manager.
    #[must_use]
    pub const fn global(&self) -> &RingManager<N> {
        &self.global
    }

    /// Add a scope positioned against `container`.
    pub fn create_scope(&mut self, container: Option<N>, theme: Option<ThemeOptions>) -> ScopeId {
        let id = ScopeId(self.scopes.len() + 1);
        let mut manager = RingManager::new(container);
        manager.set_theme_options(theme);
        self.scopes.push(Some(manager));
        debug!(%id, ?container, "focus ring scope created");
        id
    }

    /// Hide a scope and release it. Its id is never handed out again.
    pub fn remove_scope(&mut self, scope: ScopeId) -> Result<()> {
        if scope == ScopeId::GLOBAL {
            return Err(RingError::GlobalScope);
        }
        let mut manager = self
            .slot_mut(scope)
            .and_then(Option::take)
            .ok_or(RingError::UnknownScope(scope))?;
        manager.hide();
        if self.active == Some(scope) {
            self.active = None;
        }
        debug!(%scope, "focus ring scope removed");
        Ok(())
    }

    /// Number of live scopes, the global scope included.
    #[must_use]
    pub fn scope_count(&self) -> usize {
        1 + self.scopes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn manager(&self, scope: ScopeId) -> Result<&RingManager<N>> {
        if scope == ScopeId::GLOBAL {
            return Ok(&self.global);
        }
        self.scopes
            .get(scope.0 - 1)
            .and_then(Option::as_ref)
            .ok_or(RingError::UnknownScope(scope))
    }

    pub fn manager_mut(&mut self, scope: ScopeId) -> Result<&mut RingManager<N>> {
        if scope == ScopeId::GLOBAL {
            return Ok(&mut self.global);
        }
        self.slot_mut(scope)
            .and_then(Option::as_mut)
            .ok_or(RingError::UnknownScope(scope))
    }

    /// The slot behind a non-global scope id.
    fn slot_mut(&mut self, scope: ScopeId) -> Option<&mut Option<RingManager<N>>> {
        let index = scope.0.checked_sub(1)?;
        self.scopes.get_mut(index)
    }

    // ─── Show / hide ─────────────────────────────────────────────────────

    /// Show a ring around `element` in `scope`, hiding any other scope's
    /// ring first.
    pub fn show<D>(&mut self, scope: ScopeId, doc: &D, element: N, options: RingShowOptions) -> Result<()>
    where
        D: Document<Node = N>,
    {
        self.manager_mut(scope)?.capture_element(doc, element, options);
        self.activate(scope)
    }

    /// Show a ring at an explicit viewport rect in `scope`.
    pub fn show_rect(&mut self, scope: ScopeId, rect: Rect, options: RingShowOptions) -> Result<()> {
        self.manager_mut(scope)?.capture_rect(rect, options);
        self.activate(scope)
    }

    /// Hide `scope`'s ring. Releases the active slot if `scope` held it.
    pub fn hide(&mut self, scope: ScopeId) -> Result<()> {
        self.manager_mut(scope)?.hide();
        if self.active == Some(scope) {
            self.active = None;
            debug!(%scope, "focus ring scope deactivated");
        }
        Ok(())
    }

    fn activate(&mut self, scope: ScopeId) -> Result<()> {
        if let Some(previous) = self.active.filter(|&prev| prev != scope) {
            // The previous scope may have been removed since; nothing to hide then.
            if let Ok(manager) = self.manager_mut(previous) {
                manager.hide();
            }
            debug!(from = %previous, to = %scope, "focus ring scope handoff");
        }
        self.active = Some(scope);
        self.manager_mut(scope)?.invalidate();
        Ok(())
    }

    // ─── Active scope ────────────────────────────────────────────────────

    #[must_use]
    pub const fn active(&self) -> Option<ScopeId> {
        self.active
    }

    #[must_use]
    pub fn active_manager(&self) -> Option<&RingManager<N>> {
        self.active.and_then(|scope| self.manager(scope).ok())
    }

    pub fn active_manager_mut(&mut self) -> Option<&mut RingManager<N>> {
        let scope = self.active?;
        self.manager_mut(scope).ok()
    }

    // ─── Global switch ───────────────────────────────────────────────────

    /// Turn ring painting on or off everywhere.
    pub fn set_rings_enabled(&mut self, enabled: bool) {
        if self.rings_enabled == enabled {
            return;
        }
        self.rings_enabled = enabled;
        debug!(enabled, "focus rings toggled");
        if let Some(manager) = self.active_manager_mut() {
            manager.invalidate();
        }
    }

    #[must_use]
    pub const fn rings_enabled(&self) -> bool {
        self.rings_enabled
    }

    /// The style a renderer for `scope` should paint: [`RingStyle::Hidden`]
    /// while rings are disabled or the scope shows nothing.
    pub fn render_style<D>(&self, scope: ScopeId, doc: &D) -> Result<RingStyle>
    where
        D: Document<Node = N>,
    {
        let manager = self.manager(scope)?;
        if !self.rings_enabled || !manager.visible() {
            return Ok(RingStyle::Hidden);
        }
        Ok(manager.style(doc))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::document::{ComputedStyle, DocumentTree, NodeId};
    use pretty_assertions::assert_eq;

    struct Scene {
        doc: DocumentTree,
        body: NodeId,
        modal: NodeId,
        a: NodeId,
        b: NodeId,
    }

    fn scene() -> Scene {
        let mut doc = DocumentTree::new();
        let body = doc.insert(None, ComputedStyle::new().background("#ffffff"), Rect::new(0.0, 0.0, 800.0, 600.0));
        let a = doc.insert(Some(body), ComputedStyle::new(), Rect::new(10.0, 10.0, 40.0, 20.0));
        let modal = doc.insert(
            Some(body),
            ComputedStyle::new().background("#1e3a8a").z_index("100"),
            Rect::new(100.0, 100.0, 300.0, 200.0),
        );
        let b = doc.insert(Some(modal), ComputedStyle::new(), Rect::new(120.0, 110.0, 60.0, 24.0));
        Scene { doc, body, modal, a, b }
    }

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn log_invalidations(registry: &mut RingRegistry<NodeId>, scope: ScopeId, name: &'static str, log: &Log) {
        let log = Rc::clone(log);
        registry
            .manager_mut(scope)
            .unwrap()
            .subscribe(move || log.borrow_mut().push(name));
    }

    // ── Scopes ──────────────────────────────────────────────────────

    #[test]
    fn starts_with_global_scope_only() {
        let s = scene();
        let registry = RingRegistry::new(Some(s.body));
        assert_eq!(registry.scope_count(), 1);
        assert_eq!(registry.global().container(), Some(s.body));
        assert_eq!(registry.active(), None);
        assert!(!registry.rings_enabled());
    }

    #[test]
    fn create_and_remove_scope() {
        let s = scene();
        let mut registry = RingRegistry::new(Some(s.body));
        let modal = registry.create_scope(Some(s.modal), None);
        assert_eq!(registry.scope_count(), 2);
        assert_eq!(registry.manager(modal).unwrap().container(), Some(s.modal));

        registry.remove_scope(modal).unwrap();
        assert_eq!(registry.scope_count(), 1);
        assert_eq!(registry.manager(modal).unwrap_err(), RingError::UnknownScope(modal));
        assert_eq!(registry.remove_scope(modal), Err(RingError::UnknownScope(modal)));
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let mut registry: RingRegistry<NodeId> = RingRegistry::new(None);
        let first = registry.create_scope(None, None);
        registry.remove_scope(first).unwrap();
        let second = registry.create_scope(None, None);
        assert_ne!(first, second);
    }

    #[test]
    fn global_scope_cannot_be_removed() {
        let mut registry: RingRegistry<NodeId> = RingRegistry::new(None);
        assert_eq!(registry.remove_scope(ScopeId::GLOBAL), Err(RingError::GlobalScope));
    }

    #[test]
    fn scope_theme_is_applied() {
        let mut registry: RingRegistry<NodeId> = RingRegistry::new(None);
        let theme = ThemeOptions { brightness_threshold: Some(0.5) };
        let scope = registry.create_scope(None, Some(theme));
        assert_eq!(registry.manager(scope).unwrap().theme_options(), Some(&theme));
    }

    #[test]
    fn scope_id_display() {
        assert_eq!(ScopeId::GLOBAL.to_string(), "scope#global");
        assert_eq!(ScopeId(3).to_string(), "scope#3");
    }

    // ── Exclusivity ─────────────────────────────────────────────────

    #[test]
    fn activating_b_hides_a_first() {
        let s = scene();
        let mut registry = RingRegistry::new(Some(s.body));
        let modal = registry.create_scope(Some(s.modal), None);
        let log: Log = Rc::default();
        log_invalidations(&mut registry, ScopeId::GLOBAL, "a", &log);
        log_invalidations(&mut registry, modal, "b", &log);

        registry.show(ScopeId::GLOBAL, &s.doc, s.a, RingShowOptions::new()).unwrap();
        registry.show(modal, &s.doc, s.b, RingShowOptions::new()).unwrap();

        // "a" once for its own show, then once for being hidden, before "b".
        assert_eq!(*log.borrow(), vec!["a", "a", "b"]);
        assert!(!registry.global().visible());
        assert!(registry.manager(modal).unwrap().visible());
        assert_eq!(registry.active(), Some(modal));
    }

    #[test]
    fn reshow_in_same_scope_does_not_hide() {
        let s = scene();
        let mut registry = RingRegistry::new(Some(s.body));
        let log: Log = Rc::default();
        log_invalidations(&mut registry, ScopeId::GLOBAL, "a", &log);

        registry.show(ScopeId::GLOBAL, &s.doc, s.a, RingShowOptions::new()).unwrap();
        registry.show(ScopeId::GLOBAL, &s.doc, s.b, RingShowOptions::new()).unwrap();

        assert_eq!(*log.borrow(), vec!["a", "a"]);
        assert_eq!(registry.global().target(), Some(s.b));
    }

    #[test]
    fn hide_releases_active_slot() {
        let s = scene();
        let mut registry = RingRegistry::new(Some(s.body));
        registry.show(ScopeId::GLOBAL, &s.doc, s.a, RingShowOptions::new()).unwrap();
        registry.hide(ScopeId::GLOBAL).unwrap();
        assert_eq!(registry.active(), None);
        assert!(registry.active_manager().is_none());
        registry.hide(ScopeId::GLOBAL).unwrap();
    }

    #[test]
    fn hiding_inactive_scope_keeps_active() {
        let s = scene();
        let mut registry = RingRegistry::new(Some(s.body));
        let modal = registry.create_scope(Some(s.modal), None);
        registry.show(modal, &s.doc, s.b, RingShowOptions::new()).unwrap();
        registry.hide(ScopeId::GLOBAL).unwrap();
        assert_eq!(registry.active(), Some(modal));
    }

    #[test]
    fn removing_active_scope_clears_slot() {
        let s = scene();
        let mut registry = RingRegistry::new(Some(s.body));
        let modal = registry.create_scope(Some(s.modal), None);
        registry.show(modal, &s.doc, s.b, RingShowOptions::new()).unwrap();
        registry.remove_scope(modal).unwrap();
        assert_eq!(registry.active(), None);
        registry.show(ScopeId::GLOBAL, &s.doc, s.a, RingShowOptions::new()).unwrap();
        assert_eq!(registry.active(), Some(ScopeId::GLOBAL));
    }

    #[test]
    fn show_on_unknown_scope_fails() {
        let s = scene();
        let mut registry = RingRegistry::new(Some(s.body));
        let ghost = ScopeId(42);
        assert_eq!(
            registry.show(ghost, &s.doc, s.a, RingShowOptions::new()),
            Err(RingError::UnknownScope(ghost))
        );
        assert_eq!(registry.active(), None);
    }

    #[test]
    fn show_rect_activates_scope() {
        let s = scene();
        let mut registry = RingRegistry::new(Some(s.body));
        registry
            .show_rect(ScopeId::GLOBAL, Rect::new(5.0, 5.0, 10.0, 10.0), RingShowOptions::new())
            .unwrap();
        assert_eq!(registry.active(), Some(ScopeId::GLOBAL));
        assert!(registry.global().visible());
    }

    // ── Global switch ───────────────────────────────────────────────

    #[test]
    fn render_style_hidden_while_disabled() {
        let s = scene();
        let mut registry = RingRegistry::new(Some(s.body));
        registry.show(ScopeId::GLOBAL, &s.doc, s.a, RingShowOptions::new()).unwrap();
        assert_eq!(registry.render_style(ScopeId::GLOBAL, &s.doc), Ok(RingStyle::Hidden));

        registry.set_rings_enabled(true);
        let style = registry.render_style(ScopeId::GLOBAL, &s.doc).unwrap();
        assert!(style.is_visible());
    }

    #[test]
    fn render_style_hidden_when_not_visible() {
        let s = scene();
        let mut registry = RingRegistry::new(Some(s.body));
        registry.set_rings_enabled(true);
        assert_eq!(registry.render_style(ScopeId::GLOBAL, &s.doc), Ok(RingStyle::Hidden));
    }

    #[test]
    fn toggling_invalidates_active_manager_once() {
        let s = scene();
        let mut registry = RingRegistry::new(Some(s.body));
        let log: Log = Rc::default();
        log_invalidations(&mut registry, ScopeId::GLOBAL, "a", &log);
        registry.show(ScopeId::GLOBAL, &s.doc, s.a, RingShowOptions::new()).unwrap();
        log.borrow_mut().clear();

        registry.set_rings_enabled(true);
        registry.set_rings_enabled(true);
        assert_eq!(*log.borrow(), vec!["a"]);
        assert!(registry.rings_enabled());
    }

    #[test]
    fn modal_ring_stacks_above_modal() {
        let s = scene();
        let mut registry = RingRegistry::new(Some(s.body));
        registry.set_rings_enabled(true);
        registry.show(ScopeId::GLOBAL, &s.doc, s.b, RingShowOptions::new()).unwrap();
        let style = registry.render_style(ScopeId::GLOBAL, &s.doc).unwrap();
        assert_eq!(style.as_visible().unwrap().z_index, Some(101));
    }
}
