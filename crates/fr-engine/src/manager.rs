//! Ring state for one focus scope.
//!
//! A [`RingManager`] remembers what its scope is currently showing (a
//! target element, or an explicit box) and turns that into a [`RingStyle`]
//! on demand. It does no event handling and owns no elements; the
//! [`RingRegistry`](crate::registry::RingRegistry) decides which manager is
//! active, and a renderer subscribes to be told when to repaint.
//!
//! # Lifecycle
//!
//! ```text
//! hidden ──show_element / show_rect──▶ visible
//!    ▲                                   │
//!    └──────────────── hide ─────────────┘
//! ```
//!
//! `style` is a pure function of this state plus the document's current
//! geometry. The ancestry (and with it, the background and stacking
//! information) is a snapshot taken at show time.

use std::fmt;

use fr_contrast::{ContrastConfig, ThemeOptions, select_ring_color};
use tracing::trace;

use crate::ancestry::Ancestry;
use crate::document::{Document, Rect};
use crate::geometry::{Offset, RingBox, compute_border_radius, compute_box};
use crate::stacking::compute_z_index;
use crate::style::{RingStyle, VisibleRing};

// ─── RingShowOptions ─────────────────────────────────────────────────────────

/// Caller overrides for a single `show`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RingShowOptions {
    /// Extra class for the ring element.
    pub class_name: Option<String>,
    /// Inset applied to the target's box.
    pub offset: Offset,
    /// Fixed z-index; skips the stacking computation entirely.
    pub z_index: Option<i64>,
}

impl RingShowOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: impl Into<Offset>) -> Self {
        self.offset = offset.into();
        self
    }

    #[must_use]
    pub const fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = Some(z_index);
        self
    }
}

// ─── RingManager ─────────────────────────────────────────────────────────────

type Invalidate = Box<dyn FnMut()>;

/// Mutable ring state for one scope.
pub struct RingManager<N> {
    target: Option<N>,
    ancestry: Ancestry<N>,
    bounding_box: Option<Rect>,
    class_name: Option<String>,
    offset: Offset,
    z_index: Option<i64>,
    container: Option<N>,
    theme: Option<ThemeOptions>,
    contrast: ContrastConfig,
    invalidate: Option<Invalidate>,
}

impl<N: Copy + Eq + fmt::Debug> RingManager<N> {
    /// A hidden manager scoped to `container`.
    #[must_use]
    pub fn new(container: Option<N>) -> Self {
        Self {
            target: None,
            ancestry: Ancestry::default(),
            bounding_box: None,
            class_name: None,
            offset: Offset::default(),
            z_index: None,
            container,
            theme: None,
            contrast: ContrastConfig::default(),
            invalidate: None,
        }
    }

    // ─── Configuration ───────────────────────────────────────────────────

    /// Set the element rings are positioned relative to. `None` leaves the
    /// ring without bounds until a container is set.
    pub fn set_container(&mut self, container: Option<N>) {
        self.container = container;
    }

    #[must_use]
    pub const fn container(&self) -> Option<N> {
        self.container
    }

    pub fn set_theme_options(&mut self, theme: Option<ThemeOptions>) {
        self.theme = theme;
    }

    #[must_use]
    pub const fn theme_options(&self) -> Option<&ThemeOptions> {
        self.theme.as_ref()
    }

    pub const fn set_contrast_config(&mut self, config: ContrastConfig) {
        self.contrast = config;
    }

    // ─── Invalidation ────────────────────────────────────────────────────

    /// Register the repaint callback, replacing any previous one.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) {
        self.invalidate = Some(Box::new(callback));
    }

    /// Drop the repaint callback; invalidation becomes a no-op.
    pub fn unsubscribe(&mut self) {
        self.invalidate = None;
    }

    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.invalidate.is_some()
    }

    /// Ask the subscriber (if any) to repaint.
    pub fn invalidate(&mut self) {
        if let Some(callback) = self.invalidate.as_mut() {
            callback();
        }
    }

    // ─── Show / hide ─────────────────────────────────────────────────────

    /// Record `element` as the ring target and snapshot its ancestry.
    ///
    /// Does not activate the scope or invalidate; the registry does both.
    pub(crate) fn capture_element<D>(&mut self, doc: &D, element: N, options: RingShowOptions)
    where
        D: Document<Node = N>,
    {
        self.target = Some(element);
        self.ancestry = Ancestry::resolve(doc, Some(element));
        self.bounding_box = None;
        self.apply_options(options);
        trace!(?element, depth = self.ancestry.len(), "ring target captured");
    }

    /// Record an explicit box (viewport coordinates) in place of a target.
    pub(crate) fn capture_rect(&mut self, rect: Rect, options: RingShowOptions) {
        self.target = None;
        self.ancestry = Ancestry::default();
        self.bounding_box = Some(rect);
        self.apply_options(options);
    }

    fn apply_options(&mut self, options: RingShowOptions) {
        self.class_name = options.class_name;
        self.offset = options.offset;
        self.z_index = options.z_index;
    }

    /// Clear everything shown and invalidate. Safe to call repeatedly.
    pub fn hide(&mut self) {
        self.target = None;
        self.ancestry = Ancestry::default();
        self.bounding_box = None;
        self.class_name = None;
        self.offset = Offset::default();
        self.z_index = None;
        self.invalidate();
    }

    // ─── State ───────────────────────────────────────────────────────────

    /// Whether there is a target or an explicit box to draw.
    #[must_use]
    pub const fn visible(&self) -> bool {
        self.target.is_some() || self.bounding_box.is_some()
    }

    #[must_use]
    pub const fn target(&self) -> Option<N> {
        self.target
    }

    #[must_use]
    pub const fn ancestry(&self) -> &Ancestry<N> {
        &self.ancestry
    }

    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    #[must_use]
    pub const fn offset(&self) -> Offset {
        self.offset
    }

    // ─── Style ───────────────────────────────────────────────────────────

    /// Compute the ring's style from the current state.
    ///
    /// A target yields position, z-index, color, and radius. An explicit
    /// box yields position and the explicit z-index only. Pieces that
    /// cannot be computed (no container, detached target) are left empty
    /// rather than failing.
    #[must_use]
    pub fn style<D>(&self, doc: &D) -> RingStyle
    where
        D: Document<Node = N>,
    {
        if let Some(target) = self.target {
            let background = self.ancestry.effective_background();
            return RingStyle::Visible(VisibleRing {
                bounds: doc.bounding_rect(target).and_then(|rect| self.position(doc, rect)),
                z_index: compute_z_index(&self.ancestry, self.container, self.z_index),
                color: Some(select_ring_color(background, self.theme.as_ref(), &self.contrast)),
                radius: Some(compute_border_radius(self.ancestry.target_style())),
            });
        }

        if let Some(rect) = self.bounding_box {
            return RingStyle::Visible(VisibleRing {
                bounds: self.position(doc, rect),
                z_index: self.z_index,
                ..VisibleRing::default()
            });
        }

        RingStyle::Hidden
    }

    fn position<D>(&self, doc: &D, rect: Rect) -> Option<RingBox>
    where
        D: Document<Node = N>,
    {
        let container = self.container?;
        let container_rect = doc.bounding_rect(container)?;
        let scroll = doc.scroll_offset(container);
        Some(compute_box(rect, container_rect, scroll, &self.offset))
    }
}

impl<N: fmt::Debug> fmt::Debug for RingManager<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingManager")
            .field("target", &self.target)
            .field("bounding_box", &self.bounding_box)
            .field("container", &self.container)
            .field("class_name", &self.class_name)
            .field("offset", &self.offset)
            .field("z_index", &self.z_index)
            .field("subscribed", &self.invalidate.is_some())
            .finish_non_exhaustive()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::document::{ComputedStyle, DocumentTree, NodeId, ScrollOffset};
    use fr_contrast::RingColor;
    use pretty_assertions::assert_eq;

    struct Scene {
        doc: DocumentTree,
        body: NodeId,
        panel: NodeId,
        button: NodeId,
    }

    /// body (white, container) > panel (navy, z 3) > button (8px corners)
    fn scene() -> Scene {
        let mut doc = DocumentTree::new();
        let body = doc.insert(
            None,
            ComputedStyle::new().background("rgb(255, 255, 255)"),
            Rect::new(10.0, 0.0, 800.0, 600.0),
        );
        let panel = doc.insert(
            Some(body),
            ComputedStyle::new().background("rgb(10, 20, 120)").z_index("3"),
            Rect::new(20.0, 0.0, 400.0, 300.0),
        );
        let button = doc.insert(
            Some(panel),
            ComputedStyle::new().radius("8px"),
            Rect::new(50.0, 20.0, 30.0, 10.0),
        );
        Scene { doc, body, panel, button }
    }

    fn counter(manager: &mut RingManager<NodeId>) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        manager.subscribe(move || c.set(c.get() + 1));
        count
    }

    // ── Visibility ──────────────────────────────────────────────────

    #[test]
    fn new_manager_is_hidden() {
        let s = scene();
        let manager = RingManager::new(Some(s.body));
        assert!(!manager.visible());
        assert_eq!(manager.style(&s.doc), RingStyle::Hidden);
    }

    #[test]
    fn captured_element_is_visible() {
        let s = scene();
        let mut manager = RingManager::new(Some(s.body));
        manager.capture_element(&s.doc, s.button, RingShowOptions::new().with_class_name("ring"));
        assert!(manager.visible());
        assert_eq!(manager.target(), Some(s.button));
        assert_eq!(manager.ancestry().len(), 3);
        assert_eq!(manager.class_name(), Some("ring"));
    }

    #[test]
    fn hide_resets_everything_and_is_idempotent() {
        let s = scene();
        let mut manager = RingManager::new(Some(s.body));
        let count = counter(&mut manager);
        manager.capture_element(&s.doc, s.button, RingShowOptions::new().with_offset(4).with_z_index(9));
        manager.hide();
        assert!(!manager.visible());
        assert!(manager.ancestry().is_empty());
        assert_eq!(manager.class_name(), None);
        assert_eq!(manager.offset(), Offset::default());
        manager.hide();
        assert_eq!(count.get(), 2);
        assert_eq!(manager.style(&s.doc), RingStyle::Hidden);
    }

    // ── Style ───────────────────────────────────────────────────────

    #[test]
    fn target_style_composes_everything() {
        let s = scene();
        let mut manager = RingManager::new(Some(s.body));
        manager.capture_element(&s.doc, s.button, RingShowOptions::new().with_offset(2));
        let style = manager.style(&s.doc);
        assert_eq!(
            style,
            RingStyle::Visible(VisibleRing {
                bounds: Some(RingBox { top: 38.0, left: 18.0, width: 26.0, height: 6.0 }),
                z_index: Some(4),
                color: Some(RingColor::Light),
                radius: Some("8px 8px 8px 8px".to_owned()),
            })
        );
    }

    #[test]
    fn explicit_z_index_bypasses_stacking() {
        let s = scene();
        let mut manager = RingManager::new(Some(s.body));
        manager.capture_element(&s.doc, s.button, RingShowOptions::new().with_z_index(50));
        assert_eq!(manager.style(&s.doc).as_visible().unwrap().z_index, Some(50));
    }

    #[test]
    fn container_bounds_the_stacking_walk() {
        let s = scene();
        // Scope the ring to the button itself: the panel's z-index is
        // outside the scope and must not count.
        let mut manager = RingManager::new(Some(s.button));
        manager.capture_element(&s.doc, s.button, RingShowOptions::new());
        let ring = manager.style(&s.doc);
        assert_eq!(ring.as_visible().unwrap().z_index, None);
    }

    #[test]
    fn no_container_means_no_bounds() {
        let s = scene();
        let mut manager = RingManager::new(None);
        manager.capture_element(&s.doc, s.button, RingShowOptions::new());
        let style = manager.style(&s.doc);
        let ring = style.as_visible().unwrap();
        assert_eq!(ring.bounds, None);
        assert_eq!(ring.color, Some(RingColor::Light));
    }

    #[test]
    fn detached_target_loses_bounds_only() {
        let mut s = scene();
        let mut manager = RingManager::new(Some(s.body));
        manager.capture_element(&s.doc, s.button, RingShowOptions::new());
        s.doc.detach(s.button);
        let style = manager.style(&s.doc);
        let ring = style.as_visible().unwrap();
        assert_eq!(ring.bounds, None);
        assert_eq!(ring.z_index, Some(4));
    }

    #[test]
    fn style_tracks_live_geometry() {
        let mut s = scene();
        let mut manager = RingManager::new(Some(s.body));
        manager.capture_element(&s.doc, s.button, RingShowOptions::new());
        s.doc.set_scroll(s.body, ScrollOffset::new(100.0, 0.0));
        let bounds = manager.style(&s.doc).as_visible().unwrap().bounds.unwrap();
        assert_eq!(bounds.top, 140.0);
    }

    #[test]
    fn theme_threshold_changes_color() {
        let s = scene();
        let mut manager = RingManager::new(Some(s.body));
        manager.set_theme_options(Some(ThemeOptions { brightness_threshold: Some(0.0) }));
        manager.capture_element(&s.doc, s.button, RingShowOptions::new());
        assert_eq!(manager.style(&s.doc).as_visible().unwrap().color, Some(RingColor::Dark));
        assert!(manager.theme_options().is_some());
    }

    #[test]
    fn contrast_config_swaps_token_pair() {
        let s = scene();
        let mut manager = RingManager::new(Some(s.body));
        manager.capture_element(&s.doc, s.button, RingShowOptions::new());
        assert_eq!(manager.style(&s.doc).as_visible().unwrap().color, Some(RingColor::Light));

        manager.set_contrast_config(ContrastConfig { low: RingColor::Dark, ..ContrastConfig::default() });
        assert_eq!(manager.style(&s.doc).as_visible().unwrap().color, Some(RingColor::Dark));

        manager.set_contrast_config(ContrastConfig { saturation_cutoff: 1.0, ..ContrastConfig::default() });
        assert_eq!(manager.style(&s.doc).as_visible().unwrap().color, Some(RingColor::Primary));
    }

    #[test]
    fn rect_override_has_position_and_explicit_z_only() {
        let s = scene();
        let mut manager = RingManager::new(Some(s.body));
        manager.capture_rect(Rect::new(110.0, 10.0, 50.0, 50.0), RingShowOptions::new().with_z_index(2));
        assert!(manager.visible());
        assert_eq!(
            manager.style(&s.doc),
            RingStyle::Visible(VisibleRing {
                bounds: Some(RingBox { top: 100.0, left: 10.0, width: 50.0, height: 50.0 }),
                z_index: Some(2),
                color: None,
                radius: None,
            })
        );
    }

    #[test]
    fn showing_element_clears_rect_override() {
        let s = scene();
        let mut manager = RingManager::new(Some(s.body));
        manager.capture_rect(Rect::default(), RingShowOptions::new());
        manager.capture_element(&s.doc, s.panel, RingShowOptions::new());
        let style = manager.style(&s.doc);
        assert!(style.as_visible().unwrap().color.is_some());
    }

    #[test]
    fn unstyled_document_degrades_to_defaults() {
        let mut doc = DocumentTree::without_styles();
        let body = doc.insert(None, ComputedStyle::new(), Rect::new(0.0, 0.0, 100.0, 100.0));
        let button = doc.insert(Some(body), ComputedStyle::new(), Rect::new(5.0, 5.0, 10.0, 10.0));
        let mut manager = RingManager::new(Some(body));
        manager.capture_element(&doc, button, RingShowOptions::new());
        assert_eq!(
            manager.style(&doc),
            RingStyle::Visible(VisibleRing {
                bounds: Some(RingBox { top: 5.0, left: 5.0, width: 10.0, height: 10.0 }),
                z_index: None,
                color: Some(RingColor::Primary),
                radius: Some("0 0 0 0".to_owned()),
            })
        );
    }

    #[test]
    fn repeated_style_calls_are_equal() {
        let s = scene();
        let mut manager = RingManager::new(Some(s.body));
        manager.capture_element(&s.doc, s.button, RingShowOptions::new());
        assert_eq!(manager.style(&s.doc), manager.style(&s.doc));
    }

    // ── Subscription ────────────────────────────────────────────────

    #[test]
    fn invalidate_without_subscriber_is_noop() {
        let mut manager: RingManager<NodeId> = RingManager::new(None);
        assert!(!manager.is_subscribed());
        manager.invalidate();
    }

    #[test]
    fn unsubscribe_stops_callbacks() {
        let mut manager: RingManager<NodeId> = RingManager::new(None);
        let count = counter(&mut manager);
        manager.invalidate();
        manager.unsubscribe();
        manager.invalidate();
        assert_eq!(count.get(), 1);
    }
}
