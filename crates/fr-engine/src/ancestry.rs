//! Ancestry snapshots — an element and everything above it.
//!
//! Captured once when a ring is shown and read on every style pass after
//! that. Entries run nearest-first: index 0 is the target itself, the last
//! entry is the root (or wherever the parent chain ended, for detached
//! subtrees).

use fr_color::Color;
use fr_contrast::composite_layers;

use crate::document::{ComputedStyle, Document};

/// One step of an ancestry walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorEntry<N> {
    pub node: N,
    /// `None` when the document has no style engine.
    pub style: Option<ComputedStyle>,
}

/// An element's ancestor chain with computed style snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestry<N> {
    entries: Vec<AncestorEntry<N>>,
}

impl<N> Default for Ancestry<N> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<N: Copy + Eq> Ancestry<N> {
    /// Walk from `element` up through its parents until the chain ends.
    ///
    /// An absent element produces an empty ancestry.
    #[must_use]
    pub fn resolve<D>(doc: &D, element: Option<N>) -> Self
    where
        D: Document<Node = N>,
    {
        let mut entries = Vec::new();
        let mut current = element;
        while let Some(node) = current {
            entries.push(AncestorEntry { node, style: doc.computed_style(node) });
            current = doc.parent(node);
        }
        Self { entries }
    }

    /// Build an ancestry from pre-collected entries, nearest-first.
    #[must_use]
    pub const fn from_entries(entries: Vec<AncestorEntry<N>>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries nearest-first.
    pub fn iter(&self) -> std::slice::Iter<'_, AncestorEntry<N>> {
        self.entries.iter()
    }

    /// The element the walk started from.
    #[must_use]
    pub fn target(&self) -> Option<&AncestorEntry<N>> {
        self.entries.first()
    }

    /// The target's computed style, if captured.
    #[must_use]
    pub fn target_style(&self) -> Option<&ComputedStyle> {
        self.target().and_then(|e| e.style.as_ref())
    }

    /// Whether `node` appears anywhere in the chain.
    #[must_use]
    pub fn contains(&self, node: N) -> bool {
        self.entries.iter().any(|e| e.node == node)
    }

    /// The color actually painted behind the target.
    ///
    /// The target's own background is skipped, since the ring is drawn over
    /// it. The remaining backgrounds are composited nearest-first (see
    /// [`composite_layers`]). Returns `None` when no style was captured at
    /// all, i.e. there was no style engine to ask.
    #[must_use]
    pub fn effective_background(&self) -> Option<Color> {
        if self.entries.iter().all(|e| e.style.is_none()) {
            return None;
        }
        let layers = self
            .entries
            .iter()
            .skip(1)
            .filter_map(|e| e.style.as_ref())
            .map(|s| s.background_color.as_str());
        Some(composite_layers(layers))
    }
}

impl<'a, N> IntoIterator for &'a Ancestry<N> {
    type Item = &'a AncestorEntry<N>;
    type IntoIter = std::slice::Iter<'a, AncestorEntry<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
