//! The document seam — everything the engine reads from the outside world.
//!
//! The engine never touches a real DOM. It asks a [`Document`] four
//! questions about a node: who is its parent, what is its computed style,
//! where is it on screen, how far is it scrolled. A browser binding answers
//! them from live layout; [`DocumentTree`] answers them from an in-memory
//! arena, which is what the tests and the CLI use.
//!
//! Nodes are plain `Copy` handles. Holding one says nothing about whether
//! the element still exists: a detached or unknown node simply reports no
//! rect, no style, and no parent.

use std::fmt;

// ─── Geometry primitives ─────────────────────────────────────────────────────

/// A viewport-relative rectangle, as reported by layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }
}

/// Current scroll position of a scrolling container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub top: f64,
    pub left: f64,
}

impl ScrollOffset {
    #[must_use]
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

// ─── ComputedStyle ───────────────────────────────────────────────────────────

/// The handful of computed style properties the ring cares about.
///
/// Values are kept as the raw strings a style engine reports ("auto",
/// "8px", "rgba(0, 0, 0, 0)"); interpretation happens downstream with
/// parse-and-fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStyle {
    pub background_color: String,
    pub z_index: String,
    pub border_top_left_radius: String,
    pub border_top_right_radius: String,
    pub border_bottom_right_radius: String,
    pub border_bottom_left_radius: String,
}

impl Default for ComputedStyle {
    /// CSS initial values: transparent background, `auto` z-index, square
    /// corners.
    fn default() -> Self {
        Self {
            background_color: "rgba(0, 0, 0, 0)".to_owned(),
            z_index: "auto".to_owned(),
            border_top_left_radius: "0px".to_owned(),
            border_top_right_radius: "0px".to_owned(),
            border_bottom_right_radius: "0px".to_owned(),
            border_bottom_left_radius: "0px".to_owned(),
        }
    }
}

impl ComputedStyle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `background-color`.
    #[must_use]
    pub fn background(mut self, value: impl Into<String>) -> Self {
        self.background_color = value.into();
        self
    }

    /// Set `z-index`.
    #[must_use]
    pub fn z_index(mut self, value: impl Into<String>) -> Self {
        self.z_index = value.into();
        self
    }

    /// Set all four corner radii to the same value.
    #[must_use]
    pub fn radius(self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.radii(value.clone(), value.clone(), value.clone(), value)
    }

    /// Set the corner radii in top-left, top-right, bottom-right,
    /// bottom-left order.
    #[must_use]
    pub fn radii(
        mut self,
        top_left: impl Into<String>,
        top_right: impl Into<String>,
        bottom_right: impl Into<String>,
        bottom_left: impl Into<String>,
    ) -> Self {
        self.border_top_left_radius = top_left.into();
        self.border_top_right_radius = top_right.into();
        self.border_bottom_right_radius = bottom_right.into();
        self.border_bottom_left_radius = bottom_left.into();
        self
    }
}

// ─── Document trait ──────────────────────────────────────────────────────────

/// Read-only access to element geometry and computed style.
pub trait Document {
    /// A handle to one element. Existence-only: it may outlive the element.
    type Node: Copy + Eq + fmt::Debug;

    /// The element's parent, or `None` at the root or when detached.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// The element's computed style, or `None` when there is no style
    /// engine or the node is unknown.
    fn computed_style(&self, node: Self::Node) -> Option<ComputedStyle>;

    /// The element's viewport-relative bounding rectangle.
    fn bounding_rect(&self, node: Self::Node) -> Option<Rect>;

    /// The element's scroll position. Non-scrolling elements report zero.
    fn scroll_offset(&self, node: Self::Node) -> ScrollOffset;
}

// ─── DocumentTree ────────────────────────────────────────────────────────────

/// Handle to a node in a [`DocumentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct TreeNode {
    parent: Option<NodeId>,
    style: ComputedStyle,
    rect: Rect,
    scroll: ScrollOffset,
    attached: bool,
}

/// An in-memory document: an arena of nodes with parent links, styles,
/// rects, and scroll offsets.
///
/// ```
/// use fr_engine::document::{ComputedStyle, Document, DocumentTree, Rect};
///
/// let mut doc = DocumentTree::new();
/// let body = doc.insert(None, ComputedStyle::new().background("#fff"), Rect::new(0.0, 0.0, 800.0, 600.0));
/// let button = doc.insert(Some(body), ComputedStyle::new(), Rect::new(40.0, 40.0, 120.0, 32.0));
///
/// assert_eq!(doc.parent(button), Some(body));
/// ```
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<TreeNode>,
    styled: bool,
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTree {
    /// An empty document with a working style engine.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new(), styled: true }
    }

    /// An empty document whose style engine is unavailable:
    /// [`Document::computed_style`] always answers `None`.
    #[must_use]
    pub const fn without_styles() -> Self {
        Self { nodes: Vec::new(), styled: false }
    }

    /// Append a node under `parent` (or as a root) and return its handle.
    pub fn insert(&mut self, parent: Option<NodeId>, style: ComputedStyle, rect: Rect) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            parent,
            style,
            rect,
            scroll: ScrollOffset::default(),
            attached: true,
        });
        id
    }

    /// Number of nodes ever inserted, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Replace a node's computed style.
    pub fn set_style(&mut self, node: NodeId, style: ComputedStyle) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.style = style;
        }
    }

    /// Move or resize a node.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.rect = rect;
        }
    }

    /// Scroll a node.
    pub fn set_scroll(&mut self, node: NodeId, scroll: ScrollOffset) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.scroll = scroll;
        }
    }

    /// Remove a node from the tree. Its handle stays valid but reports no
    /// parent and no rect; descendants keep their parent link to it.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.parent = None;
            n.attached = false;
        }
    }

    fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }
}

impl Document for DocumentTree {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn computed_style(&self, node: NodeId) -> Option<ComputedStyle> {
        if !self.styled {
            return None;
        }
        self.node(node).map(|n| n.style.clone())
    }

    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        self.node(node).filter(|n| n.attached).map(|n| n.rect)
    }

    fn scroll_offset(&self, node: NodeId) -> ScrollOffset {
        self.node(node).map(|n| n.scroll).unwrap_or_default()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
