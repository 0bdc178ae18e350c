//! An in-memory page that connectors can be drawn into.
//!
//! [`SceneHost`] keeps named element boxes and connector overlays without any
//! browser. It is what tests and the command-line renderer use, and it can
//! serialize the page to a standalone SVG document.
//!
//! # Example
//!
//! ```
//! use tether::{Connectors, ConnectOptions};
//! use tether::geometry::{Bounds, Size};
//! use tether::scene::SceneHost;
//!
//! let mut host = SceneHost::new(Size::new(120.0, 120.0));
//! let a = host.add_element("a", Bounds::from_rect(0.0, 0.0, 20.0, 20.0));
//! let b = host.add_element("b", Bounds::from_rect(80.0, 80.0, 20.0, 20.0));
//!
//! let mut connectors = Connectors::new(host);
//! connectors
//!     .connect(a, b, ConnectOptions::from_names("bottom-right", "top-left"))
//!     .unwrap();
//!
//! let svg = connectors.host().render_svg();
//! assert!(svg.contains("<line"));
//! ```

use std::fmt;

use indexmap::IndexMap;
use log::{debug, trace};
use svg::{
    Document,
    node::element::{Line, Rectangle, SVG},
};

use tether_core::geometry::{Bounds, Size};

use crate::{
    error::{Result, TetherError},
    host::{Host, OverlayFrame},
};

/// Name of an element in a [`SceneHost`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to an overlay in a [`SceneHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(usize);

/// An overlay and the last frame applied to it.
#[derive(Debug, Clone, Default)]
pub struct OverlayNode {
    frame: Option<OverlayFrame>,
    attached: bool,
}

impl OverlayNode {
    /// Last frame applied, `None` before the first draw
    pub fn frame(&self) -> Option<&OverlayFrame> {
        self.frame.as_ref()
    }

    /// Whether the overlay is part of the page
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

/// A headless page of named element boxes and connector overlays.
#[derive(Debug, Clone)]
pub struct SceneHost {
    size: Size,
    elements: IndexMap<ElementId, Bounds>,
    overlays: Vec<OverlayNode>,
    show_elements: bool,
    journal: Vec<OverlayId>,
}

impl SceneHost {
    /// Creates an empty page of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            elements: IndexMap::new(),
            overlays: Vec::new(),
            show_elements: true,
            journal: Vec::new(),
        }
    }

    /// Controls whether [`SceneHost::render_svg`] outlines elements (builder style).
    pub fn with_element_outlines(mut self, show: bool) -> Self {
        self.show_elements = show;
        self
    }

    /// Returns the page size
    pub fn size(&self) -> Size {
        self.size
    }

    /// Changes the page size. Element boxes are not reflowed.
    pub fn resize(&mut self, size: Size) {
        debug!(width = size.width(), height = size.height(); "Scene resized");
        self.size = size;
    }

    /// Adds an element, or replaces the box of an existing one.
    pub fn add_element(&mut self, id: impl Into<ElementId>, bounds: Bounds) -> ElementId {
        let id = id.into();
        self.elements.insert(id.clone(), bounds);
        id
    }

    /// Moves an existing element to `bounds`.
    pub fn move_element(&mut self, id: &ElementId, bounds: Bounds) -> Result<()> {
        let current = self
            .elements
            .get_mut(id)
            .ok_or_else(|| TetherError::UnknownElement(id.to_string()))?;
        *current = bounds;
        Ok(())
    }

    /// Removes an element from the page, returning its last box.
    pub fn remove_element(&mut self, id: &ElementId) -> Option<Bounds> {
        self.elements.shift_remove(id)
    }

    /// Returns the box of an element
    pub fn element(&self, id: &ElementId) -> Option<Bounds> {
        self.elements.get(id).copied()
    }

    /// Iterates elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = (&ElementId, Bounds)> {
        self.elements.iter().map(|(id, bounds)| (id, *bounds))
    }

    /// Returns an overlay, attached or not.
    pub fn overlay(&self, id: OverlayId) -> Option<&OverlayNode> {
        self.overlays.get(id.0)
    }

    /// Number of overlays currently part of the page.
    pub fn attached_overlay_count(&self) -> usize {
        self.overlays.iter().filter(|node| node.attached).count()
    }

    /// Returns and clears the overlays drawn since the last call, in draw order.
    pub fn take_journal(&mut self) -> Vec<OverlayId> {
        std::mem::take(&mut self.journal)
    }

    /// Serializes the page as a standalone SVG document.
    ///
    /// Element outlines (when enabled) come first, then every attached overlay
    /// as a nested `<svg>` in ascending `z-index` order.
    pub fn render_svg(&self) -> String {
        let (width, height) = (self.size.width(), self.size.height());
        let mut doc = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0.0, 0.0, width, height));

        if self.show_elements {
            for (id, bounds) in &self.elements {
                doc = doc.add(
                    Rectangle::new()
                        .set("id", id.as_str())
                        .set("x", bounds.min_x())
                        .set("y", bounds.min_y())
                        .set("width", bounds.width())
                        .set("height", bounds.height())
                        .set("fill", "none")
                        .set("stroke", "#999999"),
                );
            }
        }

        let mut frames: Vec<&OverlayFrame> = self
            .overlays
            .iter()
            .filter(|node| node.attached)
            .filter_map(|node| node.frame.as_ref())
            .collect();
        frames.sort_by_key(|frame| frame.z_index());

        for frame in frames {
            doc = doc.add(render_overlay(frame));
        }

        debug!(elements = self.elements.len(); "Scene rendered");
        doc.to_string()
    }

    fn node_mut(&mut self, overlay: OverlayId) -> Result<&mut OverlayNode> {
        self.overlays
            .get_mut(overlay.0)
            .ok_or_else(|| TetherError::Host(format!("unknown overlay {}", overlay.0)))
    }
}

fn render_overlay(frame: &OverlayFrame) -> SVG {
    let mut line = Line::new();
    for (name, value) in frame.line_attributes() {
        line = line.set(name, value);
    }

    let mut overlay = SVG::new()
        .set("x", frame.origin().x())
        .set("y", frame.origin().y())
        .set("overflow", "visible")
        .set("pointer-events", "none");
    for (name, value) in frame.overlay_attributes() {
        overlay = overlay.set(name, value);
    }

    overlay.add(line)
}

impl Host for SceneHost {
    type Element = ElementId;
    type Overlay = OverlayId;

    fn bounds_of(&self, element: &ElementId) -> Result<Bounds> {
        self.element(element)
            .ok_or_else(|| TetherError::UnknownElement(element.to_string()))
    }

    fn create_overlay(&mut self) -> Result<OverlayId> {
        let id = OverlayId(self.overlays.len());
        self.overlays.push(OverlayNode {
            frame: None,
            attached: true,
        });
        Ok(id)
    }

    fn apply_frame(&mut self, overlay: &OverlayId, frame: &OverlayFrame) -> Result<()> {
        let node = self.node_mut(*overlay)?;
        node.frame = Some(frame.clone());
        trace!(overlay = overlay.0, attached = node.attached; "Overlay frame applied");

        self.journal.push(*overlay);
        Ok(())
    }

    fn remove_overlay(&mut self, overlay: &OverlayId) -> Result<()> {
        self.node_mut(*overlay)?.attached = false;
        Ok(())
    }

    fn contains_overlay(&self, overlay: &OverlayId) -> bool {
        self.overlay(*overlay).is_some_and(OverlayNode::is_attached)
    }
}
