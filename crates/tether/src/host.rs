//! The display tree connectors measure and render into.
//!
//! A [`Host`] answers bounding box queries for the elements connectors attach
//! to, and owns the overlay artifacts connectors draw in. Every overlay is an
//! `<svg>` element holding a single `<line>`; connectors describe its state as
//! an [`OverlayFrame`] and the host applies it.

use std::fmt;

use tether_core::{
    geometry::{Bounds, Point, Size},
    line::LineGeometry,
    stroke::StrokeDefinition,
};

use crate::{config::OverlayConfig, error::Result};

/// SVG namespace used when creating overlay elements.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A display tree that connectors can measure and draw into.
pub trait Host {
    /// Handle to an element connectors attach to. Not owned by the connector.
    type Element: Clone + fmt::Debug;

    /// Handle to an overlay artifact owned by a connector.
    type Overlay: fmt::Debug;

    /// Returns the current bounding box of `element` in page coordinates.
    fn bounds_of(&self, element: &Self::Element) -> Result<Bounds>;

    /// Creates an empty overlay and attaches it to the display tree.
    fn create_overlay(&mut self) -> Result<Self::Overlay>;

    /// Applies `frame` to `overlay`.
    ///
    /// Applying to an overlay that has been removed must succeed; the
    /// overlay stays out of the display tree.
    fn apply_frame(&mut self, overlay: &Self::Overlay, frame: &OverlayFrame) -> Result<()>;

    /// Detaches `overlay` from the display tree. Removing twice is a no-op.
    fn remove_overlay(&mut self, overlay: &Self::Overlay) -> Result<()>;

    /// Returns true if `overlay` is currently part of the display tree.
    fn contains_overlay(&self, overlay: &Self::Overlay) -> bool;
}

/// Everything a host needs to draw one connector overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    origin: Point,
    viewport: Size,
    start: Point,
    end: Point,
    z_index: i32,
    class_name: Option<String>,
    stroke: Option<StrokeDefinition>,
}

impl OverlayFrame {
    /// Builds the frame for `line` under `config`.
    pub fn new(line: LineGeometry, config: &OverlayConfig) -> Self {
        Self {
            origin: line.origin(),
            viewport: line.viewport(config.min_extent()),
            start: line.local_start(),
            end: line.local_end(),
            z_index: config.z_index(),
            class_name: None,
            stroke: None,
        }
    }

    /// Sets the CSS class applied to the line (builder style).
    pub fn with_class_name(mut self, class_name: Option<String>) -> Self {
        self.class_name = class_name;
        self
    }

    /// Sets the explicit stroke of the line (builder style).
    pub fn with_stroke(mut self, stroke: Option<StrokeDefinition>) -> Self {
        self.stroke = stroke;
        self
    }

    /// Top-left corner of the overlay in page coordinates
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Overlay width and height, already clamped
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Line start in overlay-local coordinates
    pub fn start(&self) -> Point {
        self.start
    }

    /// Line end in overlay-local coordinates
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    /// Attributes of the `<svg>` overlay element.
    pub fn overlay_attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("width", self.viewport.width().to_string()),
            ("height", self.viewport.height().to_string()),
        ]
    }

    /// Inline style properties of the `<svg>` overlay element.
    ///
    /// The overlay sits absolutely positioned over the page, above normal
    /// content, and never intercepts pointer events. Hosts set each property
    /// individually so other inline styles on the overlay survive updates.
    pub fn style_properties(&self) -> Vec<(&'static str, String)> {
        vec![
            ("width", format!("{}px", self.viewport.width())),
            ("height", format!("{}px", self.viewport.height())),
            ("top", format!("{}px", self.origin.y())),
            ("left", format!("{}px", self.origin.x())),
            ("position", "absolute".to_string()),
            ("pointer-events", "none".to_string()),
            ("z-index", self.z_index.to_string()),
        ]
    }

    /// Attributes of the `<line>` element, stroke attributes included.
    pub fn line_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = vec![
            ("x1", self.start.x().to_string()),
            ("y1", self.start.y().to_string()),
            ("x2", self.end.x().to_string()),
            ("y2", self.end.y().to_string()),
        ];

        if let Some(class_name) = &self.class_name {
            attributes.push(("class", class_name.clone()));
        }
        if let Some(stroke) = &self.stroke {
            attributes.extend(stroke.svg_attributes());
        }

        attributes
    }
}
