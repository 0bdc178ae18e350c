//! Line geometry between two anchor points.
//!
//! A connector is drawn as a line inside its own overlay box. The box is the
//! axis-aligned rectangle spanning both anchors; the line endpoints are given
//! in the box's local coordinates and flip depending on which anchor is
//! further left or higher up, so the line always runs from the `from` anchor
//! to the `to` anchor.

use crate::{
    anchor::Attachment,
    geometry::{Bounds, Point, Size},
};

/// Smallest overlay width or height, in visual units.
///
/// Keeps horizontal and vertical lines visible when one extent is zero.
pub const MIN_EXTENT: f32 = 2.0;

/// The computed geometry of one connector line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGeometry {
    from: Point,
    to: Point,
}

impl LineGeometry {
    /// Creates the geometry for a line between two anchor points.
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Computes the anchors on two element boxes and builds the line between them.
    pub fn between(
        from_bounds: Bounds,
        from: Attachment,
        to_bounds: Bounds,
        to: Attachment,
    ) -> Self {
        Self::new(from.anchor_point(from_bounds), to.anchor_point(to_bounds))
    }

    /// Returns the `from` anchor in page coordinates
    pub fn from(self) -> Point {
        self.from
    }

    /// Returns the `to` anchor in page coordinates
    pub fn to(self) -> Point {
        self.to
    }

    /// Horizontal distance between the anchors.
    pub fn width(self) -> f32 {
        (self.from.x() - self.to.x()).abs()
    }

    /// Vertical distance between the anchors.
    pub fn height(self) -> f32 {
        (self.from.y() - self.to.y()).abs()
    }

    /// Unclamped extent of the line
    pub fn size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Top-left corner of the overlay box in page coordinates.
    pub fn origin(self) -> Point {
        self.from.min(self.to)
    }

    /// The axis-aligned box spanning both anchors.
    pub fn bounds(self) -> Bounds {
        Bounds::spanning(self.from, self.to)
    }

    /// Overlay size with each dimension raised to at least `min_extent`.
    pub fn viewport(self, min_extent: f32) -> Size {
        self.size().at_least(min_extent)
    }

    fn flips_horizontally(self) -> bool {
        self.from.x() > self.to.x()
    }

    fn flips_vertically(self) -> bool {
        self.to.y() < self.from.y()
    }

    /// Start of the line in overlay-local coordinates (`x1`, `y1`).
    pub fn local_start(self) -> Point {
        Point::new(
            if self.flips_horizontally() {
                self.width()
            } else {
                0.0
            },
            if self.flips_vertically() {
                self.height()
            } else {
                0.0
            },
        )
    }

    /// End of the line in overlay-local coordinates (`x2`, `y2`).
    pub fn local_end(self) -> Point {
        Point::new(
            if self.flips_horizontally() {
                0.0
            } else {
                self.width()
            },
            if self.flips_vertically() {
                0.0
            } else {
                self.height()
            },
        )
    }
}
