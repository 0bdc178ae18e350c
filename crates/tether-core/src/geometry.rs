//! Basic geometric types in page coordinates.
//!
//! The page coordinate system grows to the right along `x` (the CSS `left`
//! axis) and downward along `y` (the CSS `top` axis).

/// A point in page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Returns the component-wise minimum of two points
    pub fn min(self, other: Point) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Returns the component-wise maximum of two points
    pub fn max(self, other: Point) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Raises both dimensions to at least `extent`
    pub fn at_least(self, extent: f32) -> Self {
        self.max(Size::new(extent, extent))
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// Element bounding boxes, as reported by a host, are expressed as `Bounds`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from a top-left corner and a size.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates bounds from the CSS-style `top`, `left`, `width` and `height`
    /// of a bounding client rectangle.
    pub fn from_rect(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self::new_from_top_left(Point::new(left, top), Size::new(width, height))
    }

    /// Creates the smallest bounds containing both points.
    ///
    /// The points may be given in any order.
    pub fn spanning(a: Point, b: Point) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            min_x: min.x,
            min_y: min.y,
            max_x: max.x,
            max_y: max.y,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the horizontal center
    pub fn center_x(self) -> f32 {
        self.min_x + self.width() / 2.0
    }

    /// Returns the vertical center
    pub fn center_y(self) -> f32 {
        self.min_y + self.height() / 2.0
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_add() {
        let origin = Point::new(5.0, 8.0);
        let local = Point::new(2.0, 3.0);
        assert_eq!(origin.add_point(local), Point::new(7.0, 11.0));
    }

    #[test]
    fn test_point_min_max() {
        let p1 = Point::new(1.0, 9.0);
        let p2 = Point::new(4.0, 2.0);
        assert_eq!(p1.min(p2), Point::new(1.0, 2.0));
        assert_eq!(p1.max(p2), Point::new(4.0, 9.0));
    }

    #[test]
    fn test_size_at_least() {
        let size = Size::new(0.0, 40.0).at_least(2.0);
        assert_eq!(size.width(), 2.0);
        assert_eq!(size.height(), 40.0);
    }

    #[test]
    fn test_size_is_zero() {
        assert!(Size::default().is_zero());
        assert!(!Size::new(1.0, 0.0).is_zero());
        assert!(!Size::new(-1.0, -1.0).is_zero());
    }

    #[test]
    fn test_bounds_from_rect() {
        let bounds = Bounds::from_rect(10.0, 20.0, 30.0, 40.0);
        assert_eq!(bounds.min_x(), 20.0);
        assert_eq!(bounds.min_y(), 10.0);
        assert_eq!(bounds.max_x(), 50.0);
        assert_eq!(bounds.max_y(), 50.0);
        assert_eq!(bounds.center_x(), 35.0);
        assert_eq!(bounds.center_y(), 30.0);
    }

    #[test]
    fn test_bounds_spanning_is_order_independent() {
        let a = Point::new(10.0, 2.0);
        let b = Point::new(3.0, 8.0);
        let forward = Bounds::spanning(a, b);
        let backward = Bounds::spanning(b, a);

        assert_eq!(forward, backward);
        assert_eq!(forward.min_point(), Point::new(3.0, 2.0));
        assert_eq!(forward.width(), 7.0);
        assert_eq!(forward.height(), 6.0);
    }
}
