//! Integer geometry primitives.
//!
//! All coordinates are whole pixels. Rectangles are position plus extent,
//! with the origin at the top-left corner of the parent's client area.

/// A point in 2D space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// The origin (0, 0).
    pub const ZERO: Point = Point { x: 0, y: 0 };

    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This point shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A 2D size (width and height).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A size of zero extent.
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    /// Create a new size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// This size grown by `(dw, dh)`.
    pub const fn grown(self, dw: i32, dh: i32) -> Self {
        Self {
            width: self.width + dw,
            height: self.height + dh,
        }
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self { width, height }
    }
}

/// A rectangle: origin plus extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Rect = Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Create a new rectangle.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin point and a size.
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    /// The top-left corner.
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The extent.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The x coordinate one past the right edge.
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// The y coordinate one past the bottom edge.
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// The center point (rounded toward the origin).
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Whether `point` falls inside this rectangle.
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.right()
            && point.y < self.bottom()
    }

    /// This rectangle shifted by `(dx, dy)`.
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// This rectangle moved to `origin`, keeping its size.
    pub const fn at(&self, origin: Point) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: self.width,
            height: self.height,
        }
    }

    /// A rectangle of this size centered within `outer`.
    pub const fn centered_in(&self, outer: Rect) -> Self {
        Self {
            x: outer.x + (outer.width - self.width) / 2,
            y: outer.y + (outer.height - self.height) / 2,
            width: self.width,
            height: self.height,
        }
    }

    /// The union of two rectangles (smallest rectangle containing both).
    ///
    /// An empty rectangle acts as the identity.
    pub fn union(&self, other: Rect) -> Self {
        if self.size().is_empty() {
            return other;
        }
        if other.size().is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(Point::new(10, 10)));
        assert!(r.contains(Point::new(29, 29)));
        assert!(!r.contains(Point::new(30, 10)));
        assert!(!r.contains(Point::new(10, 30)));
        assert!(!r.contains(Point::new(9, 10)));
    }

    #[test]
    fn test_rect_centered_in() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(0, 0, 40, 20).centered_in(outer);
        assert_eq!(inner, Rect::new(30, 40, 40, 20));
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.union(b), Rect::new(0, 0, 15, 15));
        assert_eq!(Rect::ZERO.union(b), b);
        assert_eq!(a.union(Rect::ZERO), a);
    }
}
