//! Geometry primitives for canvas-local coordinates.
//!
//! Everything is `f32` canvas units with the origin at the top-left corner.
//! Rectangles are axis-aligned. Layers that have not been laid out yet carry
//! no rectangle at all (`Option<Rect>` on the layer), so there is no sentinel
//! value to special-case in the arithmetic here.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in canvas-local coordinates.
///
/// Also used as a 2D offset (pointer deltas, grab offsets).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Units from the left edge.
    pub x: f32,
    /// Units from the top edge.
    pub y: f32,
}

impl Point {
    /// The canvas origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp into `[0, bounds]` on both axes.
    #[must_use]
    pub fn clamped(self, bounds: Size) -> Self {
        Self {
            x: self.x.clamp(0.0, bounds.width.max(0.0)),
            y: self.y.clamp(0.0, bounds.height.max(0.0)),
        }
    }

    /// Scale each component by the matching component of `factor`.
    #[must_use]
    pub fn scaled_by(self, factor: Size) -> Self {
        Self {
            x: self.x * factor.width,
            y: self.y * factor.height,
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width/height pair in canvas units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Scale each component by the matching component of `factor`.
    #[must_use]
    pub fn scaled_by(self, factor: Size) -> Self {
        Self {
            width: self.width * factor.width,
            height: self.height * factor.height,
        }
    }

    /// Component-wise maximum of `self` and `floor`.
    #[must_use]
    pub fn at_least(self, floor: Size) -> Self {
        Self {
            width: self.width.max(floor.width),
            height: self.height.max(floor.height),
        }
    }

    /// `true` when either extent is zero or negative.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle: origin plus size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Extent from the origin.
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from raw components.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Create a rectangle from an origin and a size.
    #[must_use]
    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Right edge.
    #[must_use]
    pub fn max_x(self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn max_y(self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Geometric center.
    #[must_use]
    pub fn center(self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// `true` when the point lies within the rectangle, edges included.
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.max_x()
            && point.y >= self.origin.y
            && point.y <= self.max_y()
    }

    /// Translate the origin by `delta`.
    #[must_use]
    pub fn offset_by(self, delta: Point) -> Self {
        Self::from_parts(self.origin + delta, self.size)
    }

    /// Scale origin and size by the per-axis `factor`.
    #[must_use]
    pub fn scaled_by(self, factor: Size) -> Self {
        Self::from_parts(self.origin.scaled_by(factor), self.size.scaled_by(factor))
    }

    /// Grow about the center so each extent is at least `floor`.
    ///
    /// Used for the tap hit-test floor; a zero-size rectangle stays centered
    /// on its own origin-plus-half-size point.
    #[must_use]
    pub fn expanded_to(self, floor: Size) -> Self {
        let size = self.size.at_least(floor);
        let center = self.center();
        Self::from_parts(
            Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        )
    }

    /// Convert from canvas pixels to unit-interval coordinates.
    ///
    /// `canvas` must be positive on both axes; a degenerate canvas returns
    /// `self` unchanged rather than propagate non-finite components.
    #[must_use]
    pub fn normalized(self, canvas: Size) -> Self {
        if canvas.is_degenerate() {
            return self;
        }
        self.scaled_by(Size::new(1.0 / canvas.width, 1.0 / canvas.height))
    }

    /// Convert from unit-interval coordinates back to canvas pixels.
    #[must_use]
    pub fn denormalized(self, canvas: Size) -> Self {
        if canvas.is_degenerate() {
            return self;
        }
        self.scaled_by(canvas)
    }
}
