//! Planar coordinates and Euclidean distance.
//!
//! Every entity the charger can travel to exposes its location through the
//! [`Positioned`] trait, so a raw coordinate pair and a vehicle record are
//! measured by the same [`distance`] function.

use std::fmt;

/// A position in the simulated area, in abstract distance units.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Squared Euclidean distance.  Monotonic in `distance_to`, so it is
    /// enough for ranking.
    #[inline]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// ── Positioned ────────────────────────────────────────────────────────────────

/// Anything that occupies a single point in the area.
pub trait Positioned {
    fn position(&self) -> Point;
}

impl Positioned for Point {
    #[inline]
    fn position(&self) -> Point {
        *self
    }
}

impl Positioned for (f64, f64) {
    #[inline]
    fn position(&self) -> Point {
        Point::new(self.0, self.1)
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    #[inline]
    fn position(&self) -> Point {
        (**self).position()
    }
}

/// Euclidean distance between two positioned things.
#[inline]
pub fn distance<A, B>(a: &A, b: &B) -> f64
where
    A: Positioned + ?Sized,
    B: Positioned + ?Sized,
{
    a.position().distance_to(b.position())
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle the fleet lives in.  Both edges are inclusive.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    #[inline]
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Square area `[0, side] × [0, side]`.
    pub fn square(side: f64) -> Self {
        Self::new(Point::ORIGIN, Point::new(side, side))
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// `true` if both corners are finite and `min <= max` on each axis.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::square(1000.0)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.min, self.max)
    }
}
