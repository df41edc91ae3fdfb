//! Plane geometry helpers shared by the cursor and the contour code.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Tolerance for float comparisons on lengths and positions.
pub const EPSILON: f64 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Length of the point taken as a vector.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product.
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Rotates counter-clockwise about the origin.
    pub fn rotated(&self, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn scaled(&self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    /// Heading of the vector in degrees, counter-clockwise from +x.
    pub fn heading(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        self.distance_to(other) <= tolerance
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Normalizes an angle in degrees to (-180, 180].
pub fn normalize_degrees(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }
    a
}
