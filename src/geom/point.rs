use crate::Vector;
use crate::geom::EPS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A location in model space, in internal length units (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns true if both points are very close to each other.
    pub fn is_close(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPS
            && (self.y - other.y).abs() < EPS
            && (self.z - other.z).abs() < EPS
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.,
            y: (self.y + other.y) / 2.,
            z: (self.z + other.z) / 2.,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(
            f,
            "Point({:.prec$}, {:.prec$}, {:.prec$})",
            self.x,
            self.y,
            self.z,
            prec = prec
        )
    }
}

// Offsetting a point by a displacement
impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, other: Vector) -> Self {
        Self {
            x: self.x + other.dx,
            y: self.y + other.dy,
            z: self.z + other.dz,
        }
    }
}

impl Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, other: Vector) -> Self {
        Self {
            x: self.x - other.dx,
            y: self.y - other.dy,
            z: self.z - other.dz,
        }
    }
}

// Difference of two points is a displacement
impl Sub for Point {
    type Output = Vector;
    fn sub(self, other: Point) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_close() {
        let pa = Point::new(5., 5., 5.);
        let pb = Point::new(5.00000000000001, 5., 5.);
        let pc = Point::new(5.0001, 5., 5.);
        assert!(pa.is_close(&pb));
        assert!(!pa.is_close(&pc));
    }

    #[test]
    fn test_midpoint() {
        let p0 = Point::new(0., 0., 0.);
        let p1 = Point::new(2., 4., 6.);
        assert!(p0.midpoint(&p1).is_close(&Point::new(1., 2., 3.)));
        // Midpoint of a point with itself is the point
        assert!(p0.midpoint(&p0).is_close(&p0));
    }

    #[test]
    fn test_add_vector() {
        let p = Point::new(1., 2., 3.);
        let moved = p + Vector::new(0., 0., 0.9);
        assert!(moved.is_close(&Point::new(1., 2., 3.9)));
    }

    #[test]
    fn test_sub_points_gives_vector() {
        let p0 = Point::new(1., 1., 0.);
        let p1 = Point::new(4., 5., 0.);
        let v = p1 - p0;
        assert!(v.is_close(&Vector::new(3., 4., 0.)));
        assert!((v.length() - 5.).abs() < 1e-12);
    }
}
