//! Building footprint: a closed polygon on the ground plane.
//!
//! The footprint is the ordered perimeter of the building at its base.
//! Closure invariant: the first point is repeated as the last point, so a
//! footprint with n corners stores n + 1 points and has n edges. Edge 0 is
//! treated as the front wall downstream (it receives the door).

use crate::error::BuildError;
use crate::geom::EPS;
use crate::{Point, Vector};
use serde::{Deserialize, Serialize};

/// Ordered pair of wall axis endpoints produced by the footprint planner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub start: Point,
    pub end: Point,
}

impl WallSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(&self.end)
    }

    /// Unit vector from start to end. None for a degenerate segment.
    pub fn direction(&self) -> Option<Vector> {
        (self.end - self.start).normalize()
    }
}

/// Closed ordered polygon outlining the building perimeter.
///
/// Always a rectangle in this system, but the type accepts any closed simple
/// polygon lying in one horizontal plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pts: Vec<Point>,
}

impl Footprint {
    /// Validates and wraps an arbitrary closed polygon.
    ///
    /// Requirements: at least 4 points, first == last, consecutive points
    /// distinct, all points at the same elevation, no two non-adjacent edges
    /// intersecting.
    pub fn new(pts: Vec<Point>) -> Result<Self, BuildError> {
        if pts.len() < 4 {
            return Err(BuildError::InvalidDimension(format!(
                "footprint needs at least 4 points (3 corners + closure), got {}",
                pts.len()
            )));
        }
        let first = pts[0];
        let last = pts[pts.len() - 1];
        if !first.is_close(&last) {
            return Err(BuildError::InvalidDimension(
                "footprint is not closed (first point must repeat as last)".to_string(),
            ));
        }
        for pt in pts.iter() {
            if (pt.z - first.z).abs() > EPS {
                return Err(BuildError::InvalidDimension(
                    "footprint points must lie in one horizontal plane".to_string(),
                ));
            }
        }
        for pair in pts.windows(2) {
            if pair[0].is_close(&pair[1]) {
                return Err(BuildError::InvalidDimension(
                    "footprint has a zero-length edge".to_string(),
                ));
            }
        }
        let fp = Self { pts };
        if !fp.is_simple() {
            return Err(BuildError::InvalidDimension(
                "footprint edges intersect (polygon is not simple)".to_string(),
            ));
        }
        Ok(fp)
    }

    /// Plans an axis-aligned rectangle centered at the origin.
    ///
    /// Returns 5 points in counter-clockwise order with the first point
    /// repeated as the last. Edge 0 runs along +X at y = -depth/2 and is the
    /// front wall.
    pub fn rectangle(width: f64, depth: f64) -> Result<Self, BuildError> {
        if !(width > 0. && width.is_finite() && depth > 0. && depth.is_finite()) {
            return Err(BuildError::InvalidDimension(format!(
                "rectangle dimensions must be positive and finite, got {width} x {depth}"
            )));
        }
        let pts = vec![
            Point::new(-width / 2., -depth / 2., 0.),
            Point::new(width / 2., -depth / 2., 0.),
            Point::new(width / 2., depth / 2., 0.),
            Point::new(-width / 2., depth / 2., 0.),
            Point::new(-width / 2., -depth / 2., 0.),
        ];
        Ok(Self { pts })
    }

    pub fn points(&self) -> &[Point] {
        &self.pts
    }

    /// Number of edges (one less than the stored points).
    pub fn edge_count(&self) -> usize {
        self.pts.len() - 1
    }

    /// Wall segments in footprint order: segment i connects point i to i+1.
    pub fn segments(&self) -> Vec<WallSegment> {
        self.pts
            .windows(2)
            .map(|pair| WallSegment::new(pair[0], pair[1]))
            .collect()
    }

    /// Mean of the distinct corners (the closure point is skipped).
    pub fn centroid(&self) -> Point {
        let n = self.edge_count() as f64;
        let (sx, sy) = self.pts[..self.pts.len() - 1]
            .iter()
            .fold((0., 0.), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n, self.pts[0].z)
    }

    /// True if no two non-adjacent edges intersect in the ground plane.
    fn is_simple(&self) -> bool {
        let n = self.edge_count();
        for i in 0..n {
            for j in (i + 1)..n {
                // Skip edges sharing a vertex: the successor and, for edge 0,
                // the last edge which wraps around to the closure point.
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                if segments_cross_2d(
                    &self.pts[i],
                    &self.pts[i + 1],
                    &self.pts[j],
                    &self.pts[j + 1],
                ) {
                    return false;
                }
            }
        }
        true
    }
}

/// Signed parallelogram area of (b - a) x (c - a), z ignored.
fn orient_2d(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// True if `p` lies within the axis-aligned span of segment a-b.
fn within_span_2d(a: &Point, b: &Point, p: &Point) -> bool {
    p.x >= a.x.min(b.x) - EPS
        && p.x <= a.x.max(b.x) + EPS
        && p.y >= a.y.min(b.y) - EPS
        && p.y <= a.y.max(b.y) + EPS
}

/// Intersection test for segments a-b and c-d projected onto the ground plane.
///
/// Touching counts as crossing: for simplicity checks any contact between
/// non-adjacent edges invalidates the polygon.
fn segments_cross_2d(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
    let d1 = orient_2d(c, d, a);
    let d2 = orient_2d(c, d, b);
    let d3 = orient_2d(a, b, c);
    let d4 = orient_2d(a, b, d);

    if ((d1 > EPS && d2 < -EPS) || (d1 < -EPS && d2 > EPS))
        && ((d3 > EPS && d4 < -EPS) || (d3 < -EPS && d4 > EPS))
    {
        return true;
    }

    // Collinear or endpoint-touching cases
    (d1.abs() <= EPS && within_span_2d(c, d, a))
        || (d2.abs() <= EPS && within_span_2d(c, d, b))
        || (d3.abs() <= EPS && within_span_2d(a, b, c))
        || (d4.abs() <= EPS && within_span_2d(a, b, d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_is_closed_and_centered() -> Result<(), BuildError> {
        let fp = Footprint::rectangle(10., 5.)?;
        let pts = fp.points();
        assert_eq!(pts.len(), 5);
        assert!(pts[0].is_close(&pts[4]));
        assert!(pts[0].is_close(&Point::new(-5., -2.5, 0.)));
        assert!(pts[1].is_close(&Point::new(5., -2.5, 0.)));
        assert!(pts[2].is_close(&Point::new(5., 2.5, 0.)));
        assert!(pts[3].is_close(&Point::new(-5., 2.5, 0.)));
        assert!(fp.centroid().is_close(&Point::new(0., 0., 0.)));
        Ok(())
    }

    #[test]
    fn test_rectangle_extents() -> Result<(), BuildError> {
        let (w, d) = (7.3, 2.1);
        let fp = Footprint::rectangle(w, d)?;
        let xs: Vec<f64> = fp.points().iter().map(|p| p.x).collect();
        let ys: Vec<f64> = fp.points().iter().map(|p| p.y).collect();
        let span_x = xs.iter().cloned().fold(f64::MIN, f64::max)
            - xs.iter().cloned().fold(f64::MAX, f64::min);
        let span_y = ys.iter().cloned().fold(f64::MIN, f64::max)
            - ys.iter().cloned().fold(f64::MAX, f64::min);
        assert!((span_x - w).abs() < 1e-12);
        assert!((span_y - d).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_rectangle_rejects_bad_dimensions() {
        for (w, d) in [(0., 5.), (-1., 5.), (10., 0.), (10., -0.1), (f64::NAN, 5.)] {
            let result = Footprint::rectangle(w, d);
            assert!(matches!(result, Err(BuildError::InvalidDimension(_))));
        }
    }

    #[test]
    fn test_rectangle_is_deterministic() -> Result<(), BuildError> {
        let fp1 = Footprint::rectangle(10., 5.)?;
        let fp2 = Footprint::rectangle(10., 5.)?;
        assert_eq!(fp1, fp2);
        Ok(())
    }

    #[test]
    fn test_segments_order_and_count() -> Result<(), BuildError> {
        let fp = Footprint::rectangle(10., 5.)?;
        let segments = fp.segments();
        assert_eq!(segments.len(), fp.points().len() - 1);
        assert_eq!(segments.len(), fp.edge_count());
        for (i, seg) in segments.iter().enumerate() {
            assert!(seg.start.is_close(&fp.points()[i]));
            assert!(seg.end.is_close(&fp.points()[i + 1]));
        }
        // Edge 0 is the front wall: along +X at y = -depth/2
        assert!(segments[0].midpoint().is_close(&Point::new(0., -2.5, 0.)));
        Ok(())
    }

    #[test]
    fn test_new_accepts_simple_polygon() -> Result<(), BuildError> {
        // L-shaped plan
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(4., 0., 0.),
            Point::new(4., 2., 0.),
            Point::new(2., 2., 0.),
            Point::new(2., 4., 0.),
            Point::new(0., 4., 0.),
            Point::new(0., 0., 0.),
        ];
        let fp = Footprint::new(pts)?;
        assert_eq!(fp.edge_count(), 6);
        Ok(())
    }

    #[test]
    fn test_new_rejects_open_polygon() {
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(1., 0., 0.),
            Point::new(1., 1., 0.),
            Point::new(0., 1., 0.),
        ];
        assert!(matches!(
            Footprint::new(pts),
            Err(BuildError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_new_rejects_self_intersection() {
        // Bowtie: edges 0 and 2 cross
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(2., 2., 0.),
            Point::new(2., 0., 0.),
            Point::new(0., 2., 0.),
            Point::new(0., 0., 0.),
        ];
        assert!(matches!(
            Footprint::new(pts),
            Err(BuildError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_new_rejects_non_planar() {
        let pts = vec![
            Point::new(0., 0., 0.),
            Point::new(1., 0., 0.5),
            Point::new(1., 1., 0.),
            Point::new(0., 0., 0.),
        ];
        assert!(matches!(
            Footprint::new(pts),
            Err(BuildError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_segment_length_and_direction() {
        let seg = WallSegment::new(Point::new(-5., -2.5, 0.), Point::new(5., -2.5, 0.));
        assert!((seg.length() - 10.).abs() < 1e-12);
        assert!(seg.direction().unwrap().is_close(&Vector::new(1., 0., 0.)));
        let degenerate = WallSegment::new(Point::new(1., 1., 0.), Point::new(1., 1., 0.));
        assert!(degenerate.direction().is_none());
    }
}
