//! Roof profiles derived from the planned walls.
//!
//! Two strategies are supported. [`flat_offset_profile`] pushes every wall
//! edge outward by half the wall width and slopes each edge, which yields a
//! hip roof over the footprint. [`ridge_profile`] draws a gable section over
//! one wall and extrudes it along the perpendicular walls. Both are pure
//! geometry; binding the profile to a level and roof type is the host's job.

use crate::error::BuildError;
use crate::geom::EPS;
use crate::geom::footprint::{Footprint, WallSegment};
use crate::geom::point::Point;
use crate::geom::vector::Vector;
use crate::model::RoofType;
use serde::{Deserialize, Serialize};

/// Which roof strategy the build uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoofStyle {
    FlatOffset,
    RidgeExtrusion,
}

/// Sloped footprint roof: one offset edge per wall, all sloping inward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatOffsetProfile {
    pub edges: Vec<WallSegment>,
    /// Slope of every edge, as the host's angle parameter expects it.
    pub slope_angle: f64,
}

/// Gable section extruded along the building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeProfile {
    /// Eave start, ridge apex, eave end of the section polyline.
    pub ridge: [Point; 3],
    /// Start of the extrusion axis.
    pub axis_origin: Point,
    /// Unit direction of the extrusion axis.
    pub axis: Vector,
    pub extrusion_start: f64,
    pub extrusion_end: f64,
}

/// A planned roof, ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoofProfile {
    Flat(FlatOffsetProfile),
    Ridge(RidgeProfile),
}

/// Find the roof catalog entry answering the family/type name pair.
pub fn select_type<'a>(
    catalog: &'a [RoofType],
    family: &str,
    type_name: &str,
) -> Result<&'a RoofType, BuildError> {
    catalog
        .iter()
        .find(|t| t.matches(family, type_name))
        .ok_or_else(|| BuildError::RoofTypeNotFound {
            family: family.to_string(),
            type_name: type_name.to_string(),
        })
}

/// Offset every wall edge outward by `dt` and slope it by `slope_angle`.
///
/// Outward means away from the footprint centroid, applied per axis, so a
/// rectangle's corners move diagonally and the offset loop stays closed.
pub fn flat_offset_profile(
    footprint: &Footprint,
    walls: &[WallSegment],
    dt: f64,
    slope_angle: f64,
) -> Result<FlatOffsetProfile, BuildError> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(BuildError::InvalidDimension(format!(
            "edge offset must be non-negative and finite, got {dt}"
        )));
    }
    let expected = footprint.edge_count();
    if walls.len() != expected {
        return Err(BuildError::InsufficientWalls {
            expected,
            actual: walls.len(),
        });
    }

    let centroid = footprint.centroid();
    let edges = walls
        .iter()
        .map(|w| {
            WallSegment::new(
                w.start + outward(&w.start, &centroid, dt),
                w.end + outward(&w.end, &centroid, dt),
            )
        })
        .collect();

    Ok(FlatOffsetProfile { edges, slope_angle })
}

/// Gable section over the second wall, extruded along the first.
///
/// The section runs at `base_z` from one eave to the other, overhanging each
/// end of the profile wall by `dt`, with the apex lifted by `rise` over the
/// wall midpoint. The extrusion spans the first wall's full length plus `dt`
/// of overhang on both ends.
pub fn ridge_profile(
    walls: &[WallSegment],
    dt: f64,
    base_z: f64,
    rise: f64,
) -> Result<RidgeProfile, BuildError> {
    if walls.len() < 2 {
        return Err(BuildError::InsufficientWalls {
            expected: 2,
            actual: walls.len(),
        });
    }
    if !dt.is_finite() || dt < 0.0 {
        return Err(BuildError::InvalidDimension(format!(
            "edge offset must be non-negative and finite, got {dt}"
        )));
    }
    if !rise.is_finite() || rise <= 0.0 {
        return Err(BuildError::InvalidDimension(format!(
            "ridge rise must be positive and finite, got {rise}"
        )));
    }

    let profile_wall = &walls[1];
    let along = profile_wall.direction().ok_or_else(|| {
        BuildError::InvalidDimension("profile wall has zero length".to_string())
    })?;
    let mid = profile_wall.midpoint();

    let eave_start = profile_wall.start + along * (-dt);
    let eave_end = profile_wall.end + along * dt;
    let ridge = [
        Point::new(eave_start.x, eave_start.y, base_z),
        Point::new(mid.x, mid.y, base_z + rise),
        Point::new(eave_end.x, eave_end.y, base_z),
    ];

    let axis_wall = &walls[0];
    let axis = axis_wall.direction().ok_or_else(|| {
        BuildError::InvalidDimension("extrusion axis wall has zero length".to_string())
    })?;

    Ok(RidgeProfile {
        ridge,
        axis_origin: axis_wall.start,
        axis,
        extrusion_start: -dt,
        extrusion_end: axis_wall.length() + dt,
    })
}

/// Per-axis offset of `dt` away from the centroid. A coordinate sitting on
/// the centroid axis does not move.
fn outward(p: &Point, centroid: &Point, dt: f64) -> Vector {
    Vector::new(
        axis_sign(p.x - centroid.x) * dt,
        axis_sign(p.y - centroid.y) * dt,
        0.0,
    )
}

fn axis_sign(d: f64) -> f64 {
    if d > EPS {
        1.0
    } else if d < -EPS {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::IsClose;

    fn rect_walls() -> (Footprint, Vec<WallSegment>) {
        let fp = Footprint::rectangle(10.0, 5.0).unwrap();
        let walls = fp.segments();
        (fp, walls)
    }

    #[test]
    fn test_flat_profile_offsets_corners_outward() {
        let (fp, walls) = rect_walls();
        let profile = flat_offset_profile(&fp, &walls, 0.1, 0.5).unwrap();
        assert_eq!(profile.edges.len(), 4);
        assert!(profile.slope_angle.is_close(0.5));

        // First wall runs along the front; both ends move out and down.
        let front = &profile.edges[0];
        assert!(front.start.x.is_close(-5.1));
        assert!(front.start.y.is_close(-2.6));
        assert!(front.end.x.is_close(5.1));
        assert!(front.end.y.is_close(-2.6));

        // The loop stays closed: each edge ends where the next one starts.
        for pair in profile.edges.windows(2) {
            assert!(pair[0].end.is_close(&pair[1].start));
        }
        assert!(profile.edges[3].end.is_close(&profile.edges[0].start));
    }

    #[test]
    fn test_flat_profile_wall_count_must_match_footprint() {
        let (fp, walls) = rect_walls();
        let err = flat_offset_profile(&fp, &walls[..3], 0.1, 0.5);
        assert!(matches!(
            err,
            Err(BuildError::InsufficientWalls { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_ridge_profile_default_house_numbers() {
        let (_, walls) = rect_walls();
        let profile = ridge_profile(&walls, 0.1, 3.2, 0.5).unwrap();

        let [start, apex, end] = profile.ridge;
        assert!(start.is_close(&Point::new(5.0, -2.6, 3.2)));
        assert!(apex.is_close(&Point::new(5.0, 0.0, 3.7)));
        assert!(end.is_close(&Point::new(5.0, 2.6, 3.2)));

        assert!(profile.axis_origin.is_close(&Point::new(-5.0, -2.5, 0.0)));
        assert!(profile.axis.is_close(&Vector::new(1.0, 0.0, 0.0)));
        assert!(profile.extrusion_start.is_close(-0.1));
        assert!(profile.extrusion_end.is_close(10.1));
    }

    #[test]
    fn test_ridge_profile_needs_two_walls() {
        let (_, walls) = rect_walls();
        let err = ridge_profile(&walls[..1], 0.1, 3.2, 0.5);
        assert!(matches!(
            err,
            Err(BuildError::InsufficientWalls { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_ridge_profile_rejects_flat_rise() {
        let (_, walls) = rect_walls();
        assert!(matches!(
            ridge_profile(&walls, 0.1, 3.2, 0.0),
            Err(BuildError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_select_type_by_pair() {
        let catalog = vec![RoofType::new("Basic Roof", "Cold Roof - Concrete", 0.2)];
        assert!(select_type(&catalog, "Basic Roof", "Cold Roof - Concrete").is_ok());
        assert!(matches!(
            select_type(&catalog, "Basic Roof", "Warm Roof - Timber"),
            Err(BuildError::RoofTypeNotFound { .. })
        ));
    }
}
