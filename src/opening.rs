//! Opening placement: choosing a door or window type from the host catalog
//! and working out where on a wall segment it goes.
//!
//! Openings are always placed at the midpoint of their wall segment. The sill
//! height is applied here as a vertical offset of the placement point and
//! additionally written back as a parameter by the orchestrator, so hosts
//! that ignore point elevation still get the correct sill.

use crate::error::BuildError;
use crate::geom::footprint::WallSegment;
use crate::geom::point::Point;
use crate::geom::vector::Vector;
use crate::model::{OpeningSpec, OpeningType};

/// Find the catalog entry answering the spec's kind, family and type name.
pub fn select_type<'a>(
    catalog: &'a [OpeningType],
    spec: &OpeningSpec,
) -> Result<&'a OpeningType, BuildError> {
    catalog
        .iter()
        .find(|t| t.kind == spec.kind && t.matches(&spec.family, &spec.type_name))
        .ok_or_else(|| BuildError::TypeNotFound {
            family: spec.family.clone(),
            type_name: spec.type_name.clone(),
        })
}

/// Insertion point for an opening on a segment: the midpoint, lifted by the
/// sill height.
pub fn placement_point(segment: &WallSegment, sill: f64) -> Point {
    segment.midpoint() + Vector::new(0.0, 0.0, sill)
}

/// Check that a segment is long enough to host the opening type.
pub fn check_clearance(segment: &WallSegment, opening: &OpeningType) -> Result<(), BuildError> {
    let length = segment.length();
    if length < opening.nominal_width {
        return Err(BuildError::SegmentTooShort {
            length,
            required: opening.nominal_width,
        });
    }
    Ok(())
}
