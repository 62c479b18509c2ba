//! The seam between planning and model authoring.
//!
//! Planners never touch a model directly. Everything that creates or mutates
//! elements goes through [`BuildHost`], so the same build sequence can drive
//! an in-memory model in tests and a real authoring environment in
//! production. Mutating calls are only legal between `begin` and
//! `commit`/`rollback`; hosts reject them otherwise.

pub mod memory;

use crate::error::BuildError;
use crate::geom::footprint::WallSegment;
use crate::geom::point::Point;
use crate::model::{Level, OpeningKind, OpeningType, ParamKey, ParamValue, RoofType, Wall};
use crate::roof::{FlatOffsetProfile, RidgeProfile};
use crate::uid::UID;

/// A model authoring environment the build sequence can drive.
pub trait BuildHost {
    /// All levels of the model, in elevation order.
    fn levels(&self) -> Vec<Level>;

    /// Door and window types available for placement.
    fn opening_types(&self) -> Vec<OpeningType>;

    /// Roof assemblies available.
    fn roof_types(&self) -> Vec<RoofType>;

    /// Open a named transaction. All mutations until `commit` or `rollback`
    /// belong to it.
    fn begin(&mut self, name: &str) -> Result<(), BuildError>;

    /// Make the open transaction's changes permanent.
    fn commit(&mut self) -> Result<(), BuildError>;

    /// Discard every change of the open transaction.
    fn rollback(&mut self) -> Result<(), BuildError>;

    /// Ensure an opening type is loaded and ready. Activating an already
    /// active type is a no-op.
    fn activate_type(&mut self, opening_type: &UID) -> Result<(), BuildError>;

    /// Create a wall along a segment, bound between two levels. The returned
    /// record carries the width the host assigned to the wall.
    fn create_wall(
        &mut self,
        segment: &WallSegment,
        base_level: &UID,
        top_level: &UID,
    ) -> Result<Wall, BuildError>;

    /// Place a door or window on a wall at the given point.
    fn place_opening(
        &mut self,
        kind: OpeningKind,
        opening_type: &UID,
        wall: &UID,
        level: &UID,
        location: &Point,
    ) -> Result<UID, BuildError>;

    /// Create a sloped footprint roof. Returns the roof id and the number of
    /// boundary edges that got the slope applied.
    fn create_footprint_roof(
        &mut self,
        profile: &FlatOffsetProfile,
        level: &UID,
        roof_type: &UID,
    ) -> Result<(UID, usize), BuildError>;

    /// Create an extrusion roof from a gable section.
    fn create_extrusion_roof(
        &mut self,
        profile: &RidgeProfile,
        level: &UID,
        roof_type: &UID,
    ) -> Result<UID, BuildError>;

    /// Write an element parameter.
    fn set_parameter(
        &mut self,
        element: &UID,
        key: ParamKey,
        value: ParamValue,
    ) -> Result<(), BuildError>;
}
