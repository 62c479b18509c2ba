//! In-memory build host.
//!
//! [`MemoryHost`] keeps a committed [`ModelSnapshot`] plus a staged copy made
//! when a transaction begins. Mutations only ever touch the staged copy, so a
//! rollback is a drop and a commit is a swap. This makes the all-or-nothing
//! guarantee of the build sequence directly observable in tests.

use crate::error::BuildError;
use crate::geom::footprint::WallSegment;
use crate::geom::point::Point;
use crate::model::{Level, OpeningKind, OpeningType, ParamKey, ParamValue, RoofType, Wall};
use crate::roof::{FlatOffsetProfile, RidgeProfile, RoofProfile};
use crate::uid::UID;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::BuildHost;

/// A door or window placed on a wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningRecord {
    pub uid: UID,
    pub kind: OpeningKind,
    pub opening_type: UID,
    pub wall: UID,
    pub level: UID,
    pub location: Point,
}

/// A roof bound to a level and roof type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofRecord {
    pub uid: UID,
    pub roof_type: UID,
    pub level: UID,
    pub profile: RoofProfile,
    /// Number of boundary edges with a slope applied (footprint roofs only).
    pub slope_edges: usize,
}

/// One written element parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRecord {
    pub element: UID,
    pub key: ParamKey,
    pub value: ParamValue,
}

/// Everything the host holds about the model at one point in time.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub levels: Vec<Level>,
    pub walls: Vec<Wall>,
    pub openings: Vec<OpeningRecord>,
    pub roofs: Vec<RoofRecord>,
    pub parameters: Vec<ParamRecord>,
    /// Opening types activated so far, in activation order.
    pub activated_types: Vec<UID>,
}

struct Txn {
    name: String,
    staged: ModelSnapshot,
}

/// A self-contained host backed by plain collections.
pub struct MemoryHost {
    model: ModelSnapshot,
    opening_catalog: Vec<OpeningType>,
    roof_catalog: Vec<RoofType>,
    wall_width: f64,
    txn: Option<Txn>,
    history: Vec<String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            model: ModelSnapshot::default(),
            opening_catalog: Vec::new(),
            roof_catalog: Vec::new(),
            wall_width: 0.2,
            txn: None,
            history: Vec::new(),
        }
    }

    /// Add a level to the site.
    pub fn with_level(mut self, name: &str, elevation: f64) -> Self {
        self.model.levels.push(Level::new(name, elevation));
        self
    }

    /// Add a door or window type to the catalog.
    pub fn with_opening_type(mut self, opening_type: OpeningType) -> Self {
        self.opening_catalog.push(opening_type);
        self
    }

    /// Add a roof assembly to the catalog.
    pub fn with_roof_type(mut self, roof_type: RoofType) -> Self {
        self.roof_catalog.push(roof_type);
        self
    }

    /// Override the width assigned to new walls.
    pub fn with_wall_width(mut self, width: f64) -> Self {
        self.wall_width = width;
        self
    }

    /// The committed model. Never reflects an open transaction.
    pub fn snapshot(&self) -> &ModelSnapshot {
        &self.model
    }

    /// Names of committed transactions, oldest first.
    pub fn transactions(&self) -> &[String] {
        &self.history
    }

    pub fn transaction_open(&self) -> bool {
        self.txn.is_some()
    }

    fn staged_mut(&mut self) -> Result<&mut ModelSnapshot, BuildError> {
        match self.txn.as_mut() {
            Some(txn) => Ok(&mut txn.staged),
            None => Err(BuildError::HostOperationFailed(
                "no open transaction".to_string(),
            )),
        }
    }

    fn staged(&self) -> Option<&ModelSnapshot> {
        self.txn.as_ref().map(|txn| &txn.staged)
    }

    fn level_exists(&self, uid: &UID) -> bool {
        self.model.levels.iter().any(|lv| lv.uid == *uid)
    }

    fn wall_exists(&self, uid: &UID) -> bool {
        self.staged()
            .map(|m| m.walls.iter().any(|w| w.uid == *uid))
            .unwrap_or(false)
    }

    fn element_exists(&self, uid: &UID) -> bool {
        self.staged()
            .map(|m| {
                m.walls.iter().any(|w| w.uid == *uid)
                    || m.openings.iter().any(|o| o.uid == *uid)
                    || m.roofs.iter().any(|r| r.uid == *uid)
            })
            .unwrap_or(false)
    }

    /// Active either in the catalog or staged for activation in the open
    /// transaction.
    fn type_is_active(&self, uid: &UID) -> bool {
        let committed = self
            .opening_catalog
            .iter()
            .any(|t| t.uid == *uid && t.active);
        let staged = self
            .staged()
            .map(|m| m.activated_types.contains(uid))
            .unwrap_or(false);
        committed || staged
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildHost for MemoryHost {
    fn levels(&self) -> Vec<Level> {
        let mut levels = self.model.levels.clone();
        levels.sort_by(|a, b| {
            a.elevation
                .partial_cmp(&b.elevation)
                .unwrap_or(Ordering::Equal)
        });
        levels
    }

    fn opening_types(&self) -> Vec<OpeningType> {
        self.opening_catalog.clone()
    }

    fn roof_types(&self) -> Vec<RoofType> {
        self.roof_catalog.clone()
    }

    fn begin(&mut self, name: &str) -> Result<(), BuildError> {
        if self.txn.is_some() {
            return Err(BuildError::HostOperationFailed(
                "transaction already open".to_string(),
            ));
        }
        self.txn = Some(Txn {
            name: name.to_string(),
            staged: self.model.clone(),
        });
        Ok(())
    }

    fn commit(&mut self) -> Result<(), BuildError> {
        let txn = self.txn.take().ok_or_else(|| {
            BuildError::HostOperationFailed("no open transaction".to_string())
        })?;
        for uid in &txn.staged.activated_types {
            if let Some(t) = self.opening_catalog.iter_mut().find(|t| t.uid == *uid) {
                t.active = true;
            }
        }
        self.model = txn.staged;
        self.history.push(txn.name);
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), BuildError> {
        if self.txn.take().is_none() {
            return Err(BuildError::HostOperationFailed(
                "no open transaction".to_string(),
            ));
        }
        Ok(())
    }

    fn activate_type(&mut self, opening_type: &UID) -> Result<(), BuildError> {
        if !self
            .opening_catalog
            .iter()
            .any(|t| t.uid == *opening_type)
        {
            return Err(BuildError::HostOperationFailed(format!(
                "unknown opening type {opening_type}"
            )));
        }
        let already_active = self.type_is_active(opening_type);
        let uid = opening_type.clone();
        let staged = self.staged_mut()?;
        if !already_active {
            staged.activated_types.push(uid);
        }
        Ok(())
    }

    fn create_wall(
        &mut self,
        segment: &WallSegment,
        base_level: &UID,
        top_level: &UID,
    ) -> Result<Wall, BuildError> {
        if !self.level_exists(base_level) || !self.level_exists(top_level) {
            return Err(BuildError::HostOperationFailed(
                "wall references an unknown level".to_string(),
            ));
        }
        let wall = Wall {
            uid: UID::new(),
            segment: *segment,
            base_level: base_level.clone(),
            top_level: top_level.clone(),
            width: self.wall_width,
        };
        let staged = self.staged_mut()?;
        staged.walls.push(wall.clone());
        staged.parameters.push(ParamRecord {
            element: wall.uid.clone(),
            key: ParamKey::TopConstraint,
            value: ParamValue::Element(wall.top_level.clone()),
        });
        Ok(wall)
    }

    fn place_opening(
        &mut self,
        kind: OpeningKind,
        opening_type: &UID,
        wall: &UID,
        level: &UID,
        location: &Point,
    ) -> Result<UID, BuildError> {
        if !self.type_is_active(opening_type) {
            return Err(BuildError::HostOperationFailed(format!(
                "opening type {opening_type} is not active"
            )));
        }
        if !self.wall_exists(wall) {
            return Err(BuildError::HostOperationFailed(format!(
                "unknown host wall {wall}"
            )));
        }
        if !self.level_exists(level) {
            return Err(BuildError::HostOperationFailed(
                "opening references an unknown level".to_string(),
            ));
        }
        let record = OpeningRecord {
            uid: UID::new(),
            kind,
            opening_type: opening_type.clone(),
            wall: wall.clone(),
            level: level.clone(),
            location: *location,
        };
        let uid = record.uid.clone();
        self.staged_mut()?.openings.push(record);
        Ok(uid)
    }

    fn create_footprint_roof(
        &mut self,
        profile: &FlatOffsetProfile,
        level: &UID,
        roof_type: &UID,
    ) -> Result<(UID, usize), BuildError> {
        self.check_roof_refs(level, roof_type)?;
        let slope_edges = profile.edges.len();
        let record = RoofRecord {
            uid: UID::new(),
            roof_type: roof_type.clone(),
            level: level.clone(),
            profile: RoofProfile::Flat(profile.clone()),
            slope_edges,
        };
        let uid = record.uid.clone();
        self.staged_mut()?.roofs.push(record);
        Ok((uid, slope_edges))
    }

    fn create_extrusion_roof(
        &mut self,
        profile: &RidgeProfile,
        level: &UID,
        roof_type: &UID,
    ) -> Result<UID, BuildError> {
        self.check_roof_refs(level, roof_type)?;
        let record = RoofRecord {
            uid: UID::new(),
            roof_type: roof_type.clone(),
            level: level.clone(),
            profile: RoofProfile::Ridge(profile.clone()),
            slope_edges: 0,
        };
        let uid = record.uid.clone();
        self.staged_mut()?.roofs.push(record);
        Ok(uid)
    }

    fn set_parameter(
        &mut self,
        element: &UID,
        key: ParamKey,
        value: ParamValue,
    ) -> Result<(), BuildError> {
        if !self.element_exists(element) {
            return Err(BuildError::HostOperationFailed(format!(
                "unknown element {element}"
            )));
        }
        self.staged_mut()?.parameters.push(ParamRecord {
            element: element.clone(),
            key,
            value,
        });
        Ok(())
    }
}

impl MemoryHost {
    fn check_roof_refs(&self, level: &UID, roof_type: &UID) -> Result<(), BuildError> {
        if !self.level_exists(level) {
            return Err(BuildError::HostOperationFailed(
                "roof references an unknown level".to_string(),
            ));
        }
        if !self.roof_catalog.iter().any(|t| t.uid == *roof_type) {
            return Err(BuildError::HostOperationFailed(format!(
                "unknown roof type {roof_type}"
            )));
        }
        Ok(())
    }
}
