//! The staged build sequence.
//!
//! One run wraps everything in a single host transaction: resolve levels,
//! plan the footprint, create walls, place the door and windows, build the
//! roof, commit. The first error aborts the run, rolls the transaction back
//! and is reported with the stage that was being advanced to. A failed build
//! leaves the host exactly as it was.

use crate::build::config::BuildConfig;
use crate::error::{BuildError, BuildFailed, BuildStage};
use crate::geom::footprint::{Footprint, WallSegment};
use crate::host::BuildHost;
use crate::model::{Level, OpeningSpec, ParamKey, ParamValue, Wall, level_by_name};
use crate::opening;
use crate::roof::{self, RoofStyle};
use crate::uid::UID;
use serde::Serialize;
use std::fmt;

/// Element ids of one completed build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub walls: Vec<UID>,
    pub door: UID,
    pub windows: Vec<UID>,
    pub roof: UID,
    /// Sloped boundary edges of the roof (footprint roofs only).
    pub slope_edges: usize,
    pub stage: BuildStage,
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} walls, 1 door, {} windows, 1 roof ({})",
            self.walls.len(),
            self.windows.len(),
            self.stage
        )
    }
}

/// Drives a [`BuildHost`] through the whole build sequence.
pub struct BuildOrchestrator {
    config: BuildConfig,
}

impl BuildOrchestrator {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run the full sequence against a host. All-or-nothing: on any failure
    /// the transaction is rolled back and the first error is returned.
    pub fn run<H: BuildHost>(&self, host: &mut H) -> Result<BuildReport, BuildFailed> {
        host.begin(&self.config.transaction_name)
            .map_err(BuildFailed::at(BuildStage::Idle))?;
        match self.run_stages(host) {
            Ok(report) => match host.commit() {
                Ok(()) => Ok(report),
                Err(source) => {
                    let _ = host.rollback();
                    Err(BuildFailed {
                        stage: BuildStage::Committed,
                        source,
                    })
                }
            },
            Err(failure) => {
                // The rollback outcome never masks the original failure.
                let _ = host.rollback();
                Err(failure)
            }
        }
    }

    fn run_stages<H: BuildHost>(&self, host: &mut H) -> Result<BuildReport, BuildFailed> {
        let (base, top) = self.resolve_levels(host)?;
        let footprint = Footprint::rectangle(self.config.width, self.config.depth)
            .map_err(BuildFailed::at(BuildStage::FootprintPlanned))?;
        let walls = self.create_walls(host, &footprint.segments(), &base, &top)?;
        let (door, windows) = self.place_openings(host, &walls, &base)?;
        let (roof, slope_edges) = self.build_roof(host, &footprint, &walls, &top)?;
        Ok(BuildReport {
            walls: walls.into_iter().map(|w| w.uid).collect(),
            door,
            windows,
            roof,
            slope_edges,
            stage: BuildStage::Committed,
        })
    }

    fn resolve_levels<H: BuildHost>(&self, host: &H) -> Result<(Level, Level), BuildFailed> {
        let stage = BuildStage::LevelsResolved;
        let levels = host.levels();
        let base = level_by_name(&levels, &self.config.base_level)
            .cloned()
            .ok_or_else(|| BuildError::LevelNotFound(self.config.base_level.clone()))
            .map_err(BuildFailed::at(stage))?;
        let top = level_by_name(&levels, &self.config.top_level)
            .cloned()
            .ok_or_else(|| BuildError::LevelNotFound(self.config.top_level.clone()))
            .map_err(BuildFailed::at(stage))?;
        if top.elevation <= base.elevation {
            return Err(BuildFailed {
                stage,
                source: BuildError::InvalidDimension(format!(
                    "top level '{}' at {} m is not above base level '{}' at {} m",
                    top.name, top.elevation, base.name, base.elevation
                )),
            });
        }
        Ok((base, top))
    }

    fn create_walls<H: BuildHost>(
        &self,
        host: &mut H,
        segments: &[WallSegment],
        base: &Level,
        top: &Level,
    ) -> Result<Vec<Wall>, BuildFailed> {
        let mut walls = Vec::with_capacity(segments.len());
        for segment in segments {
            let wall = host
                .create_wall(segment, &base.uid, &top.uid)
                .map_err(BuildFailed::at(BuildStage::WallsCreated))?;
            walls.push(wall);
        }
        Ok(walls)
    }

    /// Door on the front wall, a window on every other wall. The footprint
    /// guarantees at least four segments, so the indexing is safe.
    fn place_openings<H: BuildHost>(
        &self,
        host: &mut H,
        walls: &[Wall],
        base: &Level,
    ) -> Result<(UID, Vec<UID>), BuildFailed> {
        let stage = BuildStage::OpeningsPlaced;
        let door = self
            .place_one(host, &self.config.door, &walls[0], &base.uid)
            .map_err(BuildFailed::at(stage))?;
        let mut windows = Vec::with_capacity(walls.len() - 1);
        for wall in walls.iter().skip(1) {
            let uid = self
                .place_one(host, &self.config.window, wall, &base.uid)
                .map_err(BuildFailed::at(stage))?;
            windows.push(uid);
        }
        Ok((door, windows))
    }

    /// Select, check clearance, activate, place, then write the sill
    /// parameter when the spec carries one.
    fn place_one<H: BuildHost>(
        &self,
        host: &mut H,
        spec: &OpeningSpec,
        wall: &Wall,
        level: &UID,
    ) -> Result<UID, BuildError> {
        let catalog = host.opening_types();
        let opening_type = opening::select_type(&catalog, spec)?;
        opening::check_clearance(&wall.segment, opening_type)?;
        host.activate_type(&opening_type.uid)?;
        let location = opening::placement_point(&wall.segment, spec.sill());
        let uid = host.place_opening(spec.kind, &opening_type.uid, &wall.uid, level, &location)?;
        if let Some(sill) = spec.sill_height {
            host.set_parameter(&uid, ParamKey::SillHeight, ParamValue::Length(sill))?;
        }
        Ok(uid)
    }

    /// The roof geometry is derived from the created walls, not the planned
    /// footprint: the overhang is half the width the host gave the walls.
    fn build_roof<H: BuildHost>(
        &self,
        host: &mut H,
        footprint: &Footprint,
        walls: &[Wall],
        top: &Level,
    ) -> Result<(UID, usize), BuildFailed> {
        let stage = BuildStage::RoofBuilt;
        let catalog = host.roof_types();
        let roof_type =
            roof::select_type(&catalog, &self.config.roof_family, &self.config.roof_type_name)
                .map_err(BuildFailed::at(stage))?;
        let dt = walls[0].width / 2.0;
        let segments: Vec<WallSegment> = walls.iter().map(|w| w.segment).collect();
        match self.config.roof_style {
            RoofStyle::FlatOffset => {
                let profile =
                    roof::flat_offset_profile(footprint, &segments, dt, self.config.slope_angle)
                        .map_err(BuildFailed::at(stage))?;
                host.create_footprint_roof(&profile, &top.uid, &roof_type.uid)
                    .map_err(BuildFailed::at(stage))
            }
            RoofStyle::RidgeExtrusion => {
                let base_z = top.elevation + roof_type.thickness;
                let profile = roof::ridge_profile(&segments, dt, base_z, self.config.ridge_rise)
                    .map_err(BuildFailed::at(stage))?;
                let uid = host
                    .create_extrusion_roof(&profile, &top.uid, &roof_type.uid)
                    .map_err(BuildFailed::at(stage))?;
                Ok((uid, 0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;
    use crate::model::{OpeningType, RoofType};

    fn sample_host() -> MemoryHost {
        MemoryHost::new()
            .with_level("Level 1", 0.0)
            .with_level("Level 2", 3.0)
            .with_opening_type(OpeningType::door("M_Single-Flush", "0915 x 2032mm", 0.915))
            .with_opening_type(OpeningType::window(
                "M_Window-Casement-Double",
                "1050 x 1350mm",
                1.05,
            ))
            .with_roof_type(RoofType::new("Basic Roof", "Cold Roof - Concrete", 0.2))
    }

    #[test]
    fn test_default_build_commits_one_transaction() {
        let mut host = sample_host();
        let report = BuildOrchestrator::new(BuildConfig::new())
            .run(&mut host)
            .unwrap();

        assert_eq!(report.walls.len(), 4);
        assert_eq!(report.windows.len(), 3);
        assert_eq!(report.stage, BuildStage::Committed);
        assert_eq!(host.transactions(), ["Create House".to_string()]);
        assert!(!host.transaction_open());
        assert_eq!(host.snapshot().walls.len(), 4);
        assert_eq!(host.snapshot().openings.len(), 4);
        assert_eq!(host.snapshot().roofs.len(), 1);
    }

    #[test]
    fn test_busy_host_fails_at_idle() {
        let mut host = sample_host();
        host.begin("already busy").unwrap();
        let err = BuildOrchestrator::new(BuildConfig::new())
            .run(&mut host)
            .unwrap_err();
        assert_eq!(err.stage, BuildStage::Idle);
    }

    #[test]
    fn test_missing_roof_type_rolls_everything_back() {
        let mut host = sample_host();
        let mut config = BuildConfig::new();
        config.roof_type_name = "Warm Roof - Timber".to_string();

        let err = BuildOrchestrator::new(config).run(&mut host).unwrap_err();
        assert_eq!(err.stage, BuildStage::RoofBuilt);
        assert!(matches!(err.source, BuildError::RoofTypeNotFound { .. }));

        // Walls and openings from the failed run are gone.
        assert!(host.snapshot().walls.is_empty());
        assert!(host.snapshot().openings.is_empty());
        assert!(host.transactions().is_empty());
        assert!(!host.transaction_open());
    }

    #[test]
    fn test_inverted_levels_fail_before_any_mutation() {
        let mut host = MemoryHost::new()
            .with_level("Level 1", 3.0)
            .with_level("Level 2", 0.0);
        let err = BuildOrchestrator::new(BuildConfig::new())
            .run(&mut host)
            .unwrap_err();
        assert_eq!(err.stage, BuildStage::LevelsResolved);
        assert!(matches!(err.source, BuildError::InvalidDimension(_)));
    }
}
