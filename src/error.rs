//! Error kinds of the planning core.
//!
//! No local recovery anywhere: every failure aborts the current build and is
//! surfaced as a single terminal [`BuildFailed`] carrying the stage and cause.
//! The host's transaction rollback is the only recovery mechanism.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// States of one build run, in execution order.
///
/// In a [`BuildFailed`] the stage is the state the build was advancing to
/// when the failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildStage {
    Idle,
    LevelsResolved,
    FootprintPlanned,
    WallsCreated,
    OpeningsPlaced,
    RoofBuilt,
    Committed,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::Idle => "idle",
            BuildStage::LevelsResolved => "levels resolved",
            BuildStage::FootprintPlanned => "footprint planned",
            BuildStage::WallsCreated => "walls created",
            BuildStage::OpeningsPlaced => "openings placed",
            BuildStage::RoofBuilt => "roof built",
            BuildStage::Committed => "committed",
        };
        write!(f, "{name}")
    }
}

/// Failure kinds shared by the planners and the host boundary.
#[derive(Error, Debug)]
pub enum BuildError {
    /// A supplied dimension (or a derived one) makes no geometric sense.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// No level with the requested name in the host's level sequence.
    #[error("level not found: {0}")]
    LevelNotFound(String),

    /// No opening type with the requested family/type name pair.
    #[error("opening type not found: {family} / {type_name}")]
    TypeNotFound { family: String, type_name: String },

    /// No roof type with the requested family/type name pair.
    #[error("roof type not found: {family} / {type_name}")]
    RoofTypeNotFound { family: String, type_name: String },

    /// The wall collection does not satisfy a roof strategy's precondition.
    #[error("insufficient walls: expected {expected}, got {actual}")]
    InsufficientWalls { expected: usize, actual: usize },

    /// The wall segment is too short to host the opening.
    #[error("segment too short: {length:.3} m segment cannot host a {required:.3} m opening")]
    SegmentTooShort { length: f64, required: f64 },

    /// The host rejected or failed an operation.
    #[error("host operation failed: {0}")]
    HostOperationFailed(String),
}

/// Terminal outcome of an aborted build.
///
/// The whole sequence is all-or-nothing: by the time this error reaches the
/// caller the host transaction has been rolled back.
#[derive(Error, Debug)]
#[error("build failed at stage '{stage}': {source}")]
pub struct BuildFailed {
    pub stage: BuildStage,
    #[source]
    pub source: BuildError,
}

impl BuildFailed {
    pub(crate) fn at(stage: BuildStage) -> impl FnOnce(BuildError) -> Self {
        move |source| Self { stage, source }
    }
}
