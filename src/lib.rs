pub mod build;
pub mod error;
pub mod geom;
pub mod host;
pub mod io;
pub mod model;
pub mod opening;
pub mod roof;
pub mod uid;
pub mod units;

// Prelude
pub use build::{BuildConfig, BuildOrchestrator, BuildReport};
pub use error::{BuildError, BuildFailed, BuildStage};
pub use geom::footprint::{Footprint, WallSegment};
pub use geom::point::Point;
pub use geom::vector::Vector;
pub use host::BuildHost;
pub use host::memory::{MemoryHost, ModelSnapshot};
pub use model::{Level, OpeningKind, OpeningSpec, OpeningType, RoofType, Wall};
pub use roof::{RoofProfile, RoofStyle};
pub use uid::UID;
pub use units::{LengthUnit, to_internal};
