//! Build configuration with defaults for a small two-level house.

use crate::model::OpeningSpec;
use crate::roof::RoofStyle;
use crate::units::{LengthUnit, to_internal};
use serde::{Deserialize, Serialize};

/// Parameters of one build run. All lengths are in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Footprint extent along x.
    pub width: f64,
    /// Footprint extent along y.
    pub depth: f64,
    /// Level the walls stand on.
    pub base_level: String,
    /// Level the wall tops are constrained to. The roof sits here too.
    pub top_level: String,
    /// Door placed on the first (front) wall.
    pub door: OpeningSpec,
    /// Window placed on each remaining wall.
    pub window: OpeningSpec,
    pub roof_family: String,
    pub roof_type_name: String,
    pub roof_style: RoofStyle,
    /// Edge slope for footprint roofs.
    pub slope_angle: f64,
    /// Apex rise above the eaves for extrusion roofs.
    pub ridge_rise: f64,
    /// Name of the host transaction wrapping the whole build.
    pub transaction_name: String,
}

impl BuildConfig {
    pub fn new() -> Self {
        Self {
            width: to_internal(10_000.0, LengthUnit::Millimeters),
            depth: to_internal(5_000.0, LengthUnit::Millimeters),
            base_level: "Level 1".to_string(),
            top_level: "Level 2".to_string(),
            door: OpeningSpec::door("M_Single-Flush", "0915 x 2032mm"),
            window: OpeningSpec::window(
                "M_Window-Casement-Double",
                "1050 x 1350mm",
                to_internal(900.0, LengthUnit::Millimeters),
            ),
            roof_family: "Basic Roof".to_string(),
            roof_type_name: "Cold Roof - Concrete".to_string(),
            roof_style: RoofStyle::RidgeExtrusion,
            slope_angle: 0.5,
            ridge_rise: to_internal(500.0, LengthUnit::Millimeters),
            transaction_name: "Create House".to_string(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::IsClose;
    use crate::model::OpeningKind;

    #[test]
    fn test_default_config_is_metric_house() {
        let cfg = BuildConfig::new();
        assert!(cfg.width.is_close(10.0));
        assert!(cfg.depth.is_close(5.0));
        assert_eq!(cfg.door.kind, OpeningKind::Door);
        assert_eq!(cfg.door.sill_height, None);
        assert!(cfg.window.sill().is_close(0.9));
        assert_eq!(cfg.roof_style, RoofStyle::RidgeExtrusion);
        assert_eq!(cfg.transaction_name, "Create House");
    }
}
