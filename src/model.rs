//! Domain records exchanged between the planners and the build host.
//!
//! Everything here is host-agnostic data. Elements that exist inside a host
//! model (levels, walls, placed openings) carry a [`UID`]; catalog entries
//! (opening and roof types) carry one too so parameters can reference them.

use crate::geom::footprint::WallSegment;
use crate::uid::UID;
use serde::{Deserialize, Serialize};

/// A named horizontal datum at an absolute elevation (m).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub uid: UID,
    pub name: String,
    pub elevation: f64,
}

impl Level {
    pub fn new(name: &str, elevation: f64) -> Self {
        Self {
            uid: UID::new(),
            name: name.to_string(),
            elevation,
        }
    }
}

/// Find a level by exact name match.
pub fn level_by_name<'a>(levels: &'a [Level], name: &str) -> Option<&'a Level> {
    levels.iter().find(|lv| lv.name == name)
}

/// A wall created in the host: a segment bound to two levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub uid: UID,
    pub segment: WallSegment,
    pub base_level: UID,
    pub top_level: UID,
    /// Wall assembly width (m).
    pub width: f64,
}

/// Kind of hosted opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpeningKind {
    Door,
    Window,
}

/// What the caller asks for: an opening selected by family and type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningSpec {
    pub kind: OpeningKind,
    pub family: String,
    pub type_name: String,
    /// Height of the bottom edge above the base level (m). `None` means
    /// host-side default, reported as 0.
    pub sill_height: Option<f64>,
}

impl OpeningSpec {
    pub fn door(family: &str, type_name: &str) -> Self {
        Self {
            kind: OpeningKind::Door,
            family: family.to_string(),
            type_name: type_name.to_string(),
            sill_height: None,
        }
    }

    pub fn window(family: &str, type_name: &str, sill_height: f64) -> Self {
        Self {
            kind: OpeningKind::Window,
            family: family.to_string(),
            type_name: type_name.to_string(),
            sill_height: Some(sill_height),
        }
    }

    /// Effective sill height (m).
    pub fn sill(&self) -> f64 {
        self.sill_height.unwrap_or(0.0)
    }
}

/// A catalog entry for a door or window type known to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningType {
    pub uid: UID,
    pub kind: OpeningKind,
    pub family: String,
    pub type_name: String,
    /// Rough-opening width (m) used for clearance checks.
    pub nominal_width: f64,
    /// Whether the type is loaded and ready for placement.
    pub active: bool,
}

impl OpeningType {
    pub fn door(family: &str, type_name: &str, nominal_width: f64) -> Self {
        Self::with_kind(OpeningKind::Door, family, type_name, nominal_width)
    }

    pub fn window(family: &str, type_name: &str, nominal_width: f64) -> Self {
        Self::with_kind(OpeningKind::Window, family, type_name, nominal_width)
    }

    fn with_kind(kind: OpeningKind, family: &str, type_name: &str, nominal_width: f64) -> Self {
        Self {
            uid: UID::new(),
            kind,
            family: family.to_string(),
            type_name: type_name.to_string(),
            nominal_width,
            active: false,
        }
    }

    /// True if this entry answers the given family/type name pair.
    pub fn matches(&self, family: &str, type_name: &str) -> bool {
        self.family == family && self.type_name == type_name
    }
}

/// A catalog entry for a roof assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofType {
    pub uid: UID,
    pub family: String,
    pub type_name: String,
    /// Assembly thickness (m), added to the top level elevation when the
    /// roof profile is planned.
    pub thickness: f64,
}

impl RoofType {
    pub fn new(family: &str, type_name: &str, thickness: f64) -> Self {
        Self {
            uid: UID::new(),
            family: family.to_string(),
            type_name: type_name.to_string(),
            thickness,
        }
    }

    pub fn matches(&self, family: &str, type_name: &str) -> bool {
        self.family == family && self.type_name == type_name
    }
}

/// Keys of element parameters the build sequence writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKey {
    /// Sill height of a hosted opening.
    SillHeight,
    /// Level constraining the top of a wall.
    TopConstraint,
}

/// Values of element parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    /// A length (m).
    Length(f64),
    /// A reference to another element.
    Element(UID),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_by_name_is_exact() {
        let levels = vec![Level::new("Level 1", 0.0), Level::new("Level 2", 3.0)];
        assert_eq!(level_by_name(&levels, "Level 2").map(|lv| lv.elevation), Some(3.0));
        assert!(level_by_name(&levels, "level 2").is_none());
        assert!(level_by_name(&levels, "Level").is_none());
    }

    #[test]
    fn test_opening_spec_sill_defaults_to_zero() {
        let door = OpeningSpec::door("M_Single-Flush", "0915 x 2032mm");
        assert_eq!(door.sill(), 0.0);
        let window = OpeningSpec::window("M_Window-Casement-Double", "1050 x 1350mm", 0.9);
        assert_eq!(window.sill(), 0.9);
    }

    #[test]
    fn test_opening_type_matches_pair() {
        let t = OpeningType::window("M_Window-Casement-Double", "1050 x 1350mm", 1.05);
        assert!(t.matches("M_Window-Casement-Double", "1050 x 1350mm"));
        assert!(!t.matches("M_Window-Casement-Double", "0915 x 1220mm"));
        assert!(!t.active);
    }
}
