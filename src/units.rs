//! Length unit conversion at the crate boundary.
//!
//! All geometry inside the crate is expressed in internal units (meters).
//! External dimensions, typically given in millimeters, are converted once on
//! the way in. Negative or non-finite input is a caller contract violation and
//! is passed through unchecked.

use serde::{Deserialize, Serialize};

/// Linear length units accepted at the crate boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Millimeters,
    Centimeters,
    Meters,
}

/// Converts an external dimension to internal units (meters).
pub fn to_internal(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Millimeters => value / 1000.,
        LengthUnit::Centimeters => value / 100.,
        LengthUnit::Meters => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_internal() {
        assert_eq!(to_internal(10000., LengthUnit::Millimeters), 10.);
        assert_eq!(to_internal(900., LengthUnit::Millimeters), 0.9);
        assert_eq!(to_internal(250., LengthUnit::Centimeters), 2.5);
        assert_eq!(to_internal(3., LengthUnit::Meters), 3.);
    }
}
