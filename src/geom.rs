pub mod footprint;
pub mod point;
pub mod vector;

/// Geometric precision
pub(crate) const EPS: f64 = 1e-13;

/// Closeness comparison for scalars, consistent with `Point` and `Vector`.
pub trait IsClose {
    fn is_close(&self, other: f64) -> bool;
}

impl IsClose for f64 {
    fn is_close(&self, other: f64) -> bool {
        (self - other).abs() < EPS
    }
}
