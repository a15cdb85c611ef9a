//! Small numeric helpers shared by the acceleration models.

use nalgebra::Vector3;

/// Returns `1 / |r|³` computed as `(r·r)^(-3/2)`.
///
/// Raising the squared norm avoids a separate square root and cube. A zero
/// vector yields `+∞`.
#[inline]
#[must_use]
pub fn inverse_cube_distance(relative_position: &Vector3<f64>) -> f64 {
    relative_position.norm_squared().powf(-1.5)
}

/// Returns `true` if every component is finite.
#[inline]
#[must_use]
pub fn is_finite(vector: &Vector3<f64>) -> bool {
    vector.iter().all(|component| component.is_finite())
}

/// Returns `|actual − expected| / |expected|`, or the absolute difference
/// when `expected` is the zero vector.
#[must_use]
pub fn relative_difference(actual: &Vector3<f64>, expected: &Vector3<f64>) -> f64 {
    let difference = (actual - expected).norm();
    let scale = expected.norm();
    if scale > 0.0 {
        difference / scale
    } else {
        difference
    }
}
