//! Point-mass (central) gravity.
//!
//! The acceleration of a subject body due to a source body treated as a point
//! mass is
//!
//! ```text
//! a = −μ ⋅ Δr / |Δr|³,   Δr = r_subject − r_source
//! ```
//!
//! # Preconditions
//!
//! The subject and source must not coincide. With `Δr = 0` every function in
//! this module divides by zero and returns non-finite components; this is not
//! checked at runtime.

use nalgebra::Vector3;
use orrery_core::{
    AccelerationModel, ModelError, Provider, constant, units::gravitational_parameter_from_mass,
    vector::inverse_cube_distance,
};
use uom::si::f64::Mass;

/// Computes the gravitational acceleration on a subject due to a point-mass
/// source with gravitational parameter `gravitational_parameter` (m³/s²).
#[inline]
#[must_use]
pub fn compute_gravitational_acceleration(
    subject_position: &Vector3<f64>,
    gravitational_parameter: f64,
    source_position: &Vector3<f64>,
) -> Vector3<f64> {
    let relative_position = subject_position - source_position;
    -gravitational_parameter * inverse_cube_distance(&relative_position) * relative_position
}

/// Computes the gravitational acceleration on a subject due to a point-mass
/// source located at the origin.
#[inline]
#[must_use]
pub fn compute_gravitational_acceleration_about_origin(
    subject_position: &Vector3<f64>,
    gravitational_parameter: f64,
) -> Vector3<f64> {
    compute_gravitational_acceleration(subject_position, gravitational_parameter, &Vector3::zeros())
}

/// Computes the gravitational acceleration from the source's mass (kg) and
/// the universal gravitational constant (m³/kg·s²).
#[must_use]
pub fn compute_gravitational_acceleration_from_mass(
    universal_gravitational_constant: f64,
    subject_position: &Vector3<f64>,
    source_mass: f64,
    source_position: &Vector3<f64>,
) -> Vector3<f64> {
    compute_gravitational_acceleration(
        subject_position,
        universal_gravitational_constant * source_mass,
        source_position,
    )
}

/// Computes the gravitational force (N) on a subject of mass
/// `subject_mass` (kg).
#[must_use]
pub fn compute_gravitational_force(
    subject_mass: f64,
    subject_position: &Vector3<f64>,
    gravitational_parameter: f64,
    source_position: &Vector3<f64>,
) -> Vector3<f64> {
    subject_mass
        * compute_gravitational_acceleration(
            subject_position,
            gravitational_parameter,
            source_position,
        )
}

/// Computes the gravitational force (N) between two point masses.
#[must_use]
pub fn compute_gravitational_force_from_mass(
    universal_gravitational_constant: f64,
    subject_mass: f64,
    subject_position: &Vector3<f64>,
    source_mass: f64,
    source_position: &Vector3<f64>,
) -> Vector3<f64> {
    compute_gravitational_force(
        subject_mass,
        subject_position,
        universal_gravitational_constant * source_mass,
        source_position,
    )
}

/// Values cached by [`CentralGravity::update_members`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct Members {
    subject_position: Vector3<f64>,
    source_position: Vector3<f64>,
    gravitational_parameter: f64,
    acceleration: Vector3<f64>,
}

/// Central gravity acceleration model.
///
/// Binds providers for the subject position, the source's gravitational
/// parameter, and the source position. [`update_members`](Self::update_members)
/// evaluates them once and caches the acceleration.
#[derive(Clone)]
pub struct CentralGravity {
    subject_position: Provider<Vector3<f64>>,
    gravitational_parameter: Provider<f64>,
    source_position: Provider<Vector3<f64>>,
    members: Option<Members>,
}

impl CentralGravity {
    /// Creates a model from position and parameter providers.
    #[must_use]
    pub fn new(
        subject_position: Provider<Vector3<f64>>,
        gravitational_parameter: Provider<f64>,
        source_position: Provider<Vector3<f64>>,
    ) -> Self {
        Self {
            subject_position,
            gravitational_parameter,
            source_position,
            members: None,
        }
    }

    /// Creates a model whose source sits at the origin.
    #[must_use]
    pub fn about_origin(
        subject_position: Provider<Vector3<f64>>,
        gravitational_parameter: Provider<f64>,
    ) -> Self {
        Self::new(
            subject_position,
            gravitational_parameter,
            constant(Vector3::zeros()),
        )
    }

    /// Creates a model with a constant gravitational parameter (m³/s²).
    #[must_use]
    pub fn with_constant_parameter(
        subject_position: Provider<Vector3<f64>>,
        gravitational_parameter: f64,
        source_position: Provider<Vector3<f64>>,
    ) -> Self {
        Self::new(
            subject_position,
            constant(gravitational_parameter),
            source_position,
        )
    }

    /// Creates a model for a source of constant mass.
    #[must_use]
    pub fn from_mass(
        subject_position: Provider<Vector3<f64>>,
        source_mass: Mass,
        source_position: Provider<Vector3<f64>>,
    ) -> Self {
        let mu = gravitational_parameter_from_mass(source_mass).value;
        Self::with_constant_parameter(subject_position, mu, source_position)
    }

    /// Evaluates the providers at `time` and caches the acceleration.
    pub fn update_members(&mut self, time: f64) {
        let subject_position = (self.subject_position)(time);
        let source_position = (self.source_position)(time);
        let gravitational_parameter = (self.gravitational_parameter)(time);

        self.members = Some(Members {
            subject_position,
            source_position,
            gravitational_parameter,
            acceleration: compute_gravitational_acceleration(
                &subject_position,
                gravitational_parameter,
                &source_position,
            ),
        });
    }

    /// Returns the subject position cached by the last update.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotUpdated`] before the first update.
    pub fn subject_position(&self) -> Result<Vector3<f64>, ModelError> {
        self.members().map(|m| m.subject_position)
    }

    /// Returns the source position cached by the last update.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotUpdated`] before the first update.
    pub fn source_position(&self) -> Result<Vector3<f64>, ModelError> {
        self.members().map(|m| m.source_position)
    }

    /// Returns the gravitational parameter cached by the last update.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotUpdated`] before the first update.
    pub fn gravitational_parameter(&self) -> Result<f64, ModelError> {
        self.members().map(|m| m.gravitational_parameter)
    }

    /// Returns the provider of the source position.
    #[must_use]
    pub fn source_position_provider(&self) -> Provider<Vector3<f64>> {
        self.source_position.clone()
    }

    /// Returns the provider of the gravitational parameter.
    #[must_use]
    pub fn gravitational_parameter_provider(&self) -> Provider<f64> {
        self.gravitational_parameter.clone()
    }

    fn members(&self) -> Result<&Members, ModelError> {
        self.members
            .as_ref()
            .ok_or(ModelError::NotUpdated { model: "central gravity" })
    }
}

impl AccelerationModel for CentralGravity {
    fn update(&mut self, time: f64) -> Result<(), ModelError> {
        self.update_members(time);
        Ok(())
    }

    fn acceleration(&self) -> Result<Vector3<f64>, ModelError> {
        self.members().map(|m| m.acceleration)
    }

    fn name(&self) -> &'static str {
        "central gravity"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    use approx::assert_relative_eq;
    use orrery_core::units::UNIVERSAL_GRAVITATIONAL_CONSTANT;
    use uom::si::mass::kilogram;

    #[test]
    fn acceleration_points_toward_source() {
        let acceleration = compute_gravitational_acceleration(
            &Vector3::new(2.0, 0.0, 0.0),
            4.0,
            &Vector3::zeros(),
        );

        assert_relative_eq!(acceleration, Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn inverse_square_falloff() {
        let near =
            compute_gravitational_acceleration_about_origin(&Vector3::new(0.0, 1.0, 0.0), 1.0);
        let far =
            compute_gravitational_acceleration_about_origin(&Vector3::new(0.0, 2.0, 0.0), 1.0);

        assert_relative_eq!(near.norm() / far.norm(), 4.0);
    }

    #[test]
    fn offset_source_uses_relative_position() {
        let source = Vector3::new(1.0e7, -2.0e7, 5.0e6);
        let subject = source + Vector3::new(0.0, 0.0, 7.0e6);

        let acceleration = compute_gravitational_acceleration(&subject, 3.986e14, &source);

        assert_relative_eq!(
            acceleration,
            Vector3::new(0.0, 0.0, -3.986e14 / 4.9e13),
            max_relative = 1e-14
        );
    }

    #[test]
    fn mass_variants_match_parameter_variants() {
        let g = UNIVERSAL_GRAVITATIONAL_CONSTANT;
        let subject = Vector3::new(1.0, 2.0, 3.0);
        let source = Vector3::new(-1.0, 0.5, 0.0);

        let from_mass = compute_gravitational_acceleration_from_mass(g, &subject, 1.0e12, &source);
        let from_mu = compute_gravitational_acceleration(&subject, g * 1.0e12, &source);
        assert_eq!(from_mass, from_mu);

        let force = compute_gravitational_force_from_mass(g, 5.0, &subject, 1.0e12, &source);
        assert_relative_eq!(force, 5.0 * from_mu);
        assert_relative_eq!(
            compute_gravitational_force(5.0, &subject, g * 1.0e12, &source),
            force
        );
    }

    #[test]
    fn model_matches_free_function() {
        let subject = Vector3::new(7.0e6, -1.0e6, 2.0e5);
        let mut model = CentralGravity::about_origin(constant(subject), constant(3.986e14));

        model.update(0.0).expect("should update");

        assert_eq!(
            model.acceleration().unwrap(),
            compute_gravitational_acceleration_about_origin(&subject, 3.986e14)
        );
        assert_eq!(model.source_position().unwrap(), Vector3::zeros());
        assert_eq!(model.gravitational_parameter().unwrap(), 3.986e14);
    }

    #[test]
    fn read_before_update_is_rejected() {
        let model =
            CentralGravity::about_origin(constant(Vector3::new(1.0, 0.0, 0.0)), constant(1.0));

        assert!(matches!(
            model.acceleration(),
            Err(ModelError::NotUpdated { .. })
        ));
    }

    #[test]
    fn cache_is_refreshed_only_on_update() {
        // Subject moves along x with unit speed.
        let subject: Provider<Vector3<f64>> = Arc::new(|t: f64| Vector3::new(1.0 + t, 0.0, 0.0));
        let mut model = CentralGravity::about_origin(subject, constant(1.0));

        model.update(0.0).unwrap();
        let at_start = model.acceleration().unwrap();
        assert_relative_eq!(at_start, Vector3::new(-1.0, 0.0, 0.0));

        model.update(1.0).unwrap();
        assert_relative_eq!(model.acceleration().unwrap(), Vector3::new(-0.25, 0.0, 0.0));
        assert_relative_eq!(model.subject_position().unwrap(), Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn time_varying_parameter() {
        let mu: Provider<f64> = Arc::new(|t: f64| 1.0 + t);
        let mut model = CentralGravity::about_origin(constant(Vector3::new(1.0, 0.0, 0.0)), mu);

        model.update(2.0).unwrap();

        assert_relative_eq!(model.acceleration().unwrap(), Vector3::new(-3.0, 0.0, 0.0));
    }

    #[test]
    fn from_mass_uses_gravitational_constant() {
        let mut model = CentralGravity::from_mass(
            constant(Vector3::new(1.0, 0.0, 0.0)),
            Mass::new::<kilogram>(1.0e10),
            constant(Vector3::zeros()),
        );

        model.update(0.0).unwrap();

        assert_relative_eq!(
            model.acceleration().unwrap(),
            Vector3::new(-UNIVERSAL_GRAVITATIONAL_CONSTANT * 1.0e10, 0.0, 0.0),
            max_relative = 1e-12
        );
    }
}
