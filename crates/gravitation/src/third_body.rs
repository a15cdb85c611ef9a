//! Third-body perturbations in a body-centred frame.
//!
//! Propagation relative to a central body happens in a non-inertial frame, so
//! only the difference between a third body's pull on the subject and its
//! pull on the central body perturbs the subject's relative motion:
//!
//! ```text
//! a_p = a(subject ← perturber) − a(central ← perturber)
//! ```

use std::sync::Arc;

use nalgebra::Vector3;
use orrery_core::{AccelerationModel, ModelError, Provider, constant};

use crate::central::{CentralGravity, compute_gravitational_acceleration};

/// Computes the perturbing acceleration of a third body on a subject whose
/// motion is expressed relative to a central body.
///
/// By convention, a perturber located exactly at the subject exerts no
/// perturbation and the zero vector is returned. The perturber must not
/// coincide with the central body.
#[must_use]
pub fn compute_third_body_perturbing_acceleration(
    perturber_gravitational_parameter: f64,
    perturber_position: &Vector3<f64>,
    subject_position: &Vector3<f64>,
    central_body_position: &Vector3<f64>,
) -> Vector3<f64> {
    if perturber_position == subject_position {
        log::warn!("third-body perturber coincides with the subject; returning zero perturbation");
        return Vector3::zeros();
    }

    compute_gravitational_acceleration(
        subject_position,
        perturber_gravitational_parameter,
        perturber_position,
    ) - compute_gravitational_acceleration(
        central_body_position,
        perturber_gravitational_parameter,
        perturber_position,
    )
}

/// Computes the perturbing acceleration with the central body at the origin.
#[must_use]
pub fn compute_third_body_perturbing_acceleration_about_origin(
    perturber_gravitational_parameter: f64,
    perturber_position: &Vector3<f64>,
    subject_position: &Vector3<f64>,
) -> Vector3<f64> {
    compute_third_body_perturbing_acceleration(
        perturber_gravitational_parameter,
        perturber_position,
        subject_position,
        &Vector3::zeros(),
    )
}

/// Third-body perturbation model built from two central gravity models.
///
/// The direct model gives the perturber's pull on the subject; the central
/// body model gives its pull on the central body. Both should share the
/// perturber's position and gravitational parameter providers.
#[derive(Clone)]
pub struct ThirdBodyGravity {
    direct: CentralGravity,
    central_body: CentralGravity,
    perturbation: Option<Vector3<f64>>,
}

impl ThirdBodyGravity {
    /// Creates a model from the direct and central body models.
    ///
    /// Logs a warning if the models read the perturber from different
    /// providers.
    #[must_use]
    pub fn from_models(direct: CentralGravity, central_body: CentralGravity) -> Self {
        let model = Self {
            direct,
            central_body,
            perturbation: None,
        };
        if !model.shares_perturber_providers() {
            log::warn!("third-body models read the perturber from different providers");
        }
        model
    }

    /// Creates a model from providers, sharing the perturber's providers
    /// between the two underlying central gravity models.
    #[must_use]
    pub fn new(
        subject_position: Provider<Vector3<f64>>,
        central_body_position: Provider<Vector3<f64>>,
        perturber_position: Provider<Vector3<f64>>,
        perturber_gravitational_parameter: Provider<f64>,
    ) -> Self {
        let direct = CentralGravity::new(
            subject_position,
            perturber_gravitational_parameter.clone(),
            perturber_position.clone(),
        );
        let central_body = CentralGravity::new(
            central_body_position,
            perturber_gravitational_parameter,
            perturber_position,
        );
        Self::from_models(direct, central_body)
    }

    /// Creates a model whose central body sits at the origin.
    #[must_use]
    pub fn about_origin(
        subject_position: Provider<Vector3<f64>>,
        perturber_position: Provider<Vector3<f64>>,
        perturber_gravitational_parameter: Provider<f64>,
    ) -> Self {
        Self::new(
            subject_position,
            constant(Vector3::zeros()),
            perturber_position,
            perturber_gravitational_parameter,
        )
    }

    /// Whether both underlying models read the perturber's position and
    /// gravitational parameter from the same providers.
    #[must_use]
    pub fn shares_perturber_providers(&self) -> bool {
        Arc::ptr_eq(
            &self.direct.source_position_provider(),
            &self.central_body.source_position_provider(),
        ) && Arc::ptr_eq(
            &self.direct.gravitational_parameter_provider(),
            &self.central_body.gravitational_parameter_provider(),
        )
    }

    /// Refreshes both underlying models and caches their difference.
    pub fn update_members(&mut self, time: f64) -> Result<(), ModelError> {
        self.perturbation = None;
        self.direct.update_members(time);
        self.central_body.update_members(time);

        let perturbation =
            if self.direct.subject_position()? == self.direct.source_position()? {
                Vector3::zeros()
            } else {
                self.direct.acceleration()? - self.central_body.acceleration()?
            };
        self.perturbation = Some(perturbation);
        Ok(())
    }

    /// Returns the model of the perturber's pull on the subject.
    #[must_use]
    pub fn direct_model(&self) -> &CentralGravity {
        &self.direct
    }

    /// Returns the model of the perturber's pull on the central body.
    #[must_use]
    pub fn central_body_model(&self) -> &CentralGravity {
        &self.central_body
    }
}

impl AccelerationModel for ThirdBodyGravity {
    fn update(&mut self, time: f64) -> Result<(), ModelError> {
        self.update_members(time)
    }

    fn acceleration(&self) -> Result<Vector3<f64>, ModelError> {
        self.perturbation
            .ok_or(ModelError::NotUpdated { model: self.name() })
    }

    fn name(&self) -> &'static str {
        "third-body gravity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const TOLERANCE: f64 = 1e-15;

    /// Subject at (4, 0, 0), central body at the origin.
    fn subject() -> Vector3<f64> {
        Vector3::new(4.0, 0.0, 0.0)
    }

    /// (perturber position, gravitational parameter, expected perturbation).
    fn simple_cases() -> Vec<(Vector3<f64>, f64, Vector3<f64>)> {
        vec![
            // Perturber at the subject.
            (subject(), 1.0, Vector3::zeros()),
            // Inner perturber.
            (
                Vector3::new(3.0, 0.0, 0.0),
                1.0,
                Vector3::new(-1.111_111_111_111_111_1, 0.0, 0.0),
            ),
            // Outer perturber.
            (Vector3::new(5.0, 0.0, 0.0), 1.0, Vector3::new(0.96, 0.0, 0.0)),
            // Inner perturber off-axis.
            (
                Vector3::new(0.0, 3.0, 0.0),
                1.0,
                Vector3::new(-0.032, -0.087_111_111_111_111_11, 0.0),
            ),
            // Inner perturber on the far side.
            (
                Vector3::new(-3.0, 0.0, 0.0),
                1.0,
                Vector3::new(0.090_702_947_845_804_988_662, 0.0, 0.0),
            ),
            // Heavier outer perturber.
            (Vector3::new(5.0, 0.0, 0.0), 2.0, Vector3::new(1.92, 0.0, 0.0)),
        ]
    }

    #[test]
    fn simple_fixtures() {
        for (perturber, mu, expected) in simple_cases() {
            let perturbation =
                compute_third_body_perturbing_acceleration_about_origin(mu, &perturber, &subject());
            assert_relative_eq!(perturbation, expected, max_relative = TOLERANCE);
        }
    }

    #[test]
    fn free_function_matches_manual_difference() {
        // The coincident case is excluded: its direct term is singular.
        for (perturber, mu, expected) in simple_cases().into_iter().skip(1) {
            let manual = compute_gravitational_acceleration(&subject(), mu, &perturber)
                - compute_gravitational_acceleration(&Vector3::zeros(), mu, &perturber);
            assert_relative_eq!(manual, expected, max_relative = TOLERANCE);
        }
    }

    #[test]
    fn model_matches_fixtures() {
        for (perturber, mu, expected) in simple_cases() {
            let mut model = ThirdBodyGravity::about_origin(
                constant(subject()),
                constant(perturber),
                constant(mu),
            );

            model.update(0.0).expect("should update");

            assert_relative_eq!(
                model.acceleration().unwrap(),
                expected,
                max_relative = TOLERANCE
            );
        }
    }

    #[test]
    fn doubling_parameter_doubles_perturbation() {
        let perturber = Vector3::new(5.0, 0.0, 0.0);
        let single =
            compute_third_body_perturbing_acceleration_about_origin(1.0, &perturber, &subject());
        let double =
            compute_third_body_perturbing_acceleration_about_origin(2.0, &perturber, &subject());

        assert_eq!(double, 2.0 * single);
    }

    #[test]
    fn subject_at_central_body_is_exactly_zero() {
        let perturbers = [
            (Vector3::new(3.0, 0.0, 0.0), 1.0),
            (Vector3::new(-1.0e8, 2.5e7, 3.0e6), 4.9e12),
            (Vector3::new(0.1, -0.2, 0.3), 1.327e20),
        ];
        let central = Vector3::new(1.0e3, -2.0e3, 5.0e2);

        for (perturber, mu) in perturbers {
            let perturbation =
                compute_third_body_perturbing_acceleration(mu, &perturber, &central, &central);
            assert_eq!(perturbation, Vector3::zeros());

            let mut model = ThirdBodyGravity::new(
                constant(central),
                constant(central),
                constant(perturber),
                constant(mu),
            );
            model.update(0.0).unwrap();
            assert_eq!(model.acceleration().unwrap(), Vector3::zeros());
        }
    }

    /// Near-geostationary subject perturbed by a Moon-like body.
    #[test]
    fn realistic_perturbation() {
        let tolerance = 1e-14;
        let subject = Vector3::new(-40_000_000.0, 9_000_000.0, -9_500_000.0);
        let perturber = Vector3::new(25_000_000.0, -380_000_000.0, -55_000_000.0);
        let mu = 4900.0e9;
        let expected = Vector3::new(
            2.939_463_880_204_455_286_453_4e-6,
            2.225_394_863_634_471_446_284_4e-6,
            1.168_006_624_931_439_939_980_6e-6,
        );

        let perturbation =
            compute_third_body_perturbing_acceleration_about_origin(mu, &perturber, &subject);
        assert_relative_eq!(perturbation, expected, max_relative = tolerance);

        // Same geometry shifted into a barycentric frame.
        let earth = Vector3::new(100.0e9, -110.0e9, 3.0e9);
        let perturbation = compute_third_body_perturbing_acceleration(
            mu,
            &(perturber + earth),
            &(subject + earth),
            &earth,
        );
        assert_relative_eq!(perturbation, expected, max_relative = tolerance);

        let mut model = ThirdBodyGravity::new(
            constant(subject + earth),
            constant(earth),
            constant(perturber + earth),
            constant(mu),
        );
        model.update(0.0).unwrap();
        assert_relative_eq!(model.acceleration().unwrap(), expected, max_relative = tolerance);
    }

    #[test]
    fn from_models_composes_direct_and_central_terms() {
        let perturber = constant(Vector3::new(3.0, 0.0, 0.0));
        let mu = constant(1.0);
        let direct = CentralGravity::new(constant(subject()), mu.clone(), perturber.clone());
        let central = CentralGravity::new(constant(Vector3::zeros()), mu, perturber);

        let mut model = ThirdBodyGravity::from_models(direct, central);
        assert!(model.shares_perturber_providers());
        model.update(0.0).unwrap();

        let direct = model.direct_model().acceleration().unwrap();
        let central = model.central_body_model().acceleration().unwrap();
        assert_eq!(model.acceleration().unwrap(), direct - central);
    }

    #[test]
    fn provider_sharing_is_detected() {
        let shared = ThirdBodyGravity::about_origin(
            constant(subject()),
            constant(Vector3::new(3.0, 0.0, 0.0)),
            constant(1.0),
        );
        assert!(shared.shares_perturber_providers());

        let direct = CentralGravity::new(
            constant(subject()),
            constant(1.0),
            constant(Vector3::new(3.0, 0.0, 0.0)),
        );
        let central = CentralGravity::new(
            constant(Vector3::zeros()),
            constant(1.0),
            constant(Vector3::new(3.0, 0.0, 0.0)),
        );
        let separate = ThirdBodyGravity::from_models(direct, central);
        assert!(!separate.shares_perturber_providers());
    }

    #[test]
    fn moving_perturber_is_tracked() {
        let perturber: Provider<Vector3<f64>> =
            Arc::new(|t: f64| Vector3::new(3.0 + 2.0 * t, 0.0, 0.0));
        let mut model =
            ThirdBodyGravity::about_origin(constant(subject()), perturber, constant(1.0));

        model.update(0.0).unwrap();
        assert_relative_eq!(
            model.acceleration().unwrap(),
            Vector3::new(-1.111_111_111_111_111_1, 0.0, 0.0),
            max_relative = TOLERANCE
        );

        model.update(1.0).unwrap();
        assert_relative_eq!(
            model.acceleration().unwrap(),
            Vector3::new(0.96, 0.0, 0.0),
            max_relative = TOLERANCE
        );
    }

    #[test]
    fn read_before_update_is_rejected() {
        let model = ThirdBodyGravity::about_origin(
            constant(subject()),
            constant(Vector3::new(5.0, 0.0, 0.0)),
            constant(1.0),
        );

        assert!(matches!(
            model.acceleration(),
            Err(ModelError::NotUpdated { .. })
        ));
    }
}
