//! Circular restricted three-body problem (CR3BP).
//!
//! A massless body moves under the gravity of a primary and a secondary on
//! circular orbits about their barycentre. In the rotating, non-dimensional,
//! barycentric frame the primary sits at `(−μ, 0, 0)` and the secondary at
//! `(1 − μ, 0, 0)`, where `μ` is the mass parameter. The equations of motion
//! are
//!
//! ```text
//! ẍ =  x + 2ẏ − (1 − μ)(x + μ)/r₁³ − μ(x − 1 + μ)/r₂³
//! ÿ =  y − 2ẋ − (1 − μ) y/r₁³      − μ y/r₂³
//! z̈ =        − (1 − μ) z/r₁³      − μ z/r₂³
//! ```
//!
//! The system is autonomous: time never enters the right-hand side.

use nalgebra::{Vector3, Vector6};
use orrery_core::{CartesianState, StateDerivative, units::GravitationalParameter};
use thiserror::Error;

/// Ratio of the secondary's mass to the total system mass.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MassParameter(f64);

/// Errors that can occur when creating a [`MassParameter`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum MassParameterError {
    #[error("mass parameter must be finite and within [0, 1], got {0}")]
    OutOfRange(f64),

    #[error("gravitational parameters must be finite, non-negative, and not both zero")]
    InvalidGravitationalParameters,
}

impl MassParameter {
    /// Creates a validated mass parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not finite or lies outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self, MassParameterError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(MassParameterError::OutOfRange(value))
        }
    }

    /// Computes `μ₂ / (μ₁ + μ₂)` from the gravitational parameters (m³/s²)
    /// of the primary and secondary.
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter is negative or non-finite, or if
    /// both are zero.
    pub fn from_gravitational_parameters(
        primary: f64,
        secondary: f64,
    ) -> Result<Self, MassParameterError> {
        let valid = |mu: f64| mu.is_finite() && mu >= 0.0;
        if !valid(primary) || !valid(secondary) || primary + secondary <= 0.0 {
            return Err(MassParameterError::InvalidGravitationalParameters);
        }
        Self::new(secondary / (primary + secondary))
    }

    /// Computes the mass parameter from dimensioned gravitational parameters.
    ///
    /// # Errors
    ///
    /// See [`from_gravitational_parameters`](Self::from_gravitational_parameters).
    pub fn from_quantities(
        primary: GravitationalParameter,
        secondary: GravitationalParameter,
    ) -> Result<Self, MassParameterError> {
        Self::from_gravitational_parameters(primary.value, secondary.value)
    }

    /// Returns the raw ratio.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// State derivative model of the circular restricted three-body problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestrictedThreeBody {
    mass_parameter: MassParameter,
}

impl RestrictedThreeBody {
    #[must_use]
    pub fn new(mass_parameter: MassParameter) -> Self {
        Self { mass_parameter }
    }

    #[must_use]
    pub fn mass_parameter(&self) -> MassParameter {
        self.mass_parameter
    }

    /// Position of the primary in the rotating frame.
    #[must_use]
    pub fn primary_position(&self) -> Vector3<f64> {
        Vector3::new(-self.mass_parameter.0, 0.0, 0.0)
    }

    /// Position of the secondary in the rotating frame.
    #[must_use]
    pub fn secondary_position(&self) -> Vector3<f64> {
        Vector3::new(1.0 - self.mass_parameter.0, 0.0, 0.0)
    }

    /// Computes the derivative of `[x, y, z, ẋ, ẏ, ż]`.
    ///
    /// `time` is accepted for uniformity with generic integrators and is
    /// ignored.
    #[must_use]
    pub fn compute_state_derivative(&self, _time: f64, state: &Vector6<f64>) -> Vector6<f64> {
        let mu = self.mass_parameter.0;
        let (x, y, z) = (state[0], state[1], state[2]);
        let (vx, vy, vz) = (state[3], state[4], state[5]);

        let y_squared = y * y;
        let z_squared = z * z;

        let x_to_primary = x + mu;
        let distance_to_primary_cubed =
            (x_to_primary * x_to_primary + y_squared + z_squared).powf(1.5);

        let x_to_secondary = x - (1.0 - mu);
        let distance_to_secondary_cubed =
            (x_to_secondary * x_to_secondary + y_squared + z_squared).powf(1.5);

        let primary_term = (1.0 - mu) / distance_to_primary_cubed;
        // A massless secondary exerts no pull, even at its own position.
        let secondary_term = if mu == 0.0 {
            0.0
        } else {
            mu / distance_to_secondary_cubed
        };

        Vector6::new(
            vx,
            vy,
            vz,
            x - primary_term * x_to_primary - secondary_term * x_to_secondary + 2.0 * vy,
            y * (1.0 - primary_term - secondary_term) - 2.0 * vx,
            -z * (primary_term + secondary_term),
        )
    }

    /// Computes the derivative of a [`CartesianState`].
    #[must_use]
    pub fn state_derivative(&self, time: f64, state: &CartesianState) -> StateDerivative {
        StateDerivative::from_vector(&self.compute_state_derivative(time, &state.to_vector()))
    }

    /// Computes the Jacobi constant `C = x² + y² + 2(1 − μ)/r₁ + 2μ/r₂ − v²`.
    ///
    /// The Jacobi constant is the only integral of motion of the problem and
    /// is conserved along every trajectory.
    #[must_use]
    pub fn jacobi_constant(&self, state: &Vector6<f64>) -> f64 {
        let mu = self.mass_parameter.0;
        let position = state.fixed_rows::<3>(0).into_owned();
        let velocity = state.fixed_rows::<3>(3);

        let distance_to_primary = (position - self.primary_position()).norm();
        let secondary_potential = if mu == 0.0 {
            0.0
        } else {
            2.0 * mu / (position - self.secondary_position()).norm()
        };

        position.x * position.x + position.y * position.y
            + 2.0 * (1.0 - mu) / distance_to_primary
            + secondary_potential
            - velocity.norm_squared()
    }
}
