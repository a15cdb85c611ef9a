use crate::{CartesianState, StateDerivative};

/// A trait for types that can be stepped using their derivative.
///
/// Integrators that consume accelerations work with any state implementing
/// this trait by stepping it via `derivative * delta`. `Delta` is usually a
/// time step in seconds, or non-dimensional time for rotating-frame problems.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

impl StepIntegrable<f64> for CartesianState {
    type Derivative = StateDerivative;

    fn step(&self, derivative: StateDerivative, delta: f64) -> Self {
        Self {
            position: self.position + derivative.velocity * delta,
            velocity: self.velocity + derivative.acceleration * delta,
        }
    }
}
