use std::ops::{Add, Mul};

use nalgebra::{Vector3, Vector6};

/// Position and velocity of a body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CartesianState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

/// Time derivative of a [`CartesianState`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StateDerivative {
    pub velocity: Vector3<f64>,
    pub acceleration: Vector3<f64>,
}

impl CartesianState {
    #[must_use]
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self { position, velocity }
    }

    /// Creates a state at rest at `position`.
    #[must_use]
    pub fn at_rest(position: Vector3<f64>) -> Self {
        Self::new(position, Vector3::zeros())
    }

    /// Packs the state as `[x, y, z, vx, vy, vz]`.
    #[must_use]
    pub fn to_vector(&self) -> Vector6<f64> {
        let mut packed = Vector6::zeros();
        packed.fixed_rows_mut::<3>(0).copy_from(&self.position);
        packed.fixed_rows_mut::<3>(3).copy_from(&self.velocity);
        packed
    }

    /// Unpacks a `[x, y, z, vx, vy, vz]` vector.
    #[must_use]
    pub fn from_vector(packed: &Vector6<f64>) -> Self {
        Self {
            position: packed.fixed_rows::<3>(0).into_owned(),
            velocity: packed.fixed_rows::<3>(3).into_owned(),
        }
    }
}

impl StateDerivative {
    #[must_use]
    pub fn new(velocity: Vector3<f64>, acceleration: Vector3<f64>) -> Self {
        Self {
            velocity,
            acceleration,
        }
    }

    /// Unpacks a `[vx, vy, vz, ax, ay, az]` vector.
    #[must_use]
    pub fn from_vector(packed: &Vector6<f64>) -> Self {
        Self {
            velocity: packed.fixed_rows::<3>(0).into_owned(),
            acceleration: packed.fixed_rows::<3>(3).into_owned(),
        }
    }
}

impl Add for StateDerivative {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            velocity: self.velocity + rhs.velocity,
            acceleration: self.acceleration + rhs.acceleration,
        }
    }
}

impl Mul<f64> for StateDerivative {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            velocity: self.velocity * rhs,
            acceleration: self.acceleration * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_and_unpacks() {
        let state = CartesianState::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0));

        let packed = state.to_vector();

        assert_eq!(packed, Vector6::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
        assert_eq!(CartesianState::from_vector(&packed), state);
    }

    #[test]
    fn derivative_arithmetic() {
        let d = StateDerivative::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 2.0, 0.0));

        let combined = d + d * 0.5;

        assert_eq!(combined.velocity, Vector3::new(1.5, 0.0, 0.0));
        assert_eq!(combined.acceleration, Vector3::new(0.0, 3.0, 0.0));
    }
}
