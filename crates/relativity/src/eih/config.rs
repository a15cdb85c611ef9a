use std::fmt;

use orrery_core::{ScalarFunction, constant_scalar, units::SPEED_OF_LIGHT};
use thiserror::Error;

/// Settings for the EIH engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EihSettings {
    speed_of_light: f64,
}

/// Errors that can occur when validating EIH settings.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("speed of light must be positive, got {0}")]
    SpeedOfLight(f64),
}

impl Default for EihSettings {
    fn default() -> Self {
        Self {
            speed_of_light: SPEED_OF_LIGHT,
        }
    }
}

impl EihSettings {
    /// Creates settings with a validated speed of light (m/s).
    ///
    /// `f64::INFINITY` is accepted and switches every post-Newtonian
    /// correction off, leaving the exact Newtonian N-body sum.
    ///
    /// # Errors
    ///
    /// Returns an error if `speed_of_light` is NaN, zero, or negative.
    pub fn new(speed_of_light: f64) -> Result<Self, ConfigError> {
        if speed_of_light.is_nan() || speed_of_light <= 0.0 {
            return Err(ConfigError::SpeedOfLight(speed_of_light));
        }
        Ok(Self { speed_of_light })
    }

    /// Settings with an infinite speed of light.
    #[must_use]
    pub fn newtonian() -> Self {
        Self {
            speed_of_light: f64::INFINITY,
        }
    }

    #[must_use]
    pub fn speed_of_light(&self) -> f64 {
        self.speed_of_light
    }

    /// Returns `1 / c²`, which is zero for an infinite speed of light.
    #[must_use]
    pub fn inverse_square_speed_of_light(&self) -> f64 {
        self.speed_of_light.powi(-2)
    }
}

/// The PPN parameters γ (space curvature per unit mass) and β
/// (non-linearity of gravity).
///
/// Both are functions so that an estimation process can vary them between
/// updates. The engine re-reads them on every update and rebuilds its
/// multipliers only when a value changed.
#[derive(Clone)]
pub struct PpnParameters {
    gamma: ScalarFunction,
    beta: ScalarFunction,
}

impl PpnParameters {
    #[must_use]
    pub fn new(gamma: ScalarFunction, beta: ScalarFunction) -> Self {
        Self { gamma, beta }
    }

    /// Fixed values of γ and β.
    #[must_use]
    pub fn constant(gamma: f64, beta: f64) -> Self {
        Self::new(constant_scalar(gamma), constant_scalar(beta))
    }

    /// General relativity: γ = β = 1.
    #[must_use]
    pub fn general_relativity() -> Self {
        Self::constant(1.0, 1.0)
    }

    #[must_use]
    pub fn gamma(&self) -> f64 {
        (self.gamma)()
    }

    #[must_use]
    pub fn beta(&self) -> f64 {
        (self.beta)()
    }
}

impl Default for PpnParameters {
    fn default() -> Self {
        Self::general_relativity()
    }
}

impl fmt::Debug for PpnParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PpnParameters")
            .field("gamma", &self.gamma())
            .field("beta", &self.beta())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn rejects_invalid_speed_of_light() {
        assert_eq!(EihSettings::new(0.0), Err(ConfigError::SpeedOfLight(0.0)));
        assert!(EihSettings::new(-1.0).is_err());
        assert!(EihSettings::new(f64::NAN).is_err());
    }

    #[test]
    fn infinite_speed_of_light_removes_corrections() {
        let settings = EihSettings::new(f64::INFINITY).expect("infinity is allowed");

        assert_eq!(settings, EihSettings::newtonian());
        assert_eq!(settings.inverse_square_speed_of_light(), 0.0);
    }

    #[test]
    fn default_uses_si_speed_of_light() {
        let settings = EihSettings::default();

        assert_eq!(settings.speed_of_light(), 299_792_458.0);
        assert_eq!(
            settings.inverse_square_speed_of_light(),
            299_792_458.0_f64.powi(-2)
        );
    }

    #[test]
    fn ppn_parameters_read_functions() {
        let ppn = PpnParameters::new(Arc::new(|| 0.5), constant_scalar(2.0));
        assert_eq!(ppn.gamma(), 0.5);
        assert_eq!(ppn.beta(), 2.0);

        let gr = PpnParameters::default();
        assert_eq!((gr.gamma(), gr.beta()), (1.0, 1.0));
    }
}
