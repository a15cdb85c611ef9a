//! Dimensioned quantities used at the edges of the acceleration models.
//!
//! The models themselves work on plain SI `f64` values. These helpers convert
//! masses and gravitational parameters expressed with `uom` into the SI
//! values the models expect.

use uom::{
    si::{
        Quantity, ISQ, SI,
        f64::{Mass, Time, Volume},
        mass::kilogram,
        time::second,
        volume::cubic_meter,
    },
    typenum::{N1, N2, P3, Z0},
};

/// Gravitational parameter `μ = G⋅M`, m³/s² in SI.
pub type GravitationalParameter = Quantity<ISQ<P3, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Universal gravitational constant, m³/kg·s² in SI.
pub type GravitationalConstant = Quantity<ISQ<P3, N1, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Universal gravitational constant (CODATA 2018), m³/kg·s².
pub const UNIVERSAL_GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Creates a gravitational parameter from an SI value in m³/s².
#[must_use]
pub fn gravitational_parameter(value: f64) -> GravitationalParameter {
    Volume::new::<cubic_meter>(value) / (Time::new::<second>(1.0) * Time::new::<second>(1.0))
}

/// Returns the universal gravitational constant as a dimensioned quantity.
#[must_use]
pub fn universal_gravitational_constant() -> GravitationalConstant {
    Volume::new::<cubic_meter>(UNIVERSAL_GRAVITATIONAL_CONSTANT)
        / (Mass::new::<kilogram>(1.0) * Time::new::<second>(1.0) * Time::new::<second>(1.0))
}

/// Computes `μ = G⋅M` for a body of the given mass.
#[must_use]
pub fn gravitational_parameter_from_mass(mass: Mass) -> GravitationalParameter {
    universal_gravitational_constant() * mass
}
