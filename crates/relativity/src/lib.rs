//! Post-Newtonian gravity for Orrery.
//!
//! The [`eih`] module evaluates the Einstein-Infeld-Hoffmann equations of
//! motion for a set of mutually gravitating point masses, parameterised by
//! the PPN parameters γ and β.
//!
//! # Example
//!
//! ```rust
//! use nalgebra::Vector3;
//! use orrery_core::CartesianState;
//! use orrery_relativity::eih::{BodyProviders, EihEquations, EihSettings, PpnParameters};
//!
//! let bodies = vec![
//!     BodyProviders::fixed("Sun", CartesianState::default(), 1.327_124_400_18e20),
//!     BodyProviders::fixed(
//!         "Mercury",
//!         CartesianState::new(Vector3::new(5.8e10, 0.0, 0.0), Vector3::new(0.0, 4.7e4, 0.0)),
//!         2.203_2e13,
//!     ),
//! ];
//!
//! let mut eih = EihEquations::new(
//!     &["Mercury"],
//!     &["Sun"],
//!     bodies,
//!     PpnParameters::general_relativity(),
//!     EihSettings::default(),
//! )
//! .unwrap();
//!
//! eih.update(0.0).unwrap();
//! let acceleration = eih.acceleration_of("Mercury").unwrap();
//! assert!(acceleration.x < 0.0);
//! ```

pub mod eih;

pub use eih::{
    BodyProviders, ConfigError, EihBodyAcceleration, EihEquations, EihSettings, Error,
    ExpansionMultipliers, PpnParameters, ScalarCorrections, VectorCorrections,
};
