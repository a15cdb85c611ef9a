//! Core traits and types for Orrery.
//!
//! This crate defines the shared abstractions that the gravitation and
//! relativity crates build on:
//!
//! - [`CartesianState`] and [`StateDerivative`]: position/velocity pairs and
//!   their time derivatives, steppable through [`StepIntegrable`]
//! - [`Provider`]: a late-bound, possibly time-varying input such as a body
//!   position or gravitational parameter
//! - [`AccelerationModel`]: the update-then-read capability shared by every
//!   acceleration model, and [`CompositeAcceleration`] for summing them
//! - [`units`]: dimensioned helpers built on `uom`
//! - [`vector`]: small numeric helpers shared by the models

mod error;
mod model;
mod provider;
mod state;
mod step;

pub mod units;
pub mod vector;

pub use error::ModelError;
pub use model::{AccelerationModel, CompositeAcceleration};
pub use provider::{Provider, ScalarFunction, constant, constant_scalar};
pub use state::{CartesianState, StateDerivative};
pub use step::StepIntegrable;
