//! Newtonian gravity models for Orrery.
//!
//! - [`central`]: point-mass gravity between a subject and a source body
//! - [`third_body`]: the perturbing part of a third body's gravity in a
//!   body-centred frame
//! - [`cr3bp`]: the circular restricted three-body problem in the rotating,
//!   non-dimensional frame
//!
//! # Example
//!
//! ```rust
//! use nalgebra::Vector3;
//! use orrery_core::{AccelerationModel, constant};
//! use orrery_gravitation::central::CentralGravity;
//!
//! let mut model = CentralGravity::about_origin(
//!     constant(Vector3::new(7.0e6, 0.0, 0.0)),
//!     constant(3.986_004_418e14),
//! );
//!
//! model.update(0.0).unwrap();
//! let acceleration = model.acceleration().unwrap();
//! assert!(acceleration.x < 0.0);
//! ```

pub mod central;
pub mod cr3bp;
pub mod third_body;

pub use central::CentralGravity;
pub use cr3bp::{MassParameter, MassParameterError, RestrictedThreeBody};
pub use third_body::ThirdBodyGravity;
