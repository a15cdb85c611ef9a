//! Einstein-Infeld-Hoffmann (EIH) N-body accelerations.
//!
//! # Equations
//!
//! The engine evaluates the first post-Newtonian equations of motion of the
//! PPN formalism for point masses. With `r_ij = r_j − r_i`, `v_ij = v_j − v_i`,
//! local potentials `U_i = Σ_k μ_k / r_ik` and Newtonian accelerations
//! `a_i^N = Σ_k μ_k r_ik / r_ik³`, the acceleration of body `i` is
//!
//! ```text
//! a_i = Σ_j μ_j r_ij / r_ij³ · [1 + S_ij]
//!     + Σ_j μ_j / (c² r_ij³) · [r_ij · ((2 + 2γ) v_i − (1 + 2γ) v_j)] v_ij
//!     + Σ_j (3 + 4γ) / (2c²) · μ_j a_j^N / r_ij
//!
//! S_ij = −2(β + γ)/c² U_i − (2β − 1)/c² U_j + γ/c² v_i² + (1 + γ)/c² v_j²
//!        − 2(1 + γ)/c² v_i · v_j − 3/(2c²) (r_ij · v_j)² / r_ij²
//!        + 1/(2c²) r_ij · a_j^N
//! ```
//!
//! where every sum runs over the accelerating bodies other than the one
//! being summed for.
//!
//! # Bodies
//!
//! Two name lists select the bodies. *Accelerated* bodies receive an
//! acceleration; *accelerating* bodies exert gravity. The lists may coincide,
//! overlap, or be disjoint. Every body in either list is given a stable index
//! at construction: accelerated bodies first in the order listed, then
//! accelerating-only bodies. All index-based accessors use these indices.
//!
//! # Lifecycle
//!
//! [`EihEquations::update`] reads every provider once, rebuilds all caches,
//! and computes the accelerations. Accessors are pure reads of the last
//! update and return [`Error::NotUpdated`] before the first one or after
//! [`EihEquations::reset`].

mod adapter;
mod assembly;
mod body;
mod config;
mod error;
mod geometry;
mod index;
mod multipliers;


use std::fmt;

use nalgebra::Vector3;

pub use adapter::EihBodyAcceleration;
pub use assembly::{ScalarCorrections, VectorCorrections};
pub use body::BodyProviders;
pub use config::{ConfigError, EihSettings, PpnParameters};
pub use error::Error;
pub use multipliers::ExpansionMultipliers;

use assembly::{Assembly, assemble};
use body::{BodySample, order_providers, sample};
use geometry::{Aggregates, PairwiseGeometry};
use index::BodyIndex;

/// Everything computed by one update.
#[derive(Debug, Clone, PartialEq)]
struct Cache {
    time: f64,
    bodies: Vec<BodySample>,
    geometry: PairwiseGeometry,
    aggregates: Aggregates,
    assembly: Assembly,
}

/// Post-Newtonian N-body acceleration engine.
pub struct EihEquations {
    index: BodyIndex,
    providers: Vec<BodyProviders>,
    ppn: PpnParameters,
    settings: EihSettings,
    multipliers: Option<ExpansionMultipliers>,
    multiplier_refreshes: usize,
    evaluations: u64,
    cache: Option<Cache>,
}

impl EihEquations {
    /// Creates an engine for the named accelerated and accelerating bodies.
    ///
    /// `bodies` must hold providers for every named body. Providers for
    /// bodies in neither list are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a name appears twice in one list, if two providers
    /// share a name, or if a listed body has no providers.
    pub fn new(
        accelerated: &[&str],
        accelerating: &[&str],
        bodies: Vec<BodyProviders>,
        ppn: PpnParameters,
        settings: EihSettings,
    ) -> Result<Self, Error> {
        let index = BodyIndex::allocate(accelerated, accelerating)?;
        let providers = order_providers(&index, bodies)?;

        log::debug!(
            "created EIH engine: {} accelerated, {} accelerating, {} distinct bodies, c = {} m/s",
            index.accelerated_count(),
            index.accelerating().len(),
            index.len(),
            settings.speed_of_light(),
        );

        Ok(Self {
            index,
            providers,
            ppn,
            settings,
            multipliers: None,
            multiplier_refreshes: 0,
            evaluations: 0,
            cache: None,
        })
    }

    /// Reads every provider at `time` and recomputes all accelerations.
    ///
    /// On error the previous results are discarded and reads return
    /// [`Error::NotUpdated`] until the next successful update.
    ///
    /// # Errors
    ///
    /// Returns an error if a provider yields a non-finite gravitational
    /// parameter or state, if a PPN parameter is not finite, or if two
    /// bodies of an evaluated pair coincide.
    pub fn update(&mut self, time: f64) -> Result<(), Error> {
        log::trace!("updating EIH accelerations at t = {time}");
        self.cache = None;
        self.evaluations += 1;

        let bodies = sample(&self.providers, time)?;
        let geometry = PairwiseGeometry::compute(&self.index, &bodies)?;
        let aggregates = Aggregates::compute(&self.index, &bodies, &geometry);
        let multipliers = self.refresh_multipliers()?;
        let assembly = assemble(&self.index, &bodies, &geometry, &aggregates, &multipliers);

        self.cache = Some(Cache {
            time,
            bodies,
            geometry,
            aggregates,
            assembly,
        });
        Ok(())
    }

    /// Discards the results of the last update.
    ///
    /// Reads return [`Error::NotUpdated`] until the next update, and adapters
    /// sharing the engine refresh it on their next update even at an
    /// unchanged time.
    pub fn reset(&mut self) {
        self.cache = None;
    }

    /// Number of update attempts so far.
    ///
    /// Adapters compare it against the value they last saw to tell whether
    /// another adapter has already refreshed the engine.
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Rebuilds the multipliers on the first call and whenever γ or β changed.
    fn refresh_multipliers(&mut self) -> Result<ExpansionMultipliers, Error> {
        let gamma = self.ppn.gamma();
        let beta = self.ppn.beta();
        for (parameter, value) in [("gamma", gamma), ("beta", beta)] {
            if !value.is_finite() {
                return Err(Error::InvalidPpnParameter { parameter, value });
            }
        }

        match self.multipliers {
            Some(multipliers) if multipliers.matches(gamma, beta) => Ok(multipliers),
            _ => {
                log::debug!("recomputing EIH expansion multipliers for γ = {gamma}, β = {beta}");
                let multipliers = ExpansionMultipliers::new(
                    gamma,
                    beta,
                    self.settings.inverse_square_speed_of_light(),
                );
                self.multipliers = Some(multipliers);
                self.multiplier_refreshes += 1;
                Ok(multipliers)
            }
        }
    }

    fn cache(&self) -> Result<&Cache, Error> {
        self.cache.as_ref().ok_or(Error::NotUpdated)
    }

    fn check_body(&self, index: usize) -> Result<(), Error> {
        if index < self.index.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                count: self.index.len(),
            })
        }
    }

    fn check_pair(&self, i: usize, j: usize) -> Result<(), Error> {
        self.check_body(i)?;
        self.check_body(j)?;
        if i == j {
            return Err(Error::SelfPair(i));
        }
        if !self.index.is_accelerating(i) && !self.index.is_accelerating(j) {
            return Err(Error::UnevaluatedPair {
                first: i,
                second: j,
            });
        }
        Ok(())
    }

    /// Checks that `i` is accelerated and `j` accelerating.
    fn check_term(&self, i: usize, j: usize) -> Result<(), Error> {
        self.check_pair(i, j)?;
        if !self.index.is_accelerated(i) {
            return Err(Error::NotAccelerated(self.index.name(i).to_owned()));
        }
        if !self.index.is_accelerating(j) {
            return Err(Error::NotAccelerating(self.index.name(j).to_owned()));
        }
        Ok(())
    }

    /// Returns the acceleration (m/s²) of the accelerated body at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error before the first update or if `index` is not an
    /// accelerated body.
    pub fn acceleration(&self, index: usize) -> Result<Vector3<f64>, Error> {
        let cache = self.cache()?;
        self.check_body(index)?;
        if !self.index.is_accelerated(index) {
            return Err(Error::NotAccelerated(self.index.name(index).to_owned()));
        }
        Ok(cache.assembly.accelerations[index])
    }

    /// Returns the acceleration (m/s²) of the named accelerated body.
    ///
    /// # Errors
    ///
    /// Returns an error before the first update or if `name` is not an
    /// accelerated body.
    pub fn acceleration_of(&self, name: &str) -> Result<Vector3<f64>, Error> {
        let index = self
            .index_of(name)
            .ok_or_else(|| Error::UnknownBody(name.to_owned()))?;
        self.acceleration(index)
    }

    /// Returns the accelerations of all accelerated bodies, by index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotUpdated`] before the first update.
    pub fn accelerations(&self) -> Result<&[Vector3<f64>], Error> {
        Ok(&self.cache()?.assembly.accelerations)
    }

    /// Returns the index allocated to `name`, if it is in either list.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.index_of(name)
    }

    /// Names of every body, by index.
    #[must_use]
    pub fn body_names(&self) -> &[String] {
        self.index.names()
    }

    /// Names of the accelerated bodies, in the order they were listed.
    #[must_use]
    pub fn accelerated_bodies(&self) -> &[String] {
        &self.index.names()[..self.index.accelerated_count()]
    }

    /// Names of the accelerating bodies, in the order they were listed.
    #[must_use]
    pub fn accelerating_bodies(&self) -> Vec<&str> {
        self.index
            .accelerating()
            .iter()
            .map(|&j| self.index.name(j))
            .collect()
    }

    #[must_use]
    pub fn ppn_parameters(&self) -> &PpnParameters {
        &self.ppn
    }

    #[must_use]
    pub fn settings(&self) -> &EihSettings {
        &self.settings
    }

    /// Returns the time of the last successful update.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotUpdated`] before the first update.
    pub fn current_time(&self) -> Result<f64, Error> {
        Ok(self.cache()?.time)
    }

    /// Returns the multipliers used by the last update.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotUpdated`] before the first update.
    pub fn multipliers(&self) -> Result<ExpansionMultipliers, Error> {
        self.cache()?;
        self.multipliers.ok_or(Error::NotUpdated)
    }

    /// Number of times the multipliers have been rebuilt.
    #[must_use]
    pub fn multiplier_refreshes(&self) -> usize {
        self.multiplier_refreshes
    }

    /// Returns the position (m) of body `i`.
    ///
    /// # Errors
    ///
    /// Returns an error before the first update or if `i` is out of range.
    pub fn position(&self, i: usize) -> Result<Vector3<f64>, Error> {
        let cache = self.cache()?;
        self.check_body(i)?;
        Ok(cache.bodies[i].state.position)
    }

    /// Returns the velocity (m/s) of body `i`.
    ///
    /// # Errors
    ///
    /// Returns an error before the first update or if `i` is out of range.
    pub fn velocity(&self, i: usize) -> Result<Vector3<f64>, Error> {
        let cache = self.cache()?;
        self.check_body(i)?;
        Ok(cache.bodies[i].state.velocity)
    }

    /// Returns the gravitational parameter (m³/s²) of body `i`.
    ///
    /// # Errors
    ///
    /// Returns an error before the first update or if `i` is out of range.
    pub fn gravitational_parameter(&self, i: usize) -> Result<f64, Error> {
        let cache = self.cache()?;
        self.check_body(i)?;
        Ok(cache.bodies[i].gravitational_parameter)
    }

    /// Returns `U_i`, the potential at body `i` due to every accelerating
    /// body other than `i`.
    ///
    /// # Errors
    ///
    /// Returns an error before the first update or if `i` is out of range.
    pub fn local_potential(&self, i: usize) -> Result<f64, Error> {
        let cache = self.cache()?;
        self.check_body(i)?;
        Ok(cache.aggregates.local_potential[i])
    }

    /// Returns `a_i^N`, the Newtonian acceleration of body `i` due to every
    /// accelerating body other than `i`.
    ///
    /// # Errors
    ///
    /// Returns an error before the first update or if `i` is out of range.
    pub fn total_point_mass_acceleration(&self, i: usize) -> Result<Vector3<f64>, Error> {
        let cache = self.cache()?;
        self.check_body(i)?;
        Ok(cache.aggregates.total_point_mass_acceleration[i])
    }

    /// Returns `v_i · v_i`.
    ///
    /// # Errors
    ///
    /// Returns an error before the first update or if `i` is out of range.
    pub fn squared_speed(&self, i: usize) -> Result<f64, Error> {
        let cache = self.cache()?;
        self.check_body(i)?;
        Ok(cache.aggregates.squared_speed[i])
    }

    /// Returns `r_ij = r_j − r_i`.
    ///
    /// # Errors
    ///
    /// Returns an error before the first update, for `i == j`, or for a pair
    /// that was not evaluated.
    pub fn relative_position(&self, i: usize, j: usize) -> Result<Vector3<f64>, Error> {
        let cache = self.cache()?;
        self.check_pair(i, j)?;
        Ok(cache.geometry.relative_position.get(i, j))
    }

    /// Returns `v_ij = v_j − v_i`.
    ///
    /// # Errors
    ///
    /// See [`relative_position`](Self::relative_position).
    pub fn relative_velocity(&self, i: usize, j: usize) -> Result<Vector3<f64>, Error> {
        let cache = self.cache()?;
        self.check_pair(i, j)?;
        Ok(cache.geometry.relative_velocity.get(i, j))
    }

    /// Returns `|r_ij|`.
    ///
    /// # Errors
    ///
    /// See [`relative_position`](Self::relative_position).
    pub fn distance(&self, i: usize, j: usize) -> Result<f64, Error> {
        let cache = self.cache()?;
        self.check_pair(i, j)?;
        Ok(cache.geometry.distance.get(i, j))
    }

    /// Returns `1 / |r_ij|²`.
    ///
    /// # Errors
    ///
    /// See [`relative_position`](Self::relative_position).
    pub fn inverse_square_distance(&self, i: usize, j: usize) -> Result<f64, Error> {
        let cache = self.cache()?;
        self.check_pair(i, j)?;
        Ok(cache.geometry.inverse_square_distance.get(i, j))
    }

    /// Returns the line-of-sight speed `r_ij · v_j`.
    ///
    /// # Errors
    ///
    /// See [`relative_position`](Self::relative_position).
    pub fn line_of_sight_speed(&self, i: usize, j: usize) -> Result<f64, Error> {
        let cache = self.cache()?;
        self.check_pair(i, j)?;
        Ok(cache.geometry.line_of_sight_speed.get(i, j))
    }

    /// Returns `v_i · v_j`.
    ///
    /// # Errors
    ///
    /// See [`relative_position`](Self::relative_position).
    pub fn velocity_inner_product(&self, i: usize, j: usize) -> Result<f64, Error> {
        let cache = self.cache()?;
        self.check_pair(i, j)?;
        Ok(cache.geometry.velocity_inner_product.get(i, j))
    }

    /// Returns `μ_j / |r_ij|`, the potential at `i` due to `j` alone.
    ///
    /// # Errors
    ///
    /// See [`relative_position`](Self::relative_position).
    pub fn single_source_potential(&self, i: usize, j: usize) -> Result<f64, Error> {
        let cache = self.cache()?;
        self.check_pair(i, j)?;
        Ok(cache.geometry.single_source_potential.get(i, j))
    }

    /// Returns `μ_j r_ij / |r_ij|³`, the Newtonian pull of `j` alone on `i`.
    ///
    /// # Errors
    ///
    /// See [`relative_position`](Self::relative_position).
    pub fn single_point_mass_acceleration(
        &self,
        i: usize,
        j: usize,
    ) -> Result<Vector3<f64>, Error> {
        let cache = self.cache()?;
        self.check_pair(i, j)?;
        Ok(cache.geometry.single_point_mass_acceleration.get(i, j))
    }

    /// Returns `1 + S_ij` for accelerated `i` and accelerating `j`.
    ///
    /// # Errors
    ///
    /// Returns an error before the first update, or if `i` is not
    /// accelerated or `j` is not accelerating.
    pub fn scalar_term_multiplier(&self, i: usize, j: usize) -> Result<f64, Error> {
        let cache = self.cache()?;
        self.check_term(i, j)?;
        Ok(cache.assembly.scalar_term_multiplier.get(i, j))
    }

    /// Returns the coefficient of `v_ij` in the velocity-dependent term for
    /// accelerated `i` and accelerating `j`.
    ///
    /// # Errors
    ///
    /// See [`scalar_term_multiplier`](Self::scalar_term_multiplier).
    pub fn vector_term_multiplier(&self, i: usize, j: usize) -> Result<f64, Error> {
        let cache = self.cache()?;
        self.check_term(i, j)?;
        Ok(cache.assembly.vector_term_multiplier.get(i, j))
    }

    /// Returns the individual terms of `S_ij`.
    ///
    /// # Errors
    ///
    /// See [`scalar_term_multiplier`](Self::scalar_term_multiplier).
    pub fn scalar_corrections(&self, i: usize, j: usize) -> Result<ScalarCorrections, Error> {
        let cache = self.cache()?;
        self.check_term(i, j)?;
        Ok(cache.assembly.scalar_corrections.get(i, j))
    }

    /// Returns the velocity-dependent vector terms (m/s²) of the pull of `j`
    /// on `i`.
    ///
    /// # Errors
    ///
    /// See [`scalar_term_multiplier`](Self::scalar_term_multiplier).
    pub fn vector_corrections(&self, i: usize, j: usize) -> Result<VectorCorrections, Error> {
        let cache = self.cache()?;
        self.check_term(i, j)?;
        Ok(cache.assembly.vector_corrections.get(i, j))
    }
}

impl fmt::Debug for EihEquations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EihEquations")
            .field("bodies", &self.index.names())
            .field("accelerated_count", &self.index.accelerated_count())
            .field("ppn", &self.ppn)
            .field("settings", &self.settings)
            .field("time", &self.cache.as_ref().map(|cache| cache.time))
            .finish_non_exhaustive()
    }
}
