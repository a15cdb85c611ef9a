use std::{collections::HashMap, fmt};

use orrery_core::{CartesianState, Provider, constant, vector::is_finite};

use super::{Error, index::BodyIndex};

/// The providers describing one body to the EIH engine.
#[derive(Clone)]
pub struct BodyProviders {
    pub name: String,
    /// Position (m) and velocity (m/s) at a time (s).
    pub state: Provider<CartesianState>,
    /// Gravitational parameter (m³/s²) at a time (s).
    pub gravitational_parameter: Provider<f64>,
}

impl BodyProviders {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        state: Provider<CartesianState>,
        gravitational_parameter: Provider<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            state,
            gravitational_parameter,
        }
    }

    /// A body with a fixed state and gravitational parameter.
    #[must_use]
    pub fn fixed(
        name: impl Into<String>,
        state: CartesianState,
        gravitational_parameter: f64,
    ) -> Self {
        Self::new(name, constant(state), constant(gravitational_parameter))
    }
}

impl fmt::Debug for BodyProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyProviders")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Provider values read for one body at one time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct BodySample {
    pub(super) gravitational_parameter: f64,
    pub(super) state: CartesianState,
}

/// Reorders `bodies` so that entry `i` belongs to the body at index `i`.
pub(super) fn order_providers(
    index: &BodyIndex,
    bodies: Vec<BodyProviders>,
) -> Result<Vec<BodyProviders>, Error> {
    let mut by_name = HashMap::with_capacity(bodies.len());
    for body in bodies {
        if by_name.contains_key(&body.name) {
            return Err(Error::DuplicateBody(body.name));
        }
        by_name.insert(body.name.clone(), body);
    }

    let ordered = index
        .names()
        .iter()
        .map(|name| {
            by_name
                .remove(name)
                .ok_or_else(|| Error::UnknownBody(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if !by_name.is_empty() {
        log::debug!(
            "ignoring providers for {} bodies that are neither accelerated nor accelerating",
            by_name.len()
        );
    }

    Ok(ordered)
}

/// Evaluates every body's providers at `time`.
pub(super) fn sample(providers: &[BodyProviders], time: f64) -> Result<Vec<BodySample>, Error> {
    providers
        .iter()
        .map(|body| {
            let gravitational_parameter = (body.gravitational_parameter)(time);
            if !gravitational_parameter.is_finite() {
                return Err(Error::InvalidGravitationalParameter {
                    body: body.name.clone(),
                    value: gravitational_parameter,
                });
            }

            let state = (body.state)(time);
            if !is_finite(&state.position) || !is_finite(&state.velocity) {
                return Err(Error::NonFiniteState(body.name.clone()));
            }

            Ok(BodySample {
                gravitational_parameter,
                state,
            })
        })
        .collect()
}
